//! Sidebar: Safe selector, summary and navigation

use eframe::egui;
use safe_wallet_core::navigation::NavIcon;
use safe_wallet_core::{derive_navigation, ImplementationVersionState, NavContext, NAV_ITEMS};

use crate::state::{chain_label, SafeContext, SidebarState, CHAINS};
use crate::ui;

/// Sidebar action returned after rendering
pub enum SidebarAction {
    None,
    LoadSafe,
    Navigate { href: String, label: &'static str },
}

fn icon(icon: NavIcon) -> &'static str {
    match icon {
        NavIcon::Home => "🏠",
        NavIcon::Assets => "💰",
        NavIcon::Transactions => "🔁",
        NavIcon::AddressBook => "📒",
        NavIcon::Apps => "🧩",
        NavIcon::Settings => "⚙",
    }
}

/// Render the sidebar panel
pub fn render(
    ctx: &egui::Context,
    sidebar: &mut SidebarState,
    safe_ctx: &mut SafeContext,
    nav: &NavContext,
) -> SidebarAction {
    let mut action = SidebarAction::None;

    egui::SidePanel::left("safe_context_panel")
        .resizable(true)
        .default_width(280.0)
        .min_width(60.0)
        .show_animated(ctx, !sidebar.collapsed, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(10.0);

                // Header with collapse button
                ui.horizontal(|ui| {
                    ui.heading(egui::RichText::new("Safe Account").size(16.0).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("◀").on_hover_text("Collapse sidebar").clicked() {
                            sidebar.collapsed = true;
                        }
                    });
                });
                ui.separator();
                ui.add_space(5.0);

                ui.horizontal(|ui| {
                    ui.label("Chain:");
                    egui::ComboBox::from_id_salt("sidebar_chain")
                        .selected_text(chain_label(safe_ctx.chain_id))
                        .width(150.0)
                        .show_ui(ui, |ui| {
                            for chain_id in CHAINS {
                                ui.selectable_value(
                                    &mut safe_ctx.chain_id,
                                    *chain_id,
                                    chain_label(*chain_id),
                                );
                            }
                        });
                });
                ui.add_space(8.0);

                ui.label("Safe Address:");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut safe_ctx.address_input)
                        .hint_text("0x...")
                        .desired_width(f32::INFINITY)
                        .font(egui::TextStyle::Monospace),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    let valid = safe_ctx.parsed_address().is_some();
                    if (ui
                        .add_enabled(valid && !safe_ctx.loading, egui::Button::new("⟳ Load Safe"))
                        .on_hover_text("Fetch owners, threshold, nonce and version")
                        .clicked()
                        || (submitted && valid))
                        && !safe_ctx.loading
                    {
                        action = SidebarAction::LoadSafe;
                    }
                    if safe_ctx.loading {
                        ui.spinner();
                    }
                });
                if let Some(err) = &safe_ctx.error {
                    ui::error_message(ui, err);
                }

                if let Some(info) = &safe_ctx.info {
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new("Threshold:").weak());
                        ui.label(format!("{}/{}", info.threshold, info.owners.len()));
                        ui.label(egui::RichText::new("Nonce:").weak());
                        ui.label(info.nonce.to_string());
                    });
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new("Version:").weak());
                        ui.label(info.version.as_deref().unwrap_or("unknown"));
                        let outdated = info.implementation_version_state
                            == ImplementationVersionState::Outdated;
                        if outdated {
                            ui.label(
                                egui::RichText::new("outdated")
                                    .color(ui::WARNING_YELLOW)
                                    .small(),
                            );
                        }
                    });
                }

                ui.add_space(10.0);
                ui.separator();

                for entry in derive_navigation(NAV_ITEMS, nav) {
                    let mut text = format!("{}  {}", icon(entry.item.icon), entry.item.label);
                    if entry.badge {
                        text.push_str("  ●");
                    }
                    let response = ui.add_sized(
                        [ui.available_width(), 28.0],
                        egui::SelectableLabel::new(entry.selected, text),
                    );
                    let response = if entry.badge {
                        response.on_hover_text("A newer Safe version is available")
                    } else {
                        response
                    };
                    if response.clicked() {
                        action = SidebarAction::Navigate {
                            href: entry.href.clone(),
                            label: entry.item.label,
                        };
                    }
                }

                ui.add_space(20.0);
            });
        });

    // Show expand button when collapsed
    if sidebar.collapsed {
        egui::SidePanel::left("collapsed_sidebar")
            .resizable(false)
            .exact_width(30.0)
            .show(ctx, |ui| {
                ui.add_space(10.0);
                if ui.button("▶").on_hover_text("Expand sidebar").clicked() {
                    sidebar.collapsed = false;
                }
            });
    }

    action
}

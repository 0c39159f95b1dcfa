use eframe::egui;
use safe_wallet_core::{
    AnalyticsPort, RecoveryLinks, RecoveryMethod, RecoveryMethodModal, RecoveryModalAction,
};

use crate::ui;

/// Renders the recovery method chooser while it is open. External links are
/// opened here; only the self-custody path is handed back to the caller.
pub fn render(
    ctx: &egui::Context,
    modal: &mut RecoveryMethodModal,
    links: &RecoveryLinks,
    sink: &dyn AnalyticsPort,
) -> Option<RecoveryModalAction> {
    if !modal.open {
        return None;
    }
    let mut action = None;
    let mut window_open = true;

    egui::Window::new("Set up account recovery")
        .collapsible(false)
        .resizable(false)
        .open(&mut window_open)
        .show(ctx, |ui| {
            ui.label("Choose how this Safe Account can be recovered if signer keys are lost.");
            ui.add_space(8.0);

            for method in RecoveryMethod::ALL {
                let selected = modal.selected == method;
                let mut text = egui::RichText::new(method.label());
                if selected {
                    text = text.strong();
                }
                ui.horizontal(|ui| {
                    if ui.radio(selected, text).clicked() && !selected {
                        modal.select(method, sink);
                    }
                    if method.is_partner() {
                        ui.label(egui::RichText::new("waitlist").small().weak());
                    }
                });
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.link("Learn more").clicked() {
                    ui::open_url_new_tab(modal.help_link_clicked(links, sink));
                }
                ui.label("·");
                if ui.link("Give us feedback").clicked() {
                    ui::open_url_new_tab(modal.feedback_clicked(links, sink));
                }
            });

            ui.add_space(10.0);
            let cta = if modal.selected.is_partner() {
                "Join waitlist"
            } else {
                "Set up"
            };
            if ui::primary_button_enabled(ui, cta, true).clicked() {
                match modal.confirm(links, sink) {
                    RecoveryModalAction::OpenExternal(url) => ui::open_url_new_tab(&url),
                    RecoveryModalAction::StartSetupFlow => {
                        action = Some(RecoveryModalAction::StartSetupFlow)
                    }
                }
            }
        });

    if !window_open {
        modal.close();
    }
    action
}

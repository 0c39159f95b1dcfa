//! Address field with address-book autocomplete

use std::collections::BTreeMap;

use alloy::primitives::Address;
use eframe::egui;
use safe_wallet_core::address_book::MAX_ENTRY_NAME_LENGTH;
use safe_wallet_core::{AddressBookEntry, AddressBookInput, AddressBookPort, ChainId, EntryDialog};

use crate::ui;

pub enum InputAction {
    None,
    Selected(Address),
    AddToBook(EntryDialog),
}

pub fn render(
    ui: &mut egui::Ui,
    id_salt: &str,
    input: &mut AddressBookInput,
    book: &BTreeMap<Address, String>,
) -> InputAction {
    let mut action = InputAction::None;

    let response = ui::address_input(ui, &mut input.value);
    if response.changed() || response.gained_focus() {
        input.refresh(book);
    }

    let popup_id = ui.make_persistent_id(("address_book_suggestions", id_salt));
    let mut show_popup = ui.memory(|m| m.data.get_temp::<bool>(popup_id).unwrap_or(false));
    if response.gained_focus() || response.changed() {
        show_popup = true;
    }
    if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
        show_popup = false;
    }

    if show_popup && !input.suggestions.is_empty() {
        let below = response.rect.left_bottom();
        let area = egui::Area::new(popup_id)
            .order(egui::Order::Foreground)
            .fixed_pos(below)
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_min_width(response.rect.width());
                    for suggestion in input.suggestions.clone() {
                        let text = format!(
                            "{}  {}",
                            suggestion.name,
                            suggestion.address.to_checksum(None)
                        );
                        let label = egui::RichText::new(text).monospace().size(11.0);
                        if ui.selectable_label(false, label).clicked()
                        {
                            input.select(&suggestion);
                            action = InputAction::Selected(suggestion.address);
                            show_popup = false;
                        }
                    }
                });
            });

        let pointer = ui.input(|i| i.pointer.interact_pos().unwrap_or_default());
        if ui.input(|i| i.pointer.any_click())
            && !area.response.rect.contains(pointer)
            && !response.rect.contains(pointer)
        {
            show_popup = false;
        }
    }
    ui.memory_mut(|m| m.data.insert_temp(popup_id, show_popup));

    if let Some(name) = input.parsed().and_then(|a| book.get(&a)) {
        ui.label(egui::RichText::new(name).strong());
    }
    if let Some(dialog) = input.open_entry_dialog(book) {
        if ui
            .small_button("➕")
            .on_hover_text("Add to address book")
            .clicked()
        {
            action = InputAction::AddToBook(dialog);
        }
    }
    if !input.value.trim().is_empty() && input.parsed().is_none() {
        ui.label(egui::RichText::new("Invalid address").color(ui::ERROR_RED).small());
    }

    action
}

/// State of the "add to address book" window.
#[derive(Debug, Default)]
pub struct EntryDialogState {
    pub dialog: Option<EntryDialog>,
    pub error: Option<String>,
}

impl EntryDialogState {
    pub fn open(&mut self, dialog: EntryDialog) {
        self.dialog = Some(dialog);
        self.error = None;
    }
}

/// Renders the entry window; returns the stored entry once saved.
pub fn render_entry_dialog(
    ctx: &egui::Context,
    state: &mut EntryDialogState,
    chain_id: ChainId,
    book: &dyn AddressBookPort,
) -> Option<AddressBookEntry> {
    let mut saved = None;
    let mut close = false;
    let Some(dialog) = state.dialog.as_mut() else {
        return None;
    };

    egui::Window::new("Add to address book")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(egui::RichText::new(dialog.address.to_checksum(None)).monospace());
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label("Name:");
                ui.add(
                    egui::TextEdit::singleline(&mut dialog.name)
                        .hint_text(format!("max {MAX_ENTRY_NAME_LENGTH} characters"))
                        .desired_width(240.0),
                );
            });
            if let Some(err) = &state.error {
                ui::error_message(ui, err);
            }
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui::primary_button_enabled(ui, "Save", dialog.validate().is_ok()).clicked() {
                    match dialog.submit(chain_id, book) {
                        Ok(entry) => {
                            saved = Some(entry);
                            close = true;
                        }
                        Err(e) => state.error = Some(e.to_string()),
                    }
                }
                if ui::secondary_button(ui, "Cancel").clicked() {
                    close = true;
                }
            });
        });

    if close {
        state.dialog = None;
        state.error = None;
    }
    saved
}

//! Add / replace owner flow: input form, review grid and sign form

use std::collections::BTreeMap;

use alloy::primitives::Address;
use eframe::egui;
use safe_wallet_core::{
    AddressBookInput, AddressInfo, DataRowType, ExplorerLink, NamedAddress, OwnerChangeParams,
    OwnerChangeReview, SafeInfo, SignForm, SignFormContext, SignFormStatus, TxFlowController,
    TxFlowKind,
};

use crate::components::address_book_input::{self, InputAction};
use crate::components::tx_data_row;
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
    Form,
    Review,
}

#[derive(Debug)]
pub struct OwnerFlowState {
    pub kind: TxFlowKind,
    pub step: FlowStep,
    pub new_owner: AddressBookInput,
    pub new_owner_name: String,
    pub removed_owner: Option<Address>,
    pub threshold: u64,
    pub review: Option<OwnerChangeReview>,
    pub sign_form: SignForm,
    pub form_error: Option<String>,
}

pub enum OwnerFlowAction {
    None,
    Close,
    /// Inputs were confirmed; a build for them is needed.
    Review(OwnerChangeParams),
    AddToBook(safe_wallet_core::EntryDialog),
    Sign,
}

impl OwnerFlowState {
    pub fn add_owner(current_threshold: u64) -> Self {
        Self::new(TxFlowKind::AddOwner, None, current_threshold)
    }

    pub fn replace_owner(removed: Address, current_threshold: u64) -> Self {
        Self::new(TxFlowKind::ReplaceOwner, Some(removed), current_threshold)
    }

    fn new(kind: TxFlowKind, removed_owner: Option<Address>, threshold: u64) -> Self {
        Self {
            kind,
            step: FlowStep::Form,
            new_owner: AddressBookInput::new(true),
            new_owner_name: String::new(),
            removed_owner,
            threshold: threshold.max(1),
            review: None,
            sign_form: SignForm::default(),
            form_error: None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            TxFlowKind::ReplaceOwner => "Replace owner",
            _ => "Add owner",
        }
    }

    /// Validated review inputs, with names taken from the form or the address book.
    pub fn params(
        &self,
        safe: &SafeInfo,
        book: &BTreeMap<Address, String>,
    ) -> Result<OwnerChangeParams, String> {
        let address = self
            .new_owner
            .parsed()
            .ok_or_else(|| "Enter a valid owner address".to_owned())?;
        if safe.is_owner(address) {
            return Err("Address is already an owner of this Safe Account".to_owned());
        }
        let typed = self.new_owner_name.trim();
        let new_owner = if !typed.is_empty() {
            NamedAddress::with_name(address, typed)
        } else {
            match book.get(&address) {
                Some(name) => NamedAddress::with_name(address, name.clone()),
                None => NamedAddress::new(address),
            }
        };
        let removed_owner = self.removed_owner.map(|removed| match book.get(&removed) {
            Some(name) => NamedAddress::with_name(removed, name.clone()),
            None => NamedAddress::new(removed),
        });
        let max = if removed_owner.is_some() {
            safe.owners.len() as u64
        } else {
            safe.owners.len() as u64 + 1
        };
        if self.threshold == 0 || self.threshold > max {
            return Err(format!("Threshold must be between 1 and {max}"));
        }
        Ok(OwnerChangeParams {
            new_owner,
            removed_owner,
            threshold: self.threshold,
        })
    }
}

pub fn render(
    ctx: &egui::Context,
    state: &mut OwnerFlowState,
    flow: &TxFlowController,
    safe: &SafeInfo,
    book: &BTreeMap<Address, String>,
    explorer: &ExplorerLink,
    sign_ctx: &SignFormContext,
) -> OwnerFlowAction {
    let mut action = OwnerFlowAction::None;
    let mut window_open = true;

    egui::Window::new(state.title())
        .collapsible(false)
        .default_width(560.0)
        .open(&mut window_open)
        .show(ctx, |ui| match state.step {
            FlowStep::Form => action = render_form(ui, state, safe, book),
            FlowStep::Review => {
                action = render_review(ui, state, flow, safe, book, explorer, sign_ctx)
            }
        });

    if !window_open {
        action = OwnerFlowAction::Close;
    }
    action
}

fn render_form(
    ui: &mut egui::Ui,
    state: &mut OwnerFlowState,
    safe: &SafeInfo,
    book: &BTreeMap<Address, String>,
) -> OwnerFlowAction {
    let mut action = OwnerFlowAction::None;

    if let Some(removed) = state.removed_owner {
        ui.label("Current owner");
        ui.label(egui::RichText::new(removed.to_checksum(None)).monospace());
        ui.add_space(6.0);
    }

    ui.label("New owner");
    ui.horizontal(|ui| {
        match address_book_input::render(ui, "owner_flow", &mut state.new_owner, book) {
            InputAction::AddToBook(dialog) => action = OwnerFlowAction::AddToBook(dialog),
            InputAction::Selected(_) | InputAction::None => {}
        }
    });
    ui.horizontal(|ui| {
        ui.label("Name (optional):");
        ui.add(egui::TextEdit::singleline(&mut state.new_owner_name).desired_width(220.0));
    });

    if state.kind == TxFlowKind::AddOwner {
        let max = safe.owners.len() as u64 + 1;
        ui.horizontal(|ui| {
            ui.label("Threshold:");
            egui::ComboBox::from_id_salt("owner_flow_threshold")
                .selected_text(state.threshold.to_string())
                .show_ui(ui, |ui| {
                    for t in 1..=max {
                        ui.selectable_value(&mut state.threshold, t, t.to_string());
                    }
                });
            ui.label(format!("out of {max} owner(s)"));
        });
    }

    if let Some(err) = &state.form_error {
        ui::error_message(ui, err);
    }

    ui.add_space(10.0);
    ui.horizontal(|ui| {
        if ui::primary_button_enabled(ui, "Next", state.new_owner.parsed().is_some()).clicked() {
            match state.params(safe, book) {
                Ok(params) => {
                    state.form_error = None;
                    action = OwnerFlowAction::Review(params);
                }
                Err(e) => state.form_error = Some(e),
            }
        }
        if ui::secondary_button(ui, "Cancel").clicked() {
            action = OwnerFlowAction::Close;
        }
    });
    action
}

fn render_review(
    ui: &mut egui::Ui,
    state: &mut OwnerFlowState,
    flow: &TxFlowController,
    safe: &SafeInfo,
    book: &BTreeMap<Address, String>,
    explorer: &ExplorerLink,
    sign_ctx: &SignFormContext,
) -> OwnerFlowAction {
    let mut action = OwnerFlowAction::None;
    let Some(review) = &state.review else {
        return action;
    };
    let params = review.params();

    let new_owner = params.new_owner.address.to_checksum(None);
    let new_owner_info = AddressInfo {
        name: params.new_owner.display_name().map(str::to_owned),
        logo_uri: None,
    };
    let removed = params.removed_owner.as_ref().map(|r| {
        (
            r.address.to_checksum(None),
            AddressInfo {
                name: r.display_name().map(str::to_owned).or_else(|| book.get(&r.address).cloned()),
                logo_uri: None,
            },
        )
    });
    let owner_count = match params.removed_owner {
        Some(_) => safe.owners.len(),
        None => safe.owners.len() + 1,
    };
    let threshold = format!("{} out of {} owner(s)", params.threshold, owner_count);

    egui::Grid::new("owner_review_grid")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            if let Some((addr, info)) = &removed {
                tx_data_row::render(
                    ui,
                    "Remove",
                    Some(addr),
                    Some(DataRowType::Address),
                    Some(explorer),
                    Some(info),
                );
            }
            tx_data_row::render(
                ui,
                "New owner",
                Some(&new_owner),
                Some(DataRowType::Address),
                Some(explorer),
                Some(&new_owner_info),
            );
            tx_data_row::render(ui, "Threshold", Some(&threshold), None, None, None);

            if let Some(tx) = flow.tx() {
                let data = tx.data.to_string();
                let hash = tx.safe_tx_hash.to_string();
                let nonce = tx.nonce.to_string();
                tx_data_row::render(ui, "Nonce", Some(&nonce), None, None, None);
                tx_data_row::render(ui, "Data", Some(&data), Some(DataRowType::Bytes), None, None);
                let raw = Some(DataRowType::RawData);
                tx_data_row::render(ui, "Raw data", Some(&data), raw, None, None);
                let hash_type = Some(DataRowType::Hash);
                tx_data_row::render(ui, "safeTxHash", Some(&hash), hash_type, None, None);
            }
        });

    ui.add_space(8.0);
    if flow.is_pending() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Building transaction...");
        });
    }
    if let Some(err) = flow.error() {
        ui::error_message(ui, &format!("Error creating the transaction: {}", err.message));
    }

    ui.separator();
    let sign_form = &mut state.sign_form;
    if let Some(block) = sign_form.blocked_reason(flow.tx(), sign_ctx) {
        if block != safe_wallet_core::SubmitBlock::NoTransaction {
            ui::warning_message(ui, block.message());
        }
    }
    if let Some(err) = sign_form.error().map(str::to_owned) {
        ui.horizontal(|ui| {
            ui::error_message(ui, &err);
            if ui.small_button("Dismiss").clicked() {
                sign_form.dismiss_error();
            }
        });
    }

    ui.horizontal(|ui| {
        if ui::secondary_button(ui, "Back").clicked() {
            state.step = FlowStep::Form;
        }
        let submitting = sign_form.status() == SignFormStatus::Submitting;
        let can_submit = sign_form.can_submit(flow.tx(), sign_ctx);
        if ui::primary_button_enabled(ui, "Sign", can_submit).clicked() {
            action = OwnerFlowAction::Sign;
        }
        if submitting {
            ui.spinner();
        }
    });
    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use safe_wallet_core::ImplementationVersionState;

    fn safe() -> SafeInfo {
        SafeInfo {
            chain_id: 1,
            address: Address::repeat_byte(0xbe),
            owners: vec![Address::repeat_byte(0x11), Address::repeat_byte(0x22)],
            threshold: 2,
            nonce: 0,
            version: None,
            implementation_version_state: ImplementationVersionState::Unknown,
        }
    }

    #[test]
    fn params_prefer_typed_name_over_address_book() {
        let mut book = BTreeMap::new();
        book.insert(Address::repeat_byte(0x33), "Book name".to_owned());
        book.insert(Address::repeat_byte(0x22), "Bob".to_owned());

        let mut state = OwnerFlowState::replace_owner(Address::repeat_byte(0x22), 2);
        state.new_owner.value = Address::repeat_byte(0x33).to_checksum(None);
        let params = state.params(&safe(), &book).expect("params");
        assert_eq!(params.new_owner.display_name(), Some("Book name"));
        assert_eq!(
            params.removed_owner.as_ref().and_then(|r| r.display_name()),
            Some("Bob")
        );

        state.new_owner_name = " Carol ".to_owned();
        let params = state.params(&safe(), &book).expect("params");
        assert_eq!(params.new_owner.display_name(), Some("Carol"));
    }

    #[test]
    fn params_reject_existing_owner_and_bad_threshold() {
        let book = BTreeMap::new();
        let mut state = OwnerFlowState::add_owner(2);
        state.new_owner.value = Address::repeat_byte(0x11).to_checksum(None);
        assert!(state.params(&safe(), &book).is_err());

        state.new_owner.value = Address::repeat_byte(0x44).to_checksum(None);
        state.threshold = 4;
        assert!(state.params(&safe(), &book).is_err());
        state.threshold = 3;
        assert_eq!(state.params(&safe(), &book).expect("params").threshold, 3);
    }
}

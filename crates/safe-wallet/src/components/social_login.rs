//! Social login panel over the MPC login service

use eframe::egui;
use safe_wallet_core::{UserInfo, WalletLoginState};

use crate::ui;

/// What the panel last learned about the login service.
#[derive(Debug, Clone, Default)]
pub struct SocialSnapshot {
    pub state: WalletLoginState,
    pub user: Option<UserInfo>,
    pub password_set: bool,
    pub mfa_enabled: bool,
}

#[derive(Debug, Default)]
pub struct SocialPanelState {
    pub snapshot: SocialSnapshot,
    pub busy: bool,
    pub password: String,
    pub old_password: String,
    pub new_password: String,
    pub store_device_share: bool,
    pub result: Option<Result<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocialAction {
    Login,
    Recover {
        password: String,
        store_device_share: bool,
    },
    SetPassword {
        old_password: Option<String>,
        new_password: String,
    },
    Export {
        password: String,
    },
    Reset,
}

pub fn render(ui: &mut egui::Ui, panel: &mut SocialPanelState) -> Option<SocialAction> {
    let mut action = None;
    ui::section_header(ui, "Social login");

    ui.horizontal(|ui| {
        ui.label("Status:");
        ui.label(egui::RichText::new(state_label(panel.snapshot.state)).strong());
        if panel.busy {
            ui.spinner();
        }
    });
    if let Some(user) = &panel.snapshot.user {
        ui.horizontal(|ui| {
            ui.label("Signed in as");
            ui.label(egui::RichText::new(&user.email).monospace());
            if let Some(name) = &user.name {
                ui.label(format!("({name})"));
            }
        });
    }
    ui.add_space(6.0);

    ui.add_enabled_ui(!panel.busy, |ui| match panel.snapshot.state {
        WalletLoginState::NotInitialized | WalletLoginState::Authenticating => {
            if ui::primary_button_enabled(ui, "Continue with Google", true).clicked() {
                action = Some(SocialAction::Login);
            }
        }
        WalletLoginState::ManualRecovery => {
            ui.label("This device is not recognised. Enter your recovery password.");
            ui.horizontal(|ui| {
                ui::password_input(ui, &mut panel.password, "Recovery password");
                ui.checkbox(&mut panel.store_device_share, "Do not ask again on this device");
            });
            ui.horizontal(|ui| {
                if ui::primary_button_enabled(ui, "Submit", !panel.password.is_empty()).clicked() {
                    action = Some(SocialAction::Recover {
                        password: std::mem::take(&mut panel.password),
                        store_device_share: panel.store_device_share,
                    });
                }
                if ui
                    .button("Reset account")
                    .on_hover_text("Discards the current key shares")
                    .clicked()
                {
                    action = Some(SocialAction::Reset);
                }
            });
        }
        WalletLoginState::Ready => {
            let label = if panel.snapshot.password_set {
                "Change recovery password"
            } else {
                "Set recovery password"
            };
            egui::CollapsingHeader::new(label).show(ui, |ui| {
                if panel.snapshot.password_set {
                    ui::password_input(ui, &mut panel.old_password, "Current password");
                }
                ui::password_input(ui, &mut panel.new_password, "New password");
                let has_password = !panel.new_password.is_empty();
                if ui::primary_button_enabled(ui, "Save", has_password).clicked() {
                    let old = std::mem::take(&mut panel.old_password);
                    action = Some(SocialAction::SetPassword {
                        old_password: (!old.is_empty()).then_some(old),
                        new_password: std::mem::take(&mut panel.new_password),
                    });
                }
            });
            egui::CollapsingHeader::new("Export signer key").show(ui, |ui| {
                ui::password_input(ui, &mut panel.password, "Recovery password");
                if ui.button("Export").clicked() {
                    action = Some(SocialAction::Export {
                        password: std::mem::take(&mut panel.password),
                    });
                }
            });
            ui.label(format!(
                "MFA: {}",
                if panel.snapshot.mfa_enabled { "enabled" } else { "disabled" }
            ));
        }
    });

    match &panel.result {
        Some(Ok(msg)) => ui::success_message(ui, msg),
        Some(Err(msg)) => ui::error_message(ui, msg),
        None => {}
    }
    action
}

fn state_label(state: WalletLoginState) -> &'static str {
    match state {
        WalletLoginState::NotInitialized => "Not connected",
        WalletLoginState::Authenticating => "Authenticating...",
        WalletLoginState::ManualRecovery => "Recovery required",
        WalletLoginState::Ready => "Connected",
    }
}

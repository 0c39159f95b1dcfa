//! Social login on top of an MPC key-management SDK.
//!
//! The SDK owns the key-reconstruction state machine. This module maps its
//! status onto [`WalletLoginState`] and drives the factor recovery calls.

use alloy::primitives::B256;
use serde::{Deserialize, Serialize};

use crate::errors::{log_error, ErrorCode};
use crate::ports::{CoreKitPort, DeviceSharePort, PortError, SecurityQuestionPort};
use crate::state_machine::{login_transition, LoginAction, StateTransition};

pub use crate::state_machine::WalletLoginState;

/// Share description module registered for the social-login factor.
pub const HASHED_SHARE_MODULE: &str = "hashedShare";
/// Metadata payload that marks an account as reset.
pub const KEY_NOT_FOUND: &str = "KEY_NOT_FOUND";

/// Status reported by the MPC SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoreKitStatus {
    NotInitialized,
    Initialized,
    RequiredShare,
    LoggedIn,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserInfo {
    pub email: String,
    pub name: Option<String>,
    pub profile_image: Option<String>,
}

/// Local facts the SDK status alone does not carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoginContext {
    pub login_in_progress: bool,
    pub device_factor_pending: bool,
}

pub fn map_login_state(status: CoreKitStatus, ctx: LoginContext) -> WalletLoginState {
    match status {
        CoreKitStatus::LoggedIn => WalletLoginState::Ready,
        CoreKitStatus::RequiredShare if ctx.device_factor_pending => {
            WalletLoginState::Authenticating
        }
        CoreKitStatus::RequiredShare => WalletLoginState::ManualRecovery,
        CoreKitStatus::NotInitialized | CoreKitStatus::Initialized if ctx.login_in_progress => {
            WalletLoginState::Authenticating
        }
        CoreKitStatus::NotInitialized | CoreKitStatus::Initialized => {
            WalletLoginState::NotInitialized
        }
    }
}

pub type ConnectedCallback = Box<dyn FnMut() + Send>;

pub struct SocialWalletService<K, Q, D>
where
    K: CoreKitPort,
    Q: SecurityQuestionPort,
    D: DeviceSharePort,
{
    pub core_kit: K,
    pub security_questions: Q,
    pub device_shares: D,
    on_connect: ConnectedCallback,
    state: WalletLoginState,
    transitions: Vec<StateTransition<WalletLoginState>>,
}

impl<K, Q, D> SocialWalletService<K, Q, D>
where
    K: CoreKitPort,
    Q: SecurityQuestionPort,
    D: DeviceSharePort,
{
    pub fn new(
        core_kit: K,
        security_questions: Q,
        device_shares: D,
        on_connect: ConnectedCallback,
    ) -> Self {
        Self {
            core_kit,
            security_questions,
            device_shares,
            on_connect,
            state: WalletLoginState::NotInitialized,
            transitions: Vec::new(),
        }
    }

    pub fn state(&self) -> WalletLoginState {
        self.state
    }

    pub fn transitions(&self) -> &[StateTransition<WalletLoginState>] {
        &self.transitions
    }

    pub fn user_info(&self) -> Option<UserInfo> {
        self.core_kit.user_info()
    }

    /// State implied by the SDK session alone, e.g. after a page reload.
    pub fn session_state(&self) -> WalletLoginState {
        map_login_state(self.core_kit.status(), LoginContext::default())
    }

    pub fn login_and_create(&mut self) -> Result<WalletLoginState, PortError> {
        self.apply(LoginAction::StartLogin);

        if let Err(e) = self.core_kit.login_with_oauth() {
            log_error(ErrorCode::SocialLogin, &e);
            self.apply(LoginAction::LoginFailed);
            return Err(e);
        }

        if self.core_kit.status() == CoreKitStatus::RequiredShare {
            self.recover_with_device_share();
        }

        match map_login_state(self.core_kit.status(), LoginContext::default()) {
            WalletLoginState::Ready => {
                if let Err(e) = self.finalize_login() {
                    log_error(ErrorCode::SocialLogin, &e);
                    self.apply(LoginAction::LoginFailed);
                    return Err(e);
                }
                self.apply(LoginAction::LoggedIn);
            }
            WalletLoginState::ManualRecovery => self.apply(LoginAction::RequireRecovery),
            WalletLoginState::NotInitialized | WalletLoginState::Authenticating => {
                self.apply(LoginAction::LoginFailed)
            }
        }
        Ok(self.state)
    }

    /// Tries the factor stored on this device. Failures leave the SDK asking for a share.
    fn recover_with_device_share(&self) -> bool {
        let Some(user) = self.core_kit.user_info() else {
            return false;
        };
        let factor = match self.device_shares.stored_factor(&user) {
            Ok(Some(factor)) => factor,
            Ok(None) => {
                tracing::info!(email = %user.email, "no device factor stored");
                return false;
            }
            Err(e) => {
                log_error(ErrorCode::DeviceShareRecovery, &e);
                return false;
            }
        };
        match self.core_kit.input_factor_key(factor) {
            Ok(()) => self.core_kit.status() == CoreKitStatus::LoggedIn,
            Err(e) => {
                log_error(ErrorCode::DeviceShareRecovery, &e);
                false
            }
        }
    }

    /// Returns true once the account is fully logged in.
    pub fn recover_account_with_password(
        &mut self,
        password: &str,
        store_device_share: bool,
    ) -> Result<bool, PortError> {
        if !self.security_questions.is_enabled()? {
            return Err(PortError::NotFound("no recovery password is set".to_owned()));
        }

        let factor = self
            .security_questions
            .recover_with_password(password)
            .inspect_err(|e| log_error(ErrorCode::PasswordRecovery, e))?;
        self.core_kit
            .input_factor_key(factor)
            .inspect_err(|e| log_error(ErrorCode::PasswordRecovery, e))?;

        if store_device_share {
            if let Some(user) = self.core_kit.user_info() {
                if let Err(e) = self.device_shares.store_factor(&user, factor) {
                    log_error(ErrorCode::DeviceShareRecovery, &e);
                }
            }
        }

        if self.core_kit.status() != CoreKitStatus::LoggedIn {
            return Ok(false);
        }
        self.finalize_login()
            .inspect_err(|e| log_error(ErrorCode::PasswordRecovery, e))?;
        self.apply(LoginAction::Recovered);
        Ok(true)
    }

    /// Replaces the stored metadata with the "key not found" marker.
    pub fn reset_account(&mut self) -> Result<(), PortError> {
        let key = self.core_kit.metadata_key()?;
        self.core_kit
            .set_metadata(&key, serde_json::json!({ "message": KEY_NOT_FOUND }))?;
        self.apply(LoginAction::Reset);
        Ok(())
    }

    pub fn is_recovery_password_set(&self) -> Result<bool, PortError> {
        self.security_questions.is_enabled()
    }

    pub fn is_mfa_enabled(&self) -> Result<bool, PortError> {
        let modules = self.core_kit.share_modules()?;
        Ok(!modules.iter().any(|m| m == HASHED_SHARE_MODULE))
    }

    /// Sets or changes the recovery password and turns on MFA if needed.
    pub fn enable_mfa(
        &self,
        old_password: Option<&str>,
        new_password: &str,
    ) -> Result<(), PortError> {
        self.enable_mfa_inner(old_password, new_password)
            .inspect_err(|e| log_error(ErrorCode::EnableMfa, e))
    }

    fn enable_mfa_inner(
        &self,
        old_password: Option<&str>,
        new_password: &str,
    ) -> Result<(), PortError> {
        let factor = self
            .core_kit
            .current_factor_key()
            .ok_or_else(|| PortError::Policy("not logged in".to_owned()))?;
        self.security_questions
            .upsert_password(factor, new_password, old_password)?;
        let recovered = self.security_questions.recover_with_password(new_password)?;
        if recovered != factor {
            return Err(PortError::Validation(
                "Problem setting up the new password".to_owned(),
            ));
        }
        if !self.is_mfa_enabled()? {
            self.core_kit.enable_mfa()?;
        }
        self.core_kit.commit_changes()
    }

    /// Exports the signer key; requires the recovery password when one is set.
    pub fn export_signer_key(&self, password: &str) -> Result<B256, PortError> {
        if self.security_questions.is_enabled()? {
            self.security_questions
                .recover_with_password(password)
                .map_err(|_| {
                    PortError::Validation(
                        "Error exporting account. Make sure the password is correct.".to_owned(),
                    )
                })?;
        }
        self.core_kit.export_signer_key()
    }

    fn finalize_login(&mut self) -> Result<(), PortError> {
        self.core_kit.commit_changes()?;
        (self.on_connect)();
        Ok(())
    }

    fn apply(&mut self, action: LoginAction) {
        match login_transition(self.state, action) {
            Ok((next, transition)) => {
                tracing::info!(
                    from = ?transition.from,
                    to = ?transition.to,
                    reason = transition.reason,
                    "login state"
                );
                self.state = next;
                self.transitions.push(transition);
            }
            Err(e) => tracing::warn!("{e}"),
        }
    }
}

use std::fmt::Debug;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransition<S> {
    pub from: S,
    pub to: S,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("illegal sign transition: {0}")]
    Sign(String),
    #[error("illegal login transition: {0}")]
    Login(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignFormStatus {
    #[default]
    Idle,
    Submitting,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignAction {
    Submit,
    Succeed,
    Fail,
    Dismiss,
}

pub fn sign_transition(
    from: SignFormStatus,
    action: SignAction,
) -> Result<(SignFormStatus, StateTransition<SignFormStatus>), TransitionError> {
    use SignAction as A;
    use SignFormStatus as S;

    let (to, reason) = match (from, action) {
        (S::Idle | S::Error, A::Submit) => (S::Submitting, "submit"),
        (S::Submitting, A::Succeed) => (S::Idle, "signed"),
        (S::Submitting, A::Fail) => (S::Error, "sign failed"),
        (S::Error, A::Dismiss) => (S::Idle, "error dismissed"),
        _ => return Err(TransitionError::Sign(describe(from, action))),
    };
    Ok((to, StateTransition { from, to, reason }))
}

/// Application-level login state, derived from the MPC SDK status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalletLoginState {
    #[default]
    NotInitialized,
    Authenticating,
    ManualRecovery,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAction {
    StartLogin,
    LoggedIn,
    RequireRecovery,
    Recovered,
    LoginFailed,
    Reset,
}

pub fn login_transition(
    from: WalletLoginState,
    action: LoginAction,
) -> Result<(WalletLoginState, StateTransition<WalletLoginState>), TransitionError> {
    use LoginAction as A;
    use WalletLoginState as S;

    let (to, reason) = match (from, action) {
        (S::NotInitialized | S::ManualRecovery | S::Ready, A::StartLogin) => {
            (S::Authenticating, "login started")
        }
        (S::Authenticating, A::LoggedIn) => (S::Ready, "logged in"),
        (S::Authenticating, A::RequireRecovery) => (S::ManualRecovery, "second factor required"),
        (S::Authenticating, A::LoginFailed) => (S::NotInitialized, "login failed"),
        (S::ManualRecovery, A::Recovered) => (S::Ready, "factor recovered"),
        (_, A::Reset) => (S::NotInitialized, "account reset"),
        _ => return Err(TransitionError::Login(describe(from, action))),
    };
    Ok((to, StateTransition { from, to, reason }))
}

fn describe(from: impl Debug, action: impl Debug) -> String {
    format!("{from:?} + {action:?}")
}

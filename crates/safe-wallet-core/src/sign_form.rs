//! Sign step shared by every transaction flow.

use thiserror::Error;

use crate::domain::PendingSafeTx;
use crate::errors::{log_error, ErrorCode};
use crate::flow::TxFlowController;
use crate::ports::{PortError, SigningPort};
use crate::state_machine::{sign_transition, SignAction, SignFormStatus, StateTransition};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignFormContext {
    pub is_owner: bool,
    pub wallet_connected: bool,
    pub disable_submit: bool,
}

/// Reasons a submit is refused before any signing call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlock {
    WalletNotConnected,
    NotOwner,
    NoTransaction,
    InFlight,
    Disabled,
}

impl SubmitBlock {
    pub fn message(&self) -> &'static str {
        match self {
            SubmitBlock::WalletNotConnected => {
                "Please connect your wallet to sign this transaction"
            }
            SubmitBlock::NotOwner => "Your connected wallet is not a signer of this Safe Account",
            SubmitBlock::NoTransaction => "The transaction is still being prepared",
            SubmitBlock::InFlight => "A signature request is already in progress",
            SubmitBlock::Disabled => "Submitting is currently disabled",
        }
    }
}

#[derive(Debug, Error)]
pub enum SignFormError {
    #[error("{}", .0.message())]
    Blocked(SubmitBlock),
    #[error("{0}")]
    Failed(PortError),
}

#[derive(Debug, Clone, Default)]
pub struct SignForm {
    status: SignFormStatus,
    error: Option<String>,
    notice: Option<SubmitBlock>,
    history: Vec<StateTransition<SignFormStatus>>,
}

impl SignForm {
    pub fn status(&self) -> SignFormStatus {
        self.status
    }

    /// Error of the last failed signing attempt.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Explanation shown after a refused submit.
    pub fn notice(&self) -> Option<SubmitBlock> {
        self.notice
    }

    pub fn history(&self) -> &[StateTransition<SignFormStatus>] {
        &self.history
    }

    pub fn blocked_reason(
        &self,
        tx: Option<&PendingSafeTx>,
        ctx: &SignFormContext,
    ) -> Option<SubmitBlock> {
        if !ctx.wallet_connected {
            Some(SubmitBlock::WalletNotConnected)
        } else if !ctx.is_owner {
            Some(SubmitBlock::NotOwner)
        } else if tx.is_none() {
            Some(SubmitBlock::NoTransaction)
        } else if self.status == SignFormStatus::Submitting {
            Some(SubmitBlock::InFlight)
        } else if ctx.disable_submit {
            Some(SubmitBlock::Disabled)
        } else {
            None
        }
    }

    pub fn can_submit(&self, tx: Option<&PendingSafeTx>, ctx: &SignFormContext) -> bool {
        self.blocked_reason(tx, ctx).is_none()
    }

    /// Moves to `Submitting` and hands back the transaction to sign.
    pub fn begin_submit(
        &mut self,
        flow: &TxFlowController,
        ctx: &SignFormContext,
    ) -> Result<PendingSafeTx, SubmitBlock> {
        if let Some(block) = self.blocked_reason(flow.tx(), ctx) {
            tracing::warn!(reason = ?block, "sign submit refused");
            self.notice = Some(block);
            return Err(block);
        }
        let tx = flow.tx().cloned().ok_or(SubmitBlock::NoTransaction)?;
        self.apply(SignAction::Submit);
        self.error = None;
        self.notice = None;
        Ok(tx)
    }

    pub fn finish_submit(
        &mut self,
        result: Result<(), PortError>,
        flow: &mut TxFlowController,
        on_submit: impl FnOnce(),
    ) -> Result<(), PortError> {
        match result {
            Ok(()) => {
                self.apply(SignAction::Succeed);
                flow.close();
                on_submit();
                Ok(())
            }
            Err(e) => {
                log_error(ErrorCode::SignTransaction, &e);
                self.apply(SignAction::Fail);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn submit(
        &mut self,
        flow: &mut TxFlowController,
        ctx: &SignFormContext,
        flow_id: &str,
        origin: &str,
        signer: &dyn SigningPort,
        on_submit: impl FnOnce(),
    ) -> Result<(), SignFormError> {
        let tx = self.begin_submit(flow, ctx).map_err(SignFormError::Blocked)?;
        let result = signer.sign_tx(&tx, flow_id, origin);
        self.finish_submit(result, flow, on_submit)
            .map_err(SignFormError::Failed)
    }

    pub fn dismiss_error(&mut self) {
        if self.status == SignFormStatus::Error {
            self.apply(SignAction::Dismiss);
        }
        self.error = None;
        self.notice = None;
    }

    fn apply(&mut self, action: SignAction) {
        match sign_transition(self.status, action) {
            Ok((next, transition)) => {
                self.status = next;
                self.history.push(transition);
            }
            Err(e) => tracing::warn!("{e}"),
        }
    }
}

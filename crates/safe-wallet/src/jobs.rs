//! Background work and the queues that carry results back to the UI thread

use std::sync::{Arc, Mutex};

use alloy::primitives::Address;
use eframe::egui;
use eyre::{Result, WrapErr};
use safe_wallet_adapters::{
    DeviceShareAdapter, InMemoryCoreKit, PasswordRecoveryAdapter, SafeInfoAdapter,
};
use safe_wallet_core::{
    BuildTicket, ChainId, PendingSafeTx, PortError, SafeInfo, SafeInfoPort, SocialWalletService,
};

use crate::components::social_login::{SocialAction, SocialSnapshot};

/// Results pushed by background jobs, drained once per frame
pub type ResultQueue<T> = Arc<Mutex<Vec<T>>>;

pub fn drain<T>(queue: &ResultQueue<T>) -> Vec<T> {
    match queue.lock() {
        Ok(mut guard) => std::mem::take(&mut *guard),
        Err(e) => {
            tracing::error!("result queue lock poisoned: {e}");
            Vec::new()
        }
    }
}

/// Runs blocking adapter calls off the UI thread
pub struct Jobs {
    runtime: tokio::runtime::Runtime,
}

impl Jobs {
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("safe-wallet-jobs")
            .enable_all()
            .build()
            .wrap_err("failed to start background runtime")?;
        Ok(Self { runtime })
    }

    pub fn run<T, F>(&self, ctx: &egui::Context, queue: &ResultQueue<T>, job: F)
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let ctx = ctx.clone();
        let queue = Arc::clone(queue);
        self.runtime.spawn_blocking(move || {
            let out = job();
            match queue.lock() {
                Ok(mut guard) => guard.push(out),
                Err(e) => tracing::error!("result queue lock poisoned: {e}"),
            }
            ctx.request_repaint();
        });
    }
}

pub struct SafeLoadOutcome {
    pub chain_id: ChainId,
    pub address: Address,
    pub result: Result<SafeInfo, String>,
}

pub fn load_safe(
    adapter: &SafeInfoAdapter,
    chain_id: ChainId,
    address: Address,
) -> SafeLoadOutcome {
    let result = adapter
        .fetch_safe_info(chain_id, address)
        .wrap_err_with(|| format!("failed to load Safe {address} on chain {chain_id}"))
        .map_err(|e| format!("{e:#}"));
    SafeLoadOutcome {
        chain_id,
        address,
        result,
    }
}

pub struct BuildOutcome {
    pub ticket: BuildTicket,
    pub result: std::result::Result<PendingSafeTx, PortError>,
}

pub type SocialService =
    SocialWalletService<InMemoryCoreKit, PasswordRecoveryAdapter, DeviceShareAdapter>;

pub struct SocialOutcome {
    pub snapshot: SocialSnapshot,
    pub result: Option<std::result::Result<String, String>>,
}

/// Performs one login-panel action and reports the service state afterwards.
pub fn run_social_action(service: &Mutex<SocialService>, action: SocialAction) -> SocialOutcome {
    let mut guard = match service.lock() {
        Ok(guard) => guard,
        Err(e) => {
            return SocialOutcome {
                snapshot: SocialSnapshot::default(),
                result: Some(Err(format!("login service unavailable: {e}"))),
            }
        }
    };
    let service = &mut *guard;

    let result = match action {
        SocialAction::Login => service
            .login_and_create()
            .map(|_| String::new())
            .wrap_err("Failed to sign in"),
        SocialAction::Recover {
            password,
            store_device_share,
        } => service
            .recover_account_with_password(&password, store_device_share)
            .map(|done| {
                if done {
                    "Account recovered".to_owned()
                } else {
                    "Another factor is still required".to_owned()
                }
            })
            .wrap_err("Recovery failed"),
        SocialAction::SetPassword {
            old_password,
            new_password,
        } => service
            .enable_mfa(old_password.as_deref(), &new_password)
            .map(|()| "Recovery password saved".to_owned())
            .wrap_err("Failed to set recovery password"),
        SocialAction::Export { password } => service
            .export_signer_key(&password)
            .map(|key| {
                crate::ui::copy_to_clipboard(&key.to_string());
                "Signer key copied to clipboard".to_owned()
            })
            .wrap_err("Export failed"),
        SocialAction::Reset => service
            .reset_account()
            .map(|()| "Account reset".to_owned())
            .wrap_err("Reset failed"),
    };

    let result = match result {
        Ok(msg) if msg.is_empty() => None,
        Ok(msg) => Some(Ok(msg)),
        Err(e) => Some(Err(format!("{e:#}"))),
    };
    SocialOutcome {
        snapshot: snapshot(service),
        result,
    }
}

pub fn snapshot(service: &SocialService) -> SocialSnapshot {
    let ready = service.state() == safe_wallet_core::WalletLoginState::Ready;
    SocialSnapshot {
        state: service.state(),
        user: service.user_info(),
        password_set: ready && service.is_recovery_password_set().unwrap_or(false),
        mfa_enabled: ready && service.is_mfa_enabled().unwrap_or(false),
    }
}

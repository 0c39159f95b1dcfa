//! In-process stand-in for the MPC key-management SDK.
//!
//! Accounts are unlocked either by the social-login share (while MFA is off)
//! or by a registered factor key. Metadata lives in a [`MetadataStore`] that
//! the password recovery adapter reads and writes as well.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use alloy::primitives::{keccak256, Address, B256};
use alloy::signers::local::PrivateKeySigner;
use serde_json::Value;

use safe_wallet_core::social_login::{HASHED_SHARE_MODULE, KEY_NOT_FOUND};
use safe_wallet_core::{CoreKitPort, CoreKitStatus, PortError, UserInfo};

/// Account metadata keyed by the SDK's metadata key.
#[derive(Debug, Clone, Default)]
pub struct MetadataStore {
    inner: Arc<Mutex<HashMap<String, Value>>>,
}

impl MetadataStore {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Value>>, PortError> {
        self.inner
            .lock()
            .map_err(|e| PortError::Transport(format!("metadata lock poisoned: {e}")))
    }

    pub fn get(&self, key: &str) -> Result<Option<Value>, PortError> {
        Ok(self.lock()?.get(key).cloned())
    }

    pub fn set(&self, key: &str, value: Value) -> Result<(), PortError> {
        self.lock()?.insert(key.to_owned(), value);
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<Option<Value>, PortError> {
        Ok(self.lock()?.remove(key))
    }

    /// Whether the account under `key` was reset to the "key not found" marker.
    fn is_reset(&self, key: &str) -> Result<bool, PortError> {
        Ok(self
            .get(key)?
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            == Some(KEY_NOT_FOUND))
    }
}

/// Metadata key for an account, derived from the login email.
pub fn metadata_key_for(email: &str) -> String {
    format!("{:x}", keccak256(email.trim().to_lowercase().as_bytes()))
}

#[derive(Debug)]
struct CoreKitState {
    status: CoreKitStatus,
    user: UserInfo,
    signed_in: bool,
    signer_key: B256,
    social_factor: B256,
    factors: BTreeSet<B256>,
    modules: Vec<String>,
    current_factor: Option<B256>,
    fail_next_login: Option<String>,
    commits: usize,
}

#[derive(Debug, Clone)]
pub struct InMemoryCoreKit {
    state: Arc<Mutex<CoreKitState>>,
    metadata: MetadataStore,
}

impl InMemoryCoreKit {
    pub fn new(user: UserInfo, signer_key: B256, metadata: MetadataStore) -> Self {
        let social_factor = keccak256(format!("social:{}", user.email).as_bytes());
        let state = CoreKitState {
            status: CoreKitStatus::NotInitialized,
            user,
            signed_in: false,
            signer_key,
            social_factor,
            factors: BTreeSet::from([social_factor]),
            modules: vec![HASHED_SHARE_MODULE.to_owned()],
            current_factor: None,
            fail_next_login: None,
            commits: 0,
        };
        Self {
            state: Arc::new(Mutex::new(state)),
            metadata,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, CoreKitState>, PortError> {
        self.state
            .lock()
            .map_err(|e| PortError::Transport(format!("core kit lock poisoned: {e}")))
    }

    fn logged_in(&self) -> Result<MutexGuard<'_, CoreKitState>, PortError> {
        let g = self.lock()?;
        if g.status != CoreKitStatus::LoggedIn {
            return Err(PortError::Policy("not logged in".to_owned()));
        }
        Ok(g)
    }

    pub fn init(&self) -> Result<(), PortError> {
        let mut g = self.lock()?;
        if g.status == CoreKitStatus::NotInitialized {
            g.status = CoreKitStatus::Initialized;
            tracing::debug!("core kit initialized");
        }
        Ok(())
    }

    /// Drops the session but keeps the account, as a page reload would.
    pub fn logout(&self) -> Result<(), PortError> {
        let mut g = self.lock()?;
        g.status = CoreKitStatus::Initialized;
        g.signed_in = false;
        g.current_factor = None;
        Ok(())
    }

    pub fn fail_next_login(&self, message: impl Into<String>) -> Result<(), PortError> {
        self.lock()?.fail_next_login = Some(message.into());
        Ok(())
    }

    pub fn commits(&self) -> usize {
        self.lock().map(|g| g.commits).unwrap_or_default()
    }

    pub fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }

    /// The reconstructed secp256k1 signer, once logged in.
    pub fn local_signer(&self) -> Option<PrivateKeySigner> {
        let g = self.lock().ok()?;
        if g.status != CoreKitStatus::LoggedIn {
            return None;
        }
        match PrivateKeySigner::from_bytes(&g.signer_key) {
            Ok(signer) => Some(signer),
            Err(e) => {
                tracing::warn!(error = %e, "signer key is not a valid secp256k1 scalar");
                None
            }
        }
    }

    /// Account of the reconstructed signer key, once logged in.
    pub fn signer_account(&self) -> Option<Address> {
        self.local_signer().map(|signer| signer.address())
    }
}

impl CoreKitPort for InMemoryCoreKit {
    fn status(&self) -> CoreKitStatus {
        self.lock()
            .map(|g| g.status)
            .unwrap_or(CoreKitStatus::NotInitialized)
    }

    fn user_info(&self) -> Option<UserInfo> {
        let g = self.lock().ok()?;
        g.signed_in.then(|| g.user.clone())
    }

    fn login_with_oauth(&self) -> Result<(), PortError> {
        let mut g = self.lock()?;
        if g.status == CoreKitStatus::NotInitialized {
            return Err(PortError::Policy("core kit not initialized".to_owned()));
        }
        if let Some(message) = g.fail_next_login.take() {
            return Err(PortError::Rejected(message));
        }
        let key = metadata_key_for(&g.user.email);
        if self.metadata.is_reset(&key)? {
            // Reset accounts start over with only the social-login share.
            let social = g.social_factor;
            g.modules = vec![HASHED_SHARE_MODULE.to_owned()];
            g.factors = BTreeSet::from([social]);
            g.current_factor = None;
            self.metadata.remove(&key)?;
            tracing::info!(email = %g.user.email, "account reset, social share restored");
        }
        g.signed_in = true;
        if g.modules.iter().any(|m| m == HASHED_SHARE_MODULE) {
            g.current_factor = Some(g.social_factor);
            g.status = CoreKitStatus::LoggedIn;
        } else {
            g.status = CoreKitStatus::RequiredShare;
        }
        tracing::info!(email = %g.user.email, status = ?g.status, "oauth login");
        Ok(())
    }

    fn input_factor_key(&self, factor_key: B256) -> Result<(), PortError> {
        let mut g = self.lock()?;
        if !g.signed_in {
            return Err(PortError::Policy("oauth login required".to_owned()));
        }
        if !g.factors.contains(&factor_key) {
            return Err(PortError::Validation("invalid factor key".to_owned()));
        }
        g.current_factor = Some(factor_key);
        g.status = CoreKitStatus::LoggedIn;
        Ok(())
    }

    fn commit_changes(&self) -> Result<(), PortError> {
        let mut g = self.logged_in()?;
        g.commits += 1;
        Ok(())
    }

    fn metadata_key(&self) -> Result<String, PortError> {
        let g = self.lock()?;
        if !g.signed_in {
            return Err(PortError::Policy("oauth login required".to_owned()));
        }
        Ok(metadata_key_for(&g.user.email))
    }

    fn set_metadata(&self, key: &str, value: Value) -> Result<(), PortError> {
        self.metadata.set(key, value)
    }

    fn export_signer_key(&self) -> Result<B256, PortError> {
        Ok(self.logged_in()?.signer_key)
    }

    fn current_factor_key(&self) -> Option<B256> {
        self.lock().ok()?.current_factor
    }

    fn share_modules(&self) -> Result<Vec<String>, PortError> {
        Ok(self.lock()?.modules.clone())
    }

    /// Retires the social-login share; the current factor stays valid.
    fn enable_mfa(&self) -> Result<(), PortError> {
        let mut g = self.logged_in()?;
        let current = g
            .current_factor
            .ok_or_else(|| PortError::Policy("no active factor".to_owned()))?;
        g.modules.retain(|m| m != HASHED_SHARE_MODULE);
        g.factors = BTreeSet::from([current]);
        tracing::info!(email = %g.user.email, "mfa enabled");
        Ok(())
    }
}

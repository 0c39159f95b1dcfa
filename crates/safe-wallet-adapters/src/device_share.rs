use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use alloy::primitives::B256;

use safe_wallet_core::{DeviceSharePort, PortError, UserInfo};

/// Factor keys remembered on this device, keyed by lowercased email.
///
/// With a path the map is mirrored to a JSON file after every write and
/// loaded lazily on first access.
#[derive(Debug, Clone, Default)]
pub struct DeviceShareAdapter {
    inner: Arc<Mutex<Option<BTreeMap<String, B256>>>>,
    path: Option<PathBuf>,
}

impl DeviceShareAdapter {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn persistent(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::default(),
            path: Some(path.into()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<BTreeMap<String, B256>>>, PortError> {
        self.inner
            .lock()
            .map_err(|e| PortError::Transport(format!("device share lock poisoned: {e}")))
    }

    fn load(&self) -> Result<BTreeMap<String, B256>, PortError> {
        let Some(path) = &self.path else {
            return Ok(BTreeMap::new());
        };
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read(path)
            .map_err(|e| PortError::Transport(format!("read {}: {e}", path.display())))?;
        serde_json::from_slice(&raw)
            .map_err(|e| PortError::Validation(format!("corrupt device share file: {e}")))
    }

    fn persist(&self, shares: &BTreeMap<String, B256>) -> Result<(), PortError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let raw = serde_json::to_vec_pretty(shares)
            .map_err(|e| PortError::Validation(format!("serialize device shares: {e}")))?;
        fs::write(path, raw)
            .map_err(|e| PortError::Transport(format!("write {}: {e}", path.display())))
    }

    fn with_shares<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, B256>) -> T,
    ) -> Result<T, PortError> {
        let mut g = self.lock()?;
        if g.is_none() {
            *g = Some(self.load()?);
        }
        let shares = g.get_or_insert_with(BTreeMap::new);
        Ok(f(shares))
    }
}

fn user_key(user: &UserInfo) -> String {
    user.email.trim().to_lowercase()
}

impl DeviceSharePort for DeviceShareAdapter {
    fn stored_factor(&self, user: &UserInfo) -> Result<Option<B256>, PortError> {
        self.with_shares(|shares| shares.get(&user_key(user)).copied())
    }

    fn store_factor(&self, user: &UserInfo, factor_key: B256) -> Result<(), PortError> {
        let snapshot = self.with_shares(|shares| {
            shares.insert(user_key(user), factor_key);
            shares.clone()
        })?;
        tracing::info!(email = %user.email, "device factor stored");
        self.persist(&snapshot)
    }
}

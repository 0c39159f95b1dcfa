use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use alloy::primitives::Address;

use safe_wallet_core::{AddressBookEntry, AddressBookPort, ChainId, PortError};

/// Session-scoped address book shared by every component of the shell.
#[derive(Debug, Clone, Default)]
pub struct AddressBookAdapter {
    inner: Arc<Mutex<HashMap<ChainId, BTreeMap<Address, String>>>>,
}

impl AddressBookAdapter {
    fn lock(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<ChainId, BTreeMap<Address, String>>>, PortError> {
        self.inner
            .lock()
            .map_err(|e| PortError::Transport(format!("address book lock poisoned: {e}")))
    }

    /// Name for an address, if the chain's book has one.
    pub fn name_of(&self, chain_id: ChainId, address: Address) -> Option<String> {
        self.lock()
            .ok()?
            .get(&chain_id)
            .and_then(|book| book.get(&address).cloned())
    }
}

impl AddressBookPort for AddressBookAdapter {
    fn entries(&self, chain_id: ChainId) -> Result<BTreeMap<Address, String>, PortError> {
        Ok(self.lock()?.get(&chain_id).cloned().unwrap_or_default())
    }

    fn upsert_entry(&self, chain_id: ChainId, entry: AddressBookEntry) -> Result<(), PortError> {
        let name = entry.name.trim();
        if name.is_empty() {
            return Err(PortError::Validation("address book name is empty".to_owned()));
        }
        tracing::info!(chain_id, address = %entry.address, "address book upsert");
        self.lock()?
            .entry(chain_id)
            .or_default()
            .insert(entry.address, name.to_owned());
        Ok(())
    }

    fn remove_entry(&self, chain_id: ChainId, address: Address) -> Result<(), PortError> {
        let mut g = self.lock()?;
        let removed = g.get_mut(&chain_id).and_then(|book| book.remove(&address));
        if removed.is_none() {
            return Err(PortError::NotFound(format!(
                "address book entry missing: {chain_id}:{address}"
            )));
        }
        Ok(())
    }
}

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use alloy::primitives::{Address, Bytes, B256, U256};
use serde_json::Value;

use safe_wallet_core::{
    AddressBookEntry, AddressBookPort, AnalyticsEvent, AnalyticsPort, ChainId, CoreKitPort,
    CoreKitStatus, DeviceSharePort, ImplementationVersionState, PendingSafeTx, PortError,
    SafeInfo, SecurityQuestionPort, SigningPort, TxBuilderPort, TxDescription, UserInfo,
};

pub fn addr(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

pub fn safe_info(owners: Vec<Address>, threshold: u64) -> SafeInfo {
    SafeInfo {
        chain_id: 1,
        address: addr(0xbe),
        owners,
        threshold,
        nonce: 3,
        version: Some("1.3.0".to_owned()),
        implementation_version_state: ImplementationVersionState::UpToDate,
    }
}

pub fn pending_tx(description: TxDescription) -> PendingSafeTx {
    PendingSafeTx {
        chain_id: 1,
        safe_address: addr(0xbe),
        to: addr(0xbe),
        value: U256::ZERO,
        data: Bytes::from(vec![0x0d, 0x58, 0x2f, 0x13]),
        operation: 0,
        nonce: 3,
        safe_tx_hash: B256::repeat_byte(0x42),
        description,
    }
}

#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    pub events: RefCell<Vec<AnalyticsEvent>>,
}

impl RecordingAnalytics {
    pub fn actions(&self) -> Vec<String> {
        self.events.borrow().iter().map(|e| e.action.clone()).collect()
    }
}

impl AnalyticsPort for RecordingAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[derive(Debug, Default)]
pub struct MemoryBook {
    pub chains: RefCell<HashMap<ChainId, BTreeMap<Address, String>>>,
    pub writes: Cell<usize>,
}

impl AddressBookPort for MemoryBook {
    fn entries(&self, chain_id: ChainId) -> Result<BTreeMap<Address, String>, PortError> {
        Ok(self.chains.borrow().get(&chain_id).cloned().unwrap_or_default())
    }

    fn upsert_entry(&self, chain_id: ChainId, entry: AddressBookEntry) -> Result<(), PortError> {
        self.writes.set(self.writes.get() + 1);
        self.chains
            .borrow_mut()
            .entry(chain_id)
            .or_default()
            .insert(entry.address, entry.name);
        Ok(())
    }

    fn remove_entry(&self, chain_id: ChainId, address: Address) -> Result<(), PortError> {
        if let Some(book) = self.chains.borrow_mut().get_mut(&chain_id) {
            book.remove(&address);
        }
        Ok(())
    }
}

/// Builds descriptive transactions without encoding, or fails when told to.
#[derive(Debug, Default)]
pub struct FakeBuilder {
    pub fail_with: Option<String>,
    pub swap_calls: Cell<usize>,
    pub add_calls: Cell<usize>,
}

impl TxBuilderPort for FakeBuilder {
    fn create_swap_owner_tx(
        &self,
        safe: &SafeInfo,
        new_owner: Address,
        old_owner: Address,
    ) -> Result<PendingSafeTx, PortError> {
        self.swap_calls.set(self.swap_calls.get() + 1);
        if let Some(msg) = &self.fail_with {
            return Err(PortError::Transport(msg.clone()));
        }
        let prev_owner = safe
            .prev_owner(old_owner)
            .ok_or_else(|| PortError::NotFound(format!("owner {old_owner} not in safe")))?;
        Ok(pending_tx(TxDescription::SwapOwner {
            prev_owner,
            old_owner,
            new_owner,
        }))
    }

    fn create_add_owner_tx(
        &self,
        _safe: &SafeInfo,
        owner: Address,
        threshold: u64,
    ) -> Result<PendingSafeTx, PortError> {
        self.add_calls.set(self.add_calls.get() + 1);
        if let Some(msg) = &self.fail_with {
            return Err(PortError::Transport(msg.clone()));
        }
        Ok(pending_tx(TxDescription::AddOwner { owner, threshold }))
    }
}

#[derive(Debug, Default)]
pub struct FakeSigner {
    pub fail_with: RefCell<Option<String>>,
    pub calls: RefCell<Vec<(B256, String, String)>>,
}

impl SigningPort for FakeSigner {
    fn sign_tx(&self, tx: &PendingSafeTx, flow_id: &str, origin: &str) -> Result<(), PortError> {
        self.calls
            .borrow_mut()
            .push((tx.safe_tx_hash, flow_id.to_owned(), origin.to_owned()));
        match self.fail_with.borrow().as_ref() {
            Some(msg) => Err(PortError::Rejected(msg.clone())),
            None => Ok(()),
        }
    }
}

/// MPC SDK stand-in. `required_factor` is the key that completes a login
/// stuck in `RequiredShare`.
#[derive(Debug)]
pub struct FakeCoreKit {
    pub status: Cell<CoreKitStatus>,
    pub status_after_login: CoreKitStatus,
    pub user: Option<UserInfo>,
    pub required_factor: B256,
    pub factor: Cell<Option<B256>>,
    pub commits: Cell<usize>,
    pub logins: Cell<usize>,
    pub metadata: RefCell<HashMap<String, Value>>,
    pub modules: RefCell<Vec<String>>,
    pub mfa_enabled_calls: Cell<usize>,
}

impl FakeCoreKit {
    pub fn new(status_after_login: CoreKitStatus, required_factor: B256) -> Self {
        Self {
            status: Cell::new(CoreKitStatus::Initialized),
            status_after_login,
            user: Some(UserInfo {
                email: "a@b.com".to_owned(),
                name: None,
                profile_image: None,
            }),
            required_factor,
            factor: Cell::new(None),
            commits: Cell::new(0),
            logins: Cell::new(0),
            metadata: RefCell::new(HashMap::new()),
            modules: RefCell::new(vec!["hashedShare".to_owned()]),
            mfa_enabled_calls: Cell::new(0),
        }
    }
}

impl CoreKitPort for FakeCoreKit {
    fn status(&self) -> CoreKitStatus {
        self.status.get()
    }

    fn user_info(&self) -> Option<UserInfo> {
        self.user.clone()
    }

    fn login_with_oauth(&self) -> Result<(), PortError> {
        self.logins.set(self.logins.get() + 1);
        self.status.set(self.status_after_login);
        if self.status_after_login == CoreKitStatus::LoggedIn {
            self.factor.set(Some(self.required_factor));
        }
        Ok(())
    }

    fn input_factor_key(&self, factor_key: B256) -> Result<(), PortError> {
        if factor_key != self.required_factor {
            return Err(PortError::Validation("invalid factor key".to_owned()));
        }
        self.factor.set(Some(factor_key));
        self.status.set(CoreKitStatus::LoggedIn);
        Ok(())
    }

    fn commit_changes(&self) -> Result<(), PortError> {
        self.commits.set(self.commits.get() + 1);
        Ok(())
    }

    fn metadata_key(&self) -> Result<String, PortError> {
        Ok("metadata-key".to_owned())
    }

    fn set_metadata(&self, key: &str, value: Value) -> Result<(), PortError> {
        self.metadata.borrow_mut().insert(key.to_owned(), value);
        Ok(())
    }

    fn export_signer_key(&self) -> Result<B256, PortError> {
        Ok(B256::repeat_byte(0x77))
    }

    fn current_factor_key(&self) -> Option<B256> {
        self.factor.get()
    }

    fn share_modules(&self) -> Result<Vec<String>, PortError> {
        Ok(self.modules.borrow().clone())
    }

    fn enable_mfa(&self) -> Result<(), PortError> {
        self.mfa_enabled_calls.set(self.mfa_enabled_calls.get() + 1);
        self.modules.borrow_mut().retain(|m| m != "hashedShare");
        self.modules.borrow_mut().push("deviceShare".to_owned());
        Ok(())
    }
}

/// Password-to-factor table standing in for the security-question module.
#[derive(Debug, Default)]
pub struct FakeSecurityQuestions {
    pub entry: RefCell<Option<(String, B256)>>,
}

impl FakeSecurityQuestions {
    pub fn with_password(password: &str, factor: B256) -> Self {
        Self {
            entry: RefCell::new(Some((password.to_owned(), factor))),
        }
    }
}

impl SecurityQuestionPort for FakeSecurityQuestions {
    fn is_enabled(&self) -> Result<bool, PortError> {
        Ok(self.entry.borrow().is_some())
    }

    fn recover_with_password(&self, password: &str) -> Result<B256, PortError> {
        match self.entry.borrow().as_ref() {
            Some((stored, factor)) if stored == password => Ok(*factor),
            Some(_) => Err(PortError::Validation("incorrect answer".to_owned())),
            None => Err(PortError::NotFound("security question not set".to_owned())),
        }
    }

    fn upsert_password(
        &self,
        factor_key: B256,
        new_password: &str,
        old_password: Option<&str>,
    ) -> Result<(), PortError> {
        let mut entry = self.entry.borrow_mut();
        if let Some((stored, _)) = entry.as_ref() {
            if old_password != Some(stored.as_str()) {
                return Err(PortError::Validation("incorrect answer".to_owned()));
            }
        }
        *entry = Some((new_password.to_owned(), factor_key));
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FakeDeviceShares {
    pub stored: RefCell<HashMap<String, B256>>,
}

impl FakeDeviceShares {
    pub fn with_factor(email: &str, factor: B256) -> Self {
        let shares = Self::default();
        shares.stored.borrow_mut().insert(email.to_owned(), factor);
        shares
    }
}

impl DeviceSharePort for FakeDeviceShares {
    fn stored_factor(&self, user: &UserInfo) -> Result<Option<B256>, PortError> {
        Ok(self.stored.borrow().get(&user.email).copied())
    }

    fn store_factor(&self, user: &UserInfo, factor_key: B256) -> Result<(), PortError> {
        self.stored.borrow_mut().insert(user.email.clone(), factor_key);
        Ok(())
    }
}

pub fn counter() -> (Arc<AtomicUsize>, Box<dyn FnMut() + Send>) {
    let count = Arc::new(AtomicUsize::new(0));
    let inner = Arc::clone(&count);
    (
        count,
        Box::new(move || {
            inner.fetch_add(1, Ordering::SeqCst);
        }),
    )
}

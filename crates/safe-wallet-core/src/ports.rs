use std::collections::BTreeMap;

use alloy::primitives::{Address, B256};
use serde_json::Value;
use thiserror::Error;

use crate::analytics::AnalyticsEvent;
use crate::domain::{AddressBookEntry, ChainId, PendingSafeTx, SafeInfo};
use crate::social_login::{CoreKitStatus, UserInfo};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("policy error: {0}")]
    Policy(String),
    #[error("rejected: {0}")]
    Rejected(String),
}

/// Address book keyed by chain id and address.
pub trait AddressBookPort {
    fn entries(&self, chain_id: ChainId) -> Result<BTreeMap<Address, String>, PortError>;
    fn upsert_entry(&self, chain_id: ChainId, entry: AddressBookEntry) -> Result<(), PortError>;
    fn remove_entry(&self, chain_id: ChainId, address: Address) -> Result<(), PortError>;
}

pub trait TxBuilderPort {
    fn create_swap_owner_tx(
        &self,
        safe: &SafeInfo,
        new_owner: Address,
        old_owner: Address,
    ) -> Result<PendingSafeTx, PortError>;

    fn create_add_owner_tx(
        &self,
        safe: &SafeInfo,
        owner: Address,
        threshold: u64,
    ) -> Result<PendingSafeTx, PortError>;
}

pub trait SigningPort {
    fn sign_tx(&self, tx: &PendingSafeTx, flow_id: &str, origin: &str) -> Result<(), PortError>;
}

/// Fire-and-forget event sink. Implementations swallow their own failures.
pub trait AnalyticsPort {
    fn track(&self, event: AnalyticsEvent);
}

pub trait SafeInfoPort {
    fn fetch_safe_info(&self, chain_id: ChainId, address: Address) -> Result<SafeInfo, PortError>;
}

/// Surface of the MPC key-management SDK the login orchestration drives.
pub trait CoreKitPort {
    fn status(&self) -> CoreKitStatus;
    fn user_info(&self) -> Option<UserInfo>;
    fn login_with_oauth(&self) -> Result<(), PortError>;
    fn input_factor_key(&self, factor_key: B256) -> Result<(), PortError>;
    fn commit_changes(&self) -> Result<(), PortError>;
    /// Key under which the SDK stores account metadata.
    fn metadata_key(&self) -> Result<String, PortError>;
    fn set_metadata(&self, key: &str, value: Value) -> Result<(), PortError>;
    fn export_signer_key(&self) -> Result<B256, PortError>;
    /// Factor key the current session was unlocked with.
    fn current_factor_key(&self) -> Option<B256>;
    /// Module names of every registered share description.
    fn share_modules(&self) -> Result<Vec<String>, PortError>;
    fn enable_mfa(&self) -> Result<(), PortError>;
}

/// Password-derived factor recovery stored under the SDK's metadata key.
pub trait SecurityQuestionPort {
    fn is_enabled(&self) -> Result<bool, PortError>;
    fn recover_with_password(&self, password: &str) -> Result<B256, PortError>;
    fn upsert_password(
        &self,
        factor_key: B256,
        new_password: &str,
        old_password: Option<&str>,
    ) -> Result<(), PortError>;
}

/// Device-local storage of a factor key, keyed by the logged-in user.
pub trait DeviceSharePort {
    fn stored_factor(&self, user: &UserInfo) -> Result<Option<B256>, PortError>;
    fn store_factor(&self, user: &UserInfo, factor_key: B256) -> Result<(), PortError>;
}

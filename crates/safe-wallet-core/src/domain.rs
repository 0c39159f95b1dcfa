use std::fmt;

use alloy::primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

pub type ChainId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampMs(pub u64);

/// A single address-book row. Entries are keyed by address within a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBookEntry {
    pub address: Address,
    pub name: String,
}

impl AddressBookEntry {
    pub fn new(address: Address, name: impl Into<String>) -> Self {
        Self {
            address,
            name: name.into(),
        }
    }
}

/// An address with an optional human-readable label, as entered in a flow form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedAddress {
    pub address: Address,
    pub name: Option<String>,
}

impl NamedAddress {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            name: None,
        }
    }

    pub fn with_name(address: Address, name: impl Into<String>) -> Self {
        Self {
            address,
            name: Some(name.into()),
        }
    }

    /// The label if one was supplied and is not blank.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImplementationVersionState {
    UpToDate,
    Outdated,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeInfo {
    pub chain_id: ChainId,
    pub address: Address,
    pub owners: Vec<Address>,
    pub threshold: u64,
    pub nonce: u64,
    pub version: Option<String>,
    pub implementation_version_state: ImplementationVersionState,
}

impl SafeInfo {
    pub fn is_owner(&self, account: Address) -> bool {
        self.owners.contains(&account)
    }

    /// The owner preceding `owner` in the Safe's owner linked list.
    pub fn prev_owner(&self, owner: Address) -> Option<Address> {
        let idx = self.owners.iter().position(|o| *o == owner)?;
        if idx == 0 {
            Some(SENTINEL_OWNERS)
        } else {
            Some(self.owners[idx - 1])
        }
    }
}

/// Head of the Safe contract's owner linked list.
pub const SENTINEL_OWNERS: Address = Address::new([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OwnerChangeKind {
    AddOwner,
    SwapOwner,
}

impl fmt::Display for OwnerChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnerChangeKind::AddOwner => f.write_str("Add owner"),
            OwnerChangeKind::SwapOwner => f.write_str("Replace owner"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxDescription {
    AddOwner {
        owner: Address,
        threshold: u64,
    },
    SwapOwner {
        prev_owner: Address,
        old_owner: Address,
        new_owner: Address,
    },
}

impl TxDescription {
    pub fn kind(&self) -> OwnerChangeKind {
        match self {
            TxDescription::AddOwner { .. } => OwnerChangeKind::AddOwner,
            TxDescription::SwapOwner { .. } => OwnerChangeKind::SwapOwner,
        }
    }
}

/// A Safe transaction built for review. Lives in the flow controller until
/// the flow is signed or cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSafeTx {
    pub chain_id: ChainId,
    pub safe_address: Address,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub operation: u8,
    pub nonce: u64,
    pub safe_tx_hash: B256,
    pub description: TxDescription,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedWallet {
    pub address: Address,
    pub chain_id: ChainId,
}

//! Application state types

use alloy::primitives::Address;
use safe_wallet_core::explorer::chain_name;
use safe_wallet_core::navigation::routes;
use safe_wallet_core::{
    ChainId, ExplorerLink, ImplementationVersionState, SafeInfo, SignFormContext,
};
use serde::{Deserialize, Serialize};

/// Chains offered in the Safe selector
pub const CHAINS: &[ChainId] = &[1, 10, 100, 137, 8453, 42161, 11155111];

/// EIP-3770 short name used in `?safe=` query values
pub fn chain_short_name(chain_id: ChainId) -> &'static str {
    match chain_id {
        1 => "eth",
        10 => "oeth",
        100 => "gno",
        137 => "matic",
        8453 => "base",
        42161 => "arb1",
        11155111 => "sep",
        _ => "eth",
    }
}

pub fn chain_label(chain_id: ChainId) -> String {
    chain_name(chain_id)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("chain {chain_id}"))
}

/// The Safe Account the shell is looking at
#[derive(Debug, Clone)]
pub struct SafeContext {
    pub chain_id: ChainId,
    pub address_input: String,
    pub info: Option<SafeInfo>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for SafeContext {
    fn default() -> Self {
        Self {
            chain_id: 1,
            address_input: String::new(),
            info: None,
            loading: false,
            error: None,
        }
    }
}

impl SafeContext {
    pub fn parsed_address(&self) -> Option<Address> {
        self.address_input.trim().parse().ok()
    }

    /// `?safe=` value for the loaded Safe
    pub fn safe_query(&self) -> Option<String> {
        self.info.as_ref().map(|info| {
            format!(
                "{}:{}",
                chain_short_name(info.chain_id),
                info.address.to_checksum(None)
            )
        })
    }

    pub fn version_state(&self) -> ImplementationVersionState {
        self.info
            .as_ref()
            .map(|info| info.implementation_version_state)
            .unwrap_or_default()
    }

    pub fn explorer(&self) -> ExplorerLink {
        ExplorerLink::for_chain_id(self.chain_id)
            .unwrap_or_else(|| ExplorerLink::for_chain_name("ethereum"))
    }

    /// Whether a load result still matches what the user has selected
    pub fn matches(&self, chain_id: ChainId, address: Address) -> bool {
        self.chain_id == chain_id && self.parsed_address() == Some(address)
    }
}

/// Current in-app location, e.g. `/settings/setup?safe=eth:0x...`
#[derive(Debug, Clone)]
pub struct Router {
    location: String,
}

impl Default for Router {
    fn default() -> Self {
        Self {
            location: routes::HOME.to_owned(),
        }
    }
}

impl Router {
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn path(&self) -> &str {
        self.location.split('?').next().unwrap_or_default()
    }

    pub fn navigate(&mut self, href: impl Into<String>) {
        let href = href.into();
        tracing::debug!(from = %self.location, to = %href, "navigate");
        self.location = href;
    }
}

#[derive(Debug, Default)]
pub struct SidebarState {
    pub collapsed: bool,
}

/// Values kept between launches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub chain_id: Option<ChainId>,
    pub safe_address: String,
    pub signer_address: String,
}

pub const PERSISTED_KEY: &str = "safe-wallet";

/// Sign form inputs for the connected signer against the loaded Safe
pub fn sign_context(
    signer: Option<Address>,
    safe: Option<&SafeInfo>,
    disable_submit: bool,
) -> SignFormContext {
    SignFormContext {
        is_owner: matches!((signer, safe), (Some(signer), Some(safe)) if safe.is_owner(signer)),
        wallet_connected: signer.is_some(),
        disable_submit,
    }
}

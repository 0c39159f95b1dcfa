//! Block explorer links per chain.

use crate::domain::ChainId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorerTarget {
    Address,
    Tx,
}

impl ExplorerTarget {
    fn path(&self) -> &'static str {
        match self {
            ExplorerTarget::Address => "address",
            ExplorerTarget::Tx => "tx",
        }
    }
}

/// Explorer base for a chain, ready to build links to addresses and hashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerLink {
    base: String,
}

impl ExplorerLink {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_owned(),
        }
    }

    pub fn for_chain_name(chain_name: &str) -> Self {
        Self::new(explorer_base(chain_name))
    }

    pub fn for_chain_id(chain_id: ChainId) -> Option<Self> {
        chain_name(chain_id).map(Self::for_chain_name)
    }

    pub fn url(&self, target: ExplorerTarget, value: &str) -> String {
        format!("{}/{}/{}", self.base, target.path(), value)
    }
}

/// Supports the chains known to safe-utils; unknown names fall back to etherscan.
pub fn explorer_base(chain_name: &str) -> &'static str {
    match chain_name.to_lowercase().as_str() {
        "ethereum" | "mainnet" => "https://etherscan.io",
        "arbitrum" => "https://arbiscan.io",
        "aurora" => "https://explorer.aurora.dev",
        "avalanche" => "https://snowtrace.io",
        "base" => "https://basescan.org",
        "blast" => "https://blastscan.io",
        "bsc" | "binance" => "https://bscscan.com",
        "celo" => "https://celoscan.io",
        "gnosis" => "https://gnosisscan.io",
        "linea" => "https://lineascan.build",
        "mantle" => "https://mantlescan.xyz",
        "optimism" => "https://optimistic.etherscan.io",
        "polygon" => "https://polygonscan.com",
        "scroll" => "https://scrollscan.com",
        "worldchain" => "https://worldscan.org",
        "zksync" => "https://explorer.zksync.io",
        "polygon-zkevm" => "https://zkevm.polygonscan.com",
        // Testnets
        "sepolia" => "https://sepolia.etherscan.io",
        "base-sepolia" => "https://sepolia.basescan.org",
        "gnosis-chiado" => "https://gnosis-chiado.blockscout.com",
        _ => "https://etherscan.io",
    }
}

pub fn chain_name(chain_id: ChainId) -> Option<&'static str> {
    let name = match chain_id {
        1 => "ethereum",
        10 => "optimism",
        56 => "bsc",
        100 => "gnosis",
        137 => "polygon",
        324 => "zksync",
        1101 => "polygon-zkevm",
        5000 => "mantle",
        8453 => "base",
        42161 => "arbitrum",
        42220 => "celo",
        43114 => "avalanche",
        59144 => "linea",
        81457 => "blast",
        84532 => "base-sepolia",
        534352 => "scroll",
        10200 => "gnosis-chiado",
        11155111 => "sepolia",
        _ => return None,
    };
    Some(name)
}

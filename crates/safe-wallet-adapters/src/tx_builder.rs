use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::json_abi::Function;
use alloy::primitives::{Address, Bytes, B256, U256};

use safe_hash::{tx_signing_hashes, TxInput};
use safe_utils::SafeWalletVersion;
use safe_wallet_core::{
    PendingSafeTx, PortError, SafeInfo, TxBuilderPort, TxDescription, SENTINEL_OWNERS,
};

pub const ADD_OWNER_SIGNATURE: &str = "addOwnerWithThreshold(address,uint256)";
pub const SWAP_OWNER_SIGNATURE: &str = "swapOwner(address,address,address)";

const DEFAULT_SAFE_VERSION: &str = "1.3.0";

/// Builds owner-management calls against the Safe itself.
#[derive(Debug, Clone, Default)]
pub struct TxBuilderAdapter;

impl TxBuilderPort for TxBuilderAdapter {
    fn create_swap_owner_tx(
        &self,
        safe: &SafeInfo,
        new_owner: Address,
        old_owner: Address,
    ) -> Result<PendingSafeTx, PortError> {
        ensure_candidate(safe, new_owner)?;
        let prev_owner = safe
            .prev_owner(old_owner)
            .ok_or_else(|| PortError::Validation(format!("{old_owner} is not an owner")))?;
        let data = encode_call(
            SWAP_OWNER_SIGNATURE,
            &[
                DynSolValue::Address(prev_owner),
                DynSolValue::Address(old_owner),
                DynSolValue::Address(new_owner),
            ],
        )?;
        self_call(
            safe,
            data,
            TxDescription::SwapOwner {
                prev_owner,
                old_owner,
                new_owner,
            },
        )
    }

    fn create_add_owner_tx(
        &self,
        safe: &SafeInfo,
        owner: Address,
        threshold: u64,
    ) -> Result<PendingSafeTx, PortError> {
        ensure_candidate(safe, owner)?;
        let max = safe.owners.len() as u64 + 1;
        if threshold == 0 || threshold > max {
            return Err(PortError::Validation(format!(
                "threshold {threshold} outside 1..={max}"
            )));
        }
        let data = encode_call(
            ADD_OWNER_SIGNATURE,
            &[
                DynSolValue::Address(owner),
                DynSolValue::Uint(U256::from(threshold), 256),
            ],
        )?;
        self_call(safe, data, TxDescription::AddOwner { owner, threshold })
    }
}

fn ensure_candidate(safe: &SafeInfo, owner: Address) -> Result<(), PortError> {
    if owner == Address::ZERO || owner == SENTINEL_OWNERS || owner == safe.address {
        return Err(PortError::Validation(format!("{owner} cannot be an owner")));
    }
    if safe.is_owner(owner) {
        return Err(PortError::Validation(format!("{owner} is already an owner")));
    }
    Ok(())
}

fn encode_call(signature: &str, args: &[DynSolValue]) -> Result<Bytes, PortError> {
    let function = Function::parse(signature)
        .map_err(|e| PortError::Validation(format!("invalid function '{signature}': {e}")))?;
    let encoded = function
        .abi_encode_input(args)
        .map_err(|e| PortError::Validation(format!("abi encoding failed: {e}")))?;
    Ok(Bytes::from(encoded))
}

fn self_call(
    safe: &SafeInfo,
    data: Bytes,
    description: TxDescription,
) -> Result<PendingSafeTx, PortError> {
    let safe_tx_hash = safe_tx_hash(safe, &data)?;
    tracing::info!(
        safe = %safe.address,
        nonce = safe.nonce,
        %safe_tx_hash,
        kind = %description.kind(),
        "built owner change"
    );
    Ok(PendingSafeTx {
        chain_id: safe.chain_id,
        safe_address: safe.address,
        to: safe.address,
        value: U256::ZERO,
        data,
        operation: 0,
        nonce: safe.nonce,
        safe_tx_hash,
        description,
    })
}

fn safe_tx_hash(safe: &SafeInfo, data: &Bytes) -> Result<B256, PortError> {
    let version = safe.version.as_deref().unwrap_or(DEFAULT_SAFE_VERSION);
    let safe_version = SafeWalletVersion::parse(version)
        .map_err(|e| PortError::Validation(format!("invalid safeVersion: {e}")))?;
    let tx = TxInput::new(
        safe.address,
        U256::ZERO,
        format!("{data}"),
        0,
        U256::ZERO,
        U256::ZERO,
        U256::ZERO,
        Address::ZERO,
        Address::ZERO,
        String::new(),
    );
    Ok(tx_signing_hashes(&tx, safe.address, safe.nonce, safe.chain_id, safe_version).safe_tx_hash)
}

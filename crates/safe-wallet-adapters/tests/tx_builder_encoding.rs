use alloy::primitives::{keccak256, Address, U256};

use safe_wallet_adapters::tx_builder::{ADD_OWNER_SIGNATURE, SWAP_OWNER_SIGNATURE};
use safe_wallet_adapters::TxBuilderAdapter;
use safe_wallet_core::{PortError, TxBuilderPort, TxDescription, SENTINEL_OWNERS};

mod common;

use common::{owner, safe_address, safe_info};

fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

fn word(address: Address) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[12..].copy_from_slice(address.as_slice());
    out
}

#[test]
fn swap_owner_targets_the_safe_with_linked_list_predecessor() {
    let safe = safe_info(vec![owner(0x11), owner(0x22)], 1);
    let tx = TxBuilderAdapter
        .create_swap_owner_tx(&safe, owner(0x33), owner(0x22))
        .expect("swap tx");

    assert_eq!(tx.to, safe_address());
    assert_eq!(tx.safe_address, safe_address());
    assert_eq!(tx.value, U256::ZERO);
    assert_eq!(tx.nonce, 4);
    assert_eq!(&tx.data[..4], &selector(SWAP_OWNER_SIGNATURE));
    assert_eq!(tx.data.len(), 4 + 3 * 32);
    assert_eq!(&tx.data[4..36], &word(owner(0x11)));
    assert_eq!(&tx.data[36..68], &word(owner(0x22)));
    assert_eq!(&tx.data[68..100], &word(owner(0x33)));
    assert_eq!(
        tx.description,
        TxDescription::SwapOwner {
            prev_owner: owner(0x11),
            old_owner: owner(0x22),
            new_owner: owner(0x33),
        }
    );
}

#[test]
fn swapping_the_first_owner_uses_the_sentinel() {
    let safe = safe_info(vec![owner(0x11), owner(0x22)], 1);
    let tx = TxBuilderAdapter
        .create_swap_owner_tx(&safe, owner(0x33), owner(0x11))
        .expect("swap tx");
    assert_eq!(&tx.data[4..36], &word(SENTINEL_OWNERS));
}

#[test]
fn add_owner_encodes_threshold_and_hash_depends_on_nonce() {
    let mut safe = safe_info(vec![owner(0x11)], 1);
    let tx = TxBuilderAdapter
        .create_add_owner_tx(&safe, owner(0x22), 2)
        .expect("add tx");
    assert_eq!(&tx.data[..4], &selector(ADD_OWNER_SIGNATURE));
    assert_eq!(&tx.data[4..36], &word(owner(0x22)));
    assert_eq!(U256::from_be_slice(&tx.data[36..68]), U256::from(2));

    safe.nonce += 1;
    let next = TxBuilderAdapter
        .create_add_owner_tx(&safe, owner(0x22), 2)
        .expect("add tx");
    assert_eq!(next.data, tx.data);
    assert_ne!(next.safe_tx_hash, tx.safe_tx_hash);
}

#[test]
fn rejects_invalid_owner_candidates_and_thresholds() {
    let safe = safe_info(vec![owner(0x11)], 1);
    let builder = TxBuilderAdapter;

    for candidate in [Address::ZERO, SENTINEL_OWNERS, safe_address(), owner(0x11)] {
        let err = builder
            .create_add_owner_tx(&safe, candidate, 1)
            .expect_err("candidate must be rejected");
        assert!(matches!(err, PortError::Validation(_)));
    }
    for threshold in [0, 3] {
        assert!(builder.create_add_owner_tx(&safe, owner(0x22), threshold).is_err());
    }
    let err = builder
        .create_swap_owner_tx(&safe, owner(0x22), owner(0x99))
        .expect_err("old owner unknown");
    assert!(matches!(err, PortError::Validation(_)));
}

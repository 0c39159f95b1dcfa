use alloy::primitives::{Address, Bytes, B256, U256};
use safe_wallet_core::{
    AddressBookEntry, ImplementationVersionState, NamedAddress, OwnerChangeKind, PendingSafeTx,
    SafeInfo, TxDescription, SENTINEL_OWNERS,
};

#[test]
fn pending_tx_serializes_without_loss() {
    let tx = PendingSafeTx {
        chain_id: 11155111,
        safe_address: Address::repeat_byte(0xbe),
        to: Address::repeat_byte(0xbe),
        value: U256::ZERO,
        data: Bytes::from(vec![0xe3, 0x18, 0xb5, 0x2b]),
        operation: 0,
        nonce: 12,
        safe_tx_hash: B256::repeat_byte(0x01),
        description: TxDescription::SwapOwner {
            prev_owner: SENTINEL_OWNERS,
            old_owner: Address::repeat_byte(0x11),
            new_owner: Address::repeat_byte(0x22),
        },
    };

    let encoded = serde_json::to_vec(&tx).expect("serialize tx");
    let decoded: PendingSafeTx = serde_json::from_slice(&encoded).expect("deserialize tx");
    assert_eq!(decoded, tx);
    assert_eq!(decoded.description.kind(), OwnerChangeKind::SwapOwner);
}

#[test]
fn owner_linked_list_lookup() {
    let owners = vec![Address::repeat_byte(0x11), Address::repeat_byte(0x22)];
    let safe = SafeInfo {
        chain_id: 1,
        address: Address::repeat_byte(0xbe),
        owners: owners.clone(),
        threshold: 1,
        nonce: 0,
        version: None,
        implementation_version_state: ImplementationVersionState::default(),
    };
    assert_eq!(safe.prev_owner(owners[0]), Some(SENTINEL_OWNERS));
    assert_eq!(safe.prev_owner(owners[1]), Some(owners[0]));
    assert_eq!(safe.prev_owner(Address::repeat_byte(0x99)), None);
    assert!(safe.is_owner(owners[1]));
    assert_eq!(safe.implementation_version_state, ImplementationVersionState::Unknown);
}

#[test]
fn blank_names_are_not_display_names() {
    let address = Address::repeat_byte(0x11);
    assert_eq!(NamedAddress::new(address).display_name(), None);
    assert_eq!(NamedAddress::with_name(address, "  ").display_name(), None);
    assert_eq!(NamedAddress::with_name(address, " Ada ").display_name(), Some("Ada"));
    assert_eq!(AddressBookEntry::new(address, "Ada").name, "Ada");
    assert_eq!(OwnerChangeKind::AddOwner.to_string(), "Add owner");
}

use safe_wallet_core::format::{byte_length, BYTES_PREVIEW_LIMIT};
use safe_wallet_core::{
    generate_data_row_value, AddressInfo, DataRowType, DataRowValue, ExplorerLink,
};

#[test]
fn absent_value_renders_nothing() {
    assert_eq!(generate_data_row_value(None, Some(DataRowType::Hash), None, None), None);
}

#[test]
fn raw_data_byte_count_is_half_the_hex_digits() {
    for (hex, bytes) in [("0x", 0), ("", 0), ("0x00", 1), ("0xdeadbeef", 4), ("cafe", 2)] {
        assert_eq!(byte_length(hex), bytes, "{hex}");
        match generate_data_row_value(Some(hex), Some(DataRowType::RawData), None, None) {
            Some(DataRowValue::RawData { byte_length, copy_text }) => {
                assert_eq!(byte_length, bytes);
                assert_eq!(copy_text, hex);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}

#[test]
fn address_uses_info_and_explorer() {
    let explorer = ExplorerLink::for_chain_name("sepolia");
    let info = AddressInfo {
        name: Some("MultiSendCallOnly".to_owned()),
        logo_uri: Some("https://example.invalid/logo.png".to_owned()),
    };
    let value = "0x40A2aCCbd92BCA938b02010E17A5b8929b49130D";
    let row = generate_data_row_value(
        Some(value),
        Some(DataRowType::Address),
        Some(&explorer),
        Some(&info),
    );
    assert_eq!(
        row,
        Some(DataRowValue::Identity {
            value: value.to_owned(),
            name: Some("MultiSendCallOnly".to_owned()),
            logo_uri: Some("https://example.invalid/logo.png".to_owned()),
            explorer_url: Some(format!("https://sepolia.etherscan.io/address/{value}")),
            copyable: true,
        })
    );
}

#[test]
fn hash_links_to_transaction_page_only_with_explorer() {
    let hash = "0x6f2c3f6b3c8d7e6a5b4c3d2e1f0a9b8c7d6e5f4a3b2c1d0e9f8a7b6c5d4e3f2a";
    match generate_data_row_value(Some(hash), Some(DataRowType::Hash), None, None) {
        Some(DataRowValue::Identity { explorer_url, name, .. }) => {
            assert!(explorer_url.is_none());
            assert!(name.is_none());
        }
        other => panic!("unexpected {other:?}"),
    }
    let explorer = ExplorerLink::new("https://etherscan.io/");
    match generate_data_row_value(Some(hash), Some(DataRowType::Hash), Some(&explorer), None) {
        Some(DataRowValue::Identity { explorer_url, .. }) => {
            assert_eq!(explorer_url, Some(format!("https://etherscan.io/tx/{hash}")));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn bytes_preview_is_capped() {
    let long = format!("0x{}", "ab".repeat(64));
    match generate_data_row_value(Some(&long), Some(DataRowType::Bytes), None, None) {
        Some(DataRowValue::Bytes { preview, full, truncated }) => {
            assert!(truncated);
            assert_eq!(preview.chars().count(), BYTES_PREVIEW_LIMIT + 1);
            assert_eq!(full, long);
        }
        other => panic!("unexpected {other:?}"),
    }
    match generate_data_row_value(Some("0x1234"), Some(DataRowType::Bytes), None, None) {
        Some(DataRowValue::Bytes { preview, truncated, .. }) => {
            assert!(!truncated);
            assert_eq!(preview, "0x1234");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn untyped_value_is_verbatim_text() {
    assert_eq!(
        generate_data_row_value(Some("42 wei"), None, None, None),
        Some(DataRowValue::Text("42 wei".to_owned()))
    );
}

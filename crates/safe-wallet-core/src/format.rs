//! Display values for transaction data rows.

use crate::explorer::{ExplorerLink, ExplorerTarget};

/// Maximum number of characters shown for a `Bytes` preview.
pub const BYTES_PREVIEW_LIMIT: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataRowType {
    Hash,
    RawData,
    Address,
    Bytes,
}

/// Optional identity decoration for an address (known contract, address book).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressInfo {
    pub name: Option<String>,
    pub logo_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataRowValue {
    Identity {
        value: String,
        name: Option<String>,
        logo_uri: Option<String>,
        explorer_url: Option<String>,
        copyable: bool,
    },
    RawData {
        byte_length: usize,
        copy_text: String,
    },
    Bytes {
        preview: String,
        full: String,
        truncated: bool,
    },
    Text(String),
}

pub fn generate_data_row_value(
    value: Option<&str>,
    ty: Option<DataRowType>,
    explorer: Option<&ExplorerLink>,
    info: Option<&AddressInfo>,
) -> Option<DataRowValue> {
    let value = value?;
    let row = match ty {
        Some(DataRowType::Hash) => DataRowValue::Identity {
            value: value.to_owned(),
            name: None,
            logo_uri: None,
            explorer_url: explorer.map(|e| e.url(ExplorerTarget::Tx, value)),
            copyable: true,
        },
        Some(DataRowType::Address) => DataRowValue::Identity {
            value: value.to_owned(),
            name: info.and_then(|i| i.name.clone()),
            logo_uri: info.and_then(|i| i.logo_uri.clone()),
            explorer_url: explorer.map(|e| e.url(ExplorerTarget::Address, value)),
            copyable: true,
        },
        Some(DataRowType::RawData) => DataRowValue::RawData {
            byte_length: byte_length(value),
            copy_text: value.to_owned(),
        },
        Some(DataRowType::Bytes) => {
            let truncated = value.chars().count() > BYTES_PREVIEW_LIMIT;
            let preview = if truncated {
                let head: String = value.chars().take(BYTES_PREVIEW_LIMIT).collect();
                format!("{head}…")
            } else {
                value.to_owned()
            };
            DataRowValue::Bytes {
                preview,
                full: value.to_owned(),
                truncated,
            }
        }
        None => DataRowValue::Text(value.to_owned()),
    };
    Some(row)
}

/// Number of bytes encoded by a hex string, with or without the `0x` prefix.
pub fn byte_length(hex: &str) -> usize {
    let digits = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex);
    digits.len() / 2
}

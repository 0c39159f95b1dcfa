pub mod address_book;
pub mod analytics;
pub mod clock;
pub mod config;
pub mod corekit;
pub mod crypto;
pub mod device_share;
pub mod safe_info;
pub mod security_questions;
pub mod signing;
pub mod tx_builder;

pub use address_book::AddressBookAdapter;
pub use analytics::{RecordedEvent, TracingAnalytics};
pub use config::AppConfig;
pub use corekit::{metadata_key_for, InMemoryCoreKit, MetadataStore};
pub use device_share::DeviceShareAdapter;
pub use safe_info::SafeInfoAdapter;
pub use security_questions::PasswordRecoveryAdapter;
pub use signing::{SignatureRecord, SigningAdapter};
pub use tx_builder::TxBuilderAdapter;

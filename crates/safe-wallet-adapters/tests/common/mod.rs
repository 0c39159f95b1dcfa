#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use alloy::primitives::{Address, B256};

use safe_wallet_adapters::{
    DeviceShareAdapter, InMemoryCoreKit, MetadataStore, PasswordRecoveryAdapter,
};
use safe_wallet_core::social_login::ConnectedCallback;
use safe_wallet_core::{ImplementationVersionState, SafeInfo, SocialWalletService, UserInfo};

pub type RuntimeService =
    SocialWalletService<InMemoryCoreKit, PasswordRecoveryAdapter, DeviceShareAdapter>;

pub fn safe_address() -> Address {
    "0x000000000000000000000000000000000000BEEF"
        .parse()
        .expect("valid safe address")
}

pub fn owner(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

pub fn safe_info(owners: Vec<Address>, threshold: u64) -> SafeInfo {
    SafeInfo {
        chain_id: 11155111,
        address: safe_address(),
        owners,
        threshold,
        nonce: 4,
        version: Some("1.3.0".to_owned()),
        implementation_version_state: ImplementationVersionState::Outdated,
    }
}

pub fn user() -> UserInfo {
    UserInfo {
        email: "ada@example.com".to_owned(),
        name: Some("Ada".to_owned()),
        profile_image: None,
    }
}

pub fn counter() -> (Arc<AtomicUsize>, ConnectedCallback) {
    let count = Arc::new(AtomicUsize::new(0));
    let handle = Arc::clone(&count);
    let callback: ConnectedCallback = Box::new(move || {
        handle.fetch_add(1, Ordering::SeqCst);
    });
    (count, callback)
}

/// A fully wired login service over the in-process SDK simulator.
pub fn runtime_service(
    device_shares: DeviceShareAdapter,
) -> (RuntimeService, Arc<AtomicUsize>) {
    let core_kit = InMemoryCoreKit::new(user(), B256::repeat_byte(0x42), MetadataStore::default());
    core_kit.init().expect("init core kit");
    let security_questions = PasswordRecoveryAdapter::new(&core_kit);
    let (connected, on_connect) = counter();
    (
        SocialWalletService::new(core_kit, security_questions, device_shares, on_connect),
        connected,
    )
}

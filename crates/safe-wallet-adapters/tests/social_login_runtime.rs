use std::sync::atomic::Ordering;

use alloy::primitives::B256;
use alloy::signers::local::PrivateKeySigner;

use safe_wallet_adapters::{metadata_key_for, DeviceShareAdapter};
use safe_wallet_core::social_login::KEY_NOT_FOUND;
use safe_wallet_core::{CoreKitPort, DeviceSharePort, PortError, WalletLoginState};

mod common;

use common::{runtime_service, user};

const PASSWORD: &str = "Test1234!";

#[test]
fn first_login_is_ready_without_mfa() {
    let (mut service, connected) = runtime_service(DeviceShareAdapter::in_memory());
    assert_eq!(service.core_kit.signer_account(), None);

    assert_eq!(service.login_and_create().expect("login"), WalletLoginState::Ready);
    let key = PrivateKeySigner::from_bytes(&B256::repeat_byte(0x42)).expect("valid key");
    assert_eq!(service.core_kit.signer_account(), Some(key.address()));
    assert_eq!(connected.load(Ordering::SeqCst), 1);
    assert_eq!(service.core_kit.commits(), 1);
    assert!(!service.is_mfa_enabled().expect("modules"));
    assert!(!service.is_recovery_password_set().expect("enabled"));
    assert_eq!(
        service.export_signer_key("ignored without password").expect("export"),
        B256::repeat_byte(0x42)
    );
}

#[test]
fn mfa_account_needs_password_then_device_share_on_next_login() {
    let devices = DeviceShareAdapter::in_memory();
    let (mut service, connected) = runtime_service(devices.clone());

    service.login_and_create().expect("first login");
    service.enable_mfa(None, PASSWORD).expect("enable mfa");
    assert!(service.is_mfa_enabled().expect("modules"));
    assert!(service.is_recovery_password_set().expect("enabled"));

    service.core_kit.logout().expect("logout");
    assert_eq!(
        service.login_and_create().expect("second login"),
        WalletLoginState::ManualRecovery
    );

    let err = service
        .recover_account_with_password("wrong password", true)
        .expect_err("wrong password");
    assert!(matches!(err, PortError::Validation(_)));
    assert_eq!(service.state(), WalletLoginState::ManualRecovery);

    assert!(service
        .recover_account_with_password(PASSWORD, true)
        .expect("recover"));
    assert_eq!(service.state(), WalletLoginState::Ready);
    assert!(devices.stored_factor(&user()).expect("device share").is_some());

    service.core_kit.logout().expect("logout");
    assert_eq!(
        service.login_and_create().expect("third login"),
        WalletLoginState::Ready
    );
    assert_eq!(connected.load(Ordering::SeqCst), 3);
}

#[test]
fn changing_the_password_requires_the_old_one() {
    let (mut service, _) = runtime_service(DeviceShareAdapter::in_memory());
    service.login_and_create().expect("login");
    service.enable_mfa(None, PASSWORD).expect("enable mfa");

    assert!(matches!(
        service.enable_mfa(None, "Another123!"),
        Err(PortError::Policy(_))
    ));
    assert!(service.enable_mfa(Some("bad guess!"), "Another123!").is_err());
    service
        .enable_mfa(Some(PASSWORD), "Another123!")
        .expect("change password");

    let err = service.export_signer_key(PASSWORD).expect_err("old password");
    assert_eq!(
        err,
        PortError::Validation(
            "Error exporting account. Make sure the password is correct.".to_owned()
        )
    );
    assert!(service.export_signer_key("Another123!").is_ok());
}

#[test]
fn reset_account_clears_recovery_metadata() {
    let (mut service, _) = runtime_service(DeviceShareAdapter::in_memory());
    service.login_and_create().expect("login");
    service.enable_mfa(None, PASSWORD).expect("enable mfa");

    service.reset_account().expect("reset");

    assert_eq!(service.state(), WalletLoginState::NotInitialized);
    assert!(!service.is_recovery_password_set().expect("enabled"));
    let key = service.core_kit.metadata_key().expect("key");
    assert_eq!(key, metadata_key_for(&user().email));
    let stored = service
        .core_kit
        .metadata()
        .get(&key)
        .expect("metadata")
        .expect("value present");
    assert_eq!(stored["message"], KEY_NOT_FOUND);

    service.core_kit.logout().expect("logout");
    assert_eq!(service.login_and_create().expect("login"), WalletLoginState::Ready);
    assert!(!service.is_mfa_enabled().expect("modules"));
    assert_eq!(service.core_kit.metadata().get(&key).expect("metadata"), None);
}

#[test]
fn oauth_failure_returns_to_not_initialized() {
    let (mut service, connected) = runtime_service(DeviceShareAdapter::in_memory());
    service
        .core_kit
        .fail_next_login("popup closed")
        .expect("inject");

    let err = service.login_and_create().expect_err("login fails");
    assert!(matches!(err, PortError::Rejected(_)));
    assert_eq!(service.state(), WalletLoginState::NotInitialized);
    assert_eq!(connected.load(Ordering::SeqCst), 0);
}

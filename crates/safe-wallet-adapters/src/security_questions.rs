use alloy::primitives::B256;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use safe_wallet_core::{CoreKitPort, PortError, SecurityQuestionPort};

use crate::corekit::{InMemoryCoreKit, MetadataStore};
use crate::crypto::{
    decrypt_aes_gcm, derive_password_key, derive_password_key_with, encrypt_aes_gcm,
    generate_nonce, generate_salt, KdfAlgorithm,
};

const METADATA_FIELD: &str = "securityQuestions";
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A factor key sealed with a password-derived key, as kept in account metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SealedFactor {
    kdf: String,
    salt: String,
    nonce: String,
    ciphertext: String,
}

/// Recovers a factor key from the account's recovery password.
#[derive(Debug, Clone)]
pub struct PasswordRecoveryAdapter {
    core_kit: InMemoryCoreKit,
    store: MetadataStore,
}

impl PasswordRecoveryAdapter {
    pub fn new(core_kit: &InMemoryCoreKit) -> Self {
        Self {
            core_kit: core_kit.clone(),
            store: core_kit.metadata().clone(),
        }
    }

    fn load(&self) -> Result<Option<SealedFactor>, PortError> {
        let key = self.core_kit.metadata_key()?;
        let Some(Value::Object(fields)) = self.store.get(&key)? else {
            return Ok(None);
        };
        let Some(sealed) = fields.get(METADATA_FIELD) else {
            return Ok(None);
        };
        serde_json::from_value(sealed.clone())
            .map(Some)
            .map_err(|e| PortError::Validation(format!("corrupt recovery metadata: {e}")))
    }

    fn save(&self, sealed: SealedFactor) -> Result<(), PortError> {
        let key = self.core_kit.metadata_key()?;
        let mut fields = match self.store.get(&key)? {
            Some(Value::Object(fields)) => fields,
            _ => Map::new(),
        };
        fields.remove("message");
        let value = serde_json::to_value(sealed)
            .map_err(|e| PortError::Validation(format!("serialize recovery metadata: {e}")))?;
        fields.insert(METADATA_FIELD.to_owned(), value);
        self.store.set(&key, Value::Object(fields))
    }
}

impl SecurityQuestionPort for PasswordRecoveryAdapter {
    fn is_enabled(&self) -> Result<bool, PortError> {
        Ok(self.load()?.is_some())
    }

    fn recover_with_password(&self, password: &str) -> Result<B256, PortError> {
        let sealed = self
            .load()?
            .ok_or_else(|| PortError::NotFound("no recovery password is set".to_owned()))?;
        unseal(&sealed, password)
    }

    fn upsert_password(
        &self,
        factor_key: B256,
        new_password: &str,
        old_password: Option<&str>,
    ) -> Result<(), PortError> {
        if new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(PortError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        if let Some(existing) = self.load()? {
            let old = old_password
                .ok_or_else(|| PortError::Policy("current password required".to_owned()))?;
            unseal(&existing, old)?;
        }
        self.save(seal(factor_key, new_password)?)?;
        tracing::info!("recovery password updated");
        Ok(())
    }
}

fn seal(factor_key: B256, password: &str) -> Result<SealedFactor, PortError> {
    let key = derive_password_key(password.as_bytes(), generate_salt()?)?;
    let nonce = generate_nonce()?;
    let ciphertext = encrypt_aes_gcm(&key.enc_key, nonce, factor_key.as_slice())?;
    Ok(SealedFactor {
        kdf: key.kdf_algorithm.tag().to_owned(),
        salt: STANDARD.encode(key.salt),
        nonce: STANDARD.encode(nonce),
        ciphertext: STANDARD.encode(ciphertext),
    })
}

fn unseal(sealed: &SealedFactor, password: &str) -> Result<B256, PortError> {
    let kdf = KdfAlgorithm::from_tag(&sealed.kdf)
        .ok_or_else(|| PortError::Validation(format!("unknown kdf '{}'", sealed.kdf)))?;
    let salt: [u8; 16] = decode_fixed(&sealed.salt, "salt")?;
    let nonce: [u8; 12] = decode_fixed(&sealed.nonce, "nonce")?;
    let ciphertext = decode(&sealed.ciphertext, "ciphertext")?;
    let key = derive_password_key_with(password.as_bytes(), salt, kdf)?;
    let plain = decrypt_aes_gcm(&key.enc_key, nonce, &ciphertext)
        .map_err(|_| PortError::Validation("incorrect password".to_owned()))?;
    if plain.len() != 32 {
        return Err(PortError::Validation("recovered factor has wrong length".to_owned()));
    }
    Ok(B256::from_slice(&plain))
}

fn decode(value: &str, field: &str) -> Result<Vec<u8>, PortError> {
    STANDARD
        .decode(value)
        .map_err(|e| PortError::Validation(format!("invalid base64 {field}: {e}")))
}

fn decode_fixed<const N: usize>(value: &str, field: &str) -> Result<[u8; N], PortError> {
    decode(value, field)?
        .try_into()
        .map_err(|_| PortError::Validation(format!("{field} must be {N} bytes")))
}

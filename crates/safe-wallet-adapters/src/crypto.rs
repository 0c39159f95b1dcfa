use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use hkdf::Hkdf;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use thiserror::Error;

use safe_wallet_core::PortError;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("{0} generation failed: {1}")]
    Random(&'static str, getrandom::Error),
    #[error("{0} derivation failed")]
    Kdf(&'static str),
    #[error("aes-gcm {0} failed")]
    Cipher(&'static str),
}

impl From<CryptoError> for PortError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::Random(..) => PortError::Transport(e.to_string()),
            CryptoError::Kdf(_) | CryptoError::Cipher(_) => PortError::Validation(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfAlgorithm {
    Argon2idV1,
    Pbkdf2HmacSha256V1,
}

impl KdfAlgorithm {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Argon2idV1 => "argon2id-v1",
            Self::Pbkdf2HmacSha256V1 => "pbkdf2-hmac-sha256-v1",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "argon2id-v1" => Some(Self::Argon2idV1),
            "pbkdf2-hmac-sha256-v1" => Some(Self::Pbkdf2HmacSha256V1),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PasswordKey {
    pub kdf_algorithm: KdfAlgorithm,
    pub salt: [u8; 16],
    pub enc_key: [u8; 32],
}

pub fn generate_salt() -> Result<[u8; 16], CryptoError> {
    let mut salt = [0u8; 16];
    getrandom::getrandom(&mut salt).map_err(|e| CryptoError::Random("salt", e))?;
    Ok(salt)
}

pub fn generate_nonce() -> Result<[u8; 12], CryptoError> {
    let mut nonce = [0u8; 12];
    getrandom::getrandom(&mut nonce).map_err(|e| CryptoError::Random("nonce", e))?;
    Ok(nonce)
}

/// Derives an encryption key, preferring argon2id and falling back to pbkdf2.
pub fn derive_password_key(password: &[u8], salt: [u8; 16]) -> Result<PasswordKey, CryptoError> {
    let (root_key, kdf_algorithm) = derive_root_key(password, &salt);
    expand(root_key, kdf_algorithm, salt)
}

/// Re-derives with the algorithm recorded alongside a stored ciphertext.
pub fn derive_password_key_with(
    password: &[u8],
    salt: [u8; 16],
    kdf_algorithm: KdfAlgorithm,
) -> Result<PasswordKey, CryptoError> {
    let root_key = match kdf_algorithm {
        KdfAlgorithm::Argon2idV1 => {
            argon2_root(password, &salt).ok_or(CryptoError::Kdf("argon2id"))?
        }
        KdfAlgorithm::Pbkdf2HmacSha256V1 => pbkdf2_root(password, &salt),
    };
    expand(root_key, kdf_algorithm, salt)
}

fn expand(
    root_key: [u8; 32],
    kdf_algorithm: KdfAlgorithm,
    salt: [u8; 16],
) -> Result<PasswordKey, CryptoError> {
    let hk = Hkdf::<Sha256>::new(None, &root_key);
    let mut enc_key = [0u8; 32];
    hk.expand(b"factor_enc_key_v1", &mut enc_key)
        .map_err(|_| CryptoError::Kdf("hkdf factor_enc_key_v1"))?;
    Ok(PasswordKey {
        kdf_algorithm,
        salt,
        enc_key,
    })
}

pub fn encrypt_aes_gcm(
    enc_key: &[u8; 32],
    nonce: [u8; 12],
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256Gcm::new_from_slice(enc_key).map_err(|_| CryptoError::Cipher("init"))?;
    let nonce = Nonce::<aes_gcm::aead::consts::U12>::from(nonce);
    cipher
        .encrypt(&nonce, plaintext)
        .map_err(|_| CryptoError::Cipher("encrypt"))
}

pub fn decrypt_aes_gcm(
    enc_key: &[u8; 32],
    nonce: [u8; 12],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256Gcm::new_from_slice(enc_key).map_err(|_| CryptoError::Cipher("init"))?;
    let nonce = Nonce::<aes_gcm::aead::consts::U12>::from(nonce);
    cipher
        .decrypt(&nonce, ciphertext)
        .map_err(|_| CryptoError::Cipher("decrypt"))
}

fn derive_root_key(password: &[u8], salt: &[u8; 16]) -> ([u8; 32], KdfAlgorithm) {
    match argon2_root(password, salt) {
        Some(root) => (root, KdfAlgorithm::Argon2idV1),
        None => (pbkdf2_root(password, salt), KdfAlgorithm::Pbkdf2HmacSha256V1),
    }
}

fn argon2_root(password: &[u8], salt: &[u8; 16]) -> Option<[u8; 32]> {
    let mut root = [0u8; 32];
    let params = Params::new(19_456, 2, 1, Some(32)).ok()?;
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password_into(password, salt, &mut root)
        .ok()?;
    Some(root)
}

fn pbkdf2_root(password: &[u8], salt: &[u8; 16]) -> [u8; 32] {
    let mut root = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password, salt, 600_000, &mut root);
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kdf_tags_round_trip() {
        for algo in [KdfAlgorithm::Argon2idV1, KdfAlgorithm::Pbkdf2HmacSha256V1] {
            assert_eq!(KdfAlgorithm::from_tag(algo.tag()), Some(algo));
        }
        assert_eq!(KdfAlgorithm::from_tag("scrypt"), None);
    }

    #[test]
    fn wrong_key_fails_to_decrypt() {
        let salt = [7u8; 16];
        let right = derive_password_key(b"hunter2", salt).expect("derive");
        let wrong =
            derive_password_key_with(b"hunter3", salt, right.kdf_algorithm).expect("derive");
        let nonce = [1u8; 12];
        let ct = encrypt_aes_gcm(&right.enc_key, nonce, b"factor").expect("encrypt");
        assert_eq!(
            decrypt_aes_gcm(&right.enc_key, nonce, &ct).expect("decrypt"),
            b"factor"
        );
        let err = decrypt_aes_gcm(&wrong.enc_key, nonce, &ct).expect_err("wrong key");
        assert!(matches!(PortError::from(err), PortError::Validation(_)));
    }
}

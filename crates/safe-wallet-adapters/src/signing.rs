use std::sync::{Arc, Mutex, MutexGuard};

use alloy::primitives::{keccak256, Address, Bytes, B256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;

use safe_wallet_core::{PendingSafeTx, PortError, SigningPort, TimestampMs};

use crate::clock::now_ms;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureRecord {
    pub safe_tx_hash: B256,
    pub signer: Address,
    pub signature: Bytes,
    pub flow_id: String,
    pub origin: String,
    pub signed_at_ms: TimestampMs,
}

#[derive(Debug, Default)]
struct SigningState {
    signer: Option<Address>,
    key: Option<PrivateKeySigner>,
    records: Vec<SignatureRecord>,
}

/// Signer for the connected account. Accounts connected with their key get
/// real secp256k1 signatures; manually entered addresses get a deterministic
/// placeholder signature.
#[derive(Debug, Clone, Default)]
pub struct SigningAdapter {
    state: Arc<Mutex<SigningState>>,
}

impl SigningAdapter {
    fn lock(&self) -> Result<MutexGuard<'_, SigningState>, PortError> {
        self.state
            .lock()
            .map_err(|e| PortError::Transport(format!("signing lock poisoned: {e}")))
    }

    /// Connects an address without its key.
    pub fn set_signer(&self, signer: Option<Address>) -> Result<(), PortError> {
        let mut g = self.lock()?;
        if g.key.as_ref().map(|k| k.address()) != signer {
            g.key = None;
        }
        g.signer = signer;
        Ok(())
    }

    /// Connects a key-backed account and returns its address.
    pub fn connect_key(&self, key: PrivateKeySigner) -> Result<Address, PortError> {
        let mut g = self.lock()?;
        let address = key.address();
        g.signer = Some(address);
        g.key = Some(key);
        Ok(address)
    }

    pub fn is_key_backed(&self) -> bool {
        self.lock().map(|g| g.key.is_some()).unwrap_or_default()
    }

    pub fn signer(&self) -> Option<Address> {
        self.lock().ok().and_then(|g| g.signer)
    }

    pub fn records(&self) -> Result<Vec<SignatureRecord>, PortError> {
        Ok(self.lock()?.records.clone())
    }

    /// Signatures collected for one transaction, in signing order.
    pub fn confirmations(&self, safe_tx_hash: B256) -> Result<Vec<SignatureRecord>, PortError> {
        Ok(self
            .lock()?
            .records
            .iter()
            .filter(|r| r.safe_tx_hash == safe_tx_hash)
            .cloned()
            .collect())
    }
}

impl SigningPort for SigningAdapter {
    fn sign_tx(&self, tx: &PendingSafeTx, flow_id: &str, origin: &str) -> Result<(), PortError> {
        let mut g = self.lock()?;
        let signer = g
            .signer
            .ok_or_else(|| PortError::Policy("NO_CONNECTED_ACCOUNT".to_owned()))?;
        if g
            .records
            .iter()
            .any(|r| r.safe_tx_hash == tx.safe_tx_hash && r.signer == signer)
        {
            return Err(PortError::Rejected(format!(
                "{signer} already signed {}",
                tx.safe_tx_hash
            )));
        }

        let signature = match g.key.as_ref().filter(|k| k.address() == signer) {
            Some(key) => {
                let sig = key
                    .sign_hash_sync(&tx.safe_tx_hash)
                    .map_err(|e| PortError::Rejected(format!("signing failed: {e}")))?;
                Bytes::from(sig.as_bytes().to_vec())
            }
            None => deterministic_signature(tx.safe_tx_hash, signer),
        };
        tracing::info!(%signer, safe_tx_hash = %tx.safe_tx_hash, flow_id, "transaction signed");
        g.records.push(SignatureRecord {
            safe_tx_hash: tx.safe_tx_hash,
            signer,
            signature,
            flow_id: flow_id.to_owned(),
            origin: origin.to_owned(),
            signed_at_ms: TimestampMs(now_ms()),
        });
        Ok(())
    }
}

fn deterministic_signature(safe_tx_hash: B256, signer: Address) -> Bytes {
    let mut seed = Vec::with_capacity(52);
    seed.extend_from_slice(signer.as_slice());
    seed.extend_from_slice(safe_tx_hash.as_slice());
    let hash = keccak256(seed);
    let mut sig = Vec::with_capacity(65);
    sig.extend_from_slice(hash.as_slice());
    sig.extend_from_slice(hash.as_slice());
    sig.push(27);
    Bytes::from(sig)
}

use std::time::Duration;

use alloy::primitives::Address;
use serde::Deserialize;
use serde_json::Value;

use safe_wallet_core::{ChainId, ImplementationVersionState, PortError, SafeInfo, SafeInfoPort};

use crate::config::AppConfig;

#[derive(Debug, Deserialize)]
struct SafeResponse {
    address: Address,
    owners: Vec<Address>,
    threshold: u64,
    nonce: Value,
    #[serde(default)]
    version: Option<String>,
}

/// Reads Safe state from the Safe Transaction Service.
#[derive(Debug, Clone)]
pub struct SafeInfoAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
    latest_version: semver::Version,
}

impl SafeInfoAdapter {
    pub fn new(config: &AppConfig) -> Result<Self, PortError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.safe_service_timeout_ms))
            .build()
            .map_err(|e| PortError::Transport(format!("http client: {e}")))?;
        let latest_version = semver::Version::parse(&config.latest_safe_version).map_err(|e| {
            PortError::Validation(format!(
                "invalid latest safe version '{}': {e}",
                config.latest_safe_version
            ))
        })?;
        Ok(Self {
            client,
            base_url: config.safe_service_base_url.trim_end_matches('/').to_owned(),
            latest_version,
        })
    }

    pub fn safe_url(&self, address: Address) -> String {
        format!("{}/api/v1/safes/{}/", self.base_url, address.to_checksum(None))
    }
}

impl SafeInfoPort for SafeInfoAdapter {
    fn fetch_safe_info(&self, chain_id: ChainId, address: Address) -> Result<SafeInfo, PortError> {
        let url = self.safe_url(address);
        tracing::debug!(%url, chain_id, "fetching safe info");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| PortError::Transport(format!("GET {url}: {e}")))?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(PortError::NotFound(format!("safe {address} on chain {chain_id}")));
        }
        if !status.is_success() {
            return Err(PortError::Transport(format!("safe service returned {status}")));
        }
        let body: SafeResponse = response
            .json()
            .map_err(|e| PortError::Validation(format!("unexpected safe response: {e}")))?;

        let nonce = parse_nonce(&body.nonce)?;
        let implementation_version_state =
            version_state(body.version.as_deref(), &self.latest_version);
        tracing::info!(
            safe = %body.address,
            owners = body.owners.len(),
            threshold = body.threshold,
            nonce,
            ?implementation_version_state,
            "safe info loaded"
        );
        Ok(SafeInfo {
            chain_id,
            address: body.address,
            owners: body.owners,
            threshold: body.threshold,
            nonce,
            version: body.version.map(|v| base_version(&v).to_owned()),
            implementation_version_state,
        })
    }
}

fn parse_nonce(value: &Value) -> Result<u64, PortError> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
    .ok_or_else(|| PortError::Validation(format!("invalid nonce: {value}")))
}

/// Drops deployment suffixes such as `+L2`.
fn base_version(version: &str) -> &str {
    version.split('+').next().unwrap_or(version)
}

pub fn version_state(
    version: Option<&str>,
    latest: &semver::Version,
) -> ImplementationVersionState {
    let Some(version) = version else {
        return ImplementationVersionState::Unknown;
    };
    match semver::Version::parse(base_version(version)) {
        Ok(v) if v >= *latest => ImplementationVersionState::UpToDate,
        Ok(_) => ImplementationVersionState::Outdated,
        Err(_) => ImplementationVersionState::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_state_compares_against_latest() {
        let latest = semver::Version::new(1, 4, 1);
        assert_eq!(
            version_state(Some("1.3.0+L2"), &latest),
            ImplementationVersionState::Outdated
        );
        assert_eq!(
            version_state(Some("1.4.1"), &latest),
            ImplementationVersionState::UpToDate
        );
        assert_eq!(
            version_state(Some("banana"), &latest),
            ImplementationVersionState::Unknown
        );
        assert_eq!(version_state(None, &latest), ImplementationVersionState::Unknown);
    }

    #[test]
    fn nonce_accepts_strings_and_numbers() {
        assert_eq!(parse_nonce(&Value::from(7)).expect("number"), 7);
        assert_eq!(parse_nonce(&Value::from("12")).expect("string"), 12);
        assert!(parse_nonce(&Value::Null).is_err());
    }
}

use std::path::PathBuf;

use safe_wallet_core::RecoveryLinks;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub safe_service_base_url: String,
    pub safe_service_timeout_ms: u64,
    pub latest_safe_version: String,
    pub analytics_enabled: bool,
    pub analytics_buffer_size: usize,
    pub sygna_waitlist_url: String,
    pub coincover_waitlist_url: String,
    pub recovery_help_url: String,
    pub recovery_feedback_url: String,
    /// Account the in-process login simulator signs in as.
    pub social_login_email: String,
    /// File mirroring device factor keys; in memory when unset.
    pub device_share_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            safe_service_base_url: "https://safe-transaction-mainnet.safe.global".to_owned(),
            safe_service_timeout_ms: 15_000,
            latest_safe_version: "1.4.1".to_owned(),
            analytics_enabled: true,
            analytics_buffer_size: 512,
            sygna_waitlist_url: "https://www.sygna.io".to_owned(),
            coincover_waitlist_url: "https://www.coincover.com".to_owned(),
            recovery_help_url: "https://help.safe.global".to_owned(),
            recovery_feedback_url: "https://safe.global".to_owned(),
            social_login_email: "owner@example.com".to_owned(),
            device_share_path: None,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `SAFE_WALLET_*` environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        override_string("SAFE_WALLET_SAFE_SERVICE_URL", &mut cfg.safe_service_base_url);
        override_parsed("SAFE_WALLET_SAFE_SERVICE_TIMEOUT_MS", &mut cfg.safe_service_timeout_ms);
        override_string("SAFE_WALLET_LATEST_SAFE_VERSION", &mut cfg.latest_safe_version);
        override_parsed("SAFE_WALLET_ANALYTICS_ENABLED", &mut cfg.analytics_enabled);
        override_parsed("SAFE_WALLET_ANALYTICS_BUFFER", &mut cfg.analytics_buffer_size);
        override_string("SAFE_WALLET_SYGNA_WAITLIST_URL", &mut cfg.sygna_waitlist_url);
        override_string("SAFE_WALLET_COINCOVER_WAITLIST_URL", &mut cfg.coincover_waitlist_url);
        override_string("SAFE_WALLET_RECOVERY_HELP_URL", &mut cfg.recovery_help_url);
        override_string("SAFE_WALLET_RECOVERY_FEEDBACK_URL", &mut cfg.recovery_feedback_url);
        override_string("SAFE_WALLET_SOCIAL_LOGIN_EMAIL", &mut cfg.social_login_email);
        if let Ok(path) = std::env::var("SAFE_WALLET_DEVICE_SHARE_PATH") {
            let path = path.trim();
            if !path.is_empty() {
                cfg.device_share_path = Some(PathBuf::from(path));
            }
        }
        cfg
    }

    pub fn recovery_links(&self) -> RecoveryLinks {
        RecoveryLinks {
            sygna_waitlist: self.sygna_waitlist_url.clone(),
            coincover_waitlist: self.coincover_waitlist_url.clone(),
            help_article: self.recovery_help_url.clone(),
            feedback_form: self.recovery_feedback_url.clone(),
        }
    }
}

fn override_string(key: &str, slot: &mut String) {
    if let Ok(value) = std::env::var(key) {
        let value = value.trim();
        if !value.is_empty() {
            *slot = value.to_owned();
        }
    }
}

fn override_parsed<T: std::str::FromStr>(key: &str, slot: &mut T) {
    let Ok(raw) = std::env::var(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *slot = value,
        Err(_) => tracing::warn!(key, value = %raw, "ignoring invalid config value"),
    }
}

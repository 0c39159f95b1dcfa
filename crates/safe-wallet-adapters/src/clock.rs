use web_time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch; zero if the clock reads before it.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

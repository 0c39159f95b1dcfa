use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use safe_wallet_core::{AnalyticsEvent, AnalyticsPort, TimestampMs};

use crate::clock::now_ms;
use crate::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    pub event: AnalyticsEvent,
    pub at_ms: TimestampMs,
}

/// Emits events on the `analytics` tracing target and keeps the most recent ones.
#[derive(Debug, Clone)]
pub struct TracingAnalytics {
    enabled: bool,
    capacity: usize,
    buffer: Arc<Mutex<VecDeque<RecordedEvent>>>,
}

impl TracingAnalytics {
    pub fn new(enabled: bool, capacity: usize) -> Self {
        Self {
            enabled,
            capacity,
            buffer: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.analytics_enabled, config.analytics_buffer_size)
    }

    pub fn recent(&self) -> Vec<RecordedEvent> {
        self.buffer
            .lock()
            .map(|g| g.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl AnalyticsPort for TracingAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        if !self.enabled {
            return;
        }
        tracing::info!(
            target: "analytics",
            category = %event.category,
            action = %event.action,
            label = event.label.as_deref().unwrap_or(""),
        );
        if self.capacity == 0 {
            return;
        }
        let Ok(mut g) = self.buffer.lock() else {
            tracing::warn!("analytics buffer lock poisoned; event dropped");
            return;
        };
        while g.len() >= self.capacity {
            g.pop_front();
        }
        g.push_back(RecordedEvent {
            event,
            at_ms: TimestampMs(now_ms()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use safe_wallet_core::analytics::settings;

    #[test]
    fn keeps_only_the_newest_events() {
        let sink = TracingAnalytics::new(true, 2);
        sink.track(settings::OWNERS.labeled(1));
        sink.track(settings::OWNERS.labeled(2));
        sink.track(settings::OWNERS.labeled(3));
        let labels: Vec<_> = sink
            .recent()
            .into_iter()
            .filter_map(|r| r.event.label)
            .collect();
        assert_eq!(labels, vec!["2", "3"]);
    }

    #[test]
    fn disabled_sink_records_nothing() {
        let sink = TracingAnalytics::new(false, 8);
        sink.track(settings::ADD_OWNER.event());
        assert!(sink.recent().is_empty());
    }
}

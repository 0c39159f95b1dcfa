//! Analytics event shapes and the catalogue of events the wallet emits.

use serde::{Deserialize, Serialize};

use crate::ports::AnalyticsPort;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub category: String,
    pub action: String,
    pub label: Option<String>,
}

/// Static part of an event; the label is filled in at emission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSpec {
    pub category: &'static str,
    pub action: &'static str,
}

impl EventSpec {
    pub const fn new(category: &'static str, action: &'static str) -> Self {
        Self { category, action }
    }

    pub fn event(&self) -> AnalyticsEvent {
        AnalyticsEvent {
            category: self.category.to_owned(),
            action: self.action.to_owned(),
            label: None,
        }
    }

    pub fn labeled(&self, label: impl ToString) -> AnalyticsEvent {
        AnalyticsEvent {
            label: Some(label.to_string()),
            ..self.event()
        }
    }
}

const RECOVERY_CATEGORY: &str = "recovery";
const SETTINGS_CATEGORY: &str = "settings";
const OVERVIEW_CATEGORY: &str = "overview";
const TX_LIST_CATEGORY: &str = "tx-list";

pub mod recovery {
    use super::{EventSpec, RECOVERY_CATEGORY};

    pub const SELECT_RECOVERY_METHOD: EventSpec =
        EventSpec::new(RECOVERY_CATEGORY, "Select recovery method");
    pub const CONTINUE_WITH_RECOVERY: EventSpec =
        EventSpec::new(RECOVERY_CATEGORY, "Continue with recovery");
    pub const CONTINUE_TO_WAITLIST: EventSpec =
        EventSpec::new(RECOVERY_CATEGORY, "Continue to waitlist");
    pub const GIVE_US_FEEDBACK: EventSpec = EventSpec::new(RECOVERY_CATEGORY, "Give us feedback");
    pub const LEARN_MORE: EventSpec = EventSpec::new(RECOVERY_CATEGORY, "Learn more");
}

pub mod settings {
    use super::{EventSpec, SETTINGS_CATEGORY};

    pub const OWNERS: EventSpec = EventSpec::new(SETTINGS_CATEGORY, "Owners");
    pub const THRESHOLD: EventSpec = EventSpec::new(SETTINGS_CATEGORY, "Threshold");
    pub const ADD_OWNER: EventSpec = EventSpec::new(SETTINGS_CATEGORY, "Add owner");
    pub const REPLACE_OWNER: EventSpec = EventSpec::new(SETTINGS_CATEGORY, "Replace owner");
}

pub mod overview {
    use super::{EventSpec, OVERVIEW_CATEGORY};

    pub const SIDEBAR_CLICKED: EventSpec = EventSpec::new(OVERVIEW_CATEGORY, "Sidebar clicked");
}

pub mod tx_list {
    use super::{EventSpec, TX_LIST_CATEGORY};

    pub const CONFIRM: EventSpec = EventSpec::new(TX_LIST_CATEGORY, "Confirm transaction");
}

/// Emits through the sink and logs the event at debug level.
pub fn track(sink: &dyn AnalyticsPort, event: AnalyticsEvent) {
    tracing::debug!(
        category = %event.category,
        action = %event.action,
        label = event.label.as_deref().unwrap_or(""),
        "analytics event"
    );
    sink.track(event);
}

//! Recovery method chooser shown before setting up account recovery.

use crate::analytics::{self, recovery};
use crate::ports::AnalyticsPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryMethod {
    #[default]
    SelfCustody,
    Sygna,
    Coincover,
}

impl RecoveryMethod {
    pub const ALL: [RecoveryMethod; 3] = [
        RecoveryMethod::SelfCustody,
        RecoveryMethod::Sygna,
        RecoveryMethod::Coincover,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RecoveryMethod::SelfCustody => "Self-custody recovery",
            RecoveryMethod::Sygna => "Sygna Gatekeeper",
            RecoveryMethod::Coincover => "Coincover",
        }
    }

    pub fn is_partner(&self) -> bool {
        !matches!(self, RecoveryMethod::SelfCustody)
    }
}

/// External destinations the modal links to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryLinks {
    pub sygna_waitlist: String,
    pub coincover_waitlist: String,
    pub help_article: String,
    pub feedback_form: String,
}

impl RecoveryLinks {
    pub fn waitlist(&self, method: RecoveryMethod) -> Option<&str> {
        match method {
            RecoveryMethod::SelfCustody => None,
            RecoveryMethod::Sygna => Some(&self.sygna_waitlist),
            RecoveryMethod::Coincover => Some(&self.coincover_waitlist),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryModalAction {
    /// Start the internal multi-step recovery setup flow.
    StartSetupFlow,
    /// Open the partner waitlist in a new tab.
    OpenExternal(String),
}

#[derive(Debug, Clone, Default)]
pub struct RecoveryMethodModal {
    pub open: bool,
    pub selected: RecoveryMethod,
}

impl RecoveryMethodModal {
    pub fn open() -> Self {
        Self {
            open: true,
            selected: RecoveryMethod::default(),
        }
    }

    pub fn select(&mut self, method: RecoveryMethod, sink: &dyn AnalyticsPort) {
        self.selected = method;
        analytics::track(sink, recovery::SELECT_RECOVERY_METHOD.labeled(method.label()));
    }

    pub fn confirm(
        &mut self,
        links: &RecoveryLinks,
        sink: &dyn AnalyticsPort,
    ) -> RecoveryModalAction {
        match links.waitlist(self.selected) {
            None => {
                analytics::track(sink, recovery::CONTINUE_WITH_RECOVERY.event());
                self.open = false;
                RecoveryModalAction::StartSetupFlow
            }
            Some(url) => {
                analytics::track(
                    sink,
                    recovery::CONTINUE_TO_WAITLIST.labeled(self.selected.label()),
                );
                RecoveryModalAction::OpenExternal(url.to_owned())
            }
        }
    }

    pub fn help_link_clicked<'a>(
        &self,
        links: &'a RecoveryLinks,
        sink: &dyn AnalyticsPort,
    ) -> &'a str {
        analytics::track(sink, recovery::LEARN_MORE.event());
        &links.help_article
    }

    pub fn feedback_clicked<'a>(
        &self,
        links: &'a RecoveryLinks,
        sink: &dyn AnalyticsPort,
    ) -> &'a str {
        analytics::track(sink, recovery::GIVE_US_FEEDBACK.event());
        &links.feedback_form
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

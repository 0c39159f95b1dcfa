mod common;

use safe_wallet_core::{RecoveryLinks, RecoveryMethod, RecoveryMethodModal, RecoveryModalAction};

use common::RecordingAnalytics;

fn links() -> RecoveryLinks {
    RecoveryLinks {
        sygna_waitlist: "https://waitlist.example/sygna".to_owned(),
        coincover_waitlist: "https://waitlist.example/coincover".to_owned(),
        help_article: "https://help.example/recovery".to_owned(),
        feedback_form: "https://feedback.example".to_owned(),
    }
}

#[test]
fn defaults_to_self_custody() {
    let modal = RecoveryMethodModal::open();
    assert!(modal.open);
    assert_eq!(modal.selected, RecoveryMethod::SelfCustody);
}

#[test]
fn self_custody_starts_setup_and_closes() {
    let analytics = RecordingAnalytics::default();
    let mut modal = RecoveryMethodModal::open();

    let action = modal.confirm(&links(), &analytics);

    assert_eq!(action, RecoveryModalAction::StartSetupFlow);
    assert!(!modal.open);
    assert_eq!(analytics.actions(), vec!["Continue with recovery"]);
}

#[test]
fn partner_option_opens_waitlist_and_stays_open() {
    let analytics = RecordingAnalytics::default();
    let mut modal = RecoveryMethodModal::open();

    modal.select(RecoveryMethod::Coincover, &analytics);
    let action = modal.confirm(&links(), &analytics);

    assert_eq!(
        action,
        RecoveryModalAction::OpenExternal("https://waitlist.example/coincover".to_owned())
    );
    assert!(modal.open);
    let events = analytics.events.borrow();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].action, "Select recovery method");
    assert_eq!(events[0].label.as_deref(), Some("Coincover"));
    assert_eq!(events[1].action, "Continue to waitlist");
    assert_eq!(events[1].category, "recovery");
}

#[test]
fn help_and_feedback_links_are_tracked() {
    let analytics = RecordingAnalytics::default();
    let modal = RecoveryMethodModal::open();
    let links = links();

    assert_eq!(modal.help_link_clicked(&links, &analytics), "https://help.example/recovery");
    assert_eq!(modal.feedback_clicked(&links, &analytics), "https://feedback.example");
    assert_eq!(analytics.actions(), vec!["Learn more", "Give us feedback"]);
}

pub mod address_book;
pub mod analytics;
pub mod domain;
pub mod errors;
pub mod explorer;
pub mod flow;
pub mod format;
pub mod navigation;
pub mod owner_review;
pub mod ports;
pub mod recovery_method;
pub mod sign_form;
pub mod social_login;
pub mod state_machine;

pub use address_book::{
    filter_suggestions, AddressBookInput, EntryDialog, Suggestion, SuggestionFilter,
};
pub use analytics::{AnalyticsEvent, EventSpec};
pub use domain::{
    AddressBookEntry, ChainId, ConnectedWallet, ImplementationVersionState, NamedAddress,
    OwnerChangeKind, PendingSafeTx, SafeInfo, TimestampMs, TxDescription, SENTINEL_OWNERS,
};
pub use errors::{log_error, ErrorCode};
pub use explorer::{ExplorerLink, ExplorerTarget};
pub use flow::{Applied, FlowError, Generation, TxFlowController, TxFlowKind};
pub use format::{generate_data_row_value, AddressInfo, DataRowType, DataRowValue};
pub use navigation::{derive_navigation, NavContext, NavItem, RenderedNavItem, NAV_ITEMS};
pub use owner_review::{BuildTicket, OwnerChangeParams, OwnerChangeReview};
pub use ports::{
    AddressBookPort, AnalyticsPort, CoreKitPort, DeviceSharePort, PortError, SafeInfoPort,
    SecurityQuestionPort, SigningPort, TxBuilderPort,
};
pub use recovery_method::{RecoveryLinks, RecoveryMethod, RecoveryMethodModal, RecoveryModalAction};
pub use sign_form::{SignForm, SignFormContext, SignFormError, SubmitBlock};
pub use social_login::{
    map_login_state, CoreKitStatus, LoginContext, SocialWalletService, UserInfo, WalletLoginState,
};
pub use state_machine::{
    login_transition, sign_transition, LoginAction, SignAction, SignFormStatus, StateTransition,
    TransitionError,
};

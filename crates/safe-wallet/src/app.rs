//! Main application state and update loop

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{keccak256, Address};
use eframe::egui;
use eyre::{Result, WrapErr};
use safe_wallet_adapters::{
    AddressBookAdapter, AppConfig, DeviceShareAdapter, InMemoryCoreKit, MetadataStore,
    PasswordRecoveryAdapter, SafeInfoAdapter, SigningAdapter, TracingAnalytics, TxBuilderAdapter,
};
use safe_wallet_core::analytics::{self, overview, tx_list};
use safe_wallet_core::navigation::routes;
use safe_wallet_core::{
    log_error, AddressBookInput, AddressBookPort, AddressInfo, ChainId, ConnectedWallet,
    DataRowType, ErrorCode, ImplementationVersionState, NavContext, OwnerChangeReview,
    PendingSafeTx, RecoveryMethodModal, RecoveryModalAction, SignForm, SignFormError,
    SocialWalletService, TxFlowController, TxFlowKind, UserInfo, WalletLoginState,
};

use crate::components::address_book_input::{self, EntryDialogState, InputAction};
use crate::components::owner_flow::{self, FlowStep, OwnerFlowAction, OwnerFlowState};
use crate::components::social_login::{self, SocialPanelState};
use crate::components::{recovery_modal, tx_data_row};
use crate::jobs::{
    self, drain, BuildOutcome, Jobs, ResultQueue, SafeLoadOutcome, SocialOutcome, SocialService,
};
use crate::sidebar::{self, SidebarAction};
use crate::state::{
    chain_label, sign_context, PersistedState, Router, SafeContext, SidebarState, PERSISTED_KEY,
};
use crate::ui;

const SIGN_ORIGIN: &str = "safe-wallet";
const OWNER_FLOW_ID: &str = "owner-change";
const CONFIRM_FLOW_ID: &str = "confirm-tx";

/// The main application state
pub struct App {
    config: AppConfig,
    jobs: Jobs,

    // Ports
    address_book: AddressBookAdapter,
    analytics: TracingAnalytics,
    signer: SigningAdapter,
    builder: TxBuilderAdapter,
    safe_info_adapter: SafeInfoAdapter,
    core_kit: InMemoryCoreKit,
    social: Arc<Mutex<SocialService>>,
    /// Set by the login service once an account is connected
    social_connected: Arc<AtomicBool>,

    // Navigation and Safe selection
    router: Router,
    sidebar: SidebarState,
    safe: SafeContext,
    safe_request: Option<(ChainId, Address)>,
    wallet_input: String,

    // Owner-change flow
    flow: TxFlowController,
    owner_flow: Option<OwnerFlowState>,
    recovery_modal: RecoveryMethodModal,
    entry_dialog: EntryDialogState,

    // Address book page
    book_input: AddressBookInput,

    // Queue confirmations
    queue_flow: TxFlowController,
    queue_sign: SignForm,
    /// Transactions signed in this session, oldest first
    signed: Vec<PendingSafeTx>,

    social_panel: SocialPanelState,
    notice: Option<String>,

    // Background results
    safe_results: ResultQueue<SafeLoadOutcome>,
    build_results: ResultQueue<BuildOutcome>,
    social_results: ResultQueue<SocialOutcome>,
}

impl App {
    /// Create a new App instance
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Result<Self> {
        let jobs = Jobs::new()?;
        let safe_info_adapter =
            SafeInfoAdapter::new(&config).wrap_err("failed to configure Safe info client")?;
        let analytics = TracingAnalytics::from_config(&config);

        let user = UserInfo {
            email: config.social_login_email.clone(),
            name: None,
            profile_image: None,
        };
        let signer_key = keccak256(user.email.as_bytes());
        let core_kit = InMemoryCoreKit::new(user, signer_key, MetadataStore::default());
        core_kit.init().wrap_err("failed to initialise login SDK")?;
        let device_shares = match &config.device_share_path {
            Some(path) => DeviceShareAdapter::persistent(path.clone()),
            None => DeviceShareAdapter::in_memory(),
        };
        let social_connected = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&social_connected);
        let service = SocialWalletService::new(
            core_kit.clone(),
            PasswordRecoveryAdapter::new(&core_kit),
            device_shares,
            Box::new(move || flag.store(true, Ordering::SeqCst)),
        );
        let social_panel = SocialPanelState {
            snapshot: jobs::snapshot(&service),
            ..SocialPanelState::default()
        };

        let persisted: PersistedState = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, PERSISTED_KEY))
            .unwrap_or_default();
        let signer = SigningAdapter::default();
        if let Ok(address) = persisted.signer_address.trim().parse::<Address>() {
            signer
                .set_signer(Some(address))
                .wrap_err("failed to restore signer")?;
        }
        let safe = SafeContext {
            chain_id: persisted.chain_id.unwrap_or(1),
            address_input: persisted.safe_address.clone(),
            ..SafeContext::default()
        };

        let mut app = Self {
            config,
            jobs,
            address_book: AddressBookAdapter::default(),
            analytics,
            signer,
            builder: TxBuilderAdapter,
            safe_info_adapter,
            core_kit,
            social: Arc::new(Mutex::new(service)),
            social_connected,
            router: Router::default(),
            sidebar: SidebarState::default(),
            safe,
            safe_request: None,
            wallet_input: persisted.signer_address,
            flow: TxFlowController::default(),
            owner_flow: None,
            recovery_modal: RecoveryMethodModal::default(),
            entry_dialog: EntryDialogState::default(),
            book_input: AddressBookInput::new(true),
            queue_flow: TxFlowController::default(),
            queue_sign: SignForm::default(),
            signed: Vec::new(),
            social_panel,
            notice: None,
            safe_results: Arc::new(Mutex::new(Vec::new())),
            build_results: Arc::new(Mutex::new(Vec::new())),
            social_results: Arc::new(Mutex::new(Vec::new())),
        };

        if app.safe.parsed_address().is_some() {
            app.load_safe(&cc.egui_ctx);
        }
        Ok(app)
    }

    fn wallet(&self) -> Option<ConnectedWallet> {
        self.signer.signer().map(|address| ConnectedWallet {
            address,
            chain_id: self.safe.chain_id,
        })
    }

    fn book(&self) -> BTreeMap<Address, String> {
        match self.address_book.entries(self.safe.chain_id) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("address book unavailable: {e}");
                BTreeMap::new()
            }
        }
    }

    fn confirmations(&self, tx: &PendingSafeTx) -> usize {
        self.signer
            .confirmations(tx.safe_tx_hash)
            .map(|records| records.len())
            .unwrap_or_default()
    }

    /// Signed transactions of the loaded Safe with their confirmation count
    fn safe_txs(&self) -> Vec<(PendingSafeTx, usize)> {
        let Some(info) = &self.safe.info else {
            return Vec::new();
        };
        self.signed
            .iter()
            .filter(|tx| tx.chain_id == info.chain_id && tx.safe_address == info.address)
            .map(|tx| (tx.clone(), self.confirmations(tx)))
            .collect()
    }

    fn nav_context(&self) -> NavContext {
        let threshold = self.safe.info.as_ref().map(|i| i.threshold).unwrap_or(1);
        NavContext {
            pathname: self.router.path().to_owned(),
            safe_query: self.safe.safe_query(),
            has_queued_txs: self
                .safe_txs()
                .iter()
                .any(|(_, confirmations)| (*confirmations as u64) < threshold),
            has_recovery_queue: false,
            version_state: self.safe.version_state(),
        }
    }

    fn href(&self, path: &str) -> String {
        match self.safe.safe_query() {
            Some(query) => format!("{path}?safe={query}"),
            None => path.to_owned(),
        }
    }

    // =========================================================================
    // BACKGROUND WORK
    // =========================================================================

    fn load_safe(&mut self, ctx: &egui::Context) {
        let Some(address) = self.safe.parsed_address() else {
            self.safe.error = Some("Invalid Safe address".to_owned());
            return;
        };
        let chain_id = self.safe.chain_id;
        tracing::info!(chain_id, %address, "loading Safe");
        self.safe.loading = true;
        self.safe.error = None;
        self.safe_request = Some((chain_id, address));
        let adapter = self.safe_info_adapter.clone();
        self.jobs.run(ctx, &self.safe_results, move || {
            jobs::load_safe(&adapter, chain_id, address)
        });
    }

    fn start_owner_build(&mut self, ctx: &egui::Context) {
        let (Some(state), Some(info)) = (self.owner_flow.as_ref(), self.safe.info.clone()) else {
            return;
        };
        let Some(review) = &state.review else {
            return;
        };
        let ticket = review.request_build(&mut self.flow);
        tracing::debug!(generation = ticket.generation.0, "building owner change");
        let builder = self.builder.clone();
        self.jobs.run(ctx, &self.build_results, move || {
            let result = OwnerChangeReview::build(&ticket, &builder, &info);
            BuildOutcome { ticket, result }
        });
    }

    fn run_social(&mut self, ctx: &egui::Context, action: social_login::SocialAction) {
        self.social_panel.busy = true;
        self.social_panel.result = None;
        let social = Arc::clone(&self.social);
        self.jobs.run(ctx, &self.social_results, move || {
            jobs::run_social_action(&social, action)
        });
    }

    fn poll_results(&mut self, ctx: &egui::Context) {
        for outcome in drain(&self.safe_results) {
            if self.safe_request != Some((outcome.chain_id, outcome.address)) {
                tracing::debug!(address = %outcome.address, "dropping superseded Safe load");
                continue;
            }
            self.safe_request = None;
            self.safe.loading = false;
            match outcome.result {
                Ok(info) => {
                    tracing::info!(
                        owners = info.owners.len(),
                        threshold = info.threshold,
                        nonce = info.nonce,
                        "Safe loaded"
                    );
                    self.safe.info = Some(info);
                    self.safe.error = None;
                    if matches!(&self.owner_flow, Some(state) if state.step == FlowStep::Review) {
                        self.start_owner_build(ctx);
                    }
                }
                Err(e) => {
                    log_error(ErrorCode::SafeInfoFetch, &e);
                    self.safe.info = None;
                    self.safe.error = Some(e);
                }
            }
        }

        for outcome in drain(&self.build_results) {
            OwnerChangeReview::complete_build(&mut self.flow, &outcome.ticket, outcome.result);
        }

        for outcome in drain(&self.social_results) {
            self.social_panel.busy = false;
            self.social_panel.snapshot = outcome.snapshot;
            if outcome.result.is_some() {
                self.social_panel.result = outcome.result;
            }
        }

        if self.social_connected.swap(false, Ordering::SeqCst) {
            self.connect_social_signer();
        }
    }

    fn connect_social_signer(&mut self) {
        let Some(key) = self.core_kit.local_signer() else {
            return;
        };
        match self.signer.connect_key(key) {
            Ok(account) => {
                tracing::info!(%account, "social login signer connected");
                self.wallet_input = account.to_checksum(None);
            }
            Err(e) => tracing::error!("failed to connect social login signer: {e}"),
        }
    }

    fn connect_signer(&mut self, address: Address) {
        match self.signer.set_signer(Some(address)) {
            Ok(()) => self.wallet_input = address.to_checksum(None),
            Err(e) => tracing::error!("failed to set signer: {e}"),
        }
    }

    // =========================================================================
    // OWNER FLOW
    // =========================================================================

    fn open_owner_flow(&mut self, state: OwnerFlowState) {
        if self.flow.active().is_some() {
            return;
        }
        self.flow.open(state.kind);
        self.owner_flow = Some(state);
    }

    fn close_owner_flow(&mut self) {
        self.flow.close();
        self.owner_flow = None;
    }

    fn handle_owner_action(&mut self, ctx: &egui::Context, action: OwnerFlowAction) {
        match action {
            OwnerFlowAction::None => {}
            OwnerFlowAction::Close => self.close_owner_flow(),
            OwnerFlowAction::AddToBook(dialog) => self.entry_dialog.open(dialog),
            OwnerFlowAction::Review(params) => {
                let Some(state) = self.owner_flow.as_mut() else {
                    return;
                };
                state.step = FlowStep::Review;
                let needs_build = match state.review.as_mut() {
                    Some(review) => {
                        review.update_params(params) || self.flow.error().is_some()
                            || (self.flow.tx().is_none() && !self.flow.is_pending())
                    }
                    None => {
                        state.review = Some(OwnerChangeReview::new(params));
                        true
                    }
                };
                if needs_build {
                    self.start_owner_build(ctx);
                }
            }
            OwnerFlowAction::Sign => self.sign_owner_change(),
        }
    }

    fn sign_owner_change(&mut self) {
        let (Some(state), Some(info)) = (self.owner_flow.as_mut(), self.safe.info.as_ref()) else {
            return;
        };
        let Some(review) = state.review.as_ref() else {
            return;
        };
        let sign_ctx = sign_context(self.signer.signer(), Some(info), self.flow.is_pending());
        let tx = self.flow.tx().cloned();
        let mut kind = None;
        let result = state.sign_form.submit(
            &mut self.flow,
            &sign_ctx,
            OWNER_FLOW_ID,
            SIGN_ORIGIN,
            &self.signer,
            || {
                kind = Some(review.confirm(
                    info.chain_id,
                    info.owners.len(),
                    &self.address_book,
                    &self.analytics,
                ));
            },
        );

        match result {
            Ok(()) => {
                if let Some(tx) = tx {
                    self.signed.push(tx);
                }
                if let Some(kind) = kind {
                    self.notice = Some(format!("{kind} transaction signed"));
                }
                self.close_owner_flow();
                let href = self.href(routes::TRANSACTIONS_QUEUE);
                self.router.navigate(href);
            }
            Err(SignFormError::Blocked(block)) => {
                tracing::debug!(reason = ?block, "owner change not submitted");
            }
            Err(SignFormError::Failed(e)) => {
                tracing::warn!("owner change signing failed: {e}");
            }
        }
    }

    fn confirm_queued(&mut self, tx: PendingSafeTx) {
        analytics::track(&self.analytics, tx_list::CONFIRM.event());
        let sign_ctx = sign_context(self.signer.signer(), self.safe.info.as_ref(), false);
        let generation = self.queue_flow.begin();
        self.queue_flow.resolve(generation, tx);
        let mut confirmed = false;
        let result = self.queue_sign.submit(
            &mut self.queue_flow,
            &sign_ctx,
            CONFIRM_FLOW_ID,
            SIGN_ORIGIN,
            &self.signer,
            || confirmed = true,
        );
        if let Err(e) = result {
            tracing::debug!("confirmation not recorded: {e}");
            self.queue_flow.close();
        }
        if confirmed {
            self.notice = Some("Confirmation added".to_owned());
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        self.poll_results(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading(egui::RichText::new("🔐 Safe Wallet").size(22.0).color(ui::ACCENT));
                ui.add_space(20.0);
                ui.separator();
                ui.label(egui::RichText::new(self.router.location()).monospace().weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let hash = env!("GIT_HASH");
                    ui.label(egui::RichText::new(&hash[..hash.len().min(7)]).small().weak())
                        .on_hover_text(concat!("Built ", env!("BUILD_TIME")));
                    if let Some(wallet) = self.wallet() {
                        ui.label(
                            egui::RichText::new(format!(
                                "{} · {}",
                                wallet.address.to_checksum(None),
                                chain_label(wallet.chain_id)
                            ))
                            .monospace()
                            .small(),
                        );
                    }
                });
            });
            ui.add_space(4.0);
        });

        let nav = self.nav_context();
        match sidebar::render(ctx, &mut self.sidebar, &mut self.safe, &nav) {
            SidebarAction::None => {}
            SidebarAction::LoadSafe => self.load_safe(ctx),
            SidebarAction::Navigate { href, label } => {
                analytics::track(&self.analytics, overview::SIDEBAR_CLICKED.labeled(label));
                self.router.navigate(href);
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(10.0);
                if let Some(notice) = self.notice.clone() {
                    ui.horizontal(|ui| {
                        ui::success_message(ui, &notice);
                        if ui.small_button("✕").clicked() {
                            self.notice = None;
                        }
                    });
                    ui.add_space(6.0);
                }
                let path = self.router.path().to_owned();
                match path.as_str() {
                    routes::BALANCES => self.render_balances(ui),
                    routes::TRANSACTIONS_QUEUE => self.render_queue(ui),
                    routes::TRANSACTIONS_HISTORY => self.render_history(ui),
                    routes::ADDRESS_BOOK => self.render_address_book(ui),
                    routes::APPS => self.render_apps(ui),
                    routes::SETTINGS_SETUP => self.render_settings(ui),
                    _ => self.render_home(ui, ctx),
                }
                ui.add_space(20.0);
            });
        });

        self.render_windows(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let persisted = PersistedState {
            chain_id: Some(self.safe.chain_id),
            safe_address: self.safe.address_input.trim().to_owned(),
            signer_address: self
                .signer
                .signer()
                .map(|a| a.to_checksum(None))
                .unwrap_or_default(),
        };
        eframe::set_value(storage, PERSISTED_KEY, &persisted);
    }
}

impl App {
    fn render_windows(&mut self, ctx: &egui::Context) {
        if let (Some(state), Some(info)) = (self.owner_flow.as_mut(), self.safe.info.as_ref()) {
            let book = match self.address_book.entries(info.chain_id) {
                Ok(book) => book,
                Err(e) => {
                    tracing::warn!("address book unavailable: {e}");
                    BTreeMap::new()
                }
            };
            let sign_ctx = sign_context(self.signer.signer(), Some(info), self.flow.is_pending());
            let explorer = self.safe.explorer();
            let action =
                owner_flow::render(ctx, state, &self.flow, info, &book, &explorer, &sign_ctx);
            self.handle_owner_action(ctx, action);
        } else if self.owner_flow.is_some() {
            self.close_owner_flow();
        }

        let links = self.config.recovery_links();
        if let Some(RecoveryModalAction::StartSetupFlow) =
            recovery_modal::render(ctx, &mut self.recovery_modal, &links, &self.analytics)
        {
            if self.flow.active().is_none() {
                self.flow.open(TxFlowKind::RecoverySetup);
            }
        }

        if self.flow.active() == Some(TxFlowKind::RecoverySetup) {
            let mut open = true;
            egui::Window::new("Account recovery")
                .collapsible(false)
                .resizable(false)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.label("Self-custody recovery lets trusted Recoverers restore access");
                    ui.label("to this Safe Account after a review window.");
                    ui.add_space(6.0);
                    ui::warning_message(ui, "Recovery setup transactions are not available yet.");
                    ui.add_space(6.0);
                    if ui.link("Learn more").clicked() {
                        let url = self.recovery_modal.help_link_clicked(&links, &self.analytics);
                        ui::open_url_new_tab(url);
                    }
                });
            if !open {
                self.flow.close();
            }
        }

        let chain_id = self.safe.chain_id;
        if let Some(entry) = address_book_input::render_entry_dialog(
            ctx,
            &mut self.entry_dialog,
            chain_id,
            &self.address_book,
        ) {
            self.notice = Some(format!("Added {} to the address book", entry.name));
        }
    }

    // =========================================================================
    // PAGES
    // =========================================================================

    fn render_home(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui::styled_heading(ui, "Home");

        if let Some(info) = &self.safe.info {
            let explorer = self.safe.explorer();
            let address = info.address.to_checksum(None);
            let safe_info = AddressInfo {
                name: self.address_book.name_of(info.chain_id, info.address),
                logo_uri: None,
            };
            let threshold = format!("{} out of {} owner(s)", info.threshold, info.owners.len());
            let nonce = info.nonce.to_string();
            let chain = chain_label(info.chain_id);
            ui::card(ui, |ui| {
                egui::Grid::new("safe_overview_grid")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        tx_data_row::render(
                            ui,
                            "Safe Account",
                            Some(&address),
                            Some(DataRowType::Address),
                            Some(&explorer),
                            Some(&safe_info),
                        );
                        tx_data_row::render(ui, "Network", Some(&chain), None, None, None);
                        tx_data_row::render(ui, "Threshold", Some(&threshold), None, None, None);
                        tx_data_row::render(ui, "Nonce", Some(&nonce), None, None, None);
                        let version = info.version.as_deref();
                        tx_data_row::render(ui, "Version", version, None, None, None);
                    });
            });
        } else {
            ui.label("Select a chain and load a Safe Account from the sidebar.");
        }

        ui.add_space(12.0);
        ui::section_header(ui, "Signer wallet");
        ui.horizontal(|ui| {
            ui::address_input(ui, &mut self.wallet_input);
            let parsed = self.wallet_input.trim().parse::<Address>().ok();
            if ui::primary_button_enabled(ui, "Connect", parsed.is_some()).clicked() {
                if let Some(address) = parsed {
                    self.connect_signer(address);
                }
            }
            if self.signer.signer().is_some() && ui::secondary_button(ui, "Disconnect").clicked() {
                if let Err(e) = self.signer.set_signer(None) {
                    tracing::error!("failed to clear signer: {e}");
                }
            }
        });
        match (self.signer.signer(), &self.safe.info) {
            (Some(signer), Some(info)) if !info.is_owner(signer) => {
                ui::warning_message(ui, "Connected wallet is not an owner of this Safe Account");
            }
            (None, _) => {
                ui.label(egui::RichText::new("No wallet connected").weak());
            }
            _ => {}
        }
        if self.signer.is_key_backed() {
            ui.label(egui::RichText::new("Signing with the social login key").weak());
        }

        ui.add_space(12.0);
        if let Some(action) = social_login::render(ui, &mut self.social_panel) {
            self.run_social(ctx, action);
        }
        if self.social_panel.snapshot.state == WalletLoginState::Ready {
            if let Some(account) = self.core_kit.signer_account() {
                if self.signer.signer() != Some(account)
                    && ui.small_button("Use social login signer").clicked()
                {
                    self.connect_social_signer();
                }
            }
        }
    }

    fn render_balances(&mut self, ui: &mut egui::Ui) {
        ui::styled_heading(ui, "Assets");
        ui.label("Token balances are not tracked by this application.");
    }

    fn render_apps(&mut self, ui: &mut egui::Ui) {
        ui::styled_heading(ui, "Apps");
        ui.label("Safe Apps are not available in the desktop application.");
    }

    fn render_queue(&mut self, ui: &mut egui::Ui) {
        ui::styled_heading(ui, "Transactions: Queue");
        let Some(info) = self.safe.info.clone() else {
            ui.label("Load a Safe Account to see its queue.");
            return;
        };
        let queued: Vec<_> = self
            .safe_txs()
            .into_iter()
            .filter(|(_, confirmations)| (*confirmations as u64) < info.threshold)
            .collect();
        if queued.is_empty() {
            ui.label("No queued transactions.");
            return;
        }

        let sign_ctx = sign_context(self.signer.signer(), Some(&info), false);
        let explorer = self.safe.explorer();
        let mut to_confirm = None;
        for (tx, confirmations) in queued {
            ui::card(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(tx.description.kind().to_string()).strong());
                    ui.label(format!("nonce {}", tx.nonce));
                    let progress = format!("{confirmations} of {} confirmations", info.threshold);
                    ui.label(egui::RichText::new(progress).color(ui::WARNING_YELLOW));
                });
                tx_rows(ui, &tx, &explorer);
                ui.add_space(4.0);
                if ui::primary_button_enabled(
                    ui,
                    "Confirm",
                    self.queue_sign.can_submit(Some(&tx), &sign_ctx),
                )
                .clicked()
                {
                    to_confirm = Some(tx.clone());
                }
            });
            ui.add_space(6.0);
        }
        if let Some(block) = self.queue_sign.blocked_reason(None, &sign_ctx) {
            if block != safe_wallet_core::SubmitBlock::NoTransaction {
                ui::warning_message(ui, block.message());
            }
        }
        if let Some(err) = self.queue_sign.error().map(str::to_owned) {
            ui.horizontal(|ui| {
                ui::error_message(ui, &err);
                if ui.small_button("Dismiss").clicked() {
                    self.queue_sign.dismiss_error();
                }
            });
        }
        if let Some(tx) = to_confirm {
            self.confirm_queued(tx);
        }
    }

    fn render_history(&mut self, ui: &mut egui::Ui) {
        ui::styled_heading(ui, "Transactions: History");
        let Some(info) = self.safe.info.clone() else {
            ui.label("Load a Safe Account to see its history.");
            return;
        };
        let ready: Vec<_> = self
            .safe_txs()
            .into_iter()
            .filter(|(_, confirmations)| (*confirmations as u64) >= info.threshold)
            .collect();
        if ready.is_empty() {
            ui.label("No fully confirmed transactions yet.");
            return;
        }
        let explorer = self.safe.explorer();
        for (tx, confirmations) in ready {
            ui::card(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(tx.description.kind().to_string()).strong());
                    ui.label(format!("nonce {}", tx.nonce));
                    ui.label(
                        egui::RichText::new(format!("{confirmations} confirmations"))
                            .color(ui::SUCCESS_GREEN),
                    );
                });
                tx_rows(ui, &tx, &explorer);
            });
            ui.add_space(6.0);
        }
    }

    fn render_address_book(&mut self, ui: &mut egui::Ui) {
        ui::styled_heading(ui, "Address book");
        ui.label(format!("Entries on {}", chain_label(self.safe.chain_id)));
        ui.add_space(8.0);

        let book = self.book();
        ui.horizontal(|ui| {
            match address_book_input::render(ui, "address_book_page", &mut self.book_input, &book) {
                InputAction::AddToBook(dialog) => self.entry_dialog.open(dialog),
                InputAction::Selected(address) => {
                    tracing::debug!(%address, "address book entry selected");
                }
                InputAction::None => {}
            }
        });
        ui.add_space(10.0);

        if book.is_empty() {
            ui.label(egui::RichText::new("No entries yet.").weak());
            return;
        }
        let mut remove = None;
        egui::Grid::new("address_book_grid")
            .num_columns(2)
            .striped(true)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for (address, name) in &book {
                    ui::named_address(ui, address, Some(name));
                    if ui.small_button("🗑").on_hover_text("Remove").clicked() {
                        remove = Some(*address);
                    }
                    ui.end_row();
                }
            });
        if let Some(address) = remove {
            if let Err(e) = self.address_book.remove_entry(self.safe.chain_id, address) {
                log_error(ErrorCode::AddressBookWrite, &e);
            }
        }
    }

    fn render_settings(&mut self, ui: &mut egui::Ui) {
        ui::styled_heading(ui, "Settings");
        let Some(info) = self.safe.info.clone() else {
            ui.label("Load a Safe Account to manage its setup.");
            return;
        };
        let book = self.book();
        let flow_open = self.flow.active().is_some();

        ui::section_header(ui, "Owners");
        let mut replace = None;
        egui::Grid::new("owners_grid")
            .num_columns(2)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for owner in &info.owners {
                    ui::named_address(ui, owner, book.get(owner).map(String::as_str));
                    if ui
                        .add_enabled(!flow_open, egui::Button::new("Replace"))
                        .clicked()
                    {
                        replace = Some(*owner);
                    }
                    ui.end_row();
                }
            });
        ui.add_space(6.0);
        if ui.add_enabled(!flow_open, egui::Button::new("➕ Add owner")).clicked() {
            self.open_owner_flow(OwnerFlowState::add_owner(info.threshold));
        }
        if let Some(owner) = replace {
            self.open_owner_flow(OwnerFlowState::replace_owner(owner, info.threshold));
        }

        ui.add_space(12.0);
        ui::section_header(ui, "Required confirmations");
        ui.label(format!(
            "Any transaction requires the confirmation of {} out of {} owner(s).",
            info.threshold,
            info.owners.len()
        ));

        ui.add_space(12.0);
        ui::section_header(ui, "Safe Account version");
        ui.label(info.version.as_deref().unwrap_or("unknown"));
        match info.implementation_version_state {
            ImplementationVersionState::Outdated => ui::warning_message(
                ui,
                &format!(
                    "A newer version ({}) of the Safe Account contract is available.",
                    self.config.latest_safe_version
                ),
            ),
            ImplementationVersionState::UpToDate => ui::success_message(ui, "Latest version"),
            ImplementationVersionState::Unknown => {}
        }

        ui.add_space(12.0);
        ui::section_header(ui, "Account recovery");
        ui.label("Choose trusted Recoverers able to restore access to this Safe Account.");
        if ui
            .add_enabled(!flow_open, egui::Button::new("Set up recovery"))
            .clicked()
        {
            self.recovery_modal = RecoveryMethodModal::open();
        }
    }
}

fn tx_rows(ui: &mut egui::Ui, tx: &PendingSafeTx, explorer: &safe_wallet_core::ExplorerLink) {
    let to = tx.to.to_checksum(None);
    let data = tx.data.to_string();
    let hash = tx.safe_tx_hash.to_string();
    egui::Grid::new(("tx_rows", tx.safe_tx_hash))
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            let address = Some(DataRowType::Address);
            tx_data_row::render(ui, "To", Some(&to), address, Some(explorer), None);
            tx_data_row::render(ui, "Data", Some(&data), Some(DataRowType::Bytes), None, None);
            tx_data_row::render(ui, "safeTxHash", Some(&hash), Some(DataRowType::Hash), None, None);
        });
}

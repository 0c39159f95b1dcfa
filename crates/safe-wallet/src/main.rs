//! Safe Wallet: a Rust-native Safe{Wallet} account management GUI

use eframe::egui;
use safe_wallet_adapters::AppConfig;

mod app;
mod components;
mod jobs;
mod sidebar;
mod state;
mod ui;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        safe_service = %config.safe_service_base_url,
        latest_version = %config.latest_safe_version,
        "Starting Safe Wallet"
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Safe Wallet")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Safe Wallet",
        native_options,
        Box::new(|cc| Ok(Box::new(app::App::new(cc, config)?))),
    )
}

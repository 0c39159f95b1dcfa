//! UI helper components

use alloy::primitives::Address;
use eframe::egui;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0, 212, 170);
pub const ERROR_RED: egui::Color32 = egui::Color32::from_rgb(220, 80, 80);
pub const SUCCESS_GREEN: egui::Color32 = egui::Color32::from_rgb(80, 200, 120);
pub const WARNING_YELLOW: egui::Color32 = egui::Color32::from_rgb(220, 180, 50);

/// Open URL in a new browser tab
pub fn open_url_new_tab(url: &str) {
    if let Err(e) = open::that(url) {
        tracing::warn!(%url, "failed to open url: {e}");
    }
}

/// Copy to clipboard
pub fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(text) {
                tracing::warn!("clipboard write failed: {e}");
            }
        }
        Err(e) => tracing::warn!("clipboard unavailable: {e}"),
    }
}

/// Styled heading with accent color
pub fn styled_heading(ui: &mut egui::Ui, text: &str) {
    ui.heading(egui::RichText::new(text).color(ACCENT));
}

/// Section header with separator
pub fn section_header(ui: &mut egui::Ui, text: &str) {
    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(text).strong().size(14.0));
    });
    ui.separator();
}

/// Create a styled text edit for address input
pub fn address_input(ui: &mut egui::Ui, value: &mut String) -> egui::Response {
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text("0x...")
            .desired_width(400.0)
            .font(egui::TextStyle::Monospace),
    )
}

pub fn password_input(ui: &mut egui::Ui, value: &mut String, hint: &str) -> egui::Response {
    ui.add(
        egui::TextEdit::singleline(value)
            .password(true)
            .hint_text(hint)
            .desired_width(220.0),
    )
}

/// Error message display
pub fn error_message(ui: &mut egui::Ui, message: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("❌").size(16.0));
        ui.label(egui::RichText::new(message).color(ERROR_RED));
    });
}

/// Success message display
pub fn success_message(ui: &mut egui::Ui, message: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("✅").size(16.0));
        ui.label(egui::RichText::new(message).color(SUCCESS_GREEN));
    });
}

pub fn warning_message(ui: &mut egui::Ui, message: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("⚠️").size(14.0));
        ui.label(egui::RichText::new(message).color(WARNING_YELLOW));
    });
}

/// Optional address-book name followed by the checksummed address
pub fn named_address(ui: &mut egui::Ui, address: &Address, name: Option<&str>) {
    let checksum = address.to_checksum(None);
    ui.horizontal(|ui| {
        if let Some(name) = name {
            ui.label(egui::RichText::new(name).strong());
        }
        ui.label(egui::RichText::new(&checksum).monospace());
        copy_button(ui, &checksum);
    });
}

/// Small copy button; returns true when clicked
pub fn copy_button(ui: &mut egui::Ui, text: &str) -> bool {
    let clicked = ui
        .small_button("📋")
        .on_hover_text("Copy to clipboard")
        .clicked();
    if clicked {
        copy_to_clipboard(text);
    }
    clicked
}

// =============================================================================
// STYLED BUTTONS
// =============================================================================

/// Primary action button with enabled state
pub fn primary_button_enabled(ui: &mut egui::Ui, text: &str, enabled: bool) -> egui::Response {
    let accent = egui::Color32::from_rgb(0, 180, 150);
    let btn = egui::Button::new(egui::RichText::new(text).size(14.0).color(egui::Color32::WHITE))
        .min_size(egui::vec2(130.0, 34.0))
        .fill(accent);
    ui.add_enabled(enabled, btn)
}

/// Secondary action button - subdued, outline style
pub fn secondary_button(ui: &mut egui::Ui, text: &str) -> egui::Response {
    let btn = egui::Button::new(egui::RichText::new(text).size(14.0))
        .min_size(egui::vec2(90.0, 34.0));
    ui.add(btn)
}

// =============================================================================
// VISUAL GROUPING
// =============================================================================

/// Render content in a subtle card/frame
pub fn card(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(ui.visuals().faint_bg_color)
        .rounding(6.0)
        .inner_margin(12.0)
        .show(ui, add_contents);
}

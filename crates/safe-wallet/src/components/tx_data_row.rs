use eframe::egui;
use safe_wallet_core::{
    generate_data_row_value, AddressInfo, DataRowType, DataRowValue, ExplorerLink,
};

use crate::ui;

/// One labelled row of a transaction data grid. Must be called inside an
/// `egui::Grid`; absent values render nothing.
pub fn render(
    ui: &mut egui::Ui,
    title: &str,
    value: Option<&str>,
    ty: Option<DataRowType>,
    explorer: Option<&ExplorerLink>,
    info: Option<&AddressInfo>,
) {
    let Some(row) = generate_data_row_value(value, ty, explorer, info) else {
        return;
    };
    ui.label(egui::RichText::new(title).weak());
    ui.horizontal(|ui| render_value(ui, &row));
    ui.end_row();
}

fn render_value(ui: &mut egui::Ui, row: &DataRowValue) {
    match row {
        DataRowValue::Identity {
            value,
            name,
            logo_uri,
            explorer_url,
            copyable,
        } => {
            if let Some(name) = name {
                ui.label(egui::RichText::new(name).strong());
            }
            let text = egui::RichText::new(value).monospace();
            match explorer_url {
                Some(url) => {
                    if ui.link(text).on_hover_text("Open in block explorer").clicked() {
                        ui::open_url_new_tab(url);
                    }
                }
                None => {
                    ui.label(text);
                }
            }
            if let Some(logo) = logo_uri {
                ui.label(egui::RichText::new("🖼").small()).on_hover_text(logo);
            }
            if *copyable {
                ui::copy_button(ui, value);
            }
        }
        DataRowValue::RawData {
            byte_length,
            copy_text,
        } => {
            ui.label(format!("{byte_length} bytes"));
            ui::copy_button(ui, copy_text);
        }
        DataRowValue::Bytes {
            preview,
            full,
            truncated,
        } => {
            let label = ui.label(egui::RichText::new(preview).monospace());
            if *truncated {
                label.on_hover_text(full);
            }
            ui::copy_button(ui, full);
        }
        DataRowValue::Text(text) => {
            ui.label(text);
        }
    }
}

// src/ui/mod.rs
pub mod kpis;
pub mod monthly;
pub mod upload;
pub mod weekly;

pub const EMPTY_STATE: &str = "Upload a CSV file and press Analyze to see results";

use eframe::egui;

pub fn show_empty_state(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(EMPTY_STATE);
    });
}

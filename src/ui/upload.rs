// src/ui/upload.rs
use eframe::egui;
use rfd::FileDialog;

use crate::file::SelectedFile;
use crate::state::{DateRangeDraft, UploadOrchestrator};

pub fn show_upload_panel(ui: &mut egui::Ui, orchestrator: &mut UploadOrchestrator, draft: &mut DateRangeDraft) {
    draft.sync(orchestrator.state().date_range);

    ui.horizontal_wrapped(|ui| {
        if ui.button("📂 Choose CSV…").clicked() {
            pick_csv(orchestrator);
        }

        match &orchestrator.state().selected_file {
            Some(file) => {
                ui.strong(&file.name).on_hover_text(file.path.display().to_string());
                ui.label(egui::RichText::new(format!(
                    "{} · {} rows · {} columns",
                    file.size_label(),
                    file.preview.row_count,
                    file.preview.headers.len()
                )).weak());
            }
            None => {
                ui.label(egui::RichText::new("No file selected").weak());
            }
        }

        ui.separator();
        show_date_fields(ui, orchestrator, draft);
        ui.separator();

        let state = orchestrator.state();
        let can_analyze = state.selected_file.is_some() && !state.is_loading;
        let label = if state.is_loading { "Analyzing…" } else { "▶ Analyze" };
        if ui.add_enabled(can_analyze, egui::Button::new(label)).clicked() {
            let ctx = ui.ctx().clone();
            orchestrator.analyze(move || ctx.request_repaint());
        }
        if orchestrator.state().is_loading {
            ui.spinner();
        }
    });

    show_error_banner(ui, orchestrator);
}

fn show_date_fields(ui: &mut egui::Ui, orchestrator: &mut UploadOrchestrator, draft: &mut DateRangeDraft) {
    let bounds = orchestrator.state().available_range();

    ui.label("From");
    let start = ui.add(egui::TextEdit::singleline(&mut draft.start)
        .hint_text("YYYY-MM-DD")
        .desired_width(90.0));
    ui.label("to");
    let end = ui.add(egui::TextEdit::singleline(&mut draft.end)
        .hint_text("YYYY-MM-DD")
        .desired_width(90.0));

    if start.lost_focus() || end.lost_focus() {
        if let Some(range) = draft.commit(bounds) {
            orchestrator.set_date_range(range.start, range.end);
        }
    }

    if let Some(bounds) = bounds {
        if ui.small_button("Full range")
            .on_hover_text(format!("{} to {}", bounds.min, bounds.max))
            .clicked()
        {
            orchestrator.reset_date_range();
        }
    }
}

fn show_error_banner(ui: &mut egui::Ui, orchestrator: &mut UploadOrchestrator) {
    let Some(message) = orchestrator.state().error_message.clone() else {
        return;
    };

    ui.add_space(4.0);
    egui::Frame::group(ui.style())
        .fill(egui::Color32::from_rgb(90, 30, 30))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::from_rgb(255, 200, 200), format!("⚠ {}", message));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✕").clicked() {
                        orchestrator.dismiss_error();
                    }
                });
            });
        });
}

fn pick_csv(orchestrator: &mut UploadOrchestrator) {
    let file_dialog = FileDialog::new()
        .add_filter("CSV files", &["csv"])
        .set_title("Choose CSV File");

    let Some(path) = file_dialog.pick_file() else {
        return;
    };

    match SelectedFile::load(&path) {
        Ok(file) => orchestrator.select_file(file),
        Err(e) => {
            tracing::warn!("Failed to load {}: {:#}", path.display(), e);
            orchestrator.show_error(format!("Error loading file: {:#}", e));
        }
    }
}

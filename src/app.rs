// src/app.rs
use std::sync::Arc;

use anyhow::Result;
use eframe::egui;

use crate::api::HttpBackend;
use crate::config::AppConfig;
use crate::state::{DashboardTab, UploadOrchestrator, ViewState};

pub struct DashboardApp {
    upload: UploadOrchestrator,
    view: ViewState,
}

impl DashboardApp {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let backend = HttpBackend::new(&config.backend)?;
        tracing::info!("Analysis endpoint: {}", backend.analyze_url());
        Ok(Self::with_orchestrator(UploadOrchestrator::new(Arc::new(backend))))
    }

    pub fn with_orchestrator(upload: UploadOrchestrator) -> Self {
        Self {
            upload,
            view: ViewState::default(),
        }
    }

    fn show_tabs(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for tab in DashboardTab::ALL {
                if ui.selectable_label(self.view.tab == tab, tab.label()).clicked() {
                    self.view.tab = tab;
                }
            }
        });
    }

    fn show_view(&self, ui: &mut egui::Ui) {
        let result = self.upload.state().result.as_ref();
        match self.view.tab {
            DashboardTab::Weekly => crate::ui::weekly::show_weekly_view(ui, result),
            DashboardTab::Monthly => crate::ui::monthly::show_monthly_view(ui, result),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.upload.poll();

        egui::TopBottomPanel::top("upload_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            crate::ui::upload::show_upload_panel(ui, &mut self.upload, &mut self.view.date_draft);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_tabs(ui);
            ui.separator();
            ui.add_space(8.0);

            self.show_view(ui);
        });
    }
}

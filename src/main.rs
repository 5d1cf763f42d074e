// src/main.rs
use eframe::egui;
use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod config;
mod file;
mod state;
mod ui;
mod utils;

use crate::app::DashboardApp;
use crate::config::AppConfig;

fn main() -> Result<()> {
    let config = AppConfig::load()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("csv_dashboard={}", config.logging.level)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("CSV Dashboard v{}", env!("CARGO_PKG_VERSION"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_title("CSV Dashboard"),
        ..Default::default()
    };

    let app = DashboardApp::new(&config)?;

    eframe::run_native(
        "CSV Dashboard",
        options,
        Box::new(move |_cc| Box::new(app)),
    ).map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}

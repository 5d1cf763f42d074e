// src/ui/kpis.rs
use eframe::egui;

use crate::api::{AnalysisResult, Kpi};
use crate::utils::{format_count, format_currency, format_delta};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiFormat {
    Count,
    Currency,
}

/// Display-ready KPI card.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: String,
    pub delta: String,
    pub rising: bool,
}

impl KpiCard {
    pub fn new(title: &'static str, kpi: Option<&Kpi>, format: KpiFormat) -> Self {
        let kpi = kpi.copied().unwrap_or(Kpi { total: 0.0, delta_pct: 0.0 });
        let value = match format {
            KpiFormat::Count => format_count(kpi.total),
            KpiFormat::Currency => format_currency(kpi.total),
        };

        Self {
            title,
            value,
            delta: format_delta(kpi.delta_pct),
            rising: kpi.delta_pct >= 0.0,
        }
    }
}

pub fn build_cards(result: &AnalysisResult, cards: &[(&'static str, &str, KpiFormat)]) -> Vec<KpiCard> {
    cards.iter()
        .map(|(title, key, format)| KpiCard::new(*title, result.kpi(key), *format))
        .collect()
}

pub fn show_kpi_row(ui: &mut egui::Ui, cards: &[KpiCard]) {
    ui.columns(cards.len().max(1), |columns| {
        for (column, card) in columns.iter_mut().zip(cards) {
            show_kpi_card(column, card);
        }
    });
}

fn show_kpi_card(ui: &mut egui::Ui, card: &KpiCard) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(card.title).weak());
            ui.heading(egui::RichText::new(&card.value).strong());

            let color = if card.rising {
                egui::Color32::from_rgb(60, 170, 90)
            } else {
                egui::Color32::from_rgb(210, 70, 70)
            };
            ui.horizontal(|ui| {
                ui.colored_label(color, &card.delta);
                ui.label(egui::RichText::new("vs previous period").small().weak());
            });
        });
    });
}

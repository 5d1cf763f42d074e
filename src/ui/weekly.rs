// src/ui/weekly.rs
use chrono::{Duration, NaiveDate};
use eframe::egui;

use crate::api::{
    AnalysisResult, KPI_BILLABLE_CALLS, KPI_BILLABLE_CLICKS, KPI_TOTAL_EMAILS, KPI_TOTAL_REVENUE,
};
use crate::ui::kpis::{build_cards, show_kpi_row, KpiCard, KpiFormat};
use crate::utils::format_currency;

const WEEKLY_KPIS: [(&str, &str, KpiFormat); 4] = [
    ("Billable Clicks", KPI_BILLABLE_CLICKS, KpiFormat::Count),
    ("Billable Calls", KPI_BILLABLE_CALLS, KpiFormat::Count),
    ("Total Emails", KPI_TOTAL_EMAILS, KpiFormat::Count),
    ("Total Revenue", KPI_TOTAL_REVENUE, KpiFormat::Currency),
];

pub fn weekly_cards(result: &AnalysisResult) -> Vec<KpiCard> {
    build_cards(result, &WEEKLY_KPIS)
}

/// Daily revenue as plot points, x counted in days from the first entry.
pub fn daily_points(result: &AnalysisResult) -> (Option<NaiveDate>, Vec<[f64; 2]>) {
    let Some(origin) = result.daily_revenue.first().map(|d| d.date) else {
        return (None, Vec::new());
    };

    let points = result.daily_revenue.iter()
        .map(|d| [(d.date - origin).num_days() as f64, d.revenue])
        .collect();
    (Some(origin), points)
}

pub fn show_weekly_view(ui: &mut egui::Ui, result: Option<&AnalysisResult>) {
    let Some(result) = result else {
        crate::ui::show_empty_state(ui);
        return;
    };

    show_kpi_row(ui, &weekly_cards(result));
    ui.add_space(16.0);

    ui.group(|ui| {
        ui.heading("Daily Revenue");
        if let Some(range) = result.selected_date_range {
            ui.label(egui::RichText::new(format!("{} to {}", range.min, range.max)).weak());
        }
        ui.add_space(4.0);

        let (origin, points) = daily_points(result);
        let plot = egui_plot::Plot::new("daily_revenue")
            .height(ui.available_height().max(200.0))
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0)
            .label_formatter(move |_name, point| {
                match origin {
                    Some(origin) => format!(
                        "{}\n{}",
                        origin + Duration::days(point.x.round() as i64),
                        format_currency(point.y)
                    ),
                    None => String::new(),
                }
            });

        plot.show(ui, |plot_ui| {
            plot_ui.line(
                egui_plot::Line::new(points)
                    .name("Revenue")
                    .color(egui::Color32::from_rgb(100, 150, 255))
                    .width(2.0),
            );
        });
    });
}

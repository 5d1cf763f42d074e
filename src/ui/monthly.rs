// src/ui/monthly.rs
use eframe::egui;
use serde_json::Value;

use crate::api::AnalysisResult;
use crate::utils::{format_count, format_currency};

/// Shown for a cell the backend row does not carry.
pub const MISSING_CELL: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellFormat {
    Text,
    Count,
    Currency,
}

struct Column {
    header: &'static str,
    keys: [&'static str; 2],
    format: CellFormat,
}

// Rows are matched by snake_case key or by the header itself
const TABLE_COLUMNS: [Column; 5] = [
    Column { header: "Month", keys: ["month", "Month"], format: CellFormat::Text },
    Column { header: "Total Clicks", keys: ["total_clicks", "Total Clicks"], format: CellFormat::Count },
    Column { header: "Total Calls", keys: ["total_calls", "Total Calls"], format: CellFormat::Count },
    Column { header: "Total Emails", keys: ["total_emails", "Total Emails"], format: CellFormat::Count },
    Column { header: "Total Billing", keys: ["total_billing", "Total Billing"], format: CellFormat::Currency },
];

pub fn table_headers() -> [&'static str; 5] {
    TABLE_COLUMNS.map(|column| column.header)
}

pub fn table_rows(result: &AnalysisResult) -> Vec<[String; 5]> {
    result.monthly.table.iter()
        .map(|row| TABLE_COLUMNS.map(|column| format_cell(row.cell(&column.keys), column.format)))
        .collect()
}

fn format_cell(value: Option<&Value>, format: CellFormat) -> String {
    match (value, format) {
        (None | Some(Value::Null), _) => MISSING_CELL.to_string(),
        (Some(Value::String(text)), _) => text.clone(),
        (Some(Value::Number(n)), CellFormat::Count) => n.as_f64().map_or_else(|| n.to_string(), format_count),
        (Some(Value::Number(n)), CellFormat::Currency) => n.as_f64().map_or_else(|| n.to_string(), format_currency),
        (Some(other), _) => other.to_string(),
    }
}

/// One bar per month label; labels without a revenue figure are skipped.
pub fn revenue_bars(result: &AnalysisResult) -> Vec<(String, f64)> {
    result.monthly.labels.iter()
        .zip(&result.monthly.revenue)
        .map(|(label, revenue)| (label.clone(), *revenue))
        .collect()
}

pub fn show_monthly_view(ui: &mut egui::Ui, result: Option<&AnalysisResult>) {
    let Some(result) = result else {
        crate::ui::show_empty_state(ui);
        return;
    };

    egui::ScrollArea::vertical()
        .id_source("monthly_scroll")
        .show(ui, |ui| {
            ui.group(|ui| {
                ui.heading("Monthly Revenue");
                ui.add_space(4.0);

                let bars: Vec<egui_plot::Bar> = revenue_bars(result).into_iter()
                    .enumerate()
                    .map(|(i, (label, revenue))| {
                        egui_plot::Bar::new(i as f64, revenue)
                            .name(label)
                            .width(0.6)
                            .fill(egui::Color32::from_rgb(100, 150, 255))
                    })
                    .collect();

                egui_plot::Plot::new("monthly_revenue")
                    .height(240.0)
                    .allow_zoom(false)
                    .allow_drag(false)
                    .allow_scroll(false)
                    .include_y(0.0)
                    .show(ui, |plot_ui| {
                        plot_ui.bar_chart(egui_plot::BarChart::new(bars).name("Revenue"));
                    });
            });

            ui.add_space(16.0);

            ui.group(|ui| {
                ui.set_width(ui.available_width());
                ui.heading("Monthly Breakdown");
                ui.add_space(4.0);

                egui::Grid::new("monthly_table")
                    .num_columns(TABLE_COLUMNS.len())
                    .spacing([40.0, 6.0])
                    .striped(true)
                    .show(ui, |ui| {
                        for header in table_headers() {
                            ui.strong(header);
                        }
                        ui.end_row();

                        for row in table_rows(result) {
                            for cell in row {
                                ui.label(cell);
                            }
                            ui.end_row();
                        }
                    });
            });
        });
}

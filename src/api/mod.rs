// src/api/mod.rs
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::file::SelectedFile;

pub mod client;

pub use client::HttpBackend;

/// Message shown when the backend rejects a file without saying why.
pub const FALLBACK_ERROR: &str = "Analysis failed";

pub const KPI_BILLABLE_CLICKS: &str = "billable_clicks";
pub const KPI_BILLABLE_CALLS: &str = "billable_calls";
pub const KPI_TOTAL_EMAILS: &str = "total_emails";
pub const KPI_TOTAL_REVENUE: &str = "total_revenue";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateBounds {
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.min, self.max.max(self.min))
    }

    pub fn full_range(&self) -> DateRange {
        DateRange { start: self.min, end: self.max }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub total: f64,
    pub delta_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
}

/// One row of the monthly table, kept exactly as the backend sent it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlyRow(pub Map<String, Value>);

impl MonthlyRow {
    /// First cell found under any of `keys`.
    pub fn cell(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter().find_map(|key| self.0.get(*key))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyBreakdown {
    pub labels: Vec<String>,
    pub revenue: Vec<f64>,
    pub table: Vec<MonthlyRow>,
}

/// Payload of a successful `/analyze` call. Produced by the backend and
/// never modified on this side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub available_date_range: Option<DateBounds>,
    pub selected_date_range: Option<DateBounds>,
    pub kpis: BTreeMap<String, Kpi>,
    pub daily_revenue: Vec<DailyRevenue>,
    pub monthly: MonthlyBreakdown,
}

impl AnalysisResult {
    pub fn kpi(&self, name: &str) -> Option<&Kpi> {
        self.kpis.get(name)
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub file: SelectedFile,
    pub date_range: Option<DateRange>,
}

/// How a settled `/analyze` call reads once the body has been decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeOutcome {
    Success(AnalysisResult),
    Rejected(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Analysis worker stopped before responding")]
    WorkerLost,
}

/// Seam between the orchestrator and whatever answers `/analyze`.
pub trait AnalysisBackend: Send + Sync {
    fn analyze(&self, request: &AnalyzeRequest) -> Result<Value, ApiError>;
}

/// Reads a response body. An `ok` that is missing or falsy is a rejection.
pub fn interpret_response(body: Value) -> Result<AnalyzeOutcome, ApiError> {
    if !is_truthy(body.get("ok")) {
        let message = match body.get("error") {
            Some(Value::String(error)) if !error.is_empty() => error.clone(),
            _ => FALLBACK_ERROR.to_string(),
        };
        return Ok(AnalyzeOutcome::Rejected(message));
    }

    let result = serde_json::from_value(body)?;
    Ok(AnalyzeOutcome::Success(result))
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(false, |n| n != 0.0 && !n.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

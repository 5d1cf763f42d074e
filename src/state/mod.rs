// src/state/mod.rs
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;

use crate::api::{
    interpret_response, AnalysisBackend, AnalysisResult, AnalyzeOutcome, AnalyzeRequest,
    ApiError, DateBounds, DateRange,
};
use crate::file::SelectedFile;

pub mod ui_state;

pub use ui_state::{DashboardTab, DateRangeDraft, ViewState};

type Settlement = Result<AnalyzeOutcome, ApiError>;

// Upload form and last analysis
#[derive(Debug, Default)]
pub struct UploadState {
    pub selected_file: Option<SelectedFile>,
    pub date_range: Option<DateRange>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub result: Option<AnalysisResult>,
}

impl UploadState {
    pub fn available_range(&self) -> Option<DateBounds> {
        self.result.as_ref().and_then(|r| r.available_date_range)
    }
}

/// Owns the upload state and drives the `/analyze` round trip.
///
/// Requests run on a worker thread; `poll` is called once per frame to pick
/// up the settled outcome, so state is only ever mutated from the UI thread.
pub struct UploadOrchestrator {
    state: UploadState,
    backend: Arc<dyn AnalysisBackend>,
    pending: Option<Receiver<Settlement>>,
    // Available range seen by the last post-update hook
    seen_available: Option<DateBounds>,
}

impl UploadOrchestrator {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self {
            state: UploadState::default(),
            backend,
            pending: None,
            seen_available: None,
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        tracing::info!("Selected {} ({} rows)", file.name, file.preview.row_count);
        self.state.selected_file = Some(file);
        self.after_update();
    }

    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.state.date_range = Some(DateRange { start, end });
        self.after_update();
    }

    /// Restores the full range the backend reported as available.
    pub fn reset_date_range(&mut self) {
        if let Some(bounds) = self.state.available_range() {
            self.state.date_range = Some(bounds.full_range());
        }
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.state.error_message = Some(message.into());
    }

    pub fn dismiss_error(&mut self) {
        self.state.error_message = None;
    }

    /// Starts an analysis of the selected file.
    ///
    /// Returns `false` without issuing anything when no file is selected or a
    /// request is still outstanding. `notify` runs on the worker once the
    /// outcome is ready to be polled.
    pub fn analyze<F>(&mut self, notify: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        if self.pending.is_some() {
            return false;
        }
        let Some(file) = self.state.selected_file.clone() else {
            return false;
        };

        self.state.is_loading = true;
        self.state.error_message = None;

        let request = AnalyzeRequest { file, date_range: self.state.date_range };
        tracing::info!(
            file = %request.file.name,
            range = ?request.date_range,
            "Issuing analysis request"
        );

        let backend = Arc::clone(&self.backend);
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let settlement = backend.analyze(&request).and_then(interpret_response);
            // Receiver gone means the app is shutting down
            let _ = tx.send(settlement);
            notify();
        });

        self.pending = Some(rx);
        true
    }

    /// Applies a settled request, if any. Returns `true` when state changed.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = &self.pending else {
            return false;
        };

        let settlement = match rx.try_recv() {
            Ok(settlement) => settlement,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(ApiError::WorkerLost),
        };

        self.pending = None;
        self.settle(settlement);
        true
    }

    fn settle(&mut self, settlement: Settlement) {
        match settlement {
            Ok(AnalyzeOutcome::Success(result)) => {
                tracing::info!(
                    days = result.daily_revenue.len(),
                    months = result.monthly.labels.len(),
                    "Analysis completed"
                );
                self.state.result = Some(result);
                self.state.error_message = None;
            }
            Ok(AnalyzeOutcome::Rejected(message)) => {
                tracing::warn!("Backend rejected analysis: {}", message);
                self.state.error_message = Some(message);
            }
            Err(e) => {
                tracing::warn!("Analysis request failed: {}", e);
                self.state.error_message = Some(e.to_string());
            }
        }

        self.state.is_loading = false;
        self.after_update();
    }

    // Defaults the date range whenever a new available range shows up and
    // the user has not picked one yet.
    fn after_update(&mut self) {
        let available = self.state.available_range();
        if available == self.seen_available {
            return;
        }
        self.seen_available = available;

        if let (Some(bounds), None) = (available, self.state.date_range) {
            tracing::debug!("Defaulting date range to {} .. {}", bounds.min, bounds.max);
            self.state.date_range = Some(bounds.full_range());
        }
    }
}

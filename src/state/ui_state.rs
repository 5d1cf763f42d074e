// src/state/ui_state.rs
use chrono::NaiveDate;

use crate::api::{DateBounds, DateRange};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Weekly,
    Monthly,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 2] = [DashboardTab::Weekly, DashboardTab::Monthly];

    pub fn label(self) -> &'static str {
        match self {
            DashboardTab::Weekly => "Weekly",
            DashboardTab::Monthly => "Monthly",
        }
    }
}

// View-only state, kept apart from the upload state
#[derive(Debug, Default)]
pub struct ViewState {
    pub tab: DashboardTab,
    pub date_draft: DateRangeDraft,
}

/// Text behind the start/end date fields.
#[derive(Debug, Default)]
pub struct DateRangeDraft {
    pub start: String,
    pub end: String,
    synced: Option<DateRange>,
}

impl DateRangeDraft {
    /// Rewrites the text when the range was changed from elsewhere.
    pub fn sync(&mut self, current: Option<DateRange>) {
        if current == self.synced {
            return;
        }
        self.synced = current;
        match current {
            Some(range) => {
                self.start = range.start.format(DATE_FORMAT).to_string();
                self.end = range.end.format(DATE_FORMAT).to_string();
            }
            None => {
                self.start.clear();
                self.end.clear();
            }
        }
    }

    /// Parses both fields, clamping to `bounds` the way a date input with
    /// min/max would. Unparseable text is reverted and yields `None`.
    pub fn commit(&mut self, bounds: Option<DateBounds>) -> Option<DateRange> {
        let parsed = parse_date(&self.start).zip(parse_date(&self.end));
        let Some((start, end)) = parsed else {
            let synced = self.synced.take();
            self.sync(synced);
            return None;
        };

        let range = match bounds {
            Some(bounds) => DateRange { start: bounds.clamp(start), end: bounds.clamp(end) },
            None => DateRange { start, end },
        };
        if Some(range) == self.synced {
            // Unchanged, only normalise the text
            self.synced = None;
            self.sync(Some(range));
            return None;
        }
        Some(range)
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january() -> DateRange {
        DateRange { start: date(2024, 1, 1), end: date(2024, 1, 31) }
    }

    #[test]
    fn test_default_tab_is_weekly() {
        assert_eq!(ViewState::default().tab, DashboardTab::Weekly);
        assert_eq!(DashboardTab::Monthly.label(), "Monthly");
    }

    #[test]
    fn test_sync_writes_text() {
        let mut draft = DateRangeDraft::default();
        draft.sync(Some(january()));
        assert_eq!(draft.start, "2024-01-01");
        assert_eq!(draft.end, "2024-01-31");

        // Edits survive until the range itself changes
        draft.start = "2024-01-0".to_string();
        draft.sync(Some(january()));
        assert_eq!(draft.start, "2024-01-0");
    }

    #[test]
    fn test_commit_clamps_to_bounds() {
        let bounds = DateBounds { min: date(2024, 1, 1), max: date(2024, 1, 31) };
        let mut draft = DateRangeDraft::default();
        draft.sync(Some(january()));

        draft.start = "2023-12-25".to_string();
        draft.end = "2024-01-15".to_string();
        assert_eq!(
            draft.commit(Some(bounds)),
            Some(DateRange { start: date(2024, 1, 1), end: date(2024, 1, 15) })
        );
    }

    #[test]
    fn test_commit_reverts_bad_text() {
        let mut draft = DateRangeDraft::default();
        draft.sync(Some(january()));

        draft.end = "31/01/2024".to_string();
        assert_eq!(draft.commit(None), None);
        assert_eq!(draft.end, "2024-01-31");
    }

    #[test]
    fn test_commit_unchanged_range() {
        let mut draft = DateRangeDraft::default();
        draft.sync(Some(january()));
        draft.start = " 2024-01-01 ".to_string();
        assert_eq!(draft.commit(None), None);
        assert_eq!(draft.start, "2024-01-01");
    }

    #[test]
    fn test_commit_without_prior_range() {
        let mut draft = DateRangeDraft::default();
        draft.start = "2024-03-01".to_string();
        draft.end = "2024-03-31".to_string();
        assert_eq!(
            draft.commit(None),
            Some(DateRange { start: date(2024, 3, 1), end: date(2024, 3, 31) })
        );
    }
}

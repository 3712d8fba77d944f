//! Per-status counts over a history listing

use crate::domain::{EligibilityRecord, EligibilityStatus};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HistorySummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub unknown: usize,
}

impl HistorySummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, status: EligibilityStatus) {
        self.total += 1;
        match status {
            EligibilityStatus::Active => self.active += 1,
            EligibilityStatus::Inactive => self.inactive += 1,
            EligibilityStatus::Unknown => self.unknown += 1,
        }
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a EligibilityRecord>) -> Self {
        let mut summary = Self::new();
        for record in records {
            summary.record(record.status);
        }
        summary
    }

    /// Share of Active records, 0.0 for an empty listing
    pub fn active_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.active as f64 / self.total as f64
        }
    }
}

impl fmt::Display for HistorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} checks: {} active, {} inactive, {} unknown",
            self.total, self.active, self.inactive, self.unknown
        )
    }
}

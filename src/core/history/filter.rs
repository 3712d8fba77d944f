//! Narrowing a history listing

use crate::domain::ids::PatientId;
use crate::domain::{EligibilityRecord, EligibilityStatus};
use chrono::NaiveDate;

/// Optional criteria applied to a history listing; unset fields match anything
///
/// Date bounds are inclusive and compared against the UTC calendar date of
/// `checked_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub patient_id: Option<PatientId>,
    pub status: Option<EligibilityStatus>,
    pub checked_from: Option<NaiveDate>,
    pub checked_to: Option<NaiveDate>,
}

impl HistoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn patient(mut self, patient_id: PatientId) -> Self {
        self.patient_id = Some(patient_id);
        self
    }

    pub fn status(mut self, status: EligibilityStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn checked_from(mut self, date: NaiveDate) -> Self {
        self.checked_from = Some(date);
        self
    }

    pub fn checked_to(mut self, date: NaiveDate) -> Self {
        self.checked_to = Some(date);
        self
    }

    /// Rejects a range whose start is after its end
    pub fn validate(&self) -> Result<(), String> {
        if let (Some(from), Some(to)) = (self.checked_from, self.checked_to) {
            if from > to {
                return Err(format!("History range start {from} is after end {to}"));
            }
        }
        Ok(())
    }

    pub fn matches(&self, record: &EligibilityRecord) -> bool {
        let checked_on = record.checked_at.date_naive();

        self.patient_id
            .as_ref()
            .map_or(true, |id| &record.patient_id == id)
            && self.status.map_or(true, |status| record.status == status)
            && self.checked_from.map_or(true, |from| checked_on >= from)
            && self.checked_to.map_or(true, |to| checked_on <= to)
    }

    /// Keeps matching records, preserving their order
    pub fn apply(&self, records: Vec<EligibilityRecord>) -> Vec<EligibilityRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatalogError, Coverage};
    use chrono::{TimeZone, Utc};

    fn record(id: &str, patient: &str, day: u32, status: EligibilityStatus) -> EligibilityRecord {
        let builder = EligibilityRecord::builder()
            .eligibility_id(id)
            .unwrap()
            .patient_id(patient)
            .unwrap()
            .checked_at(Utc.with_ymd_and_hms(2024, 4, day, 23, 59, 0).unwrap())
            .service_date(NaiveDate::from_ymd_opt(2024, 4, day).unwrap())
            .status(status);
        let builder = match status {
            EligibilityStatus::Active => builder.coverage(Coverage {
                deductible: 1000.0,
                deductible_met: 100.0,
                copay: 20.0,
                out_of_pocket_max: 4000.0,
                out_of_pocket_met: 400.0,
            }),
            _ => builder.error(CatalogError::PayerTimeout.into()),
        };
        builder.build().unwrap()
    }

    fn records() -> Vec<EligibilityRecord> {
        vec![
            record("ELG-4", "P2", 4, EligibilityStatus::Active),
            record("ELG-3", "P1", 3, EligibilityStatus::Unknown),
            record("ELG-2", "P1", 2, EligibilityStatus::Active),
            record("ELG-1", "P1", 1, EligibilityStatus::Inactive),
        ]
    }

    fn ids(records: &[EligibilityRecord]) -> Vec<&str> {
        records.iter().map(|r| r.eligibility_id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let kept = HistoryFilter::new().apply(records());
        assert_eq!(ids(&kept), vec!["ELG-4", "ELG-3", "ELG-2", "ELG-1"]);
    }

    #[test]
    fn test_status_and_patient() {
        let filter = HistoryFilter::new()
            .patient(PatientId::new("P1").unwrap())
            .status(EligibilityStatus::Active);
        assert_eq!(ids(&filter.apply(records())), vec!["ELG-2"]);
    }

    #[test]
    fn test_inclusive_date_range() {
        let filter = HistoryFilter::new()
            .checked_from(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap())
            .checked_to(NaiveDate::from_ymd_opt(2024, 4, 3).unwrap());
        assert_eq!(ids(&filter.apply(records())), vec!["ELG-3", "ELG-2"]);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let filter = HistoryFilter::new()
            .checked_from(NaiveDate::from_ymd_opt(2024, 4, 3).unwrap())
            .checked_to(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
        assert!(filter.validate().is_err());
    }
}

//! Append-only eligibility history

use super::filter::HistoryFilter;
use crate::adapters::database::traits::HistoryStorage;
use crate::domain::ids::PatientId;
use crate::domain::{EligibilityRecord, EligoError, Result};
use std::sync::Arc;

/// Records every completed check; listings are newest first
#[derive(Clone)]
pub struct HistoryStore {
    storage: Arc<dyn HistoryStorage>,
}

impl HistoryStore {
    pub fn new(storage: Arc<dyn HistoryStorage>) -> Self {
        Self { storage }
    }

    /// # Errors
    ///
    /// Storage failures propagate; the record is then not durable.
    pub async fn append(&self, record: &EligibilityRecord) -> Result<()> {
        self.storage.append_record(record).await
    }

    /// Checks for one patient, empty when there are none
    pub async fn list_by_patient(&self, patient_id: &PatientId) -> Result<Vec<EligibilityRecord>> {
        self.storage.records_for_patient(patient_id).await
    }

    /// Every check across all patients
    pub async fn list_all(&self) -> Result<Vec<EligibilityRecord>> {
        self.storage.all_records().await
    }

    /// Listing narrowed by `filter`, using the per-patient query when it can
    ///
    /// # Errors
    ///
    /// Returns [`EligoError::Validation`] for an inverted date range.
    pub async fn list_filtered(&self, filter: &HistoryFilter) -> Result<Vec<EligibilityRecord>> {
        filter.validate().map_err(EligoError::Validation)?;

        let records = match filter.patient_id {
            Some(ref patient_id) => self.list_by_patient(patient_id).await?,
            None => self.list_all().await?,
        };
        Ok(filter.apply(records))
    }
}

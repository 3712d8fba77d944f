//! In-memory adapter implementing database traits
//!
//! Backs local runs and tests. Patients live in a map guarded by a single
//! write lock, which makes the check-and-insert atomic.

use crate::adapters::database::traits::{
    DatabaseClient, HistoryStorage, PatientInsert, PatientStore,
};
use crate::domain::ids::PatientId;
use crate::domain::{EligibilityRecord, Patient, Result};
use async_trait::async_trait;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// In-memory implementation of the storage traits
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    patients: RwLock<BTreeMap<PatientId, Patient>>,
    records: RwLock<Vec<EligibilityRecord>>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored patients
    pub async fn patient_count(&self) -> usize {
        self.patients.read().await.len()
    }

    /// Number of stored eligibility records
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

/// Newest check first; identifiers break timestamp ties
fn sort_newest_first(records: &mut [EligibilityRecord]) {
    records.sort_by(|a, b| {
        b.checked_at
            .cmp(&a.checked_at)
            .then_with(|| b.eligibility_id.cmp(&a.eligibility_id))
    });
}

#[async_trait]
impl DatabaseClient for MemoryAdapter {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<()> {
        // Nothing to create
        Ok(())
    }

    fn database_name(&self) -> &str {
        "memory"
    }
}

#[async_trait]
impl PatientStore for MemoryAdapter {
    async fn insert_patient_if_absent(&self, patient: &Patient) -> Result<PatientInsert> {
        let mut patients = self.patients.write().await;
        match patients.entry(patient.patient_id.clone()) {
            Entry::Occupied(_) => Ok(PatientInsert::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(patient.clone());
                Ok(PatientInsert::Inserted)
            }
        }
    }

    async fn find_patient(&self, patient_id: &PatientId) -> Result<Option<Patient>> {
        Ok(self.patients.read().await.get(patient_id).cloned())
    }

    async fn list_patients(&self) -> Result<Vec<Patient>> {
        Ok(self.patients.read().await.values().cloned().collect())
    }
}

#[async_trait]
impl HistoryStorage for MemoryAdapter {
    async fn append_record(&self, record: &EligibilityRecord) -> Result<()> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn records_for_patient(
        &self,
        patient_id: &PatientId,
    ) -> Result<Vec<EligibilityRecord>> {
        let mut matching: Vec<EligibilityRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|record| &record.patient_id == patient_id)
            .cloned()
            .collect();
        sort_newest_first(&mut matching);
        Ok(matching)
    }

    async fn all_records(&self) -> Result<Vec<EligibilityRecord>> {
        let mut all = self.records.read().await.clone();
        sort_newest_first(&mut all);
        Ok(all)
    }
}

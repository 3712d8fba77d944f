//! Database abstraction traits
//!
//! This module defines the traits that storage adapters must implement
//! to back the patient registry and the eligibility history.

use crate::domain::ids::PatientId;
use crate::domain::{EligibilityRecord, Patient, Result};
use async_trait::async_trait;

/// Outcome of an atomic insert-if-absent for a patient
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientInsert {
    /// No row existed; the patient was stored
    Inserted,
    /// A row already existed for the identifier; nothing was written
    AlreadyExists,
}

/// Database client trait for connection and schema management
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Test the database connection
    ///
    /// # Errors
    ///
    /// Returns an error if the connection test fails.
    async fn test_connection(&self) -> Result<()>;

    /// Ensure the schema (patients and eligibility tables) exists
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    async fn ensure_schema(&self) -> Result<()>;

    /// Get the database name
    fn database_name(&self) -> &str;
}

/// Patient storage with a uniqueness guarantee on the patient identifier
///
/// Implementations must make `insert_patient_if_absent` atomic: of two
/// concurrent calls for the same unseen identifier, exactly one reports
/// [`PatientInsert::Inserted`].
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Store the patient unless a row with the same identifier exists
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    async fn insert_patient_if_absent(&self, patient: &Patient) -> Result<PatientInsert>;

    /// Point lookup by patient identifier
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(Patient))` if found, `Ok(None)` if not found.
    async fn find_patient(&self, patient_id: &PatientId) -> Result<Option<Patient>>;

    /// All stored patients, ordered by identifier
    async fn list_patients(&self) -> Result<Vec<Patient>>;
}

/// Append-only storage for eligibility records
#[async_trait]
pub trait HistoryStorage: Send + Sync {
    /// Append a record
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the record is then not durable.
    async fn append_record(&self, record: &EligibilityRecord) -> Result<()>;

    /// Records for one patient, newest check first
    async fn records_for_patient(&self, patient_id: &PatientId)
        -> Result<Vec<EligibilityRecord>>;

    /// All records, newest check first
    async fn all_records(&self) -> Result<Vec<EligibilityRecord>>;
}

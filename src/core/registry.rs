//! Patient registry
//!
//! Keeps one canonical record per patient identifier. The first successful
//! registration fixes the name and date of birth; later requests must agree.

use crate::adapters::database::traits::{PatientInsert, PatientStore};
use crate::domain::ids::PatientId;
use crate::domain::{ConflictError, EligoError, Patient, Result};
use std::sync::Arc;

/// Reconciles incoming demographics against the stored patient record
#[derive(Clone)]
pub struct PatientRegistry {
    store: Arc<dyn PatientStore>,
}

impl PatientRegistry {
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        Self { store }
    }

    /// Stores the patient if unseen, otherwise checks it against the stored row
    ///
    /// Insert-if-absent runs first; the stored row is only read and compared
    /// when that insert did not happen, so a writer that loses a race for a
    /// new identifier is still compared against the winner.
    ///
    /// # Errors
    ///
    /// - [`EligoError::Conflict`] when the name or date of birth differs
    ///   (name is checked first); nothing is written.
    /// - [`EligoError::Database`] when the store fails, or reports an
    ///   existing row that cannot then be read.
    pub async fn reconcile(&self, patient: &Patient) -> Result<()> {
        match self.store.insert_patient_if_absent(patient).await? {
            PatientInsert::Inserted => {
                tracing::info!(patient_id = %patient.patient_id, "Registered new patient");
                Ok(())
            }
            PatientInsert::AlreadyExists => {
                let existing = self
                    .store
                    .find_patient(&patient.patient_id)
                    .await?
                    .ok_or_else(|| {
                        EligoError::Database(format!(
                            "Patient {} reported as existing but could not be read",
                            patient.patient_id
                        ))
                    })?;

                match existing.first_mismatch(patient) {
                    None => Ok(()),
                    Some(field) => {
                        tracing::warn!(
                            patient_id = %patient.patient_id,
                            field = field.as_str(),
                            "Patient data conflicts with stored record"
                        );
                        Err(ConflictError::new(patient.patient_id.clone(), field).into())
                    }
                }
            }
        }
    }

    /// Point lookup
    pub async fn find(&self, patient_id: &PatientId) -> Result<Option<Patient>> {
        self.store.find_patient(patient_id).await
    }

    /// Every registered patient, ordered by identifier
    pub async fn list(&self) -> Result<Vec<Patient>> {
        self.store.list_patients().await
    }
}

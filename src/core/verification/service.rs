//! Verification orchestrator
//!
//! Sequences one check: reconcile the patient, generate the outcome, append
//! it to history. A conflict stops the check before anything is generated;
//! a failed append is reported even though the outcome was generated.

use crate::adapters::database::traits::{HistoryStorage, PatientStore};
use crate::adapters::database::{create_storage, Storage};
use crate::config::EligoConfig;
use crate::core::history::{HistoryFilter, HistoryStore};
use crate::core::outcome::{
    OutcomeGenerator, RandomSource, StdRandomSource, SystemClock, TimeOrderedIdGenerator,
};
use crate::core::registry::PatientRegistry;
use crate::domain::ids::PatientId;
use crate::domain::{EligibilityRecord, EligoError, Patient, Result, VerificationRequest};
use crate::{log_error_with_context, log_verification_outcome};
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// Entry point for eligibility checks and history reads
#[derive(Clone)]
pub struct EligibilityService {
    registry: PatientRegistry,
    generator: OutcomeGenerator,
    history: HistoryStore,
}

impl EligibilityService {
    pub fn new(
        patients: Arc<dyn PatientStore>,
        history: Arc<dyn HistoryStorage>,
        generator: OutcomeGenerator,
    ) -> Self {
        Self {
            registry: PatientRegistry::new(patients),
            generator,
            history: HistoryStore::new(history),
        }
    }

    /// Service over an existing storage backend
    pub fn with_storage(storage: &Storage, generator: OutcomeGenerator) -> Self {
        Self::new(storage.patients.clone(), storage.history.clone(), generator)
    }

    /// Builds the configured backend, applies its schema and wires the
    /// production clock, id generator and random source
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be created or its schema
    /// cannot be applied.
    pub async fn from_config(config: &EligoConfig) -> Result<Self> {
        let storage = create_storage(config).await?;
        storage.client.ensure_schema().await?;

        let random: Arc<dyn RandomSource> = match config.simulation.seed {
            Some(seed) => {
                tracing::info!(seed, "Using seeded random source");
                Arc::new(StdRandomSource::seeded(seed))
            }
            None => Arc::new(StdRandomSource::from_entropy()),
        };
        let generator = OutcomeGenerator::new(
            Arc::new(SystemClock),
            Arc::new(TimeOrderedIdGenerator),
            random,
        );

        Ok(Self::with_storage(&storage, generator))
    }

    /// Runs one eligibility check
    ///
    /// Unknown and Inactive outcomes are successful results.
    ///
    /// # Errors
    ///
    /// - [`EligoError::Validation`] for a request whose demographics are invalid
    /// - [`EligoError::Conflict`] when the demographics disagree with the
    ///   stored patient; nothing is generated or recorded
    /// - [`EligoError::Database`] when the store fails
    pub async fn verify(&self, request: &VerificationRequest) -> Result<EligibilityRecord> {
        tracing::debug!(patient_id = %request.patient_id, "Verification requested");

        let patient = request.patient().map_err(EligoError::Validation)?;
        self.registry.reconcile(&patient).await?;

        let record = self.generator.generate(request);

        if let Err(e) = self.history.append(&record).await {
            log_error_with_context!(&e, "Failed to record eligibility check");
            return Err(e);
        }

        log_verification_outcome!(&record);
        Ok(record)
    }

    /// Runs independent checks with at most `concurrency` in flight
    ///
    /// Results come back in request order. Requests for the same new patient
    /// race through the registry; one registers and the rest are compared
    /// against it.
    pub async fn verify_batch(
        &self,
        requests: Vec<VerificationRequest>,
        concurrency: usize,
    ) -> Vec<Result<EligibilityRecord>> {
        let total = requests.len();
        tracing::info!(total, concurrency, "Starting batch verification");

        let mut results: Vec<(usize, Result<EligibilityRecord>)> =
            stream::iter(requests.into_iter().enumerate())
                .map(|(index, request)| async move { (index, self.verify(&request).await) })
                .buffer_unordered(concurrency.max(1))
                .collect()
                .await;
        results.sort_by_key(|(index, _)| *index);

        let failed = results.iter().filter(|(_, r)| r.is_err()).count();
        tracing::info!(total, failed, "Batch verification finished");

        results.into_iter().map(|(_, result)| result).collect()
    }

    /// Checks for one patient, newest first
    pub async fn history_for(&self, patient_id: &PatientId) -> Result<Vec<EligibilityRecord>> {
        self.history.list_by_patient(patient_id).await
    }

    /// Every check, newest first
    pub async fn all_history(&self) -> Result<Vec<EligibilityRecord>> {
        self.history.list_all().await
    }

    /// History narrowed by patient, status and check date
    pub async fn history(&self, filter: &HistoryFilter) -> Result<Vec<EligibilityRecord>> {
        self.history.list_filtered(filter).await
    }

    pub async fn patient(&self, patient_id: &PatientId) -> Result<Option<Patient>> {
        self.registry.find(patient_id).await
    }

    pub async fn patients(&self) -> Result<Vec<Patient>> {
        self.registry.list().await
    }
}

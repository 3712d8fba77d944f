//! PostgreSQL adapter implementing database traits
//!
//! This module provides the implementation of DatabaseClient, PatientStore
//! and HistoryStorage for PostgreSQL.

use crate::adapters::database::traits::{
    DatabaseClient, HistoryStorage, PatientInsert, PatientStore,
};
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::models::{PostgreSQLEligibility, PostgreSQLPatient};
use crate::domain::ids::PatientId;
use crate::domain::{EligibilityRecord, Patient, Result};
use async_trait::async_trait;
use std::sync::Arc;

const ELIGIBILITY_COLUMNS: &str = "eligibility_id, patient_id, checked_at, insurance_member_id, \
     insurance_company, service_date, status, deductible, deductible_met, copay, \
     out_of_pocket_max, out_of_pocket_met, errors";

/// PostgreSQL implementation of the storage traits
pub struct PostgreSQLAdapter {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLAdapter {
    /// Create a new PostgreSQL adapter
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Create a new PostgreSQL adapter with an Arc-wrapped client
    pub fn new_with_arc(client: Arc<PostgreSQLClient>) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Arc<PostgreSQLClient> {
        &self.client
    }
}

#[async_trait]
impl DatabaseClient for PostgreSQLAdapter {
    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.client.ensure_schema().await
    }

    fn database_name(&self) -> &str {
        "postgresql"
    }
}

#[async_trait]
impl PatientStore for PostgreSQLAdapter {
    async fn insert_patient_if_absent(&self, patient: &Patient) -> Result<PatientInsert> {
        let row = PostgreSQLPatient::from_domain(patient);

        // The primary key arbitrates concurrent first registrations
        let insert_query = r#"
            INSERT INTO patients (patient_id, name, date_of_birth)
            VALUES ($1, $2, $3)
            ON CONFLICT (patient_id) DO NOTHING
            RETURNING patient_id
        "#;

        let inserted = self
            .client
            .query_opt(
                insert_query,
                &[&row.patient_id, &row.name, &row.date_of_birth],
            )
            .await?;

        if inserted.is_some() {
            tracing::debug!(patient_id = %patient.patient_id, "Patient inserted into PostgreSQL");
            Ok(PatientInsert::Inserted)
        } else {
            Ok(PatientInsert::AlreadyExists)
        }
    }

    async fn find_patient(&self, patient_id: &PatientId) -> Result<Option<Patient>> {
        let query = "SELECT patient_id, name, date_of_birth FROM patients WHERE patient_id = $1";

        match self.client.query_opt(query, &[&patient_id.as_str()]).await? {
            Some(row) => Ok(Some(PostgreSQLPatient::from_row(&row)?.to_domain()?)),
            None => Ok(None),
        }
    }

    async fn list_patients(&self) -> Result<Vec<Patient>> {
        let query = "SELECT patient_id, name, date_of_birth FROM patients ORDER BY patient_id";

        self.client
            .query(query, &[])
            .await?
            .iter()
            .map(|row| PostgreSQLPatient::from_row(row)?.to_domain())
            .collect()
    }
}

#[async_trait]
impl HistoryStorage for PostgreSQLAdapter {
    async fn append_record(&self, record: &EligibilityRecord) -> Result<()> {
        let row = PostgreSQLEligibility::from_domain(record)?;

        let insert_query = format!(
            "INSERT INTO eligibility ({ELIGIBILITY_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)"
        );

        self.client
            .execute(
                &insert_query,
                &[
                    &row.eligibility_id,
                    &row.patient_id,
                    &row.checked_at,
                    &row.insurance_member_id,
                    &row.insurance_company,
                    &row.service_date,
                    &row.status,
                    &row.deductible,
                    &row.deductible_met,
                    &row.copay,
                    &row.out_of_pocket_max,
                    &row.out_of_pocket_met,
                    &row.errors,
                ],
            )
            .await?;

        tracing::debug!(
            eligibility_id = %record.eligibility_id,
            patient_id = %record.patient_id,
            "Eligibility record appended to PostgreSQL"
        );
        Ok(())
    }

    async fn records_for_patient(
        &self,
        patient_id: &PatientId,
    ) -> Result<Vec<EligibilityRecord>> {
        let query = format!(
            "SELECT {ELIGIBILITY_COLUMNS} FROM eligibility WHERE patient_id = $1 \
             ORDER BY checked_at DESC, eligibility_id DESC"
        );

        self.client
            .query(&query, &[&patient_id.as_str()])
            .await?
            .iter()
            .map(|row| PostgreSQLEligibility::from_row(row)?.to_domain())
            .collect()
    }

    async fn all_records(&self) -> Result<Vec<EligibilityRecord>> {
        let query = format!(
            "SELECT {ELIGIBILITY_COLUMNS} FROM eligibility \
             ORDER BY checked_at DESC, eligibility_id DESC"
        );

        let records: Vec<EligibilityRecord> = self
            .client
            .query(&query, &[])
            .await?
            .iter()
            .map(|row| PostgreSQLEligibility::from_row(row)?.to_domain())
            .collect::<Result<_>>()?;

        tracing::debug!(count = records.len(), "Loaded eligibility records from PostgreSQL");
        Ok(records)
    }
}

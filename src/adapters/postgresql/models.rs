//! PostgreSQL row models
//!
//! Flat row structures for the `patients` and `eligibility` tables and
//! their conversion to and from domain types.

use crate::domain::ids::{EligibilityId, PatientId};
use crate::domain::{
    Coverage, EligibilityRecord, EligibilityStatus, EligoError, Patient, Result,
    VerificationError,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use tokio_postgres::Row;

fn column<'a, T>(row: &'a Row, name: &str) -> Result<T>
where
    T: tokio_postgres::types::FromSql<'a>,
{
    row.try_get(name)
        .map_err(|e| EligoError::Database(format!("Failed to read column '{name}': {e}")))
}

/// Row of the `patients` table
#[derive(Debug, Clone, PartialEq)]
pub struct PostgreSQLPatient {
    pub patient_id: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
}

impl PostgreSQLPatient {
    pub fn from_domain(patient: &Patient) -> Self {
        Self {
            patient_id: patient.patient_id.to_string(),
            name: patient.name.clone(),
            date_of_birth: patient.date_of_birth,
        }
    }

    /// Reads the row columns by name
    ///
    /// # Errors
    ///
    /// Returns an error if a column is missing or has an unexpected type.
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            patient_id: column(row, "patient_id")?,
            name: column(row, "name")?,
            date_of_birth: column(row, "date_of_birth")?,
        })
    }

    /// Convert back to the domain type
    ///
    /// # Errors
    ///
    /// Returns an error if a stored value fails domain validation.
    pub fn to_domain(self) -> Result<Patient> {
        let patient_id = PatientId::new(self.patient_id).map_err(EligoError::Validation)?;
        Patient::new(patient_id, self.name, self.date_of_birth).map_err(EligoError::Validation)
    }
}

/// Row of the `eligibility` table
///
/// Coverage figures are nullable columns, populated together for Active rows.
/// Errors are stored as a JSONB array of `{code, message}` objects.
#[derive(Debug, Clone, PartialEq)]
pub struct PostgreSQLEligibility {
    pub eligibility_id: String,
    pub patient_id: String,
    pub checked_at: DateTime<Utc>,
    pub insurance_member_id: Option<String>,
    pub insurance_company: Option<String>,
    pub service_date: NaiveDate,
    pub status: String,
    pub deductible: Option<f64>,
    pub deductible_met: Option<f64>,
    pub copay: Option<f64>,
    pub out_of_pocket_max: Option<f64>,
    pub out_of_pocket_met: Option<f64>,
    pub errors: Value,
}

impl PostgreSQLEligibility {
    /// Convert from a domain record
    ///
    /// # Errors
    ///
    /// Returns an error if the error list cannot be serialized.
    pub fn from_domain(record: &EligibilityRecord) -> Result<Self> {
        let coverage = record.coverage.as_ref();
        Ok(Self {
            eligibility_id: record.eligibility_id.to_string(),
            patient_id: record.patient_id.to_string(),
            checked_at: record.checked_at,
            insurance_member_id: record.insurance_member_id.clone(),
            insurance_company: record.insurance_company.clone(),
            service_date: record.service_date,
            status: record.status.as_str().to_string(),
            deductible: coverage.map(|c| c.deductible),
            deductible_met: coverage.map(|c| c.deductible_met),
            copay: coverage.map(|c| c.copay),
            out_of_pocket_max: coverage.map(|c| c.out_of_pocket_max),
            out_of_pocket_met: coverage.map(|c| c.out_of_pocket_met),
            errors: serde_json::to_value(&record.errors)?,
        })
    }

    /// Reads the row columns by name
    ///
    /// # Errors
    ///
    /// Returns an error if a column is missing or has an unexpected type.
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            eligibility_id: column(row, "eligibility_id")?,
            patient_id: column(row, "patient_id")?,
            checked_at: column(row, "checked_at")?,
            insurance_member_id: column(row, "insurance_member_id")?,
            insurance_company: column(row, "insurance_company")?,
            service_date: column(row, "service_date")?,
            status: column(row, "status")?,
            deductible: column(row, "deductible")?,
            deductible_met: column(row, "deductible_met")?,
            copay: column(row, "copay")?,
            out_of_pocket_max: column(row, "out_of_pocket_max")?,
            out_of_pocket_met: column(row, "out_of_pocket_met")?,
            errors: column(row, "errors")?,
        })
    }

    fn coverage(&self) -> Option<Coverage> {
        Some(Coverage {
            deductible: self.deductible?,
            deductible_met: self.deductible_met?,
            copay: self.copay?,
            out_of_pocket_max: self.out_of_pocket_max?,
            out_of_pocket_met: self.out_of_pocket_met?,
        })
    }

    /// Convert back to the domain type
    ///
    /// # Errors
    ///
    /// Returns an error if the stored row violates the record's shape rules.
    pub fn to_domain(self) -> Result<EligibilityRecord> {
        let status: EligibilityStatus = self.status.parse().map_err(EligoError::Validation)?;
        let errors: Vec<VerificationError> = serde_json::from_value(self.errors.clone())?;
        let eligibility_id =
            EligibilityId::new(self.eligibility_id.clone()).map_err(EligoError::Validation)?;
        let patient_id = PatientId::new(self.patient_id.clone()).map_err(EligoError::Validation)?;

        let mut builder = EligibilityRecord::builder()
            .eligibility_id_typed(eligibility_id)
            .patient_id_typed(patient_id)
            .checked_at(self.checked_at)
            .insurance_member_id(self.insurance_member_id.clone())
            .insurance_company(self.insurance_company.clone())
            .service_date(self.service_date)
            .status(status)
            .errors(errors);
        if let Some(coverage) = self.coverage() {
            builder = builder.coverage(coverage);
        }

        builder.build().map_err(|e| {
            EligoError::Validation(format!(
                "Stored eligibility record {} is malformed: {e}",
                self.eligibility_id
            ))
        })
    }
}

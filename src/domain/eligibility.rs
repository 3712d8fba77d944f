//! Eligibility check domain models
//!
//! This module defines the eligibility status, coverage figures and the
//! immutable eligibility record produced by each verification request.

use super::catalog::VerificationError;
use super::ids::{EligibilityId, PatientId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Eligibility status determined for a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EligibilityStatus {
    /// Coverage is active; coverage figures are present
    Active,
    /// Member verified and not eligible
    Inactive,
    /// Eligibility could not be determined
    Unknown,
}

impl EligibilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EligibilityStatus::Active => "Active",
            EligibilityStatus::Inactive => "Inactive",
            EligibilityStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for EligibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EligibilityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(EligibilityStatus::Active),
            "inactive" => Ok(EligibilityStatus::Inactive),
            "unknown" => Ok(EligibilityStatus::Unknown),
            _ => Err(format!(
                "Invalid eligibility status '{s}'. Must be one of: Active, Inactive, Unknown"
            )),
        }
    }
}

/// Rounds a monetary amount to whole cents
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Insurance coverage figures for an Active eligibility record
///
/// All amounts are in dollars with two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    /// Total annual deductible
    pub deductible: f64,

    /// Amount of the deductible met so far this year
    pub deductible_met: f64,

    /// Flat per-visit copay
    pub copay: f64,

    /// Annual out-of-pocket maximum
    pub out_of_pocket_max: f64,

    /// Amount paid out of pocket so far this year
    pub out_of_pocket_met: f64,
}

impl Coverage {
    /// Deductible still to be met, in cents precision
    pub fn deductible_remaining(&self) -> f64 {
        round_cents(self.deductible - self.deductible_met)
    }

    /// Out-of-pocket spend remaining before the maximum is reached
    pub fn out_of_pocket_remaining(&self) -> f64 {
        round_cents(self.out_of_pocket_max - self.out_of_pocket_met)
    }

    /// Checks non-negativity and the met-within-total invariants
    pub fn validate(&self) -> Result<(), String> {
        let figures = [
            ("deductible", self.deductible),
            ("deductibleMet", self.deductible_met),
            ("copay", self.copay),
            ("outOfPocketMax", self.out_of_pocket_max),
            ("outOfPocketMet", self.out_of_pocket_met),
        ];
        for (name, value) in figures {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative amount, got {value}"));
            }
        }
        if self.deductible_met > self.deductible {
            return Err(format!(
                "deductibleMet ({}) exceeds deductible ({})",
                self.deductible_met, self.deductible
            ));
        }
        if self.out_of_pocket_met > self.out_of_pocket_max {
            return Err(format!(
                "outOfPocketMet ({}) exceeds outOfPocketMax ({})",
                self.out_of_pocket_met, self.out_of_pocket_max
            ));
        }
        Ok(())
    }
}

/// Immutable result of one eligibility verification request
///
/// # Examples
///
/// ```
/// use eligo::domain::{EligibilityRecord, EligibilityStatus, CatalogError};
/// use chrono::{NaiveDate, Utc};
///
/// let record = EligibilityRecord::builder()
///     .eligibility_id("ELG-1")
///     .unwrap()
///     .patient_id("P1")
///     .unwrap()
///     .checked_at(Utc::now())
///     .service_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
///     .insurance_company(Some("Aetna".to_string()))
///     .status(EligibilityStatus::Unknown)
///     .error(CatalogError::UnknownInsurance.into())
///     .build()
///     .unwrap();
/// assert!(record.coverage.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityRecord {
    /// Unique identifier for this check
    pub eligibility_id: EligibilityId,

    /// Patient this check belongs to
    pub patient_id: PatientId,

    /// When the check was performed
    pub checked_at: DateTime<Utc>,

    /// Insurance member ID supplied by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_member_id: Option<String>,

    /// Insurance company name supplied by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_company: Option<String>,

    /// Date of the service the check was requested for
    pub service_date: NaiveDate,

    /// Determined eligibility status
    pub status: EligibilityStatus,

    /// Coverage figures, present iff status is Active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<Coverage>,

    /// Errors, non-empty iff status is not Active
    #[serde(default)]
    pub errors: Vec<VerificationError>,
}

impl EligibilityRecord {
    /// Creates a new builder for constructing an EligibilityRecord
    pub fn builder() -> EligibilityRecordBuilder {
        EligibilityRecordBuilder::default()
    }

    pub fn is_active(&self) -> bool {
        self.status == EligibilityStatus::Active
    }

    /// Checks the status/coverage/errors shape invariants
    pub fn validate(&self) -> Result<(), String> {
        match (self.status, &self.coverage) {
            (EligibilityStatus::Active, None) => {
                return Err("Active eligibility record requires coverage".to_string())
            }
            (EligibilityStatus::Active, Some(coverage)) => {
                coverage.validate()?;
                if !self.errors.is_empty() {
                    return Err("Active eligibility record cannot carry errors".to_string());
                }
            }
            (status, Some(_)) => {
                return Err(format!("{status} eligibility record cannot carry coverage"))
            }
            (status, None) => {
                if self.errors.is_empty() {
                    return Err(format!(
                        "{status} eligibility record requires at least one error"
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Builder for constructing EligibilityRecord instances
#[derive(Debug, Default)]
pub struct EligibilityRecordBuilder {
    eligibility_id: Option<EligibilityId>,
    patient_id: Option<PatientId>,
    checked_at: Option<DateTime<Utc>>,
    insurance_member_id: Option<String>,
    insurance_company: Option<String>,
    service_date: Option<NaiveDate>,
    status: Option<EligibilityStatus>,
    coverage: Option<Coverage>,
    errors: Vec<VerificationError>,
}

impl EligibilityRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the eligibility ID from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is invalid
    pub fn eligibility_id(mut self, id: impl Into<String>) -> Result<Self, String> {
        self.eligibility_id = Some(EligibilityId::new(id)?);
        Ok(self)
    }

    pub fn eligibility_id_typed(mut self, id: EligibilityId) -> Self {
        self.eligibility_id = Some(id);
        self
    }

    /// Sets the patient ID from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is invalid
    pub fn patient_id(mut self, id: impl Into<String>) -> Result<Self, String> {
        self.patient_id = Some(PatientId::new(id)?);
        Ok(self)
    }

    pub fn patient_id_typed(mut self, id: PatientId) -> Self {
        self.patient_id = Some(id);
        self
    }

    pub fn checked_at(mut self, checked_at: DateTime<Utc>) -> Self {
        self.checked_at = Some(checked_at);
        self
    }

    pub fn insurance_member_id(mut self, member_id: Option<String>) -> Self {
        self.insurance_member_id = member_id;
        self
    }

    pub fn insurance_company(mut self, company: Option<String>) -> Self {
        self.insurance_company = company;
        self
    }

    pub fn service_date(mut self, service_date: NaiveDate) -> Self {
        self.service_date = Some(service_date);
        self
    }

    pub fn status(mut self, status: EligibilityStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn coverage(mut self, coverage: Coverage) -> Self {
        self.coverage = Some(coverage);
        self
    }

    pub fn error(mut self, error: VerificationError) -> Self {
        self.errors.push(error);
        self
    }

    pub fn errors(mut self, errors: Vec<VerificationError>) -> Self {
        self.errors = errors;
        self
    }

    /// Builds the record
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing or the
    /// status/coverage/errors shape is inconsistent
    pub fn build(self) -> Result<EligibilityRecord, String> {
        let record = EligibilityRecord {
            eligibility_id: self
                .eligibility_id
                .ok_or_else(|| "eligibility_id is required".to_string())?,
            patient_id: self
                .patient_id
                .ok_or_else(|| "patient_id is required".to_string())?,
            checked_at: self
                .checked_at
                .ok_or_else(|| "checked_at is required".to_string())?,
            insurance_member_id: self.insurance_member_id,
            insurance_company: self.insurance_company,
            service_date: self
                .service_date
                .ok_or_else(|| "service_date is required".to_string())?,
            status: self.status.ok_or_else(|| "status is required".to_string())?,
            coverage: self.coverage,
            errors: self.errors,
        };
        record.validate()?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CatalogError;

    fn coverage() -> Coverage {
        Coverage {
            deductible: 1500.0,
            deductible_met: 750.0,
            copay: 25.0,
            out_of_pocket_max: 5000.0,
            out_of_pocket_met: 1200.0,
        }
    }

    fn base() -> EligibilityRecordBuilder {
        EligibilityRecord::builder()
            .eligibility_id("ELG-1")
            .unwrap()
            .patient_id("P123456")
            .unwrap()
            .checked_at(Utc::now())
            .service_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "Active".parse::<EligibilityStatus>().unwrap(),
            EligibilityStatus::Active
        );
        assert_eq!(
            "inactive".parse::<EligibilityStatus>().unwrap(),
            EligibilityStatus::Inactive
        );
        assert!("pending".parse::<EligibilityStatus>().is_err());
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(12.345_6), 12.35);
        assert_eq!(round_cents(0.004), 0.0);
        assert_eq!(round_cents(750.000_000_000_01), 750.0);
    }

    #[test]
    fn test_coverage_remaining() {
        let c = coverage();
        assert_eq!(c.deductible_remaining(), 750.0);
        assert_eq!(c.out_of_pocket_remaining(), 3800.0);
    }

    #[test]
    fn test_coverage_validation() {
        assert!(coverage().validate().is_ok());

        let mut c = coverage();
        c.deductible_met = 1500.01;
        assert!(c.validate().is_err());

        let mut c = coverage();
        c.copay = -1.0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_active_record_requires_coverage() {
        let result = base().status(EligibilityStatus::Active).build();
        assert!(result.is_err());

        let record = base()
            .status(EligibilityStatus::Active)
            .coverage(coverage())
            .build()
            .unwrap();
        assert!(record.is_active());
        assert!(record.errors.is_empty());
    }

    #[test]
    fn test_inactive_record_requires_error_and_no_coverage() {
        assert!(base().status(EligibilityStatus::Inactive).build().is_err());
        assert!(base()
            .status(EligibilityStatus::Inactive)
            .coverage(coverage())
            .error(CatalogError::InsuranceExpired.into())
            .build()
            .is_err());

        let record = base()
            .status(EligibilityStatus::Inactive)
            .error(CatalogError::InsuranceExpired.into())
            .build()
            .unwrap();
        assert_eq!(record.errors.len(), 1);
    }

    #[test]
    fn test_missing_fields() {
        let result = EligibilityRecord::builder()
            .status(EligibilityStatus::Unknown)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_record_json_shape() {
        let record = base()
            .insurance_member_id(Some("MBR001".to_string()))
            .insurance_company(Some("Cigna".to_string()))
            .status(EligibilityStatus::Active)
            .coverage(coverage())
            .build()
            .unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["eligibilityId"], "ELG-1");
        assert_eq!(json["status"], "Active");
        assert_eq!(json["coverage"]["outOfPocketMax"], 5000.0);
        assert_eq!(json["serviceDate"], "2024-02-01");
        assert_eq!(json["errors"], serde_json::json!([]));
    }
}

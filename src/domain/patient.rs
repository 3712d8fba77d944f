//! Patient domain model

use super::errors::ConflictField;
use super::ids::PatientId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical patient record
///
/// Name and date of birth are fixed by the first registration for an
/// identifier; later registrations must carry identical values.
///
/// # Examples
///
/// ```
/// use eligo::domain::{Patient, PatientId};
/// use chrono::NaiveDate;
///
/// let patient = Patient::new(
///     PatientId::new("P1").unwrap(),
///     "Jane Doe",
///     NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
/// )
/// .unwrap();
/// assert_eq!(patient.name, "Jane Doe");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Unique patient identifier
    pub patient_id: PatientId,

    /// Full name as it appears in medical records
    pub name: String,

    /// Date of birth
    pub date_of_birth: NaiveDate,
}

impl Patient {
    /// Creates a patient, rejecting a blank name
    pub fn new(
        patient_id: PatientId,
        name: impl Into<String>,
        date_of_birth: NaiveDate,
    ) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Patient name cannot be empty".to_string());
        }
        Ok(Self {
            patient_id,
            name,
            date_of_birth,
        })
    }

    /// Returns the first demographic field that differs from `other`
    ///
    /// Name is compared before date of birth. Comparison is exact.
    pub fn first_mismatch(&self, other: &Patient) -> Option<ConflictField> {
        if self.name != other.name {
            Some(ConflictField::Name)
        } else if self.date_of_birth != other.date_of_birth {
            Some(ConflictField::DateOfBirth)
        } else {
            None
        }
    }
}

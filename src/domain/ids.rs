//! Domain identifier types with validation
//!
//! Newtype wrappers keep patient identifiers and eligibility check identifiers
//! from being mixed up. Both are opaque strings; only blankness is rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Patient identifier newtype wrapper
///
/// Caller-supplied, stable identifier for a patient (e.g. `P123456`).
/// The value is stored exactly as given; surrounding whitespace is significant.
///
/// # Examples
///
/// ```
/// use eligo::domain::ids::PatientId;
/// use std::str::FromStr;
///
/// let patient_id = PatientId::from_str("P123456").unwrap();
/// assert_eq!(patient_id.as_str(), "P123456");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PatientId(String);

impl PatientId {
    /// Creates a new PatientId from a string
    ///
    /// # Arguments
    ///
    /// * `id` - The patient identifier string
    ///
    /// # Returns
    ///
    /// Returns `Ok(PatientId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Patient ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the patient ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PatientId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PatientId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PatientId> for String {
    fn from(id: PatientId) -> Self {
        id.0
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Eligibility check identifier
///
/// Unique per verification request. Generated identifiers have the form
/// `ELG-{uuid}` where the UUID is time-ordered, so lexical order follows
/// creation order.
///
/// # Examples
///
/// ```
/// use eligo::domain::ids::EligibilityId;
///
/// let id = EligibilityId::new("ELG-0001").unwrap();
/// assert_eq!(id.as_str(), "ELG-0001");
/// assert!(EligibilityId::new("0001").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EligibilityId(String);

impl EligibilityId {
    /// Prefix carried by every eligibility check identifier
    pub const PREFIX: &'static str = "ELG-";

    /// Creates a new EligibilityId from a string
    ///
    /// # Returns
    ///
    /// Returns `Err` if the ID is blank or lacks the `ELG-` prefix
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Eligibility ID cannot be empty".to_string());
        }
        if !id.starts_with(Self::PREFIX) || id.len() == Self::PREFIX.len() {
            return Err(format!(
                "Invalid eligibility ID format. Expected {}<suffix>, got: {}",
                Self::PREFIX,
                id
            ));
        }
        Ok(Self(id))
    }

    /// Builds an identifier from a suffix, adding the `ELG-` prefix
    pub fn from_suffix(suffix: impl fmt::Display) -> Self {
        Self(format!("{}{}", Self::PREFIX, suffix))
    }

    /// Returns the eligibility ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EligibilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EligibilityId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EligibilityId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EligibilityId> for String {
    fn from(id: EligibilityId) -> Self {
        id.0
    }
}

impl AsRef<str> for EligibilityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

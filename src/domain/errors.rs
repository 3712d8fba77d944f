//! Domain error types
//!
//! This module defines the error hierarchy for Eligo.
//! Errors are domain-specific and don't expose third-party types.

use crate::domain::ids::PatientId;
use std::fmt;
use thiserror::Error;

/// Main Eligo error type
///
/// Generated Unknown/Inactive eligibility outcomes are *not* errors; they are
/// successful results. This type covers the cases that abort a request before
/// any record exists (conflicts) or leave it incomplete (storage failures).
#[derive(Debug, Error)]
pub enum EligoError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Patient re-registration disagrees with the stored record
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// Storage collaborator failures (connection, query, constraint)
    #[error("Database error: {0}")]
    Database(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl EligoError {
    /// Returns true for the registry conflict case
    pub fn is_conflict(&self) -> bool {
        matches!(self, EligoError::Conflict(_))
    }

    /// Returns true when the store collaborator failed
    pub fn is_storage(&self) -> bool {
        matches!(self, EligoError::Database(_))
    }
}

/// Demographic field that disagreed with the stored patient record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    /// Full name differs
    Name,
    /// Date of birth differs
    DateOfBirth,
}

impl ConflictField {
    /// Human-readable field name
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictField::Name => "name",
            ConflictField::DateOfBirth => "date of birth",
        }
    }
}

impl fmt::Display for ConflictField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when an existing patient's name or date of birth differs from an
/// incoming registration for the same identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Patient ID data mismatch for {patient_id}: {field} doesn't match")]
pub struct ConflictError {
    /// Identifier of the stored patient
    pub patient_id: PatientId,

    /// First field found to differ
    pub field: ConflictField,
}

impl ConflictError {
    /// Creates a new conflict error
    pub fn new(patient_id: PatientId, field: ConflictField) -> Self {
        Self { patient_id, field }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for EligoError {
    fn from(err: std::io::Error) -> Self {
        EligoError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for EligoError {
    fn from(err: serde_json::Error) -> Self {
        EligoError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for EligoError {
    fn from(err: toml::de::Error) -> Self {
        EligoError::Configuration(format!("TOML parse error: {err}"))
    }
}

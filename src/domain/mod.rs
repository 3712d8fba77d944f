//! Domain models and types for Eligo.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PatientId`], [`EligibilityId`])
//! - **Domain models** ([`Patient`], [`EligibilityRecord`], [`Coverage`],
//!   [`VerificationRequest`], [`InsuranceCarrier`])
//! - **The fixed error catalog** ([`CatalogError`], [`VerificationError`])
//! - **Error types** ([`EligoError`], [`ConflictError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Conflicts and storage failures are errors. Unknown and Inactive
//! eligibility outcomes are ordinary records:
//!
//! ```rust
//! use eligo::domain::{ConflictError, ConflictField, EligoError, PatientId};
//!
//! let err: EligoError =
//!     ConflictError::new(PatientId::new("P1").unwrap(), ConflictField::Name).into();
//! assert!(err.is_conflict());
//! ```

pub mod carrier;
pub mod catalog;
pub mod eligibility;
pub mod errors;
pub mod ids;
pub mod patient;
pub mod request;
pub mod result;

// Re-export commonly used types for convenience
pub use carrier::InsuranceCarrier;
pub use catalog::{CatalogError, ErrorCategory, VerificationError};
pub use eligibility::{
    round_cents, Coverage, EligibilityRecord, EligibilityRecordBuilder, EligibilityStatus,
};
pub use errors::{ConflictError, ConflictField, EligoError};
pub use ids::{EligibilityId, PatientId};
pub use patient::Patient;
pub use request::VerificationRequest;
pub use result::Result;

//! Fixed catalog of eligibility errors
//!
//! Every error a generated eligibility record can carry comes from this
//! closed set. Each variant knows its category, machine-readable code and
//! human-readable message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category a catalog error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Carrier name outside the recognized set
    UnknownInsurance,
    /// Payer system could not be reached or answered badly
    ApiFailure,
    /// Payer reached, but the member could not be verified
    VerificationIssue,
    /// Member verified and not eligible
    NotEligible,
}

impl ErrorCategory {
    /// Errors in this category, in catalog order
    pub fn errors(&self) -> &'static [CatalogError] {
        match self {
            ErrorCategory::UnknownInsurance => &[CatalogError::UnknownInsurance],
            ErrorCategory::ApiFailure => &CatalogError::API_FAILURES,
            ErrorCategory::VerificationIssue => &CatalogError::VERIFICATION_ISSUES,
            ErrorCategory::NotEligible => &CatalogError::NOT_ELIGIBLE,
        }
    }
}

/// A single catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogError {
    UnknownInsurance,

    PayerSystemUnavailable,
    PayerTimeout,
    InvalidPayerResponse,

    MemberNotFound,
    MemberIdMismatch,
    DemographicMismatch,

    InsuranceExpired,
    CoverageTerminated,
    PlanNotActive,
    ServiceNotCovered,
}

impl CatalogError {
    /// API-failure errors
    pub const API_FAILURES: [CatalogError; 3] = [
        CatalogError::PayerSystemUnavailable,
        CatalogError::PayerTimeout,
        CatalogError::InvalidPayerResponse,
    ];

    /// Verification-issue errors
    pub const VERIFICATION_ISSUES: [CatalogError; 3] = [
        CatalogError::MemberNotFound,
        CatalogError::MemberIdMismatch,
        CatalogError::DemographicMismatch,
    ];

    /// Not-eligible errors
    pub const NOT_ELIGIBLE: [CatalogError; 4] = [
        CatalogError::InsuranceExpired,
        CatalogError::CoverageTerminated,
        CatalogError::PlanNotActive,
        CatalogError::ServiceNotCovered,
    ];

    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::UnknownInsurance => ErrorCategory::UnknownInsurance,
            CatalogError::PayerSystemUnavailable
            | CatalogError::PayerTimeout
            | CatalogError::InvalidPayerResponse => ErrorCategory::ApiFailure,
            CatalogError::MemberNotFound
            | CatalogError::MemberIdMismatch
            | CatalogError::DemographicMismatch => ErrorCategory::VerificationIssue,
            CatalogError::InsuranceExpired
            | CatalogError::CoverageTerminated
            | CatalogError::PlanNotActive
            | CatalogError::ServiceNotCovered => ErrorCategory::NotEligible,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::UnknownInsurance => "UNKNOWN_INSURANCE",
            CatalogError::PayerSystemUnavailable => "PAYER_SYSTEM_UNAVAILABLE",
            CatalogError::PayerTimeout => "PAYER_TIMEOUT",
            CatalogError::InvalidPayerResponse => "INVALID_PAYER_RESPONSE",
            CatalogError::MemberNotFound => "MEMBER_NOT_FOUND",
            CatalogError::MemberIdMismatch => "MEMBER_ID_MISMATCH",
            CatalogError::DemographicMismatch => "DEMOGRAPHIC_MISMATCH",
            CatalogError::InsuranceExpired => "INSURANCE_EXPIRED",
            CatalogError::CoverageTerminated => "COVERAGE_TERMINATED",
            CatalogError::PlanNotActive => "PLAN_NOT_ACTIVE",
            CatalogError::ServiceNotCovered => "SERVICE_NOT_COVERED",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            CatalogError::UnknownInsurance => {
                "Insurance company is not recognized or not supported for eligibility checks"
            }
            CatalogError::PayerSystemUnavailable => {
                "Insurance payer system is temporarily unavailable, please try again later"
            }
            CatalogError::PayerTimeout => "Request to insurance payer timed out",
            CatalogError::InvalidPayerResponse => {
                "Insurance payer returned a response that could not be processed"
            }
            CatalogError::MemberNotFound => "No member found matching the provided member ID",
            CatalogError::MemberIdMismatch => {
                "Member ID does not belong to the patient on record with the payer"
            }
            CatalogError::DemographicMismatch => {
                "Patient name or date of birth does not match payer records"
            }
            CatalogError::InsuranceExpired => "Insurance policy has expired",
            CatalogError::CoverageTerminated => "Coverage was terminated by the payer",
            CatalogError::PlanNotActive => "Insurance plan is not active for the service date",
            CatalogError::ServiceNotCovered => "Requested service is not covered under the plan",
        }
    }

    /// Looks up a catalog entry by its code
    pub fn from_code(code: &str) -> Option<Self> {
        std::iter::once(CatalogError::UnknownInsurance)
            .chain(Self::API_FAILURES)
            .chain(Self::VERIFICATION_ISSUES)
            .chain(Self::NOT_ELIGIBLE)
            .find(|entry| entry.code() == code)
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// Code/message pair carried by a non-Active eligibility record
///
/// This is the persisted and serialized form; records read back from storage
/// keep whatever text was stored at the time of the check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationError {
    /// Short machine-readable code
    pub code: String,

    /// Human-readable description
    pub message: String,
}

impl VerificationError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Catalog entry matching this error's code, if any
    pub fn catalog_entry(&self) -> Option<CatalogError> {
        CatalogError::from_code(&self.code)
    }
}

impl From<CatalogError> for VerificationError {
    fn from(entry: CatalogError) -> Self {
        Self::new(entry.code(), entry.message())
    }
}

impl fmt::Display for VerificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique() {
        let all: Vec<CatalogError> = std::iter::once(CatalogError::UnknownInsurance)
            .chain(CatalogError::API_FAILURES)
            .chain(CatalogError::VERIFICATION_ISSUES)
            .chain(CatalogError::NOT_ELIGIBLE)
            .collect();
        let codes: HashSet<&str> = all.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn test_category_lists_agree_with_category() {
        for category in [
            ErrorCategory::UnknownInsurance,
            ErrorCategory::ApiFailure,
            ErrorCategory::VerificationIssue,
            ErrorCategory::NotEligible,
        ] {
            assert!(!category.errors().is_empty());
            for entry in category.errors() {
                assert_eq!(entry.category(), category);
            }
        }
    }

    #[test]
    fn test_from_code() {
        assert_eq!(
            CatalogError::from_code("INSURANCE_EXPIRED"),
            Some(CatalogError::InsuranceExpired)
        );
        assert_eq!(CatalogError::from_code("API_ERROR"), None);
    }

    #[test]
    fn test_verification_error_from_catalog() {
        let err = VerificationError::from(CatalogError::UnknownInsurance);
        assert_eq!(err.code, "UNKNOWN_INSURANCE");
        assert_eq!(err.catalog_entry(), Some(CatalogError::UnknownInsurance));
        assert!(err.to_string().starts_with("UNKNOWN_INSURANCE: "));
    }
}

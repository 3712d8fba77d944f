//! Logging and observability
//!
//! Structured `tracing` logging with console output and optional rolling
//! JSON files. Patient names and dates of birth are never logged; events
//! carry identifiers only.
//!
//! # Example
//!
//! ```no_run
//! use eligo::logging::init_logging;
//! use eligo::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(patient_id = "P1", "Verification requested");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the outcome of a completed verification
///
/// # Example
///
/// ```no_run
/// use eligo::log_verification_outcome;
/// use eligo::domain::{EligibilityRecord, EligibilityStatus, CatalogError};
/// use chrono::{NaiveDate, Utc};
///
/// let record = EligibilityRecord::builder()
///     .eligibility_id("ELG-1").unwrap()
///     .patient_id("P1").unwrap()
///     .checked_at(Utc::now())
///     .service_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
///     .status(EligibilityStatus::Unknown)
///     .error(CatalogError::UnknownInsurance.into())
///     .build()
///     .unwrap();
/// log_verification_outcome!(&record);
/// ```
#[macro_export]
macro_rules! log_verification_outcome {
    ($record:expr) => {
        tracing::info!(
            eligibility_id = %$record.eligibility_id,
            patient_id = %$record.patient_id,
            status = %$record.status,
            error = $record.errors.first().map(|e| e.code.as_str()).unwrap_or(""),
            "Eligibility verified"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use eligo::log_error_with_context;
/// use eligo::domain::EligoError;
///
/// let error = EligoError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::{CatalogError, EligibilityRecord, EligibilityStatus, EligoError};
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_macros_expand_without_subscriber() {
        let record = EligibilityRecord::builder()
            .eligibility_id("ELG-1")
            .unwrap()
            .patient_id("P1")
            .unwrap()
            .checked_at(Utc::now())
            .service_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .status(EligibilityStatus::Unknown)
            .error(CatalogError::UnknownInsurance.into())
            .build()
            .unwrap();
        log_verification_outcome!(&record);

        let error = EligoError::Other("boom".to_string());
        log_error_with_context!(&error, "testing");
    }
}

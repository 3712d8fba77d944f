//! CLI command implementations
//!
//! Commands return the process exit code: 0 success, 2 configuration
//! error, 3 patient conflict, 4 connection or storage error, 5 fatal.

pub mod history;
pub mod init;
pub mod init_db;
pub mod patients;
pub mod validate;
pub mod verify;
pub mod verify_batch;

use crate::config::{load_config, DatabaseTarget, EligoConfig};
use crate::core::verification::EligibilityService;
use crate::domain::{EligibilityRecord, EligoError};

pub const EXIT_OK: i32 = 0;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_CONFLICT: i32 = 3;
pub const EXIT_STORAGE: i32 = 4;
pub const EXIT_FATAL: i32 = 5;

/// Maps a domain error onto the CLI exit code
pub fn exit_code_for(error: &EligoError) -> i32 {
    match error {
        EligoError::Configuration(_) | EligoError::Validation(_) => EXIT_CONFIG,
        EligoError::Conflict(_) => EXIT_CONFLICT,
        EligoError::Database(_) => EXIT_STORAGE,
        EligoError::Serialization(_) | EligoError::Io(_) | EligoError::Other(_) => EXIT_FATAL,
    }
}

/// Loads configuration and builds the service, printing the failure and
/// returning its exit code otherwise
pub(crate) async fn open_service(
    config_path: &str,
) -> std::result::Result<(EligoConfig, EligibilityService), i32> {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            println!("❌ Failed to load configuration file");
            println!("   Error: {e}");
            return Err(EXIT_CONFIG);
        }
    };

    if config.database_target == DatabaseTarget::Memory {
        tracing::warn!("Using in-memory storage; nothing is kept after this command exits");
    }

    match EligibilityService::from_config(&config).await {
        Ok(service) => Ok((config, service)),
        Err(e) => {
            println!("❌ Failed to open storage");
            println!("   Error: {e}");
            Err(exit_code_for(&e))
        }
    }
}

/// Multi-line human-readable rendering of a record
pub(crate) fn format_record(record: &EligibilityRecord) -> String {
    let mut lines = vec![
        format!("  Eligibility ID: {}", record.eligibility_id),
        format!("  Patient ID:     {}", record.patient_id),
        format!("  Checked At:     {}", record.checked_at.to_rfc3339()),
        format!("  Service Date:   {}", record.service_date),
        format!(
            "  Company:        {}",
            record.insurance_company.as_deref().unwrap_or("-")
        ),
        format!(
            "  Member ID:      {}",
            record.insurance_member_id.as_deref().unwrap_or("-")
        ),
        format!("  Status:         {}", record.status),
    ];

    if let Some(coverage) = &record.coverage {
        lines.push(format!(
            "  Deductible:     ${:.2} (met ${:.2}, remaining ${:.2})",
            coverage.deductible,
            coverage.deductible_met,
            coverage.deductible_remaining()
        ));
        lines.push(format!("  Copay:          ${:.2}", coverage.copay));
        lines.push(format!(
            "  Out of Pocket:  ${:.2} (met ${:.2}, remaining ${:.2})",
            coverage.out_of_pocket_max,
            coverage.out_of_pocket_met,
            coverage.out_of_pocket_remaining()
        ));
    }

    for error in &record.errors {
        lines.push(format!("  Error:          {error}"));
    }

    lines.join("\n")
}

/// One-line rendering for listings
pub(crate) fn format_record_row(record: &EligibilityRecord) -> String {
    format!(
        "{:<42} {:<12} {:<25} {:<9} {}",
        record.eligibility_id.as_str(),
        record.patient_id.as_str(),
        record.checked_at.format("%Y-%m-%d %H:%M:%S UTC"),
        record.status.as_str(),
        record
            .errors
            .first()
            .map(|e| e.code.as_str())
            .unwrap_or("")
    )
}

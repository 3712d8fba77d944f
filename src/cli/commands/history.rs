//! History command implementation
//!
//! Lists recorded eligibility checks, newest first.

use super::{exit_code_for, format_record_row, open_service, EXIT_OK};
use crate::core::history::{HistoryFilter, HistorySummary};
use crate::domain::ids::PatientId;
use crate::domain::EligibilityStatus;
use chrono::NaiveDate;
use clap::Args;

/// Arguments for the history command
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Only checks for this patient
    #[arg(long)]
    pub patient_id: Option<PatientId>,

    /// Only checks with this status (active, inactive, unknown)
    #[arg(long)]
    pub status: Option<EligibilityStatus>,

    /// Earliest check date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Latest check date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Print records as JSON
    #[arg(long)]
    pub json: bool,
}

impl HistoryArgs {
    pub fn to_filter(&self) -> HistoryFilter {
        HistoryFilter {
            patient_id: self.patient_id.clone(),
            status: self.status,
            checked_from: self.from,
            checked_to: self.to,
        }
    }

    /// Execute the history command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (_config, service) = match open_service(config_path).await {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        let records = match service.history(&self.to_filter()).await {
            Ok(r) => r,
            Err(e) => {
                println!("❌ Failed to load eligibility history");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&records)?);
            return Ok(EXIT_OK);
        }

        println!("📋 Eligibility History");
        println!();

        if records.is_empty() {
            println!("No eligibility checks found.");
            return Ok(EXIT_OK);
        }

        for record in &records {
            println!("{}", format_record_row(record));
        }
        println!();
        println!("📊 {}", HistorySummary::from_records(&records));

        Ok(EXIT_OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_filter() {
        let args = HistoryArgs {
            patient_id: Some(PatientId::new("P1").unwrap()),
            status: Some(EligibilityStatus::Inactive),
            from: NaiveDate::from_ymd_opt(2024, 1, 1),
            to: None,
            json: false,
        };
        let filter = args.to_filter();
        assert_eq!(filter.patient_id.unwrap().as_str(), "P1");
        assert_eq!(filter.status, Some(EligibilityStatus::Inactive));
        assert!(filter.checked_to.is_none());
    }
}

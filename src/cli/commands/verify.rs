//! Verify command implementation
//!
//! Runs a single eligibility check and prints the resulting record.

use super::{exit_code_for, format_record, open_service, EXIT_CONFIG, EXIT_OK};
use crate::domain::request::parse_service_date;
use crate::domain::VerificationRequest;
use chrono::NaiveDate;
use clap::Args;

/// Arguments for the verify command
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Patient identifier
    #[arg(long)]
    pub patient_id: String,

    /// Patient's full name
    #[arg(long)]
    pub name: String,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub dob: NaiveDate,

    /// Service date (YYYY-MM-DD or RFC 3339 timestamp)
    #[arg(long, value_parser = parse_service_date)]
    pub service_date: NaiveDate,

    /// Insurance member ID
    #[arg(long)]
    pub member_id: Option<String>,

    /// Insurance company name, e.g. "Cigna"
    #[arg(long)]
    pub company: Option<String>,

    /// Print the record as JSON
    #[arg(long)]
    pub json: bool,
}

impl VerifyArgs {
    /// Builds the request from the arguments
    pub fn to_request(&self) -> Result<VerificationRequest, String> {
        let mut request =
            VerificationRequest::new(&self.patient_id, &self.name, self.dob, self.service_date)?;
        if let Some(member_id) = &self.member_id {
            request = request.with_insurance_member_id(member_id);
        }
        if let Some(company) = &self.company {
            request = request.with_insurance_company(company);
        }
        Ok(request)
    }

    /// Execute the verify command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let request = match self.to_request() {
            Ok(r) => r,
            Err(e) => {
                println!("❌ Invalid request: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let (_config, service) = match open_service(config_path).await {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        match service.verify(&request).await {
            Ok(record) => {
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&record)?);
                } else {
                    println!("✅ Eligibility check complete");
                    println!();
                    println!("{}", format_record(&record));
                }
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Eligibility check failed");
                println!("   Error: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}

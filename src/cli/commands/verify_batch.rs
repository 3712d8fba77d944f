//! Verify-batch command implementation
//!
//! Reads a JSON array of requests and verifies them concurrently.

use super::{exit_code_for, format_record_row, open_service, EXIT_CONFIG, EXIT_OK};
use crate::core::history::HistorySummary;
use crate::domain::{EligoError, VerificationRequest};
use clap::Args;
use std::path::Path;

/// Arguments for the verify-batch command
#[derive(Args, Debug)]
pub struct VerifyBatchArgs {
    /// JSON file holding an array of verification requests
    #[arg(short, long)]
    pub input: String,

    /// Checks in flight at once (defaults to simulation.batch_concurrency)
    #[arg(long)]
    pub concurrency: Option<usize>,
}

/// Parses the batch input file
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of
/// requests.
pub fn read_requests(path: impl AsRef<Path>) -> crate::domain::Result<Vec<VerificationRequest>> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    let requests: Vec<VerificationRequest> = serde_json::from_str(&contents)?;
    Ok(requests)
}

impl VerifyBatchArgs {
    /// Execute the verify-batch command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let requests = match read_requests(&self.input) {
            Ok(r) => r,
            Err(e) => {
                println!("❌ Failed to read batch input {}", self.input);
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let (config, service) = match open_service(config_path).await {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        let concurrency = self
            .concurrency
            .unwrap_or(config.simulation.batch_concurrency);

        println!(
            "🔍 Verifying {} requests ({} at a time)",
            requests.len(),
            concurrency
        );
        println!();

        let patient_ids: Vec<String> = requests.iter().map(|r| r.patient_id.to_string()).collect();
        let results = service.verify_batch(requests, concurrency).await;

        let mut summary = HistorySummary::new();
        let mut worst_exit = EXIT_OK;
        let mut failures: Vec<(String, EligoError)> = Vec::new();

        for (patient_id, result) in patient_ids.into_iter().zip(results) {
            match result {
                Ok(record) => {
                    println!("{}", format_record_row(&record));
                    summary.record(record.status);
                }
                Err(e) => {
                    worst_exit = worst_exit.max(exit_code_for(&e));
                    failures.push((patient_id, e));
                }
            }
        }

        println!();
        println!("📊 {summary}");
        if !failures.is_empty() {
            println!("❌ {} requests failed:", failures.len());
            for (patient_id, error) in &failures {
                println!("   {patient_id}: {error}");
            }
        }

        Ok(worst_exit)
    }
}

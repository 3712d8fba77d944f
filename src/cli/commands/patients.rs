//! Patients command implementation
//!
//! Read-only view of the patient registry.

use super::{exit_code_for, open_service, EXIT_OK};
use crate::domain::ids::PatientId;
use clap::Args;

/// Arguments for the patients command
#[derive(Args, Debug)]
pub struct PatientsArgs {
    /// Show a single patient
    #[arg(long)]
    pub patient_id: Option<PatientId>,

    /// Print patients as JSON
    #[arg(long)]
    pub json: bool,
}

impl PatientsArgs {
    /// Execute the patients command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (_config, service) = match open_service(config_path).await {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        let lookup = match &self.patient_id {
            Some(patient_id) => service
                .patient(patient_id)
                .await
                .map(|found| found.into_iter().collect::<Vec<_>>()),
            None => service.patients().await,
        };

        let patients = match lookup {
            Ok(p) => p,
            Err(e) => {
                println!("❌ Failed to load patients");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&patients)?);
            return Ok(EXIT_OK);
        }

        if patients.is_empty() {
            match &self.patient_id {
                Some(patient_id) => println!("Patient {patient_id} not found."),
                None => println!("No patients registered."),
            }
            return Ok(EXIT_OK);
        }

        println!("👤 Patients");
        println!();
        for patient in &patients {
            println!(
                "{:<16} {:<32} {}",
                patient.patient_id.as_str(),
                patient.name,
                patient.date_of_birth
            );
        }
        println!();
        println!("Total: {}", patients.len());

        Ok(EXIT_OK)
    }
}

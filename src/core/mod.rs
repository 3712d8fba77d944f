//! Core business logic for Eligo.
//!
//! # Modules
//!
//! - [`registry`] - One canonical record per patient identifier
//! - [`outcome`] - Simulated payer outcomes plus clock, id and random sources
//! - [`history`] - Append-only record of every check
//! - [`verification`] - The orchestrator tying the three together
//!
//! # Verification Workflow
//!
//! 1. **Reconcile**: register the patient or confirm the demographics match
//! 2. **Generate**: draw an outcome for the requested carrier
//! 3. **Record**: append the outcome to history
//!
//! # Example
//!
//! ```rust,no_run
//! use eligo::config::load_config;
//! use eligo::core::verification::EligibilityService;
//! use eligo::domain::VerificationRequest;
//! use chrono::NaiveDate;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("eligo.toml")?;
//! let service = EligibilityService::from_config(&config).await?;
//!
//! let request = VerificationRequest::new(
//!     "P1",
//!     "Jane Doe",
//!     NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
//! )?
//! .with_insurance_company("Cigna");
//!
//! let record = service.verify(&request).await?;
//! println!("{}: {}", record.eligibility_id, record.status);
//! # Ok(())
//! # }
//! ```

pub mod history;
pub mod outcome;
pub mod registry;
pub mod verification;

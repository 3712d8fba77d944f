// Eligo - Insurance Eligibility Verification Engine
// Copyright (c) 2025 Eligo Contributors
// Licensed under the MIT License

//! # Eligo - Insurance Eligibility Verification Engine
//!
//! Eligo answers "is this patient's insurance active for this service date?"
//! for a provider front desk. Payer responses are simulated: every check
//! draws an outcome from a fixed probability tree and is recorded in an
//! append-only history.
//!
//! ## Overview
//!
//! - **Registering** patients on first contact and rejecting later requests
//!   whose name or date of birth disagree with the stored record
//! - **Generating** Active (with coverage figures), Inactive or Unknown
//!   outcomes for the six recognized carriers
//! - **Recording** every completed check, queryable per patient or in full,
//!   newest first
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Registry, outcome generator, history and the orchestrator
//! - [`adapters`] - Storage backends (PostgreSQL, in-memory)
//! - [`domain`] - Identifiers, models and the error type
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use eligo::adapters::database::Storage;
//! use eligo::core::outcome::{OutcomeGenerator, StdRandomSource, SystemClock, TimeOrderedIdGenerator};
//! use eligo::core::verification::EligibilityService;
//! use eligo::domain::VerificationRequest;
//! use chrono::NaiveDate;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = OutcomeGenerator::new(
//!     Arc::new(SystemClock),
//!     Arc::new(TimeOrderedIdGenerator),
//!     Arc::new(StdRandomSource::seeded(42)),
//! );
//! let service = EligibilityService::with_storage(&Storage::in_memory(), generator);
//!
//! let request = VerificationRequest::new(
//!     "P123456",
//!     "John Doe",
//!     NaiveDate::from_ymd_opt(1985, 3, 15).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
//! )?
//! .with_insurance_company("Cigna")
//! .with_insurance_member_id("MBR001");
//!
//! let record = service.verify(&request).await?;
//! println!("{} -> {}", record.eligibility_id, record.status);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`]. Unknown and Inactive
//! outcomes are `Ok`; only a demographic conflict or a storage failure is
//! an [`domain::EligoError`]:
//!
//! ```rust,no_run
//! use eligo::domain::EligoError;
//!
//! fn report(error: &EligoError) {
//!     if error.is_conflict() {
//!         eprintln!("Patient data does not match: {error}");
//!     }
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;

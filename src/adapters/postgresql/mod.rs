//! PostgreSQL database integration
//!
//! Durable storage for patients and eligibility history.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgreSQLAdapter;
pub use client::PostgreSQLClient;
pub use models::{PostgreSQLEligibility, PostgreSQLPatient};

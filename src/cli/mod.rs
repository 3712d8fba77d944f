//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Eligo using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Eligo - Insurance Eligibility Verification Engine
#[derive(Parser, Debug)]
#[command(name = "eligo")]
#[command(version, about, long_about = None)]
#[command(author = "Eligo Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "eligo.toml", env = "ELIGO_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ELIGO_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify insurance eligibility for one patient
    Verify(commands::verify::VerifyArgs),

    /// Verify a JSON file of requests concurrently
    VerifyBatch(commands::verify_batch::VerifyBatchArgs),

    /// List recorded eligibility checks
    History(commands::history::HistoryArgs),

    /// List registered patients
    Patients(commands::patients::PatientsArgs),

    /// Create the database schema
    InitDb(commands::init_db::InitDbArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

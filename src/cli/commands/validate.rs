//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Eligo configuration file.

use super::{EXIT_CONFIG, EXIT_OK};
use crate::config::load_config;
use crate::config::schema::{DatabaseTarget, EligoConfig};
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

/// Human-readable summary lines for a loaded configuration
pub fn summarize(config: &EligoConfig) -> Vec<String> {
    let mut lines = vec![format!("  Log Level: {}", config.application.log_level)];

    match config.database_target {
        DatabaseTarget::PostgreSQL => {
            lines.push("  Database Target: PostgreSQL".to_string());
            if let Some(ref pg_config) = config.postgresql {
                lines.push(format!(
                    "  PostgreSQL Connection: {}",
                    pg_config.connection_string.expose_secret().redacted_location()
                ));
                lines.push(format!("  Max Connections: {}", pg_config.max_connections));
            }
        }
        DatabaseTarget::Memory => {
            lines.push("  Database Target: in-memory (not persisted)".to_string());
        }
    }

    lines.push(format!(
        "  Random Seed: {}",
        config
            .simulation
            .seed
            .map_or_else(|| "entropy".to_string(), |seed| seed.to_string())
    ));
    lines.push(format!(
        "  Batch Concurrency: {}",
        config.simulation.batch_concurrency
    ));
    lines.push(format!(
        "  File Logging: {}",
        if config.logging.local_enabled {
            config.logging.local_path.as_str()
        } else {
            "disabled"
        }
    ));
    lines
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        match load_config(config_path) {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                println!("Configuration Summary:");
                for line in summarize(&config) {
                    println!("{line}");
                }
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(EXIT_CONFIG)
            }
        }
    }
}

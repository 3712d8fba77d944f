//! Init-db command implementation
//!
//! Tests the storage connection and applies the schema.

use super::{exit_code_for, EXIT_CONFIG, EXIT_OK};
use crate::adapters::database::create_storage;
use crate::config::load_config;
use clap::Args;

/// Arguments for the init-db command
#[derive(Args, Debug)]
pub struct InitDbArgs {}

impl InitDbArgs {
    /// Execute the init-db command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Initializing database schema");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let storage = match create_storage(&config).await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to create storage client");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if let Err(e) = storage.client.test_connection().await {
            println!("❌ Failed to connect to {}", storage.client.database_name());
            println!("   Error: {e}");
            return Ok(exit_code_for(&e));
        }
        println!("✅ Connected to {}", storage.client.database_name());

        match storage.client.ensure_schema().await {
            Ok(()) => {
                println!("✅ Schema is up to date");
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to apply schema");
                println!("   Error: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}

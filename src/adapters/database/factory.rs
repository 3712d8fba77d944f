//! Storage factory
//!
//! This module provides factory functions to create storage backends based on configuration.

use crate::adapters::database::traits::{DatabaseClient, HistoryStorage, PatientStore};
use crate::adapters::memory::MemoryAdapter;
use crate::adapters::postgresql::adapter::PostgreSQLAdapter;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::config::schema::{DatabaseTarget, EligoConfig, PostgreSQLConfig};
use crate::domain::{EligoError, Result};
use std::sync::Arc;

/// One backend seen through each of its roles
///
/// All three handles share the same adapter, and so the same connection pool.
#[derive(Clone)]
pub struct Storage {
    pub client: Arc<dyn DatabaseClient>,
    pub patients: Arc<dyn PatientStore>,
    pub history: Arc<dyn HistoryStorage>,
}

impl Storage {
    /// Storage backed by a fresh in-memory adapter
    pub fn in_memory() -> Self {
        Self::from_adapter(Arc::new(MemoryAdapter::new()))
    }

    /// Wraps a single adapter implementing every storage role
    pub fn from_adapter<A>(adapter: Arc<A>) -> Self
    where
        A: DatabaseClient + PatientStore + HistoryStorage + 'static,
    {
        Self {
            client: adapter.clone(),
            patients: adapter.clone(),
            history: adapter,
        }
    }
}

fn postgresql_section(config: &EligoConfig) -> Result<&PostgreSQLConfig> {
    config.postgresql.as_ref().ok_or_else(|| {
        EligoError::Configuration(
            "postgresql configuration is required when database_target = 'postgresql'"
                .to_string(),
        )
    })
}

/// Create a database client based on the configuration
///
/// # Errors
///
/// Returns an error if the client cannot be created
pub async fn create_database_client(config: &EligoConfig) -> Result<Arc<dyn DatabaseClient>> {
    Ok(create_storage(config).await?.client)
}

/// Create the storage handles for the configured backend
///
/// # Errors
///
/// Returns an error if the PostgreSQL section is missing or the pool
/// cannot be built
pub async fn create_storage(config: &EligoConfig) -> Result<Storage> {
    match config.database_target {
        DatabaseTarget::PostgreSQL => {
            let pg_config = postgresql_section(config)?;

            tracing::info!("Creating PostgreSQL storage");
            let client = Arc::new(PostgreSQLClient::new(pg_config.clone()).await?);
            Ok(Storage::from_adapter(Arc::new(PostgreSQLAdapter::new_with_arc(
                client,
            ))))
        }
        DatabaseTarget::Memory => {
            tracing::info!("Creating in-memory storage");
            Ok(Storage::in_memory())
        }
    }
}

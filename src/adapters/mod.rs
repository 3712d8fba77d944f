//! Storage integrations for Eligo.
//!
//! - [`database`] - Storage traits and the backend factory
//! - [`postgresql`] - PostgreSQL implementation
//! - [`memory`] - In-memory implementation for local runs and tests
//!
//! # Design Pattern
//!
//! Adapters isolate the storage dependency behind traits so the registry,
//! the history store and the orchestrator never name a concrete backend.
//!
//! ```rust
//! use eligo::adapters::database::Storage;
//!
//! # async fn example() -> eligo::domain::Result<()> {
//! let storage = Storage::in_memory();
//! storage.client.test_connection().await?;
//! assert_eq!(storage.client.database_name(), "memory");
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod memory;
pub mod postgresql;

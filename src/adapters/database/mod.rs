//! Database abstraction layer
//!
//! This module provides a trait-based abstraction for storage operations,
//! allowing Eligo to run against PostgreSQL or an in-memory store.

pub mod factory;
pub mod traits;

pub use factory::{create_database_client, create_storage, Storage};
pub use traits::{DatabaseClient, HistoryStorage, PatientInsert, PatientStore};

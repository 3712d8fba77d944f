//! In-memory storage backend

pub mod adapter;

pub use adapter::MemoryAdapter;

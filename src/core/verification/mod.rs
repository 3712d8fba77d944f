//! Verification orchestration

pub mod service;

pub use service::EligibilityService;

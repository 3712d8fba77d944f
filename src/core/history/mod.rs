//! Eligibility history: storage front, filtering and summaries

pub mod filter;
pub mod store;
pub mod summary;

pub use filter::HistoryFilter;
pub use store::HistoryStore;
pub use summary::HistorySummary;

//! Eligibility identifier generation

use crate::domain::ids::EligibilityId;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Produces a fresh, unique eligibility identifier per call
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> EligibilityId;
}

/// `ELG-` followed by a UUIDv7, so identifiers sort by creation time
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeOrderedIdGenerator;

impl IdGenerator for TimeOrderedIdGenerator {
    fn next_id(&self) -> EligibilityId {
        EligibilityId::from_suffix(Uuid::now_v7())
    }
}

/// `ELG-00000001`, `ELG-00000002`, ...
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> EligibilityId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        EligibilityId::from_suffix(format!("{n:08}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_time_ordered_ids_are_unique() {
        let generator = TimeOrderedIdGenerator;
        let ids: Vec<EligibilityId> = (0..200).map(|_| generator.next_id()).collect();

        let unique: HashSet<&str> = ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.iter().all(|id| id.as_str().starts_with("ELG-")));
    }

    #[test]
    fn test_sequential_ids() {
        let generator = SequentialIdGenerator::new();
        assert_eq!(generator.next_id().as_str(), "ELG-00000001");
        assert_eq!(generator.next_id().as_str(), "ELG-00000002");
    }
}

//! Concurrent registration of the same patient identifier

use chrono::{NaiveDate, Utc};
use eligo::adapters::memory::MemoryAdapter;
use eligo::core::outcome::{FixedClock, OutcomeGenerator, SequentialIdGenerator, StdRandomSource};
use eligo::core::registry::PatientRegistry;
use eligo::core::verification::EligibilityService;
use eligo::domain::{ConflictField, EligoError, Patient, PatientId, VerificationRequest};
use fake::faker::name::en::Name;
use fake::Fake;
use std::sync::Arc;

const WRITERS: usize = 32;

fn dob() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
}

/// Distinct names so every writer disagrees with every other
fn divergent_names() -> Vec<String> {
    (0..WRITERS)
        .map(|i| format!("{} {i}", Name().fake::<String>()))
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_exactly_one_divergent_writer_wins() {
    let store = Arc::new(MemoryAdapter::new());
    let registry = PatientRegistry::new(store.clone());

    let handles: Vec<_> = divergent_names()
        .into_iter()
        .map(|name| {
            let registry = registry.clone();
            tokio::spawn(async move {
                let patient = Patient::new(PatientId::new("P-RACE").unwrap(), name, dob()).unwrap();
                registry.reconcile(&patient).await.map(|()| patient)
            })
        })
        .collect();

    let mut winners = Vec::new();
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(patient) => winners.push(patient),
            Err(EligoError::Conflict(conflict)) => {
                assert_eq!(conflict.field, ConflictField::Name);
                conflicts += 1;
            }
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(winners.len(), 1);
    assert_eq!(conflicts, WRITERS - 1);

    let stored = registry
        .find(&PatientId::new("P-RACE").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, winners[0]);
    assert_eq!(store.patient_count().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_identical_concurrent_writers_all_succeed() {
    let store = Arc::new(MemoryAdapter::new());
    let registry = PatientRegistry::new(store.clone());
    let name: String = Name().fake();

    let handles: Vec<_> = (0..WRITERS)
        .map(|_| {
            let registry = registry.clone();
            let name = name.clone();
            tokio::spawn(async move {
                let patient = Patient::new(PatientId::new("P-SAME").unwrap(), name, dob()).unwrap();
                registry.reconcile(&patient).await
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
    assert_eq!(store.patient_count().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_batch_with_racing_registrations_records_only_winners() {
    let store = Arc::new(MemoryAdapter::new());
    let generator = OutcomeGenerator::new(
        Arc::new(FixedClock::new(Utc::now())),
        Arc::new(SequentialIdGenerator::new()),
        Arc::new(StdRandomSource::seeded(3)),
    );
    let service = EligibilityService::new(store.clone(), store.clone(), generator);

    let requests: Vec<_> = divergent_names()
        .into_iter()
        .map(|name| {
            VerificationRequest::new("P-BATCH", name, dob(), dob())
                .unwrap()
                .with_insurance_company("Cigna")
        })
        .collect();

    let results = service.verify_batch(requests, 8).await;

    assert_eq!(results.len(), WRITERS);
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(EligoError::is_conflict));
    assert_eq!(store.record_count().await, 1);
}

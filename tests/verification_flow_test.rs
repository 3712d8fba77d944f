//! End-to-end verification flows over the in-memory backend

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use eligo::adapters::database::{HistoryStorage, PatientStore};
use eligo::adapters::memory::MemoryAdapter;
use eligo::core::outcome::{
    FixedClock, OutcomeGenerator, ScriptedRandomSource, SequentialIdGenerator,
};
use eligo::core::verification::EligibilityService;
use eligo::domain::{
    ConflictField, EligibilityRecord, EligibilityStatus, EligoError, PatientId, Result,
    VerificationRequest,
};
use std::sync::Arc;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn request(id: &str, name: &str, dob: NaiveDate, company: &str) -> VerificationRequest {
    VerificationRequest::new(id, name, dob, date(2024, 2, 1))
        .unwrap()
        .with_insurance_member_id("MBR001")
        .with_insurance_company(company)
}

struct Harness {
    service: EligibilityService,
    store: Arc<MemoryAdapter>,
    clock: Arc<FixedClock>,
    random: Arc<ScriptedRandomSource>,
}

fn harness(draw: f64) -> Harness {
    let store = Arc::new(MemoryAdapter::new());
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap(),
    ));
    let random = Arc::new(ScriptedRandomSource::constant(draw).unwrap());
    let generator = OutcomeGenerator::new(
        clock.clone(),
        Arc::new(SequentialIdGenerator::new()),
        random.clone(),
    );
    let service = EligibilityService::new(store.clone(), store.clone(), generator);
    Harness {
        service,
        store,
        clock,
        random,
    }
}

#[tokio::test]
async fn test_active_verification_end_to_end() {
    let h = harness(0.10);
    let jane = request("P1", "Jane Doe", date(1990, 1, 1), "Cigna");

    let record = h.service.verify(&jane).await.expect("verification failed");

    assert_eq!(record.status, EligibilityStatus::Active);
    assert!(record.errors.is_empty());
    assert_eq!(record.service_date, date(2024, 2, 1));
    assert_eq!(record.insurance_company.as_deref(), Some("Cigna"));
    assert_eq!(record.insurance_member_id.as_deref(), Some("MBR001"));

    let coverage = record.coverage.expect("active record carries coverage");
    assert_eq!(coverage.deductible, 750.00);
    assert_eq!(coverage.deductible_met, 75.00);
    assert_eq!(coverage.copay, 14.00);
    assert_eq!(coverage.out_of_pocket_max, 3500.00);
    assert_eq!(coverage.out_of_pocket_met, 350.00);

    let history = h
        .service
        .history_for(&PatientId::new("P1").unwrap())
        .await
        .unwrap();
    assert_eq!(history, vec![record]);
    assert_eq!(h.store.patient_count().await, 1);
}

#[tokio::test]
async fn test_same_demographics_different_insurance_is_not_a_conflict() {
    let h = harness(0.10);

    h.service
        .verify(&request("P1", "Jane Doe", date(1990, 1, 1), "Cigna"))
        .await
        .unwrap();
    let second = h
        .service
        .verify(&request("P1", "Jane Doe", date(1990, 1, 1), "Kaiser Permanente"))
        .await
        .unwrap();

    assert_eq!(second.insurance_company.as_deref(), Some("Kaiser Permanente"));
    assert_eq!(h.store.patient_count().await, 1);
    assert_eq!(h.store.record_count().await, 2);
}

#[tokio::test]
async fn test_conflicting_dob_leaves_state_untouched() {
    let h = harness(0.10);

    h.service
        .verify(&request("P1", "Jane Doe", date(1990, 1, 1), "Cigna"))
        .await
        .unwrap();
    let draws_before = h.random.draws_taken();

    let err = h
        .service
        .verify(&request("P1", "Jane Doe", date(1991, 1, 1), "Cigna"))
        .await
        .unwrap_err();

    match err {
        EligoError::Conflict(conflict) => {
            assert_eq!(conflict.field, ConflictField::DateOfBirth);
            assert_eq!(conflict.patient_id.as_str(), "P1");
        }
        other => panic!("expected conflict, got {other:?}"),
    }

    assert_eq!(h.random.draws_taken(), draws_before);
    assert_eq!(h.store.record_count().await, 1);

    let stored = h
        .service
        .patient(&PatientId::new("P1").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.date_of_birth, date(1990, 1, 1));
}

#[tokio::test]
async fn test_conflicting_name_is_reported() {
    let h = harness(0.10);

    h.service
        .verify(&request("P1", "Jane Doe", date(1990, 1, 1), "Cigna"))
        .await
        .unwrap();
    let err = h
        .service
        .verify(&request("P1", "Janet Doe", date(1990, 1, 1), "Cigna"))
        .await
        .unwrap_err();

    assert!(err.is_conflict());
    assert!(err.to_string().contains("P1"));
}

#[tokio::test]
async fn test_registration_is_idempotent() {
    let h = harness(0.10);
    let jane = request("P1", "Jane Doe", date(1990, 1, 1), "Cigna");

    for _ in 0..3 {
        h.service.verify(&jane).await.unwrap();
    }

    assert_eq!(h.service.patients().await.unwrap().len(), 1);
    assert_eq!(h.store.record_count().await, 3);
}

#[tokio::test]
async fn test_unrecognized_carrier_yields_unknown() {
    let h = harness(0.10);

    let record = h
        .service
        .verify(&request("P2", "John Roe", date(1985, 6, 15), "Acme Mutual"))
        .await
        .unwrap();

    assert_eq!(record.status, EligibilityStatus::Unknown);
    assert!(record.coverage.is_none());
    assert_eq!(record.errors.len(), 1);
    assert_eq!(record.errors[0].code, "UNKNOWN_INSURANCE");
    assert_eq!(h.random.draws_taken(), 0);
    assert_eq!(h.store.record_count().await, 1);
}

#[tokio::test]
async fn test_missing_company_yields_unknown() {
    let h = harness(0.10);
    let no_company = VerificationRequest::new("P3", "Ann Lee", date(2000, 3, 3), date(2024, 2, 1))
        .unwrap();

    let record = h.service.verify(&no_company).await.unwrap();

    assert_eq!(record.status, EligibilityStatus::Unknown);
    assert_eq!(record.errors[0].code, "UNKNOWN_INSURANCE");
}

#[tokio::test]
async fn test_history_newest_first() {
    let h = harness(0.10);
    let jane = request("P1", "Jane Doe", date(1990, 1, 1), "Cigna");

    let mut expected = Vec::new();
    for _ in 0..3 {
        expected.push(h.service.verify(&jane).await.unwrap().eligibility_id);
        h.clock.advance(Duration::minutes(5));
    }
    expected.reverse();

    let history = h
        .service
        .history_for(&PatientId::new("P1").unwrap())
        .await
        .unwrap();
    let ids: Vec<_> = history.iter().map(|r| r.eligibility_id.clone()).collect();
    assert_eq!(ids, expected);
    assert!(history
        .windows(2)
        .all(|pair| pair[0].checked_at > pair[1].checked_at));
}

#[tokio::test]
async fn test_history_for_unknown_patient_is_empty() {
    let h = harness(0.10);
    let history = h
        .service
        .history_for(&PatientId::new("NOBODY").unwrap())
        .await
        .unwrap();
    assert!(history.is_empty());
}

/// History backend whose writes always fail
struct FailingHistory;

#[async_trait]
impl HistoryStorage for FailingHistory {
    async fn append_record(&self, _record: &EligibilityRecord) -> Result<()> {
        Err(EligoError::Database("disk full".to_string()))
    }

    async fn records_for_patient(&self, _patient_id: &PatientId) -> Result<Vec<EligibilityRecord>> {
        Ok(Vec::new())
    }

    async fn all_records(&self) -> Result<Vec<EligibilityRecord>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_failed_append_is_propagated() {
    let patients = Arc::new(MemoryAdapter::new());
    let generator = OutcomeGenerator::new(
        Arc::new(FixedClock::new(Utc::now())),
        Arc::new(SequentialIdGenerator::new()),
        Arc::new(ScriptedRandomSource::constant(0.10).unwrap()),
    );
    let service = EligibilityService::new(
        patients.clone() as Arc<dyn PatientStore>,
        Arc::new(FailingHistory),
        generator,
    );

    let err = service
        .verify(&request("P1", "Jane Doe", date(1990, 1, 1), "Cigna"))
        .await
        .unwrap_err();

    assert!(err.is_storage());
    assert!(err.to_string().contains("disk full"));
}

//! Simulated payer outcome generation
//!
//! Draws from a fixed probability tree:
//!
//! | Branch                         | Probability | Status   |
//! |--------------------------------|-------------|----------|
//! | carrier not recognized         | (no draw)   | Unknown  |
//! | `100u < 75`                    | 75%         | Active   |
//! | then `100u < 10`               | 2.5%        | Unknown  |
//! | then `10 <= 100u < 30`         | 5%          | Unknown  |
//! | otherwise                      | 17.5%       | Inactive |

use super::clock::Clock;
use super::id_gen::IdGenerator;
use super::random::RandomSource;
use crate::domain::{
    round_cents, CatalogError, Coverage, EligibilityRecord, EligibilityStatus, ErrorCategory,
    InsuranceCarrier, VerificationRequest,
};
use std::sync::Arc;

/// Percent threshold below which the first draw yields Active coverage
pub const ACTIVE_THRESHOLD: f64 = 75.0;

/// Percent threshold below which the second draw yields a payer API failure
pub const API_FAILURE_THRESHOLD: f64 = 10.0;

/// Percent threshold below which the second draw yields a verification issue
pub const VERIFICATION_ISSUE_THRESHOLD: f64 = 30.0;

/// Produces one eligibility record per request; never fails
#[derive(Clone)]
pub struct OutcomeGenerator {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    random: Arc<dyn RandomSource>,
}

impl OutcomeGenerator {
    pub fn new(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self { clock, ids, random }
    }

    /// Generates the outcome for a request
    pub fn generate(&self, request: &VerificationRequest) -> EligibilityRecord {
        let eligibility_id = self.ids.next_id();
        let checked_at = self.clock.now();

        let recognized = request
            .insurance_company
            .as_deref()
            .and_then(InsuranceCarrier::recognize);

        let (status, coverage, error) = match recognized {
            None => (
                EligibilityStatus::Unknown,
                None,
                Some(CatalogError::UnknownInsurance),
            ),
            Some(_) => self.sample_outcome(),
        };

        EligibilityRecord {
            eligibility_id,
            patient_id: request.patient_id.clone(),
            checked_at,
            insurance_member_id: request.insurance_member_id.clone(),
            insurance_company: request.insurance_company.clone(),
            service_date: request.service_date,
            status,
            coverage,
            errors: error.into_iter().map(Into::into).collect(),
        }
    }

    fn sample_outcome(&self) -> (EligibilityStatus, Option<Coverage>, Option<CatalogError>) {
        if self.percent() < ACTIVE_THRESHOLD {
            return (EligibilityStatus::Active, Some(self.sample_coverage()), None);
        }

        let p2 = self.percent();
        if p2 < API_FAILURE_THRESHOLD {
            (
                EligibilityStatus::Unknown,
                None,
                Some(self.pick(ErrorCategory::ApiFailure)),
            )
        } else if p2 < VERIFICATION_ISSUE_THRESHOLD {
            (
                EligibilityStatus::Unknown,
                None,
                Some(self.pick(ErrorCategory::VerificationIssue)),
            )
        } else {
            (
                EligibilityStatus::Inactive,
                None,
                Some(self.pick(ErrorCategory::NotEligible)),
            )
        }
    }

    /// Met amounts are drawn against the rounded totals
    fn sample_coverage(&self) -> Coverage {
        let deductible = self.uniform(500.0, 3000.0);
        let deductible_met = self.uniform(0.0, deductible);
        let copay = self.uniform(10.0, 50.0);
        let out_of_pocket_max = self.uniform(3000.0, 8000.0);
        let out_of_pocket_met = self.uniform(0.0, out_of_pocket_max);

        Coverage {
            deductible,
            deductible_met,
            copay,
            out_of_pocket_max,
            out_of_pocket_met,
        }
    }

    fn pick(&self, category: ErrorCategory) -> CatalogError {
        let errors = category.errors();
        let index = (self.random.next_unit() * errors.len() as f64).floor() as usize;
        errors[index.min(errors.len() - 1)]
    }

    fn percent(&self) -> f64 {
        self.random.next_unit() * 100.0
    }

    /// `min + u * (max - min)`, rounded to cents; never exceeds `max`
    fn uniform(&self, min: f64, max: f64) -> f64 {
        round_cents(min + self.random.next_unit() * (max - min)).min(max)
    }
}

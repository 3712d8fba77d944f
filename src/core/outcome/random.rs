//! Uniform random draws in `[0, 1)`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Source of uniform draws `u` with `0 <= u < 1`
pub trait RandomSource: Send + Sync {
    fn next_unit(&self) -> f64;
}

/// `StdRng` behind a mutex so one source serves concurrent requests
#[derive(Debug)]
pub struct StdRandomSource {
    rng: Mutex<StdRng>,
}

impl StdRandomSource {
    /// Seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for StdRandomSource {
    fn next_unit(&self) -> f64 {
        self.rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .gen::<f64>()
    }
}

/// Replays a fixed list of draws, wrapping around at the end
#[derive(Debug)]
pub struct ScriptedRandomSource {
    draws: Vec<f64>,
    cursor: AtomicUsize,
}

impl ScriptedRandomSource {
    /// # Errors
    ///
    /// Returns an error if the list is empty or a draw lies outside `[0, 1)`.
    pub fn new(draws: Vec<f64>) -> Result<Self, String> {
        if draws.is_empty() {
            return Err("Scripted random source needs at least one draw".to_string());
        }
        if let Some(bad) = draws.iter().find(|u| !(0.0..1.0).contains(*u)) {
            return Err(format!("Scripted draw {bad} is outside [0, 1)"));
        }
        Ok(Self {
            draws,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Source that always yields `u`
    ///
    /// # Errors
    ///
    /// Returns an error if `u` lies outside `[0, 1)`.
    pub fn constant(u: f64) -> Result<Self, String> {
        Self::new(vec![u])
    }

    /// Number of draws consumed so far
    pub fn draws_taken(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

impl RandomSource for ScriptedRandomSource {
    fn next_unit(&self) -> f64 {
        let position = self.cursor.fetch_add(1, Ordering::SeqCst);
        self.draws[position % self.draws.len()]
    }
}

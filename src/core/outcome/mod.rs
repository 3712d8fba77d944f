//! Outcome generation
//!
//! The generator and the three sources it depends on. Time, identifiers
//! and randomness are injected as trait objects so tests can pin them.

pub mod clock;
pub mod generator;
pub mod id_gen;
pub mod random;

pub use clock::{Clock, FixedClock, SystemClock};
pub use generator::OutcomeGenerator;
pub use id_gen::{IdGenerator, SequentialIdGenerator, TimeOrderedIdGenerator};
pub use random::{RandomSource, ScriptedRandomSource, StdRandomSource};

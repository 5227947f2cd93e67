//! Procedural round generation
//!
//! A round is a start score, two candidate paths of concept symbols, and a
//! target score. Rounds are produced by rejection sampling:
//! - [`RoundGenerator`] samples an unvalidated candidate
//! - [`RoundValidator`] decides whether a candidate is well formed for a phase
//! - [`RoundFactory`] loops the two under a fixed retry budget

pub mod config;
pub mod factory;
pub mod generator;
pub mod validator;

pub use config::{PathLabel, PathSpec, RoundConfig, RoundRecord};
pub use factory::{DEFAULT_RETRY_BUDGET, RoundFactory};
pub use generator::RoundGenerator;
pub use validator::{MIN_COVERAGE_ORDINAL, Rejection, RoundValidator, required_ordinals};

/// Lowest start value and path end a round may use.
pub const SCORE_MIN: i32 = -10;
/// Highest start value and path end a round may use.
pub const SCORE_MAX: i32 = 10;

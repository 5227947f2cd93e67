//! Participant port - abstraction over whoever makes the path choice
//!
//! Once a path is chosen every later step is forced, so a participant makes
//! exactly one real decision per round. Simulated participants implement
//! this trait to drive sessions without a human.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    concept::ConceptSymbol,
    round::{PathLabel, RoundConfig},
};

/// What a participant can see of a round: no path ends, no target path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundView {
    pub start: i32,
    pub target: i32,
    pub path_a: Vec<ConceptSymbol>,
    pub path_b: Vec<ConceptSymbol>,
}

impl RoundView {
    pub fn sequence(&self, path: PathLabel) -> &[ConceptSymbol] {
        match path {
            PathLabel::A => &self.path_a,
            PathLabel::B => &self.path_b,
        }
    }
}

impl From<&RoundConfig> for RoundView {
    fn from(config: &RoundConfig) -> Self {
        Self {
            start: config.start,
            target: config.target,
            path_a: config.path_a.sequence.clone(),
            path_b: config.path_b.sequence.clone(),
        }
    }
}

/// Participant trait - one decision per round
pub trait Participant: Send {
    /// Pick the path to commit to.
    fn choose_path(&mut self, view: &RoundView) -> Result<PathLabel>;

    /// Get the participant's name.
    ///
    /// Used for identification in reports and logging.
    fn name(&self) -> &str;

    /// Seed the participant's internal random number generator.
    ///
    /// Simulation pipelines call this with a deterministic seed so runs are
    /// reproducible. Deterministic participants can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}

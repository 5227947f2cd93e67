//! Configuration types for session creation.

use std::collections::HashMap;

use tracing::warn;

use crate::{
    Result,
    curriculum::{CurriculumConfig, Orientation},
    round::DEFAULT_RETRY_BUDGET,
    traversal::TraversalTimings,
};

/// Configuration for creating a session.
///
/// Builder-style API covering everything a session reads once at start.
///
/// # Examples
///
/// ```
/// use pathtask::app::SessionConfig;
/// use pathtask::curriculum::Orientation;
/// use pathtask::traversal::TraversalTimings;
///
/// let config = SessionConfig::new(Orientation::Strategy)
///     .with_seed(42)
///     .with_timings(TraversalTimings::immediate());
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Training segment orientation
    pub orientation: Orientation,
    /// Segment sizes
    pub curriculum: CurriculumConfig,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Generate/validate cycles per round before giving up
    pub retry_budget: usize,
    /// Presentation delays
    pub timings: TraversalTimings,
    /// Identifier stamped on every persisted round
    pub session_id: Option<String>,
}

impl SessionConfig {
    /// Create a new session configuration with the given orientation.
    ///
    /// Uses default values for other parameters:
    /// - Curriculum: 32 training, 8 test, 8 transfer rounds
    /// - Retry budget: 26 attempts
    /// - Timings: the standard presentation delays
    /// - Seed: None (non-deterministic)
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            curriculum: CurriculumConfig::default(),
            seed: None,
            retry_budget: DEFAULT_RETRY_BUDGET,
            timings: TraversalTimings::default(),
            session_id: None,
        }
    }

    /// Read the orientation from host-provided key-value parameters.
    ///
    /// A missing or empty `CT` parameter falls back to the default
    /// orientation.
    ///
    /// # Errors
    ///
    /// Returns an error if `CT` holds an unknown orientation.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self> {
        let orientation = match params
            .get(Orientation::PARAM_KEY)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
        {
            Some(value) => value.parse()?,
            None => {
                let fallback = Orientation::default();
                warn!(
                    key = Orientation::PARAM_KEY,
                    %fallback,
                    "curriculum orientation not provided, using default"
                );
                fallback
            }
        };
        Ok(Self::new(orientation))
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the presentation delays.
    pub fn with_timings(mut self, timings: TraversalTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Set the retry budget.
    pub fn with_retry_budget(mut self, retry_budget: usize) -> Self {
        self.retry_budget = retry_budget;
        self
    }

    /// Set the curriculum segment sizes.
    pub fn with_curriculum(mut self, curriculum: CurriculumConfig) -> Self {
        self.curriculum = curriculum;
        self
    }

    /// Set the session identifier.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(Orientation::default())
    }
}

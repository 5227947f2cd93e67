//! Rejection-sampling round factory

use rand::Rng;
use tracing::{debug, warn};

use super::{config::RoundConfig, generator::RoundGenerator, validator::RoundValidator};
use crate::{Error, Result, concept::ConceptTable, curriculum::Phase};

/// Number of generate/validate cycles tried before giving up.
pub const DEFAULT_RETRY_BUDGET: usize = 26;

/// Combines the generator and validator into one accepted round.
#[derive(Debug, Clone)]
pub struct RoundFactory {
    generator: RoundGenerator,
    validator: RoundValidator,
    retry_budget: usize,
}

impl RoundFactory {
    pub fn new(table: ConceptTable) -> Self {
        Self {
            generator: RoundGenerator::new(table.clone()),
            validator: RoundValidator::new(table),
            retry_budget: DEFAULT_RETRY_BUDGET,
        }
    }

    /// Override the number of attempts (at least one attempt is always made).
    pub fn with_retry_budget(mut self, retry_budget: usize) -> Self {
        self.retry_budget = retry_budget.max(1);
        self
    }

    pub fn retry_budget(&self) -> usize {
        self.retry_budget
    }

    pub fn table(&self) -> &ConceptTable {
        self.generator.table()
    }

    /// Create a round valid for `phase`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLevels`] for levels the concept table cannot
    /// express, and [`Error::RoundGenerationExhausted`] when no candidate
    /// validates within the retry budget. No partial round is ever returned.
    pub fn create<R: Rng + ?Sized>(
        &self,
        concept_level: usize,
        strategy_level: usize,
        phase: Phase,
        rng: &mut R,
    ) -> Result<RoundConfig> {
        let max_level = self.table().max_concept_level();
        if concept_level == 0 || concept_level > max_level || strategy_level == 0 {
            return Err(Error::InvalidLevels {
                concept_level,
                strategy_level,
            });
        }

        for attempt in 0..self.retry_budget {
            let candidate = self.generator.generate(concept_level, strategy_level, rng);
            match self.validator.check(&candidate, phase) {
                Ok(()) => {
                    debug!(
                        attempt,
                        concept_level,
                        strategy_level,
                        %phase,
                        round = %candidate.describe(),
                        "accepted round"
                    );
                    return Ok(candidate);
                }
                Err(reason) => {
                    debug!(attempt, %reason, "rejected candidate round");
                }
            }
        }

        warn!(
            concept_level,
            strategy_level,
            %phase,
            attempts = self.retry_budget,
            "round generation exhausted its retry budget"
        );
        Err(Error::RoundGenerationExhausted {
            concept_level,
            strategy_level,
            attempts: self.retry_budget,
        })
    }
}

impl Default for RoundFactory {
    fn default() -> Self {
        Self::new(ConceptTable::standard())
    }
}

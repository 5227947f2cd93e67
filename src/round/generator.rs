//! Candidate round sampling

use rand::Rng;

use super::{
    SCORE_MAX, SCORE_MIN,
    config::{PathLabel, PathSpec, RoundConfig},
};
use crate::concept::{ConceptSymbol, ConceptTable};

/// Samples unvalidated candidate rounds from a concept table.
#[derive(Debug, Clone, Default)]
pub struct RoundGenerator {
    table: ConceptTable,
}

impl RoundGenerator {
    pub fn new(table: ConceptTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ConceptTable {
        &self.table
    }

    /// Sample a candidate round.
    ///
    /// The concept universe is the first `concept_level + 1` symbols. Each
    /// path draws `strategy_level` symbols from it with replacement. One
    /// path is picked as the target path and keeps that label; if its end
    /// equals the start, the target value comes from the other path instead.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        concept_level: usize,
        strategy_level: usize,
        rng: &mut R,
    ) -> RoundConfig {
        let universe = self.table.universe(concept_level);

        let start = rng.random_range(SCORE_MIN..=SCORE_MAX);
        let sequence_a = sample_sequence(universe, strategy_level, rng);
        let sequence_b = sample_sequence(universe, strategy_level, rng);

        let path_a = PathSpec::new(sequence_a.clone(), self.table.fold(start, &sequence_a));
        let path_b = PathSpec::new(sequence_b.clone(), self.table.fold(start, &sequence_b));

        let sampled = if rng.random_bool(0.5) {
            PathLabel::A
        } else {
            PathLabel::B
        };
        let mut config = RoundConfig {
            start,
            concept_level,
            strategy_level,
            path_a,
            path_b,
            target_path: sampled,
            target: 0,
            score: start,
            final_score: None,
            is_correct: None,
            start_time: None,
            end_time: None,
        };

        config.target = config.path(config.target_source()).end;

        config
    }
}

fn sample_sequence<R: Rng + ?Sized>(
    universe: &[ConceptSymbol],
    length: usize,
    rng: &mut R,
) -> Vec<ConceptSymbol> {
    (0..length)
        .map(|_| universe[rng.random_range(0..universe.len())])
        .collect()
}

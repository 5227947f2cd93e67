//! Accuracy statistics for completed rounds

use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};
use statrs::distribution::{Binomial, DiscreteCDF};

use crate::{
    Error, Result,
    curriculum::{Orientation, Phase},
};

/// Probability of picking the target path by guessing
pub const CHANCE_ACCURACY: f64 = 0.5;

/// One-sided binomial p-value: P(X >= correct) when X ~ Bin(rounds, chance).
///
/// # Errors
///
/// Returns an error if `chance` is not a probability.
pub fn binomial_p_value(correct: usize, rounds: usize, chance: f64) -> Result<f64> {
    if correct == 0 {
        return Ok(1.0);
    }
    let distribution =
        Binomial::new(chance, rounds as u64).map_err(|e| Error::Statistics {
            message: e.to_string(),
        })?;
    Ok(distribution.sf(correct as u64 - 1))
}

/// Running count of correct rounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub rounds: usize,
    pub correct: usize,
}

impl Tally {
    pub fn record(&mut self, is_correct: bool) {
        self.rounds += 1;
        if is_correct {
            self.correct += 1;
        }
    }

    pub fn accuracy(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.correct as f64 / self.rounds as f64
        }
    }
}

/// Outcomes grouped by phase and by difficulty
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    pub by_phase: BTreeMap<Phase, Tally>,
    /// Keyed by `(concept_level, strategy_level)`
    pub by_level: BTreeMap<(usize, usize), Tally>,
}

impl OutcomeTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        phase: Phase,
        concept_level: usize,
        strategy_level: usize,
        is_correct: bool,
    ) {
        self.by_phase.entry(phase).or_default().record(is_correct);
        self.by_level
            .entry((concept_level, strategy_level))
            .or_default()
            .record(is_correct);
    }

    pub fn overall(&self) -> Tally {
        self.by_phase.values().fold(Tally::default(), |acc, t| Tally {
            rounds: acc.rounds + t.rounds,
            correct: acc.correct + t.correct,
        })
    }
}

/// Accuracy of one group of rounds against chance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccuracySummary {
    pub label: String,
    pub rounds: usize,
    pub correct: usize,
    pub accuracy: f64,
    /// One-sided p-value against [`CHANCE_ACCURACY`]
    pub p_value: f64,
}

impl AccuracySummary {
    pub fn from_tally(label: impl Into<String>, tally: Tally) -> Result<Self> {
        Ok(Self {
            label: label.into(),
            rounds: tally.rounds,
            correct: tally.correct,
            accuracy: tally.accuracy(),
            p_value: binomial_p_value(tally.correct, tally.rounds, CHANCE_ACCURACY)?,
        })
    }
}

/// Result of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub participant: String,
    pub orientation: Orientation,
    pub sessions: usize,
    /// Sessions stopped by a round generation failure
    pub aborted_sessions: usize,
    pub overall: AccuracySummary,
    pub phases: Vec<AccuracySummary>,
    pub levels: Vec<AccuracySummary>,
}

impl SimulationReport {
    pub fn new(
        participant: String,
        orientation: Orientation,
        sessions: usize,
        aborted_sessions: usize,
        tally: &OutcomeTally,
    ) -> Result<Self> {
        let phases = tally
            .by_phase
            .iter()
            .map(|(phase, t)| AccuracySummary::from_tally(phase.label(), *t))
            .collect::<Result<Vec<_>>>()?;
        let levels = tally
            .by_level
            .iter()
            .map(|((concept, strategy), t)| {
                AccuracySummary::from_tally(format!("c{concept}/s{strategy}"), *t)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            participant,
            orientation,
            sessions,
            aborted_sessions,
            overall: AccuracySummary::from_tally("overall", tally.overall())?,
            phases,
            levels,
        })
    }

    /// Save report to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load report from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let report = serde_json::from_reader(file)?;
        Ok(report)
    }
}

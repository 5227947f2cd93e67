//! Round cursor over a curriculum

use serde::{Deserialize, Serialize};

use super::regimen::{Curriculum, CurriculumEntry, Phase};

/// A round handed out by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledRound {
    pub index: usize,
    pub entry: CurriculumEntry,
    pub phase: Phase,
}

/// Result of advancing the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Round(ScheduledRound),
    EndOfCurriculum,
}

/// Walks a curriculum one round at a time.
///
/// The round index is the only state; the phase is derived from it. Once
/// the end is reached every further call reports the end again.
#[derive(Debug, Clone)]
pub struct CurriculumScheduler {
    curriculum: Curriculum,
    /// `None` before the first advance
    round_index: Option<usize>,
}

impl CurriculumScheduler {
    pub fn new(curriculum: Curriculum) -> Self {
        Self {
            curriculum,
            round_index: None,
        }
    }

    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    /// Total rounds in the session
    pub fn total_rounds(&self) -> usize {
        self.curriculum.len()
    }

    /// Move to the next round.
    pub fn advance(&mut self) -> Advance {
        let total = self.curriculum.len();
        let next = self.round_index.map_or(0, |index| (index + 1).min(total));
        self.round_index = Some(next);

        match self.curriculum.entry(next) {
            Some(entry) => Advance::Round(ScheduledRound {
                index: next,
                entry,
                phase: self.curriculum.phase_of(next),
            }),
            None => Advance::EndOfCurriculum,
        }
    }

    /// Index of the round most recently handed out
    pub fn round_index(&self) -> Option<usize> {
        self.round_index
            .filter(|&index| index < self.curriculum.len())
    }

    /// Phase of the current round, if one is in progress
    pub fn current_phase(&self) -> Option<Phase> {
        self.round_index().map(|index| self.curriculum.phase_of(index))
    }

    pub fn is_finished(&self) -> bool {
        self.round_index
            .is_some_and(|index| index >= self.curriculum.len())
    }
}

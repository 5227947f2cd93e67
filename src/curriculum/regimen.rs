//! Curriculum phases, orientation, and segment construction

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Curriculum segment a round belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Training,
    Test,
    Transfer,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Training, Phase::Test, Phase::Transfer];

    /// Get short label
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Training => "training",
            Phase::Test => "test",
            Phase::Transfer => "transfer",
        }
    }

    /// One-based phase number shown to participants ("Phase 2/3")
    pub fn number(&self) -> usize {
        match self {
            Phase::Training => 1,
            Phase::Test => 2,
            Phase::Transfer => 3,
        }
    }

    /// Whether rounds in this phase are drawn with the transfer icon set
    pub fn uses_transfer_icons(&self) -> bool {
        matches!(self, Phase::Transfer)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Phase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "training" | "train" => Ok(Phase::Training),
            "test" => Ok(Phase::Test),
            "transfer" => Ok(Phase::Transfer),
            _ => Err(Error::ParsePhase {
                input: s.to_string(),
                expected: "training, test, transfer".to_string(),
            }),
        }
    }
}

/// Which axis the training segment varies fastest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Concept level varies within each strategy level
    #[default]
    Concept,
    /// Strategy level varies within each concept level
    Strategy,
}

impl Orientation {
    /// Host parameter key carrying the orientation
    pub const PARAM_KEY: &'static str = "CT";

    pub fn label(&self) -> &'static str {
        match self {
            Orientation::Concept => "concept",
            Orientation::Strategy => "strategy",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Orientation::Concept => "Introduce concepts within each path depth",
            Orientation::Strategy => "Deepen paths within each concept set",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "concept" => Ok(Orientation::Concept),
            "strategy" => Ok(Orientation::Strategy),
            _ => Err(Error::ParseOrientation {
                input: s.to_string(),
                expected: "concept, strategy".to_string(),
            }),
        }
    }
}

/// Difficulty of one scheduled round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumEntry {
    pub concept_level: usize,
    pub strategy_level: usize,
}

impl CurriculumEntry {
    pub fn new(concept_level: usize, strategy_level: usize) -> Self {
        Self {
            concept_level,
            strategy_level,
        }
    }
}

/// Shape of the curriculum segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumConfig {
    /// Highest level on each axis of the training grid
    pub grid_size: usize,
    /// Consecutive repeats of every training entry
    pub repeats: usize,
    /// Rounds in the test segment
    pub test_rounds: usize,
    /// Rounds in the transfer segment
    pub transfer_rounds: usize,
    /// Levels used throughout test and transfer
    pub final_entry: CurriculumEntry,
}

impl Default for CurriculumConfig {
    fn default() -> Self {
        Self {
            grid_size: 4,
            repeats: 2,
            test_rounds: 8,
            transfer_rounds: 8,
            final_entry: CurriculumEntry::new(4, 4),
        }
    }
}

/// Ordered list of rounds split into training, test, and transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curriculum {
    pub orientation: Orientation,
    pub training: Vec<CurriculumEntry>,
    pub test: Vec<CurriculumEntry>,
    pub transfer: Vec<CurriculumEntry>,
}

impl Curriculum {
    /// Build the standard curriculum for an orientation
    pub fn build(orientation: Orientation) -> Self {
        Self::with_config(orientation, &CurriculumConfig::default())
    }

    /// Build a curriculum from explicit segment sizes.
    ///
    /// Training enumerates `(i, j)` over `1..=grid_size` with `i` outermost,
    /// mapping to `(concept, strategy) = (j, i)` under concept orientation
    /// and `(i, j)` under strategy orientation. Each entry is then repeated
    /// in place.
    pub fn with_config(orientation: Orientation, config: &CurriculumConfig) -> Self {
        let mut training = Vec::with_capacity(config.grid_size * config.grid_size * config.repeats);
        for i in 1..=config.grid_size {
            for j in 1..=config.grid_size {
                let entry = match orientation {
                    Orientation::Concept => CurriculumEntry::new(j, i),
                    Orientation::Strategy => CurriculumEntry::new(i, j),
                };
                training.extend(std::iter::repeat_n(entry, config.repeats));
            }
        }

        Self {
            orientation,
            training,
            test: vec![config.final_entry; config.test_rounds],
            transfer: vec![config.final_entry; config.transfer_rounds],
        }
    }

    /// Total number of rounds
    pub fn len(&self) -> usize {
        self.training.len() + self.test.len() + self.transfer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entry at a global round index
    pub fn entry(&self, index: usize) -> Option<CurriculumEntry> {
        self.entries().nth(index)
    }

    /// All entries in session order
    pub fn entries(&self) -> impl Iterator<Item = CurriculumEntry> + '_ {
        self.training
            .iter()
            .chain(self.test.iter())
            .chain(self.transfer.iter())
            .copied()
    }

    /// Phase of a global round index
    pub fn phase_of(&self, index: usize) -> Phase {
        phase_for_index(index, self.training.len(), self.test.len())
    }

    /// Number of rounds in a phase
    pub fn phase_len(&self, phase: Phase) -> usize {
        match phase {
            Phase::Training => self.training.len(),
            Phase::Test => self.test.len(),
            Phase::Transfer => self.transfer.len(),
        }
    }
}

/// Phase of a round index given the training and test segment lengths.
///
/// Indices past the test segment are transfer rounds.
pub fn phase_for_index(index: usize, training_len: usize, test_len: usize) -> Phase {
    if index < training_len {
        Phase::Training
    } else if index < training_len + test_len {
        Phase::Test
    } else {
        Phase::Transfer
    }
}

//! Round configuration types

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    concept::{ConceptSymbol, format_sequence},
    curriculum::Phase,
};

/// One of the two candidate paths offered each round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PathLabel {
    #[serde(rename = "pathA")]
    A,
    #[serde(rename = "pathB")]
    B,
}

impl PathLabel {
    pub const BOTH: [PathLabel; 2] = [PathLabel::A, PathLabel::B];

    /// The path that was not chosen
    pub fn other(self) -> Self {
        match self {
            PathLabel::A => PathLabel::B,
            PathLabel::B => PathLabel::A,
        }
    }

    pub fn index(self) -> usize {
        match self {
            PathLabel::A => 0,
            PathLabel::B => 1,
        }
    }

    /// Key used in logged records (`pathA` / `pathB`)
    pub fn key(self) -> &'static str {
        match self {
            PathLabel::A => "pathA",
            PathLabel::B => "pathB",
        }
    }
}

impl fmt::Display for PathLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathLabel::A => write!(f, "path A"),
            PathLabel::B => write!(f, "path B"),
        }
    }
}

impl FromStr for PathLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "patha" | "path-a" | "left" => Ok(PathLabel::A),
            "b" | "pathb" | "path-b" | "right" => Ok(PathLabel::B),
            _ => Err(Error::ParsePathLabel {
                input: s.to_string(),
                expected: "a, b".to_string(),
            }),
        }
    }
}

/// A path: its concept sequence and the score it ends on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSpec {
    pub sequence: Vec<ConceptSymbol>,
    pub end: i32,
}

impl PathSpec {
    pub fn new(sequence: Vec<ConceptSymbol>, end: i32) -> Self {
        Self { sequence, end }
    }
}

/// Full description of one round, including its live score and outcome.
///
/// Built by the round factory, mutated by the path traversal while the
/// round is played, and frozen once `end_time` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundConfig {
    pub start: i32,
    pub concept_level: usize,
    pub strategy_level: usize,
    pub path_a: PathSpec,
    pub path_b: PathSpec,
    pub target_path: PathLabel,
    pub target: i32,
    /// Running score while the round is played
    pub score: i32,
    pub final_score: Option<i32>,
    pub is_correct: Option<bool>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl RoundConfig {
    pub fn path(&self, label: PathLabel) -> &PathSpec {
        match label {
            PathLabel::A => &self.path_a,
            PathLabel::B => &self.path_b,
        }
    }

    /// Path whose end supplies the target.
    ///
    /// This is `target_path` unless that path ends on the start score, in
    /// which case the target comes from the other path.
    pub fn target_source(&self) -> PathLabel {
        if self.path(self.target_path).end == self.start {
            self.target_path.other()
        } else {
            self.target_path
        }
    }

    /// Symbols of both paths, path A first
    pub fn combined_symbols(&self) -> impl Iterator<Item = ConceptSymbol> + '_ {
        self.path_a
            .sequence
            .iter()
            .chain(self.path_b.sequence.iter())
            .copied()
    }

    /// Whether the round has been resolved and its record frozen
    pub fn is_finalized(&self) -> bool {
        self.end_time.is_some()
    }

    /// Short human-readable summary used in logs and CLI output
    pub fn describe(&self) -> String {
        format!(
            "start {} -> target {} | A: {} ({}) | B: {} ({})",
            self.start,
            self.target,
            format_sequence(&self.path_a.sequence),
            self.path_a.end,
            format_sequence(&self.path_b.sequence),
            self.path_b.end,
        )
    }
}

/// A completed round as handed to a round sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    /// Session identifier, if the host assigned one
    pub session: Option<String>,
    pub round_index: usize,
    pub phase: Phase,
    pub config: RoundConfig,
}

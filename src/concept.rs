//! Concept symbols and the table of arithmetic transforms they stand for.
//!
//! A round's running score is threaded through a sequence of concept
//! symbols. Every symbol except the reset symbol is a pure function of the
//! current score; the reset symbol returns the round's original start value
//! wherever it appears in the sequence.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One symbol of the closed concept alphabet, ordered by ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConceptSymbol {
    A,
    B,
    C,
    D,
    E,
}

impl ConceptSymbol {
    /// All symbols in canonical (ordinal) order.
    pub const ALL: [ConceptSymbol; 5] = [
        ConceptSymbol::A,
        ConceptSymbol::B,
        ConceptSymbol::C,
        ConceptSymbol::D,
        ConceptSymbol::E,
    ];

    /// Number of symbols in the alphabet.
    pub const COUNT: usize = Self::ALL.len();

    /// Position of this symbol in the canonical ordering.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Symbol at the given ordinal, if the alphabet has one.
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    pub fn as_char(self) -> char {
        match self {
            ConceptSymbol::A => 'A',
            ConceptSymbol::B => 'B',
            ConceptSymbol::C => 'C',
            ConceptSymbol::D => 'D',
            ConceptSymbol::E => 'E',
        }
    }
}

impl fmt::Display for ConceptSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for ConceptSymbol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(ConceptSymbol::A),
            "B" => Ok(ConceptSymbol::B),
            "C" => Ok(ConceptSymbol::C),
            "D" => Ok(ConceptSymbol::D),
            "E" => Ok(ConceptSymbol::E),
            _ => Err(Error::ParseConceptSymbol {
                input: s.to_string(),
                expected: "A, B, C, D, E".to_string(),
            }),
        }
    }
}

/// Render a sequence compactly, e.g. `[A, C, E]` as `"ACE"`.
pub fn format_sequence(sequence: &[ConceptSymbol]) -> String {
    sequence.iter().map(|symbol| symbol.as_char()).collect()
}

/// Parse a compact sequence such as `"ACE"`.
pub fn parse_sequence(input: &str) -> Result<Vec<ConceptSymbol>> {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| c.to_string().parse())
        .collect()
}

/// Arithmetic transform applied to the running score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transform {
    Identity,
    Increment,
    Double,
    Negate,
    /// Ignores the running score and yields the round's start value.
    ResetToStart,
}

impl Transform {
    /// Arithmetic saturates so arbitrarily deep paths cannot overflow.
    pub fn apply(self, score: i32, original_start: i32) -> i32 {
        match self {
            Transform::Identity => score,
            Transform::Increment => score.saturating_add(1),
            Transform::Double => score.saturating_mul(2),
            Transform::Negate => score.saturating_neg(),
            Transform::ResetToStart => original_start,
        }
    }
}

/// Fixed mapping from concept symbols to transforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptTable {
    transforms: [Transform; ConceptSymbol::COUNT],
}

impl ConceptTable {
    /// The task's mapping: A identity, B +1, C ×2, D negate, E reset.
    pub fn standard() -> Self {
        Self {
            transforms: [
                Transform::Identity,
                Transform::Increment,
                Transform::Double,
                Transform::Negate,
                Transform::ResetToStart,
            ],
        }
    }

    /// Build a table with a custom transform per symbol, in ordinal order.
    pub fn with_transforms(transforms: [Transform; ConceptSymbol::COUNT]) -> Self {
        Self { transforms }
    }

    /// Highest concept level that still resolves to a symbol.
    pub fn max_concept_level(&self) -> usize {
        ConceptSymbol::COUNT - 1
    }

    pub fn transform(&self, symbol: ConceptSymbol) -> Transform {
        self.transforms[symbol.ordinal()]
    }

    /// Apply one symbol to the running score.
    pub fn apply(&self, symbol: ConceptSymbol, current_score: i32, original_start: i32) -> i32 {
        self.transform(symbol).apply(current_score, original_start)
    }

    /// Fold a sequence left to right starting from `start`.
    ///
    /// `start` stays fixed as the reset target for every step.
    pub fn fold(&self, start: i32, sequence: &[ConceptSymbol]) -> i32 {
        sequence
            .iter()
            .fold(start, |score, &symbol| self.apply(symbol, score, start))
    }

    /// Symbols eligible at a concept level: the first `concept_level + 1`
    /// symbols in canonical order, capped at the alphabet size.
    pub fn universe(&self, concept_level: usize) -> &'static [ConceptSymbol] {
        let len = (concept_level + 1).min(ConceptSymbol::COUNT);
        &ConceptSymbol::ALL[..len]
    }

    pub fn symbol_at(&self, ordinal: usize) -> Option<ConceptSymbol> {
        ConceptSymbol::from_ordinal(ordinal)
    }
}

impl Default for ConceptTable {
    fn default() -> Self {
        Self::standard()
    }
}

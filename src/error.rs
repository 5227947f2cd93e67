//! Error types for the pathtask crate

use thiserror::Error;

use crate::round::PathLabel;

/// Main error type for the pathtask crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(
        "failed to generate a round after {attempts} attempts (concept level {concept_level}, strategy level {strategy_level})"
    )]
    RoundGenerationExhausted {
        concept_level: usize,
        strategy_level: usize,
        attempts: usize,
    },

    #[error(
        "invalid levels: concept level {concept_level} (must be 1-4), strategy level {strategy_level} (must be at least 1)"
    )]
    InvalidLevels {
        concept_level: usize,
        strategy_level: usize,
    },

    #[error("no concept to score at depth {depth} on {path}")]
    InvalidScoreUpdate { path: PathLabel, depth: usize },

    #[error("choice point at depth {depth} on {path} is not selectable")]
    ChoiceNotSelectable { path: PathLabel, depth: usize },

    #[error("continuation '{continuation}' does not match the traversal state")]
    UnexpectedContinuation { continuation: String },

    #[error("round has not been resolved yet")]
    RoundNotResolved,

    #[error("next-round control is not available yet")]
    AdvanceNotAvailable,

    #[error("no round is in progress")]
    NoActiveRound,

    #[error("curriculum is already complete")]
    CurriculumComplete,

    #[error("session was aborted after a round generation failure")]
    SessionAborted,

    #[error("invalid orientation '{input}'. Expected one of: {expected}")]
    ParseOrientation { input: String, expected: String },

    #[error("invalid phase '{input}'. Expected one of: {expected}")]
    ParsePhase { input: String, expected: String },

    #[error("invalid path '{input}'. Expected one of: {expected}")]
    ParsePathLabel { input: String, expected: String },

    #[error("invalid concept symbol '{input}'. Expected one of: {expected}")]
    ParseConceptSymbol { input: String, expected: String },

    #[error("invalid parameter '{input}' (expected KEY=VALUE)")]
    ParseParam { input: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("statistics error: {message}")]
    Statistics { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

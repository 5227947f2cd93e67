//! Path-choice learning task
//!
//! This crate provides:
//! - The concept table mapping symbols to score transforms
//! - Round generation, validation, and rejection-sampled round creation
//! - The three-phase curriculum and its scheduler
//! - The per-round path traversal state machine
//! - A session driver with presenter and persistence ports
//! - Simulated participants and accuracy analysis

pub mod adapters;
pub mod analysis;
pub mod app;
pub mod cli;
pub mod concept;
pub mod curriculum;
pub mod error;
pub mod icons;
pub mod pipeline;
pub mod ports;
pub mod round;
pub mod session;
pub mod traversal;

#[cfg(test)]
mod test_support;

pub use concept::{ConceptSymbol, ConceptTable, Transform};
pub use curriculum::{Curriculum, CurriculumScheduler, Orientation, Phase};
pub use error::{Error, Result};
pub use round::{PathLabel, RoundConfig, RoundFactory, RoundGenerator, RoundRecord, RoundValidator};
pub use session::{Session, SessionStep};
pub use traversal::{Continuation, Effect, PathTraversal, TraversalState, TraversalTimings};

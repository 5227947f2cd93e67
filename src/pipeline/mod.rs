//! Simulation pipeline abstractions
//!
//! This module provides:
//! - Simulated participants with different levels of concept knowledge
//! - A driver that plays rounds and honours scheduled continuations
//! - A pipeline that runs batches of sessions and reports accuracy

pub mod participants;
pub mod simulation;

pub use participants::{BoundedParticipant, OracleParticipant, RandomParticipant};
pub use simulation::{
    Pacing, PlayedRound, SimulationConfig, SimulationPipeline, drive_effects, play_round,
};

pub use crate::ports::Participant;

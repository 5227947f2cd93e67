//! CLI infrastructure for the path-choice task
//!
//! This module provides the command-line interface for generating rounds,
//! inspecting curricula, simulating participants, and playing a session.

pub mod commands;
pub mod output;
pub mod params;

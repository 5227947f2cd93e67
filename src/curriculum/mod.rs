//! Curriculum construction and round scheduling
//!
//! A session runs through three contiguous phases:
//! - training, which walks the concept/strategy grid
//! - test, fixed at the hardest levels
//! - transfer, the same levels rendered with a disjoint icon set

pub mod regimen;
pub mod scheduler;

pub use regimen::{
    Curriculum, CurriculumConfig, CurriculumEntry, Orientation, Phase, phase_for_index,
};
pub use scheduler::{Advance, CurriculumScheduler, ScheduledRound};

//! Ports (trait boundaries) for external collaborators.
//!
//! This module defines the interfaces between the task core and the outside
//! world. Following hexagonal architecture, these traits are owned by the
//! domain and implemented by adapters.

pub mod participant;
pub mod presenter;
pub mod sink;

pub use participant::{Participant, RoundView};
pub use presenter::{NullPresenter, Presenter};
pub use sink::{NullSink, RoundSink};

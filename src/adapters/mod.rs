//! Adapters implementing domain ports.
//!
//! This module contains infrastructure implementations of the traits defined
//! in the ports module. Following hexagonal architecture, adapters depend on
//! domain ports, not the other way around.

pub mod csv_sink;
pub mod in_memory_sink;
pub mod jsonl_sink;
pub mod shared_sink;
pub mod tracing_presenter;

pub use csv_sink::CsvRoundSink;
pub use in_memory_sink::InMemoryRoundSink;
pub use jsonl_sink::JsonlRoundSink;
pub use shared_sink::{FanoutSink, SharedSink};
pub use tracing_presenter::TracingPresenter;

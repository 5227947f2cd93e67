//! Analysis of simulated and recorded rounds

pub mod stats;

pub use stats::{
    AccuracySummary, CHANCE_ACCURACY, OutcomeTally, SimulationReport, Tally, binomial_p_value,
};

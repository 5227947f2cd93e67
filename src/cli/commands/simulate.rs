//! Simulate command - run simulated participants through full sessions

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use super::resolve_orientation;
use crate::{
    adapters::{CsvRoundSink, FanoutSink, JsonlRoundSink, SharedSink},
    cli::output::{print_accuracy, print_kv, print_section, print_subsection},
    pipeline::{
        BoundedParticipant, OracleParticipant, Pacing, Participant, RandomParticipant,
        SimulationConfig, SimulationPipeline,
    },
    round::DEFAULT_RETRY_BUDGET,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ParticipantKind {
    /// Guesses every round
    Random,
    /// Knows every concept
    Oracle,
    /// Knows concepts up to --known-level
    Bounded,
}

#[derive(Parser, Debug)]
#[command(about = "Simulate participants through full sessions")]
pub struct SimulateArgs {
    /// Kind of simulated participant
    #[arg(value_enum)]
    pub participant: ParticipantKind,

    /// Highest concept ordinal a bounded participant understands
    #[arg(long, default_value_t = 2)]
    pub known_level: usize,

    /// Number of sessions to run
    #[arg(long, short = 'n', default_value_t = 10)]
    pub sessions: usize,

    /// Orientation (concept or strategy); overrides any CT parameter
    #[arg(long, short = 'o')]
    pub orientation: Option<String>,

    /// Host parameter as KEY=VALUE (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Generate/validate attempts per round
    #[arg(long, default_value_t = DEFAULT_RETRY_BUDGET)]
    pub retry_budget: usize,

    /// Honour presentation delays instead of resuming immediately
    #[arg(long)]
    pub real_time: bool,

    /// Write every round as JSON lines
    #[arg(long)]
    pub rounds_jsonl: Option<PathBuf>,

    /// Write every round as CSV
    #[arg(long)]
    pub rounds_csv: Option<PathBuf>,

    /// Write the report as JSON
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    let orientation = resolve_orientation(args.orientation.as_deref(), &args.params)?;

    let mut participant: Box<dyn Participant> = match args.participant {
        ParticipantKind::Random => Box::new(RandomParticipant::new("random".to_string())),
        ParticipantKind::Oracle => Box::new(OracleParticipant::new("oracle".to_string())),
        ParticipantKind::Bounded => Box::new(BoundedParticipant::new(
            format!("bounded-{}", args.known_level),
            args.known_level,
        )),
    };

    let config = SimulationConfig {
        sessions: args.sessions,
        seed: args.seed,
        orientation,
        pacing: if args.real_time {
            Pacing::RealTime
        } else {
            Pacing::Immediate
        },
        retry_budget: args.retry_budget,
        ..Default::default()
    };

    let mut sinks = FanoutSink::new();
    if let Some(path) = &args.rounds_jsonl {
        sinks = sinks.with_sink(Box::new(JsonlRoundSink::create(path)?));
    }
    if let Some(path) = &args.rounds_csv {
        sinks = sinks.with_sink(Box::new(CsvRoundSink::create(path)?));
    }

    let mut pipeline = SimulationPipeline::new(config).with_progress(!args.no_progress);
    if !sinks.is_empty() {
        pipeline = pipeline.with_sink(SharedSink::new(Box::new(sinks)));
    }

    let report = pipeline.run(participant.as_mut())?;

    print_section(&format!("Simulation: {}", report.participant));
    print_kv("orientation", report.orientation.label());
    print_kv("sessions", &report.sessions.to_string());
    print_kv("aborted", &report.aborted_sessions.to_string());

    print_subsection("Accuracy by phase");
    for phase in &report.phases {
        print_accuracy(phase);
    }
    print_accuracy(&report.overall);

    print_subsection("Accuracy by level");
    for level in &report.levels {
        print_accuracy(level);
    }

    if let Some(path) = &args.summary {
        report.save(path)?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}

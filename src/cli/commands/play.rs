//! Play command - run a session interactively in the terminal

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::Parser;

use crate::{
    Error,
    adapters::JsonlRoundSink,
    app::SessionConfig,
    cli::{
        output::{print_kv, print_section},
        params::collect_params,
    },
    concept::format_sequence,
    curriculum::Phase,
    icons::IconAssignment,
    pipeline::{Pacing, play_round},
    ports::{NullSink, Participant, Presenter, RoundSink, RoundView},
    round::PathLabel,
    session::{RoundStarted, Session, SessionStep},
};

#[derive(Parser, Debug)]
#[command(about = "Play a session in the terminal")]
pub struct PlayArgs {
    /// Host parameter as KEY=VALUE (repeatable), e.g. CT=strategy
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip presentation delays
    #[arg(long)]
    pub immediate: bool,

    /// Write every round as JSON lines
    #[arg(long)]
    pub rounds_jsonl: Option<PathBuf>,

    /// Identifier stamped on persisted rounds
    #[arg(long)]
    pub session_id: Option<String>,
}

/// Prints presentation events to stdout
struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn on_round_start(&mut self, round: &RoundStarted) -> crate::Result<()> {
        print_section(&format!(
            "Phase {}/3 ({})  Round {}/{}",
            round.phase.number(),
            round.phase,
            round.round_index + 1,
            round.total_rounds
        ));
        print_kv("start", &round.config.start.to_string());
        print_kv("target", &round.config.target.to_string());
        print_kv(
            "path A",
            &format!(
                "{}  [{}]",
                format_sequence(&round.config.path_a.sequence),
                round.icons_a.join(" ")
            ),
        );
        print_kv(
            "path B",
            &format!(
                "{}  [{}]",
                format_sequence(&round.config.path_b.sequence),
                round.icons_b.join(" ")
            ),
        );
        Ok(())
    }

    fn on_transition(&mut self, from: i32, to: i32) -> crate::Result<()> {
        println!("  score {from} -> {to}");
        Ok(())
    }

    fn on_round_end(
        &mut self,
        final_score: i32,
        target: i32,
        is_correct: bool,
    ) -> crate::Result<()> {
        let verdict = if is_correct { "correct" } else { "incorrect" };
        println!("  final score {final_score}, target {target}: {verdict}");
        Ok(())
    }

    fn on_curriculum_complete(&mut self, icons: &IconAssignment) -> crate::Result<()> {
        print_section("Session complete");
        print_kv("training icons", &icons.describe(Phase::Training));
        print_kv("transfer icons", &icons.describe(Phase::Transfer));
        Ok(())
    }
}

/// Reads the path choice from stdin
struct TerminalParticipant;

impl Participant for TerminalParticipant {
    fn choose_path(&mut self, _view: &RoundView) -> crate::Result<PathLabel> {
        let stdin = io::stdin();
        loop {
            print!("choose a path [a/b]: ");
            io::stdout().flush()?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                return Err(Error::Io {
                    operation: "read path choice".to_string(),
                    source: io::ErrorKind::UnexpectedEof.into(),
                });
            }
            match line.trim().parse() {
                Ok(path) => return Ok(path),
                Err(err) => println!("  {err}"),
            }
        }
    }

    fn name(&self) -> &str {
        "terminal"
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let params = collect_params(&args.params)?;
    let mut config = SessionConfig::from_params(&params)?;
    let pacing = if args.immediate {
        Pacing::Immediate
    } else {
        Pacing::RealTime
    };
    config = config.with_timings(pacing.timings());
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(id) = args.session_id {
        config = config.with_session_id(id);
    }

    let sink: Box<dyn RoundSink> = match &args.rounds_jsonl {
        Some(path) => Box::new(JsonlRoundSink::create(path)?),
        None => Box::new(NullSink),
    };

    let mut session = Session::new(config, Box::new(ConsolePresenter), sink)?;
    let mut participant = TerminalParticipant;
    while let SessionStep::Round(_) = session.advance()? {
        play_round(&mut session, &mut participant, pacing)?;
    }

    Ok(())
}

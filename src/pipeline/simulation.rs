//! Simulation pipeline: run participants through whole sessions

use std::{collections::VecDeque, thread};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    Error, Result,
    adapters::{SharedSink, TracingPresenter},
    analysis::stats::{OutcomeTally, SimulationReport},
    app::SessionConfig,
    curriculum::{Curriculum, CurriculumConfig, Orientation, Phase},
    ports::{NullSink, Participant, RoundSink, RoundView},
    round::{DEFAULT_RETRY_BUDGET, PathLabel},
    session::{Session, SessionStep},
    traversal::{Effect, TraversalTimings},
};

/// How scheduled continuations are honoured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pacing {
    /// Resume every continuation at once
    #[default]
    Immediate,
    /// Sleep for each continuation's delay before resuming it
    RealTime,
}

impl Pacing {
    /// Timings a session should use under this pacing
    pub fn timings(self) -> TraversalTimings {
        match self {
            Pacing::Immediate => TraversalTimings::immediate(),
            Pacing::RealTime => TraversalTimings::default(),
        }
    }
}

/// Resume every continuation `effects` schedules, and any they schedule in
/// turn, until the round is quiet.
pub fn drive_effects(session: &mut Session, effects: Vec<Effect>, pacing: Pacing) -> Result<()> {
    let mut pending: VecDeque<Effect> = effects.into();
    while let Some(effect) = pending.pop_front() {
        if let Effect::ScheduleContinuation { delay, next } = effect {
            if pacing == Pacing::RealTime && !delay.is_zero() {
                thread::sleep(delay);
            }
            pending.extend(session.resume(next)?);
        }
    }
    Ok(())
}

/// Outcome of one played round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayedRound {
    pub phase: Phase,
    pub concept_level: usize,
    pub strategy_level: usize,
    pub chosen: PathLabel,
    pub is_correct: bool,
}

/// Let `participant` pick a path, then walk it to the end.
///
/// # Errors
///
/// Returns [`Error::NoActiveRound`] if the session has no round in play.
pub fn play_round(
    session: &mut Session,
    participant: &mut dyn Participant,
    pacing: Pacing,
) -> Result<PlayedRound> {
    let (view, strategy_level, concept_level, phase) = {
        let traversal = session.traversal().ok_or(Error::NoActiveRound)?;
        let round = session.current_round().ok_or(Error::NoActiveRound)?;
        let config = traversal.config();
        (
            RoundView::from(config),
            config.strategy_level,
            config.concept_level,
            round.phase,
        )
    };

    let chosen = participant.choose_path(&view)?;
    for depth in 0..strategy_level {
        let effects = session.choose(chosen, depth)?;
        drive_effects(session, effects, pacing)?;
    }

    let is_correct = session
        .traversal()
        .and_then(|traversal| traversal.config().is_correct)
        .ok_or(Error::RoundNotResolved)?;

    Ok(PlayedRound {
        phase,
        concept_level,
        strategy_level,
        chosen,
        is_correct,
    })
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of sessions to run
    pub sessions: usize,

    /// Base seed; session `i` derives its seeds from it
    pub seed: Option<u64>,

    pub orientation: Orientation,

    pub pacing: Pacing,

    pub retry_budget: usize,

    pub curriculum: CurriculumConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sessions: 1,
            seed: None,
            orientation: Orientation::default(),
            pacing: Pacing::Immediate,
            retry_budget: DEFAULT_RETRY_BUDGET,
            curriculum: CurriculumConfig::default(),
        }
    }
}

/// Runs a participant through a batch of sessions
pub struct SimulationPipeline {
    config: SimulationConfig,
    sink: Option<SharedSink>,
    show_progress: bool,
}

impl SimulationPipeline {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            sink: None,
            show_progress: false,
        }
    }

    /// Persist every round of every session to `sink`
    pub fn with_sink(mut self, sink: SharedSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run all sessions and summarise the participant's accuracy.
    ///
    /// Sessions aborted by round generation are counted, not fatal.
    pub fn run(&mut self, participant: &mut dyn Participant) -> Result<SimulationReport> {
        let rounds_per_session =
            Curriculum::with_config(self.config.orientation, &self.config.curriculum).len();
        let progress = self.progress_bar(self.config.sessions * rounds_per_session)?;

        let mut tally = OutcomeTally::new();
        let mut aborted = 0;

        for index in 0..self.config.sessions {
            let session_config = self.session_config(participant.name(), index);
            if let Some(seed) = session_config.seed {
                participant.set_rng_seed(seed.wrapping_add(1))?;
            }
            let sink: Box<dyn RoundSink> = match &self.sink {
                Some(shared) => Box::new(shared.clone()),
                None => Box::new(NullSink),
            };
            let presenter = Box::new(TracingPresenter::new());
            let mut session = Session::new(session_config, presenter, sink)?;

            loop {
                match session.advance() {
                    Ok(SessionStep::Round(_)) => {
                        let played = play_round(&mut session, participant, self.config.pacing)?;
                        tally.record(
                            played.phase,
                            played.concept_level,
                            played.strategy_level,
                            played.is_correct,
                        );
                        if let Some(pb) = &progress {
                            pb.inc(1);
                        }
                    }
                    Ok(SessionStep::Complete) => break,
                    Err(Error::RoundGenerationExhausted { .. }) => {
                        warn!(session = index, "session aborted");
                        aborted += 1;
                        break;
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        if let Some(pb) = &progress {
            pb.finish_with_message("done");
        }

        let report = SimulationReport::new(
            participant.name().to_string(),
            self.config.orientation,
            self.config.sessions,
            aborted,
            &tally,
        )?;
        info!(
            participant = %report.participant,
            sessions = report.sessions,
            aborted = report.aborted_sessions,
            accuracy = report.overall.accuracy,
            "simulation finished"
        );
        Ok(report)
    }

    fn session_config(&self, participant: &str, index: usize) -> SessionConfig {
        let mut config = SessionConfig::new(self.config.orientation)
            .with_curriculum(self.config.curriculum)
            .with_retry_budget(self.config.retry_budget)
            .with_timings(self.config.pacing.timings())
            .with_session_id(format!("{participant}-{index}"));
        if let Some(seed) = self.config.seed {
            config = config.with_seed(seed.wrapping_add(2 * index as u64));
        }
        config
    }

    fn progress_bar(&self, total: usize) -> Result<Option<ProgressBar>> {
        if !self.show_progress {
            return Ok(None);
        }
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rounds {msg}")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        Ok(Some(pb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{OracleParticipant, RandomParticipant};

    #[test]
    fn test_oracle_is_always_correct() {
        let config = SimulationConfig {
            sessions: 2,
            seed: Some(11),
            retry_budget: 500,
            ..Default::default()
        };
        let mut oracle = OracleParticipant::new("oracle".to_string());
        let report = SimulationPipeline::new(config).run(&mut oracle).unwrap();

        assert_eq!(report.aborted_sessions, 0);
        assert_eq!(report.overall.rounds, 96);
        assert_eq!(report.overall.correct, 96);
        assert!(report.overall.p_value < 1e-10);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = SimulationConfig {
            sessions: 1,
            seed: Some(3),
            retry_budget: 500,
            ..Default::default()
        };
        let mut first = RandomParticipant::new("random".to_string());
        let mut second = RandomParticipant::new("random".to_string());
        let a = SimulationPipeline::new(config.clone()).run(&mut first).unwrap();
        let b = SimulationPipeline::new(config).run(&mut second).unwrap();

        assert_eq!(a.overall.correct, b.overall.correct);
    }
}

//! Session driver
//!
//! A [`Session`] is the explicit context a participant's run lives in: the
//! curriculum cursor, the round factory and its random source, the icon
//! assignment, the round currently in play, and the presenter and sink the
//! session reports to. Nothing here is global; each core component receives
//! what it needs from the session.

use chrono::Utc;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{
    Error, Result,
    app::SessionConfig,
    concept::ConceptTable,
    curriculum::{Advance, Curriculum, CurriculumScheduler, Phase, ScheduledRound},
    icons::IconAssignment,
    ports::{Presenter, RoundSink},
    round::{PathLabel, RoundConfig, RoundFactory, RoundRecord},
    traversal::{Continuation, Effect, PathTraversal},
};

/// Snapshot handed to the presenter when a round begins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundStarted {
    pub round_index: usize,
    pub total_rounds: usize,
    pub phase: Phase,
    pub config: RoundConfig,
    /// Icons for each step of path A, from the phase's icon set
    pub icons_a: Vec<String>,
    /// Icons for each step of path B, from the phase's icon set
    pub icons_b: Vec<String>,
}

/// Result of advancing a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStep {
    Round(Box<RoundStarted>),
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    NotStarted,
    Running,
    Complete,
    /// A round could not be generated; the session cannot proceed
    Aborted,
}

struct ActiveRound {
    scheduled: ScheduledRound,
    traversal: PathTraversal,
}

/// One participant's run through the curriculum
pub struct Session {
    config: SessionConfig,
    scheduler: CurriculumScheduler,
    factory: RoundFactory,
    icons: IconAssignment,
    rng: StdRng,
    presenter: Box<dyn Presenter>,
    sink: Box<dyn RoundSink>,
    active: Option<ActiveRound>,
    status: SessionStatus,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("orientation", &self.config.orientation)
            .field("round_index", &self.scheduler.round_index())
            .field("status", &self.status)
            .finish()
    }
}

impl Session {
    /// Create a session. No round is generated until [`Session::advance`].
    ///
    /// # Errors
    ///
    /// Returns an error if the icon assignment cannot be sampled.
    pub fn new(
        config: SessionConfig,
        presenter: Box<dyn Presenter>,
        sink: Box<dyn RoundSink>,
    ) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        };
        let icons = IconAssignment::sample(&mut rng)?;
        let curriculum = Curriculum::with_config(config.orientation, &config.curriculum);
        let factory =
            RoundFactory::new(ConceptTable::standard()).with_retry_budget(config.retry_budget);

        info!(
            orientation = %config.orientation,
            rounds = curriculum.len(),
            seed = ?config.seed,
            "session created"
        );

        Ok(Self {
            scheduler: CurriculumScheduler::new(curriculum),
            factory,
            icons,
            rng,
            presenter,
            sink,
            active: None,
            status: SessionStatus::NotStarted,
            config,
        })
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn icons(&self) -> &IconAssignment {
        &self.icons
    }

    pub fn curriculum(&self) -> &Curriculum {
        self.scheduler.curriculum()
    }

    /// Round currently in play, if any
    pub fn current_round(&self) -> Option<&ScheduledRound> {
        self.active.as_ref().map(|active| &active.scheduled)
    }

    pub fn traversal(&self) -> Option<&PathTraversal> {
        self.active.as_ref().map(|active| &active.traversal)
    }

    /// Start the first round, or persist the resolved round and start the
    /// next one.
    ///
    /// The resolved round stays current until the sink accepts it, so a
    /// failed persist can be retried by calling `advance` again.
    ///
    /// # Errors
    ///
    /// - [`Error::RoundNotResolved`] / [`Error::AdvanceNotAvailable`] if the
    ///   current round is not ready to be left
    /// - any sink error from persisting the resolved round
    /// - [`Error::RoundGenerationExhausted`] if the next round cannot be
    ///   generated; the session is aborted
    pub fn advance(&mut self) -> Result<SessionStep> {
        self.ensure_usable()?;

        if let Some(active) = &self.active {
            if !active.traversal.is_resolved() {
                return Err(Error::RoundNotResolved);
            }
            if !active.traversal.advance_available() {
                return Err(Error::AdvanceNotAvailable);
            }
            let record = self.record(active);
            if let Err(err) = self.sink.persist_round(&record) {
                error!(round = record.round_index, error = %err, "failed to persist round");
                return Err(err);
            }
            self.active = None;
        }

        match self.scheduler.advance() {
            Advance::Round(scheduled) => self.begin_round(scheduled),
            Advance::EndOfCurriculum => {
                self.status = SessionStatus::Complete;
                self.sink.flush()?;
                let shown = self.presenter.on_curriculum_complete(&self.icons);
                report_presenter_failure("curriculum complete", shown);
                info!(rounds = self.scheduler.total_rounds(), "curriculum complete");
                Ok(SessionStep::Complete)
            }
        }
    }

    /// Choose a point in the current round.
    ///
    /// Presenter failures are logged and do not fail the call; the caller
    /// always receives the effects, including any continuation to resume.
    pub fn choose(&mut self, path: PathLabel, depth: usize) -> Result<Vec<Effect>> {
        self.ensure_usable()?;
        let active = self.active.as_mut().ok_or(Error::NoActiveRound)?;
        let effects = active.traversal.choose(path, depth, Utc::now())?;
        self.relay(&effects);
        Ok(effects)
    }

    /// Feed back a continuation whose delay has elapsed.
    pub fn resume(&mut self, continuation: Continuation) -> Result<Vec<Effect>> {
        self.ensure_usable()?;
        let active = self.active.as_mut().ok_or(Error::NoActiveRound)?;
        let effects = active.traversal.resume(continuation)?;
        self.relay(&effects);
        Ok(effects)
    }

    fn ensure_usable(&self) -> Result<()> {
        match self.status {
            SessionStatus::Aborted => Err(Error::SessionAborted),
            SessionStatus::Complete => Err(Error::CurriculumComplete),
            SessionStatus::NotStarted | SessionStatus::Running => Ok(()),
        }
    }

    fn begin_round(&mut self, scheduled: ScheduledRound) -> Result<SessionStep> {
        let curriculum = self.scheduler.curriculum();
        if scheduled.index == 0 || curriculum.phase_of(scheduled.index - 1) != scheduled.phase {
            info!(
                phase = %scheduled.phase,
                rounds = curriculum.phase_len(scheduled.phase),
                "entering phase"
            );
        }

        let entry = scheduled.entry;
        let mut config = match self.factory.create(
            entry.concept_level,
            entry.strategy_level,
            scheduled.phase,
            &mut self.rng,
        ) {
            Ok(config) => config,
            Err(err) => {
                error!(
                    round = scheduled.index,
                    error = %err,
                    "aborting session: round could not be generated"
                );
                self.status = SessionStatus::Aborted;
                return Err(err);
            }
        };
        config.start_time = Some(Utc::now());

        let started = RoundStarted {
            round_index: scheduled.index,
            total_rounds: self.scheduler.total_rounds(),
            phase: scheduled.phase,
            icons_a: self.icons.icons_for(&config.path_a.sequence, scheduled.phase),
            icons_b: self.icons.icons_for(&config.path_b.sequence, scheduled.phase),
            config: config.clone(),
        };

        let traversal = PathTraversal::new(
            config,
            self.factory.table().clone(),
            self.config.timings,
        );
        self.active = Some(ActiveRound {
            scheduled,
            traversal,
        });
        self.status = SessionStatus::Running;
        let shown = self.presenter.on_round_start(&started);
        report_presenter_failure("round start", shown);

        Ok(SessionStep::Round(Box::new(started)))
    }

    fn relay(&mut self, effects: &[Effect]) {
        for effect in effects {
            let (hook, shown) = match *effect {
                Effect::Transition { from, to } => {
                    ("transition", self.presenter.on_transition(from, to))
                }
                Effect::PointEnabled { path, depth } => (
                    "choice enabled",
                    self.presenter.on_choice_enabled(path, depth),
                ),
                Effect::Resolved {
                    final_score,
                    target,
                    is_correct,
                } => {
                    if let Some(round) = self.current_round() {
                        info!(
                            round = round.index,
                            phase = %round.phase,
                            final_score,
                            target,
                            is_correct,
                            "round resolved"
                        );
                    }
                    (
                        "round end",
                        self.presenter.on_round_end(final_score, target, is_correct),
                    )
                }
                Effect::AdvanceControlExposed => {
                    ("advance available", self.presenter.on_advance_available())
                }
                Effect::ScheduleContinuation { .. } => continue,
            };
            report_presenter_failure(hook, shown);
        }
    }

    fn record(&self, active: &ActiveRound) -> RoundRecord {
        RoundRecord {
            session: self.config.session_id.clone(),
            round_index: active.scheduled.index,
            phase: active.scheduled.phase,
            config: active.traversal.config().clone(),
        }
    }
}

/// Presenter hooks are display-only: failures are logged, never propagated.
fn report_presenter_failure(hook: &str, shown: Result<()>) {
    if let Err(err) = shown {
        warn!(hook, error = %err, "presenter failed");
    }
}

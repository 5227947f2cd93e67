//! Path traversal state machine
//!
//! Governs live play of one round. The participant first picks one of the
//! two depth-0 choice points, which commits them to that path and abandons
//! the other. Each later point on the committed path becomes selectable only
//! after a presentation delay. Choosing the last point resolves the round.
//!
//! The machine never sleeps or spawns timers itself. Every delayed step is
//! returned as [`Effect::ScheduleContinuation`]; whoever drives the machine
//! waits for the delay and feeds the [`Continuation`] back through
//! [`PathTraversal::resume`]. Scheduled continuations cannot be cancelled.

use std::{fmt, time::Duration};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    concept::{ConceptSymbol, ConceptTable},
    round::{PathLabel, RoundConfig},
};

/// Presentation delays between steps of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalTimings {
    /// Delay after the first choice before depth 1 becomes selectable
    pub reveal_first: Duration,
    /// Delay after later choices before the next depth becomes selectable
    pub reveal_next: Duration,
    /// Delay after resolution before the next-round control appears
    pub advance_control: Duration,
}

impl TraversalTimings {
    /// No delays; continuations can be resumed straight away.
    pub fn immediate() -> Self {
        Self {
            reveal_first: Duration::ZERO,
            reveal_next: Duration::ZERO,
            advance_control: Duration::ZERO,
        }
    }
}

impl Default for TraversalTimings {
    fn default() -> Self {
        Self {
            reveal_first: Duration::from_millis(2500),
            reveal_next: Duration::from_millis(3125),
            advance_control: Duration::from_millis(2000),
        }
    }
}

/// Lifecycle of a single choice point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointStatus {
    Locked,
    Selectable,
    Chosen,
    /// On the path the participant did not take
    Abandoned,
}

/// One interactive step of a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoicePoint {
    pub path: PathLabel,
    pub depth: usize,
    pub symbol: ConceptSymbol,
    pub status: PointStatus,
}

/// Participant's progress through the round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Depth of the last chosen point
    pub depth: Option<usize>,
    pub on_path: Option<PathLabel>,
}

/// Where the traversal currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraversalState {
    AwaitingFirstChoice,
    /// A choice was made; the next point unlocks when its continuation fires
    RevealPending { path: PathLabel, depth: usize },
    AwaitingChoice { path: PathLabel, depth: usize },
    Resolved,
    /// Resolved, and the next-round control is available
    AdvanceReady,
}

/// Deferred step the driver must resume after a delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Continuation {
    EnablePoint { path: PathLabel, depth: usize },
    ExposeAdvanceControl,
}

impl fmt::Display for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Continuation::EnablePoint { path, depth } => {
                write!(f, "enable depth {depth} on {path}")
            }
            Continuation::ExposeAdvanceControl => write!(f, "expose next-round control"),
        }
    }
}

/// Outcome of a transition, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Running score moved
    Transition { from: i32, to: i32 },
    PointEnabled { path: PathLabel, depth: usize },
    Resolved {
        final_score: i32,
        target: i32,
        is_correct: bool,
    },
    AdvanceControlExposed,
    ScheduleContinuation {
        delay: Duration,
        next: Continuation,
    },
}

/// Live state of one round
#[derive(Debug, Clone)]
pub struct PathTraversal {
    config: RoundConfig,
    table: ConceptTable,
    timings: TraversalTimings,
    points: [Vec<ChoicePoint>; 2],
    player: PlayerState,
    state: TraversalState,
}

impl PathTraversal {
    /// Enter a round: both depth-0 points are selectable, nothing else.
    pub fn new(mut config: RoundConfig, table: ConceptTable, timings: TraversalTimings) -> Self {
        config.score = config.start;
        let points: [Vec<ChoicePoint>; 2] = PathLabel::BOTH.map(|path| {
            config
                .path(path)
                .sequence
                .iter()
                .enumerate()
                .map(|(depth, &symbol)| ChoicePoint {
                    path,
                    depth,
                    symbol,
                    status: if depth == 0 {
                        PointStatus::Selectable
                    } else {
                        PointStatus::Locked
                    },
                })
                .collect()
        });

        Self {
            config,
            table,
            timings,
            points,
            player: PlayerState::default(),
            state: TraversalState::AwaitingFirstChoice,
        }
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn state(&self) -> TraversalState {
        self.state
    }

    pub fn player(&self) -> PlayerState {
        self.player
    }

    pub fn timings(&self) -> TraversalTimings {
        self.timings
    }

    pub fn points(&self, path: PathLabel) -> &[ChoicePoint] {
        &self.points[path.index()]
    }

    pub fn is_selectable(&self, path: PathLabel, depth: usize) -> bool {
        self.point(path, depth)
            .is_some_and(|point| point.status == PointStatus::Selectable)
    }

    /// Every point that can be chosen right now
    pub fn selectable(&self) -> Vec<(PathLabel, usize)> {
        self.points
            .iter()
            .flatten()
            .filter(|point| point.status == PointStatus::Selectable)
            .map(|point| (point.path, point.depth))
            .collect()
    }

    pub fn is_resolved(&self) -> bool {
        matches!(
            self.state,
            TraversalState::Resolved | TraversalState::AdvanceReady
        )
    }

    pub fn advance_available(&self) -> bool {
        self.state == TraversalState::AdvanceReady
    }

    /// Choose a point.
    ///
    /// # Errors
    ///
    /// [`Error::ChoiceNotSelectable`] if the point is locked, already
    /// chosen, abandoned, or missing.
    pub fn choose(
        &mut self,
        path: PathLabel,
        depth: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<Effect>> {
        if !self.is_selectable(path, depth) {
            return Err(Error::ChoiceNotSelectable { path, depth });
        }

        let symbol = *self
            .config
            .path(path)
            .sequence
            .get(depth)
            .ok_or(Error::InvalidScoreUpdate { path, depth })?;

        let from = self.config.score;
        let to = self.table.apply(symbol, from, self.config.start);
        let mut effects = vec![Effect::Transition { from, to }];
        self.config.score = to;

        self.set_status(path, depth, PointStatus::Chosen);
        if depth == 0 {
            for point in &mut self.points[path.other().index()] {
                point.status = PointStatus::Abandoned;
            }
            self.player.on_path = Some(path);
        }
        self.player.depth = Some(depth);

        if depth + 1 == self.config.strategy_level {
            effects.extend(self.resolve(now));
        } else {
            let delay = if depth == 0 {
                self.timings.reveal_first
            } else {
                self.timings.reveal_next
            };
            let next = depth + 1;
            self.state = TraversalState::RevealPending { path, depth: next };
            effects.push(Effect::ScheduleContinuation {
                delay,
                next: Continuation::EnablePoint { path, depth: next },
            });
        }

        Ok(effects)
    }

    /// Apply a continuation previously returned by this traversal.
    pub fn resume(&mut self, continuation: Continuation) -> Result<Vec<Effect>> {
        match (continuation, self.state) {
            (
                Continuation::EnablePoint { path, depth },
                TraversalState::RevealPending {
                    path: pending_path,
                    depth: pending_depth,
                },
            ) if path == pending_path && depth == pending_depth => {
                self.set_status(path, depth, PointStatus::Selectable);
                self.state = TraversalState::AwaitingChoice { path, depth };
                Ok(vec![Effect::PointEnabled { path, depth }])
            }
            (Continuation::ExposeAdvanceControl, TraversalState::Resolved) => {
                self.state = TraversalState::AdvanceReady;
                Ok(vec![Effect::AdvanceControlExposed])
            }
            _ => Err(Error::UnexpectedContinuation {
                continuation: continuation.to_string(),
            }),
        }
    }

    fn resolve(&mut self, now: DateTime<Utc>) -> Vec<Effect> {
        let final_score = self.config.score;
        let is_correct = final_score == self.config.target;
        self.config.final_score = Some(final_score);
        self.config.is_correct = Some(is_correct);
        self.config.end_time = Some(now);
        self.state = TraversalState::Resolved;

        vec![
            Effect::Resolved {
                final_score,
                target: self.config.target,
                is_correct,
            },
            Effect::ScheduleContinuation {
                delay: self.timings.advance_control,
                next: Continuation::ExposeAdvanceControl,
            },
        ]
    }

    fn point(&self, path: PathLabel, depth: usize) -> Option<&ChoicePoint> {
        self.points[path.index()].get(depth)
    }

    fn set_status(&mut self, path: PathLabel, depth: usize, status: PointStatus) {
        if let Some(point) = self.points[path.index()].get_mut(depth) {
            point.status = status;
        }
    }
}

//! Presenter port - what the task core tells the rendering surface
//!
//! The core never draws anything. It reports round starts, score
//! transitions, and round outcomes, and leaves the visuals to the adapter.

use crate::{Result, icons::IconAssignment, round::PathLabel, session::RoundStarted};

/// Receives presentation events from a session
///
/// # Event Sequence
///
/// 1. `on_round_start(round)` - Once per round
/// 2. For each choice:
///    - `on_transition(from, to)`
///    - `on_choice_enabled(path, depth)` - When the next point unlocks
/// 3. `on_round_end(final_score, target, is_correct)`
/// 4. `on_advance_available()` - Next-round control is shown
/// 5. `on_curriculum_complete(icons)` - Once, after the last round
///
/// # Examples
///
/// ```no_run
/// use pathtask::ports::Presenter;
///
/// struct ScoreLog {
///     transitions: Vec<(i32, i32)>,
/// }
///
/// impl Presenter for ScoreLog {
///     fn on_transition(&mut self, from: i32, to: i32) -> pathtask::Result<()> {
///         self.transitions.push((from, to));
///         Ok(())
///     }
/// }
/// ```
pub trait Presenter: Send {
    /// Called when a round is ready to play.
    fn on_round_start(&mut self, _round: &RoundStarted) -> Result<()> {
        Ok(())
    }

    /// Called when a choice moves the running score.
    fn on_transition(&mut self, _from: i32, _to: i32) -> Result<()> {
        Ok(())
    }

    /// Called when a choice point becomes selectable after its delay.
    fn on_choice_enabled(&mut self, _path: PathLabel, _depth: usize) -> Result<()> {
        Ok(())
    }

    /// Called when the last choice resolves the round.
    fn on_round_end(&mut self, _final_score: i32, _target: i32, _is_correct: bool) -> Result<()> {
        Ok(())
    }

    /// Called when the next-round control should be shown.
    fn on_advance_available(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called once after the final round, with the session's icon mapping
    /// for downstream bookkeeping.
    fn on_curriculum_complete(&mut self, _icons: &IconAssignment) -> Result<()> {
        Ok(())
    }
}

/// Presenter that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

//! Presenter that reports every presentation event through `tracing`.

use tracing::{debug, info};

use crate::{
    Result, concept::format_sequence, curriculum::Phase, icons::IconAssignment,
    ports::Presenter, round::PathLabel, session::RoundStarted,
};

/// Logs presentation events; useful for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPresenter;

impl TracingPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Presenter for TracingPresenter {
    fn on_round_start(&mut self, round: &RoundStarted) -> Result<()> {
        info!(
            round = round.round_index + 1,
            of = round.total_rounds,
            phase = %round.phase,
            start = round.config.start,
            target = round.config.target,
            path_a = %format_sequence(&round.config.path_a.sequence),
            path_b = %format_sequence(&round.config.path_b.sequence),
            "round started"
        );
        Ok(())
    }

    fn on_transition(&mut self, from: i32, to: i32) -> Result<()> {
        debug!(from, to, "score transition");
        Ok(())
    }

    fn on_choice_enabled(&mut self, path: PathLabel, depth: usize) -> Result<()> {
        debug!(%path, depth, "choice point enabled");
        Ok(())
    }

    fn on_round_end(&mut self, final_score: i32, target: i32, is_correct: bool) -> Result<()> {
        info!(final_score, target, is_correct, "round ended");
        Ok(())
    }

    fn on_curriculum_complete(&mut self, icons: &IconAssignment) -> Result<()> {
        info!(
            training_icons = %icons.describe(Phase::Training),
            transfer_icons = %icons.describe(Phase::Transfer),
            "curriculum complete"
        );
        Ok(())
    }
}

//! Common test utilities for the pathtask test suite.
//!
//! Provides hand-built rounds and a presenter that records every event.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use pathtask::{
    ConceptSymbol, ConceptTable, PathLabel, RoundConfig, icons::IconAssignment, ports::Presenter,
    round::PathSpec, session::RoundStarted,
};

/// Build a round from explicit paths; ends are folded with the standard table.
pub fn round(
    start: i32,
    path_a: &[ConceptSymbol],
    path_b: &[ConceptSymbol],
    target_path: PathLabel,
) -> RoundConfig {
    let table = ConceptTable::standard();
    let path_a = PathSpec::new(path_a.to_vec(), table.fold(start, path_a));
    let path_b = PathSpec::new(path_b.to_vec(), table.fold(start, path_b));
    let target = match target_path {
        PathLabel::A => path_a.end,
        PathLabel::B => path_b.end,
    };
    let concept_level = path_a
        .sequence
        .iter()
        .chain(&path_b.sequence)
        .map(|symbol| symbol.ordinal())
        .max()
        .unwrap_or(1)
        .max(1);

    RoundConfig {
        start,
        concept_level,
        strategy_level: path_a.sequence.len(),
        path_a,
        path_b,
        target_path,
        target,
        score: start,
        final_score: None,
        is_correct: None,
        start_time: None,
        end_time: None,
    }
}

/// Presentation event captured by [`RecordingPresenter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    RoundStart { index: usize, phase: String },
    Transition { from: i32, to: i32 },
    ChoiceEnabled { path: PathLabel, depth: usize },
    RoundEnd { final_score: i32, is_correct: bool },
    AdvanceAvailable,
    CurriculumComplete,
}

/// Presenter that records events into shared storage
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Event) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| matches(*e)).count()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl Presenter for RecordingPresenter {
    fn on_round_start(&mut self, round: &RoundStarted) -> pathtask::Result<()> {
        self.push(Event::RoundStart {
            index: round.round_index,
            phase: round.phase.to_string(),
        });
        Ok(())
    }

    fn on_transition(&mut self, from: i32, to: i32) -> pathtask::Result<()> {
        self.push(Event::Transition { from, to });
        Ok(())
    }

    fn on_choice_enabled(&mut self, path: PathLabel, depth: usize) -> pathtask::Result<()> {
        self.push(Event::ChoiceEnabled { path, depth });
        Ok(())
    }

    fn on_round_end(
        &mut self,
        final_score: i32,
        _target: i32,
        is_correct: bool,
    ) -> pathtask::Result<()> {
        self.push(Event::RoundEnd {
            final_score,
            is_correct,
        });
        Ok(())
    }

    fn on_advance_available(&mut self) -> pathtask::Result<()> {
        self.push(Event::AdvanceAvailable);
        Ok(())
    }

    fn on_curriculum_complete(&mut self, _icons: &IconAssignment) -> pathtask::Result<()> {
        self.push(Event::CurriculumComplete);
        Ok(())
    }
}

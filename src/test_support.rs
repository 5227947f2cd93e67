//! Fixtures shared by unit tests.

use chrono::{TimeZone, Utc};

use crate::{
    concept::ConceptSymbol,
    curriculum::Phase,
    round::{PathLabel, PathSpec, RoundConfig, RoundRecord},
};

/// The single-step round from start 3: path A `B` ends on 4 (the target),
/// path B `D` ends on -3.
pub fn single_step_round() -> RoundConfig {
    RoundConfig {
        start: 3,
        concept_level: 1,
        strategy_level: 1,
        path_a: PathSpec::new(vec![ConceptSymbol::B], 4),
        path_b: PathSpec::new(vec![ConceptSymbol::D], -3),
        target_path: PathLabel::A,
        target: 4,
        score: 3,
        final_score: None,
        is_correct: None,
        start_time: None,
        end_time: None,
    }
}

/// [`single_step_round`] resolved on path A, wrapped as a training record
pub fn resolved_record(round_index: usize) -> RoundRecord {
    let mut config = single_step_round();
    config.score = 4;
    config.final_score = Some(4);
    config.is_correct = Some(true);
    config.start_time = Utc.timestamp_opt(1_700_000_000, 0).single();
    config.end_time = Utc.timestamp_opt(1_700_000_012, 0).single();
    RoundRecord {
        session: Some("fixture".to_string()),
        round_index,
        phase: Phase::Training,
        config,
    }
}

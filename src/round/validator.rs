//! Round well-formedness checks

use std::{fmt, ops::RangeInclusive};

use super::{
    SCORE_MAX, SCORE_MIN,
    config::{PathLabel, RoundConfig},
};
use crate::{
    concept::{ConceptSymbol, ConceptTable},
    curriculum::Phase,
};

/// Lowest ordinal the coverage rule may demand.
pub const MIN_COVERAGE_ORDINAL: usize = 0;

/// Ordinals that must each appear at least once across both paths.
///
/// Training demands the newest concept at this level. Test and transfer
/// demand the three newest, with the lower bound clamped to
/// [`MIN_COVERAGE_ORDINAL`] so low levels stay satisfiable.
pub fn required_ordinals(phase: Phase, concept_level: usize) -> RangeInclusive<usize> {
    match phase {
        Phase::Training => concept_level..=concept_level,
        Phase::Test | Phase::Transfer => {
            concept_level.saturating_sub(2).max(MIN_COVERAGE_ORDINAL)..=concept_level
        }
    }
}

/// Reason a candidate round was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    IdenticalSequences,
    EndOutOfRange { path: PathLabel, end: i32 },
    EqualEnds { end: i32 },
    TargetMismatch,
    TargetEqualsStart,
    MissingConcept { ordinal: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::IdenticalSequences => write!(f, "both paths use the same sequence"),
            Rejection::EndOutOfRange { path, end } => {
                write!(f, "{path} ends at {end}, outside [{SCORE_MIN}, {SCORE_MAX}]")
            }
            Rejection::EqualEnds { end } => write!(f, "both paths end at {end}"),
            Rejection::TargetMismatch => write!(f, "target is not its source path's end"),
            Rejection::TargetEqualsStart => write!(f, "target equals the start score"),
            Rejection::MissingConcept { ordinal } => match ConceptSymbol::from_ordinal(*ordinal) {
                Some(symbol) => write!(f, "concept {symbol} does not appear"),
                None => write!(f, "concept ordinal {ordinal} does not exist"),
            },
        }
    }
}

/// Pure predicate over candidate rounds
#[derive(Debug, Clone, Default)]
pub struct RoundValidator {
    table: ConceptTable,
}

impl RoundValidator {
    pub fn new(table: ConceptTable) -> Self {
        Self { table }
    }

    pub fn is_valid(&self, candidate: &RoundConfig, phase: Phase) -> bool {
        self.check(candidate, phase).is_ok()
    }

    /// Check a candidate, returning the first violated constraint.
    pub fn check(&self, candidate: &RoundConfig, phase: Phase) -> Result<(), Rejection> {
        if candidate.path_a.sequence == candidate.path_b.sequence {
            return Err(Rejection::IdenticalSequences);
        }

        for label in PathLabel::BOTH {
            let end = candidate.path(label).end;
            if !(SCORE_MIN..=SCORE_MAX).contains(&end) {
                return Err(Rejection::EndOutOfRange { path: label, end });
            }
        }

        if candidate.path_a.end == candidate.path_b.end {
            return Err(Rejection::EqualEnds {
                end: candidate.path_a.end,
            });
        }

        if candidate.target == candidate.start {
            return Err(Rejection::TargetEqualsStart);
        }
        if candidate.target != candidate.path(candidate.target_source()).end {
            return Err(Rejection::TargetMismatch);
        }

        for ordinal in required_ordinals(phase, candidate.concept_level) {
            let present = self
                .table
                .symbol_at(ordinal)
                .is_some_and(|symbol| candidate.combined_symbols().any(|s| s == symbol));
            if !present {
                return Err(Rejection::MissingConcept { ordinal });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        concept::ConceptSymbol::{self, *},
        round::PathSpec,
    };

    fn candidate(start: i32, a: &[ConceptSymbol], b: &[ConceptSymbol], level: usize) -> RoundConfig {
        let table = ConceptTable::standard();
        let path_a = PathSpec::new(a.to_vec(), table.fold(start, a));
        let path_b = PathSpec::new(b.to_vec(), table.fold(start, b));
        let target = path_a.end;
        RoundConfig {
            start,
            concept_level: level,
            strategy_level: a.len(),
            path_a,
            path_b,
            target_path: PathLabel::A,
            target,
            score: start,
            final_score: None,
            is_correct: None,
            start_time: None,
            end_time: None,
        }
    }

    #[test]
    fn test_required_ordinals_clamp() {
        assert_eq!(required_ordinals(Phase::Training, 3), 3..=3);
        assert_eq!(required_ordinals(Phase::Test, 4), 2..=4);
        assert_eq!(required_ordinals(Phase::Transfer, 1), 0..=1);
        assert_eq!(required_ordinals(Phase::Test, 0), 0..=0);
    }

    #[test]
    fn test_accepts_well_formed_round() {
        let validator = RoundValidator::default();
        let round = candidate(3, &[B], &[D], 1);
        // B covers level 1
        assert_eq!(validator.check(&round, Phase::Training), Ok(()));
    }

    #[test]
    fn test_rejects_identical_sequences() {
        let validator = RoundValidator::default();
        let round = candidate(3, &[B, C], &[B, C], 2);
        assert_eq!(
            validator.check(&round, Phase::Training),
            Err(Rejection::IdenticalSequences)
        );
    }

    #[test]
    fn test_rejects_out_of_range_end() {
        let validator = RoundValidator::default();
        let round = candidate(8, &[C], &[B], 2);
        assert_eq!(
            validator.check(&round, Phase::Training),
            Err(Rejection::EndOutOfRange {
                path: PathLabel::A,
                end: 16
            })
        );
    }

    #[test]
    fn test_rejects_equal_ends() {
        let validator = RoundValidator::default();
        // 2 * 2 = 4 and 2 + 1 + 1 = 4
        let round = candidate(2, &[C, A], &[B, B], 2);
        assert_eq!(
            validator.check(&round, Phase::Training),
            Err(Rejection::EqualEnds { end: 4 })
        );
    }

    #[test]
    fn test_training_requires_newest_concept() {
        let validator = RoundValidator::default();
        let round = candidate(1, &[A, B], &[B, B], 2);
        assert_eq!(
            validator.check(&round, Phase::Training),
            Err(Rejection::MissingConcept { ordinal: 2 })
        );
    }

    #[test]
    fn test_test_phase_requires_three_newest_concepts() {
        let validator = RoundValidator::default();
        let missing_c = candidate(2, &[D, E, A, B], &[B, D, A, E], 4);
        assert_eq!(
            validator.check(&missing_c, Phase::Test),
            Err(Rejection::MissingConcept { ordinal: 2 })
        );
        // Training only needs E
        assert!(validator.is_valid(&missing_c, Phase::Training));

        let covered = candidate(2, &[C, D, E, B], &[B, B, A, A], 4);
        assert!(validator.is_valid(&covered, Phase::Test));
        assert!(validator.is_valid(&covered, Phase::Transfer));
    }

    #[test]
    fn test_target_from_other_path_keeps_sampled_label() {
        let validator = RoundValidator::default();
        // Path A stays on 3, so the target comes from path B
        let mut round = candidate(3, &[A], &[B], 1);
        round.target = round.path_b.end;
        assert_eq!(round.target_source(), PathLabel::B);
        assert_eq!(validator.check(&round, Phase::Training), Ok(()));

        round.target_path = PathLabel::B;
        round.target = 7;
        assert_eq!(
            validator.check(&round, Phase::Training),
            Err(Rejection::TargetMismatch)
        );
    }

    #[test]
    fn test_rejects_target_equal_to_start() {
        let validator = RoundValidator::default();
        let mut round = candidate(3, &[A], &[B], 1);
        round.target_path = PathLabel::A;
        round.target = round.path_a.end;
        assert_eq!(
            validator.check(&round, Phase::Training),
            Err(Rejection::TargetEqualsStart)
        );
    }
}

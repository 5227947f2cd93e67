//! Tests for round generation, validation, and rejection sampling

mod common;

use pathtask::{
    ConceptSymbol::{self, *},
    ConceptTable, Error, PathLabel, Phase, RoundFactory, RoundValidator, Transform,
    round::{Rejection, SCORE_MAX, SCORE_MIN, required_ordinals},
};
use rand::{SeedableRng, rngs::StdRng};

use common::round;

fn assert_well_formed(config: &pathtask::RoundConfig, phase: Phase) {
    let table = ConceptTable::standard();
    assert_ne!(config.path_a.sequence, config.path_b.sequence);
    assert_ne!(config.path_a.end, config.path_b.end);
    for path in PathLabel::BOTH {
        let spec = config.path(path);
        assert_eq!(spec.end, table.fold(config.start, &spec.sequence));
        assert!((SCORE_MIN..=SCORE_MAX).contains(&spec.end));
        assert_eq!(spec.sequence.len(), config.strategy_level);
    }
    assert!((SCORE_MIN..=SCORE_MAX).contains(&config.start));
    assert_eq!(config.target, config.path(config.target_source()).end);
    assert_ne!(config.target, config.start);

    let symbols: Vec<ConceptSymbol> = config.combined_symbols().collect();
    assert!(symbols.iter().all(|s| s.ordinal() <= config.concept_level));
    for ordinal in required_ordinals(phase, config.concept_level) {
        assert!(
            symbols.iter().any(|s| s.ordinal() == ordinal),
            "ordinal {ordinal} missing from {}",
            config.describe()
        );
    }
}

#[test]
fn test_created_rounds_are_well_formed_at_every_level() {
    let factory = RoundFactory::default().with_retry_budget(500);
    let mut rng = StdRng::seed_from_u64(2024);

    for concept in 1..=4 {
        for strategy in 1..=4 {
            for _ in 0..10 {
                let config = factory
                    .create(concept, strategy, Phase::Training, &mut rng)
                    .unwrap();
                assert_eq!(config.concept_level, concept);
                assert_eq!(config.strategy_level, strategy);
                assert_well_formed(&config, Phase::Training);
            }
        }
    }
}

#[test]
fn test_hardest_test_round_covers_three_newest_concepts() {
    let factory = RoundFactory::default().with_retry_budget(500);
    let mut rng = StdRng::seed_from_u64(99);

    for phase in [Phase::Test, Phase::Transfer] {
        for _ in 0..25 {
            let config = factory.create(4, 4, phase, &mut rng).unwrap();
            let symbols: Vec<ConceptSymbol> = config.combined_symbols().collect();
            for symbol in [C, D, E] {
                assert!(symbols.contains(&symbol), "{symbol} missing");
            }
            assert_well_formed(&config, phase);
        }
    }
}

#[test]
fn test_coverage_window_is_clamped_at_low_levels() {
    assert_eq!(required_ordinals(Phase::Test, 1), 0..=1);
    assert_eq!(required_ordinals(Phase::Transfer, 2), 0..=2);
    assert_eq!(required_ordinals(Phase::Test, 4), 2..=4);
    assert_eq!(required_ordinals(Phase::Training, 3), 3..=3);
}

#[test]
fn test_same_seed_same_rounds() {
    let factory = RoundFactory::default().with_retry_budget(500);
    let mut first = StdRng::seed_from_u64(5);
    let mut second = StdRng::seed_from_u64(5);

    for _ in 0..20 {
        let a = factory.create(3, 3, Phase::Training, &mut first).unwrap();
        let b = factory.create(3, 3, Phase::Training, &mut second).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_unsatisfiable_table_fails_after_budget() {
    let table = ConceptTable::with_transforms([Transform::Identity; 5]);
    let factory = RoundFactory::new(table).with_retry_budget(26);
    let mut rng = StdRng::seed_from_u64(1);

    match factory.create(2, 2, Phase::Training, &mut rng) {
        Err(Error::RoundGenerationExhausted { attempts, .. }) => assert_eq!(attempts, 26),
        other => panic!("expected exhaustion, got {other:?}"),
    }
}

#[test]
fn test_out_of_range_levels_are_rejected() {
    let factory = RoundFactory::default();
    let mut rng = StdRng::seed_from_u64(1);
    for (concept, strategy) in [(0, 1), (5, 1), (2, 0)] {
        assert!(matches!(
            factory.create(concept, strategy, Phase::Training, &mut rng),
            Err(Error::InvalidLevels { .. })
        ));
    }
}

#[test]
fn test_validator_rejections() {
    let validator = RoundValidator::default();

    let identical = round(2, &[B, B], &[B, B], PathLabel::A);
    assert_eq!(
        validator.check(&identical, Phase::Training),
        Err(Rejection::IdenticalSequences)
    );

    // A then B and B then A both end on start + 1
    let equal_ends = round(2, &[A, B], &[B, A], PathLabel::A);
    assert_eq!(
        validator.check(&equal_ends, Phase::Training),
        Err(Rejection::EqualEnds { end: 3 })
    );

    let overflow = round(9, &[C], &[A], PathLabel::B);
    assert_eq!(
        validator.check(&overflow, Phase::Training),
        Err(Rejection::EndOutOfRange {
            path: PathLabel::A,
            end: 18
        })
    );

    let missing = round(2, &[B], &[A], PathLabel::A);
    let mut at_level_two = missing.clone();
    at_level_two.concept_level = 2;
    assert_eq!(
        validator.check(&at_level_two, Phase::Training),
        Err(Rejection::MissingConcept { ordinal: 2 })
    );
    assert!(validator.is_valid(&missing, Phase::Training));
}

#[test]
fn test_target_never_equals_start() {
    let factory = RoundFactory::default().with_retry_budget(500);
    let mut rng = StdRng::seed_from_u64(77);
    for _ in 0..200 {
        let config = factory.create(4, 2, Phase::Training, &mut rng).unwrap();
        assert_ne!(config.target, config.start);
    }
}

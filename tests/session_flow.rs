//! End-to-end tests for the session driver

mod common;

use pathtask::{
    Error, Orientation, PathLabel, Phase, RoundRecord, Session, SessionStep, TraversalTimings,
    adapters::{InMemoryRoundSink, JsonlRoundSink},
    app::SessionConfig,
    icons::IconAssignment,
    pipeline::{OracleParticipant, Pacing, RandomParticipant, drive_effects, play_round},
    ports::{NullPresenter, Presenter, RoundSink},
    round::DEFAULT_RETRY_BUDGET,
    session::{RoundStarted, SessionStatus},
};

use common::{Event, RecordingPresenter};

/// Sink whose first write fails, then forwards to an in-memory sink
struct FailOnceSink {
    inner: InMemoryRoundSink,
    failed: bool,
}

impl RoundSink for FailOnceSink {
    fn persist_round(&mut self, record: &RoundRecord) -> pathtask::Result<()> {
        if !self.failed {
            self.failed = true;
            return Err(Error::Io {
                operation: "persist round".to_string(),
                source: std::io::Error::other("transport down"),
            });
        }
        self.inner.persist_round(record)
    }

    fn flush(&mut self) -> pathtask::Result<()> {
        self.inner.flush()
    }
}

/// Presenter whose every hook fails
struct BrokenPresenter;

fn display_error() -> Error {
    Error::InvalidConfiguration {
        message: "display unavailable".to_string(),
    }
}

impl Presenter for BrokenPresenter {
    fn on_round_start(&mut self, _round: &RoundStarted) -> pathtask::Result<()> {
        Err(display_error())
    }

    fn on_transition(&mut self, _from: i32, _to: i32) -> pathtask::Result<()> {
        Err(display_error())
    }

    fn on_choice_enabled(&mut self, _path: PathLabel, _depth: usize) -> pathtask::Result<()> {
        Err(display_error())
    }

    fn on_round_end(&mut self, _score: i32, _target: i32, _correct: bool) -> pathtask::Result<()> {
        Err(display_error())
    }

    fn on_advance_available(&mut self) -> pathtask::Result<()> {
        Err(display_error())
    }

    fn on_curriculum_complete(&mut self, _icons: &IconAssignment) -> pathtask::Result<()> {
        Err(display_error())
    }
}

fn config(seed: u64) -> SessionConfig {
    SessionConfig::new(Orientation::Concept)
        .with_seed(seed)
        .with_timings(TraversalTimings::immediate())
        .with_retry_budget(500)
        .with_session_id("test-session")
}

#[test]
fn test_full_session_persists_every_round_once() {
    let presenter = RecordingPresenter::new();
    let sink = InMemoryRoundSink::new();
    let mut session = Session::new(
        config(42),
        Box::new(presenter.clone()),
        Box::new(sink.clone()),
    )
    .unwrap();
    let mut participant = RandomParticipant::with_seed("random".to_string(), 7);

    let mut rounds = 0;
    while let SessionStep::Round(started) = session.advance().unwrap() {
        assert_eq!(started.round_index, rounds);
        assert_eq!(started.total_rounds, 48);
        play_round(&mut session, &mut participant, Pacing::Immediate).unwrap();
        rounds += 1;
    }

    assert_eq!(rounds, 48);
    assert_eq!(session.status(), SessionStatus::Complete);
    assert_eq!(sink.count(), 48);
    assert_eq!(sink.flush_count(), 1);
    assert_eq!(
        presenter.count(|e| matches!(e, Event::CurriculumComplete)),
        1
    );
    assert_eq!(presenter.count(|e| matches!(e, Event::RoundEnd { .. })), 48);

    let records = sink.records();
    for (index, record) in records.iter().enumerate() {
        assert_eq!(record.round_index, index);
        assert_eq!(record.session.as_deref(), Some("test-session"));
        assert!(record.config.is_finalized());
        assert!(record.config.start_time.is_some());
        assert_eq!(
            record.config.is_correct,
            record.config.final_score.map(|s| s == record.config.target)
        );
    }
    assert_eq!(records.iter().filter(|r| r.phase == Phase::Test).count(), 8);
    assert_eq!(
        records.iter().filter(|r| r.phase == Phase::Transfer).count(),
        8
    );

    // Finished sessions refuse further work
    assert!(matches!(session.advance(), Err(Error::CurriculumComplete)));
}

#[test]
fn test_oracle_session_is_all_correct() {
    let sink = InMemoryRoundSink::new();
    let mut session = Session::new(
        config(3),
        Box::new(RecordingPresenter::new()),
        Box::new(sink.clone()),
    )
    .unwrap();
    let mut oracle = OracleParticipant::new("oracle".to_string());

    while let SessionStep::Round(_) = session.advance().unwrap() {
        let played = play_round(&mut session, &mut oracle, Pacing::Immediate).unwrap();
        assert!(played.is_correct);
    }
    assert!(
        sink.records()
            .iter()
            .all(|r| r.config.is_correct == Some(true))
    );
}

#[test]
fn test_cannot_advance_mid_round() {
    let mut session = Session::new(
        config(9),
        Box::new(NullPresenter),
        Box::new(InMemoryRoundSink::new()),
    )
    .unwrap();

    // Choosing before the first round exists
    assert!(matches!(
        session.choose(PathLabel::A, 0),
        Err(Error::NoActiveRound)
    ));

    session.advance().unwrap();
    assert!(matches!(session.advance(), Err(Error::RoundNotResolved)));

    // Resolve without resuming the advance-control continuation
    let effects = session.choose(PathLabel::A, 0).unwrap();
    assert!(matches!(session.advance(), Err(Error::AdvanceNotAvailable)));

    drive_effects(&mut session, effects, Pacing::Immediate).unwrap();
    assert!(matches!(session.advance(), Ok(SessionStep::Round(_))));
}

#[test]
fn test_presenter_sees_events_in_order() {
    let presenter = RecordingPresenter::new();
    let mut session = Session::new(
        config(12),
        Box::new(presenter.clone()),
        Box::new(InMemoryRoundSink::new()),
    )
    .unwrap();

    session.advance().unwrap();
    let effects = session.choose(PathLabel::B, 0).unwrap();
    drive_effects(&mut session, effects, Pacing::Immediate).unwrap();

    let events = presenter.events();
    assert!(matches!(events[0], Event::RoundStart { index: 0, .. }));
    assert!(matches!(events[1], Event::Transition { .. }));
    assert!(matches!(events[2], Event::RoundEnd { .. }));
    assert_eq!(events[3], Event::AdvanceAvailable);
}

#[test]
fn test_unsatisfiable_generation_aborts_session() {
    let mut session = Session::new(
        config(1).with_retry_budget(1),
        Box::new(RecordingPresenter::new()),
        Box::new(InMemoryRoundSink::new()),
    )
    .unwrap();
    let mut participant = RandomParticipant::with_seed("random".to_string(), 1);

    // With a single attempt per round some round will eventually fail
    let error = loop {
        match session.advance() {
            Ok(SessionStep::Round(_)) => {
                play_round(&mut session, &mut participant, Pacing::Immediate).unwrap();
            }
            Ok(SessionStep::Complete) => panic!("expected an aborted session"),
            Err(err) => break err,
        }
    };

    assert!(matches!(error, Error::RoundGenerationExhausted { .. }));
    assert_eq!(session.status(), SessionStatus::Aborted);
    assert!(matches!(session.advance(), Err(Error::SessionAborted)));
}

#[test]
fn test_jsonl_records_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rounds.jsonl");
    let mut session = Session::new(
        config(5),
        Box::new(RecordingPresenter::new()),
        Box::new(JsonlRoundSink::create(&path).unwrap()),
    )
    .unwrap();
    let mut oracle = OracleParticipant::new("oracle".to_string());

    while let SessionStep::Round(_) = session.advance().unwrap() {
        play_round(&mut session, &mut oracle, Pacing::Immediate).unwrap();
    }

    let records = JsonlRoundSink::read_all(&path).unwrap();
    assert_eq!(records.len(), 48);
    assert_eq!(records[47].phase, Phase::Transfer);
}

#[test]
fn test_orientation_from_host_params() {
    let params = [("CT".to_string(), "strategy".to_string())]
        .into_iter()
        .collect();
    let config = SessionConfig::from_params(&params).unwrap();
    let session = Session::new(
        config,
        Box::new(RecordingPresenter::new()),
        Box::new(InMemoryRoundSink::new()),
    )
    .unwrap();

    assert_eq!(session.curriculum().orientation, Orientation::Strategy);
    assert_eq!(session.curriculum().training[2].strategy_level, 2);
}

#[test]
fn test_failed_persist_keeps_round_until_retry() {
    let sink = InMemoryRoundSink::new();
    let mut session = Session::new(
        config(21),
        Box::new(NullPresenter),
        Box::new(FailOnceSink {
            inner: sink.clone(),
            failed: false,
        }),
    )
    .unwrap();
    let mut oracle = OracleParticipant::new("oracle".to_string());

    session.advance().unwrap();
    play_round(&mut session, &mut oracle, Pacing::Immediate).unwrap();

    assert!(matches!(session.advance(), Err(Error::Io { .. })));
    assert_eq!(session.current_round().map(|r| r.index), Some(0));
    assert!(session.traversal().is_some_and(|t| t.is_resolved()));
    assert_eq!(sink.count(), 0);

    match session.advance().unwrap() {
        SessionStep::Round(started) => assert_eq!(started.round_index, 1),
        SessionStep::Complete => panic!("expected round 1"),
    }
    play_round(&mut session, &mut oracle, Pacing::Immediate).unwrap();
    session.advance().unwrap();

    let indices: Vec<usize> = sink.records().iter().map(|r| r.round_index).collect();
    assert_eq!(indices, vec![0, 1]);
}

#[test]
fn test_failing_presenter_does_not_strand_rounds() {
    let sink = InMemoryRoundSink::new();
    let mut session =
        Session::new(config(8), Box::new(BrokenPresenter), Box::new(sink.clone())).unwrap();

    session.advance().unwrap();
    let effects = session.choose(PathLabel::A, 0).unwrap();
    assert!(
        effects
            .iter()
            .any(|e| matches!(e, pathtask::Effect::ScheduleContinuation { .. }))
    );
    drive_effects(&mut session, effects, Pacing::Immediate).unwrap();
    assert!(session.traversal().is_some_and(|t| t.advance_available()));

    let mut oracle = OracleParticipant::new("oracle".to_string());
    while let SessionStep::Round(_) = session.advance().unwrap() {
        play_round(&mut session, &mut oracle, Pacing::Immediate).unwrap();
    }
    assert_eq!(session.status(), SessionStatus::Complete);
    assert_eq!(sink.count(), 48);
}

#[test]
fn test_default_retry_budget_sessions_complete_or_abort_cleanly() {
    let mut completed = 0;

    for seed in 100..110 {
        let config = SessionConfig::new(Orientation::Concept)
            .with_seed(seed)
            .with_timings(TraversalTimings::immediate());
        assert_eq!(config.retry_budget, DEFAULT_RETRY_BUDGET);

        let sink = InMemoryRoundSink::new();
        let mut session =
            Session::new(config, Box::new(NullPresenter), Box::new(sink.clone())).unwrap();
        let mut participant = RandomParticipant::with_seed("random".to_string(), seed);

        let mut played = 0;
        let outcome = loop {
            match session.advance() {
                Ok(SessionStep::Round(_)) => {
                    play_round(&mut session, &mut participant, Pacing::Immediate).unwrap();
                    played += 1;
                }
                Ok(SessionStep::Complete) => break Ok(()),
                Err(err) => break Err(err),
            }
        };

        match outcome {
            Ok(()) => {
                completed += 1;
                assert_eq!(played, 48);
                assert_eq!(session.status(), SessionStatus::Complete);
            }
            Err(err) => {
                let Error::RoundGenerationExhausted { attempts, .. } = err else {
                    panic!("unexpected error: {err}");
                };
                assert_eq!(attempts, DEFAULT_RETRY_BUDGET);
                assert_eq!(session.status(), SessionStatus::Aborted);
            }
        }
        // Every round played before an abort is still persisted
        assert_eq!(sink.count(), played);
    }

    assert!(completed > 0);
}

//! Tests for the race session lifecycle and its snapshots.

use approx::assert_relative_eq;

use race_sorter_lib::{PivotPlacement, RaceConfig, RaceSession, RaceSnapshot, RaceState, SortMode};

fn config(seed: u64) -> RaceConfig {
    RaceConfig {
        seed: Some(seed),
        ..Default::default()
    }
}

/// Default configuration mirrors the six-car game.
#[test]
fn test_default_config() {
    let config = RaceConfig::default();
    assert_eq!(config.racer_count, 6);
    assert_relative_eq!(config.boost_factor, 1.5);
    assert_relative_eq!(config.boost_duration, 3.0);
    assert_eq!(config.pivot_placement, PivotPlacement::Low);
    assert!(config.seed.is_none());
}

/// Partial configs fill in defaults.
#[test]
fn test_config_from_partial_json() {
    let config: RaceConfig = serde_json::from_str(r#"{"racer_count": 8, "pivot_placement": "High"}"#).unwrap();
    assert_eq!(config.racer_count, 8);
    assert_eq!(config.pivot_placement, PivotPlacement::High);
    assert_relative_eq!(config.track_length, 475.0);
}

/// Same seed, same race.
#[test]
fn test_seeded_sessions_match() {
    let mut a = RaceSession::new(config(31));
    let mut b = RaceSession::new(config(31));

    a.start_race();
    b.start_race();

    assert_eq!(a.pivot_highlights(), b.pivot_highlights());
    assert_eq!(a.snapshot(), b.snapshot());
}

/// Snapshot flags the pivot slots and the boosted median.
#[test]
fn test_snapshot_after_start() {
    let mut session = RaceSession::new(config(12));
    session.set_mode(SortMode::Deterministic);
    session.start_race();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.state, RaceState::Racing);
    assert_eq!(snapshot.mode, SortMode::Deterministic);
    assert_eq!(snapshot.operations, session.operation_count());
    assert!(snapshot.racers[5].pivot_highlight);
    assert_eq!(snapshot.racers.iter().filter(|r| r.power_active).count(), 1);

    let json = serde_json::to_string(&snapshot).unwrap();
    let parsed: RaceSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.racers.len(), 6);
    assert_eq!(parsed.state, RaceState::Racing);
}

/// A mode switch rolls a new idle field.
#[test]
fn test_set_mode_resets_race() {
    let mut session = RaceSession::new(config(8));
    session.start_race();

    session.set_mode(SortMode::Deterministic);
    assert_eq!(session.state(), RaceState::Idle);
    assert_eq!(session.mode(), SortMode::Deterministic);
    assert_eq!(session.report().mode, SortMode::Deterministic);
    assert!(session.pivot_highlights().is_empty());
    for (i, racer) in session.racers().iter().enumerate() {
        assert_eq!(racer.lane, i);
    }
}

/// Updates before the start do nothing.
#[test]
fn test_update_while_idle() {
    let mut session = RaceSession::new(config(4));
    session.update(1.0);

    assert_eq!(session.state(), RaceState::Idle);
    assert!(session.racers().iter().all(|r| r.position == 0.0));
}

/// Engine + storage integration: build state, save it through the SQLite
/// store, restore it, and verify every query surface matches
use chrono::{Local, TimeZone};
use habit_engine::*;
use tempfile::NamedTempFile;

#[test]
fn test_engine_state_survives_store_round_trip() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let store = SqliteSnapshotStore::new(temp_file.path().to_path_buf()).unwrap();

    let now = Local.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let mut engine = Engine::with_clock("user-1", FixedClock::new(now));

    let reading = engine.create_habit("Reading", Some("leisure".to_string()), "teal").unwrap();
    let meditate = engine.create_habit("Meditate", None, "plum").unwrap();
    engine.switch_mode(&meditate, TimerMode::Countdown).unwrap();
    engine.adjust_countdown_input(&meditate, 4).unwrap();

    engine.start(&reading).unwrap();
    for _ in 0..90 {
        engine.tick();
    }
    engine.stop(&reading).unwrap();
    engine.manual_log(&meditate, 10, "2024-06-14").unwrap();
    engine.adjust_ledger("Reading", 5, false, "teal").unwrap();
    engine.set_goal(&reading, 60, GoalPeriod::Weekly, None, None).unwrap();

    store.save(&engine.to_snapshot()).unwrap();

    let restored = Engine::from_snapshot_with_clock(
        store.load("user-1").unwrap().expect("snapshot should exist"),
        FixedClock::new(now),
    );

    assert_eq!(engine.list_habits(), restored.list_habits());
    assert_eq!(
        engine.query_history(None, None),
        restored.query_history(None, None)
    );
    assert_eq!(engine.streak(&reading).unwrap(), restored.streak(&reading).unwrap());
    assert_eq!(
        engine.goal_progress(&reading).unwrap(),
        restored.goal_progress(&reading).unwrap()
    );
    assert_eq!(
        restored.habit(&meditate).unwrap().countdown_minutes,
        5
    );
}

#[test]
fn test_snapshots_are_isolated_per_user() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let store = SqliteSnapshotStore::new(temp_file.path().to_path_buf()).unwrap();

    let mut alpha = Engine::new("alpha");
    alpha.create_habit("Reading", None, "teal").unwrap();
    store.save(&alpha.to_snapshot()).unwrap();

    let mut beta = Engine::new("beta");
    beta.create_habit("Meditate", None, "plum").unwrap();
    beta.create_habit("Running", None, "rust").unwrap();
    store.save(&beta.to_snapshot()).unwrap();

    let alpha_back = store.load("alpha").unwrap().unwrap();
    let beta_back = store.load("beta").unwrap().unwrap();
    assert_eq!(alpha_back.habits.len(), 1);
    assert_eq!(beta_back.habits.len(), 2);

    store.delete("alpha").unwrap();
    assert!(store.load("alpha").unwrap().is_none());
    assert!(store.load("beta").unwrap().is_some());
}

#[test]
fn test_restored_engine_accepts_further_commands() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let store = SqliteSnapshotStore::new(temp_file.path().to_path_buf()).unwrap();

    let mut engine = Engine::new("user-1");
    let id = engine.create_habit("Reading", None, "teal").unwrap();
    engine.manual_log(&id, 30, "2024-01-01").unwrap();
    store.save(&engine.to_snapshot()).unwrap();

    let mut restored = Engine::from_snapshot(store.load("user-1").unwrap().unwrap());
    restored.manual_log(&id, 15, "2024-01-02").unwrap();
    assert_eq!(restored.streak(&id).unwrap(), 2);
    assert_eq!(restored.query_history(None, None).len(), 2);

    store.save(&restored.to_snapshot()).unwrap();
    let final_state = store.load("user-1").unwrap().unwrap();
    assert_eq!(final_state.records.len(), 2);
}

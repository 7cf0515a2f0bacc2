/// End-to-end command sequences exercising the documented product flows
use chrono::{Local, NaiveDate, TimeZone};
use habit_engine::*;

#[test]
fn test_reading_stopwatch_session() {
    let now = Local.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let mut engine = Engine::with_clock("user-1", FixedClock::new(now));
    let id = engine.create_habit("Reading", None, "teal").unwrap();

    engine.start(&id).unwrap();
    for _ in 0..125 {
        engine.tick();
    }
    let record = engine.stop(&id).unwrap().expect("session should commit");

    assert_eq!(record.duration_secs, 125);
    assert_eq!(record.kind, SessionKind::Stopwatch);
    assert_eq!(record.habit_name, "Reading");
    assert_eq!(engine.query_history(None, None).len(), 1);

    // First completion ever starts the streak at 1.
    assert_eq!(engine.streak(&id).unwrap(), 1);
    assert_eq!(
        engine.habit(&id).unwrap().last_completion,
        Some(now.date_naive())
    );
}

#[test]
fn test_meditate_countdown_auto_commits() {
    let now = Local.with_ymd_and_hms(2024, 6, 15, 7, 0, 0).unwrap();
    let mut engine = Engine::with_clock("user-1", FixedClock::new(now));
    let id = engine.create_habit("Meditate", None, "plum").unwrap();
    engine.switch_mode(&id, TimerMode::Countdown).unwrap();
    engine.adjust_countdown_input(&id, 9).unwrap(); // 10 minutes = 600s
    engine.start(&id).unwrap();

    let mut committed = Vec::new();
    for _ in 0..600 {
        committed.extend(engine.tick());
    }

    // No explicit stop occurred; the countdown committed itself.
    assert_eq!(committed.len(), 1);
    assert_eq!(committed[0].duration_secs, 600);
    assert_eq!(committed[0].kind, SessionKind::Countdown);

    let habit = engine.habit(&id).unwrap();
    assert!(!habit.running);
    assert_eq!(habit.elapsed_secs, 0);
    assert_eq!(engine.streak(&id).unwrap(), 1);
}

#[test]
fn test_manual_log_is_anchored_at_local_midnight() {
    // Current time is months after the logged date.
    let now = Local.with_ymd_and_hms(2024, 6, 15, 18, 30, 0).unwrap();
    let mut engine = Engine::with_clock("user-1", FixedClock::new(now));
    let id = engine.create_habit("Reading", None, "teal").unwrap();

    let record = engine.manual_log(&id, 30, "2024-01-01").unwrap();

    assert_eq!(record.duration_secs, 1800);
    assert_eq!(record.kind, SessionKind::Manual);
    assert_eq!(
        record.occurred_at_ms,
        local_midnight_ms(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    );
}

#[test]
fn test_custom_goal_window_includes_end_day_only() {
    let mut engine = Engine::with_clock(
        "user-1",
        FixedClock::new(Local.with_ymd_and_hms(2024, 1, 3, 23, 0, 0).unwrap()),
    );
    let id = engine.create_habit("Reading", None, "teal").unwrap();
    engine
        .set_goal(
            &id,
            60,
            GoalPeriod::Custom,
            Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            Some(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()),
        )
        .unwrap();

    // Logged at 23:00 on the inclusive end day: counts.
    engine.adjust_ledger("Reading", 20, true, "teal").unwrap();
    assert_eq!(engine.goal_progress(&id).unwrap().minutes, 20);

    // Logged at midnight of the following day: outside the window.
    engine
        .clock()
        .set(Local.with_ymd_and_hms(2024, 1, 4, 0, 0, 0).unwrap());
    engine.adjust_ledger("Reading", 60, true, "teal").unwrap();
    assert_eq!(engine.goal_progress(&id).unwrap().minutes, 20);
}

#[test]
fn test_daily_goal_resets_at_midnight() {
    let mut engine = Engine::with_clock(
        "user-1",
        FixedClock::new(Local.with_ymd_and_hms(2024, 6, 15, 22, 0, 0).unwrap()),
    );
    let id = engine.create_habit("Reading", None, "teal").unwrap();
    engine.set_goal(&id, 60, GoalPeriod::Daily, None, None).unwrap();

    engine.adjust_ledger("Reading", 45, true, "teal").unwrap();
    assert_eq!(engine.goal_progress(&id).unwrap().minutes, 45);

    // The next morning, yesterday's minutes no longer count.
    engine
        .clock()
        .set(Local.with_ymd_and_hms(2024, 6, 16, 8, 0, 0).unwrap());
    assert_eq!(engine.goal_progress(&id).unwrap().minutes, 0);
}

#[test]
fn test_weekly_goal_is_a_rolling_window() {
    let mut engine = Engine::with_clock(
        "user-1",
        FixedClock::new(Local.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()),
    );
    let id = engine.create_habit("Reading", None, "teal").unwrap();
    engine.set_goal(&id, 120, GoalPeriod::Weekly, None, None).unwrap();

    engine.adjust_ledger("Reading", 30, true, "teal").unwrap();

    // Six days later the session is still inside the rolling 7-day window.
    engine
        .clock()
        .set(Local.with_ymd_and_hms(2024, 6, 16, 12, 0, 0).unwrap());
    assert_eq!(engine.goal_progress(&id).unwrap().minutes, 30);

    // Eight days later it has rolled out.
    engine
        .clock()
        .set(Local.with_ymd_and_hms(2024, 6, 18, 13, 0, 0).unwrap());
    assert_eq!(engine.goal_progress(&id).unwrap().minutes, 0);
}

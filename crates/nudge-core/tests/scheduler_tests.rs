mod common;

use std::time::Duration;

use common::{create, create_test_db, lisbon, local, once_task, quota_task};
use jiff::{civil::Date, Timestamp, ToSpan, Zoned};
use nudge_core::{
    models::{Session, SnoozeState},
    AppSettings, Database, NudgeError, ReminderEvent, Repository, Result, Scheduler, Task,
};
use rusqlite::Connection;
use tempfile::TempDir;
use tokio::sync::{mpsc, oneshot};

fn minutes_later(at: &Zoned, minutes: i64) -> Zoned {
    at.checked_add(minutes.minutes()).unwrap()
}

fn tick(scheduler: &mut Scheduler, db: &mut Database, at: &Zoned) -> Vec<ReminderEvent> {
    scheduler
        .tick(db, at.timestamp(), at)
        .expect("tick should succeed")
}

#[test]
fn test_repeat_throttling() {
    let tz = lisbon();
    let (_temp_file, mut db) = create_test_db();
    let task = create(&mut db, &quota_task("Weekly Learning", Some(60)));
    let mut scheduler = Scheduler::new();
    let start = local(&tz, 2026, 2, 18, 12, 0);

    let events = tick(&mut scheduler, &mut db, &start);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].task_id, task.id);
    assert_eq!(events[0].title, "Weekly Learning");
    assert_eq!(
        events[0].message,
        "Progress: 0/60 min this work week. Open the panel to log or snooze."
    );
    assert_eq!(scheduler.last_fired(task.id), Some(start.timestamp()));

    assert!(tick(&mut scheduler, &mut db, &minutes_later(&start, 3)).is_empty());
    assert_eq!(scheduler.last_fired(task.id), Some(start.timestamp()));

    let later = minutes_later(&start, 6);
    assert_eq!(tick(&mut scheduler, &mut db, &later).len(), 1);
    assert_eq!(scheduler.last_fired(task.id), Some(later.timestamp()));
}

#[test]
fn test_repeat_interval_is_read_each_tick() {
    let tz = lisbon();
    let (_temp_file, mut db) = create_test_db();
    create(&mut db, &quota_task("Weekly Learning", Some(60)));
    let mut scheduler = Scheduler::new();
    let start = local(&tz, 2026, 2, 18, 12, 0);

    assert_eq!(tick(&mut scheduler, &mut db, &start).len(), 1);

    db.set_repeat_interval_minutes(10).unwrap();
    assert!(tick(&mut scheduler, &mut db, &minutes_later(&start, 6)).is_empty());
    assert_eq!(
        tick(&mut scheduler, &mut db, &minutes_later(&start, 10)).len(),
        1
    );
}

#[test]
fn test_should_throttle_boundary() {
    let tz = lisbon();
    let (_temp_file, mut db) = create_test_db();
    let task = create(&mut db, &quota_task("Weekly Learning", Some(60)));
    let mut scheduler = Scheduler::new();
    let start = local(&tz, 2026, 2, 18, 12, 0);

    assert!(!scheduler.should_throttle(task.id, start.timestamp(), 5));
    tick(&mut scheduler, &mut db, &start);

    let almost = start.timestamp().checked_add(299.seconds()).unwrap();
    let exactly = start.timestamp().checked_add(5.minutes()).unwrap();
    assert!(scheduler.should_throttle(task.id, almost, 5));
    assert!(!scheduler.should_throttle(task.id, exactly, 5));
}

#[test]
fn test_ineligible_tasks_do_not_fire() {
    let tz = lisbon();
    let (_temp_file, mut db) = create_test_db();
    let mut disabled = quota_task("Disabled", Some(60));
    disabled.enabled = false;
    create(&mut db, &disabled);
    create(&mut db, &once_task("Friday only", &[4]));
    let mut scheduler = Scheduler::new();

    assert!(tick(&mut scheduler, &mut db, &local(&tz, 2026, 2, 18, 12, 0)).is_empty());
    assert!(tick(&mut scheduler, &mut db, &local(&tz, 2026, 2, 21, 12, 0)).is_empty());
    assert_eq!(
        tick(&mut scheduler, &mut db, &local(&tz, 2026, 2, 20, 12, 0)).len(),
        1
    );
}

#[test]
fn test_snooze_expiry_lets_task_fire_again() {
    let tz = lisbon();
    let (_temp_file, mut db) = create_test_db();
    let task = create(&mut db, &quota_task("Weekly Learning", Some(60)));
    let mut scheduler = Scheduler::new();
    let start = local(&tz, 2026, 2, 18, 12, 0);

    db.set_snoozed_until(task.id, Some(minutes_later(&start, 20).timestamp()))
        .unwrap();
    assert!(tick(&mut scheduler, &mut db, &start).is_empty());
    assert!(tick(&mut scheduler, &mut db, &minutes_later(&start, 19)).is_empty());

    assert_eq!(
        tick(&mut scheduler, &mut db, &minutes_later(&start, 20)).len(),
        1
    );
    assert_eq!(db.get_snooze_state(task.id).unwrap().snoozed_until, None);
}

#[test]
fn test_failing_task_does_not_block_others() {
    let tz = lisbon();
    let (temp_file, mut db) = create_test_db();
    let broken = create(&mut db, &quota_task("Broken", Some(60)));
    let healthy = create(&mut db, &quota_task("Healthy", Some(60)));

    let raw = Connection::open(temp_file.path()).unwrap();
    raw.execute(
        "INSERT INTO snoozes (task_id, snoozed_until_utc, skipped_date_local) VALUES (?1, 'not a time', NULL)",
        [broken.id as i64],
    )
    .unwrap();

    let mut scheduler = Scheduler::new();
    let events = tick(&mut scheduler, &mut db, &local(&tz, 2026, 2, 18, 12, 0));

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].task_id, healthy.id);
    assert_eq!(scheduler.last_fired(broken.id), None);
}

#[test]
fn test_corrupt_task_row_does_not_block_others() {
    let tz = lisbon();
    let (temp_file, mut db) = create_test_db();
    let healthy = create(&mut db, &quota_task("Healthy", Some(60)));
    let corrupt = create(&mut db, &quota_task("Corrupt", Some(60)));

    let raw = Connection::open(temp_file.path()).unwrap();
    raw.execute(
        "UPDATE tasks SET active_weekdays = '0,x' WHERE id = ?1",
        [corrupt.id as i64],
    )
    .unwrap();

    let mut scheduler = Scheduler::new();
    let events = tick(&mut scheduler, &mut db, &local(&tz, 2026, 2, 18, 12, 0));

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].task_id, healthy.id);
    assert_eq!(scheduler.last_fired(corrupt.id), None);
}

#[test]
fn test_schedulers_track_independently() {
    let tz = lisbon();
    let (_temp_file, mut db) = create_test_db();
    create(&mut db, &quota_task("Weekly Learning", Some(60)));
    let start = local(&tz, 2026, 2, 18, 12, 0);

    let mut first = Scheduler::new();
    let mut second = Scheduler::new();

    assert_eq!(tick(&mut first, &mut db, &start).len(), 1);
    assert_eq!(tick(&mut second, &mut db, &start).len(), 1);
    assert!(tick(&mut first, &mut db, &minutes_later(&start, 1)).is_empty());
}

/// Repository whose task list cannot be read.
struct UnreadableTasks;

impl Repository for UnreadableTasks {
    fn get_settings(&self) -> Result<AppSettings> {
        Ok(AppSettings::default())
    }

    fn list_tasks(&self) -> Result<Vec<Task>> {
        Err(NudgeError::Configuration {
            message: "tasks unavailable".to_string(),
        })
    }

    fn get_task(&self, task_id: u64) -> Result<Task> {
        Err(NudgeError::TaskNotFound { id: task_id })
    }

    fn get_snooze_state(&self, _task_id: u64) -> Result<SnoozeState> {
        Ok(SnoozeState::default())
    }

    fn observe_snooze(&mut self, _task_id: u64, _now: Timestamp) -> Result<SnoozeState> {
        Ok(SnoozeState::default())
    }

    fn set_snoozed_until(&mut self, _task_id: u64, _until: Option<Timestamp>) -> Result<()> {
        Ok(())
    }

    fn set_skipped_date(&mut self, _task_id: u64, _date: Option<Date>) -> Result<()> {
        Ok(())
    }

    fn clear_snooze_and_skip(&mut self, _task_id: u64) -> Result<()> {
        Ok(())
    }

    fn is_session_running(&self, _task_id: u64) -> Result<bool> {
        Ok(false)
    }

    fn list_sessions(&self, _task_id: u64) -> Result<Vec<Session>> {
        Ok(Vec::new())
    }

    fn is_completed(&self, _task_id: u64, _period_key: &str) -> Result<bool> {
        Ok(false)
    }
}

#[test]
fn test_unreadable_task_list_fails_tick() {
    let now = local(&lisbon(), 2026, 2, 18, 12, 0);
    let mut scheduler = Scheduler::new();

    assert!(scheduler
        .tick(&mut UnreadableTasks, now.timestamp(), &now)
        .is_err());

    let fired = scheduler.tick_now(&mut UnreadableTasks, &|_: &ReminderEvent| {
        panic!("no reminder expected")
    });
    assert_eq!(fired, 0);
}

#[tokio::test]
async fn test_run_stops_on_shutdown() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nudge.db");
    let (event_tx, _event_rx) = mpsc::unbounded_channel::<ReminderEvent>();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let scheduler = Scheduler::new()
        .with_tick_interval(Duration::from_millis(20))
        .with_startup_delay(Duration::from_millis(5));
    let handle = tokio::spawn(scheduler.run(db_path.clone(), event_tx, async move {
        let _ = stop_rx.await;
    }));

    tokio::time::sleep(Duration::from_millis(80)).await;
    stop_tx.send(()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("scheduler should stop")
        .unwrap();
    assert!(result.is_ok());
    assert!(db_path.exists());
}

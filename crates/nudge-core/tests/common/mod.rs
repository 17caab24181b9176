#![allow(dead_code)]

use jiff::{
    civil::{self, Time},
    tz::TimeZone,
    Zoned,
};
use nudge_core::{
    models::{NewTask, TaskKind, WeekSchedule},
    Database, Task, Tracker, TrackerBuilder,
};
use tempfile::{NamedTempFile, TempDir};

/// Helper function to create a temporary database for testing
pub fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

/// Helper function to create a test tracker
pub async fn create_test_tracker() -> (TempDir, Tracker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker)
}

/// Europe/Lisbon rules as a POSIX TZ string, independent of the host tzdb.
pub fn lisbon() -> TimeZone {
    TimeZone::posix("WET0WEST,M3.5.0/1,M10.5.0").expect("valid POSIX TZ")
}

/// US Eastern-like rules with the spring transition moved to the second
/// Wednesday of March, so it lands inside a workweek.
pub fn midweek_dst() -> TimeZone {
    TimeZone::posix("EST5EDT,M3.2.3,M11.1.0").expect("valid POSIX TZ")
}

/// Local wall-clock instant in `tz`.
pub fn local(tz: &TimeZone, year: i16, month: i8, day: i8, hour: i8, minute: i8) -> Zoned {
    civil::date(year, month, day)
        .at(hour, minute, 0, 0)
        .to_zoned(tz.clone())
        .expect("valid local time")
}

pub fn quota_task(title: &str, goal: Option<u32>) -> NewTask {
    NewTask {
        title: title.to_string(),
        kind: TaskKind::WeeklyTimeQuota {
            weekly_goal_minutes: goal,
        },
        enabled: true,
        reminder_time: civil::time(11, 0, 0, 0),
        schedule: WeekSchedule::weekdays(),
    }
}

pub fn once_task(title: &str, days: &[u8]) -> NewTask {
    NewTask {
        title: title.to_string(),
        kind: TaskKind::CompleteOnce,
        enabled: true,
        reminder_time: civil::time(16, 0, 0, 0),
        schedule: WeekSchedule::new(days.iter().copied()),
    }
}

pub fn create(db: &mut Database, new_task: &NewTask) -> Task {
    db.create_task(new_task).expect("Failed to create task")
}

pub fn hhmm(hour: i8, minute: i8) -> Time {
    civil::time(hour, minute, 0, 0)
}

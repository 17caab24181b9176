//! Derives the reminder state of a task at one instant.
//!
//! [`compute_task_state`] is the single source of truth for whether a task
//! is done, due, running, snoozed or skipped, and whether a reminder may fire
//! right now (before repeat throttling). The scheduler and the status display
//! both consume the same [`TaskState`], so they never disagree.

use jiff::{tz::TimeZone, Timestamp, Zoned};
use serde::Serialize;

use crate::{
    error::Result,
    models::{AppSettings, Session, SessionKind, Task, TaskKind},
    period::{
        is_in_workweek, next_reminder_datetime_local, period_key_workweek,
        split_interval_by_workweek_in, to_local_in,
    },
    repository::Repository,
};

/// Immutable snapshot of a task's derived state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskState {
    pub task_id: u64,
    pub title: String,
    pub kind: TaskKind,

    pub enabled: bool,
    pub in_workweek: bool,
    pub active_today: bool,
    pub after_start_time: bool,

    pub skipped_today: bool,
    pub snoozed: bool,
    /// Live snooze instant; `None` once it has expired
    pub snoozed_until: Option<Timestamp>,

    /// A timed session is open (quota tasks only)
    pub running: bool,

    /// A completion record exists for the current period
    pub completed_override: bool,
    /// Logged minutes reached the goal (quota tasks only)
    pub done_by_minutes: bool,
    pub done: bool,

    pub goal_minutes: Option<u32>,
    pub done_minutes: Option<i64>,

    pub period_key: String,

    /// All reminder gates pass; repeat throttling is not included
    pub can_remind_now: bool,
    pub reminder_message: String,
    pub status_text: String,
}

/// Computes the state of `task` at `now_utc` / `now_local`.
///
/// `now_local` must be `now_utc` in the observer's time zone; session
/// periods are derived in that same zone. The only write is the expired
/// snooze cleanup performed by [`Repository::observe_snooze`].
pub fn compute_task_state<R>(
    repo: &mut R,
    task: &Task,
    now_utc: Timestamp,
    now_local: &Zoned,
    settings: &AppSettings,
) -> Result<TaskState>
where
    R: Repository + ?Sized,
{
    let enabled = task.enabled;
    let in_workweek = is_in_workweek(now_local)?;
    let active_today = task
        .schedule
        .is_active(now_local.weekday().to_monday_zero_offset());

    let snooze = repo.observe_snooze(task.id, now_utc)?;
    let skipped_today = snooze.is_skipped_on(now_local.date());
    let snoozed = snooze.is_snoozed_at(now_utc);

    let gate = next_reminder_datetime_local(now_local, settings.reminder_start_time)?;
    let after_start_time = now_local.timestamp() >= gate.timestamp();

    let period_key = period_key_workweek(now_local)?;
    let completed_override = repo.is_completed(task.id, &period_key)?;

    let mut running = false;
    let mut goal_minutes = None;
    let mut done_minutes = None;
    let mut done_by_minutes = false;

    let (done, status_text, reminder_message) = match task.kind {
        TaskKind::WeeklyTimeQuota {
            weekly_goal_minutes,
        } => {
            running = repo.is_session_running(task.id)?;
            let goal = weekly_goal_minutes.unwrap_or(0);
            let sessions = repo.list_sessions(task.id)?;
            let minutes =
                period_minutes(&sessions, &period_key, now_utc, now_local.time_zone())?;

            done_by_minutes = goal > 0 && minutes >= i64::from(goal);
            goal_minutes = Some(goal);
            done_minutes = Some(minutes);

            let done = completed_override || done_by_minutes;
            if done {
                (
                    true,
                    "DONE (this workweek)".to_string(),
                    "Done for this work week.".to_string(),
                )
            } else {
                let suffix = if running { " (running)" } else { "" };
                (
                    false,
                    format!("{minutes}/{goal} min{suffix}"),
                    format!(
                        "Progress: {minutes}/{goal} min this work week. Open the panel to log or snooze."
                    ),
                )
            }
        }
        TaskKind::CompleteOnce => {
            let done = completed_override;
            (
                done,
                if done { "DONE" } else { "DUE" }.to_string(),
                "Due. Open the panel to snooze, skip or complete.".to_string(),
            )
        }
    };

    // Complete-once tasks have no sessions, so only quota tasks are blocked.
    let running_blocks = task.kind.is_quota() && running;

    let can_remind_now = enabled
        && in_workweek
        && active_today
        && after_start_time
        && !skipped_today
        && !snoozed
        && !done
        && !running_blocks;

    Ok(TaskState {
        task_id: task.id,
        title: task.title.clone(),
        kind: task.kind,
        enabled,
        in_workweek,
        active_today,
        after_start_time,
        skipped_today,
        snoozed,
        snoozed_until: snooze.snoozed_until,
        running,
        completed_override,
        done_by_minutes,
        done,
        goal_minutes,
        done_minutes,
        period_key,
        can_remind_now,
        reminder_message,
        status_text,
    })
}

/// Minutes credited to the period `period_key`.
///
/// Only sessions whose own start falls in that period count. Manual entries
/// contribute their minutes; timed sessions contribute their overlap with
/// the start's workweek, with a running session measured up to `now`.
pub fn period_minutes(
    sessions: &[Session],
    period_key: &str,
    now: Timestamp,
    tz: &TimeZone,
) -> Result<i64> {
    let mut total = 0;
    for session in sessions {
        if period_key_workweek(&to_local_in(session.start, tz))? != period_key {
            continue;
        }
        total += match session.kind {
            SessionKind::Manual { minutes } => i64::from(minutes),
            SessionKind::Timed { end } => {
                split_interval_by_workweek_in(session.start, end.unwrap_or(now), tz)?
            }
        };
    }
    Ok(total)
}

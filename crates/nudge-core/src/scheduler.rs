//! Periodic reminder sweep with per-task repeat throttling.

use std::{collections::HashMap, future::Future, path::PathBuf, time::Duration};

use jiff::{SignedDuration, Timestamp, Zoned};
use log::{debug, info, warn};
use serde::Serialize;
use tokio::{
    sync::mpsc,
    time::{self, Instant, MissedTickBehavior},
};

use crate::{
    db::Database,
    engine::compute_task_state,
    error::Result,
    period::{now_utc, to_local},
    repository::Repository,
};

/// Time between regular ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(30);

/// Delay before the extra tick that catches reminders already due at startup.
pub const STARTUP_DELAY: Duration = Duration::from_secs(15);

/// A reminder that should be shown now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderEvent {
    pub task_id: u64,
    pub title: String,
    pub message: String,
}

/// Receives reminder events from the scheduler.
pub trait ReminderSink {
    fn remind(&self, event: &ReminderEvent);
}

impl<F> ReminderSink for F
where
    F: Fn(&ReminderEvent),
{
    fn remind(&self, event: &ReminderEvent) {
        self(event)
    }
}

impl ReminderSink for mpsc::UnboundedSender<ReminderEvent> {
    fn remind(&self, event: &ReminderEvent) {
        if self.send(event.clone()).is_err() {
            warn!("Reminder receiver dropped, event for task {} lost", event.task_id);
        }
    }
}

/// Decides which eligible tasks fire on each tick.
///
/// Last-fired instants live in memory only and reset with the process.
#[derive(Debug)]
pub struct Scheduler {
    last_fired: HashMap<u64, Timestamp>,
    tick_interval: Duration,
    startup_delay: Duration,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            last_fired: HashMap::new(),
            tick_interval: TICK_INTERVAL,
            startup_delay: STARTUP_DELAY,
        }
    }

    /// Overrides the regular tick interval.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Overrides the delay of the startup tick.
    pub fn with_startup_delay(mut self, delay: Duration) -> Self {
        self.startup_delay = delay;
        self
    }

    /// When the task last fired, if it has in this process.
    pub fn last_fired(&self, task_id: u64) -> Option<Timestamp> {
        self.last_fired.get(&task_id).copied()
    }

    /// Whether the task fired less than `repeat_minutes` before `now`.
    pub fn should_throttle(&self, task_id: u64, now: Timestamp, repeat_minutes: u32) -> bool {
        self.last_fired.get(&task_id).is_some_and(|last| {
            now.duration_since(*last) < SignedDuration::from_mins(i64::from(repeat_minutes))
        })
    }

    /// Runs one sweep over all tasks at the given instant.
    ///
    /// Every task is judged against the same `now_utc` / `now_local`. A task
    /// whose state cannot be computed is logged and skipped; the remaining
    /// tasks are still evaluated.
    ///
    /// # Errors
    ///
    /// Fails only if the settings or the task list cannot be read.
    pub fn tick<R>(
        &mut self,
        repo: &mut R,
        now_utc: Timestamp,
        now_local: &Zoned,
    ) -> Result<Vec<ReminderEvent>>
    where
        R: Repository + ?Sized,
    {
        let settings = repo.get_settings()?;
        let repeat_minutes = settings.effective_repeat_minutes();
        let tasks = repo.list_tasks()?;

        let mut events = Vec::new();
        for task in &tasks {
            let state = match compute_task_state(&mut *repo, task, now_utc, now_local, &settings) {
                Ok(state) => state,
                Err(e) => {
                    warn!("Skipping task {} this tick: {e}", task.id);
                    continue;
                }
            };

            if !state.can_remind_now {
                debug!("Task {} not eligible: {}", task.id, state.status_text);
                continue;
            }

            if self.should_throttle(task.id, now_utc, repeat_minutes) {
                debug!("Task {} throttled (repeat every {repeat_minutes} min)", task.id);
                continue;
            }

            self.last_fired.insert(task.id, now_utc);
            events.push(ReminderEvent {
                task_id: task.id,
                title: state.title,
                message: state.reminder_message,
            });
        }

        Ok(events)
    }

    /// Ticks at the current instant and hands the events to `sink`.
    ///
    /// Errors are logged; a failed tick never stops the loop.
    pub fn tick_now<R, S>(&mut self, repo: &mut R, sink: &S) -> usize
    where
        R: Repository + ?Sized,
        S: ReminderSink + ?Sized,
    {
        let now = now_utc();
        let now_local = to_local(now);

        match self.tick(repo, now, &now_local) {
            Ok(events) => {
                for event in &events {
                    info!("Reminder for task {}: {}", event.task_id, event.title);
                    sink.remind(event);
                }
                events.len()
            }
            Err(e) => {
                warn!("Reminder tick failed: {e}");
                0
            }
        }
    }

    /// Runs the reminder loop against the database at `db_path` until
    /// `shutdown` resolves.
    ///
    /// Ticks every tick interval, plus once after the startup delay.
    pub async fn run<S, F>(mut self, db_path: PathBuf, sink: S, shutdown: F) -> Result<()>
    where
        S: ReminderSink,
        F: Future<Output = ()>,
    {
        let mut db = Database::new(&db_path)?;

        let mut interval = time::interval_at(Instant::now() + self.tick_interval, self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let startup = time::sleep(self.startup_delay);
        tokio::pin!(startup);
        tokio::pin!(shutdown);
        let mut startup_pending = true;

        info!(
            "Scheduler started (tick every {}s)",
            self.tick_interval.as_secs()
        );

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                () = &mut startup, if startup_pending => startup_pending = false,
                _ = interval.tick() => {}
            }
            self.tick_now(&mut db, &sink);
        }

        info!("Scheduler stopped");
        Ok(())
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color and a private database
fn nudge_cmd(temp_dir: &TempDir) -> Command {
    let db_path = temp_dir.path().join("cli_test.db");
    let mut cmd = Command::cargo_bin("nudge").expect("Failed to find nudge binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

#[test]
fn test_cli_seeds_default_tasks() {
    let temp_dir = create_cli_test_environment();

    nudge_cmd(&temp_dir)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Weekly Learning (60 min)"))
        .stdout(predicate::str::contains(
            "2. Single weekly task example reminder",
        ))
        .stdout(predicate::str::contains("(disabled)"));

    // Seeding happens only once.
    nudge_cmd(&temp_dir)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3.").not());
}

#[test]
fn test_cli_default_command_shows_status() {
    let temp_dir = create_cli_test_environment();

    nudge_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("# This work week (workweek:"))
        .stdout(predicate::str::contains("Weekly Learning (60 min)"))
        .stdout(predicate::str::contains("- Status: 0/60 min"));
}

#[test]
fn test_cli_add_show_edit_delete_task() {
    let temp_dir = create_cli_test_environment();

    nudge_cmd(&temp_dir)
        .args(["task", "add", "Reading", "--goal", "90", "--days", "0,2", "--at", "10:30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task with ID: 3"))
        .stdout(predicate::str::contains("weekly time quota (90 min)"))
        .stdout(predicate::str::contains("- Days: Mon, Wed"))
        .stdout(predicate::str::contains("- Reminder time: 10:30"));

    nudge_cmd(&temp_dir)
        .args(["task", "edit", "3", "--title", "Deep reading", "--disable"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 3. Deep reading"))
        .stdout(predicate::str::contains("- Enabled: no"));

    nudge_cmd(&temp_dir)
        .args(["task", "show", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deep reading"));

    nudge_cmd(&temp_dir)
        .args(["task", "delete", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted task 3"));

    nudge_cmd(&temp_dir)
        .args(["task", "show", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task with ID 3 not found"));
}

#[test]
fn test_cli_rejects_invalid_task_input() {
    let temp_dir = create_cli_test_environment();

    nudge_cmd(&temp_dir)
        .args(["task", "add", "Report", "--type", "once", "--goal", "30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("weekly_goal_minutes"));

    nudge_cmd(&temp_dir)
        .args(["task", "add", "Report", "--at", "25:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid HH:MM time"));

    nudge_cmd(&temp_dir)
        .args(["task", "edit", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to update"));
}

#[test]
fn test_cli_log_minutes_shows_in_json_status() {
    let temp_dir = create_cli_test_environment();

    nudge_cmd(&temp_dir)
        .args(["session", "log", "1", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged minutes for task 1"));

    nudge_cmd(&temp_dir)
        .args(["status", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"done_minutes\": 25"))
        .stdout(predicate::str::contains("\"goal_minutes\": 60"));
}

#[test]
fn test_cli_session_timer() {
    let temp_dir = create_cli_test_environment();

    nudge_cmd(&temp_dir)
        .args(["session", "start", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Timer started for task 1"));

    nudge_cmd(&temp_dir)
        .args(["session", "start", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Timer already running"));

    nudge_cmd(&temp_dir)
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(running)"));

    nudge_cmd(&temp_dir)
        .args(["session", "toggle", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Timer stopped for task 1"));
}

#[test]
fn test_cli_sessions_need_quota_task() {
    let temp_dir = create_cli_test_environment();

    nudge_cmd(&temp_dir)
        .args(["session", "start", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a weekly time quota task"));
}

#[test]
fn test_cli_complete_and_undo() {
    let temp_dir = create_cli_test_environment();

    nudge_cmd(&temp_dir)
        .args(["complete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 2 done for this work week"));

    nudge_cmd(&temp_dir)
        .args(["complete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already complete"));

    nudge_cmd(&temp_dir)
        .args(["complete", "2", "--undo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("open again"));
}

#[test]
fn test_cli_reset_progress() {
    let temp_dir = create_cli_test_environment();

    nudge_cmd(&temp_dir)
        .args(["session", "log", "1", "60"])
        .assert()
        .success();

    nudge_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("DONE (this workweek)"));

    nudge_cmd(&temp_dir)
        .args(["reset", "1", "--progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 session(s) deleted"));

    nudge_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("- Status: 0/60 min"));
}

#[test]
fn test_cli_snooze_skip_clear() {
    let temp_dir = create_cli_test_environment();

    nudge_cmd(&temp_dir)
        .args(["snooze", "1", "--minutes", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 1 snoozed until"));

    nudge_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("- Snoozed until:"));

    nudge_cmd(&temp_dir)
        .args(["snooze", "1", "--tomorrow"])
        .assert()
        .success();

    nudge_cmd(&temp_dir)
        .args(["skip", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped for today"));

    nudge_cmd(&temp_dir)
        .args(["clear", "1"])
        .assert()
        .success();

    nudge_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Snoozed until").not())
        .stdout(predicate::str::contains("Skipped today").not());
}

#[test]
fn test_cli_snooze_requires_duration() {
    let temp_dir = create_cli_test_environment();

    nudge_cmd(&temp_dir).args(["snooze", "1"]).assert().failure();
    nudge_cmd(&temp_dir)
        .args(["snooze", "1", "--minutes", "5", "--tomorrow"])
        .assert()
        .failure();
}

#[test]
fn test_cli_settings() {
    let temp_dir = create_cli_test_environment();

    nudge_cmd(&temp_dir)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Reminders start at: 09:00"))
        .stdout(predicate::str::contains("- Repeat interval: 5 min"));

    nudge_cmd(&temp_dir)
        .args(["settings", "set", "--repeat", "10", "--start", "08:30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Reminders start at: 08:30"))
        .stdout(predicate::str::contains("- Repeat interval: 10 min"));

    nudge_cmd(&temp_dir)
        .args(["settings", "set", "--repeat", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1 minute"));
}

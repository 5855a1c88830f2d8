use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn stride_cmd() -> Command {
    let mut cmd = Command::cargo_bin("stride").expect("Failed to find stride binary");
    cmd.arg("--no-color");
    cmd
}

#[test]
fn test_cli_create_goal() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    stride_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "goal",
            "create",
            "Maya",
            "learning guitar",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created goal with ID: 1"))
        .stdout(predicate::str::contains("learning guitar"))
        .stdout(predicate::str::contains("Stage: onboarding"));
}

#[test]
fn test_cli_list_empty_goals() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    stride_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "goal", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No goals found."));
}

#[test]
fn test_cli_default_command_lists_goals() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    stride_cmd()
        .args(["--database-file", db_arg, "goal", "create", "Sam", "running"])
        .assert()
        .success();

    stride_cmd()
        .args(["--database-file", db_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Goals"))
        .stdout(predicate::str::contains("running"));
}

#[test]
fn test_cli_chat_flow_produces_plan() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    stride_cmd()
        .args(["--database-file", db_arg, "goal", "create", "Maya", "learning guitar"])
        .assert()
        .success();

    // Onboarding converges once the user signals readiness.
    stride_cmd()
        .args(["--database-file", db_arg, "chat", "1", "yes, I'm ready"])
        .assert()
        .success()
        .stdout(predicate::str::contains("finalize"));

    // Asking for a plan during confirming produces the step list.
    stride_cmd()
        .args(["--database-file", db_arg, "chat", "1", "let's build my plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Getting Started"))
        .stdout(predicate::str::contains("Mastery"));

    stride_cmd()
        .args(["--database-file", db_arg, "plan", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: pending_acceptance"));
}

#[test]
fn test_cli_accept_and_step_completion() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    stride_cmd()
        .args(["--database-file", db_arg, "goal", "create", "Maya", "learning guitar"])
        .assert()
        .success();
    stride_cmd()
        .args(["--database-file", db_arg, "chat", "1", "yes, I'm ready"])
        .assert()
        .success();
    stride_cmd()
        .args(["--database-file", db_arg, "chat", "1", "build my plan"])
        .assert()
        .success();

    stride_cmd()
        .args(["--database-file", db_arg, "goal", "accept", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("now active"));

    stride_cmd()
        .args(["--database-file", db_arg, "step", "done", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 1 marked done"))
        .stdout(predicate::str::contains("step 1 of 8"));

    // Accepting twice is an advisory no-op, not an error.
    stride_cmd()
        .args(["--database-file", db_arg, "goal", "accept", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no plan awaiting acceptance"));
}

#[test]
fn test_cli_chat_without_message_shows_welcome() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    stride_cmd()
        .args(["--database-file", db_arg, "goal", "create", "Maya", "learning guitar"])
        .assert()
        .success();

    stride_cmd()
        .args(["--database-file", db_arg, "chat", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("I'm Maya"))
        .stdout(predicate::str::contains("No messages yet."));
}

#[test]
fn test_cli_missing_goal_reports_error() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    stride_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "goal", "show", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Goal 42 not found."));

    stride_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "chat", "42", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

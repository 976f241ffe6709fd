use std::process::{Command, Output};

fn number_ladder(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_number-ladder"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch number-ladder")
}

#[test]
fn automate_with_zero_runs_fails() {
    let output = number_ladder(&["automate", "--runs", "0"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success(), "zero runs must not succeed");
    assert!(
        stderr.contains("invalid batch configuration"),
        "unexpected stderr: {stderr}"
    );
    assert!(stderr.contains("batch must execute at least one run"));
    assert!(output.stdout.is_empty());
}

#[test]
fn automate_reports_summary_for_every_run() {
    let output = number_ladder(&["automate", "--runs", "10", "--board-size", "3", "--seed", "1"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.starts_with("10 runs: "), "unexpected summary: {stdout}");
    assert!(stdout.contains("0 aborted"));
}

#[test]
fn seeded_automation_is_reproducible() {
    let args = ["automate", "--runs", "25", "--strategy", "randomized", "--seed", "9"];
    let first = number_ladder(&args);
    let second = number_ladder(&args);

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn narrow_range_is_rejected_before_play() {
    let output = number_ladder(&["--min", "0", "--max", "3", "--board-size", "5", "automate"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("invalid game configuration"),
        "unexpected stderr: {stderr}"
    );
}

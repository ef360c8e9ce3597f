//! End-to-end runs of the `tether-tools` binary.

use assert_cmd::Command;
use tether_test_utils::{temp_log, MESSAGE_LOG};

fn tools() -> Command {
    Command::cargo_bin("tether-tools").unwrap()
}

fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

const EVENTS: [&str; 5] = [
    "[0.0, 1, [0.0, 0.0], [1.0, 0.0]]",
    "[0.0, 2, [10.0, 0.0], [-1.0, 0.0]]",
    "[2.0, 1, [2.0, 0.0], [-1.0, 0.0]]",
    "[2.0, 2, [8.0, 0.0], [1.0, 0.0]]",
    "[3.5, 2, [9.5, 0.0], [0.0, 1.0]]",
];

#[test]
fn decodes_file() {
    let log = temp_log(MESSAGE_LOG);
    let assert = tools().arg(log.path()).assert().success();
    assert_eq!(stdout_lines(assert.get_output()), EVENTS);
}

#[test]
fn decodes_stdin() {
    let assert = tools().write_stdin(MESSAGE_LOG).assert().success();
    assert_eq!(stdout_lines(assert.get_output()), EVENTS);
}

#[test]
fn resamples_with_default_step_and_start() {
    let log = temp_log(MESSAGE_LOG);
    let assert = tools().arg(log.path()).arg("4").assert().success();
    let lines = stdout_lines(assert.get_output());
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "[0.0, {1: [0.0, 0.0], 2: [10.0, 0.0]}]");
    assert_eq!(lines[3], "[3.0, {1: [1.0, 0.0], 2: [9.0, 0.0]}]");
    assert_eq!(lines[4], "[4.0, {1: [0.0, 0.0], 2: [9.5, 0.5]}]");
}

#[test]
fn resamples_with_custom_step_and_start() {
    let log = temp_log(MESSAGE_LOG);
    let assert = tools()
        .arg(log.path())
        .args(["3", "0.5", "2"])
        .assert()
        .success();
    let times: Vec<_> = stdout_lines(assert.get_output())
        .iter()
        .map(|l| l.split(',').next().unwrap().to_string())
        .collect();
    assert_eq!(times, vec!["[2.0", "[2.5", "[3.0"]);
}

#[test]
fn start_after_end_fails() {
    let log = temp_log(MESSAGE_LOG);
    let assert = tools()
        .arg(log.path())
        .args(["1", "1", "5"])
        .assert()
        .code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("start 5 is after end 1"), "{stderr}");
    assert!(assert.get_output().stdout.is_empty());
}

#[test]
fn non_positive_step_fails() {
    let log = temp_log(MESSAGE_LOG);
    tools().arg(log.path()).args(["4", "0"]).assert().code(1);
    let assert = tools().arg(log.path()).args(["4", "-1"]).assert().code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("must be positive"), "{stderr}");
}

#[test]
fn missing_file_fails() {
    tools().arg("/nonexistent/messages.txt").assert().code(1);
}

#[test]
fn help_prints_usage() {
    let assert = tools().arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(stdout.contains("Usage"), "{stdout}");
}

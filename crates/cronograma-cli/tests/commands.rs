//! E2E tests for the cronograma commands
//!
//! Each test runs the compiled binary against a fixture snapshot and checks
//! exit code and output.

use std::path::PathBuf;
use std::process::Command;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Run a command and return (exit_code, stdout, stderr)
fn run(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_cronograma"))
        .args(args)
        .env_remove("CRONOGRAMA_CONFIG")
        .output()
        .expect("failed to execute cronograma");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}

fn path_arg(path: &std::path::Path) -> String {
    path.to_string_lossy().into_owned()
}

// =============================================================================
// Export
// =============================================================================

#[test]
fn export_xlsx_to_named_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.xlsx");

    let (code, stdout, stderr) = run(&[
        "export",
        &path_arg(&fixture("robot_arm.json")),
        "-o",
        &path_arg(&out),
    ]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("Exported:"));

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[0..2], b"PK");
}

#[test]
fn export_xlsx_default_name_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_cronograma"))
        .current_dir(dir.path())
        .arg("export")
        .arg(fixture("robot_arm.json"))
        .env_remove("CRONOGRAMA_CONFIG")
        .output()
        .expect("failed to execute cronograma");
    assert!(output.status.success());

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    let name = &names[0];
    assert!(name.starts_with("cronograma_") && name.ends_with(".xlsx"), "{name}");
    // cronograma_ + YYYYMMDD + .xlsx
    assert_eq!(name.len(), "cronograma_".len() + 8 + ".xlsx".len());
}

#[test]
fn export_text_to_stdout() {
    let (code, stdout, _) = run(&[
        "export",
        &path_arg(&fixture("robot_arm.json")),
        "--format",
        "text",
    ]);
    assert_eq!(code, 0);
    assert!(stdout.contains("== Activities =="));
    assert!(stdout.contains("== Finances =="));
    assert!(stdout.contains("== Gantt =="));
    assert!(stdout.contains("March 2025"));
    assert!(stdout.contains("Severe delay"));
    assert!(stdout.contains("Total: 395.40"));
}

#[test]
fn export_uses_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("report.toml");
    std::fs::write(&config, "title = \"ROBOT ARM\"\ngantt_sheet = \"Diagrama\"\n").unwrap();

    let (code, stdout, stderr) = run(&[
        "export",
        &path_arg(&fixture("robot_arm.json")),
        "--format",
        "text",
        "--config",
        &path_arg(&config),
    ]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("== Diagrama =="));
    assert!(stdout.contains("ROBOT ARM"));
}

#[test]
fn export_finances_only_has_no_gantt() {
    let (code, stdout, _) = run(&[
        "export",
        &path_arg(&fixture("finances_only.json")),
        "--format",
        "text",
    ]);
    assert_eq!(code, 0);
    assert!(stdout.contains("== Finances =="));
    assert!(!stdout.contains("== Gantt =="));
}

#[test]
fn export_invalid_snapshot_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.xlsx");

    let (code, _, stderr) = run(&[
        "export",
        &path_arg(&fixture("missing_completion_date.json")),
        "-o",
        &path_arg(&out),
    ]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Wiring"), "stderr: {stderr}");
    assert!(!out.exists(), "no partial output on failure");
}

// =============================================================================
// Status
// =============================================================================

#[test]
fn status_text_lists_every_activity() {
    let (code, stdout, _) = run(&["status", &path_arg(&fixture("robot_arm.json"))]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Early"));
    assert!(stdout.contains("Slight delay"));
    assert!(stdout.contains("Severe delay"));
    assert!(stdout.contains("In progress"));
    assert!(stdout.contains("Activities: 4"));
}

#[test]
fn status_json_is_parseable() {
    let (code, stdout, _) = run(&["status", &path_arg(&fixture("robot_arm.json")), "--json"]);
    assert_eq!(code, 0);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let activities = json["activities"].as_array().unwrap();
    assert_eq!(activities.len(), 4);
    assert_eq!(activities[0]["name"], "Requirements");
    assert_eq!(activities[0]["status"], "early");
    assert_eq!(activities[3]["status"], "pending");
    assert_eq!(json["summary"]["total"], 4);
    assert_eq!(json["summary"]["severe_delay"], 1);
}

// =============================================================================
// Total / Check
// =============================================================================

#[test]
fn total_uses_stored_totals() {
    let (code, stdout, _) = run(&["total", &path_arg(&fixture("finances_only.json"))]);
    assert_eq!(code, 0);
    // 8 x 4.25 plus a stored total of 115.00 (not 120.00)
    assert_eq!(stdout.trim(), "Total: 149.00");
}

#[test]
fn check_valid_snapshot() {
    let (code, stdout, _) = run(&["check", &path_arg(&fixture("robot_arm.json"))]);
    assert_eq!(code, 0);
    assert!(stdout.contains("OK: 4 activities, 2 finance entries"));
}

#[test]
fn check_invalid_snapshot_exits_nonzero() {
    let (code, _, stderr) = run(&["check", &path_arg(&fixture("missing_completion_date.json"))]);
    assert_eq!(code, 1);
    assert!(stderr.contains("completion date"), "stderr: {stderr}");
}

#[test]
fn missing_file_exits_nonzero() {
    let (code, _, stderr) = run(&["check", "does-not-exist.json"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Failed to read snapshot"));
}

//! Integration tests for the `schedules` CLI binary.
//!
//! These tests drive the real binary with `assert_cmd` and `predicates`: listing,
//! editing, timezone changes, structure edits, and device push/pull through a
//! scratch directory standing in for the device filesystem.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

/// Helper: path to the schedules.json fixture.
fn fixture_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/schedules.json")
}

/// Helper: a fresh scratch directory unique to one test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("schedules-cli-{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("scratch dir must be creatable");
    dir
}

/// Helper: copy the fixture into `dir` so the test can edit it in place.
fn working_copy(dir: &Path) -> PathBuf {
    let path = dir.join("schedules.json");
    std::fs::copy(fixture_path(), &path).expect("fixture must be copyable");
    path
}

fn read_json(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path).expect("output file must exist");
    serde_json::from_str(&text).expect("output must be valid JSON")
}

fn schedules() -> Command {
    let mut cmd = Command::cargo_bin("schedules").unwrap();
    // Keep the working directory free of stray schedules.toml files.
    cmd.current_dir(std::env::temp_dir());
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// show / new
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn show_describes_every_event() {
    schedules()
        .args(["show", "-i", fixture_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Timezone: EST (UTC-5.0, no DST)"))
        .stdout(predicate::str::contains(
            "[0] Turn On: Daily at 17:00 (local 12:00 UTC-5.0)",
        ))
        .stdout(predicate::str::contains(
            "[1] Turn Off: Mon, Wed, Fri at 06:30 (local 01:30 UTC-5.0)",
        ))
        .stdout(predicate::str::contains(
            "[2] Turn On: Sunset 00:15 before on Fri (disabled)",
        ))
        .stdout(predicate::str::contains("[0] zone-2: Sunrise exactly on daily"));
}

#[test]
fn show_reads_stdin() {
    let json = std::fs::read_to_string(fixture_path()).unwrap();
    schedules()
        .arg("show")
        .write_stdin(json)
        .assert()
        .success()
        .stdout(predicate::str::contains("Porch"))
        .stdout(predicate::str::contains("Garden"));
}

#[test]
fn show_rejects_invalid_json() {
    schedules()
        .arg("show")
        .write_stdin("{ not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse schedules"));
}

#[test]
fn new_writes_empty_collection() {
    schedules()
        .args(["new", "--utc-offset=-5", "--name", "EST"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"utcOffsetHours\": -5.0"))
        .stdout(predicate::str::contains("\"schedules\": []"));
}

// ─────────────────────────────────────────────────────────────────────────────
// edit
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn edit_time_in_place() {
    let dir = scratch_dir("edit-time");
    let path = working_copy(&dir);

    schedules()
        .args(["edit", "-i"])
        .arg(&path)
        .args(["--schedule", "0", "--event", "0", "--time", "09:30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily at 09:30 (local 04:30 UTC-5.0)"))
        .stdout(predicate::str::contains("File saved"));

    let json = read_json(&path);
    assert_eq!(
        json["schedules"][0]["events"][0]["eventTime"],
        "1989-06-03T09:30:00Z"
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn edit_offset_days_and_enable() {
    let dir = scratch_dir("edit-offset");
    let path = working_copy(&dir);
    let output = dir.join("out.json");

    schedules()
        .args(["edit", "-i"])
        .arg(&path)
        .arg("-o")
        .arg(&output)
        .args([
            "--schedule", "0", "--event", "2", "--offset", "30", "--after", "--day", "Sat=on",
            "--enable",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sunset 00:30 after on Fri, Sat"))
        .stdout(predicate::str::contains("(disabled)").not())
        .stdout(predicate::str::contains("File saved as: out.json"));

    let event = &read_json(&output)["schedules"][0]["events"][2];
    assert_eq!(event["offsetMinutes"], 30);
    assert_eq!(event["isDisabled"], false);
    assert_eq!(event["daysOfWeek"], serde_json::json!(["Friday", "Saturday"]));

    // The input file is left alone when -o is given.
    assert_eq!(read_json(&path)["schedules"][0]["events"][2]["offsetMinutes"], -15);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn edit_kind_change_reconciles_fields() {
    let dir = scratch_dir("edit-kind");
    let path = working_copy(&dir);

    schedules()
        .args(["edit", "-i"])
        .arg(&path)
        .args(["--schedule", "0", "--event", "0", "--kind", "SunsetOffset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sunset exactly on Mon"));

    let event = &read_json(&path)["schedules"][0]["events"][0];
    assert_eq!(event["eventType"], "SunsetOffset");
    assert_eq!(event["offsetMinutes"], 0);
    assert_eq!(event["daysOfWeek"], serde_json::json!(["Monday"]));
    assert!(event.get("eventTime").is_none());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn edit_action_label_maps_to_data() {
    let dir = scratch_dir("edit-action");
    let path = working_copy(&dir);

    schedules()
        .args(["edit", "-i"])
        .arg(&path)
        .args(["--schedule", "0", "--event", "0", "--action", "Turn Off"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] Turn Off:"));

    assert_eq!(read_json(&path)["schedules"][0]["events"][0]["data"], "false");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn edit_rejects_bad_values() {
    let dir = scratch_dir("edit-bad");
    let path = working_copy(&dir);

    schedules()
        .args(["edit", "-i"])
        .arg(&path)
        .args(["--schedule", "0", "--event", "0", "--time", "25:99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected HH:MM"));

    schedules()
        .args(["edit", "-i"])
        .arg(&path)
        .args(["--schedule", "0", "--event", "9", "--time", "10:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No event 9 in schedule 0"));

    schedules()
        .args(["edit", "-i"])
        .arg(&path)
        .args(["--schedule", "0", "--event", "1", "--day", "Someday=on"])
        .assert()
        .failure();

    // Nothing was written by the failed edits.
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        std::fs::read_to_string(fixture_path()).unwrap()
    );

    let _ = std::fs::remove_dir_all(&dir);
}

// ─────────────────────────────────────────────────────────────────────────────
// timezone / structure
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn enabling_dst_shifts_summer_displays() {
    let dir = scratch_dir("timezone-dst");
    let path = working_copy(&dir);

    schedules()
        .args(["timezone", "-i"])
        .arg(&path)
        .args(["--dst", "on", "--name", "Eastern"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Timezone: Eastern (UTC-5.0, DST)"));

    schedules()
        .args(["show", "-i"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Daily at 17:00 (local 13:00 UTC-4.0)",
        ));

    let json = read_json(&path);
    assert_eq!(json["timezone"]["daylightSaving"]["start"]["month"], 3);
    // Events themselves are untouched by a timezone change.
    assert_eq!(
        json["schedules"][0]["events"][0]["eventTime"],
        "1989-06-03T17:00:00Z"
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn add_and_remove_structure() {
    let dir = scratch_dir("structure");
    let path = working_copy(&dir);

    schedules()
        .args(["add-schedule", "-i"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Added schedule 2"));
    assert_eq!(read_json(&path)["schedules"][2]["name"], "Schedule 3");

    schedules()
        .args(["add-event", "-i"])
        .arg(&path)
        .args(["--schedule", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added event 0 to schedule 2"));
    let added = &read_json(&path)["schedules"][2]["events"][0];
    assert_eq!(added["eventType"], "Daily");
    assert_eq!(added["data"], "true");

    schedules()
        .args(["remove-event", "-i"])
        .arg(&path)
        .args(["--schedule", "0", "--event", "1"])
        .assert()
        .success();
    assert_eq!(
        read_json(&path)["schedules"][0]["events"]
            .as_array()
            .map(Vec::len),
        Some(2)
    );

    schedules()
        .args(["remove-schedule", "-i"])
        .arg(&path)
        .args(["--schedule", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));

    let _ = std::fs::remove_dir_all(&dir);
}

// ─────────────────────────────────────────────────────────────────────────────
// push / pull
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn push_then_pull_through_device_dir() {
    let dir = scratch_dir("device");
    let device = dir.join("device");
    std::fs::create_dir_all(&device).unwrap();

    schedules()
        .args(["push", "-i", fixture_path(), "--device"])
        .arg(&device)
        .assert()
        .success()
        .stdout(predicate::str::contains("Schedule saved successfully to device"));
    assert!(device.join("schedules.json").exists());
    assert!(!device.join(".runtime-disabled").exists());

    let pulled = dir.join("pulled.json");
    schedules()
        .args(["pull", "--device"])
        .arg(&device)
        .arg("-o")
        .arg(&pulled)
        .assert()
        .success();
    assert_eq!(read_json(&pulled), read_json(Path::new(fixture_path())));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn config_file_supplies_device_and_file_name() {
    let dir = scratch_dir("config");
    let device = dir.join("device");
    std::fs::create_dir_all(&device).unwrap();
    let config = dir.join("schedules.toml");
    std::fs::write(
        &config,
        format!(
            "device_dir = {:?}\nremote_file_name = \"lights.json\"\n",
            device.display().to_string()
        ),
    )
    .unwrap();

    schedules()
        .arg("--config")
        .arg(&config)
        .args(["push", "-i", fixture_path()])
        .assert()
        .success();
    assert!(device.join("lights.json").exists());

    schedules()
        .arg("--config")
        .arg(&config)
        .arg("pull")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Porch\""));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn pull_from_empty_device_fails() {
    let dir = scratch_dir("device-empty");

    schedules()
        .args(["pull", "--device"])
        .arg(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No schedules.json file found on device"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn push_without_device_fails() {
    schedules()
        .args(["push", "-i", fixture_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no device directory"));
}

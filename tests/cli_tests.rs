use predicates::prelude::*;
use serial_test::serial;
use std::fs;

use test_helpers::{base_mlog_command, TestLogbook};

#[test]
#[serial]
fn test_cli_init_creates_logbook() {
    let home = tempfile::tempdir().unwrap();
    let root = home.path().join("my-logbook");

    base_mlog_command(home.path())
        .arg("init")
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"))
        .stdout(predicate::str::contains("\"defaultCategory\": \"General\""));

    assert!(root.join("logbook-config.json").is_file());
    assert!(root.join("index.md").is_file());
    let pointer = fs::read_to_string(home.path().join(".mlog-config.json")).unwrap();
    assert!(pointer.contains("mlogLocation"));
    assert!(pointer.contains("my-logbook"));
}

#[test]
#[serial]
fn test_cli_init_expands_home() {
    let home = tempfile::tempdir().unwrap();

    base_mlog_command(home.path())
        .args(["init", "~/logbook"])
        .assert()
        .success();

    assert!(home.path().join("logbook").join("logbook-config.json").is_file());
}

#[test]
#[serial]
fn test_cli_init_rejects_missing_parent() {
    let home = tempfile::tempdir().unwrap();
    let root = home.path().join("missing").join("logbook");

    base_mlog_command(home.path())
        .arg("init")
        .arg(&root)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
#[serial]
fn test_cli_requires_init() {
    let home = tempfile::tempdir().unwrap();

    base_mlog_command(home.path())
        .args(["add", "-d", "2017-11-10"])
        .write_stdin("# Entry")
        .assert()
        .failure()
        .stderr(predicate::str::contains("mlog init"));
}

#[test]
#[serial]
fn test_cli_add_saves_entry_and_index() {
    let logbook = TestLogbook::new();

    logbook
        .command()
        .args(["add", "--category", "work log", "--date", "2017-11-10"])
        .write_stdin("# Shipped the release\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved Log to"))
        .stdout(predicate::str::contains("2017-11-10.md"));

    let entry = logbook.root.join("Work_Log").join("2017-11-10.md");
    assert_eq!(fs::read_to_string(entry).unwrap(), "# Shipped the release\n");
    let index = fs::read_to_string(logbook.root.join("Work_Log").join("index.md")).unwrap();
    assert!(index.starts_with("# Work Log\n\n* [Shipped the release](2017-11-10.md)\n"));
}

#[test]
#[serial]
fn test_cli_add_is_default_command() {
    let logbook = TestLogbook::new();

    logbook
        .command()
        .args(["-d", "2017-11-10"])
        .write_stdin("# Default category entry")
        .assert()
        .success();

    assert!(logbook.root.join("General").join("2017-11-10.md").is_file());
}

#[test]
#[serial]
fn test_cli_add_refuses_duplicate_without_overwrite() {
    let logbook = TestLogbook::new();
    logbook
        .command()
        .args(["add", "-d", "2017-11-10"])
        .write_stdin("# First")
        .assert()
        .success();

    logbook
        .command()
        .args(["add", "-d", "2017-11-10"])
        .write_stdin("# Second")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--overwrite"));

    logbook
        .command()
        .args(["add", "-d", "2017-11-10", "-o"])
        .write_stdin("# Second")
        .assert()
        .success();

    let entry = logbook.root.join("General").join("2017-11-10.md");
    assert_eq!(fs::read_to_string(entry).unwrap(), "# Second");
}

#[test]
#[serial]
fn test_cli_add_rejects_empty_input() {
    let logbook = TestLogbook::new();

    logbook
        .command()
        .args(["add", "-d", "2017-11-10"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No entry text"));

    assert!(!logbook.root.join("General").exists());
}

#[test]
#[serial]
fn test_cli_add_unknown_category() {
    let logbook = TestLogbook::new();

    logbook
        .command()
        .args(["add", "-c", "Nope"])
        .write_stdin("# Entry")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown Category: Nope"));
}

#[test]
#[serial]
fn test_cli_add_invalid_date() {
    let logbook = TestLogbook::new();

    logbook
        .command()
        .args(["add", "-d", "not-a-date"])
        .write_stdin("# Entry")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date 'not-a-date'"));
}

#[test]
#[serial]
fn test_cli_config_set_and_show() {
    let logbook = TestLogbook::new();

    logbook
        .command()
        .args(["config", "set", "title", "Team Logbook"])
        .assert()
        .success();

    logbook
        .command()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Team Logbook\""));
}

#[test]
#[serial]
fn test_cli_config_set_unknown_option() {
    let logbook = TestLogbook::new();

    logbook
        .command()
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid Option Name: colour"));
}

#[test]
#[serial]
fn test_cli_config_set_list_option_points_to_add() {
    let logbook = TestLogbook::new();

    logbook
        .command()
        .args(["config", "set", "categories", "Ideas"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mlog config add"));
}

#[test]
#[serial]
fn test_cli_config_add_category_updates_main_index() {
    let logbook = TestLogbook::new();

    logbook
        .command()
        .args(["config", "add", "categories", "Side Projects"])
        .assert()
        .success();

    let index = fs::read_to_string(logbook.root.join("index.md")).unwrap();
    assert!(index.contains("* [Side Projects](Side_Projects/index.md)"));

    logbook
        .command()
        .args(["add", "-c", "side projects", "-d", "2017-11-10"])
        .write_stdin("# Idea")
        .assert()
        .success();
    assert!(logbook.root.join("Side_Projects").join("2017-11-10.md").is_file());
}

#[test]
#[serial]
fn test_cli_categories_lists_directories() {
    let logbook = TestLogbook::new();

    logbook
        .command()
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("General (default)\tGeneral"))
        .stdout(predicate::str::contains("Work Log\tWork_Log"));
}

#[test]
#[serial]
fn test_cli_rebuild() {
    let logbook = TestLogbook::new();
    let directory = logbook.root.join("Work_Log");
    fs::create_dir(&directory).unwrap();
    fs::write(directory.join("2017-09-28.md"), "# Written by hand").unwrap();

    logbook
        .command()
        .arg("rebuild")
        .assert()
        .success()
        .stdout(predicate::str::contains("Work_Log"));

    let index = fs::read_to_string(directory.join("index.md")).unwrap();
    assert!(index.contains("* [Written by hand](2017-09-28.md)"));
    assert!(!logbook.root.join("Weekly_Summary").exists());
}

#[cfg(unix)]
#[test]
#[serial]
fn test_cli_open_uses_configured_opener() {
    let logbook = TestLogbook::new();

    logbook
        .command()
        .arg("open")
        .env("MLOG_OPENER", "true")
        .assert()
        .success();

    logbook
        .command()
        .arg("open")
        .env("MLOG_OPENER", "false")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to open logbook"));
}

#[test]
#[serial]
fn test_cli_json_logging_carries_correlation_id() {
    let logbook = TestLogbook::new();

    logbook
        .command()
        .arg("categories")
        .env("MLOG_LOG_FORMAT", "json")
        .env("RUST_LOG", "debug")
        .assert()
        .success()
        .stderr(predicate::str::contains("\"correlation_id\""))
        .stderr(predicate::str::contains("app_invocation"));
}

#[test]
#[serial]
fn test_cli_logs_stay_off_stdout() {
    let logbook = TestLogbook::new();

    logbook
        .command()
        .args(["--verbose", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting mlog").not())
        .stderr(predicate::str::contains("Starting mlog"));
}

#[test]
#[serial]
fn test_cli_add_blank_date_means_today() {
    let logbook = TestLogbook::new();

    logbook
        .command()
        .args(["add", "-d", ""])
        .write_stdin("# Entry")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved Log to"));

    assert_eq!(fs::read_dir(logbook.root.join("General")).unwrap().count(), 2);
}

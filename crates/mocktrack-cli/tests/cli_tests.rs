//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mocktrack(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("mocktrack").unwrap();
    cmd.current_dir(dir)
        .env_remove("MOCKTRACK_DATA_DIR")
        .env("HOME", dir)
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

fn record(dir: &Path, test: &str, attempt: &str, scores: [&str; 3], reattempt: bool) {
    let mut cmd = mocktrack(dir);
    cmd.args(["record", "--platform", "Testbook", "--series", "RRB PO"])
        .args(["--test", test, "--attempt", attempt])
        .args(["--quantitative", scores[0]])
        .args(["--reasoning", scores[1]])
        .args(["--english", scores[2]]);
    if reattempt {
        cmd.arg("--reattempt");
    }
    cmd.assert().success();
}

fn trend_json(dir: &Path, reattempt: bool) -> serde_json::Value {
    let mut cmd = mocktrack(dir);
    cmd.args(["trend", "--platform", "Platform 1", "--series", "Series 1", "--format", "json"]);
    if reattempt {
        cmd.arg("--reattempt");
    }
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn record_and_trend_sorted_numerically() {
    let dir = TempDir::new().unwrap();
    for test in ["10", "2", "9", "1"] {
        record(dir.path(), test, "1", ["10", "10", "10"], false);
    }

    let trend = trend_json(dir.path(), false);
    assert_eq!(trend["labels"], serde_json::json!([1, 2, 9, 10]));
    assert_eq!(trend["total"], serde_json::json!([30, 30, 30, 30]));
    assert!(dir.path().join("data/testData.json").exists());
}

#[test]
fn latest_attempt_reported() {
    let dir = TempDir::new().unwrap();
    record(dir.path(), "5", "1", ["20", "20", "20"], false);
    record(dir.path(), "5", "2", ["25", "30", "20"], false);

    let trend = trend_json(dir.path(), false);
    assert_eq!(trend["total"], serde_json::json!([75]));
}

#[test]
fn reattempt_trend() {
    let dir = TempDir::new().unwrap();
    record(dir.path(), "3", "1", ["10", "10", "10"], false);
    record(dir.path(), "3", "2", ["20", "15", "10"], true);

    let trend = trend_json(dir.path(), true);
    assert_eq!(trend["kind"], "reattempt");
    assert_eq!(trend["labels"], serde_json::json!([3]));
    assert_eq!(trend["total"], serde_json::json!([45]));
}

#[test]
fn overwrite_reports_update() {
    let dir = TempDir::new().unwrap();
    record(dir.path(), "4", "1", ["1", "1", "1"], false);

    mocktrack(dir.path())
        .args(["record", "--test", "4", "--attempt", "1"])
        .args(["--quantitative", "2", "--reasoning", "2", "--english", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated test 4 attempt 1"))
        .stdout(predicate::str::contains("total 6"));
}

#[test]
fn text_trend_output() {
    let dir = TempDir::new().unwrap();
    record(dir.path(), "1", "1", ["12", "13", "14"], false);

    mocktrack(dir.path())
        .args(["trend", "--platform", "Testbook", "--series", "RRB PO"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Latest attempts: Testbook / RRB PO"))
        .stdout(predicate::str::contains("39"));
}

#[test]
fn first_record_reports_recorded() {
    let dir = TempDir::new().unwrap();

    mocktrack(dir.path())
        .args(["record", "--test", "4", "--attempt", "2", "--reattempt"])
        .args(["--quantitative", "2", "--reasoning", "2", "--english", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded test 4 attempt 2 (reattempt)"));
}

#[test]
fn chart_trend_output() {
    let dir = TempDir::new().unwrap();
    record(dir.path(), "2", "1", ["10", "11", "12"], false);
    record(dir.path(), "2", "2", ["20", "15", "10"], true);

    let out = mocktrack(dir.path())
        .args(["trend", "--series", "RRB PO", "--reattempt", "--format", "chart"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let chart: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(chart["labels"], serde_json::json!([2]));
    assert_eq!(chart["datasets"].as_array().unwrap().len(), 4);
    assert_eq!(chart["datasets"][3]["label"], "Reattempt Total Score");
    assert_eq!(chart["datasets"][3]["data"], serde_json::json!([45]));

    mocktrack(dir.path())
        .args(["trend", "--series", "SBI PO", "--format", "chart"])
        .assert()
        .success()
        .stdout(predicate::str::diff("null\n"));
}

#[test]
fn trend_without_data() {
    let dir = TempDir::new().unwrap();

    mocktrack(dir.path())
        .args(["trend", "--platform", "Guidely", "--series", "SBI PO"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No data for Guidely / SBI PO"));
}

#[test]
fn clear_test_leaves_no_data() {
    let dir = TempDir::new().unwrap();
    record(dir.path(), "5", "1", ["1", "2", "3"], false);

    mocktrack(dir.path())
        .args(["clear", "--platform", "Testbook", "--series", "RRB PO", "--test", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared test 5"));

    assert_eq!(trend_json(dir.path(), false), serde_json::Value::Null);

    mocktrack(dir.path())
        .args(["clear", "--test", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing recorded"));
}

#[test]
fn clear_all() {
    let dir = TempDir::new().unwrap();
    record(dir.path(), "1", "1", ["1", "2", "3"], false);
    record(dir.path(), "2", "1", ["1", "2", "3"], false);

    mocktrack(dir.path())
        .args(["clear", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 2 recorded attempt(s)"));

    mocktrack(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No scores recorded yet"));
}

#[test]
fn clear_requires_test_or_all() {
    let dir = TempDir::new().unwrap();
    mocktrack(dir.path()).arg("clear").assert().failure();
}

#[test]
fn negative_score_rejected() {
    let dir = TempDir::new().unwrap();

    mocktrack(dir.path())
        .args(["record", "--test", "1", "--attempt", "1"])
        .args(["--quantitative", "10", "--reasoning", "10", "--english=-4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid english: must not be negative"));

    assert!(!dir.path().join("data/testData.json").exists());
}

#[test]
fn over_limit_score_rejected() {
    let dir = TempDir::new().unwrap();

    mocktrack(dir.path())
        .args(["record", "--test", "31", "--attempt", "1"])
        .args(["--quantitative", "10", "--reasoning", "10", "--english", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid test number"));
}

#[test]
fn unknown_series_rejected() {
    let dir = TempDir::new().unwrap();

    mocktrack(dir.path())
        .args(["trend", "--series", "UPSC"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown series: UPSC"));
}

#[test]
fn list_slices() {
    let dir = TempDir::new().unwrap();
    record(dir.path(), "1", "1", ["1", "2", "3"], false);
    record(dir.path(), "1", "2", ["1", "2", "3"], true);

    mocktrack(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Testbook / RRB PO: 1 test(s), 2 attempt(s)"));
}

#[test]
fn catalog_output() {
    let dir = TempDir::new().unwrap();

    mocktrack(dir.path())
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("Smartkeeda"))
        .stdout(predicate::str::contains("SBI Clerk"));
}

#[test]
fn config_catalog_is_used() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("mocktrack.toml"),
        r#"
default_platform = "P9"
default_series = "Mains"

[catalog]
platforms = [{ id = "P9", name = "Adda" }]
series = [{ id = "Mains", name = "Mains Mock" }]
"#,
    )
    .unwrap();

    mocktrack(dir.path())
        .args(["record", "--test", "1", "--attempt", "1"])
        .args(["--quantitative", "1", "--reasoning", "1", "--english", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Adda / Mains Mock"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    mocktrack(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created mocktrack.toml"));
    assert!(dir.path().join("mocktrack.toml").exists());

    mocktrack(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    mocktrack(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Practice test score tracker"));
}

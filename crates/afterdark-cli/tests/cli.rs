use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn afterdark(store: &Path) -> Command {
    let mut cmd = Command::cargo_bin("afterdark").unwrap();
    cmd.env_remove("AFTERDARK_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--store")
        .arg(store);
    cmd
}

#[test]
fn catalog_lists_mpa_ratings() {
    let dir = tempfile::tempdir().unwrap();
    afterdark(&dir.path().join("fact.json"))
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("PG-13"))
        .stdout(predicate::str::contains("NC-17"));
}

#[test]
fn check_without_fact_asks_for_verification() {
    let dir = tempfile::tempdir().unwrap();
    afterdark(&dir.path().join("fact.json"))
        .args(["check", "R", "--as-of", "2024-06-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("verify your age"));
}

#[test]
fn verify_then_check_reports_shortfall() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("fact.json");

    afterdark(&store)
        .args(["verify", "--birth-date", "2008-01-01", "--method", "card"])
        .assert()
        .success();
    assert!(store.exists());

    afterdark(&store)
        .args(["--output", "json", "check", "R", "--as-of", "2024-06-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"allowed\": false"))
        .stdout(predicate::str::contains("\"userAge\": 16"));
}

#[test]
fn verify_rejects_future_birth_date() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("fact.json");
    afterdark(&store)
        .args(["verify", "--birth-date", "2999-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("future"));
    assert!(!store.exists());
}

#[test]
fn unknown_rating_fails() {
    let dir = tempfile::tempdir().unwrap();
    afterdark(&dir.path().join("fact.json"))
        .args(["check", "TV-MA"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TV-MA"));
}

#[test]
fn classify_prefers_nudity() {
    let dir = tempfile::tempdir().unwrap();
    afterdark(&dir.path().join("fact.json"))
        .args(["classify", "--violence", "--nudity", "--language"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NC-17"));
}

#[test]
fn classify_with_content_id_prints_record() {
    let dir = tempfile::tempdir().unwrap();
    afterdark(&dir.path().join("fact.json"))
        .args(["classify", "--horror", "--content-id", "clip-9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"contentId\": \"clip-9\""))
        .stdout(predicate::str::contains("\"ratingId\": \"PG\""));
}

#[test]
fn audience_config_changes_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("gate.yaml");
    std::fs::write(&config, "catalog:\n  taxonomy: audience\n").unwrap();

    afterdark(&dir.path().join("fact.json"))
        .arg("--config")
        .arg(&config)
        .args(["classify", "--violence"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mature"));
}

#[test]
fn forget_clears_status() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("fact.json");

    afterdark(&store)
        .args(["verify", "--birth-date", "1990-05-05", "--unverified"])
        .assert()
        .success();
    afterdark(&store)
        .args(["status", "--as-of", "2024-06-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Age on 2024-06-15: 34"))
        .stdout(predicate::str::contains("Verified: no"));

    afterdark(&store).arg("forget").assert().success();
    afterdark(&store)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No age fact"));
}

#[test]
fn status_before_birth_reports_unknown_age() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("fact.json");

    afterdark(&store)
        .args(["verify", "--birth-date", "1990-05-05"])
        .assert()
        .success();
    afterdark(&store)
        .args(["status", "--as-of", "1980-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Age on 1980-01-01: unknown"))
        .stdout(predicate::str::contains("-10").not());
    afterdark(&store)
        .args(["--output", "json", "status", "--as-of", "1980-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"age\": null"));
}

#[test]
fn verbose_logs_loaded_configuration() {
    let dir = tempfile::tempdir().unwrap();
    afterdark(&dir.path().join("fact.json"))
        .args(["--verbose", "catalog"])
        .assert()
        .success()
        .stderr(predicate::str::contains("configuration loaded"))
        .stderr(predicate::str::contains("fact.json"));
}

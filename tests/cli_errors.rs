#![cfg(feature = "cli")]

use predicates::prelude::*;

fn sample_params_json() -> String {
    serde_json::json!({
        "ph": 7.8,
        "t_c": 20.0,
        "tds": 200.0,
        "ca": 150.0,
        "alk": 120.0,
    })
    .to_string()
}

#[test]
fn cli_fails_without_any_input() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("carbonate_rs");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing input data"));
}

#[test]
fn cli_works_without_calibration_with_params_json() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("carbonate_rs");
    cmd.arg("--json").arg("--params-json").arg(sample_params_json());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"lsi\""))
        .stdout(predicate::str::contains("\"ccpp\""));
}

#[test]
fn cli_works_without_calibration_in_stdin_input_document() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("carbonate_rs");

    let doc = serde_json::json!({
        "parameters": {
            "ph": 7.8,
            "t_c": 20.0,
            "tds": 200.0,
            "ca": 150.0,
            "alk": 120.0,
        }
    })
    .to_string();

    cmd.arg("--json").arg("--input").arg("-").write_stdin(doc);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"saturation_ph\""));
}

#[test]
fn cli_solves_for_target_ccpp() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("carbonate_rs");
    cmd.arg("--params-json")
        .arg(sample_params_json())
        .arg("--target-ccpp")
        .arg("5")
        .arg("--solve-for")
        .arg("ph");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Solved pH"));
}

#[test]
fn cli_rejects_target_without_solve_variable() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("carbonate_rs");
    cmd.arg("--params-json")
        .arg(sample_params_json())
        .arg("--target-ccpp")
        .arg("5");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("requires --solve-for"));
}

#[test]
fn cli_reports_invalid_json_for_params_json() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("carbonate_rs");
    cmd.arg("--params-json").arg("{not valid json}");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON for --params-json"));
}

#[test]
fn cli_reports_invalid_json_in_file() {
    use std::fs::File;
    use std::io::Write as _;
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let file_path = dir.path().join("bad.json");
    let mut f = File::create(&file_path).unwrap();
    writeln!(f, "this is not json").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("carbonate_rs");
    cmd.arg("--input").arg(file_path.to_str().unwrap());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON in input document"));
}

#[test]
fn cli_rejects_out_of_domain_parameters() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("carbonate_rs");
    let params = serde_json::json!({
        "ph": 7.8,
        "t_c": 20.0,
        "tds": 200.0,
        "ca": 0.0,
        "alk": 120.0,
    })
    .to_string();
    cmd.arg("--params-json").arg(params);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("ca must be positive"));
}

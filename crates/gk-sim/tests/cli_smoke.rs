use std::fs;
use std::process::Command;

use serde_json::Value;
use tempfile::tempdir;

fn gk_sim() -> Command {
    Command::new(env!("CARGO_BIN_EXE_gk-sim"))
}

#[test]
fn generators_command_prints_report() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("rule.yaml");
    fs::write(&config, "levels: [1, 2, 6]\nlevel: 2\n").expect("write");
    let output = gk_sim()
        .args(["generators", "--config"])
        .arg(&config)
        .output()
        .expect("run gk-sim");
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["generators"].as_array().map(Vec::len), Some(5));
    assert_eq!(value["complete"], Value::Bool(true));
}

#[test]
fn rule_and_batch_commands_write_outputs() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("rule.yaml");
    fs::write(&config, "levels: [1, 2]\ndimension: 2\nlevel: 1\n").expect("write");
    let out = dir.path().join("outcome.json");
    let output = gk_sim()
        .args(["rule", "--config"])
        .arg(&config)
        .arg("--out")
        .arg(&out)
        .output()
        .expect("run gk-sim");
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(report["node_count"], Value::from(5));
    assert!(out.exists());

    let batch = dir.path().join("batch.yaml");
    fs::write(
        &batch,
        "threads: 2\nrules:\n  - {levels: [1, 2], level: 1}\n  - {family: legendre, levels: [1, 2], level: 1, dimension: 3}\n",
    )
    .expect("write");
    let out_dir = dir.path().join("batch");
    let output = gk_sim()
        .args(["batch", "--config"])
        .arg(&batch)
        .arg("--out")
        .arg(&out_dir)
        .output()
        .expect("run gk-sim");
    assert!(output.status.success());
    assert!(out_dir.join("rule_000.json").exists());
    assert!(out_dir.join("rule_001.json").exists());
    assert!(out_dir.join("summary.json").exists());
}

#[test]
fn invalid_config_exits_nonzero() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("rule.yaml");
    fs::write(&config, "dimension: 0\n").expect("write");
    let output = gk_sim()
        .args(["rule", "--config"])
        .arg(&config)
        .output()
        .expect("run gk-sim");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("zero-dimension"));
}

use std::fs;

use gk_core::{from_json_slice, stable_hash_string, write_canonical_json};
use gk_family::Family;
use gk_rule::{build_rule, compute_generators, GeneratorReport, QuadratureRule, RuleConfig, RuleReport};
use tempfile::tempdir;

#[test]
fn config_file_to_verified_rule() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("rule.yaml");
    fs::write(
        &path,
        "family: hermite-pro\nlevels: [1, 2, 6]\ndimension: 2\nlevel: 2\n",
    )
    .expect("write config");
    let config = RuleConfig::load(&path).expect("config");
    let outcome = build_rule(&config).expect("rule");
    assert_eq!(outcome.rule.len(), 9);
    assert!(outcome.accuracy.accurate);
    assert_eq!(outcome.provenance.family, "hermite-pro");
    assert_eq!(outcome.provenance.config_hash, config.config_hash().unwrap());

    let rule_path = dir.path().join("out/rule.json");
    write_canonical_json(&rule_path, &outcome.rule).expect("write rule");
    let restored: QuadratureRule = from_json_slice(&fs::read(&rule_path).unwrap()).expect("read rule");
    assert_eq!(restored, outcome.rule);
}

#[test]
fn report_hash_covers_content() {
    let config = RuleConfig {
        levels: vec![1, 2],
        dimension: 2,
        level: 1,
        ..RuleConfig::default()
    };
    let outcome = build_rule(&config).expect("rule");
    let report = RuleReport::from_outcome(&outcome).expect("report");
    assert_eq!(report.node_count, 5);
    assert!((report.weight_sum - 1.0).abs() < 1e-12);
    assert!((report.mass - (2.0 * std::f64::consts::PI).sqrt()).abs() < 1e-9);

    let mut blank = report.clone();
    blank.hash = String::new();
    assert_eq!(stable_hash_string(&blank).unwrap(), report.hash);

    let again = RuleReport::from_outcome(&build_rule(&config).expect("rule")).expect("report");
    assert_eq!(again.hash, report.hash);
}

#[test]
fn generator_report_flags_early_termination() {
    let list = compute_generators(&Family::HermitePro, &[1, 2, 2], 64).expect("generators");
    let report = GeneratorReport::new(Family::HermitePro, &list).expect("report");
    assert!(!report.complete);
    assert_eq!(report.levels_completed, 2);
    assert_eq!(report.generators.len(), 2);
    assert_eq!(report.records.len(), 3);
}

#[test]
fn malformed_config_file_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("rule.json");
    fs::write(&path, r#"{"family": "hermite-pro", "dimension": 0}"#).expect("write");
    assert_eq!(RuleConfig::load(&path).unwrap_err().code(), "zero-dimension");
    fs::write(&path, r#"{"family": "jacobi"}"#).expect("write");
    assert_eq!(RuleConfig::load(&path).unwrap_err().code(), "json_deserialize");
}

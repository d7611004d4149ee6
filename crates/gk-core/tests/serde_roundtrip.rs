use gk_core::provenance::{RunProvenance, SchemaVersion};
use gk_core::{
    from_json_slice, load_document, stable_hash_string, to_canonical_json_bytes,
    write_canonical_json,
};

fn sample_provenance() -> RunProvenance {
    RunProvenance {
        config_hash: "cfg".into(),
        family: "hermite-pro".into(),
        levels: vec![1, 2, 6],
        working_prec: 128,
        target_prec: 53,
        tool_versions: Default::default(),
    }
    .with_tool("gk-core", "0.1.0")
}

#[test]
fn provenance_round_trip_json() {
    let provenance = sample_provenance();
    let bytes = to_canonical_json_bytes(&provenance).expect("serialize");
    let decoded: RunProvenance = from_json_slice(&bytes).expect("deserialize");
    assert_eq!(decoded, provenance);
    assert_eq!(SchemaVersion::default(), SchemaVersion::new(1, 0, 0));
}

#[test]
fn canonical_bytes_sort_keys() {
    let bytes = to_canonical_json_bytes(&serde_json::json!({"b": 1, "a": {"d": 2, "c": 3}}))
        .expect("serialize");
    assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"a":{"c":3,"d":2},"b":1}"#);
}

#[test]
fn stable_hash_is_deterministic() {
    let a = stable_hash_string(&sample_provenance()).expect("hash");
    let b = stable_hash_string(&sample_provenance()).expect("hash");
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
}

#[test]
fn documents_round_trip_on_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("provenance.json");
    write_canonical_json(&path, &sample_provenance()).expect("write");
    let decoded: RunProvenance = load_document(&path).expect("load");
    assert_eq!(decoded, sample_provenance());

    let yaml_path = dir.path().join("provenance.yaml");
    std::fs::write(&yaml_path, gk_core::to_yaml_string(&sample_provenance()).unwrap()).unwrap();
    let decoded: RunProvenance = load_document(&yaml_path).expect("load yaml");
    assert_eq!(decoded, sample_provenance());
}

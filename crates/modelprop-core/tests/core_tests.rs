use std::fs;
use std::path::Path;

use serde_json::{json, Value};
use tempfile::TempDir;

use modelprop_core::catalog::supported_schemas;
use modelprop_core::config::Settings;
use modelprop_core::filter::filter_taxonomies;
use modelprop_core::loader::load_schema;
use modelprop_core::query::run;
use modelprop_core::types::QueryRequest;
use modelprop_core::writer::write_schema;
use modelprop_core::Error;

fn sample_document() -> Value {
    json!({
        "meta": {
            "id": "X",
            "taxonomies": ["A", "B", "C"],
            "damage_states": ["D0", "D1", "D2"],
            "assetcategory": "buildings"
        },
        "data": [
            {"taxonomy": "A", "D1_mean": 0.11, "D1_stddev": 0.5},
            {"taxonomy": "B", "D1_mean": 0.22, "D1_stddev": 0.6},
            {"taxonomy": "C", "D1_mean": 0.33, "D1_stddev": 0.7}
        ]
    })
}

fn write_catalog_entry(schema_dir: &Path, id: &str, doc: &Value) {
    let dir = schema_dir.join(id);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{id}_struct.json")), serde_json::to_string_pretty(doc).unwrap()).unwrap();
}

fn request(schema: &str, taxonomies: Option<Vec<&str>>) -> QueryRequest {
    QueryRequest {
        schema: schema.to_string(),
        asset_category: "buildings".to_string(),
        loss_category: "structural".to_string(),
        taxonomies: taxonomies.map(|t| t.into_iter().map(String::from).collect()),
    }
}

#[test]
fn catalog_scan_only_counts_matching_struct_files() {
    let tmp = TempDir::new().unwrap();
    let schemas = tmp.path().join("schemas");
    write_catalog_entry(&schemas, "X", &sample_document());
    fs::create_dir_all(schemas.join("Y")).unwrap();
    fs::write(schemas.join("Y/not_matching.json"), "{}").unwrap();
    fs::write(schemas.join("stray_struct.json"), "{}").unwrap();

    let found = supported_schemas(&schemas);
    assert_eq!(found.into_iter().collect::<Vec<_>>(), vec!["X".to_string()]);
}

#[test]
fn catalog_scan_of_missing_dir_is_empty() {
    let tmp = TempDir::new().unwrap();
    assert!(supported_schemas(&tmp.path().join("nope")).is_empty());
}

#[test]
fn unfiltered_write_then_load_is_identity() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("in.json");
    fs::write(&input, sample_document().to_string()).unwrap();

    let original = load_schema(&input).expect("load");
    let result = filter_taxonomies(original.clone(), None).expect("filter");
    let output = tmp.path().join("output/query_output.json");
    write_schema(Some(&result.meta), Some(result.data.as_slice()), &output).expect("write");

    let reloaded = load_schema(&output).expect("reload");
    assert_eq!(reloaded, original);
}

#[test]
fn run_projects_single_taxonomy() {
    let tmp = TempDir::new().unwrap();
    write_catalog_entry(&tmp.path().join("schemas"), "X", &sample_document());
    let settings = Settings::default().with_root(tmp.path().to_string_lossy());

    let outcome = run(&settings, &request("X", Some(vec!["B"]))).expect("run");
    assert_eq!(outcome.rows, 1);
    assert_eq!(outcome.output_path, tmp.path().join("output/query_output.json"));

    let written: Value = serde_json::from_str(&fs::read_to_string(&outcome.output_path).unwrap()).unwrap();
    assert_eq!(written["meta"]["taxonomies"], json!(["B"]));
    assert_eq!(written["meta"]["damage_states"], json!(["D0", "D1", "D2"]));
    assert_eq!(written["data"], json!([{"taxonomy": "B", "D1_mean": 0.22, "D1_stddev": 0.6}]));
}

#[test]
fn run_rejects_unknown_schema_before_touching_output() {
    let tmp = TempDir::new().unwrap();
    write_catalog_entry(&tmp.path().join("schemas"), "X", &sample_document());
    let settings = Settings::default().with_root(tmp.path().to_string_lossy());

    let err = run(&settings, &request("DOES_NOT_EXIST", None)).unwrap_err();
    assert!(matches!(err, Error::UnsupportedSchema { .. }), "{err:?}");
    assert!(!tmp.path().join("output").exists());
}

// A selection outside the schema's taxonomies is an error, not a silently
// skipped query that leaves no result behind.
#[test]
fn run_fails_on_taxonomy_outside_schema() {
    let tmp = TempDir::new().unwrap();
    write_catalog_entry(&tmp.path().join("schemas"), "X", &sample_document());
    let settings = Settings::default().with_root(tmp.path().to_string_lossy());

    let err = run(&settings, &request("X", Some(vec!["A", "Q"]))).unwrap_err();
    match err {
        Error::UnknownTaxonomies { missing, .. } => assert_eq!(missing, vec!["Q".to_string()]),
        other => panic!("expected UnknownTaxonomies, got {other:?}"),
    }
    assert!(!tmp.path().join("output/query_output.json").exists());
}

#[test]
fn rows_with_undefined_parameters_lose_the_key() {
    let tmp = TempDir::new().unwrap();
    let mut doc = sample_document();
    doc["data"][0]["D3_mean"] = Value::Null;
    doc["data"][1]["D3_mean"] = json!(1.5);
    write_catalog_entry(&tmp.path().join("schemas"), "X", &doc);
    let settings = Settings::default().with_root(tmp.path().to_string_lossy());

    let outcome = run(&settings, &request("X", None)).expect("run");
    let written: Value = serde_json::from_str(&fs::read_to_string(outcome.output_path).unwrap()).unwrap();
    assert!(written["data"][0].get("D3_mean").is_none());
    assert_eq!(written["data"][1]["D3_mean"], json!(1.5));
}

#[test]
fn load_reports_path_on_parse_failure() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.json");
    fs::write(&path, r#"{"meta": {"id": "X", "taxonomies": []}}"#).unwrap();

    match load_schema(&path) {
        Err(Error::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn long_mantissa_parameters_keep_their_exact_value() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("in.json");
    let literals = ["9.007199254740993e-1", "0.30000000000000004", "1.7976931348623157e308", "2.2250738585072014e-308"];
    let rows: Vec<String> = literals
        .iter()
        .enumerate()
        .map(|(i, v)| format!(r#"{{"taxonomy": "A", "row": {i}, "D1_mean": {v}}}"#))
        .collect();
    let text = format!(r#"{{"meta": {{"id": "X", "taxonomies": ["A"]}}, "data": [{}]}}"#, rows.join(", "));
    fs::write(&input, text).unwrap();

    let result = filter_taxonomies(load_schema(&input).expect("load"), None).expect("filter");
    let output = tmp.path().join("output/query_output.json");
    write_schema(Some(&result.meta), Some(result.data.as_slice()), &output).expect("write");

    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    for (i, literal) in literals.iter().enumerate() {
        let expected: f64 = literal.parse().unwrap();
        let actual = written["data"][i]["D1_mean"].as_f64().unwrap();
        assert_eq!(actual.to_bits(), expected.to_bits(), "{literal} came back as {actual}");
    }
}

#[cfg(unix)]
#[test]
fn catalog_scan_follows_symlinked_struct_files() {
    let tmp = TempDir::new().unwrap();
    let shared = tmp.path().join("shared.json");
    fs::write(&shared, sample_document().to_string()).unwrap();
    let schemas = tmp.path().join("schemas");
    fs::create_dir_all(schemas.join("Z")).unwrap();
    std::os::unix::fs::symlink(&shared, schemas.join("Z/Z_struct.json")).unwrap();

    let found = supported_schemas(&schemas);
    assert_eq!(found.into_iter().collect::<Vec<_>>(), vec!["Z".to_string()]);
}

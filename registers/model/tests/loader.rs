// Licensed under the Apache-2.0 license

use rtlgen_model::{CollectingSink, ModelError, ModelLoader, Severity, WarningSet};
use std::path::Path;

const CTRL_JSON: &str = r#"{ "addrmaps": [ { "name": "ctrl_regs", "children": [
    { "type": "reg", "name": "CTRL", "offset": 0, "fields": [
        { "name": "EN", "lsb": 0, "reset": 0 },
        { "name": "IRQ", "lsb": 1, "intr": true } ] } ] } ] }"#;

const STATUS_TOML: &str = r#"
[[addrmaps]]
name = "status_regs"

[[addrmaps.children]]
type = "reg"
name = "STATUS"

[[addrmaps.children.fields]]
name = "BUSY"
sw = "r"
hw = "w"
"#;

#[test]
fn test_load_from_include_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ctrl.json"), CTRL_JSON).unwrap();
    std::fs::write(dir.path().join("status.toml"), STATUS_TOML).unwrap();

    let mut sink = CollectingSink::new();
    let model = ModelLoader::new()
        .include_dir(dir.path())
        .warnings(WarningSet::all())
        .load(&["ctrl.json", "status.toml"], &mut sink)
        .unwrap();

    assert_eq!(model.roots.len(), 2);
    assert_eq!(model.require_top(None).unwrap().name, "status_regs");
    assert_eq!(
        model.require_top(Some("ctrl_regs")).unwrap().children[0].name(),
        "CTRL"
    );
    // STATUS has an implicit address and BUSY an implicit position.
    assert_eq!(sink.count(Severity::Warning), 2);
    assert_eq!(sink.count(Severity::Info), 2);
    let warning = sink
        .diagnostics
        .iter()
        .find(|d| d.severity == Severity::Warning)
        .unwrap();
    assert!(warning
        .src_ref
        .as_ref()
        .unwrap()
        .file
        .as_ref()
        .unwrap()
        .ends_with("status.toml"));
}

#[test]
fn test_missing_source() {
    let mut sink = CollectingSink::new();
    let err = ModelLoader::new()
        .load(&[Path::new("does_not_exist.json")], &mut sink)
        .unwrap_err();
    assert!(matches!(err, ModelError::NotFound(_)));
}

#[test]
fn test_unsupported_extension_and_bad_json() {
    let dir = tempfile::tempdir().unwrap();
    let rdl = dir.path().join("regs.rdl");
    std::fs::write(&rdl, "addrmap top {};").unwrap();
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{ \"addrmaps\": [ { \"nom\": 1 } ] }").unwrap();

    let mut sink = CollectingSink::new();
    let loader = ModelLoader::new();
    assert!(matches!(
        loader.load(&[&rdl], &mut sink).unwrap_err(),
        ModelError::UnsupportedFormat(_)
    ));
    assert!(matches!(
        loader.load(&[&bad], &mut sink).unwrap_err(),
        ModelError::Json { .. }
    ));
}

#[test]
fn test_parse_error_cause_reported_once() {
    use std::error::Error;

    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{ \"addrmaps\": [ { \"nom\": 1 } ] }").unwrap();

    let err = ModelLoader::new()
        .load(&[&bad], &mut CollectingSink::new())
        .unwrap_err();
    let cause = err.source().unwrap().to_string();
    assert!(err.to_string().starts_with("invalid JSON in '"));
    assert!(!err.to_string().contains(&cause));
}

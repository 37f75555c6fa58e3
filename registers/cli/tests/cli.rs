// Licensed under the Apache-2.0 license

use std::path::Path;
use std::process::{Command, Output};

const CTRL_JSON: &str = r#"{ "addrmaps": [ { "name": "ctrl_regs", "children": [
    { "type": "reg", "name": "CTRL", "offset": 0, "fields": [
        { "name": "EN", "lsb": 0, "reset": 0 },
        { "name": "SPARE", "lsb": 4, "reset": 0, "ispresent": false },
        { "name": "IRQ", "lsb": 1, "intr": true } ] } ] } ] }"#;

fn rtlgen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rtlgen"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_generate() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("rdl")).unwrap();
    std::fs::write(dir.path().join("rdl/ctrl.json"), CTRL_JSON).unwrap();

    let output = rtlgen(
        dir.path(),
        &["-I", "rdl", "-o", "out/ctrl.sv", "--footer", "// end", "ctrl.json"],
    );
    assert!(output.status.success(), "{output:?}");

    let text = std::fs::read_to_string(dir.path().join("out/ctrl.sv")).unwrap();
    assert!(text.starts_with("// Generated by rtlgen from ctrl.json."));
    assert!(text.contains("module ctrl_regs ("));
    assert!(text.contains("module ctrl_regs_backend ("));
    assert!(text.contains("    // Field: SPARE"));
    assert!(text.ends_with("// end\n"));
}

#[test]
fn test_skip_not_present() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ctrl.json"), CTRL_JSON).unwrap();

    let output = rtlgen(
        dir.path(),
        &["--skip-not-present", "--header", "// hdr", "-o", "ctrl.sv", "ctrl.json"],
    );
    assert!(output.status.success(), "{output:?}");

    let text = std::fs::read_to_string(dir.path().join("ctrl.sv")).unwrap();
    assert!(text.starts_with("// hdr\n"));
    assert!(text.contains("    // Field: EN"));
    assert!(!text.contains("SPARE"));
}

#[test]
fn test_unknown_warning_name() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ctrl.json"), CTRL_JSON).unwrap();

    let output = rtlgen(dir.path(), &["-W", "bogus", "-o", "ctrl.sv", "ctrl.json"]);
    assert!(!output.status.success());
    assert!(!dir.path().join("ctrl.sv").exists());
}

#[test]
fn test_unknown_top() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ctrl.json"), CTRL_JSON).unwrap();

    let output = rtlgen(dir.path(), &["-t", "nope", "-o", "ctrl.sv", "ctrl.json"]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stdout.contains("fatal") || stderr.contains("fatal"),
        "{stdout}{stderr}"
    );
}

#[test]
fn test_missing_source() {
    let dir = tempfile::tempdir().unwrap();
    let output = rtlgen(dir.path(), &["-o", "ctrl.sv", "missing.json"]);
    assert!(!output.status.success());
}

#[test]
fn test_parse_error_reported_once() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.json"), r#"{ "addrmaps": [ { "nom": 1 } ] }"#).unwrap();

    let output = rtlgen(dir.path(), &["-o", "bad.sv", "bad.json"]);
    assert!(!output.status.success());
    let log = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(log.matches("unknown field `nom`").count(), 1, "{log}");
}

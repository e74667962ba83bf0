use std::path::Path;
use std::process::{Command, Output};

fn xtbctl(args: &[&str]) -> Output {
    xtbctl_with_log(args, "off")
}

fn xtbctl_with_log(args: &[&str], filter: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_xtbctl"))
        .args(args)
        .env("RUST_LOG", filter)
        .output()
        .unwrap()
}

fn write_config(dir: &Path, anchor: &Path) -> String {
    let path = dir.join("xtbctl.toml");
    std::fs::write(
        &path,
        format!(
            "[search]\nascend_levels = 1\nanchor = {:?}\n",
            anchor.display().to_string()
        ),
    )
    .unwrap();
    path.display().to_string()
}

#[test]
fn test_xtbctl_version() {
    let output = xtbctl(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0.1.0"));
}

#[test]
fn test_xtbctl_help() {
    let output = xtbctl(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("locate"));
    assert!(stdout.contains("load"));
}

#[test]
fn test_locate_json_reports_candidates() {
    let dir = tempfile::tempdir().unwrap();
    let anchor = dir.path().join("bindings");
    std::fs::create_dir_all(&anchor).unwrap();
    let config = write_config(dir.path(), &anchor);

    let output = xtbctl(&["--config", &config, "locate", "--json"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["module"], "Xtb");
    let candidates = report["candidates"].as_array().unwrap();
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0]["dir"], anchor.display().to_string());
    assert_eq!(candidates[1]["dir"], dir.path().display().to_string());
    assert_eq!(candidates[0]["present"], false);
}

#[test]
fn test_locate_json_stays_parseable_with_logging_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let anchor = dir.path().join("bindings");
    std::fs::create_dir_all(&anchor).unwrap();
    let config = write_config(dir.path(), &anchor);

    let output = xtbctl_with_log(&["--config", &config, "locate", "--json"], "debug");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["module"], "Xtb");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Resolved search plan"));
}

#[test]
fn test_load_missing_module_fails_with_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let anchor = dir.path().join("bindings");
    std::fs::create_dir_all(&anchor).unwrap();
    let config = write_config(dir.path(), &anchor);

    let output = xtbctl(&["--config", &config, "load"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Xtb.module"));
    assert!(stderr.contains("could not be located"));
    assert!(stderr.contains(&anchor.display().to_string()));
}

#[test]
fn test_load_corrupt_artifact_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    let anchor = dir.path().join("bindings");
    std::fs::create_dir_all(&anchor).unwrap();
    std::fs::write(
        anchor.join(xtb_runtime::module_filename("Xtb")),
        b"not a library",
    )
    .unwrap();
    let config = write_config(dir.path(), &anchor);

    let output = xtbctl(&["--config", &config, "load"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not be loaded"));
}

#[test]
fn test_init_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("xtbctl.toml");
    let path = path.to_str().unwrap();

    assert!(xtbctl(&["init", path]).status.success());
    let second = xtbctl(&["init", path]);
    assert!(!second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("already exists"));
}

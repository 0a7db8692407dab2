use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    let path = repo_root().join("fixtures").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

#[test]
fn cli_layout_prints_scene_json() {
    let root = repo_root();
    let input = fixture("customer_order.json");

    let exe = assert_cmd::cargo_bin!("ermine-cli");
    let output = Command::new(exe)
        .current_dir(&root)
        .args(["layout", "--pretty", input.to_string_lossy().as_ref()])
        .output()
        .expect("run ermine-cli");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(json["kind"], "elastic");
    let names: Vec<&str> = json["elements"]
        .as_array()
        .expect("elements")
        .iter()
        .filter_map(|e| e["name"].as_str())
        .collect();
    assert_eq!(names, ["Customer", "Order"]);
    assert_eq!(json["connectors"].as_array().map(Vec::len), Some(1));
}

#[test]
fn cli_navigable_focus_selects_the_entity() {
    let root = repo_root();
    let input = fixture("customer_order.json");

    let exe = assert_cmd::cargo_bin!("ermine-cli");
    let output = Command::new(exe)
        .current_dir(&root)
        .args([
            "layout",
            "--variant",
            "navigable",
            "--focus",
            "Order",
            input.to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run ermine-cli");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(json["kind"], "navigable");
    assert_eq!(json["selected"], "Order");
    let center: Vec<&str> = json["elements"]
        .as_array()
        .expect("elements")
        .iter()
        .filter(|e| e["region"] == "center")
        .filter_map(|e| e["name"].as_str())
        .collect();
    assert_eq!(center, ["Order"]);
}

#[test]
fn cli_renders_svg_to_out_path() {
    let root = repo_root();
    let input = fixture("shop.json");

    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("shop.svg");

    let exe = assert_cmd::cargo_bin!("ermine-cli");
    Command::new(exe)
        .current_dir(&root)
        .args([
            "render",
            "--variant",
            "spectral",
            "--width",
            "1200",
            "--out",
            out.to_string_lossy().as_ref(),
            input.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with("<svg"), "output is not SVG");
    assert!(svg.contains(r#"width="1200""#));
    assert!(svg.contains(r#"class="ermine spectral""#));
}

#[test]
fn cli_reads_stdin_and_options_file() {
    let root = repo_root();
    let input = fs::read_to_string(fixture("customer_order.json")).expect("read fixture");

    let tmp = tempfile::tempdir().expect("tempdir");
    let options = tmp.path().join("options.json");
    fs::write(
        &options,
        r#"{"elastic": {"maxIterations": 0}, "scene": {"width": 500, "height": 300}}"#,
    )
    .expect("write options");

    let exe = assert_cmd::cargo_bin!("ermine-cli");
    let output = assert_cmd::Command::new(exe)
        .current_dir(&root)
        .args(["layout", "--options", options.to_string_lossy().as_ref(), "-"])
        .write_stdin(input)
        .output()
        .expect("run ermine-cli");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(json["width"], 500.0);
    assert_eq!(json["height"], 300.0);
}

#[test]
fn cli_fails_on_unknown_entity_reference() {
    let root = repo_root();
    let input = fixture("unknown_reference.json");

    let exe = assert_cmd::cargo_bin!("ermine-cli");
    let output = Command::new(exe)
        .current_dir(&root)
        .args(["layout", input.to_string_lossy().as_ref()])
        .output()
        .expect("run ermine-cli");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("Customer"),
        "stderr should name the missing entity"
    );
}

#[test]
fn cli_usage_errors_exit_with_code_two() {
    let root = repo_root();

    let exe = assert_cmd::cargo_bin!("ermine-cli");
    Command::new(exe)
        .current_dir(&root)
        .args(["layout", "--variant", "radial"])
        .assert()
        .code(2);

    let exe = assert_cmd::cargo_bin!("ermine-cli");
    Command::new(exe)
        .current_dir(&root)
        .args(["--width", "-5"])
        .assert()
        .code(2);
}

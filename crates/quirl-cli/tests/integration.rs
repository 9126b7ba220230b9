//! Integration tests for quirl CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::path::PathBuf;
use std::process::Command;

/// Get the path to the quirl binary from the workspace target directory.
fn binary_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // Go up from quirl-cli to crates
    path.pop(); // Go up from crates to the workspace root

    // Try release first, then debug
    let release = path.join("target/release/quirl");
    if release.exists() {
        return release;
    }
    path.join("target/debug/quirl")
}

#[test]
fn styles_command_lists_all_styles() {
    let output = Command::new(binary_path())
        .arg("styles")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    for style in [
        "square",
        "dots",
        "rounded",
        "extra-rounded",
        "classy",
        "classy-rounded",
    ] {
        assert!(stdout.contains(style), "Should list '{}' style", style);
    }
}

#[test]
fn render_command_produces_svg() {
    let output = Command::new(binary_path())
        .args(["render", "HELLO", "-s", "rounded"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("<?xml"), "Should have XML declaration");
    assert!(stdout.contains("<svg"), "Should have SVG element");
    assert!(stdout.contains("<path"), "Should have path elements");
    assert!(stdout.contains("</svg>"), "Should close SVG element");
}

#[test]
fn render_command_produces_json() {
    let output = Command::new(binary_path())
        .args(["render", "HELLO", "-f", "json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    let value: serde_json::Value = serde_json::from_str(&stdout).expect("Should be valid JSON");
    assert_eq!(value["style"], "square");
    assert!(value["modules"].as_u64().unwrap() >= 21);
    assert!(!value["shapes"].as_array().unwrap().is_empty());
    let first = &value["shapes"][0];
    assert!(first["d"].as_str().unwrap().starts_with('M'));
}

#[test]
fn render_is_deterministic() {
    let run = || {
        let output = Command::new(binary_path())
            .args(["render", "DETERMINISM", "-s", "classy"])
            .output()
            .expect("Failed to execute command");
        assert!(output.status.success());
        output.stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn circle_render_grows_the_canvas() {
    let square = Command::new(binary_path())
        .args(["render", "HELLO", "-f", "json"])
        .output()
        .expect("Failed to execute command");
    let circle = Command::new(binary_path())
        .args(["render", "HELLO", "-f", "json", "--circle"])
        .output()
        .expect("Failed to execute command");

    let square: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&square.stdout)).unwrap();
    let circle: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&circle.stdout)).unwrap();
    assert!(circle["modules"].as_u64().unwrap() > square["modules"].as_u64().unwrap());
}

#[test]
fn unknown_style_fails_with_message() {
    let output = Command::new(binary_path())
        .args(["render", "HELLO", "-s", "wavy"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown dot style"));
}

#[test]
fn config_file_drives_the_render() {
    let dir = std::env::temp_dir();
    let config_path = dir.join("quirl-test-config.yaml");
    std::fs::write(
        &config_path,
        "data: CONFIGURED\nstyle: extra-rounded\ncircle: true\n",
    )
    .unwrap();

    let output = Command::new(binary_path())
        .args(["render", "-c", config_path.to_str().unwrap(), "-f", "json"])
        .output()
        .expect("Failed to execute command");
    std::fs::remove_file(&config_path).ok();

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(value["style"], "extra-rounded");
}

#[test]
fn help_prints_usage() {
    let output = Command::new(binary_path())
        .arg("help")
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage:"));
    assert!(stderr.contains("render"));
    assert!(stderr.contains("styles"));
}

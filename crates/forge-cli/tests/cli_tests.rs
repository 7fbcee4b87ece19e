//! Integration tests for the `forge` binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

/// `forge` running in `dir` with the user's config and environment shut out.
fn forge(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("forge");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("FORGE_RESOURCES_DIR")
        .env_remove("FORGE_PATHS__ENGINE_DIR");
    cmd
}

fn project(dir: &Path, descriptors: &[&str]) {
    let game = dir.join("game");
    fs::create_dir_all(&game).unwrap();
    for name in descriptors {
        fs::write(
            game.join(name),
            "projectName: Demo\ninclude: \"demo.h\"\ncomponentList: \"Transform, Sprite\"\n",
        )
        .unwrap();
    }
    fs::create_dir_all(dir.join("engine/TungstenCore")).unwrap();
}

// ── help / version ────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("locate"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .args(["build", "--no-such-flag"])
        .assert()
        .code(2);
}

// ── locate ────────────────────────────────────────────────────────────────────

#[test]
fn locate_prints_descriptor() {
    let temp = TempDir::new().unwrap();
    project(temp.path(), &["demo.wproj"]);

    forge(temp.path())
        .args(["locate", "game"])
        .assert()
        .success()
        .stdout(predicate::str::contains("demo.wproj"));
}

#[test]
fn locate_show_prints_fields() {
    let temp = TempDir::new().unwrap();
    project(temp.path(), &["demo.wproj"]);

    forge(temp.path())
        .args(["locate", "game", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("projectName: Demo"))
        .stdout(predicate::str::contains("Transform, Sprite"));
}

#[test]
fn locate_json() {
    let temp = TempDir::new().unwrap();
    project(temp.path(), &["demo.wproj"]);

    let out = forge(temp.path())
        .args(["--output-format", "json", "locate", "game"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert!(doc["descriptor"].as_str().unwrap().ends_with("demo.wproj"));
    assert!(doc.get("project").is_none());
}

#[test]
fn locate_without_descriptor_is_not_found() {
    let temp = TempDir::new().unwrap();
    project(temp.path(), &[]);

    forge(temp.path())
        .args(["locate", "game"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn locate_with_two_descriptors_is_ambiguous() {
    let temp = TempDir::new().unwrap();
    project(temp.path(), &["a.wproj", "b.wproj"]);

    forge(temp.path())
        .args(["locate", "game"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("a.wproj, b.wproj"));
}

#[test]
fn locate_missing_path_is_a_user_error() {
    let temp = TempDir::new().unwrap();

    forge(temp.path())
        .args(["locate", "does-not-exist"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));
}

// ── build ─────────────────────────────────────────────────────────────────────

#[test]
fn build_without_engine_dir_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    project(temp.path(), &["demo.wproj"]);

    forge(temp.path())
        .args(["build", "game"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("--engine-dir"));
}

#[test]
fn build_with_missing_cmake_fails_at_configure() {
    let temp = TempDir::new().unwrap();
    project(temp.path(), &["demo.wproj"]);

    forge(temp.path())
        .args([
            "build",
            "game",
            "--engine-dir",
            "engine",
            "--cmake",
            "/definitely/not/cmake",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Build failed at configure"));

    // Everything up to the configure step happened.
    assert!(temp.path().join("game/int/CMakeLists.txt").is_file());
    assert!(
        temp.path()
            .join("game/int/TungstenRuntime/src/generated/projectDefines.hpp")
            .is_file()
    );
}

#[test]
fn build_failure_json_reports_log() {
    let temp = TempDir::new().unwrap();
    project(temp.path(), &["demo.wproj"]);

    let out = forge(temp.path())
        .args([
            "--output-format",
            "json",
            "build",
            "game",
            "-e",
            "engine",
            "--cmake",
            "/definitely/not/cmake",
        ])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));

    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(doc["success"], false);
    assert!(doc["report"].is_null());
    let errors: Vec<_> = doc["log"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["level"] == "error")
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["stage"], "configure");
}

#[test]
fn build_reads_engine_dir_from_environment() {
    let temp = TempDir::new().unwrap();
    project(temp.path(), &["demo.wproj"]);

    forge(temp.path())
        .env("FORGE_PATHS__ENGINE_DIR", "engine")
        .env("FORGE_BUILD_TOOL__PROGRAM", "/definitely/not/cmake")
        .args(["build", "game"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Build failed at configure"));
}

#[test]
fn build_with_two_descriptors_is_a_user_error() {
    let temp = TempDir::new().unwrap();
    project(temp.path(), &["a.wproj", "b.wproj"]);

    forge(temp.path())
        .args(["build", "game", "-e", "engine"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Build failed at locate"))
        .stderr(predicate::str::contains("a.wproj, b.wproj"));
    assert!(!temp.path().join("game/bin").exists());
}

#[test]
fn build_without_descriptor_is_not_found() {
    let temp = TempDir::new().unwrap();
    project(temp.path(), &[]);

    forge(temp.path())
        .args(["build", "game", "-e", "engine"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Could not get project file path"));
}

#[cfg(unix)]
#[test]
fn build_with_stub_toolchain_succeeds() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    project(temp.path(), &["demo.wproj"]);

    // Configure is a no-op; build drops a runtime binary and a reflect
    // tool that writes two component names to its -o argument.
    let cmake = temp.path().join("fake-cmake");
    fs::write(
        &cmake,
        r#"#!/bin/sh
if [ "$1" = "--build" ]; then
  tree="$2"
  mkdir -p "$tree/TungstenRuntime" "$tree/TungstenReflect"
  echo binary > "$tree/TungstenRuntime/Demo"
  printf '#!/bin/sh\nprintf "Transform\\nSprite\\n" > "$2"\n' > "$tree/TungstenReflect/TungstenReflect"
  chmod +x "$tree/TungstenReflect/TungstenReflect"
fi
exit 0
"#,
    )
    .unwrap();
    fs::set_permissions(&cmake, fs::Permissions::from_mode(0o755)).unwrap();

    forge(temp.path())
        .args(["build", "game", "-e", "engine", "-o", "dist", "--cmake"])
        .arg(&cmake)
        .assert()
        .success()
        .stdout(predicate::str::contains("Built 'Demo'"))
        .stdout(predicate::str::contains("Transform, Sprite"));

    assert_eq!(
        fs::read_to_string(temp.path().join("dist/Demo")).unwrap(),
        "binary\n"
    );
}

// ── config / init / completions ───────────────────────────────────────────────

#[test]
fn init_local_writes_defaults() {
    let temp = TempDir::new().unwrap();

    forge(temp.path())
        .args(["init", "--local"])
        .assert()
        .success();

    let written = fs::read_to_string(temp.path().join(".forge.toml")).unwrap();
    assert!(written.contains("[build_tool]"));
    assert!(written.contains("program = \"cmake\""));
}

#[test]
fn config_get_reads_local_file() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".forge.toml"),
        "[paths]\nengine_dir = \"/opt/tungsten\"\n",
    )
    .unwrap();

    forge(temp.path())
        .args(["config", "get", "paths.engine_dir"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/opt/tungsten"));
}

#[test]
fn config_get_unknown_key_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .args(["config", "get", "nope.key"])
        .assert()
        .code(4);
}

#[test]
fn explicit_missing_config_file_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .args(["--config", "missing.toml", "config", "list"])
        .assert()
        .code(4);
}

#[test]
fn config_path_prints_a_path() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("toml"));
}

#[test]
fn bash_completions() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("forge"));
}

#[test]
fn log_file_receives_build_log() {
    let temp = TempDir::new().unwrap();
    project(temp.path(), &["demo.wproj"]);

    forge(temp.path())
        .args([
            "-v",
            "--log-file",
            "logs/forge.log",
            "build",
            "game",
            "-e",
            "engine",
            "--cmake",
            "/definitely/not/cmake",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("forge.log"));

    let log = fs::read_to_string(temp.path().join("logs/forge.log")).unwrap();
    assert!(log.contains("Build called."));
}

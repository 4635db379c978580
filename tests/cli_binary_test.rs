//! Binary integration tests for CLI commands
//!
//! These tests run the actual promptlet binary against a temporary config and
//! state directory.

#![expect(clippy::unwrap_used, reason = "integration test assertions")]

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn promptlet_bin(home: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_promptlet"));
    command
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("PROMPTLET_STATE_DIR", home.join("state"))
        .env_remove("DEBUG");
    command
}

fn run(home: &Path, args: &[&str]) -> Output {
    promptlet_bin(home).args(args).output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn state_file(home: &Path) -> std::path::PathBuf {
    home.join("state").join("promptletState.json")
}

#[test]
fn test_cli_help() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["--help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("mini-apps"));
}

#[test]
fn test_cli_version() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["--version"]);
    assert!(output.status.success());
}

#[test]
fn test_cli_invalid_argument_shows_help() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["--invalid-flag"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
    assert!(stdout(&output).contains("Usage:"));
}

#[test]
fn test_cli_show_defaults_without_writing() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["show"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("API key:    not set"));
    assert!(out.contains("Theme:      light (light)"));
    assert!(out.contains("Models:     3"));
    assert!(!state_file(home.path()).exists());
}

#[test]
fn test_cli_config_path() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["config", "--path"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("promptlet"));
}

#[test]
fn test_cli_config_show() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["config"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("promptletState"));
}

#[test]
fn test_cli_key_is_masked_and_persisted() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["key", "set", "sk-test-12345678"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("****5678"));

    let blob = std::fs::read_to_string(state_file(home.path())).unwrap();
    assert!(blob.contains("sk-test-12345678"));

    let shown = stdout(&run(home.path(), &["show"]));
    assert!(shown.contains("****5678"));
    assert!(!shown.contains("sk-test-12345678"));

    let revealed = stdout(&run(home.path(), &["show", "--reveal"]));
    assert!(revealed.contains("sk-test-12345678"));
}

#[test]
fn test_cli_unsaved_key_never_reaches_disk() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["key", "set", "sk-secret", "--no-save"]);
    assert!(output.status.success());

    let blob = std::fs::read_to_string(state_file(home.path())).unwrap();
    assert!(!blob.contains("sk-secret"));
    assert!(!blob.contains("apiKey"));
    assert!(blob.contains("\"saveApiKey\": false"));
}

#[test]
fn test_cli_app_lifecycle() {
    let home = TempDir::new().unwrap();

    let output = run(
        home.path(),
        &["app", "add", "--name", "  Translator ", "--prompt", "Translate."],
    );
    assert!(output.status.success());
    let created = stdout(&output);
    let id = created.trim().rsplit(' ').next().unwrap().to_string();

    let listed = stdout(&run(home.path(), &["app", "list"]));
    assert!(listed.contains("* "));
    assert!(listed.contains("Translator"));
    assert!(listed.contains("gemini-3-flash-preview"));

    let output = run(home.path(), &["app", "edit", &id[..8], "--model", "gemini-2.5-pro"]);
    assert!(output.status.success());
    assert!(stdout(&run(home.path(), &["app", "list"])).contains("gemini-2.5-pro"));

    let output = run(home.path(), &["app", "delete", &id]);
    assert!(output.status.success());

    // The selection still names the deleted app
    let shown = stdout(&run(home.path(), &["show"]));
    assert!(shown.contains("(missing)"));
    assert!(shown.contains("Mini-apps:  0"));

    assert!(run(home.path(), &["app", "deselect"]).status.success());
    assert!(stdout(&run(home.path(), &["show"])).contains("Active app: none"));
}

#[test]
fn test_cli_blank_app_name_is_rejected() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["app", "add", "--name", "   "]);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("error: mini-app name cannot be empty")
    );
    assert!(!state_file(home.path()).exists());
}

#[test]
fn test_cli_unknown_app_is_an_error() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["app", "use", "nope"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no mini-app matches 'nope'"));
}

#[test]
fn test_cli_models_cannot_be_emptied() {
    let home = TempDir::new().unwrap();
    assert!(run(home.path(), &["models", "remove", "gemini-3-pro-preview"]).status.success());
    assert!(run(home.path(), &["models", "remove", "gemini-2.5-pro"]).status.success());

    let output = run(home.path(), &["models", "remove", "gemini-3-flash-preview"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("add at least one model option"));

    let listed = stdout(&run(home.path(), &["models", "list"]));
    assert_eq!(listed.lines().count(), 1);

    assert!(run(home.path(), &["models", "reset"]).status.success());
    assert_eq!(stdout(&run(home.path(), &["models", "list"])).lines().count(), 3);
}

#[test]
fn test_cli_models_add_rejects_blank_label() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["models", "add", "local", " "]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("row 4"));
}

#[test]
fn test_cli_theme_system_follows_config() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("config").join("promptlet");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.json"),
        r#"{ "system_prefers_dark": true }"#,
    )
    .unwrap();

    let output = run(home.path(), &["theme", "system"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("system (dark)"));

    let output = run(home.path(), &["theme", "LIGHT"]);
    assert!(stdout(&output).contains("light (light)"));

    let output = run(home.path(), &["theme", "sepia"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_failed_write_is_an_error() {
    let home = TempDir::new().unwrap();
    // A directory where the lock file goes makes every save fail
    let lock_path = home.path().join("state").join("promptletState.json.lock");
    std::fs::create_dir_all(&lock_path).unwrap();

    let output = run(home.path(), &["app", "add", "--name", "Lost"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!stdout(&output).contains("Created"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: Changes were not saved"));
    assert!(!state_file(home.path()).exists());
}

#[test]
fn test_cli_unreadable_state_is_left_alone() {
    let home = TempDir::new().unwrap();
    // A directory where the state file should be cannot be read as a file
    std::fs::create_dir_all(state_file(home.path())).unwrap();

    let output = run(home.path(), &["app", "add", "--name", "Clobber"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("error: Failed to open state"));
    assert!(state_file(home.path()).is_dir());
}

#[test]
fn test_cli_unknown_theme_in_file_keeps_apps() {
    let home = TempDir::new().unwrap();
    assert!(run(home.path(), &["app", "add", "--name", "Survivor"]).status.success());

    let path = state_file(home.path());
    let blob = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, blob.replace("\"light\"", "\"sepia\"")).unwrap();

    assert!(run(home.path(), &["app", "deselect"]).status.success());
    let listed = stdout(&run(home.path(), &["app", "list"]));
    assert!(listed.contains("Survivor"));
}

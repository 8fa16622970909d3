//! Test: the bettermd binary end to end

use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the binary with a config home that holds no config file
fn bettermd(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bettermd"))
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run bettermd")
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_single_input_prints_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "doc.md", "# Hi\n\nBody.");

    let out = bettermd(dir.path(), &["convert", arg(&input), "--to", "rst"]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "==\nHi\n==\n\nBody.\n");
    assert!(!dir.path().join("doc.rst").exists());
}

#[test]
fn test_several_inputs_are_written_beside_their_inputs() {
    let dir = TempDir::new().unwrap();
    let a = write(dir.path(), "a.md", "Alpha");
    let b = write(dir.path(), "b.html", "<p>Beta</p>");

    let out = bettermd(dir.path(), &["convert", arg(&a), arg(&b), "--to", "rst"]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read_to_string(dir.path().join("a.rst")).unwrap(), "Alpha\n");
    assert_eq!(fs::read_to_string(dir.path().join("b.rst")).unwrap(), "Beta\n");
}

#[test]
fn test_overwriting_an_input_is_refused() {
    let dir = TempDir::new().unwrap();
    let a = write(dir.path(), "a.md", "# A");
    let b = write(dir.path(), "b.md", "# B");

    let out = bettermd(dir.path(), &["convert", arg(&a), arg(&b), "--to", "md"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Refusing to overwrite"));
    assert_eq!(fs::read_to_string(&a).unwrap(), "# A");
    assert_eq!(fs::read_to_string(&b).unwrap(), "# B");
}

#[test]
fn test_partial_failure_exits_with_1() {
    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("out");
    let good = write(dir.path(), "good.md", "# Good");
    let missing = dir.path().join("missing.md");

    let out = bettermd(
        dir.path(),
        &["convert", arg(&good), arg(&missing), "--to", "md", "-o", arg(&out_dir)],
    );

    assert_eq!(out.status.code(), Some(1));
    assert_eq!(fs::read_to_string(out_dir.join("good.md")).unwrap(), "# Good\n");
    assert!(!out_dir.join("missing.md").exists());
}

#[test]
fn test_check_config_json_is_the_only_output() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "c.yaml", "html:\n  indent: 2\n");

    let out = bettermd(dir.path(), &["--config", arg(&config), "check-config", "--json"]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["html"]["indent"], 2);
    assert_eq!(json["strict"], false);
}

#[test]
fn test_check_config_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "bad.yaml", "rst:\n  heading_chars: \"abc\"\n");

    let out = bettermd(dir.path(), &["--config", arg(&config), "check-config"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Validation failed"));
}

//! Integration tests for the voidnorm CLI
//!
//! These tests invoke the actual voidnorm-cli binary against temporary
//! source trees and verify:
//! - Exit codes (0 = success, 1 = `--check` found changes, 2 = error)
//! - Files on disk after the run
//! - stdout/stderr output and the JSON report

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

// ── Helpers ───────────────────────────────────────────────

const NEEDS_FIX: &str = "void CL_Init( void );\nint CL_Frame(VOID);\nvoid CL_Shutdown( );\n";
const FIXED: &str = "void CL_Init();\nint CL_Frame();\nvoid CL_Shutdown();\n";

fn voidnorm_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_voidnorm-cli"))
}

fn run(args: &[&str], cwd: &Path) -> std::process::Output {
    Command::new(voidnorm_bin())
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute voidnorm-cli")
}

fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

fn source_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "engine/client/cl_main.c", NEEDS_FIX);
    write(dir.path(), "engine/renderer/tr_init.cpp", NEEDS_FIX);
    write(dir.path(), "shared/q_shared.h", "int Q_Clean(int x);\n");
    write(dir.path(), "extern/zlib/inflate.c", NEEDS_FIX);
    write(dir.path(), "README.txt", NEEDS_FIX);
    dir
}

// ── Version ───────────────────────────────────────────────

#[test]
fn test_version_command() {
    let dir = TempDir::new().unwrap();
    let output = run(&["version"], dir.path());
    assert!(output.status.success(), "version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("voidnorm"), "should contain 'voidnorm'");
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "should contain version"
    );
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    let output = run(&["--version"], dir.path());
    assert!(output.status.success(), "--version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

// ── Walk ──────────────────────────────────────────────────

#[test]
fn test_walk_rewrites_tree() {
    let dir = source_tree();
    let output = run(&["walk", dir.path().to_str().unwrap()], dir.path());
    assert!(output.status.success(), "walk should exit 0");

    assert_eq!(read(&dir.path().join("engine/client/cl_main.c")), FIXED);
    assert_eq!(read(&dir.path().join("engine/renderer/tr_init.cpp")), FIXED);
    assert_eq!(read(&dir.path().join("extern/zlib/inflate.c")), NEEDS_FIX);
    assert_eq!(read(&dir.path().join("README.txt")), NEEDS_FIX);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Skipping directory"), "should report extern/");
    assert!(stdout.contains("simplified 3"), "should report counts");
    assert!(stdout.contains("3 files scanned, 2 changed, 6 substitutions"));
}

#[test]
fn test_walk_defaults_to_current_dir() {
    let dir = source_tree();
    let output = run(&["walk"], dir.path());
    assert!(output.status.success());
    assert_eq!(read(&dir.path().join("engine/client/cl_main.c")), FIXED);
}

#[test]
fn test_walk_idempotent() {
    let dir = source_tree();
    let root = dir.path().to_str().unwrap();
    assert!(run(&["walk", root], dir.path()).status.success());

    let output = run(&["walk", "--json", root], dir.path());
    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("should be valid JSON");
    assert_eq!(json["substitutions"], 0);
    assert_eq!(json["files_changed"], 0);
}

#[test]
fn test_walk_skip_dir_and_no_default_skips() {
    let dir = source_tree();
    let output = run(
        &[
            "walk",
            "--no-default-skips",
            "--skip-dir",
            "RENDERER",
            dir.path().to_str().unwrap(),
        ],
        dir.path(),
    );
    assert!(output.status.success());
    assert_eq!(read(&dir.path().join("extern/zlib/inflate.c")), FIXED);
    assert_eq!(read(&dir.path().join("engine/renderer/tr_init.cpp")), NEEDS_FIX);
    assert_eq!(read(&dir.path().join("engine/client/cl_main.c")), FIXED);
}

#[test]
fn test_walk_skip_file() {
    let dir = source_tree();
    let output = run(
        &[
            "walk",
            "--skip-file",
            "engine/client/CL_MAIN.c",
            dir.path().to_str().unwrap(),
        ],
        dir.path(),
    );
    assert!(output.status.success());
    assert_eq!(read(&dir.path().join("engine/client/cl_main.c")), NEEDS_FIX);
    assert_eq!(read(&dir.path().join("engine/renderer/tr_init.cpp")), FIXED);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Skipping file"));
}

#[test]
fn test_walk_dry_run() {
    let dir = source_tree();
    let output = run(&["walk", "--dry-run", dir.path().to_str().unwrap()], dir.path());
    assert!(output.status.success());
    assert_eq!(read(&dir.path().join("engine/client/cl_main.c")), NEEDS_FIX);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("would simplify 3"));
}

#[test]
fn test_walk_check_exit_codes() {
    let dir = source_tree();
    let root = dir.path().to_str().unwrap();

    let output = run(&["walk", "--check", root], dir.path());
    assert_eq!(output.status.code(), Some(1), "pending changes should exit 1");
    assert_eq!(read(&dir.path().join("engine/client/cl_main.c")), NEEDS_FIX);

    assert!(run(&["walk", root], dir.path()).status.success());
    let output = run(&["walk", "--check", root], dir.path());
    assert_eq!(output.status.code(), Some(0), "clean tree should exit 0");
}

#[test]
fn test_walk_json_output() {
    let dir = source_tree();
    let output = run(&["walk", "--json", dir.path().to_str().unwrap()], dir.path());
    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("should be valid JSON");
    assert_eq!(json["files_scanned"], 3);
    assert_eq!(json["files_changed"], 2);
    assert_eq!(json["substitutions"], 6);
    assert_eq!(json["failures"], 0);
    let kinds: Vec<&str> = json["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"skipped_dir"));
    assert!(kinds.contains(&"processed"));
}

#[test]
fn test_walk_decode_failure_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a_latin.c"), b"/* \xE9 */ void f(void);").unwrap();
    let good = write(dir.path(), "b_good.c", NEEDS_FIX);

    let output = run(
        &["walk", "--encoding", "utf-8", dir.path().to_str().unwrap()],
        dir.path(),
    );
    assert!(output.status.success(), "per-file failures must not fail the run");
    assert_eq!(read(&good), FIXED);
    assert_eq!(
        fs::read(dir.path().join("a_latin.c")).unwrap(),
        b"/* \xE9 */ void f(void);"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("a_latin.c"), "should name the skipped file");
}

#[test]
fn test_walk_missing_root() {
    let dir = TempDir::new().unwrap();
    let output = run(&["walk", "does-not-exist"], dir.path());
    assert_eq!(output.status.code(), Some(2), "missing root should exit 2");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"));
}

#[test]
fn test_walk_quiet() {
    let dir = source_tree();
    let output = run(&["--quiet", "walk", dir.path().to_str().unwrap()], dir.path());
    assert!(output.status.success());
    assert!(output.stdout.is_empty(), "quiet mode should produce no stdout");
    assert_eq!(read(&dir.path().join("engine/client/cl_main.c")), FIXED);
}

#[test]
fn test_walk_unknown_encoding() {
    let dir = TempDir::new().unwrap();
    let output = run(&["walk", "--encoding", "ebcdic"], dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_walk_reports_source_encoding() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cl_keys.c");
    fs::write(&path, b"/* caf\xE9 */ void K_Init(void);\n").unwrap();

    let output = run(&["walk", dir.path().to_str().unwrap()], dir.path());
    assert!(output.status.success());
    assert_eq!(read(&path), "/* café */ void K_Init();\n");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("simplified 1"));
    assert!(stdout.contains("(from latin1)"), "should name the source encoding");
}

// ── File ──────────────────────────────────────────────────

#[test]
fn test_file_rewrites_single_file() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "extern/cl_keys.c", NEEDS_FIX);
    let output = run(&["file", path.to_str().unwrap()], dir.path());
    assert!(output.status.success());
    assert_eq!(read(&path), FIXED, "single-file mode ignores skip rules");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("simplified 3"));
}

#[test]
fn test_file_json_output() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "cl_keys.c", "int K_Clean(int k);\n");
    let output = run(&["file", "--json", path.to_str().unwrap()], dir.path());
    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("should be valid JSON");
    assert_eq!(json["outcome"]["status"], "unchanged");
    assert_eq!(json["outcome"]["encoding"], "utf-8");
}

#[test]
fn test_file_missing() {
    let dir = TempDir::new().unwrap();
    let output = run(&["file", "nonexistent.c"], dir.path());
    assert_eq!(output.status.code(), Some(2), "missing file should exit 2");
}

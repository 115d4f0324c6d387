use assert_cmd::Command;
use monocov_test_utils::write_document;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const PRESENT: &str = "_ZN3foo3barE17h0123456789abcdefE";
const ABSENT: &str = "_ZN3foo3barE17hffffffffffffffffE";

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("check-cov").unwrap();
    cmd.env_remove("DEBUG").env_remove("MONOCOV_LOG");
    cmd
}

fn fixture(file_name: &str, items: &[&str], links: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_document(dir.path(), file_name, items, links);
    dir
}

#[test]
fn covered_reference_prints_nothing() {
    let dir = fixture("mycrate.smir.json", &[PRESENT], &[PRESENT]);
    cmd()
        .arg("--search-dir")
        .arg(dir.path())
        .arg("mycrate")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn missing_reference_line() {
    let dir = fixture("mycrate.smir.json", &[PRESENT], &[ABSENT]);
    cmd()
        .arg("--search-dir")
        .arg(dir.path())
        .arg("mycrate")
        .assert()
        .success()
        .stdout("mycrate::foo::bar->['ffffffffffffffff']\n");
}

#[test]
fn foreign_reference_listed_first() {
    let dir = fixture("mycrate.smir.json", &[PRESENT], &[ABSENT, "memcpy"]);
    cmd()
        .arg("--search-dir")
        .arg(dir.path())
        .arg("mycrate")
        .assert()
        .success()
        .stdout("memcpy\nmycrate::foo::bar->['ffffffffffffffff']\n");
}

#[test]
fn explicit_files_share_one_index() {
    let dir = tempfile::tempdir().unwrap();
    let main = write_document(dir.path(), "mycrate.smir.json", &[], &[PRESENT]);
    let dep = write_document(dir.path(), "dep-0a1b.smir.json", &[PRESENT], &[]);
    cmd()
        .arg("mycrate")
        .arg(&main)
        .arg(&dep)
        .arg("--sequential")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn ambiguous_discovery_fails_with_one_line() {
    let dir = fixture("mycrate.smir.json", &[], &[]);
    write_document(dir.path(), "mycrate-abc123.smir.json", &[], &[]);
    cmd()
        .arg("--search-dir")
        .arg(dir.path())
        .arg("mycrate")
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(contains("Error: metadata discovery failed: non-unique metadata files"))
        .stderr(predicate::str::is_match("^[^\n]*\n$").unwrap());
}

#[test]
fn absent_discovery_fails() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .arg("--search-dir")
        .arg(dir.path())
        .arg("mycrate")
        .assert()
        .failure()
        .stderr(contains("Error: metadata discovery failed"));
}

#[test]
fn debug_env_shows_detail() {
    let dir = fixture("mycrate.smir.json", &["_ZN9foo17h0123456789abcdefE"], &[]);
    cmd()
        .env("DEBUG", "1")
        .arg("--search-dir")
        .arg(dir.path())
        .arg("mycrate")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Error [MalformedSymbol]"))
        .stderr(contains("MalformedSymbol {"));
}

#[test]
fn debug_env_accepts_boolish_words() {
    let dir = fixture("mycrate.smir.json", &["_ZN9foo17h0123456789abcdefE"], &[]);
    cmd()
        .env("DEBUG", "yes")
        .arg("--search-dir")
        .arg(dir.path())
        .arg("mycrate")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Error [MalformedSymbol]"));
}

#[test]
fn debug_env_zero_keeps_brief_errors() {
    let dir = fixture("mycrate.smir.json", &["_ZN9foo17h0123456789abcdefE"], &[]);
    cmd()
        .env("DEBUG", "0")
        .arg("--search-dir")
        .arg(dir.path())
        .arg("mycrate")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Error: malformed symbol in crate 'mycrate'"))
        .stderr(contains("Error [").not());
}

#[test]
fn json_output() {
    let dir = fixture("mycrate.smir.json", &[PRESENT], &[ABSENT, "memcpy"]);
    let output = cmd()
        .args(["--json", "--search-dir"])
        .arg(dir.path())
        .arg("mycrate")
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "foreign": ["memcpy"],
            "missing": [{"crate": "mycrate", "path": "foo::bar", "hashes": ["ffffffffffffffff"]}],
        })
    );
}

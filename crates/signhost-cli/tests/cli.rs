#![allow(deprecated)] // cargo_bin is deprecated but still supported by assert_cmd

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const GOOD: &str = "cdc09eee2ed6df2846dcc193aedfef59f2834f8d";
const BAD: &str = "70dda90616f744797972c0d2f787f86643a60c83";

fn postback_fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../signhost-api/tests/fixtures/postback_valid.json")
}

fn signhost() -> Command {
    let mut cmd = Command::cargo_bin("signhost").expect("signhost binary");
    cmd.env_remove("SIGNHOST_SHARED_SECRET");
    cmd
}

#[test]
fn postback_verify_accepts_matching_checksum() {
    signhost()
        .args(["postback", "verify"])
        .arg(postback_fixture())
        .args(["--checksum", GOOD, "--shared-secret", "SharedSecret"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "valid: transaction b10ae331-af78-4e79-a39e-5b64693b6b68 status 20 (InProgress)",
        ));
}

#[test]
fn postback_verify_reads_secret_from_env() {
    signhost()
        .env("SIGNHOST_SHARED_SECRET", "SharedSecret")
        .args(["postback", "verify"])
        .arg(postback_fixture())
        .assert()
        .success();
}

#[test]
fn postback_verify_rejects_wrong_checksum() {
    signhost()
        .args(["postback", "verify"])
        .arg(postback_fixture())
        .args(["--checksum", BAD, "--shared-secret", "SharedSecret"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("postback is not valid"));
}

#[test]
fn postback_verify_without_secret_is_config_error() {
    signhost()
        .args(["postback", "verify"])
        .arg(postback_fixture())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("SIGNHOST_SHARED_SECRET"));
}

#[test]
fn postback_verify_json_output() {
    let output = signhost()
        .args(["postback", "verify", "--json", "--shared-secret", "SharedSecret"])
        .arg(postback_fixture())
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let tx: Value = serde_json::from_slice(&output.stdout).expect("json on stdout");
    assert_eq!(tx["Id"], "b10ae331-af78-4e79-a39e-5b64693b6b68");
    assert_eq!(tx["Signers"][0]["Verifications"][1]["Type"], "IPAddress");
}

#[test]
fn postback_verify_reads_stdin() {
    let body = fs::read_to_string(postback_fixture()).unwrap();
    signhost()
        .args(["postback", "verify", "-", "--shared-secret", "SharedSecret"])
        .write_stdin(body)
        .assert()
        .success();
}

#[test]
fn postback_checksum_prints_expected_value() {
    signhost()
        .args([
            "postback",
            "checksum",
            "--id",
            "b10ae331-af78-4e79-a39e-5b64693b6b68",
            "--status",
            "20",
            "--shared-secret",
            "SharedSecret",
        ])
        .assert()
        .success()
        .stdout(format!("{GOOD}\n"));
}

#[test]
fn digest_of_empty_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.pdf");
    fs::write(&path, b"").unwrap();

    signhost()
        .arg("digest")
        .arg(&path)
        .assert()
        .success()
        .stdout("Digest: SHA-256=47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=\n");
}

#[test]
fn digest_of_missing_file_is_io_error() {
    signhost()
        .args(["digest", "does-not-exist.pdf"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("does-not-exist.pdf"));
}

#[test]
fn digest_uses_precomputed_value() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    fs::write(&path, b"content").unwrap();
    signhost()
        .arg("digest")
        .arg(&path)
        .args(["--precomputed", "000102"])
        .assert()
        .success()
        .stdout("Digest: SHA-256=AAEC\n");
}

#[test]
fn digest_of_stdin_is_skipped() {
    signhost()
        .args(["digest", "-"])
        .write_stdin("streamed upload")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no digest"));
}

#[test]
fn digest_with_unknown_algorithm_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    fs::write(&path, b"content").unwrap();

    signhost()
        .arg("digest")
        .arg(&path)
        .args(["--algorithm", "SHA3-256"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("SHA3-256"));
}

#[test]
fn verification_decode_keeps_unknown_types() {
    signhost()
        .args(["verification", "decode", "-"])
        .write_stdin(r#"{"Type":"Brand New","Score":7}"#)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"Brand New\"").and(predicate::str::contains("\"Score\": 7")),
        );
}

#[test]
fn verification_decode_without_type_is_malformed() {
    signhost()
        .args(["verification", "decode", "-"])
        .write_stdin(r#"{"Score":7}"#)
        .assert()
        .code(3);
}

#[test]
fn verification_types_lists_builtins() {
    signhost()
        .args(["verification", "types"])
        .assert()
        .success()
        .stdout(predicate::str::contains("eIDAS Login").and(predicate::str::contains("Onfido")));
}

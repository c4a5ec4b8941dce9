//! Integration tests for the contoso-db CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get the contoso-db binary, isolated from the caller's configuration
#[allow(deprecated)]
fn contoso_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("contoso-db").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("MSSQL_CONNECTION_STRING")
        .env_remove("POSTGRES_CONNECTION_STRING")
        .env_remove("CONTOSO_APP_ROOT")
        .env_remove("CONTOSO_DB_CONFIG")
        .env_remove("CONTOSO_DB_DEBUG")
        .env_remove("CONTOSO_DB_LOG_LEVEL");
    cmd
}

fn write_secret(dir: &TempDir, name: &str, content: &str) {
    let secrets = dir.path().join("secrets-store");
    fs::create_dir_all(&secrets).unwrap();
    fs::write(secrets.join(name), content).unwrap();
}

#[test]
fn test_help_command() {
    let dir = TempDir::new().unwrap();
    contoso_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Inspect database connection configuration"))
        .stdout(predicate::str::contains("Usage: contoso-db <COMMAND>"))
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("parse"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_version_command() {
    let dir = TempDir::new().unwrap();
    contoso_cmd(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("Version"))
        .stdout(predicate::str::contains("0.2.0"))
        .stdout(predicate::str::contains("MSSQL_CONNECTION_STRING"));
}

#[test]
fn test_resolve_from_env() {
    let dir = TempDir::new().unwrap();
    contoso_cmd(&dir)
        .env("POSTGRES_CONNECTION_STRING", "host=db;password=hunter2")
        .args(["resolve", "--app-root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("POSTGRES_CONNECTION_STRING"))
        .stdout(predicate::str::contains("environment"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_resolve_from_secret_store() {
    let dir = TempDir::new().unwrap();
    write_secret(&dir, "MSSQL_CONNECTION_STRING", "Server=sql;Pwd=hunter2\n");

    contoso_cmd(&dir)
        .env("POSTGRES_CONNECTION_STRING", "host=db")
        .args(["resolve", "--show-secret", "--app-root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("MSSQL_CONNECTION_STRING"))
        .stdout(predicate::str::contains("secret store"))
        .stdout(predicate::str::contains("Server=sql;Pwd=hunter2"));
}

#[test]
fn test_resolve_named_source() {
    let dir = TempDir::new().unwrap();
    contoso_cmd(&dir)
        .env("POSTGRES_CONNECTION_STRING", "host=db")
        .args(["resolve", "--source", " postgres_connection_string ", "--app-root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("postgres"));
}

#[test]
fn test_resolve_invalid_source() {
    let dir = TempDir::new().unwrap();
    contoso_cmd(&dir)
        .args(["resolve", "--source", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration source `BOGUS`"));
}

#[test]
fn test_resolve_nothing_configured() {
    let dir = TempDir::new().unwrap();
    contoso_cmd(&dir)
        .args(["resolve", "--app-root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no connection string configured"));
}

#[test]
fn test_resolve_reject_ambiguous() {
    let dir = TempDir::new().unwrap();
    contoso_cmd(&dir)
        .env("MSSQL_CONNECTION_STRING", "Server=sql")
        .env("POSTGRES_CONNECTION_STRING", "host=db")
        .args(["resolve", "--reject-ambiguous", "--app-root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("ambiguous configuration"));
}

#[test]
fn test_settings_file_is_discovered() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("contoso-db.toml"), "ambiguity = \"reject\"\n").unwrap();

    contoso_cmd(&dir)
        .env("MSSQL_CONNECTION_STRING", "Server=sql")
        .env("POSTGRES_CONNECTION_STRING", "host=db")
        .args(["resolve", "--app-root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("ambiguous configuration"));
}

#[test]
fn test_parse_with_patterns() {
    let dir = TempDir::new().unwrap();
    contoso_cmd(&dir)
        .args([
            "parse",
            "host=x;port=abc;extra=1",
            "--allow",
            "host",
            "--pattern",
            r"port=^\d+$",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"host\": \"x\""))
        .stdout(predicate::str::contains("port").not())
        .stdout(predicate::str::contains("extra").not());
}

#[test]
fn test_parse_backend_masks_secrets() {
    let dir = TempDir::new().unwrap();
    contoso_cmd(&dir)
        .args(["parse", "Server=sql;Uid=sa;Pwd=hunter2", "--backend", "mssql", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"uid\": \"sa\""))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_parse_first_equals() {
    let dir = TempDir::new().unwrap();
    contoso_cmd(&dir)
        .args(["parse", "token=a=b", "--allow", "token", "--first-equals", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"token\": \"a=b\""));
}

#[test]
fn test_parse_requires_allow_list() {
    let dir = TempDir::new().unwrap();
    contoso_cmd(&dir)
        .args(["parse", "host=x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no allow-list given"));
}

#[test]
fn test_parse_invalid_pattern() {
    let dir = TempDir::new().unwrap();
    contoso_cmd(&dir)
        .args(["parse", "port=1", "--pattern", "port=("])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid allow-list"));
}

#[test]
fn test_check_json() {
    let dir = TempDir::new().unwrap();
    write_secret(
        &dir,
        "POSTGRES_CONNECTION_STRING",
        "host=db;port=5432;dbname=hotel;password=hunter2;sslmode=nope",
    );

    contoso_cmd(&dir)
        .args(["check", "--json", "--app-root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"backend\": \"postgres\""))
        .stdout(predicate::str::contains("\"dbname\": \"hotel\""))
        .stdout(predicate::str::contains("sslmode").not())
        .stdout(predicate::str::contains("hunter2").not());
}

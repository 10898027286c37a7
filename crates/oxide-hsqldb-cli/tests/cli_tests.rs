//! CLI integration tests for oxide-hsqldb.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("oxide-hsqldb").unwrap();
    cmd.env_remove("HSQLDB_DRIVER");
    cmd
}

const SCRIPT: &str = "SET DATABASE DEFAULT RESULT MEMORY ROWS 0
CREATE USER SA PASSWORD DIGEST 'd41d8cd98f00b204e9800998ecf8427e'
CREATE SCHEMA PUBLIC AUTHORIZATION DBA
CREATE MEMORY TABLE PUBLIC.USERS(ID INTEGER GENERATED BY DEFAULT AS IDENTITY(START WITH 0) NOT NULL PRIMARY KEY,NAME VARCHAR(255))
CREATE MEMORY TABLE PUBLIC.SYSTEM_NOTES(ID INTEGER)
GRANT DBA TO SA
";

fn script_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SCRIPT.as_bytes()).unwrap();
    file
}

#[test]
fn test_help_shows_all_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("types"))
        .stdout(predicate::str::contains("paginate"))
        .stdout(predicate::str::contains("ddl"))
        .stdout(predicate::str::contains("dump"))
        .stdout(predicate::str::contains("load"));
}

#[test]
fn test_types_prints_catalog() {
    cmd()
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"varchar_ignorecase\""))
        .stdout(predicate::str::contains(
            "integer GENERATED BY DEFAULT AS IDENTITY(START WITH 0) PRIMARY KEY",
        ));
}

#[test]
fn test_type_sql_per_driver() {
    cmd()
        .args(["type-sql", "integer", "--limit", "11"])
        .assert()
        .success()
        .stdout("integer\n");

    cmd()
        .args(["--driver", "h2", "type-sql", "integer", "--limit", "11"])
        .assert()
        .success()
        .stdout("integer(11)\n");
}

#[test]
fn test_type_sql_unknown_type_fails() {
    cmd().args(["type-sql", "geometry"]).assert().failure();
}

#[test]
fn test_column_inference() {
    cmd()
        .args(["column", "TINYINT(1)", "--limit", "255"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sql_type\": \"tinyint\""))
        .stdout(predicate::str::contains("\"limit\": 1"))
        .stdout(predicate::str::contains("\"type\": \"integer\""));
}

#[test]
fn test_paginate() {
    cmd()
        .args(["paginate", "SELECT * FROM t", "--limit", "10", "--offset", "5"])
        .assert()
        .success()
        .stdout("SELECT LIMIT 5 10 * FROM t\n");
}

#[test]
fn test_ddl_add_column() {
    cmd()
        .args([
            "ddl",
            "add-column",
            "users",
            "nick",
            "string",
            "--limit",
            "40",
            "--default",
            "O'Brien",
            "--not-null",
        ])
        .assert()
        .success()
        .stdout("ALTER TABLE users ADD nick varchar(40) DEFAULT 'O''Brien' NOT NULL;\n");
}

#[test]
fn test_ddl_remove_index_by_columns() {
    cmd()
        .args(["ddl", "remove-index", "people", "--column", "last", "--column", "first"])
        .assert()
        .success()
        .stdout("DROP INDEX index_people_on_last_and_first;\n");
}

#[test]
fn test_tables_hide_system_tables() {
    let file = script_file();
    cmd()
        .arg("tables")
        .arg(file.path())
        .assert()
        .success()
        .stdout("USERS\n");
}

#[test]
fn test_dump_and_load() {
    let file = script_file();
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("structure.sql");

    cmd()
        .arg("dump")
        .arg(file.path())
        .arg("--output")
        .arg(&dump)
        .assert()
        .success();

    let written = std::fs::read_to_string(&dump).unwrap();
    assert!(!written.contains("DIGEST"));
    assert!(!written.contains("GRANT DBA TO SA"));
    assert!(written.contains("\n\nCREATE MEMORY TABLE PUBLIC.USERS"));

    cmd()
        .arg("load")
        .arg(&dump)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("SET DATABASE DEFAULT RESULT MEMORY ROWS 0;\n"))
        .stdout(predicate::str::contains("CREATE MEMORY TABLE PUBLIC.SYSTEM_NOTES(ID INTEGER)\n;"));
}

#[test]
fn test_dump_missing_file_fails() {
    cmd()
        .args(["dump", "/nonexistent/db.script"])
        .assert()
        .failure();
}

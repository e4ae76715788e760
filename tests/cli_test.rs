//! End-to-end tests for the `dbconf` binary.
//!
//! Each run gets a cleared environment and a fresh working directory, so
//! neither the developer's shell nor a stray `.env` can leak in.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn dbconf_cmd(cwd: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dbconf");
    cmd.env_clear().current_dir(cwd.path());
    cmd
}

#[test]
fn prints_public_fields_in_order() {
    let dir = TempDir::new().unwrap();

    dbconf_cmd(&dir)
        .env("db_user", "alice")
        .env("db_password", "secret")
        .env("db_host", "localhost")
        .env("db_port", "5432")
        .env("db_name", "app")
        .assert()
        .success()
        .stdout("alice localhost 5432 app\n")
        .stderr(predicate::str::contains("secret").not());
}

#[test]
fn missing_password_fails_on_stderr() {
    let dir = TempDir::new().unwrap();

    dbconf_cmd(&dir)
        .env("db_user", "alice")
        .env("db_host", "localhost")
        .env("db_port", "5432")
        .env("db_name", "app")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("db_password"))
        .stderr(predicate::str::contains("db_user").not());
}

#[test]
fn nothing_set_names_every_key() {
    let dir = TempDir::new().unwrap();

    dbconf_cmd(&dir)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::contains("db_user")
                .and(predicate::str::contains("db_password"))
                .and(predicate::str::contains("db_host"))
                .and(predicate::str::contains("db_port"))
                .and(predicate::str::contains("db_name")),
        );
}

#[test]
fn reads_env_file_from_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".env"),
        "db_user=bob\ndb_password=hunter2\ndb_host=db.internal\ndb_port=6432\ndb_name=prod\n",
    )
    .unwrap();

    dbconf_cmd(&dir)
        .env("db_host", "override.internal")
        .assert()
        .success()
        .stdout("bob override.internal 6432 prod\n")
        .stderr(predicate::str::contains("hunter2").not());
}

#[test]
fn env_file_values_with_dollar_signs_are_printed_verbatim() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".env"),
        "db_user=svc$ops\ndb_password=pa$word\ndb_host=localhost\ndb_port=5432\ndb_name=\"app$1\"\n",
    )
    .unwrap();

    dbconf_cmd(&dir)
        .assert()
        .success()
        .stdout("svc$ops localhost 5432 app$1\n")
        .stderr(predicate::str::contains("pa$word").not());
}

#[test]
fn password_never_printed_even_with_debug_logging() {
    let dir = TempDir::new().unwrap();

    dbconf_cmd(&dir)
        .env("RUST_LOG", "trace")
        .env("db_user", "alice")
        .env("db_password", "s3cr3t-value")
        .env("db_host", "localhost")
        .env("db_port", "5432")
        .env("db_name", "app")
        .assert()
        .success()
        .stdout(predicate::str::contains("s3cr3t-value").not())
        .stderr(predicate::str::contains("s3cr3t-value").not());
}

#[test]
fn malformed_env_file_does_not_echo_contents() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "db_password=ok\nhunter2 oops\n").unwrap();

    dbconf_cmd(&dir)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("malformed"))
        .stderr(predicate::str::contains("hunter2").not());
}

//! Command-line behaviour that is decided before any request is made.

use assert_cmd::Command;
use predicates::prelude::*;

fn pokeview() -> Command {
    let mut cmd = Command::cargo_bin("pokeview").unwrap();
    // Closed port; nothing here should reach PokeAPI.
    cmd.env("POKEVIEW_API_URL", "http://127.0.0.1:9")
        .env("POKEVIEW_ARTWORK_URL", "http://127.0.0.1:9")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_flags() {
    pokeview()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dex"))
        .stdout(predicate::str::contains("--id"))
        .stdout(predicate::str::contains("--size"));
}

#[test]
fn zero_size_is_rejected() {
    pokeview()
        .args(["--id=001", "--size=0"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("size must be a positive integer"));
}

#[test]
fn negative_size_is_rejected() {
    pokeview()
        .args(["--size", "-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("size must be a positive integer"));
}

#[test]
fn oversized_size_is_rejected() {
    pokeview()
        .args(["--id=001", "--size=100000"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("size must be at most 1000"));
}

#[test]
fn non_numeric_id_is_rejected() {
    pokeview()
        .arg("--id=pikachu")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("is not a valid pokemon ID"));
}

#[test]
fn negative_id_is_rejected() {
    pokeview()
        .arg("--id=-25")
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a valid pokemon ID"));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    pokeview().arg("--shiny").assert().code(2);
}

#[test]
fn unreachable_pokedex_fails() {
    pokeview()
        .args(["--dex", "--id=001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error resolving pokemon"));
}

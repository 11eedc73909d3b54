//! Integration tests for the `recur` CLI binary.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

const DTSTART: &str = "19970902T090000Z";

#[test]
fn expand_yearly_count_3() {
    Command::cargo_bin("recur")
        .unwrap()
        .args(["expand", "--dtstart", DTSTART, "--rrule", "FREQ=YEARLY;COUNT=3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("19970902T090000Z"))
        .stdout(predicate::str::contains("19980902T090000Z"))
        .stdout(predicate::str::contains("19990902T090000Z"));
}

#[test]
fn expand_s4_positional_byday() {
    Command::cargo_bin("recur")
        .unwrap()
        .args(["expand", "--dtstart", DTSTART, "--rrule", "FREQ=YEARLY;COUNT=3;BYDAY=1TU,-1TH"])
        .assert()
        .success()
        .stdout(predicate::str::contains("19971225T090000Z"))
        .stdout(predicate::str::contains("19980106T090000Z"))
        .stdout(predicate::str::contains("19981231T090000Z"));
}

#[test]
fn expand_invalid_rrule_fails() {
    Command::cargo_bin("recur")
        .unwrap()
        .args(["expand", "--dtstart", DTSTART, "--rrule", "FREQ=BOGUS"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("Error")));
}

#[test]
fn expand_invalid_dtstart_fails() {
    Command::cargo_bin("recur")
        .unwrap()
        .args(["expand", "--dtstart", "not-a-date", "--rrule", "FREQ=DAILY;COUNT=1"])
        .assert()
        .failure();
}

#[test]
fn after_finds_next_occurrence() {
    Command::cargo_bin("recur")
        .unwrap()
        .args([
            "after",
            "--dtstart",
            DTSTART,
            "--rrule",
            "FREQ=YEARLY;COUNT=5",
            "--at",
            "19980101T000000Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("19980902T090000Z"));
}

#[test]
fn before_finds_prior_occurrence() {
    Command::cargo_bin("recur")
        .unwrap()
        .args([
            "before",
            "--dtstart",
            DTSTART,
            "--rrule",
            "FREQ=YEARLY;COUNT=5",
            "--at",
            "19980101T000000Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("19970902T090000Z"));
}

#[test]
fn between_lists_window_matches() {
    Command::cargo_bin("recur")
        .unwrap()
        .args([
            "between",
            "--dtstart",
            DTSTART,
            "--rrule",
            "FREQ=YEARLY;COUNT=5",
            "--from",
            "19980101T000000Z",
            "--to",
            "20000101T000000Z",
            "--inclusive",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("19980902T090000Z"))
        .stdout(predicate::str::contains("19990902T090000Z"))
        .stdout(predicate::str::not(predicate::str::contains("19970902T090000Z")));
}

#[test]
fn help_flag_shows_usage() {
    Command::cargo_bin("recur")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("expand"))
        .stdout(predicate::str::contains("after"))
        .stdout(predicate::str::contains("between"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("recur")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("unrecognized")));
}

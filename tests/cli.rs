#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Integration tests for the `maker` binary's argument handling.

use std::process::{Command, Output};

fn maker(args: &[&str]) -> Output {
    let cache = tempfile::tempdir().expect("create temp dir");
    Command::new(env!("CARGO_BIN_EXE_maker"))
        .args(args)
        .env("XDG_CACHE_HOME", cache.path())
        .output()
        .expect("run maker")
}

#[test]
fn no_arguments_prints_usage_and_exits_zero() {
    let out = maker(&[]);
    assert_eq!(out.status.code(), Some(0));
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
    assert!(text.contains("Usage: maker"), "output: {text}");
}

#[test]
fn help_exits_zero() {
    assert_eq!(maker(&["-h"]).status.code(), Some(0));
}

#[test]
fn version_exits_zero() {
    assert_eq!(maker(&["--version"]).status.code(), Some(0));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    assert_eq!(maker(&["--bogus", "a.c"]).status.code(), Some(2));
}

#[test]
fn missing_input_is_skipped_with_success() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let missing = dir.path().join("missing.c");
    let out = maker(&[missing.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(0));
}

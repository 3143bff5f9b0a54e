#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
//! Integration tests for the init command.
//!
//! A starter `.maker` written by `--maker` must drive a build directly.

mod common;

use common::{RecordingExecutor, TestProjectBuilder};
use maker_cli::commands::init::write_starter;
use maker_cli::flags::Flags;

#[test]
fn starter_config_drives_a_build() {
    let project = TestProjectBuilder::new()
        .with_source("main.c")
        .with_source("main.rs")
        .with_source("main.zig")
        .build();
    write_starter(project.path(), false).unwrap();
    let exec = RecordingExecutor::default();

    let files = [
        project.file("main.c"),
        project.file("main.rs"),
        project.file("main.zig"),
    ];
    let (summary, _log) = project.compile(&files, &Flags::default(), &exec);

    assert_eq!(summary.exit_code(), 0);
    let programs: Vec<String> = exec
        .commands()
        .iter()
        .map(|c| c.split(' ').next().unwrap().to_string())
        .collect();
    assert_eq!(programs, vec!["gcc", "rustc", "zig"]);
}

#[test]
fn starter_release_profile_is_selectable() {
    let project = TestProjectBuilder::new().with_source("main.cpp").build();
    write_starter(project.path(), false).unwrap();
    let exec = RecordingExecutor::default();
    let flags = Flags {
        profile: "release".to_string(),
        ..Flags::default()
    };

    let (summary, _log) = project.compile(&[project.file("main.cpp")], &flags, &exec);

    assert!(summary.is_success());
    assert!(exec.commands()[0].starts_with("g++ -O2 "));
}

#[test]
fn existing_maker_is_preserved() {
    let project = TestProjectBuilder::new()
        .with_maker(".", "extension .c\nformat tcc %file%\npush\n")
        .build();
    assert!(write_starter(project.path(), false).is_err());
    let content = std::fs::read_to_string(project.file(".maker")).unwrap();
    assert!(content.contains("tcc"));
}

// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed project with a fluent builder and a
// recording executor, so each integration test can lay out `.maker` files
// and sources without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use maker_cli::commands::build;
use maker_cli::dispatch::DispatchSummary;
use maker_cli::exec::{Executor, RunStatus};
use maker_cli::flags::Flags;
use maker_cli::logging::Logger;
use maker_cli::platform::{Os, Platform};

/// A `.maker` covering C, Rust and an interpreter line without `%file%`.
pub const MAKER: &str = "\
extension .c
format gcc %file% -o %output%
config release
format gcc -O2 %file% -o %output%
push
extension .rs
format rustc %file% -o %output%
push
extension .sh
format sh build.sh
push
";

/// An isolated project directory backed by a [`tempfile::TempDir`].
pub struct TestProject {
    /// Temporary directory containing the project.
    pub root: tempfile::TempDir,
}

impl TestProject {
    /// Path to the project root.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Absolute path of `rel` inside the project, whether or not it exists.
    pub fn file(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    /// Location used as the user-level fallback `.maker`.
    pub fn user_config(&self) -> PathBuf {
        self.root.path().join("home/.config/maker/.maker")
    }

    /// Compile `files` on a Unix platform through `executor`.
    pub fn compile(
        &self,
        files: &[PathBuf],
        flags: &Flags,
        executor: &dyn Executor,
    ) -> (DispatchSummary, Logger) {
        let log = Logger::with_log_file(None);
        let summary = build::compile(
            files,
            flags,
            Platform::new(Os::Unix),
            Some(self.user_config()),
            executor,
            &log,
        );
        (summary, log)
    }
}

/// Fluent builder for [`TestProject`].
pub struct TestProjectBuilder {
    project: TestProject,
}

impl TestProjectBuilder {
    /// Begin building an empty project.
    pub fn new() -> Self {
        Self {
            project: TestProject {
                root: tempfile::tempdir().expect("create temp dir"),
            },
        }
    }

    /// Write `content` to `<dir>/.maker`.
    pub fn with_maker(self, dir: &str, content: &str) -> Self {
        self.write(&format!("{dir}/.maker"), content)
    }

    /// Write `content` to the user-level fallback `.maker`.
    pub fn with_user_config(self, content: &str) -> Self {
        let path = self.project.user_config();
        write_file(&path, content);
        self
    }

    /// Create an empty source file at `rel`.
    pub fn with_source(self, rel: &str) -> Self {
        self.write(rel, "")
    }

    fn write(self, rel: &str, content: &str) -> Self {
        write_file(&self.project.file(rel), content);
        self
    }

    /// Finish building and return the project.
    pub fn build(self) -> TestProject {
        self.project
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write file");
}

/// Executor that records every command line instead of running it.
///
/// Commands containing a registered needle report the associated exit code;
/// everything else succeeds.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    commands: RefCell<Vec<String>>,
    failures: Vec<(String, i32)>,
}

impl RecordingExecutor {
    /// Make commands containing `needle` exit with `code`.
    pub fn failing_on(mut self, needle: &str, code: i32) -> Self {
        self.failures.push((needle.to_string(), code));
        self
    }

    /// All command lines received so far, in order.
    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }
}

impl Executor for RecordingExecutor {
    fn run(&self, command_line: &str) -> anyhow::Result<RunStatus> {
        self.commands.borrow_mut().push(command_line.to_string());
        let status = self
            .failures
            .iter()
            .find(|(needle, _)| command_line.contains(needle.as_str()))
            .map_or_else(RunStatus::ok, |(_, code)| RunStatus::failed(*code));
        Ok(status)
    }
}

//! Process-wide invocation settings, built once from the command line.
use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::DEFAULT_PROFILE;

/// Default output directory, relative to each input file's directory.
pub const DEFAULT_OUTPUT_DIR: &str = "bin";

/// Whether a recoverable error skips the current item or aborts the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakPolicy {
    /// Report the error and move on.
    #[default]
    Continue,
    /// Report the error and stop.
    Break,
}

impl BreakPolicy {
    /// Return `true` when errors should abort.
    #[must_use]
    pub const fn is_break(self) -> bool {
        matches!(self, Self::Break)
    }
}

impl From<bool> for BreakPolicy {
    fn from(break_on_failure: bool) -> Self {
        if break_on_failure {
            Self::Break
        } else {
            Self::Continue
        }
    }
}

/// Read-only invocation configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flags {
    /// Output directory; relative paths are resolved against each input
    /// file's parent directory.
    pub output_dir: PathBuf,
    /// Profile used to select a template for each file.
    pub profile: String,
    /// Break-on-failure policy applied to every skip-vs-abort decision.
    pub policy: BreakPolicy,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            profile: DEFAULT_PROFILE.to_string(),
            policy: BreakPolicy::Continue,
        }
    }
}

impl Flags {
    /// Build the flags from parsed command-line arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            output_dir: cli.output.clone(),
            profile: cli
                .profile
                .clone()
                .unwrap_or_else(|| DEFAULT_PROFILE.to_string()),
            policy: BreakPolicy::from(cli.break_on_failure),
        }
    }
}

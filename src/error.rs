//! Domain-specific error types for the maker engine.
//!
//! Each stage of compiling one file returns its own [`thiserror`] type, and
//! [`DispatchError`] is the per-file error the dispatcher records. Command
//! handlers at the CLI boundary (`commands::init`) use [`anyhow::Error`].
//!
//! # Error hierarchy
//!
//! ```text
//! DispatchError
//! ├── Resolve(ResolveError)   : missing input, missing config, I/O
//! │   └── Parse { ParseError }: unrecognised `.maker` directive
//! ├── Expand(ExpandError)     : template without `%file%`
//! └── UnsupportedExtension, ProfileNotFound, OutputDir, ChildProcessFailed
//! ```

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Exit code used when a configuration could not be resolved.
pub const EXIT_CONFIG: i32 = 2;

/// Exit code used when a template could not be selected or expanded.
pub const EXIT_TEMPLATE: i32 = 3;

/// Classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The first token of the line is not a known directive.
    InvalidDirective,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDirective => write!(f, "invalid directive"),
        }
    }
}

/// An invalid line in a `.maker` file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at line {line}: {text}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// 1-based line number.
    pub line: usize,
    /// The offending line with leading whitespace removed.
    pub text: String,
}

/// Errors that arise while locating and loading the `.maker` for a file.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The input file does not exist or is not a regular file.
    #[error("input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Neither a directory-local nor a user-level `.maker` exists.
    #[error("no .maker found for {} (searched: {})", .file.display(), display_paths(.searched))]
    NoConfigFound {
        /// The input file whose configuration was requested.
        file: PathBuf,
        /// Every candidate path that was checked, in order.
        searched: Vec<PathBuf>,
    },

    /// The `.maker` file contains an invalid line and parsing was aborted.
    #[error("{}: {source}", .path.display())]
    Parse {
        /// Path of the `.maker` file.
        path: PathBuf,
        /// The first invalid line.
        source: ParseError,
    },

    /// An I/O error occurred while reading a `.maker` file.
    #[error("IO error reading config file {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from template expansion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    /// The template lacks the mandatory `%file%` placeholder.
    #[error("template is missing the %file% specifier: '{0}'")]
    MissingFileSpecifier(String),
}

/// Errors that arise while compiling one input file.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Configuration resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// No language config matches the file's extension.
    #[error("extension not covered for {}", .file.display())]
    UnsupportedExtension {
        /// The input file.
        file: PathBuf,
    },

    /// The requested profile is not defined for the matched extension.
    #[error("profile '{profile}' not defined for '{extension}' (available: {available})")]
    ProfileNotFound {
        /// The matched extension key.
        extension: String,
        /// The requested profile name.
        profile: String,
        /// Comma-separated list of the profiles that are defined.
        available: String,
    },

    /// The selected template could not be expanded.
    #[error(transparent)]
    Expand(#[from] ExpandError),

    /// The output directory could not be created.
    #[error("cannot create output directory {}: {source}", .path.display())]
    OutputDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The external command exited unsuccessfully or could not be started.
    #[error("command for {} failed ({}): {command}", .file.display(), describe_code(.code))]
    ChildProcessFailed {
        /// The input file being compiled.
        file: PathBuf,
        /// The expanded command line.
        command: String,
        /// Exit code, if the process produced one.
        code: Option<i32>,
    },
}

impl DispatchError {
    /// Return `true` if this error must skip the file even when
    /// break-on-failure is set.
    #[must_use]
    pub const fn is_always_skipped(&self) -> bool {
        matches!(self, Self::Resolve(ResolveError::FileNotFound(_)))
    }

    /// Return `true` if this error counts as a failed file rather than a
    /// skipped one.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Expand(_) | Self::ChildProcessFailed { .. })
    }

    /// Process exit code to use when this error aborts the run.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Resolve(_) => EXIT_CONFIG,
            Self::UnsupportedExtension { .. }
            | Self::ProfileNotFound { .. }
            | Self::Expand(_)
            | Self::OutputDir { .. } => EXIT_TEMPLATE,
            Self::ChildProcessFailed { code, .. } => code.filter(|c| *c != 0).unwrap_or(1),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[allow(clippy::ref_option)]
fn describe_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "no exit code".to_string(), |c| format!("exit {c}"))
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    // -----------------------------------------------------------------------
    // ParseError
    // -----------------------------------------------------------------------

    #[test]
    fn parse_error_display() {
        let e = ParseError {
            kind: ParseErrorKind::InvalidDirective,
            line: 4,
            text: "compile gcc".to_string(),
        };
        assert_eq!(e.to_string(), "invalid directive at line 4: compile gcc");
    }

    // -----------------------------------------------------------------------
    // ResolveError
    // -----------------------------------------------------------------------

    #[test]
    fn resolve_error_file_not_found_display() {
        let e = ResolveError::FileNotFound(PathBuf::from("src/missing.c"));
        assert_eq!(e.to_string(), "input file not found: src/missing.c");
    }

    #[test]
    fn resolve_error_no_config_lists_searched_paths() {
        let e = ResolveError::NoConfigFound {
            file: PathBuf::from("a.c"),
            searched: vec![
                PathBuf::from("/work/.maker"),
                PathBuf::from("/home/u/.config/maker/.maker"),
            ],
        };
        let msg = e.to_string();
        assert!(msg.contains("/work/.maker"));
        assert!(msg.contains("/home/u/.config/maker/.maker"));
    }

    #[test]
    fn resolve_error_no_config_without_candidates() {
        let e = ResolveError::NoConfigFound {
            file: PathBuf::from("a.c"),
            searched: Vec::new(),
        };
        assert!(e.to_string().ends_with("(searched: nothing)"));
    }

    #[test]
    fn resolve_error_io_has_source() {
        use std::error::Error as StdError;
        let e = ResolveError::Io {
            path: PathBuf::from("/work/.maker"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("IO error reading config file"));
    }

    // -----------------------------------------------------------------------
    // DispatchError classification
    // -----------------------------------------------------------------------

    #[test]
    fn file_not_found_is_always_skipped() {
        let e = DispatchError::from(ResolveError::FileNotFound(PathBuf::from("x.c")));
        assert!(e.is_always_skipped());
        assert!(!e.is_failure());
    }

    #[test]
    fn missing_file_specifier_is_a_failure() {
        let e = DispatchError::from(ExpandError::MissingFileSpecifier("gcc".to_string()));
        assert!(e.is_failure());
        assert_eq!(e.exit_code(), EXIT_TEMPLATE);
    }

    #[test]
    fn resolution_errors_use_config_exit_code() {
        let e = DispatchError::from(ResolveError::NoConfigFound {
            file: PathBuf::from("a.c"),
            searched: Vec::new(),
        });
        assert_eq!(e.exit_code(), EXIT_CONFIG);
    }

    #[test]
    fn child_failure_propagates_exit_code() {
        let e = DispatchError::ChildProcessFailed {
            file: PathBuf::from("a.c"),
            command: "gcc a.c".to_string(),
            code: Some(42),
        };
        assert_eq!(e.exit_code(), 42);
        assert!(e.to_string().contains("exit 42"));
    }

    #[test]
    fn child_failure_without_code_exits_one() {
        let e = DispatchError::ChildProcessFailed {
            file: PathBuf::from("a.c"),
            command: "gcc a.c".to_string(),
            code: None,
        };
        assert_eq!(e.exit_code(), 1);
        assert!(e.to_string().contains("no exit code"));
    }

    #[test]
    fn profile_not_found_display() {
        let e = DispatchError::ProfileNotFound {
            extension: ".rs".to_string(),
            profile: "debug".to_string(),
            available: "release".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "profile 'debug' not defined for '.rs' (available: release)"
        );
    }

    // -----------------------------------------------------------------------
    // Wrapping into DispatchError
    // -----------------------------------------------------------------------

    #[test]
    fn parse_failure_reaches_dispatch_error_with_path_and_line() {
        let parse = ParseError {
            kind: ParseErrorKind::InvalidDirective,
            line: 3,
            text: "fromat gcc %file%".to_string(),
        };
        let e: DispatchError = ResolveError::Parse {
            path: PathBuf::from("proj/.maker"),
            source: parse,
        }
        .into();
        assert_eq!(
            e.to_string(),
            "proj/.maker: invalid directive at line 3: fromat gcc %file%"
        );
        assert_eq!(e.exit_code(), EXIT_CONFIG);
    }

    #[test]
    fn expand_failure_reaches_dispatch_error_unchanged() {
        let expand = ExpandError::MissingFileSpecifier("cc -o %output%".to_string());
        let e: DispatchError = expand.clone().into();
        assert_eq!(e.to_string(), expand.to_string());
        assert_eq!(e.exit_code(), EXIT_TEMPLATE);
    }

    // -----------------------------------------------------------------------
    // Send + Sync bounds
    // -----------------------------------------------------------------------

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<ParseError>();
        assert_send_sync::<ResolveError>();
        assert_send_sync::<ExpandError>();
        assert_send_sync::<DispatchError>();
    }

    #[test]
    fn dispatch_error_converts_to_anyhow() {
        let e = DispatchError::UnsupportedExtension {
            file: PathBuf::from("a.txt"),
        };
        let _anyhow_err: anyhow::Error = e.into();
    }
}

//! Structured logger with per-file summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::STAGE_TARGET;
use super::types::{FileEntry, FileStatus, Log};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with summary collection.
///
/// All messages are also written to a persistent log file at
/// `$XDG_CACHE_HOME/maker/<command>.log` (default `~/.cache/maker/<command>.log`)
/// by the file layer installed in [`init_subscriber`](super::init_subscriber).
#[derive(Debug)]
pub struct Logger {
    files: Mutex<Vec<FileEntry>>,
    log_file: Option<PathBuf>,
}

#[allow(clippy::unused_self)]
impl Logger {
    /// Create a new logger for `command`.
    ///
    /// Stores the log file path for display in the run summary; the file
    /// itself is created by the subscriber.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self::with_log_file(log_file_path(command))
    }

    /// Create a logger that reports `log_file` in its summary.
    #[must_use]
    pub const fn with_log_file(log_file: Option<PathBuf>) -> Self {
        Self {
            files: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded file entries.
    #[must_use]
    pub fn file_entries(&self) -> Vec<FileEntry> {
        self.files.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Record a file result for the summary.
    pub fn record_file(&self, name: &str, status: FileStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.files.lock() {
            guard.push(FileEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Count the recorded files with `status`.
    #[must_use]
    pub fn count(&self, status: FileStatus) -> usize {
        self.files.lock().map_or(0, |guard| {
            guard.iter().filter(|f| f.status == status).count()
        })
    }

    /// Print the summary of all recorded files.
    pub fn print_summary(&self) {
        let files = self.file_entries();
        if files.is_empty() {
            return;
        }

        self.stage("Summary");

        for file in &files {
            let (icon, color) = match file.status {
                FileStatus::Ok => ("✓", "\x1b[32m"),
                FileStatus::Skipped => ("○", "\x1b[33m"),
                FileStatus::Failed => ("✗", "\x1b[31m"),
            };

            let suffix = file
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", file.name));
        }

        let ok = self.count(FileStatus::Ok);
        let skipped = self.count(FileStatus::Skipped);
        let failed = self.count(FileStatus::Failed);
        self.info(&format!(
            "{} files: \x1b[32m{ok} ok\x1b[0m, \x1b[33m{skipped} skipped\x1b[0m, \x1b[31m{failed} failed\x1b[0m",
            files.len()
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error);

    fn record_file(&self, name: &str, status: FileStatus, message: Option<&str>) {
        self.record_file(name, status, message);
    }
}

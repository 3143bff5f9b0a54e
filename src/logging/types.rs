//! Core logging types: per-file entries, status, and the [`Log`] trait.

/// Per-file result for summary reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Input file as given on the command line.
    pub name: String,
    /// Final status of the file.
    pub status: FileStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Status of a processed input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// The command ran and exited successfully.
    Ok,
    /// The file was reported and skipped without running a command.
    Skipped,
    /// The command failed, or the file's template was unusable.
    Failed,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) is the production implementation;
/// dispatch code only depends on this trait so tests can substitute a
/// recording logger.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Record a file result for the summary.
    fn record_file(&self, name: &str, status: FileStatus, message: Option<&str>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_status_equality() {
        assert_eq!(FileStatus::Ok, FileStatus::Ok);
        assert_ne!(FileStatus::Ok, FileStatus::Failed);
        assert_ne!(FileStatus::Skipped, FileStatus::Failed);
    }

    #[test]
    fn file_entry_clone() {
        let entry = FileEntry {
            name: "main.c".to_string(),
            status: FileStatus::Skipped,
            message: Some("no .maker found".to_string()),
        };
        assert_eq!(entry.clone(), entry);
    }
}

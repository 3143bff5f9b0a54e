//! Helpers shared by the console and file writers.
use std::fs;
use std::path::PathBuf;

use crate::platform::Platform;

/// Remove terminal escape sequences so the log file stays plain text.
///
/// CSI sequences (`ESC [` up to a final byte in `@`..=`~`) are dropped
/// whole; any other escape drops only the character after `ESC`.
pub(super) fn strip_ansi(s: &str) -> String {
    #[derive(Clone, Copy)]
    enum Scan {
        Text,
        Escape,
        Csi,
    }

    let mut out = String::with_capacity(s.len());
    let mut state = Scan::Text;
    for c in s.chars() {
        state = match (state, c) {
            (Scan::Text, '\x1b') => Scan::Escape,
            (Scan::Text, _) => {
                out.push(c);
                Scan::Text
            }
            (Scan::Escape, '[') => Scan::Csi,
            (Scan::Escape, _) | (Scan::Csi, '@'..='~') => Scan::Text,
            (Scan::Csi, _) => Scan::Csi,
        };
    }
    out
}

/// Directory holding run logs: `$XDG_CACHE_HOME/maker`, else
/// `<home>/.cache/maker`. Created on demand.
pub(super) fn log_dir() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CACHE_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| Platform::detect().home_dir().map(|home| home.join(".cache")))?;
    let dir = base.join("maker");
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Log file for one `command` (`build` or `init`).
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    Some(log_dir()?.join(format!("{command}.log")))
}

/// Timestamp precision used in log output.
#[derive(Debug, Clone, Copy)]
pub(super) enum Stamp {
    /// `YYYY-MM-DD HH:MM:SS`, written once in the run header.
    Full,
    /// `HH:MM:SS`, prefixed to every line.
    Clock,
}

impl Stamp {
    /// Current UTC time at this precision.
    pub(super) fn now(self) -> String {
        let format = match self {
            Self::Full => "%Y-%m-%d %H:%M:%S",
            Self::Clock => "%H:%M:%S",
        };
        chrono::Utc::now().format(format).to_string()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn strip_ansi_removes_colours_from_summary_lines() {
        assert_eq!(strip_ansi("\x1b[32m✓ main.c\x1b[0m"), "✓ main.c");
        assert_eq!(
            strip_ansi("\x1b[1;34m==>\x1b[0m \x1b[1mCompiling 2 file(s)\x1b[0m"),
            "==> Compiling 2 file(s)"
        );
        assert_eq!(strip_ansi("gcc a.c -o bin/a"), "gcc a.c -o bin/a");
    }

    #[test]
    fn strip_ansi_drops_other_escapes() {
        assert_eq!(strip_ansi("\x1b[2Kdone"), "done");
        assert_eq!(strip_ansi("\x1b7saved"), "saved");
        assert_eq!(strip_ansi(""), "");
    }

    #[test]
    fn strip_ansi_tolerates_truncated_sequence() {
        assert_eq!(strip_ansi("ok\x1b[31"), "ok");
        assert_eq!(strip_ansi("ok\x1b"), "ok");
    }

    #[test]
    fn stamps_have_fixed_width() {
        let clock = Stamp::Clock.now();
        assert_eq!(clock.len(), 8);
        assert_eq!(clock.matches(':').count(), 2);

        let full = Stamp::Full.now();
        assert_eq!(full.len(), 19);
        assert_eq!(&full[10..11], " ");
        assert!(full.ends_with(&full[11..]));
    }
}

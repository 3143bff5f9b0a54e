//! Platform detection: executable suffix, command shell and user config
//! location.
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux, macOS and other Unix-like systems.
    Unix,
    /// Microsoft Windows.
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix => write!(f, "unix"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub const fn detect() -> Self {
        Self {
            os: if cfg!(target_os = "windows") {
                Os::Windows
            } else {
                Os::Unix
            },
        }
    }

    /// Create a platform with an explicit OS.
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Return `true` on Windows.
    #[must_use]
    pub const fn is_windows(self) -> bool {
        matches!(self.os, Os::Windows)
    }

    /// Suffix appended to compiled executables (`""` or `".exe"`).
    #[must_use]
    pub const fn exe_suffix(self) -> &'static str {
        match self.os {
            Os::Unix => "",
            Os::Windows => ".exe",
        }
    }

    /// Shell program and the flag that makes it run one command line.
    #[must_use]
    pub const fn shell(self) -> (&'static str, &'static str) {
        match self.os {
            Os::Unix => ("sh", "-c"),
            Os::Windows => ("cmd", "/C"),
        }
    }

    /// Resolve the user's home directory from the environment.
    ///
    /// Uses `HOME` on Unix; on Windows `USERPROFILE` is preferred with
    /// `HOME` as fallback. Empty values count as unset.
    #[must_use]
    pub fn home_dir(self) -> Option<PathBuf> {
        let lookup = |name: &str| std::env::var_os(name).filter(|v| !v.is_empty());
        let home = if self.is_windows() {
            lookup("USERPROFILE").or_else(|| lookup("HOME"))
        } else {
            lookup("HOME")
        };
        home.map(PathBuf::from)
    }

    /// Path of the user-level fallback `.maker` for the current user, if the
    /// home directory can be resolved.
    #[must_use]
    pub fn user_config_path(self) -> Option<PathBuf> {
        self.home_dir().map(|home| user_config_path_in(&home))
    }
}

/// Path of the user-level fallback `.maker` below `home`.
#[must_use]
pub fn user_config_path_in(home: &Path) -> PathBuf {
    home.join(".config").join("maker").join(CONFIG_FILE_NAME)
}

//! Locate, load and cache the `.maker` configuration for an input file.
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::parser::parse_str;
use super::{CONFIG_FILE_NAME, ResolvedConfigSet, validation};
use crate::error::ResolveError;
use crate::flags::BreakPolicy;
use crate::logging::Log;

/// Where a resolved configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `.maker` next to the input file.
    Local(PathBuf),
    /// The per-user fallback file.
    Fallback(PathBuf),
}

impl ConfigSource {
    /// Path of the `.maker` file.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Local(p) | Self::Fallback(p) => p,
        }
    }
}

/// Resolves the `.maker` configuration that applies to input files.
///
/// A directory-local `.maker` always wins; the user-level fallback is only
/// consulted when the file's directory has none, and the two are never
/// merged. Each `.maker` is parsed at most once per resolver.
#[derive(Debug)]
pub struct ConfigResolver {
    fallback: Option<PathBuf>,
    policy: BreakPolicy,
    cache: HashMap<PathBuf, Arc<ResolvedConfigSet>>,
}

impl ConfigResolver {
    /// Create a resolver.
    ///
    /// `fallback` is the user-level `.maker` path, or `None` when the home
    /// directory could not be determined. `policy` decides whether an
    /// invalid directive aborts parsing.
    #[must_use]
    pub fn new(fallback: Option<PathBuf>, policy: BreakPolicy) -> Self {
        Self {
            fallback,
            policy,
            cache: HashMap::new(),
        }
    }

    /// Number of distinct `.maker` files loaded so far.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Find the `.maker` that applies to `file` without reading it.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::FileNotFound`] if `file` is not an existing
    /// regular file, or [`ResolveError::NoConfigFound`] if neither the local
    /// nor the fallback `.maker` exists.
    pub fn locate(&self, file: &Path) -> Result<ConfigSource, ResolveError> {
        if !file.is_file() {
            return Err(ResolveError::FileNotFound(file.to_path_buf()));
        }
        // Symlinks are not followed: a linked source uses the `.maker` of the
        // directory it is linked into, the same directory that receives its
        // output.
        let absolute = std::path::absolute(file).map_err(|source| ResolveError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        let absolute = dunce::simplified(&absolute);
        let dir = absolute.parent().unwrap_or(absolute);
        let local = dir.join(CONFIG_FILE_NAME);
        if local.is_file() {
            return Ok(ConfigSource::Local(local));
        }

        let mut searched = vec![local];
        if let Some(fallback) = &self.fallback {
            if fallback.is_file() {
                return Ok(ConfigSource::Fallback(fallback.clone()));
            }
            searched.push(fallback.clone());
        }
        Err(ResolveError::NoConfigFound {
            file: file.to_path_buf(),
            searched,
        })
    }

    /// Resolve, load and cache the configuration for `file`.
    ///
    /// Skipped lines and validation warnings are reported through `log` the
    /// first time a `.maker` is loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its configuration cannot be found,
    /// the `.maker` cannot be read, or (under [`BreakPolicy::Break`]) it
    /// contains an invalid directive.
    pub fn resolve(
        &mut self,
        file: &Path,
        log: &dyn Log,
    ) -> Result<Arc<ResolvedConfigSet>, ResolveError> {
        let source = self.locate(file)?;
        let path = source.path();
        if let Some(config) = self.cache.get(path) {
            return Ok(Arc::clone(config));
        }

        let config = Arc::new(self.load(&source, log)?);
        self.cache.insert(path.to_path_buf(), Arc::clone(&config));
        Ok(config)
    }

    fn load(&self, source: &ConfigSource, log: &dyn Log) -> Result<ResolvedConfigSet, ResolveError> {
        let path = source.path();
        match source {
            ConfigSource::Local(_) => log.debug(&format!("using {}", path.display())),
            ConfigSource::Fallback(_) => {
                log.debug(&format!("no local .maker, using {}", path.display()));
            }
        }

        let content = std::fs::read_to_string(path).map_err(|source| ResolveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed = parse_str(&content, self.policy).map_err(|source| ResolveError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        for skipped in &parsed.skipped {
            log.warn(&format!("{}: {skipped} (ignored)", path.display()));
        }
        for warning in validation::validate(&parsed.config) {
            log.warn(&format!("{}: {warning}", path.display()));
        }
        log.debug(&format!(
            "{} extension(s) configured: {}",
            parsed.config.len(),
            parsed.config.extensions().join(" ")
        ));

        Ok(parsed.config)
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PROFILE;
    use crate::logging::{FileStatus, Log};
    use std::fs;
    use std::sync::Mutex;

    /// Collects warnings so tests can assert on them.
    #[derive(Debug, Default)]
    struct CapturingLog {
        warnings: Mutex<Vec<String>>,
    }

    impl CapturingLog {
        fn warnings(&self) -> Vec<String> {
            self.warnings.lock().unwrap().clone()
        }
    }

    impl Log for CapturingLog {
        fn stage(&self, _: &str) {}
        fn info(&self, _: &str) {}
        fn debug(&self, _: &str) {}
        fn warn(&self, msg: &str) {
            self.warnings.lock().unwrap().push(msg.to_string());
        }
        fn error(&self, _: &str) {}
        fn record_file(&self, _: &str, _: FileStatus, _: Option<&str>) {}
    }

    const C_CONFIG: &str = "extension .c\nformat gcc %file% -o %output%\npush\n";

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn missing_input_is_file_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let mut resolver = ConfigResolver::new(None, BreakPolicy::Continue);
        let err = resolver
            .resolve(&tmp.path().join("missing.c"), &CapturingLog::default())
            .unwrap_err();
        assert!(matches!(err, ResolveError::FileNotFound(_)));
    }

    #[test]
    fn directory_input_is_file_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let resolver = ConfigResolver::new(None, BreakPolicy::Continue);
        assert!(matches!(
            resolver.locate(tmp.path()),
            Err(ResolveError::FileNotFound(_))
        ));
    }

    #[test]
    fn local_config_is_used() {
        let tmp = tempfile::tempdir().unwrap();
        write(&tmp.path().join(".maker"), C_CONFIG);
        write(&tmp.path().join("main.c"), "");
        let mut resolver = ConfigResolver::new(None, BreakPolicy::Continue);
        let config = resolver
            .resolve(&tmp.path().join("main.c"), &CapturingLog::default())
            .unwrap();
        assert_eq!(
            config.get(".c").unwrap().template(DEFAULT_PROFILE),
            Some("gcc %file% -o %output% ")
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_source_uses_config_of_link_directory() {
        let tmp = tempfile::tempdir().unwrap();
        write(&tmp.path().join("store/.maker"), "extension .c\nformat clang %file%\npush\n");
        write(&tmp.path().join("store/main.c"), "");
        write(&tmp.path().join("proj/.maker"), "extension .c\nformat gcc %file%\npush\n");
        std::os::unix::fs::symlink(
            tmp.path().join("store/main.c"),
            tmp.path().join("proj/main.c"),
        )
        .unwrap();

        let mut resolver = ConfigResolver::new(None, BreakPolicy::Continue);
        let linked = tmp.path().join("proj/main.c");
        assert_eq!(
            resolver.locate(&linked).unwrap(),
            ConfigSource::Local(tmp.path().join("proj/.maker"))
        );
        let config = resolver.resolve(&linked, &CapturingLog::default()).unwrap();
        assert_eq!(
            config.get(".c").unwrap().template(DEFAULT_PROFILE),
            Some("gcc %file% ")
        );
    }

    #[test]
    fn relative_input_resolves_against_current_dir() {
        let resolver = ConfigResolver::new(None, BreakPolicy::Continue);
        // Cargo runs unit tests from the package root, which has a Cargo.toml
        // but no .maker.
        match resolver.locate(Path::new("Cargo.toml")) {
            Err(ResolveError::NoConfigFound { searched, .. }) => {
                assert!(searched[0].is_absolute());
                assert_eq!(
                    searched[0],
                    std::env::current_dir().unwrap().join(".maker")
                );
            }
            other => panic!("expected NoConfigFound, got {other:?}"),
        }
    }

    #[test]
    fn fallback_used_only_without_local_config() {
        let tmp = tempfile::tempdir().unwrap();
        let fallback = tmp.path().join("home/.config/maker/.maker");
        write(&fallback, "extension .rs\nformat rustc %file%\npush\n");
        write(&tmp.path().join("with/.maker"), C_CONFIG);
        write(&tmp.path().join("with/a.c"), "");
        write(&tmp.path().join("without/b.rs"), "");

        let resolver = ConfigResolver::new(Some(fallback.clone()), BreakPolicy::Continue);
        let local = resolver.locate(&tmp.path().join("with/a.c")).unwrap();
        assert!(matches!(local, ConfigSource::Local(_)));
        let remote = resolver.locate(&tmp.path().join("without/b.rs")).unwrap();
        assert_eq!(remote, ConfigSource::Fallback(fallback));
    }

    #[test]
    fn local_and_fallback_are_never_merged() {
        let tmp = tempfile::tempdir().unwrap();
        let fallback = tmp.path().join("home/.maker");
        write(&fallback, "extension .rs\nformat rustc %file%\npush\n");
        write(&tmp.path().join("src/.maker"), C_CONFIG);
        write(&tmp.path().join("src/a.c"), "");

        let mut resolver = ConfigResolver::new(Some(fallback), BreakPolicy::Continue);
        let config = resolver
            .resolve(&tmp.path().join("src/a.c"), &CapturingLog::default())
            .unwrap();
        assert_eq!(config.extensions(), vec![".c"]);
    }

    #[test]
    fn no_config_found_lists_candidates() {
        let tmp = tempfile::tempdir().unwrap();
        write(&tmp.path().join("a.c"), "");
        let fallback = tmp.path().join("home/.config/maker/.maker");
        let resolver = ConfigResolver::new(Some(fallback.clone()), BreakPolicy::Continue);
        let err = resolver.locate(&tmp.path().join("a.c")).unwrap_err();
        match err {
            ResolveError::NoConfigFound { searched, .. } => {
                assert_eq!(searched.len(), 2);
                assert!(searched[0].ends_with(".maker"));
                assert_eq!(searched[1], fallback);
            }
            other => panic!("expected NoConfigFound, got {other:?}"),
        }
    }

    #[test]
    fn no_config_found_without_home() {
        let tmp = tempfile::tempdir().unwrap();
        write(&tmp.path().join("a.c"), "");
        let resolver = ConfigResolver::new(None, BreakPolicy::Continue);
        let err = resolver.locate(&tmp.path().join("a.c")).unwrap_err();
        assert!(matches!(err, ResolveError::NoConfigFound { ref searched, .. } if searched.len() == 1));
    }

    #[test]
    fn same_directory_is_parsed_once() {
        let tmp = tempfile::tempdir().unwrap();
        write(&tmp.path().join(".maker"), C_CONFIG);
        write(&tmp.path().join("a.c"), "");
        write(&tmp.path().join("b.c"), "");
        write(&tmp.path().join("sub/.maker"), C_CONFIG);
        write(&tmp.path().join("sub/c.c"), "");

        let log = CapturingLog::default();
        let mut resolver = ConfigResolver::new(None, BreakPolicy::Continue);
        let first = resolver.resolve(&tmp.path().join("a.c"), &log).unwrap();
        let second = resolver.resolve(&tmp.path().join("b.c"), &log).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(resolver.cached(), 1);

        resolver.resolve(&tmp.path().join("sub/c.c"), &log).unwrap();
        assert_eq!(resolver.cached(), 2);
    }

    #[test]
    fn invalid_lines_are_warned_once_when_lenient() {
        let tmp = tempfile::tempdir().unwrap();
        write(&tmp.path().join(".maker"), "bogus line\nextension .c\nformat gcc %file%\npush\n");
        write(&tmp.path().join("a.c"), "");
        write(&tmp.path().join("b.c"), "");

        let log = CapturingLog::default();
        let mut resolver = ConfigResolver::new(None, BreakPolicy::Continue);
        resolver.resolve(&tmp.path().join("a.c"), &log).unwrap();
        resolver.resolve(&tmp.path().join("b.c"), &log).unwrap();
        let warnings = log.warnings();
        assert_eq!(warnings.len(), 1, "warnings: {warnings:?}");
        assert!(warnings[0].contains("line 1"));
    }

    #[test]
    fn invalid_lines_abort_when_breaking() {
        let tmp = tempfile::tempdir().unwrap();
        write(&tmp.path().join(".maker"), "extension .c\nbogus\n");
        write(&tmp.path().join("a.c"), "");

        let mut resolver = ConfigResolver::new(None, BreakPolicy::Break);
        let err = resolver
            .resolve(&tmp.path().join("a.c"), &CapturingLog::default())
            .unwrap_err();
        match err {
            ResolveError::Parse { source, .. } => assert_eq!(source.line, 2),
            other => panic!("expected Parse, got {other:?}"),
        }
        assert_eq!(resolver.cached(), 0);
    }

    #[test]
    fn validation_warnings_are_logged() {
        let tmp = tempfile::tempdir().unwrap();
        write(&tmp.path().join(".maker"), "extension .c\nformat gcc main.c\npush\n");
        write(&tmp.path().join("a.c"), "");

        let log = CapturingLog::default();
        let mut resolver = ConfigResolver::new(None, BreakPolicy::Continue);
        resolver.resolve(&tmp.path().join("a.c"), &log).unwrap();
        assert!(log.warnings().iter().any(|w| w.contains("%file%")));
    }
}

//! `.maker` configuration: data model, parser, resolver and validation.
//!
//! A `.maker` file maps file extensions to command templates, optionally
//! keyed by a profile name:
//!
//! ```text
//! extension .c .h
//! format gcc %file% -o %output%
//! config release
//! format gcc -O2 %file% -o %output%
//! push
//! ```
pub mod parser;
pub mod resolver;
pub mod validation;

use std::collections::HashMap;

/// Profile used when no `config` directive precedes a `format` line and
/// when no profile is requested on the command line.
pub const DEFAULT_PROFILE: &str = "__DEFAULT__";

/// File name of the configuration file.
pub const CONFIG_FILE_NAME: &str = ".maker";

/// Command templates for one file extension, keyed by profile.
///
/// # Examples
///
/// ```
/// use maker_cli::config::{DEFAULT_PROFILE, LanguageConfig};
/// use std::collections::HashMap;
///
/// let templates = HashMap::from([(
///     DEFAULT_PROFILE.to_string(),
///     "gcc %file% -o %output% ".to_string(),
/// )]);
/// let c = LanguageConfig::new(".c", templates);
/// assert_eq!(c.template(DEFAULT_PROFILE), Some("gcc %file% -o %output% "));
/// assert_eq!(c.template("release"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    extension: String,
    templates: HashMap<String, String>,
}

impl LanguageConfig {
    /// Create a config for `extension` from a profile → template map.
    #[must_use]
    pub fn new(extension: impl Into<String>, templates: HashMap<String, String>) -> Self {
        Self {
            extension: extension.into(),
            templates,
        }
    }

    /// The extension key, including the leading dot.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// The raw template for `profile`, if declared.
    #[must_use]
    pub fn template(&self, profile: &str) -> Option<&str> {
        self.templates.get(profile).map(String::as_str)
    }

    /// All declared profile names, sorted.
    #[must_use]
    pub fn profiles(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterate over `(profile, template)` pairs in arbitrary order.
    pub fn templates(&self) -> impl Iterator<Item = (&str, &str)> {
        self.templates
            .iter()
            .map(|(p, t)| (p.as_str(), t.as_str()))
    }
}

/// Extension → [`LanguageConfig`] mapping produced from one `.maker` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedConfigSet {
    languages: HashMap<String, LanguageConfig>,
}

impl ResolvedConfigSet {
    /// Store `config` under its extension, replacing any previous entry.
    pub fn insert(&mut self, config: LanguageConfig) {
        self.languages.insert(config.extension.clone(), config);
    }

    /// Remove the entry for `extension`, if any.
    pub fn remove(&mut self, extension: &str) -> Option<LanguageConfig> {
        self.languages.remove(extension)
    }

    /// Exact, case-sensitive lookup by extension key.
    #[must_use]
    pub fn get(&self, extension: &str) -> Option<&LanguageConfig> {
        self.languages.get(extension)
    }

    /// Find the config whose extension key is the longest suffix of
    /// `file_name`.
    ///
    /// A key equal to the whole file name does not match, so `.c` never
    /// selects a config for a file literally named `.c`.
    ///
    /// # Examples
    ///
    /// ```
    /// use maker_cli::config::parser::parse_str;
    /// use maker_cli::flags::BreakPolicy;
    ///
    /// let parsed = parse_str(
    ///     "extension .gz\nformat gunzip %file%\npush\nextension .tar.gz\nformat tar xzf %file%\npush\n",
    ///     BreakPolicy::Continue,
    /// )
    /// .unwrap();
    /// let hit = parsed.config.match_file_name("logs.tar.gz").unwrap();
    /// assert_eq!(hit.extension(), ".tar.gz");
    /// ```
    #[must_use]
    pub fn match_file_name(&self, file_name: &str) -> Option<&LanguageConfig> {
        self.languages
            .values()
            .filter(|c| {
                !c.extension.is_empty()
                    && file_name.len() > c.extension.len()
                    && file_name.ends_with(&c.extension)
            })
            .max_by_key(|c| c.extension.len())
    }

    /// All extension keys, sorted.
    #[must_use]
    pub fn extensions(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Iterate over the configs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &LanguageConfig> {
        self.languages.values()
    }

    /// Number of extensions configured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Return `true` if no extension is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(ext: &str, profiles: &[(&str, &str)]) -> LanguageConfig {
        LanguageConfig::new(
            ext,
            profiles
                .iter()
                .map(|(p, t)| ((*p).to_string(), (*t).to_string()))
                .collect(),
        )
    }

    #[test]
    fn profiles_are_sorted() {
        let c = config(".rs", &[("release", "a"), ("debug", "b"), (DEFAULT_PROFILE, "c")]);
        assert_eq!(c.profiles(), vec![DEFAULT_PROFILE, "debug", "release"]);
    }

    #[test]
    fn insert_overwrites_existing_extension() {
        let mut set = ResolvedConfigSet::default();
        set.insert(config(".c", &[(DEFAULT_PROFILE, "gcc %file%")]));
        set.insert(config(".c", &[(DEFAULT_PROFILE, "clang %file%")]));
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get(".c").unwrap().template(DEFAULT_PROFILE),
            Some("clang %file%")
        );
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let mut set = ResolvedConfigSet::default();
        set.insert(config(".c", &[(DEFAULT_PROFILE, "gcc %file%")]));
        assert!(set.get(".C").is_none());
        assert!(set.match_file_name("MAIN.C").is_none());
        assert!(set.match_file_name("main.c").is_some());
    }

    #[test]
    fn match_prefers_longest_extension() {
        let mut set = ResolvedConfigSet::default();
        set.insert(config(".c", &[(DEFAULT_PROFILE, "gcc %file%")]));
        set.insert(config(".cc", &[(DEFAULT_PROFILE, "g++ %file%")]));
        assert_eq!(set.match_file_name("x.cc").unwrap().extension(), ".cc");
        assert_eq!(set.match_file_name("x.c").unwrap().extension(), ".c");
    }

    #[test]
    fn match_ignores_bare_extension_file_name() {
        let mut set = ResolvedConfigSet::default();
        set.insert(config(".c", &[(DEFAULT_PROFILE, "gcc %file%")]));
        assert!(set.match_file_name(".c").is_none());
    }

    #[test]
    fn extensions_are_sorted() {
        let mut set = ResolvedConfigSet::default();
        set.insert(config(".rs", &[]));
        set.insert(config(".c", &[]));
        assert_eq!(set.extensions(), vec![".c", ".rs"]);
        assert!(!set.is_empty());
    }
}

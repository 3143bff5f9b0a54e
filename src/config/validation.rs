//! Configuration validation producing non-fatal warnings.
//!
//! Validation runs once when a `.maker` file is loaded. Problems found here
//! are logged but do not stop the run; a template without `%file%` still
//! fails hard when a file actually selects it.
use super::{DEFAULT_PROFILE, ResolvedConfigSet};
use crate::template::FILE_PLACEHOLDER;

/// A validation warning about a config entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Extension key the warning refers to.
    pub extension: String,
    /// Profile name, when the warning concerns one template.
    pub profile: Option<String>,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    fn new(extension: &str, profile: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            extension: extension.to_string(),
            profile: profile.map(String::from),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.profile {
            Some(p) => write!(f, "{} [{}]: {}", self.extension, display_profile(p), self.message),
            None => write!(f, "{}: {}", self.extension, self.message),
        }
    }
}

/// Human-readable name for a profile, hiding the default sentinel.
#[must_use]
pub fn display_profile(profile: &str) -> &str {
    if profile == DEFAULT_PROFILE {
        "default"
    } else {
        profile
    }
}

/// Validate a parsed config and return all warnings, sorted by extension
/// then profile.
#[must_use]
pub fn validate(config: &ResolvedConfigSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for language in config.iter() {
        let ext = language.extension();
        if !ext.starts_with('.') {
            warnings.push(ValidationWarning::new(
                ext,
                None,
                "extension should start with '.'",
            ));
        }
        if language.profiles().is_empty() {
            warnings.push(ValidationWarning::new(
                ext,
                None,
                "no format line before push; every file with this extension will be skipped",
            ));
        }
        for (profile, template) in language.templates() {
            if !template.contains(FILE_PLACEHOLDER) {
                warnings.push(ValidationWarning::new(
                    ext,
                    Some(profile),
                    format!("template has no {FILE_PLACEHOLDER} placeholder"),
                ));
            }
        }
    }

    warnings.sort_by(|a, b| {
        a.extension
            .cmp(&b.extension)
            .then_with(|| a.profile.cmp(&b.profile))
    });
    warnings
}

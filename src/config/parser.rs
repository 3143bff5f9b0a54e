//! Line-oriented parser for the `.maker` grammar.
use std::collections::HashMap;

use super::{DEFAULT_PROFILE, LanguageConfig, ResolvedConfigSet};
use crate::error::{ParseError, ParseErrorKind};
use crate::flags::BreakPolicy;

/// Result of parsing a `.maker` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfig {
    /// The extension → template mapping.
    pub config: ResolvedConfigSet,
    /// Invalid lines that were skipped under [`BreakPolicy::Continue`].
    pub skipped: Vec<ParseError>,
}

/// Directives accumulated between two `push` lines.
#[derive(Debug)]
struct PendingSection {
    extensions: Vec<String>,
    templates: HashMap<String, String>,
    profile: String,
}

impl Default for PendingSection {
    fn default() -> Self {
        Self {
            extensions: Vec::new(),
            templates: HashMap::new(),
            profile: DEFAULT_PROFILE.to_string(),
        }
    }
}

impl PendingSection {
    /// Store a `LanguageConfig` for every pending extension and reset.
    fn push_into(&mut self, result: &mut ResolvedConfigSet) {
        let section = std::mem::take(self);
        for extension in section.extensions {
            result.insert(LanguageConfig::new(extension, section.templates.clone()));
        }
    }
}

/// Parse `.maker` content.
///
/// Lines are tokenised on single spaces after leading whitespace is removed
/// and trailing whitespace is normalised to one delimiter. Recognised
/// directives are `extension`, `config`, `format` and `push`; lines starting
/// with `#` are comments.
///
/// # Examples
///
/// ```
/// use maker_cli::config::{DEFAULT_PROFILE, parser::parse_str};
/// use maker_cli::flags::BreakPolicy;
///
/// let parsed = parse_str(
///     "extension .c\nformat gcc %file% -o %output%\npush\n",
///     BreakPolicy::Continue,
/// )
/// .unwrap();
/// let c = parsed.config.get(".c").unwrap();
/// assert_eq!(c.template(DEFAULT_PROFILE), Some("gcc %file% -o %output% "));
/// ```
///
/// Sections that never reach a `push` are dropped:
///
/// ```
/// use maker_cli::config::parser::parse_str;
/// use maker_cli::flags::BreakPolicy;
///
/// let parsed = parse_str("extension .c\nformat gcc %file%\n", BreakPolicy::Continue).unwrap();
/// assert!(parsed.config.is_empty());
/// ```
///
/// # Errors
///
/// Under [`BreakPolicy::Break`], returns the first line whose directive is
/// not recognised. Under [`BreakPolicy::Continue`] such lines are collected
/// in [`ParsedConfig::skipped`] instead.
pub fn parse_str(content: &str, policy: BreakPolicy) -> Result<ParsedConfig, ParseError> {
    let mut config = ResolvedConfigSet::default();
    let mut section = PendingSection::default();
    let mut skipped = Vec::new();

    for (line_num, raw) in content.lines().enumerate() {
        let line = raw.trim_start();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens = tokenize(line);
        let Some((directive, args)) = tokens.split_first() else {
            continue;
        };

        match *directive {
            "extension" => {
                section.extensions = args.iter().map(|t| (*t).to_string()).collect();
            }
            "config" => {
                let name = args.join(" ");
                let name = name.trim();
                section.profile = if name.is_empty() {
                    DEFAULT_PROFILE.to_string()
                } else {
                    name.to_string()
                };
            }
            "format" => {
                let template: String = args.iter().map(|t| format!("{t} ")).collect();
                let profile =
                    std::mem::replace(&mut section.profile, DEFAULT_PROFILE.to_string());
                section.templates.insert(profile, template);
            }
            "push" => section.push_into(&mut config),
            _ => {
                let error = ParseError {
                    kind: ParseErrorKind::InvalidDirective,
                    line: line_num + 1,
                    text: line.trim_end().to_string(),
                };
                if policy.is_break() {
                    return Err(error);
                }
                skipped.push(error);
            }
        }
    }

    config.remove("");
    Ok(ParsedConfig { config, skipped })
}

/// Split a line on single spaces after normalising trailing whitespace.
///
/// Runs of spaces inside the line produce empty tokens, which `format`
/// preserves so that templates keep their spacing.
fn tokenize(line: &str) -> Vec<&str> {
    line.trim_end().split(' ').collect()
}

//! Command template expansion.
use std::path::{Path, PathBuf};

use crate::error::ExpandError;

/// Mandatory placeholder replaced by the input file path.
pub const FILE_PLACEHOLDER: &str = "%file%";

/// Optional placeholder replaced by the computed output path.
pub const OUTPUT_PLACEHOLDER: &str = "%output%";

/// Substitute `input` and `output` into `template`.
///
/// Only the first occurrence of each placeholder is replaced. Paths are
/// inserted verbatim; templates that need quoting must carry it themselves.
///
/// # Examples
///
/// ```
/// use maker_cli::template::expand;
///
/// let cmd = expand("g++ %file% -o %output%", "a.cpp", "bin/a").unwrap();
/// assert_eq!(cmd, "g++ a.cpp -o bin/a");
///
/// // `%output%` is optional, e.g. for interpreters.
/// assert_eq!(expand("python3 %file%", "run.py", "bin/run").unwrap(), "python3 run.py");
/// ```
///
/// # Errors
///
/// Returns [`ExpandError::MissingFileSpecifier`] if `template` does not
/// contain `%file%`.
pub fn expand(template: &str, input: &str, output: &str) -> Result<String, ExpandError> {
    let Some((before, after)) = template.split_once(FILE_PLACEHOLDER) else {
        return Err(ExpandError::MissingFileSpecifier(
            template.trim_end().to_string(),
        ));
    };
    // The input is spliced in last so a `%output%` inside it is never touched.
    let command = if before.contains(OUTPUT_PLACEHOLDER) {
        format!(
            "{}{input}{after}",
            before.replacen(OUTPUT_PLACEHOLDER, output, 1)
        )
    } else {
        format!(
            "{before}{input}{}",
            after.replacen(OUTPUT_PLACEHOLDER, output, 1)
        )
    };
    Ok(command)
}

/// Compute the output path for `input`.
///
/// The file name has its matched `extension` removed and `exe_suffix`
/// appended; the result lives in `output_dir`, which is resolved against the
/// input file's parent directory unless it is absolute.
///
/// # Examples
///
/// ```
/// use maker_cli::template::output_path;
/// use std::path::{Path, PathBuf};
///
/// let out = output_path(Path::new("src/main.c"), ".c", Path::new("bin"), "");
/// assert_eq!(out, PathBuf::from("src/bin/main"));
/// ```
#[must_use]
pub fn output_path(input: &Path, extension: &str, output_dir: &Path, exe_suffix: &str) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name.strip_suffix(extension).unwrap_or(&file_name);
    output_dir_for(input, output_dir).join(format!("{stem}{exe_suffix}"))
}

/// Directory that receives the output for `input`.
#[must_use]
pub fn output_dir_for(input: &Path, output_dir: &Path) -> PathBuf {
    if output_dir.is_absolute() {
        return output_dir.to_path_buf();
    }
    input
        .parent()
        .map_or_else(|| output_dir.to_path_buf(), |parent| parent.join(output_dir))
}

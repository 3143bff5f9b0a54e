//! Init command: write a starter `.maker` file.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};

use crate::config::CONFIG_FILE_NAME;
use crate::logging::Logger;

/// Contents of the starter `.maker` file.
pub const STARTER_TEMPLATE: &str = "\
# maker configuration
#
# extension <ext>...   start a section for one or more file extensions
# config <profile>     the next format line belongs to <profile> (maker -c <profile>)
# format <command>     command template: %file% is the source, %output% the binary
# push                 store the section
#
# A format line without a preceding config is used when -c is not given.

extension .c
format gcc %file% -o %output%
config release
format gcc -O2 %file% -o %output%
push

extension .cpp .cc .cxx
format g++ %file% -o %output%
config release
format g++ -O2 %file% -o %output%
push

extension .rs
format rustc %file% -o %output%
config release
format rustc -O %file% -o %output%
push

extension .zig
format zig build-exe %file% -femit-bin=%output%
config release
format zig build-exe -O ReleaseFast %file% -femit-bin=%output%
push
";

/// Write a starter `.maker` into the current directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined, a
/// `.maker` already exists and `force` is not set, or the file cannot be
/// written.
pub fn run(force: bool, log: &Logger) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let path = write_starter(&cwd, force)?;
    log.info(&format!("wrote {}", path.display()));
    Ok(())
}

/// Write [`STARTER_TEMPLATE`] to `dir/.maker` and return its path.
///
/// # Errors
///
/// Returns an error if the file exists and `force` is not set, or if it
/// cannot be written.
pub fn write_starter(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    fs::write(&path, STARTER_TEMPLATE)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

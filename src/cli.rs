//! Command-line interface definition.
use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;

use crate::flags::DEFAULT_OUTPUT_DIR;

/// Top-level CLI entry point for maker.
#[derive(Parser, Debug)]
#[command(
    name = "maker",
    about = "A wrapper for single-source compiling",
    long_about = "A wrapper for single-source compiling.\n\n\
                  Each FILE is compiled with the command template that the nearest \
                  .maker file (or ~/.config/maker/.maker) declares for its extension.",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Source files to compile
    #[arg(value_name = "FILE", required_unless_present = "maker")]
    pub files: Vec<PathBuf>,

    /// Output directory, relative to each file's directory
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Configuration keyword selecting the template profile
    #[arg(short = 'c', long = "config", value_name = "PROFILE")]
    pub profile: Option<String>,

    /// Stop at the first file that fails
    #[arg(short = 'b', long = "break")]
    pub break_on_failure: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Write a starter .maker file in the current directory and exit
    #[arg(long, conflicts_with = "files")]
    pub maker: bool,

    /// Overwrite an existing .maker when used with --maker
    #[arg(long, requires = "maker")]
    pub force: bool,
}

/// Process exit code for a clap parse result that ends the run early.
///
/// Help and version output, including the help shown when `maker` is run
/// without arguments, exit `0`; usage errors keep clap's own code.
#[must_use]
pub fn early_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
        _ => err.exit_code(),
    }
}

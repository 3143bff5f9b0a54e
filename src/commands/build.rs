//! Build command implementation.
use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::resolver::ConfigResolver;
use crate::config::validation::display_profile;
use crate::dispatch::{DispatchSummary, Dispatcher};
use crate::exec::{Executor, SystemExecutor};
use crate::flags::Flags;
use crate::logging::Logger;
use crate::platform::Platform;

/// Run the build command and return the process exit code.
#[must_use]
pub fn run(cli: &Cli, log: &Logger) -> i32 {
    let flags = Flags::from_cli(cli);
    let platform = Platform::detect();
    let executor = SystemExecutor::new(platform);

    let summary = compile(
        &cli.files,
        &flags,
        platform,
        platform.user_config_path(),
        &executor,
        log,
    );
    log.print_summary();
    summary.exit_code()
}

/// Compile `files` with an explicit platform, fallback config and executor.
#[must_use]
pub fn compile(
    files: &[PathBuf],
    flags: &Flags,
    platform: Platform,
    fallback: Option<PathBuf>,
    executor: &dyn Executor,
    log: &Logger,
) -> DispatchSummary {
    log.stage(&format!("Compiling {} file(s)", files.len()));
    log.debug(&format!(
        "profile: {}, output: {}, break: {}",
        display_profile(&flags.profile),
        flags.output_dir.display(),
        flags.policy.is_break()
    ));
    match &fallback {
        Some(path) => log.debug(&format!("user config: {}", path.display())),
        None => log.debug("home directory unknown, no user config fallback"),
    }

    let resolver = ConfigResolver::new(fallback, flags.policy);
    Dispatcher::new(flags, platform, resolver, executor, log).run(files)
}

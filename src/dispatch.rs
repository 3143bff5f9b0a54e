//! Per-file dispatch loop: resolve, look up, expand, run, aggregate.
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::resolver::ConfigResolver;
use crate::config::validation::display_profile;
use crate::error::DispatchError;
use crate::exec::{Executor, RunStatus};
use crate::flags::Flags;
use crate::logging::{FileStatus, Log};
use crate::platform::Platform;
use crate::template::{expand, output_dir_for, output_path};

/// Outcome of a dispatch run.
#[derive(Debug, Default)]
pub struct DispatchSummary {
    /// Number of files whose command succeeded.
    pub succeeded: usize,
    /// Files skipped with a reported error.
    pub skipped: Vec<DispatchError>,
    /// Files that failed without stopping the run.
    pub failed: Vec<DispatchError>,
    /// The error that stopped the run under break-on-failure.
    pub aborted: Option<DispatchError>,
}

impl DispatchSummary {
    /// Return `true` if no file failed and the run was not aborted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.aborted.is_none()
    }

    /// Process exit code for this run.
    ///
    /// An abort uses the aborting error's code. Otherwise a failed child
    /// process yields `1`, a template without `%file%` yields
    /// [`EXIT_TEMPLATE`](crate::error::EXIT_TEMPLATE), and benign skips
    /// leave the run successful.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if let Some(err) = &self.aborted {
            return err.exit_code();
        }
        if self
            .failed
            .iter()
            .any(|e| matches!(e, DispatchError::ChildProcessFailed { .. }))
        {
            return 1;
        }
        self.failed
            .iter()
            .map(DispatchError::exit_code)
            .max()
            .unwrap_or(0)
    }
}

/// Drives one run over the input files.
pub struct Dispatcher<'a> {
    flags: &'a Flags,
    platform: Platform,
    resolver: ConfigResolver,
    executor: &'a dyn Executor,
    log: &'a dyn Log,
}

impl fmt::Debug for Dispatcher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("flags", &self.flags)
            .field("platform", &self.platform)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher.
    #[must_use]
    pub fn new(
        flags: &'a Flags,
        platform: Platform,
        resolver: ConfigResolver,
        executor: &'a dyn Executor,
        log: &'a dyn Log,
    ) -> Self {
        Self {
            flags,
            platform,
            resolver,
            executor,
            log,
        }
    }

    /// Process `files` in order and return the aggregate outcome.
    ///
    /// A missing input file is always skipped. Any other error skips the
    /// file, or stops the run when break-on-failure is set. Child process
    /// failures and templates without `%file%` are counted as failures
    /// rather than skips.
    pub fn run(&mut self, files: &[PathBuf]) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        for (index, file) in files.iter().enumerate() {
            let name = file.display().to_string();
            let err = match self.process(file) {
                Ok(()) => {
                    self.log.record_file(&name, FileStatus::Ok, None);
                    summary.succeeded += 1;
                    continue;
                }
                Err(err) => err,
            };
            let message = err.to_string();

            if err.is_always_skipped() {
                self.log.warn(&message);
                self.log
                    .record_file(&name, FileStatus::Skipped, Some(&message));
                summary.skipped.push(err);
            } else if self.flags.policy.is_break() {
                self.log.error(&format!("{name}: {message}"));
                self.log.record_file(&name, FileStatus::Failed, Some(&message));
                let remaining = files.len() - index - 1;
                if remaining > 0 {
                    self.log
                        .error(&format!("aborting, {remaining} file(s) not processed"));
                }
                summary.aborted = Some(err);
                break;
            } else if err.is_failure() {
                self.log.error(&format!("{name}: {message}"));
                self.log.record_file(&name, FileStatus::Failed, Some(&message));
                summary.failed.push(err);
            } else {
                self.log.warn(&format!("{name}: {message}"));
                self.log
                    .record_file(&name, FileStatus::Skipped, Some(&message));
                summary.skipped.push(err);
            }
        }

        summary
    }

    /// Compile a single file.
    fn process(&mut self, file: &Path) -> Result<(), DispatchError> {
        let config = self.resolver.resolve(file, self.log)?;

        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let language =
            config
                .match_file_name(&file_name)
                .ok_or_else(|| DispatchError::UnsupportedExtension {
                    file: file.to_path_buf(),
                })?;

        let profile = &self.flags.profile;
        let template =
            language
                .template(profile)
                .ok_or_else(|| DispatchError::ProfileNotFound {
                    extension: language.extension().to_string(),
                    profile: display_profile(profile).to_string(),
                    available: language
                        .profiles()
                        .into_iter()
                        .map(display_profile)
                        .collect::<Vec<_>>()
                        .join(", "),
                })?;

        let output = output_path(
            file,
            language.extension(),
            &self.flags.output_dir,
            self.platform.exe_suffix(),
        );
        let command = expand(
            template,
            &file.display().to_string(),
            &output.display().to_string(),
        )?;
        let command = command.trim_end();

        let output_dir = output_dir_for(file, &self.flags.output_dir);
        fs::create_dir_all(&output_dir).map_err(|source| DispatchError::OutputDir {
            path: output_dir.clone(),
            source,
        })?;

        self.log.info(&format!("---{}---", file.display()));
        self.log.debug(&format!("running: {command}"));

        let status = match self.executor.run(command) {
            Ok(status) => status,
            Err(e) => {
                self.log.debug(&format!("{e:#}"));
                RunStatus {
                    success: false,
                    code: None,
                }
            }
        };

        if status.success {
            Ok(())
        } else {
            Err(DispatchError::ChildProcessFailed {
                file: file.to_path_buf(),
                command: command.to_string(),
                code: status.code,
            })
        }
    }
}

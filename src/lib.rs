//! Per-extension compiler dispatcher.
//!
//! `maker` compiles single source files by looking up a command template for
//! each file's extension in a `.maker` file, substituting the input and
//! output paths, and running the resulting command line.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: parse, locate, cache and validate `.maker` files
//! - **[`template`]**: `%file%` / `%output%` substitution and output paths
//! - **[`dispatch`]**: the per-file loop and its skip/abort policy
//! - **[`exec`]**: command execution behind the [`exec::Executor`] trait
//! - **[`commands`]**: top-level `build` and `init` orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod exec;
pub mod flags;
pub mod logging;
pub mod platform;
pub mod template;

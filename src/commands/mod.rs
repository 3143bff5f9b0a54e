//! Top-level command orchestration.
//!
//! `build` is the default action and compiles the files named on the command
//! line; `init` handles `--maker` and writes a starter `.maker` file.
pub mod build;
pub mod init;

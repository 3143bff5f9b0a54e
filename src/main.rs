//! `maker` command-line entry point.

use std::process::ExitCode;

use clap::Parser;

use maker_cli::{cli, commands, logging};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = match cli::Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(u8::try_from(cli::early_exit_code(&e)).unwrap_or(2));
        }
    };
    let command = if args.maker { "init" } else { "build" };
    logging::init_subscriber(args.verbose, command);
    let log = logging::Logger::new(command);

    let code = if args.maker {
        match commands::init::run(args.force, &log) {
            Ok(()) => 0,
            Err(e) => {
                log.error(&format!("{e:#}"));
                1
            }
        }
    } else {
        commands::build::run(&args, &log)
    };

    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

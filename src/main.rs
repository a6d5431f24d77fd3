use std::process::ExitCode;

use clap::Parser;
use inputguard::cli::{check, Cli};
use tracing_subscriber::filter::LevelFilter;

/// Exit status for operational failures (unreadable input, bad config).
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match check::run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("inputguard: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

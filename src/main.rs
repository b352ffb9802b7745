//! bara-sync: render copy.bara.sky and run the Copybara migration container.
//!
//! This is the main entry point for the `bara-sync` CLI. It parses arguments,
//! sets up logging, dispatches to the command handler, and turns errors into
//! exit codes.

mod cli;
mod commands;
pub mod config;
pub mod copybara;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod sky;

#[cfg(test)]
mod test_support;

use cli::Cli;
use commands::report::Report;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(&cli.log_level);

    let json = cli.json;
    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            if json {
                println!("{}", Report::from_error(&err).to_json());
            }
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// Log to stderr so stdout stays free for documents and JSON.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

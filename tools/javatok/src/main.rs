//! `javatok`: dump the classified token stream of Java files.
//!
//! ```text
//! javatok [--summary] [--lines] <file.java>...
//! ```
//!
//! Diagnostics are soft: they are printed but never change the exit code.
//! Only I/O failures do. Set `RUST_LOG=java_lexer=trace` to watch the
//! context tracker.

mod dump;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use error::CliError;

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    /// Per-kind counts instead of the full token dump.
    summary: bool,
    /// Feed each file one line at a time, as an editor would.
    lines: bool,
    paths: Vec<PathBuf>,
}

fn main() -> ExitCode {
    init_tracing();

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {e}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match dump::run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options, CliError> {
    let mut options = Options::default();
    for arg in args {
        match arg.as_str() {
            "--summary" | "-s" => options.summary = true,
            "--lines" | "-l" => options.lines = true,
            flag if flag.starts_with('-') => {
                return Err(CliError::UnknownFlag(flag.to_owned()));
            }
            _ => options.paths.push(PathBuf::from(arg)),
        }
    }
    if options.paths.is_empty() {
        return Err(CliError::NoInput);
    }
    Ok(options)
}

fn print_usage() {
    eprintln!("Usage: javatok [--summary] [--lines] <file.java>...");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --summary   Count tokens per kind instead of listing them");
    eprintln!("  -l, --lines     Tokenize line by line, carrying state between lines");
}

/// Install a hierarchical subscriber, but only when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

//! Command-line entry point: reads a file, analyzes every function in it,
//! and prints one report block per function in source order.
//!
//! # Exit codes
//! - `0` - every function analyzed successfully.
//! - `1` - the file parsed but at least one function's analysis failed;
//!   that function's report block is replaced by its diagnostic and the
//!   rest are still attempted.
//! - `2` - the file could not be read, or failed to parse at all.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use asymptotica::{analyze_source, report};

#[derive(Parser, Debug)]
#[command(name = "asymptotica")]
#[command(about = "Static asymptotic complexity inference for a restricted imperative sublanguage")]
struct Cli {
    /// Source file to analyze
    file: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let source = match std::fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: could not read {}: {e}", cli.file.display());
            return ExitCode::from(2);
        }
    };

    let results = match analyze_source(&source) {
        Ok(results) => results,
        Err(parse_error) => {
            eprint!("{}", report::render_parse_error(&parse_error, &source));
            return ExitCode::from(2);
        }
    };

    let mut any_failed = false;
    for (name, outcome) in &results {
        match outcome {
            Ok(function_report) => print!("{}", report::render(function_report)),
            Err(analysis_error) => {
                any_failed = true;
                eprint!("{}", report::render_analysis_error(name, analysis_error, &source));
            }
        }
    }

    if any_failed { ExitCode::from(1) } else { ExitCode::SUCCESS }
}

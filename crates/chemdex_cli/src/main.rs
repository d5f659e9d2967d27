//! CLI entry point for inspecting the identifier subsystem.
//!
//! # Responsibility
//! - Expose parse/format/lookup over `chemdex_core` for quick local checks.
//! - Keep output deterministic and line-oriented.
//!
//! # Exit codes
//! - `0` success, `1` lookup miss, `2` usage or load error.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;

use commands::{format, lookup, parse, Outcome};

#[derive(Parser, Debug)]
#[command(
    name = "chemdex",
    about = "Inspect chemical formulas, charge notation and catalog aliases.",
    version,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Expand a formula into element counts.
    Parse(parse::ParseArgs),
    /// Split trailing charge notation and print display markup.
    Format(format::FormatArgs),
    /// Resolve an alias against the bundled or a seed-file catalog.
    Lookup(lookup::LookupArgs),
    /// Print the core library version.
    Version,
}

fn main() -> ExitCode {
    // clap exits with status 2 on usage errors.
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match &cli.command {
        Command::Parse(args) => parse::run(args, &mut out),
        Command::Format(args) => format::run(args, &mut out),
        Command::Lookup(args) => lookup::run(args, &mut out, &mut io::stderr()),
        Command::Version => {
            let version = chemdex_core::core_version();
            writeln!(out, "chemdex_core version={version}").map(|()| Outcome::Success)
        }
    };

    match result {
        Ok(outcome) => outcome.into(),
        Err(err) => {
            eprintln!("error: failed to write output: {err}");
            Outcome::Failure.into()
        }
    }
}

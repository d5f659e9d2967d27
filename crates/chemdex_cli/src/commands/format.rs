use std::io::{self, Write};

use clap::Args;

use chemdex_core::{normalize_token, split_charge};

use crate::commands::Outcome;

/// Splits trailing charge notation from subscripts.
#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Display token such as `SO42-` or `NH4^+`.
    pub token: String,
}

pub fn run(args: &FormatArgs, out: &mut impl Write) -> io::Result<Outcome> {
    let split = split_charge(&args.token);
    let marked = normalize_token(&args.token);
    writeln!(out, "main={}", split.main)?;
    writeln!(out, "charge={}", split.charge)?;
    writeln!(out, "rule={:?}", split.rule)?;
    writeln!(out, "markup={}", marked.display())?;
    Ok(Outcome::Success)
}

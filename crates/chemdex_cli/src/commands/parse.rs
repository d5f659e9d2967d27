use std::io::{self, Write};

use clap::Args;

use chemdex_core::parse_formula;

use crate::commands::Outcome;

/// Expands a formula into `Symbol=count` lines.
#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Formula such as `Ca(OH)2` or `K4[Fe(CN)6]`.
    pub formula: String,
}

/// Prints counts in symbol order, then the flattened formula.
pub fn run(args: &ParseArgs, out: &mut impl Write) -> io::Result<Outcome> {
    let counts = parse_formula(&args.formula);
    for (symbol, count) in counts.iter() {
        writeln!(out, "{symbol}={count}")?;
    }
    writeln!(out, "flat={}", counts.to_flat_formula())?;
    Ok(Outcome::Success)
}

#[cfg(test)]
mod tests {
    use super::{run, ParseArgs};
    use crate::commands::Outcome;

    #[test]
    fn prints_sorted_counts_and_flat_formula() {
        let args = ParseArgs {
            formula: "Ca(OH)2".to_string(),
        };
        let mut out = Vec::new();
        let outcome = run(&args, &mut out).expect("write to buffer");
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "Ca=1\nH=2\nO=2\nflat=CaH2O2\n"
        );
    }
}

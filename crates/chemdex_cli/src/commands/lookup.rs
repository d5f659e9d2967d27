use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use log::debug;

use chemdex_core::{
    builtin_seed, init_logging, load_config, load_seed_file, normalize_token, AliasRegistry,
    CoreConfig, SpeciesRecord,
};

use crate::commands::Outcome;

/// Resolves an alias to its canonical entry and optional variant.
#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Formula, name or variant label; case and whitespace are ignored.
    pub query: String,
    /// Seed JSON to load instead of the bundled catalog.
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,
    /// Core config JSON (logging and collision policy).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Loads the catalog and prints the resolution of `args.query`.
///
/// Load failures go to `err` and yield `Outcome::Failure`.
pub fn run(
    args: &LookupArgs,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<Outcome> {
    match load_registry(args) {
        Ok(registry) => write_resolution(&registry, &args.query, out),
        Err(load_err) => {
            writeln!(err, "error: {load_err:#}")?;
            Ok(Outcome::Failure)
        }
    }
}

fn load_registry(args: &LookupArgs) -> Result<AliasRegistry<SpeciesRecord>> {
    let config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CoreConfig::default(),
    };
    if let Some(settings) = &config.logging {
        init_logging(settings).context("Failed to start logging")?;
    }

    let seed = match &args.catalog {
        Some(path) => load_seed_file(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => builtin_seed().context("Failed to parse bundled catalog")?,
    };
    seed.into_registry(&config.registry).context("Failed to register catalog")
}

/// Prints one `field=value` line per resolved field.
pub fn write_resolution(
    registry: &AliasRegistry<SpeciesRecord>,
    query: &str,
    out: &mut impl Write,
) -> io::Result<Outcome> {
    let Some(resolution) = registry.lookup(query) else {
        writeln!(out, "not_found={query}")?;
        return Ok(Outcome::NotFound);
    };
    let record = resolution.payload();
    let variant = resolution.variant_id().unwrap_or("-");
    writeln!(out, "key={}", resolution.key())?;
    writeln!(out, "variant={variant}")?;
    writeln!(out, "name={}", resolution.display_name())?;
    writeln!(out, "center={}", record.center)?;
    writeln!(out, "hybrid={}", record.hybrid)?;
    writeln!(out, "shape={}", record.shape)?;
    writeln!(out, "angle={}", record.angle)?;
    writeln!(out, "melting_point={}", record.melting_point)?;
    writeln!(out, "boiling_point={}", record.boiling_point)?;
    writeln!(
        out,
        "point_group={}",
        record.point_group.as_deref().unwrap_or("-")
    )?;
    writeln!(out, "formula={}", normalize_token(resolution.key()).display())?;
    debug!(
        "event=cli_lookup module=cli status=ok key={} variant={}",
        resolution.key(),
        variant
    );
    Ok(Outcome::Success)
}

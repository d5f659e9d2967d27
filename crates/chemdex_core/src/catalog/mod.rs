//! Declarative catalog seed and registry population.
//!
//! # Responsibility
//! - Define the JSON seed document that declares entries and variants.
//! - Register a seed into an `AliasRegistry<SpeciesRecord>` in document order.
//! - Ship a bundled seed for callers that need a ready catalog.
//!
//! # Invariants
//! - Entries register in document order, so later entries win alias
//!   collisions under `CollisionPolicy::Overwrite`.
//! - Variants register in document order within their entry.

use crate::model::species::{SpeciesPatch, SpeciesRecord};
use crate::registry::builder::{RegistryBuilder, RegistryConfig, RegistryError};
use crate::registry::lookup::AliasRegistry;
use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const BUILTIN_SEED_JSON: &str = include_str!("builtin_seed.json");

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Seed loading or registration failure.
#[derive(Debug)]
pub enum CatalogError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Registry(RegistryError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read catalog seed `{path}`: {source}")
            }
            Self::Parse(err) => write!(f, "invalid catalog seed: {err}"),
            Self::Registry(err) => write!(f, "catalog registration failed: {err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Registry(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<RegistryError> for CatalogError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

/// Whole seed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub entries: Vec<SeedEntry>,
}

/// One `register` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedEntry {
    /// `Primary|Synonym|...`
    pub aliases: String,
    #[serde(default)]
    pub record: SpeciesRecord,
    #[serde(default)]
    pub variants: Vec<SeedVariant>,
}

/// One variant of a seed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedVariant {
    /// Raw alias list, also the variant identity.
    pub aliases: String,
    #[serde(default)]
    pub overrides: SpeciesPatch,
}

impl CatalogSeed {
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Registers every entry and freezes the result.
    pub fn into_registry(
        self,
        config: &RegistryConfig,
    ) -> CatalogResult<AliasRegistry<SpeciesRecord>> {
        let mut builder = RegistryBuilder::from_config(config);
        for entry in self.entries {
            let variants = entry
                .variants
                .into_iter()
                .map(|variant| (variant.aliases, variant.overrides));
            builder.register_with_variants(&entry.aliases, entry.record, variants)?;
        }
        Ok(builder.build())
    }
}

/// Reads and parses a seed file.
pub fn load_seed_file(path: impl AsRef<Path>) -> CatalogResult<CatalogSeed> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let seed = CatalogSeed::from_json_str(&json)?;
    info!(
        "event=catalog_load module=catalog status=ok source=file entries={}",
        seed.entries.len()
    );
    Ok(seed)
}

/// Parses the bundled seed.
pub fn builtin_seed() -> CatalogResult<CatalogSeed> {
    CatalogSeed::from_json_str(BUILTIN_SEED_JSON)
}

/// Builds a registry from the bundled seed with the default policy.
pub fn builtin_registry() -> CatalogResult<AliasRegistry<SpeciesRecord>> {
    let seed = builtin_seed()?;
    info!(
        "event=catalog_load module=catalog status=ok source=builtin entries={}",
        seed.entries.len()
    );
    seed.into_registry(&RegistryConfig::default())
}

//! Chemical identifier resolution for the species catalog.
//! This crate is the single source of truth for formula parsing, charge
//! notation display and alias resolution.

pub mod catalog;
pub mod config;
pub mod formula;
pub mod logging;
pub mod model;
pub mod registry;

pub use catalog::{
    builtin_registry, builtin_seed, load_seed_file, CatalogError, CatalogResult, CatalogSeed,
    SeedEntry, SeedVariant,
};
pub use config::{load_config, parse_config, ConfigError, CoreConfig};
pub use formula::charge::{
    mark_charge, mark_subscripts, normalize_token, split_charge, ChargeRule, ChargeSplit,
    MarkedFormula,
};
pub use formula::parser::{parse_formula, AtomCount};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::species::{SpeciesPatch, SpeciesRecord};
pub use registry::alias::{normalize_alias, split_alias_list};
pub use registry::builder::{
    AliasCollision, CollisionPolicy, RegistryBuilder, RegistryConfig, RegistryError,
};
pub use registry::entry::{CanonicalEntry, Payload, VariantRecord};
pub use registry::lookup::{AliasRegistry, AliasTarget, Resolution};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

//! Read-only alias registry.
//!
//! # Responsibility
//! - Resolve case/whitespace-insensitive queries to an entry and optional
//!   variant.
//!
//! # Invariants
//! - No method takes `&mut self`; a built registry never changes.
//! - Unknown queries resolve to `None`.

use crate::registry::alias::normalize_alias;
use crate::registry::builder::AliasCollision;
use crate::registry::entry::{CanonicalEntry, VariantRecord};
use log::debug;
use std::collections::BTreeMap;

/// Index value: the owning entry and, for variant aliases, the variant id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTarget {
    pub key: String,
    pub variant: Option<String>,
}

impl AliasTarget {
    pub(crate) fn base(key: &str) -> Self {
        Self {
            key: key.to_string(),
            variant: None,
        }
    }

    pub(crate) fn variant(key: &str, variant_id: &str) -> Self {
        Self {
            key: key.to_string(),
            variant: Some(variant_id.to_string()),
        }
    }
}

/// Successful lookup result.
#[derive(Debug, PartialEq)]
pub struct Resolution<'a, P> {
    pub entry: &'a CanonicalEntry<P>,
    pub variant: Option<&'a VariantRecord<P>>,
}

impl<P> Clone for Resolution<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Resolution<'_, P> {}

impl<'a, P> Resolution<'a, P> {
    pub fn key(&self) -> &'a str {
        self.entry.key()
    }

    pub fn variant_id(&self) -> Option<&'a str> {
        self.variant.map(VariantRecord::id)
    }

    /// Variant payload when a variant matched, else the base payload.
    pub fn payload(&self) -> &'a P {
        match self.variant {
            Some(variant) => variant.payload(),
            None => self.entry.payload(),
        }
    }

    /// Variant display name when a variant matched, else the entry's.
    pub fn display_name(&self) -> &'a str {
        match self.variant {
            Some(variant) => variant.display_name(),
            None => self.entry.display_name(),
        }
    }
}

/// Frozen catalog produced by `RegistryBuilder::build`.
///
/// Shareable across threads (`Arc<AliasRegistry<P>>`) whenever `P` is.
#[derive(Debug, Clone)]
pub struct AliasRegistry<P> {
    entries: BTreeMap<String, CanonicalEntry<P>>,
    order: Vec<String>,
    index: BTreeMap<String, AliasTarget>,
    collisions: Vec<AliasCollision>,
}

impl<P> AliasRegistry<P> {
    pub(crate) fn from_parts(
        entries: BTreeMap<String, CanonicalEntry<P>>,
        order: Vec<String>,
        index: BTreeMap<String, AliasTarget>,
        collisions: Vec<AliasCollision>,
    ) -> Self {
        Self {
            entries,
            order,
            index,
            collisions,
        }
    }

    /// Resolves `query` through the alias index.
    pub fn lookup(&self, query: &str) -> Option<Resolution<'_, P>> {
        let target = self.target(query)?;
        let entry = self.entries.get(&target.key)?;
        let variant = match target.variant.as_deref() {
            None => None,
            Some(id) => {
                let Some(variant) = entry.variant(id) else {
                    // The entry was re-registered without this variant.
                    debug!(
                        "event=variant_missing module=registry status=not_found key={} variant={}",
                        target.key, id
                    );
                    return None;
                };
                Some(variant)
            }
        };
        Some(Resolution { entry, variant })
    }

    pub fn contains(&self, query: &str) -> bool {
        self.lookup(query).is_some()
    }

    /// Raw index mapping for `query`.
    pub fn target(&self, query: &str) -> Option<&AliasTarget> {
        self.index.get(&normalize_alias(query))
    }

    /// Entry by exact canonical key.
    pub fn get(&self, key: &str) -> Option<&CanonicalEntry<P>> {
        self.entries.get(key)
    }

    /// Canonical keys in first-registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(String::as_str)
    }

    /// Entries in first-registration order.
    pub fn entries(&self) -> impl Iterator<Item = &CanonicalEntry<P>> + '_ {
        self.order.iter().filter_map(|key| self.entries.get(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct normalized aliases.
    pub fn alias_count(&self) -> usize {
        self.index.len()
    }

    /// Aliases that were remapped between entries during registration.
    pub fn collisions(&self) -> &[AliasCollision] {
        &self.collisions
    }
}

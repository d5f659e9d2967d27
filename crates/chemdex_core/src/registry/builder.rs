//! Registration phase of the alias registry.
//!
//! # Responsibility
//! - Turn `(alias list, payload, variants)` declarations into entries and
//!   alias index mappings.
//! - Apply the configured collision policy.
//!
//! # Invariants
//! - `CollisionPolicy::Overwrite` never fails: a remapped alias resolves to
//!   the most recent registration.
//! - `CollisionPolicy::Reject` checks a whole registration before applying
//!   it, so a rejected call leaves the builder unchanged.

use crate::registry::alias::{normalize_alias, split_alias_list};
use crate::registry::entry::{CanonicalEntry, Payload, VariantRecord};
use crate::registry::lookup::{AliasRegistry, AliasTarget};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// How a registration treats aliases already owned by another entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Last write wins; remaps are recorded in `collisions()`.
    #[default]
    Overwrite,
    /// Remaps across entries, duplicate keys and blank keys are errors.
    Reject,
}

/// Registry section of the core configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub collision_policy: CollisionPolicy,
}

/// One alias that moved from one canonical entry to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasCollision {
    /// Normalized alias.
    pub alias: String,
    pub previous_key: String,
    pub key: String,
}

/// Registration errors, only produced under `CollisionPolicy::Reject`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    EmptyCanonicalKey(String),
    DuplicateCanonicalKey(String),
    AliasCollision {
        alias: String,
        existing_key: String,
        incoming_key: String,
    },
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCanonicalKey(raw) => {
                write!(f, "alias list has an empty canonical key: `{raw}`")
            }
            Self::DuplicateCanonicalKey(key) => {
                write!(f, "canonical key already registered: {key}")
            }
            Self::AliasCollision {
                alias,
                existing_key,
                incoming_key,
            } => write!(
                f,
                "alias `{alias}` already maps to `{existing_key}`; refusing to remap to `{incoming_key}`"
            ),
        }
    }
}

impl Error for RegistryError {}

/// Mutable catalog under construction. Call `build()` to freeze it.
#[derive(Debug)]
pub struct RegistryBuilder<P> {
    policy: CollisionPolicy,
    entries: BTreeMap<String, CanonicalEntry<P>>,
    order: Vec<String>,
    index: BTreeMap<String, AliasTarget>,
    collisions: Vec<AliasCollision>,
}

impl<P> Default for RegistryBuilder<P> {
    fn default() -> Self {
        Self::with_policy(CollisionPolicy::default())
    }
}

impl<P: Payload> RegistryBuilder<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::with_policy(config.collision_policy)
    }
}

impl<P> RegistryBuilder<P> {
    pub fn with_policy(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            entries: BTreeMap::new(),
            order: Vec::new(),
            index: BTreeMap::new(),
            collisions: Vec::new(),
        }
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Alias remaps observed so far.
    pub fn collisions(&self) -> &[AliasCollision] {
        &self.collisions
    }
}

impl<P: Payload> RegistryBuilder<P> {
    /// Registers an entry without variants.
    pub fn register(&mut self, alias_list: &str, payload: P) -> Result<(), RegistryError> {
        self.register_with_variants(alias_list, payload, Vec::new())
    }

    /// Registers an entry and its variants.
    ///
    /// Each variant is `(raw alias list, overrides)`. The raw string is the
    /// variant identity; repeating an identifier replaces the earlier one.
    ///
    /// Empty segments after the canonical key (`NaCl||salt`) are skipped and
    /// never indexed, so a blank query cannot resolve to an entry.
    pub fn register_with_variants<I>(
        &mut self,
        alias_list: &str,
        payload: P,
        variants: I,
    ) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = (String, P::Patch)>,
    {
        let segments = split_alias_list(alias_list);
        let key = segments.first().cloned().unwrap_or_default();
        let key_normalized = normalize_alias(&key);

        let mut aliases = vec![key.clone()];
        aliases.extend(segments.into_iter().skip(1).filter(|alias| !alias.is_empty()));

        let mut mappings: Vec<(String, AliasTarget)> = aliases
            .iter()
            .map(|alias| (normalize_alias(alias), AliasTarget::base(&key)))
            .collect();

        let mut records: Vec<VariantRecord<P>> = Vec::new();
        for (id, patch) in variants {
            let variant_aliases: Vec<String> = split_alias_list(&id)
                .into_iter()
                .filter(|alias| !alias.is_empty() && normalize_alias(alias) != key_normalized)
                .collect();
            mappings.extend(
                variant_aliases
                    .iter()
                    .map(|alias| (normalize_alias(alias), AliasTarget::variant(&key, &id))),
            );

            let record = VariantRecord {
                aliases: variant_aliases,
                payload: payload.with_overrides(&patch),
                id,
            };
            match records.iter_mut().find(|existing| existing.id == record.id) {
                Some(existing) => *existing = record,
                None => records.push(record),
            }
        }

        if self.policy == CollisionPolicy::Reject {
            self.check_strict(alias_list, &key, &mappings)?;
        }

        for (alias, target) in mappings {
            if let Some(previous) = self.index.insert(alias.clone(), target) {
                if previous.key != key {
                    warn!(
                        "event=alias_collision module=registry status=overwritten alias={} previous_key={} key={}",
                        alias, previous.key, key
                    );
                    self.collisions.push(AliasCollision {
                        alias,
                        previous_key: previous.key,
                        key: key.clone(),
                    });
                }
            }
        }

        debug!(
            "event=registry_register module=registry status=ok key={} aliases={} variants={}",
            key,
            aliases.len(),
            records.len()
        );

        if !self.entries.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.entries.insert(
            key.clone(),
            CanonicalEntry {
                key,
                aliases,
                raw_aliases: alias_list.to_string(),
                payload,
                variants: records,
            },
        );
        Ok(())
    }

    /// Freezes the catalog into its read-only form.
    pub fn build(self) -> AliasRegistry<P> {
        info!(
            "event=registry_build module=registry status=ok entries={} aliases={} collisions={}",
            self.entries.len(),
            self.index.len(),
            self.collisions.len()
        );
        AliasRegistry::from_parts(self.entries, self.order, self.index, self.collisions)
    }

    fn check_strict(
        &self,
        alias_list: &str,
        key: &str,
        mappings: &[(String, AliasTarget)],
    ) -> Result<(), RegistryError> {
        if key.is_empty() {
            return Err(RegistryError::EmptyCanonicalKey(alias_list.to_string()));
        }
        if self.entries.contains_key(key) {
            return Err(RegistryError::DuplicateCanonicalKey(key.to_string()));
        }
        for (alias, _) in mappings {
            if let Some(existing) = self.index.get(alias) {
                if existing.key != key {
                    return Err(RegistryError::AliasCollision {
                        alias: alias.clone(),
                        existing_key: existing.key.clone(),
                        incoming_key: key.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

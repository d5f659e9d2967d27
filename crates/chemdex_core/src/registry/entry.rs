//! Canonical entries, variants and payload fallback.
//!
//! # Invariants
//! - `CanonicalEntry::aliases()[0]` is the canonical key.
//! - A variant's alias list never contains an alias that normalizes to the
//!   canonical key.
//! - A variant payload is resolved once, at registration, from the base
//!   payload and the variant's overrides.

use crate::registry::alias::ALIAS_SEPARATOR;

/// Payload stored per catalog entry.
///
/// `Patch` lists the fields a variant may override. `with_overrides` returns
/// a copy of `self` where every field present in the patch is replaced and
/// every absent field keeps the base value.
pub trait Payload: Clone {
    type Patch;

    fn with_overrides(&self, patch: &Self::Patch) -> Self;
}

/// Alternate representation of an entry, e.g. `Crystal|Crystal packing (FCC)`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord<P> {
    pub(crate) id: String,
    pub(crate) aliases: Vec<String>,
    pub(crate) payload: P,
}

impl<P> VariantRecord<P> {
    /// Raw alias-list string, used verbatim as the variant identity.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Indexed aliases of this variant (canonical key excluded).
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Payload with the overrides already applied.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// First segment of the identifier, e.g. `Crystal`.
    pub fn label(&self) -> &str {
        self.id.split(ALIAS_SEPARATOR).next().unwrap_or("").trim()
    }

    /// Second segment of the identifier when present, else the label.
    pub fn display_name(&self) -> &str {
        self.id
            .split(ALIAS_SEPARATOR)
            .nth(1)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.label())
    }
}

/// One registered catalog record.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalEntry<P> {
    pub(crate) key: String,
    pub(crate) aliases: Vec<String>,
    pub(crate) raw_aliases: String,
    pub(crate) payload: P,
    pub(crate) variants: Vec<VariantRecord<P>>,
}

impl<P> CanonicalEntry<P> {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Canonical key first, then the non-empty synonyms in source order.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The alias-list string exactly as registered.
    pub fn raw_aliases(&self) -> &str {
        &self.raw_aliases
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Variants in registration order.
    pub fn variants(&self) -> &[VariantRecord<P>] {
        &self.variants
    }

    pub fn variant(&self, id: &str) -> Option<&VariantRecord<P>> {
        self.variants.iter().find(|variant| variant.id == id)
    }

    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Title shown by the viewer: the first synonym, or the key alone.
    pub fn display_name(&self) -> &str {
        self.aliases.get(1).unwrap_or(&self.key)
    }

    /// First synonym containing an ASCII letter, usually the English name.
    pub fn latin_name(&self) -> Option<&str> {
        self.aliases
            .iter()
            .skip(1)
            .find(|alias| alias.chars().any(|c| c.is_ascii_alphabetic()))
            .map(String::as_str)
    }

    /// `latin_name`, falling back to the canonical key.
    pub fn latin_name_or_key(&self) -> &str {
        self.latin_name().unwrap_or(&self.key)
    }
}

//! Alias registry for catalog entries.
//!
//! # Responsibility
//! - Map many synonym strings (formulas, names, variant labels) to one
//!   canonical entry and, optionally, one of its variants.
//! - Separate the build phase (`RegistryBuilder`, `&mut`) from the read
//!   phase (`AliasRegistry`, `&self` only).
//!
//! # Invariants
//! - Registration and lookup share `alias::normalize_alias`.
//! - Variant payloads are resolved through `Payload::with_overrides`.

pub mod alias;
pub mod builder;
pub mod entry;
pub mod lookup;

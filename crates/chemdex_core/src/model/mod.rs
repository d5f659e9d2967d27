//! Catalog payload types.
//!
//! # Responsibility
//! - Define the concrete record stored per catalog entry and the patch a
//!   variant applies to it.
//!
//! # Invariants
//! - Payload fallback goes through `registry::entry::Payload`, never through
//!   ad hoc field copying at call sites.

pub mod species;

//! Chemical formula text handling.
//!
//! # Responsibility
//! - Expand formula strings into element multisets (`parser`).
//! - Split trailing charge notation from subscripts for display (`charge`).
//!
//! # Invariants
//! - Every entry point here is a pure, total function: malformed input
//!   yields a best-effort value, never an error or a panic.

pub mod charge;
pub mod parser;

//! Permissive formula parser.
//!
//! # Responsibility
//! - Expand a formula such as `Al2(SO4)3` into `{Al: 2, O: 12, S: 3}`.
//! - Render an `AtomCount` back into a flat, ungrouped formula.
//!
//! # Invariants
//! - `()`, `[]` and `{}` are interchangeable grouping delimiters.
//! - An unmatched closer is a no-op; an unclosed opener drops its contents.
//! - Element symbols are one ASCII uppercase letter plus a greedy run of
//!   ASCII lowercase letters. Digits never belong to a symbol.
//! - Counts saturate at `u64::MAX` instead of overflowing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Element symbol -> fully expanded occurrence count.
///
/// Iteration is sorted by symbol, so rendering and comparison are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AtomCount {
    counts: BTreeMap<String, u64>,
}

impl AtomCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the count for `symbol`, or `None` when it never occurred.
    ///
    /// Symbols are case-sensitive: `Co` and `CO` are different lookups.
    pub fn get(&self, symbol: &str) -> Option<u64> {
        self.counts.get(symbol).copied()
    }

    /// Adds `count` occurrences of `symbol`.
    pub fn add(&mut self, symbol: impl Into<String>, count: u64) {
        let slot = self.counts.entry(symbol.into()).or_insert(0);
        *slot = slot.saturating_add(count);
    }

    /// Merges `other` into `self`, multiplying each of its counts first.
    pub fn merge_scaled(&mut self, other: &AtomCount, multiplier: u64) {
        for (symbol, count) in &other.counts {
            self.add(symbol.as_str(), count.saturating_mul(multiplier));
        }
    }

    /// Number of distinct symbols, zero-count entries included.
    pub fn distinct_elements(&self) -> usize {
        self.counts.len()
    }

    pub fn total_atoms(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |total, count| total.saturating_add(*count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts
            .iter()
            .map(|(symbol, count)| (symbol.as_str(), *count))
    }

    /// Renders an ungrouped formula, symbols sorted, `1` counts omitted.
    ///
    /// `parse_formula(&counts.to_flat_formula()) == counts` for every value
    /// produced by `parse_formula`.
    pub fn to_flat_formula(&self) -> String {
        let mut out = String::new();
        for (symbol, count) in &self.counts {
            out.push_str(symbol);
            if *count != 1 {
                out.push_str(&count.to_string());
            }
        }
        out
    }
}

impl Display for AtomCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_flat_formula())
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for AtomCount {
    fn from_iter<T: IntoIterator<Item = (S, u64)>>(iter: T) -> Self {
        let mut counts = AtomCount::new();
        for (symbol, count) in iter {
            counts.add(symbol, count);
        }
        counts
    }
}

/// Expands `formula` into an element multiset.
///
/// Never fails. Characters that are neither delimiters, digits following a
/// symbol or closer, nor symbol letters are skipped.
pub fn parse_formula(formula: &str) -> AtomCount {
    let chars: Vec<char> = formula.chars().collect();
    let mut frames: Vec<AtomCount> = vec![AtomCount::new()];
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if is_group_open(c) {
            frames.push(AtomCount::new());
            i += 1;
        } else if is_group_close(c) {
            let (multiplier, next) = read_digits(&chars, i + 1);
            i = next;
            // The base frame is never popped.
            if frames.len() > 1 {
                if let Some(group) = frames.pop() {
                    if let Some(top) = frames.last_mut() {
                        top.merge_scaled(&group, multiplier.unwrap_or(1));
                    }
                }
            }
        } else if c.is_ascii_uppercase() {
            let start = i;
            i += 1;
            while i < chars.len() && chars[i].is_ascii_lowercase() {
                i += 1;
            }
            let symbol: String = chars[start..i].iter().collect();
            let (count, next) = read_digits(&chars, i);
            i = next;
            if let Some(top) = frames.last_mut() {
                top.add(symbol, count.unwrap_or(1));
            }
        } else {
            i += 1;
        }
    }

    frames.into_iter().next().unwrap_or_default()
}

fn is_group_open(c: char) -> bool {
    matches!(c, '(' | '[' | '{')
}

fn is_group_close(c: char) -> bool {
    matches!(c, ')' | ']' | '}')
}

/// Reads the ASCII digit run starting at `start`.
///
/// Returns `None` when no digit follows, plus the index after the run.
fn read_digits(chars: &[char], start: usize) -> (Option<u64>, usize) {
    let mut i = start;
    let mut value: u64 = 0;
    while i < chars.len() {
        let Some(digit) = chars[i].to_digit(10) else {
            break;
        };
        value = value.saturating_mul(10).saturating_add(u64::from(digit));
        i += 1;
    }
    if i == start {
        (None, i)
    } else {
        (Some(value), i)
    }
}

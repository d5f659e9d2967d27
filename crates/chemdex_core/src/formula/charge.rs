//! Charge notation normalizer for display tokens.
//!
//! # Responsibility
//! - Decide which trailing digits of a token such as `SO42-` are subscripts
//!   and which are the charge magnitude.
//! - Emit a fixed markup that a viewer can render without re-parsing.
//!
//! # Invariants
//! - Output depends only on the input string.
//! - The three classification rules are tried in order; the first match wins.
//! - The heuristic has no valence model. Chemically wrong splits are kept as
//!   they are so that catalog keys keep rendering the same way.
//!
//! # Markup
//! - Subscript span: every digit run `N` of the main formula becomes `_N_`.
//! - Charge span: a non-empty charge with magnitude `N` and sign `S` becomes
//!   `^N<charge>S</charge>^`. Only the sign sits inside the tag.

use crate::formula::parser::parse_formula;
use once_cell::sync::Lazy;
use regex::Regex;

/// Boundary marker around the charge span, also the stripped superscript marker.
pub const CHARGE_BOUNDARY: char = '^';
/// Subscript span delimiter on both sides of a digit run.
pub const SUBSCRIPT_MARK: char = '_';
pub const CHARGE_OPEN_TAG: &str = "<charge>";
pub const CHARGE_CLOSE_TAG: &str = "</charge>";

// Lazy prefix so the digit group takes the longest run before the sign.
static CHARGE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)([0-9]*)([+-])$").expect("valid charge run regex"));
static DIGIT_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("valid digit run regex"));

/// Which classification rule produced a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeRule {
    /// No trailing sign; the whole token is formula.
    NoCharge,
    /// Multi-digit run after a letter: all but the last digit are subscript.
    LeadingDigitsSubscript,
    /// Single digit after a letter in a multi-element formula: the digit is
    /// subscript and the charge is the bare sign.
    DigitIsSubscript,
    /// Charge run taken as written.
    Literal,
}

/// Raw (unmarked) result of the charge heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeSplit {
    pub main: String,
    /// Magnitude digits followed by the sign, a bare sign, or empty.
    pub charge: String,
    pub rule: ChargeRule,
}

/// Display-ready markup produced from a `ChargeSplit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedFormula {
    pub main: String,
    pub charge: String,
}

impl MarkedFormula {
    /// Main markup followed by charge markup.
    pub fn display(&self) -> String {
        format!("{}{}", self.main, self.charge)
    }
}

/// Classifies the trailing digits of `token`.
pub fn split_charge(token: &str) -> ChargeSplit {
    let cleaned = strip_markers(token);
    let Some(captures) = CHARGE_RUN_RE.captures(&cleaned) else {
        return ChargeSplit {
            main: cleaned,
            charge: String::new(),
            rule: ChargeRule::NoCharge,
        };
    };

    let prefix = captures.get(1).map_or("", |m| m.as_str());
    let digits = captures.get(2).map_or("", |m| m.as_str());
    let sign = captures.get(3).map_or("", |m| m.as_str());
    let follows_letter = prefix
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_alphabetic());

    if digits.len() >= 2 && follows_letter {
        let (subscript, magnitude) = digits.split_at(digits.len() - 1);
        return ChargeSplit {
            main: format!("{prefix}{subscript}"),
            charge: format!("{magnitude}{sign}"),
            rule: ChargeRule::LeadingDigitsSubscript,
        };
    }

    if digits.len() == 1 && follows_letter && parse_formula(prefix).distinct_elements() > 1 {
        return ChargeSplit {
            main: format!("{prefix}{digits}"),
            charge: sign.to_string(),
            rule: ChargeRule::DigitIsSubscript,
        };
    }

    ChargeSplit {
        main: prefix.to_string(),
        charge: format!("{digits}{sign}"),
        rule: ChargeRule::Literal,
    }
}

/// Splits `token` and renders both parts with the module markup.
pub fn normalize_token(token: &str) -> MarkedFormula {
    let split = split_charge(token);
    MarkedFormula {
        main: mark_subscripts(&split.main),
        charge: mark_charge(&split.charge),
    }
}

/// Wraps every digit run as a subscript span.
pub fn mark_subscripts(main: &str) -> String {
    DIGIT_RUN_RE.replace_all(main, "_${0}_").into_owned()
}

/// Wraps a non-empty charge as a bounded charge span, tagging only the sign.
pub fn mark_charge(charge: &str) -> String {
    if charge.is_empty() {
        return String::new();
    }
    let magnitude_len = charge.trim_end_matches(['+', '-']).len();
    let (magnitude, sign) = charge.split_at(magnitude_len);
    format!(
        "{b}{magnitude}{CHARGE_OPEN_TAG}{sign}{CHARGE_CLOSE_TAG}{b}",
        b = CHARGE_BOUNDARY
    )
}

fn strip_markers(token: &str) -> String {
    token
        .chars()
        .filter(|c| *c != CHARGE_BOUNDARY && !c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{mark_charge, mark_subscripts, split_charge, strip_markers, ChargeRule};

    #[test]
    fn strip_markers_drops_carets_and_all_whitespace() {
        assert_eq!(strip_markers(" SO4 ^2- \t"), "SO42-");
    }

    #[test]
    fn bare_sign_is_literal_charge() {
        let split = split_charge("OH-");
        assert_eq!(split.main, "OH");
        assert_eq!(split.charge, "-");
        assert_eq!(split.rule, ChargeRule::Literal);
    }

    #[test]
    fn single_element_keeps_digit_as_magnitude() {
        let split = split_charge("Fe3+");
        assert_eq!(split.main, "Fe");
        assert_eq!(split.charge, "3+");
        assert_eq!(split.rule, ChargeRule::Literal);
    }

    #[test]
    fn digit_after_closer_is_not_reassigned() {
        let split = split_charge("Fe(CN)63-");
        assert_eq!(split.main, "Fe(CN)");
        assert_eq!(split.charge, "63-");
        assert_eq!(split.rule, ChargeRule::Literal);
    }

    #[test]
    fn subscript_markup_wraps_every_run() {
        assert_eq!(mark_subscripts("Cr2O7"), "Cr_2_O_7_");
        assert_eq!(mark_subscripts("OH"), "OH");
    }

    #[test]
    fn empty_charge_has_no_markup() {
        assert_eq!(mark_charge(""), "");
        assert_eq!(mark_charge("2-"), "^2<charge>-</charge>^");
        assert_eq!(mark_charge("+"), "^<charge>+</charge>^");
    }
}

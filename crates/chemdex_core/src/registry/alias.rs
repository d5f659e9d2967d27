//! Alias list splitting and normalization.

/// Separator between aliases in a raw alias-list string.
pub const ALIAS_SEPARATOR: char = '|';

/// Normalizes one alias for index storage and lookup.
///
/// Removes every whitespace character, then uppercases. Registration and
/// lookup both go through this function, so `table salt`, `TableSalt` and
/// ` TABLE  SALT ` are the same alias.
pub fn normalize_alias(alias: &str) -> String {
    alias
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Splits `Primary|Synonym|...` into trimmed segments, order preserved.
///
/// Empty segments are kept so that the first element is always the
/// canonical key position, even when it is blank.
pub fn split_alias_list(raw: &str) -> Vec<String> {
    raw.split(ALIAS_SEPARATOR)
        .map(|segment| segment.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{normalize_alias, split_alias_list};

    #[test]
    fn normalize_removes_inner_whitespace_and_case() {
        assert_eq!(normalize_alias("  Sodium \t Chloride "), "SODIUMCHLORIDE");
        assert_eq!(normalize_alias("nh4+"), "NH4+");
    }

    #[test]
    fn normalize_leaves_non_latin_text_intact() {
        assert_eq!(normalize_alias("銨根 離子"), "銨根離子");
    }

    #[test]
    fn split_trims_and_keeps_positions() {
        assert_eq!(
            split_alias_list(" NaCl | Sodium Chloride|table salt "),
            vec!["NaCl", "Sodium Chloride", "table salt"]
        );
        assert_eq!(split_alias_list("A||B"), vec!["A", "", "B"]);
    }
}

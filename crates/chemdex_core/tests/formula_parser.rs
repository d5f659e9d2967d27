use chemdex_core::{parse_formula, AtomCount};

fn counts(pairs: &[(&str, u64)]) -> AtomCount {
    pairs.iter().map(|(symbol, count)| (*symbol, *count)).collect()
}

#[test]
fn ungrouped_formula_is_a_direct_sum() {
    assert_eq!(parse_formula("H2O"), counts(&[("H", 2), ("O", 1)]));
    assert_eq!(parse_formula("C6H12O6"), counts(&[("C", 6), ("H", 12), ("O", 6)]));
}

#[test]
fn grouping_multiplies_through_levels() {
    assert_eq!(
        parse_formula("Ca(OH)2"),
        counts(&[("Ca", 1), ("O", 2), ("H", 2)])
    );
    assert_eq!(
        parse_formula("Al2(SO4)3"),
        counts(&[("Al", 2), ("S", 3), ("O", 12)])
    );
    assert_eq!(
        parse_formula("K4[Fe(CN)6]"),
        counts(&[("K", 4), ("Fe", 1), ("C", 6), ("N", 6)])
    );
    assert_eq!(
        parse_formula("{[(CH3)2]3}2"),
        counts(&[("C", 12), ("H", 36)])
    );
}

#[test]
fn bracket_families_are_interchangeable() {
    let round = parse_formula("Mg(NO3)2");
    assert_eq!(parse_formula("Mg[NO3]2"), round);
    assert_eq!(parse_formula("Mg{NO3}2"), round);
    // Families may even be mixed across one group.
    assert_eq!(parse_formula("Mg(NO3]2"), round);
}

#[test]
fn multi_digit_counts_and_multipliers() {
    assert_eq!(
        parse_formula("C60(H12)10"),
        counts(&[("C", 60), ("H", 120)])
    );
}

#[test]
fn unmatched_closer_is_a_noop() {
    assert_eq!(parse_formula("H2)3O"), counts(&[("H", 2), ("O", 1)]));
    assert_eq!(parse_formula(")"), AtomCount::new());
}

#[test]
fn unclosed_opener_drops_its_contents() {
    assert_eq!(parse_formula("Na(Cl2"), counts(&[("Na", 1)]));
    assert_eq!(parse_formula("((H2O)"), AtomCount::new());
}

#[test]
fn stray_characters_are_skipped() {
    // A leading coefficient is not a multiplier: only `5` is skipped.
    assert_eq!(
        parse_formula("CuSO4·5H2O"),
        counts(&[("Cu", 1), ("S", 1), ("O", 5), ("H", 2)])
    );
    assert_eq!(parse_formula("NH4+"), counts(&[("N", 1), ("H", 4)]));
    assert_eq!(parse_formula("solid"), AtomCount::new());
}

#[test]
fn symbols_never_swallow_digits() {
    let parsed = parse_formula("Uuo2");
    assert_eq!(parsed.get("Uuo"), Some(2));
    assert_eq!(parsed.get("U"), None);
}

#[test]
fn flatten_then_reparse_is_stable() {
    let formulas = [
        "H2O",
        "Ca(OH)2",
        "Al2(SO4)3",
        "K4[Fe(CN)6]",
        "CuSO4·5H2O",
        "Xe",
        "(OH)0H",
    ];
    for formula in formulas {
        let parsed = parse_formula(formula);
        let flat = parsed.to_flat_formula();
        assert_eq!(
            parse_formula(&flat),
            parsed,
            "round trip failed for {formula} via {flat}"
        );
    }
}

#[test]
fn atom_count_serializes_as_plain_map() {
    let json = serde_json::to_value(parse_formula("Al2(SO4)3")).expect("serialize");
    assert_eq!(json, serde_json::json!({"Al": 2, "O": 12, "S": 3}));
}

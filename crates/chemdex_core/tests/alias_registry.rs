use chemdex_core::{AliasRegistry, CollisionPolicy, Payload, RegistryBuilder, RegistryError};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Phase {
    melting_point: String,
    point_group: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct PhasePatch {
    melting_point: Option<String>,
    point_group: Option<String>,
}

impl Payload for Phase {
    type Patch = PhasePatch;

    fn with_overrides(&self, patch: &PhasePatch) -> Self {
        Self {
            melting_point: patch
                .melting_point
                .clone()
                .unwrap_or_else(|| self.melting_point.clone()),
            point_group: patch.point_group.clone().or_else(|| self.point_group.clone()),
        }
    }
}

fn phase(melting_point: &str) -> Phase {
    Phase {
        melting_point: melting_point.to_string(),
        point_group: None,
    }
}

fn ammonia_series() -> AliasRegistry<Phase> {
    let mut builder = RegistryBuilder::new();
    builder
        .register_with_variants(
            "NH3|氨系列",
            Phase {
                melting_point: "-77.7".to_string(),
                point_group: Some("C3v".to_string()),
            },
            vec![
                ("NH3|氨|氨氣".to_string(), PhasePatch::default()),
                (
                    "NH4+|銨根離子|Ammonium".to_string(),
                    PhasePatch {
                        melting_point: Some("-".to_string()),
                        point_group: Some("Td".to_string()),
                    },
                ),
            ],
        )
        .expect("register ammonia series");
    builder.build()
}

#[test]
fn all_aliases_resolve_case_and_whitespace_insensitively() {
    let mut builder = RegistryBuilder::new();
    builder
        .register("NaCl|Sodium Chloride|table salt", phase("801"))
        .expect("register NaCl");
    let registry = builder.build();

    let queries = [
        "NaCl",
        "nacl",
        "Sodium Chloride",
        "SODIUMCHLORIDE",
        "  table   salt ",
        "TableSalt",
    ];
    for query in queries {
        let resolved = registry.lookup(query).expect("alias should resolve");
        assert_eq!(resolved.key(), "NaCl", "query {query}");
        assert!(resolved.variant.is_none());
        assert_eq!(resolved.payload().melting_point, "801");
    }
}

#[test]
fn unknown_query_is_not_found() {
    let registry = ammonia_series();
    assert!(registry.lookup("H2O").is_none());
    assert!(registry.lookup("").is_none());
    assert!(!registry.contains("   "));
}

#[test]
fn later_registration_wins_a_collision() {
    let mut builder = RegistryBuilder::new();
    builder
        .register("NaCl|Sodium Chloride|salt", phase("801"))
        .expect("first");
    builder
        .register("KCl|Potassium Chloride|Salt", phase("770"))
        .expect("overwrite policy never fails");
    let registry = builder.build();

    assert_eq!(registry.lookup("salt").expect("salt").key(), "KCl");
    assert_eq!(registry.lookup("Sodium Chloride").expect("NaCl").key(), "NaCl");

    let collisions = registry.collisions();
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].alias, "SALT");
    assert_eq!(collisions[0].previous_key, "NaCl");
    assert_eq!(collisions[0].key, "KCl");
}

#[test]
fn variant_aliases_resolve_to_variant_with_overrides() {
    let registry = ammonia_series();

    let ion = registry.lookup("ammonium").expect("variant alias");
    assert_eq!(ion.key(), "NH3");
    assert_eq!(ion.variant_id(), Some("NH4+|銨根離子|Ammonium"));
    assert_eq!(ion.payload().melting_point, "-");
    assert_eq!(ion.payload().point_group.as_deref(), Some("Td"));
    assert_eq!(ion.display_name(), "銨根離子");

    let gas = registry.lookup("氨氣").expect("variant alias");
    assert_eq!(gas.variant_id(), Some("NH3|氨|氨氣"));
    assert_eq!(gas.payload(), gas.entry.payload());
}

#[test]
fn canonical_key_inside_variant_list_still_resolves_to_base() {
    let registry = ammonia_series();
    let base = registry.lookup("nh3").expect("key");
    assert!(base.variant.is_none());
    assert_eq!(base.display_name(), "氨系列");

    let variant = registry
        .get("NH3")
        .and_then(|entry| entry.variant("NH3|氨|氨氣"))
        .expect("variant record");
    assert_eq!(variant.aliases(), &["氨".to_string(), "氨氣".to_string()]);
}

#[test]
fn variant_identity_is_the_raw_string() {
    let registry = ammonia_series();
    let entry = registry.get("NH3").expect("entry");
    assert!(entry.variant("NH4+|銨根離子|Ammonium").is_some());
    assert!(entry.variant("NH4+ | 銨根離子 | Ammonium").is_none());
    assert_eq!(entry.variants().len(), 2);
}

#[test]
fn reregistering_a_key_drops_stale_variant_targets() {
    let mut builder = RegistryBuilder::new();
    builder
        .register_with_variants(
            "O2|氧氣",
            phase("-218.8"),
            vec![("Ozone|O3".to_string(), PhasePatch::default())],
        )
        .expect("first");
    builder.register("O2|氧", phase("-218")).expect("replace");
    let registry = builder.build();

    assert_eq!(registry.len(), 1);
    assert!(registry.lookup("ozone").is_none());
    assert!(registry.target("ozone").is_some());
    // Base aliases of the replaced registration still point at the key.
    assert_eq!(
        registry.lookup("氧氣").expect("old alias").payload().melting_point,
        "-218"
    );
}

#[test]
fn reject_policy_leaves_builder_unchanged_on_collision() {
    let mut builder = RegistryBuilder::with_policy(CollisionPolicy::Reject);
    builder
        .register("NaCl|salt", phase("801"))
        .expect("first");

    let err = builder
        .register("KCl|Potassium Chloride|SALT", phase("770"))
        .expect_err("collision must be rejected");
    assert_eq!(
        err,
        RegistryError::AliasCollision {
            alias: "SALT".to_string(),
            existing_key: "NaCl".to_string(),
            incoming_key: "KCl".to_string(),
        }
    );

    let duplicate = builder
        .register("NaCl|halite", phase("801"))
        .expect_err("duplicate key must be rejected");
    assert!(matches!(duplicate, RegistryError::DuplicateCanonicalKey(_)));

    let registry = builder.build();
    assert_eq!(registry.len(), 1);
    assert!(registry.lookup("Potassium Chloride").is_none());
    assert!(registry.lookup("halite").is_none());
    assert!(registry.collisions().is_empty());
}

#[test]
fn keys_keep_registration_order() {
    let mut builder = RegistryBuilder::new();
    for key in ["ZnS", "CsCl", "NaCl"] {
        builder.register(key, phase("-")).expect("register");
    }
    let registry = builder.build();
    assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["ZnS", "CsCl", "NaCl"]);
    assert_eq!(registry.entries().count(), 3);
}

#[test]
fn built_registry_serves_concurrent_readers() {
    let registry = Arc::new(ammonia_series());
    std::thread::scope(|scope| {
        for _ in 0..4 {
            let registry = Arc::clone(&registry);
            scope.spawn(move || {
                for _ in 0..100 {
                    let hit = registry.lookup("銨根離子").expect("variant alias");
                    assert_eq!(hit.payload().point_group.as_deref(), Some("Td"));
                }
            });
        }
    });
}

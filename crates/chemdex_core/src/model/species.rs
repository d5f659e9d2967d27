//! Species record payload.
//!
//! # Responsibility
//! - Define the per-entry data the viewer reads (center atom, hybridization,
//!   shape, phase data, description).
//! - Define the variant override patch and its fallback rule.
//!
//! # Invariants
//! - A `SpeciesPatch` field that is `Some` replaces the base value; `None`
//!   keeps it.
//! - `shape` is stored as display text. A `[local, english]` pair in seed
//!   data renders as `local (english)`.

use crate::registry::entry::Payload;
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder the catalog uses for "not applicable".
pub const NOT_APPLICABLE: &str = "-";

/// Catalog payload for one species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesRecord {
    /// Center atom symbol, or a class label such as `Metal`.
    pub center: String,
    pub hybrid: String,
    #[serde(deserialize_with = "deserialize_shape")]
    pub shape: String,
    pub angle: String,
    /// Melting point text, degrees Celsius.
    #[serde(alias = "mp")]
    pub melting_point: String,
    /// Boiling point text, degrees Celsius or a word such as `sublimation`.
    #[serde(alias = "bp")]
    pub boiling_point: String,
    /// HTML fragment shown in the info panel.
    #[serde(alias = "desc")]
    pub description: Option<String>,
    /// Schoenflies point group, e.g. `Td`.
    #[serde(alias = "pg")]
    pub point_group: Option<String>,
    pub is_ionic: bool,
    pub is_metal: bool,
    /// Lattice edge relation text for crystal views.
    pub edge_relation: Option<String>,
}

impl Default for SpeciesRecord {
    fn default() -> Self {
        Self {
            center: NOT_APPLICABLE.to_string(),
            hybrid: NOT_APPLICABLE.to_string(),
            shape: NOT_APPLICABLE.to_string(),
            angle: NOT_APPLICABLE.to_string(),
            melting_point: NOT_APPLICABLE.to_string(),
            boiling_point: NOT_APPLICABLE.to_string(),
            description: None,
            point_group: None,
            is_ionic: false,
            is_metal: false,
            edge_relation: None,
        }
    }
}

/// Selective overrides carried by a variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesPatch {
    pub center: Option<String>,
    pub hybrid: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_shape")]
    pub shape: Option<String>,
    pub angle: Option<String>,
    #[serde(alias = "mp")]
    pub melting_point: Option<String>,
    #[serde(alias = "bp")]
    pub boiling_point: Option<String>,
    #[serde(alias = "desc")]
    pub description: Option<String>,
    #[serde(alias = "pg")]
    pub point_group: Option<String>,
    pub is_ionic: Option<bool>,
    pub is_metal: Option<bool>,
    pub edge_relation: Option<String>,
}

impl SpeciesPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl Payload for SpeciesRecord {
    type Patch = SpeciesPatch;

    fn with_overrides(&self, patch: &SpeciesPatch) -> Self {
        Self {
            center: pick(&patch.center, &self.center),
            hybrid: pick(&patch.hybrid, &self.hybrid),
            shape: pick(&patch.shape, &self.shape),
            angle: pick(&patch.angle, &self.angle),
            melting_point: pick(&patch.melting_point, &self.melting_point),
            boiling_point: pick(&patch.boiling_point, &self.boiling_point),
            description: patch
                .description
                .clone()
                .or_else(|| self.description.clone()),
            point_group: patch
                .point_group
                .clone()
                .or_else(|| self.point_group.clone()),
            is_ionic: patch.is_ionic.unwrap_or(self.is_ionic),
            is_metal: patch.is_metal.unwrap_or(self.is_metal),
            edge_relation: patch
                .edge_relation
                .clone()
                .or_else(|| self.edge_relation.clone()),
        }
    }
}

fn pick(patch: &Option<String>, base: &str) -> String {
    patch.clone().unwrap_or_else(|| base.to_string())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ShapeLabel {
    Plain(String),
    Pair(String, String),
}

impl ShapeLabel {
    fn into_text(self) -> String {
        match self {
            Self::Plain(text) => text,
            Self::Pair(local, english) => format!("{local} ({english})"),
        }
    }
}

fn deserialize_shape<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    ShapeLabel::deserialize(deserializer).map(ShapeLabel::into_text)
}

fn deserialize_optional_shape<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<ShapeLabel>::deserialize(deserializer).map(|label| label.map(ShapeLabel::into_text))
}

#[cfg(test)]
mod tests {
    use super::{SpeciesPatch, SpeciesRecord};
    use crate::registry::entry::Payload;

    fn ammonia() -> SpeciesRecord {
        SpeciesRecord {
            center: "N".to_string(),
            hybrid: "sp³".to_string(),
            shape: "角錐形 (Pyramidal)".to_string(),
            angle: "106.7°".to_string(),
            melting_point: "-77.7".to_string(),
            boiling_point: "-33.3".to_string(),
            point_group: Some("C3v".to_string()),
            ..SpeciesRecord::default()
        }
    }

    #[test]
    fn empty_patch_returns_base_unchanged() {
        let base = ammonia();
        assert!(SpeciesPatch::default().is_empty());
        assert_eq!(base.with_overrides(&SpeciesPatch::default()), base);
    }

    #[test]
    fn present_fields_override_and_absent_fields_fall_back() {
        let patch = SpeciesPatch {
            point_group: Some("Td".to_string()),
            melting_point: Some("-".to_string()),
            is_ionic: Some(true),
            ..SpeciesPatch::default()
        };
        let ion = ammonia().with_overrides(&patch);
        assert_eq!(ion.point_group.as_deref(), Some("Td"));
        assert_eq!(ion.melting_point, "-");
        assert!(ion.is_ionic);
        assert_eq!(ion.center, "N");
        assert_eq!(ion.boiling_point, "-33.3");
        assert_eq!(ion.shape, "角錐形 (Pyramidal)");
    }
}

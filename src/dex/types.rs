//! Record types for the per-generation dex provider contract.
//!
//! Field names deserialize from the provider's camelCase JSON payloads
//! (`baseStats`, `dexNumber`, `changesFrom`, ...).

use crate::types::BaseStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Internal dex id: lowercase alphanumeric squash of a display name.
///
/// `"Charizard-Mega-X"` becomes `"charizardmegax"`; learnsets and
/// cross-species links are keyed by this form.
pub fn to_dex_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// One species as reported by the provider for a single generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexSpecies {
    pub name: String,
    pub base_stats: BaseStats,
    /// 1-2 defending type names.
    pub types: Vec<String>,
    /// Slot label -> ability name ("0", "1", "H", ...).
    #[serde(default)]
    pub abilities: BTreeMap<String, String>,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub weight: f64,
    pub dex_number: u32,
    /// Pre-evolution display name, if any.
    #[serde(default)]
    pub prevo: Option<String>,
    /// Base-form display name for alternate forms.
    #[serde(default)]
    pub changes_from: Option<String>,
    /// Set when the entry is banned/unreleased in this generation.
    #[serde(default)]
    pub is_nonstandard: Option<String>,
}

impl DexSpecies {
    pub fn dex_id(&self) -> String {
        to_dex_id(&self.name)
    }
}

/// One move as reported by the provider for a single generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexMove {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub category: String,
    #[serde(default)]
    pub power: u16,
    #[serde(default)]
    pub accuracy: u16,
    #[serde(default)]
    pub priority: i8,
    #[serde(default)]
    pub pp: u16,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_nonstandard: Option<String>,
}

impl DexMove {
    pub fn dex_id(&self) -> String {
        to_dex_id(&self.name)
    }
}

/// One ability as reported by the provider for a single generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexAbility {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_nonstandard: Option<String>,
}

/// Learnset for one species: internal move id -> source tags.
///
/// Each tag's leading character encodes the generation the move was
/// learned in ("8L31" = level 31 in gen 8, "7M" = TM in gen 7).
pub type Learnset = BTreeMap<String, Vec<String>>;

//! Data models for the storage layer

use crate::types::{AbilityId, Generation, MoveId, PokemonId, TypeId};
use serde::{Deserialize, Serialize};

/// One species row as persisted and returned by the filter engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonRow {
    pub id: PokemonId,
    pub dex_number: u32,
    pub name: String,
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
    pub total: u16,
    pub height: f64,
    pub weight: f64,
    pub generation: Generation,
}

/// One ability row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityRow {
    pub id: AbilityId,
    pub name: String,
    pub description: String,
    pub generation: Generation,
}

/// One move row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRow {
    pub id: MoveId,
    pub name: String,
    pub pokemon_type_id: TypeId,
    pub category: String,
    pub power: u16,
    pub accuracy: u16,
    pub priority: i8,
    pub pp: u16,
    pub generation: Generation,
}

/// One stored effectiveness entry: the combined multiplier for one
/// attacking type against one species
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TypeEffectiveRow {
    pub pokemon_id: PokemonId,
    pub pokemon_type_id: TypeId,
    pub value: f64,
}

//! Typed identifiers and core reference enums shared across the crate.
//!
//! Cross-phase name references all use one normalization rule:
//! `name.to_lowercase()`. Every map keyed by name (builder, linker, search)
//! goes through [`normalize_name`] so the rule lives in exactly one place.

use crate::error::{DexError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical lowercase form used for every name-keyed lookup.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

macro_rules! row_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }
    };
}

row_id!(
    /// Database row id of a species (`pokemon` table).
    PokemonId
);
row_id!(
    /// Database row id of a pokemon type (1-based enum ordinal).
    TypeId
);
row_id!(
    /// Database row id of an ability.
    AbilityId
);
row_id!(
    /// Database row id of a move.
    MoveId
);
row_id!(
    /// Database row id of a special move category.
    CategoryId
);

/// A numbered ruleset version. The synthetic "unified" generation uses
/// id `max + 1` and holds the deduplicated superset of all real generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Generation(pub u8);

impl Generation {
    pub fn new(gen: u8) -> Self {
        Self(gen)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Generation {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// The fixed 18-type table. Immutable reference data; `type_id` is the
/// 1-based ordinal and doubles as the `pokemon_type` row id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl PokemonType {
    pub const ALL: [PokemonType; 18] = [
        PokemonType::Normal,
        PokemonType::Fire,
        PokemonType::Water,
        PokemonType::Electric,
        PokemonType::Grass,
        PokemonType::Ice,
        PokemonType::Fighting,
        PokemonType::Poison,
        PokemonType::Ground,
        PokemonType::Flying,
        PokemonType::Psychic,
        PokemonType::Bug,
        PokemonType::Rock,
        PokemonType::Ghost,
        PokemonType::Dragon,
        PokemonType::Dark,
        PokemonType::Steel,
        PokemonType::Fairy,
    ];

    /// Stable 1-based row id.
    pub fn type_id(&self) -> TypeId {
        let ordinal = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        TypeId::new(ordinal as i64 + 1)
    }

    pub fn name(&self) -> &'static str {
        match self {
            PokemonType::Normal => "Normal",
            PokemonType::Fire => "Fire",
            PokemonType::Water => "Water",
            PokemonType::Electric => "Electric",
            PokemonType::Grass => "Grass",
            PokemonType::Ice => "Ice",
            PokemonType::Fighting => "Fighting",
            PokemonType::Poison => "Poison",
            PokemonType::Ground => "Ground",
            PokemonType::Flying => "Flying",
            PokemonType::Psychic => "Psychic",
            PokemonType::Bug => "Bug",
            PokemonType::Rock => "Rock",
            PokemonType::Ghost => "Ghost",
            PokemonType::Dragon => "Dragon",
            PokemonType::Dark => "Dark",
            PokemonType::Steel => "Steel",
            PokemonType::Fairy => "Fairy",
        }
    }

    /// Case-insensitive lookup against the fixed table.
    pub fn from_name(name: &str) -> Option<PokemonType> {
        let wanted = normalize_name(name);
        Self::ALL
            .iter()
            .copied()
            .find(|t| normalize_name(t.name()) == wanted)
    }
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PokemonType {
    type Err = DexError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| DexError::UnknownType {
            name: s.to_string(),
        })
    }
}

/// Damage category of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl MoveCategory {
    pub fn name(&self) -> &'static str {
        match self {
            MoveCategory::Physical => "Physical",
            MoveCategory::Special => "Special",
            MoveCategory::Status => "Status",
        }
    }
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for MoveCategory {
    type Err = DexError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_name(s).as_str() {
            "physical" => Ok(MoveCategory::Physical),
            "special" => Ok(MoveCategory::Special),
            "status" => Ok(MoveCategory::Status),
            _ => Err(DexError::UnknownCategory {
                name: s.to_string(),
            }),
        }
    }
}

/// The six base stats of a species.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    #[serde(rename = "atk")]
    pub attack: u16,
    #[serde(rename = "def")]
    pub defense: u16,
    #[serde(rename = "spa")]
    pub special_attack: u16,
    #[serde(rename = "spd")]
    pub special_defense: u16,
    #[serde(rename = "spe")]
    pub speed: u16,
}

impl BaseStats {
    pub fn total(&self) -> u16 {
        self.hp + self.attack + self.defense + self.special_attack + self.special_defense + self.speed
    }
}

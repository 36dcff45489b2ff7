//! Per-generation dataset extraction from the dex provider.

use super::learnset::resolve_learnset;
use crate::dex::{types::DexSpecies, DexProvider};
use crate::error::{DexError, Result};
use crate::types::{normalize_name, BaseStats, Generation, MoveCategory, PokemonType};
use log::warn;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::str::FromStr;

/// Provider entries named exactly this are the "no ability" sentinel.
const NO_ABILITY_SENTINEL: &str = "No Ability";

/// Worker pool size for per-species learnset resolution. Resolution is
/// read-only and independent per species; results are collected and written
/// single-threaded afterwards.
pub const LEARNSET_WORKERS: usize = 8;

/// Canonical ability record extracted for one generation.
#[derive(Debug, Clone)]
pub struct AbilityRaw {
    pub name: String,
    pub description: String,
}

/// Canonical move record extracted for one generation.
#[derive(Debug, Clone)]
pub struct MoveRaw {
    pub name: String,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    pub power: u16,
    pub accuracy: u16,
    pub priority: i8,
    pub pp: u16,
    pub description: String,
}

/// Canonical species record extracted for one generation, with both
/// learnset views attached.
#[derive(Debug, Clone)]
pub struct SpeciesMeta {
    pub name: String,
    pub dex_number: u32,
    pub base_stats: BaseStats,
    /// 1-2 defending types.
    pub types: Vec<PokemonType>,
    pub ability_names: Vec<String>,
    /// Moves learnable in this generation.
    pub move_names: BTreeSet<String>,
    /// Every move across the whole lineage regardless of generation tag;
    /// consumed only by the unified merge.
    pub full_move_names: BTreeSet<String>,
    pub height: f64,
    pub weight: f64,
}

/// Everything extracted for one generation.
#[derive(Debug, Clone)]
pub struct GenerationDataset {
    pub generation: Generation,
    pub abilities: Vec<AbilityRaw>,
    pub moves: Vec<MoveRaw>,
    pub species: Vec<SpeciesMeta>,
}

/// Extract the canonical ability/move/species records for `gen`.
///
/// Non-standard (banned/unreleased) entries and the "no ability" sentinel
/// are excluded. Moves whose type name does not match the fixed 18-type
/// table are dropped with a warning; extraction is best-effort.
pub fn build_generation(provider: &dyn DexProvider, gen: Generation) -> Result<GenerationDataset> {
    let abilities = provider
        .abilities_all(gen)?
        .into_iter()
        .filter(|a| {
            a.is_nonstandard.is_none()
                && normalize_name(&a.name) != normalize_name(NO_ABILITY_SENTINEL)
        })
        .map(|a| AbilityRaw {
            name: a.name,
            description: a.description,
        })
        .collect();

    let mut moves = Vec::new();
    for mv in provider.moves_all(gen)? {
        if mv.is_nonstandard.is_some() {
            continue;
        }
        let Some(move_type) = PokemonType::from_name(&mv.type_name) else {
            warn!("dropping move {} in gen {gen}: unknown type {}", mv.name, mv.type_name);
            continue;
        };
        let Ok(category) = MoveCategory::from_str(&mv.category) else {
            warn!("dropping move {} in gen {gen}: unknown category {}", mv.name, mv.category);
            continue;
        };
        moves.push(MoveRaw {
            name: mv.name,
            move_type,
            category,
            power: mv.power,
            accuracy: mv.accuracy,
            priority: mv.priority,
            pp: mv.pp,
            description: mv.description,
        });
    }

    let standard_species: Vec<DexSpecies> = provider
        .species_all(gen)?
        .into_iter()
        .filter(|s| s.is_nonstandard.is_none())
        .collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(LEARNSET_WORKERS)
        .build()
        .map_err(|e| DexError::Provider {
            message: format!("failed to build learnset worker pool: {e}"),
        })?;

    let species = pool.install(|| {
        standard_species
            .par_iter()
            .map(|s| build_species_meta(provider, gen, s))
            .collect::<Result<Vec<Option<SpeciesMeta>>>>()
    })?;

    Ok(GenerationDataset {
        generation: gen,
        abilities,
        moves,
        species: species.into_iter().flatten().collect(),
    })
}

fn build_species_meta(
    provider: &dyn DexProvider,
    gen: Generation,
    species: &DexSpecies,
) -> Result<Option<SpeciesMeta>> {
    let mut types = Vec::new();
    for type_name in &species.types {
        match PokemonType::from_name(type_name) {
            Some(t) => types.push(t),
            None => warn!("unknown type {type_name} on {} in gen {gen}", species.name),
        }
    }
    if types.is_empty() {
        warn!("dropping species {} in gen {gen}: no resolvable types", species.name);
        return Ok(None);
    }

    let ability_names: Vec<String> = species
        .abilities
        .values()
        .filter(|name| normalize_name(name) != normalize_name(NO_ABILITY_SENTINEL))
        .cloned()
        .collect();

    let resolved = resolve_learnset(provider, gen, species)?;

    Ok(Some(SpeciesMeta {
        name: species.name.clone(),
        dex_number: species.dex_number,
        base_stats: species.base_stats,
        types,
        ability_names,
        move_names: resolved.current,
        full_move_names: resolved.full,
        height: species.height,
        weight: species.weight,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dex::types::{DexAbility, DexMove, Learnset};

    struct StubProvider {
        species: Vec<DexSpecies>,
        moves: Vec<DexMove>,
        abilities: Vec<DexAbility>,
    }

    impl DexProvider for StubProvider {
        fn generations(&self) -> Vec<Generation> {
            vec![Generation::new(9)]
        }

        fn species_all(&self, _gen: Generation) -> Result<Vec<DexSpecies>> {
            Ok(self.species.clone())
        }

        fn moves_all(&self, _gen: Generation) -> Result<Vec<DexMove>> {
            Ok(self.moves.clone())
        }

        fn abilities_all(&self, _gen: Generation) -> Result<Vec<DexAbility>> {
            Ok(self.abilities.clone())
        }

        fn species_get(&self, _gen: Generation, dex_id: &str) -> Result<Option<DexSpecies>> {
            Ok(self.species.iter().find(|s| s.dex_id() == dex_id).cloned())
        }

        fn move_get(&self, _gen: Generation, dex_id: &str) -> Result<Option<DexMove>> {
            Ok(self.moves.iter().find(|m| m.dex_id() == dex_id).cloned())
        }

        fn learnset_get(&self, _gen: Generation, _dex_id: &str) -> Result<Option<Learnset>> {
            Ok(None)
        }
    }

    fn ability(name: &str, nonstandard: Option<&str>) -> DexAbility {
        DexAbility {
            name: name.to_string(),
            description: String::new(),
            is_nonstandard: nonstandard.map(str::to_string),
        }
    }

    fn dex_move(name: &str, type_name: &str, nonstandard: Option<&str>) -> DexMove {
        DexMove {
            name: name.to_string(),
            type_name: type_name.to_string(),
            category: "Physical".to_string(),
            power: 80,
            accuracy: 100,
            priority: 0,
            pp: 10,
            description: String::new(),
            is_nonstandard: nonstandard.map(str::to_string),
        }
    }

    fn dex_species(name: &str, types: &[&str], nonstandard: Option<&str>) -> DexSpecies {
        DexSpecies {
            name: name.to_string(),
            base_stats: BaseStats::default(),
            types: types.iter().map(|t| t.to_string()).collect(),
            abilities: [("0".to_string(), "Blaze".to_string())].into(),
            height: 1.0,
            weight: 10.0,
            dex_number: 1,
            prevo: None,
            changes_from: None,
            is_nonstandard: nonstandard.map(str::to_string),
        }
    }

    #[test]
    fn test_nonstandard_entries_are_excluded() {
        let provider = StubProvider {
            species: vec![
                dex_species("Torchic", &["Fire"], None),
                dex_species("Missingno", &["Normal"], Some("Custom")),
            ],
            moves: vec![
                dex_move("Tackle", "Normal", None),
                dex_move("Banned Move", "Normal", Some("CAP")),
            ],
            abilities: vec![ability("Blaze", None), ability("Unreleased", Some("Unobtainable"))],
        };

        let dataset = build_generation(&provider, Generation::new(9)).unwrap();
        assert_eq!(dataset.species.len(), 1);
        assert_eq!(dataset.species[0].name, "Torchic");
        assert_eq!(dataset.moves.len(), 1);
        assert_eq!(dataset.abilities.len(), 1);
    }

    #[test]
    fn test_no_ability_sentinel_is_excluded() {
        let provider = StubProvider {
            species: Vec::new(),
            moves: Vec::new(),
            abilities: vec![ability("No Ability", None), ability("Levitate", None)],
        };

        let dataset = build_generation(&provider, Generation::new(9)).unwrap();
        assert_eq!(dataset.abilities.len(), 1);
        assert_eq!(dataset.abilities[0].name, "Levitate");
    }

    #[test]
    fn test_sentinel_matching_is_case_insensitive() {
        let mut species = dex_species("Torchic", &["Fire"], None);
        species.abilities = [("0".to_string(), "no ability".to_string())].into();

        let provider = StubProvider {
            species: vec![species],
            moves: Vec::new(),
            abilities: vec![ability("NO ABILITY", None)],
        };

        let dataset = build_generation(&provider, Generation::new(9)).unwrap();
        assert!(dataset.abilities.is_empty());
        assert!(dataset.species[0].ability_names.is_empty());
    }

    #[test]
    fn test_unmatched_move_type_is_silently_dropped() {
        let provider = StubProvider {
            species: Vec::new(),
            moves: vec![
                dex_move("Tackle", "Normal", None),
                dex_move("Shadow Blast", "Shadow", None),
            ],
            abilities: Vec::new(),
        };

        let dataset = build_generation(&provider, Generation::new(9)).unwrap();
        assert_eq!(dataset.moves.len(), 1);
        assert_eq!(dataset.moves[0].name, "Tackle");
    }

    #[test]
    fn test_type_names_match_case_insensitively() {
        let provider = StubProvider {
            species: vec![dex_species("Gyarados", &["water", "FLYING"], None)],
            moves: Vec::new(),
            abilities: Vec::new(),
        };

        let dataset = build_generation(&provider, Generation::new(9)).unwrap();
        assert_eq!(
            dataset.species[0].types,
            vec![PokemonType::Water, PokemonType::Flying]
        );
    }
}

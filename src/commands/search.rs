//! Search command: query the persisted dataset with conjunctive filters.

use super::open_database;
use crate::cli::SearchFilters;
use crate::error::{DexError, Result};
use crate::storage::search::{PageRequest, SortDirection, SortField, SortSpec, SpeciesFilter};
use crate::storage::DexDatabase;
use crate::types::{Generation, PokemonType, TypeId};
use std::path::PathBuf;

/// Parameters for the search command.
pub struct SearchParams {
    pub filters: SearchFilters,
    pub db: Option<PathBuf>,
    pub as_json: bool,
    pub sort_by: Option<SortField>,
    pub descending: bool,
    pub page: u32,
    pub page_size: u32,
}

pub fn handle_search(params: SearchParams) -> Result<()> {
    let db = open_database(params.db.as_deref())?;
    let filter = build_filter(&db, &params.filters)?;

    let sort = params.sort_by.map(|field| SortSpec {
        field,
        direction: if params.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
    });
    let page = PageRequest {
        page: params.page,
        page_size: params.page_size,
    };

    let results = db.search(&filter, page, sort)?;

    if params.as_json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for row in &results.data {
            println!(
                "#{:04} {} (gen {}) hp:{} atk:{} def:{} spa:{} spd:{} spe:{} total:{}",
                row.dex_number,
                row.name,
                row.generation,
                row.hp,
                row.attack,
                row.defense,
                row.special_attack,
                row.special_defense,
                row.speed,
                row.total
            );
        }
        println!(
            "page {}/{} ({} total)",
            results.page, results.total_pages, results.total
        );
    }

    Ok(())
}

/// Translate CLI filter flags into the engine's id-based filter.
///
/// Name-based ability/move/category flags resolve against one generation:
/// the single `--generation` value when given, otherwise the unified
/// generation. An unresolvable name is an error rather than a silently
/// widened result set.
fn build_filter(db: &DexDatabase, filters: &SearchFilters) -> Result<SpeciesFilter> {
    let mut filter = SpeciesFilter {
        name: filters.name.clone(),
        min_hp: filters.min_hp,
        max_hp: filters.max_hp,
        min_attack: filters.min_attack,
        max_attack: filters.max_attack,
        min_defense: filters.min_defense,
        max_defense: filters.max_defense,
        min_special_attack: filters.min_special_attack,
        max_special_attack: filters.max_special_attack,
        min_special_defense: filters.min_special_defense,
        max_special_defense: filters.max_special_defense,
        min_speed: filters.min_speed,
        max_speed: filters.max_speed,
        min_physical_bulk: filters.min_physical_bulk,
        max_physical_bulk: filters.max_physical_bulk,
        min_special_bulk: filters.min_special_bulk,
        max_special_bulk: filters.max_special_bulk,
        pokemon_type_ids: type_ids(&filters.types),
        generation_ids: filters.generations.clone(),
        weak_pokemon_type_ids: type_ids(&filters.weak_to),
        resist_pokemon_type_ids: type_ids(&filters.resists),
        immune_pokemon_type_ids: type_ids(&filters.immune_to),
        not_weak_pokemon_type_ids: type_ids(&filters.not_weak_to),
        ..Default::default()
    };

    let needs_resolution = !filters.abilities.is_empty()
        || !filters.moves.is_empty()
        || !filters.categories.is_empty();
    if !needs_resolution {
        return Ok(filter);
    }

    let target_gen = resolve_target_generation(db, &filters.generations)?;

    for name in &filters.abilities {
        let id = db
            .ability_id(name, target_gen)?
            .ok_or_else(|| DexError::NotFound {
                kind: "ability",
                name: name.clone(),
            })?;
        filter.ability_ids.push(id);
    }
    for name in &filters.moves {
        let id = db.move_id(name, target_gen)?.ok_or_else(|| DexError::NotFound {
            kind: "move",
            name: name.clone(),
        })?;
        filter.move_ids.push(id);
    }
    for name in &filters.categories {
        let id = db.category_id(name)?.ok_or_else(|| DexError::NotFound {
            kind: "special move category",
            name: name.clone(),
        })?;
        filter.special_move_category_ids.push(id);
    }

    Ok(filter)
}

fn resolve_target_generation(db: &DexDatabase, generations: &[u8]) -> Result<Generation> {
    match generations {
        [single] => Ok(Generation::new(*single)),
        [] => db.unified_generation()?.ok_or(DexError::Storage {
            message: "dataset not initialized; run `draftdex init` first".to_string(),
        }),
        _ => Err(DexError::Storage {
            message: "name-based filters require at most one --generation".to_string(),
        }),
    }
}

fn type_ids(types: &[PokemonType]) -> Vec<TypeId> {
    types.iter().map(|t| t.type_id()).collect()
}

//! Relation linking: resolve name-based cross references into join rows
//! and store the computed effectiveness matrix.
//!
//! Runs after species/ability/move rows have assigned ids. Name lookups go
//! through `lowercase(name)|generation` maps built once from the persisted
//! rows; unresolved names are logged and skipped.

use super::dataset::GenerationDataset;
use crate::chart;
use crate::error::Result;
use crate::storage::models::TypeEffectiveRow;
use crate::storage::queries::name_gen_key;
use crate::storage::DexDatabase;
use crate::types::{CategoryId, PokemonType};
use log::warn;

/// Fixed tag table for special move categories, matched by move name.
pub const SPECIAL_MOVE_CATEGORIES: [(&str, &[&str]); 5] = [
    (
        "Hazard",
        &["Stealth Rock", "Spikes", "Toxic Spikes", "Sticky Web", "Stone Axe", "Ceaseless Edge"],
    ),
    (
        "Hazard Removal",
        &["Rapid Spin", "Defog", "Mortal Spin", "Tidy Up", "Court Change"],
    ),
    (
        "Momentum",
        &["U-turn", "Volt Switch", "Flip Turn", "Parting Shot", "Teleport", "Baton Pass", "Shed Tail", "Chilly Reception"],
    ),
    (
        "Priority",
        &["Quick Attack", "Extreme Speed", "Aqua Jet", "Bullet Punch", "Mach Punch", "Ice Shard", "Shadow Sneak", "Sucker Punch", "Accelerock", "Grassy Glide", "Jet Punch", "Vacuum Wave"],
    ),
    (
        "Recovery",
        &["Recover", "Roost", "Soft-Boiled", "Synthesis", "Moonlight", "Morning Sun", "Slack Off", "Shore Up", "Milk Drink", "Strength Sap", "Wish", "Rest"],
    ),
];

/// Row counts produced by the linking phase.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinkReport {
    pub type_links: usize,
    pub ability_links: usize,
    pub move_links: usize,
    pub category_links: usize,
    pub effectiveness_rows: usize,
}

/// Resolve every species' recorded type/ability/move names into join rows,
/// tag moves with their special categories, then store one effectiveness
/// entry per (species, attacking type).
pub fn link_relations(db: &mut DexDatabase, datasets: &[GenerationDataset]) -> Result<LinkReport> {
    let ability_ids = db.ability_id_map()?;
    let move_ids = db.move_id_map()?;
    let pokemon_ids = db.pokemon_id_map()?;

    let mut type_links = Vec::new();
    let mut ability_links = Vec::new();
    let mut move_links = Vec::new();
    let mut effectiveness = Vec::new();

    for dataset in datasets {
        let gen = dataset.generation;

        for meta in &dataset.species {
            let Some(pokemon_id) = pokemon_ids.get(&name_gen_key(&meta.name, gen)) else {
                warn!("species {} not persisted for gen {gen}; skipping links", meta.name);
                continue;
            };

            for pokemon_type in &meta.types {
                type_links.push((*pokemon_id, pokemon_type.type_id()));
            }

            for ability_name in &meta.ability_names {
                match ability_ids.get(&name_gen_key(ability_name, gen)) {
                    Some(ability_id) => ability_links.push((*pokemon_id, *ability_id)),
                    None => warn!("ability {ability_name} unresolved for gen {gen}; skipping"),
                }
            }

            for move_name in &meta.move_names {
                match move_ids.get(&name_gen_key(move_name, gen)) {
                    Some(move_id) => move_links.push((*pokemon_id, *move_id)),
                    None => warn!("move {move_name} unresolved for gen {gen}; skipping"),
                }
            }

            for attacking in PokemonType::ALL {
                effectiveness.push(TypeEffectiveRow {
                    pokemon_id: *pokemon_id,
                    pokemon_type_id: attacking.type_id(),
                    value: chart::effectiveness(attacking, &meta.types, &meta.ability_names),
                });
            }
        }
    }

    let mut category_links = Vec::new();
    for (index, (_, move_names)) in SPECIAL_MOVE_CATEGORIES.iter().enumerate() {
        let category_id = CategoryId::new(index as i64 + 1);
        for dataset in datasets {
            for move_name in *move_names {
                if let Some(move_id) = move_ids.get(&name_gen_key(move_name, dataset.generation)) {
                    category_links.push((*move_id, category_id));
                }
            }
        }
    }

    let report = LinkReport {
        type_links: db.insert_pokemon_type_links(&type_links)?,
        ability_links: db.insert_pokemon_ability_links(&ability_links)?,
        move_links: db.insert_pokemon_move_links(&move_links)?,
        category_links: db.insert_move_category_links(&category_links)?,
        effectiveness_rows: db.insert_type_effectiveness(&effectiveness)?,
    };

    Ok(report)
}

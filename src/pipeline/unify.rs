//! Unified-generation merge: fold every per-generation dataset into one
//! deduplicated superset under a synthetic generation id.

use super::dataset::{GenerationDataset, SpeciesMeta};
use crate::types::{normalize_name, Generation};
use std::collections::BTreeMap;

/// Name suffix markers that identify alternate forms. Stripping the marker
/// (and everything after it) yields the base-form name.
pub const FORM_MARKERS: [&str; 8] = [
    "-Mega", "-Gmax", "-Alola", "-Galar", "-Hisui", "-Paldea", "-Therian", "-Origin",
];

/// Base-form name for an alternate form, or `None` when the name carries no
/// recognized marker.
pub fn base_form_name(name: &str) -> Option<&str> {
    FORM_MARKERS
        .iter()
        .find_map(|marker| name.find(marker).map(|pos| &name[..pos]))
}

/// Merge all per-generation datasets into the synthetic unified generation.
///
/// For abilities, moves and species independently: iterate generations in
/// ascending order inserting into a name-keyed map, so the surviving value
/// for any name comes from its highest generation of occurrence. Species
/// carry their full (ungapped) move set into the unified view.
///
/// Alternate forms frequently do not persist into the newest generations
/// and would otherwise carry a stale learnset, so a species whose name
/// matches a form marker inherits the unified move set of its base form.
pub fn merge_unified(datasets: &[GenerationDataset], unified: Generation) -> GenerationDataset {
    let mut ordered: Vec<&GenerationDataset> = datasets.iter().collect();
    ordered.sort_by_key(|d| d.generation);

    let mut abilities = BTreeMap::new();
    let mut moves = BTreeMap::new();
    let mut species: BTreeMap<String, SpeciesMeta> = BTreeMap::new();

    for dataset in ordered {
        for ability in &dataset.abilities {
            abilities.insert(normalize_name(&ability.name), ability.clone());
        }
        for mv in &dataset.moves {
            moves.insert(normalize_name(&mv.name), mv.clone());
        }
        for meta in &dataset.species {
            let mut unified_meta = meta.clone();
            unified_meta.move_names = meta.full_move_names.clone();
            species.insert(normalize_name(&meta.name), unified_meta);
        }
    }

    let inherited: Vec<(String, _)> = species
        .values()
        .filter_map(|meta| {
            let base = base_form_name(&meta.name)?;
            let base_moves = species.get(&normalize_name(base))?.move_names.clone();
            Some((normalize_name(&meta.name), base_moves))
        })
        .collect();
    for (key, base_moves) in inherited {
        if let Some(meta) = species.get_mut(&key) {
            meta.move_names = base_moves.clone();
            meta.full_move_names = base_moves;
        }
    }

    GenerationDataset {
        generation: unified,
        abilities: abilities.into_values().collect(),
        moves: moves.into_values().collect(),
        species: species.into_values().collect(),
    }
}

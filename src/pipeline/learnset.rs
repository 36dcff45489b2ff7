//! Learnset resolution: which moves a species can learn, derived by walking
//! its alternate-form/pre-evolution lineage.

use crate::dex::types::{to_dex_id, DexSpecies, Learnset};
use crate::dex::DexProvider;
use crate::error::Result;
use crate::types::Generation;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Two views over one accumulated learnset.
#[derive(Debug, Clone, Default)]
pub struct ResolvedMoves {
    /// Moves with at least one source tag from the target generation.
    pub current: BTreeSet<String>,
    /// Every move in the accumulated map regardless of tag; feeds the
    /// unified dataset only.
    pub full: BTreeSet<String>,
}

/// Resolve the move pool of `species` in `gen`.
///
/// Alternate forms redirect to their base form first (forms share learnset
/// data), then the pre-evolution chain is walked, accumulating every
/// learnset entry along the way. Unresolvable move or species ids are
/// skipped; dataset construction is best-effort.
pub fn resolve_learnset(
    provider: &dyn DexProvider,
    gen: Generation,
    species: &DexSpecies,
) -> Result<ResolvedMoves> {
    let mut accumulated: BTreeMap<String, Vec<String>> = BTreeMap::new();

    let mut cursor = Some(redirect_to_base_form(provider, gen, species)?);
    while let Some(current) = cursor {
        if let Some(learnset) = provider.learnset_get(gen, &current.dex_id())? {
            for (move_id, tags) in learnset {
                accumulated.entry(move_id).or_default().extend(tags);
            }
        } else {
            debug!("no learnset for {} in gen {gen}", current.name);
        }

        cursor = match &current.prevo {
            Some(prevo) => {
                let prevo_id = to_dex_id(prevo);
                match provider.species_get(gen, &prevo_id)? {
                    Some(s) => Some(s),
                    None => {
                        debug!("pre-evolution {prevo} of {} not found in gen {gen}", current.name);
                        None
                    }
                }
            }
            None => None,
        };
    }

    let gen_digit = char::from_digit(gen.as_u8() as u32, 10);
    let mut resolved = ResolvedMoves::default();

    for (move_id, tags) in &accumulated {
        let Some(mv) = provider.move_get(gen, move_id)? else {
            debug!("learnset move id {move_id} not resolvable in gen {gen}");
            continue;
        };

        resolved.full.insert(mv.name.clone());
        if tags.iter().any(|tag| tag.chars().next() == gen_digit) {
            resolved.current.insert(mv.name);
        }
    }

    Ok(resolved)
}

fn redirect_to_base_form(
    provider: &dyn DexProvider,
    gen: Generation,
    species: &DexSpecies,
) -> Result<DexSpecies> {
    let Some(base_name) = &species.changes_from else {
        return Ok(species.clone());
    };

    match provider.species_get(gen, &to_dex_id(base_name))? {
        Some(base) => Ok(base),
        None => {
            debug!("base form {base_name} of {} not found in gen {gen}", species.name);
            Ok(species.clone())
        }
    }
}

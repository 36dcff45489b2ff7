//! The dataset synthesis pipeline.
//!
//! A sequential multi-phase batch job with a strict precedence order:
//! generations, then reference tables, then abilities/moves/species (which
//! need generation rows), then relations (which need assigned entity ids).
//! [`PHASES`] is the single source of that ordering.
//!
//! The pipeline is not safe to run concurrently with itself: a second
//! invocation double-inserts rows, and the uniqueness constraints abort it.
//! The safe-rerun procedure is wipe all, then rerun.

pub mod dataset;
pub mod learnset;
pub mod link;
pub mod unify;

use crate::dex::DexProvider;
use crate::error::{DexError, Result};
use crate::storage::DexDatabase;
use crate::types::Generation;
use dataset::{build_generation, GenerationDataset};
use link::{link_relations, LinkReport, SPECIAL_MOVE_CATEGORIES};
use log::info;
use std::fmt;
use unify::merge_unified;

/// Named pipeline phases, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Generations,
    Types,
    Categories,
    Abilities,
    Moves,
    Species,
    Relations,
}

/// The fixed phase order. Do not reorder: each phase's preconditions are
/// satisfied by the ones before it (relations require persisted ids).
pub const PHASES: [Phase; 7] = [
    Phase::Generations,
    Phase::Types,
    Phase::Categories,
    Phase::Abilities,
    Phase::Moves,
    Phase::Species,
    Phase::Relations,
];

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Generations => "generations",
            Phase::Types => "types",
            Phase::Categories => "categories",
            Phase::Abilities => "abilities",
            Phase::Moves => "moves",
            Phase::Species => "species",
            Phase::Relations => "relations",
        };
        write!(f, "{name}")
    }
}

/// Row counts from one pipeline run.
#[derive(Debug, Default, Clone, Copy)]
pub struct PipelineReport {
    pub generations: usize,
    pub types: usize,
    pub categories: usize,
    pub abilities: usize,
    pub moves: usize,
    pub species: usize,
    pub links: LinkReport,
}

/// Build and persist the whole reference dataset in one batch run.
///
/// Expects an empty dataset; rerunning without a prior wipe fails on the
/// name+generation uniqueness constraints and aborts (no partial-commit
/// recovery).
pub fn initialize_dataset(
    provider: &dyn DexProvider,
    db: &mut DexDatabase,
) -> Result<PipelineReport> {
    let generations = provider.generations();
    validate_generations(&generations)?;

    let unified = Generation::new(generations.last().map(|g| g.as_u8()).unwrap_or(0) + 1);

    let mut datasets: Vec<GenerationDataset> = Vec::with_capacity(generations.len() + 1);
    for gen in &generations {
        info!("extracting generation {gen}");
        datasets.push(build_generation(provider, *gen)?);
    }
    datasets.push(merge_unified(&datasets, unified));

    let mut report = PipelineReport::default();
    for phase in PHASES {
        info!("running phase: {phase}");
        match phase {
            Phase::Generations => {
                report.generations = db.insert_generations(&generations, unified)?;
            }
            Phase::Types => {
                report.types = db.insert_pokemon_types()?;
            }
            Phase::Categories => {
                let names: Vec<&str> = SPECIAL_MOVE_CATEGORIES.iter().map(|(n, _)| *n).collect();
                report.categories = db.insert_special_move_categories(&names)?;
            }
            Phase::Abilities => {
                for dataset in &datasets {
                    report.abilities += db.insert_abilities(dataset)?;
                }
            }
            Phase::Moves => {
                for dataset in &datasets {
                    report.moves += db.insert_moves(dataset)?;
                }
            }
            Phase::Species => {
                for dataset in &datasets {
                    report.species += db.insert_pokemon(dataset)?;
                }
            }
            Phase::Relations => {
                report.links = link_relations(db, &datasets)?;
            }
        }
    }

    info!(
        "dataset initialized: {} species, {} moves, {} abilities across {} generations (+unified)",
        report.species,
        report.moves,
        report.abilities,
        generations.len()
    );

    Ok(report)
}

/// Generation ids must be contiguous 1..N so the unified id N+1 is stable.
fn validate_generations(generations: &[Generation]) -> Result<()> {
    if generations.is_empty() {
        return Err(DexError::Provider {
            message: "provider reports no generations".to_string(),
        });
    }
    for (index, gen) in generations.iter().enumerate() {
        if gen.as_u8() != index as u8 + 1 {
            return Err(DexError::Provider {
                message: format!(
                    "generation ids must be contiguous from 1, found {gen} at position {index}"
                ),
            });
        }
    }
    Ok(())
}

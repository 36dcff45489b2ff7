//! CLI argument definitions and parsing structures.

use crate::storage::search::SortField;
use crate::types::PokemonType;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Filter arguments for the search command. All dimensions are optional
/// and conjunctive; list flags are repeatable and require the species to
/// possess every listed value.
#[derive(Debug, Args)]
pub struct SearchFilters {
    /// Filter by name (case-insensitive substring match).
    #[clap(long, short = 'n')]
    pub name: Option<String>,

    #[clap(long)]
    pub min_hp: Option<u16>,
    #[clap(long)]
    pub max_hp: Option<u16>,
    #[clap(long)]
    pub min_attack: Option<u16>,
    #[clap(long)]
    pub max_attack: Option<u16>,
    #[clap(long)]
    pub min_defense: Option<u16>,
    #[clap(long)]
    pub max_defense: Option<u16>,
    #[clap(long)]
    pub min_special_attack: Option<u16>,
    #[clap(long)]
    pub max_special_attack: Option<u16>,
    #[clap(long)]
    pub min_special_defense: Option<u16>,
    #[clap(long)]
    pub max_special_defense: Option<u16>,
    #[clap(long)]
    pub min_speed: Option<u16>,
    #[clap(long)]
    pub max_speed: Option<u16>,

    /// Minimum physical bulk (hp + defense).
    #[clap(long)]
    pub min_physical_bulk: Option<u16>,
    #[clap(long)]
    pub max_physical_bulk: Option<u16>,

    /// Minimum special bulk (hp + special defense).
    #[clap(long)]
    pub min_special_bulk: Option<u16>,
    #[clap(long)]
    pub max_special_bulk: Option<u16>,

    /// Require every listed defending type (repeatable): `-t fire -t flying`.
    #[clap(short = 't', long = "type")]
    pub types: Vec<PokemonType>,

    /// Require every listed ability, by name (repeatable).
    #[clap(long = "ability")]
    pub abilities: Vec<String>,

    /// Require every listed move, by name (repeatable).
    #[clap(long = "move")]
    pub moves: Vec<String>,

    /// Require a move in every listed special category, by name (repeatable).
    #[clap(long = "category")]
    pub categories: Vec<String>,

    /// Require every listed generation id (a species belongs to exactly
    /// one). Name-based filters resolve against the single given
    /// generation, or the unified generation when none is given.
    #[clap(short = 'g', long = "generation")]
    pub generations: Vec<u8>,

    /// Weak to every listed attacking type (stored multiplier > 1).
    #[clap(long = "weak-to")]
    pub weak_to: Vec<PokemonType>,

    /// Resists every listed attacking type (stored multiplier < 1).
    #[clap(long = "resists")]
    pub resists: Vec<PokemonType>,

    /// Immune to every listed attacking type (stored multiplier = 0).
    #[clap(long = "immune-to")]
    pub immune_to: Vec<PokemonType>,

    /// Not weak to any listed attacking type (stored multiplier <= 1).
    #[clap(long = "not-weak-to")]
    pub not_weak_to: Vec<PokemonType>,
}

#[derive(Debug, Parser)]
#[clap(name = "draftdex", about = "Pokemon reference-dataset synthesis and search")]
pub struct Draftdex {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Synthesize the reference dataset from per-generation dex dumps.
    ///
    /// Runs the full batch pipeline (generations, types, categories,
    /// abilities, moves, species, relations) against an empty dataset.
    /// Rerunning without `--wipe` fails on uniqueness constraints.
    Init {
        /// Directory containing gen1.json..genN.json provider dumps.
        #[clap(long)]
        data_dir: PathBuf,

        /// Database path (defaults to the user cache dir).
        #[clap(long)]
        db: Option<PathBuf>,

        /// Wipe any existing dataset before building.
        #[clap(long)]
        wipe: bool,

        /// Print per-phase row counts when done.
        #[clap(long)]
        verbose: bool,
    },

    /// Search species with conjunctive filters.
    ///
    /// Paginated and sortable; outputs text lines or JSON.
    Search {
        #[clap(flatten)]
        filters: SearchFilters,

        /// Database path (defaults to the user cache dir).
        #[clap(long)]
        db: Option<PathBuf>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,

        /// Sort field (must be one of the allowed fields).
        #[clap(long)]
        sort_by: Option<SortField>,

        /// Sort descending instead of ascending.
        #[clap(long)]
        desc: bool,

        /// 1-based page number.
        #[clap(long, default_value_t = 1)]
        page: u32,

        /// Page size.
        #[clap(long, default_value_t = 20)]
        page_size: u32,
    },

    /// Delete every dataset row (the safe-rerun procedure).
    Wipe {
        /// Database path (defaults to the user cache dir).
        #[clap(long)]
        db: Option<PathBuf>,
    },
}

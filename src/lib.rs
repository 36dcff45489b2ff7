//! Pokemon Reference-Dataset Synthesis and Search Library
//!
//! A Rust library and CLI that ingests per-generation species/move/ability
//! data from a dex provider, merges it across generations into a
//! deduplicated "unified" superset, computes a full type-effectiveness
//! matrix per species, and answers paginated multi-criteria searches over
//! the persisted dataset.
//!
//! ## Features
//!
//! - **Per-Generation Extraction**: Canonical ability/move/species records
//!   per generation, excluding banned/unreleased entries
//! - **Learnset Resolution**: Move pools derived by walking alternate-form
//!   and pre-evolution lineage, parallelized per species
//! - **Unified Merge**: Latest-wins dedup across generations, with
//!   alternate-form move-set inheritance
//! - **Effectiveness Matrix**: One stored multiplier per species and
//!   attacking type, combining dual typing and ability modifiers
//! - **Filter Engine**: Conjunctive stat-range, membership-ALL and
//!   effectiveness-class predicates with pagination and a sort allow-list
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use draftdex::{
//!     pipeline::initialize_dataset,
//!     dex::json::JsonDexProvider,
//!     storage::{DexDatabase, PageRequest, SpeciesFilter},
//! };
//!
//! # fn example() -> draftdex::Result<()> {
//! let provider = JsonDexProvider::from_dir(std::path::Path::new("data"))?;
//! let mut db = DexDatabase::new_in_memory()?;
//! initialize_dataset(&provider, &mut db)?;
//!
//! let filter = SpeciesFilter {
//!     min_hp: Some(100),
//!     ..Default::default()
//! };
//! let page = db.search(&filter, PageRequest::default(), None)?;
//! println!("{} species match", page.total);
//! # Ok(())
//! # }
//! ```

pub mod chart;
pub mod cli;
pub mod commands;
pub mod dex;
pub mod error;
pub mod pipeline;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{DexError, Result};
pub use storage::{DexDatabase, PageRequest, SearchPage, SortField, SpeciesFilter};
pub use types::{BaseStats, Generation, MoveCategory, PokemonType};

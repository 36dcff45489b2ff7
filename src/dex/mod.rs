//! External dex data source layer.
//!
//! The synthesis pipeline only sees [`DexProvider`], an injected read-only
//! capability over per-generation species/move/ability data. Production use
//! goes through [`json::JsonDexProvider`]; tests inject deterministic fakes.

pub mod json;
pub mod types;

use crate::error::Result;
use crate::types::Generation;
use types::{DexAbility, DexMove, DexSpecies, Learnset};

/// Versioned read-only dex lookup, queried independently per generation.
///
/// Lookups by internal dex id return `Ok(None)` on a miss; callers treat
/// misses as best-effort skips. Provider failures (IO, parse) are errors
/// and propagate unmodified.
pub trait DexProvider: Sync {
    /// The real generations this provider covers, ascending.
    fn generations(&self) -> Vec<Generation>;

    fn species_all(&self, gen: Generation) -> Result<Vec<DexSpecies>>;

    fn moves_all(&self, gen: Generation) -> Result<Vec<DexMove>>;

    fn abilities_all(&self, gen: Generation) -> Result<Vec<DexAbility>>;

    fn species_get(&self, gen: Generation, dex_id: &str) -> Result<Option<DexSpecies>>;

    fn move_get(&self, gen: Generation, dex_id: &str) -> Result<Option<DexMove>>;

    fn learnset_get(&self, gen: Generation, dex_id: &str) -> Result<Option<Learnset>>;
}

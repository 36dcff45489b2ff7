//! File-backed dex provider: one `gen{N}.json` dump per generation.

use super::types::{DexAbility, DexMove, DexSpecies, Learnset};
use super::DexProvider;
use crate::error::{DexError, Result};
use crate::types::Generation;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// On-disk payload for one generation.
#[derive(Debug, Deserialize)]
struct GenerationFile {
    #[serde(default)]
    species: Vec<DexSpecies>,
    #[serde(default)]
    moves: Vec<DexMove>,
    #[serde(default)]
    abilities: Vec<DexAbility>,
    /// Species dex id -> learnset.
    #[serde(default)]
    learnsets: BTreeMap<String, Learnset>,
}

struct GenerationData {
    species: Vec<DexSpecies>,
    moves: Vec<DexMove>,
    abilities: Vec<DexAbility>,
    learnsets: BTreeMap<String, Learnset>,
    species_index: HashMap<String, usize>,
    move_index: HashMap<String, usize>,
}

/// Dex provider backed by a directory of `gen1.json`..`genN.json` files.
///
/// All files are parsed eagerly at construction so every later query is an
/// in-memory lookup; the pipeline can then query generations repeatedly and
/// in parallel.
pub struct JsonDexProvider {
    generations: BTreeMap<u8, GenerationData>,
}

impl JsonDexProvider {
    /// Load every `gen{N}.json` file found in `data_dir`.
    pub fn from_dir(data_dir: &Path) -> Result<Self> {
        let mut generations = BTreeMap::new();

        for entry in fs::read_dir(data_dir)? {
            let path = entry?.path();
            let Some(gen) = generation_from_file_name(&path) else {
                continue;
            };

            let raw = fs::read_to_string(&path)?;
            let file: GenerationFile = serde_json::from_str(&raw)?;
            generations.insert(gen, GenerationData::from_file(file));
        }

        if generations.is_empty() {
            return Err(DexError::Provider {
                message: format!("no gen*.json files found in {}", data_dir.display()),
            });
        }

        Ok(Self { generations })
    }

    fn generation(&self, gen: Generation) -> Result<&GenerationData> {
        self.generations
            .get(&gen.as_u8())
            .ok_or(DexError::MissingGeneration {
                generation: gen.as_u8(),
            })
    }
}

impl GenerationData {
    fn from_file(file: GenerationFile) -> Self {
        let species_index = file
            .species
            .iter()
            .enumerate()
            .map(|(i, s)| (s.dex_id(), i))
            .collect();
        let move_index = file
            .moves
            .iter()
            .enumerate()
            .map(|(i, m)| (m.dex_id(), i))
            .collect();

        Self {
            species: file.species,
            moves: file.moves,
            abilities: file.abilities,
            learnsets: file.learnsets,
            species_index,
            move_index,
        }
    }
}

fn generation_from_file_name(path: &Path) -> Option<u8> {
    let name = path.file_name()?.to_str()?;
    let number = name.strip_prefix("gen")?.strip_suffix(".json")?;
    number.parse().ok()
}

impl DexProvider for JsonDexProvider {
    fn generations(&self) -> Vec<Generation> {
        self.generations.keys().map(|g| Generation::new(*g)).collect()
    }

    fn species_all(&self, gen: Generation) -> Result<Vec<DexSpecies>> {
        Ok(self.generation(gen)?.species.clone())
    }

    fn moves_all(&self, gen: Generation) -> Result<Vec<DexMove>> {
        Ok(self.generation(gen)?.moves.clone())
    }

    fn abilities_all(&self, gen: Generation) -> Result<Vec<DexAbility>> {
        Ok(self.generation(gen)?.abilities.clone())
    }

    fn species_get(&self, gen: Generation, dex_id: &str) -> Result<Option<DexSpecies>> {
        let data = self.generation(gen)?;
        Ok(data
            .species_index
            .get(dex_id)
            .map(|i| data.species[*i].clone()))
    }

    fn move_get(&self, gen: Generation, dex_id: &str) -> Result<Option<DexMove>> {
        let data = self.generation(gen)?;
        Ok(data.move_index.get(dex_id).map(|i| data.moves[*i].clone()))
    }

    fn learnset_get(&self, gen: Generation, dex_id: &str) -> Result<Option<Learnset>> {
        Ok(self.generation(gen)?.learnsets.get(dex_id).cloned())
    }
}

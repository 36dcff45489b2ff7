//! Shared fixtures: a deterministic fake dex provider covering two
//! generations, and a helper that runs the full pipeline into an
//! in-memory database.

// Not every test binary uses every helper.
#![allow(dead_code)]

use draftdex::dex::types::{DexAbility, DexMove, DexSpecies, Learnset};
use draftdex::dex::DexProvider;
use draftdex::error::Result;
use draftdex::pipeline::{initialize_dataset, PipelineReport};
use draftdex::storage::DexDatabase;
use draftdex::types::{BaseStats, Generation};
use std::collections::BTreeMap;

pub struct World {
    pub species: Vec<DexSpecies>,
    pub moves: Vec<DexMove>,
    pub abilities: Vec<DexAbility>,
    pub learnsets: BTreeMap<String, Learnset>,
}

pub struct FakeProvider {
    pub gens: BTreeMap<u8, World>,
}

impl DexProvider for FakeProvider {
    fn generations(&self) -> Vec<Generation> {
        self.gens.keys().map(|g| Generation::new(*g)).collect()
    }

    fn species_all(&self, gen: Generation) -> Result<Vec<DexSpecies>> {
        Ok(self.world(gen).species.clone())
    }

    fn moves_all(&self, gen: Generation) -> Result<Vec<DexMove>> {
        Ok(self.world(gen).moves.clone())
    }

    fn abilities_all(&self, gen: Generation) -> Result<Vec<DexAbility>> {
        Ok(self.world(gen).abilities.clone())
    }

    fn species_get(&self, gen: Generation, dex_id: &str) -> Result<Option<DexSpecies>> {
        Ok(self
            .world(gen)
            .species
            .iter()
            .find(|s| s.dex_id() == dex_id)
            .cloned())
    }

    fn move_get(&self, gen: Generation, dex_id: &str) -> Result<Option<DexMove>> {
        Ok(self
            .world(gen)
            .moves
            .iter()
            .find(|m| m.dex_id() == dex_id)
            .cloned())
    }

    fn learnset_get(&self, gen: Generation, dex_id: &str) -> Result<Option<Learnset>> {
        Ok(self.world(gen).learnsets.get(dex_id).cloned())
    }
}

impl FakeProvider {
    fn world(&self, gen: Generation) -> &World {
        self.gens
            .get(&gen.as_u8())
            .unwrap_or_else(|| panic!("fake provider has no generation {gen}"))
    }
}

pub fn species(
    name: &str,
    dex_number: u32,
    stats: [u16; 6],
    types: &[&str],
    abilities: &[&str],
) -> DexSpecies {
    DexSpecies {
        name: name.to_string(),
        base_stats: BaseStats {
            hp: stats[0],
            attack: stats[1],
            defense: stats[2],
            special_attack: stats[3],
            special_defense: stats[4],
            speed: stats[5],
        },
        types: types.iter().map(|t| t.to_string()).collect(),
        abilities: abilities
            .iter()
            .enumerate()
            .map(|(i, a)| (i.to_string(), a.to_string()))
            .collect(),
        height: 1.0,
        weight: 10.0,
        dex_number,
        prevo: None,
        changes_from: None,
        is_nonstandard: None,
    }
}

pub fn mv(name: &str, type_name: &str, category: &str, power: u16) -> DexMove {
    DexMove {
        name: name.to_string(),
        type_name: type_name.to_string(),
        category: category.to_string(),
        power,
        accuracy: 100,
        priority: 0,
        pp: 10,
        description: String::new(),
        is_nonstandard: None,
    }
}

pub fn ability(name: &str) -> DexAbility {
    DexAbility {
        name: name.to_string(),
        description: format!("{name} description"),
        is_nonstandard: None,
    }
}

pub fn learnset(entries: &[(&str, &[&str])]) -> Learnset {
    entries
        .iter()
        .map(|(id, tags)| (id.to_string(), tags.iter().map(|t| t.to_string()).collect()))
        .collect()
}

/// Two-generation world:
///
/// - Venubug (Grass/Bug), Quagmire (Water/Ground) and Skydrake
///   (Dragon/Flying) exist in both generations
/// - Skydrake-Mega only exists in gen 1, as an alternate form of Skydrake
/// - Pyroline (Fire, Flash Fire) and Gearmite (Steel, Levitate) are new
///   in gen 2
/// - gen 2 also reports a banned species, a sentinel ability and a move
///   with an unknown type, all of which must be excluded
pub fn fake_provider() -> FakeProvider {
    let mut gens = BTreeMap::new();

    let gen1 = World {
        species: vec![
            species("Venubug", 1, [80, 82, 83, 100, 100, 80], &["Grass", "Bug"], &["Overgrow"]),
            species("Quagmire", 2, [110, 85, 85, 65, 85, 35], &["Water", "Ground"], &["Damp"]),
            species("Skydrake", 3, [110, 134, 95, 100, 100, 80], &["Dragon", "Flying"], &["Inner Focus"]),
            {
                let mut mega = species(
                    "Skydrake-Mega",
                    3,
                    [110, 160, 100, 120, 110, 100],
                    &["Dragon", "Flying"],
                    &["Inner Focus"],
                );
                mega.changes_from = Some("Skydrake".to_string());
                mega
            },
        ],
        moves: vec![
            mv("Tackle", "Normal", "Physical", 40),
            mv("Ancient Power", "Rock", "Special", 60),
            mv("Ember", "Fire", "Special", 40),
        ],
        abilities: vec![
            {
                let mut old = ability("Overgrow");
                old.description = "Overgrow description (old wording)".to_string();
                old
            },
            ability("Damp"),
            ability("Inner Focus"),
        ],
        learnsets: [
            ("venubug".to_string(), learnset(&[("tackle", &["1L1"]), ("ancientpower", &["1M"])])),
            ("quagmire".to_string(), learnset(&[("tackle", &["1L1"])])),
            ("skydrake".to_string(), learnset(&[("tackle", &["1L1"])])),
        ]
        .into(),
    };

    let mut banned = species("Missingno", 0, [33, 33, 33, 33, 33, 33], &["Normal"], &[]);
    banned.is_nonstandard = Some("Custom".to_string());

    let mut unreleased_ability = ability("Unreleased Power");
    unreleased_ability.is_nonstandard = Some("Unobtainable".to_string());

    let gen2 = World {
        species: vec![
            species("Venubug", 1, [80, 82, 83, 100, 100, 80], &["Grass", "Bug"], &["Overgrow"]),
            species("Quagmire", 2, [110, 85, 85, 65, 85, 35], &["Water", "Ground"], &["Damp"]),
            species("Skydrake", 3, [110, 134, 95, 100, 100, 80], &["Dragon", "Flying"], &["Inner Focus"]),
            species("Pyroline", 4, [60, 65, 60, 95, 70, 105], &["Fire"], &["Flash Fire"]),
            species("Gearmite", 5, [50, 70, 110, 45, 60, 70], &["Steel"], &["Levitate"]),
            banned,
        ],
        moves: vec![
            mv("Tackle", "Normal", "Physical", 40),
            mv("U-turn", "Bug", "Physical", 70),
            mv("Recover", "Normal", "Status", 0),
            mv("Stealth Rock", "Rock", "Status", 0),
            mv("Dragon Dance", "Dragon", "Status", 0),
            mv("Shadow Strike", "Shadow", "Physical", 80),
        ],
        abilities: vec![
            ability("Overgrow"),
            ability("Damp"),
            ability("Inner Focus"),
            ability("Flash Fire"),
            ability("Levitate"),
            ability("No Ability"),
            unreleased_ability,
        ],
        learnsets: [
            ("venubug".to_string(), learnset(&[("tackle", &["2L1"]), ("uturn", &["2M"])])),
            (
                "quagmire".to_string(),
                learnset(&[("tackle", &["2L1"]), ("recover", &["2M"]), ("stealthrock", &["2M"])]),
            ),
            (
                "skydrake".to_string(),
                learnset(&[("tackle", &["2L1", "1L1"]), ("dragondance", &["2M"])]),
            ),
            ("pyroline".to_string(), learnset(&[("ember", &["2L1"]), ("tackle", &["2L5"])])),
            (
                "gearmite".to_string(),
                learnset(&[("stealthrock", &["2M"]), ("uturn", &["2M"]), ("recover", &["2M"])]),
            ),
        ]
        .into(),
    };

    gens.insert(1, gen1);
    gens.insert(2, gen2);
    FakeProvider { gens }
}

/// The unified generation id for [`fake_provider`]'s two-generation world.
pub const UNIFIED_GEN: u8 = 3;

pub fn initialized_db() -> (DexDatabase, PipelineReport) {
    let provider = fake_provider();
    let mut db = DexDatabase::new_in_memory().unwrap();
    let report = initialize_dataset(&provider, &mut db).unwrap();
    (db, report)
}

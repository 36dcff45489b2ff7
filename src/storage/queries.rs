//! Bulk-insert and lookup operations for the synthesized dataset.
//!
//! Inserts are chunked to stay under SQLite's host-parameter limit; chunk
//! boundaries carry no semantic meaning. Uniqueness violations (e.g. a
//! rerun without a prior wipe) propagate as fatal errors.

use super::{models::*, schema::DexDatabase};
use crate::pipeline::dataset::GenerationDataset;
use crate::types::{
    normalize_name, AbilityId, CategoryId, Generation, MoveId, PokemonId, PokemonType, TypeId,
};
use anyhow::Result;
use rusqlite::{params, params_from_iter, Row, ToSql};
use std::collections::HashMap;

/// Upper bound on bound parameters per statement, under SQLite's default
/// limit of 999.
const MAX_SQL_PARAMS: usize = 900;

/// Lookup key for name-based cross references: `lowercase(name)|generation`.
pub fn name_gen_key(name: &str, gen: Generation) -> String {
    format!("{}|{}", normalize_name(name), gen.as_u8())
}

impl DexDatabase {
    fn bulk_insert(
        &self,
        insert_head: &str,
        cols: usize,
        params: Vec<Box<dyn ToSql>>,
    ) -> Result<usize> {
        debug_assert_eq!(params.len() % cols, 0);
        let rows_per_chunk = MAX_SQL_PARAMS / cols;
        let row_sql = format!("({})", vec!["?"; cols].join(", "));

        let mut inserted = 0;
        for chunk in params.chunks(rows_per_chunk * cols) {
            let rows = chunk.len() / cols;
            let sql = format!("{insert_head} VALUES {}", vec![row_sql.clone(); rows].join(", "));
            inserted += self
                .conn
                .execute(&sql, params_from_iter(chunk.iter().map(|p| p.as_ref())))?;
        }
        Ok(inserted)
    }

    /// Insert the real generations plus the synthetic unified generation
    pub fn insert_generations(&mut self, gens: &[Generation], unified: Generation) -> Result<usize> {
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();
        for gen in gens {
            params.push(Box::new(gen.as_u8()));
            params.push(Box::new(false));
        }
        params.push(Box::new(unified.as_u8()));
        params.push(Box::new(true));

        self.bulk_insert("INSERT INTO generation (id, unified)", 2, params)
    }

    /// Insert the fixed 18-row type table; row ids are the enum ordinals
    pub fn insert_pokemon_types(&mut self) -> Result<usize> {
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();
        for t in PokemonType::ALL {
            params.push(Box::new(t.type_id().as_i64()));
            params.push(Box::new(t.name()));
        }

        self.bulk_insert("INSERT INTO pokemon_type (id, name)", 2, params)
    }

    /// Insert the special move category tags with explicit 1-based ids
    pub fn insert_special_move_categories(&mut self, names: &[&str]) -> Result<usize> {
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();
        for (i, name) in names.iter().enumerate() {
            params.push(Box::new(i as i64 + 1));
            params.push(Box::new(name.to_string()));
        }

        self.bulk_insert("INSERT INTO special_move_category (id, name)", 2, params)
    }

    /// Insert one generation's ability rows
    pub fn insert_abilities(&mut self, dataset: &GenerationDataset) -> Result<usize> {
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();
        for ability in &dataset.abilities {
            params.push(Box::new(ability.name.clone()));
            params.push(Box::new(ability.description.clone()));
            params.push(Box::new(dataset.generation.as_u8()));
        }
        if params.is_empty() {
            return Ok(0);
        }

        self.bulk_insert(
            "INSERT INTO ability (name, description, generation_id)",
            3,
            params,
        )
    }

    /// Insert one generation's move rows
    pub fn insert_moves(&mut self, dataset: &GenerationDataset) -> Result<usize> {
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();
        for mv in &dataset.moves {
            params.push(Box::new(mv.name.clone()));
            params.push(Box::new(mv.move_type.type_id().as_i64()));
            params.push(Box::new(mv.category.name()));
            params.push(Box::new(mv.power));
            params.push(Box::new(mv.accuracy));
            params.push(Box::new(mv.priority));
            params.push(Box::new(mv.pp));
            params.push(Box::new(mv.description.clone()));
            params.push(Box::new(dataset.generation.as_u8()));
        }
        if params.is_empty() {
            return Ok(0);
        }

        self.bulk_insert(
            "INSERT INTO move (name, pokemon_type_id, category, power, accuracy, priority, pp, description, generation_id)",
            9,
            params,
        )
    }

    /// Insert one generation's species rows
    pub fn insert_pokemon(&mut self, dataset: &GenerationDataset) -> Result<usize> {
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();
        for meta in &dataset.species {
            let stats = &meta.base_stats;
            params.push(Box::new(meta.dex_number));
            params.push(Box::new(meta.name.clone()));
            params.push(Box::new(stats.hp));
            params.push(Box::new(stats.attack));
            params.push(Box::new(stats.defense));
            params.push(Box::new(stats.special_attack));
            params.push(Box::new(stats.special_defense));
            params.push(Box::new(stats.speed));
            params.push(Box::new(stats.total()));
            params.push(Box::new(meta.height));
            params.push(Box::new(meta.weight));
            params.push(Box::new(dataset.generation.as_u8()));
        }
        if params.is_empty() {
            return Ok(0);
        }

        self.bulk_insert(
            "INSERT INTO pokemon (dex_number, name, hp, attack, defense, special_attack, special_defense, speed, total, height, weight, generation_id)",
            12,
            params,
        )
    }

    pub fn insert_pokemon_type_links(&mut self, links: &[(PokemonId, TypeId)]) -> Result<usize> {
        let params = pair_params(links.iter().map(|(p, t)| (p.as_i64(), t.as_i64())));
        if params.is_empty() {
            return Ok(0);
        }
        self.bulk_insert(
            "INSERT INTO pokemon_pokemon_types (pokemon_id, pokemon_type_id)",
            2,
            params,
        )
    }

    pub fn insert_pokemon_ability_links(&mut self, links: &[(PokemonId, AbilityId)]) -> Result<usize> {
        let params = pair_params(links.iter().map(|(p, a)| (p.as_i64(), a.as_i64())));
        if params.is_empty() {
            return Ok(0);
        }
        self.bulk_insert(
            "INSERT INTO pokemon_abilities (pokemon_id, ability_id)",
            2,
            params,
        )
    }

    pub fn insert_pokemon_move_links(&mut self, links: &[(PokemonId, MoveId)]) -> Result<usize> {
        let params = pair_params(links.iter().map(|(p, m)| (p.as_i64(), m.as_i64())));
        if params.is_empty() {
            return Ok(0);
        }
        self.bulk_insert("INSERT INTO pokemon_moves (pokemon_id, move_id)", 2, params)
    }

    pub fn insert_move_category_links(&mut self, links: &[(MoveId, CategoryId)]) -> Result<usize> {
        let params = pair_params(links.iter().map(|(m, c)| (m.as_i64(), c.as_i64())));
        if params.is_empty() {
            return Ok(0);
        }
        self.bulk_insert(
            "INSERT INTO move_special_move_categories (move_id, special_move_category_id)",
            2,
            params,
        )
    }

    pub fn insert_type_effectiveness(&mut self, rows: &[TypeEffectiveRow]) -> Result<usize> {
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();
        for row in rows {
            params.push(Box::new(row.pokemon_id.as_i64()));
            params.push(Box::new(row.pokemon_type_id.as_i64()));
            params.push(Box::new(row.value));
        }
        if params.is_empty() {
            return Ok(0);
        }
        self.bulk_insert(
            "INSERT INTO type_effective (pokemon_id, pokemon_type_id, value)",
            3,
            params,
        )
    }

    /// Lookup map `lowercase(name)|generation -> ability id`
    pub fn ability_id_map(&self) -> Result<HashMap<String, AbilityId>> {
        self.id_map("SELECT name, generation_id, id FROM ability", AbilityId::new)
    }

    /// Lookup map `lowercase(name)|generation -> move id`
    pub fn move_id_map(&self) -> Result<HashMap<String, MoveId>> {
        self.id_map("SELECT name, generation_id, id FROM move", MoveId::new)
    }

    /// Lookup map `lowercase(name)|generation -> pokemon id`
    pub fn pokemon_id_map(&self) -> Result<HashMap<String, PokemonId>> {
        self.id_map("SELECT name, generation_id, id FROM pokemon", PokemonId::new)
    }

    fn id_map<I>(&self, sql: &str, wrap: fn(i64) -> I) -> Result<HashMap<String, I>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            let name: String = row.get(0)?;
            let gen: u8 = row.get(1)?;
            let id: i64 = row.get(2)?;
            Ok((name_gen_key(&name, Generation::new(gen)), wrap(id)))
        })?;

        let mut map = HashMap::new();
        for row in rows {
            let (key, id) = row?;
            map.insert(key, id);
        }
        Ok(map)
    }

    /// The synthetic unified generation, if the dataset has been built
    pub fn unified_generation(&self) -> Result<Option<Generation>> {
        let result = self
            .conn
            .query_row("SELECT id FROM generation WHERE unified = 1", [], |row| {
                row.get::<_, u8>(0)
            });
        match result {
            Ok(id) => Ok(Some(Generation::new(id))),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve an ability name within one generation
    pub fn ability_id(&self, name: &str, gen: Generation) -> Result<Option<AbilityId>> {
        self.single_id(
            "SELECT id FROM ability WHERE LOWER(name) = ? AND generation_id = ?",
            name,
            gen,
            AbilityId::new,
        )
    }

    /// Resolve a move name within one generation
    pub fn move_id(&self, name: &str, gen: Generation) -> Result<Option<MoveId>> {
        self.single_id(
            "SELECT id FROM move WHERE LOWER(name) = ? AND generation_id = ?",
            name,
            gen,
            MoveId::new,
        )
    }

    /// Resolve a special move category name
    pub fn category_id(&self, name: &str) -> Result<Option<CategoryId>> {
        let result = self.conn.query_row(
            "SELECT id FROM special_move_category WHERE LOWER(name) = ?",
            params![normalize_name(name)],
            |row| row.get::<_, i64>(0),
        );
        match result {
            Ok(id) => Ok(Some(CategoryId::new(id))),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn single_id<I>(
        &self,
        sql: &str,
        name: &str,
        gen: Generation,
        wrap: fn(i64) -> I,
    ) -> Result<Option<I>> {
        let result = self.conn.query_row(
            sql,
            params![normalize_name(name), gen.as_u8()],
            |row| row.get::<_, i64>(0),
        );
        match result {
            Ok(id) => Ok(Some(wrap(id))),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch one ability row by name and generation
    pub fn ability_by_name(&self, name: &str, gen: Generation) -> Result<Option<AbilityRow>> {
        let result = self.conn.query_row(
            "SELECT id, name, description, generation_id FROM ability
             WHERE LOWER(name) = ? AND generation_id = ?",
            params![normalize_name(name), gen.as_u8()],
            |row| {
                Ok(AbilityRow {
                    id: AbilityId::new(row.get(0)?),
                    name: row.get(1)?,
                    description: row.get(2)?,
                    generation: Generation::new(row.get(3)?),
                })
            },
        );
        match result {
            Ok(row) => Ok(Some(row)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch one move row by name and generation
    pub fn move_by_name(&self, name: &str, gen: Generation) -> Result<Option<MoveRow>> {
        let result = self.conn.query_row(
            "SELECT id, name, pokemon_type_id, category, power, accuracy, priority, pp, generation_id
             FROM move WHERE LOWER(name) = ? AND generation_id = ?",
            params![normalize_name(name), gen.as_u8()],
            |row| {
                Ok(MoveRow {
                    id: MoveId::new(row.get(0)?),
                    name: row.get(1)?,
                    pokemon_type_id: TypeId::new(row.get(2)?),
                    category: row.get(3)?,
                    power: row.get(4)?,
                    accuracy: row.get(5)?,
                    priority: row.get(6)?,
                    pp: row.get(7)?,
                    generation: Generation::new(row.get(8)?),
                })
            },
        );
        match result {
            Ok(row) => Ok(Some(row)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch one species row by name and generation
    pub fn pokemon_by_name(&self, name: &str, gen: Generation) -> Result<Option<PokemonRow>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {POKEMON_COLUMNS} FROM pokemon p
             WHERE LOWER(p.name) = ? AND p.generation_id = ?"
        ))?;
        let result = stmt.query_row(params![normalize_name(name), gen.as_u8()], row_to_pokemon);
        match result {
            Ok(row) => Ok(Some(row)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All 18 stored effectiveness entries for one species
    pub fn type_effectiveness_for(&self, pokemon_id: PokemonId) -> Result<Vec<TypeEffectiveRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT pokemon_id, pokemon_type_id, value FROM type_effective
             WHERE pokemon_id = ? ORDER BY pokemon_type_id",
        )?;
        let rows = stmt.query_map(params![pokemon_id.as_i64()], |row| {
            Ok(TypeEffectiveRow {
                pokemon_id: PokemonId::new(row.get(0)?),
                pokemon_type_id: TypeId::new(row.get(1)?),
                value: row.get(2)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// Move ids linked to one species
    pub fn pokemon_move_ids(&self, pokemon_id: PokemonId) -> Result<Vec<MoveId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT move_id FROM pokemon_moves WHERE pokemon_id = ? ORDER BY move_id")?;
        let rows = stmt.query_map(params![pokemon_id.as_i64()], |row| {
            Ok(MoveId::new(row.get(0)?))
        })?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(row?);
        }
        Ok(ids)
    }

    /// Row count for one dataset table (pipeline reporting)
    pub fn table_count(&self, table: &str) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn pair_params(pairs: impl Iterator<Item = (i64, i64)>) -> Vec<Box<dyn ToSql>> {
    let mut params: Vec<Box<dyn ToSql>> = Vec::new();
    for (a, b) in pairs {
        params.push(Box::new(a));
        params.push(Box::new(b));
    }
    params
}

pub(crate) const POKEMON_COLUMNS: &str =
    "p.id, p.dex_number, p.name, p.hp, p.attack, p.defense, p.special_attack, \
     p.special_defense, p.speed, p.total, p.height, p.weight, p.generation_id";

pub(crate) fn row_to_pokemon(row: &Row) -> rusqlite::Result<PokemonRow> {
    Ok(PokemonRow {
        id: PokemonId::new(row.get(0)?),
        dex_number: row.get(1)?,
        name: row.get(2)?,
        hp: row.get(3)?,
        attack: row.get(4)?,
        defense: row.get(5)?,
        special_attack: row.get(6)?,
        special_defense: row.get(7)?,
        speed: row.get(8)?,
        total: row.get(9)?,
        height: row.get(10)?,
        weight: row.get(11)?,
        generation: Generation::new(row.get(12)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::dataset::SpeciesMeta;
    use crate::types::BaseStats;
    use std::collections::BTreeSet;

    fn species_dataset(gen: Generation, count: u32) -> GenerationDataset {
        let species = (0..count)
            .map(|i| SpeciesMeta {
                name: format!("Species-{i}"),
                dex_number: i + 1,
                base_stats: BaseStats {
                    hp: 50,
                    attack: 50,
                    defense: 50,
                    special_attack: 50,
                    special_defense: 50,
                    speed: 50,
                },
                types: vec![PokemonType::Normal],
                ability_names: Vec::new(),
                move_names: BTreeSet::new(),
                full_move_names: BTreeSet::new(),
                height: 1.0,
                weight: 10.0,
            })
            .collect();

        GenerationDataset {
            generation: gen,
            abilities: Vec::new(),
            moves: Vec::new(),
            species,
        }
    }

    #[test]
    fn test_bulk_insert_spans_multiple_statements() {
        let gen = Generation::new(1);
        let mut db = DexDatabase::new_in_memory().unwrap();
        db.insert_generations(&[gen], Generation::new(2)).unwrap();

        // 200 species at 12 columns each cannot fit in one statement's
        // parameter budget, so this exercises the chunk loop.
        let inserted = db.insert_pokemon(&species_dataset(gen, 200)).unwrap();
        assert_eq!(inserted, 200);
        assert_eq!(db.table_count("pokemon").unwrap(), 200);

        // Rows from the first and last chunk both landed intact
        let first = db.pokemon_by_name("Species-0", gen).unwrap().unwrap();
        assert_eq!(first.dex_number, 1);
        let last = db.pokemon_by_name("Species-199", gen).unwrap().unwrap();
        assert_eq!(last.dex_number, 200);
        assert_eq!(last.total, 300);
    }
}

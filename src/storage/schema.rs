//! Database schema and connection management

use crate::error::DexError;
use anyhow::Result;
use dirs::cache_dir;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Database connection manager for the synthesized reference dataset
pub struct DexDatabase {
    pub(crate) conn: Connection,
}

impl DexDatabase {
    /// Open the default database under the user cache dir and ensure tables exist
    pub fn new() -> Result<Self> {
        Self::open(&Self::database_path()?)
    }

    /// Open (or create) a database at an explicit path
    pub fn open(db_path: &Path) -> Result<Self> {
        // Ensure the cache directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// In-memory database for tests
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Get the path to the database file
    pub fn database_path() -> Result<PathBuf> {
        let cache_dir = cache_dir().ok_or_else(|| DexError::Storage {
            message: "Could not determine cache directory".to_string(),
        })?;
        Ok(cache_dir.join("draftdex").join("dex.db"))
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS generation (
                id INTEGER PRIMARY KEY,
                unified INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS pokemon_type (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS special_move_category (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS ability (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                generation_id INTEGER NOT NULL REFERENCES generation(id),
                UNIQUE(name, generation_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS move (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                pokemon_type_id INTEGER NOT NULL REFERENCES pokemon_type(id),
                category TEXT NOT NULL,
                power INTEGER NOT NULL DEFAULT 0,
                accuracy INTEGER NOT NULL DEFAULT 0,
                priority INTEGER NOT NULL DEFAULT 0,
                pp INTEGER NOT NULL DEFAULT 0,
                description TEXT NOT NULL DEFAULT '',
                generation_id INTEGER NOT NULL REFERENCES generation(id),
                UNIQUE(name, generation_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS pokemon (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                dex_number INTEGER NOT NULL,
                name TEXT NOT NULL,
                hp INTEGER NOT NULL,
                attack INTEGER NOT NULL,
                defense INTEGER NOT NULL,
                special_attack INTEGER NOT NULL,
                special_defense INTEGER NOT NULL,
                speed INTEGER NOT NULL,
                total INTEGER NOT NULL,
                height REAL NOT NULL DEFAULT 0,
                weight REAL NOT NULL DEFAULT 0,
                generation_id INTEGER NOT NULL REFERENCES generation(id),
                UNIQUE(name, generation_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS pokemon_pokemon_types (
                pokemon_id INTEGER NOT NULL REFERENCES pokemon(id),
                pokemon_type_id INTEGER NOT NULL REFERENCES pokemon_type(id),
                PRIMARY KEY (pokemon_id, pokemon_type_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS pokemon_abilities (
                pokemon_id INTEGER NOT NULL REFERENCES pokemon(id),
                ability_id INTEGER NOT NULL REFERENCES ability(id),
                PRIMARY KEY (pokemon_id, ability_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS pokemon_moves (
                pokemon_id INTEGER NOT NULL REFERENCES pokemon(id),
                move_id INTEGER NOT NULL REFERENCES move(id),
                PRIMARY KEY (pokemon_id, move_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS move_special_move_categories (
                move_id INTEGER NOT NULL REFERENCES move(id),
                special_move_category_id INTEGER NOT NULL REFERENCES special_move_category(id),
                PRIMARY KEY (move_id, special_move_category_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS type_effective (
                pokemon_id INTEGER NOT NULL REFERENCES pokemon(id),
                pokemon_type_id INTEGER NOT NULL REFERENCES pokemon_type(id),
                value REAL NOT NULL,
                UNIQUE(pokemon_id, pokemon_type_id)
            )",
            [],
        )?;

        // Indexes for the filter engine
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_pokemon_generation
             ON pokemon(generation_id)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_type_effective_value
             ON type_effective(pokemon_type_id, value)",
            [],
        )?;

        Ok(())
    }

    /// Delete every dataset row. This is the safe-rerun procedure: the
    /// pipeline has no incremental update path, so rerunning requires a
    /// full wipe first.
    pub fn wipe_dataset(&mut self) -> Result<()> {
        // Join tables first to respect foreign keys
        self.conn.execute("DELETE FROM type_effective", [])?;
        self.conn.execute("DELETE FROM move_special_move_categories", [])?;
        self.conn.execute("DELETE FROM pokemon_moves", [])?;
        self.conn.execute("DELETE FROM pokemon_abilities", [])?;
        self.conn.execute("DELETE FROM pokemon_pokemon_types", [])?;
        self.conn.execute("DELETE FROM pokemon", [])?;
        self.conn.execute("DELETE FROM move", [])?;
        self.conn.execute("DELETE FROM ability", [])?;
        self.conn.execute("DELETE FROM special_move_category", [])?;
        self.conn.execute("DELETE FROM pokemon_type", [])?;
        self.conn.execute("DELETE FROM generation", [])?;
        Ok(())
    }
}

//! Command handlers for the draftdex CLI

pub mod init_dataset;
pub mod search;
pub mod wipe;

use crate::error::Result;
use crate::storage::DexDatabase;
use std::path::Path;

/// Open the database at an explicit path, or the default cache-dir path.
pub fn open_database(db: Option<&Path>) -> Result<DexDatabase> {
    let db = match db {
        Some(path) => DexDatabase::open(path)?,
        None => DexDatabase::new()?,
    };
    Ok(db)
}

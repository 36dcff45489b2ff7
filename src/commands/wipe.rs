//! Wipe command: delete every dataset row so the pipeline can be rerun.

use super::open_database;
use crate::error::Result;
use std::path::PathBuf;

pub fn handle_wipe(db_path: Option<PathBuf>) -> Result<()> {
    let mut db = open_database(db_path.as_deref())?;
    db.wipe_dataset()?;
    println!("✓ Dataset wiped");
    Ok(())
}

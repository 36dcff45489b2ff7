//! Initialize-dataset command: run the whole synthesis pipeline.

use super::open_database;
use crate::dex::json::JsonDexProvider;
use crate::error::Result;
use crate::pipeline::initialize_dataset;
use std::path::{Path, PathBuf};

/// Build the full reference dataset from provider dumps in `data_dir`.
///
/// Expects an empty dataset unless `wipe` is set; a rerun without wipe
/// aborts on the first uniqueness violation.
pub fn handle_init(
    data_dir: &Path,
    db_path: Option<PathBuf>,
    wipe: bool,
    verbose: bool,
) -> Result<()> {
    let provider = JsonDexProvider::from_dir(data_dir)?;
    let mut db = open_database(db_path.as_deref())?;

    if wipe {
        db.wipe_dataset()?;
        println!("Existing dataset wiped");
    }

    let report = initialize_dataset(&provider, &mut db)?;

    println!("✓ Dataset initialized");
    println!(
        "  {} species, {} moves, {} abilities",
        report.species, report.moves, report.abilities
    );

    if verbose {
        println!("  generations: {}", report.generations);
        println!("  types: {}", report.types);
        println!("  special move categories: {}", report.categories);
        println!("  type links: {}", report.links.type_links);
        println!("  ability links: {}", report.links.ability_links);
        println!("  move links: {}", report.links.move_links);
        println!("  category links: {}", report.links.category_links);
        println!("  effectiveness rows: {}", report.links.effectiveness_rows);
    }

    Ok(())
}

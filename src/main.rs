//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use draftdex::{
    cli::{Commands, Draftdex},
    commands::{
        init_dataset::handle_init,
        search::{handle_search, SearchParams},
        wipe::handle_wipe,
    },
    Result,
};

/// Run the CLI.
fn main() -> Result<()> {
    env_logger::init();

    let app = Draftdex::parse();

    match app.command {
        Commands::Init {
            data_dir,
            db,
            wipe,
            verbose,
        } => handle_init(&data_dir, db, wipe, verbose)?,

        Commands::Search {
            filters,
            db,
            json,
            sort_by,
            desc,
            page,
            page_size,
        } => handle_search(SearchParams {
            filters,
            db,
            as_json: json,
            sort_by,
            descending: desc,
            page,
            page_size,
        })?,

        Commands::Wipe { db } => handle_wipe(db)?,
    }

    Ok(())
}

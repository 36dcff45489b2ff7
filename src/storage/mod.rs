//! Storage layer for the synthesized reference dataset
//!
//! This module provides a clean abstraction over the SQLite database,
//! organized into logical components:
//! - `models`: Data structures
//! - `schema`: Database connection and schema management
//! - `queries`: Bulk inserts and id lookups
//! - `search`: The multi-criteria filter engine

pub mod models;
pub mod queries;
pub mod schema;
pub mod search;

// Re-export the main types and database struct for easy access
pub use models::*;
pub use schema::DexDatabase;
pub use search::{PageRequest, SearchPage, SortDirection, SortField, SortSpec, SpeciesFilter};

//! Command-line interface for draftdex

pub mod args;

pub use args::{Commands, Draftdex, SearchFilters};

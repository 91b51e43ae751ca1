//! Song catalog.
//!
//! Songs and their charts are pre-loaded once per refresh and never mutated
//! afterwards; a refresh builds a new catalog.

pub mod loader;
pub mod models;

pub use loader::{build_catalog, load_catalog, CatalogSnapshot, PatternRecord, SongRecord};
pub use models::{Pattern, Song};

// src/ingest/providers/mod.rs
pub mod json_file;

pub use json_file::{decode_items, JsonFileSource, JsonFixtureSource};

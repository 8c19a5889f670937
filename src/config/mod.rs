//! Scene configuration for rastrum
//!
//! Provides types, parsing and validation for TOML scene files.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;

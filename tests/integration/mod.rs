//! Integration tests for the schema manager and the entry model.

pub mod entry_model;
pub mod properties;
pub mod schema_loading;
pub mod schema_mutations;

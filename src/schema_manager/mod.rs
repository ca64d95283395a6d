//! Validating schema manager.
//!
//! The [`SchemaManager`] owns a [`Registries`](crate::schema::Registries)
//! value and is the only way to mutate it. Every add, delete and load is
//! validated in full before anything changes.
//!
//! # Module Organization
//!
//! * [`core`] - SchemaManager struct, object add/delete and lookups
//! * [`loading`] - Schema load, dependency resolution, enable and disable
//! * [`builder`] - Configuration and builder
//! * `tests` - Manager test cases

pub mod builder;
pub mod core;
pub mod loading;


pub use builder::{SchemaManagerBuilder, SchemaManagerConfig};
pub use core::SchemaManager;

//! LDAP schema management library for Rust.
//!
//! Provides typed schema registries with referential integrity checks, a
//! schema manager that loads named schema bundles with their dependencies,
//! and a schema-aware entry model (values, attributes, entries) that
//! normalizes, compares and validates values through the schema.
//!
//! # Core Components
//!
//! - [`SchemaManager`] - Validating façade over the schema registries
//! - [`Registries`] - Per-type registries of schema objects
//! - [`SchemaLoader`] - Trait for supplying schema bundles
//! - [`ServerEntry`] - Directory entry checked against its object classes
//!
//! # Quick Start
//!
//! ```rust
//! use ldap_schema::{RawValue, SchemaManager, ServerEntry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut manager = SchemaManager::new()?;
//! manager.load_all_enabled()?;
//!
//! let registries = manager.registries();
//! let mut entry = ServerEntry::new(registries, "cn=John Doe,ou=people,dc=example,dc=com")?;
//! entry.put(registries, "objectClass", [RawValue::from("person")])?;
//! entry.put(registries, "cn", [RawValue::from("John Doe")])?;
//! entry.put(registries, "sn", [RawValue::from("Doe")])?;
//! assert!(entry.check(registries).is_ok());
//! # Ok(())
//! # }
//! ```

pub mod entry;
pub mod error;
pub mod matching;
pub mod oid;
pub mod schema;
pub mod schema_manager;

// Re-export commonly used types for convenience
pub use entry::{ObjectClassAttribute, RawValue, ServerAttribute, ServerEntry, ServerValue};
pub use error::{AttributeError, AttributeResult, ErrorKind, SchemaError, SchemaResult};
pub use matching::ImplementationRegistry;
pub use schema::{
    InMemorySchemaLoader, Registries, Schema, SchemaBundle, SchemaElement, SchemaLoader,
    SchemaObjectType,
};
pub use schema_manager::{SchemaManager, SchemaManagerBuilder, SchemaManagerConfig};

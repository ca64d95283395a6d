//! Schema objects, registries and schema bundles for LDAP directories.
//!
//! This module provides the typed schema objects of RFC 4512 (attribute
//! types, object classes, matching rules, syntaxes) and the executable
//! objects behind them (comparators, normalizers, syntax checkers), the
//! per-type registries that index them and the loaders that supply named
//! schema bundles.
//!
//! # Key Types
//!
//! - [`Registries`] - Every per-type registry plus the loaded schemas
//! - [`Registry`] - OID and name index over one kind of schema object
//! - [`Schema`] / [`SchemaBundle`] - Named bundle descriptor and its objects
//! - [`SchemaLoader`] - Source of schema bundles
//!
//! # Examples
//!
//! ```rust
//! use ldap_schema::schema::{InMemorySchemaLoader, SchemaLoader};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = InMemorySchemaLoader::embedded()?;
//! let core = loader.load_schema_objects("core")?;
//! assert!(core.schema.depends_on("system"));
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod embedded;
pub mod loader;
pub mod object;
pub mod registries;
pub mod registry;
pub mod types;
pub mod validation;


pub use bundle::{Schema, SchemaBundle};
pub use loader::{InMemorySchemaLoader, SchemaLoader, parse_bundle};
pub use object::{SchemaEntity, SchemaObject, SchemaObjectType};
pub use registries::Registries;
pub use registry::{GlobalOidRegistry, Registry};
pub use types::{
    AttributeType, Comparator, LdapSyntax, MatchingRule, Normalizer, ObjectClass, ObjectClassKind,
    SchemaElement, SyntaxChecker, Usage,
};

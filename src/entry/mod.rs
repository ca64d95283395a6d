//! Schema-aware value, attribute and entry model.
//!
//! Everything here borrows a [`Registries`](crate::schema::Registries) when it
//! needs schema knowledge: to resolve an attribute type, normalize or check a
//! value, or compute an object class closure. Nothing holds a reference to
//! the registries between calls.
//!
//! # Key Types
//!
//! - [`RawValue`] - text or binary user value
//! - [`ServerValue`] - value bound to an attribute type, caching its
//!   normalized form and validity
//! - [`ServerAttribute`] - type-checked set of values
//! - [`ObjectClassAttribute`] - objectClass attribute with its class closure
//! - [`ServerEntry`] - DN plus attributes, with an entry schema check

pub mod attribute;
pub mod object_class;
pub mod server_entry;
pub mod value;

pub use attribute::ServerAttribute;
pub use object_class::{EXTENSIBLE_OBJECT_OID, OBJECT_CLASS_OID, ObjectClassAttribute};
pub use server_entry::ServerEntry;
pub use value::{RawValue, ServerValue, ValueKind};

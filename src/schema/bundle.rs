//! Named schema bundles and their dependency records.

use super::object::SchemaObjectType;
use super::types::SchemaElement;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

fn default_enabled() -> bool {
    true
}

/// A named, versionable bundle of schema objects.
///
/// The descriptor lists the schemas it depends on and whether it is enabled.
/// Once loaded, the descriptor tracks the objects the bundle contributed to
/// the registries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub name: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(skip)]
    owned: BTreeSet<(SchemaObjectType, String)>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependencies: Vec::new(),
            enabled: true,
            owned: BTreeSet::new(),
        }
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Registry key of a schema name; schema names are case-insensitive.
    pub fn key(name: &str) -> String {
        name.to_lowercase()
    }

    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.iter().any(|d| d.eq_ignore_ascii_case(name))
    }

    /// OIDs of the objects this schema contributed to the registries. A
    /// matching rule and its comparator share an OID, so an OID may appear
    /// once per object type.
    pub fn owned_oids(&self) -> impl Iterator<Item = &str> {
        self.owned.iter().map(|(_, oid)| oid.as_str())
    }

    /// Type and OID of every object this schema contributed.
    pub fn owned_objects(&self) -> &BTreeSet<(SchemaObjectType, String)> {
        &self.owned
    }

    pub fn owns(&self, object_type: SchemaObjectType, oid: &str) -> bool {
        self.owned.contains(&(object_type, oid.to_string()))
    }

    pub(crate) fn add_owned(&mut self, object_type: SchemaObjectType, oid: &str) {
        self.owned.insert((object_type, oid.to_string()));
    }

    pub(crate) fn remove_owned(&mut self, object_type: SchemaObjectType, oid: &str) {
        self.owned.remove(&(object_type, oid.to_string()));
    }
}

/// A schema descriptor together with the objects it defines, as produced by a
/// schema loader.
#[derive(Debug, Clone)]
pub struct SchemaBundle {
    pub schema: Schema,
    pub elements: Vec<SchemaElement>,
}

impl SchemaBundle {
    /// Create a bundle. Every element's owning schema is set to the bundle's
    /// name.
    pub fn new(schema: Schema, elements: Vec<SchemaElement>) -> Self {
        let mut bundle = Self {
            schema,
            elements: Vec::new(),
        };
        for element in elements {
            bundle.push(element);
        }
        bundle
    }

    pub fn empty(schema: Schema) -> Self {
        Self::new(schema, Vec::new())
    }

    pub fn push(&mut self, element: impl Into<SchemaElement>) {
        let mut element = element.into();
        element.object_mut().schema_name = self.schema.name.clone();
        self.elements.push(element);
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }
}

//! Sources of schema bundles.
//!
//! The schema manager never reads schema definitions itself. It asks a
//! [`SchemaLoader`] for schema descriptors and for the objects of a named
//! schema. [`InMemorySchemaLoader`] serves bundles held in memory: the
//! embedded standard schemas, JSON documents and bundles built in code.

use super::bundle::{Schema, SchemaBundle};
use super::embedded;
use super::types::{
    AttributeType, Comparator, LdapSyntax, MatchingRule, Normalizer, ObjectClass, SchemaElement,
    SyntaxChecker,
};
use crate::error::{SchemaError, SchemaResult};
use log::debug;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Provider of schema descriptors and their objects.
pub trait SchemaLoader: Debug {
    /// The descriptor of the schema called `name`, if the loader knows it.
    fn schema(&self, name: &str) -> Option<Schema>;

    /// Names of every schema the loader knows.
    fn schema_names(&self) -> Vec<String>;

    /// The descriptor and objects of the schema called `name`.
    fn load_schema_objects(&self, name: &str) -> SchemaResult<SchemaBundle>;
}

/// JSON layout of a schema bundle.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleDocument {
    #[serde(flatten)]
    schema: Schema,
    #[serde(default)]
    comparators: Vec<Comparator>,
    #[serde(default)]
    normalizers: Vec<Normalizer>,
    #[serde(default)]
    syntax_checkers: Vec<SyntaxChecker>,
    #[serde(default)]
    ldap_syntaxes: Vec<LdapSyntax>,
    #[serde(default)]
    matching_rules: Vec<MatchingRule>,
    #[serde(default)]
    attribute_types: Vec<AttributeType>,
    #[serde(default)]
    object_classes: Vec<ObjectClass>,
}

impl From<BundleDocument> for SchemaBundle {
    fn from(document: BundleDocument) -> Self {
        let elements: Vec<SchemaElement> = document
            .comparators
            .into_iter()
            .map(Into::into)
            .chain(document.normalizers.into_iter().map(Into::into))
            .chain(document.syntax_checkers.into_iter().map(Into::into))
            .chain(document.ldap_syntaxes.into_iter().map(Into::into))
            .chain(document.matching_rules.into_iter().map(Into::into))
            .chain(document.attribute_types.into_iter().map(Into::into))
            .chain(document.object_classes.into_iter().map(Into::into))
            .collect();
        SchemaBundle::new(document.schema, elements)
    }
}

/// Parse a schema bundle from its JSON form.
///
/// # Examples
///
/// ```rust
/// use ldap_schema::schema::parse_bundle;
///
/// let bundle = parse_bundle(r#"{
///     "name": "custom",
///     "dependencies": ["core"],
///     "attributeTypes": [
///         {"oid": "1.3.6.1.4.1.18060.0.4.1.2.1", "names": ["badgeNumber"], "superior": "name"}
///     ]
/// }"#).unwrap();
/// assert_eq!(bundle.name(), "custom");
/// assert_eq!(bundle.elements.len(), 1);
/// ```
pub fn parse_bundle(json: &str) -> SchemaResult<SchemaBundle> {
    let document: BundleDocument = serde_json::from_str(json)
        .map_err(|e| SchemaError::violation(format!("invalid schema bundle: {}", e)))?;
    Ok(document.into())
}

/// Loader serving bundles held in memory. Schema names are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct InMemorySchemaLoader {
    bundles: BTreeMap<String, SchemaBundle>,
}

impl InMemorySchemaLoader {
    /// A loader without any bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// A loader holding the embedded standard schemas: `system`, `core`,
    /// `cosine`, `inetorgperson` and the disabled `nis`.
    pub fn embedded() -> SchemaResult<Self> {
        let mut loader = Self::new();
        for json in embedded::all_schemas() {
            loader.insert_json(json)?;
        }
        debug!("Loaded {} embedded schema bundles", loader.bundles.len());
        Ok(loader)
    }

    /// Add or replace a bundle.
    pub fn insert(&mut self, bundle: SchemaBundle) {
        self.bundles.insert(Schema::key(bundle.name()), bundle);
    }

    pub fn with_bundle(mut self, bundle: SchemaBundle) -> Self {
        self.insert(bundle);
        self
    }

    /// Parse and add a JSON bundle.
    pub fn insert_json(&mut self, json: &str) -> SchemaResult<()> {
        self.insert(parse_bundle(json)?);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

impl SchemaLoader for InMemorySchemaLoader {
    fn schema(&self, name: &str) -> Option<Schema> {
        self.bundles
            .get(&Schema::key(name))
            .map(|bundle| bundle.schema.clone())
    }

    fn schema_names(&self) -> Vec<String> {
        self.bundles
            .values()
            .map(|bundle| bundle.name().to_string())
            .collect()
    }

    fn load_schema_objects(&self, name: &str) -> SchemaResult<SchemaBundle> {
        self.bundles
            .get(&Schema::key(name))
            .cloned()
            .ok_or_else(|| SchemaError::unknown_schema(name))
    }
}

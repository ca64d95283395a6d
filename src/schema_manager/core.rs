//! Core schema manager structure, object mutations and queries.

use crate::error::{SchemaError, SchemaResult};
use crate::matching::ImplementationRegistry;
use crate::schema::{
    AttributeType, Comparator, InMemorySchemaLoader, LdapSyntax, MatchingRule, Normalizer,
    ObjectClass, Registries, Registry, Schema, SchemaElement, SchemaEntity, SchemaLoader,
    SchemaObjectType, SyntaxChecker,
};
use crate::schema_manager::builder::{SchemaManagerBuilder, SchemaManagerConfig};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Validating façade over a [`Registries`] value.
///
/// Every mutating call starts by clearing the error list. A call that fails
/// validation changes nothing and leaves the reason in [`errors`]; a call
/// that succeeds leaves the list empty (except for objects skipped by a
/// relaxed load).
///
/// # Examples
///
/// ```rust
/// use ldap_schema::schema::{AttributeType, SchemaObjectType};
/// use ldap_schema::schema_manager::SchemaManager;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut manager = SchemaManager::new()?;
/// manager.load_all_enabled()?;
///
/// let badge = AttributeType::new("1.3.6.1.4.1.18060.0.4.1.2.1")
///     .with_names(["badgeNumber"])
///     .with_superior("name")
///     .in_schema("core");
/// assert!(manager.add(badge));
/// assert!(manager.lookup_attribute_type("badgenumber").is_some());
///
/// // Deleting a rule still in use is refused
/// assert!(!manager.delete_by_id(SchemaObjectType::MatchingRule, "caseIgnoreMatch"));
/// assert_eq!(manager.errors().len(), 1);
/// # Ok(())
/// # }
/// ```
///
/// [`errors`]: Self::errors
#[derive(Debug)]
pub struct SchemaManager {
    pub(super) registries: Registries,
    pub(super) loader: Box<dyn SchemaLoader>,
    pub(super) implementations: ImplementationRegistry,
    pub(super) config: SchemaManagerConfig,
    pub(super) errors: Vec<SchemaError>,
    pub(super) enabled_overrides: BTreeMap<String, bool>, // schema key -> enabled
}

impl SchemaManager {
    /// Create a manager over the embedded schemas with the default
    /// configuration. Nothing is loaded yet.
    pub fn new() -> SchemaResult<Self> {
        Ok(Self::with_loader(InMemorySchemaLoader::embedded()?))
    }

    pub fn with_loader(loader: impl SchemaLoader + 'static) -> Self {
        Self::from_parts(
            Box::new(loader),
            ImplementationRegistry::new(),
            SchemaManagerConfig::default(),
        )
    }

    pub fn builder() -> SchemaManagerBuilder {
        SchemaManagerBuilder::new()
    }

    pub(super) fn from_parts(
        loader: Box<dyn SchemaLoader>,
        implementations: ImplementationRegistry,
        config: SchemaManagerConfig,
    ) -> Self {
        Self {
            registries: Registries::new(),
            loader,
            implementations,
            config,
            errors: Vec::new(),
            enabled_overrides: BTreeMap::new(),
        }
    }

    /// Record the outcome of a mutation in the error list.
    pub(super) fn record(&mut self, result: SchemaResult<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(error) => {
                warn!("{}", error);
                self.errors.push(error);
                false
            }
        }
    }

    /// Add a schema object.
    ///
    /// The owning schema must be loaded. Name references (superiors, matching
    /// rules, syntaxes, MUST and MAY lists) may use OIDs or names; they are
    /// stored as OIDs.
    pub fn add(&mut self, element: impl Into<SchemaElement>) -> bool {
        self.errors.clear();
        let element = element.into();
        let description = element.to_string();

        let result = self
            .registries
            .check_element(element, &self.implementations)
            .and_then(|checked| self.registries.insert(checked));
        if result.is_ok() {
            debug!("Added {}", description);
        }
        self.record(result)
    }

    /// Delete a registered schema object.
    pub fn delete<T: SchemaEntity>(&mut self, object: &T) -> bool {
        self.delete_by_id(T::OBJECT_TYPE, object.oid())
    }

    /// Delete the object of `object_type` registered under `id` (OID or name).
    ///
    /// Fails if the object is not registered or another registered object
    /// still references it.
    pub fn delete_by_id(&mut self, object_type: SchemaObjectType, id: &str) -> bool {
        self.errors.clear();
        let result = self
            .registries
            .check_delete(object_type, id)
            .and_then(|oid| self.registries.remove(object_type, &oid))
            .map(|removed| debug!("Deleted {}", removed));
        self.record(result)
    }

    /// Errors recorded by the last mutating call.
    pub fn errors(&self) -> &[SchemaError] {
        &self.errors
    }

    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    pub fn config(&self) -> &SchemaManagerConfig {
        &self.config
    }

    pub fn loader(&self) -> &dyn SchemaLoader {
        self.loader.as_ref()
    }

    pub fn implementations(&self) -> &ImplementationRegistry {
        &self.implementations
    }

    /// Mutable access to the implementation table, to register custom
    /// comparators, normalizers and syntax checkers before adding the schema
    /// objects that name them.
    pub fn implementations_mut(&mut self) -> &mut ImplementationRegistry {
        &mut self.implementations
    }

    pub fn is_schema_loaded(&self, name: &str) -> bool {
        self.registries.is_schema_loaded(name)
    }

    /// Whether the schema is enabled. Loaded schemas are always enabled;
    /// otherwise the last `enable`/`disable` call wins, then the loader's
    /// descriptor. Unknown schemas are not enabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        if self.registries.is_schema_loaded(name) {
            return true;
        }
        if let Some(enabled) = self.enabled_overrides.get(&Schema::key(name)) {
            return *enabled;
        }
        self.loader
            .schema(name)
            .is_some_and(|schema| schema.enabled)
    }

    /// Loaded schemas, in load order.
    pub fn loaded_schemas(&self) -> impl Iterator<Item = &Schema> {
        self.registries.loaded_schemas()
    }

    pub fn attribute_type_registry(&self) -> &Registry<AttributeType> {
        self.registries.attribute_types()
    }

    pub fn object_class_registry(&self) -> &Registry<ObjectClass> {
        self.registries.object_classes()
    }

    pub fn matching_rule_registry(&self) -> &Registry<MatchingRule> {
        self.registries.matching_rules()
    }

    pub fn ldap_syntax_registry(&self) -> &Registry<LdapSyntax> {
        self.registries.ldap_syntaxes()
    }

    pub fn comparator_registry(&self) -> &Registry<Comparator> {
        self.registries.comparators()
    }

    pub fn normalizer_registry(&self) -> &Registry<Normalizer> {
        self.registries.normalizers()
    }

    pub fn syntax_checker_registry(&self) -> &Registry<SyntaxChecker> {
        self.registries.syntax_checkers()
    }

    pub fn lookup_attribute_type(&self, id: &str) -> Option<&AttributeType> {
        self.registries.attribute_type(id)
    }

    pub fn lookup_object_class(&self, id: &str) -> Option<&ObjectClass> {
        self.registries.object_class(id)
    }

    pub fn lookup_matching_rule(&self, id: &str) -> Option<&MatchingRule> {
        self.registries.matching_rule(id)
    }

    pub fn lookup_ldap_syntax(&self, id: &str) -> Option<&LdapSyntax> {
        self.registries.ldap_syntax(id)
    }

    pub fn lookup_comparator(&self, id: &str) -> Option<&Comparator> {
        self.registries.comparator(id)
    }

    pub fn lookup_normalizer(&self, id: &str) -> Option<&Normalizer> {
        self.registries.normalizer(id)
    }

    pub fn lookup_syntax_checker(&self, id: &str) -> Option<&SyntaxChecker> {
        self.registries.syntax_checker(id)
    }
}

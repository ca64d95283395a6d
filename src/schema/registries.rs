//! The aggregate of every schema registry.
//!
//! [`Registries`] owns one [`Registry`] per schema object type, the
//! [`GlobalOidRegistry`] and the map of loaded [`Schema`] descriptors. It is a
//! plain value: bulk operations clone it, work on the copy and swap the copy in
//! once everything succeeded.
//!
//! All cross references between schema objects are OIDs. The resolution
//! helpers here follow them at read time, falling back to the default
//! comparator and syntax checker when a reference cannot be followed.

use super::bundle::Schema;
use super::object::{SchemaEntity, SchemaObjectType};
use super::registry::{GlobalOidRegistry, Registry};
use super::types::{
    AttributeType, Comparator, LdapSyntax, MatchingRule, Normalizer, ObjectClass, SchemaElement,
    SyntaxChecker,
};
use crate::error::SchemaResult;
use crate::matching::comparators::ComparableComparator;
use crate::matching::syntax_checkers::OctetStringSyntaxChecker;
use crate::matching::{ValueComparator, ValueNormalizer, ValueSyntaxChecker};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Every schema registry plus the loaded schemas.
#[derive(Debug, Clone, Default)]
pub struct Registries {
    attribute_types: Registry<AttributeType>,
    object_classes: Registry<ObjectClass>,
    matching_rules: Registry<MatchingRule>,
    ldap_syntaxes: Registry<LdapSyntax>,
    comparators: Registry<Comparator>,
    normalizers: Registry<Normalizer>,
    syntax_checkers: Registry<SyntaxChecker>,
    global_oids: GlobalOidRegistry,
    schemas: BTreeMap<String, Schema>,
    load_order: Vec<String>,
}

impl Registries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute_types(&self) -> &Registry<AttributeType> {
        &self.attribute_types
    }

    pub fn object_classes(&self) -> &Registry<ObjectClass> {
        &self.object_classes
    }

    pub fn matching_rules(&self) -> &Registry<MatchingRule> {
        &self.matching_rules
    }

    pub fn ldap_syntaxes(&self) -> &Registry<LdapSyntax> {
        &self.ldap_syntaxes
    }

    pub fn comparators(&self) -> &Registry<Comparator> {
        &self.comparators
    }

    pub fn normalizers(&self) -> &Registry<Normalizer> {
        &self.normalizers
    }

    pub fn syntax_checkers(&self) -> &Registry<SyntaxChecker> {
        &self.syntax_checkers
    }

    pub fn global_oids(&self) -> &GlobalOidRegistry {
        &self.global_oids
    }

    pub fn attribute_type(&self, id: &str) -> Option<&AttributeType> {
        self.attribute_types.lookup(id)
    }

    pub fn object_class(&self, id: &str) -> Option<&ObjectClass> {
        self.object_classes.lookup(id)
    }

    pub fn matching_rule(&self, id: &str) -> Option<&MatchingRule> {
        self.matching_rules.lookup(id)
    }

    pub fn ldap_syntax(&self, id: &str) -> Option<&LdapSyntax> {
        self.ldap_syntaxes.lookup(id)
    }

    pub fn comparator(&self, id: &str) -> Option<&Comparator> {
        self.comparators.lookup(id)
    }

    pub fn normalizer(&self, id: &str) -> Option<&Normalizer> {
        self.normalizers.lookup(id)
    }

    pub fn syntax_checker(&self, id: &str) -> Option<&SyntaxChecker> {
        self.syntax_checkers.lookup(id)
    }

    /// Number of objects registered for `object_type`.
    pub fn size(&self, object_type: SchemaObjectType) -> usize {
        match object_type {
            SchemaObjectType::AttributeType => self.attribute_types.size(),
            SchemaObjectType::ObjectClass => self.object_classes.size(),
            SchemaObjectType::MatchingRule => self.matching_rules.size(),
            SchemaObjectType::LdapSyntax => self.ldap_syntaxes.size(),
            SchemaObjectType::Comparator => self.comparators.size(),
            SchemaObjectType::Normalizer => self.normalizers.size(),
            SchemaObjectType::SyntaxChecker => self.syntax_checkers.size(),
        }
    }

    /// Whether an object of `object_type` is registered under `id` (OID or
    /// name).
    pub fn contains(&self, object_type: SchemaObjectType, id: &str) -> bool {
        match object_type {
            SchemaObjectType::AttributeType => self.attribute_types.contains(id),
            SchemaObjectType::ObjectClass => self.object_classes.contains(id),
            SchemaObjectType::MatchingRule => self.matching_rules.contains(id),
            SchemaObjectType::LdapSyntax => self.ldap_syntaxes.contains(id),
            SchemaObjectType::Comparator => self.comparators.contains(id),
            SchemaObjectType::Normalizer => self.normalizers.contains(id),
            SchemaObjectType::SyntaxChecker => self.syntax_checkers.contains(id),
        }
    }

    /// A copy of the object of `object_type` registered under `id`.
    pub fn element(&self, object_type: SchemaObjectType, id: &str) -> Option<SchemaElement> {
        match object_type {
            SchemaObjectType::AttributeType => self.attribute_types.lookup(id).cloned().map(Into::into),
            SchemaObjectType::ObjectClass => self.object_classes.lookup(id).cloned().map(Into::into),
            SchemaObjectType::MatchingRule => self.matching_rules.lookup(id).cloned().map(Into::into),
            SchemaObjectType::LdapSyntax => self.ldap_syntaxes.lookup(id).cloned().map(Into::into),
            SchemaObjectType::Comparator => self.comparators.lookup(id).cloned().map(Into::into),
            SchemaObjectType::Normalizer => self.normalizers.lookup(id).cloned().map(Into::into),
            SchemaObjectType::SyntaxChecker => self.syntax_checkers.lookup(id).cloned().map(Into::into),
        }
    }

    /// Register an already validated object.
    ///
    /// Uniqueness is still enforced here: on failure nothing is registered.
    /// The object is recorded as owned by its schema when that schema is
    /// loaded.
    pub(crate) fn insert(&mut self, element: SchemaElement) -> SchemaResult<()> {
        let object_type = element.object_type();
        let oid = element.oid().to_string();
        let schema_key = Schema::key(&element.object().schema_name);

        if object_type.is_nameable() {
            self.global_oids.check_available(&oid, object_type)?;
        }

        match element {
            SchemaElement::AttributeType(e) => self.attribute_types.register(e)?,
            SchemaElement::ObjectClass(e) => self.object_classes.register(e)?,
            SchemaElement::MatchingRule(e) => self.matching_rules.register(e)?,
            SchemaElement::LdapSyntax(e) => self.ldap_syntaxes.register(e)?,
            SchemaElement::Comparator(e) => self.comparators.register(e)?,
            SchemaElement::Normalizer(e) => self.normalizers.register(e)?,
            SchemaElement::SyntaxChecker(e) => self.syntax_checkers.register(e)?,
        }

        if object_type.is_nameable() {
            self.global_oids.register(&oid, object_type)?;
        }
        if let Some(schema) = self.schemas.get_mut(&schema_key) {
            schema.add_owned(object_type, &oid);
        }
        Ok(())
    }

    /// Unregister the object of `object_type` stored under `oid`, without any
    /// reference check.
    pub(crate) fn remove(
        &mut self,
        object_type: SchemaObjectType,
        oid: &str,
    ) -> SchemaResult<SchemaElement> {
        let element: SchemaElement = match object_type {
            SchemaObjectType::AttributeType => self.attribute_types.unregister(oid)?.into(),
            SchemaObjectType::ObjectClass => self.object_classes.unregister(oid)?.into(),
            SchemaObjectType::MatchingRule => self.matching_rules.unregister(oid)?.into(),
            SchemaObjectType::LdapSyntax => self.ldap_syntaxes.unregister(oid)?.into(),
            SchemaObjectType::Comparator => self.comparators.unregister(oid)?.into(),
            SchemaObjectType::Normalizer => self.normalizers.unregister(oid)?.into(),
            SchemaObjectType::SyntaxChecker => self.syntax_checkers.unregister(oid)?.into(),
        };

        if object_type.is_nameable() {
            self.global_oids.unregister(oid)?;
        }
        let schema_key = Schema::key(&element.object().schema_name);
        if let Some(schema) = self.schemas.get_mut(&schema_key) {
            schema.remove_owned(object_type, oid);
        }
        Ok(element)
    }

    /// Objects that reference the object of `object_type` registered under
    /// `oid`, rendered for error messages.
    pub fn referrers(&self, object_type: SchemaObjectType, oid: &str) -> Vec<String> {
        fn describe<T: SchemaEntity>(object: &T) -> String {
            format!("{} {}", T::OBJECT_TYPE, object.object())
        }
        let is = |reference: &Option<String>| reference.as_deref() == Some(oid);

        match object_type {
            SchemaObjectType::AttributeType => {
                let subtypes = self
                    .attribute_types
                    .iter()
                    .filter(|at| is(&at.superior))
                    .map(describe);
                let classes = self
                    .object_classes
                    .iter()
                    .filter(|oc| oc.must.iter().chain(&oc.may).any(|a| a == oid))
                    .map(describe);
                subtypes.chain(classes).collect()
            }
            SchemaObjectType::ObjectClass => self
                .object_classes
                .iter()
                .filter(|oc| oc.superiors.iter().any(|s| s == oid))
                .map(describe)
                .collect(),
            SchemaObjectType::MatchingRule => self
                .attribute_types
                .iter()
                .filter(|at| is(&at.equality) || is(&at.ordering) || is(&at.substring))
                .map(describe)
                .collect(),
            SchemaObjectType::LdapSyntax => {
                let attributes = self
                    .attribute_types
                    .iter()
                    .filter(|at| is(&at.syntax))
                    .map(describe);
                let rules = self
                    .matching_rules
                    .iter()
                    .filter(|mr| mr.syntax == oid)
                    .map(describe);
                attributes.chain(rules).collect()
            }
            SchemaObjectType::Comparator => self
                .matching_rules
                .iter()
                .filter(|mr| comparator_oid(mr) == oid)
                .map(describe)
                .collect(),
            SchemaObjectType::Normalizer => self
                .matching_rules
                .iter()
                .filter(|mr| normalizer_oid(mr) == oid)
                .map(describe)
                .collect(),
            SchemaObjectType::SyntaxChecker => self
                .ldap_syntaxes
                .iter()
                .filter(|syntax| syntax_checker_oid(syntax) == oid)
                .map(describe)
                .collect(),
        }
    }

    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(&Schema::key(name))
    }

    pub fn is_schema_loaded(&self, name: &str) -> bool {
        self.schemas.contains_key(&Schema::key(name))
    }

    /// Loaded schemas, in the order they were merged.
    pub fn loaded_schemas(&self) -> impl Iterator<Item = &Schema> {
        self.load_order.iter().filter_map(|key| self.schemas.get(key))
    }

    pub(crate) fn add_schema(&mut self, schema: Schema) {
        let key = Schema::key(&schema.name);
        if !self.load_order.contains(&key) {
            self.load_order.push(key.clone());
        }
        self.schemas.insert(key, schema);
    }

    pub(crate) fn remove_schema(&mut self, name: &str) -> Option<Schema> {
        let key = Schema::key(name);
        self.load_order.retain(|loaded| *loaded != key);
        self.schemas.remove(&key)
    }

    /// The syntax of `at`, following the superior chain when `at` has none.
    pub fn syntax_of(&self, at: &AttributeType) -> Option<&LdapSyntax> {
        let mut current = at;
        for _ in 0..=self.attribute_types.size() {
            if let Some(syntax) = &current.syntax {
                return self.ldap_syntaxes.lookup(syntax);
            }
            current = self.attribute_types.lookup(current.superior.as_deref()?)?;
        }
        None
    }

    /// The matching rule used to match values of `at`.
    pub fn matching_rule_of(&self, at: &AttributeType) -> Option<&MatchingRule> {
        at.matching_rule()
            .and_then(|rule| self.matching_rules.lookup(rule))
    }

    /// Whether values of `at` are text. Attribute types without a resolvable
    /// syntax are treated as text.
    pub fn is_human_readable(&self, at: &AttributeType) -> bool {
        self.syntax_of(at).is_none_or(|syntax| syntax.human_readable)
    }

    /// The normalizer applied to values of `at`, if its matching rule has one.
    pub fn normalizer_for(&self, at: &AttributeType) -> Option<Arc<dyn ValueNormalizer>> {
        let rule = self.matching_rule_of(at)?;
        self.normalizers
            .lookup(normalizer_oid(rule))
            .and_then(|normalizer| normalizer.instance().cloned())
    }

    /// The comparator applied to values of `at`; `ComparableComparator` when
    /// none resolves.
    pub fn comparator_for(&self, at: &AttributeType) -> Arc<dyn ValueComparator> {
        self.matching_rule_of(at)
            .and_then(|rule| self.comparators.lookup(comparator_oid(rule)))
            .and_then(|comparator| comparator.instance().cloned())
            .unwrap_or_else(|| Arc::new(ComparableComparator))
    }

    /// The syntax checker applied to values of `at`;
    /// `OctetStringSyntaxChecker` when none resolves.
    pub fn syntax_checker_for(&self, at: &AttributeType) -> Arc<dyn ValueSyntaxChecker> {
        self.syntax_of(at)
            .and_then(|syntax| self.syntax_checkers.lookup(syntax_checker_oid(syntax)))
            .and_then(|checker| checker.instance().cloned())
            .unwrap_or_else(|| Arc::new(OctetStringSyntaxChecker))
    }

    /// `oc` and all of its transitive superiors, `oc` first. Unresolvable
    /// superiors are skipped.
    pub fn object_class_closure<'a>(&'a self, oc: &'a ObjectClass) -> Vec<&'a ObjectClass> {
        let mut seen = BTreeSet::new();
        let mut closure = Vec::new();
        let mut pending = vec![oc];
        while let Some(class) = pending.pop() {
            if !seen.insert(class.oid()) {
                continue;
            }
            closure.push(class);
            for superior in class.superiors.iter().rev() {
                if let Some(superior) = self.object_classes.lookup(superior) {
                    pending.push(superior);
                }
            }
        }
        closure
    }

    /// Whether `at` is `ancestor` or one of its subtypes.
    pub fn is_subtype_of(&self, at: &AttributeType, ancestor: &str) -> bool {
        let mut current = at;
        for _ in 0..=self.attribute_types.size() {
            if current.oid() == ancestor {
                return true;
            }
            match current
                .superior
                .as_deref()
                .and_then(|superior| self.attribute_types.lookup(superior))
            {
                Some(superior) => current = superior,
                None => return false,
            }
        }
        false
    }
}

/// OID of the comparator a matching rule uses: the explicit one, else the one
/// sharing the rule's OID.
pub(crate) fn comparator_oid(rule: &MatchingRule) -> &str {
    rule.comparator.as_deref().unwrap_or(rule.oid())
}

pub(crate) fn normalizer_oid(rule: &MatchingRule) -> &str {
    rule.normalizer.as_deref().unwrap_or(rule.oid())
}

pub(crate) fn syntax_checker_oid(syntax: &LdapSyntax) -> &str {
    syntax.syntax_checker.as_deref().unwrap_or(syntax.oid())
}

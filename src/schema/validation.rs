//! Referential integrity checks for schema mutations.
//!
//! These checks never mutate the registries. Adding an object goes through
//! [`Registries::check_element`], which returns the object with every name
//! reference rewritten to an OID (and, for attribute types, the unset
//! matching rules and syntax inherited from the superior) ready to be
//! inserted. Deleting goes through [`Registries::check_delete`].

use super::object::{SchemaEntity, SchemaObject, SchemaObjectType};
use super::registries::Registries;
use super::registry::Registry;
use super::types::{
    AttributeType, Comparator, LdapSyntax, MatchingRule, Normalizer, ObjectClass, SchemaElement,
    SyntaxChecker, Usage,
};
use crate::error::{SchemaError, SchemaResult};
use crate::matching::ImplementationRegistry;
use crate::oid;
use std::collections::BTreeSet;

fn resolve_reference<T: SchemaEntity>(
    registry: &Registry<T>,
    owner: &SchemaObject,
    role: &str,
    id: &str,
) -> SchemaResult<String> {
    registry.oid_of(id).map(str::to_string).ok_or_else(|| {
        SchemaError::violation(format!(
            "{} of {} references unknown {} '{}'",
            role,
            owner,
            T::OBJECT_TYPE,
            id
        ))
    })
}

fn resolve_optional<T: SchemaEntity>(
    registry: &Registry<T>,
    owner: &SchemaObject,
    role: &str,
    id: &Option<String>,
) -> SchemaResult<Option<String>> {
    id.as_deref()
        .map(|id| resolve_reference(registry, owner, role, id))
        .transpose()
}

/// Resolve a list of attribute type references, rejecting duplicates.
fn resolve_attribute_list(
    registry: &Registry<AttributeType>,
    owner: &SchemaObject,
    role: &str,
    ids: &[String],
) -> SchemaResult<Vec<String>> {
    let mut seen = BTreeSet::new();
    let mut resolved = Vec::with_capacity(ids.len());
    for id in ids {
        let oid = resolve_reference(registry, owner, role, id)?;
        if !seen.insert(oid.clone()) {
            return Err(SchemaError::violation(format!(
                "{} of {} lists attribute type {} twice",
                role, owner, oid
            )));
        }
        resolved.push(oid);
    }
    Ok(resolved)
}

impl Registries {
    /// Validate an object before it is added.
    ///
    /// The owning schema must be loaded and the OID well formed. On success
    /// the returned object is ready to be inserted.
    pub(crate) fn check_element(
        &self,
        element: SchemaElement,
        implementations: &ImplementationRegistry,
    ) -> SchemaResult<SchemaElement> {
        let object = element.object();
        if !self.is_schema_loaded(&object.schema_name) {
            return Err(SchemaError::unknown_schema(&object.schema_name));
        }
        if !oid::is_valid(&object.oid) {
            return Err(SchemaError::violation(format!(
                "'{}' is not a valid numeric OID",
                object.oid
            )));
        }

        Ok(match element {
            SchemaElement::AttributeType(e) => self.check_attribute_type(e)?.into(),
            SchemaElement::ObjectClass(e) => self.check_object_class(e)?.into(),
            SchemaElement::MatchingRule(e) => self.check_matching_rule(e)?.into(),
            SchemaElement::LdapSyntax(e) => self.check_ldap_syntax(e)?.into(),
            SchemaElement::Comparator(e) => check_comparator(self.comparators(), e, implementations)?.into(),
            SchemaElement::Normalizer(e) => check_normalizer(self.normalizers(), e, implementations)?.into(),
            SchemaElement::SyntaxChecker(e) => {
                check_syntax_checker(self.syntax_checkers(), e, implementations)?.into()
            }
        })
    }

    fn check_available<T: SchemaEntity>(&self, registry: &Registry<T>, object: &T) -> SchemaResult<()> {
        if T::OBJECT_TYPE.is_nameable() {
            self.global_oids().check_available(object.oid(), T::OBJECT_TYPE)?;
        }
        registry.check_available(object)
    }

    fn check_attribute_type(&self, mut at: AttributeType) -> SchemaResult<AttributeType> {
        let registry = self.attribute_types();
        self.check_available(registry, &at)?;

        if let Some(superior_id) = at.superior.clone() {
            if at.object.has_id(&superior_id) {
                return Err(SchemaError::violation(format!(
                    "attribute type {} cannot be its own superior",
                    at.object
                )));
            }
            let superior = registry.lookup(&superior_id).ok_or_else(|| {
                SchemaError::violation(format!(
                    "superior of {} references unknown attribute type '{}'",
                    at.object, superior_id
                ))
            })?;
            if superior.usage != at.usage {
                return Err(SchemaError::violation(format!(
                    "attribute type {} has usage {} but its superior {} has usage {}",
                    at.object,
                    at.usage,
                    superior.object,
                    superior.usage
                )));
            }

            at.superior = Some(superior.oid().to_string());
            if at.syntax.is_none() {
                at.syntax = superior.syntax.clone();
                at.syntax_length = at.syntax_length.or(superior.syntax_length);
            }
            at.equality = at.equality.take().or_else(|| superior.equality.clone());
            at.ordering = at.ordering.take().or_else(|| superior.ordering.clone());
            at.substring = at.substring.take().or_else(|| superior.substring.clone());
        }

        let Some(syntax) = at.syntax.as_deref() else {
            return Err(SchemaError::violation(format!(
                "attribute type {} has no syntax and no superior to inherit one from",
                at.object
            )));
        };
        let syntax = resolve_reference(self.ldap_syntaxes(), &at.object, "syntax", syntax)?;
        at.syntax = Some(syntax);

        let rules = self.matching_rules();
        at.equality = resolve_optional(rules, &at.object, "equality", &at.equality)?;
        at.ordering = resolve_optional(rules, &at.object, "ordering", &at.ordering)?;
        at.substring = resolve_optional(rules, &at.object, "substring", &at.substring)?;

        if at.collective && at.usage != Usage::UserApplications {
            return Err(SchemaError::violation(format!(
                "collective attribute type {} must have userApplications usage",
                at.object
            )));
        }
        if at.no_user_modification && at.usage == Usage::UserApplications {
            return Err(SchemaError::violation(format!(
                "attribute type {} is not user modifiable and must be operational",
                at.object
            )));
        }
        Ok(at)
    }

    fn check_object_class(&self, mut oc: ObjectClass) -> SchemaResult<ObjectClass> {
        let registry = self.object_classes();
        self.check_available(registry, &oc)?;

        let mut superiors: Vec<&ObjectClass> = Vec::with_capacity(oc.superiors.len());
        for id in &oc.superiors {
            if oc.object.has_id(id) {
                return Err(SchemaError::violation(format!(
                    "object class {} cannot be its own superior",
                    oc.object
                )));
            }
            let superior = registry.lookup(id).ok_or_else(|| {
                SchemaError::violation(format!(
                    "superior of {} references unknown object class '{}'",
                    oc.object, id
                ))
            })?;
            if superiors.iter().any(|s| s.oid() == superior.oid()) {
                return Err(SchemaError::violation(format!(
                    "object class {} lists superior {} twice",
                    oc.object, superior.object
                )));
            }
            if !oc.kind.accepts_superior(superior.kind) {
                return Err(SchemaError::violation(format!(
                    "{} object class {} cannot inherit from {} object class {}",
                    oc.kind, oc.object, superior.kind, superior.object
                )));
            }
            superiors.push(superior);
        }

        let attributes = self.attribute_types();
        let must = resolve_attribute_list(attributes, &oc.object, "MUST", &oc.must)?;
        let may = resolve_attribute_list(attributes, &oc.object, "MAY", &oc.may)?;
        if let Some(both) = must.iter().find(|oid| may.contains(oid)) {
            return Err(SchemaError::violation(format!(
                "object class {} lists attribute type {} in both MUST and MAY",
                oc.object, both
            )));
        }

        let inherited_must: BTreeSet<&str> = superiors
            .iter()
            .flat_map(|superior| self.object_class_closure(*superior))
            .flat_map(|class| class.must.iter().map(String::as_str))
            .collect();
        if let Some(widened) = may.iter().find(|oid| inherited_must.contains(oid.as_str())) {
            return Err(SchemaError::violation(format!(
                "object class {} lists attribute type {} in MAY although a superior requires it",
                oc.object, widened
            )));
        }

        oc.superiors = superiors.iter().map(|s| s.oid().to_string()).collect();
        oc.must = must;
        oc.may = may;
        Ok(oc)
    }

    fn check_matching_rule(&self, mut mr: MatchingRule) -> SchemaResult<MatchingRule> {
        self.check_available(self.matching_rules(), &mr)?;

        if mr.syntax.is_empty() {
            return Err(SchemaError::violation(format!(
                "matching rule {} has no syntax",
                mr.object
            )));
        }
        mr.syntax = resolve_reference(self.ldap_syntaxes(), &mr.object, "syntax", &mr.syntax)?;
        mr.comparator = resolve_optional(self.comparators(), &mr.object, "comparator", &mr.comparator)?;
        mr.normalizer = resolve_optional(self.normalizers(), &mr.object, "normalizer", &mr.normalizer)?;
        Ok(mr)
    }

    fn check_ldap_syntax(&self, mut syntax: LdapSyntax) -> SchemaResult<LdapSyntax> {
        self.check_available(self.ldap_syntaxes(), &syntax)?;
        syntax.syntax_checker = resolve_optional(
            self.syntax_checkers(),
            &syntax.object,
            "syntax checker",
            &syntax.syntax_checker,
        )?;
        Ok(syntax)
    }

    /// Validate a delete. Returns the OID of the registered object.
    pub(crate) fn check_delete(&self, object_type: SchemaObjectType, id: &str) -> SchemaResult<String> {
        let oid = self
            .element(object_type, id)
            .map(|element| element.oid().to_string())
            .ok_or_else(|| SchemaError::violation(format!("no {} is registered as '{}'", object_type, id)))?;

        let referrers = self.referrers(object_type, &oid);
        if !referrers.is_empty() {
            return Err(SchemaError::violation(format!(
                "{} {} is still referenced by {}",
                object_type,
                oid,
                referrers.join(", ")
            )));
        }
        Ok(oid)
    }
}

fn unknown_implementation(object: &SchemaObject, kind: SchemaObjectType, id: &str) -> SchemaError {
    SchemaError::violation(format!(
        "{} {} names unknown implementation '{}'",
        kind, object, id
    ))
}

fn check_comparator(
    registry: &Registry<Comparator>,
    mut comparator: Comparator,
    implementations: &ImplementationRegistry,
) -> SchemaResult<Comparator> {
    registry.check_available(&comparator)?;
    let instance = implementations
        .comparator(&comparator.implementation)
        .ok_or_else(|| {
            unknown_implementation(&comparator.object, Comparator::OBJECT_TYPE, &comparator.implementation)
        })?;
    comparator.bind(instance);
    Ok(comparator)
}

fn check_normalizer(
    registry: &Registry<Normalizer>,
    mut normalizer: Normalizer,
    implementations: &ImplementationRegistry,
) -> SchemaResult<Normalizer> {
    registry.check_available(&normalizer)?;
    let instance = implementations
        .normalizer(&normalizer.implementation)
        .ok_or_else(|| {
            unknown_implementation(&normalizer.object, Normalizer::OBJECT_TYPE, &normalizer.implementation)
        })?;
    normalizer.bind(instance);
    Ok(normalizer)
}

fn check_syntax_checker(
    registry: &Registry<SyntaxChecker>,
    mut checker: SyntaxChecker,
    implementations: &ImplementationRegistry,
) -> SchemaResult<SyntaxChecker> {
    registry.check_available(&checker)?;
    let instance = implementations
        .syntax_checker(&checker.implementation)
        .ok_or_else(|| {
            unknown_implementation(&checker.object, SyntaxChecker::OBJECT_TYPE, &checker.implementation)
        })?;
    checker.bind(instance);
    Ok(checker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::schema::bundle::Schema;
    use crate::schema::types::ObjectClassKind;

    const DIRECTORY_STRING: &str = "1.3.6.1.4.1.1466.115.121.1.15";

    fn registries() -> Registries {
        let mut registries = Registries::new();
        registries.add_schema(Schema::new("test"));
        let implementations = ImplementationRegistry::new();
        let elements: Vec<SchemaElement> = vec![
            Normalizer::new("2.5.13.2", "DeepTrimToLowerNormalizer").into(),
            LdapSyntax::new(DIRECTORY_STRING).into(),
            MatchingRule::new("2.5.13.2", DIRECTORY_STRING)
                .with_names(["caseIgnoreMatch"])
                .into(),
            AttributeType::new("2.5.4.41")
                .with_names(["name"])
                .with_syntax(DIRECTORY_STRING)
                .with_equality("caseIgnoreMatch")
                .into(),
            AttributeType::new("2.5.4.3")
                .with_names(["cn"])
                .with_superior("name")
                .into(),
            AttributeType::new("2.5.4.13")
                .with_names(["description"])
                .with_syntax(DIRECTORY_STRING)
                .into(),
            ObjectClass::new("2.5.6.0")
                .with_names(["top"])
                .with_kind(ObjectClassKind::Abstract)
                .into(),
            ObjectClass::new("2.5.6.6")
                .with_names(["person"])
                .with_superiors(["top"])
                .with_must(["cn"])
                .with_may(["description"])
                .into(),
        ];
        for mut element in elements {
            element.object_mut().schema_name = "test".to_string();
            let checked = registries.check_element(element, &implementations).unwrap();
            registries.insert(checked).unwrap();
        }
        registries
    }

    fn check(registries: &Registries, element: impl Into<SchemaElement>) -> SchemaResult<SchemaElement> {
        let mut element = element.into();
        element.object_mut().schema_name = "test".to_string();
        registries.check_element(element, &ImplementationRegistry::new())
    }

    #[test]
    fn test_names_are_resolved_and_inherited() {
        let registries = registries();
        let cn = registries.attribute_type("cn").unwrap();
        assert_eq!(cn.superior.as_deref(), Some("2.5.4.41"));
        assert_eq!(cn.equality.as_deref(), Some("2.5.13.2"));
        assert_eq!(cn.syntax.as_deref(), Some(DIRECTORY_STRING));

        let person = registries.object_class("person").unwrap();
        assert_eq!(person.superiors, vec!["2.5.6.0"]);
        assert_eq!(person.must, vec!["2.5.4.3"]);
    }

    #[test]
    fn test_unknown_schema_is_not_supported() {
        let registries = registries();
        let error = registries
            .check_element(
                AttributeType::new("1.1.1").in_schema("bogus").into(),
                &ImplementationRegistry::new(),
            )
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::OperationNotSupported);
    }

    #[test]
    fn test_attribute_type_violations() {
        let registries = registries();
        // Malformed OID
        assert!(check(&registries, AttributeType::new("1.02.3").with_syntax(DIRECTORY_STRING)).is_err());
        // No syntax anywhere
        assert!(check(&registries, AttributeType::new("1.1.1")).is_err());
        // Self superior
        assert!(check(
            &registries,
            AttributeType::new("1.1.1").with_names(["x"]).with_superior("x")
        )
        .is_err());
        // Usage mismatch with superior
        assert!(check(
            &registries,
            AttributeType::new("1.1.1")
                .with_superior("name")
                .with_usage(Usage::DirectoryOperation)
        )
        .is_err());
        // Unknown matching rule
        assert!(check(
            &registries,
            AttributeType::new("1.1.1")
                .with_syntax(DIRECTORY_STRING)
                .with_ordering("2.5.13.3")
        )
        .is_err());
        // Collective must be a user attribute
        assert!(check(
            &registries,
            AttributeType::new("1.1.1")
                .with_syntax(DIRECTORY_STRING)
                .with_usage(Usage::DirectoryOperation)
                .collective()
        )
        .is_err());
        // Not user modifiable must be operational
        assert!(check(
            &registries,
            AttributeType::new("1.1.1").with_syntax(DIRECTORY_STRING).read_only()
        )
        .is_err());
        assert!(check(
            &registries,
            AttributeType::new("1.1.1")
                .with_syntax(DIRECTORY_STRING)
                .with_usage(Usage::DirectoryOperation)
                .read_only()
        )
        .is_ok());
    }

    #[test]
    fn test_object_class_violations() {
        let registries = registries();
        let duplicate_must = ObjectClass::new("1.1.2").with_superiors(["top"]).with_must(["cn", "2.5.4.3"]);
        assert!(check(&registries, duplicate_must).is_err());

        let must_and_may = ObjectClass::new("1.1.2").with_must(["cn"]).with_may(["2.5.4.3"]);
        assert!(check(&registries, must_and_may).is_err());

        let duplicate_superior = ObjectClass::new("1.1.2").with_superiors(["top", "2.5.6.0"]);
        assert!(check(&registries, duplicate_superior).is_err());

        let auxiliary_of_structural = ObjectClass::new("1.1.2")
            .with_kind(ObjectClassKind::Auxiliary)
            .with_superiors(["person"]);
        assert!(check(&registries, auxiliary_of_structural).is_err());

        let unknown_attribute = ObjectClass::new("1.1.2").with_may(["bogus"]);
        assert!(check(&registries, unknown_attribute).is_err());
    }

    #[test]
    fn test_must_may_asymmetry() {
        let registries = registries();
        let narrowing = ObjectClass::new("1.1.3")
            .with_superiors(["person"])
            .with_must(["description"]);
        assert!(check(&registries, narrowing).is_ok());

        let widening = ObjectClass::new("1.1.3")
            .with_superiors(["person"])
            .with_may(["cn"]);
        assert!(check(&registries, widening).is_err());
    }

    #[test]
    fn test_executables_need_known_implementations() {
        let registries = registries();
        assert!(check(&registries, Comparator::new("2.5.13.2", "StringComparator")).is_ok());
        assert!(check(&registries, Comparator::new("2.5.13.2", "org.example.Missing")).is_err());
        // Normalizer OIDs are scoped to the normalizer registry
        assert!(check(&registries, Normalizer::new("2.5.13.2", "NoOpNormalizer")).is_err());
    }

    #[test]
    fn test_delete_checks_referrers() {
        let registries = registries();
        assert!(registries
            .check_delete(SchemaObjectType::MatchingRule, "caseIgnoreMatch")
            .is_err());
        assert!(registries
            .check_delete(SchemaObjectType::AttributeType, "cn")
            .is_err());
        assert_eq!(
            registries
                .check_delete(SchemaObjectType::ObjectClass, "person")
                .unwrap(),
            "2.5.6.6"
        );
        assert!(registries
            .check_delete(SchemaObjectType::ObjectClass, "bogus")
            .is_err());
    }
}

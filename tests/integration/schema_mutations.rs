//! Add and delete scenarios with referential integrity checks.

use crate::common::{RegistrySizes, loaded_manager};
use ldap_schema::error::ErrorKind;
use ldap_schema::schema::{
    AttributeType, LdapSyntax, MatchingRule, Normalizer, ObjectClass, ObjectClassKind,
    SchemaElement, SchemaEntity, SchemaObjectType, SyntaxChecker, Usage,
};

#[test]
fn test_failed_mutations_are_atomic() {
    let mut manager = loaded_manager();
    let before = RegistrySizes::of(manager.registries());

    let failures: Vec<SchemaElement> = vec![
        // Name already used by another attribute type
        AttributeType::new("1.3.6.1.4.1.18060.0.4.1.2.10")
            .with_names(["badge", "CN"])
            .with_superior("name")
            .in_schema("core")
            .into(),
        // OID already used by a syntax
        ObjectClass::new("1.3.6.1.4.1.1466.115.121.1.15")
            .with_superiors(["top"])
            .in_schema("core")
            .into(),
        // Unknown MUST attribute
        ObjectClass::new("1.3.6.1.4.1.18060.0.4.1.3.10")
            .with_superiors(["top"])
            .with_must(["noSuchAttribute"])
            .in_schema("core")
            .into(),
        // Auxiliary class inheriting from a structural one
        ObjectClass::new("1.3.6.1.4.1.18060.0.4.1.3.11")
            .with_kind(ObjectClassKind::Auxiliary)
            .with_superiors(["person"])
            .in_schema("core")
            .into(),
        // Matching rule over an unknown syntax
        MatchingRule::new("1.3.6.1.4.1.18060.0.4.1.1.10", "1.3.6.1.4.1.18060.0.4.1.0.10")
            .in_schema("core")
            .into(),
        // Syntax naming an unknown syntax checker
        LdapSyntax::new("1.3.6.1.4.1.18060.0.4.1.0.11")
            .with_syntax_checker("1.3.6.1.4.1.18060.0.4.1.0.11")
            .in_schema("core")
            .into(),
        // Unknown implementation identifier
        Normalizer::new("1.3.6.1.4.1.18060.0.4.1.1.12", "com.example.Normalizer")
            .in_schema("core")
            .into(),
        // Malformed OID
        SyntaxChecker::new("not-an-oid", "OctetStringSyntaxChecker")
            .in_schema("core")
            .into(),
    ];

    for element in failures {
        let description = element.to_string();
        assert!(!manager.add(element), "{} should be rejected", description);
        assert_eq!(manager.errors().len(), 1);
        assert_eq!(manager.errors()[0].kind(), ErrorKind::SchemaViolation);
        assert_eq!(RegistrySizes::of(manager.registries()), before, "{}", description);
    }

    assert!(!manager.delete_by_id(SchemaObjectType::ObjectClass, "noSuchClass"));
    assert!(!manager.delete_by_id(SchemaObjectType::ObjectClass, "top"));
    assert_eq!(RegistrySizes::of(manager.registries()), before);
}

#[test]
fn test_operational_subtype_inherits_from_superior() {
    let mut manager = loaded_manager();

    let subtype = AttributeType::new("1.1.0")
        .with_superior("2.5.18.4")
        .with_usage(Usage::DirectoryOperation)
        .in_schema("system");
    assert!(manager.add(subtype), "{:?}", manager.errors());

    let added = manager.lookup_attribute_type("1.1.0").unwrap();
    assert_eq!(added.superior.as_deref(), Some("2.5.18.4"));
    assert_eq!(added.syntax.as_deref(), Some("1.3.6.1.4.1.1466.115.121.1.12"));
    assert_eq!(added.equality.as_deref(), Some("2.5.13.1"));
    assert!(added.usage.is_operational());

    let modifiers_name = manager.lookup_attribute_type("modifiersName").unwrap();
    assert!(manager.registries().is_subtype_of(added, modifiers_name.oid()));
}

#[test]
fn test_matching_rule_and_attribute_type_round_trip() {
    let mut manager = loaded_manager();
    let before = RegistrySizes::of(manager.registries());

    let rule = MatchingRule::new("1.3.6.1.4.1.18060.0.4.1.1.20", "1.3.6.1.4.1.1466.115.121.1.15")
        .with_names(["badgeMatch"])
        .with_comparator("2.5.13.2")
        .with_normalizer("2.5.13.2")
        .in_schema("core");
    let attribute = AttributeType::new("1.3.6.1.4.1.18060.0.4.1.2.20")
        .with_names(["badgeNumber"])
        .with_syntax("1.3.6.1.4.1.1466.115.121.1.15")
        .with_equality("badgeMatch")
        .in_schema("core");

    // The rule must exist before the attribute can use it
    assert!(!manager.add(attribute.clone()));
    assert!(manager.add(rule.clone()));
    assert!(manager.add(attribute.clone()));

    // Nor can the rule go while the attribute uses it
    assert!(!manager.delete(&rule));
    assert!(manager.delete(&attribute));
    assert!(manager.delete(&rule));

    assert_eq!(RegistrySizes::of(manager.registries()), before);
}

#[test]
fn test_names_are_scoped_per_object_type() {
    let mut manager = loaded_manager();

    // Attribute type and object class may share a name
    let class = ObjectClass::new("1.3.6.1.4.1.18060.0.4.1.3.20")
        .with_names(["mail"])
        .with_kind(ObjectClassKind::Auxiliary)
        .with_may(["mail"])
        .in_schema("cosine");
    assert!(manager.add(class));
    assert_eq!(
        manager.lookup_object_class("mail").unwrap().oid(),
        "1.3.6.1.4.1.18060.0.4.1.3.20"
    );
    assert_eq!(
        manager.lookup_attribute_type("mail").unwrap().oid(),
        "0.9.2342.19200300.100.1.3"
    );

    // Two object classes may not
    let clash = ObjectClass::new("1.3.6.1.4.1.18060.0.4.1.3.21")
        .with_names(["Mail"])
        .with_kind(ObjectClassKind::Auxiliary)
        .in_schema("cosine");
    assert!(!manager.add(clash));
}

#[test]
fn test_object_class_may_not_relax_inherited_must() {
    let mut manager = loaded_manager();

    let widened = ObjectClass::new("1.3.6.1.4.1.18060.0.4.1.3.30")
        .with_superiors(["person"])
        .with_may(["sn"])
        .in_schema("core");
    assert!(!manager.add(widened));

    // Requiring an attribute a superior only allows is fine
    let narrowed = ObjectClass::new("1.3.6.1.4.1.18060.0.4.1.3.31")
        .with_names(["securePerson"])
        .with_superiors(["person"])
        .with_must(["userPassword"])
        .in_schema("core");
    assert!(manager.add(narrowed), "{:?}", manager.errors());
}

#[test]
fn test_delete_reports_every_referrer() {
    let mut manager = loaded_manager();
    assert!(!manager.delete_by_id(SchemaObjectType::AttributeType, "userPassword"));

    let message = manager.errors()[0].message().to_string();
    for referrer in ["person", "organization", "organizationalUnit", "domain", "simpleSecurityObject"] {
        assert!(message.contains(referrer), "{} missing from: {}", referrer, message);
    }
}

//! Property tests over schema mutations and value matching.

use crate::common::{RegistrySizes, loaded_manager};
use ldap_schema::entry::{RawValue, ServerValue};
use ldap_schema::oid;
use ldap_schema::schema::{AttributeType, ObjectClass, ObjectClassKind, SchemaElement};
use proptest::prelude::*;

prop_compose! {
    fn private_oid()(arc in 1u32..100_000) -> String {
        format!("1.3.6.1.4.1.18060.0.4.9.{}", arc)
    }
}

/// Elements that can never be added to the embedded schemas
fn rejected_element() -> impl Strategy<Value = SchemaElement> {
    let taken_name = prop::sample::select(vec!["cn", "SN", "mail", "uid", "Description"]);
    let unknown = "[a-z]{4,10}".prop_map(|name| format!("zz{}", name));

    prop_oneof![
        (private_oid(), taken_name).prop_map(|(oid, name)| -> SchemaElement {
            AttributeType::new(oid)
                .with_names([name])
                .with_superior("name")
                .in_schema("core")
                .into()
        }),
        (private_oid(), unknown.clone()).prop_map(|(oid, superior)| -> SchemaElement {
            AttributeType::new(oid)
                .with_superior(superior)
                .in_schema("core")
                .into()
        }),
        (private_oid(), unknown.clone()).prop_map(|(oid, must)| -> SchemaElement {
            ObjectClass::new(oid)
                .with_superiors(["top"])
                .with_must([must])
                .in_schema("core")
                .into()
        }),
        private_oid().prop_map(|oid| -> SchemaElement {
            ObjectClass::new(oid)
                .with_kind(ObjectClassKind::Abstract)
                .with_superiors(["person"])
                .in_schema("core")
                .into()
        }),
        (private_oid(), unknown).prop_map(|(oid, schema)| -> SchemaElement {
            AttributeType::new(oid)
                .with_superior("name")
                .in_schema(schema)
                .into()
        }),
    ]
}

/// Dotted numeric OIDs under one of the three roots
fn numeric_oid() -> impl Strategy<Value = String> {
    let arc = prop_oneof![Just("0".to_string()), "[1-9][0-9]{0,8}"];
    (0u8..3, prop::collection::vec(arc, 1..8)).prop_map(|(root, arcs)| {
        format!("{}.{}", root, arcs.join("."))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_rejected_adds_leave_registries_unchanged(element in rejected_element()) {
        let mut manager = loaded_manager();
        let before = RegistrySizes::of(manager.registries());

        prop_assert!(!manager.add(element));
        prop_assert_eq!(manager.errors().len(), 1);
        prop_assert_eq!(RegistrySizes::of(manager.registries()), before);
    }

    #[test]
    fn prop_case_ignore_normalization(words in prop::collection::vec("[A-Za-z]{1,8}", 1..5), pad in 0usize..4) {
        let manager = loaded_manager();
        let registries = manager.registries();
        let cn = manager.lookup_attribute_type("cn").unwrap();

        let spaced = format!("{}{}{}", " ".repeat(pad), words.join("  "), " ".repeat(pad));
        let value = ServerValue::new(cn, spaced.as_str());
        let normalized = value.normalized(registries).unwrap().cloned().unwrap();

        // Normalizing again is a no-op
        let again = ServerValue::new(cn, normalized.clone());
        prop_assert_eq!(again.normalized(registries).unwrap(), Some(&normalized));

        let expected = RawValue::from(words.join(" ").to_lowercase());
        prop_assert_eq!(&normalized, &expected);

        let upper = ServerValue::new(cn, words.join(" ").to_uppercase());
        prop_assert!(value.equals(&upper, registries).unwrap());
    }

    #[test]
    fn prop_numeric_oids_are_valid(value in numeric_oid()) {
        prop_assert!(oid::is_valid(&value));
        let leading_dot = format!(".{}", value);
        prop_assert!(!oid::is_valid(&leading_dot));
        let trailing_dot = format!("{}.", value);
        prop_assert!(!oid::is_valid(&trailing_dot));
    }
}

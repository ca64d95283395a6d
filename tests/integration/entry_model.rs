//! Values, attributes and entries checked against the embedded schemas.

use crate::common::fixtures::loader_with;
use crate::common::loaded_manager;
use ldap_schema::entry::{RawValue, ServerAttribute, ServerEntry, ServerValue};
use ldap_schema::error::AttributeError;
use ldap_schema::schema::Registries;
use ldap_schema::schema_manager::SchemaManager;
use std::cmp::Ordering;

fn texts<const N: usize>(values: [&str; N]) -> [RawValue; N] {
    values.map(RawValue::from)
}

fn person(registries: &Registries) -> ServerEntry {
    let mut entry = ServerEntry::new(registries, "uid=jdoe,ou=people,dc=example,dc=com").unwrap();
    entry
        .put(registries, "objectClass", texts(["inetOrgPerson"]))
        .unwrap();
    entry.put(registries, "cn", texts(["John Doe"])).unwrap();
    entry.put(registries, "sn", texts(["Doe"])).unwrap();
    entry
}

#[test]
fn test_value_normalization_through_matching_rule() {
    let manager = loaded_manager();
    let registries = manager.registries();
    let cn = manager.lookup_attribute_type("commonName").unwrap();

    let value = ServerValue::new(cn, "  John   DOE ");
    assert_eq!(
        value.normalized(registries).unwrap(),
        Some(&RawValue::from("john doe"))
    );
    assert!(value.is_valid(registries));

    let same = ServerValue::new(cn, "john doe");
    let later = ServerValue::new(cn, "Mary Major");
    assert!(value.equals(&same, registries).unwrap());
    assert_eq!(value.compare_to(&later, registries).unwrap(), Ordering::Less);

    // Binary content never reaches a text normalizer as text
    let jpeg = manager.lookup_attribute_type("jpegPhoto").unwrap();
    let photo = ServerValue::new(jpeg, vec![0xffu8, 0xd8, 0xff, 0xe0]);
    assert!(photo.is_valid(registries));
    assert_eq!(
        photo.normalized(registries).unwrap(),
        Some(&RawValue::from(vec![0xffu8, 0xd8, 0xff, 0xe0]))
    );
}

#[test]
fn test_attribute_kind_follows_syntax() {
    let manager = loaded_manager();
    let registries = manager.registries();

    let mut cn = ServerAttribute::new(registries, "cn").unwrap();
    assert!(cn.is_human_readable());
    assert!(matches!(
        cn.add_values(registries, [vec![0x01u8]]),
        Err(AttributeError::InvalidAttributeValue { .. })
    ));

    let mut photo = ServerAttribute::new(registries, "jpegPhoto").unwrap();
    assert!(!photo.is_human_readable());
    assert!(photo.add_values(registries, ["not a picture"]).is_err());
    assert_eq!(photo.add_values(registries, [vec![0xffu8, 0xd8]]).unwrap(), 1);

    assert!(matches!(
        ServerAttribute::new(registries, "gecos"),
        Err(AttributeError::NoSuchAttribute { .. })
    ));
}

#[test]
fn test_values_are_unique_under_the_matching_rule() {
    let manager = loaded_manager();
    let registries = manager.registries();

    let mut cn = ServerAttribute::new(registries, "cn").unwrap();
    assert_eq!(
        cn.add(registries, texts(["John Doe", "JOHN  DOE", "Johnny"])).unwrap(),
        2
    );
    assert!(cn.contains(registries, " john doe ").unwrap());
    assert!(cn.instance_of(registries, "name"));
    assert!(!cn.instance_of(registries, "sn"));

    assert!(!cn.remove_all(registries, texts(["johnny", "Jane"])).unwrap());
    assert_eq!(cn.size(), 1);
    assert!(cn.remove(registries, "John Doe").unwrap());
    assert!(cn.is_empty());
}

#[test]
fn test_single_valued_attribute() {
    let manager = loaded_manager();
    let registries = manager.registries();

    let mut display_name = ServerAttribute::new(registries, "displayName").unwrap();
    assert!(display_name.is_single_valued());
    display_name.add_values(registries, ["John"]).unwrap();
    assert!(matches!(
        display_name.add_values(registries, ["Johnny"]),
        Err(AttributeError::ConstraintViolation { .. })
    ));
    assert_eq!(display_name.add_values(registries, ["JOHN"]).unwrap(), 0);
    assert_eq!(display_name.size(), 1);
    assert!(display_name.is_valid(registries));
}

#[test]
fn test_object_class_closure_on_entry() {
    let manager = loaded_manager();
    let registries = manager.registries();
    let mut entry = person(registries);

    for class in ["inetOrgPerson", "organizationalPerson", "person", "top"] {
        assert!(entry.has_object_class(registries, class), "{}", class);
    }
    let classes = entry.object_class();
    assert_eq!(classes.size(), 1);
    assert_eq!(classes.structural_classes().len(), 3);
    assert!(classes.must_attributes().contains("2.5.4.4"));
    assert!(classes.may_attributes().contains("0.9.2342.19200300.100.1.3"));

    // Listing a superior again changes nothing
    assert_eq!(entry.add(registries, "objectClass", texts(["person"])).unwrap(), 0);

    assert!(entry
        .remove_values(registries, "objectClass", texts(["inetOrgPerson"]))
        .unwrap());
    assert!(!entry.has_object_class(registries, "person"));
    assert!(entry.object_class().is_empty());
}

#[test]
fn test_entry_attribute_access() {
    let manager = loaded_manager();
    let registries = manager.registries();
    let mut entry = person(registries);

    assert_eq!(entry.size(), 3);
    assert!(entry.contains(registries, "commonName"));
    assert!(entry.contains_value(registries, "surname", "DOE").unwrap());
    assert_eq!(entry.get(registries, "2.5.4.3").unwrap().up_id(), "cn");

    assert_eq!(
        entry.add(registries, "mail", texts(["jdoe@example.com"])).unwrap(),
        1
    );
    assert!(!entry
        .remove_values(registries, "mail", texts(["jdoe@example.com", "other@example.com"]))
        .unwrap());
    assert!(!entry.contains(registries, "mail"));

    let previous = entry.put(registries, "cn", texts(["Johnny"])).unwrap().unwrap();
    assert_eq!(previous.size(), 1);
    assert!(entry.contains_value(registries, "cn", "johnny").unwrap());

    assert!(entry.remove(registries, "sn").unwrap().is_some());
    assert!(entry.remove(registries, "sn").unwrap().is_none());
    assert!(matches!(
        entry.remove(registries, "bogus"),
        Err(AttributeError::NoSuchAttribute { .. })
    ));

    entry.clear();
    assert_eq!(entry.size(), 1);
    assert_eq!(entry.attributes().count(), 1);
}

#[test]
fn test_entry_check() {
    let manager = loaded_manager();
    let registries = manager.registries();

    let mut entry = person(registries);
    entry
        .put(registries, "createTimestamp", texts(["20240101120000Z"]))
        .unwrap();
    entry.check(registries).unwrap();

    let mut missing = entry.clone();
    missing.remove(registries, "sn").unwrap();
    assert!(matches!(
        missing.check(registries),
        Err(AttributeError::ObjectClassViolation { .. })
    ));

    // A required attribute without values is missing too
    let mut emptied = entry.clone();
    emptied.put(registries, "sn", Vec::<RawValue>::new()).unwrap();
    assert!(!emptied.contains(registries, "sn"));
    assert!(matches!(
        emptied.check(registries),
        Err(AttributeError::ObjectClassViolation { .. })
    ));

    // Country is not allowed by any of the entry's classes...
    let mut extended = entry.clone();
    extended.put(registries, "c", texts(["NZ"])).unwrap();
    assert!(matches!(
        extended.check(registries),
        Err(AttributeError::ObjectClassViolation { .. })
    ));
    // ...until extensibleObject is listed
    extended
        .add(registries, "objectClass", texts(["extensibleObject"]))
        .unwrap();
    extended.check(registries).unwrap();

    extended.put(registries, "c", texts(["USA"])).unwrap();
    assert!(matches!(
        extended.check(registries),
        Err(AttributeError::InvalidAttributeValue { .. })
    ));

    let mut two_chains = entry.clone();
    two_chains
        .add(registries, "objectClass", texts(["organization"]))
        .unwrap();
    two_chains.put(registries, "o", texts(["Example"])).unwrap();
    assert!(matches!(
        two_chains.check(registries),
        Err(AttributeError::ObjectClassViolation { .. })
    ));

    let empty = ServerEntry::new(registries, "dc=example,dc=com").unwrap();
    assert!(empty.check(registries).is_err());
}

#[test]
fn test_auxiliary_class_from_fixture_bundle() {
    let mut manager = SchemaManager::with_loader(loader_with(&["badge"]));
    assert!(manager.load_all_enabled().unwrap());
    let registries = manager.registries();

    let mut entry = person(registries);
    entry
        .add(registries, "objectClass", texts(["badgeHolder"]))
        .unwrap();
    assert!(entry.check(registries).is_err());

    entry.put(registries, "badgeNumber", texts(["  B-1042 "])).unwrap();
    entry
        .put(registries, "badgePhoto", [RawValue::from(vec![0xffu8, 0xd8])])
        .unwrap();
    entry.check(registries).unwrap();

    let badge = entry.get(registries, "badgeNumber").unwrap().get().unwrap();
    assert_eq!(
        badge.normalized(registries).unwrap(),
        Some(&RawValue::from("b-1042"))
    );
    assert!(entry.contains_value(registries, "badgeNumber", "b-1042").unwrap());
}

#[test]
fn test_object_class_put_and_put_attribute() {
    let manager = loaded_manager();
    let registries = manager.registries();
    let mut entry = ServerEntry::new(registries, "cn=admin,dc=example,dc=com").unwrap();

    // Nothing to replace on a fresh entry
    assert!(entry
        .put(registries, "objectClass", texts(["person"]))
        .unwrap()
        .is_none());
    let previous = entry
        .put(registries, "objectClass", texts(["organizationalPerson"]))
        .unwrap()
        .unwrap();
    assert_eq!(previous.size(), 1);

    let classes = ServerAttribute::with_values(registries, "objectClass", texts(["inetOrgPerson"])).unwrap();
    let replaced = entry.put_attribute(registries, classes).unwrap().unwrap();
    assert!(replaced.contains(registries, "organizationalPerson").unwrap());
    assert!(entry.has_object_class(registries, "inetOrgPerson"));
    assert!(entry.has_object_class(registries, "person"));
    assert!(entry
        .object_class()
        .may_attributes()
        .contains("2.16.840.1.113730.3.1.241"));
    assert_eq!(entry.object_class().size(), 1);
}

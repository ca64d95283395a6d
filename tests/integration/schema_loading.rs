//! Schema loading, dependency resolution and enable/disable scenarios.

use crate::assert_schema_error;
use crate::common::fixtures::loader_with;
use crate::common::{RegistrySizes, init_logging, loaded_manager};
use ldap_schema::error::ErrorKind;
use ldap_schema::schema_manager::{SchemaManager, SchemaManagerConfig};

#[test]
fn test_load_with_deps_follows_dependency_order() {
    init_logging();
    let mut manager = SchemaManager::new().unwrap();
    assert!(manager.load_with_deps(["InetOrgPerson"]).unwrap());

    let loaded: Vec<&str> = manager
        .loaded_schemas()
        .map(|schema| schema.name.as_str())
        .collect();
    assert_eq!(loaded, ["system", "core", "cosine", "inetorgperson"]);

    let sizes = RegistrySizes::of(manager.registries());
    assert_eq!(sizes.comparators, 17);
    assert_eq!(sizes.normalizers, 17);
    assert_eq!(sizes.syntax_checkers, 16);
    assert_eq!(sizes.ldap_syntaxes, 16);
    assert_eq!(sizes.matching_rules, 17);
    assert_eq!(sizes.attribute_types, 9 + 16 + 5 + 7);
    assert_eq!(sizes.object_classes, 3 + 6 + 3 + 1);
    assert_eq!(sizes.global_oids, 16 + 17 + 37 + 13);

    // Each object is owned by exactly one schema
    let owned: usize = manager
        .loaded_schemas()
        .map(|schema| schema.owned_objects().len())
        .sum();
    assert_eq!(owned, 17 + 17 + 16 + 16 + 17 + 37 + 13);
}

#[test]
fn test_load_all_enabled_matches_load_with_deps() {
    let all_enabled = loaded_manager();
    let mut with_deps = SchemaManager::new().unwrap();
    with_deps.load_with_deps(["inetorgperson"]).unwrap();

    assert_eq!(
        RegistrySizes::of(all_enabled.registries()),
        RegistrySizes::of(with_deps.registries())
    );
}

#[test]
fn test_disabled_schema_is_invisible_until_enabled() {
    let mut manager = loaded_manager();
    assert!(manager.lookup_attribute_type("gecos").is_none());
    assert!(manager.lookup_object_class("posixAccount").is_none());
    assert!(!manager.is_schema_loaded("nis"));
    let before = RegistrySizes::of(manager.registries());

    assert!(manager.enable("nis").unwrap());
    assert!(manager.lookup_attribute_type("gecos").is_some());
    let enabled = RegistrySizes::of(manager.registries());
    assert_eq!(enabled.attribute_types, before.attribute_types + 6);
    assert_eq!(enabled.object_classes, before.object_classes + 2);
    assert_eq!(enabled.global_oids, before.global_oids + 8);
    assert_eq!(enabled.matching_rules, before.matching_rules);

    assert!(manager.disable("nis").unwrap());
    assert!(manager.lookup_attribute_type("gecos").is_none());
    assert_eq!(RegistrySizes::of(manager.registries()), before);

    // The round trip can be repeated
    assert!(manager.enable("NIS").unwrap());
    assert_eq!(RegistrySizes::of(manager.registries()), enabled);
}

#[test]
fn test_load_fixture_bundle() {
    init_logging();
    let mut manager = SchemaManager::with_loader(loader_with(&["badge"]));
    assert!(manager.load_all_enabled().unwrap());
    assert!(manager.is_schema_loaded("badge"));

    let badge = manager.lookup_attribute_type("badgeNumber").unwrap();
    assert_eq!(badge.equality.as_deref(), Some("1.3.6.1.4.1.18060.0.4.1.1.1"));
    let holder = manager.lookup_object_class("badgeHolder").unwrap();
    assert_eq!(holder.must, vec!["1.3.6.1.4.1.18060.0.4.1.2.1"]);

    // The rule's comparator and normalizer share its OID
    let rule = manager.lookup_matching_rule("badgeMatch").unwrap();
    assert!(rule.comparator.is_none());
    assert!(manager.lookup_comparator("1.3.6.1.4.1.18060.0.4.1.1.1").is_some());
}

#[test]
fn test_strict_and_relaxed_loading_of_a_broken_bundle() {
    init_logging();
    let mut strict = SchemaManager::with_loader(loader_with(&["broken"]));
    assert!(strict.load(["system"]).unwrap());
    let before = RegistrySizes::of(strict.registries());

    assert!(!strict.load(["broken"]).unwrap());
    assert_eq!(strict.errors().len(), 1);
    assert_eq!(strict.errors()[0].kind(), ErrorKind::SchemaViolation);
    assert!(!strict.is_schema_loaded("broken"));
    assert_eq!(RegistrySizes::of(strict.registries()), before);

    let mut relaxed = SchemaManager::builder()
        .loader(loader_with(&["broken"]))
        .config(SchemaManagerConfig::new().relaxed(true))
        .build()
        .unwrap();
    assert!(relaxed.load(["system"]).unwrap());
    assert!(relaxed.load(["broken"]).unwrap());
    assert_eq!(relaxed.errors().len(), 1);
    assert!(relaxed.is_schema_loaded("broken"));
    assert!(relaxed.lookup_attribute_type("orphan").is_none());
}

#[test]
fn test_unknown_schema_names() {
    let mut manager = loaded_manager();
    let before = RegistrySizes::of(manager.registries());

    assert_schema_error!(manager.load(["nonexistent"]), ErrorKind::OperationNotSupported);
    assert_schema_error!(
        manager.load_with_deps(["nonexistent"]),
        ErrorKind::OperationNotSupported
    );
    assert_schema_error!(manager.enable("nonexistent"), ErrorKind::OperationNotSupported);
    assert_schema_error!(manager.disable("nonexistent"), ErrorKind::OperationNotSupported);
    assert_eq!(manager.errors().len(), 1);

    assert!(!manager.is_enabled("nonexistent"));
    assert_eq!(RegistrySizes::of(manager.registries()), before);
}

#[test]
fn test_disable_with_loaded_dependents_fails() {
    let mut manager = loaded_manager();
    let before = RegistrySizes::of(manager.registries());

    assert!(!manager.disable("system").unwrap());
    assert_eq!(manager.errors()[0].kind(), ErrorKind::SchemaViolation);
    assert!(manager.is_schema_loaded("system"));
    assert!(manager.is_enabled("system"));
    assert_eq!(RegistrySizes::of(manager.registries()), before);

    // Removing dependents first, leaf to root
    for name in ["inetorgperson", "cosine", "core", "system"] {
        assert!(manager.disable(name).unwrap(), "{}: {:?}", name, manager.errors());
    }
    assert_eq!(manager.registries().global_oids().size(), 0);
    assert_eq!(manager.loaded_schemas().count(), 0);
}

//! Common test utilities for the schema manager and entry model tests.
//!
//! This module provides logging setup, loaded manager fixtures and registry
//! size snapshots used to assert that failed mutations change nothing.

use ldap_schema::schema::{Registries, SchemaObjectType};
use ldap_schema::schema_manager::SchemaManager;

pub mod fixtures;

/// Route `log` output to the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A manager over the embedded schemas with every enabled schema loaded
pub fn loaded_manager() -> SchemaManager {
    init_logging();
    let mut manager = SchemaManager::new().expect("Failed to create manager");
    assert!(
        manager.load_all_enabled().expect("Failed to load schemas"),
        "load errors: {:?}",
        manager.errors()
    );
    manager
}

/// Sizes of every registry plus the global OID registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrySizes {
    pub comparators: usize,
    pub normalizers: usize,
    pub syntax_checkers: usize,
    pub ldap_syntaxes: usize,
    pub matching_rules: usize,
    pub attribute_types: usize,
    pub object_classes: usize,
    pub global_oids: usize,
}

impl RegistrySizes {
    pub fn of(registries: &Registries) -> Self {
        Self {
            comparators: registries.size(SchemaObjectType::Comparator),
            normalizers: registries.size(SchemaObjectType::Normalizer),
            syntax_checkers: registries.size(SchemaObjectType::SyntaxChecker),
            ldap_syntaxes: registries.size(SchemaObjectType::LdapSyntax),
            matching_rules: registries.size(SchemaObjectType::MatchingRule),
            attribute_types: registries.size(SchemaObjectType::AttributeType),
            object_classes: registries.size(SchemaObjectType::ObjectClass),
            global_oids: registries.global_oids().size(),
        }
    }
}

/// Assert that the result is an error and its kind matches
#[macro_export]
macro_rules! assert_schema_error {
    ($result:expr, $kind:expr) => {
        match $result {
            Err(error) => assert_eq!(error.kind(), $kind, "unexpected error: {}", error),
            Ok(value) => panic!("expected a {} error, got {:?}", $kind, value),
        }
    };
}

//! Test fixtures for loading schema bundles from JSON files.
//!
//! Fixtures live under `tests/fixtures/` and are cached after the first read.

use ldap_schema::schema::{InMemorySchemaLoader, SchemaBundle, parse_bundle};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

/// Cache for fixture files to avoid repeated file I/O
static FIXTURE_CACHE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();

/// Read a fixture file from the fixtures directory with caching
pub fn load_fixture(path: &str) -> String {
    let cache = FIXTURE_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut cache = cache.lock().unwrap();

    if let Some(cached) = cache.get(path) {
        return cached.clone();
    }

    let fixture_path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), path);
    let content = std::fs::read_to_string(&fixture_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", fixture_path));
    cache.insert(path.to_string(), content.clone());
    content
}

/// Load a schema bundle fixture
pub fn load_schema_bundle(name: &str) -> SchemaBundle {
    let json = load_fixture(&format!("schemas/{}.json", name));
    parse_bundle(&json).unwrap_or_else(|e| panic!("Failed to parse schema fixture {}: {}", name, e))
}

/// The embedded schemas plus the named fixture bundles
pub fn loader_with(fixtures: &[&str]) -> InMemorySchemaLoader {
    let mut loader = InMemorySchemaLoader::embedded().expect("Failed to create loader");
    for name in fixtures {
        loader.insert(load_schema_bundle(name));
    }
    loader
}

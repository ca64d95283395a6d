//! Configuration and builder for schema manager instances.

use crate::error::{SchemaError, SchemaResult};
use crate::matching::ImplementationRegistry;
use crate::schema::{InMemorySchemaLoader, SchemaLoader};
use crate::schema_manager::SchemaManager;
use serde::{Deserialize, Serialize};

/// Behaviour switches of a [`SchemaManager`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaManagerConfig {
    /// Skip (and record) invalid objects while loading a bundle instead of
    /// failing the whole load.
    pub relaxed: bool,

    /// Let `load_all_enabled` load disabled schemas that an enabled schema
    /// depends on. When off, enabled schemas with a disabled dependency are
    /// skipped.
    pub load_disabled_dependencies: bool,
}

impl Default for SchemaManagerConfig {
    fn default() -> Self {
        Self {
            relaxed: false,
            load_disabled_dependencies: true,
        }
    }
}

impl SchemaManagerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn relaxed(mut self, relaxed: bool) -> Self {
        self.relaxed = relaxed;
        self
    }

    pub fn load_disabled_dependencies(mut self, load: bool) -> Self {
        self.load_disabled_dependencies = load;
        self
    }

    /// Read a configuration from JSON. Missing fields take their default.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ldap_schema::schema_manager::SchemaManagerConfig;
    ///
    /// let config = SchemaManagerConfig::from_json(r#"{"relaxed": true}"#).unwrap();
    /// assert!(config.relaxed);
    /// assert!(config.load_disabled_dependencies);
    /// ```
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SchemaError::violation(format!("invalid schema manager configuration: {}", e)))
    }
}

/// Builder for [`SchemaManager`].
///
/// Defaults to the embedded schema loader, the built-in implementation table
/// and the default configuration.
#[derive(Debug, Default)]
pub struct SchemaManagerBuilder {
    loader: Option<Box<dyn SchemaLoader>>,
    implementations: Option<ImplementationRegistry>,
    config: SchemaManagerConfig,
}

impl SchemaManagerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loader(mut self, loader: impl SchemaLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    /// Replace the implementation table used to resolve comparators,
    /// normalizers and syntax checkers.
    pub fn implementations(mut self, implementations: ImplementationRegistry) -> Self {
        self.implementations = Some(implementations);
        self
    }

    pub fn config(mut self, config: SchemaManagerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn relaxed(mut self) -> Self {
        self.config.relaxed = true;
        self
    }

    /// Build the manager. Nothing is loaded yet.
    ///
    /// # Errors
    ///
    /// Fails if no loader was given and the embedded schemas cannot be
    /// parsed.
    pub fn build(self) -> SchemaResult<SchemaManager> {
        let loader: Box<dyn SchemaLoader> = match self.loader {
            Some(loader) => loader,
            None => Box::new(InMemorySchemaLoader::embedded()?),
        };
        Ok(SchemaManager::from_parts(
            loader,
            self.implementations.unwrap_or_else(ImplementationRegistry::new),
            self.config,
        ))
    }
}

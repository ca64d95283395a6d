//! Schema loading, enabling and disabling.
//!
//! Every operation here works on a scratch copy of the registries and swaps
//! it in only once the whole batch succeeded, so a failed call leaves the
//! manager exactly as it was.

use super::core::SchemaManager;
use crate::error::{ErrorKind, SchemaError, SchemaResult};
use crate::schema::{Registries, Schema, SchemaBundle, SchemaElement, SchemaObjectType};
use log::{debug, info, warn};
use std::collections::{BTreeMap, BTreeSet};

impl SchemaManager {
    /// Load the named schemas from the loader.
    ///
    /// Dependencies are not resolved: each declared dependency must already
    /// be loaded or be named in the same call. Schemas already loaded are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns `OperationNotSupported` when a schema or dependency name is
    /// unknown to the loader. Other failures return `Ok(false)` and are
    /// recorded in [`errors`](Self::errors).
    pub fn load<I, S>(&mut self, names: I) -> SchemaResult<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.errors.clear();
        let names: Vec<String> = names.into_iter().map(|n| n.as_ref().to_string()).collect();
        match self.fetch_bundles(&names) {
            Ok(bundles) => self.merge(bundles),
            Err(error) => self.settle(error),
        }
    }

    /// Load schema bundles given directly, with the same rules as
    /// [`load`](Self::load).
    pub fn load_schemas(
        &mut self,
        bundles: impl IntoIterator<Item = SchemaBundle>,
    ) -> SchemaResult<bool> {
        self.errors.clear();
        self.merge(bundles.into_iter().collect())
    }

    /// Load the named schemas and everything they transitively depend on,
    /// dependencies first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ldap_schema::schema_manager::SchemaManager;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut manager = SchemaManager::new()?;
    /// assert!(manager.load_with_deps(["InetOrgPerson"])?);
    ///
    /// let loaded: Vec<&str> = manager.loaded_schemas().map(|s| s.name.as_str()).collect();
    /// assert_eq!(loaded, ["system", "core", "cosine", "inetorgperson"]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_with_deps<I, S>(&mut self, names: I) -> SchemaResult<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.errors.clear();
        let mut visited = BTreeSet::new();
        let mut order = Vec::new();
        for name in names {
            if let Err(error) =
                self.collect_closure(name.as_ref(), &mut BTreeSet::new(), &mut visited, &mut order)
            {
                return self.settle(error);
            }
        }
        match self.fetch_bundles(&order) {
            Ok(bundles) => self.merge(bundles),
            Err(error) => self.settle(error),
        }
    }

    /// Load every enabled schema the loader knows, with its dependencies.
    ///
    /// Disabled schemas are left out unless an enabled schema depends on
    /// them. With `load_disabled_dependencies` off, such enabled schemas are
    /// skipped instead.
    pub fn load_all_enabled(&mut self) -> SchemaResult<bool> {
        self.errors.clear();
        let mut visited = BTreeSet::new();
        let mut order = Vec::new();

        for name in self.loader.schema_names() {
            if !self.is_enabled(&name) || self.is_schema_loaded(&name) {
                continue;
            }
            let mut closure_visited = visited.clone();
            let mut closure = Vec::new();
            if let Err(error) =
                self.collect_closure(&name, &mut BTreeSet::new(), &mut closure_visited, &mut closure)
            {
                return self.settle(error);
            }

            if !self.config.load_disabled_dependencies {
                if let Some(disabled) = closure.iter().find(|dep| !self.is_enabled(dep)) {
                    warn!(
                        "Skipping schema '{}': it depends on disabled schema '{}'",
                        name, disabled
                    );
                    continue;
                }
            }
            visited = closure_visited;
            order.extend(closure);
        }

        match self.fetch_bundles(&order) {
            Ok(bundles) => self.merge(bundles),
            Err(error) => self.settle(error),
        }
    }

    /// Enable a schema, merging its objects if it is not loaded yet. Its
    /// dependencies must already be loaded.
    pub fn enable(&mut self, name: &str) -> SchemaResult<bool> {
        self.errors.clear();
        if self.is_schema_loaded(name) {
            self.enabled_overrides.insert(Schema::key(name), true);
            debug!("Schema '{}' is already loaded", name);
            return Ok(true);
        }

        let bundle = match self.loader.load_schema_objects(name) {
            Ok(bundle) => bundle,
            Err(error) => return self.settle(error),
        };
        let merged = self.merge(vec![bundle])?;
        if merged {
            self.enabled_overrides.insert(Schema::key(name), true);
            info!("Enabled schema '{}'", name);
        }
        Ok(merged)
    }

    /// Disable a schema, removing its objects from the registries.
    ///
    /// Fails when a loaded schema depends on it or when an object of another
    /// schema still references one of its objects.
    pub fn disable(&mut self, name: &str) -> SchemaResult<bool> {
        self.errors.clear();
        if !self.is_schema_loaded(name) {
            if self.loader.schema(name).is_none() {
                return self.settle(SchemaError::unknown_schema(name));
            }
            self.enabled_overrides.insert(Schema::key(name), false);
            debug!("Schema '{}' is not loaded; marked disabled", name);
            return Ok(true);
        }

        let removed = self.unmerge(name);
        let disabled = self.record(removed);
        if disabled {
            self.enabled_overrides.insert(Schema::key(name), false);
            info!("Disabled schema '{}'", name);
        }
        Ok(disabled)
    }

    /// Remove a loaded schema and its objects without changing whether it
    /// is enabled. Unloading a schema that is not loaded does nothing.
    pub fn unload(&mut self, name: &str) -> SchemaResult<bool> {
        self.errors.clear();
        if !self.is_schema_loaded(name) {
            if self.loader.schema(name).is_none() {
                return self.settle(SchemaError::unknown_schema(name));
            }
            return Ok(true);
        }

        let removed = self.unmerge(name);
        let unloaded = self.record(removed);
        if unloaded {
            info!("Unloaded schema '{}'", name);
        }
        Ok(unloaded)
    }

    /// Record a failed load: unknown names are returned as errors, anything
    /// else becomes `Ok(false)`.
    fn settle(&mut self, error: SchemaError) -> SchemaResult<bool> {
        self.record(Err(error.clone()));
        match error.kind() {
            ErrorKind::OperationNotSupported => Err(error),
            ErrorKind::SchemaViolation => Ok(false),
        }
    }

    fn fetch_bundles(&self, names: &[String]) -> SchemaResult<Vec<SchemaBundle>> {
        names
            .iter()
            .map(|name| self.loader.load_schema_objects(name))
            .collect()
    }

    /// Post-order walk of the dependencies of `name` that are not loaded yet.
    fn collect_closure(
        &self,
        name: &str,
        visiting: &mut BTreeSet<String>,
        visited: &mut BTreeSet<String>,
        order: &mut Vec<String>,
    ) -> SchemaResult<()> {
        let key = Schema::key(name);
        if visited.contains(&key) || self.is_schema_loaded(name) {
            return Ok(());
        }
        if !visiting.insert(key.clone()) {
            return Err(SchemaError::violation(format!(
                "schema '{}' depends on itself",
                name
            )));
        }

        let schema = self
            .loader
            .schema(name)
            .ok_or_else(|| SchemaError::unknown_schema(name))?;
        for dependency in &schema.dependencies {
            self.collect_closure(dependency, visiting, visited, order)?;
        }

        visiting.remove(&key);
        visited.insert(key);
        order.push(schema.name);
        Ok(())
    }

    /// Merge bundles whose dependencies are loaded or part of the batch.
    fn merge(&mut self, bundles: Vec<SchemaBundle>) -> SchemaResult<bool> {
        let mut batch: BTreeMap<String, SchemaBundle> = BTreeMap::new();
        let mut listed = Vec::new();
        for bundle in bundles {
            let key = Schema::key(bundle.name());
            if self.is_schema_loaded(&key) {
                debug!("Schema '{}' is already loaded", bundle.name());
                continue;
            }
            if !batch.contains_key(&key) {
                listed.push(key.clone());
                batch.insert(key, bundle);
            }
        }
        if batch.is_empty() {
            return Ok(true);
        }

        for bundle in batch.values() {
            for dependency in &bundle.schema.dependencies {
                let key = Schema::key(dependency);
                if self.is_schema_loaded(&key) || batch.contains_key(&key) {
                    continue;
                }
                let error = if self.loader.schema(dependency).is_some() {
                    SchemaError::violation(format!(
                        "schema '{}' depends on '{}', which is neither loaded nor being loaded",
                        bundle.name(),
                        dependency
                    ))
                } else {
                    SchemaError::unknown_schema(dependency)
                };
                return self.settle(error);
            }
        }

        let ordered = match dependency_order(&listed, &batch) {
            Ok(ordered) => ordered,
            Err(error) => return self.settle(error),
        };

        let mut scratch = self.registries.clone();
        let mut skipped = Vec::new();
        let mut names = Vec::with_capacity(ordered.len());
        for key in ordered {
            let Some(bundle) = batch.remove(&key) else {
                continue;
            };
            names.push(bundle.schema.name.clone());
            match self.apply_bundle(&mut scratch, bundle) {
                Ok(errors) => skipped.extend(errors),
                Err(error) => return self.settle(error),
            }
        }

        self.registries = scratch;
        self.errors.extend(skipped);
        info!("Loaded schemas: {}", names.join(", "));
        Ok(true)
    }

    /// Add the schema and its objects to `registries`.
    ///
    /// Objects are tried executables first, then syntaxes, matching rules,
    /// attribute types and object classes. Objects whose references are not
    /// registered yet are retried after the rest of the bundle, so superiors
    /// may be listed after their subtypes. In relaxed mode objects that can
    /// never be added are skipped and their errors returned.
    fn apply_bundle(
        &self,
        registries: &mut Registries,
        bundle: SchemaBundle,
    ) -> SchemaResult<Vec<SchemaError>> {
        let SchemaBundle {
            mut schema,
            mut elements,
        } = bundle;
        schema.enabled = true;
        let name = schema.name.clone();
        registries.add_schema(schema);

        elements.sort_by_key(SchemaElement::object_type);
        let mut pending = elements;
        let mut skipped = Vec::new();
        while !pending.is_empty() {
            let attempted = pending.len();
            let mut failed = Vec::new();
            for mut element in std::mem::take(&mut pending) {
                element.object_mut().schema_name = name.clone();
                let outcome = registries
                    .check_element(element.clone(), &self.implementations)
                    .and_then(|checked| registries.insert(checked));
                if let Err(error) = outcome {
                    failed.push((element, error));
                }
            }

            if failed.len() < attempted {
                pending = failed.into_iter().map(|(element, _)| element).collect();
                continue;
            }
            if !self.config.relaxed {
                if let Some((_, error)) = failed.into_iter().next() {
                    return Err(error);
                }
                break;
            }
            for (element, error) in failed {
                warn!("Skipping {} of schema '{}': {}", element, name, error);
                skipped.push(error);
            }
        }

        debug!(
            "Merged schema '{}' ({} objects)",
            name,
            registries
                .schema(&name)
                .map_or(0, |schema| schema.owned_objects().len())
        );
        Ok(skipped)
    }

    /// A copy of the registries without the schema `name` and its objects.
    fn unmerge(&mut self, name: &str) -> SchemaResult<()> {
        let dependents: Vec<&str> = self
            .registries
            .loaded_schemas()
            .filter(|schema| schema.depends_on(name))
            .map(|schema| schema.name.as_str())
            .collect();
        if !dependents.is_empty() {
            return Err(SchemaError::violation(format!(
                "schema '{}' is required by {}",
                name,
                dependents.join(", ")
            )));
        }

        let mut scratch = self.registries.clone();
        let mut pending: Vec<(SchemaObjectType, String)> = scratch
            .schema(name)
            .map(|schema| schema.owned_objects().iter().cloned().collect())
            .unwrap_or_default();
        // Dependents before the objects they reference
        pending.sort_by(|a, b| b.0.cmp(&a.0));

        while !pending.is_empty() {
            let attempted = pending.len();
            let mut blocked = Vec::new();
            for (object_type, oid) in std::mem::take(&mut pending) {
                if scratch.referrers(object_type, &oid).is_empty() {
                    scratch.remove(object_type, &oid)?;
                } else {
                    blocked.push((object_type, oid));
                }
            }
            if blocked.len() == attempted {
                let (object_type, oid) = &blocked[0];
                return Err(SchemaError::violation(format!(
                    "{} {} of schema '{}' is still referenced by {}",
                    object_type,
                    oid,
                    name,
                    scratch.referrers(*object_type, oid).join(", ")
                )));
            }
            pending = blocked;
        }

        scratch.remove_schema(name);
        self.registries = scratch;
        Ok(())
    }
}

/// Order `listed` so that every schema comes after the batch members it
/// depends on, keeping the listed order otherwise.
fn dependency_order(
    listed: &[String],
    batch: &BTreeMap<String, SchemaBundle>,
) -> SchemaResult<Vec<String>> {
    let mut ordered: Vec<String> = Vec::with_capacity(listed.len());
    let mut remaining: Vec<&String> = listed.iter().collect();
    while !remaining.is_empty() {
        let position = remaining.iter().position(|key| {
            batch[*key].schema.dependencies.iter().all(|dependency| {
                let dependency = Schema::key(dependency);
                !batch.contains_key(&dependency) || ordered.contains(&dependency)
            })
        });
        match position {
            Some(index) => ordered.push(remaining.remove(index).clone()),
            None => {
                let cycle: Vec<&str> = remaining.iter().map(|key| batch[*key].name()).collect();
                return Err(SchemaError::violation(format!(
                    "cyclic dependencies between schemas {}",
                    cycle.join(", ")
                )));
            }
        }
    }
    Ok(ordered)
}

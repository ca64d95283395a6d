//! Per-type schema object registries and the global OID registry.
//!
//! A [`Registry`] stores one kind of schema object, indexed by OID and by every
//! registered name. Names are case-insensitive and scoped to the registry: an
//! attribute type and an object class may share a name, two attribute types
//! may not. The [`GlobalOidRegistry`] enforces OID uniqueness across the
//! nameable (relational) types only.

use super::object::{SchemaEntity, SchemaObjectType};
use crate::error::{SchemaError, SchemaResult};
use std::collections::BTreeMap;

/// Store of schema objects of a single type.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    by_oid: BTreeMap<String, T>,
    by_name: BTreeMap<String, String>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            by_oid: BTreeMap::new(),
            by_name: BTreeMap::new(),
        }
    }
}

impl<T: SchemaEntity> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object.
    ///
    /// Fails, leaving the registry untouched, if the OID or any of the names
    /// is already registered here.
    pub fn register(&mut self, object: T) -> SchemaResult<()> {
        self.check_available(&object)?;

        for name in object.names() {
            self.by_name.insert(name.to_lowercase(), object.oid().to_string());
        }
        self.by_oid.insert(object.oid().to_string(), object);
        Ok(())
    }

    /// Check that `object` could be registered without touching the registry.
    pub fn check_available(&self, object: &T) -> SchemaResult<()> {
        let oid = object.oid();
        if self.by_oid.contains_key(oid) {
            return Err(SchemaError::violation(format!(
                "OID {} is already registered as a {}",
                oid,
                T::OBJECT_TYPE
            )));
        }

        for (index, name) in object.names().iter().enumerate() {
            let key = name.to_lowercase();
            if let Some(owner) = self.by_name.get(&key) {
                return Err(SchemaError::violation(format!(
                    "name '{}' of {} is already used by {} {}",
                    name,
                    oid,
                    T::OBJECT_TYPE,
                    owner
                )));
            }
            if object.names()[..index]
                .iter()
                .any(|other| other.eq_ignore_ascii_case(name))
            {
                return Err(SchemaError::violation(format!(
                    "name '{}' is declared twice by {}",
                    name, oid
                )));
            }
        }
        Ok(())
    }

    /// Remove the object registered under `oid`.
    pub fn unregister(&mut self, oid: &str) -> SchemaResult<T> {
        let object = self.by_oid.remove(oid).ok_or_else(|| {
            SchemaError::violation(format!("no {} is registered under OID {}", T::OBJECT_TYPE, oid))
        })?;
        for name in object.names() {
            self.by_name.remove(&name.to_lowercase());
        }
        Ok(object)
    }

    /// Resolve an OID or any registered name.
    pub fn lookup(&self, id: &str) -> Option<&T> {
        self.by_oid.get(id).or_else(|| {
            self.by_name
                .get(&id.to_lowercase())
                .and_then(|oid| self.by_oid.get(oid))
        })
    }

    /// Resolve an OID or name to the registered OID.
    pub fn oid_of(&self, id: &str) -> Option<&str> {
        self.lookup(id).map(|object| object.oid())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lookup(id).is_some()
    }

    pub fn size(&self) -> usize {
        self.by_oid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_oid.is_empty()
    }

    /// Objects in OID order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.by_oid.values()
    }

    pub fn oids(&self) -> impl Iterator<Item = &str> {
        self.by_oid.keys().map(String::as_str)
    }
}

/// OID uniqueness index over attribute types, object classes, matching rules
/// and syntaxes.
#[derive(Debug, Clone, Default)]
pub struct GlobalOidRegistry {
    oids: BTreeMap<String, SchemaObjectType>,
}

impl GlobalOidRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, oid: &str, object_type: SchemaObjectType) -> SchemaResult<()> {
        self.check_available(oid, object_type)?;
        self.oids.insert(oid.to_string(), object_type);
        Ok(())
    }

    pub fn check_available(&self, oid: &str, object_type: SchemaObjectType) -> SchemaResult<()> {
        if !object_type.is_nameable() {
            return Err(SchemaError::violation(format!(
                "a {} cannot be registered in the global OID registry",
                object_type
            )));
        }
        if let Some(existing) = self.oids.get(oid) {
            return Err(SchemaError::violation(format!(
                "OID {} is already used by a {}",
                oid, existing
            )));
        }
        Ok(())
    }

    pub fn unregister(&mut self, oid: &str) -> SchemaResult<SchemaObjectType> {
        self.oids.remove(oid).ok_or_else(|| {
            SchemaError::violation(format!("OID {} is not registered", oid))
        })
    }

    pub fn contains(&self, oid: &str) -> bool {
        self.oids.contains_key(oid)
    }

    /// The type of the object registered under `oid`.
    pub fn object_type(&self, oid: &str) -> Option<SchemaObjectType> {
        self.oids.get(oid).copied()
    }

    pub fn size(&self) -> usize {
        self.oids.len()
    }
}

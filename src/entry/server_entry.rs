//! Schema-aware directory entries.

use super::attribute::ServerAttribute;
use super::object_class::{EXTENSIBLE_OBJECT_OID, OBJECT_CLASS_OID, ObjectClassAttribute};
use super::value::RawValue;
use crate::error::{AttributeError, AttributeResult};
use crate::schema::{AttributeType, Registries, SchemaEntity};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// A DN plus its attributes, keyed by attribute type OID.
///
/// The objectClass attribute is always present. Writes to it go through
/// [`ObjectClassAttribute`] so the class closure stays current.
#[derive(Debug, Clone)]
pub struct ServerEntry {
    dn: String,
    attributes: BTreeMap<String, ServerAttribute>,
    object_class: ObjectClassAttribute,
}

impl ServerEntry {
    pub fn new(registries: &Registries, dn: impl Into<String>) -> AttributeResult<Self> {
        Ok(Self {
            dn: dn.into(),
            attributes: BTreeMap::new(),
            object_class: ObjectClassAttribute::new(registries)?,
        })
    }

    pub fn dn(&self) -> &str {
        &self.dn
    }

    pub fn set_dn(&mut self, dn: impl Into<String>) {
        self.dn = dn.into();
    }

    pub fn object_class(&self) -> &ObjectClassAttribute {
        &self.object_class
    }

    fn resolve<'r>(registries: &'r Registries, id: &str) -> AttributeResult<&'r AttributeType> {
        registries
            .attribute_type(id)
            .ok_or_else(|| AttributeError::no_such_attribute(id))
    }

    /// Replace the attribute named by `id` with one holding `values`.
    /// Returns the replaced attribute, `None` if it held no values.
    pub fn put<I>(
        &mut self,
        registries: &Registries,
        id: &str,
        values: I,
    ) -> AttributeResult<Option<ServerAttribute>>
    where
        I: IntoIterator<Item = RawValue>,
    {
        let attribute_type = Self::resolve(registries, id)?;
        if attribute_type.oid() == OBJECT_CLASS_OID {
            let classes = ObjectClassAttribute::with_values(registries, values)?;
            let previous = std::mem::replace(&mut self.object_class, classes);
            return Ok((!previous.is_empty()).then(|| previous.attribute().clone()));
        }

        let mut attribute = ServerAttribute::for_type(registries, attribute_type, id);
        attribute.add(registries, values)?;
        Ok(self.attributes.insert(attribute_type.oid().to_string(), attribute))
    }

    /// Store an already built attribute, replacing any attribute of the same
    /// type. An objectClass attribute is rebuilt from its values.
    pub fn put_attribute(
        &mut self,
        registries: &Registries,
        attribute: ServerAttribute,
    ) -> AttributeResult<Option<ServerAttribute>> {
        if attribute.attribute_oid() == OBJECT_CLASS_OID {
            let values: Vec<RawValue> = attribute.raw_values().cloned().collect();
            return self.put(registries, OBJECT_CLASS_OID, values);
        }
        Self::resolve(registries, attribute.attribute_oid())?;
        Ok(self
            .attributes
            .insert(attribute.attribute_oid().to_string(), attribute))
    }

    /// Add values to the attribute named by `id`, creating it if needed.
    pub fn add<I>(&mut self, registries: &Registries, id: &str, values: I) -> AttributeResult<usize>
    where
        I: IntoIterator<Item = RawValue>,
    {
        let attribute_type = Self::resolve(registries, id)?;
        if attribute_type.oid() == OBJECT_CLASS_OID {
            return self.object_class.add(registries, values);
        }

        match self.attributes.get_mut(attribute_type.oid()) {
            Some(attribute) => attribute.add(registries, values),
            None => {
                let mut attribute = ServerAttribute::for_type(registries, attribute_type, id);
                let added = attribute.add(registries, values)?;
                self.attributes
                    .insert(attribute_type.oid().to_string(), attribute);
                Ok(added)
            }
        }
    }

    pub fn get(&self, registries: &Registries, id: &str) -> Option<&ServerAttribute> {
        let attribute_type = registries.attribute_type(id)?;
        if attribute_type.oid() == OBJECT_CLASS_OID {
            return Some(self.object_class.attribute());
        }
        self.attributes.get(attribute_type.oid())
    }

    /// Remove the attribute named by `id`. Removing objectClass leaves an
    /// empty objectClass attribute in place.
    pub fn remove(&mut self, registries: &Registries, id: &str) -> AttributeResult<Option<ServerAttribute>> {
        let attribute_type = Self::resolve(registries, id)?;
        if attribute_type.oid() == OBJECT_CLASS_OID {
            let previous = self.object_class.attribute().clone();
            self.object_class.reset();
            return Ok(Some(previous));
        }
        Ok(self.attributes.remove(attribute_type.oid()))
    }

    /// Remove values from the attribute named by `id`; an attribute left
    /// without values is dropped. Returns true iff every listed value was
    /// present and removed.
    pub fn remove_values<I>(&mut self, registries: &Registries, id: &str, values: I) -> AttributeResult<bool>
    where
        I: IntoIterator<Item = RawValue>,
    {
        let attribute_type = Self::resolve(registries, id)?;
        if attribute_type.oid() == OBJECT_CLASS_OID {
            let mut all_removed = true;
            for raw in values {
                all_removed &= match raw.as_text() {
                    Some(name) => self.object_class.remove_object_class(registries, name)?,
                    None => false,
                };
            }
            return Ok(all_removed);
        }

        let Some(attribute) = self.attributes.get_mut(attribute_type.oid()) else {
            return Ok(false);
        };
        let all_removed = attribute.remove_all(registries, values)?;
        if attribute.is_empty() {
            self.attributes.remove(attribute_type.oid());
        }
        Ok(all_removed)
    }

    /// Whether the entry has a non-empty attribute named by `id`.
    pub fn contains(&self, registries: &Registries, id: &str) -> bool {
        self.get(registries, id)
            .is_some_and(|attribute| !attribute.is_empty())
    }

    pub fn contains_value(
        &self,
        registries: &Registries,
        id: &str,
        raw: impl Into<RawValue>,
    ) -> AttributeResult<bool> {
        match self.get(registries, id) {
            Some(attribute) => attribute.contains(registries, raw),
            None => Ok(false),
        }
    }

    pub fn has_object_class(&self, registries: &Registries, id: &str) -> bool {
        self.object_class.contains(registries, id)
    }

    /// Drop every attribute; objectClass is reset, not removed.
    pub fn clear(&mut self) {
        self.attributes.clear();
        self.object_class.reset();
    }

    /// Number of attributes, objectClass included.
    pub fn size(&self) -> usize {
        self.attributes.len() + 1
    }

    /// All attributes, objectClass first.
    pub fn attributes(&self) -> impl Iterator<Item = &ServerAttribute> {
        std::iter::once(self.object_class.attribute()).chain(self.attributes.values())
    }

    /// Check the entry against its object classes.
    ///
    /// The entry needs at least one object class and exactly one structural
    /// chain. Every MUST attribute must be present, every user attribute must
    /// be allowed by MUST or MAY (any attribute is allowed once
    /// `extensibleObject` is listed), and every attribute must hold valid
    /// values within its cardinality.
    pub fn check(&self, registries: &Registries) -> AttributeResult<()> {
        if self.object_class.is_empty() {
            return Err(self.violation("entry has no object class"));
        }
        self.check_structural_chain(registries)?;

        for must in self.object_class.must_attributes() {
            let present = must == OBJECT_CLASS_OID
                || self
                    .attributes
                    .get(must)
                    .is_some_and(|attribute| !attribute.is_empty());
            if !present {
                let name = registries
                    .attribute_type(must)
                    .map_or(must.as_str(), |at| at.name());
                return Err(self.violation(format!("missing required attribute '{}'", name)));
            }
        }

        let extensible = self.object_class.all_classes().contains(EXTENSIBLE_OBJECT_OID);
        for attribute in self.attributes.values() {
            let attribute_type = attribute
                .attribute_type(registries)
                .ok_or_else(|| AttributeError::no_such_attribute(attribute.up_id()))?;

            if !extensible && !attribute_type.usage.is_operational() {
                let allowed = self
                    .object_class
                    .must_attributes()
                    .iter()
                    .chain(self.object_class.may_attributes())
                    .any(|id| registries.is_subtype_of(attribute_type, id));
                if !allowed {
                    return Err(self.violation(format!(
                        "attribute '{}' is not allowed by the entry's object classes",
                        attribute.up_id()
                    )));
                }
            }

            if attribute.is_single_valued() && attribute.size() > 1 {
                return Err(AttributeError::constraint(
                    attribute.up_id(),
                    "attribute is single-valued",
                ));
            }
            if let Some(value) = attribute.iter().find(|value| !value.is_valid(registries)) {
                return Err(AttributeError::invalid_value(
                    attribute.up_id(),
                    format!("'{}' does not conform to the attribute syntax", value),
                ));
            }
        }
        Ok(())
    }

    fn check_structural_chain(&self, registries: &Registries) -> AttributeResult<()> {
        let structural = self.object_class.structural_classes();
        let mut superiors = BTreeSet::new();
        for oid in structural {
            if let Some(class) = registries.object_class(oid) {
                superiors.extend(
                    registries
                        .object_class_closure(class)
                        .into_iter()
                        .skip(1)
                        .map(|superior| superior.oid()),
                );
            }
        }

        let leaves = structural
            .iter()
            .filter(|oid| !superiors.contains(oid.as_str()))
            .count();
        match leaves {
            0 => Err(self.violation("entry has no structural object class")),
            1 => Ok(()),
            _ => Err(self.violation("entry has more than one structural object class chain")),
        }
    }

    fn violation(&self, details: impl std::fmt::Display) -> AttributeError {
        debug!("Entry {} fails the schema check: {}", self.dn, details);
        AttributeError::object_class(format!("{}: {}", self.dn, details))
    }
}

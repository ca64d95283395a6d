//! The objectClass attribute and its class closure.

use super::attribute::ServerAttribute;
use super::value::RawValue;
use crate::error::{AttributeError, AttributeResult};
use crate::schema::{ObjectClass, ObjectClassKind, Registries, SchemaEntity};
use log::{debug, trace};
use std::collections::BTreeSet;

/// OID of the `objectClass` attribute type.
pub const OBJECT_CLASS_OID: &str = "2.5.4.0";
/// OID of the `extensibleObject` auxiliary class.
pub const EXTENSIBLE_OBJECT_OID: &str = "1.3.6.1.4.1.1466.101.120.111";

/// The `objectClass` attribute of an entry.
///
/// Values are the class identifiers as given by the caller. Alongside them the
/// attribute keeps the closure of the listed classes over their superiors,
/// partitioned by kind, and the union of the closure's MUST and MAY
/// attribute types. All sets hold OIDs.
#[derive(Debug, Clone)]
pub struct ObjectClassAttribute {
    attribute: ServerAttribute,
    all: BTreeSet<String>,
    abstract_classes: BTreeSet<String>,
    auxiliary_classes: BTreeSet<String>,
    structural_classes: BTreeSet<String>,
    must: BTreeSet<String>,
    may: BTreeSet<String>,
}

impl ObjectClassAttribute {
    /// An empty objectClass attribute. The `objectClass` attribute type must
    /// be registered.
    pub fn new(registries: &Registries) -> AttributeResult<Self> {
        Ok(Self {
            attribute: ServerAttribute::new(registries, OBJECT_CLASS_OID)?,
            all: BTreeSet::new(),
            abstract_classes: BTreeSet::new(),
            auxiliary_classes: BTreeSet::new(),
            structural_classes: BTreeSet::new(),
            must: BTreeSet::new(),
            may: BTreeSet::new(),
        })
    }

    /// Build the attribute from raw values. Every value must be the text
    /// identifier of a registered object class.
    pub fn with_values<I>(registries: &Registries, values: I) -> AttributeResult<Self>
    where
        I: IntoIterator<Item = RawValue>,
    {
        let mut attribute = Self::new(registries)?;
        attribute.add(registries, values)?;
        Ok(attribute)
    }

    /// Add every class named by `values`, ignoring classes already in the
    /// closure. Returns how many were added. Nothing is added if a value is
    /// binary or names no object class.
    pub fn add<I>(&mut self, registries: &Registries, values: I) -> AttributeResult<usize>
    where
        I: IntoIterator<Item = RawValue>,
    {
        let mut names = Vec::new();
        for raw in values {
            let RawValue::Text(name) = raw else {
                return Err(AttributeError::invalid_value(
                    self.attribute.up_id(),
                    "object classes are named by text values",
                ));
            };
            resolve(registries, &name)?;
            names.push(name);
        }

        let mut added = 0;
        for name in names {
            if self.add_object_class(registries, &name)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Add one object class, by OID or name.
    ///
    /// Returns false, changing nothing, when the class is already part of the
    /// closure (listed directly or as a superior of a listed class).
    pub fn add_object_class(&mut self, registries: &Registries, id: &str) -> AttributeResult<bool> {
        let class = resolve(registries, id)?;
        if self.all.contains(class.oid()) {
            trace!("Object class {} is already in the closure", id);
            return Ok(false);
        }

        self.attribute.add(registries, [RawValue::from(id)])?;
        self.merge(registries, class);
        debug!(
            "Added object class {}; closure now holds {} classes",
            class.name(),
            self.all.len()
        );
        Ok(true)
    }

    /// Remove the value naming `id` and recompute the closure from the
    /// remaining values. Returns whether such a value was present.
    pub fn remove_object_class(&mut self, registries: &Registries, id: &str) -> AttributeResult<bool> {
        let Some(target) = registries.object_class(id) else {
            return Ok(false);
        };

        let names: Vec<String> = self
            .names()
            .map(str::to_string)
            .collect();
        let (removed, remaining): (Vec<String>, Vec<String>) = names.into_iter().partition(|name| {
            registries
                .object_class(name)
                .is_some_and(|class| class.oid() == target.oid())
        });
        if removed.is_empty() {
            return Ok(false);
        }

        let mut rebuilt = Self::new(registries)?;
        for name in remaining {
            rebuilt.add_object_class(registries, &name)?;
        }
        *self = rebuilt;
        Ok(true)
    }

    fn merge(&mut self, registries: &Registries, class: &ObjectClass) {
        for member in registries.object_class_closure(class) {
            if !self.all.insert(member.oid().to_string()) {
                continue;
            }
            let bucket = match member.kind {
                ObjectClassKind::Abstract => &mut self.abstract_classes,
                ObjectClassKind::Auxiliary => &mut self.auxiliary_classes,
                ObjectClassKind::Structural => &mut self.structural_classes,
            };
            bucket.insert(member.oid().to_string());
            self.must.extend(member.must.iter().cloned());
            self.may.extend(member.may.iter().cloned());
        }
    }

    /// Drop every value and the derived sets.
    pub fn reset(&mut self) {
        self.attribute.clear();
        self.all.clear();
        self.abstract_classes.clear();
        self.auxiliary_classes.clear();
        self.structural_classes.clear();
        self.must.clear();
        self.may.clear();
    }

    /// Whether the closure contains the class named by `id`.
    pub fn contains(&self, registries: &Registries, id: &str) -> bool {
        registries
            .object_class(id)
            .is_some_and(|class| self.all.contains(class.oid()))
    }

    /// The class identifiers as listed.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attribute.raw_values().filter_map(RawValue::as_text)
    }

    pub fn attribute(&self) -> &ServerAttribute {
        &self.attribute
    }

    pub fn size(&self) -> usize {
        self.attribute.size()
    }

    pub fn is_empty(&self) -> bool {
        self.attribute.is_empty()
    }

    pub fn all_classes(&self) -> &BTreeSet<String> {
        &self.all
    }

    pub fn abstract_classes(&self) -> &BTreeSet<String> {
        &self.abstract_classes
    }

    pub fn auxiliary_classes(&self) -> &BTreeSet<String> {
        &self.auxiliary_classes
    }

    pub fn structural_classes(&self) -> &BTreeSet<String> {
        &self.structural_classes
    }

    pub fn must_attributes(&self) -> &BTreeSet<String> {
        &self.must
    }

    pub fn may_attributes(&self) -> &BTreeSet<String> {
        &self.may
    }
}

fn resolve<'r>(registries: &'r Registries, id: &str) -> AttributeResult<&'r ObjectClass> {
    registries
        .object_class(id)
        .ok_or_else(|| AttributeError::object_class(format!("unknown object class '{}'", id)))
}

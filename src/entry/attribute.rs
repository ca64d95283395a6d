//! Type-checked attribute value container.

use super::value::{RawValue, ServerValue, ValueKind};
use crate::error::{AttributeError, AttributeResult};
use crate::schema::{AttributeType, Registries, SchemaEntity};
use log::debug;

/// The values of one attribute type.
///
/// Every value has the kind (text or binary) of the attribute type's syntax,
/// values are unique under the attribute's matching rule, and a single-valued
/// attribute holds at most one value. Mutations check all of this before
/// touching the container.
#[derive(Debug, Clone)]
pub struct ServerAttribute {
    attribute_oid: String,
    up_id: String,
    human_readable: bool,
    single_value: bool,
    values: Vec<ServerValue>,
}

impl ServerAttribute {
    /// Create an empty attribute for the attribute type named by `id` (OID or
    /// any name). `id` is kept as the user-provided identifier.
    pub fn new(registries: &Registries, id: &str) -> AttributeResult<Self> {
        let attribute_type = registries
            .attribute_type(id)
            .ok_or_else(|| AttributeError::no_such_attribute(id))?;
        Ok(Self::for_type(registries, attribute_type, id))
    }

    pub fn with_values<I>(registries: &Registries, id: &str, values: I) -> AttributeResult<Self>
    where
        I: IntoIterator<Item = RawValue>,
    {
        let mut attribute = Self::new(registries, id)?;
        attribute.add(registries, values)?;
        Ok(attribute)
    }

    pub(crate) fn for_type(
        registries: &Registries,
        attribute_type: &AttributeType,
        up_id: &str,
    ) -> Self {
        Self {
            attribute_oid: attribute_type.oid().to_string(),
            up_id: up_id.to_string(),
            human_readable: registries.is_human_readable(attribute_type),
            single_value: attribute_type.single_value,
            values: Vec::new(),
        }
    }

    pub fn attribute_oid(&self) -> &str {
        &self.attribute_oid
    }

    /// The identifier the attribute was created with.
    pub fn up_id(&self) -> &str {
        &self.up_id
    }

    pub fn set_up_id(&mut self, up_id: impl Into<String>) {
        self.up_id = up_id.into();
    }

    pub fn is_human_readable(&self) -> bool {
        self.human_readable
    }

    pub fn is_single_valued(&self) -> bool {
        self.single_value
    }

    pub fn attribute_type<'r>(&self, registries: &'r Registries) -> Option<&'r AttributeType> {
        registries.attribute_type(&self.attribute_oid)
    }

    fn resolve<'r>(&self, registries: &'r Registries) -> AttributeResult<&'r AttributeType> {
        self.attribute_type(registries)
            .ok_or_else(|| AttributeError::no_such_attribute(&self.attribute_oid))
    }

    /// Whether this attribute's type is `id` or a subtype of it.
    pub fn instance_of(&self, registries: &Registries, id: &str) -> bool {
        match (self.attribute_type(registries), registries.attribute_type(id)) {
            (Some(own), Some(other)) => registries.is_subtype_of(own, other.oid()),
            _ => false,
        }
    }

    /// Add values, skipping those already present. Returns how many were
    /// added.
    ///
    /// Fails without adding anything if a value has the wrong kind or the
    /// result would break the single-value constraint.
    pub fn add<I>(&mut self, registries: &Registries, values: I) -> AttributeResult<usize>
    where
        I: IntoIterator<Item = RawValue>,
    {
        let attribute_type = self.resolve(registries)?;
        let mut added: Vec<ServerValue> = Vec::new();

        for raw in values {
            self.check_kind(raw.is_human_readable())?;
            let value = ServerValue::new(attribute_type, raw);
            if self.position(registries, &value)?.is_some() {
                continue;
            }
            let mut duplicate = false;
            for pending in &added {
                if pending.equals(&value, registries)? {
                    duplicate = true;
                    break;
                }
            }
            if !duplicate {
                added.push(value);
            }
        }

        if self.single_value && self.values.len() + added.len() > 1 {
            debug!("Rejecting a second value for single-valued attribute {}", self.up_id);
            return Err(AttributeError::constraint(
                &self.up_id,
                "attribute is single-valued",
            ));
        }

        let count = added.len();
        self.values.extend(added);
        Ok(count)
    }

    /// Add values of a statically known kind.
    pub fn add_values<V, I>(&mut self, registries: &Registries, values: I) -> AttributeResult<usize>
    where
        V: ValueKind,
        I: IntoIterator<Item = V>,
    {
        self.check_kind(V::HUMAN_READABLE)?;
        self.add(registries, values.into_iter().map(Into::into))
    }

    fn check_kind(&self, human_readable: bool) -> AttributeResult<()> {
        if human_readable == self.human_readable {
            return Ok(());
        }
        let details = if self.human_readable {
            "binary value on a human readable attribute"
        } else {
            "text value on a binary attribute"
        };
        debug!("Rejecting value for {}: {}", self.up_id, details);
        Err(AttributeError::invalid_value(&self.up_id, details))
    }

    fn position(&self, registries: &Registries, candidate: &ServerValue) -> AttributeResult<Option<usize>> {
        for (index, value) in self.values.iter().enumerate() {
            if value.equals(candidate, registries)? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    fn candidate(&self, registries: &Registries, raw: RawValue) -> AttributeResult<Option<ServerValue>> {
        if raw.is_human_readable() != self.human_readable {
            return Ok(None);
        }
        Ok(Some(ServerValue::new(self.resolve(registries)?, raw)))
    }

    /// Whether a value equal to `raw` under the matching rule is present.
    pub fn contains(&self, registries: &Registries, raw: impl Into<RawValue>) -> AttributeResult<bool> {
        match self.candidate(registries, raw.into())? {
            Some(value) => Ok(self.position(registries, &value)?.is_some()),
            None => Ok(false),
        }
    }

    /// Remove the value equal to `raw`. Returns whether it was present.
    pub fn remove(&mut self, registries: &Registries, raw: impl Into<RawValue>) -> AttributeResult<bool> {
        let Some(value) = self.candidate(registries, raw.into())? else {
            return Ok(false);
        };
        match self.position(registries, &value)? {
            Some(index) => {
                self.values.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove every listed value that is present. Returns true iff every
    /// listed value was present and removed.
    pub fn remove_all<I>(&mut self, registries: &Registries, values: I) -> AttributeResult<bool>
    where
        I: IntoIterator<Item = RawValue>,
    {
        let mut all_removed = true;
        for raw in values {
            all_removed &= self.remove(registries, raw)?;
        }
        Ok(all_removed)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The first value.
    pub fn get(&self) -> Option<&ServerValue> {
        self.values.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServerValue> {
        self.values.iter()
    }

    pub fn raw_values(&self) -> impl Iterator<Item = &RawValue> {
        self.values.iter().filter_map(ServerValue::raw)
    }

    /// Whether every value is syntactically valid and the single-value
    /// constraint holds.
    pub fn is_valid(&self, registries: &Registries) -> bool {
        (!self.single_value || self.values.len() <= 1)
            && self.values.iter().all(|value| value.is_valid(registries))
    }
}

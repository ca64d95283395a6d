//! Identity and membership record shared by every schema object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The seven kinds of schema object held by the registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemaObjectType {
    Comparator,
    Normalizer,
    SyntaxChecker,
    LdapSyntax,
    MatchingRule,
    AttributeType,
    ObjectClass,
}

impl SchemaObjectType {
    /// Relational types share the global OID namespace; executable ones do not.
    pub fn is_nameable(&self) -> bool {
        matches!(
            self,
            SchemaObjectType::AttributeType
                | SchemaObjectType::ObjectClass
                | SchemaObjectType::MatchingRule
                | SchemaObjectType::LdapSyntax
        )
    }
}

impl fmt::Display for SchemaObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SchemaObjectType::Comparator => "comparator",
            SchemaObjectType::Normalizer => "normalizer",
            SchemaObjectType::SyntaxChecker => "syntax checker",
            SchemaObjectType::LdapSyntax => "syntax",
            SchemaObjectType::MatchingRule => "matching rule",
            SchemaObjectType::AttributeType => "attribute type",
            SchemaObjectType::ObjectClass => "object class",
        };
        f.write_str(label)
    }
}

/// OID, names, owning schema and flags of a schema object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaObject {
    /// Dotted-numeric object identifier
    pub oid: String,
    /// Names in declaration order; the first one is the primary name
    #[serde(default)]
    pub names: Vec<String>,
    /// Name of the schema owning this object
    #[serde(default)]
    pub schema_name: String,
    #[serde(default)]
    pub obsolete: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl SchemaObject {
    pub fn new(oid: impl Into<String>) -> Self {
        Self {
            oid: oid.into(),
            ..Self::default()
        }
    }

    /// The primary name, or the OID for unnamed objects.
    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or(&self.oid)
    }

    /// Whether `id` is this object's OID or one of its names.
    pub fn has_id(&self, id: &str) -> bool {
        self.oid == id || self.names.iter().any(|n| n.eq_ignore_ascii_case(id))
    }
}

impl fmt::Display for SchemaObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.names.is_empty() {
            write!(f, "{}", self.oid)
        } else {
            write!(f, "{} ({})", self.name(), self.oid)
        }
    }
}

/// Common behaviour of the typed schema objects.
pub trait SchemaEntity: Clone + fmt::Debug {
    const OBJECT_TYPE: SchemaObjectType;

    fn object(&self) -> &SchemaObject;

    fn object_mut(&mut self) -> &mut SchemaObject;

    fn oid(&self) -> &str {
        &self.object().oid
    }

    fn names(&self) -> &[String] {
        &self.object().names
    }

    fn name(&self) -> &str {
        self.object().name()
    }

    fn schema_name(&self) -> &str {
        &self.object().schema_name
    }
}

/// Implements [`SchemaEntity`] and the shared builder methods for a type whose
/// `object` field holds its [`SchemaObject`].
macro_rules! impl_schema_entity {
    ($type:ty, $kind:ident) => {
        impl $crate::schema::object::SchemaEntity for $type {
            const OBJECT_TYPE: $crate::schema::object::SchemaObjectType =
                $crate::schema::object::SchemaObjectType::$kind;

            fn object(&self) -> &$crate::schema::object::SchemaObject {
                &self.object
            }

            fn object_mut(&mut self) -> &mut $crate::schema::object::SchemaObject {
                &mut self.object
            }
        }

        impl $type {
            /// Set the names, replacing any previous ones.
            pub fn with_names<I, S>(mut self, names: I) -> Self
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                self.object.names = names.into_iter().map(Into::into).collect();
                self
            }

            /// Set the owning schema.
            pub fn in_schema(mut self, schema_name: impl Into<String>) -> Self {
                self.object.schema_name = schema_name.into();
                self
            }

            pub fn with_description(mut self, description: impl Into<String>) -> Self {
                self.object.description = Some(description.into());
                self
            }

            pub fn obsolete(mut self) -> Self {
                self.object.obsolete = true;
                self
            }
        }

        impl From<$type> for $crate::schema::types::SchemaElement {
            fn from(value: $type) -> Self {
                $crate::schema::types::SchemaElement::$kind(value)
            }
        }
    };
}

pub(crate) use impl_schema_entity;

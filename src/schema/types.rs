//! Core schema type definitions.
//!
//! This module contains the typed schema objects of RFC 4512: attribute types,
//! object classes, matching rules and syntaxes, plus the executable
//! comparator, normalizer and syntax checker objects. Cross references are
//! stored as OIDs and resolved through the registries when needed.

use super::object::{SchemaObject, SchemaObjectType, impl_schema_entity};
use crate::matching::{ValueComparator, ValueNormalizer, ValueSyntaxChecker};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Attribute type usage (RFC 4512 section 4.1.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Usage {
    /// Ordinary user attribute
    #[default]
    UserApplications,
    /// Operational attribute, shared by all DSAs
    DirectoryOperation,
    /// Operational attribute, shared and replicated
    DistributedOperation,
    /// Operational attribute, local to one DSA
    DsaOperation,
}

impl Usage {
    pub fn is_operational(&self) -> bool {
        !matches!(self, Usage::UserApplications)
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Usage::UserApplications => "userApplications",
            Usage::DirectoryOperation => "directoryOperation",
            Usage::DistributedOperation => "distributedOperation",
            Usage::DsaOperation => "dSAOperation",
        };
        f.write_str(label)
    }
}

/// Object class kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectClassKind {
    Abstract,
    #[default]
    Structural,
    Auxiliary,
}

impl ObjectClassKind {
    /// Whether a class of this kind may derive from a class of kind `superior`.
    pub fn accepts_superior(&self, superior: ObjectClassKind) -> bool {
        match self {
            ObjectClassKind::Abstract => superior == ObjectClassKind::Abstract,
            ObjectClassKind::Auxiliary => superior != ObjectClassKind::Structural,
            ObjectClassKind::Structural => superior != ObjectClassKind::Auxiliary,
        }
    }
}

impl fmt::Display for ObjectClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ObjectClassKind::Abstract => "ABSTRACT",
            ObjectClassKind::Structural => "STRUCTURAL",
            ObjectClassKind::Auxiliary => "AUXILIARY",
        };
        f.write_str(label)
    }
}

/// An attribute type definition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeType {
    #[serde(flatten)]
    pub object: SchemaObject,
    /// Superior attribute type (OID or name until registered)
    #[serde(default)]
    pub superior: Option<String>,
    #[serde(default)]
    pub equality: Option<String>,
    #[serde(default)]
    pub ordering: Option<String>,
    #[serde(default)]
    pub substring: Option<String>,
    #[serde(default)]
    pub syntax: Option<String>,
    /// Upper bound from `SYNTAX oid{len}`; carried, not enforced
    #[serde(default)]
    pub syntax_length: Option<u32>,
    #[serde(default)]
    pub single_value: bool,
    #[serde(default)]
    pub collective: bool,
    #[serde(default)]
    pub no_user_modification: bool,
    #[serde(default)]
    pub usage: Usage,
}

impl_schema_entity!(AttributeType, AttributeType);

impl AttributeType {
    pub fn new(oid: impl Into<String>) -> Self {
        Self {
            object: SchemaObject::new(oid),
            ..Self::default()
        }
    }

    pub fn with_superior(mut self, superior: impl Into<String>) -> Self {
        self.superior = Some(superior.into());
        self
    }

    pub fn with_syntax(mut self, syntax: impl Into<String>) -> Self {
        self.syntax = Some(syntax.into());
        self
    }

    pub fn with_equality(mut self, rule: impl Into<String>) -> Self {
        self.equality = Some(rule.into());
        self
    }

    pub fn with_ordering(mut self, rule: impl Into<String>) -> Self {
        self.ordering = Some(rule.into());
        self
    }

    pub fn with_substring(mut self, rule: impl Into<String>) -> Self {
        self.substring = Some(rule.into());
        self
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = usage;
        self
    }

    pub fn single_valued(mut self) -> Self {
        self.single_value = true;
        self
    }

    pub fn collective(mut self) -> Self {
        self.collective = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.no_user_modification = true;
        self
    }

    pub fn is_user_modifiable(&self) -> bool {
        !self.no_user_modification
    }

    /// The first matching rule available for value matching: equality, then
    /// ordering, then substring.
    pub fn matching_rule(&self) -> Option<&str> {
        self.equality
            .as_deref()
            .or(self.ordering.as_deref())
            .or(self.substring.as_deref())
    }
}

/// An object class definition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectClass {
    #[serde(flatten)]
    pub object: SchemaObject,
    #[serde(default)]
    pub kind: ObjectClassKind,
    #[serde(default)]
    pub superiors: Vec<String>,
    #[serde(default)]
    pub must: Vec<String>,
    #[serde(default)]
    pub may: Vec<String>,
}

impl_schema_entity!(ObjectClass, ObjectClass);

impl ObjectClass {
    pub fn new(oid: impl Into<String>) -> Self {
        Self {
            object: SchemaObject::new(oid),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: ObjectClassKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_superiors<I, S>(mut self, superiors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.superiors = superiors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_must<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.must = attributes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_may<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.may = attributes.into_iter().map(Into::into).collect();
        self
    }
}

/// A matching rule definition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingRule {
    #[serde(flatten)]
    pub object: SchemaObject,
    /// Assertion syntax; required
    #[serde(default)]
    pub syntax: String,
    /// Comparator OID; when unset, the comparator sharing this rule's OID
    #[serde(default)]
    pub comparator: Option<String>,
    /// Normalizer OID; when unset, the normalizer sharing this rule's OID
    #[serde(default)]
    pub normalizer: Option<String>,
}

impl_schema_entity!(MatchingRule, MatchingRule);

impl MatchingRule {
    pub fn new(oid: impl Into<String>, syntax: impl Into<String>) -> Self {
        Self {
            object: SchemaObject::new(oid),
            syntax: syntax.into(),
            ..Self::default()
        }
    }

    pub fn with_comparator(mut self, comparator: impl Into<String>) -> Self {
        self.comparator = Some(comparator.into());
        self
    }

    pub fn with_normalizer(mut self, normalizer: impl Into<String>) -> Self {
        self.normalizer = Some(normalizer.into());
        self
    }
}

fn default_human_readable() -> bool {
    true
}

/// An LDAP syntax definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LdapSyntax {
    #[serde(flatten)]
    pub object: SchemaObject,
    /// Syntax checker OID; when unset, the checker sharing this syntax's OID
    #[serde(default)]
    pub syntax_checker: Option<String>,
    /// False for syntaxes flagged `X-NOT-HUMAN-READABLE`
    #[serde(default = "default_human_readable")]
    pub human_readable: bool,
}

impl_schema_entity!(LdapSyntax, LdapSyntax);

impl LdapSyntax {
    pub fn new(oid: impl Into<String>) -> Self {
        Self {
            object: SchemaObject::new(oid),
            syntax_checker: None,
            human_readable: true,
        }
    }

    pub fn with_syntax_checker(mut self, checker: impl Into<String>) -> Self {
        self.syntax_checker = Some(checker.into());
        self
    }

    pub fn binary(mut self) -> Self {
        self.human_readable = false;
        self
    }
}

macro_rules! executable_object {
    ($(#[$meta:meta])* $name:ident, $kind:ident, $handle:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            #[serde(flatten)]
            pub object: SchemaObject,
            /// Identifier resolved in the implementation table
            pub implementation: String,
            #[serde(skip)]
            instance: Option<Arc<dyn $handle>>,
        }

        impl_schema_entity!($name, $kind);

        impl $name {
            pub fn new(oid: impl Into<String>, implementation: impl Into<String>) -> Self {
                Self {
                    object: SchemaObject::new(oid),
                    implementation: implementation.into(),
                    instance: None,
                }
            }

            /// The resolved implementation; set once the object is registered.
            pub fn instance(&self) -> Option<&Arc<dyn $handle>> {
                self.instance.as_ref()
            }

            pub(crate) fn bind(&mut self, instance: Arc<dyn $handle>) {
                self.instance = Some(instance);
            }
        }
    };
}

executable_object!(
    /// Comparator schema object.
    Comparator,
    Comparator,
    ValueComparator
);
executable_object!(
    /// Normalizer schema object.
    Normalizer,
    Normalizer,
    ValueNormalizer
);
executable_object!(
    /// Syntax checker schema object.
    SyntaxChecker,
    SyntaxChecker,
    ValueSyntaxChecker
);

/// Any schema object, as carried by schema bundles and accepted by the
/// schema manager.
#[derive(Debug, Clone)]
pub enum SchemaElement {
    AttributeType(AttributeType),
    ObjectClass(ObjectClass),
    MatchingRule(MatchingRule),
    LdapSyntax(LdapSyntax),
    Comparator(Comparator),
    Normalizer(Normalizer),
    SyntaxChecker(SyntaxChecker),
}

impl SchemaElement {
    pub fn object(&self) -> &SchemaObject {
        match self {
            SchemaElement::AttributeType(e) => &e.object,
            SchemaElement::ObjectClass(e) => &e.object,
            SchemaElement::MatchingRule(e) => &e.object,
            SchemaElement::LdapSyntax(e) => &e.object,
            SchemaElement::Comparator(e) => &e.object,
            SchemaElement::Normalizer(e) => &e.object,
            SchemaElement::SyntaxChecker(e) => &e.object,
        }
    }

    pub fn object_mut(&mut self) -> &mut SchemaObject {
        match self {
            SchemaElement::AttributeType(e) => &mut e.object,
            SchemaElement::ObjectClass(e) => &mut e.object,
            SchemaElement::MatchingRule(e) => &mut e.object,
            SchemaElement::LdapSyntax(e) => &mut e.object,
            SchemaElement::Comparator(e) => &mut e.object,
            SchemaElement::Normalizer(e) => &mut e.object,
            SchemaElement::SyntaxChecker(e) => &mut e.object,
        }
    }

    pub fn object_type(&self) -> SchemaObjectType {
        match self {
            SchemaElement::AttributeType(_) => SchemaObjectType::AttributeType,
            SchemaElement::ObjectClass(_) => SchemaObjectType::ObjectClass,
            SchemaElement::MatchingRule(_) => SchemaObjectType::MatchingRule,
            SchemaElement::LdapSyntax(_) => SchemaObjectType::LdapSyntax,
            SchemaElement::Comparator(_) => SchemaObjectType::Comparator,
            SchemaElement::Normalizer(_) => SchemaObjectType::Normalizer,
            SchemaElement::SyntaxChecker(_) => SchemaObjectType::SyntaxChecker,
        }
    }

    pub fn oid(&self) -> &str {
        &self.object().oid
    }
}

impl fmt::Display for SchemaElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.object_type(), self.object())
    }
}

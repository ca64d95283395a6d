//! Error types for schema management and the schema-aware entry model.
//!
//! Schema mutations report one of two error kinds: a [`SchemaError::SchemaViolation`]
//! when a change would break the consistency of the registries, and a
//! [`SchemaError::OperationNotSupported`] when a request names a schema that
//! does not exist. The entry model uses [`AttributeError`] for problems detected
//! while building or mutating values, attributes and entries.

use std::fmt;

/// The two kinds of failure a schema mutation can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The mutation would break a consistency invariant
    SchemaViolation,
    /// The request references a schema that is not known
    OperationNotSupported,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::SchemaViolation => write!(f, "schemaViolation"),
            ErrorKind::OperationNotSupported => write!(f, "unwillingToPerform"),
        }
    }
}

/// Main error type for schema registry and schema manager operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Missing reference, duplicate OID or name, incompatible hierarchy,
    /// dangling reference on delete or unresolvable implementation
    #[error("Schema violation: {message}")]
    SchemaViolation { message: String },

    /// Reference to a schema name that does not exist
    #[error("Operation not supported: {message}")]
    OperationNotSupported { message: String },
}

impl SchemaError {
    /// Create a schema violation error
    pub fn violation(message: impl Into<String>) -> Self {
        Self::SchemaViolation {
            message: message.into(),
        }
    }

    /// Create an operation-not-supported error
    pub fn not_supported(message: impl Into<String>) -> Self {
        Self::OperationNotSupported {
            message: message.into(),
        }
    }

    /// Create the error reported when a schema name cannot be resolved
    pub fn unknown_schema(name: impl fmt::Display) -> Self {
        Self::not_supported(format!("schema '{}' does not exist", name))
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchemaError::SchemaViolation { .. } => ErrorKind::SchemaViolation,
            SchemaError::OperationNotSupported { .. } => ErrorKind::OperationNotSupported,
        }
    }

    /// The human readable message, without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            SchemaError::SchemaViolation { message }
            | SchemaError::OperationNotSupported { message } => message,
        }
    }
}

/// Errors raised by values, attributes and entries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    /// Attribute type cannot be resolved against the registries
    #[error("No such attribute type: {id}")]
    NoSuchAttribute { id: String },

    /// Value does not fit the attribute (wrong kind, failed normalization)
    #[error("Attribute '{attribute}' has an invalid value: {details}")]
    InvalidAttributeValue { attribute: String, details: String },

    /// Cardinality or presence constraint broken
    #[error("Attribute '{attribute}' violates a constraint: {details}")]
    ConstraintViolation { attribute: String, details: String },

    /// Entry object classes or attribute set do not satisfy the schema
    #[error("Object class violation: {details}")]
    ObjectClassViolation { details: String },
}

impl AttributeError {
    /// Create a no-such-attribute error
    pub fn no_such_attribute(id: impl Into<String>) -> Self {
        Self::NoSuchAttribute { id: id.into() }
    }

    /// Create an invalid attribute value error
    pub fn invalid_value(attribute: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidAttributeValue {
            attribute: attribute.into(),
            details: details.into(),
        }
    }

    /// Create a constraint violation error
    pub fn constraint(attribute: impl Into<String>, details: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            attribute: attribute.into(),
            details: details.into(),
        }
    }

    /// Create an object class violation error
    pub fn object_class(details: impl Into<String>) -> Self {
        Self::ObjectClassViolation {
            details: details.into(),
        }
    }
}

/// Failure reported by a normalizer that cannot canonicalize a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct InvalidValue(pub String);

impl InvalidValue {
    pub fn new(details: impl Into<String>) -> Self {
        Self(details.into())
    }
}

// Result type aliases for convenience
pub type SchemaResult<T> = Result<T, SchemaError>;
pub type AttributeResult<T> = Result<T, AttributeError>;

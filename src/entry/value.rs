//! Raw values and schema-aware server values.

use crate::error::{AttributeError, AttributeResult};
use crate::schema::{AttributeType, Registries, SchemaEntity};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::cell::{Cell, OnceCell};
use std::cmp::Ordering;
use std::fmt;

/// The user-provided form of an attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RawValue {
    /// Value of a human readable syntax
    Text(String),
    /// Value of a syntax flagged as not human readable
    Binary(Vec<u8>),
}

impl RawValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(text) => Some(text),
            RawValue::Binary(_) => None,
        }
    }

    /// The value's bytes; UTF-8 for text values.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            RawValue::Text(text) => text.as_bytes(),
            RawValue::Binary(bytes) => bytes,
        }
    }

    pub fn is_human_readable(&self) -> bool {
        matches!(self, RawValue::Text(_))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<Vec<u8>> for RawValue {
    fn from(value: Vec<u8>) -> Self {
        RawValue::Binary(value)
    }
}

impl From<&[u8]> for RawValue {
    fn from(value: &[u8]) -> Self {
        RawValue::Binary(value.to_vec())
    }
}

/// Text is shown as is, binary values as base64.
impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(text) => f.write_str(text),
            RawValue::Binary(bytes) => f.write_str(&STANDARD.encode(bytes)),
        }
    }
}

/// Rust types usable as attribute values, tagged with their kind.
///
/// Typed adds check the kind against the attribute's syntax before any value
/// is converted.
pub trait ValueKind: Into<RawValue> {
    const HUMAN_READABLE: bool;
}

impl ValueKind for String {
    const HUMAN_READABLE: bool = true;
}

impl ValueKind for &str {
    const HUMAN_READABLE: bool = true;
}

impl ValueKind for Vec<u8> {
    const HUMAN_READABLE: bool = false;
}

impl ValueKind for &[u8] {
    const HUMAN_READABLE: bool = false;
}

/// A value bound to an attribute type.
///
/// The normalized form and the syntax validity are computed on first use
/// through the registries and cached until the raw value changes. Caches are
/// per instance: a `ServerValue` is `Send` but not `Sync`.
#[derive(Debug, Clone)]
pub struct ServerValue {
    attribute_oid: String,
    raw: Option<RawValue>,
    normalized: OnceCell<RawValue>,
    valid: Cell<Option<bool>>,
}

impl ServerValue {
    pub fn new(attribute_type: &AttributeType, raw: impl Into<RawValue>) -> Self {
        Self::with_raw(attribute_type, Some(raw.into()))
    }

    /// A value without content.
    pub fn null(attribute_type: &AttributeType) -> Self {
        Self::with_raw(attribute_type, None)
    }

    fn with_raw(attribute_type: &AttributeType, raw: Option<RawValue>) -> Self {
        Self {
            attribute_oid: attribute_type.oid().to_string(),
            raw,
            normalized: OnceCell::new(),
            valid: Cell::new(None),
        }
    }

    pub fn attribute_oid(&self) -> &str {
        &self.attribute_oid
    }

    pub fn raw(&self) -> Option<&RawValue> {
        self.raw.as_ref()
    }

    pub fn is_null(&self) -> bool {
        self.raw.is_none()
    }

    /// Replace the raw value. Setting the current value again keeps the
    /// caches.
    pub fn set(&mut self, raw: Option<RawValue>) {
        if self.raw == raw {
            return;
        }
        self.raw = raw;
        self.normalized = OnceCell::new();
        self.valid.set(None);
    }

    fn attribute_type<'r>(&self, registries: &'r Registries) -> AttributeResult<&'r AttributeType> {
        registries
            .attribute_type(&self.attribute_oid)
            .ok_or_else(|| AttributeError::no_such_attribute(&self.attribute_oid))
    }

    /// The canonical form used for matching, `None` for a null value.
    ///
    /// Uses the normalizer of the attribute type's matching rule (equality,
    /// then ordering, then substring). Without one, the raw value is its own
    /// normalized form. Failures are reported and not cached.
    pub fn normalized(&self, registries: &Registries) -> AttributeResult<Option<&RawValue>> {
        let Some(raw) = &self.raw else {
            return Ok(None);
        };
        if let Some(cached) = self.normalized.get() {
            return Ok(Some(cached));
        }

        let attribute_type = self.attribute_type(registries)?;
        let normalized = match registries.normalizer_for(attribute_type) {
            Some(normalizer) => normalizer
                .normalize(raw)
                .map_err(|e| AttributeError::invalid_value(attribute_type.name(), e.to_string()))?,
            None => raw.clone(),
        };
        Ok(Some(self.normalized.get_or_init(|| normalized)))
    }

    /// Whether the raw value conforms to the attribute type's syntax. A null
    /// value is always valid.
    pub fn is_valid(&self, registries: &Registries) -> bool {
        let Some(raw) = &self.raw else {
            return true;
        };
        if let Some(valid) = self.valid.get() {
            return valid;
        }

        let Ok(attribute_type) = self.attribute_type(registries) else {
            return false;
        };
        let valid = registries.syntax_checker_for(attribute_type).is_valid(raw);
        self.valid.set(Some(valid));
        valid
    }

    /// Order two values of the same attribute type. Null values sort first
    /// and are equal to each other; other values are compared in normalized
    /// form by the matching rule's comparator.
    pub fn compare_to(&self, other: &ServerValue, registries: &Registries) -> AttributeResult<Ordering> {
        if self.raw.is_none() || other.raw.is_none() {
            return Ok(self.raw.is_some().cmp(&other.raw.is_some()));
        }
        let (Some(left), Some(right)) = (self.normalized(registries)?, other.normalized(registries)?)
        else {
            return Ok(Ordering::Equal);
        };
        let attribute_type = self.attribute_type(registries)?;
        Ok(registries.comparator_for(attribute_type).compare(left, right))
    }

    pub fn equals(&self, other: &ServerValue, registries: &Registries) -> AttributeResult<bool> {
        if self.raw == other.raw {
            return Ok(true);
        }
        Ok(self.compare_to(other, registries)? == Ordering::Equal)
    }
}

impl fmt::Display for ServerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => write!(f, "{}", raw),
            None => f.write_str("<null>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidValue;
    use crate::matching::ValueNormalizer;
    use crate::matching::comparators::StringComparator;
    use crate::matching::normalizers::DeepTrimToLowerNormalizer;
    use crate::matching::syntax_checkers::Ia5StringSyntaxChecker;
    use crate::schema::{Comparator, LdapSyntax, MatchingRule, Normalizer, SyntaxChecker};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    #[derive(Debug, Default)]
    struct CountingNormalizer {
        calls: Arc<AtomicUsize>,
    }

    impl ValueNormalizer for CountingNormalizer {
        fn normalize(&self, value: &RawValue) -> Result<RawValue, InvalidValue> {
            self.calls.fetch_add(1, AtomicOrdering::SeqCst);
            DeepTrimToLowerNormalizer.normalize(value)
        }
    }

    const IA5: &str = "1.3.6.1.4.1.1466.115.121.1.26";
    const RULE: &str = "1.3.6.1.4.1.1466.109.114.2";

    fn registries(calls: Arc<AtomicUsize>) -> Registries {
        let mut registries = Registries::new();

        let mut normalizer = Normalizer::new(RULE, "CountingNormalizer");
        normalizer.bind(Arc::new(CountingNormalizer { calls }));
        let mut comparator = Comparator::new(RULE, "StringComparator");
        comparator.bind(Arc::new(StringComparator));
        let mut checker = SyntaxChecker::new(IA5, "Ia5StringSyntaxChecker");
        checker.bind(Arc::new(Ia5StringSyntaxChecker));

        registries.insert(normalizer.into()).unwrap();
        registries.insert(comparator.into()).unwrap();
        registries.insert(checker.into()).unwrap();
        registries.insert(LdapSyntax::new(IA5).into()).unwrap();
        registries
            .insert(MatchingRule::new(RULE, IA5).with_names(["caseIgnoreIA5Match"]).into())
            .unwrap();
        registries
            .insert(
                AttributeType::new("0.9.2342.19200300.100.1.3")
                    .with_names(["mail"])
                    .with_syntax(IA5)
                    .with_equality(RULE)
                    .into(),
            )
            .unwrap();
        registries
    }

    fn mail(registries: &Registries) -> &AttributeType {
        registries.attribute_type("mail").unwrap()
    }

    #[test]
    fn test_normalized_form_is_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registries = registries(calls.clone());
        let value = ServerValue::new(mail(&registries), "  John.Doe@Example.COM ");

        let first = value.normalized(&registries).unwrap().cloned();
        let second = value.normalized(&registries).unwrap().cloned();
        assert_eq!(first, Some(RawValue::from("john.doe@example.com")));
        assert_eq!(first, second);
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 1);
    }

    #[test]
    fn test_set_clears_caches_only_on_change() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registries = registries(calls.clone());
        let mut value = ServerValue::new(mail(&registries), "a@example.com");
        value.normalized(&registries).unwrap();

        value.set(Some(RawValue::from("a@example.com")));
        value.normalized(&registries).unwrap();
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 1);

        value.set(Some(RawValue::from("B@example.com")));
        assert_eq!(
            value.normalized(&registries).unwrap(),
            Some(&RawValue::from("b@example.com"))
        );
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 2);
    }

    #[test]
    fn test_validity_uses_syntax_checker() {
        let registries = registries(Arc::default());
        assert!(ServerValue::new(mail(&registries), "jdoe@example.com").is_valid(&registries));
        assert!(!ServerValue::new(mail(&registries), "jdö@example.com").is_valid(&registries));
        assert!(ServerValue::null(mail(&registries)).is_valid(&registries));
    }

    #[test]
    fn test_compare_and_equals() {
        let registries = registries(Arc::default());
        let at = mail(&registries);
        let upper = ServerValue::new(at, "JDOE@EXAMPLE.COM");
        let lower = ServerValue::new(at, "jdoe@example.com");
        let other = ServerValue::new(at, "zed@example.com");
        let null = ServerValue::null(at);

        assert!(upper.equals(&lower, &registries).unwrap());
        assert_eq!(lower.compare_to(&other, &registries).unwrap(), Ordering::Less);
        assert_eq!(null.compare_to(&lower, &registries).unwrap(), Ordering::Less);
        assert_eq!(lower.compare_to(&null, &registries).unwrap(), Ordering::Greater);
        assert_eq!(
            null.compare_to(&ServerValue::null(at), &registries).unwrap(),
            Ordering::Equal
        );
    }

    #[test]
    fn test_null_orders_first_even_against_unnormalizable_values() {
        let registries = registries(Arc::default());
        let at = mail(&registries);
        let binary = ServerValue::new(at, vec![0x01u8, 0x02]);
        let null = ServerValue::null(at);

        assert!(binary.normalized(&registries).is_err());
        assert_eq!(null.compare_to(&binary, &registries).unwrap(), Ordering::Less);
        assert_eq!(binary.compare_to(&null, &registries).unwrap(), Ordering::Greater);
        assert!(!null.equals(&binary, &registries).unwrap());
    }

    #[test]
    fn test_binary_values_display_as_base64() {
        assert_eq!(RawValue::from(vec![0xffu8, 0xd8, 0xff]).to_string(), "/9j/");
        assert_eq!(RawValue::from("text").to_string(), "text");
    }
}

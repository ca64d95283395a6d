//! Executable schema logic: comparators, normalizers and syntax checkers.
//!
//! Comparator, Normalizer and SyntaxChecker schema objects carry an
//! implementation identifier. Identifiers are resolved against an
//! [`ImplementationRegistry`], a closed table of statically registered
//! implementations. Unknown identifiers are rejected when the schema object is
//! added, the same way an unloadable class would be.
//!
//! # Key Types
//!
//! - [`ValueComparator`] - orders two (normalized) values
//! - [`ValueNormalizer`] - produces the canonical form of a value
//! - [`ValueSyntaxChecker`] - decides whether a value conforms to a syntax
//! - [`ImplementationRegistry`] - identifier to implementation table
//!
//! # Examples
//!
//! ```rust
//! use ldap_schema::matching::ImplementationRegistry;
//! use ldap_schema::entry::RawValue;
//!
//! let implementations = ImplementationRegistry::new();
//! let normalizer = implementations.normalizer("DeepTrimToLowerNormalizer").unwrap();
//! let normalized = normalizer.normalize(&RawValue::from("  John   DOE ")).unwrap();
//! assert_eq!(normalized, RawValue::from("john doe"));
//! ```

pub mod comparators;
pub mod normalizers;
pub mod syntax_checkers;

use crate::entry::RawValue;
use crate::error::InvalidValue;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Orders two values of the same attribute.
pub trait ValueComparator: Debug + Send + Sync {
    fn compare(&self, left: &RawValue, right: &RawValue) -> Ordering;
}

/// Produces the canonical form used for matching.
pub trait ValueNormalizer: Debug + Send + Sync {
    fn normalize(&self, value: &RawValue) -> Result<RawValue, InvalidValue>;
}

/// Validates a raw value against a syntax.
pub trait ValueSyntaxChecker: Debug + Send + Sync {
    fn is_valid(&self, value: &RawValue) -> bool;
}

/// Identifier of the comparator used when a matching rule names none.
pub const DEFAULT_COMPARATOR: &str = "ComparableComparator";
/// Identifier of the normalizer used when a matching rule names none.
pub const DEFAULT_NORMALIZER: &str = "NoOpNormalizer";
/// Identifier of the syntax checker used when a syntax names none.
pub const DEFAULT_SYNTAX_CHECKER: &str = "OctetStringSyntaxChecker";

/// Table of named comparator, normalizer and syntax checker implementations.
///
/// The table starts with the built-in implementations. Callers may register
/// more under new identifiers before adding schema objects that use them.
#[derive(Debug, Clone, Default)]
pub struct ImplementationRegistry {
    comparators: BTreeMap<String, Arc<dyn ValueComparator>>,
    normalizers: BTreeMap<String, Arc<dyn ValueNormalizer>>,
    syntax_checkers: BTreeMap<String, Arc<dyn ValueSyntaxChecker>>,
}

impl ImplementationRegistry {
    /// Create a table holding every built-in implementation.
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_default_implementations();
        registry
    }

    /// Create a table with no implementations at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn register_comparator(
        &mut self,
        id: impl Into<String>,
        comparator: Arc<dyn ValueComparator>,
    ) {
        self.comparators.insert(id.into(), comparator);
    }

    pub fn register_normalizer(
        &mut self,
        id: impl Into<String>,
        normalizer: Arc<dyn ValueNormalizer>,
    ) {
        self.normalizers.insert(id.into(), normalizer);
    }

    pub fn register_syntax_checker(
        &mut self,
        id: impl Into<String>,
        checker: Arc<dyn ValueSyntaxChecker>,
    ) {
        self.syntax_checkers.insert(id.into(), checker);
    }

    pub fn comparator(&self, id: &str) -> Option<Arc<dyn ValueComparator>> {
        self.comparators.get(id).cloned()
    }

    pub fn normalizer(&self, id: &str) -> Option<Arc<dyn ValueNormalizer>> {
        self.normalizers.get(id).cloned()
    }

    pub fn syntax_checker(&self, id: &str) -> Option<Arc<dyn ValueSyntaxChecker>> {
        self.syntax_checkers.get(id).cloned()
    }

    fn register_default_implementations(&mut self) {
        use comparators::*;
        use normalizers::*;
        use syntax_checkers::*;

        self.register_comparator("ComparableComparator", Arc::new(ComparableComparator));
        self.register_comparator("StringComparator", Arc::new(StringComparator));
        self.register_comparator("ByteArrayComparator", Arc::new(ByteArrayComparator));
        self.register_comparator("IntegerComparator", Arc::new(IntegerComparator));
        self.register_comparator("BooleanComparator", Arc::new(BooleanComparator));
        self.register_comparator(
            "GeneralizedTimeComparator",
            Arc::new(GeneralizedTimeComparator),
        );

        self.register_normalizer("NoOpNormalizer", Arc::new(NoOpNormalizer));
        self.register_normalizer("DeepTrimNormalizer", Arc::new(DeepTrimNormalizer));
        self.register_normalizer(
            "DeepTrimToLowerNormalizer",
            Arc::new(DeepTrimToLowerNormalizer),
        );
        self.register_normalizer("NumericNormalizer", Arc::new(NumericNormalizer));
        self.register_normalizer("BooleanNormalizer", Arc::new(BooleanNormalizer));
        self.register_normalizer(
            "TelephoneNumberNormalizer",
            Arc::new(TelephoneNumberNormalizer),
        );
        self.register_normalizer(
            "ObjectIdentifierNormalizer",
            Arc::new(ObjectIdentifierNormalizer),
        );
        self.register_normalizer("DnNormalizer", Arc::new(DnNormalizer));
        self.register_normalizer(
            "GeneralizedTimeNormalizer",
            Arc::new(GeneralizedTimeNormalizer),
        );
        self.register_normalizer("UuidNormalizer", Arc::new(UuidNormalizer));
        self.register_normalizer("IntegerNormalizer", Arc::new(IntegerNormalizer));

        self.register_syntax_checker(
            "OctetStringSyntaxChecker",
            Arc::new(OctetStringSyntaxChecker),
        );
        self.register_syntax_checker("BinarySyntaxChecker", Arc::new(BinarySyntaxChecker));
        self.register_syntax_checker(
            "DirectoryStringSyntaxChecker",
            Arc::new(DirectoryStringSyntaxChecker),
        );
        self.register_syntax_checker("Ia5StringSyntaxChecker", Arc::new(Ia5StringSyntaxChecker));
        self.register_syntax_checker("IntegerSyntaxChecker", Arc::new(IntegerSyntaxChecker));
        self.register_syntax_checker("BooleanSyntaxChecker", Arc::new(BooleanSyntaxChecker));
        self.register_syntax_checker("OidSyntaxChecker", Arc::new(OidSyntaxChecker));
        self.register_syntax_checker(
            "NumericStringSyntaxChecker",
            Arc::new(NumericStringSyntaxChecker),
        );
        self.register_syntax_checker(
            "PrintableStringSyntaxChecker",
            Arc::new(PrintableStringSyntaxChecker),
        );
        self.register_syntax_checker(
            "TelephoneNumberSyntaxChecker",
            Arc::new(TelephoneNumberSyntaxChecker),
        );
        self.register_syntax_checker(
            "GeneralizedTimeSyntaxChecker",
            Arc::new(GeneralizedTimeSyntaxChecker),
        );
        self.register_syntax_checker("UuidSyntaxChecker", Arc::new(UuidSyntaxChecker));
        self.register_syntax_checker("DnSyntaxChecker", Arc::new(DnSyntaxChecker));
        self.register_syntax_checker(
            "CountryStringSyntaxChecker",
            Arc::new(CountryStringSyntaxChecker),
        );
    }
}

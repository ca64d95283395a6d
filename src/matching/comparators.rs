//! Built-in comparators.
//!
//! Comparators receive values that have already gone through the matching
//! rule's normalizer, so most of them are plain orderings over the canonical
//! form.

use super::ValueComparator;
use super::normalizers::parse_generalized_time;
use crate::entry::RawValue;
use std::cmp::Ordering;

/// Natural ordering of raw values. Text sorts before binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparableComparator;

impl ValueComparator for ComparableComparator {
    fn compare(&self, left: &RawValue, right: &RawValue) -> Ordering {
        left.cmp(right)
    }
}

/// Code point ordering of text values; binary values compare as bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringComparator;

impl ValueComparator for StringComparator {
    fn compare(&self, left: &RawValue, right: &RawValue) -> Ordering {
        match (left.as_text(), right.as_text()) {
            (Some(l), Some(r)) => l.cmp(r),
            _ => left.as_bytes().cmp(right.as_bytes()),
        }
    }
}

/// Byte-wise ordering; shorter arrays sort first on a common prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteArrayComparator;

impl ValueComparator for ByteArrayComparator {
    fn compare(&self, left: &RawValue, right: &RawValue) -> Ordering {
        left.as_bytes().cmp(right.as_bytes())
    }
}

/// Numeric ordering of INTEGER values. Values that do not parse fall back to
/// string ordering after the numeric ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerComparator;

impl ValueComparator for IntegerComparator {
    fn compare(&self, left: &RawValue, right: &RawValue) -> Ordering {
        let parse = |value: &RawValue| value.as_text().and_then(|s| s.trim().parse::<i128>().ok());
        match (parse(left), parse(right)) {
            (Some(l), Some(r)) => l.cmp(&r),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => left.cmp(right),
        }
    }
}

/// FALSE sorts before TRUE, case-insensitively.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanComparator;

impl ValueComparator for BooleanComparator {
    fn compare(&self, left: &RawValue, right: &RawValue) -> Ordering {
        let parse = |value: &RawValue| match value.as_text().map(|s| s.trim().to_ascii_uppercase()) {
            Some(s) if s == "TRUE" => Some(true),
            Some(s) if s == "FALSE" => Some(false),
            _ => None,
        };
        match (parse(left), parse(right)) {
            (Some(l), Some(r)) => l.cmp(&r),
            _ => left.cmp(right),
        }
    }
}

/// Chronological ordering of GeneralizedTime values, whatever their time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralizedTimeComparator;

impl ValueComparator for GeneralizedTimeComparator {
    fn compare(&self, left: &RawValue, right: &RawValue) -> Ordering {
        let parse = |value: &RawValue| value.as_text().and_then(parse_generalized_time);
        match (parse(left), parse(right)) {
            (Some(l), Some(r)) => l.cmp(&r),
            _ => left.cmp(right),
        }
    }
}

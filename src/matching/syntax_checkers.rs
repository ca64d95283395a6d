//! Built-in syntax checkers for the RFC 4517 syntaxes carried by the bundled
//! schemas.

use super::ValueSyntaxChecker;
use super::normalizers::{parse_generalized_time, split_unescaped};
use crate::entry::RawValue;
use crate::oid;

fn check_text(value: &RawValue, predicate: impl Fn(&str) -> bool) -> bool {
    value.as_text().is_some_and(predicate)
}

/// Accepts anything, text or binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct OctetStringSyntaxChecker;

impl ValueSyntaxChecker for OctetStringSyntaxChecker {
    fn is_valid(&self, _value: &RawValue) -> bool {
        true
    }
}

/// Accepts anything; used by the non human readable syntaxes (JPEG, Binary).
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySyntaxChecker;

impl ValueSyntaxChecker for BinarySyntaxChecker {
    fn is_valid(&self, _value: &RawValue) -> bool {
        true
    }
}

/// Non-empty UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryStringSyntaxChecker;

impl ValueSyntaxChecker for DirectoryStringSyntaxChecker {
    fn is_valid(&self, value: &RawValue) -> bool {
        check_text(value, |s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Ia5StringSyntaxChecker;

impl ValueSyntaxChecker for Ia5StringSyntaxChecker {
    fn is_valid(&self, value: &RawValue) -> bool {
        check_text(value, |s| s.is_ascii())
    }
}

/// `( HYPHEN LDIGIT *DIGIT ) / number`
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerSyntaxChecker;

impl ValueSyntaxChecker for IntegerSyntaxChecker {
    fn is_valid(&self, value: &RawValue) -> bool {
        check_text(value, |s| {
            let (negative, digits) = match s.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, s),
            };
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return false;
            }
            if digits == "0" {
                return !negative;
            }
            !digits.starts_with('0')
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanSyntaxChecker;

impl ValueSyntaxChecker for BooleanSyntaxChecker {
    fn is_valid(&self, value: &RawValue) -> bool {
        check_text(value, |s| s == "TRUE" || s == "FALSE")
    }
}

/// `oid = descr / numericoid`
#[derive(Debug, Clone, Copy, Default)]
pub struct OidSyntaxChecker;

impl ValueSyntaxChecker for OidSyntaxChecker {
    fn is_valid(&self, value: &RawValue) -> bool {
        check_text(value, |s| oid::is_valid(s) || oid::is_descr(s))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NumericStringSyntaxChecker;

impl ValueSyntaxChecker for NumericStringSyntaxChecker {
    fn is_valid(&self, value: &RawValue) -> bool {
        check_text(value, |s| {
            !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit() || b == b' ')
        })
    }
}

fn is_printable(c: char) -> bool {
    c.is_ascii_alphanumeric() || " '()+,-./:=?".contains(c)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PrintableStringSyntaxChecker;

impl ValueSyntaxChecker for PrintableStringSyntaxChecker {
    fn is_valid(&self, value: &RawValue) -> bool {
        check_text(value, |s| !s.is_empty() && s.chars().all(is_printable))
    }
}

/// E.123 style numbers: optional leading `+`, digits, and the usual
/// separators.
#[derive(Debug, Clone, Copy, Default)]
pub struct TelephoneNumberSyntaxChecker;

impl ValueSyntaxChecker for TelephoneNumberSyntaxChecker {
    fn is_valid(&self, value: &RawValue) -> bool {
        check_text(value, |s| {
            let body = s.strip_prefix('+').unwrap_or(s);
            body.chars().any(|c| c.is_ascii_digit())
                && body
                    .chars()
                    .all(|c| c.is_ascii_digit() || " -().".contains(c))
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralizedTimeSyntaxChecker;

impl ValueSyntaxChecker for GeneralizedTimeSyntaxChecker {
    fn is_valid(&self, value: &RawValue) -> bool {
        check_text(value, |s| parse_generalized_time(s).is_some())
    }
}

/// RFC 4122 string form, hyphenated.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSyntaxChecker;

impl ValueSyntaxChecker for UuidSyntaxChecker {
    fn is_valid(&self, value: &RawValue) -> bool {
        check_text(value, |s| s.len() == 36 && uuid::Uuid::parse_str(s).is_ok())
    }
}

/// Structural DN check: every RDN is a `type=value` pair whose type is a
/// descriptor or numeric OID. The empty DN is valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct DnSyntaxChecker;

impl ValueSyntaxChecker for DnSyntaxChecker {
    fn is_valid(&self, value: &RawValue) -> bool {
        check_text(value, |dn| {
            if dn.is_empty() {
                return true;
            }
            split_unescaped(dn, ',').iter().all(|rdn| {
                split_unescaped(rdn, '+').iter().all(|atav| match atav.split_once('=') {
                    Some((attr, _)) => {
                        let attr = attr.trim();
                        oid::is_descr(attr) || oid::is_valid(attr)
                    }
                    None => false,
                })
            })
        })
    }
}

/// Two printable characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountryStringSyntaxChecker;

impl ValueSyntaxChecker for CountryStringSyntaxChecker {
    fn is_valid(&self, value: &RawValue) -> bool {
        check_text(value, |s| s.chars().count() == 2 && s.chars().all(is_printable))
    }
}

//! Built-in normalizers.
//!
//! A normalizer turns a raw value into the canonical form its matching rule
//! compares on. Text normalizers reject binary input with [`InvalidValue`].

use super::ValueNormalizer;
use crate::entry::RawValue;
use crate::error::InvalidValue;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

fn text(value: &RawValue) -> Result<&str, InvalidValue> {
    value
        .as_text()
        .ok_or_else(|| InvalidValue::new("expected a text value, got binary data"))
}

/// Collapse runs of whitespace into a single space and trim both ends.
pub(crate) fn deep_trim(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the value unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpNormalizer;

impl ValueNormalizer for NoOpNormalizer {
    fn normalize(&self, value: &RawValue) -> Result<RawValue, InvalidValue> {
        Ok(value.clone())
    }
}

/// Trims and collapses inner whitespace, keeping case.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeepTrimNormalizer;

impl ValueNormalizer for DeepTrimNormalizer {
    fn normalize(&self, value: &RawValue) -> Result<RawValue, InvalidValue> {
        Ok(RawValue::Text(deep_trim(text(value)?)))
    }
}

/// Trims, collapses inner whitespace and lower-cases.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeepTrimToLowerNormalizer;

impl ValueNormalizer for DeepTrimToLowerNormalizer {
    fn normalize(&self, value: &RawValue) -> Result<RawValue, InvalidValue> {
        Ok(RawValue::Text(deep_trim(text(value)?).to_lowercase()))
    }
}

/// Removes every space from a NumericString.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericNormalizer;

impl ValueNormalizer for NumericNormalizer {
    fn normalize(&self, value: &RawValue) -> Result<RawValue, InvalidValue> {
        Ok(RawValue::Text(
            text(value)?.chars().filter(|c| *c != ' ').collect(),
        ))
    }
}

/// Canonical `TRUE` / `FALSE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanNormalizer;

impl ValueNormalizer for BooleanNormalizer {
    fn normalize(&self, value: &RawValue) -> Result<RawValue, InvalidValue> {
        let upper = text(value)?.trim().to_ascii_uppercase();
        match upper.as_str() {
            "TRUE" | "FALSE" => Ok(RawValue::Text(upper)),
            _ => Err(InvalidValue::new(format!("'{}' is not a boolean", upper))),
        }
    }
}

/// Drops spaces and hyphens, as telephoneNumberMatch ignores them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TelephoneNumberNormalizer;

impl ValueNormalizer for TelephoneNumberNormalizer {
    fn normalize(&self, value: &RawValue) -> Result<RawValue, InvalidValue> {
        Ok(RawValue::Text(
            text(value)?
                .chars()
                .filter(|c| !c.is_whitespace() && *c != '-')
                .collect(),
        ))
    }
}

/// Trims and lower-cases OIDs and descriptors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectIdentifierNormalizer;

impl ValueNormalizer for ObjectIdentifierNormalizer {
    fn normalize(&self, value: &RawValue) -> Result<RawValue, InvalidValue> {
        Ok(RawValue::Text(text(value)?.trim().to_ascii_lowercase()))
    }
}

/// Case-insensitive DN canonical form: attribute types lower-cased, values
/// deep-trimmed and lower-cased, no spaces around separators.
#[derive(Debug, Clone, Copy, Default)]
pub struct DnNormalizer;

impl ValueNormalizer for DnNormalizer {
    fn normalize(&self, value: &RawValue) -> Result<RawValue, InvalidValue> {
        let dn = text(value)?;
        if dn.trim().is_empty() {
            return Ok(RawValue::Text(String::new()));
        }

        let mut rdns = Vec::new();
        for rdn in split_unescaped(dn, ',') {
            let mut atavs = Vec::new();
            for atav in split_unescaped(&rdn, '+') {
                let (attr, val) = atav
                    .split_once('=')
                    .ok_or_else(|| InvalidValue::new(format!("'{}' is not a valid RDN", rdn)))?;
                let attr = attr.trim();
                if attr.is_empty() {
                    return Err(InvalidValue::new(format!("'{}' has an empty attribute type", rdn)));
                }
                atavs.push(format!(
                    "{}={}",
                    attr.to_ascii_lowercase(),
                    deep_trim(val).to_lowercase()
                ));
            }
            atavs.sort();
            rdns.push(atavs.join("+"));
        }
        Ok(RawValue::Text(rdns.join(",")))
    }
}

/// Split on `separator` unless it is escaped with a backslash.
pub(crate) fn split_unescaped(value: &str, separator: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut escaped = false;
    for c in value.chars() {
        if escaped {
            current.push(c);
            escaped = false;
        } else if c == '\\' {
            current.push(c);
            escaped = true;
        } else if c == separator {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);
    parts
}

/// Canonical UTC form `YYYYMMDDHHMMSS.fffZ`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralizedTimeNormalizer;

impl ValueNormalizer for GeneralizedTimeNormalizer {
    fn normalize(&self, value: &RawValue) -> Result<RawValue, InvalidValue> {
        let raw = text(value)?;
        let instant = parse_generalized_time(raw)
            .ok_or_else(|| InvalidValue::new(format!("'{}' is not a GeneralizedTime", raw)))?;
        Ok(RawValue::Text(
            instant.format("%Y%m%d%H%M%S%.3fZ").to_string(),
        ))
    }
}

/// Lower-case hyphenated UUID form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidNormalizer;

impl ValueNormalizer for UuidNormalizer {
    fn normalize(&self, value: &RawValue) -> Result<RawValue, InvalidValue> {
        let raw = text(value)?;
        let uuid = uuid::Uuid::parse_str(raw.trim())
            .map_err(|e| InvalidValue::new(format!("'{}' is not a UUID: {}", raw, e)))?;
        Ok(RawValue::Text(uuid.hyphenated().to_string()))
    }
}

/// Removes surrounding spaces, a leading `+` and leading zeros.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerNormalizer;

impl ValueNormalizer for IntegerNormalizer {
    fn normalize(&self, value: &RawValue) -> Result<RawValue, InvalidValue> {
        let raw = text(value)?.trim();
        let (negative, digits) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw.strip_prefix('+').unwrap_or(raw)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidValue::new(format!("'{}' is not an INTEGER", raw)));
        }
        let digits = digits.trim_start_matches('0');
        let normalized = match (digits.is_empty(), negative) {
            (true, _) => "0".to_string(),
            (false, true) => format!("-{}", digits),
            (false, false) => digits.to_string(),
        };
        Ok(RawValue::Text(normalized))
    }
}

/// Parse an RFC 4517 GeneralizedTime into a UTC instant.
///
/// Accepts `YYYYMMDDHH[MM[SS]][(.|,)fraction](Z|(+|-)HH[MM])`; a missing zone
/// is read as UTC.
pub(crate) fn parse_generalized_time(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    let (body, offset_seconds) = split_zone(value)?;

    let (main, fraction) = match body.find(|c: char| c == '.' || c == ',') {
        Some(index) => (&body[..index], Some(&body[index + 1..])),
        None => (body, None),
    };
    if !main.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let field = |range: std::ops::Range<usize>| main.get(range).and_then(|s| s.parse::<u32>().ok());
    let (minute, second, unit_seconds) = match main.len() {
        10 => (0, 0, 3600),
        12 => (field(10..12)?, 0, 60),
        14 => (field(10..12)?, field(12..14)?, 1),
        _ => return None,
    };
    let year = main.get(0..4)?.parse::<i32>().ok()?;
    let naive = NaiveDate::from_ymd_opt(year, field(4..6)?, field(6..8)?)?
        .and_hms_opt(field(8..10)?, minute, second)?;

    let mut instant = naive.and_utc() - TimeDelta::seconds(offset_seconds);
    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits = &fraction[..fraction.len().min(9)];
        let numerator: i64 = digits.parse().ok()?;
        let scale = 10i64.pow(digits.len() as u32);
        let nanos = numerator * unit_seconds * 1_000_000_000 / scale;
        instant += TimeDelta::nanoseconds(nanos);
    }
    Some(instant)
}

fn split_zone(value: &str) -> Option<(&str, i64)> {
    if let Some(body) = value.strip_suffix('Z') {
        return Some((body, 0));
    }

    let bytes = value.as_bytes();
    for zone_len in [5usize, 3] {
        if bytes.len() > zone_len && matches!(bytes[bytes.len() - zone_len], b'+' | b'-') {
            let (body, zone) = value.split_at(value.len() - zone_len);
            let digits = &zone[1..];
            if !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let hours: i64 = digits[..2].parse().ok()?;
            let minutes: i64 = if zone_len == 5 { digits[2..].parse().ok()? } else { 0 };
            if hours > 23 || minutes > 59 {
                return None;
            }
            let sign = if zone.starts_with('-') { -1 } else { 1 };
            return Some((body, sign * (hours * 3600 + minutes * 60)));
        }
    }

    Some((value, 0))
}

//! Object identifier helpers.
//!
//! Schema objects are keyed by dotted-numeric OIDs (`numericoid` in RFC 4512):
//! at least two arcs, the first arc is 0, 1 or 2, arcs are decimal numbers
//! without leading zeros.
//!
//! ```rust
//! use ldap_schema::oid;
//!
//! assert!(oid::is_valid("2.5.4.3"));
//! assert!(!oid::is_valid("cn"));
//! assert!(!oid::is_valid("2.05.4"));
//! ```

/// Check whether `value` is a syntactically valid numeric OID.
pub fn is_valid(value: &str) -> bool {
    let mut arcs = value.split('.');

    match arcs.next() {
        Some("0") | Some("1") | Some("2") => {}
        _ => return false,
    }

    let mut count = 1;
    for arc in arcs {
        if !is_number(arc) {
            return false;
        }
        count += 1;
    }

    count >= 2
}

/// Check whether `value` is a `descr` (keystring): a leading letter followed by
/// letters, digits or hyphens.
pub fn is_descr(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn is_number(arc: &str) -> bool {
    if arc.is_empty() || !arc.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    arc == "0" || !arc.starts_with('0')
}

//! Collection keys.

use std::fmt;

/// A key in an [`OrderedMap`](crate::OrderedMap): an integer or a string.
///
/// String keys that spell a canonical decimal integer are stored as
/// integers, so `"7"` and `7` address the same slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    /// Builds a key from a string, converting canonical integers to `Int`.
    ///
    /// Canonical means an optional `-` followed by digits with no leading
    /// zero (a bare `0` is fine, `-0` is not) that fits in an `i64`.
    pub fn normalize(s: &str) -> Key {
        match canonical_int(s) {
            Some(i) => Key::Int(i),
            None => Key::Str(s.to_string()),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(i) => Some(*i),
            Key::Str(_) => None,
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }
}

fn canonical_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    if digits == "0" && s.starts_with('-') {
        return None;
    }
    s.parse::<i64>().ok()
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::normalize(s)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match canonical_int(&s) {
            Some(i) => Key::Int(i),
            None => Key::Str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_integers_become_int_keys() {
        assert_eq!(Key::normalize("0"), Key::Int(0));
        assert_eq!(Key::normalize("42"), Key::Int(42));
        assert_eq!(Key::normalize("-3"), Key::Int(-3));
    }

    #[test]
    fn non_canonical_strings_stay_strings() {
        for s in ["", "-", "-0", "05", "1.5", " 1", "1 ", "+1", "abc", "99999999999999999999"] {
            assert_eq!(Key::normalize(s), Key::Str(s.to_string()), "input {:?}", s);
        }
    }

    #[test]
    fn display_renders_raw_form() {
        assert_eq!(Key::from(7).to_string(), "7");
        assert_eq!(Key::from("stringkey").to_string(), "stringkey");
        assert_eq!(Key::from(String::from("12")), Key::Int(12));
    }
}

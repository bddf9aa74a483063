//! Numeric prefix type.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid prefix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid prefix: {reason}")]
pub struct InvalidPrefix {
    reason: &'static str,
}

/// A numbering-block prefix: one or more ASCII digits.
///
/// Any `Prefix` value is valid by construction, so a table keyed by
/// `Prefix` can never hold an empty or non-numeric key.
///
/// # Examples
///
/// ```
/// use geophone::prefix::Prefix;
///
/// let sj = Prefix::parse("14089").unwrap();
/// assert_eq!(sj.as_str(), "14089");
///
/// // Empty is rejected
/// assert!(Prefix::parse("").is_err());
///
/// // So is anything that isn't a digit, whitespace included
/// assert!(Prefix::parse("1408 ").is_err());
/// assert!(Prefix::parse("+1408").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Prefix(String);

impl Prefix {
    /// Parse a prefix from a string.
    ///
    /// The input must be non-empty and consist only of ASCII digits.
    pub fn parse(s: &str) -> Result<Self, InvalidPrefix> {
        if s.is_empty() {
            return Err(InvalidPrefix {
                reason: "must not be empty",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidPrefix {
                reason: "must contain only digits 0-9",
            });
        }

        Ok(Prefix(s.to_string()))
    }

    /// Returns the prefix as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits in the prefix.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a parsed prefix.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// `String` and `str` hash identically, so the table can be queried by `&str`.
impl Borrow<str> for Prefix {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Prefix {
    type Error = InvalidPrefix;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Prefix::parse(&s)
    }
}

impl From<Prefix> for String {
    fn from(p: Prefix) -> Self {
        p.0
    }
}

impl fmt::Debug for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Prefix({})", self.0)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

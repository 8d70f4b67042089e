//! Candidate character sets for string molds.

use serde::{Deserialize, Serialize};

/// Lowercase letters, uppercase letters, then digits.
pub const ALPHANUMERIC: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L',
    'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4',
    '5', '6', '7', '8', '9',
];

/// Lowercase then uppercase letters.
pub const ALPHA: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L',
    'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Characters safe for URL slugs: lowercase letters, digits, and `-`.
pub const SLUG: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '-',
];

/// Decimal digits.
pub const NUMERIC: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Printable ASCII punctuation.
pub const SYMBOL: &[char] = &[
    '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', ':', ';', '<', '=',
    '>', '?', '@', '[', '\\', ']', '^', '_', '`', '{', '|', '}', '~',
];

/// Named character set, as it appears in mold configuration.
///
/// # Example
///
/// ```
/// use fixture_forge::CharacterSet;
///
/// let set: CharacterSet = serde_json::from_str("\"slug\"").expect("known set");
/// assert_eq!(set, CharacterSet::Slug);
/// assert!(set.characters().contains(&'-'));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterSet {
    /// See [`ALPHANUMERIC`].
    #[default]
    Alphanumeric,
    /// See [`ALPHA`].
    Alpha,
    /// See [`SLUG`].
    Slug,
    /// See [`NUMERIC`].
    Numeric,
    /// See [`SYMBOL`].
    Symbol,
}

impl CharacterSet {
    /// Returns the characters in this set, in selection order.
    #[must_use]
    pub const fn characters(self) -> &'static [char] {
        match self {
            Self::Alphanumeric => ALPHANUMERIC,
            Self::Alpha => ALPHA,
            Self::Slug => SLUG,
            Self::Numeric => NUMERIC,
            Self::Symbol => SYMBOL,
        }
    }
}

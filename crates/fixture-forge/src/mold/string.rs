//! Bounded-length string mold.

use serde::{Deserialize, Serialize};

use super::{Mold, Seed, seed_index};
use crate::charset::{ALPHANUMERIC, CharacterSet};
use crate::error::MoldError;
use crate::scramble::scramble;

/// Length used when the configuration omits a minimum.
const DEFAULT_MINIMUM_LENGTH: usize = 1;

/// Length used when the configuration omits a maximum.
const DEFAULT_MAXIMUM_LENGTH: usize = 255;

/// Serializable configuration for a [`StringMold`].
///
/// Omitted fields fall back to a length range of `1..=255` drawn from
/// [`CharacterSet::Alphanumeric`]. Explicit `candidates` take precedence over
/// `characterSet`.
///
/// # Example
///
/// ```
/// use fixture_forge::{StringMold, StringMoldConfig};
///
/// let config: StringMoldConfig = serde_json::from_str(
///     r#"{"minimumLength": 4, "maximumLength": 8, "characterSet": "numeric"}"#,
/// )
/// .expect("valid config");
/// let mold = StringMold::from_config(&config).expect("consistent bounds");
///
/// assert_eq!(mold.minimum_length(), 4);
/// assert_eq!(mold.candidates().len(), 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StringMoldConfig {
    /// Shortest string the mold may produce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_length: Option<usize>,
    /// Longest string the mold may produce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_length: Option<usize>,
    /// Named candidate set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_set: Option<CharacterSet>,
    /// Explicit candidate characters, in selection order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<String>,
}

/// Resolved properties of a generated string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringProperties {
    /// The string itself.
    pub value: String,
}

/// Caller overrides for a [`StringMold`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringOverrides {
    /// Replaces the generated string verbatim.
    pub value: Option<String>,
}

impl StringOverrides {
    /// Overrides the generated string with `value`.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }
}

/// Generates strings whose length and characters derive from the seed.
///
/// The length is `minimum_length + seed mod (maximum_length - minimum_length + 1)`.
/// The character at position `i` is the candidate at
/// `scramble(seed + i) mod candidates.len()`.
///
/// # Example
///
/// ```
/// use fixture_forge::{Mold, StringMold, StringOverrides};
///
/// let mold = StringMold::new(10, 10, ['x']).expect("consistent bounds");
/// let value = mold.generate(&StringOverrides::default(), 42).expect("resolves");
///
/// assert_eq!(value, "xxxxxxxxxx");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringMold {
    minimum_length: usize,
    maximum_length: usize,
    length_span: usize,
    candidates: Vec<char>,
}

impl StringMold {
    /// Builds a mold producing between `minimum_length` and `maximum_length`
    /// characters (inclusive) drawn from `candidates`.
    ///
    /// # Errors
    ///
    /// Returns [`MoldError::InvalidConfiguration`] if `maximum_length` is
    /// less than `minimum_length`, the range covers every `usize`, or
    /// `candidates` is empty.
    pub fn new(
        minimum_length: usize,
        maximum_length: usize,
        candidates: impl Into<Vec<char>>,
    ) -> Result<Self, MoldError> {
        let resolved_candidates = candidates.into();
        if resolved_candidates.is_empty() {
            return Err(MoldError::InvalidConfiguration {
                message: "candidate character set is empty".to_owned(),
            });
        }

        let difference = maximum_length.checked_sub(minimum_length).ok_or_else(|| {
            MoldError::InvalidConfiguration {
                message: format!(
                    "maximum length {maximum_length} is less than minimum length {minimum_length}"
                ),
            }
        })?;
        let length_span =
            difference
                .checked_add(1)
                .ok_or_else(|| MoldError::InvalidConfiguration {
                    message: format!(
                        "length range {minimum_length}..={maximum_length} is too wide"
                    ),
                })?;

        Ok(Self {
            minimum_length,
            maximum_length,
            length_span,
            candidates: resolved_candidates,
        })
    }

    /// Builds an alphanumeric mold with the given length bounds.
    ///
    /// # Errors
    ///
    /// Returns [`MoldError::InvalidConfiguration`] under the same conditions
    /// as [`StringMold::new`].
    pub fn with_bounds(minimum_length: usize, maximum_length: usize) -> Result<Self, MoldError> {
        Self::new(minimum_length, maximum_length, ALPHANUMERIC)
    }

    /// Builds a mold from a deserialized configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MoldError::InvalidConfiguration`] under the same conditions
    /// as [`StringMold::new`].
    pub fn from_config(config: &StringMoldConfig) -> Result<Self, MoldError> {
        let candidates: Vec<char> = config.candidates.as_ref().map_or_else(
            || config.character_set.unwrap_or_default().characters().to_vec(),
            |explicit| explicit.chars().collect(),
        );

        Self::new(
            config.minimum_length.unwrap_or(DEFAULT_MINIMUM_LENGTH),
            config.maximum_length.unwrap_or(DEFAULT_MAXIMUM_LENGTH),
            candidates,
        )
    }

    /// Returns the shortest length this mold produces.
    #[must_use]
    pub const fn minimum_length(&self) -> usize {
        self.minimum_length
    }

    /// Returns the longest length this mold produces.
    #[must_use]
    pub const fn maximum_length(&self) -> usize {
        self.maximum_length
    }

    /// Returns the candidate characters in selection order.
    #[must_use]
    pub fn candidates(&self) -> &[char] {
        &self.candidates
    }

    fn derive_value(&self, seed: Seed) -> String {
        let offset = seed_index(seed, self.length_span).unwrap_or_default();
        let length = self.minimum_length.saturating_add(offset);

        (0..length)
            .filter_map(|position| {
                let step = u64::try_from(position).ok()?;
                let scrambled = scramble(seed.wrapping_add(step));
                let index = seed_index(u64::from(scrambled), self.candidates.len())?;
                self.candidates.get(index).copied()
            })
            .collect()
    }
}

impl Default for StringMold {
    fn default() -> Self {
        Self {
            minimum_length: DEFAULT_MINIMUM_LENGTH,
            maximum_length: DEFAULT_MAXIMUM_LENGTH,
            length_span: DEFAULT_MAXIMUM_LENGTH - DEFAULT_MINIMUM_LENGTH + 1,
            candidates: ALPHANUMERIC.to_vec(),
        }
    }
}

impl Mold for StringMold {
    type Value = String;
    type Properties = StringProperties;
    type Overrides = StringOverrides;

    fn resolve(
        &self,
        overrides: &StringOverrides,
        seed: Seed,
    ) -> Result<StringProperties, MoldError> {
        let value = overrides
            .value
            .clone()
            .unwrap_or_else(|| self.derive_value(seed));
        Ok(StringProperties { value })
    }

    fn construct(&self, properties: StringProperties) -> String {
        properties.value
    }
}

#[cfg(test)]
mod tests {
    //! Covers length bounds, candidate selection, and configuration errors.

    use rstest::rstest;

    use super::*;
    use crate::charset::{ALPHA, NUMERIC};

    fn generate(mold: &StringMold, seed: Seed) -> String {
        mold.generate(&StringOverrides::default(), seed)
            .expect("string molds always resolve")
    }

    #[test]
    fn single_candidate_repeats_to_fixed_length() {
        let mold = StringMold::new(10, 10, ['x']).expect("valid mold");

        assert_eq!(generate(&mold, 42), "xxxxxxxxxx");
    }

    #[rstest]
    #[case(42, 5, 10, "f72AE")]
    #[case(7, 3, 3, "xBR")]
    fn matches_reference_strings(
        #[case] seed: Seed,
        #[case] minimum: usize,
        #[case] maximum: usize,
        #[case] expected: &str,
    ) {
        let mold = StringMold::with_bounds(minimum, maximum).expect("valid mold");

        assert_eq!(generate(&mold, seed), expected);
    }

    #[test]
    fn default_mold_length_follows_seed() {
        let mold = StringMold::default();

        assert_eq!(generate(&mold, 10).chars().count(), 11);
    }

    #[rstest]
    #[case(1, 255)]
    #[case(5, 10)]
    #[case(0, 3)]
    #[case(7, 7)]
    fn length_stays_within_bounds(#[case] minimum: usize, #[case] maximum: usize) {
        let mold = StringMold::with_bounds(minimum, maximum).expect("valid mold");

        for seed in 0..200 {
            let length = generate(&mold, seed).chars().count();
            assert!(
                (minimum..=maximum).contains(&length),
                "length {length} outside {minimum}..={maximum} for seed {seed}"
            );
        }
    }

    #[rstest]
    #[case(ALPHA)]
    #[case(NUMERIC)]
    fn characters_come_from_candidates(#[case] candidates: &[char]) {
        let mold = StringMold::new(10, 20, candidates).expect("valid mold");

        for seed in 0..50 {
            let value = generate(&mold, seed);
            assert!(
                value.chars().all(|c| candidates.contains(&c)),
                "unexpected character in {value}"
            );
        }
    }

    #[test]
    fn same_seed_yields_same_string() {
        let mold = StringMold::default();

        assert_eq!(generate(&mold, 42), generate(&mold, 42));
    }

    #[test]
    fn value_override_is_returned_verbatim() {
        let mold = StringMold::default();

        let value = mold
            .generate(&StringOverrides::with_value("custom"), 42)
            .expect("resolves");

        assert_eq!(value, "custom");
    }

    #[test]
    fn rejects_maximum_below_minimum() {
        let result = StringMold::with_bounds(5, 2);

        assert_eq!(
            result,
            Err(MoldError::InvalidConfiguration {
                message: "maximum length 2 is less than minimum length 5".to_owned(),
            })
        );
    }

    #[test]
    fn rejects_empty_candidates() {
        let result = StringMold::new(1, 3, Vec::<char>::new());

        assert!(matches!(
            result,
            Err(MoldError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn rejects_unbounded_length_range() {
        let result = StringMold::with_bounds(0, usize::MAX);

        assert!(matches!(
            result,
            Err(MoldError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn empty_config_matches_default_mold() {
        let mold = StringMold::from_config(&StringMoldConfig::default()).expect("valid mold");

        assert_eq!(mold, StringMold::default());
    }

    #[test]
    fn explicit_candidates_win_over_character_set() {
        let config: StringMoldConfig = serde_json::from_str(
            r#"{"minimumLength": 3, "maximumLength": 3, "characterSet": "numeric", "candidates": "ab"}"#,
        )
        .expect("valid config");

        let mold = StringMold::from_config(&config).expect("valid mold");

        assert_eq!(mold.candidates(), &['a', 'b']);
    }

    #[test]
    fn config_rejects_unknown_fields() {
        let result = serde_json::from_str::<StringMoldConfig>(r#"{"length": 3}"#);

        assert!(result.is_err());
    }

    #[test]
    fn inconsistent_config_fails_fast() {
        let config = StringMoldConfig {
            minimum_length: Some(10),
            maximum_length: Some(1),
            ..StringMoldConfig::default()
        };

        assert!(StringMold::from_config(&config).is_err());
    }
}

//! Exclusion-aware choice from a fixed candidate list.

use super::{Mold, Seed, seed_index};
use crate::error::MoldError;

/// Candidates removed from selection for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exclusion<T> {
    /// Exclude one candidate.
    Single(T),
    /// Exclude every listed candidate.
    Set(Vec<T>),
}

impl<T: PartialEq> Exclusion<T> {
    /// Excludes a single candidate.
    #[must_use]
    pub const fn single(value: T) -> Self {
        Self::Single(value)
    }

    /// Excludes every candidate in `values`.
    #[must_use]
    pub fn set(values: impl IntoIterator<Item = T>) -> Self {
        Self::Set(values.into_iter().collect())
    }

    /// Returns `true` if `candidate` is excluded.
    #[must_use]
    pub fn excludes(&self, candidate: &T) -> bool {
        match self {
            Self::Single(value) => value == candidate,
            Self::Set(values) => values.contains(candidate),
        }
    }
}

/// Resolved properties of an enum choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumProperties<T> {
    /// The chosen candidate.
    pub value: T,
    /// The exclusion that applied to the choice, if any.
    pub exclusion: Option<Exclusion<T>>,
}

/// Caller overrides for an [`EnumMold`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumOverrides<T> {
    /// Replaces the selected candidate verbatim.
    ///
    /// Exclusions are still checked first, so excluding every candidate
    /// fails even when a value is supplied.
    pub value: Option<T>,
    /// Candidates to skip when selecting.
    pub exclusion: Option<Exclusion<T>>,
}

impl<T> Default for EnumOverrides<T> {
    fn default() -> Self {
        Self {
            value: None,
            exclusion: None,
        }
    }
}

impl<T: PartialEq> EnumOverrides<T> {
    /// Forces the chosen value.
    #[must_use]
    pub const fn with_value(value: T) -> Self {
        Self {
            value: Some(value),
            exclusion: None,
        }
    }

    /// Skips `value` during selection.
    #[must_use]
    pub const fn excluding(value: T) -> Self {
        Self {
            value: None,
            exclusion: Some(Exclusion::Single(value)),
        }
    }

    /// Skips every value in `values` during selection.
    #[must_use]
    pub fn excluding_all(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            value: None,
            exclusion: Some(Exclusion::set(values)),
        }
    }
}

/// Chooses one of a fixed, ordered candidate list.
///
/// Selection takes the candidates that survive the exclusion override, in
/// configured order, and picks index `seed mod available`. A `value`
/// override replaces the selection only once it has succeeded.
///
/// # Example
///
/// ```
/// use fixture_forge::{EnumMold, EnumOverrides, Mold};
///
/// let mold = EnumMold::new(["active", "inactive", "pending"]).expect("non-empty");
/// let overrides = EnumOverrides::excluding_all(["active", "inactive"]);
///
/// for seed in 0..10 {
///     assert_eq!(mold.generate(&overrides, seed), Ok("pending"));
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMold<T> {
    candidates: Vec<T>,
}

impl<T: Clone + PartialEq> EnumMold<T> {
    /// Builds a mold choosing among `candidates`, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`MoldError::InvalidConfiguration`] if `candidates` is empty.
    pub fn new(candidates: impl IntoIterator<Item = T>) -> Result<Self, MoldError> {
        let collected: Vec<T> = candidates.into_iter().collect();
        if collected.is_empty() {
            return Err(MoldError::InvalidConfiguration {
                message: "enum mold requires at least one candidate".to_owned(),
            });
        }
        Ok(Self {
            candidates: collected,
        })
    }

    /// Returns the configured candidates in selection order.
    #[must_use]
    pub fn candidates(&self) -> &[T] {
        &self.candidates
    }

    fn select(&self, exclusion: Option<&Exclusion<T>>, seed: Seed) -> Result<T, MoldError> {
        let available: Vec<&T> = self
            .candidates
            .iter()
            .filter(|candidate| exclusion.is_none_or(|excluded| !excluded.excludes(candidate)))
            .collect();

        seed_index(seed, available.len())
            .and_then(|index| available.get(index))
            .map(|candidate| (*candidate).clone())
            .ok_or_else(|| MoldError::DomainExhausted {
                candidates: self.candidates.len(),
                excluded: self.candidates.len().saturating_sub(available.len()),
            })
    }
}

impl<T: Clone + PartialEq> Mold for EnumMold<T> {
    type Value = T;
    type Properties = EnumProperties<T>;
    type Overrides = EnumOverrides<T>;

    fn resolve(
        &self,
        overrides: &EnumOverrides<T>,
        seed: Seed,
    ) -> Result<EnumProperties<T>, MoldError> {
        let exclusion = overrides.exclusion.clone();
        let selected = self.select(exclusion.as_ref(), seed)?;
        let value = overrides.value.clone().unwrap_or(selected);

        Ok(EnumProperties { value, exclusion })
    }

    fn construct(&self, properties: EnumProperties<T>) -> T {
        properties.value
    }
}

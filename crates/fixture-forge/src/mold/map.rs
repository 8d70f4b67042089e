//! Key/value mapping mold composed from two inner molds.

use std::collections::BTreeMap;

use super::{Mold, Seed};
use crate::error::MoldError;

/// Number of distinct entry counts a map mold produces (`1..=10`).
const ENTRY_COUNT_SPAN: u64 = 10;

/// Resolved entries of a generated map, in generation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapProperties<K, V> {
    /// Key/value pairs; later duplicates of a key win on construction.
    pub entries: Vec<(K, V)>,
}

/// Caller overrides for a [`MapMold`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapOverrides<K, V> {
    /// Replaces the generated entries wholesale.
    pub entries: Option<Vec<(K, V)>>,
}

impl<K, V> Default for MapOverrides<K, V> {
    fn default() -> Self {
        Self { entries: None }
    }
}

impl<K, V> MapOverrides<K, V> {
    /// Replaces the generated entries with `entries`.
    #[must_use]
    pub fn with_entries(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            entries: Some(entries.into_iter().collect()),
        }
    }
}

/// Generates maps whose keys and values come from two inner molds.
///
/// A seed resolves to `(seed mod 10) + 1` entries. Entry `i` runs both inner
/// molds with seed `seed + i` and no overrides, so the key and value of a
/// slot are derived from the same seed.
///
/// # Example
///
/// ```
/// use fixture_forge::{MapMold, MapOverrides, Mold, StringMold};
///
/// let keys = StringMold::with_bounds(5, 5).expect("valid bounds");
/// let values = StringMold::with_bounds(10, 10).expect("valid bounds");
/// let mold = MapMold::new(keys, values);
///
/// let map = mold.generate(&MapOverrides::default(), 42).expect("resolves");
/// assert!((1..=10).contains(&map.len()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapMold<K, V> {
    key_mold: K,
    value_mold: V,
}

impl<K, V> MapMold<K, V> {
    /// Composes a map mold from a key mold and a value mold.
    #[must_use]
    pub const fn new(key_mold: K, value_mold: V) -> Self {
        Self {
            key_mold,
            value_mold,
        }
    }

    /// Returns the inner key mold.
    #[must_use]
    pub const fn key_mold(&self) -> &K {
        &self.key_mold
    }

    /// Returns the inner value mold.
    #[must_use]
    pub const fn value_mold(&self) -> &V {
        &self.value_mold
    }
}

impl<K, V> Mold for MapMold<K, V>
where
    K: Mold,
    V: Mold,
    K::Value: Clone + Ord,
    V::Value: Clone,
{
    type Value = BTreeMap<K::Value, V::Value>;
    type Properties = MapProperties<K::Value, V::Value>;
    type Overrides = MapOverrides<K::Value, V::Value>;

    fn resolve(
        &self,
        overrides: &Self::Overrides,
        seed: Seed,
    ) -> Result<Self::Properties, MoldError> {
        if let Some(entries) = &overrides.entries {
            return Ok(MapProperties {
                entries: entries.clone(),
            });
        }

        let count = seed.rem_euclid(ENTRY_COUNT_SPAN) + 1;
        let key_overrides = K::Overrides::default();
        let value_overrides = V::Overrides::default();
        let entries = (0..count)
            .map(|offset| {
                let slot_seed = seed.wrapping_add(offset);
                let key = self.key_mold.generate(&key_overrides, slot_seed)?;
                let value = self.value_mold.generate(&value_overrides, slot_seed)?;
                Ok((key, value))
            })
            .collect::<Result<Vec<_>, MoldError>>()?;

        Ok(MapProperties { entries })
    }

    fn construct(&self, properties: Self::Properties) -> Self::Value {
        properties.entries.into_iter().collect()
    }
}

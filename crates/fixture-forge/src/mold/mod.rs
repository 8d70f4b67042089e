//! The two-phase generator protocol and its built-in molds.
//!
//! A mold turns `(overrides, seed)` into a value in two pure steps:
//! [`Mold::resolve`] derives every property from the seed and overlays the
//! caller's overrides, then [`Mold::construct`] shapes those properties into
//! the final value. Keeping the steps separate lets composite molds feed
//! externally supplied properties straight into `construct`.

mod enum_choice;
mod map;
mod string;

use std::fmt;
use std::marker::PhantomData;

pub use enum_choice::{EnumMold, EnumOverrides, EnumProperties, Exclusion};
pub use map::{MapMold, MapOverrides, MapProperties};
pub use string::{StringMold, StringMoldConfig, StringOverrides, StringProperties};

use crate::error::MoldError;

/// Integer driving one deterministic generation.
pub type Seed = u64;

/// A stateless, reusable generator of `Value`s.
///
/// Implementations must be pure: identical `(overrides, seed)` pairs always
/// resolve to identical properties, and `construct` never looks at anything
/// besides its argument.
pub trait Mold {
    /// The generated value.
    type Value;

    /// Fully resolved intermediate record consumed by [`Mold::construct`].
    type Properties;

    /// Partial properties; every field present wins over the seed-derived
    /// default.
    type Overrides: Default;

    /// Derives properties from `seed`, then overlays `overrides`.
    ///
    /// # Errors
    ///
    /// Returns [`MoldError`] when no value can be resolved, for example when
    /// every enum candidate is excluded.
    fn resolve(
        &self,
        overrides: &Self::Overrides,
        seed: Seed,
    ) -> Result<Self::Properties, MoldError>;

    /// Builds the value from resolved properties.
    fn construct(&self, properties: Self::Properties) -> Self::Value;

    /// Runs the full pipeline: resolve, then construct.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Mold::resolve`].
    fn generate(&self, overrides: &Self::Overrides, seed: Seed) -> Result<Self::Value, MoldError> {
        let properties = self.resolve(overrides, seed)?;
        Ok(self.construct(properties))
    }
}

/// A mold assembled from a `resolve` closure and a `construct` closure.
///
/// This is the extension point for user-defined record types.
///
/// # Example
///
/// ```
/// use fixture_forge::{FnMold, Mold, MoldError, Seed};
///
/// #[derive(Debug, PartialEq)]
/// struct Person {
///     name: String,
///     age: u64,
/// }
///
/// #[derive(Default)]
/// struct PersonOverrides {
///     name: Option<String>,
///     age: Option<u64>,
/// }
///
/// let mold = FnMold::new(
///     |overrides: &PersonOverrides, seed: Seed| {
///         Ok::<_, MoldError>(Person {
///             name: overrides.name.clone().unwrap_or_else(|| format!("Person{seed}")),
///             age: overrides.age.unwrap_or(seed.rem_euclid(100)),
///         })
///     },
///     |person: Person| person,
/// );
///
/// let person = mold.generate(&PersonOverrides::default(), 42).expect("resolves");
/// assert_eq!(person, Person { name: "Person42".to_owned(), age: 42 });
/// ```
pub struct FnMold<O, P, V, R, C> {
    resolve: R,
    construct: C,
    shape: PhantomData<fn(&O) -> (P, V)>,
}

impl<O, P, V, R, C> FnMold<O, P, V, R, C>
where
    O: Default,
    R: Fn(&O, Seed) -> Result<P, MoldError>,
    C: Fn(P) -> V,
{
    /// Pairs a `resolve` closure with a `construct` closure.
    #[must_use]
    pub const fn new(resolve: R, construct: C) -> Self {
        Self {
            resolve,
            construct,
            shape: PhantomData,
        }
    }
}

impl<O, P, V, R, C> Mold for FnMold<O, P, V, R, C>
where
    O: Default,
    R: Fn(&O, Seed) -> Result<P, MoldError>,
    C: Fn(P) -> V,
{
    type Value = V;
    type Properties = P;
    type Overrides = O;

    fn resolve(&self, overrides: &O, seed: Seed) -> Result<P, MoldError> {
        (self.resolve)(overrides, seed)
    }

    fn construct(&self, properties: P) -> V {
        (self.construct)(properties)
    }
}

impl<O, P, V, R, C> fmt::Debug for FnMold<O, P, V, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMold").finish_non_exhaustive()
    }
}

impl<M: Mold + ?Sized> Mold for &M {
    type Value = M::Value;
    type Properties = M::Properties;
    type Overrides = M::Overrides;

    fn resolve(
        &self,
        overrides: &Self::Overrides,
        seed: Seed,
    ) -> Result<Self::Properties, MoldError> {
        (**self).resolve(overrides, seed)
    }

    fn construct(&self, properties: Self::Properties) -> Self::Value {
        (**self).construct(properties)
    }
}

/// Reduces `seed` to an index into a collection of `len` elements.
///
/// Returns `None` only for an empty collection.
pub(crate) fn seed_index(seed: Seed, len: usize) -> Option<usize> {
    let modulus = u64::try_from(len).ok()?;
    let index = seed.checked_rem(modulus)?;
    usize::try_from(index).ok()
}

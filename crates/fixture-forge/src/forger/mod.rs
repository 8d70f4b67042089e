//! Stateful front-end over a mold.
//!
//! A [`Forger`] pairs a mold with a seed allocator. Unseeded calls draw
//! fresh seeds that never repeat for the forger's lifetime; seeded calls are
//! pure and leave the allocator untouched.

mod allocator;
mod shared;

use rand::RngCore;
use rand::rngs::ThreadRng;
use tracing::debug;

pub use allocator::{DEFAULT_RETRY_LIMIT, MAX_SAFE_SEED};
pub use shared::SharedForger;

use allocator::SeedAllocator;

use crate::error::{ForgeError, MoldError};
use crate::mold::{Mold, Seed};
use crate::registry::SeedDefinition;

/// Generates values from a mold, tracking every seed it has issued.
///
/// # Example
///
/// ```
/// use fixture_forge::{Forger, StringMold, StringOverrides};
///
/// let mold = StringMold::with_bounds(8, 8).expect("valid bounds");
/// let mut forger = Forger::new(mold);
///
/// let batch = forger.forge_multi(3, None).expect("seeds available");
/// assert_eq!(batch.len(), 3);
///
/// let pinned = forger
///     .forge_with_seed(42, Some(&StringOverrides::with_value("fixed")))
///     .expect("resolves");
/// assert_eq!(pinned, "fixed");
/// ```
#[derive(Debug)]
pub struct Forger<M, R = ThreadRng> {
    mold: M,
    allocator: SeedAllocator<R>,
}

impl<M: Mold> Forger<M> {
    /// Wraps `mold`, drawing fresh seeds from the thread-local generator.
    #[must_use]
    pub fn new(mold: M) -> Self {
        Self::with_rng(mold, rand::rng())
    }
}

impl<M: Mold, R: RngCore> Forger<M, R> {
    /// Wraps `mold`, drawing fresh seeds from `rng`.
    ///
    /// Passing a seeded generator such as `ChaCha8Rng::seed_from_u64` makes
    /// the sequence of unseeded results reproducible.
    #[must_use]
    pub fn with_rng(mold: M, rng: R) -> Self {
        Self {
            mold,
            allocator: SeedAllocator::new(rng),
        }
    }

    /// Sets how many draws a single seed allocation may take before failing.
    ///
    /// Values below one are raised to one.
    #[must_use]
    pub fn with_retry_limit(mut self, limit: usize) -> Self {
        self.allocator.set_retry_limit(limit);
        self
    }

    /// Returns the wrapped mold.
    #[must_use]
    pub const fn mold(&self) -> &M {
        &self.mold
    }

    /// Returns how many seeds this forger has issued.
    #[must_use]
    pub fn issued_count(&self) -> usize {
        self.allocator.issued_count()
    }

    /// Generates one value from a freshly allocated seed.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::SeedAllocationExhausted`] if no fresh seed turns
    /// up, or [`ForgeError::Mold`] if resolution fails.
    pub fn forge(&mut self, overrides: Option<&M::Overrides>) -> Result<M::Value, ForgeError> {
        let seed = self.allocator.allocate()?;
        Ok(self.forge_with_seed(seed, overrides)?)
    }

    /// Generates `size` values, each from its own fresh seed.
    ///
    /// All seeds are allocated before any value is generated, so an
    /// allocation failure produces no values at all.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError`] under the same conditions as
    /// [`Forger::forge`].
    pub fn forge_multi(
        &mut self,
        size: usize,
        overrides: Option<&M::Overrides>,
    ) -> Result<Vec<M::Value>, ForgeError> {
        let seeds = self.allocator.allocate_many(size)?;
        debug!(size, issued = self.issued_count(), "allocated seed batch");

        let fallback = M::Overrides::default();
        let resolved = overrides.unwrap_or(&fallback);
        seeds
            .into_iter()
            .map(|seed| Ok(self.mold.generate(resolved, seed)?))
            .collect()
    }

    /// Generates the value for an explicit seed.
    ///
    /// Pure: the result depends only on the mold, `seed` and `overrides`,
    /// and the seed is not recorded as issued.
    ///
    /// # Errors
    ///
    /// Returns [`MoldError`] if resolution fails.
    pub fn forge_with_seed(
        &self,
        seed: Seed,
        overrides: Option<&M::Overrides>,
    ) -> Result<M::Value, MoldError> {
        let fallback = M::Overrides::default();
        self.mold.generate(overrides.unwrap_or(&fallback), seed)
    }

    /// Generates `size` values from seeds `seed, seed + 1, ...`.
    ///
    /// Seeds past `u64::MAX` wrap to zero.
    ///
    /// # Errors
    ///
    /// Returns [`MoldError`] if any resolution fails.
    pub fn forge_multi_with_seed(
        &self,
        size: usize,
        seed: Seed,
        overrides: Option<&M::Overrides>,
    ) -> Result<Vec<M::Value>, MoldError> {
        let fallback = M::Overrides::default();
        let resolved = overrides.unwrap_or(&fallback);
        (0_u64..)
            .take(size)
            .map(|offset| self.mold.generate(resolved, seed.wrapping_add(offset)))
            .collect()
    }

    /// Generates the batch described by a golden-seed definition.
    ///
    /// # Errors
    ///
    /// Returns [`MoldError`] if any resolution fails.
    pub fn forge_golden(
        &self,
        definition: &SeedDefinition,
        overrides: Option<&M::Overrides>,
    ) -> Result<Vec<M::Value>, MoldError> {
        debug!(
            name = definition.name(),
            seed = definition.seed(),
            count = definition.count(),
            "forging golden seed batch"
        );
        self.forge_multi_with_seed(definition.count(), definition.seed(), overrides)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::mold::{EnumMold, EnumOverrides, FnMold};

    type EchoResolve = fn(&(), Seed) -> Result<Seed, MoldError>;
    type EchoMold = FnMold<(), Seed, Seed, EchoResolve, fn(Seed) -> Seed>;

    const fn echo_resolve(_: &(), seed: Seed) -> Result<Seed, MoldError> {
        Ok(seed)
    }

    const fn echo_construct(seed: Seed) -> Seed {
        seed
    }

    /// A mold whose value is the seed it was given.
    #[fixture]
    fn echo_forger() -> Forger<EchoMold, ChaCha8Rng> {
        let mold: EchoMold = FnMold::new(
            echo_resolve as EchoResolve,
            echo_construct as fn(Seed) -> Seed,
        );
        Forger::with_rng(mold, ChaCha8Rng::seed_from_u64(11))
    }

    #[rstest]
    fn forge_multi_uses_distinct_seeds(mut echo_forger: Forger<EchoMold, ChaCha8Rng>) {
        let seeds = echo_forger.forge_multi(500, None).expect("forges");
        let unique: HashSet<Seed> = seeds.iter().copied().collect();

        assert_eq!(unique.len(), 500);
        assert_eq!(echo_forger.issued_count(), 500);
    }

    #[rstest]
    fn forge_and_forge_multi_never_repeat(mut echo_forger: Forger<EchoMold, ChaCha8Rng>) {
        let single = echo_forger.forge(None).expect("forges");
        let batch = echo_forger.forge_multi(50, None).expect("forges");

        assert!(!batch.contains(&single));
        assert_eq!(echo_forger.issued_count(), 51);
    }

    #[rstest]
    fn forge_multi_of_zero_is_empty(mut echo_forger: Forger<EchoMold, ChaCha8Rng>) {
        let batch = echo_forger.forge_multi(0, None).expect("forges");

        assert!(batch.is_empty());
        assert_eq!(echo_forger.issued_count(), 0);
    }

    #[rstest]
    fn seeded_calls_do_not_issue_seeds(echo_forger: Forger<EchoMold, ChaCha8Rng>) {
        assert_eq!(echo_forger.forge_with_seed(9, None), Ok(9));
        assert_eq!(
            echo_forger.forge_multi_with_seed(3, 9, None),
            Ok(vec![9, 10, 11])
        );
        assert_eq!(echo_forger.issued_count(), 0);
    }

    #[rstest]
    fn sequential_seeds_wrap_at_maximum(echo_forger: Forger<EchoMold, ChaCha8Rng>) {
        let seeds = echo_forger
            .forge_multi_with_seed(3, u64::MAX - 1, None)
            .expect("forges");

        assert_eq!(seeds, vec![u64::MAX - 1, u64::MAX, 0]);
    }

    #[rstest]
    fn forge_golden_follows_definition(echo_forger: Forger<EchoMold, ChaCha8Rng>) {
        let definition = SeedDefinition::new("mossy-owl", 2026, 4);

        let seeds = echo_forger.forge_golden(&definition, None).expect("forges");

        assert_eq!(seeds, vec![2026, 2027, 2028, 2029]);
    }

    #[test]
    fn same_rng_seed_forges_same_batch() {
        let mold = EnumMold::new(1_u16..=500).expect("valid mold");
        let mut first = Forger::with_rng(&mold, ChaCha8Rng::seed_from_u64(3));
        let mut second = Forger::with_rng(&mold, ChaCha8Rng::seed_from_u64(3));

        assert_eq!(first.forge_multi(20, None), second.forge_multi(20, None));
    }

    #[test]
    fn mold_errors_propagate_through_forge() {
        let mold = EnumMold::new(["only"]).expect("valid mold");
        let mut forger = Forger::with_rng(mold, ChaCha8Rng::seed_from_u64(1));
        let overrides = EnumOverrides::excluding("only");

        let result = forger.forge(Some(&overrides));

        assert_eq!(
            result,
            Err(ForgeError::Mold {
                source: MoldError::DomainExhausted {
                    candidates: 1,
                    excluded: 1,
                },
            })
        );
    }

    #[test]
    fn thread_rng_forger_allocates() {
        let mold = EnumMold::new(["a", "b"]).expect("valid mold");
        let mut forger = Forger::new(mold).with_retry_limit(8);

        let values = forger.forge_multi(4, None).expect("forges");

        assert_eq!(values.len(), 4);
        assert_eq!(forger.issued_count(), 4);
    }
}

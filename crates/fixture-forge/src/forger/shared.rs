//! Thread-safe forger variant.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::allocator::SeedAllocator;
use crate::error::{ForgeError, MoldError};
use crate::mold::{Mold, Seed};
use crate::registry::SeedDefinition;

/// A forger that can be shared across threads by reference.
///
/// Seed allocation is serialized behind a mutex; generation runs outside the
/// lock. Seeds stay unique across every thread using the same instance.
///
/// # Example
///
/// ```
/// use std::thread;
///
/// use fixture_forge::{SharedForger, StringMold};
///
/// let forger = SharedForger::new(StringMold::with_bounds(6, 6).expect("valid bounds"));
///
/// thread::scope(|scope| {
///     for _ in 0..4 {
///         scope.spawn(|| forger.forge_multi(10, None).expect("seeds available"));
///     }
/// });
///
/// assert_eq!(forger.issued_count(), 40);
/// ```
#[derive(Debug)]
pub struct SharedForger<M, R = ChaCha8Rng> {
    mold: M,
    allocator: Mutex<SeedAllocator<R>>,
}

impl<M: Mold> SharedForger<M> {
    /// Wraps `mold` with a `ChaCha8Rng` seeded from the thread-local
    /// generator.
    #[must_use]
    pub fn new(mold: M) -> Self {
        Self::with_rng(mold, ChaCha8Rng::from_rng(&mut rand::rng()))
    }
}

impl<M: Mold, R: RngCore> SharedForger<M, R> {
    /// Wraps `mold`, drawing fresh seeds from `rng`.
    #[must_use]
    pub fn with_rng(mold: M, rng: R) -> Self {
        Self {
            mold,
            allocator: Mutex::new(SeedAllocator::new(rng)),
        }
    }

    /// Sets how many draws a single seed allocation may take before failing.
    ///
    /// Values below one are raised to one.
    #[must_use]
    pub fn with_retry_limit(self, limit: usize) -> Self {
        let mut allocator = self
            .allocator
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        allocator.set_retry_limit(limit);
        Self {
            mold: self.mold,
            allocator: Mutex::new(allocator),
        }
    }

    /// Returns the wrapped mold.
    #[must_use]
    pub const fn mold(&self) -> &M {
        &self.mold
    }

    /// Returns how many seeds this forger has issued across all threads.
    #[must_use]
    pub fn issued_count(&self) -> usize {
        self.lock().issued_count()
    }

    /// Generates one value from a freshly allocated seed.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError`] if allocation or resolution fails.
    pub fn forge(&self, overrides: Option<&M::Overrides>) -> Result<M::Value, ForgeError> {
        let seed = self.lock().allocate()?;
        Ok(self.forge_with_seed(seed, overrides)?)
    }

    /// Generates `size` values, each from its own fresh seed.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError`] if allocation or resolution fails.
    pub fn forge_multi(
        &self,
        size: usize,
        overrides: Option<&M::Overrides>,
    ) -> Result<Vec<M::Value>, ForgeError> {
        let seeds = self.lock().allocate_many(size)?;
        debug!(size, "allocated shared seed batch");

        let fallback = M::Overrides::default();
        let resolved = overrides.unwrap_or(&fallback);
        seeds
            .into_iter()
            .map(|seed| Ok(self.mold.generate(resolved, seed)?))
            .collect()
    }

    /// Generates the value for an explicit seed without recording it.
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

    // A panic while holding the lock cannot leave the issued set
    // inconsistent: insertion is the last step of allocation.
    fn lock(&self) -> MutexGuard<'_, SeedAllocator<R>> {
        self.allocator.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

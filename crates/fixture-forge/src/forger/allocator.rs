//! Collision-free seed allocation.

use std::collections::HashSet;

use rand::RngCore;
use tracing::{trace, warn};

use crate::error::ForgeError;
use crate::mold::Seed;

/// Largest seed the allocator hands out (`2^53 - 1`).
///
/// Keeping allocated seeds within 53 bits means they survive a round trip
/// through an IEEE-754 double unchanged, which matters when seeds are logged
/// or stored as JSON numbers.
pub const MAX_SAFE_SEED: Seed = (1 << 53) - 1;

/// Draws allowed per seed before allocation gives up.
pub const DEFAULT_RETRY_LIMIT: usize = 64;

/// Issues seeds that never repeat for the allocator's lifetime.
#[derive(Debug, Clone)]
pub(crate) struct SeedAllocator<R> {
    rng: R,
    issued: HashSet<Seed>,
    retry_limit: usize,
}

impl<R: RngCore> SeedAllocator<R> {
    pub(crate) fn new(rng: R) -> Self {
        Self {
            rng,
            issued: HashSet::new(),
            retry_limit: DEFAULT_RETRY_LIMIT,
        }
    }

    pub(crate) fn set_retry_limit(&mut self, limit: usize) {
        self.retry_limit = limit.max(1);
    }

    pub(crate) fn issued_count(&self) -> usize {
        self.issued.len()
    }

    /// Draws uniformly from `0..=MAX_SAFE_SEED` until an unissued seed turns
    /// up, recording it before returning.
    pub(crate) fn allocate(&mut self) -> Result<Seed, ForgeError> {
        for attempt in 1..=self.retry_limit {
            let candidate = self.rng.next_u64() & MAX_SAFE_SEED;
            if self.issued.insert(candidate) {
                return Ok(candidate);
            }
            trace!(candidate, attempt, "seed already issued; redrawing");
        }

        warn!(
            attempts = self.retry_limit,
            issued = self.issued.len(),
            "seed allocation exhausted its retry limit"
        );
        Err(ForgeError::SeedAllocationExhausted {
            attempts: self.retry_limit,
        })
    }

    /// Allocates `size` pairwise-distinct seeds in draw order.
    pub(crate) fn allocate_many(&mut self, size: usize) -> Result<Vec<Seed>, ForgeError> {
        (0..size).map(|_| self.allocate()).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Covers uniqueness, range, and the retry ceiling.

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::{fixture, rstest};

    use super::*;

    /// Random source that yields the same word forever.
    struct StuckRng(u64);

    impl RngCore for StuckRng {
        fn next_u32(&mut self) -> u32 {
            u32::try_from(self.0 & u64::from(u32::MAX)).unwrap_or_default()
        }

        fn next_u64(&mut self) -> u64 {
            self.0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    #[fixture]
    fn allocator() -> SeedAllocator<ChaCha8Rng> {
        SeedAllocator::new(ChaCha8Rng::seed_from_u64(2026))
    }

    #[rstest]
    fn allocated_seeds_are_distinct(mut allocator: SeedAllocator<ChaCha8Rng>) {
        let seeds = allocator.allocate_many(1_000).expect("allocates");
        let unique: HashSet<Seed> = seeds.iter().copied().collect();

        assert_eq!(seeds.len(), 1_000);
        assert_eq!(unique.len(), 1_000);
        assert_eq!(allocator.issued_count(), 1_000);
    }

    #[rstest]
    fn allocated_seeds_stay_within_safe_range(mut allocator: SeedAllocator<ChaCha8Rng>) {
        let seeds = allocator.allocate_many(100).expect("allocates");

        assert!(seeds.iter().all(|seed| *seed <= MAX_SAFE_SEED));
    }

    #[test]
    fn masks_draws_into_safe_range() {
        let mut stuck = SeedAllocator::new(StuckRng(u64::MAX));

        assert_eq!(stuck.allocate(), Ok(MAX_SAFE_SEED));
    }

    #[test]
    fn repeated_draws_hit_retry_ceiling() {
        let mut stuck = SeedAllocator::new(StuckRng(7));

        assert_eq!(stuck.allocate(), Ok(7));
        assert_eq!(
            stuck.allocate(),
            Err(ForgeError::SeedAllocationExhausted {
                attempts: DEFAULT_RETRY_LIMIT,
            })
        );
        assert_eq!(stuck.issued_count(), 1);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(5, 5)]
    fn retry_limit_is_at_least_one(#[case] requested: usize, #[case] effective: usize) {
        let mut stuck = SeedAllocator::new(StuckRng(3));
        stuck.set_retry_limit(requested);

        assert_eq!(stuck.allocate(), Ok(3));
        assert_eq!(
            stuck.allocate(),
            Err(ForgeError::SeedAllocationExhausted {
                attempts: effective,
            })
        );
    }

    #[test]
    fn same_rng_seed_allocates_same_sequence() {
        let mut first = SeedAllocator::new(ChaCha8Rng::seed_from_u64(9));
        let mut second = SeedAllocator::new(ChaCha8Rng::seed_from_u64(9));

        assert_eq!(first.allocate_many(10), second.allocate_many(10));
    }
}

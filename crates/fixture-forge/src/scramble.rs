//! Deterministic 32-bit seed dispersal.
//!
//! Molds derive related values from one seed by adding small offsets
//! (`seed`, `seed + 1`, ...). Reducing those directly modulo a small range
//! yields visibly periodic output, so they are passed through [`scramble`]
//! first: multiply by an odd constant, reverse the bit order with a fixed
//! interleave permutation, then multiply by the constant's inverse. Each
//! step is a bijection on `u32`, and so is the composition.

/// Odd multiplier applied before the bit permutation.
const MULTIPLIER: u32 = 0x1765_4321;

/// Multiplicative inverse of [`MULTIPLIER`] modulo 2^32.
const INVERSE_MULTIPLIER: u32 = modular_inverse(MULTIPLIER);

/// Shift widths paired with the masks selecting the low half of each group.
const INTERLEAVE_STEPS: [(u32, u32); 5] = [
    (1, 0x5555_5555),
    (2, 0x3333_3333),
    (4, 0x0F0F_0F0F),
    (8, 0x00FF_00FF),
    (16, 0xFFFF_FFFF),
];

/// Maps a seed to a well-dispersed 32-bit value.
///
/// Only the low 32 bits of `seed` participate, so seeds congruent modulo
/// 2^32 scramble to the same value. The mapping is a bijection over `u32`.
///
/// # Examples
///
/// ```
/// use fixture_forge::scramble;
///
/// assert_eq!(scramble(0), 0);
/// assert_eq!(scramble(42), scramble(42));
/// assert_ne!(scramble(1), scramble(2));
/// ```
#[must_use]
pub fn scramble(seed: u64) -> u32 {
    let base = low_word(seed).wrapping_mul(MULTIPLIER);
    interleave(base).wrapping_mul(INVERSE_MULTIPLIER)
}

/// Swaps the halves of every 1, 2, 4, 8, and 16 bit group in turn.
fn interleave(value: u32) -> u32 {
    INTERLEAVE_STEPS
        .iter()
        .fold(value, |carry, &(shift, mask)| {
            ((carry >> shift) & mask) | ((carry & mask) << shift)
        })
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "keeping the low 32 bits is the normalisation scramble documents"
)]
const fn low_word(seed: u64) -> u32 {
    seed as u32
}

/// Computes the inverse of `value` modulo 2^32 using the extended Euclidean
/// algorithm.
///
/// Only ever evaluated in a `const` item, so an even multiplier fails the
/// build instead of reaching a caller.
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "exact integer Euclid over i64; the result is reduced into u32 range first"
)]
const fn modular_inverse(value: u32) -> u32 {
    const MODULUS: i64 = 1 << 32;

    let mut previous_remainder = MODULUS;
    let mut remainder = value as i64;
    let mut previous_coefficient: i64 = 0;
    let mut coefficient: i64 = 1;

    while remainder != 0 {
        let quotient = previous_remainder / remainder;

        let next_remainder = previous_remainder - quotient * remainder;
        previous_remainder = remainder;
        remainder = next_remainder;

        let next_coefficient = previous_coefficient - quotient * coefficient;
        previous_coefficient = coefficient;
        coefficient = next_coefficient;
    }

    assert!(
        previous_remainder == 1,
        "scramble multiplier has no inverse modulo 2^32"
    );

    previous_coefficient.rem_euclid(MODULUS) as u32
}

// [libs/core/bigint/src/lib.rs]
#![deny(missing_docs)]
//! # APARATO: BIG-INTEGER PRIMITIVES (ESTRATO L1)
//!
//! Thin, documented seam around an arbitrary-precision unsigned integer
//! library. The audit never needs signed integers, modular inverses, or
//! primality testing — only multiplication, modular reduction, squaring
//! and Euclidean gcd over moduli up to a few thousand bits and products
//! of up to millions of them.
//!
//! Constant-time behavior is explicitly not a goal here: this is an
//! offline forensic audit over already-public keys, not a cryptographic
//! operation performed against a live adversary.

pub mod canonical;

pub use num_bigint::BigUint;

use num_integer::Integer;
use num_traits::{One, Zero};

/// The multiplicative identity, used to right-pad the modulus table to
/// the next power of two before building the product tree. Padding
/// with `1` means a pad leaf never contributes a prime factor and
/// never matches.
#[must_use]
pub fn one() -> BigUint {
    BigUint::one()
}

/// Euclidean greatest common divisor of two arbitrary-precision unsigned
/// integers. `gcd(0, b) == b` and `gcd(a, 0) == a`, matching the
/// mathematical convention used throughout the batch-GCD driver.
#[must_use]
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

/// Squares a value. Exposed as a named operation (rather than `x * x`
/// at call sites) because the remainder-tree recurrence is defined in
/// terms of "the node's product, squared" — naming the step keeps that
/// correspondence visible in the batch-GCD crate.
#[must_use]
pub fn square(value: &BigUint) -> BigUint {
    value * value
}

/// Returns `true` for the Bernstein padding sentinel (`1`), so callers
/// can suppress pad entries from batch-GCD output without re-deriving
/// the modulus table's original length.
#[must_use]
pub fn is_padding_identity(value: &BigUint) -> bool {
    value.is_one()
}

/// Returns `true` for the zero value. Only used defensively: a zero
/// modulus can never appear in a well-formed modulus table, but a
/// corrupt modulus list should not silently divide-by-zero downstream.
#[must_use]
pub fn is_zero(value: &BigUint) -> bool {
    value.is_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_of_coprime_values_is_one() {
        let a = BigUint::from(15u32);
        let b = BigUint::from(77u32);
        assert_eq!(gcd(&a, &b), BigUint::one());
    }

    #[test]
    fn gcd_recovers_shared_prime_factor() {
        let a = BigUint::from(15u32); // 3 * 5
        let b = BigUint::from(21u32); // 3 * 7
        assert_eq!(gcd(&a, &b), BigUint::from(3u32));
    }

    #[test]
    fn gcd_with_zero_is_identity() {
        let a = BigUint::from(42u32);
        assert_eq!(gcd(&a, &BigUint::zero()), a);
        assert_eq!(gcd(&BigUint::zero(), &a), a);
    }

    #[test]
    fn square_matches_manual_multiplication() {
        let value = BigUint::from(123456789u64);
        assert_eq!(square(&value), &value * &value);
    }

    #[test]
    fn padding_identity_is_recognized() {
        assert!(is_padding_identity(&one()));
        assert!(!is_padding_identity(&BigUint::from(2u32)));
    }
}

// [libs/core/probabilistic/src/bloom_set.rs]
/*!
 * APARATO: BLOOM MODULUS SET (ESTRATO L1)
 * RESPONSABILIDAD: DEDUPLICACIÓN PROBABILÍSTICA DE MÓDULOS RSA
 *
 * Wraps a single `bloomfilter::Bloom` sized for the expected modulus
 * volume and target false-positive rate. Membership queries are
 * false-positive only: a "seen" answer may incorrectly mask a
 * genuinely new modulus with probability bounded by the configured
 * rate, never the reverse. That is the accepted sampling property
 * this structure exists to provide.
 */

use bloomfilter::Bloom;
use tracing::debug;

use crate::ModulusDeduplicator;

/// Default sizing target from the reference configuration: n≈10⁷
/// moduli at a false-positive rate of 1×10⁻⁹ (≈431 327 627 bits, 30
/// hash functions, computed internally by `bloomfilter`).
pub const DEFAULT_EXPECTED_MODULI: usize = 10_000_000;

/// Default target false-positive rate.
pub const DEFAULT_FALSE_POSITIVE_RATE: f64 = 1e-9;

/// A Bloom-filter-backed [`ModulusDeduplicator`]. Never produces a
/// false negative (a genuinely seen modulus is always reported seen);
/// may rarely produce a false positive, silently dropping a new
/// modulus.
pub struct BloomModulusSet {
    bloom: Bloom<Vec<u8>>,
    distinct_count: usize,
}

impl BloomModulusSet {
    /// Builds a filter sized for `expected_items` moduli at
    /// `false_positive_rate`.
    #[must_use]
    pub fn new(expected_items: usize, false_positive_rate: f64) -> Self {
        let capacity = expected_items.max(1);
        let rate = if false_positive_rate > 0.0 {
            false_positive_rate
        } else {
            DEFAULT_FALSE_POSITIVE_RATE
        };
        debug!(capacity, rate, "inicializando filtro de Bloom para deduplicación de módulos");
        Self {
            bloom: Bloom::new_for_fp_rate(capacity, rate),
            distinct_count: 0,
        }
    }

    /// Builds a filter using the reference defaults: n≈10⁷ moduli at
    /// FP=1×10⁻⁹.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_EXPECTED_MODULI, DEFAULT_FALSE_POSITIVE_RATE)
    }
}

impl ModulusDeduplicator for BloomModulusSet {
    fn observe(&mut self, canonical_modulus: &[u8]) -> bool {
        let key = canonical_modulus.to_vec();
        if self.bloom.check(&key) {
            return false;
        }
        self.bloom.set(&key);
        self.distinct_count += 1;
        true
    }

    fn distinct_count(&self) -> usize {
        self.distinct_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_of_a_modulus_is_reported_distinct() {
        let mut set = BloomModulusSet::new(1_000, 1e-6);
        assert!(set.observe(&[1, 2, 3]));
        assert_eq!(set.distinct_count(), 1);
    }

    #[test]
    fn repeated_observation_is_reported_as_seen() {
        let mut set = BloomModulusSet::new(1_000, 1e-6);
        assert!(set.observe(&[1, 2, 3]));
        assert!(!set.observe(&[1, 2, 3]));
        assert_eq!(set.distinct_count(), 1);
    }

    #[test]
    fn distinct_moduli_are_each_reported_once() {
        let mut set = BloomModulusSet::new(1_000, 1e-6);
        assert!(set.observe(&[1]));
        assert!(set.observe(&[2]));
        assert!(set.observe(&[3]));
        assert_eq!(set.distinct_count(), 3);
    }
}

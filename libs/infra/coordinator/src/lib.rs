// [libs/infra/coordinator/src/lib.rs]
#![deny(missing_docs)]
/*!
 * APARATO: WORKER/SHARD COORDINATOR (ESTRATO L3)
 * RESPONSABILIDAD: PARTICIONADO Y EMPALME DEL ÁRBOL DE RESIDUOS
 *
 * Shards the global modulus table across `k` worker threads (k = CPU
 * count, a power of two dividing n), runs each worker's local
 * product/remainder tree via the two-phase message protocol, and
 * splices their roots into a head tree so the result is bit-for-bit
 * identical to a monolithic single-worker run.
 */

mod driver;
mod protocol;
mod worker;

pub use driver::{run_audit, CoordinatorError};
pub use protocol::{CoordinatorMessage, WorkerMessage};
pub use worker::WorkerError;

/// Picks a worker count suitable for `modulus_count`: the largest
/// power of two that is at most the logical CPU count and divides
/// `modulus_count` evenly. Falls back to `1` if no such power of two
/// above `1` exists (e.g. an odd modulus count, or a single-core
/// host).
#[must_use]
pub fn default_worker_count(modulus_count: usize) -> usize {
    let cpu_budget = num_cpus::get().max(1);
    let mut candidate = cpu_budget.next_power_of_two();
    if candidate > cpu_budget {
        candidate >>= 1;
    }
    while candidate > 1 && (modulus_count % candidate != 0 || candidate > modulus_count) {
        candidate >>= 1;
    }
    candidate.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_worker_count_never_exceeds_modulus_count() {
        assert!(default_worker_count(4) <= 4);
        assert!(default_worker_count(1) == 1);
    }

    #[test]
    fn default_worker_count_is_always_a_power_of_two() {
        for modulus_count in [1, 2, 4, 8, 16, 1024] {
            assert!(default_worker_count(modulus_count).is_power_of_two());
        }
    }
}

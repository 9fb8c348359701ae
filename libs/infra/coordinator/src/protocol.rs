// [libs/infra/coordinator/src/protocol.rs]
//! Two-phase worker protocol. Messages flow driver → worker and
//! worker → driver over a pair of `std::sync::mpsc` channels, one
//! message at a time in each direction; workers share no memory with
//! each other or with the driver.

use keyaudit_core_bigint::BigUint;

/// A message sent from the coordinator to a worker.
pub enum CoordinatorMessage {
    /// Phase 1: assigns the worker its contiguous partition of the
    /// global modulus table.
    ProductTree {
        /// `M[i·s .. (i+1)·s]`, this worker's share of the moduli.
        moduli: Vec<BigUint>,
    },
    /// Phase 2: supplies the head remainder computed by the
    /// coordinator from the head tree over all workers' roots.
    RemainderTree {
        /// `Hᵢ = P mod rootᵢ²`.
        head: BigUint,
    },
}

/// A message sent from a worker back to the coordinator.
pub enum WorkerMessage {
    /// Reply to `ProductTree`: the root of this worker's local
    /// product tree.
    ProductTreeDone {
        /// The product of this partition's moduli.
        top: BigUint,
    },
    /// Reply to `RemainderTree`: the per-leaf gcds for this partition,
    /// in local partition order, unfiltered.
    RemainderTreeDone {
        /// One `gᵢ = gcd(qᵢ, Mᵢ)` per leaf in this partition.
        gcds: Vec<BigUint>,
    },
}

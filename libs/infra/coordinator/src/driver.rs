// [libs/infra/coordinator/src/driver.rs]
//! Coordinator driver: shards the global modulus table across `k`
//! worker threads, runs the two-phase protocol, splices the head tree,
//! and assembles global-index matches.

use std::sync::mpsc;

use keyaudit_core_bigint::BigUint;
use keyaudit_domain_batchgcd::{self as batchgcd, GcdMatch, ProductTree};

use crate::protocol::{CoordinatorMessage, WorkerMessage};
use crate::worker;

/// A fatal coordinator failure. Any of these aborts the whole audit;
/// there is no retry.
#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    /// `worker_count` was not a power of two no greater than `n`, or
    /// did not evenly divide it.
    #[error("worker count {worker_count} must be a power of two, at most, and evenly dividing the modulus count {modulus_count}")]
    InvalidSharding {
        /// The modulus table length.
        modulus_count: usize,
        /// The rejected worker count.
        worker_count: usize,
    },
    /// A worker failed, or its thread panicked before completing the
    /// protocol.
    #[error("worker {worker_index} failed: {source}")]
    WorkerFailed {
        /// Index of the failing worker.
        worker_index: usize,
        /// The underlying failure.
        #[source]
        source: worker::WorkerError,
    },
    /// A worker's reply arrived out of the expected phase order, or
    /// its thread disconnected without replying.
    #[error("worker {worker_index} disconnected before completing the protocol")]
    WorkerDisconnected {
        /// Index of the disconnected worker.
        worker_index: usize,
    },
}

/// Runs the full sharded batch-GCD audit over `moduli` using
/// `worker_count` worker threads, returning matches in ascending
/// global index order.
///
/// # Errors
/// See [`CoordinatorError`]. Any failure aborts the whole audit;
/// partial results are never returned.
pub fn run_audit(moduli: Vec<BigUint>, worker_count: usize) -> Result<Vec<GcdMatch>, CoordinatorError> {
    let modulus_count = moduli.len();
    if worker_count == 0
        || !worker_count.is_power_of_two()
        || worker_count > modulus_count
        || !modulus_count.is_power_of_two()
    {
        return Err(CoordinatorError::InvalidSharding {
            modulus_count,
            worker_count,
        });
    }

    let partition_size = modulus_count / worker_count;
    tracing::info!(modulus_count, worker_count, partition_size, "iniciando auditoría particionada");

    let mut channels = Vec::with_capacity(worker_count);
    let mut handles = Vec::with_capacity(worker_count);

    for partition in moduli.chunks(partition_size) {
        let (command_tx, command_rx) = mpsc::channel::<CoordinatorMessage>();
        let (reply_tx, reply_rx) = mpsc::channel::<WorkerMessage>();

        let handle = std::thread::spawn(move || worker::run(&command_rx, &reply_tx));

        command_tx
            .send(CoordinatorMessage::ProductTree {
                moduli: partition.to_vec(),
            })
            .expect("worker command channel just created");

        channels.push((command_tx, reply_rx));
        handles.push(handle);
    }

    let mut roots = Vec::with_capacity(worker_count);
    for (worker_index, (_, reply_rx)) in channels.iter().enumerate() {
        match reply_rx.recv() {
            Ok(WorkerMessage::ProductTreeDone { top }) => roots.push(top),
            Ok(WorkerMessage::RemainderTreeDone { .. }) => {
                return Err(join_failure(handles, worker_index));
            }
            Err(_) => return Err(join_failure(handles, worker_index)),
        }
    }

    // Head splice: treat the k roots as leaves of an upper tree, and
    // derive each worker's head remainder Hᵢ = P mod rootᵢ² — equivalent
    // to performing the upper log₂(k) levels of the overall remainder
    // tree here on the driver rather than on any one worker.
    let head_tree = ProductTree::build(roots).expect("worker_count validated as power of two");
    let head_remainders = batchgcd::evaluate(&head_tree);

    for (worker_index, ((command_tx, _), head)) in channels.iter().zip(head_remainders.values()).enumerate() {
        command_tx
            .send(CoordinatorMessage::RemainderTree { head: head.clone() })
            .map_err(|_| CoordinatorError::WorkerDisconnected { worker_index })?;
    }

    let mut matches = Vec::new();
    for (worker_index, (partition, (_, reply_rx))) in moduli.chunks(partition_size).zip(channels.iter()).enumerate() {
        match reply_rx.recv() {
            Ok(WorkerMessage::RemainderTreeDone { gcds }) => {
                let global_offset = worker_index * partition_size;
                for local_match in batchgcd::filter_matches(partition, &gcds) {
                    matches.push(GcdMatch {
                        index: local_match.index + global_offset,
                        divisor: local_match.divisor,
                    });
                }
            }
            Ok(WorkerMessage::ProductTreeDone { .. }) => {
                return Err(join_failure(handles, worker_index));
            }
            Err(_) => return Err(join_failure(handles, worker_index)),
        }
    }

    for (worker_index, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(Ok(())) => {}
            Ok(Err(source)) => return Err(CoordinatorError::WorkerFailed { worker_index, source }),
            Err(panic_payload) => {
                return Err(CoordinatorError::WorkerFailed {
                    worker_index,
                    source: worker::WorkerError::Panicked(panic_message(&panic_payload)),
                });
            }
        }
    }

    matches.sort_by_key(|m| m.index);
    Ok(matches)
}

fn join_failure(
    handles: Vec<std::thread::JoinHandle<Result<(), worker::WorkerError>>>,
    worker_index: usize,
) -> CoordinatorError {
    for handle in handles {
        let _ = handle.join();
    }
    CoordinatorError::WorkerDisconnected { worker_index }
}

fn panic_message(payload: &(dyn std::any::Any + Send + 'static)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "worker thread panicked with a non-string payload".to_string())
}

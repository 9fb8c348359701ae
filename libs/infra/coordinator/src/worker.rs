// [libs/infra/coordinator/src/worker.rs]
//! Worker-side half of the two-phase protocol. Runs in its own
//! `std::thread`, owning its partition's moduli and product-tree
//! levels exclusively — no locks, no shared memory, isolated from
//! every other worker.
//!
//! Threads, not OS processes, are used here because `BigUint` is
//! `Send + Sync` and the protocol is simple request/reply rather than
//! work-stealing; processes would only add IPC overhead with no
//! isolation benefit at this scale.

use std::sync::mpsc::{Receiver, Sender};

use keyaudit_domain_batchgcd::{self as batchgcd, ProductTree, TreeError};

use crate::protocol::{CoordinatorMessage, WorkerMessage};

/// A worker-thread failure. Any of these aborts the whole audit —
/// partial results are not meaningful, and there is no retry.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    /// The driver sent a message out of protocol sequence.
    #[error("protocol violation: {0}")]
    ProtocolViolation(&'static str),
    /// The driver's half of the channel was dropped before the
    /// expected message arrived.
    #[error("coordinator channel closed unexpectedly")]
    ChannelClosed,
    /// The assigned partition could not form a product tree (shape
    /// error — the coordinator should have guaranteed a power-of-two
    /// partition size).
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// The worker thread panicked before completing the protocol.
    #[error("worker thread panicked: {0}")]
    Panicked(String),
}

/// Runs one worker's full lifecycle against `commands`/`replies`.
/// Blocks until both phases complete or a protocol/channel failure
/// occurs.
pub fn run(commands: &Receiver<CoordinatorMessage>, replies: &Sender<WorkerMessage>) -> Result<(), WorkerError> {
    let moduli = match commands.recv().map_err(|_| WorkerError::ChannelClosed)? {
        CoordinatorMessage::ProductTree { moduli } => moduli,
        CoordinatorMessage::RemainderTree { .. } => {
            return Err(WorkerError::ProtocolViolation("expected ProductTree first"));
        }
    };

    let tree = ProductTree::build(moduli)?;
    tracing::debug!(leaf_count = tree.leaf_count(), "worker: árbol de productos local listo");

    replies
        .send(WorkerMessage::ProductTreeDone { top: tree.root().clone() })
        .map_err(|_| WorkerError::ChannelClosed)?;

    let head = match commands.recv().map_err(|_| WorkerError::ChannelClosed)? {
        CoordinatorMessage::RemainderTree { head } => head,
        CoordinatorMessage::ProductTree { .. } => {
            return Err(WorkerError::ProtocolViolation("expected RemainderTree second"));
        }
    };

    let gcds = batchgcd::per_leaf_gcds(&tree, head);
    replies
        .send(WorkerMessage::RemainderTreeDone { gcds })
        .map_err(|_| WorkerError::ChannelClosed)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyaudit_core_bigint::BigUint;
    use std::sync::mpsc;

    #[test]
    fn completes_both_phases_for_a_well_formed_partition() {
        let (command_tx, command_rx) = mpsc::channel();
        let (reply_tx, reply_rx) = mpsc::channel();

        let handle = std::thread::spawn(move || run(&command_rx, &reply_tx));

        command_tx
            .send(CoordinatorMessage::ProductTree {
                moduli: vec![BigUint::from(15u32), BigUint::from(21u32)],
            })
            .unwrap();

        let top = match reply_rx.recv().unwrap() {
            WorkerMessage::ProductTreeDone { top } => top,
            other => panic!("expected ProductTreeDone, got a different message"),
        };
        assert_eq!(top, BigUint::from(15u32 * 21));

        command_tx
            .send(CoordinatorMessage::RemainderTree { head: top })
            .unwrap();

        match reply_rx.recv().unwrap() {
            WorkerMessage::RemainderTreeDone { gcds } => assert_eq!(gcds.len(), 2),
            _ => panic!("expected RemainderTreeDone"),
        }

        handle.join().unwrap().unwrap();
    }

    #[test]
    fn out_of_order_message_is_a_protocol_violation() {
        let (command_tx, command_rx) = mpsc::channel();
        let (reply_tx, reply_rx) = mpsc::channel();
        drop(reply_rx);

        let handle = std::thread::spawn(move || run(&command_rx, &reply_tx));
        command_tx
            .send(CoordinatorMessage::RemainderTree { head: BigUint::from(1u32) })
            .unwrap();

        assert!(matches!(
            handle.join().unwrap(),
            Err(WorkerError::ProtocolViolation(_))
        ));
    }
}

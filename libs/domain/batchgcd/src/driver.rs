// [libs/domain/batchgcd/src/driver.rs]
//! Batch-GCD driver: turns a partition's remainder-tree leaves
//! into the set of indices whose modulus shares a prime factor with
//! some other modulus in the global set.

use keyaudit_core_bigint::{self as bigint, BigUint};

use crate::product_tree::ProductTree;
use crate::remainder_tree::{self, RemainderLeaves};

/// One confirmed shared-factor match: the index into the partition's
/// modulus list, and the non-trivial divisor recovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcdMatch {
    /// Index within the partition's modulus list.
    pub index: usize,
    /// The non-trivial `gcd(qᵢ, Mᵢ)` divisor.
    pub divisor: BigUint,
}

/// Runs the full batch-GCD pass over one partition: evaluates the
/// remainder tree using `head` as the externally supplied top-level
/// product, then computes `qᵢ = Rᵢ / Mᵢ` and `gᵢ = gcd(qᵢ, Mᵢ)` for
/// every leaf, returning only the indices where `gᵢ ≠ 1`.
///
/// Padding leaves (`Mᵢ = 1`) always yield `gᵢ = 1` by construction and
/// are suppressed.
#[must_use]
pub fn run(tree: &ProductTree, head: BigUint) -> Vec<GcdMatch> {
    let gcds = per_leaf_gcds(tree, head);
    filter_matches(tree.level(tree.level_count() - 1), &gcds)
}

/// Runs the batch-GCD pass over the whole, unpartitioned modulus
/// table (the monolithic k=1 case: the tree's own root is the head).
#[must_use]
pub fn run_monolithic(tree: &ProductTree) -> Vec<GcdMatch> {
    let remainders = remainder_tree::evaluate(tree);
    let gcds = per_leaf_gcds_from_remainders(tree.level(tree.level_count() - 1), &remainders);
    filter_matches(tree.level(tree.level_count() - 1), &gcds)
}

/// Computes `gᵢ = gcd(qᵢ, Mᵢ)` for every leaf, **without** suppressing
/// trivial (`1`) results or padding entries. This is the literal wire
/// shape the worker protocol replies with — the coordinator, not the
/// worker, decides which entries are interesting.
#[must_use]
pub fn per_leaf_gcds(tree: &ProductTree, head: BigUint) -> Vec<BigUint> {
    let remainders = remainder_tree::evaluate_with_head(tree, head);
    per_leaf_gcds_from_remainders(tree.level(tree.level_count() - 1), &remainders)
}

fn per_leaf_gcds_from_remainders(moduli: &[BigUint], remainders: &RemainderLeaves) -> Vec<BigUint> {
    moduli
        .iter()
        .zip(remainders.values())
        .map(|(modulus, remainder)| {
            // Quotient form, not textbook mod form: qᵢ = Rᵢ / Mᵢ
            // exactly, retained for bit-exact compatibility.
            let quotient = remainder / modulus;
            bigint::gcd(&quotient, modulus)
        })
        .collect()
}

/// Filters a full per-leaf gcd vector down to the non-trivial
/// matches, suppressing padding entries (`Mᵢ = 1`) regardless of
/// their reported gcd.
#[must_use]
pub fn filter_matches(moduli: &[BigUint], gcds: &[BigUint]) -> Vec<GcdMatch> {
    moduli
        .iter()
        .zip(gcds)
        .enumerate()
        .filter_map(|(index, (modulus, divisor))| {
            if bigint::is_padding_identity(modulus) || bigint::is_padding_identity(divisor) {
                None
            } else {
                Some(GcdMatch {
                    index,
                    divisor: divisor.clone(),
                })
            }
        })
        .collect()
}

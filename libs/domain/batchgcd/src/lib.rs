// [libs/domain/batchgcd/src/lib.rs]
#![deny(missing_docs)]
/*!
 * APARATO: BATCH-GCD ENGINE (ESTRATO L2)
 * RESPONSABILIDAD: DETECCIÓN DE FACTORES PRIMOS COMPARTIDOS
 *
 * Bernstein's product/remainder-tree batch-GCD: given n RSA moduli,
 * finds every index whose modulus shares a non-trivial factor with
 * the product of the others, in time near-linear in n rather than
 * the O(n²) of pairwise GCD.
 *
 * This crate implements the per-partition algorithm only (tree
 * construction, remainder evaluation, quotient/GCD extraction). The
 * across-worker head splice lives in the coordinator crate, which
 * reuses [`ProductTree`] and [`remainder_tree::evaluate`] directly to
 * build and evaluate the head tree over partition roots.
 */

pub mod driver;
pub mod product_tree;
pub mod remainder_tree;

pub use driver::{filter_matches, per_leaf_gcds, run, run_monolithic, GcdMatch};
pub use product_tree::{ProductTree, TreeError};
pub use remainder_tree::{evaluate, evaluate_with_head, RemainderLeaves};

// [libs/domain/batchgcd/src/remainder_tree.rs]
//! Top-down remainder tree evaluator.
//!
//! Walks a [`ProductTree`] from the root downward. Each node holds the
//! overall product reduced modulo the square of that node's own
//! product; at the leaves this yields `P mod N_i²`, the quantity the
//! batch-GCD driver needs to recover shared factors.

use keyaudit_core_bigint::{self as bigint, BigUint};

use crate::product_tree::ProductTree;

/// The leaf-level result of a remainder-tree pass: one `P mod N_i²`
/// value per modulus, in the same order as the product tree's leaves.
#[derive(Debug, Clone)]
pub struct RemainderLeaves {
    values: Vec<BigUint>,
}

impl RemainderLeaves {
    /// Borrows the per-leaf remainders.
    #[must_use]
    pub fn values(&self) -> &[BigUint] {
        &self.values
    }
}

/// Evaluates the remainder tree over `tree`, using `tree.root()` as
/// the top-level product (the "P" the recurrence reduces downward).
///
/// Equivalent to [`evaluate_with_head`] called with `tree.root()`
/// itself as the head — the ordinary, non-spliced case.
#[must_use]
pub fn evaluate(tree: &ProductTree) -> RemainderLeaves {
    evaluate_with_head(tree, tree.root().clone())
}

/// Evaluates the remainder tree over `tree`, substituting `head` for
/// the tree's own root as the top-level product — the coordinator
/// uses this to splice partial trees together by supplying an
/// externally computed head value in place of a partition's own root.
///
/// Recurrence: `R[0] = head`; `R[i][j] = R[i-1][j / 2] mod L[i][j]²`.
#[must_use]
pub fn evaluate_with_head(tree: &ProductTree, head: BigUint) -> RemainderLeaves {
    let mut current_level: Vec<BigUint> = vec![head];

    for depth in 1..tree.level_count() {
        let products = tree.level(depth);
        let mut next_level = Vec::with_capacity(products.len());
        for (index, node_product) in products.iter().enumerate() {
            let parent_remainder = &current_level[index / 2];
            let modulus_squared = bigint::square(node_product);
            next_level.push(parent_remainder % &modulus_squared);
        }
        current_level = next_level;
    }

    tracing::debug!(leaf_count = current_level.len(), "árbol de residuos evaluado");
    RemainderLeaves {
        values: current_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn biguint(value: u64) -> BigUint {
        BigUint::from(value)
    }

    #[test]
    fn leaf_remainder_equals_product_mod_leaf_squared() {
        let leaves = vec![biguint(15), biguint(21), biguint(77), biguint(1)];
        let tree = ProductTree::build(leaves.clone()).unwrap();
        let remainders = evaluate(&tree);

        for (leaf, remainder) in leaves.iter().zip(remainders.values()) {
            let expected = tree.root() % bigint::square(leaf);
            assert_eq!(*remainder, expected);
        }
    }

    #[test]
    fn singleton_tree_remainder_is_the_head_itself_reduced_mod_square() {
        let tree = ProductTree::build(vec![biguint(15)]).unwrap();
        let remainders = evaluate(&tree);
        assert_eq!(remainders.values(), [biguint(15) % biguint(15 * 15)]);
    }

    #[test]
    fn splicing_with_an_external_head_matches_a_monolithic_run() {
        // Two-partition split: [15,21] and [77,143].
        let left = ProductTree::build(vec![biguint(15), biguint(21)]).unwrap();
        let right = ProductTree::build(vec![biguint(77), biguint(143)]).unwrap();

        let head_tree = ProductTree::build(vec![left.root().clone(), right.root().clone()]).unwrap();
        let head_remainders = evaluate(&head_tree);

        let monolithic = ProductTree::build(vec![biguint(15), biguint(21), biguint(77), biguint(143)]).unwrap();
        let monolithic_remainders = evaluate(&monolithic);

        let left_result = evaluate_with_head(&left, head_remainders.values()[0].clone());
        let right_result = evaluate_with_head(&right, head_remainders.values()[1].clone());

        let mut spliced: Vec<BigUint> = left_result.values().to_vec();
        spliced.extend(right_result.values().iter().cloned());

        assert_eq!(spliced, monolithic_remainders.values());
    }

    proptest::proptest! {
        // Splicing two partition trees through an externally supplied
        // head must always reproduce the monolithic remainder tree, for
        // arbitrary (not just hand-picked) leaves.
        #[test]
        fn splicing_is_equivalent_to_a_monolithic_run_for_arbitrary_leaves(
            left_leaves in proptest::collection::vec(1u64..10_000, 2..=2)
                .prop_map(|v| v.into_iter().map(biguint).collect::<Vec<_>>()),
            right_leaves in proptest::collection::vec(1u64..10_000, 2..=2)
                .prop_map(|v| v.into_iter().map(biguint).collect::<Vec<_>>()),
        ) {
            let left = ProductTree::build(left_leaves.clone()).unwrap();
            let right = ProductTree::build(right_leaves.clone()).unwrap();

            let head_tree = ProductTree::build(vec![left.root().clone(), right.root().clone()]).unwrap();
            let head_remainders = evaluate(&head_tree);

            let mut all_leaves = left_leaves;
            all_leaves.extend(right_leaves);
            let monolithic = ProductTree::build(all_leaves).unwrap();
            let monolithic_remainders = evaluate(&monolithic);

            let left_result = evaluate_with_head(&left, head_remainders.values()[0].clone());
            let right_result = evaluate_with_head(&right, head_remainders.values()[1].clone());

            let mut spliced: Vec<BigUint> = left_result.values().to_vec();
            spliced.extend(right_result.values().iter().cloned());

            proptest::prop_assert_eq!(spliced, monolithic_remainders.values().to_vec());
        }
    }
}

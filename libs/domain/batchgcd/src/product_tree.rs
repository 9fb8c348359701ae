// [libs/domain/batchgcd/src/product_tree.rs]
//! Bottom-up product tree builder.
//!
//! A complete binary tree over a power-of-two-length leaf sequence,
//! built level by level rather than by recursion: `levels[0]` is the
//! root (a single value, the product of everything), and
//! `levels[levels.len() - 1]` is the original leaf sequence.

use keyaudit_core_bigint::BigUint;

/// A product tree, stored as explicit levels rather than linked nodes
/// so the remainder-tree pass can walk it top-down without recursion.
///
/// `levels[0]` has length 1 (the root); `levels[i]` has length
/// `2^(levels.len() - 1 - i)`; the last level is the leaves.
#[derive(Debug, Clone)]
pub struct ProductTree {
    levels: Vec<Vec<BigUint>>,
}

impl ProductTree {
    /// Builds a product tree over `leaves`. A singleton input (one
    /// leaf) yields a one-level tree whose root is that leaf.
    ///
    /// # Errors
    /// Fatal if `leaves` is empty or its length is not a power of two —
    /// a non-power-of-two input length is a programmer error, not a
    /// transient condition.
    pub fn build(leaves: Vec<BigUint>) -> Result<Self, TreeError> {
        let leaf_count = leaves.len();
        if leaf_count == 0 || !leaf_count.is_power_of_two() {
            return Err(TreeError::NotPowerOfTwo { leaf_count });
        }

        let depth = leaf_count.trailing_zeros() as usize;
        let mut levels = Vec::with_capacity(depth + 1);
        levels.push(leaves);

        // levels[0] currently holds the leaves; build upward, then reverse.
        let mut current = &levels[0];
        let mut upward = Vec::with_capacity(depth);
        for _ in 0..depth {
            let parent: Vec<BigUint> = current
                .chunks_exact(2)
                .map(|pair| &pair[0] * &pair[1])
                .collect();
            upward.push(parent);
            current = upward.last().unwrap();
        }

        let mut ordered: Vec<Vec<BigUint>> = upward.into_iter().rev().collect();
        ordered.push(levels.pop().unwrap());

        tracing::debug!(leaf_count, depth, "árbol de productos construido");
        Ok(Self { levels: ordered })
    }

    /// The root value: the product of every leaf.
    #[must_use]
    pub fn root(&self) -> &BigUint {
        &self.levels[0][0]
    }

    /// Number of leaves (`2^depth`).
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.levels.last().map_or(0, Vec::len)
    }

    /// Number of levels, including both the root and leaf levels.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Borrows one level, `0` being the root level and
    /// `level_count() - 1` the leaves.
    #[must_use]
    pub fn level(&self, depth: usize) -> &[BigUint] {
        &self.levels[depth]
    }

    /// Borrows every level, root first.
    #[must_use]
    pub fn levels(&self) -> &[Vec<BigUint>] {
        &self.levels
    }
}

/// A product-tree construction failure. Always a programmer/input
/// shape error, never a transient condition.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    /// The leaf count was zero or not a power of two.
    #[error("product tree requires a non-zero power-of-two leaf count, got {leaf_count}")]
    NotPowerOfTwo {
        /// The leaf count that was rejected.
        leaf_count: usize,
    },
}

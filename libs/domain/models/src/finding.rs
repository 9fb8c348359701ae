// [libs/domain/models/src/finding.rs]
//! A single batch-GCD match: a modulus-table index that shares a
//! non-trivial factor with the product of every other modulus, plus
//! the recovered divisor.

use serde::{Deserialize, Serialize};

/// One non-trivial GCD match, as emitted by the batch-GCD driver and
/// printed by the `audit` CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SharedFactorMatch {
    /// Index into the global modulus table (stable across the audit).
    pub index: usize,
    /// The recovered non-trivial divisor, as canonical big-endian bytes.
    pub divisor: Vec<u8>,
}

impl SharedFactorMatch {
    /// Builds a match from an index and divisor.
    #[must_use]
    pub fn new(index: usize, divisor: Vec<u8>) -> Self {
        Self { index, divisor }
    }

    /// Renders the CLI output line for this match: `<index>,<hex-divisor>`.
    #[must_use]
    pub fn to_output_line(&self) -> String {
        format!("{},{}", self.index, hex::encode(&self.divisor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_output_line_as_index_comma_hex() {
        let found = SharedFactorMatch::new(3, vec![0x15]);
        assert_eq!(found.to_output_line(), "3,15");
    }
}

// [apps/audit/src/lib.rs]
#![deny(missing_docs)]
//! Library half of the `audit` binary: the modulus-list codec and the
//! padding step that prepares a modulus list for the batch-GCD tree.

pub mod modulus_list;

pub use modulus_list::{read_modulus_list, ModulusListError};

use keyaudit_core_bigint::{one, BigUint};

/// Right-pads `moduli` with the multiplicative identity (`1`) up to
/// the next power of two. Pad entries are never reported as matches.
/// A modulus list already a power of two in length, or empty, is
/// returned unchanged (the empty case has no well-formed padded form
/// and is left for the caller to reject).
#[must_use]
pub fn pad_to_power_of_two(mut moduli: Vec<BigUint>) -> Vec<BigUint> {
    if moduli.is_empty() {
        return moduli;
    }
    let target = moduli.len().next_power_of_two();
    moduli.resize_with(target, one);
    moduli
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_up_to_the_next_power_of_two() {
        let moduli = vec![BigUint::from(15u32), BigUint::from(77u32), BigUint::from(221u32)];
        let padded = pad_to_power_of_two(moduli);
        assert_eq!(padded.len(), 4);
        assert_eq!(padded[3], one());
    }

    #[test]
    fn already_power_of_two_length_is_unchanged() {
        let moduli = vec![BigUint::from(15u32), BigUint::from(77u32)];
        let padded = pad_to_power_of_two(moduli.clone());
        assert_eq!(padded, moduli);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(pad_to_power_of_two(Vec::new()).is_empty());
    }
}

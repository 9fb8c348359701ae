// [libs/core/bigint/src/canonical.rs]
//! Canonical big-endian byte encodings.
//!
//! The **canonical modulus** is the minimal-byte-length big-endian
//! encoding of a modulus with no sign-pad byte. This module is the single
//! seam where raw wire bytes become an arbitrary-precision integer and
//! back, so every caller (the OpenSSH parser, the deduplicator, the
//! modulus-list codec) agrees on the same trimming rule.

use crate::BigUint;

/// Strips leading zero bytes from a big-endian byte slice, returning the
/// minimal-length representation. An all-zero input trims to an empty
/// slice (representing zero), matching `BigUint::to_bytes_be()`'s own
/// convention for zero.
#[must_use]
pub fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first_nonzero = bytes.iter().position(|&b| b != 0);
    match first_nonzero {
        Some(index) => &bytes[index..],
        None => &[],
    }
}

/// Decodes a big-endian byte slice into an arbitrary-precision integer.
/// Leading zero bytes (including an SSH sign-pad) are harmless here:
/// `BigUint::from_bytes_be` already ignores them numerically. Callers
/// that need the *canonical encoding itself* (not just the numeric
/// value) should use [`to_canonical_bytes`] on the result.
#[must_use]
pub fn from_be_bytes(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Encodes an arbitrary-precision integer as its canonical (minimal
/// length, no sign pad) big-endian byte string.
#[must_use]
pub fn to_canonical_bytes(value: &BigUint) -> Vec<u8> {
    value.to_bytes_be()
}

/// Decodes a lowercase hexadecimal modulus (no `0x` prefix, no
/// leading-zero pad) into an arbitrary-precision integer.
///
/// # Errors
/// Returns an error if `text` contains non-hexadecimal characters.
pub fn from_hex(text: &str) -> Result<BigUint, hex::FromHexError> {
    let bytes = if text.len() % 2 == 1 {
        // An odd-length canonical hex string is valid (no leading-zero
        // pad requirement forces even length); pad a single zero nibble
        // on the left so `hex::decode` can parse it byte-aligned.
        hex::decode(format!("0{text}"))?
    } else {
        hex::decode(text)?
    };
    Ok(from_be_bytes(&bytes))
}

/// Encodes an arbitrary-precision integer as lowercase hexadecimal with
/// no leading-zero pad, matching the modulus-list text format.
#[must_use]
pub fn to_hex(value: &BigUint) -> String {
    hex::encode(to_canonical_bytes(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_single_sign_pad_byte() {
        let mut raw = vec![0x00];
        raw.extend_from_slice(&[0xC0, 0xFF, 0xEE]);
        assert_eq!(trim_leading_zeros(&raw), &[0xC0, 0xFF, 0xEE]);
    }

    #[test]
    fn trims_all_leading_zero_bytes() {
        let raw = [0x00, 0x00, 0x01];
        assert_eq!(trim_leading_zeros(&raw), &[0x01]);
    }

    #[test]
    fn all_zero_input_trims_to_empty() {
        let raw = [0x00, 0x00];
        assert_eq!(trim_leading_zeros(&raw), &[] as &[u8]);
    }

    #[test]
    fn hex_round_trip_preserves_value() {
        let value = BigUint::from(123456789u64);
        let hex_text = to_hex(&value);
        assert_eq!(from_hex(&hex_text).unwrap(), value);
    }

    #[test]
    fn odd_length_hex_decodes() {
        assert_eq!(from_hex("f").unwrap(), BigUint::from(15u32));
    }

    proptest::proptest! {
        #[test]
        fn hex_round_trip_holds_for_arbitrary_values(raw in proptest::collection::vec(proptest::prelude::any::<u8>(), 0..64)) {
            let value = from_be_bytes(&raw);
            let hex_text = to_hex(&value);
            proptest::prop_assert_eq!(from_hex(&hex_text).unwrap(), value);
        }

        #[test]
        fn canonical_bytes_round_trip_to_the_same_value(raw in proptest::collection::vec(proptest::prelude::any::<u8>(), 0..64)) {
            let value = from_be_bytes(&raw);
            let canonical = to_canonical_bytes(&value);
            proptest::prop_assert_eq!(from_be_bytes(&canonical), value);
        }
    }
}

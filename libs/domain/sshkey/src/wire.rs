// [libs/domain/sshkey/src/wire.rs]
//! The OpenSSH public-key wire encoding: a sequence of 4-byte
//! big-endian length-prefixed byte strings, back to back with no
//! separators or trailing padding.

/// Walks a decoded OpenSSH public-key payload and splits it into its
/// length-prefixed parts.
///
/// # Errors
/// Returns [`FramingError`] if a length prefix is truncated, or a
/// declared length exceeds the remaining bytes. Does not validate the
/// *contents* of each part — only that the framing is well-formed.
pub fn split_length_prefixed_strings(payload: &[u8]) -> Result<Vec<&[u8]>, FramingError> {
    let mut parts = Vec::new();
    let mut cursor = 0usize;

    while cursor < payload.len() {
        let remaining = &payload[cursor..];
        if remaining.len() < 4 {
            tracing::trace!(cursor, "wire framing truncada: faltan bytes para el prefijo de longitud");
            return Err(FramingError::TruncatedLength);
        }
        let length_bytes: [u8; 4] = remaining[..4].try_into().expect("checked length above");
        let declared_length = u32::from_be_bytes(length_bytes) as usize;
        cursor += 4;

        let available = payload.len() - cursor;
        if declared_length > available {
            tracing::trace!(declared_length, available, "longitud declarada excede los bytes restantes");
            return Err(FramingError::LengthExceedsRemaining {
                declared: declared_length,
                available,
            });
        }

        parts.push(&payload[cursor..cursor + declared_length]);
        cursor += declared_length;
    }

    Ok(parts)
}

/// Framing-level decode failure. This is "malformed", not a fatal
/// error: the caller skips the key and continues the audit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FramingError {
    /// Fewer than 4 bytes remained where a length prefix was expected.
    #[error("truncated length prefix")]
    TruncatedLength,
    /// A declared string length exceeds the bytes left in the payload.
    #[error("declared length {declared} exceeds {available} remaining bytes")]
    LengthExceedsRemaining {
        /// The length prefix as decoded.
        declared: usize,
        /// Bytes actually remaining in the payload.
        available: usize,
    },
}

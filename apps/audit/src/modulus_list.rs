// [apps/audit/src/modulus_list.rs]
//! Modulus-list codec: between dedup and batch-GCD, a modulus
//! list is either one lowercase hex value per line, or a binary
//! packed form (4-byte little-endian length, then that many
//! big-endian modulus bytes, repeated). Both forms are accepted;
//! format is auto-sniffed from the file contents.

use std::io::Read;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use keyaudit_core_bigint::{canonical, BigUint};

/// A modulus-list read failure; fatal I/O or decode error.
#[derive(Debug, thiserror::Error)]
pub enum ModulusListError {
    /// The file could not be opened or read.
    #[error("cannot read modulus list {path:?}: {source}")]
    Io {
        /// The path that failed to open.
        path: std::path::PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A hex-format line contained non-hexadecimal characters.
    #[error("invalid hex modulus on line {line}: {source}")]
    InvalidHex {
        /// 1-indexed line number.
        line: usize,
        /// The underlying decode failure.
        #[source]
        source: hex::FromHexError,
    },
    /// The binary packed form was truncated mid-record.
    #[error("binary modulus list truncated at byte offset {offset}")]
    TruncatedBinary {
        /// Byte offset where the truncation was detected.
        offset: usize,
    },
}

/// Reads every modulus out of `path`, auto-detecting whether it is
/// the hex-lines form or the binary packed form.
pub fn read_modulus_list(path: &Path) -> Result<Vec<BigUint>, ModulusListError> {
    let mut bytes = Vec::new();
    std::fs::File::open(path)
        .and_then(|mut file| file.read_to_end(&mut bytes))
        .map_err(|source| ModulusListError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    if is_hex_lines_format(&bytes) {
        parse_hex_lines(&bytes)
    } else {
        parse_binary_packed(&bytes)
    }
}

/// A file is treated as the hex-lines form when its entire contents
/// decode as UTF-8 and every non-empty line consists solely of
/// hexadecimal digits. Arbitrary binary data essentially never
/// satisfies this, so the heuristic is unambiguous in practice.
fn is_hex_lines_format(bytes: &[u8]) -> bool {
    match std::str::from_utf8(bytes) {
        Ok(text) => text
            .lines()
            .filter(|line| !line.is_empty())
            .all(|line| !line.is_empty() && line.bytes().all(|b| b.is_ascii_hexdigit())),
        Err(_) => false,
    }
}

fn parse_hex_lines(bytes: &[u8]) -> Result<Vec<BigUint>, ModulusListError> {
    let text = std::str::from_utf8(bytes).expect("caller verified utf8 via is_hex_lines_format");
    text.lines()
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(zero_indexed, line)| {
            canonical::from_hex(line).map_err(|source| ModulusListError::InvalidHex {
                line: zero_indexed + 1,
                source,
            })
        })
        .collect()
}

fn parse_binary_packed(bytes: &[u8]) -> Result<Vec<BigUint>, ModulusListError> {
    let mut moduli = Vec::new();
    let mut offset = 0usize;
    while offset < bytes.len() {
        if offset + 4 > bytes.len() {
            return Err(ModulusListError::TruncatedBinary { offset });
        }
        let length = LittleEndian::read_u32(&bytes[offset..offset + 4]) as usize;
        offset += 4;
        if offset + length > bytes.len() {
            return Err(ModulusListError::TruncatedBinary { offset });
        }
        moduli.push(canonical::from_be_bytes(&bytes[offset..offset + length]));
        offset += length;
    }
    Ok(moduli)
}

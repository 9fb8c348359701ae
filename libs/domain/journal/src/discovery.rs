// [libs/domain/journal/src/discovery.rs]
//! Journal chunk discovery.
//!
//! Journal chunks live in a single directory, named `keys-NNNN.json`
//! or `keys-NNNN.json.xz`, `NNNN` a zero-padded 4-digit chunk id
//! starting at `0001`. Discovery lists the directory, filters by that
//! naming convention, and returns chunks sorted ascending by id so the
//! caller can consume them in order.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use xz2::read::XzDecoder;

const FILENAME_PREFIX: &str = "keys-";
const CHUNK_ID_DIGITS: usize = 4;

/// One discovered journal chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalChunk {
    /// The numeric chunk id parsed from the filename.
    pub chunk_id: u32,
    /// Absolute or relative path to the chunk file.
    pub path: PathBuf,
    /// Whether the chunk is `.xz`-compressed and needs transparent
    /// decompression before reading.
    pub compressed: bool,
}

/// Lists `directory`, returning every recognized journal chunk sorted
/// ascending by chunk id. Filenames that don't match
/// `keys-NNNN.json[.xz]` — unknown extensions included — are silently
/// ignored.
///
/// # Errors
/// Fatal if `directory` is missing or unreadable.
pub fn discover_journal_chunks(directory: &Path) -> Result<Vec<JournalChunk>, DiscoveryError> {
    let entries = std::fs::read_dir(directory)
        .map_err(|source| DiscoveryError::UnreadableDirectory {
            path: directory.to_path_buf(),
            source,
        })?;

    let mut chunks = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DiscoveryError::UnreadableDirectory {
            path: directory.to_path_buf(),
            source,
        })?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if let Some(chunk) = parse_chunk_filename(file_name) {
            chunks.push(JournalChunk {
                chunk_id: chunk.0,
                path: entry.path(),
                compressed: chunk.1,
            });
        }
    }

    chunks.sort_by_key(|chunk| chunk.chunk_id);
    Ok(chunks)
}

/// Parses `keys-NNNN.json` or `keys-NNNN.json.xz` into `(chunk_id,
/// compressed)`. Returns `None` for anything else, including
/// malformed chunk ids (wrong digit count, non-numeric).
fn parse_chunk_filename(file_name: &str) -> Option<(u32, bool)> {
    let rest = file_name.strip_prefix(FILENAME_PREFIX)?;
    let (compressed, rest) = match rest.strip_suffix(".xz") {
        Some(rest) => (true, rest),
        None => (false, rest),
    };
    let digits = rest.strip_suffix(".json")?;
    if digits.len() != CHUNK_ID_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let chunk_id: u32 = digits.parse().ok()?;
    Some((chunk_id, compressed))
}

/// Opens a journal chunk as a buffered byte stream, transparently
/// decompressing `.xz` chunks.
///
/// # Errors
/// Fatal if the file cannot be opened.
pub fn open_chunk(chunk: &JournalChunk) -> Result<Box<dyn BufRead>, DiscoveryError> {
    let file = File::open(&chunk.path).map_err(|source| DiscoveryError::UnreadableFile {
        path: chunk.path.clone(),
        source,
    })?;
    if chunk.compressed {
        Ok(Box::new(BufReader::new(XzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// A journal discovery or open failure. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The journal directory does not exist or could not be listed.
    #[error("cannot read journal directory {path:?}: {source}")]
    UnreadableDirectory {
        /// The directory that failed to open.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A chunk file matched the naming convention but could not be opened.
    #[error("cannot open journal chunk {path:?}: {source}")]
    UnreadableFile {
        /// The chunk file that failed to open.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

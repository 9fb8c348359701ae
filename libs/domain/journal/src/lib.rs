// [libs/domain/journal/src/lib.rs]
#![deny(missing_docs)]
/*!
 * APARATO: LECTOR DE JOURNALS (ESTRATO L2)
 * RESPONSABILIDAD: DESCUBRIMIENTO Y LECTURA DE FRAGMENTOS DE JOURNAL
 *
 * A journal is a directory of LF-delimited JSON chunks, optionally
 * `.xz`-compressed, consumed in ascending chunk-id order. This crate
 * owns only the low-level primitives — discovery, decompression, line
 * parsing; composing them into a full extraction pipeline is the
 * caller's job.
 */

pub mod discovery;
pub mod stream;

pub use discovery::{discover_journal_chunks, open_chunk, DiscoveryError, JournalChunk};
pub use stream::{RecordStream, StreamError};

use keyaudit_domain_models::Record;
use std::path::Path;

/// Either a discovery failure or a per-record read failure, unified
/// for callers that just want "give me records or tell me why not".
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// Failed to enumerate or open a journal chunk.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    /// Failed to decode a record within an opened chunk.
    #[error(transparent)]
    Stream(#[from] StreamError),
}

/// Discovers every chunk in `directory` and reads all records across
/// all chunks in ascending chunk-id order, as a single flattened
/// iterator. A chunk that fails to open, or a record that fails to
/// decode, is a fatal error for the whole journal: the iterator stops
/// with `Some(Err(..))` and yields nothing further.
pub fn read_journal(
    directory: &Path,
) -> Result<impl Iterator<Item = Result<Record, JournalError>>, JournalError> {
    let chunks = discover_journal_chunks(directory)?;
    tracing::info!(chunk_count = chunks.len(), directory = ?directory, "descubiertos fragmentos de journal");

    let mut fatal = false;
    let iter = chunks.into_iter().flat_map(move |chunk| {
        if fatal {
            return Vec::new().into_iter();
        }
        let reader = match open_chunk(&chunk) {
            Ok(reader) => reader,
            Err(open_error) => {
                fatal = true;
                return vec![Err(JournalError::from(open_error))].into_iter();
            }
        };

        let records: Vec<Result<Record, JournalError>> = RecordStream::new(reader)
            .map(|result| result.map_err(JournalError::from))
            .collect();
        if records.iter().any(Result::is_err) {
            fatal = true;
        }
        records.into_iter()
    });

    Ok(iter)
}

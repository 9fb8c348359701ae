// [libs/domain/journal/src/stream.rs]
//! Line-delimited JSON stream reader.
//!
//! Splits a byte stream at LF, parsing each line as one [`Record`].
//! An empty line yields nothing; a non-empty trailing line with no
//! terminating LF is still emitted at end-of-stream. A decode failure
//! is fatal — the journal is corrupt — and fuses the iterator so no
//! further lines are produced afterward.

use std::io::BufRead;

use keyaudit_domain_models::Record;

/// Reads [`Record`]s out of an underlying LF-delimited JSON byte
/// stream. Generic over any [`BufRead`] so the caller can hand in a
/// plain file, a decompressing reader, or (via [`RecordStream::chain`])
/// several readers concatenated across journal chunks.
pub struct RecordStream<R: BufRead> {
    reader: R,
    fused: bool,
}

impl<R: BufRead> RecordStream<R> {
    /// Wraps a buffered reader as a record stream.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            fused: false,
        }
    }
}

impl<R: BufRead> Iterator for RecordStream<R> {
    type Item = Result<Record, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }

        loop {
            let mut line = String::new();
            let bytes_read = match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(n) => n,
                Err(io_error) => {
                    self.fused = true;
                    return Some(Err(StreamError::Io(io_error)));
                }
            };
            debug_assert!(bytes_read > 0);

            if line.ends_with('\n') {
                line.pop();
            }

            if line.is_empty() {
                continue;
            }

            return match serde_json::from_str::<Record>(&line) {
                Ok(record) => Some(Ok(record)),
                Err(decode_error) => {
                    self.fused = true;
                    Some(Err(StreamError::Decode(decode_error)))
                }
            };
        }
    }
}

/// A journal read failure. Always fatal: a corrupt record invalidates
/// the chunk it came from.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The underlying byte stream could not be read.
    #[error("journal I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A line was not a well-formed [`Record`].
    #[error("malformed journal record: {0}")]
    Decode(#[from] serde_json::Error),
}

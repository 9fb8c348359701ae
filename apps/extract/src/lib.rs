// [apps/extract/src/lib.rs]
#![deny(missing_docs)]
//! Library half of the `extract` binary, split out so the pipeline
//! can be exercised directly in tests without going through the CLI
//! argument parser.

pub mod pipeline;

pub use pipeline::{ExtractionError, ExtractionPipeline};

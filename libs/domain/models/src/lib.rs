// [libs/domain/models/src/lib.rs]
#![deny(missing_docs)]
//! Shared domain DTOs: the journal record schema and the batch-GCD
//! match result.

pub mod finding;
pub mod record;

pub use finding::SharedFactorMatch;
pub use record::{Record, User};

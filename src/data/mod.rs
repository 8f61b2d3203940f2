//! Data loading and storage module
//!
//! This module turns raw catalog CSV sources into an immutable [`Catalog`].
//!
//! ## Pipeline
//!
//! - `loader`: fetches every source concurrently (files or HTTP)
//! - `csv_parser`: parses each source into chip records, skipping bad rows
//! - `catalog`: merges records in source order and publishes snapshots
//!
//! ## Error Handling
//!
//! All data operations return `DataResult<T>` which uses the `DataError` type.
//! Common errors include:
//! - `SourceFetch`: a source could not be retrieved (aborts the load)
//! - `TooLarge` / `TooManyRows`: a source exceeds the size limits
//! - `NotFound`: record lookup miss
//!
//! Malformed rows are never errors; they are reported as `SkippedRow`s.

mod catalog;
mod csv_parser;
mod error;
mod loader;

pub use catalog::*;
pub use csv_parser::*;
pub use error::*;
pub use loader::*;

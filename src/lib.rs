//! Chip catalog core.
//!
//! Loads TTL and CMOS logic-chip datasets from CSV sources and keeps the
//! filter/search/pagination state of a card browser consistent. Rendering is
//! left to the embedding view layer, which reads [`CatalogController::view`]
//! after every event.

pub mod constants;
pub mod controller;
pub mod data;
pub mod logging;
pub mod perf;
pub mod settings;
pub mod types;
pub mod view_model;
pub mod view_state;

pub use controller::{CatalogController, CatalogView};
pub use data::{Catalog, DataError, DataResult, SourceSpec};
pub use types::{ChipRecord, Family, FamilyFilter, Status};

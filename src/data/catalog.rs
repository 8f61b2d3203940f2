//! Catalog storage.
//!
//! A [`Catalog`] is the frozen, ordered set of records from every source.
//! It is built once by a [`CatalogBuilder`] and handed out through a
//! [`CatalogStore`], which only ever swaps in a complete snapshot.

use crate::data::error::{DataError, DataResult};
use crate::types::{ChipRecord, Family};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Immutable, ordered set of chip records.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    records: Vec<ChipRecord>,
    /// Chip number -> index of its first occurrence
    by_number: HashMap<String, usize>,
}

impl Catalog {
    /// An empty catalog (nothing loaded yet, or a failed load)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Records in load order
    pub fn records(&self) -> &[ChipRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by chip number.
    ///
    /// When several sources list the same number the first in catalog
    /// order wins.
    pub fn get(&self, number: &str) -> DataResult<&ChipRecord> {
        self.by_number
            .get(number)
            .and_then(|&idx| self.records.get(idx))
            .ok_or_else(|| DataError::NotFound(number.to_string()))
    }

    pub fn count_by_family(&self, family: Family) -> usize {
        self.records.iter().filter(|r| r.family == family).count()
    }
}

/// Append-only accumulator used while a load is in progress.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    records: Vec<ChipRecord>,
    by_number: HashMap<String, usize>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one source's records, keeping their order.
    pub fn extend(&mut self, label: &str, records: impl IntoIterator<Item = ChipRecord>) {
        let before = self.records.len();
        for record in records {
            let idx = self.records.len();
            self.by_number.entry(record.number.clone()).or_insert(idx);
            self.records.push(record);
        }
        debug!(
            source = label,
            added = self.records.len() - before,
            total = self.records.len(),
            "Merged source into catalog"
        );
    }

    /// Freeze the accumulated records.
    pub fn finish(self) -> Catalog {
        Catalog {
            records: self.records,
            by_number: self.by_number,
        }
    }
}

/// Shared handle publishing whole catalog snapshots.
///
/// Readers always observe either the previous or the new catalog, never a
/// partially merged one.
#[derive(Clone, Debug, Default)]
pub struct CatalogStore {
    current: Arc<RwLock<Arc<Catalog>>>,
}

impl CatalogStore {
    /// A store holding an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.current.read().clone()
    }

    /// Replace the snapshot with a fully built catalog.
    pub fn publish(&self, catalog: Catalog) -> Arc<Catalog> {
        let catalog = Arc::new(catalog);
        *self.current.write() = catalog.clone();
        catalog
    }

    /// Drop back to an empty catalog.
    pub fn clear(&self) {
        *self.current.write() = Arc::new(Catalog::empty());
    }
}

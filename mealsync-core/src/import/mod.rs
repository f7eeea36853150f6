//! Best-effort import of TheMealDB data into the destination store.
//!
//! Importers never return an error: every failure is logged and reported as
//! `ImportOutcome::Skipped`, so one bad partition cannot stop the sweep.

mod categories;
mod pipeline;
mod recipes;

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::ImportError;

pub use categories::import_categories;
pub use pipeline::{ImportReport, PartitionReport, Pipeline, DEFAULT_PARTITION_DELAY};
pub use recipes::import_recipes;

/// Result of one importer call.
#[derive(Debug)]
pub enum ImportOutcome {
    /// The batch reached the store; `rows` is what the store reports.
    Imported { rows: usize },
    /// The source answered without the expected array.
    NoData,
    /// Fetch, decode or persistence failed; nothing was written.
    Skipped(ImportError),
}

impl ImportOutcome {
    /// Rows persisted by this call, 0 unless `Imported`.
    pub fn imported(&self) -> usize {
        match self {
            ImportOutcome::Imported { rows } => *rows,
            ImportOutcome::NoData | ImportOutcome::Skipped(_) => 0,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ImportOutcome::Skipped(_))
    }
}

/// Drop earlier rows sharing a key with a later one. The surviving row keeps
/// the position of the first occurrence.
pub(crate) fn dedupe_by_key<T, K, F>(rows: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut positions: HashMap<K, usize> = HashMap::with_capacity(rows.len());
    let mut deduped: Vec<T> = Vec::with_capacity(rows.len());

    for row in rows {
        match positions.get(&key(&row)) {
            Some(&idx) => deduped[idx] = row,
            None => {
                positions.insert(key(&row), deduped.len());
                deduped.push(row);
            }
        }
    }

    deduped
}

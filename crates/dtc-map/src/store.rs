//! Shared, atomically replaceable mapping snapshot.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::table::{MappingSet, MappingTable};

/// Holds the current [`MappingSet`] behind an `Arc`.
///
/// Readers take a snapshot and keep using it for the whole analysis; edits build
/// a new set and swap it in, so no reader ever sees a half-updated table.
#[derive(Debug, Default)]
pub struct MappingStore {
    current: RwLock<Arc<MappingSet>>,
}

impl MappingStore {
    pub fn new(set: MappingSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(set)),
        }
    }

    /// The set in effect right now.
    pub fn snapshot(&self) -> Arc<MappingSet> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Bulk-replaces every table.
    pub fn replace(&self, set: MappingSet) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(set);
    }

    /// Bulk-replaces one table, keeping the others.
    pub fn replace_table(&self, table: MappingTable) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        debug!(kind = %table.kind(), entries = table.len(), "replacing mapping table");
        let next = MappingSet::clone(&guard).with_table(table);
        *guard = Arc::new(next);
    }
}

#[cfg(test)]
mod tests {
    use dtc_model::MappingKind;

    use super::*;

    #[test]
    fn snapshot_is_unaffected_by_later_replace() {
        let store = MappingStore::new(MappingSet::new());
        let before = store.snapshot();
        store.replace_table(MappingTable::from_entries(
            MappingKind::Position,
            [("a", "b")],
        ));
        let after = store.snapshot();

        assert_eq!(before.lookup(MappingKind::Position, "a"), "a");
        assert_eq!(after.lookup(MappingKind::Position, "a"), "b");
    }

    #[test]
    fn replace_swaps_all_tables() {
        let store = MappingStore::default();
        let set = MappingSet::new()
            .with_table(MappingTable::from_entries(MappingKind::Course, [("x", "y")]));
        store.replace(set.clone());
        assert_eq!(*store.snapshot(), set);
    }
}

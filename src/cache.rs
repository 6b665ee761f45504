use std::collections::HashMap;

use crate::models::RateSnapshot;

/// In-memory store of fetched snapshots keyed by (date token, base code).
///
/// Entries are inserted only after a fully successful fetch and are never
/// mutated afterwards; lookups hand out clones so callers cannot alter the
/// cached data. Unbounded by design: the upstream dataset is a few hundred
/// codes and each snapshot is fetched at most once per client.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    entries: HashMap<(String, String), RateSnapshot>,
}

impl SnapshotCache {
    pub fn get(&self, date: &str, base: &str) -> Option<RateSnapshot> {
        self.entries
            .get(&(date.to_string(), base.to_string()))
            .cloned()
    }

    pub fn insert(&mut self, date: &str, base: &str, snapshot: RateSnapshot) {
        self.entries
            .insert((date.to_string(), base.to_string()), snapshot);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

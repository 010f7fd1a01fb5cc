//! The duplicate set produced by the comparator.

use crate::scanner::Entry;

/// Entries flagged as duplicates, in the order workers appended them.
///
/// That order follows worker completion and is not deterministic. Call
/// [`DuplicateSet::sort_by_position`] when a reproducible order is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateSet {
    entries: Vec<Entry>,
}

impl DuplicateSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a flagged entry.
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Number of flagged entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was flagged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate flagged entries in set order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Reorder the set by ascending entry position.
    pub fn sort_by_position(&mut self) {
        self.entries.sort_by_key(|e| e.position);
    }

    /// Positions of the flagged entries, sorted ascending.
    #[must_use]
    pub fn positions(&self) -> Vec<usize> {
        let mut positions: Vec<usize> = self.entries.iter().map(|e| e.position).collect();
        positions.sort_unstable();
        positions
    }

    /// Combined size in bytes of every flagged entry.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    /// Consume the set, returning its entries in set order.
    #[must_use]
    pub fn into_vec(self) -> Vec<Entry> {
        self.entries
    }
}

impl From<Vec<Entry>> for DuplicateSet {
    fn from(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a DuplicateSet {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for DuplicateSet {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

//! Diagnostics currently valid per document.

use std::collections::BTreeMap;

use crate::diagnostics::Diagnostic;

/// Mapping from document identity to the diagnostics of its latest scan.
///
/// ## Notes
/// - [`DiagnosticSet::replace`] swaps the whole entry, so a reader never sees a mix of two scans.
/// - Iteration is ordered by key.
#[derive(Debug, Clone)]
pub struct DiagnosticSet<K: Ord> {
    entries: BTreeMap<K, Vec<Diagnostic>>,
}

impl<K: Ord> Default for DiagnosticSet<K> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord> DiagnosticSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear-then-set the diagnostics for `key`. An empty list is stored, not dropped.
    pub fn replace(&mut self, key: K, diagnostics: Vec<Diagnostic>) {
        self.entries.insert(key, diagnostics);
    }

    pub fn get(&self, key: &K) -> Option<&[Diagnostic]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Drop the entry for `key`, e.g. when the document closes.
    pub fn remove(&mut self, key: &K) -> Option<Vec<Diagnostic>> {
        self.entries.remove(key)
    }

    /// Drop every entry, returning the keys that had one.
    pub fn clear(&mut self) -> Vec<K> {
        std::mem::take(&mut self.entries).into_keys().collect()
    }

    /// Number of documents with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[Diagnostic])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }
}

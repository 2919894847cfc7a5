//! Side table linking generated nodes back to the calls they replaced.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Maps the key of every generated node to the original node.
///
/// Scoped to one engine, and so to one traversal of one tree.
#[derive(Debug)]
pub struct MutationTracker<K, N> {
    originals: FxHashMap<K, N>,
}

impl<K: Hash + Eq, N> MutationTracker<K, N> {
    pub fn new() -> Self {
        Self {
            originals: FxHashMap::default(),
        }
    }

    pub fn store_original(&mut self, generated: K, original: N) {
        self.originals.insert(generated, original);
    }

    pub fn get_original(&self, generated: &K) -> Option<&N> {
        self.originals.get(generated)
    }

    pub fn is_mutated(&self, node: &K) -> bool {
        self.originals.contains_key(node)
    }

    pub fn len(&self) -> usize {
        self.originals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }
}

impl<K: Hash + Eq, N> Default for MutationTracker<K, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_lookup() {
        let mut tracker = MutationTracker::new();
        assert!(!tracker.is_mutated(&2));
        tracker.store_original(2, "nameof(a)");
        assert!(tracker.is_mutated(&2));
        assert_eq!(tracker.get_original(&2), Some(&"nameof(a)"));
        assert_eq!(tracker.get_original(&1), None);
        assert_eq!(tracker.len(), 1);
    }
}

//! Linear path index
//!
//! Ordered list of (pattern, value) pairs compared by exact string match.
//! Lookups scan every entry; kept for small route sets and as a baseline
//! for the trie.

use super::trie::PathIndex;

pub struct LinearIndex<V> {
    entries: Vec<(String, V)>,
}

impl<V> LinearIndex<V> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn position(&self, path: &str) -> Option<usize> {
        self.entries.iter().position(|(pattern, _)| pattern == path)
    }
}

impl<V> Default for LinearIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PathIndex<V> for LinearIndex<V> {
    fn get(&self, path: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(pattern, _)| pattern == path)
            .map(|(_, value)| value)
    }

    fn put(&mut self, path: &str, value: V) {
        match self.position(path) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((path.to_string(), value)),
        }
    }

    fn take(&mut self, path: &str) -> Option<V> {
        let i = self.position(path)?;
        Some(self.entries.remove(i).1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_only() {
        let mut index = LinearIndex::new();
        index.put("/a", 1);
        index.put("/a/b/c/d", 3);

        assert_eq!(index.get("/a"), Some(&1));
        assert_eq!(index.get("/a/b"), None);
        assert_eq!(index.get("/a/"), None);
    }

    #[test]
    fn test_put_replaces_in_place() {
        let mut index = LinearIndex::new();
        index.put("/a", 1);
        index.put("/b", 2);
        index.put("/a", 3);

        assert_eq!(index.entries.len(), 2);
        assert_eq!(index.entries[0], ("/a".to_string(), 3));
    }

    #[test]
    fn test_take() {
        let mut index = LinearIndex::new();
        index.put("/a", 1);

        assert_eq!(index.take("/a"), Some(1));
        assert_eq!(index.get("/a"), None);
        assert_eq!(index.take("/a"), None);
    }
}

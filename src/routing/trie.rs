//! Path index module
//!
//! Exact-path storage keyed by path segments. Lookups cost one hash probe
//! per segment, independent of how many paths are stored.

use std::collections::HashMap;

use super::segment::segments;

/// Storage that associates a value with an exact path.
pub trait PathIndex<V> {
    /// Value stored at exactly `path`, if any.
    fn get(&self, path: &str) -> Option<&V>;

    /// Store `value` at `path`, replacing any previous value.
    fn put(&mut self, path: &str, value: V);

    /// Detach and return the value at `path`. Prefix structure is kept.
    fn take(&mut self, path: &str) -> Option<V>;
}

type NodeId = usize;

const ROOT: NodeId = 0;

struct Node<V> {
    value: Option<V>,
    children: HashMap<String, NodeId>,
}

impl<V> Node<V> {
    fn new() -> Self {
        Self {
            value: None,
            children: HashMap::new(),
        }
    }
}

/// Segment trie backed by a node arena.
///
/// Nodes are never removed, so a `NodeId` stays valid for the lifetime
/// of the trie. Each node is reachable from exactly one parent edge.
pub struct PathTrie<V> {
    nodes: Vec<Node<V>>,
}

impl<V> PathTrie<V> {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new()],
        }
    }

    /// Walk existing nodes only, stopping at the first missing segment.
    fn find(&self, path: &str) -> Option<NodeId> {
        let mut id = ROOT;
        for segment in segments(path) {
            id = *self.nodes[id].children.get(segment)?;
        }
        Some(id)
    }

    /// Walk the path, creating missing nodes on the way.
    fn find_or_insert(&mut self, path: &str) -> NodeId {
        let mut id = ROOT;
        for segment in segments(path) {
            id = match self.nodes[id].children.get(segment) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::new());
                    self.nodes[id].children.insert(segment.to_string(), child);
                    child
                }
            };
        }
        id
    }

    /// Number of allocated nodes, root included.
    #[cfg(test)]
    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl<V> Default for PathTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PathIndex<V> for PathTrie<V> {
    fn get(&self, path: &str) -> Option<&V> {
        let id = self.find(path)?;
        self.nodes[id].value.as_ref()
    }

    fn put(&mut self, path: &str, value: V) {
        let id = self.find_or_insert(path);
        self.nodes[id].value = Some(value);
    }

    fn take(&mut self, path: &str) -> Option<V> {
        let id = self.find(path)?;
        self.nodes[id].value.take()
    }
}

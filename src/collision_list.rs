//! Per-bucket storage for the chaining map

use std::{borrow::Borrow, fmt, slice};

/// A key-value node in a collision list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<K, V> {
    /// The key in the key-value pair
    key: K,
    /// The value associated with the key
    value: V,
}

impl<K, V> Node<K, V> {
    /// Returns the node's key
    #[must_use]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the node's value
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }
}

/// An ordered sequence of key-value nodes sharing one bucket.
///
/// Nodes are kept in insertion order. The list does not enforce key uniqueness itself; the
/// owning map checks with [`CollisionList::contains`] before inserting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionList<K, V> {
    /// Nodes in insertion order
    nodes: Vec<Node<K, V>>,
}

impl<K, V> Default for CollisionList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> CollisionList<K, V> {
    /// Creates an empty list
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Appends a new node at the end of the list
    pub fn insert(&mut self, key: K, value: V) {
        self.nodes.push(Node { key, value });
    }

    /// Returns the number of nodes in the list
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the list holds no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over the nodes in insertion order
    pub fn iter(&self) -> slice::Iter<'_, Node<K, V>> {
        self.nodes.iter()
    }

    /// Consumes the list, yielding its key-value pairs in insertion order
    pub fn into_pairs(self) -> impl Iterator<Item = (K, V)> {
        self.nodes.into_iter().map(|node| (node.key, node.value))
    }
}

impl<K, V> CollisionList<K, V>
where
    K: Borrow<str>,
{
    /// Position of the first node whose key equals `key`
    fn position(&self, key: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.key.borrow() == key)
    }

    /// Returns the first node whose key equals `key`
    #[must_use]
    pub fn contains(&self, key: &str) -> Option<&Node<K, V>> {
        self.nodes.iter().find(|node| node.key.borrow() == key)
    }

    /// Returns a mutable reference to the value of the first node whose key equals `key`
    pub fn value_mut(&mut self, key: &str) -> Option<&mut V> {
        self.nodes.iter_mut().find(|node| node.key.borrow() == key).map(|node| &mut node.value)
    }

    /// Removes the first node whose key equals `key`, keeping the order of the rest
    pub fn remove(&mut self, key: &str) -> Option<(K, V)> {
        let index = self.position(key)?;
        let node = self.nodes.remove(index);
        Some((node.key, node.value))
    }
}

impl<'a, K, V> IntoIterator for &'a CollisionList<K, V> {
    type Item = &'a Node<K, V>;
    type IntoIter = slice::Iter<'a, Node<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> fmt::Display for CollisionList<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "-> ({}: {}) ", node.key, node.value)?;
        }
        Ok(())
    }
}

//! In-order traversal of an [`AvlSet`](crate::AvlSet).
//!
//! Iterators keep an explicit stack of the nodes whose left subtrees are being visited, so they
//! are lazy and hold at most `height` nodes at a time.

use std::fmt;
use std::iter::FusedIterator;

use crate::node::{Link, Node};

/// A key together with the bookkeeping of the node storing it.
#[derive(Debug, PartialEq, Eq)]
pub struct Entry<'a, K> {
    /// The stored key.
    pub key: &'a K,
    /// Number of levels in the subtree rooted at this node. Leaves have a height of 1.
    pub height: usize,
    /// Height of the left subtree minus height of the right subtree. Always in `-1..=1`.
    pub balance_factor: isize,
}

impl<K> Clone for Entry<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K> Copy for Entry<'_, K> {}

impl<'a, K> Entry<'a, K> {
    pub(crate) fn from_node(node: &'a Node<K>) -> Self {
        Self {
            key: &node.key,
            height: node.height,
            balance_factor: node.balance_factor(),
        }
    }
}

impl<K> fmt::Display for Entry<'_, K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] (H:{}, Fb:{})",
            self.key, self.height, self.balance_factor
        )
    }
}

/// Ascending iterator over the [`Entry`]s of a set. Created by
/// [`AvlSet::in_order`](crate::AvlSet::in_order).
pub struct InOrder<'a, K> {
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<'a, K> InOrder<'a, K> {
    pub(crate) fn new(root: &'a Link<K>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<K> Clone for InOrder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = Entry<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some(Entry::from_node(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for InOrder<'_, K> {}

impl<K> FusedIterator for InOrder<'_, K> {}

/// Ascending iterator over the keys of a set. Created by [`AvlSet::iter`](crate::AvlSet::iter).
pub struct Iter<'a, K> {
    inner: InOrder<'a, K>,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(inner: InOrder<'a, K>) -> Self {
        Self { inner }
    }
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| entry.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

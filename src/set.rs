//! An ordered set of unique keys stored in an AVL tree.
//!
//! # Examples
//!
//! ```
//! use avl_set::AvlSet;
//!
//! let mut set = AvlSet::new();
//!
//! // Nothing in here yet.
//! assert_eq!(set.search(&1), None);
//!
//! assert!(set.insert(1));
//! assert_eq!(set.search(&1), Some(&1));
//!
//! // Inserting the same key again changes nothing.
//! assert!(!set.insert(1));
//! assert_eq!(set.len(), 1);
//!
//! // Deleting a missing key is fine too.
//! assert!(set.delete(&1));
//! assert!(!set.delete(&1));
//! assert_eq!(set.search(&1), None);
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::check;
use crate::error::{Error, Violation};
use crate::iter::{Entry, InOrder, Iter};
use crate::node::{self, InsertResult, Link};

/// A self-balancing Binary Search Tree (specifically, an AVL tree) holding unique keys. This can
/// be used for inserting, searching for, and deleting keys, and for visiting them in ascending
/// order.
#[derive(Clone)]
pub struct AvlSet<K> {
    root: Link<K>,
    len: usize,
}

impl<K> Default for AvlSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> AvlSet<K> {
    /// Generates a new, empty `AvlSet`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of keys in the set.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Number of levels in the tree. An empty set has a height of 0.
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// The key, height and balance factor of the root node.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::AvlSet;
    ///
    /// let set: AvlSet<_> = [10, 20, 30].into_iter().collect();
    /// let root = set.root().unwrap();
    ///
    /// // Inserting in ascending order rotated 20 to the top.
    /// assert_eq!((*root.key, root.height, root.balance_factor), (20, 2, 0));
    /// ```
    pub fn root(&self) -> Option<Entry<'_, K>> {
        self.root.as_deref().map(Entry::from_node)
    }

    /// The smallest key in the set.
    pub fn first(&self) -> Option<&K> {
        node::first(&self.root)
    }

    /// The largest key in the set.
    pub fn last(&self) -> Option<&K> {
        node::last(&self.root)
    }

    /// Visits every key in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.in_order())
    }

    /// Visits every node in ascending key order, reporting each node's height and balance factor
    /// along with its key. Each call starts a fresh traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::AvlSet;
    ///
    /// let set: AvlSet<_> = [2, 1, 3].into_iter().collect();
    /// let entries: Vec<_> = set
    ///     .in_order()
    ///     .map(|e| (*e.key, e.height, e.balance_factor))
    ///     .collect();
    ///
    /// assert_eq!(entries, [(1, 1, 0), (2, 2, 0), (3, 1, 0)]);
    /// ```
    pub fn in_order(&self) -> InOrder<'_, K> {
        InOrder::new(&self.root, self.len)
    }

    /// Inserts `key` into the set, rebalancing every ancestor of the new node. Returns `false`
    /// and leaves the set untouched if `key` was already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    ///
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Ord,
    {
        self.insert_by(key, &K::cmp)
    }

    /// Deletes `key` from the set, rebalancing every ancestor of the removed node. Returns
    /// `false` and leaves the set untouched if `key` was not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::AvlSet;
    ///
    /// let mut set: AvlSet<_> = [1, 2, 3].into_iter().collect();
    ///
    /// assert!(set.delete(&2));
    /// assert!(!set.delete(&42));
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3]);
    /// ```
    pub fn delete(&mut self, key: &K) -> bool
    where
        K: Ord,
    {
        self.delete_by(key, &K::cmp)
    }

    /// Potentially finds the stored key equal to `key`. If no node has the key, `None` is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::AvlSet;
    ///
    /// let set: AvlSet<_> = [1].into_iter().collect();
    ///
    /// assert_eq!(set.search(&1), Some(&1));
    /// assert_eq!(set.search(&42), None);
    /// ```
    pub fn search(&self, key: &K) -> Option<&K>
    where
        K: Ord,
    {
        node::search(&self.root, key, &K::cmp)
    }

    /// Returns `true` if the set holds `key`.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.search(key).is_some()
    }

    /// Like [`insert`](Self::insert) for keys that are only partially ordered. Fails without
    /// touching the set if `key` can't be ordered against the keys it would be compared with.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::{AvlSet, Error};
    ///
    /// let mut set = AvlSet::new();
    ///
    /// assert_eq!(set.try_insert(1.5), Ok(true));
    /// assert_eq!(set.try_insert(f64::NAN), Err(Error::Incomparable));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn try_insert(&mut self, key: K) -> Result<bool, Error>
    where
        K: PartialOrd,
    {
        node::check_comparable(&self.root, &key)?;
        Ok(self.insert_by(key, &node::partial_order))
    }

    /// Like [`delete`](Self::delete) for keys that are only partially ordered.
    pub fn try_delete(&mut self, key: &K) -> Result<bool, Error>
    where
        K: PartialOrd,
    {
        node::check_comparable(&self.root, key)?;
        Ok(self.delete_by(key, &node::partial_order))
    }

    /// Like [`search`](Self::search) for keys that are only partially ordered.
    pub fn try_search(&self, key: &K) -> Result<Option<&K>, Error>
    where
        K: PartialOrd,
    {
        node::check_comparable(&self.root, key)?;
        Ok(node::search(&self.root, key, &node::partial_order))
    }

    /// Walks the whole tree checking that keys ascend strictly, that every stored height is
    /// right and that every node is balanced. Reports the first problem found.
    pub fn validate(&self) -> Result<(), Violation>
    where
        K: PartialOrd,
    {
        check::validate(&self.root, self.len)
    }

    fn insert_by<C>(&mut self, key: K, cmp: &C) -> bool
    where
        C: Fn(&K, &K) -> Ordering,
    {
        let (root, result) = node::insert(self.root.take(), key, cmp);
        self.root = Some(root);

        let inserted = result != InsertResult::Duplicate;
        if inserted {
            self.len += 1;
        }
        inserted
    }

    fn delete_by<C>(&mut self, key: &K, cmp: &C) -> bool
    where
        C: Fn(&K, &K) -> Ordering,
    {
        let (root, removed) = node::delete(self.root.take(), key, cmp);
        self.root = root;

        if removed {
            self.len -= 1;
        }
        removed
    }
}

impl<K> fmt::Debug for AvlSet<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Writes every node in order as `[key] (H:height, Fb:balance_factor)`, separated by spaces.
impl<K> fmt::Display for AvlSet<K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.in_order().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

impl<K> PartialEq for AvlSet<K>
where
    K: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K> Eq for AvlSet<K> where K: Eq {}

impl<K> FromIterator<K> for AvlSet<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K> Extend<K> for AvlSet<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a AvlSet<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

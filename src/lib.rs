//! This crate exposes an ordered set backed by a self-balancing Binary Search
//! Tree (an AVL tree), mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a key takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). BSTs also naturally support sorted
//! iteration by visiting the left subtree, then the subtree root, then the right
//! subtree.
//!
//! ## AVL Trees
//!
//! An AVL tree additionally stores the height of every subtree and keeps the
//! heights of the two children of every `Node` within one of each other. When an
//! insert or delete breaks that rule, the tree is restructured with rotations on
//! the way back up from the modified leaf. This keeps the height at `O(lg N)`
//! where `N` is the number of keys in the tree.
//!
//! # Examples
//!
//! ```
//! use avl_set::AvlSet;
//!
//! let mut set = AvlSet::new();
//! for key in [10, 20, 30, 40, 50, 25] {
//!     set.insert(key);
//! }
//!
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), [10, 20, 25, 30, 40, 50]);
//! assert_eq!(set.search(&40), Some(&40));
//! assert_eq!(set.search(&99), None);
//!
//! // Every node reports its height and balance factor.
//! assert!(set.in_order().all(|entry| entry.balance_factor.abs() <= 1));
//!
//! set.delete(&30);
//! assert!(!set.contains(&30));
//! assert!(set.validate().is_ok());
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod check;
mod error;
mod iter;
mod node;
mod set;

#[cfg(feature = "serde")]
mod serde_impl;

pub use error::{Error, Violation};
pub use iter::{Entry, InOrder, Iter};
pub use set::AvlSet;

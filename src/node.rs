//! The recursive core of the AVL tree: nodes, height bookkeeping, rotations and the
//! two rebalancing policies.
//!
//! Every mutating function here takes ownership of a subtree root and hands back the
//! (possibly different) root of the same subtree. Callers reattach the result to
//! wherever the subtree came from, e.g. `node.left = delete(node.left.take(), ..)`.

use std::cmp::Ordering;

use crate::error::Error;

/// An owning pointer to an optional subtree.
pub(crate) type Link<K> = Option<Box<Node<K>>>;

#[derive(Clone)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    pub(crate) height: usize,
}

/// What happened below a node during an insert. Parents use this to pick a rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InsertResult {
    /// The key was already in the tree so nothing changed.
    Duplicate,
    /// The subtree was empty and now holds only the new key.
    NewLeaf,
    /// The key was inserted somewhere below this node. The `Ordering` is the result of comparing
    /// the inserted key against this node's key, i.e. which side the key went down.
    Below(Ordering),
}

impl<K> Node<K> {
    fn new_boxed(key: K) -> Box<Self> {
        Box::new(Node {
            height: 1,
            key,
            left: None,
            right: None,
        })
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    pub(crate) fn fix_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }

    /// The height of the left subtree minus the height of the right subtree. Positive means
    /// left-heavy.
    pub(crate) fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

/// Height of a subtree. Empty subtrees have a height of 0.
pub(crate) fn height<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

/// Balance factor of a subtree. Empty subtrees are perfectly balanced.
pub(crate) fn balance_factor<K>(link: &Link<K>) -> isize {
    link.as_ref().map_or(0, |n| n.balance_factor())
}

/// Rotate `z` to the left. This moves the right child up vertically and `z` down vertically.
/// Used when the right child is too tall. Without a right child there is nothing to lift and
/// `z` is returned as-is.
///
/// # Diagram
///
/// ```text
///    z                        y
///   / \                      / \
///  a   y      rotate ->     z   c
///     / \                  / \
///    b   c                a   b
/// ```
pub(crate) fn rotate_left<K>(mut z: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut y) = z.right.take() else {
        return z;
    };

    z.right = y.left.take();
    // `y`'s height depends on `z`'s so `z` goes first.
    z.fix_height();

    y.left = Some(z);
    y.fix_height();
    y
}

/// Rotate `y` to the right. The mirror image of [`rotate_left`].
///
/// # Diagram
///
/// ```text
///      y                    x
///     / \                  / \
///    x   c    rotate ->   a   y
///   / \                      / \
///  a   b                    b   c
/// ```
pub(crate) fn rotate_right<K>(mut y: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut x) = y.left.take() else {
        return y;
    };

    y.left = x.right.take();
    y.fix_height();

    x.right = Some(y);
    x.fix_height();
    x
}

/// Fixes a left child that is heavy on its right side: rotate the child left, then `node` right.
pub(crate) fn rotate_left_right<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    node.left = node.left.take().map(rotate_left);
    rotate_right(node)
}

/// Fixes a right child that is heavy on its left side: rotate the child right, then `node` left.
pub(crate) fn rotate_right_left<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    node.right = node.right.take().map(rotate_right);
    rotate_left(node)
}

/// Recomputes the height of `node` and rotates it if an insert below it broke the AVL invariant.
///
/// `child` is what the insert reported from the taller child. Because the tree was balanced
/// before the insert, the taller side is the side the key went down, so `child` tells us whether
/// the new key sits on the outer or the inner side of that child.
///
/// See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
pub(crate) fn rebalance_after_insert<K>(
    mut node: Box<Node<K>>,
    child: InsertResult,
) -> Box<Node<K>> {
    node.fix_height();
    let balance = node.balance_factor();

    let node = if balance > 1 {
        match child {
            InsertResult::Below(Ordering::Greater) => rotate_left_right(node),
            _ => rotate_right(node),
        }
    } else if balance < -1 {
        match child {
            InsertResult::Below(Ordering::Less) => rotate_right_left(node),
            _ => rotate_left(node),
        }
    } else {
        node
    };

    debug_check(&node);
    node
}

/// Recomputes the height of `node` and rotates it if a delete below it broke the AVL invariant.
///
/// Unlike inserts, the shape of the taller child isn't tied to any one key so we look at the
/// child's own balance factor to choose between a single and a double rotation.
pub(crate) fn rebalance_after_delete<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    node.fix_height();
    let balance = node.balance_factor();

    let node = if balance > 1 {
        if balance_factor(&node.left) >= 0 {
            rotate_right(node)
        } else {
            rotate_left_right(node)
        }
    } else if balance < -1 {
        if balance_factor(&node.right) <= 0 {
            rotate_left(node)
        } else {
            rotate_right_left(node)
        }
    } else {
        node
    };

    debug_check(&node);
    node
}

/// In debug builds, assert that `node` has a correct height and is balanced.
fn debug_check<K>(node: &Node<K>) {
    if cfg!(debug_assertions) {
        let left_height = height(&node.left);
        let right_height = height(&node.right);
        assert_eq!(node.height, left_height.max(right_height) + 1);
        assert!(left_height.abs_diff(right_height) <= 1);
    }
}

/// Inserts `key` into the subtree, returning the new subtree root and what happened.
pub(crate) fn insert<K, C>(link: Link<K>, key: K, cmp: &C) -> (Box<Node<K>>, InsertResult)
where
    C: Fn(&K, &K) -> Ordering,
{
    let Some(mut node) = link else {
        return (Node::new_boxed(key), InsertResult::NewLeaf);
    };

    let side = cmp(&key, &node.key);
    let child = match side {
        Ordering::Less => {
            let (left, child) = insert(node.left.take(), key, cmp);
            node.left = Some(left);
            child
        }
        Ordering::Greater => {
            let (right, child) = insert(node.right.take(), key, cmp);
            node.right = Some(right);
            child
        }
        Ordering::Equal => return (node, InsertResult::Duplicate),
    };

    if child == InsertResult::Duplicate {
        return (node, InsertResult::Duplicate);
    }

    (rebalance_after_insert(node, child), InsertResult::Below(side))
}

/// Deletes `key` from the subtree, returning the new subtree root and whether anything was
/// removed.
pub(crate) fn delete<K, C>(link: Link<K>, key: &K, cmp: &C) -> (Link<K>, bool)
where
    C: Fn(&K, &K) -> Ordering,
{
    let Some(mut node) = link else {
        return (None, false);
    };

    let removed = match cmp(key, &node.key) {
        Ordering::Less => {
            let (left, removed) = delete(node.left.take(), key, cmp);
            node.left = left;
            removed
        }
        Ordering::Greater => {
            let (right, removed) = delete(node.right.take(), key, cmp);
            node.right = right;
            removed
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, None) => return (None, true),
            (Some(child), None) | (None, Some(child)) => return (Some(child), true),
            // With two children the in-order successor's key moves into this node and the
            // successor's node is dropped instead.
            (Some(left), Some(right)) => {
                let (right, successor) = take_min(right);
                node.key = successor;
                node.left = Some(left);
                node.right = right;
                true
            }
        },
    };

    if !removed {
        return (Some(node), false);
    }

    (Some(rebalance_after_delete(node)), true)
}

/// Detaches the leftmost node of the subtree and returns the remaining subtree along with the
/// detached node's key. Every node on the way down is rebalanced on the way back up.
pub(crate) fn take_min<K>(mut node: Box<Node<K>>) -> (Link<K>, K) {
    match node.left.take() {
        None => {
            let Node { key, right, .. } = *node;
            (right, key)
        }
        Some(left) => {
            let (left, min) = take_min(left);
            node.left = left;
            (Some(rebalance_after_delete(node)), min)
        }
    }
}

/// Potentially finds the stored key equal to `key`.
pub(crate) fn search<'a, K, C>(mut link: &'a Link<K>, key: &K, cmp: &C) -> Option<&'a K>
where
    C: Fn(&K, &K) -> Ordering,
{
    while let Some(node) = link {
        link = match cmp(key, &node.key) {
            Ordering::Less => &node.left,
            Ordering::Equal => return Some(&node.key),
            Ordering::Greater => &node.right,
        };
    }

    None
}

/// The smallest key in the subtree.
pub(crate) fn first<K>(link: &Link<K>) -> Option<&K> {
    let mut node = link.as_deref()?;
    while let Some(left) = node.left.as_deref() {
        node = left;
    }
    Some(&node.key)
}

/// The largest key in the subtree.
pub(crate) fn last<K>(link: &Link<K>) -> Option<&K> {
    let mut node = link.as_deref()?;
    while let Some(right) = node.right.as_deref() {
        node = right;
    }
    Some(&node.key)
}

/// Walks the search path for `key` without touching the tree, failing if `key` can't be ordered
/// against itself or any key on the way.
///
/// Insert and delete only compare against keys on this path, so once this succeeds they can run
/// with [`partial_order`] without meeting an unordered pair.
pub(crate) fn check_comparable<K>(mut link: &Link<K>, key: &K) -> Result<(), Error>
where
    K: PartialOrd,
{
    // Catches NaN-like keys even when the tree is empty.
    key.partial_cmp(key).ok_or(Error::Incomparable)?;

    while let Some(node) = link {
        link = match key.partial_cmp(&node.key).ok_or(Error::Incomparable)? {
            Ordering::Less => &node.left,
            Ordering::Equal => return Ok(()),
            Ordering::Greater => &node.right,
        };
    }

    Ok(())
}

/// Total ordering over `PartialOrd` keys that [`check_comparable`] has already vetted.
pub(crate) fn partial_order<K>(a: &K, b: &K) -> Ordering
where
    K: PartialOrd,
{
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(key: i32) -> Box<Node<i32>> {
        Node::new_boxed(key)
    }

    fn branch(key: i32, left: Link<i32>, right: Link<i32>) -> Box<Node<i32>> {
        let mut node = Node::new_boxed(key);
        node.left = left;
        node.right = right;
        node.fix_height();
        node
    }

    fn keys(link: &Link<i32>, out: &mut Vec<i32>) {
        if let Some(n) = link {
            keys(&n.left, out);
            out.push(n.key);
            keys(&n.right, out);
        }
    }

    fn in_order(node: Box<Node<i32>>) -> Vec<i32> {
        let mut out = Vec::new();
        keys(&Some(node), &mut out);
        out
    }

    #[test]
    fn empty_subtrees_have_zero_height_and_balance() {
        let empty: Link<i32> = None;
        assert_eq!(height(&empty), 0);
        assert_eq!(balance_factor(&empty), 0);

        let node = leaf(1);
        assert_eq!(node.height, 1);
        assert_eq!(node.balance_factor(), 0);
    }

    #[test]
    fn balance_factor_is_left_minus_right() {
        let node = branch(2, Some(leaf(1)), None);
        assert_eq!(node.height, 2);
        assert_eq!(node.balance_factor(), 1);

        let node = branch(2, None, Some(leaf(3)));
        assert_eq!(node.balance_factor(), -1);
    }

    #[test]
    fn rotate_left_lifts_right_child() {
        // 1 -> 2 -> 3 leaning right.
        let z = branch(1, None, Some(branch(2, None, Some(leaf(3)))));
        let y = rotate_left(z);

        assert_eq!(y.key, 2);
        assert_eq!(y.height, 2);
        assert_eq!(y.left.as_ref().map(|n| (n.key, n.height)), Some((1, 1)));
        assert_eq!(y.right.as_ref().map(|n| (n.key, n.height)), Some((3, 1)));
        assert_eq!(in_order(y), [1, 2, 3]);
    }

    #[test]
    fn rotate_right_moves_inner_grandchild_across() {
        //       4              2
        //      / \            / \
        //     2   5    ->    1   4
        //    / \                / \
        //   1   3              3   5
        let y = branch(
            4,
            Some(branch(2, Some(leaf(1)), Some(leaf(3)))),
            Some(leaf(5)),
        );
        let x = rotate_right(y);

        assert_eq!(x.key, 2);
        assert_eq!(x.height, 3);
        let four = x.right.as_ref().unwrap();
        assert_eq!(four.key, 4);
        assert_eq!(four.height, 2);
        assert_eq!(four.left.as_ref().unwrap().key, 3);
        assert_eq!(in_order(x), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn rotating_without_a_child_is_a_no_op() {
        let node = rotate_left(leaf(1));
        assert_eq!((node.key, node.height), (1, 1));

        let node = rotate_right(leaf(1));
        assert_eq!((node.key, node.height), (1, 1));
    }

    #[test]
    fn double_rotations() {
        let node = rotate_left_right(branch(3, Some(branch(1, None, Some(leaf(2)))), None));
        assert_eq!(node.key, 2);
        assert_eq!(node.balance_factor(), 0);
        assert_eq!(in_order(node), [1, 2, 3]);

        let node = rotate_right_left(branch(1, None, Some(branch(3, Some(leaf(2)), None))));
        assert_eq!(node.key, 2);
        assert_eq!(node.balance_factor(), 0);
        assert_eq!(in_order(node), [1, 2, 3]);
    }

    #[test]
    fn insert_policy_uses_side_of_inserted_key() {
        // 3 <- 1 -> 2: the key 2 went right at the left child.
        let node = branch(3, Some(branch(1, None, Some(leaf(2)))), None);
        let node = rebalance_after_insert(node, InsertResult::Below(Ordering::Greater));
        assert_eq!(node.key, 2);

        // 3 <- 2 <- 1: the key 1 went left at the left child.
        let node = branch(3, Some(branch(2, Some(leaf(1)), None)), None);
        let node = rebalance_after_insert(node, InsertResult::Below(Ordering::Less));
        assert_eq!(node.key, 2);
        assert_eq!(in_order(node), [1, 2, 3]);
    }

    #[test]
    fn delete_policy_single_rotates_when_child_is_even() {
        // After deleting the right child of 4, the left child 2 has balance 0. Only the deletion
        // policy meets this shape; a single right rotation fixes it.
        //       4             2
        //      /             / \
        //     2      ->     1   4
        //    / \               /
        //   1   3             3
        let node = branch(4, Some(branch(2, Some(leaf(1)), Some(leaf(3)))), None);
        assert_eq!(node.balance_factor(), 2);

        let node = rebalance_after_delete(node);
        assert_eq!(node.key, 2);
        assert_eq!(node.height, 3);
        assert_eq!(node.balance_factor(), -1);
        assert_eq!(in_order(node), [1, 2, 3, 4]);
    }

    #[test]
    fn delete_policy_double_rotates_when_child_leans_inward() {
        let node = branch(1, None, Some(branch(3, Some(leaf(2)), None)));
        let node = rebalance_after_delete(node);
        assert_eq!(node.key, 2);
        assert_eq!(node.height, 2);
    }

    #[test]
    fn insert_reports_what_happened() {
        let (root, result) = insert(None, 5, &i32::cmp);
        assert_eq!(result, InsertResult::NewLeaf);

        let (root, result) = insert(Some(root), 3, &i32::cmp);
        assert_eq!(result, InsertResult::Below(Ordering::Less));

        let (root, result) = insert(Some(root), 3, &i32::cmp);
        assert_eq!(result, InsertResult::Duplicate);
        assert_eq!(in_order(root), [3, 5]);
    }

    #[test]
    fn two_child_delete_keeps_node_and_overwrites_key() {
        let root = branch(2, Some(leaf(1)), Some(branch(4, Some(leaf(3)), Some(leaf(5)))));
        let (root, removed) = delete(Some(root), &2, &i32::cmp);
        let root = root.unwrap();

        assert!(removed);
        assert_eq!(root.key, 3);
        assert_eq!(in_order(root), [1, 3, 4, 5]);
    }

    #[test]
    fn take_min_rebalances_on_the_way_up() {
        //   2
        //  / \
        // 1   3
        //      \
        //       4
        let root = branch(2, Some(leaf(1)), Some(branch(3, None, Some(leaf(4)))));
        let (root, min) = take_min(root);
        let root = root.unwrap();

        assert_eq!(min, 1);
        assert_eq!(root.key, 3);
        assert_eq!(root.height, 2);
        assert_eq!(in_order(root), [2, 3, 4]);
    }

    #[test]
    fn first_and_last() {
        let root = Some(branch(2, Some(leaf(1)), Some(branch(3, None, Some(leaf(4))))));
        assert_eq!(first(&root), Some(&1));
        assert_eq!(last(&root), Some(&4));
        assert_eq!(first::<i32>(&None), None);
    }

    #[test]
    fn check_comparable_rejects_nan_anywhere() {
        let empty: Link<f64> = None;
        assert_eq!(check_comparable(&empty, &f64::NAN), Err(Error::Incomparable));
        assert_eq!(check_comparable(&empty, &1.0), Ok(()));

        let (root, _) = insert(None, 1.0, &partial_order);
        let root = Some(root);
        assert_eq!(check_comparable(&root, &2.0), Ok(()));
        assert_eq!(check_comparable(&root, &f64::NAN), Err(Error::Incomparable));
    }
}

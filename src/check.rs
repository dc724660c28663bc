//! Full structural check of a tree, used by [`AvlSet::validate`](crate::AvlSet::validate).

use std::cmp::Ordering;

use crate::error::Violation;
use crate::node::Link;

/// Checks ordering, stored heights and balance of every node under `root`, and that `len`
/// matches the number of nodes.
pub(crate) fn validate<K>(root: &Link<K>, len: usize) -> Result<(), Violation>
where
    K: PartialOrd,
{
    let mut walk = Walk {
        position: 0,
        previous: None,
    };
    walk.visit(root)?;

    if walk.position != len {
        return Err(Violation::Length {
            reported: len,
            counted: walk.position,
        });
    }
    Ok(())
}

/// In-order walk state: how many nodes were seen and the last key seen.
struct Walk<'a, K> {
    position: usize,
    previous: Option<&'a K>,
}

impl<'a, K> Walk<'a, K>
where
    K: PartialOrd,
{
    /// Returns the real height of the subtree.
    fn visit(&mut self, link: &'a Link<K>) -> Result<usize, Violation> {
        let Some(node) = link else {
            return Ok(0);
        };

        let left_height = self.visit(&node.left)?;

        let position = self.position;
        if let Some(previous) = self.previous {
            if previous.partial_cmp(&node.key) != Some(Ordering::Less) {
                return Err(Violation::Unordered { position });
            }
        }
        self.previous = Some(&node.key);
        self.position += 1;

        let right_height = self.visit(&node.right)?;

        let expected = left_height.max(right_height) + 1;
        if node.height != expected {
            return Err(Violation::Height {
                position,
                stored: node.height,
                expected,
            });
        }

        let balance_factor = left_height as isize - right_height as isize;
        if balance_factor.abs() > 1 {
            return Err(Violation::Unbalanced {
                position,
                balance_factor,
            });
        }

        Ok(expected)
    }
}

use thiserror::Error;

/// Errors returned by the checked (`try_*`) operations on [`AvlSet`](crate::AvlSet).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The key has no ordering against itself or against a key already in the set (e.g. a
    /// floating point NaN). The set was left untouched.
    #[error("key cannot be ordered against the keys in the set")]
    Incomparable,
}

/// A broken structural invariant found by [`AvlSet::validate`](crate::AvlSet::validate).
///
/// Positions count nodes in ascending (in-order) order starting at 0.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A key is not strictly greater than the key before it.
    #[error("key at position {position} is not greater than the key before it")]
    Unordered {
        /// In-order position of the offending node.
        position: usize,
    },
    /// A node's stored height disagrees with its children's heights.
    #[error("node at position {position} stores height {stored} but should have {expected}")]
    Height {
        /// In-order position of the offending node.
        position: usize,
        /// The height kept in the node.
        stored: usize,
        /// One more than the taller child's height.
        expected: usize,
    },
    /// A node's children differ in height by more than one.
    #[error("node at position {position} has balance factor {balance_factor}")]
    Unbalanced {
        /// In-order position of the offending node.
        position: usize,
        /// Left height minus right height.
        balance_factor: isize,
    },
    /// The cached key count disagrees with the number of nodes.
    #[error("set reports {reported} keys but holds {counted}")]
    Length {
        /// The count the set keeps.
        reported: usize,
        /// The number of nodes actually reachable from the root.
        counted: usize,
    },
}

//! Error types for selection tree operations.
//!
//! Two families of errors exist:
//!
//! - [`SelectionTreeError`]: contract violations reported by the public API
//!   (a vacant participant where none was permitted, or an index outside
//!   `[0, len)`).
//! - [`InvariantViolation`]: the first broken structural invariant found by
//!   [`SelectionTree::check_invariants`](crate::tree::SelectionTree::check_invariants).
//!
//! An empty tree is not an error: [`winner`](crate::tree::SelectionTree::winner)
//! simply returns `None`.
//!
//! # Examples
//!
//! ```rust
//! use knockout::SelectionTreeError;
//! use knockout::tree::SelectionTree;
//!
//! let mut tree: SelectionTree<i32> = [1, 2, 3].into_iter().collect();
//! assert_eq!(
//!     tree.update(7, 10),
//!     Err(SelectionTreeError::IndexOutOfRange { index: 7, size: 3 })
//! );
//! ```

use thiserror::Error;

/// Errors returned by selection tree operations.
///
/// These describe caller contract violations. They are never transient, so
/// retrying the same call yields the same error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SelectionTreeError {
    /// A vacant entry was supplied at construction while vacancies were not
    /// permitted by the builder.
    #[error("participant at index {index} is vacant but vacancies are not allowed")]
    VacantParticipant {
        /// Position of the first vacant entry in the input.
        index: usize,
    },

    /// The participant index does not address a live participant.
    #[error("participant index {index} is out of range for a tree of size {size}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of live participants at the time of the call.
        size: usize,
    },
}

/// A structural invariant that does not hold.
///
/// Produced by the diagnostic walk; a correct tree never yields one. The
/// variants carry arena slot numbers so a failing test can point at the
/// offending node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum InvariantViolation {
    /// An internal node caches a champion other than the winner of its children.
    #[error("node {node} caches champion {cached} but its children elect {expected}")]
    StaleChampion {
        /// Arena slot of the internal node.
        node: usize,
        /// Champion currently cached.
        cached: usize,
        /// Champion recomputed from the children.
        expected: usize,
    },

    /// A node has exactly one child.
    #[error("node {node} has a single child")]
    MissingChild {
        /// Arena slot of the node.
        node: usize,
    },

    /// A child's parent link does not point back to the node that owns it.
    #[error("node {child} does not link back to its parent {parent}")]
    BrokenParentLink {
        /// Arena slot of the parent.
        parent: usize,
        /// Arena slot of the child.
        child: usize,
    },

    /// A leaf does not name itself as champion.
    #[error("leaf {node} does not champion itself")]
    ForeignLeafChampion {
        /// Arena slot of the leaf.
        node: usize,
    },

    /// The leaf storage length is not the next power of two of the size.
    #[error("leaf storage holds {actual} slots, expected {expected}")]
    CapacityMismatch {
        /// Current slot count.
        actual: usize,
        /// `size.next_power_of_two()`.
        expected: usize,
    },

    /// A slot below `size` is padding, or a slot at or above `size` is not.
    #[error("leaf slot {index} has the wrong occupancy")]
    SlotOccupancy {
        /// The offending slot.
        index: usize,
    },

    /// A leaf slot refers to a node that is not a leaf reachable from the root.
    #[error("leaf slot {index} refers to a node outside the tree")]
    DetachedLeaf {
        /// The offending slot.
        index: usize,
    },

    /// The number of reachable leaves differs from the recorded size.
    #[error("tree reaches {reachable} leaves but records size {size}")]
    SizeMismatch {
        /// Leaves reachable from the root.
        reachable: usize,
        /// Recorded size.
        size: usize,
    },

    /// The arena holds a different number of nodes than a tree of this size needs.
    #[error("arena holds {live} nodes, expected {expected}")]
    LeakedNodes {
        /// Live arena nodes.
        live: usize,
        /// `2 * size - 1`, or zero when empty.
        expected: usize,
    },

    /// Leaf depths differ by more than one level.
    #[error("leaf depths range from {min} to {max}")]
    Unbalanced {
        /// Shallowest leaf depth.
        min: usize,
        /// Deepest leaf depth.
        max: usize,
    },
}

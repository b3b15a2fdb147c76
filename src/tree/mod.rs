//! Tournament (selection) trees.
//!
//! This module provides the single-threaded core:
//!
//! - [`SelectionTree`]: complete binary tree caching the winner of every subtree
//! - [`SelectionTreeBuilder`]: comparator, vacancy policy and capacity settings
//! - [`Participant`]: a real value or an absent entry that loses every match
//! - [`Comparator`]: the total order deciding matches, with [`NaturalOrder`],
//!   [`Reversed`] and [`KeyOrder`]
//! - [`winner`]: the winner function derived from a comparator
//!
//! # Layout
//!
//! ```text
//!                  [9]              internal nodes cache the winning leaf
//!               /       \
//!            [9]         [7]
//!           /   \       /   \
//!         [5]   [9]   [7]    3      leaves n..2n in heap numbering
//!        /  \  /  \  /  \
//!       5   2 8   9 4   7
//! ```
//!
//! # Examples
//!
//! ```rust
//! use knockout::tree::SelectionTree;
//!
//! let mut tree: SelectionTree<i32> = [7].into_iter().collect();
//! assert_eq!(tree.winner(), Some(&7));
//!
//! tree.delete(0).unwrap();
//! assert_eq!(tree.len(), 0);
//! assert_eq!(tree.winner(), None);
//! ```

mod arena;
mod builder;
mod comparator;
mod iter;
mod participant;
mod position;
mod selection_tree;

pub use builder::SelectionTreeBuilder;
pub use comparator::{Comparator, KeyOrder, NaturalOrder, Reversed, winner};
pub use iter::{InOrder, Participants, Visit};
pub use participant::Participant;
pub use selection_tree::SelectionTree;

#[cfg(feature = "serde")]
mod serde_impl;

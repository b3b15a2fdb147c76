//! # knockout
//!
//! Tournament (selection) trees: a complete binary tree over a list of
//! participants where every internal node caches the winner of the match
//! between its two children, so the overall winner is always at the root.
//!
//! ## Overview
//!
//! - **Constant-time winner**: the root holds the winner of the whole tree
//! - **Logarithmic updates**: changing, inserting or deleting a participant
//!   replays only the matches on one root path
//! - **Pluggable order**: any [`Comparator`](tree::Comparator), including
//!   closures, decides who wins a match
//! - **Vacancies**: an absent participant loses every match without needing a
//!   sentinel value
//! - **Concurrency**: a locked wrapper whose readers see a consistent winner
//!   without blocking on writers
//!
//! ## Feature Flags
//!
//! - `concurrent` (default): [`ConcurrentSelectionTree`](concurrent::ConcurrentSelectionTree)
//! - `serde`: `Serialize` / `Deserialize` for [`SelectionTree`](tree::SelectionTree)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use knockout::prelude::*;
//!
//! let mut tree: SelectionTree<i32> = [5, 2, 8, 9, 4, 7, 3].into_iter().collect();
//! assert_eq!(tree.winner(), Some(&9));
//!
//! tree.update(3, 3).unwrap();
//! assert_eq!(tree.winner(), Some(&8));
//!
//! tree.insert(45);
//! assert_eq!(tree.winner(), Some(&45));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use knockout::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{InvariantViolation, SelectionTreeError};
    pub use crate::tree::*;

    #[cfg(feature = "concurrent")]
    pub use crate::concurrent::*;
}

pub mod error;
pub mod tree;

#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use error::{InvariantViolation, SelectionTreeError};

//! Thread-safe access to a selection tree.
//!
//! - [`ConcurrentSelectionTree`]: a [`SelectionTree`](crate::tree::SelectionTree)
//!   behind a reader/writer lock, publishing each new winner atomically
//! - [`ReadPath`]: whether readers use the published snapshot or the lock
//!
//! Writers are serialized. Readers never observe a partially propagated
//! update: the winner they see is the winner after some completed mutation.

mod read_path;
mod selection_tree;

pub use read_path::ReadPath;
pub use selection_tree::ConcurrentSelectionTree;

//! How readers obtain the current winner.

/// Strategy used by
/// [`ConcurrentSelectionTree::winner`](super::ConcurrentSelectionTree::winner).
///
/// Both strategies are linearizable with respect to writers: a reader sees
/// the winner as of some completed mutation, never an intermediate state.
///
/// # Examples
///
/// ```rust
/// use knockout::concurrent::{ConcurrentSelectionTree, ReadPath};
///
/// let tree = ConcurrentSelectionTree::from_iter([3, 1, 2]).with_read_path(ReadPath::Locked);
/// assert_eq!(tree.read_path(), ReadPath::Locked);
/// assert_eq!(tree.winner().as_deref(), Some(&3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReadPath {
    /// Load the winner published by the last writer. Takes no lock, so
    /// readers never wait on a writer.
    #[default]
    Snapshot,
    /// Take the shared lock and read the root of the tree. Readers wait for
    /// an in-flight writer and clone the winner on every call.
    Locked,
}

//! A selection tree shared between threads.
//!
//! [`ConcurrentSelectionTree`] wraps a [`SelectionTree`] in a single
//! reader/writer lock. Every mutation holds the write lock for its whole
//! duration, so no thread ever observes a half-updated ancestor chain.
//!
//! Before releasing the write lock, a writer publishes the new winner into an
//! atomically swapped slot. With [`ReadPath::Snapshot`] (the default) readers
//! load that slot and never touch the lock; with [`ReadPath::Locked`] they take
//! the shared lock instead.
//!
//! # Thread Safety
//!
//! `ConcurrentSelectionTree<T, C>` is `Send + Sync` when `T` and `C` are.
//! Winners are handed out as `Arc<T>`, so a reader may keep one alive after
//! writers have moved on.
//!
//! # Examples
//!
//! ```rust
//! use knockout::concurrent::ConcurrentSelectionTree;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let tree = Arc::new(ConcurrentSelectionTree::from_iter([5, 2, 8]));
//!
//! let writers: Vec<_> = (0..4)
//!     .map(|offset| {
//!         let tree = Arc::clone(&tree);
//!         thread::spawn(move || {
//!             tree.insert(100 + offset);
//!         })
//!     })
//!     .collect();
//! for writer in writers {
//!     writer.join().unwrap();
//! }
//!
//! assert_eq!(tree.len(), 7);
//! assert_eq!(tree.winner().as_deref(), Some(&103));
//! ```

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use parking_lot::RwLock;

use super::ReadPath;
use crate::error::{InvariantViolation, SelectionTreeError};
use crate::tree::{Comparator, NaturalOrder, Participant, SelectionTree};

/// A [`SelectionTree`] guarded by a reader/writer lock, with a lock-free
/// winner snapshot.
///
/// # Type Parameters
///
/// * `T` - The participant type. Winners are cloned into an `Arc` when
///   published, so mutation requires `T: Clone`.
/// * `C` - The [`Comparator`] deciding matches
pub struct ConcurrentSelectionTree<T, C = NaturalOrder> {
    tree: RwLock<SelectionTree<T, C>>,
    published: ArcSwapOption<T>,
    read_path: ReadPath,
}

static_assertions::assert_impl_all!(ConcurrentSelectionTree<i32>: Send, Sync);
static_assertions::assert_impl_all!(ConcurrentSelectionTree<String, crate::tree::Reversed<NaturalOrder>>: Send, Sync);

impl<T: Ord + Clone> ConcurrentSelectionTree<T, NaturalOrder> {
    /// Creates an empty tree where the greatest value wins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use knockout::concurrent::ConcurrentSelectionTree;
    ///
    /// let tree: ConcurrentSelectionTree<i32> = ConcurrentSelectionTree::new();
    /// assert!(tree.winner().is_none());
    ///
    /// tree.build([4, 6, 5]);
    /// assert_eq!(tree.winner().as_deref(), Some(&6));
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::from_tree(SelectionTree::new())
    }
}

impl<T: Clone, C: Comparator<T>> ConcurrentSelectionTree<T, C> {
    /// Creates an empty tree ordered by `comparator`.
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self::from_tree(SelectionTree::with_comparator(comparator))
    }

    /// Shares an existing tree, publishing its current winner.
    #[must_use]
    pub fn from_tree(tree: SelectionTree<T, C>) -> Self {
        let published = ArcSwapOption::new(tree.winner().cloned().map(Arc::new));
        Self {
            tree: RwLock::new(tree),
            published,
            read_path: ReadPath::default(),
        }
    }

    /// Selects how [`winner`](Self::winner) reads.
    #[must_use]
    pub const fn with_read_path(mut self, read_path: ReadPath) -> Self {
        self.read_path = read_path;
        self
    }

    /// Returns the configured read path.
    #[inline]
    pub const fn read_path(&self) -> ReadPath {
        self.read_path
    }

    // =========================================================================
    // Writers
    // =========================================================================

    /// Replaces every participant under the write lock. See
    /// [`SelectionTree::rebuild`].
    pub fn build<I>(&self, participants: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.write(|tree| tree.rebuild(participants));
    }

    /// Replaces every participant with `slots` under the write lock. See
    /// [`SelectionTree::rebuild_from_slots`].
    ///
    /// # Errors
    ///
    /// Returns [`SelectionTreeError::VacantParticipant`] if a slot is `None`
    /// and the tree does not allow vacancies; the tree is left unchanged.
    pub fn build_from_slots<I>(&self, slots: I) -> Result<(), SelectionTreeError>
    where
        I: IntoIterator<Item = Option<T>>,
    {
        self.write(|tree| tree.rebuild_from_slots(slots))
    }

    /// Replaces the participant at `index`. See [`SelectionTree::update`].
    ///
    /// # Errors
    ///
    /// Returns [`SelectionTreeError::IndexOutOfRange`] if `index >= len()`.
    pub fn update(&self, index: usize, value: T) -> Result<Participant<T>, SelectionTreeError> {
        self.write(|tree| tree.update(index, value))
    }

    /// Marks the participant at `index` as vacant. See [`SelectionTree::vacate`].
    ///
    /// # Errors
    ///
    /// Returns [`SelectionTreeError::IndexOutOfRange`] if `index >= len()`.
    pub fn vacate(&self, index: usize) -> Result<Participant<T>, SelectionTreeError> {
        self.write(|tree| tree.vacate(index))
    }

    /// Appends a participant and returns its index. See [`SelectionTree::insert`].
    pub fn insert(&self, value: T) -> usize {
        self.write(|tree| tree.insert(value))
    }

    /// Removes the participant at `index`. See [`SelectionTree::delete`].
    ///
    /// # Errors
    ///
    /// Returns [`SelectionTreeError::IndexOutOfRange`] if `index >= len()`.
    pub fn delete(&self, index: usize) -> Result<Participant<T>, SelectionTreeError> {
        self.write(|tree| tree.delete(index))
    }

    /// Removes every participant.
    pub fn clear(&self) {
        self.write(SelectionTree::clear);
    }

    /// Runs `operation` under the write lock and publishes the resulting
    /// winner before the lock is released.
    fn write<R>(&self, operation: impl FnOnce(&mut SelectionTree<T, C>) -> R) -> R {
        let mut tree = self.tree.write();
        let result = operation(&mut tree);
        self.published.store(tree.winner().cloned().map(Arc::new));
        tracing::trace!(size = tree.len(), "winner published");
        result
    }

    // =========================================================================
    // Readers
    // =========================================================================

    /// Returns the current winner, or `None` when there is none.
    ///
    /// Follows the configured [`ReadPath`].
    pub fn winner(&self) -> Option<Arc<T>> {
        match self.read_path {
            ReadPath::Snapshot => self.published.load_full(),
            ReadPath::Locked => self.tree.read().winner().cloned().map(Arc::new),
        }
    }

    /// Returns the number of participants.
    pub fn len(&self) -> usize {
        self.tree.read().len()
    }

    /// Returns `true` if there are no participants.
    pub fn is_empty(&self) -> bool {
        self.tree.read().is_empty()
    }

    /// Returns the number of leaf slots.
    pub fn capacity(&self) -> usize {
        self.tree.read().capacity()
    }

    /// Clones the participants in index order.
    pub fn participants(&self) -> Vec<Participant<T>> {
        self.tree.read().participants().cloned().collect()
    }

    /// Verifies the structural invariants under the read lock.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.tree.read().check_invariants()
    }

    /// Runs `inspect` against the tree while holding the read lock.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use knockout::concurrent::ConcurrentSelectionTree;
    ///
    /// let tree = ConcurrentSelectionTree::from_iter([3, 9, 4]);
    /// let leaf_count = tree.read(|tree| tree.in_order().filter(|visit| visit.is_leaf).count());
    /// assert_eq!(leaf_count, 3);
    /// ```
    pub fn read<R>(&self, inspect: impl FnOnce(&SelectionTree<T, C>) -> R) -> R {
        inspect(&self.tree.read())
    }

    /// Unwraps the inner tree.
    pub fn into_inner(self) -> SelectionTree<T, C> {
        self.tree.into_inner()
    }
}

impl<T: Ord + Clone> Default for ConcurrentSelectionTree<T, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> FromIterator<T> for ConcurrentSelectionTree<T, NaturalOrder> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_tree(iter.into_iter().collect())
    }
}

impl<T: Clone, C: Comparator<T>> From<SelectionTree<T, C>> for ConcurrentSelectionTree<T, C> {
    fn from(tree: SelectionTree<T, C>) -> Self {
        Self::from_tree(tree)
    }
}

impl<T: fmt::Debug, C> fmt::Debug for ConcurrentSelectionTree<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ConcurrentSelectionTree")
            .field("read_path", &self.read_path)
            .field("published", &self.published.load_full())
            .field("tree", &self.tree)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Reversed;
    use rstest::rstest;

    #[rstest]
    #[case(ReadPath::Snapshot)]
    #[case(ReadPath::Locked)]
    fn test_seven_participant_scenario(#[case] read_path: ReadPath) {
        let tree = ConcurrentSelectionTree::from_iter([5, 2, 8, 9, 4, 7, 3]).with_read_path(read_path);
        assert_eq!(tree.winner().as_deref(), Some(&9));

        tree.update(3, 3).unwrap();
        assert_eq!(tree.winner().as_deref(), Some(&8));

        tree.insert(45);
        assert_eq!(tree.winner().as_deref(), Some(&45));
        assert!(tree.check_invariants().is_ok());
    }

    #[rstest]
    #[case(ReadPath::Snapshot)]
    #[case(ReadPath::Locked)]
    fn test_single_participant_drains(#[case] read_path: ReadPath) {
        let tree = ConcurrentSelectionTree::from_iter([7]).with_read_path(read_path);
        assert_eq!(tree.winner().as_deref(), Some(&7));
        assert_eq!(tree.delete(0), Ok(Participant::Real(7)));
        assert_eq!(tree.len(), 0);
        assert!(tree.winner().is_none());
    }

    #[rstest]
    fn test_failed_write_keeps_snapshot() {
        let tree = ConcurrentSelectionTree::from_iter([1, 2]);
        assert!(tree.delete(5).is_err());
        assert_eq!(tree.winner().as_deref(), Some(&2));
    }

    #[rstest]
    fn test_build_from_slots_respects_policy() {
        let tree = ConcurrentSelectionTree::from_tree(
            SelectionTree::builder().allow_vacancies(true).empty(),
        );
        tree.build_from_slots([None, Some(4)]).unwrap();
        assert_eq!(tree.winner().as_deref(), Some(&4));
        assert_eq!(tree.participants(), vec![Participant::Absent, Participant::Real(4)]);
    }

    #[rstest]
    fn test_custom_comparator() {
        let tree = ConcurrentSelectionTree::with_comparator(Reversed(NaturalOrder));
        tree.build(["pear".to_string(), "apple".to_string(), "fig".to_string()]);
        assert_eq!(tree.winner().as_deref().map(String::as_str), Some("apple"));
    }

    #[rstest]
    fn test_clear_publishes_empty() {
        let tree = ConcurrentSelectionTree::from_iter([1, 2, 3]);
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.winner().is_none());
        assert_eq!(tree.capacity(), 1);
    }

    #[rstest]
    fn test_into_inner_returns_tree() {
        let tree = ConcurrentSelectionTree::from_iter([3, 1]);
        tree.insert(2);
        let inner = tree.into_inner();
        assert_eq!(inner.len(), 3);
        assert_eq!(inner.winner(), Some(&3));
    }
}

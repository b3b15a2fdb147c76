//! The single-threaded selection tree.
//!
//! [`SelectionTree`] keeps a complete binary tree whose leaves are the
//! participants and whose internal nodes cache the winner of their subtree.
//! The overall winner therefore sits at the root and is read in O(1).
//!
//! # Time Complexity
//!
//! | Operation              | Complexity                         |
//! |------------------------|------------------------------------|
//! | `build` / `rebuild`    | O(n)                               |
//! | `winner`               | O(1)                               |
//! | `update` / `vacate`    | O(log n)                           |
//! | `insert`               | O(log n) amortized                 |
//! | `delete`               | O(log n) tree work + O(n) slot shift |
//! | `get` / `len`          | O(1)                               |
//! | `check_invariants`     | O(n)                               |
//!
//! # Examples
//!
//! ```rust
//! use knockout::tree::SelectionTree;
//!
//! let mut tree: SelectionTree<i32> = [5, 2, 8, 9, 4, 7, 3].into_iter().collect();
//! assert_eq!(tree.winner(), Some(&9));
//!
//! tree.update(3, 3).unwrap();
//! assert_eq!(tree.winner(), Some(&8));
//!
//! tree.insert(45);
//! assert_eq!(tree.winner(), Some(&45));
//!
//! tree.delete(7).unwrap();
//! assert_eq!(tree.winner(), Some(&8));
//! assert!(tree.check_invariants().is_ok());
//! ```

use std::collections::HashSet;
use std::fmt;

use super::arena::{Arena, NodeId};
use super::iter::{InOrder, Participants};
use super::position::{self, Direction, Path};
use super::{Comparator, NaturalOrder, Participant, SelectionTreeBuilder};
use crate::error::{InvariantViolation, SelectionTreeError};

/// A tournament tree exposing the winning participant at its root.
///
/// Participants are addressed by index in `[0, len)`. Inserting appends at
/// index `len`; deleting shifts every later participant down by one, like
/// [`Vec::remove`].
///
/// # Type Parameters
///
/// * `T` - The participant type
/// * `C` - The [`Comparator`] deciding matches (defaults to [`NaturalOrder`],
///   where the greatest value wins)
///
/// # Examples
///
/// ```rust
/// use knockout::tree::{NaturalOrder, Reversed, SelectionTree};
///
/// let mut tree = SelectionTree::with_comparator(Reversed(NaturalOrder));
/// tree.insert(30);
/// tree.insert(10);
/// tree.insert(20);
/// assert_eq!(tree.winner(), Some(&10));
/// assert_eq!(tree.len(), 3);
/// ```
#[derive(Clone)]
pub struct SelectionTree<T, C = NaturalOrder> {
    arena: Arena<T>,
    root: Option<NodeId>,
    /// Participant index to leaf node. Always `size.next_power_of_two()` long;
    /// slots at or above `size` are padding.
    leaves: Vec<Option<NodeId>>,
    size: usize,
    comparator: C,
    allow_vacancies: bool,
}

impl<T: Ord> SelectionTree<T, NaturalOrder> {
    /// Creates an empty tree where the greatest value wins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use knockout::tree::SelectionTree;
    ///
    /// let tree: SelectionTree<u32> = SelectionTree::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.winner(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T> SelectionTree<T, NaturalOrder> {
    /// Returns a builder for configuring the comparator, vacancy policy and
    /// capacity of a new tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use knockout::tree::SelectionTree;
    ///
    /// let tree = SelectionTree::builder()
    ///     .allow_vacancies(true)
    ///     .build_from_slots([Some(3), None, Some(8)])
    ///     .unwrap();
    /// assert_eq!(tree.winner(), Some(&8));
    /// assert_eq!(tree.get(1), None);
    /// ```
    #[must_use]
    pub const fn builder() -> SelectionTreeBuilder<T, NaturalOrder> {
        SelectionTreeBuilder::new()
    }
}

impl<T, C: Comparator<T>> SelectionTree<T, C> {
    /// Creates an empty tree ordered by `comparator`.
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self::from_parts(comparator, false, 0)
    }

    pub(crate) fn from_parts(comparator: C, allow_vacancies: bool, capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity.saturating_mul(2)),
            root: None,
            leaves: vec![None],
            size: 0,
            comparator,
            allow_vacancies,
        }
    }

    /// Returns the comparator deciding matches.
    #[inline]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns `true` if vacant slots are accepted by
    /// [`rebuild_from_slots`](Self::rebuild_from_slots).
    #[inline]
    pub const fn allows_vacancies(&self) -> bool {
        self.allow_vacancies
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Replaces every participant with `participants`, keeping the comparator.
    ///
    /// The leaves are created first and then folded bottom-up, level by level,
    /// so the whole tree is built in O(n).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use knockout::tree::SelectionTree;
    ///
    /// let mut tree: SelectionTree<i32> = [1, 2].into_iter().collect();
    /// tree.rebuild([7, 3, 5]);
    /// assert_eq!(tree.len(), 3);
    /// assert_eq!(tree.winner(), Some(&7));
    /// ```
    pub fn rebuild<I>(&mut self, participants: I)
    where
        I: IntoIterator<Item = T>,
    {
        let participants = participants.into_iter().map(Participant::Real).collect();
        self.fold(participants);
    }

    /// Replaces every participant with `slots`, where `None` marks a vacant
    /// participant that loses every match.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionTreeError::VacantParticipant`] if a slot is `None`
    /// and the tree was not configured to allow vacancies. The tree is left
    /// unchanged in that case.
    pub fn rebuild_from_slots<I>(&mut self, slots: I) -> Result<(), SelectionTreeError>
    where
        I: IntoIterator<Item = Option<T>>,
    {
        let participants = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| match slot {
                Some(value) => Ok(Participant::Real(value)),
                None if self.allow_vacancies => Ok(Participant::Absent),
                None => Err(SelectionTreeError::VacantParticipant { index }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.fold(participants);
        Ok(())
    }

    fn fold(&mut self, participants: Vec<Participant<T>>) {
        let leaf_count = participants.len();
        self.arena.clear();
        self.root = None;
        self.size = leaf_count;
        self.leaves = vec![None; leaf_count.next_power_of_two()];

        if leaf_count > 0 {
            let mut positions: Vec<Option<NodeId>> = vec![None; 2 * leaf_count];
            for (offset, participant) in participants.into_iter().enumerate() {
                let leaf = self.arena.alloc_leaf(participant);
                positions[position::build_position(offset, leaf_count)] = Some(leaf);
                self.leaves[offset] = Some(leaf);
            }
            for position in (1..leaf_count).rev() {
                let (Some(left), Some(right)) = (positions[2 * position], positions[2 * position + 1])
                else {
                    unreachable!("heap position {position} is missing a child");
                };
                let parent = self.arena.alloc_internal(left, right);
                self.refresh(parent);
                positions[position] = Some(parent);
            }
            self.root = positions[1];
        }

        tracing::debug!(
            size = self.size,
            capacity = self.capacity(),
            "selection tree built"
        );
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the winning participant, or `None` if the tree is empty or
    /// every participant is vacant.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    pub fn winner(&self) -> Option<&T> {
        let champion = self.arena[self.root?].champion;
        self.arena[champion].participant.as_real()
    }

    /// Returns the index of the winning participant.
    ///
    /// # Complexity
    ///
    /// O(n): the leaf slots are scanned for the champion.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use knockout::tree::SelectionTree;
    ///
    /// let tree: SelectionTree<i32> = [5, 2, 8, 9, 4].into_iter().collect();
    /// assert_eq!(tree.winner_index(), Some(3));
    /// ```
    pub fn winner_index(&self) -> Option<usize> {
        let champion = self.arena[self.root?].champion;
        if self.arena[champion].participant.is_absent() {
            return None;
        }
        self.leaves[..self.size]
            .iter()
            .position(|slot| *slot == Some(champion))
    }

    /// Returns the number of participants.
    #[inline]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the tree has no participants.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of leaf slots, always `len().next_power_of_two()`.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.leaves.len()
    }

    /// Returns the value at `index`, or `None` if the index is out of range or
    /// the participant is vacant.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.participant(index)?.as_real()
    }

    /// Returns the participant slot at `index`.
    pub fn participant(&self, index: usize) -> Option<&Participant<T>> {
        if index >= self.size {
            return None;
        }
        let leaf = self.leaves[index]?;
        Some(&self.arena[leaf].participant)
    }

    /// Iterates over the participants in index order.
    pub fn participants(&self) -> Participants<'_, T> {
        Participants::new(&self.arena, &self.leaves[..self.size])
    }

    /// Walks the tree in order, reporting every node with its depth. Internal
    /// nodes report the participant currently winning their subtree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use knockout::tree::{Participant, SelectionTree};
    ///
    /// let tree: SelectionTree<i32> = [4, 9].into_iter().collect();
    /// let walk: Vec<(usize, Participant<&i32>)> = tree
    ///     .in_order()
    ///     .map(|visit| (visit.depth, visit.participant.as_ref()))
    ///     .collect();
    /// assert_eq!(
    ///     walk,
    ///     vec![
    ///         (1, Participant::Real(&4)),
    ///         (0, Participant::Real(&9)),
    ///         (1, Participant::Real(&9)),
    ///     ]
    /// );
    /// ```
    pub fn in_order(&self) -> InOrder<'_, T> {
        InOrder::new(&self.arena, self.root)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Replaces the participant at `index` with `value` and returns the
    /// previous participant.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionTreeError::IndexOutOfRange`] if `index >= len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn update(&mut self, index: usize, value: T) -> Result<Participant<T>, SelectionTreeError> {
        self.replace(index, Participant::Real(value))
    }

    /// Marks the participant at `index` as vacant, so it loses every match,
    /// and returns the previous participant. The slot keeps its index.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionTreeError::IndexOutOfRange`] if `index >= len()`.
    pub fn vacate(&mut self, index: usize) -> Result<Participant<T>, SelectionTreeError> {
        self.replace(index, Participant::Absent)
    }

    fn replace(
        &mut self,
        index: usize,
        participant: Participant<T>,
    ) -> Result<Participant<T>, SelectionTreeError> {
        let leaf = self.leaf(index)?;
        let previous = std::mem::replace(&mut self.arena[leaf].participant, participant);
        self.propagate(self.arena[leaf].parent);
        tracing::trace!(index, "participant replaced");
        Ok(previous)
    }

    /// Appends `value` as a new participant and returns its index.
    ///
    /// The leaf at heap position `len()` is split into an internal node
    /// pairing it with the new leaf, which keeps the tree complete. The leaf
    /// slots double when `len()` passes a power of two.
    ///
    /// # Complexity
    ///
    /// O(log n) amortized
    pub fn insert(&mut self, value: T) -> usize {
        let index = self.size;
        let leaf = self.arena.alloc_leaf(Participant::Real(value));

        if self.root.is_some() {
            let split = self.node_at(position::split_position(self.size));
            let split_parent = self.arena[split].parent;
            let joint = self.arena.alloc_internal(split, leaf);
            self.replace_child(split_parent, split, joint);
            self.propagate(Some(joint));
        } else {
            self.root = Some(leaf);
        }

        self.size += 1;
        if self.size > self.leaves.len() {
            let capacity = self.size.next_power_of_two();
            self.leaves.resize(capacity, None);
            tracing::debug!(size = self.size, capacity, "leaf slots grown");
        }
        self.leaves[index] = Some(leaf);

        tracing::trace!(index, size = self.size, "participant inserted");
        index
    }

    /// Removes the participant at `index` and returns it. Later participants
    /// shift down by one index.
    ///
    /// The structurally last leaf is detached and its sibling is promoted into
    /// their parent's place. If the removed participant was elsewhere, the
    /// detached leaf then takes over the removed leaf's position.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionTreeError::IndexOutOfRange`] if `index >= len()`.
    ///
    /// # Panics
    ///
    /// Panics only if the node links are corrupted, which
    /// [`check_invariants`](Self::check_invariants) would report first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use knockout::tree::{Participant, SelectionTree};
    ///
    /// let mut tree: SelectionTree<i32> = [7].into_iter().collect();
    /// assert_eq!(tree.delete(0), Ok(Participant::Real(7)));
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.winner(), None);
    /// ```
    pub fn delete(&mut self, index: usize) -> Result<Participant<T>, SelectionTreeError> {
        let victim = self.leaf(index)?;

        if self.size == 1 {
            let removed = self.arena.free(victim);
            self.clear();
            return Ok(removed);
        }

        let last = self.node_at(position::last_leaf_position(self.size));
        let joint = self.arena[last]
            .parent
            .expect("the last leaf of a tree with two or more leaves has a parent");
        let sibling = self
            .other_child(joint, last)
            .expect("internal nodes have two children");

        let grandparent = self.arena[joint].parent;
        self.replace_child(grandparent, joint, sibling);
        self.arena.free(joint);
        self.arena[last].parent = None;

        if victim != last {
            let victim_parent = self.arena[victim].parent;
            self.replace_child(victim_parent, victim, last);
        }
        let removed = self.arena.free(victim);

        if victim != last {
            self.propagate(self.arena[last].parent);
        }
        if sibling != victim {
            self.propagate(self.arena[sibling].parent);
        }

        self.leaves.remove(index);
        self.size -= 1;
        let capacity = self.size.next_power_of_two();
        if capacity < self.leaves.len() {
            tracing::debug!(size = self.size, capacity, "leaf slots shrunk");
        }
        self.leaves.resize(capacity, None);

        tracing::trace!(index, size = self.size, "participant deleted");
        Ok(removed)
    }

    /// Removes every participant, keeping the comparator.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.leaves = vec![None];
        self.size = 0;
        tracing::debug!("selection tree cleared");
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Returns the shallowest and deepest leaf depths, or `None` when empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use knockout::tree::SelectionTree;
    ///
    /// let tree: SelectionTree<i32> = (0..5).collect();
    /// assert_eq!(tree.depth_range(), Some((2, 3)));
    /// ```
    pub fn depth_range(&self) -> Option<(usize, usize)> {
        self.in_order()
            .filter(|visit| visit.is_leaf)
            .map(|visit| visit.depth)
            .fold(None, |range, depth| match range {
                None => Some((depth, depth)),
                Some((min, max)) => Some((min.min(depth), max.max(depth))),
            })
    }

    /// Verifies every structural invariant and returns the first violation.
    ///
    /// Intended for tests and debugging; it walks the whole tree.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let expected_capacity = self.size.next_power_of_two();
        if self.leaves.len() != expected_capacity {
            return Err(InvariantViolation::CapacityMismatch {
                actual: self.leaves.len(),
                expected: expected_capacity,
            });
        }
        if let Some(index) = self
            .leaves
            .iter()
            .enumerate()
            .position(|(index, slot)| slot.is_some() != (index < self.size))
        {
            return Err(InvariantViolation::SlotOccupancy { index });
        }

        let mut reachable = HashSet::new();
        let mut depths: Option<(usize, usize)> = None;
        let mut pending: Vec<(NodeId, usize)> = self.root.into_iter().map(|root| (root, 0)).collect();
        while let Some((id, depth)) = pending.pop() {
            let node = &self.arena[id];
            match (node.left, node.right) {
                (None, None) => {
                    if node.champion != id {
                        return Err(InvariantViolation::ForeignLeafChampion { node: id.index() });
                    }
                    reachable.insert(id);
                    depths = Some(depths.map_or((depth, depth), |(min, max)| {
                        (min.min(depth), max.max(depth))
                    }));
                }
                (Some(left), Some(right)) => {
                    for child in [left, right] {
                        if self.arena[child].parent != Some(id) {
                            return Err(InvariantViolation::BrokenParentLink {
                                parent: id.index(),
                                child: child.index(),
                            });
                        }
                        pending.push((child, depth + 1));
                    }
                    let expected = self.match_winner(left, right);
                    if node.champion != expected {
                        return Err(InvariantViolation::StaleChampion {
                            node: id.index(),
                            cached: node.champion.index(),
                            expected: expected.index(),
                        });
                    }
                }
                _ => return Err(InvariantViolation::MissingChild { node: id.index() }),
            }
        }

        if reachable.len() != self.size {
            return Err(InvariantViolation::SizeMismatch {
                reachable: reachable.len(),
                size: self.size,
            });
        }
        let expected_nodes = (2 * self.size).saturating_sub(1);
        if self.arena.len() != expected_nodes {
            return Err(InvariantViolation::LeakedNodes {
                live: self.arena.len(),
                expected: expected_nodes,
            });
        }
        for (index, slot) in self.leaves[..self.size].iter().enumerate() {
            if !slot.is_some_and(|leaf| reachable.remove(&leaf)) {
                return Err(InvariantViolation::DetachedLeaf { index });
            }
        }
        if let Some((min, max)) = depths
            && max - min > 1
        {
            return Err(InvariantViolation::Unbalanced { min, max });
        }
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn leaf(&self, index: usize) -> Result<NodeId, SelectionTreeError> {
        self.leaves
            .get(index)
            .copied()
            .flatten()
            .filter(|_| index < self.size)
            .ok_or(SelectionTreeError::IndexOutOfRange {
                index,
                size: self.size,
            })
    }

    /// Node at a 1-based heap position.
    fn node_at(&self, position: usize) -> NodeId {
        let mut current = self.root.expect("heap positions exist only in a non-empty tree");
        for direction in Path::to(position) {
            let node = &self.arena[current];
            current = match direction {
                Direction::Left => node.left,
                Direction::Right => node.right,
            }
            .unwrap_or_else(|| panic!("heap position {position} lies outside the tree"));
        }
        current
    }

    fn other_child(&self, parent: NodeId, child: NodeId) -> Option<NodeId> {
        let node = &self.arena[parent];
        if node.left == Some(child) {
            node.right
        } else {
            node.left
        }
    }

    /// Puts `new` where `old` hangs below `parent`, or at the root when
    /// `parent` is `None`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) {
        match parent {
            Some(parent) => {
                let node = &mut self.arena[parent];
                if node.left == Some(old) {
                    node.left = Some(new);
                } else {
                    node.right = Some(new);
                }
            }
            None => self.root = Some(new),
        }
        self.arena[new].parent = parent;
    }

    fn match_winner(&self, left: NodeId, right: NodeId) -> NodeId {
        let left_champion = self.arena[left].champion;
        let right_champion = self.arena[right].champion;
        if self.comparator.prefers_left(
            &self.arena[left_champion].participant,
            &self.arena[right_champion].participant,
        ) {
            left_champion
        } else {
            right_champion
        }
    }

    /// Recomputes the cached champion of an internal node from its children.
    fn refresh(&mut self, id: NodeId) {
        let node = &self.arena[id];
        if let (Some(left), Some(right)) = (node.left, node.right) {
            self.arena[id].champion = self.match_winner(left, right);
        }
    }

    /// Refreshes `start` and every ancestor up to the root.
    fn propagate(&mut self, start: Option<NodeId>) {
        let mut current = start;
        while let Some(id) = current {
            self.refresh(id);
            current = self.arena[id].parent;
        }
    }
}

impl<T: Ord> Default for SelectionTree<T, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> FromIterator<T> for SelectionTree<T, C>
where
    C: Comparator<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::with_comparator(C::default());
        tree.rebuild(iter);
        tree
    }
}

impl<T, C: Comparator<T>> Extend<T> for SelectionTree<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for SelectionTree<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let participants: Vec<&Participant<T>> = self.leaves[..self.size]
            .iter()
            .flatten()
            .map(|leaf| &self.arena[*leaf].participant)
            .collect();
        let winner = self
            .root
            .map(|root| &self.arena[self.arena[root].champion].participant);
        formatter
            .debug_struct("SelectionTree")
            .field("size", &self.size)
            .field("capacity", &self.leaves.len())
            .field("winner", &winner)
            .field("participants", &participants)
            .finish_non_exhaustive()
    }
}

/// Renders the tree sideways, one node per line, indented by depth. Vacant
/// participants render as `-`.
///
/// ```rust
/// use knockout::tree::SelectionTree;
///
/// let tree: SelectionTree<i32> = [4, 9, 1].into_iter().collect();
/// assert_eq!(tree.to_string(), "    4\n  9\n    9\n9\n  1\n");
/// ```
impl<T: fmt::Display, C: Comparator<T>> fmt::Display for SelectionTree<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for visit in self.in_order() {
            let indent = visit.depth * 2;
            match visit.participant {
                Participant::Real(value) => writeln!(formatter, "{:indent$}{value}", "")?,
                Participant::Absent => writeln!(formatter, "{:indent$}-", "")?,
            }
        }
        Ok(())
    }
}

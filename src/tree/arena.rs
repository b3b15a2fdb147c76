//! Node storage for the selection tree.
//!
//! Nodes live in a single `Vec` and refer to each other by [`NodeId`]. Parent
//! and child links are plain indices, so the cyclic parent/child relation needs
//! no reference counting and the whole tree is dropped in one deallocation.
//! Freed slots are recycled through a free list.

use super::Participant;

/// Index of a node inside an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Raw slot number, used in diagnostics.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A tree node.
///
/// Leaves hold a participant and champion themselves. Internal nodes hold
/// [`Participant::Absent`] and cache the id of the winning leaf below them.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub participant: Participant<T>,
    pub champion: NodeId,
    pub parent: Option<NodeId>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl<T> Node<T> {
    #[inline]
    pub const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

/// Slot storage with a free list.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    occupied: usize,
}

impl<T> Arena<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            occupied: 0,
        }
    }

    /// Number of live nodes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.occupied
    }

    /// Allocates a leaf holding `participant`.
    pub fn alloc_leaf(&mut self, participant: Participant<T>) -> NodeId {
        let id = self.next_id();
        self.place(Node {
            participant,
            champion: id,
            parent: None,
            left: None,
            right: None,
        })
    }

    /// Allocates an internal node over `left` and `right` and points both
    /// children at it. The champion is a placeholder until the caller refreshes it.
    pub fn alloc_internal(&mut self, left: NodeId, right: NodeId) -> NodeId {
        let id = self.place(Node {
            participant: Participant::Absent,
            champion: left,
            parent: None,
            left: Some(left),
            right: Some(right),
        });
        self[left].parent = Some(id);
        self[right].parent = Some(id);
        id
    }

    /// Frees a node and returns its participant.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not occupied.
    pub fn free(&mut self, id: NodeId) -> Participant<T> {
        let slot = std::mem::replace(
            &mut self.slots[id.0],
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        match slot {
            Slot::Occupied(node) => {
                self.free_head = Some(id.0);
                self.occupied -= 1;
                node.participant
            }
            Slot::Vacant { .. } => panic!("arena slot {} freed twice", id.0),
        }
    }

    /// Drops every node at once.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.occupied = 0;
    }

    const fn next_id(&self) -> NodeId {
        match self.free_head {
            Some(index) => NodeId(index),
            None => NodeId(self.slots.len()),
        }
    }

    fn place(&mut self, node: Node<T>) -> NodeId {
        self.occupied += 1;
        if let Some(index) = self.free_head {
            if let Slot::Vacant { next_free } = self.slots[index] {
                self.free_head = next_free;
            }
            self.slots[index] = Slot::Occupied(node);
            NodeId(index)
        } else {
            self.slots.push(Slot::Occupied(node));
            NodeId(self.slots.len() - 1)
        }
    }
}

impl<T> std::ops::Index<NodeId> for Arena<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Self::Output {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("arena slot {} is vacant", id.0),
        }
    }
}

impl<T> std::ops::IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("arena slot {} is vacant", id.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_alloc_leaf_champions_itself() {
        let mut arena = Arena::with_capacity(4);
        let leaf = arena.alloc_leaf(Participant::Real(1));
        assert_eq!(arena[leaf].champion, leaf);
        assert!(arena[leaf].is_leaf());
        assert_eq!(arena.len(), 1);
    }

    #[rstest]
    fn test_alloc_internal_links_children() {
        let mut arena = Arena::with_capacity(4);
        let left = arena.alloc_leaf(Participant::Real(1));
        let right = arena.alloc_leaf(Participant::Real(2));
        let parent = arena.alloc_internal(left, right);
        assert_eq!(arena[left].parent, Some(parent));
        assert_eq!(arena[right].parent, Some(parent));
        assert!(!arena[parent].is_leaf());
    }

    #[rstest]
    fn test_free_recycles_slots() {
        let mut arena = Arena::with_capacity(4);
        let first = arena.alloc_leaf(Participant::Real('a'));
        let second = arena.alloc_leaf(Participant::Real('b'));
        assert_eq!(arena.free(first), Participant::Real('a'));
        assert_eq!(arena.len(), 1);

        let reused = arena.alloc_leaf(Participant::Real('c'));
        assert_eq!(reused, first);
        assert_eq!(arena[reused].champion, reused);
        assert_eq!(arena[second].participant, Participant::Real('b'));
        assert_eq!(arena.len(), 2);
    }

    #[rstest]
    #[should_panic(expected = "freed twice")]
    fn test_double_free_panics() {
        let mut arena = Arena::with_capacity(4);
        let leaf = arena.alloc_leaf(Participant::Real(0));
        arena.free(leaf);
        arena.free(leaf);
    }
}

//! Iterators over a selection tree.

use std::iter::FusedIterator;

use super::Participant;
use super::arena::{Arena, NodeId};

/// A node reported by [`InOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit<'a, T> {
    /// Distance from the root.
    pub depth: usize,
    /// `true` for participant leaves, `false` for internal nodes.
    pub is_leaf: bool,
    /// The leaf's participant, or the participant winning an internal node's
    /// subtree.
    pub participant: &'a Participant<T>,
}

/// In-order walk over every node of a tree.
///
/// Created by [`SelectionTree::in_order`](super::SelectionTree::in_order).
pub struct InOrder<'a, T> {
    arena: &'a Arena<T>,
    stack: Vec<(NodeId, usize)>,
    next: Option<(NodeId, usize)>,
}

impl<'a, T> InOrder<'a, T> {
    pub(crate) const fn new(arena: &'a Arena<T>, root: Option<NodeId>) -> Self {
        Self {
            arena,
            stack: Vec::new(),
            next: match root {
                Some(root) => Some((root, 0)),
                None => None,
            },
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = Visit<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, depth)) = self.next {
            self.stack.push((id, depth));
            self.next = self.arena[id].left.map(|left| (left, depth + 1));
        }
        let (id, depth) = self.stack.pop()?;
        let node = &self.arena[id];
        self.next = node.right.map(|right| (right, depth + 1));
        Some(Visit {
            depth,
            is_leaf: node.is_leaf(),
            participant: &self.arena[node.champion].participant,
        })
    }
}

impl<T> FusedIterator for InOrder<'_, T> {}

/// Iterator over participants in index order.
///
/// Created by [`SelectionTree::participants`](super::SelectionTree::participants).
pub struct Participants<'a, T> {
    arena: &'a Arena<T>,
    slots: std::slice::Iter<'a, Option<NodeId>>,
}

impl<'a, T> Participants<'a, T> {
    pub(crate) fn new(arena: &'a Arena<T>, slots: &'a [Option<NodeId>]) -> Self {
        Self {
            arena,
            slots: slots.iter(),
        }
    }
}

impl<'a, T> Iterator for Participants<'a, T> {
    type Item = &'a Participant<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let leaf = (*self.slots.next()?)?;
        Some(&self.arena[leaf].participant)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl<T> DoubleEndedIterator for Participants<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let leaf = (*self.slots.next_back()?)?;
        Some(&self.arena[leaf].participant)
    }
}

impl<T> ExactSizeIterator for Participants<'_, T> {}

impl<T> FusedIterator for Participants<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::tree::SelectionTree;
    use rstest::rstest;

    #[rstest]
    fn test_in_order_on_empty_tree() {
        let tree: SelectionTree<i32> = SelectionTree::new();
        assert_eq!(tree.in_order().count(), 0);
    }

    #[rstest]
    fn test_in_order_visits_every_node() {
        let tree: SelectionTree<i32> = (0..6).collect();
        assert_eq!(tree.in_order().count(), 11);
        assert_eq!(tree.in_order().filter(|visit| visit.is_leaf).count(), 6);
    }

    #[rstest]
    fn test_participants_reverse() {
        let tree: SelectionTree<i32> = [1, 2, 3].into_iter().collect();
        let reversed: Vec<i32> = tree
            .participants()
            .rev()
            .filter_map(|participant| participant.as_real().copied())
            .collect();
        assert_eq!(reversed, vec![3, 2, 1]);
        assert_eq!(tree.participants().len(), 3);
    }
}

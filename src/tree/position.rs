//! Heap positions of a complete tournament tree.
//!
//! A tree with `n` leaves always has the shape of a binary heap with `2n - 1`
//! nodes. Positions are 1-based: the root is `1`, the children of `p` are `2p`
//! and `2p + 1`, internal nodes occupy `1..n` and leaves occupy `n..2n`.
//!
//! Growing or shrinking the tree by one leaf only touches the tail of that
//! numbering:
//!
//! ```text
//! insert: leaf at position n splits into (2n, 2n + 1)
//! delete: leaf at 2n - 1 is removed, its sibling 2n - 2 moves up to n - 1
//! ```
//!
//! Nodes do not store their position. Instead a position is reached from the
//! root by reading its bits below the leading one, most significant first:
//! `0` steps left and `1` steps right.

/// One step of a root-to-node path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Iterator over the steps leading from the root to a heap position.
#[derive(Debug, Clone)]
pub struct Path {
    position: usize,
    remaining: u32,
}

impl Path {
    /// Path to `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is zero.
    pub const fn to(position: usize) -> Self {
        Self {
            position,
            remaining: position.ilog2(),
        }
    }
}

impl Iterator for Path {
    type Item = Direction;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        if (self.position >> self.remaining) & 1 == 0 {
            Some(Direction::Left)
        } else {
            Some(Direction::Right)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Path {}

/// Position of the leaf that a new participant splits when the tree holds
/// `leaf_count` leaves.
#[inline]
pub const fn split_position(leaf_count: usize) -> usize {
    leaf_count
}

/// Position of the structurally last leaf of a tree with `leaf_count` leaves.
#[inline]
pub const fn last_leaf_position(leaf_count: usize) -> usize {
    2 * leaf_count - 1
}

/// Position assigned to the `offset`-th participant when a tree of
/// `leaf_count` leaves is built in one pass.
///
/// Leaves are laid out left to right: first the bottom level (positions
/// `2^d..2n`), then the leaves one level up (positions `n..2^d`), so that an
/// in-order walk of a freshly built tree visits participants in input order.
pub const fn build_position(offset: usize, leaf_count: usize) -> usize {
    let deepest_level_start = 1usize << last_leaf_position(leaf_count).ilog2();
    let deepest_level_count = 2 * leaf_count - deepest_level_start;
    if offset < deepest_level_count {
        deepest_level_start + offset
    } else {
        leaf_count + (offset - deepest_level_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_path_to_root_is_empty() {
        assert_eq!(Path::to(1).count(), 0);
    }

    #[rstest]
    #[case(2, vec![Direction::Left])]
    #[case(3, vec![Direction::Right])]
    #[case(5, vec![Direction::Left, Direction::Right])]
    #[case(13, vec![Direction::Right, Direction::Left, Direction::Right])]
    fn test_path_follows_bits(#[case] position: usize, #[case] expected: Vec<Direction>) {
        assert_eq!(Path::to(position).collect::<Vec<_>>(), expected);
    }

    #[rstest]
    fn test_path_len_is_depth() {
        assert_eq!(Path::to(13).len(), 3);
    }

    #[rstest]
    #[case(1, vec![1])]
    #[case(2, vec![2, 3])]
    #[case(3, vec![4, 5, 3])]
    #[case(5, vec![8, 9, 5, 6, 7])]
    #[case(7, vec![8, 9, 10, 11, 12, 13, 7])]
    #[case(8, vec![8, 9, 10, 11, 12, 13, 14, 15])]
    fn test_build_positions_are_left_to_right(
        #[case] leaf_count: usize,
        #[case] expected: Vec<usize>,
    ) {
        let positions: Vec<usize> = (0..leaf_count)
            .map(|offset| build_position(offset, leaf_count))
            .collect();
        assert_eq!(positions, expected);
    }

    #[rstest]
    fn test_last_leaf_position() {
        assert_eq!(last_leaf_position(1), 1);
        assert_eq!(last_leaf_position(7), 13);
        assert_eq!(split_position(7), 7);
    }
}

//! Orderings and the winner function derived from them.
//!
//! A selection tree is parameterized by a [`Comparator`]. The participant that
//! compares greatest wins, so [`NaturalOrder`] yields a max-tree and
//! [`Reversed`] yields a min-tree. Any `Fn(&T, &T) -> Ordering` closure is also
//! a comparator.
//!
//! # Examples
//!
//! ```rust
//! use knockout::tree::{Comparator, NaturalOrder, Participant, Reversed, winner};
//!
//! let five = Participant::Real(5);
//! let nine = Participant::Real(9);
//!
//! assert_eq!(winner(&NaturalOrder, &five, &nine), &nine);
//! assert_eq!(winner(&Reversed(NaturalOrder), &five, &nine), &five);
//!
//! // Absent entries never win against a real participant.
//! assert_eq!(winner(&NaturalOrder, &Participant::Absent, &five), &five);
//! ```

use std::cmp::Ordering;

use super::Participant;

/// A total order over `T`.
///
/// The comparator must be consistent: `compare(a, b)` is the reverse of
/// `compare(b, a)` and the relation is transitive. The tree does not verify
/// this; an inconsistent comparator yields an unspecified (but memory safe)
/// winner.
pub trait Comparator<T: ?Sized> {
    /// Compares two values.
    fn compare(&self, left: &T, right: &T) -> Ordering;

    /// Returns `true` if `left` wins the match against `right`.
    ///
    /// Real values beat absent ones, the comparator-greater real value wins,
    /// and ties go to `left`.
    fn prefers_left(&self, left: &Participant<T>, right: &Participant<T>) -> bool
    where
        T: Sized,
    {
        match (left, right) {
            (Participant::Real(left), Participant::Real(right)) => {
                self.compare(left, right) != Ordering::Less
            }
            (Participant::Real(_) | Participant::Absent, Participant::Absent) => true,
            (Participant::Absent, Participant::Real(_)) => false,
        }
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self(left, right)
    }
}

/// Orders values by their [`Ord`] implementation; the greatest value wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

/// Inverts another comparator; with [`NaturalOrder`] the smallest value wins.
///
/// # Examples
///
/// ```rust
/// use knockout::tree::{NaturalOrder, Reversed, SelectionTree};
///
/// let tree = SelectionTree::builder()
///     .comparator(Reversed(NaturalOrder))
///     .build([4, 1, 7]);
/// assert_eq!(tree.winner(), Some(&1));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Reversed<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reversed<C> {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.0.compare(right, left)
    }
}

/// Orders values by a key projected out of each value.
///
/// # Examples
///
/// ```rust
/// use knockout::tree::{KeyOrder, SelectionTree};
///
/// let tree = SelectionTree::builder()
///     .comparator(KeyOrder::new(|word: &&str| word.len()))
///     .build(["to", "tournament", "tree"]);
/// assert_eq!(tree.winner(), Some(&"tournament"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyOrder<F> {
    key: F,
}

impl<F> KeyOrder<F> {
    /// Creates a comparator ordering by `key(value)`.
    #[inline]
    #[must_use]
    pub const fn new(key: F) -> Self {
        Self { key }
    }
}

impl<T, K, F> Comparator<T> for KeyOrder<F>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        (self.key)(left).cmp(&(self.key)(right))
    }
}

/// The winner function: returns whichever of `left` and `right` wins the match.
///
/// Absent participants contribute nothing: a real participant always beats an
/// absent one, and two absent participants yield `left`.
#[inline]
pub fn winner<'a, T, C>(
    comparator: &C,
    left: &'a Participant<T>,
    right: &'a Participant<T>,
) -> &'a Participant<T>
where
    C: Comparator<T> + ?Sized,
{
    if comparator.prefers_left(left, right) {
        left
    } else {
        right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Participant::Real(1), Participant::Real(2), false)]
    #[case(Participant::Real(2), Participant::Real(1), true)]
    #[case(Participant::Real(2), Participant::Real(2), true)]
    #[case(Participant::Real(0), Participant::Absent, true)]
    #[case(Participant::Absent, Participant::Real(0), false)]
    #[case(Participant::Absent, Participant::Absent, true)]
    fn test_natural_order_prefers_left(
        #[case] left: Participant<i32>,
        #[case] right: Participant<i32>,
        #[case] expected: bool,
    ) {
        assert_eq!(NaturalOrder.prefers_left(&left, &right), expected);
    }

    #[rstest]
    fn test_reversed_prefers_smaller() {
        let comparator = Reversed(NaturalOrder);
        assert!(comparator.prefers_left(&Participant::Real(1), &Participant::Real(2)));
        assert!(comparator.prefers_left(&Participant::Real(1), &Participant::Absent));
    }

    #[rstest]
    fn test_closure_is_comparator() {
        let by_abs = |left: &i32, right: &i32| left.abs().cmp(&right.abs());
        let left = Participant::Real(-7);
        let right = Participant::Real(3);
        assert_eq!(winner(&by_abs, &left, &right), &left);
    }

    #[rstest]
    fn test_key_order_compares_keys() {
        let comparator = KeyOrder::new(|pair: &(i32, char)| pair.0);
        assert_eq!(comparator.compare(&(1, 'z'), &(2, 'a')), Ordering::Less);
    }
}

//! Builder for [`SelectionTree`].

use std::fmt;
use std::marker::PhantomData;

use super::{Comparator, NaturalOrder, SelectionTree};
use crate::error::SelectionTreeError;

/// Configures and builds a [`SelectionTree`].
///
/// | Setting            | Default          |
/// |--------------------|------------------|
/// | `comparator`       | [`NaturalOrder`] |
/// | `allow_vacancies`  | `false`          |
/// | `with_capacity`    | `0`              |
///
/// # Examples
///
/// ```rust
/// use knockout::SelectionTreeError;
/// use knockout::tree::{Reversed, NaturalOrder, SelectionTreeBuilder};
///
/// let tree = SelectionTreeBuilder::new()
///     .comparator(Reversed(NaturalOrder))
///     .with_capacity(16)
///     .build([12, 4, 9]);
/// assert_eq!(tree.winner(), Some(&4));
///
/// let rejected = SelectionTreeBuilder::new().build_from_slots([Some(1), None]);
/// assert_eq!(
///     rejected.unwrap_err(),
///     SelectionTreeError::VacantParticipant { index: 1 }
/// );
/// ```
pub struct SelectionTreeBuilder<T, C = NaturalOrder> {
    comparator: C,
    allow_vacancies: bool,
    capacity: usize,
    marker: PhantomData<fn() -> T>,
}

impl<T> SelectionTreeBuilder<T, NaturalOrder> {
    /// Creates a builder with the default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            comparator: NaturalOrder,
            allow_vacancies: false,
            capacity: 0,
            marker: PhantomData,
        }
    }
}

impl<T> Default for SelectionTreeBuilder<T, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> SelectionTreeBuilder<T, C> {
    /// Sets the comparator deciding matches.
    #[must_use]
    pub fn comparator<D: Comparator<T>>(self, comparator: D) -> SelectionTreeBuilder<T, D> {
        SelectionTreeBuilder {
            comparator,
            allow_vacancies: self.allow_vacancies,
            capacity: self.capacity,
            marker: PhantomData,
        }
    }

    /// Permits vacant (`None`) slots in
    /// [`build_from_slots`](Self::build_from_slots) and later rebuilds.
    #[must_use]
    pub const fn allow_vacancies(mut self, allow: bool) -> Self {
        self.allow_vacancies = allow;
        self
    }

    /// Reserves node storage for at least `capacity` participants.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

impl<T, C: Comparator<T>> SelectionTreeBuilder<T, C> {
    /// Builds a tree over `participants`.
    pub fn build<I>(self, participants: I) -> SelectionTree<T, C>
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = self.empty();
        tree.rebuild(participants);
        tree
    }

    /// Builds a tree over `slots`, where `None` marks a vacant participant.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionTreeError::VacantParticipant`] for the first `None`
    /// slot unless vacancies were allowed.
    pub fn build_from_slots<I>(self, slots: I) -> Result<SelectionTree<T, C>, SelectionTreeError>
    where
        I: IntoIterator<Item = Option<T>>,
    {
        let mut tree = self.empty();
        tree.rebuild_from_slots(slots)?;
        Ok(tree)
    }

    /// Builds an empty tree with these settings.
    pub fn empty(self) -> SelectionTree<T, C> {
        SelectionTree::from_parts(self.comparator, self.allow_vacancies, self.capacity)
    }
}

impl<T, C: fmt::Debug> fmt::Debug for SelectionTreeBuilder<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SelectionTreeBuilder")
            .field("comparator", &self.comparator)
            .field("allow_vacancies", &self.allow_vacancies)
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Participant;
    use rstest::rstest;

    #[rstest]
    fn test_build_uses_natural_order_by_default() {
        let tree = SelectionTreeBuilder::new().build([3, 8, 1]);
        assert_eq!(tree.winner(), Some(&8));
        assert!(!tree.allows_vacancies());
    }

    #[rstest]
    fn test_build_from_slots_with_vacancies() {
        let tree = SelectionTreeBuilder::new()
            .allow_vacancies(true)
            .build_from_slots([None, Some(2), None])
            .unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.winner(), Some(&2));
        assert_eq!(tree.participant(0), Some(&Participant::Absent));
        assert!(tree.check_invariants().is_ok());
    }

    #[rstest]
    fn test_build_from_slots_rejects_first_vacancy() {
        let result = SelectionTreeBuilder::new().build_from_slots([Some(1), None, None]);
        assert_eq!(
            result.unwrap_err(),
            SelectionTreeError::VacantParticipant { index: 1 }
        );
    }

    #[rstest]
    fn test_closure_comparator() {
        let tree = SelectionTreeBuilder::<(u8, &str)>::new()
            .comparator(|left: &(u8, &str), right: &(u8, &str)| left.0.cmp(&right.0))
            .build([(2, "b"), (9, "z"), (4, "d")]);
        assert_eq!(tree.winner(), Some(&(9, "z")));
    }

    const VACANCY_BUILDER: SelectionTreeBuilder<i32> =
        SelectionTreeBuilder::new().allow_vacancies(true).with_capacity(8);

    #[rstest]
    fn test_builder_settings_in_const_context() {
        let tree = VACANCY_BUILDER
            .build_from_slots([None, Some(3)])
            .unwrap();
        assert!(tree.allows_vacancies());
        assert_eq!(tree.winner(), Some(&3));
    }

    #[rstest]
    fn test_empty_builds_nothing() {
        let tree: SelectionTree<i32> = SelectionTreeBuilder::new().with_capacity(8).empty();
        assert!(tree.is_empty());
        assert_eq!(tree.winner(), None);
    }
}

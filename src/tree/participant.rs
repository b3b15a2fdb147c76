//! Participant slots.
//!
//! A [`Participant`] is either a real value or an absent entry. Absent entries
//! lose every match, so a tree never needs a caller-supplied sentinel that is
//! "smaller than everything".

/// A value competing in a selection tree, or the lack of one.
///
/// # Examples
///
/// ```rust
/// use knockout::tree::Participant;
///
/// let real = Participant::Real(5);
/// assert_eq!(real.as_real(), Some(&5));
///
/// let absent: Participant<i32> = Participant::Absent;
/// assert!(absent.is_absent());
/// assert_eq!(Option::<i32>::from(absent), None);
/// assert_eq!(Participant::Real(5).into_real(), Some(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Participant<T> {
    /// A competing value.
    Real(T),
    /// An empty entry that loses to every [`Participant::Real`].
    #[default]
    Absent,
}

impl<T> Participant<T> {
    /// Returns `true` if this is a [`Participant::Real`].
    #[inline]
    #[must_use]
    pub const fn is_real(&self) -> bool {
        matches!(self, Self::Real(_))
    }

    /// Returns `true` if this is [`Participant::Absent`].
    #[inline]
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Borrows the real value, if any.
    #[inline]
    #[must_use]
    pub const fn as_real(&self) -> Option<&T> {
        match self {
            Self::Real(value) => Some(value),
            Self::Absent => None,
        }
    }

    /// Converts into an `Option`, discarding the absent marker.
    #[inline]
    #[must_use]
    pub fn into_real(self) -> Option<T> {
        match self {
            Self::Real(value) => Some(value),
            Self::Absent => None,
        }
    }

    /// Converts `&Participant<T>` into `Participant<&T>`.
    #[inline]
    #[must_use]
    pub const fn as_ref(&self) -> Participant<&T> {
        match self {
            Self::Real(value) => Participant::Real(value),
            Self::Absent => Participant::Absent,
        }
    }

    /// Takes the participant out, leaving [`Participant::Absent`] in its place.
    #[inline]
    #[must_use]
    pub const fn take(&mut self) -> Self {
        std::mem::replace(self, Self::Absent)
    }
}

impl<T> From<Option<T>> for Participant<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Real)
    }
}

impl<T> From<Participant<T>> for Option<T> {
    fn from(participant: Participant<T>) -> Self {
        participant.into_real()
    }
}

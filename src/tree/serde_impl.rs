//! Serde support for [`SelectionTree`].
//!
//! A tree serializes as the sequence of its participants in index order, with
//! vacant participants as `null`. Deserializing rebuilds the tree with the
//! comparator's `Default` and vacancies allowed.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::{Comparator, SelectionTree};

impl<T: Serialize, C: Comparator<T>> Serialize for SelectionTree<T, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for participant in self.participants() {
            seq.serialize_element(&participant.as_real())?;
        }
        seq.end()
    }
}

struct SelectionTreeVisitor<T, C> {
    marker: PhantomData<fn() -> (T, C)>,
}

impl<'de, T, C> Visitor<'de> for SelectionTreeVisitor<T, C>
where
    T: Deserialize<'de>,
    C: Comparator<T> + Default,
{
    type Value = SelectionTree<T, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence of optional participants")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut slots = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(slot) = seq.next_element::<Option<T>>()? {
            slots.push(slot);
        }
        let mut tree = SelectionTree::from_parts(C::default(), true, slots.len());
        tree.rebuild_from_slots(slots)
            .map_err(<A::Error as serde::de::Error>::custom)?;
        Ok(tree)
    }
}

impl<'de, T, C> Deserialize<'de> for SelectionTree<T, C>
where
    T: Deserialize<'de>,
    C: Comparator<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(SelectionTreeVisitor {
            marker: PhantomData,
        })
    }
}

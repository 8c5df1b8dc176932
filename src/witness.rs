use std::{collections::BTreeSet, fmt::Display};

use itertools::Itertools;

/// The label of one group-to-group cell: every concrete value seen as the
/// target of a hop landing in that cell.
///
/// Kept ordered so that the minimum witness and the rendering are cheap and
/// deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WitnessSet(BTreeSet<i64>);

impl WitnessSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `value` was not present before.
    pub fn insert(&mut self, value: i64) -> bool {
        self.0.insert(value)
    }

    pub fn contains(&self, value: i64) -> bool {
        self.0.contains(&value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn min(&self) -> Option<i64> {
        self.0.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }

    pub fn is_superset(&self, other: &WitnessSet) -> bool {
        self.0.is_superset(&other.0)
    }

    /// Unions `other` into `self`, returning how many values were new.
    pub fn absorb(&mut self, other: &WitnessSet) -> usize {
        let before = self.0.len();
        self.0.extend(other.0.iter().copied());
        self.0.len() - before
    }
}

impl FromIterator<i64> for WitnessSet {
    fn from_iter<T: IntoIterator<Item = i64>>(iter: T) -> Self {
        WitnessSet(iter.into_iter().collect())
    }
}

impl Display for WitnessSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.0.iter().join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::WitnessSet;

    #[test]
    fn absorb_counts_only_new_values() {
        let mut a: WitnessSet = [1, 3].into_iter().collect();
        let b: WitnessSet = [3, 5, 7].into_iter().collect();
        assert_eq!(a.absorb(&b), 2);
        assert_eq!(a.absorb(&b), 0);
        assert_eq!(a.to_string(), "{1,3,5,7}");
        assert_eq!(a.min(), Some(1));
    }

    #[test]
    fn empty_set_renders_braces() {
        assert_eq!(WitnessSet::new().to_string(), "{}");
        assert_eq!(WitnessSet::new().min(), None);
    }
}

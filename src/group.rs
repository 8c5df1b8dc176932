//! Groups are the congruence classes of the integers modulo a fixed [`Modulus`].
//!
//! Concrete integers ("imaginary indices") are routed to their group with the
//! Euclidean remainder, so `-1 mod 3` is group `2` and never `-1`.

use std::fmt::Display;

use derive_more::{From, Into};

use crate::error::JoinError;

/// Index of a congruence class, always in `[0, n)` for the modulus it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupId(pub usize);

impl GroupId {
    /// The smallest non-negative member of this group.
    pub fn value(self) -> i64 {
        self.0 as i64
    }
}

impl Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A strictly positive modulus `n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Modulus(i64);

impl Modulus {
    pub fn new(n: i64) -> Result<Self, JoinError> {
        if n <= 0 {
            return Err(JoinError::InvalidModulus { modulus: n });
        }
        Ok(Modulus(n))
    }

    pub fn get(self) -> i64 {
        self.0
    }

    /// Number of groups, i.e. `n` as a size.
    pub fn n_groups(self) -> usize {
        self.0 as usize
    }

    /// The group `v` belongs to.
    pub fn group_of(self, v: i64) -> GroupId {
        GroupId(v.rem_euclid(self.0) as usize)
    }

    pub fn groups(self) -> impl Iterator<Item = GroupId> {
        (0..self.n_groups()).map(GroupId)
    }

    /// The fixed representative used for "`x` reaches its own class": the
    /// next member of the class above `x`, which is always `x + n`.
    ///
    /// `x < n` and the `n × n` group matrix has to fit in memory, so the sum
    /// stays far below `i64::MAX`.
    pub fn self_cycle_value(self, x: GroupId) -> i64 {
        x.value() + self.0
    }

    /// Smallest member `g + k·n` (with `k ≥ 0`) of group `g` that is strictly
    /// greater than `a`.
    ///
    /// Returns `None` when that member would exceed `i64::MAX`, i.e. when `a`
    /// is within `n` of the top of the range.
    pub fn lift_above(self, a: i64, g: GroupId) -> Option<i64> {
        let base = g.value();
        if base > a {
            return Some(base);
        }
        let k = (a - base).div_euclid(self.0) + 1;
        k.checked_mul(self.0)?.checked_add(base)
    }
}

impl TryFrom<i64> for Modulus {
    type Error = JoinError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        Modulus::new(n)
    }
}

impl Display for Modulus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_values_use_euclidean_residue() {
        let m = Modulus::new(3).unwrap();
        assert_eq!(m.group_of(-1), GroupId(2));
        assert_eq!(m.group_of(-3), GroupId(0));
        assert_eq!(m.group_of(-4), GroupId(2));
        assert_eq!(m.group_of(7), GroupId(1));
    }

    #[test]
    fn non_positive_modulus_is_rejected() {
        assert_eq!(
            Modulus::new(0),
            Err(JoinError::InvalidModulus { modulus: 0 })
        );
        assert_eq!(
            Modulus::try_from(-1),
            Err(JoinError::InvalidModulus { modulus: -1 })
        );
        assert_eq!(
            Modulus::new(-1).unwrap_err().to_string(),
            "modulus must be positive, got -1"
        );
    }

    #[test]
    fn lift_above_picks_next_member() {
        let m = Modulus::new(3).unwrap();
        assert_eq!(m.lift_above(0, GroupId(1)), Some(1));
        assert_eq!(m.lift_above(1, GroupId(1)), Some(4));
        assert_eq!(m.lift_above(2, GroupId(0)), Some(3));
        assert_eq!(m.lift_above(5, GroupId(2)), Some(8));
        assert_eq!(m.lift_above(-7, GroupId(2)), Some(2));
    }

    #[test]
    fn lift_above_stops_at_the_top_of_the_range() {
        let m = Modulus::new(3).unwrap();
        // i64::MAX is in group 1.
        assert_eq!(m.group_of(i64::MAX), GroupId(1));
        assert_eq!(m.lift_above(i64::MAX - 1, GroupId(1)), Some(i64::MAX));
        assert_eq!(m.lift_above(i64::MAX, GroupId(0)), None);
        assert_eq!(m.lift_above(i64::MAX, GroupId(1)), None);
        assert_eq!(m.lift_above(i64::MIN, GroupId(2)), Some(2));
    }

    #[test]
    fn self_cycle_value_adds_modulus() {
        let m = Modulus::new(2).unwrap();
        assert_eq!(m.self_cycle_value(GroupId(0)), 2);
        assert_eq!(m.self_cycle_value(GroupId(1)), 3);
    }
}

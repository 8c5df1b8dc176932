//! Square storage indexed by pairs of groups.

use std::{
    fmt::Display,
    ops::{Index, IndexMut},
};

use bitvec::vec::BitVec;
use itertools::Itertools;

use crate::group::GroupId;

/// An `n × n` matrix stored row major, indexed by `(from, to)` group pairs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupMatrix<T> {
    n: usize,
    cells: Vec<T>,
}

impl<T> GroupMatrix<T> {
    pub fn from_fn(n: usize, mut f: impl FnMut(GroupId, GroupId) -> T) -> Self {
        let mut cells = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                cells.push(f(GroupId(i), GroupId(j)));
            }
        }
        GroupMatrix { n, cells }
    }

    pub fn n_groups(&self) -> usize {
        self.n
    }

    fn offset(&self, (i, j): (GroupId, GroupId)) -> usize {
        debug_assert!(i.0 < self.n && j.0 < self.n, "group out of range");
        i.0 * self.n + j.0
    }

    pub fn row(&self, i: GroupId) -> &[T] {
        &self.cells[i.0 * self.n..(i.0 + 1) * self.n]
    }

    pub fn iter(&self) -> impl Iterator<Item = (GroupId, GroupId, &T)> {
        let n = self.n;
        self.cells
            .iter()
            .enumerate()
            .map(move |(o, c)| (GroupId(o / n), GroupId(o % n), c))
    }

    pub fn map<U>(&self, mut f: impl FnMut(GroupId, GroupId, &T) -> U) -> GroupMatrix<U> {
        GroupMatrix::from_fn(self.n, |i, j| f(i, j, &self[(i, j)]))
    }

    /// Borrows `dst` mutably and `src` immutably at the same time.
    ///
    /// Returns `None` when both name the same cell.
    pub fn split_pair(
        &mut self,
        dst: (GroupId, GroupId),
        src: (GroupId, GroupId),
    ) -> Option<(&mut T, &T)> {
        let d = self.offset(dst);
        let s = self.offset(src);
        if d == s {
            return None;
        }
        if d < s {
            let (head, tail) = self.cells.split_at_mut(s);
            Some((&mut head[d], &tail[0]))
        } else {
            let (head, tail) = self.cells.split_at_mut(d);
            Some((&mut tail[0], &head[s]))
        }
    }

    /// Writes one line per row, cells separated by a single space.
    pub fn write_grid<W: std::fmt::Write>(
        &self,
        writer: &mut W,
        mut formatter: impl FnMut(GroupId, GroupId, &T) -> String,
    ) -> std::fmt::Result {
        for i in 0..self.n {
            if i != 0 {
                writer.write_str("\n")?;
            }
            let row = (0..self.n)
                .map(|j| formatter(GroupId(i), GroupId(j), &self[(GroupId(i), GroupId(j))]))
                .join(" ");
            writer.write_str(&row)?;
        }
        Ok(())
    }
}

impl<T> Index<(GroupId, GroupId)> for GroupMatrix<T> {
    type Output = T;
    fn index(&self, idx: (GroupId, GroupId)) -> &Self::Output {
        &self.cells[self.offset(idx)]
    }
}

impl<T> IndexMut<(GroupId, GroupId)> for GroupMatrix<T> {
    fn index_mut(&mut self, idx: (GroupId, GroupId)) -> &mut Self::Output {
        let o = self.offset(idx);
        &mut self.cells[o]
    }
}

/// Boolean collapse of a group matrix: one bit row per source group.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EdgeMatrix {
    rows: Vec<BitVec>,
}

impl EdgeMatrix {
    pub fn from_matrix<T>(matrix: &GroupMatrix<T>, mut present: impl FnMut(&T) -> bool) -> Self {
        let rows = (0..matrix.n_groups())
            .map(|i| matrix.row(GroupId(i)).iter().map(&mut present).collect())
            .collect();
        EdgeMatrix { rows }
    }

    pub fn n_groups(&self) -> usize {
        self.rows.len()
    }

    pub fn has_edge(&self, from: GroupId, to: GroupId) -> bool {
        self.rows[from.0][to.0]
    }

    pub fn n_edges(&self) -> usize {
        self.rows.iter().map(|r| r.count_ones()).sum()
    }
}

impl Display for EdgeMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            let line = row.iter().map(|b| if *b { "1" } else { "0" }).join(" ");
            f.write_str(&line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_pair_borrows_distinct_cells() {
        let mut m = GroupMatrix::from_fn(2, |i, j| i.0 * 10 + j.0);
        {
            let (dst, src) = m
                .split_pair((GroupId(1), GroupId(1)), (GroupId(0), GroupId(1)))
                .unwrap();
            *dst += *src;
        }
        assert_eq!(m[(GroupId(1), GroupId(1))], 12);
        {
            let (dst, src) = m
                .split_pair((GroupId(0), GroupId(0)), (GroupId(1), GroupId(0)))
                .unwrap();
            *dst += *src;
        }
        assert_eq!(m[(GroupId(0), GroupId(0))], 10);
        assert!(m.split_pair((GroupId(0), GroupId(1)), (GroupId(0), GroupId(1))).is_none());
    }

    #[test]
    fn edge_matrix_collapses_cells() {
        let m = GroupMatrix::from_fn(3, |i, j| (i.0 + 1) % 3 == j.0);
        let edges = EdgeMatrix::from_matrix(&m, |b| *b);
        assert_eq!(edges.n_edges(), 3);
        assert!(edges.has_edge(GroupId(2), GroupId(0)));
        assert!(!edges.has_edge(GroupId(0), GroupId(2)));
        assert_eq!(edges.to_string(), "0 1 0\n0 0 1\n1 0 0");
    }
}

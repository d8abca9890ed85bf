//! Cells currently held by other avatars.

use std::collections::HashSet;

use crate::geom::Cell;

/// The set of cells occupied by avatars for the duration of one search.
///
/// Occupied cells are obstacles regardless of their terrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Occupancy {
    cells: HashSet<Cell>,
}

impl Occupancy {
    /// An empty occupancy set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `c` as occupied. Returns false if it already was.
    pub fn insert(&mut self, c: Cell) -> bool {
        self.cells.insert(c)
    }

    /// Free `c`. Returns false if it was not occupied.
    pub fn remove(&mut self, c: Cell) -> bool {
        self.cells.remove(&c)
    }

    /// Whether `c` is occupied.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        self.cells.contains(&c)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Occupied cells in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

impl FromIterator<Cell> for Occupancy {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<(i32, i32)> for Occupancy {
    fn from_iter<I: IntoIterator<Item = (i32, i32)>>(iter: I) -> Self {
        iter.into_iter().map(Cell::from).collect()
    }
}

impl Extend<Cell> for Occupancy {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_contains_remove() {
        let mut occ = Occupancy::new();
        assert!(occ.is_empty());
        assert!(occ.insert(Cell::new(1, 2)));
        assert!(!occ.insert(Cell::new(1, 2)));
        assert!(occ.contains(Cell::new(1, 2)));
        assert!(!occ.contains(Cell::new(2, 1)));
        assert!(occ.remove(Cell::new(1, 2)));
        assert!(!occ.remove(Cell::new(1, 2)));
    }

    #[test]
    fn collects_from_pairs() {
        let occ: Occupancy = [(0, 0), (3, 4), (0, 0)].into_iter().collect();
        assert_eq!(occ.len(), 2);
        assert!(occ.contains(Cell::new(3, 4)));
    }
}

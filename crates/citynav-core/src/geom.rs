//! Geometry primitives: [`Cell`] and [`Bounds`].

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A grid coordinate. X is the column and grows right, Y is the row and
/// grows down.
///
/// Cells compare and hash by value, so two cells with equal coordinates are
/// interchangeable as map keys.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new cell.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a cell shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The four orthogonal neighbours (up, right, down, left).
    ///
    /// No bounds check is made; callers filter through a passability test.
    #[inline]
    pub const fn neighbors_4(self) -> [Cell; 4] {
        [
            Self::new(self.x, self.y - 1),
            Self::new(self.x + 1, self.y),
            Self::new(self.x, self.y + 1),
            Self::new(self.x - 1, self.y),
        ]
    }

    /// Whether `other` is one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Cell> for (i32, i32) {
    fn from(c: Cell) -> Self {
        (c.x, c.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Cell {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Cell {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max). `min` is inclusive, `max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Cell,
    pub max: Cell,
}

impl Bounds {
    /// Create bounds from two corners, canonicalized so that `min` ≤ `max` on
    /// each axis.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Cell::new(x0.min(x1), y0.min(y1)),
            max: Cell::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// Bounds of a `width` × `height` grid anchored at the origin.
    #[inline]
    pub fn sized(width: i32, height: i32) -> Self {
        Self::new(0, 0, width.max(0), height.max(0))
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the rectangle has zero area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Whether `c` is inside the half-open rectangle.
    #[inline]
    pub fn contains(self, c: Cell) -> bool {
        c.x >= self.min.x && c.x < self.max.x && c.y >= self.min.y && c.y < self.max.y
    }

    /// Row-major iterator over every cell.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Cell;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

/// Row-major iterator over the cells in a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    cur: Cell,
}

impl Iterator for BoundsIter {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Cell> {
        if self.cur.y >= self.bounds.max.y || self.bounds.is_empty() {
            return None;
        }
        let c = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.bounds.max.x {
            self.cur.x = self.bounds.min.x;
            self.cur.y += 1;
        }
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.bounds.is_empty() || self.cur.y >= self.bounds.max.y {
            return (0, Some(0));
        }
        let w = self.bounds.width() as usize;
        let remaining_in_row = (self.bounds.max.x - self.cur.x) as usize;
        let remaining_rows = (self.bounds.max.y - self.cur.y - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for BoundsIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn cell_arithmetic() {
        let a = Cell::new(3, 4);
        let b = Cell::new(1, 2);
        assert_eq!(a + b, Cell::new(4, 6));
        assert_eq!(a - b, Cell::new(2, 2));
        assert_eq!(a.shift(-3, 1), Cell::new(0, 5));
    }

    #[test]
    fn equal_cells_are_interchangeable_keys() {
        let mut m = HashMap::new();
        m.insert(Cell::new(2, 7), "shop");
        let probe: Cell = (2, 7).into();
        assert_eq!(m.get(&probe), Some(&"shop"));
    }

    #[test]
    fn neighbors_4_order() {
        let c = Cell::new(5, 5);
        assert_eq!(
            c.neighbors_4(),
            [
                Cell::new(5, 4),
                Cell::new(6, 5),
                Cell::new(5, 6),
                Cell::new(4, 5)
            ]
        );
        assert!(c.neighbors_4().iter().all(|&n| n.is_adjacent(c)));
        assert!(!c.is_adjacent(Cell::new(6, 6)));
    }

    #[test]
    fn bounds_contains_is_half_open() {
        let b = Bounds::sized(3, 2);
        assert!(b.contains(Cell::new(0, 0)));
        assert!(b.contains(Cell::new(2, 1)));
        assert!(!b.contains(Cell::new(3, 0)));
        assert!(!b.contains(Cell::new(0, 2)));
        assert!(!b.contains(Cell::new(-1, 0)));
        assert_eq!(b.len(), 6);
    }

    #[test]
    fn bounds_canonicalize_and_empty() {
        let b = Bounds::new(4, 5, 1, 2);
        assert_eq!(b.min, Cell::new(1, 2));
        assert_eq!(b.max, Cell::new(4, 5));
        assert!(Bounds::sized(0, 5).is_empty());
        assert_eq!(Bounds::sized(-2, 5).len(), 0);
    }

    #[test]
    fn bounds_iter_is_row_major() {
        let cells: Vec<Cell> = Bounds::sized(2, 2).iter().collect();
        assert_eq!(
            cells,
            vec![
                Cell::new(0, 0),
                Cell::new(1, 0),
                Cell::new(0, 1),
                Cell::new(1, 1)
            ]
        );
        let mut it = Bounds::sized(3, 3).iter();
        it.next();
        assert_eq!(it.len(), 8);
        assert_eq!(Bounds::sized(0, 0).iter().count(), 0);
    }

    #[test]
    fn display_formats() {
        assert_eq!(Cell::new(9, 8).to_string(), "(9, 8)");
        assert_eq!(Bounds::sized(2, 3).to_string(), "[(0, 0)-(2, 3))");
    }
}

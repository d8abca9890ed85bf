//! The [`TerrainGrid`] type, a rectangular and fully populated city map.
//!
//! Raw integer maps are indexed `terrain[x][y]`: the outer index is the
//! column, the inner index is the row. [`TerrainGrid::from_rows`] and
//! [`TerrainGrid::parse`] accept the row-major layout used by ASCII charts.

use std::fmt;

use thiserror::Error;

use crate::geom::{Bounds, Cell};
use crate::terrain::{TerrainCode, TerrainError};

/// Errors that can occur when building a [`TerrainGrid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The grid has no cells.
    #[error("terrain grid is empty")]
    Empty,

    /// A column (or row, or chart line) differs in length from the first.
    #[error("terrain grid is not rectangular: line {line} has {found} cells, expected {expected}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A numeric code outside 0-4.
    #[error("invalid terrain at {cell}: {source}")]
    InvalidCode {
        cell: Cell,
        #[source]
        source: TerrainError,
    },

    /// A chart character with no terrain meaning.
    #[error("invalid terrain rune \u{201c}{ch}\u{201d} at {cell}")]
    InvalidRune { ch: char, cell: Cell },
}

/// A W×H grid holding a [`TerrainCode`] for every cell.
///
/// The grid is never empty and never ragged: every constructor validates its
/// input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridRepr", into = "GridRepr")
)]
pub struct TerrainGrid {
    cells: Vec<TerrainCode>,
    width: i32,
    height: i32,
}

impl TerrainGrid {
    /// Create a `width` × `height` grid filled with `fill`.
    pub fn filled(width: i32, height: i32, fill: TerrainCode) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::Empty);
        }
        Ok(Self {
            cells: vec![fill; (width as usize) * (height as usize)],
            width,
            height,
        })
    }

    /// Build a grid from column-major codes: `columns[x][y]`.
    pub fn from_columns<C, T>(columns: &[C]) -> Result<Self, GridError>
    where
        C: AsRef<[T]>,
        T: Copy + Into<i32>,
    {
        let width = columns.len();
        let height = check_rectangular(columns)?;
        let mut grid = Self::filled(width as i32, height as i32, TerrainCode::Wall)?;
        for (x, column) in columns.iter().enumerate() {
            for (y, &raw) in column.as_ref().iter().enumerate() {
                let cell = Cell::new(x as i32, y as i32);
                grid.set(cell, decode(cell, raw.into())?);
            }
        }
        Ok(grid)
    }

    /// Build a grid from row-major codes: `rows[y][x]`.
    pub fn from_rows<R, T>(rows: &[R]) -> Result<Self, GridError>
    where
        R: AsRef<[T]>,
        T: Copy + Into<i32>,
    {
        let height = rows.len();
        let width = check_rectangular(rows)?;
        let mut grid = Self::filled(width as i32, height as i32, TerrainCode::Wall)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, &raw) in row.as_ref().iter().enumerate() {
                let cell = Cell::new(x as i32, y as i32);
                grid.set(cell, decode(cell, raw.into())?);
            }
        }
        Ok(grid)
    }

    /// Parse an ASCII chart, one row per line, using the runes of
    /// [`TerrainCode::rune`]. Blank lines and surrounding whitespace are
    /// ignored.
    ///
    /// ```
    /// use citynav_core::{Cell, TerrainCode, TerrainGrid};
    ///
    /// let grid = TerrainGrid::parse("
    ///     .#G
    ///     ..M
    /// ").unwrap();
    /// assert_eq!(grid.width(), 3);
    /// assert_eq!(grid.at(Cell::new(2, 1)), Some(TerrainCode::Metro));
    /// ```
    pub fn parse(chart: &str) -> Result<Self, GridError> {
        let lines: Vec<Vec<char>> = chart
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| l.chars().collect())
            .collect();
        let width = check_rectangular(&lines)?;
        let mut grid = Self::filled(width as i32, lines.len() as i32, TerrainCode::Wall)?;
        for (y, line) in lines.iter().enumerate() {
            for (x, &ch) in line.iter().enumerate() {
                let cell = Cell::new(x as i32, y as i32);
                let t = TerrainCode::from_rune(ch).ok_or(GridError::InvalidRune { ch, cell })?;
                grid.set(cell, t);
            }
        }
        Ok(grid)
    }

    /// Width (number of columns).
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height (number of rows).
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The bounding rectangle, anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::sized(self.width, self.height)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: grids are validated non-empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        self.bounds().contains(c)
    }

    #[inline]
    fn index(&self, c: Cell) -> Option<usize> {
        if self.contains(c) {
            Some((c.y as usize) * (self.width as usize) + (c.x as usize))
        } else {
            None
        }
    }

    /// Terrain at `c`, or `None` if `c` is outside the grid.
    #[inline]
    pub fn at(&self, c: Cell) -> Option<TerrainCode> {
        self.index(c).map(|i| self.cells[i])
    }

    /// Set the terrain at `c`. No-op if `c` is outside the grid.
    pub fn set(&mut self, c: Cell, t: TerrainCode) {
        if let Some(i) = self.index(c) {
            self.cells[i] = t;
        }
    }

    /// Row-major iterator over `(Cell, TerrainCode)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, TerrainCode)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }

    /// Cells holding terrain `t`, in row-major order.
    pub fn cells_of(&self, t: TerrainCode) -> impl Iterator<Item = Cell> + '_ {
        self.iter().filter(move |&(_, v)| v == t).map(|(c, _)| c)
    }

    /// Numeric codes in the `columns[x][y]` layout.
    pub fn to_columns(&self) -> Vec<Vec<u8>> {
        (0..self.width)
            .map(|x| {
                (0..self.height)
                    .map(|y| self.cells[(y * self.width + x) as usize].code())
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for TerrainGrid {
    /// Render as an ASCII chart accepted by [`TerrainGrid::parse`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width as usize) {
            let line: String = row.iter().map(|t| t.rune()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Returns the common inner length, rejecting empty or ragged input.
fn check_rectangular<L: AsRef<[T]>, T>(lines: &[L]) -> Result<usize, GridError> {
    let Some(first) = lines.first() else {
        return Err(GridError::Empty);
    };
    let expected = first.as_ref().len();
    if expected == 0 {
        return Err(GridError::Empty);
    }
    for (line, l) in lines.iter().enumerate() {
        let found = l.as_ref().len();
        if found != expected {
            return Err(GridError::Ragged {
                line,
                expected,
                found,
            });
        }
    }
    Ok(expected)
}

fn decode(cell: Cell, raw: i32) -> Result<TerrainCode, GridError> {
    TerrainCode::try_from(raw).map_err(|source| GridError::InvalidCode { cell, source })
}

// ---------------------------------------------------------------------------
// Serialized form
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridRepr {
    columns: Vec<Vec<u8>>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for TerrainGrid {
    type Error = GridError;

    fn try_from(r: GridRepr) -> Result<Self, Self::Error> {
        TerrainGrid::from_columns(&r.columns)
    }
}

#[cfg(feature = "serde")]
impl From<TerrainGrid> for GridRepr {
    fn from(g: TerrainGrid) -> Self {
        GridRepr {
            columns: g.to_columns(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_indexed_x_then_y() {
        // Two columns, three rows.
        let g = TerrainGrid::from_columns(&[vec![1u8, 0, 3], vec![2u8, 4, 1]]).unwrap();
        assert_eq!(g.width(), 2);
        assert_eq!(g.height(), 3);
        assert_eq!(g.at(Cell::new(0, 2)), Some(TerrainCode::Shop));
        assert_eq!(g.at(Cell::new(1, 0)), Some(TerrainCode::Metro));
        assert_eq!(g.at(Cell::new(1, 1)), Some(TerrainCode::Goal));
        assert_eq!(g.to_columns(), vec![vec![1, 0, 3], vec![2, 4, 1]]);
    }

    #[test]
    fn rows_and_columns_agree() {
        let rows = TerrainGrid::from_rows(&[[1i32, 2], [0, 3]]).unwrap();
        let cols = TerrainGrid::from_columns(&[[1i32, 0], [2, 3]]).unwrap();
        assert_eq!(rows, cols);
    }

    #[test]
    fn parse_matches_display() {
        let chart = "\
#.S
M.G
";
        let g = TerrainGrid::parse(chart).unwrap();
        assert_eq!(g.to_string(), chart);
        assert_eq!(g.cells_of(TerrainCode::Road).count(), 2);
        assert_eq!(g.len(), 6);
    }

    #[test]
    fn out_of_bounds_reads_are_none() {
        let g = TerrainGrid::filled(3, 1, TerrainCode::Road).unwrap();
        assert_eq!(g.at(Cell::new(-1, 0)), None);
        assert_eq!(g.at(Cell::new(3, 0)), None);
        assert_eq!(g.at(Cell::new(0, 1)), None);
    }

    #[test]
    fn set_outside_is_noop() {
        let mut g = TerrainGrid::filled(2, 2, TerrainCode::Road).unwrap();
        g.set(Cell::new(5, 5), TerrainCode::Wall);
        g.set(Cell::new(1, 1), TerrainCode::Wall);
        assert_eq!(g.cells_of(TerrainCode::Wall).collect::<Vec<_>>(), vec![Cell::new(1, 1)]);
    }

    #[test]
    fn rejects_empty_input() {
        let none: [Vec<u8>; 0] = [];
        assert_eq!(TerrainGrid::from_columns(&none), Err(GridError::Empty));
        assert_eq!(
            TerrainGrid::from_columns(&[Vec::<u8>::new()]),
            Err(GridError::Empty)
        );
        assert_eq!(TerrainGrid::parse("\n \n"), Err(GridError::Empty));
        assert_eq!(
            TerrainGrid::filled(0, 3, TerrainCode::Road),
            Err(GridError::Empty)
        );
    }

    #[test]
    fn rejects_ragged_input() {
        let err = TerrainGrid::from_columns(&[vec![1u8, 1], vec![1u8]]).unwrap_err();
        assert_eq!(
            err,
            GridError::Ragged {
                line: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn rejects_unknown_codes_and_runes() {
        let err = TerrainGrid::from_columns(&[vec![1u8, 7]]).unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidCode {
                cell: Cell::new(0, 1),
                source: TerrainError::UnknownCode(7)
            }
        );
        let err = TerrainGrid::parse("..x").unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidRune {
                ch: 'x',
                cell: Cell::new(2, 0)
            }
        );
    }
}

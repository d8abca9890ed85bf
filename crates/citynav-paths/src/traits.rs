use citynav_core::Cell;

/// Minimal pathfinding interface: neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `c` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to neighbor `to`. Must be > 0.
    fn cost(&self, from: Cell, to: Cell) -> u32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Estimate of the remaining cost from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Cell, to: Cell) -> f64;
}

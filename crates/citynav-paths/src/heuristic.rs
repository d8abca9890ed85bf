//! Remaining-cost estimate for city searches.

use citynav_core::{Cell, MoverClass};

use crate::distance::euclidean;
use crate::teleport::TeleportLinkTable;

/// Euclidean estimate, relaxed for movers that can ride the metro.
///
/// A single metro hop can cover any distance for a cost of one, so the
/// straight-line distance alone overestimates routes that use it. For a
/// mover with open links the estimate is
/// `min(d(n, goal), min_A d(n, A) + 1 + min_B d(B, goal))` over stations A
/// and B, which bounds every route that rides at least once. Both terms move
/// by at most one per grid step and the second is unchanged by a hop, so the
/// estimate stays consistent.
#[derive(Debug, Clone)]
pub struct MetroHeuristic {
    goal: Cell,
    stations: Vec<Cell>,
    exit_to_goal: f64,
}

impl MetroHeuristic {
    pub fn new(goal: Cell, links: &TeleportLinkTable, mover: MoverClass) -> Self {
        let stations = links.stations(mover);
        let exit_to_goal = stations
            .iter()
            .map(|&b| euclidean(b, goal))
            .fold(f64::INFINITY, f64::min);
        Self {
            goal,
            stations,
            exit_to_goal,
        }
    }

    /// Plain Euclidean distance to `goal`, no metro.
    pub fn walking(goal: Cell) -> Self {
        Self {
            goal,
            stations: Vec::new(),
            exit_to_goal: f64::INFINITY,
        }
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// Lower bound on the number of steps from `c` to the goal.
    pub fn estimate(&self, c: Cell) -> f64 {
        let walk = euclidean(c, self.goal);
        if self.stations.is_empty() {
            return walk;
        }
        let to_entry = self
            .stations
            .iter()
            .map(|&a| euclidean(c, a))
            .fold(f64::INFINITY, f64::min);
        walk.min(to_entry + 1.0 + self.exit_to_goal)
    }
}

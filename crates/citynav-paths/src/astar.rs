//! A* route search.

use citynav_core::{Cell, MoverClass, Occupancy, TerrainGrid};
use log::{debug, trace, warn};

use crate::bfs::bfs_distance;
use crate::config::{SearchBudget, SearchConfig};
use crate::error::{Endpoint, PathError};
use crate::heuristic::MetroHeuristic;
use crate::neighbors::{CityPather, NeighborRule};
use crate::reconstruct::reconstruct;
use crate::search::SearchState;
use crate::teleport::TeleportLinkTable;
use crate::traits::AstarPather;
use crate::traversability::TraversabilityMap;

/// How often, in expansions, the wall clock is consulted.
const DEADLINE_CHECK_INTERVAL: usize = 256;

/// Answer to a well-formed route request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "status", content = "path", rename_all = "lowercase")
)]
pub enum PathOutcome {
    /// Cells from the step after the start through the goal. Empty when the
    /// start is the goal.
    Found(Vec<Cell>),
    /// No route exists under the current obstacles.
    Unreachable,
}

impl PathOutcome {
    /// The route, if one was found.
    pub fn path(&self) -> Option<&[Cell]> {
        match self {
            PathOutcome::Found(p) => Some(p),
            PathOutcome::Unreachable => None,
        }
    }

    pub fn into_path(self) -> Option<Vec<Cell>> {
        match self {
            PathOutcome::Found(p) => Some(p),
            PathOutcome::Unreachable => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, PathOutcome::Found(_))
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells taken off the open set and expanded.
    pub expanded: usize,
    /// Largest open-set size seen.
    pub peak_open: usize,
}

/// Outcome of a search together with its counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search {
    pub outcome: PathOutcome,
    pub stats: SearchStats,
}

/// Run A* from `start` to `goal` over any [`AstarPather`].
///
/// The open cell with the lowest `g + estimate` is expanded next; among equal
/// scores the cell that joined the open set first wins, so the result never
/// depends on hash ordering. Endpoints are not validated here.
pub fn astar_path<P: AstarPather>(
    pather: &P,
    start: Cell,
    goal: Cell,
    budget: &SearchBudget,
) -> Result<Search, PathError> {
    let mut st = SearchState::new(start, pather.estimate(start, goal));
    let mut expanded = 0usize;
    let mut nbuf = Vec::with_capacity(8);

    while let Some(current) = st.pop_best() {
        if current == goal {
            let path = reconstruct(st.came_from(), goal);
            let stats = SearchStats {
                expanded,
                peak_open: st.peak_open(),
            };
            debug!(
                "[AStar] reached {goal}: {} steps, {} expanded, peak open {}",
                path.len(),
                stats.expanded,
                stats.peak_open
            );
            return Ok(Search {
                outcome: PathOutcome::Found(path),
                stats,
            });
        }

        if expanded >= budget.max_expansions {
            warn!("[AStar] expansion cap {} hit before reaching {goal}", budget.max_expansions);
            return Err(PathError::SearchLimitExceeded { expanded });
        }
        if expanded % DEADLINE_CHECK_INTERVAL == 0 && budget.past_deadline() {
            warn!("[AStar] deadline passed after {expanded} expansions");
            return Err(PathError::DeadlineExceeded { expanded });
        }
        expanded += 1;

        let Some(current_g) = st.g(current) else {
            continue;
        };
        trace!("[AStar] expand {current} g={current_g}");

        nbuf.clear();
        pather.neighbors(current, &mut nbuf);
        for &n in nbuf.iter() {
            let tentative_g = current_g.saturating_add(pather.cost(current, n));
            if st.g(n).is_some_and(|g| tentative_g >= g) {
                continue;
            }
            st.relax(current, n, tentative_g, pather.estimate(n, goal));
        }
    }

    debug!(
        "[AStar] {goal} unreachable from {start}: {expanded} expanded, {} left open",
        st.open_len()
    );
    Ok(Search {
        outcome: PathOutcome::Unreachable,
        stats: SearchStats {
            expanded,
            peak_open: st.peak_open(),
        },
    })
}

/// Route finder for city avatars.
///
/// Holds the metro link table and search limits; everything else is passed
/// per request and only borrowed. A pathfinder is `Send + Sync` and may be
/// shared between threads.
#[derive(Debug, Clone, Default)]
pub struct AStarPathfinder {
    links: TeleportLinkTable,
    config: SearchConfig,
}

impl AStarPathfinder {
    pub fn new(links: TeleportLinkTable, config: SearchConfig) -> Self {
        Self { links, config }
    }

    /// Pathfinder over the city's metro with default limits.
    pub fn city() -> Self {
        Self::new(TeleportLinkTable::city_metro(), SearchConfig::default())
    }

    /// Replace the search limits (builder).
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn links(&self) -> &TeleportLinkTable {
        &self.links
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Shortest route from `start` to `goal` for `mover`.
    ///
    /// Occupied cells are obstacles, including `start`: leave the requesting
    /// avatar out of `occupancy`. Fails fast with
    /// [`PathError::OutOfBounds`] or [`PathError::BlockedEndpoint`] before
    /// any search work; an unreachable goal is
    /// [`PathOutcome::Unreachable`].
    pub fn find_path(
        &self,
        terrain: &TerrainGrid,
        occupancy: &Occupancy,
        mover: MoverClass,
        start: Cell,
        goal: Cell,
    ) -> Result<PathOutcome, PathError> {
        self.find_path_with_stats(terrain, occupancy, mover, start, goal)
            .map(|s| s.outcome)
    }

    /// Like [`find_path`](Self::find_path), also returning search counters.
    pub fn find_path_with_stats(
        &self,
        terrain: &TerrainGrid,
        occupancy: &Occupancy,
        mover: MoverClass,
        start: Cell,
        goal: Cell,
    ) -> Result<Search, PathError> {
        let map = TraversabilityMap::new(terrain, occupancy).with_stations(&self.links);
        validate_endpoints(&map, start, goal)?;
        debug!(
            "[AStar] {mover} route {start} -> {goal} on {}x{} map, {} avatars",
            terrain.width(),
            terrain.height(),
            occupancy.len()
        );
        let rule = NeighborRule::new(map, &self.links, mover);
        let pather = CityPather::new(rule, MetroHeuristic::new(goal, &self.links, mover));
        astar_path(&pather, start, goal, &self.config.budget(terrain.len()))
    }

    /// Number of steps on a shortest route, by breadth-first search, under
    /// the same rules and validation as [`find_path`](Self::find_path).
    /// `None` if the goal is unreachable.
    pub fn hop_distance(
        &self,
        terrain: &TerrainGrid,
        occupancy: &Occupancy,
        mover: MoverClass,
        start: Cell,
        goal: Cell,
    ) -> Result<Option<usize>, PathError> {
        let map = TraversabilityMap::new(terrain, occupancy).with_stations(&self.links);
        validate_endpoints(&map, start, goal)?;
        let rule = NeighborRule::new(map, &self.links, mover);
        Ok(bfs_distance(&rule, start, goal))
    }
}

/// Bounds first for both ends, then passability.
fn validate_endpoints(map: &TraversabilityMap<'_>, start: Cell, goal: Cell) -> Result<(), PathError> {
    let terrain = map.terrain();
    let ends = [(Endpoint::Start, start), (Endpoint::Goal, goal)];
    for (endpoint, cell) in ends {
        if !terrain.contains(cell) {
            return Err(PathError::OutOfBounds {
                endpoint,
                cell,
                width: terrain.width(),
                height: terrain.height(),
            });
        }
    }
    for (endpoint, cell) in ends {
        if let Some(reason) = map.blocked_reason(cell) {
            return Err(PathError::BlockedEndpoint {
                endpoint,
                cell,
                reason,
            });
        }
    }
    Ok(())
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn outcome_json_shape() {
        let found = PathOutcome::Found(vec![Cell::new(1, 0)]);
        assert_eq!(
            serde_json::to_string(&found).unwrap(),
            r#"{"status":"found","path":[{"x":1,"y":0}]}"#
        );
        assert_eq!(
            serde_json::to_string(&PathOutcome::Unreachable).unwrap(),
            r#"{"status":"unreachable"}"#
        );
    }
}

//! Which cells an avatar may stand on.
//!
//! This is the only place the engine reads terrain, so it is also the
//! bounds guard for everything built on top of it.

use std::fmt;

use citynav_core::{Cell, Occupancy, TerrainCode, TerrainGrid};

use crate::teleport::TeleportLinkTable;

/// Why a cell cannot be entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocked {
    OutOfBounds,
    Occupied,
    Terrain(TerrainCode),
}

impl fmt::Display for Blocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Blocked::OutOfBounds => f.write_str("outside the map"),
            Blocked::Occupied => f.write_str("occupied by another avatar"),
            Blocked::Terrain(t) => write!(f, "{t} terrain"),
        }
    }
}

/// Whether `c` is inside `terrain`, free of avatars, and walkable.
///
/// Metro cells are never passable here; see
/// [`TraversabilityMap::with_stations`].
pub fn passable(c: Cell, terrain: &TerrainGrid, occupancy: &Occupancy) -> bool {
    TraversabilityMap::new(terrain, occupancy).passable(c)
}

/// Passability view over one terrain snapshot and one occupancy snapshot.
#[derive(Debug, Clone, Copy)]
pub struct TraversabilityMap<'a> {
    terrain: &'a TerrainGrid,
    occupancy: &'a Occupancy,
    stations: Option<&'a TeleportLinkTable>,
}

impl<'a> TraversabilityMap<'a> {
    pub fn new(terrain: &'a TerrainGrid, occupancy: &'a Occupancy) -> Self {
        Self {
            terrain,
            occupancy,
            stations: None,
        }
    }

    /// Treat metro cells that are stations of `links` as passable.
    ///
    /// This holds for every mover class: a vehicle may stand on a station,
    /// it just cannot ride the link.
    pub fn with_stations(mut self, links: &'a TeleportLinkTable) -> Self {
        self.stations = Some(links);
        self
    }

    #[inline]
    pub fn terrain(&self) -> &'a TerrainGrid {
        self.terrain
    }

    /// Whether an avatar may enter `c`.
    #[inline]
    pub fn passable(&self, c: Cell) -> bool {
        self.blocked_reason(c).is_none()
    }

    /// `None` if `c` is passable, otherwise the first rule that blocks it:
    /// bounds, then occupancy, then terrain.
    pub fn blocked_reason(&self, c: Cell) -> Option<Blocked> {
        let Some(t) = self.terrain.at(c) else {
            return Some(Blocked::OutOfBounds);
        };
        if self.occupancy.contains(c) {
            return Some(Blocked::Occupied);
        }
        if t.is_walkable() || (t == TerrainCode::Metro && self.is_station(c)) {
            None
        } else {
            Some(Blocked::Terrain(t))
        }
    }

    fn is_station(&self, c: Cell) -> bool {
        self.stations.is_some_and(|links| links.is_station(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teleport::TeleportLink;

    fn grid() -> TerrainGrid {
        TerrainGrid::parse(
            "
            #.M
            SGM
            ",
        )
        .unwrap()
    }

    #[test]
    fn terrain_rules() {
        let g = grid();
        let occ = Occupancy::new();
        assert!(!passable(Cell::new(0, 0), &g, &occ));
        assert!(passable(Cell::new(1, 0), &g, &occ));
        assert!(!passable(Cell::new(2, 0), &g, &occ));
        assert!(passable(Cell::new(0, 1), &g, &occ));
        assert!(passable(Cell::new(1, 1), &g, &occ));
    }

    #[test]
    fn out_of_bounds_is_never_passable() {
        let g = grid();
        let occ = Occupancy::new();
        let map = TraversabilityMap::new(&g, &occ);
        for c in [Cell::new(-1, 0), Cell::new(3, 0), Cell::new(0, 2), Cell::new(0, -1)] {
            assert_eq!(map.blocked_reason(c), Some(Blocked::OutOfBounds));
        }
    }

    #[test]
    fn occupancy_overrides_terrain() {
        let g = grid();
        let occ: Occupancy = [Cell::new(1, 0)].into_iter().collect();
        let map = TraversabilityMap::new(&g, &occ);
        assert_eq!(map.blocked_reason(Cell::new(1, 0)), Some(Blocked::Occupied));
        assert!(map.passable(Cell::new(1, 1)));
    }

    #[test]
    fn station_metro_is_passable_bare_metro_is_not() {
        let g = grid();
        let occ = Occupancy::new();
        let links = TeleportLinkTable::new()
            .with_link(TeleportLink::pedestrian(Cell::new(2, 0), Cell::new(0, 1)));
        let map = TraversabilityMap::new(&g, &occ).with_stations(&links);
        assert!(map.passable(Cell::new(2, 0)));
        assert_eq!(
            map.blocked_reason(Cell::new(2, 1)),
            Some(Blocked::Terrain(TerrainCode::Metro))
        );
    }

    #[test]
    fn occupied_station_is_blocked() {
        let g = grid();
        let occ: Occupancy = [Cell::new(2, 0)].into_iter().collect();
        let links = TeleportLinkTable::new()
            .with_link(TeleportLink::pedestrian(Cell::new(2, 0), Cell::new(1, 0)));
        let map = TraversabilityMap::new(&g, &occ).with_stations(&links);
        assert_eq!(map.blocked_reason(Cell::new(2, 0)), Some(Blocked::Occupied));
    }

    #[test]
    fn blocked_display() {
        assert_eq!(Blocked::Terrain(TerrainCode::Wall).to_string(), "wall terrain");
        assert_eq!(Blocked::Occupied.to_string(), "occupied by another avatar");
    }
}

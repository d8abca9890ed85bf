//! One-step moves: grid adjacency plus metro hops.

use citynav_core::{Cell, MoverClass};

use crate::heuristic::MetroHeuristic;
use crate::teleport::TeleportLinkTable;
use crate::traits::{AstarPather, Pather, WeightedPather};
use crate::traversability::TraversabilityMap;

/// Generates the cells reachable in one step for a given mover.
///
/// Neighbors come out in a fixed order: up, right, down, left, then metro
/// destinations in link-table order. Every candidate goes through
/// [`TraversabilityMap::passable`], so an occupied station is never offered.
/// Diagonal moves are never generated.
#[derive(Debug, Clone, Copy)]
pub struct NeighborRule<'a> {
    map: TraversabilityMap<'a>,
    links: &'a TeleportLinkTable,
    mover: MoverClass,
}

impl<'a> NeighborRule<'a> {
    pub fn new(map: TraversabilityMap<'a>, links: &'a TeleportLinkTable, mover: MoverClass) -> Self {
        Self { map, links, mover }
    }

    #[inline]
    pub fn map(&self) -> &TraversabilityMap<'a> {
        &self.map
    }

    #[inline]
    pub fn mover(&self) -> MoverClass {
        self.mover
    }

    /// Neighbors of `c` as a fresh vector.
    pub fn collect(&self, c: Cell) -> Vec<Cell> {
        let mut buf = Vec::with_capacity(4);
        self.neighbors(c, &mut buf);
        buf
    }
}

impl Pather for NeighborRule<'_> {
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>) {
        for n in c.neighbors_4() {
            if self.map.passable(n) {
                buf.push(n);
            }
        }
        for d in self.links.destinations(c, self.mover) {
            if self.map.passable(d) && !buf.contains(&d) {
                buf.push(d);
            }
        }
    }
}

impl WeightedPather for NeighborRule<'_> {
    /// Grid steps and metro hops alike cost one.
    fn cost(&self, _from: Cell, _to: Cell) -> u32 {
        1
    }
}

/// [`NeighborRule`] paired with the [`MetroHeuristic`] for its goal.
#[derive(Debug, Clone)]
pub struct CityPather<'a> {
    rule: NeighborRule<'a>,
    heuristic: MetroHeuristic,
}

impl<'a> CityPather<'a> {
    pub fn new(rule: NeighborRule<'a>, heuristic: MetroHeuristic) -> Self {
        Self { rule, heuristic }
    }

    pub fn rule(&self) -> &NeighborRule<'a> {
        &self.rule
    }
}

impl Pather for CityPather<'_> {
    #[inline]
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>) {
        self.rule.neighbors(c, buf);
    }
}

impl WeightedPather for CityPather<'_> {
    #[inline]
    fn cost(&self, from: Cell, to: Cell) -> u32 {
        self.rule.cost(from, to)
    }
}

impl AstarPather for CityPather<'_> {
    /// Ignores `to`: the heuristic is built for a fixed goal.
    fn estimate(&self, from: Cell, _to: Cell) -> f64 {
        self.heuristic.estimate(from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teleport::TeleportLink;
    use citynav_core::{Occupancy, TerrainGrid};

    #[test]
    fn orthogonal_only() {
        let g = TerrainGrid::parse("...\n...\n...").unwrap();
        let occ = Occupancy::new();
        let links = TeleportLinkTable::new();
        let rule = NeighborRule::new(
            TraversabilityMap::new(&g, &occ),
            &links,
            MoverClass::Pedestrian,
        );
        assert_eq!(
            rule.collect(Cell::new(1, 1)),
            vec![Cell::new(1, 0), Cell::new(2, 1), Cell::new(1, 2), Cell::new(0, 1)]
        );
        // Corner: only in-bounds cells.
        assert_eq!(rule.collect(Cell::new(0, 0)), vec![Cell::new(1, 0), Cell::new(0, 1)]);
    }

    #[test]
    fn skips_walls_and_avatars() {
        let g = TerrainGrid::parse(".#.\n...").unwrap();
        let occ: Occupancy = [Cell::new(0, 1)].into_iter().collect();
        let links = TeleportLinkTable::new();
        let rule = NeighborRule::new(TraversabilityMap::new(&g, &occ), &links, MoverClass::Vehicle);
        assert!(rule.collect(Cell::new(0, 0)).is_empty());
        assert_eq!(rule.collect(Cell::new(1, 1)), vec![Cell::new(2, 1)]);
    }

    #[test]
    fn metro_hops_for_pedestrians_only() {
        let g = TerrainGrid::parse("M#M").unwrap();
        let occ = Occupancy::new();
        let links = TeleportLinkTable::new()
            .with_link(TeleportLink::pedestrian(Cell::new(0, 0), Cell::new(2, 0)));
        let map = TraversabilityMap::new(&g, &occ).with_stations(&links);
        let walker = NeighborRule::new(map, &links, MoverClass::Pedestrian);
        let driver = NeighborRule::new(map, &links, MoverClass::Vehicle);
        assert_eq!(walker.collect(Cell::new(0, 0)), vec![Cell::new(2, 0)]);
        assert!(driver.collect(Cell::new(0, 0)).is_empty());
    }

    #[test]
    fn occupied_destination_is_not_offered() {
        let g = TerrainGrid::parse(".#.").unwrap();
        let occ: Occupancy = [Cell::new(2, 0)].into_iter().collect();
        let links = TeleportLinkTable::new()
            .with_link(TeleportLink::pedestrian(Cell::new(0, 0), Cell::new(2, 0)));
        let rule = NeighborRule::new(
            TraversabilityMap::new(&g, &occ).with_stations(&links),
            &links,
            MoverClass::Pedestrian,
        );
        assert!(rule.collect(Cell::new(0, 0)).is_empty());
    }

    #[test]
    fn hop_to_adjacent_station_is_not_duplicated() {
        let g = TerrainGrid::parse("..").unwrap();
        let occ = Occupancy::new();
        let links = TeleportLinkTable::new()
            .with_link(TeleportLink::pedestrian(Cell::new(0, 0), Cell::new(1, 0)));
        let rule = NeighborRule::new(TraversabilityMap::new(&g, &occ), &links, MoverClass::Pedestrian);
        assert_eq!(rule.collect(Cell::new(0, 0)), vec![Cell::new(1, 0)]);
    }
}

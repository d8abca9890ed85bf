//! Shared pieces of the citynav demos: a built-in city, map loading and
//! random avatar placement.

use std::fs;
use std::path::Path;

use citynav_core::{Cell, GridError, MapSnapshot, Occupancy, TerrainGrid};
use rand::{Rng, RngExt};

pub const WIDTH: i32 = 30;
pub const HEIGHT: i32 = 30;

/// The demo city, one row per line. A river splits it at rows 15 and 16;
/// the only bridge is at column 27. Metro stations sit at (9, 8), (8, 9),
/// (15, 26) and (16, 25).
pub const CITY_CHART: &str = "
##############################
##.##G###.######.#####.####.##
#............................#
##.S#####.S#####.#####.####.##
##.######.######.#####.####.##
##.######.######.#####.####.G#
##.######.######.#####.####.##
##.######.######.S####.####.##
#........M...................#
##.#####M.######.#####.S###.##
##.######.######.#####.####.##
##.######.######.#####.####.##
##.#S####.######.#####.####.##
#............................#
##.######.#S####.###S#.####.##
###########################.##
###########################.##
##.######.######.#####.####.##
##.######.######.S####.####.##
#............................#
##.S#####.######.#####.###S.##
##.######.######.#####.####.##
##.######.######.#####.####.##
##.######.######.#####.####.##
##.######.######.#####.S###.##
#...............M............#
##.######.S####M.#####.####.##
##.######.######.#####.####.##
##.######.######.#####.G###.##
##############################
";

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Path(#[from] citynav_paths::PathError),
    #[error(transparent)]
    Encode(#[from] serde_json::Error),
}

/// The built-in city.
pub fn city_terrain() -> Result<TerrainGrid, GridError> {
    TerrainGrid::parse(CITY_CHART)
}

/// Load a map snapshot: terrain plus the avatars it lists.
pub fn load_map(path: &Path) -> Result<(TerrainGrid, Occupancy), DemoError> {
    let snapshot: MapSnapshot = read_json(path)?;
    let terrain = snapshot.terrain()?;
    log::info!(
        "loaded map {} ({}x{}, {} avatars) from {}",
        snapshot.id,
        terrain.width(),
        terrain.height(),
        snapshot.avatars.len(),
        path.display()
    );
    Ok((terrain, snapshot.occupancy()))
}

/// Deserialize a JSON file.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DemoError> {
    let text = fs::read_to_string(path).map_err(|source| DemoError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DemoError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Place up to `n` avatars on distinct walkable cells that are free and not
/// in `keep_clear`. Fewer are placed when the map runs out of room.
pub fn scatter_avatars(
    terrain: &TerrainGrid,
    occupancy: &mut Occupancy,
    n: usize,
    keep_clear: &[Cell],
    rng: &mut impl Rng,
) -> usize {
    let mut free: Vec<Cell> = terrain
        .iter()
        .filter(|&(c, t)| t.is_walkable() && !occupancy.contains(c) && !keep_clear.contains(&c))
        .map(|(c, _)| c)
        .collect();
    let placed = n.min(free.len());
    for i in 0..placed {
        let j = rng.random_range(i..free.len());
        free.swap(i, j);
        occupancy.insert(free[i]);
    }
    if placed < n {
        log::warn!("room for only {placed} of {n} avatars");
    }
    placed
}

/// Parse `X,Y` into a cell.
pub fn parse_cell(s: &str) -> Result<Cell, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(Cell::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use citynav_core::{MoverClass, TerrainCode};
    use citynav_paths::{AStarPathfinder, PathOutcome};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn city_has_metro_stations() {
        let g = city_terrain().unwrap();
        assert_eq!((g.width(), g.height()), (WIDTH, HEIGHT));
        for (x, y) in [(9, 8), (8, 9), (15, 26), (16, 25)] {
            assert_eq!(g.at(Cell::new(x, y)), Some(TerrainCode::Metro));
        }
        assert_eq!(g.cells_of(TerrainCode::Metro).count(), 4);
    }

    #[test]
    fn pedestrians_take_the_metro_across_the_river() {
        let g = city_terrain().unwrap();
        let pf = AStarPathfinder::city();
        let occ = Occupancy::new();
        let (from, to) = (Cell::new(2, 8), Cell::new(2, 25));

        let walk = pf
            .find_path(&g, &occ, MoverClass::Pedestrian, from, to)
            .unwrap()
            .into_path()
            .unwrap();
        let drive = pf
            .find_path(&g, &occ, MoverClass::Vehicle, from, to)
            .unwrap()
            .into_path()
            .unwrap();
        assert!(walk.len() < drive.len());
        assert!(drive.contains(&Cell::new(27, 15)));
        assert!(!walk.contains(&Cell::new(27, 15)));
    }

    #[test]
    fn scatter_respects_terrain_and_keep_clear() {
        let g = city_terrain().unwrap();
        let mut occ = Occupancy::new();
        let keep = [Cell::new(2, 2), Cell::new(3, 2)];
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(scatter_avatars(&g, &mut occ, 40, &keep, &mut rng), 40);
        assert_eq!(occ.len(), 40);
        for c in occ.iter() {
            assert!(g.at(c).is_some_and(TerrainCode::is_walkable));
            assert!(!keep.contains(&c));
        }
    }

    #[test]
    fn scatter_stops_when_full() {
        let g = TerrainGrid::parse("..#").unwrap();
        let mut occ = Occupancy::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(scatter_avatars(&g, &mut occ, 5, &[], &mut rng), 2);
    }

    #[test]
    fn parses_cells() {
        assert_eq!(parse_cell("3,4"), Ok(Cell::new(3, 4)));
        assert_eq!(parse_cell(" -1, 0"), Ok(Cell::new(-1, 0)));
        assert!(parse_cell("3").is_err());
        assert!(parse_cell("a,4").is_err());
    }
}

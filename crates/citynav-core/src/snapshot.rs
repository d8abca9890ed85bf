//! JSON snapshot of a city map as served by the map service.
//!
//! A snapshot carries the squares of one map, `squares[x][y]`, each with its
//! numeric terrain value and the tile image the front end draws. Avatar
//! positions may ride along so a caller can rebuild the occupancy set.

use serde::{Deserialize, Serialize};

use crate::geom::Cell;
use crate::grid::{GridError, TerrainGrid};
use crate::occupancy::Occupancy;

/// One map square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    pub value: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Position of an avatar on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarPosition {
    pub x: i32,
    pub y: i32,
}

/// A full map as exchanged with the map service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSnapshot {
    #[serde(default)]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub squares: Vec<Vec<Square>>,
    #[serde(default)]
    pub avatars: Vec<AvatarPosition>,
}

impl MapSnapshot {
    /// Build a snapshot from a terrain grid, without images or avatars.
    pub fn from_terrain(id: i64, terrain: &TerrainGrid) -> Self {
        let squares = terrain
            .to_columns()
            .into_iter()
            .map(|column| {
                column
                    .into_iter()
                    .map(|v| Square {
                        value: i32::from(v),
                        image: None,
                    })
                    .collect()
            })
            .collect();
        Self {
            id,
            name: None,
            squares,
            avatars: Vec::new(),
        }
    }

    /// Decode the squares into a validated [`TerrainGrid`].
    pub fn terrain(&self) -> Result<TerrainGrid, GridError> {
        let columns: Vec<Vec<i32>> = self
            .squares
            .iter()
            .map(|column| column.iter().map(|sq| sq.value).collect())
            .collect();
        TerrainGrid::from_columns(&columns)
    }

    /// Cells held by the snapshot's avatars.
    pub fn occupancy(&self) -> Occupancy {
        self.avatars.iter().map(|a| Cell::new(a.x, a.y)).collect()
    }
}

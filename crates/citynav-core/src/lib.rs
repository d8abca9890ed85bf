//! **citynav-core**: city map types for avatar navigation.
//!
//! This crate provides the foundational types shared by the *citynav*
//! workspace: grid geometry, terrain codes and mover classes, the terrain
//! grid itself, and the set of cells currently occupied by avatars.

pub mod geom;
pub mod grid;
pub mod occupancy;
#[cfg(feature = "serde")]
pub mod snapshot;
pub mod terrain;

pub use geom::{Bounds, Cell};
pub use grid::{GridError, TerrainGrid};
pub use occupancy::Occupancy;
#[cfg(feature = "serde")]
pub use snapshot::{AvatarPosition, MapSnapshot, Square};
pub use terrain::{MoverClass, TerrainCode, TerrainError};

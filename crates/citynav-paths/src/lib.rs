//! Route search for avatars on a city grid.
//!
//! This crate finds shortest walkable routes on a [`TerrainGrid`]:
//!
//! - **Traversability** from terrain codes and avatar occupancy ([`TraversabilityMap`])
//! - **Metro links** between non-adjacent station cells, pedestrians only ([`TeleportLinkTable`])
//! - **Neighbor generation** combining grid steps and metro hops ([`NeighborRule`])
//! - **A\*** search with deterministic tie-breaking ([`AStarPathfinder`])
//! - **BFS** hop distances, used as an optimality oracle ([`bfs_distance`])
//!
//! Every search owns its state; inputs are only borrowed, so a single
//! [`AStarPathfinder`] can serve any number of threads.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS |
//! | [`WeightedPather`] : [`Pather`] | edge costs |
//! | [`AstarPather`] : [`WeightedPather`] | A* |
//!
//! [`TerrainGrid`]: citynav_core::TerrainGrid

mod astar;
mod bfs;
mod config;
mod distance;
mod error;
mod heuristic;
mod neighbors;
mod reconstruct;
mod search;
mod teleport;
mod traits;
mod traversability;

pub use astar::{AStarPathfinder, PathOutcome, Search, SearchStats, astar_path};
pub use bfs::bfs_distance;
pub use config::{SearchBudget, SearchConfig};
pub use distance::{euclidean, manhattan};
pub use error::{Endpoint, PathError};
pub use heuristic::MetroHeuristic;
pub use neighbors::{CityPather, NeighborRule};
pub use reconstruct::reconstruct;
pub use teleport::{TeleportLink, TeleportLinkTable};
pub use traits::{AstarPather, Pather, WeightedPather};
pub use traversability::{Blocked, TraversabilityMap, passable};

//! Terrain codes and mover classes.
//!
//! The external map representation stores one small integer per cell:
//! `0` wall, `1` road, `2` metro, `3` shop or company, `4` goal marker.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised when decoding terrain codes or mover discriminators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TerrainError {
    #[error("unknown terrain code {0} (expected 0-4)")]
    UnknownCode(i32),

    #[error("unknown mover class code {0} (expected 0 = pedestrian, 1 = vehicle)")]
    UnknownMoverCode(i32),

    #[error("unknown mover class {0:?} (expected \"pedestrian\" or \"vehicle\")")]
    UnknownMoverName(String),
}

/// The terrain stored in a single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
#[repr(u8)]
pub enum TerrainCode {
    #[default]
    Wall = 0,
    Road = 1,
    Metro = 2,
    Shop = 3,
    Goal = 4,
}

impl TerrainCode {
    /// All codes in numeric order.
    pub const ALL: [TerrainCode; 5] = [
        TerrainCode::Wall,
        TerrainCode::Road,
        TerrainCode::Metro,
        TerrainCode::Shop,
        TerrainCode::Goal,
    ];

    /// Numeric code used by the external map representation.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Whether any mover may walk or drive onto this terrain.
    ///
    /// Metro cells are excluded: they are only entered through a teleport
    /// link.
    #[inline]
    pub const fn is_walkable(self) -> bool {
        matches!(self, TerrainCode::Road | TerrainCode::Shop | TerrainCode::Goal)
    }

    /// Character used in ASCII map charts.
    pub const fn rune(self) -> char {
        match self {
            TerrainCode::Wall => '#',
            TerrainCode::Road => '.',
            TerrainCode::Metro => 'M',
            TerrainCode::Shop => 'S',
            TerrainCode::Goal => 'G',
        }
    }

    /// Inverse of [`rune`](TerrainCode::rune).
    pub const fn from_rune(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(TerrainCode::Wall),
            '.' => Some(TerrainCode::Road),
            'M' => Some(TerrainCode::Metro),
            'S' => Some(TerrainCode::Shop),
            'G' => Some(TerrainCode::Goal),
            _ => None,
        }
    }
}

impl TryFrom<i32> for TerrainCode {
    type Error = TerrainError;

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(TerrainCode::Wall),
            1 => Ok(TerrainCode::Road),
            2 => Ok(TerrainCode::Metro),
            3 => Ok(TerrainCode::Shop),
            4 => Ok(TerrainCode::Goal),
            other => Err(TerrainError::UnknownCode(other)),
        }
    }
}

impl TryFrom<u8> for TerrainCode {
    type Error = TerrainError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Self::try_from(i32::from(v))
    }
}

impl From<TerrainCode> for u8 {
    fn from(t: TerrainCode) -> Self {
        t.code()
    }
}

impl fmt::Display for TerrainCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TerrainCode::Wall => "wall",
            TerrainCode::Road => "road",
            TerrainCode::Metro => "metro",
            TerrainCode::Shop => "shop",
            TerrainCode::Goal => "goal",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// MoverClass
// ---------------------------------------------------------------------------

/// The kind of avatar asking for a route.
///
/// Only pedestrians may ride the metro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum MoverClass {
    #[default]
    Pedestrian,
    Vehicle,
}

impl MoverClass {
    /// Whether this mover may use teleport links.
    #[inline]
    pub const fn rides_metro(self) -> bool {
        matches!(self, MoverClass::Pedestrian)
    }
}

impl TryFrom<i32> for MoverClass {
    type Error = TerrainError;

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(MoverClass::Pedestrian),
            1 => Ok(MoverClass::Vehicle),
            other => Err(TerrainError::UnknownMoverCode(other)),
        }
    }
}

impl FromStr for MoverClass {
    type Err = TerrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pedestrian" | "person" | "0" => Ok(MoverClass::Pedestrian),
            "vehicle" | "car" | "1" => Ok(MoverClass::Vehicle),
            _ => Err(TerrainError::UnknownMoverName(s.to_string())),
        }
    }
}

impl fmt::Display for MoverClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoverClass::Pedestrian => f.write_str("pedestrian"),
            MoverClass::Vehicle => f.write_str("vehicle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_integers() {
        for t in TerrainCode::ALL {
            assert_eq!(TerrainCode::try_from(t.code()), Ok(t));
        }
        assert_eq!(
            TerrainCode::try_from(5u8),
            Err(TerrainError::UnknownCode(5))
        );
        assert_eq!(
            TerrainCode::try_from(-1i32),
            Err(TerrainError::UnknownCode(-1))
        );
    }

    #[test]
    fn walkable_terrain() {
        let walkable: Vec<TerrainCode> = TerrainCode::ALL
            .into_iter()
            .filter(|t| t.is_walkable())
            .collect();
        assert_eq!(
            walkable,
            vec![TerrainCode::Road, TerrainCode::Shop, TerrainCode::Goal]
        );
    }

    #[test]
    fn runes_are_inverse() {
        for t in TerrainCode::ALL {
            assert_eq!(TerrainCode::from_rune(t.rune()), Some(t));
        }
        assert_eq!(TerrainCode::from_rune('?'), None);
    }

    #[test]
    fn mover_class_parsing() {
        assert_eq!(MoverClass::try_from(0), Ok(MoverClass::Pedestrian));
        assert_eq!(MoverClass::try_from(1), Ok(MoverClass::Vehicle));
        assert!(MoverClass::try_from(7).is_err());
        assert_eq!("Vehicle".parse::<MoverClass>(), Ok(MoverClass::Vehicle));
        assert_eq!(" pedestrian ".parse::<MoverClass>(), Ok(MoverClass::Pedestrian));
        assert!("boat".parse::<MoverClass>().is_err());
        assert!(MoverClass::Pedestrian.rides_metro());
        assert!(!MoverClass::Vehicle.rides_metro());
    }
}

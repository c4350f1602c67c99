//! Tile state and building kinds.
//!
//! A tile has at most one owner and at most one building. City buildings
//! exist only at spawn tiles and are placed at game start; everything else
//! is constructed through the Build action.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// A building standing on a tile.
///
/// The discriminants are the wire codes shared with external consumers;
/// code 0 is reserved for "no building" (`Option::None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Building {
    City = 1,
    Farm = 2,
    Market = 3,
    Embassy = 4,
}

impl Building {
    /// Returns the wire code for an optional building (0 = none).
    pub fn code(building: Option<Building>) -> u8 {
        building.map_or(0, |b| b as u8)
    }

    /// Parses a wire code into an optional building.
    pub fn from_code(code: u8) -> Option<Option<Building>> {
        match code {
            0 => Some(None),
            1 => Some(Some(Building::City)),
            2 => Some(Some(Building::Farm)),
            3 => Some(Some(Building::Market)),
            4 => Some(Some(Building::Embassy)),
            _ => None,
        }
    }

    /// Display name used in the event feed.
    pub const fn name(self) -> &'static str {
        match self {
            Building::City => "City",
            Building::Farm => "Farm",
            Building::Market => "Market",
            Building::Embassy => "Embassy",
        }
    }
}

/// The kinds a player may construct with the Build action.
///
/// City is deliberately absent: cities are placed only at game start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildKind {
    Farm,
    Market,
    Embassy,
}

impl BuildKind {
    /// The building this kind constructs.
    pub const fn building(self) -> Building {
        match self {
            BuildKind::Farm => Building::Farm,
            BuildKind::Market => Building::Market,
            BuildKind::Embassy => Building::Embassy,
        }
    }

    /// Parses a lowercase protocol keyword.
    pub fn from_name(s: &str) -> Option<BuildKind> {
        match s {
            "farm" => Some(BuildKind::Farm),
            "market" => Some(BuildKind::Market),
            "embassy" => Some(BuildKind::Embassy),
            _ => None,
        }
    }
}

/// A single map tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub owner: Option<PlayerId>,
    pub building: Option<Building>,
    pub guard: bool,
}

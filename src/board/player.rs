//! Player identity and per-player ledger.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Food and wood a player starts with on joining.
pub const STARTING_FOOD: u32 = 5;
/// See [`STARTING_FOOD`].
pub const STARTING_WOOD: u32 = 5;

/// A player identity, assigned in join order starting at 0.
///
/// Identity order is also victory priority: when several players satisfy
/// the victory conditions after the same action, the lowest id wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// One of the two fungible resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Resource {
    Food = 0,
    Wood = 1,
}

impl Resource {
    /// Returns the wire code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Parses a wire code.
    pub fn from_code(code: u8) -> Option<Resource> {
        match code {
            0 => Some(Resource::Food),
            1 => Some(Resource::Wood),
            _ => None,
        }
    }

    /// Parses a lowercase protocol keyword.
    pub fn from_name(s: &str) -> Option<Resource> {
        match s {
            "food" => Some(Resource::Food),
            "wood" => Some(Resource::Wood),
            _ => None,
        }
    }

    /// Display name used in the event feed.
    pub const fn name(self) -> &'static str {
        match self {
            Resource::Food => "food",
            Resource::Wood => "wood",
        }
    }
}

/// Per-player state: resources, reputation, and victory progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub food: u32,
    pub wood: u32,
    /// Cooperative standing. Clamped at a floor of 0.
    pub reputation: i32,
    /// The spawn tile holding this player's City.
    pub city_tile: u32,
    pub embassy_built: bool,
    pub treaties_completed: u32,
    pub alive: bool,
    /// The last turn in which this player spent their action.
    /// Invariant: `last_action_turn <= current_turn`.
    pub last_action_turn: u32,
}

impl Player {
    /// Creates a freshly joined player at the given spawn tile.
    pub fn new(id: PlayerId, city_tile: u32) -> Self {
        Player {
            id,
            food: STARTING_FOOD,
            wood: STARTING_WOOD,
            reputation: 0,
            city_tile,
            embassy_built: false,
            treaties_completed: 0,
            alive: true,
            last_action_turn: 0,
        }
    }

    /// Reads the balance of one resource.
    pub const fn balance(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Food => self.food,
            Resource::Wood => self.wood,
        }
    }

    /// Adds to one resource balance.
    pub fn credit(&mut self, resource: Resource, amount: u32) {
        match resource {
            Resource::Food => self.food += amount,
            Resource::Wood => self.wood += amount,
        }
    }

    /// Subtracts from one resource balance. Caller must have checked the
    /// balance; debiting below zero is a logic error.
    pub fn debit(&mut self, resource: Resource, amount: u32) {
        match resource {
            Resource::Food => self.food -= amount,
            Resource::Wood => self.wood -= amount,
        }
    }

    /// Lowers reputation by `penalty`, clamped at the floor of 0.
    pub fn penalize_reputation(&mut self, penalty: i32) {
        self.reputation = (self.reputation - penalty).max(0);
    }
}

//! Board representation and game-state types.
//!
//! Contains the core data structures for the grid, tiles, players,
//! treaties, proposals, actions, and the overall game state.

pub mod action;
pub mod diplomacy;
pub mod grid;
pub mod player;
pub mod state;
pub mod tile;

pub use action::Action;
pub use diplomacy::{
    Proposal, ProposalKind, Treaty, TreatyKind, TreatyStatus, MAX_TREATY_DURATION,
};
pub use grid::{Grid, GRID_SIZE};
pub use player::{Player, PlayerId, Resource, STARTING_FOOD, STARTING_WOOD};
pub use state::{
    era_of, GameState, MAX_PLAYERS, TREATY_BREAK_PENALTY, TURNS_PER_ERA, VICTORY_REP,
    VICTORY_TREATIES,
};
pub use tile::{BuildKind, Building, Tile};

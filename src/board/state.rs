//! Authoritative game state.
//!
//! Holds the complete snapshot of a game at a point in time: the grid,
//! every tile, every player, and the full treaty and proposal history.
//! The state is a plain value; all mutation goes through `rules::apply`,
//! which validates an action and commits it atomically.

use serde::{Deserialize, Serialize};

use super::diplomacy::{Proposal, Treaty};
use super::grid::Grid;
use super::player::{Player, PlayerId};
use super::tile::Tile;

/// Maximum number of players in a game (one per grid corner).
pub const MAX_PLAYERS: usize = 4;

/// Number of turns in one era.
pub const TURNS_PER_ERA: u32 = 5;

/// Reputation required for diplomatic victory.
pub const VICTORY_REP: i32 = 10;

/// Completed treaties required for diplomatic victory.
pub const VICTORY_TREATIES: u32 = 2;

/// Reputation lost for breaking an active treaty.
pub const TREATY_BREAK_PENALTY: i32 = 2;

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub grid: Grid,
    /// One entry per tile id, `0..grid.tile_count()`.
    pub tiles: Vec<Tile>,
    /// Players in join order; `PlayerId` indexes this vector.
    pub players: Vec<Player>,
    /// Append-only treaty history; `Treaty::id` indexes this vector.
    pub treaties: Vec<Treaty>,
    /// Append-only proposal history; `Proposal::id` indexes this vector.
    pub proposals: Vec<Proposal>,
    pub started: bool,
    /// Current turn, 1-based once the game starts.
    pub current_turn: u32,
    pub winner: Option<PlayerId>,
}

impl GameState {
    /// Creates an empty pre-game state on the given grid.
    pub fn new(grid: Grid) -> Self {
        GameState {
            grid,
            tiles: vec![Tile::default(); grid.tile_count() as usize],
            players: Vec::new(),
            treaties: Vec::new(),
            proposals: Vec::new(),
            started: false,
            current_turn: 0,
            winner: None,
        }
    }

    /// The current era, derived from the turn counter.
    pub fn current_era(&self) -> u32 {
        era_of(self.current_turn)
    }

    /// Looks up a player by id.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.0 as usize)
    }

    /// Looks up a player mutably by id.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.0 as usize)
    }

    /// Looks up a tile by id.
    pub fn tile(&self, id: u32) -> Option<&Tile> {
        self.tiles.get(id as usize)
    }

    /// The unexecuted proposal of the current era, if one exists.
    pub fn active_proposal(&self) -> Option<&Proposal> {
        let era = self.current_era();
        self.proposals.iter().find(|p| !p.executed && p.era == era)
    }

    /// All treaties in which `player` is a party, in id order.
    pub fn treaties_for(&self, player: PlayerId) -> Vec<&Treaty> {
        self.treaties.iter().filter(|t| t.is_party(player)).collect()
    }

    /// Returns true if `actor` owns any tile adjacent to `tile`.
    pub fn owns_adjacent(&self, actor: PlayerId, tile: u32) -> bool {
        let Ok(neighbors) = self.grid.adjacent_ids(tile) else {
            return false;
        };
        neighbors
            .iter()
            .any(|&n| self.tiles[n as usize].owner == Some(actor))
    }

    /// Number of living players.
    pub fn living_players(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    /// Returns true if every living player has spent their action this turn.
    pub fn all_have_acted(&self) -> bool {
        self.players
            .iter()
            .filter(|p| p.alive)
            .all(|p| p.last_action_turn >= self.current_turn)
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new(Grid::default())
    }
}

/// The era a given turn belongs to: `(turn - 1) / TURNS_PER_ERA`.
/// Turn 0 (pre-game) maps to era 0.
pub fn era_of(turn: u32) -> u32 {
    turn.saturating_sub(1) / TURNS_PER_ERA
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_empty() {
        let state = GameState::default();
        assert_eq!(state.tiles.len(), 25);
        assert!(state.players.is_empty());
        assert!(state.treaties.is_empty());
        assert!(!state.started);
        assert_eq!(state.current_turn, 0);
        assert!(state.winner.is_none());
    }

    #[test]
    fn era_boundaries() {
        assert_eq!(era_of(0), 0);
        assert_eq!(era_of(1), 0);
        assert_eq!(era_of(5), 0);
        assert_eq!(era_of(6), 1);
        assert_eq!(era_of(10), 1);
        assert_eq!(era_of(11), 2);
    }

    #[test]
    fn player_lookup_by_id() {
        let mut state = GameState::default();
        state.players.push(Player::new(PlayerId(0), 0));
        assert!(state.player(PlayerId(0)).is_some());
        assert!(state.player(PlayerId(1)).is_none());
    }

    #[test]
    fn owns_adjacent_checks_neighbors_only() {
        let mut state = GameState::default();
        state.players.push(Player::new(PlayerId(0), 0));
        state.tiles[0].owner = Some(PlayerId(0));
        assert!(state.owns_adjacent(PlayerId(0), 1));
        assert!(state.owns_adjacent(PlayerId(0), 5));
        assert!(!state.owns_adjacent(PlayerId(0), 6));
        assert!(!state.owns_adjacent(PlayerId(0), 24));
    }

    #[test]
    fn state_serializes_to_json_and_back() {
        let mut state = GameState::default();
        state.players.push(Player::new(PlayerId(0), 0));
        state.tiles[0].owner = Some(PlayerId(0));
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}

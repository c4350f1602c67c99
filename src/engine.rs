//! Engine session management.
//!
//! Holds the authoritative `GameState` and the acting-player selection
//! between commands, dispatches actions into the rules engine, and writes
//! protocol responses: one `event` line per emitted domain event, `ok` on
//! success, `error <message>` on rejection, and JSON payloads for queries.

use std::io::Write;

use crate::board::{Action, GameState, PlayerId};
use crate::protocol::Query;
use crate::rules;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub state: GameState,
    pub active: Option<PlayerId>,
}

impl Engine {
    /// Creates a new engine with an empty pre-game state.
    pub fn new() -> Self {
        Engine {
            state: GameState::default(),
            active: None,
        }
    }

    /// Resets all engine state for a new game.
    pub fn new_game(&mut self) {
        self.state = GameState::default();
        self.active = None;
    }

    /// Selects the acting player for subsequent commands.
    pub fn set_player(&mut self, player: PlayerId) {
        self.active = Some(player);
    }

    /// Handles the protocol handshake.
    pub fn handle_eci<W: Write>(&self, out: &mut W) {
        writeln!(out, "id name entente").unwrap();
        writeln!(out, "id author entente").unwrap();
        writeln!(out, "protocol_version 1").unwrap();
        writeln!(out, "eciok").unwrap();
        out.flush().unwrap();
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) {
        writeln!(out, "readyok").unwrap();
        out.flush().unwrap();
    }

    /// Applies an action for the acting player and writes the outcome.
    pub fn handle_action<W: Write>(&mut self, action: Action, out: &mut W) {
        let Some(actor) = self.active else {
            writeln!(out, "error no acting player set; use 'player <id>'").unwrap();
            out.flush().unwrap();
            return;
        };

        match rules::apply(&mut self.state, actor, action) {
            Ok(events) => {
                for event in &events {
                    writeln!(out, "event {}", event).unwrap();
                }
                writeln!(out, "ok").unwrap();
            }
            Err(e) => {
                writeln!(out, "error {}", e).unwrap();
            }
        }
        out.flush().unwrap();
    }

    /// Answers a read-only query with a JSON payload.
    pub fn handle_query<W: Write>(&self, query: Query, out: &mut W) {
        match query {
            Query::State => {
                let json = serde_json::to_string(&self.state).unwrap();
                writeln!(out, "state {}", json).unwrap();
            }
            Query::Player(id) => match self.state.player(PlayerId(id)) {
                Some(player) => {
                    let json = serde_json::to_string(player).unwrap();
                    writeln!(out, "player {}", json).unwrap();
                }
                None => writeln!(out, "error value out of range").unwrap(),
            },
            Query::Tile(id) => match self.state.tile(id) {
                Some(tile) => {
                    let json = serde_json::to_string(tile).unwrap();
                    writeln!(out, "tile {}", json).unwrap();
                }
                None => writeln!(out, "error value out of range").unwrap(),
            },
            Query::ActiveProposal => {
                let json = serde_json::to_string(&self.state.active_proposal()).unwrap();
                writeln!(out, "proposal {}", json).unwrap();
            }
            Query::TreatiesFor(id) => {
                if self.state.player(PlayerId(id)).is_none() {
                    writeln!(out, "error value out of range").unwrap();
                } else {
                    let treaties = self.state.treaties_for(PlayerId(id));
                    let json = serde_json::to_string(&treaties).unwrap();
                    writeln!(out, "treaties {}", json).unwrap();
                }
            }
        }
        out.flush().unwrap();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Action;

    fn act(engine: &mut Engine, player: u8, action: Action) -> String {
        engine.set_player(PlayerId(player));
        let mut out = Vec::new();
        engine.handle_action(action, &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn new_engine_has_no_state() {
        let engine = Engine::new();
        assert!(engine.state.players.is_empty());
        assert!(!engine.state.started);
        assert!(engine.active.is_none());
    }

    #[test]
    fn new_game_resets_state() {
        let mut engine = Engine::new();
        act(&mut engine, 0, Action::Join);
        engine.new_game();
        assert!(engine.state.players.is_empty());
        assert!(engine.active.is_none());
    }

    #[test]
    fn handle_eci_outputs_handshake() {
        let engine = Engine::new();
        let mut out = Vec::new();
        engine.handle_eci(&mut out);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("id name entente"));
        assert!(text.contains("protocol_version 1"));
        assert!(text.ends_with("eciok\n"));
    }

    #[test]
    fn handle_isready_outputs_readyok() {
        let engine = Engine::new();
        let mut out = Vec::new();
        engine.handle_isready(&mut out);
        assert_eq!(String::from_utf8(out).unwrap().trim(), "readyok");
    }

    #[test]
    fn action_without_player_selection_errors() {
        let mut engine = Engine::new();
        let mut out = Vec::new();
        engine.handle_action(Action::Join, &mut out);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("error no acting player"));
    }

    #[test]
    fn successful_action_emits_events_then_ok() {
        let mut engine = Engine::new();
        let text = act(&mut engine, 0, Action::Join);
        assert!(text.contains("event P0 joined the game at tile 0"));
        assert!(text.ends_with("ok\n"));
    }

    #[test]
    fn rejected_action_emits_error_line() {
        let mut engine = Engine::new();
        act(&mut engine, 0, Action::Join);
        let text = act(&mut engine, 0, Action::Join);
        assert_eq!(text, "error player has already joined\n");
    }

    #[test]
    fn full_session_flow() {
        let mut engine = Engine::new();
        act(&mut engine, 0, Action::Join);
        act(&mut engine, 1, Action::Join);
        let started = act(&mut engine, 0, Action::Start);
        assert!(started.contains("event Game has started with 2 players!"));

        let expanded = act(&mut engine, 0, Action::Expand { tile: 1 });
        assert!(expanded.contains("event P0 expanded to tile 1"));
        assert_eq!(engine.state.tiles[1].owner, Some(PlayerId(0)));
    }

    #[test]
    fn queries_return_json() {
        let mut engine = Engine::new();
        act(&mut engine, 0, Action::Join);

        let mut out = Vec::new();
        engine.handle_query(Query::State, &mut out);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("state {"));
        assert!(text.contains("\"started\":false"));

        let mut out = Vec::new();
        engine.handle_query(Query::Player(0), &mut out);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("player {"));
        assert!(text.contains("\"food\":5"));

        let mut out = Vec::new();
        engine.handle_query(Query::Player(3), &mut out);
        assert!(String::from_utf8(out).unwrap().starts_with("error"));

        let mut out = Vec::new();
        engine.handle_query(Query::ActiveProposal, &mut out);
        assert_eq!(String::from_utf8(out).unwrap(), "proposal null\n");
    }
}

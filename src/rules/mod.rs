//! The rules engine: validation, atomic application, and turn scheduling.
//!
//! `apply` is the single entry point for every mutation. It validates the
//! action against the current state, commits it atomically (a rejected
//! action never leaves a partial mutation), spends the actor's per-turn
//! action where applicable, advances the shared turn counter once every
//! living player has acted, and re-evaluates the victory condition after
//! every commit.

pub mod economy;
pub mod governance;
pub mod treaty;

use crate::board::{
    Action, BuildKind, Building, GameState, Player, PlayerId, Resource, MAX_PLAYERS,
    VICTORY_REP, VICTORY_TREATIES,
};
use crate::error::RuleError;
use crate::event::Event;

/// Validates and applies one action for `actor`, returning the events it
/// emitted.
///
/// Errors are deterministic: the same (state, action) pair always produces
/// the same result.
pub fn apply(
    state: &mut GameState,
    actor: PlayerId,
    action: Action,
) -> Result<Vec<Event>, RuleError> {
    match action {
        Action::Join => join(state, actor),
        Action::Start => start(state, actor),
        _ => in_game(state, actor, action),
    }
}

/// Adds `actor` to the lobby, placing their City at the next corner spawn.
fn join(state: &mut GameState, actor: PlayerId) -> Result<Vec<Event>, RuleError> {
    if state.started {
        return Err(RuleError::AlreadyStarted);
    }
    if state.players.len() >= MAX_PLAYERS {
        return Err(RuleError::GameFull);
    }
    if (actor.0 as usize) < state.players.len() {
        return Err(RuleError::AlreadyJoined);
    }
    // Identities are assigned in join order.
    if actor.0 as usize != state.players.len() {
        return Err(RuleError::OutOfRange);
    }

    let city_tile = state.grid.spawn_tiles()[actor.0 as usize];
    state.tiles[city_tile as usize].owner = Some(actor);
    state.tiles[city_tile as usize].building = Some(Building::City);
    state.players.push(Player::new(actor, city_tile));
    Ok(vec![Event::PlayerJoined { player: actor, city_tile }])
}

/// Starts the game. Any joined player may start once two have joined.
fn start(state: &mut GameState, actor: PlayerId) -> Result<Vec<Event>, RuleError> {
    if state.started {
        return Err(RuleError::AlreadyStarted);
    }
    if state.player(actor).is_none() {
        return Err(RuleError::NotAPlayer);
    }
    if state.players.len() < 2 {
        return Err(RuleError::NotEnoughPlayers);
    }

    state.started = true;
    state.current_turn = 1;
    Ok(vec![Event::GameStarted { players: state.players.len() as u32 }])
}

/// Gates and dispatches every post-start action.
fn in_game(
    state: &mut GameState,
    actor: PlayerId,
    action: Action,
) -> Result<Vec<Event>, RuleError> {
    if state.winner.is_some() {
        return Err(RuleError::GameOver);
    }
    if !state.started {
        return Err(RuleError::NotStarted);
    }
    let Some(player) = state.player(actor) else {
        return Err(RuleError::NotAPlayer);
    };

    let turn_consuming = action.is_turn_consuming();
    if turn_consuming && player.last_action_turn >= state.current_turn {
        return Err(RuleError::NotYourTurn);
    }

    let mut events = match action {
        Action::EndTurn => end_turn(state, actor)?,
        Action::Expand { tile } => expand(state, actor, tile)?,
        Action::Build { tile, kind } => build(state, actor, tile, kind)?,
        Action::TrainGuard { tile } => train_guard(state, actor, tile)?,
        Action::SendAid { to, resource, amount } => send_aid(state, actor, to, resource, amount)?,
        Action::ProposeTreaty { to, kind, duration } => {
            treaty::propose(state, actor, to, kind, duration)?
        }
        Action::AcceptTreaty { id } => treaty::accept(state, actor, id)?,
        Action::BreakTreaty { id } => treaty::break_treaty(state, actor, id)?,
        Action::CreateProposal { kind, target } => governance::create(state, kind, target)?,
        Action::Vote { id, support } => governance::vote(state, actor, id, support)?,
        Action::ExecuteProposal { id } => governance::execute(state, id)?,
        // Handled in `apply` before reaching here.
        Action::Join | Action::Start => return Err(RuleError::AlreadyStarted),
    };

    if turn_consuming {
        let current_turn = state.current_turn;
        if let Some(player) = state.player_mut(actor) {
            player.last_action_turn = current_turn;
        }
        if state.all_have_acted() {
            state.current_turn += 1;
            events.push(Event::TurnAdvanced { turn: state.current_turn });
            events.extend(treaty::sweep_completed(state));
        }
    }

    if state.winner.is_none() {
        if let Some(winner) = evaluate_victory(state) {
            state.winner = Some(winner);
            events.push(Event::Victory { player: winner });
        }
    }
    Ok(events)
}

/// Pays building yields to the actor and spends their action.
fn end_turn(state: &mut GameState, actor: PlayerId) -> Result<Vec<Event>, RuleError> {
    let (food, wood) = economy::building_yields(state, actor);
    if let Some(player) = state.player_mut(actor) {
        player.food += food;
        player.wood += wood;
    }
    Ok(vec![Event::TurnEnded { player: actor }])
}

/// Claims an unowned tile adjacent to the actor's territory.
fn expand(state: &mut GameState, actor: PlayerId, tile: u32) -> Result<Vec<Event>, RuleError> {
    if !state.grid.contains(tile) {
        return Err(RuleError::OutOfRange);
    }
    if state.tiles[tile as usize].owner.is_some() {
        return Err(RuleError::TileAlreadyOwned);
    }
    if !state.owns_adjacent(actor, tile) {
        return Err(RuleError::NotAdjacent);
    }
    if let Some(player) = state.player_mut(actor) {
        economy::charge(player, economy::EXPAND_COST)?;
    }
    state.tiles[tile as usize].owner = Some(actor);
    Ok(vec![Event::TerritoryExpanded { player: actor, tile }])
}

/// Constructs a building on an owned, empty tile.
fn build(
    state: &mut GameState,
    actor: PlayerId,
    tile: u32,
    kind: BuildKind,
) -> Result<Vec<Event>, RuleError> {
    if !state.grid.contains(tile) {
        return Err(RuleError::OutOfRange);
    }
    if state.tiles[tile as usize].owner != Some(actor) {
        return Err(RuleError::TileNotOwned);
    }
    if state.tiles[tile as usize].building.is_some() {
        return Err(RuleError::BuildingAlreadyPresent);
    }
    if let Some(player) = state.player_mut(actor) {
        economy::charge(player, economy::build_cost(kind))?;
        if kind == BuildKind::Embassy {
            player.embassy_built = true;
        }
    }
    let building = kind.building();
    state.tiles[tile as usize].building = Some(building);
    Ok(vec![Event::BuildingBuilt { player: actor, tile, building }])
}

/// Stations a guard on an owned, unguarded tile.
fn train_guard(state: &mut GameState, actor: PlayerId, tile: u32) -> Result<Vec<Event>, RuleError> {
    if !state.grid.contains(tile) {
        return Err(RuleError::OutOfRange);
    }
    if state.tiles[tile as usize].owner != Some(actor) {
        return Err(RuleError::TileNotOwned);
    }
    if state.tiles[tile as usize].guard {
        return Err(RuleError::GuardAlreadyPresent);
    }
    if let Some(player) = state.player_mut(actor) {
        economy::charge(player, economy::GUARD_COST)?;
    }
    state.tiles[tile as usize].guard = true;
    Ok(vec![Event::GuardTrained { player: actor, tile }])
}

/// Transfers resources to another player, raising the sender's reputation.
fn send_aid(
    state: &mut GameState,
    actor: PlayerId,
    to: PlayerId,
    resource: Resource,
    amount: u32,
) -> Result<Vec<Event>, RuleError> {
    if to == actor {
        return Err(RuleError::InvalidTarget);
    }
    if !state.player(to).is_some_and(|p| p.alive) {
        return Err(RuleError::InvalidTarget);
    }
    if amount == 0 {
        return Err(RuleError::OutOfRange);
    }
    economy::transfer(state, actor, to, resource, amount)?;
    if let Some(sender) = state.player_mut(actor) {
        sender.reputation += 1;
    }
    Ok(vec![Event::AidSent { from: actor, to, resource, amount }])
}

/// Returns the winner, if any: the lowest-id living player satisfying all
/// three victory conditions simultaneously.
fn evaluate_victory(state: &GameState) -> Option<PlayerId> {
    state
        .players
        .iter()
        .filter(|p| p.alive)
        .find(|p| {
            p.reputation >= VICTORY_REP
                && p.embassy_built
                && p.treaties_completed >= VICTORY_TREATIES
        })
        .map(|p| p.id)
}

//! Resource costs, balance checks, and building yields.
//!
//! Every action has a fixed cost; checks happen before any balance is
//! touched so a rejected action never mutates. Yields are paid only by
//! EndTurn: one food per Farm and one wood per Market on owned tiles.

use crate::board::{BuildKind, Building, GameState, Player, PlayerId, Resource};
use crate::error::RuleError;

/// A fixed food/wood price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cost {
    pub food: u32,
    pub wood: u32,
}

/// Cost of claiming an adjacent unowned tile.
pub const EXPAND_COST: Cost = Cost { food: 2, wood: 1 };

/// Cost of stationing a guard.
pub const GUARD_COST: Cost = Cost { food: 2, wood: 1 };

/// Construction cost per buildable kind.
pub const fn build_cost(kind: BuildKind) -> Cost {
    match kind {
        BuildKind::Farm => Cost { food: 0, wood: 2 },
        BuildKind::Market => Cost { food: 0, wood: 3 },
        BuildKind::Embassy => Cost { food: 3, wood: 5 },
    }
}

/// Deducts `cost` from the player, or fails without touching balances.
pub fn charge(player: &mut Player, cost: Cost) -> Result<(), RuleError> {
    if player.food < cost.food || player.wood < cost.wood {
        return Err(RuleError::InsufficientResources);
    }
    player.food -= cost.food;
    player.wood -= cost.wood;
    Ok(())
}

/// Food and wood income from buildings on tiles owned by `player`.
pub fn building_yields(state: &GameState, player: PlayerId) -> (u32, u32) {
    let mut food = 0;
    let mut wood = 0;
    for tile in &state.tiles {
        if tile.owner != Some(player) {
            continue;
        }
        match tile.building {
            Some(Building::Farm) => food += 1,
            Some(Building::Market) => wood += 1,
            _ => {}
        }
    }
    (food, wood)
}

/// Moves `amount` of `resource` from one player to another.
///
/// Caller has validated that both players exist and are distinct; this
/// only enforces the sender's balance.
pub fn transfer(
    state: &mut GameState,
    from: PlayerId,
    to: PlayerId,
    resource: Resource,
    amount: u32,
) -> Result<(), RuleError> {
    {
        let sender = state.player(from).ok_or(RuleError::NotAPlayer)?;
        if sender.balance(resource) < amount {
            return Err(RuleError::InsufficientResources);
        }
    }
    if let Some(sender) = state.player_mut(from) {
        sender.debit(resource, amount);
    }
    if let Some(recipient) = state.player_mut(to) {
        recipient.credit(resource, amount);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Grid, Player};

    fn state_with_players(n: u8) -> GameState {
        let mut state = GameState::new(Grid::default());
        for i in 0..n {
            state.players.push(Player::new(PlayerId(i), 0));
        }
        state
    }

    #[test]
    fn build_costs_match_table() {
        assert_eq!(build_cost(BuildKind::Farm), Cost { food: 0, wood: 2 });
        assert_eq!(build_cost(BuildKind::Market), Cost { food: 0, wood: 3 });
        assert_eq!(build_cost(BuildKind::Embassy), Cost { food: 3, wood: 5 });
    }

    #[test]
    fn charge_is_all_or_nothing() {
        let mut player = Player::new(PlayerId(0), 0);
        player.food = 1;
        player.wood = 10;
        // Food is short: wood must stay untouched.
        assert_eq!(charge(&mut player, EXPAND_COST), Err(RuleError::InsufficientResources));
        assert_eq!(player.food, 1);
        assert_eq!(player.wood, 10);

        player.food = 2;
        charge(&mut player, EXPAND_COST).unwrap();
        assert_eq!(player.food, 0);
        assert_eq!(player.wood, 9);
    }

    #[test]
    fn yields_count_farms_and_markets_of_owner_only() {
        let mut state = state_with_players(2);
        state.tiles[0].owner = Some(PlayerId(0));
        state.tiles[0].building = Some(Building::City);
        state.tiles[1].owner = Some(PlayerId(0));
        state.tiles[1].building = Some(Building::Farm);
        state.tiles[2].owner = Some(PlayerId(0));
        state.tiles[2].building = Some(Building::Market);
        state.tiles[3].owner = Some(PlayerId(1));
        state.tiles[3].building = Some(Building::Farm);

        assert_eq!(building_yields(&state, PlayerId(0)), (1, 1));
        assert_eq!(building_yields(&state, PlayerId(1)), (1, 0));
    }

    #[test]
    fn transfer_moves_balance_or_fails_clean() {
        let mut state = state_with_players(2);
        transfer(&mut state, PlayerId(0), PlayerId(1), Resource::Food, 3).unwrap();
        assert_eq!(state.players[0].food, 2);
        assert_eq!(state.players[1].food, 8);

        let err = transfer(&mut state, PlayerId(0), PlayerId(1), Resource::Food, 99);
        assert_eq!(err, Err(RuleError::InsufficientResources));
        assert_eq!(state.players[0].food, 2);
        assert_eq!(state.players[1].food, 8);
    }
}

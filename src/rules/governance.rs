//! Era-scoped collective governance.
//!
//! One proposal may be active per era. Every player holds one
//! non-retractable ballot per proposal; execution requires a
//! three-quarter supermajority of the player count and applies the
//! kind-specific economic effect.

use crate::board::{GameState, PlayerId, Proposal, ProposalKind};
use crate::error::RuleError;
use crate::event::Event;

/// Resources moved by Sanction and Subsidy.
const SANCTION_AMOUNT: u32 = 5;
/// Resources granted to everyone by Open Borders.
const OPEN_BORDERS_AMOUNT: u32 = 2;
/// Per-player levy collected by Global Tax.
const GLOBAL_TAX_AMOUNT: u32 = 2;

/// Votes required to execute: `ceil(3 * player_count / 4)`.
pub fn majority(player_count: usize) -> u32 {
    ((3 * player_count + 3) / 4) as u32
}

/// Raises a proposal for the current era.
pub fn create(
    state: &mut GameState,
    kind: ProposalKind,
    target: PlayerId,
) -> Result<Vec<Event>, RuleError> {
    if state.active_proposal().is_some() {
        return Err(RuleError::ProposalAlreadyActive);
    }
    if state.player(target).is_none() {
        return Err(RuleError::InvalidTarget);
    }

    let id = state.proposals.len() as u32;
    let era = state.current_era();
    state.proposals.push(Proposal {
        id,
        kind,
        target,
        votes_for: 0,
        votes_against: 0,
        voters: Vec::new(),
        executed: false,
        era,
    });
    Ok(vec![Event::ProposalCreated { id, kind, target }])
}

/// Casts `actor`'s ballot on a proposal of the current era.
pub fn vote(
    state: &mut GameState,
    actor: PlayerId,
    id: u32,
    support: bool,
) -> Result<Vec<Event>, RuleError> {
    let era = state.current_era();
    let proposal = state
        .proposals
        .get_mut(id as usize)
        .ok_or(RuleError::OutOfRange)?;
    if proposal.executed {
        return Err(RuleError::AlreadyExecuted);
    }
    if proposal.era != era {
        return Err(RuleError::ProposalLapsed);
    }
    if proposal.has_voted(actor) {
        return Err(RuleError::AlreadyVoted);
    }

    proposal.voters.push(actor);
    if support {
        proposal.votes_for += 1;
    } else {
        proposal.votes_against += 1;
    }
    Ok(vec![Event::VoteCast { id, voter: actor, support }])
}

/// Executes a proposal that reached the supermajority.
pub fn execute(state: &mut GameState, id: u32) -> Result<Vec<Event>, RuleError> {
    let era = state.current_era();
    let threshold = majority(state.players.len());
    let proposal = state
        .proposals
        .get_mut(id as usize)
        .ok_or(RuleError::OutOfRange)?;
    if proposal.executed {
        return Err(RuleError::AlreadyExecuted);
    }
    if proposal.era != era {
        return Err(RuleError::ProposalLapsed);
    }
    if proposal.votes_for < threshold {
        return Err(RuleError::ThresholdNotMet);
    }

    proposal.executed = true;
    let kind = proposal.kind;
    let target = proposal.target;
    apply_effect(state, kind, target);
    Ok(vec![Event::ProposalExecuted { id, kind }])
}

/// The kind-specific economic adjustment.
fn apply_effect(state: &mut GameState, kind: ProposalKind, target: PlayerId) {
    match kind {
        ProposalKind::Sanction => {
            if let Some(player) = state.player_mut(target) {
                player.food = player.food.saturating_sub(SANCTION_AMOUNT);
                player.wood = player.wood.saturating_sub(SANCTION_AMOUNT);
            }
        }
        ProposalKind::Subsidy => {
            if let Some(player) = state.player_mut(target) {
                player.food += SANCTION_AMOUNT;
                player.wood += SANCTION_AMOUNT;
            }
        }
        ProposalKind::OpenBorders => {
            for player in state.players.iter_mut().filter(|p| p.alive) {
                player.food += OPEN_BORDERS_AMOUNT;
                player.wood += OPEN_BORDERS_AMOUNT;
            }
        }
        ProposalKind::GlobalTax => {
            // Each other living player pays what they can; the target
            // collects exactly what was paid.
            let mut collected_food = 0;
            let mut collected_wood = 0;
            for player in state.players.iter_mut().filter(|p| p.alive) {
                if player.id == target {
                    continue;
                }
                let food = player.food.min(GLOBAL_TAX_AMOUNT);
                let wood = player.wood.min(GLOBAL_TAX_AMOUNT);
                player.food -= food;
                player.wood -= wood;
                collected_food += food;
                collected_wood += wood;
            }
            if let Some(player) = state.player_mut(target) {
                player.food += collected_food;
                player.wood += collected_wood;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Grid, Player};

    fn four_player_state() -> GameState {
        let mut state = GameState::new(Grid::default());
        for i in 0..4 {
            state.players.push(Player::new(PlayerId(i), 0));
        }
        state.started = true;
        state.current_turn = 1;
        state
    }

    #[test]
    fn majority_is_three_quarter_supermajority() {
        assert_eq!(majority(2), 2);
        assert_eq!(majority(3), 3);
        assert_eq!(majority(4), 3);
    }

    #[test]
    fn one_active_proposal_per_era() {
        let mut state = four_player_state();
        create(&mut state, ProposalKind::Sanction, PlayerId(1)).unwrap();
        assert_eq!(
            create(&mut state, ProposalKind::Subsidy, PlayerId(2)),
            Err(RuleError::ProposalAlreadyActive)
        );

        // Next era: the old proposal lapses and a new one may open.
        state.current_turn = 6;
        create(&mut state, ProposalKind::Subsidy, PlayerId(2)).unwrap();
        assert_eq!(state.proposals.len(), 2);
    }

    #[test]
    fn one_ballot_per_player_non_retractable() {
        let mut state = four_player_state();
        create(&mut state, ProposalKind::Sanction, PlayerId(1)).unwrap();
        vote(&mut state, PlayerId(0), 0, true).unwrap();
        assert_eq!(vote(&mut state, PlayerId(0), 0, false), Err(RuleError::AlreadyVoted));
        assert_eq!(state.proposals[0].votes_for, 1);
        assert_eq!(state.proposals[0].votes_against, 0);
    }

    #[test]
    fn two_for_one_against_does_not_execute_with_four_players() {
        let mut state = four_player_state();
        create(&mut state, ProposalKind::Sanction, PlayerId(1)).unwrap();
        vote(&mut state, PlayerId(0), 0, true).unwrap();
        vote(&mut state, PlayerId(2), 0, true).unwrap();
        vote(&mut state, PlayerId(3), 0, false).unwrap();
        assert_eq!(execute(&mut state, 0), Err(RuleError::ThresholdNotMet));

        vote(&mut state, PlayerId(1), 0, true).unwrap();
        execute(&mut state, 0).unwrap();
        assert!(state.proposals[0].executed);
        assert_eq!(execute(&mut state, 0), Err(RuleError::AlreadyExecuted));
    }

    #[test]
    fn lapsed_proposal_cannot_be_voted_or_executed() {
        let mut state = four_player_state();
        create(&mut state, ProposalKind::Sanction, PlayerId(1)).unwrap();
        for i in 0..3 {
            vote(&mut state, PlayerId(i), 0, true).unwrap();
        }
        state.current_turn = 6;
        assert_eq!(vote(&mut state, PlayerId(3), 0, true), Err(RuleError::ProposalLapsed));
        assert_eq!(execute(&mut state, 0), Err(RuleError::ProposalLapsed));
    }

    #[test]
    fn sanction_saturates_at_zero() {
        let mut state = four_player_state();
        state.players[1].food = 3;
        state.players[1].wood = 8;
        apply_effect(&mut state, ProposalKind::Sanction, PlayerId(1));
        assert_eq!(state.players[1].food, 0);
        assert_eq!(state.players[1].wood, 3);
    }

    #[test]
    fn global_tax_conserves_resources() {
        let mut state = four_player_state();
        state.players[2].food = 1; // can only pay 1 food
        let total_before: u32 = state.players.iter().map(|p| p.food + p.wood).sum();
        apply_effect(&mut state, ProposalKind::GlobalTax, PlayerId(0));
        let total_after: u32 = state.players.iter().map(|p| p.food + p.wood).sum();
        assert_eq!(total_before, total_after);
        // Three payers: food 2+1+2, wood 2+2+2 collected.
        assert_eq!(state.players[0].food, 5 + 5);
        assert_eq!(state.players[0].wood, 5 + 6);
        assert_eq!(state.players[2].food, 0);
    }

    #[test]
    fn unknown_proposal_id_is_out_of_range() {
        let mut state = four_player_state();
        assert_eq!(vote(&mut state, PlayerId(0), 9, true), Err(RuleError::OutOfRange));
        assert_eq!(execute(&mut state, 9), Err(RuleError::OutOfRange));
    }
}

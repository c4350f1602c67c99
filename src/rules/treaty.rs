//! Treaty lifecycle transitions.
//!
//! `Pending --accept(by=to)--> Active --break(by either party)--> Broken`;
//! an Active treaty whose end turn is reached completes on the next turn
//! advance. Completed and Broken are terminal.

use crate::board::{
    GameState, PlayerId, Treaty, TreatyKind, TreatyStatus, MAX_TREATY_DURATION,
    TREATY_BREAK_PENALTY,
};
use crate::error::RuleError;
use crate::event::Event;

/// Creates a Pending treaty from `actor` to `to`.
pub fn propose(
    state: &mut GameState,
    actor: PlayerId,
    to: PlayerId,
    kind: TreatyKind,
    duration: u32,
) -> Result<Vec<Event>, RuleError> {
    if to == actor {
        return Err(RuleError::InvalidTarget);
    }
    if !state.player(to).is_some_and(|p| p.alive) {
        return Err(RuleError::InvalidTarget);
    }
    if duration == 0 || duration > MAX_TREATY_DURATION {
        return Err(RuleError::OutOfRange);
    }

    let id = state.treaties.len() as u32;
    state.treaties.push(Treaty {
        id,
        from: actor,
        to,
        kind,
        status: TreatyStatus::Pending,
        duration,
        start_turn: 0,
        end_turn: 0,
    });
    Ok(vec![Event::TreatyProposed { id, from: actor, to, kind }])
}

/// Activates a Pending treaty. Only the recipient may accept.
pub fn accept(state: &mut GameState, actor: PlayerId, id: u32) -> Result<Vec<Event>, RuleError> {
    let current_turn = state.current_turn;
    let treaty = state
        .treaties
        .get_mut(id as usize)
        .ok_or(RuleError::OutOfRange)?;
    if treaty.status != TreatyStatus::Pending {
        return Err(RuleError::TreatyNotPending);
    }
    if treaty.to != actor {
        return Err(RuleError::NotTreatyParty);
    }

    treaty.status = TreatyStatus::Active;
    treaty.start_turn = current_turn;
    treaty.end_turn = current_turn + treaty.duration;
    Ok(vec![Event::TreatyAccepted { id, by: actor }])
}

/// Breaks an Active treaty. Either party may break; the breaker pays the
/// reputation penalty.
pub fn break_treaty(
    state: &mut GameState,
    actor: PlayerId,
    id: u32,
) -> Result<Vec<Event>, RuleError> {
    let treaty = state
        .treaties
        .get_mut(id as usize)
        .ok_or(RuleError::OutOfRange)?;
    if treaty.status != TreatyStatus::Active {
        return Err(RuleError::TreatyNotActive);
    }
    if !treaty.is_party(actor) {
        return Err(RuleError::NotTreatyParty);
    }

    treaty.status = TreatyStatus::Broken;
    if let Some(breaker) = state.player_mut(actor) {
        breaker.penalize_reputation(TREATY_BREAK_PENALTY);
    }
    Ok(vec![Event::TreatyBroken { id, by: actor }])
}

/// Completes every Active treaty whose end turn has been reached.
///
/// Run on each turn advance. Both parties' completed-treaty counts go up,
/// feeding the treaty-count victory condition.
pub fn sweep_completed(state: &mut GameState) -> Vec<Event> {
    let current_turn = state.current_turn;
    let mut events = Vec::new();
    let mut completed = Vec::new();
    for treaty in &mut state.treaties {
        if treaty.status == TreatyStatus::Active && treaty.end_turn <= current_turn {
            treaty.status = TreatyStatus::Completed;
            completed.push((treaty.id, treaty.from, treaty.to));
        }
    }
    for (id, from, to) in completed {
        for party in [from, to] {
            if let Some(player) = state.player_mut(party) {
                player.treaties_completed += 1;
            }
        }
        events.push(Event::TreatyCompleted { id, from, to });
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Grid, Player};

    fn two_player_state() -> GameState {
        let mut state = GameState::new(Grid::default());
        state.players.push(Player::new(PlayerId(0), 0));
        state.players.push(Player::new(PlayerId(1), 4));
        state.started = true;
        state.current_turn = 1;
        state
    }

    #[test]
    fn propose_rejects_self_and_bad_duration() {
        let mut state = two_player_state();
        assert_eq!(
            propose(&mut state, PlayerId(0), PlayerId(0), TreatyKind::Alliance, 5),
            Err(RuleError::InvalidTarget)
        );
        assert_eq!(
            propose(&mut state, PlayerId(0), PlayerId(1), TreatyKind::Alliance, 0),
            Err(RuleError::OutOfRange)
        );
        assert_eq!(
            propose(&mut state, PlayerId(0), PlayerId(1), TreatyKind::Alliance, 26),
            Err(RuleError::OutOfRange)
        );
        assert_eq!(
            propose(&mut state, PlayerId(0), PlayerId(3), TreatyKind::Alliance, 5),
            Err(RuleError::InvalidTarget)
        );
    }

    #[test]
    fn treaty_ids_are_monotonic() {
        let mut state = two_player_state();
        propose(&mut state, PlayerId(0), PlayerId(1), TreatyKind::NonAggression, 3).unwrap();
        propose(&mut state, PlayerId(1), PlayerId(0), TreatyKind::TradeAgreement, 4).unwrap();
        assert_eq!(state.treaties[0].id, 0);
        assert_eq!(state.treaties[1].id, 1);
    }

    #[test]
    fn only_recipient_accepts_pending() {
        let mut state = two_player_state();
        propose(&mut state, PlayerId(0), PlayerId(1), TreatyKind::Alliance, 5).unwrap();

        assert_eq!(accept(&mut state, PlayerId(0), 0), Err(RuleError::NotTreatyParty));
        accept(&mut state, PlayerId(1), 0).unwrap();

        let treaty = state.treaties[0];
        assert_eq!(treaty.status, TreatyStatus::Active);
        assert_eq!(treaty.start_turn, 1);
        assert_eq!(treaty.end_turn, 6);

        // Accepting twice fails: no longer pending.
        assert_eq!(accept(&mut state, PlayerId(1), 0), Err(RuleError::TreatyNotPending));
    }

    #[test]
    fn breaking_costs_two_reputation_and_is_terminal() {
        let mut state = two_player_state();
        state.players[0].reputation = 5;
        propose(&mut state, PlayerId(0), PlayerId(1), TreatyKind::Alliance, 5).unwrap();
        accept(&mut state, PlayerId(1), 0).unwrap();

        break_treaty(&mut state, PlayerId(0), 0).unwrap();
        assert_eq!(state.treaties[0].status, TreatyStatus::Broken);
        assert_eq!(state.players[0].reputation, 3);

        // Broken is terminal: neither accept nor break applies again.
        assert_eq!(accept(&mut state, PlayerId(1), 0), Err(RuleError::TreatyNotPending));
        assert_eq!(break_treaty(&mut state, PlayerId(1), 0), Err(RuleError::TreatyNotActive));
    }

    #[test]
    fn break_rejects_pending_and_non_party() {
        let mut state = two_player_state();
        propose(&mut state, PlayerId(0), PlayerId(1), TreatyKind::Alliance, 5).unwrap();
        assert_eq!(break_treaty(&mut state, PlayerId(0), 0), Err(RuleError::TreatyNotActive));

        accept(&mut state, PlayerId(1), 0).unwrap();
        state.players.push(Player::new(PlayerId(2), 20));
        assert_eq!(break_treaty(&mut state, PlayerId(2), 0), Err(RuleError::NotTreatyParty));
    }

    #[test]
    fn sweep_completes_expired_treaties_once() {
        let mut state = two_player_state();
        propose(&mut state, PlayerId(0), PlayerId(1), TreatyKind::Alliance, 2).unwrap();
        accept(&mut state, PlayerId(1), 0).unwrap();
        assert_eq!(state.treaties[0].end_turn, 3);

        state.current_turn = 2;
        assert!(sweep_completed(&mut state).is_empty());

        state.current_turn = 3;
        let events = sweep_completed(&mut state);
        assert_eq!(events.len(), 1);
        assert_eq!(state.treaties[0].status, TreatyStatus::Completed);
        assert_eq!(state.players[0].treaties_completed, 1);
        assert_eq!(state.players[1].treaties_completed, 1);

        // A second sweep finds nothing; counts stay at 1.
        assert!(sweep_completed(&mut state).is_empty());
        assert_eq!(state.players[0].treaties_completed, 1);
    }

    #[test]
    fn unknown_treaty_id_is_out_of_range() {
        let mut state = two_player_state();
        assert_eq!(accept(&mut state, PlayerId(0), 7), Err(RuleError::OutOfRange));
        assert_eq!(break_treaty(&mut state, PlayerId(0), 7), Err(RuleError::OutOfRange));
    }
}

//! Random self-play game generation.
//!
//! Plays full games by cycling through the players each turn and choosing
//! uniformly among currently-legal actions. Used by tests and benches to
//! exercise the rules engine across long action sequences; after every
//! committed action the engine invariants are re-checked.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::{
    Action, BuildKind, GameState, PlayerId, Resource, TreatyKind, TreatyStatus,
    MAX_TREATY_DURATION,
};
use crate::rules;
use crate::rules::economy;
use crate::rules::governance;

/// Configuration for self-play game generation.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Number of games to play.
    pub games: usize,
    /// Maximum turn count before forced termination.
    pub max_turns: u32,
    /// Base random seed; game `i` uses `seed + i`.
    pub seed: u64,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            games: 10,
            max_turns: 60,
            seed: 1,
            threads: 4,
        }
    }
}

/// Summary of one completed self-play game.
#[derive(Debug, Clone, Copy)]
pub struct SimOutcome {
    pub seed: u64,
    pub turns_played: u32,
    pub actions_committed: usize,
    pub winner: Option<PlayerId>,
}

/// Plays one full game from a fresh lobby with the given seed.
///
/// Panics if the engine ever violates its own invariants; a clean return
/// means every committed action left the state consistent.
pub fn run_game(seed: u64, max_turns: u32) -> SimOutcome {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut state = GameState::default();

    let player_count: u8 = rng.gen_range(2..=4);
    for i in 0..player_count {
        rules::apply(&mut state, PlayerId(i), Action::Join).expect("fresh lobby join");
    }
    rules::apply(&mut state, PlayerId(0), Action::Start).expect("start with enough players");

    let mut actions_committed = 0;
    while state.winner.is_none() && state.current_turn <= max_turns {
        for i in 0..player_count {
            let actor = PlayerId(i);
            if state.winner.is_some() {
                break;
            }

            // Occasionally take a free diplomatic or governance action first.
            if rng.gen_bool(0.4) {
                if let Some(action) = pick_free_action(&state, actor, &mut rng) {
                    if rules::apply(&mut state, actor, action).is_ok() {
                        actions_committed += 1;
                    }
                    assert_invariants(&state);
                }
            }

            let action = pick_turn_action(&state, actor, &mut rng);
            if rules::apply(&mut state, actor, action).is_ok() {
                actions_committed += 1;
            } else {
                // Whatever was picked became stale; the turn still has to
                // be spent so the shared counter keeps moving.
                if rules::apply(&mut state, actor, Action::EndTurn).is_ok() {
                    actions_committed += 1;
                }
            }
            assert_invariants(&state);
        }
    }

    SimOutcome {
        seed,
        turns_played: state.current_turn,
        actions_committed,
        winner: state.winner,
    }
}

/// Plays `config.games` games. When `config.threads > 1`, games are played
/// concurrently using rayon.
pub fn run_batch(config: &SimConfig) -> Vec<SimOutcome> {
    let seeds: Vec<u64> = (0..config.games as u64).map(|i| config.seed + i).collect();
    if config.threads > 1 {
        use rayon::prelude::*;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
            .expect("failed to build rayon thread pool");
        pool.install(|| {
            seeds
                .par_iter()
                .map(|&seed| run_game(seed, config.max_turns))
                .collect()
        })
    } else {
        seeds
            .iter()
            .map(|&seed| run_game(seed, config.max_turns))
            .collect()
    }
}

/// Picks a turn-consuming action the actor can currently afford.
fn pick_turn_action(state: &GameState, actor: PlayerId, rng: &mut SmallRng) -> Action {
    let Some(player) = state.player(actor) else {
        return Action::EndTurn;
    };
    let mut candidates = vec![Action::EndTurn];

    if player.food >= economy::EXPAND_COST.food && player.wood >= economy::EXPAND_COST.wood {
        let frontier: Vec<u32> = (0..state.grid.tile_count())
            .filter(|&t| state.tiles[t as usize].owner.is_none() && state.owns_adjacent(actor, t))
            .collect();
        if let Some(&tile) = pick(&frontier, rng) {
            candidates.push(Action::Expand { tile });
        }
    }

    let owned_empty: Vec<u32> = (0..state.grid.tile_count())
        .filter(|&t| {
            state.tiles[t as usize].owner == Some(actor)
                && state.tiles[t as usize].building.is_none()
        })
        .collect();
    if let Some(&tile) = pick(&owned_empty, rng) {
        let kinds = [BuildKind::Farm, BuildKind::Market, BuildKind::Embassy];
        let kind = kinds[rng.gen_range(0..kinds.len())];
        let cost = economy::build_cost(kind);
        if player.food >= cost.food && player.wood >= cost.wood {
            candidates.push(Action::Build { tile, kind });
        }
    }

    if player.food >= economy::GUARD_COST.food && player.wood >= economy::GUARD_COST.wood {
        let unguarded: Vec<u32> = (0..state.grid.tile_count())
            .filter(|&t| {
                state.tiles[t as usize].owner == Some(actor) && !state.tiles[t as usize].guard
            })
            .collect();
        if let Some(&tile) = pick(&unguarded, rng) {
            candidates.push(Action::TrainGuard { tile });
        }
    }

    if let Some(to) = pick_other_player(state, actor, rng) {
        let resource = if rng.gen_bool(0.5) { Resource::Food } else { Resource::Wood };
        if player.balance(resource) > 0 {
            candidates.push(Action::SendAid { to, resource, amount: 1 });
        }
    }

    candidates[rng.gen_range(0..candidates.len())]
}

/// Picks a non-turn-consuming action currently available to the actor.
fn pick_free_action(state: &GameState, actor: PlayerId, rng: &mut SmallRng) -> Option<Action> {
    let mut candidates = Vec::new();

    if let Some(to) = pick_other_player(state, actor, rng) {
        let kinds = [
            TreatyKind::NonAggression,
            TreatyKind::TradeAgreement,
            TreatyKind::Alliance,
        ];
        candidates.push(Action::ProposeTreaty {
            to,
            kind: kinds[rng.gen_range(0..kinds.len())],
            duration: rng.gen_range(1..=MAX_TREATY_DURATION.min(5)),
        });
    }

    for treaty in &state.treaties {
        match treaty.status {
            TreatyStatus::Pending if treaty.to == actor => {
                candidates.push(Action::AcceptTreaty { id: treaty.id });
            }
            TreatyStatus::Active if treaty.is_party(actor) && rng.gen_bool(0.1) => {
                candidates.push(Action::BreakTreaty { id: treaty.id });
            }
            _ => {}
        }
    }

    match state.active_proposal() {
        None => {
            if let Some(target) = pick_other_player(state, actor, rng) {
                let kinds = [
                    crate::board::ProposalKind::Sanction,
                    crate::board::ProposalKind::Subsidy,
                    crate::board::ProposalKind::OpenBorders,
                    crate::board::ProposalKind::GlobalTax,
                ];
                candidates.push(Action::CreateProposal {
                    kind: kinds[rng.gen_range(0..kinds.len())],
                    target,
                });
            }
        }
        Some(proposal) => {
            if !proposal.has_voted(actor) {
                candidates.push(Action::Vote { id: proposal.id, support: rng.gen_bool(0.7) });
            } else if proposal.votes_for >= governance::majority(state.players.len()) {
                candidates.push(Action::ExecuteProposal { id: proposal.id });
            }
        }
    }

    pick(&candidates, rng).copied()
}

fn pick_other_player(state: &GameState, actor: PlayerId, rng: &mut SmallRng) -> Option<PlayerId> {
    let others: Vec<PlayerId> = state
        .players
        .iter()
        .filter(|p| p.alive && p.id != actor)
        .map(|p| p.id)
        .collect();
    pick(&others, rng).copied()
}

fn pick<'a, T>(items: &'a [T], rng: &mut SmallRng) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        Some(&items[rng.gen_range(0..items.len())])
    }
}

/// Checks the structural invariants the engine must never violate.
pub fn check_invariants(state: &GameState) -> Result<(), String> {
    if state.tiles.len() != state.grid.tile_count() as usize {
        return Err("tile vector length does not match grid".into());
    }
    for player in &state.players {
        if player.reputation < 0 {
            return Err(format!("{} has negative reputation", player.id));
        }
        if state.started && player.last_action_turn > state.current_turn {
            return Err(format!("{} acted in a future turn", player.id));
        }
        let city = state.tiles[player.city_tile as usize];
        if city.owner != Some(player.id) {
            return Err(format!("{} does not own their city tile", player.id));
        }
    }
    let active = state
        .proposals
        .iter()
        .filter(|p| !p.executed && p.era == state.current_era())
        .count();
    if active > 1 {
        return Err("more than one active proposal".into());
    }
    for (idx, treaty) in state.treaties.iter().enumerate() {
        if treaty.id as usize != idx {
            return Err("treaty ids are not monotone".into());
        }
        if treaty.status == TreatyStatus::Completed && treaty.end_turn > state.current_turn {
            return Err(format!("treaty #{} completed early", treaty.id));
        }
    }
    Ok(())
}

fn assert_invariants(state: &GameState) {
    if let Err(msg) = check_invariants(state) {
        panic!("engine invariant violated: {}", msg);
    }
}

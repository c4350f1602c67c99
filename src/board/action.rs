//! Player actions.
//!
//! One variant per engine command. Each variant carries exactly the data
//! needed to unambiguously specify the action; the acting player is passed
//! alongside, never embedded, so a single action value can be validated
//! against any identity.

use serde::{Deserialize, Serialize};

use super::diplomacy::{ProposalKind, TreatyKind};
use super::player::{PlayerId, Resource};
use super::tile::BuildKind;

/// An action submitted to the rules engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Enter the lobby before the game starts.
    Join,

    /// Begin the game once enough players have joined.
    Start,

    /// Collect building yields and spend this turn's action.
    EndTurn,

    /// Claim an unowned tile adjacent to owned territory.
    Expand { tile: u32 },

    /// Construct a building on an owned, empty tile.
    Build { tile: u32, kind: BuildKind },

    /// Station a guard on an owned, unguarded tile.
    TrainGuard { tile: u32 },

    /// Transfer resources to another player. Raises the sender's reputation.
    SendAid {
        to: PlayerId,
        resource: Resource,
        amount: u32,
    },

    /// Offer a bilateral treaty to another player.
    ProposeTreaty {
        to: PlayerId,
        kind: TreatyKind,
        duration: u32,
    },

    /// Accept a pending treaty (recipient only).
    AcceptTreaty { id: u32 },

    /// Break an active treaty (either party). Costs reputation.
    BreakTreaty { id: u32 },

    /// Raise a collective proposal for the current era.
    CreateProposal { kind: ProposalKind, target: PlayerId },

    /// Cast a ballot on the active proposal.
    Vote { id: u32, support: bool },

    /// Execute a proposal that has reached the supermajority.
    ExecuteProposal { id: u32 },
}

impl Action {
    /// Returns true if this action spends the actor's one action per turn.
    ///
    /// Diplomatic and governance actions are free; lobby actions happen
    /// before turns exist.
    pub const fn is_turn_consuming(&self) -> bool {
        matches!(
            self,
            Action::EndTurn
                | Action::Expand { .. }
                | Action::Build { .. }
                | Action::TrainGuard { .. }
                | Action::SendAid { .. }
        )
    }
}

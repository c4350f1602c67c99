//! Domain events emitted by committed actions.
//!
//! Every successful command returns the list of events it produced, in
//! emission order. External consumers (the event feed) render them with
//! the `Display` impl; the variants themselves carry the structured data.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Building, PlayerId, ProposalKind, Resource, TreatyKind};

/// A domain event produced by a committed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    PlayerJoined { player: PlayerId, city_tile: u32 },
    GameStarted { players: u32 },
    TurnEnded { player: PlayerId },
    /// The shared turn counter advanced after every living player acted.
    TurnAdvanced { turn: u32 },
    TerritoryExpanded { player: PlayerId, tile: u32 },
    BuildingBuilt { player: PlayerId, tile: u32, building: Building },
    GuardTrained { player: PlayerId, tile: u32 },
    AidSent { from: PlayerId, to: PlayerId, resource: Resource, amount: u32 },
    TreatyProposed { id: u32, from: PlayerId, to: PlayerId, kind: TreatyKind },
    TreatyAccepted { id: u32, by: PlayerId },
    TreatyBroken { id: u32, by: PlayerId },
    /// An active treaty reached its end turn.
    TreatyCompleted { id: u32, from: PlayerId, to: PlayerId },
    ProposalCreated { id: u32, kind: ProposalKind, target: PlayerId },
    VoteCast { id: u32, voter: PlayerId, support: bool },
    ProposalExecuted { id: u32, kind: ProposalKind },
    Victory { player: PlayerId },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Event::PlayerJoined { player, city_tile } => {
                write!(f, "{player} joined the game at tile {city_tile}")
            }
            Event::GameStarted { players } => {
                write!(f, "Game has started with {players} players!")
            }
            Event::TurnEnded { player } => write!(f, "{player} ended their turn"),
            Event::TurnAdvanced { turn } => write!(f, "Turn {turn} begins"),
            Event::TerritoryExpanded { player, tile } => {
                write!(f, "{player} expanded to tile {tile}")
            }
            Event::BuildingBuilt { player, tile, building } => {
                write!(f, "{player} built a {} on tile {tile}", building.name())
            }
            Event::GuardTrained { player, tile } => {
                write!(f, "{player} trained a guard on tile {tile}")
            }
            Event::AidSent { from, to, resource, amount } => {
                write!(f, "{from} sent {amount} {} to {to}", resource.name())
            }
            Event::TreatyProposed { id, from, to, kind } => {
                write!(f, "{from} proposed a {} (#{id}) to {to}", kind.name())
            }
            Event::TreatyAccepted { id, by } => write!(f, "{by} accepted treaty #{id}"),
            Event::TreatyBroken { id, by } => write!(f, "{by} broke treaty #{id}"),
            Event::TreatyCompleted { id, from, to } => {
                write!(f, "Treaty #{id} between {from} and {to} completed")
            }
            Event::ProposalCreated { id, kind, target } => {
                write!(f, "New {} proposal (#{id}) targeting {target}", kind.name())
            }
            Event::VoteCast { id, voter, support } => {
                let ballot = if support { "for" } else { "against" };
                write!(f, "{voter} voted {ballot} proposal #{id}")
            }
            Event::ProposalExecuted { id, kind } => {
                write!(f, "{} proposal #{id} executed", kind.name())
            }
            Event::Victory { player } => {
                write!(f, "{player} achieved diplomatic victory!")
            }
        }
    }
}

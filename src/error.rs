//! Rule violation errors.
//!
//! Every failure the engine can produce is a deterministic function of the
//! current state and the attempted action. There are no transient or
//! retryable errors: submission failures belong to the transport layer.

use thiserror::Error;

/// Errors returned when an action fails validation.
///
/// An error always means nothing was mutated; actions apply atomically
/// or not at all.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RuleError {
    #[error("player has already acted this turn")]
    NotYourTurn,

    #[error("insufficient resources")]
    InsufficientResources,

    #[error("tile is not adjacent to owned territory")]
    NotAdjacent,

    #[error("tile is already owned")]
    TileAlreadyOwned,

    #[error("tile is not owned by the acting player")]
    TileNotOwned,

    #[error("tile already has a building")]
    BuildingAlreadyPresent,

    #[error("tile already has a guard")]
    GuardAlreadyPresent,

    #[error("invalid target player")]
    InvalidTarget,

    #[error("treaty is not pending")]
    TreatyNotPending,

    #[error("treaty is not active")]
    TreatyNotActive,

    #[error("player is not a party to the treaty")]
    NotTreatyParty,

    #[error("an active proposal already exists for this era")]
    ProposalAlreadyActive,

    #[error("proposal lapsed at the end of its era")]
    ProposalLapsed,

    #[error("proposal has already been executed")]
    AlreadyExecuted,

    #[error("player has already voted on this proposal")]
    AlreadyVoted,

    #[error("supermajority threshold not met")]
    ThresholdNotMet,

    #[error("the game is over")]
    GameOver,

    #[error("value out of range")]
    OutOfRange,

    #[error("the game has already started")]
    AlreadyStarted,

    #[error("the game has not started")]
    NotStarted,

    #[error("the game is full")]
    GameFull,

    #[error("player has already joined")]
    AlreadyJoined,

    #[error("not enough players to start")]
    NotEnoughPlayers,

    #[error("acting identity has not joined the game")]
    NotAPlayer,
}

//! Command parser for the engine's text protocol.
//!
//! Parses incoming lines from the transport into structured `Command`
//! variants that the engine main loop can dispatch on. The transport owns
//! authentication; it selects the acting identity with `player <id>` before
//! issuing game commands.

use crate::board::{Action, BuildKind, PlayerId, ProposalKind, Resource, TreatyKind};

/// A parsed transport-to-engine command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Initialize the protocol handshake.
    Eci,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Reset engine state for a new game.
    NewGame,

    /// Select the acting player identity for subsequent commands.
    SetPlayer { player: PlayerId },

    /// Submit a game action for the acting player.
    Act(Action),

    /// Read-only state query.
    Query(Query),

    /// Terminate the engine process.
    Quit,
}

/// A read-only query against the authoritative state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    State,
    Player(u8),
    Tile(u32),
    ActiveProposal,
    TreatiesFor(u8),
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, args) = tokens.split_first()?;

    match head {
        "eci" => Some(Command::Eci),
        "isready" => Some(Command::IsReady),
        "newgame" => Some(Command::NewGame),
        "quit" => Some(Command::Quit),

        "player" => parse_player(args),
        "join" => Some(Command::Act(Action::Join)),
        "start" => Some(Command::Act(Action::Start)),
        "endturn" => Some(Command::Act(Action::EndTurn)),
        "expand" => parse_expand(args),
        "build" => parse_build(args),
        "guard" => parse_guard(args),
        "aid" => parse_aid(args),
        "treaty" => parse_treaty(args),
        "proposal" => parse_proposal(args),
        "vote" => parse_vote(args),
        "query" => parse_query(args),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

fn parse_player(args: &[&str]) -> Option<Command> {
    match args {
        [id] => {
            let id = parse_u8(id, "player id")?;
            Some(Command::SetPlayer { player: PlayerId(id) })
        }
        _ => malformed("player <id>"),
    }
}

fn parse_expand(args: &[&str]) -> Option<Command> {
    match args {
        [tile] => {
            let tile = parse_u32(tile, "tile id")?;
            Some(Command::Act(Action::Expand { tile }))
        }
        _ => malformed("expand <tile>"),
    }
}

fn parse_build(args: &[&str]) -> Option<Command> {
    match args {
        [tile, kind] => {
            let tile = parse_u32(tile, "tile id")?;
            let kind = BuildKind::from_name(kind).or_else(|| {
                eprintln!("unknown building kind: {}", kind);
                None
            })?;
            Some(Command::Act(Action::Build { tile, kind }))
        }
        _ => malformed("build <tile> <farm|market|embassy>"),
    }
}

fn parse_guard(args: &[&str]) -> Option<Command> {
    match args {
        [tile] => {
            let tile = parse_u32(tile, "tile id")?;
            Some(Command::Act(Action::TrainGuard { tile }))
        }
        _ => malformed("guard <tile>"),
    }
}

fn parse_aid(args: &[&str]) -> Option<Command> {
    match args {
        [to, resource, amount] => {
            let to = PlayerId(parse_u8(to, "player id")?);
            let resource = Resource::from_name(resource).or_else(|| {
                eprintln!("unknown resource: {}", resource);
                None
            })?;
            let amount = parse_u32(amount, "amount")?;
            Some(Command::Act(Action::SendAid { to, resource, amount }))
        }
        _ => malformed("aid <to> <food|wood> <amount>"),
    }
}

fn parse_treaty(args: &[&str]) -> Option<Command> {
    match args {
        ["propose", to, kind, duration] => {
            let to = PlayerId(parse_u8(to, "player id")?);
            let kind = TreatyKind::from_name(kind).or_else(|| {
                eprintln!("unknown treaty kind: {}", kind);
                None
            })?;
            let duration = parse_u32(duration, "duration")?;
            Some(Command::Act(Action::ProposeTreaty { to, kind, duration }))
        }
        ["accept", id] => {
            let id = parse_u32(id, "treaty id")?;
            Some(Command::Act(Action::AcceptTreaty { id }))
        }
        ["break", id] => {
            let id = parse_u32(id, "treaty id")?;
            Some(Command::Act(Action::BreakTreaty { id }))
        }
        _ => malformed(
            "treaty propose <to> <kind> <duration> | treaty accept <id> | treaty break <id>",
        ),
    }
}

fn parse_proposal(args: &[&str]) -> Option<Command> {
    match args {
        ["create", kind, target] => {
            let kind = ProposalKind::from_name(kind).or_else(|| {
                eprintln!("unknown proposal kind: {}", kind);
                None
            })?;
            let target = PlayerId(parse_u8(target, "player id")?);
            Some(Command::Act(Action::CreateProposal { kind, target }))
        }
        ["execute", id] => {
            let id = parse_u32(id, "proposal id")?;
            Some(Command::Act(Action::ExecuteProposal { id }))
        }
        _ => malformed("proposal create <kind> <target> | proposal execute <id>"),
    }
}

fn parse_vote(args: &[&str]) -> Option<Command> {
    match args {
        [id, ballot] => {
            let id = parse_u32(id, "proposal id")?;
            let support = match *ballot {
                "for" => true,
                "against" => false,
                other => {
                    eprintln!("unknown ballot: {}", other);
                    return None;
                }
            };
            Some(Command::Act(Action::Vote { id, support }))
        }
        _ => malformed("vote <id> <for|against>"),
    }
}

fn parse_query(args: &[&str]) -> Option<Command> {
    let query = match args {
        ["state"] => Query::State,
        ["player", id] => Query::Player(parse_u8(id, "player id")?),
        ["tile", id] => Query::Tile(parse_u32(id, "tile id")?),
        ["proposal"] => Query::ActiveProposal,
        ["treaties", id] => Query::TreatiesFor(parse_u8(id, "player id")?),
        _ => return malformed("query state | player <id> | tile <id> | proposal | treaties <id>"),
    };
    Some(Command::Query(query))
}

fn parse_u8(s: &str, what: &str) -> Option<u8> {
    s.parse().ok().or_else(|| {
        eprintln!("invalid {}: {}", what, s);
        None
    })
}

fn parse_u32(s: &str, what: &str) -> Option<u32> {
    s.parse().ok().or_else(|| {
        eprintln!("invalid {}: {}", what, s);
        None
    })
}

fn malformed(usage: &str) -> Option<Command> {
    eprintln!("malformed command: expected '{}'", usage);
    None
}

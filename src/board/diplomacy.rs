//! Treaty and governance records.
//!
//! Treaties and proposals are append-only audit history: they are created
//! on demand and only ever transitioned to terminal states, never deleted.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Treaty durations are bounded to `[1, MAX_TREATY_DURATION]` turns.
pub const MAX_TREATY_DURATION: u32 = 25;

/// The kind of a bilateral treaty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TreatyKind {
    NonAggression = 0,
    TradeAgreement = 1,
    Alliance = 2,
}

impl TreatyKind {
    /// Returns the wire code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Parses a wire code.
    pub fn from_code(code: u8) -> Option<TreatyKind> {
        match code {
            0 => Some(TreatyKind::NonAggression),
            1 => Some(TreatyKind::TradeAgreement),
            2 => Some(TreatyKind::Alliance),
            _ => None,
        }
    }

    /// Parses a lowercase protocol keyword.
    pub fn from_name(s: &str) -> Option<TreatyKind> {
        match s {
            "nonaggression" => Some(TreatyKind::NonAggression),
            "trade" => Some(TreatyKind::TradeAgreement),
            "alliance" => Some(TreatyKind::Alliance),
            _ => None,
        }
    }

    /// Display name used in the event feed.
    pub const fn name(self) -> &'static str {
        match self {
            TreatyKind::NonAggression => "Non-Aggression Pact",
            TreatyKind::TradeAgreement => "Trade Agreement",
            TreatyKind::Alliance => "Alliance",
        }
    }
}

/// Lifecycle state of a treaty.
///
/// `Pending --accept(by=to)--> Active --break--> Broken`;
/// `Active --end turn reached--> Completed`. Completed and Broken are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TreatyStatus {
    Pending = 0,
    Active = 1,
    Completed = 2,
    Broken = 3,
}

impl TreatyStatus {
    /// Returns the wire code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Parses a wire code.
    pub fn from_code(code: u8) -> Option<TreatyStatus> {
        match code {
            0 => Some(TreatyStatus::Pending),
            1 => Some(TreatyStatus::Active),
            2 => Some(TreatyStatus::Completed),
            3 => Some(TreatyStatus::Broken),
            _ => None,
        }
    }
}

/// A bilateral, time-boxed agreement between two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treaty {
    /// Unique, monotonically increasing id.
    pub id: u32,
    pub from: PlayerId,
    pub to: PlayerId,
    pub kind: TreatyKind,
    pub status: TreatyStatus,
    /// Requested length in turns; fixes `end_turn` on acceptance.
    pub duration: u32,
    /// Turn of acceptance. Zero while pending.
    pub start_turn: u32,
    /// Turn at which the treaty completes. Zero while pending.
    pub end_turn: u32,
}

impl Treaty {
    /// Returns true if `player` is either party.
    pub fn is_party(&self, player: PlayerId) -> bool {
        self.from == player || self.to == player
    }

    /// Returns the other party, if `player` is a party at all.
    pub fn counterparty(&self, player: PlayerId) -> Option<PlayerId> {
        if player == self.from {
            Some(self.to)
        } else if player == self.to {
            Some(self.from)
        } else {
            None
        }
    }
}

/// The kind of a collective governance proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ProposalKind {
    Sanction = 0,
    Subsidy = 1,
    OpenBorders = 2,
    GlobalTax = 3,
}

impl ProposalKind {
    /// Returns the wire code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Parses a wire code.
    pub fn from_code(code: u8) -> Option<ProposalKind> {
        match code {
            0 => Some(ProposalKind::Sanction),
            1 => Some(ProposalKind::Subsidy),
            2 => Some(ProposalKind::OpenBorders),
            3 => Some(ProposalKind::GlobalTax),
            _ => None,
        }
    }

    /// Parses a lowercase protocol keyword.
    pub fn from_name(s: &str) -> Option<ProposalKind> {
        match s {
            "sanction" => Some(ProposalKind::Sanction),
            "subsidy" => Some(ProposalKind::Subsidy),
            "openborders" => Some(ProposalKind::OpenBorders),
            "globaltax" => Some(ProposalKind::GlobalTax),
            _ => None,
        }
    }

    /// Display name used in the event feed.
    pub const fn name(self) -> &'static str {
        match self {
            ProposalKind::Sanction => "Sanction",
            ProposalKind::Subsidy => "Subsidy",
            ProposalKind::OpenBorders => "Open Borders",
            ProposalKind::GlobalTax => "Global Tax",
        }
    }
}

/// An era-scoped collective proposal.
///
/// A proposal is *active* while it is unexecuted and its era is the current
/// era; when its era ends unexecuted it lapses and only remains as history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Unique, monotonically increasing id.
    pub id: u32,
    pub kind: ProposalKind,
    pub target: PlayerId,
    pub votes_for: u32,
    pub votes_against: u32,
    /// Players who have cast their (non-retractable) ballot.
    pub voters: Vec<PlayerId>,
    pub executed: bool,
    /// The era the proposal was raised in.
    pub era: u32,
}

impl Proposal {
    /// Returns true if `player` has already voted.
    pub fn has_voted(&self, player: PlayerId) -> bool {
        self.voters.contains(&player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn treaty_kind_code_roundtrip() {
        for k in [TreatyKind::NonAggression, TreatyKind::TradeAgreement, TreatyKind::Alliance] {
            assert_eq!(TreatyKind::from_code(k.code()), Some(k));
        }
        assert_eq!(TreatyKind::from_code(3), None);
    }

    #[test]
    fn treaty_status_code_roundtrip() {
        for s in [
            TreatyStatus::Pending,
            TreatyStatus::Active,
            TreatyStatus::Completed,
            TreatyStatus::Broken,
        ] {
            assert_eq!(TreatyStatus::from_code(s.code()), Some(s));
        }
        assert_eq!(TreatyStatus::from_code(4), None);
    }

    #[test]
    fn proposal_kind_code_roundtrip() {
        for k in [
            ProposalKind::Sanction,
            ProposalKind::Subsidy,
            ProposalKind::OpenBorders,
            ProposalKind::GlobalTax,
        ] {
            assert_eq!(ProposalKind::from_code(k.code()), Some(k));
        }
        assert_eq!(ProposalKind::from_code(4), None);
    }

    #[test]
    fn treaty_party_and_counterparty() {
        let treaty = Treaty {
            id: 0,
            from: PlayerId(0),
            to: PlayerId(2),
            kind: TreatyKind::Alliance,
            status: TreatyStatus::Pending,
            duration: 5,
            start_turn: 0,
            end_turn: 0,
        };
        assert!(treaty.is_party(PlayerId(0)));
        assert!(treaty.is_party(PlayerId(2)));
        assert!(!treaty.is_party(PlayerId(1)));
        assert_eq!(treaty.counterparty(PlayerId(0)), Some(PlayerId(2)));
        assert_eq!(treaty.counterparty(PlayerId(1)), None);
    }

    #[test]
    fn proposal_tracks_voters() {
        let mut p = Proposal {
            id: 0,
            kind: ProposalKind::Sanction,
            target: PlayerId(1),
            votes_for: 0,
            votes_against: 0,
            voters: Vec::new(),
            executed: false,
            era: 0,
        };
        assert!(!p.has_voted(PlayerId(0)));
        p.voters.push(PlayerId(0));
        assert!(p.has_voted(PlayerId(0)));
    }
}

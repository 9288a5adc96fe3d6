use crd_core::Chips;
use crd_core::Position;
use crd_table::Payout;
use crd_table::PotResult;
use serde::Serialize;

/// A blind post as seen on the wire.
#[derive(Clone, Debug, Serialize)]
pub struct Blind {
    pub seat: Position,
    pub amount: Chips,
}

/// A contender's cards turned face up at showdown.
#[derive(Clone, Debug, Serialize)]
pub struct RevealView {
    pub seat: Position,
    pub cards: Vec<String>,
    pub category: String,
}

/// Push messages fanned out to clients.
///
/// Every per-hand event carries the table id and hand number so clients can
/// sequence events and discard strays from previous hands. Each message is
/// self-contained; a missed push is recoverable through the state query.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    PlayerJoined {
        table: String,
        hand: u64,
        seat: Position,
        name: String,
        stack: Chips,
    },
    PlayerLeft {
        table: String,
        hand: u64,
        seat: Position,
        name: String,
    },
    PlayerSatOut {
        table: String,
        hand: u64,
        seat: Position,
    },
    PlayerReturned {
        table: String,
        hand: u64,
        seat: Position,
    },
    BlindsPosted {
        table: String,
        hand: u64,
        small: Blind,
        big: Blind,
    },
    /// Private: the receiving player's own hole cards.
    CardsDealt {
        table: String,
        hand: u64,
        seat: Position,
        cards: Vec<String>,
    },
    ActionOn {
        table: String,
        hand: u64,
        seat: Position,
        pot: Chips,
        current_bet_level: Chips,
        current_bet: Chips,
        to_call: Chips,
        min_raise: Chips,
        time_bank: u32,
    },
    PlayerAction {
        table: String,
        hand: u64,
        seat: Position,
        action: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        amount: Option<Chips>,
        pot: Chips,
    },
    CommunityCards {
        table: String,
        hand: u64,
        street: String,
        cards: Vec<String>,
    },
    TimeBank {
        table: String,
        hand: u64,
        seat: Position,
        remaining: u32,
    },
    Showdown {
        table: String,
        hand: u64,
        reveals: Vec<RevealView>,
        pots: Vec<PotResult>,
    },
    HandComplete {
        table: String,
        hand: u64,
        winners: Vec<Payout>,
        uncontested: bool,
    },
    HandAborted {
        table: String,
        hand: u64,
        reason: String,
    },
    /// Dealer narration; cosmetic.
    Mitsuki {
        table: String,
        hand: u64,
        line: String,
    },
}

impl ServerMessage {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize server message")
    }
}

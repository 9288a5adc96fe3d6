use crate::action::Deed;
use crate::showdown::Payout;
use crate::showdown::PotResult;
use crd_cards::Card;
use crd_cards::Hole;
use crd_cards::Street;
use crd_cards::Strength;
use crd_core::Chips;
use crd_core::ID;
use crd_core::Position;
use crd_core::Session;

/// A contender's cards turned face up at showdown.
#[derive(Debug, Clone, Copy)]
pub struct Reveal {
    pub seat: Position,
    pub hole: Hole,
    pub strength: Strength,
}

/// State changes the table reports after each operation.
///
/// The table is a functional core: it mutates, appends events to its outbox,
/// and the room actor drains them to drive pushes, timers, and scheduling.
/// Events are emitted strictly after the change they describe is committed.
#[derive(Debug, Clone)]
pub enum TableEvent {
    Joined {
        seat: Position,
        token: ID<Session>,
        name: String,
        stack: Chips,
    },
    Left {
        seat: Position,
        token: ID<Session>,
        name: String,
        stack: Chips,
    },
    SatOut {
        seat: Position,
        token: ID<Session>,
    },
    Returned {
        seat: Position,
        token: ID<Session>,
    },
    HandStarted {
        hand: u64,
        dealer: Position,
    },
    Blinds {
        small: (Position, Chips),
        big: (Position, Chips),
    },
    /// Private: a seat's hole cards, for that seat only.
    Holes {
        seat: Position,
        token: ID<Session>,
        hole: Hole,
    },
    /// The action is on a seat; carries everything the actor needs to decide.
    ActionOn {
        seat: Position,
        pot: Chips,
        level: Chips,
        bet: Chips,
        to_call: Chips,
        min_raise: Chips,
        time_bank: u32,
    },
    Acted {
        seat: Position,
        deed: Deed,
        pot: Chips,
    },
    Community {
        street: Street,
        cards: Vec<Card>,
    },
    BankTick {
        seat: Position,
        remaining: u32,
    },
    Showdown {
        reveals: Vec<Reveal>,
        pots: Vec<PotResult>,
    },
    Ended {
        hand: u64,
        winners: Vec<Payout>,
        uncontested: bool,
    },
    Aborted {
        hand: u64,
        reason: String,
    },
}

use crate::action::Deed;
use crd_cards::Hole;
use crd_core::Chips;
use crd_core::Config;
use crd_core::ID;
use crd_core::Session;
use serde::Serialize;

/// A seat's standing in the current hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Seated but not dealt into the running hand.
    Waiting,
    /// Dealt in and able to act.
    Active,
    /// Dealt in, out of the hand.
    Folded,
    /// Dealt in with the whole stack committed.
    AllIn,
    /// Not taking part in hands.
    SittingOut,
}

impl Status {
    /// Dealt into the running hand.
    pub fn is_in_hand(&self) -> bool {
        matches!(self, Self::Active | Self::AllIn | Self::Folded)
    }
    /// Still eligible to win a pot.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Active | Self::AllIn)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Active => write!(f, "active"),
            Self::Folded => write!(f, "folded"),
            Self::AllIn => write!(f, "all-in"),
            Self::SittingOut => write!(f, "sitting out"),
        }
    }
}

/// One occupied seat: the player's chips, cards, and session bookkeeping.
#[derive(Debug, Clone)]
pub struct Seat {
    pub token: ID<Session>,
    pub name: String,
    pub stack: Chips,
    pub hole: Option<Hole>,
    pub status: Status,
    /// Chips committed in the current betting round.
    pub current_bet: Chips,
    /// Chips committed across the whole hand.
    pub total_bet: Chips,
    /// Took a voluntary action this street; blinds do not count.
    pub acted: bool,
    pub deed: Option<Deed>,
    /// Reserve seconds, consumed only after the primary turn clock expires.
    pub time_bank: u32,
    pub sit_out: bool,
    pub disconnected: bool,
    /// Leaves the table once the running hand completes.
    pub leaving: bool,
    pub hands_played: u64,
    pub hands_won: u64,
    pub elo: f32,
}

impl Seat {
    pub fn new(token: ID<Session>, name: String, buy_in: Chips, config: &Config) -> Self {
        Self {
            token,
            name,
            stack: buy_in,
            hole: None,
            status: Status::Waiting,
            current_bet: 0,
            total_bet: 0,
            acted: false,
            deed: None,
            time_bank: config.time_bank_seconds,
            sit_out: false,
            disconnected: false,
            leaving: false,
            hands_played: 0,
            hands_won: 0,
            elo: config.default_elo,
        }
    }
    /// Moves up to `amount` chips from the stack into the current bet.
    /// Going to zero puts the seat all-in.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.current_bet += paid;
        self.total_bet += paid;
        if self.stack == 0 {
            self.status = Status::AllIn;
        }
        paid
    }
    pub fn to_call(&self, level: Chips) -> Chips {
        level - self.current_bet
    }
    /// Fresh per-hand state; status is recomputed from chips and sit-out.
    pub fn reset_for_hand(&mut self) {
        self.hole = None;
        self.current_bet = 0;
        self.total_bet = 0;
        self.acted = false;
        self.deed = None;
        self.status = if self.stack > 0 && !self.sit_out && !self.leaving {
            Status::Active
        } else {
            Status::SittingOut
        };
    }
    /// Per-street state cleared between betting rounds.
    pub fn reset_for_street(&mut self) {
        self.current_bet = 0;
        self.acted = false;
        self.deed = None;
    }
    /// Hand is over: cards come back, bets are gone.
    pub fn reset_after_hand(&mut self) {
        self.hole = None;
        self.current_bet = 0;
        self.total_bet = 0;
        self.acted = false;
        self.deed = None;
        self.status = if self.stack == 0 || self.sit_out {
            Status::SittingOut
        } else {
            Status::Waiting
        };
    }
}

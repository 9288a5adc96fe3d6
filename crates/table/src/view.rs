use crate::phase::Phase;
use crate::pot::Pot;
use crate::seat::Status;
use crd_core::Chips;
use crd_core::Position;
use serde::Serialize;

/// One seat as every client may see it: no hole cards.
#[derive(Debug, Clone, Serialize)]
pub struct SeatView {
    pub seat: Position,
    pub name: String,
    pub stack: Chips,
    pub status: Status,
    pub current_bet: Chips,
    pub total_bet: Chips,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_action: Option<String>,
    pub time_bank: u32,
    pub sitting_out: bool,
    pub disconnected: bool,
    pub hands_played: u64,
    pub hands_won: u64,
    pub elo: i32,
}

/// The whole table as every client may see it.
#[derive(Debug, Clone, Serialize)]
pub struct PublicView {
    pub table: String,
    pub table_type: String,
    pub hand_number: u64,
    pub phase: Phase,
    pub board: Vec<String>,
    pub pot: Chips,
    pub pots: Vec<Pot>,
    pub current_bet_level: Chips,
    pub min_raise: Chips,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_on: Option<Position>,
    pub dealer: Position,
    pub seats: Vec<Option<SeatView>>,
}

/// The public view plus the requesting player's own cards and obligations.
#[derive(Debug, Clone, Serialize)]
pub struct PrivateView {
    #[serde(flatten)]
    pub table: PublicView,
    pub seat: Position,
    pub hole_cards: Vec<String>,
    pub to_call: Chips,
}

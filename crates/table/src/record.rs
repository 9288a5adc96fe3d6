use crate::showdown::Payout;
use crate::showdown::PotResult;
use crd_core::Chips;
use crd_core::Position;
use serde::Serialize;
use std::collections::VecDeque;

/// One contender's cards as revealed at showdown.
#[derive(Debug, Clone, Serialize)]
pub struct ShowdownEntry {
    pub seat: Position,
    pub name: String,
    pub cards: Vec<String>,
    pub category: String,
}

/// A completed hand as kept in the table's history ring.
///
/// Carries everything a client needs to replay the hand: the board, the
/// reveals with final categories, the pot breakdown, the winners, and the
/// chronological log.
#[derive(Debug, Clone, Serialize)]
pub struct HandRecord {
    pub hand_number: u64,
    pub board: Vec<String>,
    pub pot: Chips,
    pub showdown: Vec<ShowdownEntry>,
    pub pots: Vec<PotResult>,
    pub winners: Vec<Payout>,
    pub log: Vec<String>,
}

/// Ring buffer of the most recent hand records.
#[derive(Debug, Default)]
pub struct History {
    cap: usize,
    ring: VecDeque<HandRecord>,
}

impl History {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            ring: VecDeque::with_capacity(cap),
        }
    }
    pub fn push(&mut self, record: HandRecord) {
        if self.ring.len() == self.cap {
            self.ring.pop_front();
        }
        self.ring.push_back(record);
    }
    /// Most recent records first, at most `limit`.
    pub fn recent(&self, limit: usize) -> Vec<HandRecord> {
        self.ring.iter().rev().take(limit).cloned().collect()
    }
    pub fn len(&self) -> usize {
        self.ring.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }
}

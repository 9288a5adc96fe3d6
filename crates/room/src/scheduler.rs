use crate::command::Command;
use crd_core::ID;
use crd_core::Position;
use crd_core::Session;
use crd_table::Phase;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Identity of one armed turn clock.
///
/// A timer only fires meaningfully if the table is still on the same hand,
/// street, seat, and arming; anything else is stale and gets dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub hand: u64,
    pub phase: Phase,
    pub seat: Position,
    pub nonce: u64,
}

/// Sends delayed commands back into the table actor's own queue.
///
/// The table never blocks on time: waiting is always an enqueued future
/// message, so timer fires serialize with client actions.
pub struct Scheduler {
    tx: UnboundedSender<Command>,
    nonce: u64,
}

impl Scheduler {
    pub fn new(tx: UnboundedSender<Command>) -> Self {
        Self { tx, nonce: 0 }
    }
    /// Fresh arming counter; part of every fingerprint.
    pub fn next_nonce(&mut self) -> u64 {
        self.nonce += 1;
        self.nonce
    }
    pub fn turn(&self, fingerprint: Fingerprint, after: Duration) {
        self.delayed(Command::TurnExpired { fingerprint }, after);
    }
    pub fn tick(&self, fingerprint: Fingerprint) {
        self.delayed(Command::BankTick { fingerprint }, Duration::from_secs(1));
    }
    pub fn hand_start(&self, nonce: u64, after: Duration) {
        self.delayed(Command::StartHand { nonce }, after);
    }
    pub fn evict(&self, token: ID<Session>, nonce: u64, after: Duration) {
        self.delayed(Command::Evict { token, nonce }, after);
    }
    fn delayed(&self, command: Command, after: Duration) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = tx.send(command);
        });
    }
}

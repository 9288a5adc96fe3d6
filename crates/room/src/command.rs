use crate::scheduler::Fingerprint;
use crd_core::Chips;
use crd_core::ID;
use crd_core::Position;
use crd_core::Session;
use crd_table::Action;
use crd_table::Deed;
use crd_table::HandRecord;
use crd_table::PrivateView;
use crd_table::PublicView;
use crd_table::Table;
use crd_table::TableError;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;

type Reply<T> = oneshot::Sender<Result<T, TableError>>;

/// Everything a table actor can be asked to do.
///
/// Client requests, timer expirations, and transport loss all flow through
/// one queue per table, so hand logic never runs concurrently with itself
/// and every observer sees changes in commit order.
pub enum Command {
    Join {
        token: ID<Session>,
        name: String,
        buy_in: Chips,
        reply: Reply<Position>,
    },
    Act {
        token: ID<Session>,
        action: Action,
        reply: Reply<Deed>,
    },
    Leave {
        token: ID<Session>,
        reply: Reply<Chips>,
    },
    SitOut {
        token: ID<Session>,
        reply: Reply<()>,
    },
    ComeBack {
        token: ID<Session>,
        reply: Reply<()>,
    },
    Rebuy {
        token: ID<Session>,
        amount: Chips,
        reply: Reply<Chips>,
    },
    State {
        token: ID<Session>,
        reply: Reply<PrivateView>,
    },
    Public {
        reply: oneshot::Sender<PublicView>,
    },
    History {
        limit: usize,
        reply: oneshot::Sender<Vec<HandRecord>>,
    },
    /// Attach a push channel for a seated player; replies with a channel id.
    Subscribe {
        token: ID<Session>,
        channel: UnboundedSender<String>,
        reply: Reply<u64>,
    },
    /// A push channel went away; losing the last one is a disconnect.
    Unsubscribe {
        token: ID<Session>,
        channel_id: u64,
    },
    /// Scheduled deal attempt; stale nonces are ignored.
    StartHand { nonce: u64 },
    /// Primary turn clock ran out.
    TurnExpired { fingerprint: Fingerprint },
    /// One second of engaged time bank elapsed.
    BankTick { fingerprint: Fingerprint },
    /// Idle sit-out removal; stale nonces are ignored.
    Evict {
        token: ID<Session>,
        nonce: u64,
    },
}

/// Address of a running table actor.
#[derive(Clone)]
pub struct Handle {
    pub id: ID<Table>,
    pub label: String,
    pub tx: UnboundedSender<Command>,
}

//! Core type aliases, identity types, and configuration for cardroom.
//!
//! This crate provides the foundational types and tuning parameters used
//! throughout the cardroom workspace.

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Stack sizes, bets, and pot amounts in chips.
pub type Chips = u32;
/// Seat index around the table.
pub type Position = usize;

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
///
/// Session tokens are `ID<Session>`: v7 UUIDs are unguessable enough to act
/// as bearer credentials for the lifetime of a seat.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
    /// Cast ID<T> to ID<U> while preserving the underlying UUID.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> TryFrom<&str> for ID<T> {
    type Error = uuid::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        uuid::Uuid::parse_str(s).map(Self::from)
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        uuid::Uuid::deserialize(deserializer).map(Self::from)
    }
}

/// Marker type for client sessions.
/// A seated player is addressed by `ID<Session>` everywhere; the marker lives
/// here so every crate can name the token type without circular dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Session;

// ============================================================================
// TABLE PARAMETERS
// ============================================================================
/// Number of seats at a table.
pub const MAX_SEATS: usize = 9;
/// Minimum seated, funded, non-sitting-out players to start a hand.
pub const MIN_PLAYERS: usize = 2;
/// Small blind amount.
pub const SMALL_BLIND: Chips = 1;
/// Big blind amount.
pub const BIG_BLIND: Chips = 2;
/// Smallest accepted buy-in.
pub const MIN_BUY_IN: Chips = 40;
/// Largest accepted buy-in; rebuys may not push a stack past this.
pub const MAX_BUY_IN: Chips = 400;
/// Buy-in used when a client does not specify one.
pub const DEFAULT_BUY_IN: Chips = 200;

// ============================================================================
// CLOCK PARAMETERS
// ============================================================================
/// Primary per-turn clock (milliseconds).
pub const TURN_TIMER_MS: u64 = 15_000;
/// Per-session reserve consumed only after the primary clock runs out.
pub const TIME_BANK_SECONDS: u32 = 30;
/// Delay between a join into a waiting table and the first deal (milliseconds).
pub const HAND_START_DELAY_MS: u64 = 3_000;
/// Delay between a hand ending and the next deal (milliseconds).
pub const SHOWDOWN_DELAY_MS: u64 = 2_000;
/// Idle sit-out duration after which a player is removed (milliseconds).
pub const SIT_OUT_AUTO_REMOVE_MS: u64 = 600_000;

// ============================================================================
// BOOKKEEPING PARAMETERS
// ============================================================================
/// Per-table ring buffer size for completed hand records.
pub const MAX_HAND_HISTORY: usize = 100;
/// K-factor for the pairwise rating update at showdown.
pub const ELO_K_FACTOR: f32 = 32.0;
/// Rating assigned to a fresh session.
pub const DEFAULT_ELO: f32 = 1000.0;

// ============================================================================
// CONFIGURATION
// ============================================================================
/// Process-wide tuning knobs, constructed once at startup and passed into the
/// registry; each table holds an immutable copy for the hands it runs.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct Config {
    pub max_seats: usize,
    pub min_players: usize,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub min_buy_in: Chips,
    pub max_buy_in: Chips,
    pub default_buy_in: Chips,
    pub turn_timer_ms: u64,
    pub time_bank_seconds: u32,
    pub hand_start_delay_ms: u64,
    pub showdown_delay_ms: u64,
    pub sit_out_auto_remove_ms: u64,
    pub max_hand_history: usize,
    pub elo_k_factor: f32,
    pub default_elo: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_seats: MAX_SEATS,
            min_players: MIN_PLAYERS,
            small_blind: SMALL_BLIND,
            big_blind: BIG_BLIND,
            min_buy_in: MIN_BUY_IN,
            max_buy_in: MAX_BUY_IN,
            default_buy_in: DEFAULT_BUY_IN,
            turn_timer_ms: TURN_TIMER_MS,
            time_bank_seconds: TIME_BANK_SECONDS,
            hand_start_delay_ms: HAND_START_DELAY_MS,
            showdown_delay_ms: SHOWDOWN_DELAY_MS,
            sit_out_auto_remove_ms: SIT_OUT_AUTO_REMOVE_MS,
            max_hand_history: MAX_HAND_HISTORY,
            elo_k_factor: ELO_K_FACTOR,
            default_elo: DEFAULT_ELO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn ids_are_unique() {
        let a = ID::<Session>::default();
        let b = ID::<Session>::default();
        assert_ne!(a, b);
    }
    #[test]
    fn id_roundtrips_through_str() {
        let a = ID::<Session>::default();
        let b = ID::<Session>::try_from(a.to_string().as_str()).unwrap();
        assert_eq!(a, b);
    }
    #[test]
    fn default_config_matches_constants() {
        let config = Config::default();
        assert_eq!(config.max_seats, MAX_SEATS);
        assert_eq!(config.big_blind, BIG_BLIND);
        assert_eq!(config.max_buy_in, MAX_BUY_IN);
    }
}

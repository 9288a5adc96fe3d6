//! Async runtime for live poker tables.
//!
//! Each table is an actor: one tokio task owning a `crd-table` [`Table`][crd_table::Table],
//! fed by a single ordered queue of [`Command`]s. Client requests, turn-clock
//! expirations, time-bank ticks, scheduled hand starts, and disconnects all
//! arrive through that queue, so hand logic is never concurrent with itself.
//! Across tables, actors run in parallel and share nothing but the
//! [`Registry`].
//!
//! ## Pieces
//!
//! - [`Room`] — The per-table actor: command loop, event drain, push fan-out
//! - [`Command`] / [`Handle`] — Queue protocol and actor address
//! - [`Scheduler`] / [`Fingerprint`] — Delayed self-messages; stale timers
//!   are recognized by fingerprint and dropped
//! - [`Registry`] — Token → table routing, table creation, listing, history
//! - [`ServerMessage`] — Wire-facing push messages
//! - [`narrator`] — Mitsuki's table talk
mod command;
mod message;
pub mod narrator;
mod registry;
mod room;
mod scheduler;

pub use command::*;
pub use message::*;
pub use registry::*;
pub use room::*;
pub use scheduler::*;

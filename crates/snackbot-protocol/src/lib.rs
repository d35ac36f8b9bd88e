//! IRC protocol subset for snackbot.
//!
//! This crate knows what lines mean and how to write them, nothing more:
//!
//! - **Events** ([`Identity`], [`ChatEvent`]): what an inbound line turns
//!   into once recognised.
//! - **Grammars** ([`parse_ping`], [`parse_privmsg`], [`parse_mode`]):
//!   pure functions from a raw byte line to an optional event.
//! - **Commands** ([`Command`]): the outgoing lines.
//! - **CTCP** ([`ctcp`]): the ACTION and VERSION envelopes.
//!
//! ```text
//! Transport (raw line) → Protocol (ChatEvent) → Dispatcher (Command) → Transport
//! ```
//!
//! # Feature Flags
//!
//! - `serde` (default): derives `Serialize`/`Deserialize` on the event types.

pub mod ctcp;

mod command;
mod error;
mod event;
mod parse;

pub use command::Command;
pub use error::ProtocolError;
pub use event::{ChatEvent, Identity};
pub use parse::{parse_mode, parse_ping, parse_privmsg};

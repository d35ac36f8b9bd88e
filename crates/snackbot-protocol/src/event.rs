//! Typed inbound events.
//!
//! These are what a raw line becomes once one of the grammars in
//! [`crate::parse`] matched it. Fields hold the bytes exactly as received:
//! IRC does not fix an encoding, and a reply that quotes a field must send
//! back what the server sent. Decode only for display.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The sender of an event, taken from the `:nick!user@host` prefix.
///
/// One instance per event. Nothing keeps it around once the event has been
/// handled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Identity {
    pub nick: Vec<u8>,
    pub user: Vec<u8>,
    pub host: Vec<u8>,
}

impl Identity {
    /// Creates an identity from its three prefix parts.
    pub fn new(
        nick: impl Into<Vec<u8>>,
        user: impl Into<Vec<u8>>,
        host: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            nick: nick.into(),
            user: user.into(),
            host: host.into(),
        }
    }
}

/// Prints the prefix form, `nick!user@host`, with invalid UTF-8 replaced.
impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}!{}@{}",
            String::from_utf8_lossy(&self.nick),
            String::from_utf8_lossy(&self.user),
            String::from_utf8_lossy(&self.host),
        )
    }
}

// ---------------------------------------------------------------------------
// ChatEvent
// ---------------------------------------------------------------------------

/// A PRIVMSG, or a MODE change reported in the same shape.
///
/// `channel` is the target exactly as the server sent it. For a private
/// message that is the bot's own nick.
///
/// `content` is the payload as received, except that a CTCP ACTION
/// envelope has been removed; `is_action` records that it was there.
/// For a MODE event the content is the mode string and `is_action` is
/// always `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChatEvent {
    pub sender: Identity,
    pub channel: Vec<u8>,
    pub content: Vec<u8>,
    pub is_action: bool,
}

impl ChatEvent {
    /// Returns `true` if the event was sent directly to `nick` rather than
    /// to a channel.
    pub fn is_private_to(&self, nick: &str) -> bool {
        self.channel == nick.as_bytes()
    }
}

//! Human-readable lines for the local console.

use std::fmt;

/// Something the dispatcher wants shown to whoever runs the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A chat line from someone else.
    Message {
        channel: String,
        nick: String,
        text: String,
    },
    /// A `/me` action.
    Action {
        channel: String,
        nick: String,
        text: String,
    },
    /// A MODE change. Shown, never acted on.
    ModeChanged {
        channel: String,
        nick: String,
        modes: String,
    },
    /// A reply the bot itself sent to a channel.
    Sent {
        channel: String,
        nick: String,
        text: String,
    },
}

/// Decodes wire bytes for the console, replacing invalid UTF-8.
pub(crate) fn display_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message { channel, nick, text } | Self::Sent { channel, nick, text } => {
                write!(f, "[{channel}] {nick}: {text}")
            }
            Self::Action { channel, nick, text } => write!(f, "[{channel}] ** {nick} {text} **"),
            Self::ModeChanged {
                channel,
                nick,
                modes,
            } => write!(f, "[{channel}] {nick} changed mode to {modes}"),
        }
    }
}

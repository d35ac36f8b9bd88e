//! Line grammars.
//!
//! Every function here is pure: it looks at one raw line (terminator
//! already stripped) and either recognises it or returns `None`. A line
//! that nothing recognises is not an error, it is just ignored upstream.
//!
//! The grammars are anchored regular expressions with lazy captures, so
//! each field stops at the first delimiter that lets the rest of the line
//! match. The final capture is greedy and runs to the end of the line,
//! which keeps `:` inside a message body intact.
//!
//! Lines are matched as bytes with Unicode mode off, so `.` matches any
//! byte but `\n` and a line in a legacy encoding parses like any other.

use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::ctcp;
use crate::{ChatEvent, Identity};

/// Prefix of a server keepalive.
pub(crate) const PING_PREFIX: &[u8] = b"PING :";

/// `:<nick>!<user>@<host> PRIVMSG <target> :<content>`
static PRIVMSG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)^:(.+?)!(.+?)@(.+?)\sPRIVMSG\s(.+?)\s:(.+)$").expect("PRIVMSG grammar compiles")
});

/// `:<nick>!<user>@<host> MODE <target> <modestring>`
static MODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)^:(.+?)!(.+?)@(.+?)\sMODE\s(.+?)\s(.+)$").expect("MODE grammar compiles")
});

/// Returns the token of a `PING :<token>` line, untrimmed.
///
/// Lines shorter than the prefix never match.
pub fn parse_ping(line: &[u8]) -> Option<&[u8]> {
    line.strip_prefix(PING_PREFIX)
}

/// Matches the chat grammar.
///
/// A body wrapped in a CTCP ACTION envelope is unwrapped and flagged with
/// `is_action`. Everything else, including other CTCP queries, is kept
/// verbatim.
pub fn parse_privmsg(line: &[u8]) -> Option<ChatEvent> {
    let caps = PRIVMSG.captures(line)?;
    let content = &caps[5];

    let (content, is_action) = match ctcp::action_body(content) {
        Some(body) => (body, true),
        None => (content, false),
    };

    Some(ChatEvent {
        sender: Identity::new(&caps[1], &caps[2], &caps[3]),
        channel: caps[4].to_vec(),
        content: content.to_vec(),
        is_action,
    })
}

/// Matches the mode grammar. The mode string becomes the event content.
pub fn parse_mode(line: &[u8]) -> Option<ChatEvent> {
    let caps = MODE.captures(line)?;
    Some(ChatEvent {
        sender: Identity::new(&caps[1], &caps[2], &caps[3]),
        channel: caps[4].to_vec(),
        content: caps[5].to_vec(),
        is_action: false,
    })
}

//! Outgoing commands.
//!
//! A [`Command`] is one line the bot sends. [`Command::to_line`] renders
//! the wire bytes without the CRLF terminator; the transport appends that.
//! Fields are bytes so a reply can quote inbound text unchanged.

use std::fmt;

use crate::ProtocolError;

/// Every line the bot knows how to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `NICK <nick>`
    Nick(Vec<u8>),
    /// `USER <user> * * :<realname>`
    User { user: Vec<u8>, realname: Vec<u8> },
    /// `JOIN <channel>`
    Join(Vec<u8>),
    /// `MODE <flags> <target>`, e.g. `MODE +Bix snack`.
    Mode { flags: Vec<u8>, target: Vec<u8> },
    /// `PONG :<token>`
    Pong(Vec<u8>),
    /// `PRIVMSG <target> :<text>`
    Privmsg { target: Vec<u8>, text: Vec<u8> },
    /// `NOTICE <target> :<text>`
    Notice { target: Vec<u8>, text: Vec<u8> },
    /// `QUIT :<reason>`
    Quit(Vec<u8>),
    /// A line sent exactly as given.
    Raw(Vec<u8>),
}

impl Command {
    /// Shorthand for a PRIVMSG.
    pub fn privmsg(target: impl AsRef<[u8]>, text: impl AsRef<[u8]>) -> Self {
        Self::Privmsg {
            target: target.as_ref().to_vec(),
            text: text.as_ref().to_vec(),
        }
    }

    /// Renders the command, refusing anything that would not stay a single
    /// line on the wire.
    pub fn to_line(&self) -> Result<Vec<u8>, ProtocolError> {
        let line = self.encode();
        match line.iter().find(|b| matches!(b, b'\r' | b'\n' | b'\0')) {
            Some(&found) => Err(ProtocolError::InvalidLine {
                line: String::from_utf8_lossy(&line).into_owned(),
                found: char::from(found),
            }),
            None => Ok(line),
        }
    }

    fn encode(&self) -> Vec<u8> {
        match self {
            Self::Nick(nick) => join(&[b"NICK ", nick]),
            Self::User { user, realname } => join(&[b"USER ", user, b" * * :", realname]),
            Self::Join(channel) => join(&[b"JOIN ", channel]),
            Self::Mode { flags, target } => join(&[b"MODE ", flags, b" ", target]),
            Self::Pong(token) => join(&[b"PONG :", token]),
            Self::Privmsg { target, text } => join(&[b"PRIVMSG ", target, b" :", text]),
            Self::Notice { target, text } => join(&[b"NOTICE ", target, b" :", text]),
            Self::Quit(reason) => join(&[b"QUIT :", reason]),
            Self::Raw(line) => line.clone(),
        }
    }
}

fn join(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}

/// The wire form, with invalid UTF-8 replaced. For logs and tests.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.encode()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_lines() {
        assert_eq!(Command::Nick("snack".into()).to_string(), "NICK snack");
        let user = Command::User {
            user: "snack".into(),
            realname: "snackbot".into(),
        };
        assert_eq!(user.to_string(), "USER snack * * :snackbot");
        assert_eq!(Command::Join("#chan".into()).to_string(), "JOIN #chan");
        let mode = Command::Mode {
            flags: "+Bix".into(),
            target: "snack".into(),
        };
        assert_eq!(mode.to_string(), "MODE +Bix snack");
    }

    #[test]
    fn test_reply_lines() {
        assert_eq!(Command::Pong("ab".into()).to_string(), "PONG :ab");
        assert_eq!(
            Command::privmsg("#chan", "Hello, alice").to_string(),
            "PRIVMSG #chan :Hello, alice"
        );
        assert_eq!(Command::Quit("Bye!".into()).to_string(), "QUIT :Bye!");
        assert_eq!(Command::Raw("snack v1.0".into()).to_string(), "snack v1.0");
    }

    #[test]
    fn test_to_line_sends_bytes_verbatim() {
        let reply = Command::privmsg("#chan", b"Hello, al\xe9x");
        assert_eq!(reply.to_line().unwrap(), b"PRIVMSG #chan :Hello, al\xe9x");
    }

    #[test]
    fn test_to_line_rejects_embedded_newline() {
        let err = Command::privmsg("#chan", "hi\r\nQUIT :pwned").to_line().unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidLine { found: '\r', .. }));
    }

    #[test]
    fn test_to_line_passes_ctcp_delimiters() {
        let notice = Command::Notice {
            target: "alice".into(),
            text: "\x01VERSION snack v1.0\x01".into(),
        };
        assert_eq!(notice.to_line().unwrap(), b"NOTICE alice :\x01VERSION snack v1.0\x01");
    }
}

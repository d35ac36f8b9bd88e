//! The two CTCP envelopes the bot understands.
//!
//! CTCP hides a command inside a PRIVMSG body by wrapping it in `\x01`
//! delimiters. Only ACTION (`/me`) and VERSION are recognised here.

/// Opening of an ACTION envelope, delimiter included (8 bytes).
pub const ACTION_PREFIX: &[u8] = b"\x01ACTION ";

/// A complete VERSION query.
pub const VERSION_QUERY: &[u8] = b"\x01VERSION\x01";

/// Returns the body of an ACTION envelope.
///
/// The envelope must be long enough to hold at least one byte of body and
/// the closing delimiter. The final byte is dropped unconditionally, since
/// it is the closing delimiter on every well-formed envelope.
pub fn action_body(content: &[u8]) -> Option<&[u8]> {
    if content.len() <= ACTION_PREFIX.len() + 1 {
        return None;
    }
    let rest = content.strip_prefix(ACTION_PREFIX)?;
    rest.split_last().map(|(_, body)| body)
}

/// Returns `true` if `content` is exactly a VERSION query.
pub fn is_version_query(content: &[u8]) -> bool {
    content == VERSION_QUERY
}

/// Wraps a version string in a VERSION reply envelope.
pub fn version_reply(text: &str) -> String {
    format!("\x01VERSION {text}\x01")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_body_strips_envelope() {
        assert_eq!(action_body(b"\x01ACTION waves\x01"), Some(&b"waves"[..]));
    }

    #[test]
    fn test_action_body_needs_room_for_terminator() {
        assert_eq!(action_body(b"\x01ACTION \x01"), None);
        assert_eq!(action_body(b"\x01ACTION x\x01"), Some(&b"x"[..]));
    }

    #[test]
    fn test_action_body_ignores_other_ctcp() {
        assert_eq!(action_body(b"\x01VERSION\x01"), None);
        assert_eq!(action_body(b"ACTION waves hello"), None);
    }

    #[test]
    fn test_action_body_drops_last_byte_only() {
        // Unterminated envelope: the last byte goes whatever it is.
        assert_eq!(action_body(b"\x01ACTION caf\xe9!"), Some(&b"caf\xe9"[..]));
    }

    #[test]
    fn test_version_query_is_exact() {
        assert!(is_version_query(b"\x01VERSION\x01"));
        assert!(!is_version_query(b"\x01VERSION \x01"));
        assert!(!is_version_query(b"VERSION"));
    }

    #[test]
    fn test_version_reply_envelope() {
        assert_eq!(version_reply("snack v1.0"), "\x01VERSION snack v1.0\x01");
    }
}

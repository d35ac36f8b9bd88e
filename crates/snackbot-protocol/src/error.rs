//! Error types for the protocol layer.
//!
//! Parsing never fails: a line that matches no grammar is simply not an
//! event. Errors only come from building outgoing lines.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// An outgoing command would not survive the trip as a single line.
    ///
    /// Raised when a field carries CR, LF or NUL, which would either split
    /// the line in two or truncate it on the server side.
    #[error("invalid line {line:?}: contains {found:?}")]
    InvalidLine { line: String, found: char },
}

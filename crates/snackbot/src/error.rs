//! Unified error type for snackbot.

use snackbot_protocol::ProtocolError;
use snackbot_transport::TransportError;

use crate::config::ConfigError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant generates the `From` impls, so
/// `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// A transport-level error (dial, read, write).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (unsendable line).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The reader or writer task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

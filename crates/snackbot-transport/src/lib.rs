//! Line transport layer for snackbot.
//!
//! IRC is a line protocol: every message is one CRLF-terminated line.
//! This crate turns a duplex byte stream into two independent halves:
//!
//! - [`LineSource`] reads one line at a time, with the terminator stripped.
//! - [`LineSink`] writes one line at a time, appending CRLF and flushing
//!   immediately so replies are never held back in a buffer.
//!
//! Lines are raw bytes. IRC has no mandated encoding and servers relay
//! whatever clients send, so nothing here decodes or re-encodes text.
//!
//! Each half owns its own buffer, so a reader task and a writer task can
//! run concurrently without sharing anything.
//!
//! # Feature Flags
//!
//! - `tcp` (default): [`connect`] dials a TCP socket and returns the pair.

mod error;
mod stream;
#[cfg(feature = "tcp")]
mod tcp;

pub use error::TransportError;
pub use stream::{split, LineReader, LineWriter};
#[cfg(feature = "tcp")]
pub use tcp::{connect, TcpLineReader, TcpLineWriter};

use std::future::Future;

/// The read half of a line transport.
pub trait LineSource: Send + 'static {
    /// Waits for the next complete line.
    ///
    /// The trailing `\n` (and a preceding `\r`, if any) is removed.
    /// Returns `Ok(None)` when the peer closed the stream cleanly
    /// between two lines.
    fn read_line(
        &mut self,
    ) -> impl Future<Output = Result<Option<Vec<u8>>, TransportError>> + Send;
}

/// The write half of a line transport.
pub trait LineSink: Send + 'static {
    /// Writes `line` followed by CRLF, then flushes.
    fn write_line(
        &mut self,
        line: &[u8],
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Flushes anything pending and shuts the write direction down.
    fn close(&mut self) -> impl Future<Output = Result<(), TransportError>> + Send;
}

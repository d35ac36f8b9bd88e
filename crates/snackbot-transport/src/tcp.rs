//! TCP dialing.

use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

use crate::{LineReader, LineWriter, TransportError};

/// Read half of a dialed TCP connection.
pub type TcpLineReader = LineReader<OwnedReadHalf>;
/// Write half of a dialed TCP connection.
pub type TcpLineWriter = LineWriter<OwnedWriteHalf>;

/// Resolves and dials `addr` (`host:port`), returning the line halves.
pub async fn connect(addr: &str) -> Result<(TcpLineReader, TcpLineWriter), TransportError> {
    let stream = TcpStream::connect(addr)
        .await
        .map_err(|source| TransportError::ConnectFailed {
            addr: addr.to_string(),
            source,
        })?;

    if let Ok(peer) = stream.peer_addr() {
        tracing::info!(addr, %peer, "connected");
    }

    let (read, write) = stream.into_split();
    Ok((LineReader::new(read), LineWriter::new(write)))
}

//! Stream-backed line halves, usable over any tokio byte stream.

use tokio::io::{
    AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter,
    ReadHalf, WriteHalf,
};

use crate::{LineSink, LineSource, TransportError};

/// Reads CRLF-terminated lines from an [`AsyncRead`].
pub struct LineReader<R> {
    inner: BufReader<R>,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    /// Wraps `reader` in its own read buffer.
    pub fn new(reader: R) -> Self {
        Self {
            inner: BufReader::new(reader),
        }
    }
}

impl<R> LineSource for LineReader<R>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    async fn read_line(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        let mut line = Vec::with_capacity(512);
        let n = self
            .inner
            .read_until(b'\n', &mut line)
            .await
            .map_err(TransportError::ReceiveFailed)?;

        if n == 0 {
            return Ok(None);
        }
        if line.last() != Some(&b'\n') {
            return Err(TransportError::ConnectionClosed(format!(
                "stream ended inside a line ({n} bytes unterminated)"
            )));
        }

        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }

        tracing::debug!("<- {}", line.escape_ascii());
        Ok(Some(line))
    }
}

/// Writes CRLF-terminated lines to an [`AsyncWrite`], one flush per line.
pub struct LineWriter<W> {
    inner: BufWriter<W>,
}

impl<W: AsyncWrite + Unpin> LineWriter<W> {
    /// Wraps `writer` in its own write buffer.
    pub fn new(writer: W) -> Self {
        Self {
            inner: BufWriter::new(writer),
        }
    }
}

impl<W> LineSink for LineWriter<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    async fn write_line(&mut self, line: &[u8]) -> Result<(), TransportError> {
        tracing::debug!("-> {}", line.escape_ascii());
        self.inner
            .write_all(line)
            .await
            .map_err(TransportError::SendFailed)?;
        self.inner
            .write_all(b"\r\n")
            .await
            .map_err(TransportError::SendFailed)?;
        self.inner.flush().await.map_err(TransportError::SendFailed)
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.inner
            .shutdown()
            .await
            .map_err(TransportError::SendFailed)
    }
}

/// Splits a duplex stream into independently buffered line halves.
pub fn split<S>(stream: S) -> (LineReader<ReadHalf<S>>, LineWriter<WriteHalf<S>>)
where
    S: AsyncRead + AsyncWrite,
{
    let (read, write) = tokio::io::split(stream);
    (LineReader::new(read), LineWriter::new(write))
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    use super::*;

    async fn next<R: LineSource>(reader: &mut R) -> Option<Vec<u8>> {
        reader.read_line().await.unwrap()
    }

    #[tokio::test]
    async fn test_read_strips_crlf() {
        let (client, mut server) = tokio::io::duplex(1024);
        let (mut reader, _writer) = split(client);

        server.write_all(b"PING :abc\r\nNOTICE * :hi\r\n").await.unwrap();

        assert_eq!(next(&mut reader).await, Some(b"PING :abc".to_vec()));
        assert_eq!(next(&mut reader).await, Some(b"NOTICE * :hi".to_vec()));
    }

    #[tokio::test]
    async fn test_read_accepts_bare_lf() {
        let (client, mut server) = tokio::io::duplex(64);
        let (mut reader, _writer) = split(client);

        server.write_all(b"PING :x\n").await.unwrap();
        assert_eq!(next(&mut reader).await, Some(b"PING :x".to_vec()));
    }

    #[tokio::test]
    async fn test_read_keeps_non_utf8_bytes() {
        let (client, mut server) = tokio::io::duplex(64);
        let (mut reader, _writer) = split(client);

        // latin-1 e-acute, as relayed from an old client
        server.write_all(b":al\xe9x!u@h PRIVMSG #chan :caf\xe9\r\n").await.unwrap();
        assert_eq!(
            next(&mut reader).await,
            Some(b":al\xe9x!u@h PRIVMSG #chan :caf\xe9".to_vec())
        );
    }

    #[tokio::test]
    async fn test_read_returns_none_on_clean_close() {
        let (client, server) = tokio::io::duplex(64);
        let (mut reader, _writer) = split(client);
        drop(server);

        assert!(next(&mut reader).await.is_none());
    }

    #[tokio::test]
    async fn test_read_errors_on_truncated_line() {
        let (client, mut server) = tokio::io::duplex(64);
        let (mut reader, _writer) = split(client);

        server.write_all(b"PING :ab").await.unwrap();
        drop(server);

        let err = reader.read_line().await.unwrap_err();
        assert!(matches!(err, TransportError::ConnectionClosed(_)));
    }

    #[tokio::test]
    async fn test_write_appends_crlf_and_flushes() {
        let (client, mut server) = tokio::io::duplex(1024);
        let (_reader, mut writer) = split(client);

        writer.write_line(b"NICK snack").await.unwrap();

        // No close: the bytes must already be on the wire after one call.
        let mut buf = [0u8; 12];
        server.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"NICK snack\r\n");
    }

    #[tokio::test]
    async fn test_empty_line_round_trips() {
        let (client, mut server) = tokio::io::duplex(64);
        let (mut reader, _writer) = split(client);

        server.write_all(b"\r\n").await.unwrap();
        assert_eq!(next(&mut reader).await, Some(Vec::new()));
    }
}

//! Integration tests for the TCP line transport.
//!
//! These spin up a real listener on a random port and check that lines
//! cross the socket byte-for-byte in both directions.

#[cfg(feature = "tcp")]
mod tcp {
    use snackbot_transport::{connect, LineSink, LineSource, TransportError};
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_tcp_send_and_receive_lines() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("should bind");
        let addr = listener.local_addr().unwrap().to_string();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("should accept");
            stream
        });

        let (mut reader, mut writer) = connect(&addr).await.expect("should connect");
        let stream = server.await.expect("task should complete");
        let (server_read, mut server_write) = stream.into_split();
        let mut server_read = BufReader::new(server_read);

        // --- Client writes, server sees the exact bytes ---
        writer.write_line(b"PRIVMSG #chan :a: b: c").await.unwrap();
        let mut raw = String::new();
        server_read.read_line(&mut raw).await.unwrap();
        assert_eq!(raw, "PRIVMSG #chan :a: b: c\r\n");

        // --- Server writes, client gets the line without CRLF ---
        server_write.write_all(b"PING :irc.example\r\n").await.unwrap();
        let line = reader.read_line().await.unwrap().expect("should have a line");
        assert_eq!(line, b"PING :irc.example");

        // --- Server hangs up ---
        drop(server_write);
        drop(server_read);
        assert!(reader.read_line().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_close_shuts_down_write_direction() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let server = tokio::spawn(async move { listener.accept().await.unwrap().0 });

        let (_reader, mut writer) = connect(&addr).await.unwrap();
        let stream = server.await.unwrap();

        writer.write_line(b"QUIT :Bye!").await.unwrap();
        writer.close().await.unwrap();

        let mut lines = BufReader::new(stream).lines();
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("QUIT :Bye!"));
        assert!(lines.next_line().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_connect_refused_is_connect_failed() {
        // Grab a free port, then release it so nothing is listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);

        match connect(&addr).await {
            Err(TransportError::ConnectFailed { addr: failed, .. }) => assert_eq!(failed, addr),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("connect should fail"),
        }
    }
}

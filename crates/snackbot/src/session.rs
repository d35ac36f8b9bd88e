//! Session runner: one connection, three tasks, two queues.
//!
//! ```text
//!            inbound queue              outbound queue
//! reader ───────────────→ dispatcher ───────────────→ writer
//! (task)     raw lines     (this task)    raw lines    (task)
//! ```
//!
//! Lines cross both queues as raw bytes. The reader and writer never look
//! at bot state; the dispatcher is the only consumer of inbound lines and
//! the only producer of outbound ones, so both directions stay strictly
//! FIFO and nothing needs a lock.
//!
//! Shutdown paths:
//! - `!quit`: the QUIT line is enqueued, the outbound queue is closed, and
//!   the writer drains it, flushes, and shuts the socket down. The drain is
//!   bounded by the configured shutdown timeout.
//! - reader or writer failure: the failing task ends, its queue closes, and
//!   `run` returns that task's error.

use std::time::Duration;

use snackbot_protocol::Command;
use snackbot_transport::{LineSink, LineSource, TransportError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::{BotConfig, ServerAddr};
use crate::dispatch::{DispatchState, Dispatcher};
use crate::notice::Notice;
use crate::BotError;

/// Why a session ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// Someone addressed the bot with `!quit`.
    Quit,
}

type NoticeFn = Box<dyn FnMut(Notice) + Send>;

/// A connected bot, ready to run.
pub struct Session<R, W> {
    reader: R,
    writer: W,
    dispatcher: Dispatcher,
    on_notice: NoticeFn,
}

impl<R: LineSource, W: LineSink> Session<R, W> {
    /// Creates a session with the stock rules, printing notices to stdout.
    pub fn new(reader: R, writer: W, config: BotConfig) -> Self {
        Self::with_dispatcher(reader, writer, Dispatcher::new(config))
    }

    /// Creates a session around an existing dispatcher.
    pub fn with_dispatcher(reader: R, writer: W, dispatcher: Dispatcher) -> Self {
        Self {
            reader,
            writer,
            dispatcher,
            on_notice: Box::new(|notice| println!("{notice}")),
        }
    }

    /// Replaces where notices go.
    pub fn on_notice(mut self, f: impl FnMut(Notice) + Send + 'static) -> Self {
        self.on_notice = Box::new(f);
        self
    }

    /// Registers, then dispatches lines until `!quit` or a transport failure.
    pub async fn run(self) -> Result<Shutdown, BotError> {
        let Self {
            reader,
            writer,
            mut dispatcher,
            mut on_notice,
        } = self;

        let capacity = dispatcher.config().queue_capacity;
        let shutdown_timeout = dispatcher.config().shutdown_timeout;

        let (inbound_tx, mut inbound_rx) = mpsc::channel(capacity);
        let (outbound_tx, outbound_rx) = mpsc::channel(capacity);
        let reader_task = tokio::spawn(read_loop(reader, inbound_tx));
        let writer_task = tokio::spawn(write_loop(writer, outbound_rx));

        let exit = match register(&dispatcher, &outbound_tx).await {
            Ok(true) => {
                dispatch_loop(&mut dispatcher, &mut on_notice, &mut inbound_rx, &outbound_tx).await
            }
            Ok(false) => Exit::WriterStopped,
            Err(e) => {
                reader_task.abort();
                writer_task.abort();
                return Err(e);
            }
        };

        match exit {
            Exit::Quit => {
                reader_task.abort();
                drop(outbound_tx);
                drain(writer_task, shutdown_timeout).await;
                Ok(Shutdown::Quit)
            }
            Exit::ReaderStopped => {
                writer_task.abort();
                Err(stopped(reader_task, "reader").await)
            }
            Exit::WriterStopped => {
                reader_task.abort();
                Err(stopped(writer_task, "writer").await)
            }
        }
    }
}

/// Dials `server` and runs a session with the stock rules.
pub async fn run(server: &ServerAddr, config: BotConfig) -> Result<Shutdown, BotError> {
    tracing::info!(server = %server, nick = config.nick(), "connecting");
    let (reader, writer) = snackbot_transport::connect(&server.to_string()).await?;
    Session::new(reader, writer, config).run().await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    Quit,
    ReaderStopped,
    WriterStopped,
}

/// Enqueues the registration lines. Returns `false` once the writer is gone.
async fn register(
    dispatcher: &Dispatcher,
    outbound: &mpsc::Sender<Vec<u8>>,
) -> Result<bool, BotError> {
    tracing::info!(nick = dispatcher.nick(), "registering");
    for cmd in dispatcher.handshake() {
        if outbound.send(cmd.to_line()?).await.is_err() {
            return Ok(false);
        }
    }
    Ok(true)
}

async fn dispatch_loop(
    dispatcher: &mut Dispatcher,
    on_notice: &mut NoticeFn,
    inbound: &mut mpsc::Receiver<Vec<u8>>,
    outbound: &mpsc::Sender<Vec<u8>>,
) -> Exit {
    loop {
        let line = tokio::select! {
            line = inbound.recv() => match line {
                Some(line) => line,
                None => return Exit::ReaderStopped,
            },
            () = outbound.closed() => return Exit::WriterStopped,
        };

        let outcome = dispatcher.handle_line(&line);
        for notice in outcome.notices {
            on_notice(notice);
        }
        for cmd in outcome.outbound {
            if !enqueue(outbound, cmd).await {
                return Exit::WriterStopped;
            }
        }

        if dispatcher.state() == DispatchState::Terminating {
            return Exit::Quit;
        }
    }
}

/// Returns `false` once the writer is gone.
async fn enqueue(outbound: &mpsc::Sender<Vec<u8>>, cmd: Command) -> bool {
    match cmd.to_line() {
        Ok(line) => outbound.send(line).await.is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "dropping unsendable reply");
            true
        }
    }
}

async fn read_loop<R: LineSource>(
    mut reader: R,
    inbound: mpsc::Sender<Vec<u8>>,
) -> Result<(), TransportError> {
    loop {
        let line = match reader.read_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                return Err(TransportError::ConnectionClosed(
                    "server closed the connection".into(),
                ));
            }
            Err(e) => {
                tracing::error!(error = %e, "read failed");
                return Err(e);
            }
        };
        if inbound.send(line).await.is_err() {
            return Ok(());
        }
    }
}

/// Writes until the queue closes, then flushes and shuts the stream down.
async fn write_loop<W: LineSink>(
    mut writer: W,
    mut outbound: mpsc::Receiver<Vec<u8>>,
) -> Result<(), TransportError> {
    while let Some(line) = outbound.recv().await {
        if let Err(e) = writer.write_line(&line).await {
            tracing::error!(error = %e, "write failed");
            return Err(e);
        }
    }
    writer.close().await
}

async fn drain(writer_task: JoinHandle<Result<(), TransportError>>, limit: Duration) {
    match tokio::time::timeout(limit, writer_task).await {
        Ok(Ok(Ok(()))) => tracing::info!("quit flushed, bye"),
        Ok(Ok(Err(e))) => tracing::warn!(error = %e, "quit may not have been delivered"),
        Ok(Err(e)) => tracing::warn!(error = %e, "writer task failed during shutdown"),
        Err(_) => tracing::warn!(?limit, "timed out flushing quit"),
    }
}

async fn stopped(task: JoinHandle<Result<(), TransportError>>, which: &str) -> BotError {
    match task.await {
        Ok(Err(e)) => e.into(),
        Ok(Ok(())) => TransportError::ConnectionClosed(format!("{which} stopped")).into(),
        Err(e) => e.into(),
    }
}

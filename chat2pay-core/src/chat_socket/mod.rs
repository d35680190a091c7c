//! Realtime chat transport.
//!
//! [`ChatSocket`] keeps one logical connection to `<base>/ws/chat/<user-id>`
//! open. Unintended closes are followed by a bounded number of reconnects on
//! the linear schedule of [`RetryConfig::chat_reconnect`](crate::retry_strategy::RetryConfig::chat_reconnect);
//! every frame received is passed verbatim to the caller's message handler.
//!
//! ```rust,no_run
//! use chat2pay_core::chat_socket::{ChatCallbacks, ChatConnectConfig, ChatSocket};
//!
//! # async fn example() -> chat2pay_core::Result<()> {
//! let socket = ChatSocket::default();
//! let callbacks = ChatCallbacks::new(|frame| println!("{frame}"))
//!     .on_connect(|| println!("connected"));
//! socket
//!     .connect(ChatConnectConfig::new("ws://localhost:9005", "42", callbacks))
//!     .await?;
//!
//! if !socket.send("hello") {
//!     println!("not connected yet");
//! }
//! socket.disconnect().await;
//! # Ok(())
//! # }
//! ```

mod callbacks;
mod config;
mod state;

pub use callbacks::{ChatCallbacks, ConnectionHandler, ErrorHandler, MessageHandler};
pub use config::{ChatConnectConfig, ChatSocketConfig, DEFAULT_SHUTDOWN_TIMEOUT};
pub use state::{ChatConnectionState, ChatSocketStats, ChatSocketStatsSnapshot};

use crate::error::{Error, Result};
use crate::retry_strategy::RetryStrategy;
use futures_util::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicU8, AtomicU32, Ordering};
use std::sync::{Arc, PoisonError};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, interval_at};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span, instrument, warn};

/// State shared between the handle and its supervisor task.
#[derive(Debug, Default)]
struct Shared {
    state: AtomicU8,
    reconnect_attempts: AtomicU32,
    stats: ChatSocketStats,
    writer: std::sync::Mutex<Option<mpsc::UnboundedSender<Message>>>,
}

impl Shared {
    fn state(&self) -> ChatConnectionState {
        ChatConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: ChatConnectionState) {
        self.state.store(state.as_u8(), Ordering::Release);
    }

    fn set_writer(&self, writer: Option<mpsc::UnboundedSender<Message>>) {
        *self.writer.lock().unwrap_or_else(PoisonError::into_inner) = writer;
    }

    /// Drops the writer and reports the socket closed.
    fn mark_closed(&self) {
        self.set_writer(None);
        self.set_state(ChatConnectionState::Disconnected);
    }

    fn writer(&self) -> Option<mpsc::UnboundedSender<Message>> {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// A running connection: its target, cancel token and supervisor task.
#[derive(Debug)]
struct Session {
    url: String,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// How a single connection ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConnectionEnd {
    /// Closed by the peer, a failed open, or an I/O error.
    Closed,
    /// Closed because `disconnect`, a new `connect` or drop cancelled it.
    Cancelled,
}

/// Owned handle to the realtime chat connection.
///
/// Each `connect` spawns one supervisor task that opens the socket, pumps
/// frames and runs the reconnect schedule. At most one reconnect timer is
/// pending at a time. Dropping the handle cancels the task.
#[derive(Debug)]
pub struct ChatSocket {
    config: ChatSocketConfig,
    shared: Arc<Shared>,
    session: Mutex<Option<Session>>,
}

impl Default for ChatSocket {
    fn default() -> Self {
        Self::new(ChatSocketConfig::default())
    }
}

impl ChatSocket {
    /// Creates a disconnected socket.
    pub fn new(config: ChatSocketConfig) -> Self {
        Self {
            config,
            shared: Arc::new(Shared::default()),
            session: Mutex::new(None),
        }
    }

    /// Opens a fresh connection, replacing any previous one.
    ///
    /// The previous connection and any pending reconnect timer are cancelled
    /// first, and the reconnect counter is reset. The open itself happens on
    /// a background task; its outcome is reported through the callbacks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] when the target URL is invalid. No
    /// task is started in that case.
    #[instrument(
        name = "chat_connect",
        skip(self, config),
        fields(base_url = %config.base_url, user_id = %config.user_id)
    )]
    pub async fn connect(&self, config: ChatConnectConfig) -> Result<()> {
        let url = config.target_url()?;

        let mut session = self.session.lock().await;
        if let Some(previous) = session.take() {
            debug!(url = %previous.url, "Replacing previous chat connection");
            self.stop(previous).await;
        }

        self.shared.reconnect_attempts.store(0, Ordering::Release);
        self.shared.set_state(ChatConnectionState::Connecting);

        let token = CancellationToken::new();
        let supervisor = Supervisor {
            shared: Arc::clone(&self.shared),
            config: self.config.clone(),
            strategy: RetryStrategy::new(self.config.reconnect.clone()),
            url: url.clone(),
            callbacks: config.callbacks,
            token: token.clone(),
        };
        let span = info_span!("chat_supervisor", url = %url);
        let handle = tokio::spawn(supervisor.run().instrument(span));

        info!(url = %url, "Chat connection started");
        *session = Some(Session { url, token, handle });
        Ok(())
    }

    /// Closes the connection on purpose.
    ///
    /// Cancels any pending reconnect timer, sends a close frame when the
    /// socket is open, and waits for the supervisor to finish. No reconnect
    /// follows. Calling it while disconnected is a no-op.
    #[instrument(name = "chat_disconnect", skip(self))]
    pub async fn disconnect(&self) {
        let previous = self.session.lock().await.take();
        if let Some(previous) = previous {
            self.stop(previous).await;
            info!("Chat connection closed");
        }
        self.shared.set_state(ChatConnectionState::Disconnected);
    }

    async fn stop(&self, session: Session) {
        let Session {
            url,
            token,
            mut handle,
        } = session;
        token.cancel();

        let grace = self.config.shutdown_timeout + self.config.connect_timeout;
        if tokio::time::timeout(grace, &mut handle).await.is_err() {
            warn!(url = %url, "Chat supervisor did not stop in time, aborting");
            handle.abort();
        }
        self.shared.mark_closed();
    }

    /// Sends a text frame.
    ///
    /// Returns `false` without queuing anything when the socket is not open;
    /// such drops are logged and counted in [`ChatSocketStatsSnapshot::dropped_sends`].
    pub fn send(&self, text: impl Into<String>) -> bool {
        let text = text.into();
        let len = text.len() as u64;

        if self.is_connected()
            && let Some(writer) = self.shared.writer()
            && writer.send(Message::Text(text.into())).is_ok()
        {
            self.shared.stats.record_sent(len);
            return true;
        }

        warn!(bytes = len, "Chat socket is not connected, message dropped");
        self.shared.stats.record_dropped();
        false
    }

    /// Returns `true` while the socket is open.
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.state() == ChatConnectionState::Connected
    }

    /// Returns the current connection state.
    #[inline]
    pub fn state(&self) -> ChatConnectionState {
        self.shared.state()
    }

    /// Returns the number of reconnects scheduled since the last open.
    #[inline]
    pub fn reconnect_attempts(&self) -> u32 {
        self.shared.reconnect_attempts.load(Ordering::Acquire)
    }

    /// Returns a snapshot of connection statistics.
    pub fn stats(&self) -> ChatSocketStatsSnapshot {
        self.shared.stats.snapshot()
    }

    /// Returns the target URL of the current connection, if any.
    pub async fn url(&self) -> Option<String> {
        self.session.lock().await.as_ref().map(|s| s.url.clone())
    }

    /// Returns the transport configuration.
    pub fn config(&self) -> &ChatSocketConfig {
        &self.config
    }
}

impl Drop for ChatSocket {
    fn drop(&mut self) {
        if let Some(session) = self.session.get_mut().take() {
            session.token.cancel();
        }
    }
}

/// Background task owning one `connect` call.
struct Supervisor {
    shared: Arc<Shared>,
    config: ChatSocketConfig,
    strategy: RetryStrategy,
    url: String,
    callbacks: ChatCallbacks,
    token: CancellationToken,
}

impl Supervisor {
    async fn run(self) {
        loop {
            self.shared.set_state(ChatConnectionState::Connecting);
            let end = self.run_connection().await;
            self.shared.mark_closed();

            if end == ConnectionEnd::Cancelled || self.token.is_cancelled() {
                self.callbacks.disconnected();
                debug!("Chat supervisor cancelled");
                return;
            }

            let next = self.shared.reconnect_attempts.load(Ordering::Acquire) + 1;
            if !self.strategy.allows_attempt(next) {
                self.callbacks.disconnected();
                info!(
                    attempts = next - 1,
                    "Chat reconnect attempts exhausted, giving up"
                );
                return;
            }

            self.shared.reconnect_attempts.store(next, Ordering::Release);
            let delay = self.strategy.calculate_delay(next);
            info!(
                attempt = next,
                delay_ms = %delay.as_millis(),
                "Chat connection closed, reconnect scheduled"
            );
            self.callbacks.disconnected();

            tokio::select! {
                biased;
                () = self.token.cancelled() => {
                    debug!("Pending chat reconnect cancelled");
                    return;
                }
                () = tokio::time::sleep(delay) => {}
            }
        }
    }

    /// Ends an open connection. `send` sees the close before any callback
    /// runs.
    fn closed(&self, error: Option<Error>) -> ConnectionEnd {
        self.shared.mark_closed();
        if let Some(error) = error {
            self.callbacks.error(&error);
        }
        ConnectionEnd::Closed
    }

    async fn run_connection(&self) -> ConnectionEnd {
        let opening = tokio::time::timeout(self.config.connect_timeout, connect_async(&self.url));
        let stream = tokio::select! {
            biased;
            () = self.token.cancelled() => return ConnectionEnd::Cancelled,
            result = opening => match result {
                Ok(Ok((stream, response))) => {
                    info!(status = response.status().as_u16(), "Chat socket open");
                    stream
                }
                Ok(Err(e)) => {
                    warn!(error = %e, "Chat socket failed to open");
                    self.callbacks.error(&Error::from(e));
                    return ConnectionEnd::Closed;
                }
                Err(_) => {
                    warn!(
                        timeout_ms = %self.config.connect_timeout.as_millis(),
                        "Chat socket open timed out"
                    );
                    self.callbacks
                        .error(&Error::timeout("Chat socket open timed out"));
                    return ConnectionEnd::Closed;
                }
            }
        };

        let (mut write, mut read) = stream.split();
        let (write_tx, mut write_rx) = mpsc::unbounded_channel::<Message>();
        self.shared.set_writer(Some(write_tx));
        self.shared.reconnect_attempts.store(0, Ordering::Release);
        self.shared.stats.record_connected();
        self.shared.set_state(ChatConnectionState::Connected);
        self.callbacks.connected();

        let mut ping = self
            .config
            .ping_interval
            .map(|period| interval_at(Instant::now() + period, period));

        loop {
            tokio::select! {
                biased;
                () = self.token.cancelled() => {
                    let close = write.send(Message::Close(None));
                    if tokio::time::timeout(self.config.shutdown_timeout, close).await.is_err() {
                        warn!("Timed out sending chat close frame");
                    }
                    return ConnectionEnd::Cancelled;
                }
                Some(message) = write_rx.recv() => {
                    if let Err(e) = write.send(message).await {
                        error!(error = %e, "Failed to write chat frame");
                        return self.closed(Some(Error::from(e)));
                    }
                }
                frame = read.next() => match frame {
                    Some(Ok(Message::Text(text))) => {
                        self.shared.stats.record_received(text.len() as u64);
                        self.callbacks.message(text.to_string());
                    }
                    Some(Ok(Message::Binary(data))) => match String::from_utf8(data.to_vec()) {
                        Ok(text) => {
                            self.shared.stats.record_received(text.len() as u64);
                            self.callbacks.message(text);
                        }
                        Err(_) => debug!(bytes = data.len(), "Ignoring non UTF-8 binary frame"),
                    },
                    Some(Ok(Message::Pong(_))) => self.shared.stats.record_pong(),
                    Some(Ok(Message::Close(frame))) => {
                        info!(frame = ?frame, "Chat socket closed by peer");
                        return self.closed(None);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(error = %e, "Chat socket read failed");
                        return self.closed(Some(Error::from(e)));
                    }
                    None => {
                        info!("Chat socket stream ended");
                        return self.closed(None);
                    }
                },
                () = next_tick(&mut ping) => {
                    self.shared.stats.record_ping();
                    if let Err(e) = write.send(Message::Ping(vec![].into())).await {
                        warn!(error = %e, "Failed to send chat keepalive ping");
                        return self.closed(None);
                    }
                }
            }
        }
    }
}

async fn next_tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

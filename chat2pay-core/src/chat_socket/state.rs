//! Chat connection state and statistics.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// Chat connection state.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatConnectionState {
    /// No socket, or waiting for a reconnect timer
    Disconnected = 0,
    /// Opening handshake in progress
    Connecting = 1,
    /// Socket open, frames flow both ways
    Connected = 2,
}

impl ChatConnectionState {
    /// Converts a `u8` value to `ChatConnectionState`.
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Connecting,
            2 => Self::Connected,
            _ => Self::Disconnected,
        }
    }

    /// Converts the `ChatConnectionState` to its `u8` representation.
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for ChatConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disconnected => write!(f, "disconnected"),
            Self::Connecting => write!(f, "connecting"),
            Self::Connected => write!(f, "connected"),
        }
    }
}

/// Chat socket statistics (lock-free).
#[derive(Debug, Default)]
pub struct ChatSocketStats {
    messages_received: AtomicU64,
    messages_sent: AtomicU64,
    bytes_received: AtomicU64,
    bytes_sent: AtomicU64,
    dropped_sends: AtomicU64,
    connections: AtomicU64,
    last_message_time: AtomicI64,
    last_ping_time: AtomicI64,
    last_pong_time: AtomicI64,
    connected_at: AtomicI64,
}

impl ChatSocketStats {
    /// Creates a new `ChatSocketStats` instance with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a delivered frame.
    pub fn record_received(&self, bytes: u64) {
        self.messages_received.fetch_add(1, Ordering::Relaxed);
        self.bytes_received.fetch_add(bytes, Ordering::Relaxed);
        self.last_message_time
            .store(chrono::Utc::now().timestamp_millis(), Ordering::Relaxed);
    }

    /// Records a frame queued for sending.
    pub fn record_sent(&self, bytes: u64) {
        self.messages_sent.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Records a send attempted while the socket was not open.
    pub fn record_dropped(&self) {
        self.dropped_sends.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a ping sent.
    pub fn record_ping(&self) {
        self.last_ping_time
            .store(chrono::Utc::now().timestamp_millis(), Ordering::Relaxed);
    }

    /// Records a pong received.
    pub fn record_pong(&self) {
        self.last_pong_time
            .store(chrono::Utc::now().timestamp_millis(), Ordering::Relaxed);
    }

    /// Records a successful open.
    pub fn record_connected(&self) {
        self.connections.fetch_add(1, Ordering::Relaxed);
        self.connected_at
            .store(chrono::Utc::now().timestamp_millis(), Ordering::Relaxed);
    }

    /// Creates an immutable snapshot of current statistics.
    pub fn snapshot(&self) -> ChatSocketStatsSnapshot {
        ChatSocketStatsSnapshot {
            messages_received: self.messages_received.load(Ordering::Relaxed),
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            dropped_sends: self.dropped_sends.load(Ordering::Relaxed),
            connections: self.connections.load(Ordering::Relaxed),
            last_message_time: self.last_message_time.load(Ordering::Relaxed),
            last_ping_time: self.last_ping_time.load(Ordering::Relaxed),
            last_pong_time: self.last_pong_time.load(Ordering::Relaxed),
            connected_at: self.connected_at.load(Ordering::Relaxed),
        }
    }
}

/// Immutable snapshot of chat socket statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSocketStatsSnapshot {
    /// Frames delivered to `on_message`
    pub messages_received: u64,
    /// Frames queued by `send`
    pub messages_sent: u64,
    /// Total bytes received
    pub bytes_received: u64,
    /// Total bytes sent
    pub bytes_sent: u64,
    /// `send` calls made while the socket was not open
    pub dropped_sends: u64,
    /// Successful opens, including reconnects
    pub connections: u64,
    /// Last message timestamp in milliseconds
    pub last_message_time: i64,
    /// Last ping timestamp in milliseconds
    pub last_ping_time: i64,
    /// Last pong timestamp in milliseconds
    pub last_pong_time: i64,
    /// Last open timestamp in milliseconds
    pub connected_at: i64,
}

impl ChatSocketStatsSnapshot {
    /// Round trip of the last ping, when a pong has arrived after it.
    pub fn latency_ms(&self) -> Option<i64> {
        (self.last_ping_time > 0 && self.last_pong_time >= self.last_ping_time)
            .then(|| self.last_pong_time - self.last_ping_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_u8() {
        assert_eq!(
            ChatConnectionState::from_u8(0),
            ChatConnectionState::Disconnected
        );
        assert_eq!(
            ChatConnectionState::from_u8(1),
            ChatConnectionState::Connecting
        );
        assert_eq!(
            ChatConnectionState::from_u8(ChatConnectionState::Connected.as_u8()),
            ChatConnectionState::Connected
        );
        assert_eq!(
            ChatConnectionState::from_u8(200),
            ChatConnectionState::Disconnected
        );
    }

    #[test]
    fn test_stats_snapshot() {
        let stats = ChatSocketStats::new();
        stats.record_received(5);
        stats.record_received(7);
        stats.record_sent(3);
        stats.record_dropped();
        stats.record_connected();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.messages_received, 2);
        assert_eq!(snapshot.bytes_received, 12);
        assert_eq!(snapshot.messages_sent, 1);
        assert_eq!(snapshot.bytes_sent, 3);
        assert_eq!(snapshot.dropped_sends, 1);
        assert_eq!(snapshot.connections, 1);
        assert!(snapshot.connected_at > 0);
        assert!(snapshot.last_message_time > 0);
    }

    #[test]
    fn test_latency_requires_pong_after_ping() {
        let snapshot = ChatSocketStatsSnapshot {
            last_ping_time: 1_000,
            last_pong_time: 1_040,
            ..Default::default()
        };
        assert_eq!(snapshot.latency_ms(), Some(40));

        let stale = ChatSocketStatsSnapshot {
            last_ping_time: 2_000,
            last_pong_time: 1_040,
            ..Default::default()
        };
        assert_eq!(stale.latency_ms(), None);
    }
}

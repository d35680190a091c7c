//! Handlers invoked by the chat socket supervisor.

use crate::error::Error;
use std::fmt;
use std::sync::Arc;

/// Receives each text frame verbatim.
pub type MessageHandler = Arc<dyn Fn(String) + Send + Sync>;

/// Notified on open or close.
pub type ConnectionHandler = Arc<dyn Fn() + Send + Sync>;

/// Notified when opening, reading or writing fails.
pub type ErrorHandler = Arc<dyn Fn(&Error) + Send + Sync>;

/// Message handler plus optional lifecycle handlers.
///
/// Handlers run on the supervisor task, in event order. A slow handler
/// delays delivery of the following frames.
///
/// ```rust
/// use chat2pay_core::chat_socket::ChatCallbacks;
///
/// let callbacks = ChatCallbacks::new(|text| println!("frame: {text}"))
///     .on_connect(|| println!("open"))
///     .on_disconnect(|| println!("closed"))
///     .on_error(|err| eprintln!("chat error: {err}"));
/// # let _ = callbacks;
/// ```
#[derive(Clone)]
pub struct ChatCallbacks {
    on_message: MessageHandler,
    on_connect: Option<ConnectionHandler>,
    on_disconnect: Option<ConnectionHandler>,
    on_error: Option<ErrorHandler>,
}

impl ChatCallbacks {
    /// Creates callbacks with the required message handler.
    pub fn new<F>(on_message: F) -> Self
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        Self {
            on_message: Arc::new(on_message),
            on_connect: None,
            on_disconnect: None,
            on_error: None,
        }
    }

    /// Sets the open handler.
    #[must_use]
    pub fn on_connect<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_connect = Some(Arc::new(handler));
        self
    }

    /// Sets the close handler.
    #[must_use]
    pub fn on_disconnect<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_disconnect = Some(Arc::new(handler));
        self
    }

    /// Sets the error handler.
    #[must_use]
    pub fn on_error<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Error) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(handler));
        self
    }

    pub(crate) fn message(&self, text: String) {
        (self.on_message)(text);
    }

    pub(crate) fn connected(&self) {
        if let Some(handler) = &self.on_connect {
            handler();
        }
    }

    pub(crate) fn disconnected(&self) {
        if let Some(handler) = &self.on_disconnect {
            handler();
        }
    }

    pub(crate) fn error(&self, err: &Error) {
        if let Some(handler) = &self.on_error {
            handler(err);
        }
    }
}

impl fmt::Debug for ChatCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCallbacks")
            .field("on_connect", &self.on_connect.is_some())
            .field("on_disconnect", &self.on_disconnect.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish_non_exhaustive()
    }
}

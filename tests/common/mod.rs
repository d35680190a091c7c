//! Shared helpers for the workspace integration tests: a local chat server
//! and a callback recorder.

#![allow(dead_code)]

use chat2pay_rust::ChatCallbacks;
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};

/// How the local server treats each accepted TCP connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMode {
    /// Completes the handshake, greets, then echoes text frames.
    Echo,
    /// Drops the TCP stream before the handshake, so every open fails.
    RejectHandshake,
    /// Completes the handshake on the first connection and closes it at
    /// once; later connections behave like `Echo`.
    CloseFirst,
}

/// Local WebSocket server on `127.0.0.1:0`.
pub struct ChatServer {
    pub addr: SocketAddr,
    accepted: Arc<AtomicUsize>,
    paths: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl ChatServer {
    pub async fn start(mode: ServerMode) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        let accepted = Arc::new(AtomicUsize::new(0));
        let paths = Arc::new(Mutex::new(Vec::new()));

        let handle = {
            let accepted = Arc::clone(&accepted);
            let paths = Arc::clone(&paths);
            tokio::spawn(async move {
                while let Ok((tcp, _)) = listener.accept().await {
                    let index = accepted.fetch_add(1, Ordering::SeqCst);
                    tokio::spawn(serve(tcp, mode, index, Arc::clone(&paths)));
                }
            })
        };

        Self {
            addr,
            accepted,
            paths,
            handle,
        }
    }

    /// Base URL to hand to the client.
    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// TCP connections accepted so far.
    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    /// Request paths of completed handshakes.
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Drop for ChatServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(tcp: TcpStream, mode: ServerMode, index: usize, paths: Arc<Mutex<Vec<String>>>) {
    if mode == ServerMode::RejectHandshake {
        drop(tcp);
        return;
    }

    let record = |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
        paths.lock().unwrap().push(req.uri().path().to_string());
        Ok(resp)
    };
    let Ok(ws) = accept_hdr_async(tcp, record).await else {
        return;
    };
    let (mut tx, mut rx) = ws.split();

    if mode == ServerMode::CloseFirst && index == 0 {
        let _ = tx.send(Message::Close(None)).await;
        return;
    }

    let _ = tx.send(Message::Text(String::from("welcome").into())).await;
    let _ = tx
        .send(Message::Binary(b"bin-hello".to_vec().into()))
        .await;
    let _ = tx
        .send(Message::Binary(vec![0xff, 0xfe, 0xfd].into()))
        .await;

    while let Some(Ok(message)) = rx.next().await {
        match message {
            Message::Text(text) => {
                let reply = format!("echo: {}", text.as_str());
                if tx.send(Message::Text(reply.into())).await.is_err() {
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
}

/// Records callback invocations in order.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn callbacks(&self) -> ChatCallbacks {
        let (m, c, d, e) = (
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
        );
        ChatCallbacks::new(move |text| m.push(format!("message:{text}")))
            .on_connect(move || c.push("connect".to_string()))
            .on_disconnect(move || d.push("disconnect".to_string()))
            .on_error(move |_| e.push("error".to_string()))
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, event: &str) -> usize {
        self.events().iter().filter(|e| *e == event).count()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| e.strip_prefix("message:").map(str::to_string))
            .collect()
    }
}

/// Polls `condition` every 10ms until it holds or `timeout` passes.
pub async fn wait_until<F>(timeout: Duration, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if condition() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

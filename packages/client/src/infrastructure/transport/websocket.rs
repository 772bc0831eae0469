//! WebSocket transport built on tokio-tungstenite.
//!
//! One background task owns the socket. It reconnects on its own after a
//! failure, raising `connect_error` for each failed attempt and `connect` for
//! each success. Frames emitted while disconnected stay queued, up to
//! `outbound_capacity`, and are written after the next successful connect.
//! A frame whose write fails is kept and written first on the next
//! connection, so a peer may see it twice but never loses it to a
//! reconnect.

use std::{
    fmt::Display,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use futures_util::{Sink, SinkExt, StreamExt};
use parley_shared::protocol::{Frame, event};
use serde_json::Value;
use tokio::{
    net::TcpStream,
    sync::mpsc::{self, Receiver, Sender, error::TrySendError},
    task::JoinHandle,
};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use super::listener::ListenerRegistry;
use crate::domain::{EventSink, Transport, TransportError};

/// Default relay endpoint.
pub const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:3000/ws";

/// Frames held for an unavailable connection before `emit` refuses more.
pub const DEFAULT_OUTBOUND_CAPACITY: usize = 1024;

/// Connection and reconnection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOptions {
    pub url: String,
    pub reconnect_delay: Duration,
    /// Consecutive failed attempts tolerated before giving up; `None` retries forever
    pub max_reconnect_attempts: Option<u32>,
    pub outbound_capacity: usize,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL.to_string(),
            reconnect_delay: Duration::from_millis(1000),
            max_reconnect_attempts: None,
            outbound_capacity: DEFAULT_OUTBOUND_CAPACITY,
        }
    }
}

type Listeners = Arc<Mutex<ListenerRegistry>>;
type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

fn lock(listeners: &Listeners) -> MutexGuard<'_, ListenerRegistry> {
    listeners.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Transport speaking JSON [`Frame`]s over a WebSocket.
pub struct WebSocketTransport {
    outbound: Sender<String>,
    capacity: usize,
    listeners: Listeners,
    task: JoinHandle<()>,
}

impl WebSocketTransport {
    /// Start connecting in the background. Must be called inside a tokio runtime.
    pub fn connect(options: TransportOptions) -> Self {
        let capacity = options.outbound_capacity.max(1);
        let (outbound, outbound_rx) = mpsc::channel(capacity);
        let listeners: Listeners = Arc::new(Mutex::new(ListenerRegistry::new()));
        let task = tokio::spawn(run_connection(options, listeners.clone(), outbound_rx));

        Self {
            outbound,
            capacity,
            listeners,
            task,
        }
    }

    /// Whether the background task has stopped (gave up reconnecting).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for WebSocketTransport {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[async_trait]
impl Transport for WebSocketTransport {
    async fn emit(&self, event: &str, payload: Value) -> Result<(), TransportError> {
        let text = Frame::new(event, payload)
            .to_json()
            .map_err(|e| TransportError::Encode(e.to_string()))?;
        self.outbound.try_send(text).map_err(|e| match e {
            TrySendError::Full(_) => {
                tracing::warn!("Outbound queue full, dropping '{}' frame", event);
                TransportError::QueueFull {
                    capacity: self.capacity,
                }
            }
            TrySendError::Closed(_) => TransportError::Closed,
        })
    }

    fn on(&self, event: &str, sink: EventSink) {
        lock(&self.listeners).add(event, sink);
    }

    fn off(&self, event: &str, sink: &EventSink) {
        lock(&self.listeners).remove(event, sink);
    }
}

/// Why a live connection ended.
enum SessionEnd {
    /// Every transport handle is gone; stop for good
    Shutdown,
    /// The socket failed or was closed by the peer
    Lost(String),
}

async fn run_connection(
    options: TransportOptions,
    listeners: Listeners,
    mut outbound_rx: Receiver<String>,
) {
    let mut failures: u32 = 0;
    let mut in_flight: Option<String> = None;

    loop {
        match connect_async(options.url.as_str()).await {
            Ok((socket, _)) => {
                failures = 0;
                tracing::info!("Connected to '{}'", options.url);
                lock(&listeners).dispatch(event::CONNECT, &Value::Null);

                match pump(socket, &listeners, &mut outbound_rx, &mut in_flight).await {
                    SessionEnd::Shutdown => {
                        tracing::debug!("Transport dropped, closing connection");
                        return;
                    }
                    SessionEnd::Lost(reason) => {
                        tracing::warn!("Connection to '{}' lost: {}", options.url, reason);
                        lock(&listeners).dispatch(event::CONNECT_ERROR, &Value::String(reason));
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Failed to connect to '{}': {}", options.url, e);
                lock(&listeners).dispatch(event::CONNECT_ERROR, &Value::String(e.to_string()));
            }
        }

        failures += 1;
        if let Some(max) = options.max_reconnect_attempts
            && failures > max
        {
            tracing::error!(
                "Giving up on '{}' after {} failed attempts",
                options.url,
                failures
            );
            return;
        }
        tokio::time::sleep(options.reconnect_delay).await;
    }
}

async fn pump(
    socket: Socket,
    listeners: &Listeners,
    outbound_rx: &mut Receiver<String>,
    in_flight: &mut Option<String>,
) -> SessionEnd {
    let (mut writer, mut reader) = socket.split();

    if let Err(reason) = write_frame(&mut writer, in_flight).await {
        return SessionEnd::Lost(reason);
    }

    loop {
        tokio::select! {
            outbound = outbound_rx.recv() => match outbound {
                Some(text) => {
                    *in_flight = Some(text);
                    if let Err(reason) = write_frame(&mut writer, in_flight).await {
                        return SessionEnd::Lost(reason);
                    }
                }
                None => {
                    let _ = writer.close().await;
                    return SessionEnd::Shutdown;
                }
            },
            inbound = reader.next() => match inbound {
                Some(Ok(Message::Text(text))) => handle_text(text.as_str(), listeners),
                Some(Ok(Message::Close(_))) | None => {
                    return SessionEnd::Lost("connection closed by server".to_string());
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return SessionEnd::Lost(e.to_string()),
            },
        }
    }
}

/// Write the frame held in `in_flight`; it is released only once the socket
/// accepts it.
async fn write_frame<W>(writer: &mut W, in_flight: &mut Option<String>) -> Result<(), String>
where
    W: Sink<Message> + Unpin,
    W::Error: Display,
{
    if let Some(text) = in_flight.as_ref() {
        writer
            .send(Message::Text(text.clone().into()))
            .await
            .map_err(|e| e.to_string())?;
        *in_flight = None;
    }
    Ok(())
}

fn handle_text(text: &str, listeners: &Listeners) {
    match Frame::from_json(text) {
        Ok(frame) => {
            tracing::debug!("Received '{}' event", frame.event);
            lock(listeners).dispatch(&frame.event, &frame.data);
        }
        Err(e) => {
            tracing::warn!("Dropping malformed frame: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_handle_text_dispatches_frame_to_listeners() {
        // テスト項目: 受信したテキストフレームがイベント名のリスナーに配送される
        // given (前提条件):
        let listeners: Listeners = Arc::new(Mutex::new(ListenerRegistry::new()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        lock(&listeners).add("game-message", tx);

        // when (操作):
        handle_text(r#"{"event":"game-message","data":"alice joined"}"#, &listeners);

        // then (期待する結果):
        let received = rx.try_recv().unwrap();
        assert_eq!(received.event, "game-message");
        assert_eq!(received.payload, json!("alice joined"));
    }

    #[test]
    fn test_handle_text_drops_malformed_frame() {
        // テスト項目: 不正なフレームは配送されずに破棄される
        // given (前提条件):
        let listeners: Listeners = Arc::new(Mutex::new(ListenerRegistry::new()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        lock(&listeners).add("game-message", tx);

        // when (操作):
        handle_text("not json", &listeners);

        // then (期待する結果):
        assert!(rx.try_recv().is_err());
    }

    async fn unused_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        format!("ws://{addr}/ws")
    }

    #[tokio::test]
    async fn test_unreachable_server_raises_connect_error() {
        // テスト項目: 接続できない場合、connect_error がリスナーに通知される
        // given (前提条件): 何も待ち受けていないポート
        let options = TransportOptions {
            url: unused_url().await,
            reconnect_delay: Duration::from_millis(10),
            max_reconnect_attempts: Some(1),
            ..TransportOptions::default()
        };
        let transport = WebSocketTransport::connect(options);
        let (tx, mut rx) = mpsc::unbounded_channel();
        transport.on(event::CONNECT_ERROR, tx);

        // when (操作):
        let first = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;

        // then (期待する結果):
        let first = first.expect("connect_error not raised").unwrap();
        assert_eq!(first.event, "connect_error");
        assert!(first.payload.is_string());
    }

    #[tokio::test]
    async fn test_emit_after_shutdown_reports_closed() {
        // テスト項目: 再接続を諦めた後の emit は Closed エラーになる
        // given (前提条件):
        let options = TransportOptions {
            url: unused_url().await,
            reconnect_delay: Duration::from_millis(1),
            max_reconnect_attempts: Some(0),
            ..TransportOptions::default()
        };
        let transport = WebSocketTransport::connect(options);
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while !transport.is_finished() && tokio::time::Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        // when (操作):
        let result = transport.emit("make-move", json!("e2e4")).await;

        // then (期待する結果):
        assert!(transport.is_finished());
        assert_eq!(result, Err(TransportError::Closed));
    }

    #[tokio::test]
    async fn test_emit_refuses_frames_beyond_outbound_capacity() {
        // テスト項目: 接続が戻らない間に送信キューが上限に達すると QueueFull になる
        // given (前提条件): 再接続待ちが長く、キュー上限 2 の接続
        let options = TransportOptions {
            url: unused_url().await,
            reconnect_delay: Duration::from_secs(60),
            max_reconnect_attempts: None,
            outbound_capacity: 2,
        };
        let transport = WebSocketTransport::connect(options);

        // when (操作):
        let first = transport.emit("make-move", json!("e2e4")).await;
        let second = transport.emit("make-move", json!("e7e5")).await;
        let third = transport.emit("make-move", json!("g1f3")).await;

        // then (期待する結果):
        assert!(first.is_ok());
        assert!(second.is_ok());
        assert_eq!(third, Err(TransportError::QueueFull { capacity: 2 }));
    }

    #[tokio::test]
    async fn test_frame_is_kept_until_socket_accepts_it() {
        // テスト項目: 書き込みに失敗したフレームは保持され、次の接続で最初に書き込まれる
        // given (前提条件): 書き込みが必ず失敗するソケット
        let mut broken = Box::pin(futures_util::sink::unfold((), |(), _: Message| async {
            Err::<(), _>("broken pipe".to_string())
        }));
        let mut in_flight = Some(r#"{"event":"make-move","data":"e2e4"}"#.to_string());

        // when (操作):
        let failed = write_frame(&mut broken, &mut in_flight).await;

        // then (期待する結果):
        assert_eq!(failed, Err("broken pipe".to_string()));
        assert!(in_flight.is_some());

        // 次の接続では保持していたフレームが書き込まれる
        let mut healthy: Vec<Message> = Vec::new();
        write_frame(&mut healthy, &mut in_flight).await.unwrap();
        assert_eq!(
            healthy,
            vec![Message::Text(r#"{"event":"make-move","data":"e2e4"}"#.into())]
        );
        assert!(in_flight.is_none());
    }
}

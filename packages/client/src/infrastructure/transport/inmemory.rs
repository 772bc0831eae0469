//! InMemory Transport 実装
//!
//! ネットワークを使わずに Transport trait を満たす実装。
//! 送信されたフレームを記録し、受信イベントや接続エラーをテストから
//! 注入できるため、チャンネルの振る舞いを検証するハーネスとして使います。

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use parley_shared::protocol::{Frame, event};
use serde_json::Value;

use super::listener::ListenerRegistry;
use crate::domain::{EventSink, Transport, TransportError};

/// Transport backed by memory instead of a socket.
#[derive(Debug, Default)]
pub struct InMemoryTransport {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    listeners: ListenerRegistry,
    emitted: Vec<Frame>,
    closed: bool,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every frame accepted by `emit`, in order.
    pub fn emitted(&self) -> Vec<Frame> {
        self.lock().emitted.clone()
    }

    /// Payloads emitted under `event`, in order.
    pub fn emitted_payloads(&self, event: &str) -> Vec<Value> {
        self.lock()
            .emitted
            .iter()
            .filter(|frame| frame.event == event)
            .map(|frame| frame.data.clone())
            .collect()
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.lock().listeners.count(event)
    }

    /// Make subsequent emits fail with [`TransportError::Closed`].
    pub fn set_closed(&self, closed: bool) {
        self.lock().closed = closed;
    }

    /// Simulate the peer sending `payload` under `event`.
    pub fn deliver(&self, event: &str, payload: Value) -> usize {
        self.lock().listeners.dispatch(event, &payload)
    }

    /// Simulate a transport-level connection failure.
    pub fn fail_connection(&self, reason: &str) -> usize {
        self.deliver(event::CONNECT_ERROR, Value::String(reason.to_string()))
    }

    /// Simulate the transport re-establishing its connection.
    pub fn reconnect(&self) -> usize {
        self.deliver(event::CONNECT, Value::Null)
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn emit(&self, event: &str, payload: Value) -> Result<(), TransportError> {
        let mut inner = self.lock();
        if inner.closed {
            return Err(TransportError::Closed);
        }
        inner.emitted.push(Frame::new(event, payload));
        Ok(())
    }

    fn on(&self, event: &str, sink: EventSink) {
        self.lock().listeners.add(event, sink);
    }

    fn off(&self, event: &str, sink: &EventSink) {
        self.lock().listeners.remove(event, sink);
    }
}

use std::collections::HashMap;

use serde_json::Value;

use crate::domain::{EventSink, InboundEvent};

/// Event name to listener sinks.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    listeners: HashMap<String, Vec<EventSink>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, event: &str, sink: EventSink) {
        self.listeners
            .entry(event.to_string())
            .or_default()
            .push(sink);
    }

    /// Remove `sink` from `event`. Sinks are compared by the channel they feed.
    pub fn remove(&mut self, event: &str, sink: &EventSink) {
        if let Some(sinks) = self.listeners.get_mut(event) {
            sinks.retain(|registered| !registered.same_channel(sink));
            if sinks.is_empty() {
                self.listeners.remove(event);
            }
        }
    }

    pub fn count(&self, event: &str) -> usize {
        self.listeners.get(event).map_or(0, Vec::len)
    }

    /// Deliver an event to every listener of `event`, dropping listeners whose
    /// receiving side is gone. Returns how many listeners received it.
    pub fn dispatch(&mut self, event: &str, payload: &Value) -> usize {
        let Some(sinks) = self.listeners.get_mut(event) else {
            tracing::debug!("No listener for event '{}'", event);
            return 0;
        };

        sinks.retain(|sink| sink.send(InboundEvent::new(event, payload.clone())).is_ok());
        let delivered = sinks.len();
        if sinks.is_empty() {
            self.listeners.remove(event);
        }
        delivered
    }
}

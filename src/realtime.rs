//! Realtime broadcast channel: a registry of connected listeners with
//! fan-out to everyone except the publisher. Holds no durable state:
//! a listener that connects after a publish never sees it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

pub type ListenerId = u64;

/// A single realtime message: event name plus an arbitrary JSON payload
/// that is re-broadcast verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub event: String,
    pub payload: serde_json::Value,
}

impl Frame {
    #[must_use]
    pub fn new(event: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            event: event.into(),
            payload,
        }
    }
}

#[derive(Default)]
struct Registry {
    next_id: ListenerId,
    listeners: HashMap<ListenerId, mpsc::UnboundedSender<Frame>>,
}

/// Shared listener registry. Connect/disconnect/publish are safe from
/// arbitrarily many concurrent callers; registry mutation happens under
/// a single mutex and the listener snapshot is released before delivery
/// so a slow send never blocks newly arriving connections.
#[derive(Clone, Default)]
pub struct EventHub {
    inner: Arc<Mutex<Registry>>,
}

impl EventHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new listener. No handshake data is exchanged.
    pub fn connect(&self) -> (ListenerId, mpsc::UnboundedReceiver<Frame>) {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut registry = self.inner.lock().expect("hub registry poisoned");
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.insert(id, tx);

        tracing::debug!("Listener {} connected ({} total)", id, registry.listeners.len());
        (id, rx)
    }

    /// Remove a listener. Safe to call more than once for the same id.
    pub fn disconnect(&self, id: ListenerId) {
        let mut registry = self.inner.lock().expect("hub registry poisoned");
        if registry.listeners.remove(&id).is_some() {
            tracing::debug!("Listener {} disconnected ({} left)", id, registry.listeners.len());
        }
    }

    /// Deliver a frame to every registered listener except the publisher.
    /// Best effort: a listener whose channel is gone is skipped, never
    /// retried, and never blocks the others. Returns the delivery count.
    pub fn publish(&self, from: Option<ListenerId>, frame: &Frame) -> usize {
        let snapshot: Vec<(ListenerId, mpsc::UnboundedSender<Frame>)> = {
            let registry = self.inner.lock().expect("hub registry poisoned");
            registry
                .listeners
                .iter()
                .map(|(id, tx)| (*id, tx.clone()))
                .collect()
        };

        let mut delivered = 0;
        for (id, tx) in snapshot {
            if Some(id) == from {
                continue;
            }
            if tx.send(frame.clone()).is_ok() {
                delivered += 1;
            }
        }
        delivered
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.lock().expect("hub registry poisoned").listeners.len()
    }

    /// Drop every listener channel. Used at shutdown so connected
    /// clients see their stream end.
    pub fn close_all(&self) {
        let mut registry = self.inner.lock().expect("hub registry poisoned");
        registry.listeners.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::sync::mpsc::error::TryRecvError;

    fn frame() -> Frame {
        Frame::new("new_data", json!({"x": 1}))
    }

    #[test]
    fn publish_excludes_sender() {
        let hub = EventHub::new();
        let (a, mut rx_a) = hub.connect();
        let (_b, mut rx_b) = hub.connect();
        let (_c, mut rx_c) = hub.connect();

        let delivered = hub.publish(Some(a), &frame());
        assert_eq!(delivered, 2);

        assert_eq!(rx_b.try_recv().unwrap(), frame());
        assert_eq!(rx_c.try_recv().unwrap(), frame());
        assert!(matches!(rx_a.try_recv(), Err(TryRecvError::Empty)));

        // Exactly once per listener.
        assert!(matches!(rx_b.try_recv(), Err(TryRecvError::Empty)));
        assert!(matches!(rx_c.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn late_joiner_receives_nothing() {
        let hub = EventHub::new();
        let (a, _rx_a) = hub.connect();
        hub.publish(Some(a), &frame());

        let (_d, mut rx_d) = hub.connect();
        assert!(matches!(rx_d.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn disconnect_is_idempotent() {
        let hub = EventHub::new();
        let (a, _rx_a) = hub.connect();
        let (b, mut rx_b) = hub.connect();

        hub.disconnect(a);
        hub.disconnect(a);
        assert_eq!(hub.listener_count(), 1);

        let delivered = hub.publish(None, &frame());
        assert_eq!(delivered, 1);
        assert_eq!(rx_b.try_recv().unwrap(), frame());
        let _ = b;
    }

    #[test]
    fn dead_listener_does_not_block_delivery() {
        let hub = EventHub::new();
        let (_a, rx_a) = hub.connect();
        let (_b, mut rx_b) = hub.connect();

        // Listener A went away without disconnecting.
        drop(rx_a);

        let delivered = hub.publish(None, &frame());
        assert_eq!(delivered, 1);
        assert_eq!(rx_b.try_recv().unwrap(), frame());
    }

    #[test]
    fn close_all_ends_streams() {
        let hub = EventHub::new();
        let (_a, mut rx_a) = hub.connect();

        hub.close_all();
        assert_eq!(hub.listener_count(), 0);
        assert!(matches!(rx_a.try_recv(), Err(TryRecvError::Disconnected)));
    }
}

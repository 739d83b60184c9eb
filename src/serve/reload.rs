// src/serve/reload.rs

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Messages pushed to connected live-reload clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ReloadMessage {
    /// A category finished rebuilding; the page should reload.
    Reload { category: String },

    /// Connected confirmation.
    Connected,
}

/// Fan-out hub for reload messages.
#[derive(Debug, Clone)]
pub struct ReloadHub {
    tx: broadcast::Sender<ReloadMessage>,
}

impl ReloadHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(100);
        Self { tx }
    }

    /// Broadcast a reload message to all connected clients. Having no
    /// listeners is fine.
    pub fn broadcast(&self, message: ReloadMessage) {
        let _ = self.tx.send(message);
    }

    /// Subscribe to reload messages.
    pub fn subscribe(&self) -> broadcast::Receiver<ReloadMessage> {
        self.tx.subscribe()
    }

    /// Get number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ReloadHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hub_starts_without_subscribers() {
        let hub = ReloadHub::new();
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn subscribe_and_receive() {
        let hub = ReloadHub::new();
        let mut rx = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 1);

        hub.broadcast(ReloadMessage::Reload {
            category: "style".to_string(),
        });
        let msg = rx.try_recv().expect("message");
        assert!(matches!(msg, ReloadMessage::Reload { category } if category == "style"));
    }
}

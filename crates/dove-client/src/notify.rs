use tokio::sync::broadcast;

use dove_types::events::AppEvent;

/// Publish/subscribe hub shared by every open view of the running app.
#[derive(Clone)]
pub struct Notifier {
    tx: broadcast::Sender<AppEvent>,
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(256);
        Self { tx }
    }

    /// Subscribe to app events. Only events published after this call are received.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }

    /// Deliver an event to all current subscribers. Returns how many there were.
    pub fn publish(&self, event: AppEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

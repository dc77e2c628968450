use tokio::sync::broadcast;

use common::gomoku::WinEvent;
use common::log_debug;

const CHANNEL_CAPACITY: usize = 64;

/// Fans win events from every room out to any number of subscribers.
#[derive(Clone)]
pub struct WinBroadcaster {
    sender: broadcast::Sender<WinEvent>,
}

impl std::fmt::Debug for WinBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WinBroadcaster")
            .field("subscribers", &self.sender.receiver_count())
            .finish()
    }
}

impl Default for WinBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl WinBroadcaster {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WinEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: WinEvent) {
        if self.sender.send(event).is_err() {
            log_debug!("Win event dropped: no subscribers");
        }
    }
}

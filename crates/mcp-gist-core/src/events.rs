//! "Definitions changed" notifications

use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 16;

/// Broadcasts a signal whenever the set of server definitions may have changed
///
/// Hosts re-query definitions and refresh the tree view on each signal.
#[derive(Debug, Clone)]
pub struct ChangeEmitter {
    sender: broadcast::Sender<()>,
}

impl Default for ChangeEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeEmitter {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribe to change signals
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.sender.subscribe()
    }

    /// Signal a change; returns the number of subscribers notified
    pub fn fire(&self) -> usize {
        // No subscribers is fine
        self.sender.send(()).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_without_subscribers() {
        let emitter = ChangeEmitter::new();
        assert_eq!(emitter.fire(), 0);
    }

    #[tokio::test]
    async fn test_subscribers_receive() {
        let emitter = ChangeEmitter::new();
        let mut first = emitter.subscribe();
        let mut second = emitter.clone().subscribe();
        assert_eq!(emitter.subscriber_count(), 2);

        assert_eq!(emitter.fire(), 2);
        first.recv().await.unwrap();
        second.recv().await.unwrap();
    }
}

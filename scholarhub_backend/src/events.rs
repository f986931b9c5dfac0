use tokio::sync::mpsc;

/// Completions delivered back to the owning event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Simulated fetch for the feed window finished.
    FeedPageLoaded { generation: u64 },
    /// Simulated federated search finished.
    SearchCompleted { generation: u64 },
    /// Outgoing chat message was accepted.
    MessageSent {
        conversation_id: String,
        message_id: String,
    },
}

pub type EventSender = mpsc::UnboundedSender<AppEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

//! User-facing failure messages (the storefront's toast channel).

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Fire-and-forget sink for messages shown to the shopper.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Writes every message to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        warn!(target: "toast", %message, "User notified");
    }
}

/// Forwards messages to a UI consumer over a channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<String>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn error(&self, message: &str) {
        if self.sender.send(message.to_string()).is_err() {
            debug!(%message, "Toast consumer gone, message dropped");
        }
    }
}

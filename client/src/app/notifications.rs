//! # Toast Notifications
//!
//! View controllers report the outcome of user actions as [`Toast`]s sent over
//! an unbounded channel; whatever renders the UI drains the receiver.

use async_channel::{Receiver, Sender};

/// Visual weight of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

/// A short notification for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}

/// Sending half of the toast channel. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: Sender<Toast>,
}

impl Notifier {
    /// A notifier and the receiver the UI drains.
    pub fn channel() -> (Self, Receiver<Toast>) {
        let (tx, rx) = async_channel::unbounded();
        (Self { tx }, rx)
    }

    pub fn notify(&self, toast: Toast) {
        if let Err(e) = self.tx.try_send(toast) {
            // Receiver gone: the UI is shutting down.
            tracing::debug!(title = %e.into_inner().title, "Dropped toast, no receiver");
        }
    }

    pub fn info(&self, title: impl Into<String>, description: impl Into<String>) {
        self.notify(Toast::info(title, description));
    }

    pub fn error(&self, title: impl Into<String>, description: impl Into<String>) {
        self.notify(Toast::destructive(title, description));
    }
}

/// Everything currently queued on `rx`.
pub fn drain(rx: &Receiver<Toast>) -> Vec<Toast> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_arrive_in_order() {
        let (notifier, rx) = Notifier::channel();
        notifier.info("Success", "Item approved");
        notifier.error("Error", "Failed to reject item");

        let toasts = drain(&rx);
        assert_eq!(toasts.len(), 2);
        assert!(!toasts[0].is_destructive());
        assert!(toasts[1].is_destructive());
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn test_notify_without_receiver_does_not_panic() {
        let (notifier, rx) = Notifier::channel();
        drop(rx);
        notifier.info("Logged Out", "You have been logged out.");
    }
}

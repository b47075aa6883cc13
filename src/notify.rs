use log::warn;
use std::sync::mpsc::{self, TrySendError};

/// Messages a subscriber may leave unread before it is dropped.
pub const DEFAULT_BACKLOG: usize = 4096;

/// Fan-out of change notifications to channel subscribers.
///
/// Each subscriber gets a bounded channel. Receivers that have been dropped,
/// or that fall more than the backlog behind, are pruned on the next send.
#[derive(Debug)]
pub struct Notifier<T> {
    subscribers: Vec<mpsc::SyncSender<T>>,
    backlog: usize,
}

impl<T> Default for Notifier<T> {
    fn default() -> Self {
        Self::with_backlog(DEFAULT_BACKLOG)
    }
}

impl<T> Notifier<T> {
    pub fn with_backlog(backlog: usize) -> Self {
        Self {
            subscribers: Vec::new(),
            backlog,
        }
    }
}

impl<T: Clone> Notifier<T> {
    pub fn subscribe(&mut self) -> mpsc::Receiver<T> {
        let (tx, rx) = mpsc::sync_channel(self.backlog);
        self.subscribers.push(tx);
        rx
    }

    pub fn notify(&mut self, value: &T) {
        let backlog = self.backlog;
        self.subscribers
            .retain(|tx| match tx.try_send(value.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    warn!("dropping a subscriber with {} unread notifications", backlog);
                    false
                }
                Err(TrySendError::Disconnected(_)) => false,
            });
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_closed_subscribers() {
        let mut notifier = Notifier::default();
        let rx = notifier.subscribe();
        let closed = notifier.subscribe();
        drop(closed);

        notifier.notify(&3);
        assert_eq!(rx.try_recv(), Ok(3));
        assert_eq!(notifier.subscriber_count(), 1);
    }

    #[test]
    fn drops_subscribers_that_stop_reading() {
        let mut notifier = Notifier::with_backlog(2);
        let stalled = notifier.subscribe();
        let reader = notifier.subscribe();

        for value in 0..3 {
            notifier.notify(&value);
            assert_eq!(reader.try_recv(), Ok(value));
        }
        assert_eq!(notifier.subscriber_count(), 1);
        assert_eq!(stalled.try_iter().collect::<Vec<_>>(), vec![0, 1]);
    }
}

//! FIFO of animation requests waiting for the engine to go dormant.

use std::collections::VecDeque;
use std::fmt;

use crate::resources::playback::PlaybackCallback;

/// A request waiting for its turn.
pub struct QueuedPlayback {
    pub name: String,
    pub looping: bool,
    pub callback: Option<PlaybackCallback>,
}

impl fmt::Debug for QueuedPlayback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueuedPlayback")
            .field("name", &self.name)
            .field("looping", &self.looping)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Pending requests, consumed strictly in arrival order.
///
/// Clearing drops the queued callbacks without calling them: only an
/// animation that actually ran reports completion.
#[derive(Debug, Default)]
pub struct PlaybackQueue {
    entries: VecDeque<QueuedPlayback>,
}

impl PlaybackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, entry: QueuedPlayback) {
        self.entries.push_back(entry);
    }

    pub fn dequeue(&mut self) -> Option<QueuedPlayback> {
        self.entries.pop_front()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in the order they will play.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn entry(name: &str) -> QueuedPlayback {
        QueuedPlayback {
            name: name.to_string(),
            looping: false,
            callback: None,
        }
    }

    #[test]
    fn dequeues_in_arrival_order() {
        let mut queue = PlaybackQueue::new();
        queue.enqueue(entry("A"));
        queue.enqueue(entry("B"));
        assert_eq!(queue.names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(queue.dequeue().unwrap().name, "A");
        assert_eq!(queue.dequeue().unwrap().name, "B");
        assert!(queue.dequeue().is_none());
    }

    #[test]
    fn clear_drops_callbacks_without_calling_them() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut queue = PlaybackQueue::new();
        queue.enqueue(QueuedPlayback {
            name: "A".to_string(),
            looping: false,
            callback: Some(Box::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })),
        });

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}

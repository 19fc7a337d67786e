//! Lifecycle event bus.
//!
//! One [`EventBus`] is created per player and handed to whichever backend is
//! constructed, so both rendering strategies publish through the same
//! subscription surface. Built on `tokio::sync::broadcast`: `emit()` is a
//! sync call, each `subscribe()` creates an independent receiver, and
//! dropping a receiver unsubscribes it.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

pub use tokio::sync::broadcast::error::RecvError;
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 64;

/// Lifecycle notifications emitted by the active backend.
///
/// Ordering relative to queue state is normative: `ReadyToPlay` fires
/// exactly once per empty-to-non-empty queue transition, and `PlayEnd`
/// fires when the clip chain drains or the stream ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum PlayerEvent {
    /// Buffered audio is available; `play()` will produce sound.
    ReadyToPlay,
    /// Playback started from the initial `play()` call.
    PlayStart,
    /// Playback reached the end of all buffered audio.
    PlayEnd,
    /// Playback was paused.
    Pause,
    /// Playback resumed after a pause.
    ResumePlay,
    /// One fragment finished rendering (discrete-clip backend only).
    FragmentPlayed {
        /// Identifier the fragment was submitted with.
        fragment_id: String,
    },
}

/// Publish/subscribe channel for [`PlayerEvent`]s.
///
/// Cloning shares the underlying channel; the facade keeps one clone and
/// the active backend another.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<PlayerEvent>,
}

impl EventBus {
    /// Create a bus with the given per-subscriber buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event to all subscribers.
    ///
    /// Events published with no subscribers are silently dropped.
    pub fn emit(&self, event: PlayerEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to all future events.
    ///
    /// Each subscriber gets an independent receiver; slow subscribers
    /// receive `RecvError::Lagged` instead of blocking publishers. Dropping
    /// the receiver unsubscribes.
    pub fn subscribe(&self) -> Receiver<PlayerEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

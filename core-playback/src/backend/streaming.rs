//! Streaming-append backend.
//!
//! Feeds encoded fragments into a flow-controlled [`StreamingSink`] bound
//! to a [`PlaybackElement`]. At most one append is in flight at any time;
//! every further submission queues strictly in arrival order and drains one
//! entry per [`SinkEvent::AppendFinished`](bridge_traits::SinkEvent)
//! notification.

use crate::config::Fragment;
use crate::error::{PlayerError, Result};
use crate::events::{EventBus, PlayerEvent};
use bridge_traits::{PlaybackElement, StreamingSink};
use std::collections::VecDeque;
use tracing::{debug, trace, warn};

/// Scheduler for the streaming-append rendering strategy.
///
/// Owns the sink/element pair exclusively. All mutation happens on direct
/// caller calls or on the `on_*` notification entry points; the model is
/// single-threaded, so ordering (not locking) is what keeps state
/// consistent.
pub struct StreamingAppendScheduler {
    sink: Box<dyn StreamingSink>,
    element: Box<dyn PlaybackElement>,
    bus: EventBus,
    /// Fragments accepted but not yet submitted to the sink.
    pending: VecDeque<Fragment>,
    /// Id of the fragment whose append is currently in flight.
    in_flight: Option<String>,
    /// The sink has allocated its renderer buffer (post `SourceOpen`).
    sink_ready: bool,
    /// Caller-declared: more fragments may still arrive, so suppress the
    /// end-of-stream signal.
    expect_more: bool,
    is_playing: bool,
    disposed: bool,
}

impl StreamingAppendScheduler {
    /// Create a scheduler around a freshly initialized sink/element pair.
    pub fn new(
        sink: Box<dyn StreamingSink>,
        element: Box<dyn PlaybackElement>,
        bus: EventBus,
    ) -> Self {
        Self {
            sink,
            element,
            bus,
            pending: VecDeque::new(),
            in_flight: None,
            sink_ready: false,
            expect_more: true,
            is_playing: false,
            disposed: false,
        }
    }

    /// Number of fragments accepted but not yet fully appended.
    fn outstanding(&self) -> usize {
        self.pending.len() + usize::from(self.in_flight.is_some())
    }

    /// Accept a fragment for rendering.
    ///
    /// Submits immediately when the sink is idle; otherwise queues in
    /// arrival order. Legal in any playback state.
    pub fn append_buffer(&mut self, fragment: Fragment) -> Result<()> {
        if self.disposed {
            return Err(PlayerError::Disposed);
        }

        let was_idle = self.outstanding() == 0;

        if !self.sink_ready
            || self.in_flight.is_some()
            || !self.pending.is_empty()
            || self.sink.is_appending()
        {
            debug!(fragment_id = %fragment.id, queued = self.pending.len() + 1, "queueing fragment");
            self.pending.push_back(fragment);
        } else {
            debug!(fragment_id = %fragment.id, "submitting fragment to sink");
            let id = fragment.id.clone();
            self.sink.append(fragment.data)?;
            self.in_flight = Some(id);
        }

        if was_idle {
            self.bus.emit(PlayerEvent::ReadyToPlay);
        }
        Ok(())
    }

    /// The sink allocated its renderer buffer and can accept appends.
    pub fn on_source_open(&mut self) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        self.sink_ready = true;
        debug!("sink source open");
        if self.in_flight.is_none() {
            self.submit_next()?;
        }
        // The caller may have declared the stream complete before the sink
        // opened; with nothing outstanding this is the only chance to end it.
        self.maybe_signal_end_of_stream()
    }

    /// The in-flight append has been fully consumed by the sink.
    pub fn on_append_finished(&mut self) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        if self.in_flight.take().is_none() {
            warn!("append-finished with no append in flight");
        }

        if !self.pending.is_empty() {
            self.submit_next()?;
            return Ok(());
        }
        self.maybe_signal_end_of_stream()
    }

    /// Signal end of stream once nothing is outstanding and the caller has
    /// declared the stream complete.
    fn maybe_signal_end_of_stream(&mut self) -> Result<()> {
        if !self.expect_more
            && self.sink_ready
            && self.in_flight.is_none()
            && self.pending.is_empty()
            && !self.sink.is_appending()
            && self.sink.is_open()
        {
            debug!("nothing outstanding and stream declared complete, signalling end of stream");
            self.sink.signal_end_of_stream()?;
        }
        Ok(())
    }

    /// The bound element buffered enough to start rendering.
    pub fn on_can_play(&mut self) {
        // Readiness toward the caller is driven by the queue transition in
        // `append_buffer`; the element-level signal is informational here.
        trace!(is_playing = self.is_playing, "element reports can-play");
    }

    /// The bound element reached the end of the stream.
    pub fn on_ended(&mut self) {
        if self.disposed {
            return;
        }
        self.is_playing = false;
        self.bus.emit(PlayerEvent::PlayEnd);
    }

    fn submit_next(&mut self) -> Result<()> {
        if let Some(fragment) = self.pending.pop_front() {
            debug!(fragment_id = %fragment.id, remaining = self.pending.len(), "draining queued fragment");
            let id = fragment.id.clone();
            self.sink.append(fragment.data)?;
            self.in_flight = Some(id);
        }
        Ok(())
    }

    /// Start playback. No-op when already playing.
    pub fn play(&mut self) -> Result<()> {
        if self.disposed {
            return Err(PlayerError::Disposed);
        }
        if self.is_playing {
            return Ok(());
        }
        self.element
            .play()
            .map_err(|e| PlayerError::Playback(e.to_string()))?;
        self.is_playing = true;
        self.bus.emit(PlayerEvent::PlayStart);
        Ok(())
    }

    /// Pause the bound element.
    pub fn pause(&mut self) -> Result<()> {
        if self.disposed {
            return Err(PlayerError::Disposed);
        }
        self.element
            .pause()
            .map_err(|e| PlayerError::Playback(e.to_string()))?;
        self.is_playing = false;
        self.bus.emit(PlayerEvent::Pause);
        Ok(())
    }

    /// Resume the bound element after a pause.
    pub fn resume(&mut self) -> Result<()> {
        if self.disposed {
            return Err(PlayerError::Disposed);
        }
        self.element
            .play()
            .map_err(|e| PlayerError::Playback(e.to_string()))?;
        self.is_playing = true;
        self.bus.emit(PlayerEvent::ResumePlay);
        Ok(())
    }

    /// Declare whether more fragments may still arrive.
    ///
    /// While `true` (the default) the end-of-stream signal is suppressed.
    /// Clearing the flag with nothing outstanding signals end of stream
    /// immediately; there is no later `AppendFinished` to piggyback on. When
    /// the sink has not opened yet the signal is deferred to `SourceOpen`.
    pub fn set_expect_more(&mut self, expect_more: bool) -> Result<()> {
        if self.disposed {
            return Err(PlayerError::Disposed);
        }
        self.expect_more = expect_more;
        self.maybe_signal_end_of_stream()
    }

    /// Whether the element is currently playing.
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Release the sink and element. Idempotent; the disposed flag is set
    /// before any state is cleared so late notifications are ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.is_playing = false;
        self.element.clear_source();
        self.pending.clear();
        self.in_flight = None;
        debug!("streaming-append scheduler disposed");
    }
}

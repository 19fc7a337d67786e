//! Streaming-append rendering contract.
//!
//! The streaming strategy feeds encoded bytes into a single managed sink
//! that renders them as one continuous stream. The sink applies its own
//! flow control: only one append may be in flight at a time, and the
//! platform reports completion through [`SinkEvent::AppendFinished`].

use crate::error::Result;
use bytes::Bytes;

/// Notifications produced by a [`StreamingSink`] and its bound
/// [`PlaybackElement`].
///
/// The host glue forwards these into the core's notification entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    /// The sink allocated its renderer buffer and is ready to accept
    /// appends. Fragments submitted before this arrive are queued by the
    /// core, not dropped.
    SourceOpen,
    /// The previously submitted append has been fully consumed.
    AppendFinished,
    /// The bound playback element has buffered enough to start rendering.
    CanPlay,
    /// The bound playback element reached the end of the stream.
    Ended,
}

/// An append-oriented byte sink with its own flow-control signal.
///
/// Implementations wrap whatever progressive-append machinery the platform
/// provides. The core guarantees it never calls [`append`](Self::append)
/// while a previous append is still outstanding.
pub trait StreamingSink {
    /// Submit encoded bytes to the renderer buffer.
    ///
    /// Completion is reported asynchronously via
    /// [`SinkEvent::AppendFinished`].
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::AppendRejected`](crate::BridgeError) if the
    /// sink cannot accept data (buffer removed, stream already ended).
    fn append(&mut self, data: Bytes) -> Result<()>;

    /// Whether the renderer buffer is still consuming a previous append.
    fn is_appending(&self) -> bool;

    /// Whether the sink is open and able to accept appends or an
    /// end-of-stream signal.
    fn is_open(&self) -> bool;

    /// Declare that no further appends will follow.
    ///
    /// The core only calls this once the pending queue has drained, no
    /// append is in flight, and the caller has declared the stream complete.
    fn signal_end_of_stream(&mut self) -> Result<()>;
}

/// The playback element bound to a [`StreamingSink`].
///
/// Play state notifications ([`SinkEvent::CanPlay`], [`SinkEvent::Ended`])
/// are delivered through the sink's event stream, not return values.
pub trait PlaybackElement {
    /// Start or resume rendering.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::PlaybackRejected`](crate::BridgeError) if the
    /// platform refuses (e.g., autoplay policy).
    fn play(&mut self) -> Result<()>;

    /// Pause rendering, preserving position.
    fn pause(&mut self) -> Result<()>;

    /// Detach the element from its source. Called on dispose; must be
    /// idempotent.
    fn clear_source(&mut self);
}

//! Discrete-clip rendering contract.
//!
//! The clip strategy fully decodes each fragment into a [`NormalizedClip`]
//! and plays the clips one at a time through one-shot [`PlaybackUnit`]s,
//! chained end-to-end by [`ClipEvent::UnitFinished`] notifications.

use crate::error::Result;
use bytes::Bytes;

/// Decoded, channel-separated, float-normalized audio for one fragment.
///
/// Each channel holds the same number of frames; every sample lies in
/// `[-1.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedClip {
    /// Sample rate the clip was produced at, in hertz.
    pub sample_rate: u32,
    /// Non-interleaved per-channel sample planes.
    pub channels: Vec<Vec<f32>>,
}

impl NormalizedClip {
    /// Create a clip from per-channel planes.
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.channels.first().map(Vec::len).unwrap_or(0)
    }

    /// Returns `true` if the clip holds no audio.
    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }
}

/// Notifications produced by a [`ClipRenderer`] and its playback units.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipEvent {
    /// An asynchronous decode started via
    /// [`ClipRenderer::begin_decode`] completed successfully.
    DecodeFinished {
        /// Fragment the clip was decoded from.
        fragment_id: String,
        /// The decoded clip.
        clip: NormalizedClip,
    },
    /// An asynchronous decode failed. The fragment is skipped; later
    /// fragments are unaffected.
    DecodeFailed {
        /// Fragment whose decode failed.
        fragment_id: String,
        /// Platform-provided failure description.
        message: String,
    },
    /// The currently playing unit reached the end of its clip.
    UnitFinished,
}

/// A one-shot renderer for a single decoded clip.
///
/// Units cannot be paused mid-play; pausing happens at the shared context
/// level through [`ClipRenderer::suspend`].
pub trait PlaybackUnit {
    /// Begin rendering the clip from its start.
    fn start(&mut self) -> Result<()>;

    /// Detach the unit from the output graph. After this call the host must
    /// not deliver [`ClipEvent::UnitFinished`] for this unit; the core
    /// additionally ignores late deliveries. Must be idempotent.
    fn disconnect(&mut self);
}

/// Platform decode and clip playback collaborator.
///
/// One renderer instance is exclusively owned by one scheduler; it is never
/// shared across player instances.
pub trait ClipRenderer {
    /// Start decoding encoded bytes into a clip.
    ///
    /// Completion arrives later as [`ClipEvent::DecodeFinished`] (or
    /// [`ClipEvent::DecodeFailed`]) carrying `fragment_id`. Raw PCM never
    /// goes through this path; the core decodes it synchronously itself.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::DecodeRejected`](crate::BridgeError) if the
    /// decode cannot even be started.
    fn begin_decode(&mut self, fragment_id: &str, data: Bytes) -> Result<()>;

    /// Create a one-shot playback unit for a decoded clip.
    fn create_playback_unit(&mut self, clip: &NormalizedClip) -> Result<Box<dyn PlaybackUnit>>;

    /// Suspend the shared rendering context (pause).
    fn suspend(&mut self) -> Result<()>;

    /// Resume the shared rendering context.
    fn resume(&mut self) -> Result<()>;
}

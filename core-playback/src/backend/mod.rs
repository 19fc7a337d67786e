//! Rendering backends and backend selection.
//!
//! Exactly one backend is active per player instance, chosen once at
//! construction by [`select_backend`] — a pure function over the injected
//! capability snapshot and the stream options, so selection logic is
//! testable without real platform state.

mod clip_chain;
mod streaming;

pub use clip_chain::ClipChainScheduler;
pub use streaming::StreamingAppendScheduler;

use crate::config::StreamOptions;
use bridge_traits::Capabilities;
use serde::{Deserialize, Serialize};

/// Advisory identifier of the rendering strategy a player ended up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayMode {
    /// Flow-controlled incremental appends into a single managed sink.
    StreamingAppend,
    /// Fragments decoded into discrete clips chained via completion
    /// notifications.
    DiscreteClip,
}

impl PlayMode {
    /// Stable string form, matching the serialized representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayMode::StreamingAppend => "streaming-append",
            PlayMode::DiscreteClip => "discrete-clip",
        }
    }
}

/// Pick the rendering strategy for the given platform and stream.
///
/// Priority order:
/// 1. Streaming-append, when the capability is present, the format is a
///    compressed bitstream the sink can render, and the caller did not
///    force the clip backend.
/// 2. Discrete-clip, when that capability is present (raw PCM always lands
///    here).
/// 3. `None` — no fallback exists.
pub fn select_backend(capabilities: &Capabilities, options: &StreamOptions) -> Option<PlayMode> {
    if capabilities.streaming_append
        && options.format.is_streaming_append_eligible()
        && !options.use_discrete_clip
    {
        return Some(PlayMode::StreamingAppend);
    }
    if capabilities.discrete_clip {
        return Some(PlayMode::DiscreteClip);
    }
    None
}

//! Platform capability detection.
//!
//! Which rendering strategy the core may use depends on two boolean probes
//! answered by the host platform. The probes are evaluated once, the result
//! is captured in a plain [`Capabilities`] value, and that value is injected
//! into the player constructor. Backend selection therefore stays a pure
//! function of immutable inputs and is trivially unit-testable with
//! fabricated capabilities.

use serde::{Deserialize, Serialize};

/// Pure boolean queries answered by the host platform.
///
/// Implementations must be side-effect free and return stable answers for
/// the lifetime of the process.
pub trait CapabilityProbe {
    /// Whether the platform supports progressive-append rendering of a
    /// compressed bitstream (a managed sink with its own flow control).
    fn supports_streaming_append(&self) -> bool;

    /// Whether the platform supports decoding fragments into discrete clips
    /// and chaining them through one-shot playback units.
    fn supports_discrete_clip(&self) -> bool;
}

/// Snapshot of the platform's rendering capabilities.
///
/// Computed once via [`Capabilities::detect`] and passed by value; never
/// stored as mutable global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Streaming-append rendering is available.
    pub streaming_append: bool,
    /// Discrete-clip rendering is available.
    pub discrete_clip: bool,
}

impl Capabilities {
    /// Evaluate both probes once and capture the result.
    pub fn detect(probe: &dyn CapabilityProbe) -> Self {
        Self {
            streaming_append: probe.supports_streaming_append(),
            discrete_clip: probe.supports_discrete_clip(),
        }
    }

    /// A platform with no usable rendering strategy.
    pub fn none() -> Self {
        Self {
            streaming_append: false,
            discrete_clip: false,
        }
    }

    /// A platform with every rendering strategy available.
    pub fn all() -> Self {
        Self {
            streaming_append: true,
            discrete_clip: true,
        }
    }

    /// Returns `true` if at least one rendering strategy is available.
    pub fn any(&self) -> bool {
        self.streaming_append || self.discrete_clip
    }
}

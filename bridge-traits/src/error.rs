//! Error type shared by all bridge traits.

use thiserror::Error;

/// Errors produced by platform bridge implementations.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The sink rejected an append (e.g., the underlying buffer was removed
    /// or the stream was already ended).
    #[error("Append rejected by sink: {0}")]
    AppendRejected(String),

    /// The platform refused to start or control playback (e.g., an autoplay
    /// policy rejection).
    #[error("Playback rejected: {0}")]
    PlaybackRejected(String),

    /// The platform decoder could not start decoding the supplied bytes.
    #[error("Decode rejected: {0}")]
    DecodeRejected(String),

    /// The shared rendering context could not be suspended or resumed.
    #[error("Context unavailable: {0}")]
    ContextUnavailable(String),

    /// The platform could not construct the requested renderer.
    #[error("Renderer unavailable: {0}")]
    RendererUnavailable(String),
}

impl BridgeError {
    /// Returns `true` if this error came from a playback control call rather
    /// than data handling.
    pub fn is_playback_error(&self) -> bool {
        matches!(
            self,
            BridgeError::PlaybackRejected(_) | BridgeError::ContextUnavailable(_)
        )
    }
}

/// Result type for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

//! Error types for the playback core.

use bridge_traits::BridgeError;
use thiserror::Error;

/// Errors that can occur during player operations.
#[derive(Error, Debug)]
pub enum PlayerError {
    /// PCM bit depth outside the supported set {8, 16, 32}. Fatal to the
    /// single `append_buffer` call that raised it; queue state for prior
    /// and future fragments is unaffected.
    #[error("Unsupported PCM bit depth: {bit_depth} (expected 8, 16, or 32)")]
    UnsupportedFormat {
        /// The rejected bit depth.
        bit_depth: u16,
    },

    /// No rendering strategy is available for the requested stream.
    /// Construction-time; no player instance is produced.
    #[error("No supported playback backend for this platform and format")]
    NoSupportedBackend,

    /// The underlying renderer rejected a play/pause/resume call.
    #[error("Playback control failed: {0}")]
    Playback(String),

    /// Stream options failed validation.
    #[error("Invalid stream options: {0}")]
    InvalidOptions(String),

    /// The instance was already disposed.
    #[error("Player instance is disposed")]
    Disposed,

    /// Host-side configuration failure (e.g., logging setup).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A bridge collaborator failed outside of playback control.
    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),
}

impl PlayerError {
    /// Returns `true` if this error concerns the format of the supplied
    /// data rather than the platform.
    pub fn is_format_error(&self) -> bool {
        matches!(self, PlayerError::UnsupportedFormat { .. })
    }

    /// Returns `true` if the call may be retried on the same instance.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PlayerError::Playback(_))
    }
}

/// Result type for player operations.
pub type Result<T> = std::result::Result<T, PlayerError>;

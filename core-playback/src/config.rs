//! Stream options and fragment types.

use crate::error::{PlayerError, Result};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Encoding of the incoming fragment stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamFormat {
    /// Raw PCM samples; decoded synchronously by the core itself.
    Pcm,
    /// MPEG-1 Audio Layer 3 bitstream.
    Mp3,
    /// WAV container.
    Wav,
    /// AAC bitstream; always decoded through the platform clip renderer.
    Aac,
}

impl StreamFormat {
    /// Whether the streaming-append sink can render this format directly.
    ///
    /// Raw PCM and AAC always take the clip backend.
    pub fn is_streaming_append_eligible(&self) -> bool {
        matches!(self, StreamFormat::Mp3 | StreamFormat::Wav)
    }

    /// Whether the core decodes this format itself instead of delegating to
    /// the platform decoder.
    pub fn is_raw_pcm(&self) -> bool {
        matches!(self, StreamFormat::Pcm)
    }
}

/// Caller-supplied options, immutable for the life of a player instance.
///
/// `sample_rate`, `channel_count`, and `bit_depth` are only meaningful for
/// [`StreamFormat::Pcm`]; for compressed formats the platform decoder
/// determines them from the bitstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamOptions {
    /// Encoding of the incoming fragments.
    pub format: StreamFormat,
    /// Force the discrete-clip strategy even when streaming-append is
    /// available.
    #[serde(default)]
    pub use_discrete_clip: bool,
    /// Sample rate in hertz (PCM only).
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Number of interleaved channels (PCM only).
    #[serde(default = "default_channel_count")]
    pub channel_count: u16,
    /// Bits per sample (PCM only). Validity is checked per append, not
    /// here: an unsupported depth fails that `append_buffer` call with
    /// [`PlayerError::UnsupportedFormat`].
    #[serde(default = "default_bit_depth")]
    pub bit_depth: u16,
}

impl StreamOptions {
    /// Options for a compressed-bitstream stream.
    pub fn compressed(format: StreamFormat) -> Self {
        Self {
            format,
            use_discrete_clip: false,
            sample_rate: default_sample_rate(),
            channel_count: default_channel_count(),
            bit_depth: default_bit_depth(),
        }
    }

    /// Options for a raw PCM stream.
    pub fn pcm(sample_rate: u32, channel_count: u16, bit_depth: u16) -> Self {
        Self {
            format: StreamFormat::Pcm,
            use_discrete_clip: false,
            sample_rate,
            channel_count,
            bit_depth,
        }
    }

    /// Validate structural constraints.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(PlayerError::InvalidOptions(
                "sample_rate must be positive".to_string(),
            ));
        }
        if self.channel_count == 0 {
            return Err(PlayerError::InvalidOptions(
                "channel_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_sample_rate() -> u32 {
    8000
}

fn default_channel_count() -> u16 {
    1
}

fn default_bit_depth() -> u16 {
    16
}

/// One caller-submitted chunk of encoded or raw audio bytes.
///
/// Immutable once submitted; ownership of the byte buffer passes to the
/// scheduler for the duration of processing.
#[derive(Debug, Clone)]
pub struct Fragment {
    /// Caller-supplied or generated identifier, reported back when the
    /// fragment finishes playing on the clip backend.
    pub id: String,
    /// The audio payload.
    pub data: Bytes,
}

impl Fragment {
    /// Create a fragment with an explicit id.
    pub fn new(id: impl Into<String>, data: Bytes) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

//! Raw PCM to normalized clip conversion.

use crate::error::{PlayerError, Result};
use bridge_traits::NormalizedClip;

/// Converts raw interleaved PCM bytes into a [`NormalizedClip`].
///
/// Samples are interpreted as little-endian signed integers of the
/// configured width and normalized into `[-1.0, 1.0)` by dividing by the
/// signed type's magnitude (128 / 32768 / 2147483648). Sample index `i`
/// belongs to channel `i % channel_count`; each channel plane ends up with
/// `floor(total_samples / channel_count)` frames.
///
/// Pure and deterministic: no shared state, no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmDecoder {
    sample_rate: u32,
    channel_count: u16,
    bit_depth: u16,
}

impl PcmDecoder {
    /// Create a decoder for the given stream parameters.
    ///
    /// The bit depth is checked on each [`decode`](Self::decode) call, not
    /// here, so a bad depth fails the offending append without affecting
    /// construction.
    pub fn new(sample_rate: u32, channel_count: u16, bit_depth: u16) -> Self {
        Self {
            sample_rate,
            channel_count,
            bit_depth,
        }
    }

    /// Decode one fragment's bytes into a normalized clip.
    ///
    /// A buffer whose length is not a whole multiple of `bit_depth / 8` is a
    /// caller error; trailing bytes are truncated, mirroring common decoder
    /// leniency.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::UnsupportedFormat`] for a bit depth outside
    /// {8, 16, 32}.
    pub fn decode(&self, data: &[u8]) -> Result<NormalizedClip> {
        let samples: Vec<f32> = match self.bit_depth {
            8 => data.iter().map(|&b| b as i8 as f32 / 128.0).collect(),
            16 => data
                .chunks_exact(2)
                .map(|b| i16::from_le_bytes([b[0], b[1]]) as f32 / 32_768.0)
                .collect(),
            32 => data
                .chunks_exact(4)
                .map(|b| {
                    let v = i32::from_le_bytes([b[0], b[1], b[2], b[3]]);
                    (v as f64 / 2_147_483_648.0) as f32
                })
                .collect(),
            other => return Err(PlayerError::UnsupportedFormat { bit_depth: other }),
        };

        let channel_count = usize::from(self.channel_count.max(1));
        let frames = samples.len() / channel_count;

        let mut channels: Vec<Vec<f32>> = (0..channel_count)
            .map(|_| Vec::with_capacity(frames))
            .collect();
        for frame in 0..frames {
            for (channel, plane) in channels.iter_mut().enumerate() {
                plane.push(samples[frame * channel_count + channel]);
            }
        }

        Ok(NormalizedClip::new(self.sample_rate, channels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes_16(samples: &[i16]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    #[test]
    fn mono_16_bit_reference_values() {
        let decoder = PcmDecoder::new(8000, 1, 16);
        let data = bytes_16(&[0, 16384, -16384, 32767, -32768]);

        let clip = decoder.decode(&data).unwrap();

        assert_eq!(clip.channel_count(), 1);
        let plane = &clip.channels[0];
        assert_eq!(plane[0], 0.0);
        assert_eq!(plane[1], 0.5);
        assert_eq!(plane[2], -0.5);
        assert!((plane[3] - 0.999_969).abs() < 1e-5);
        assert_eq!(plane[4], -1.0);
    }

    #[test]
    fn stereo_deinterleave_splits_evenly() {
        let decoder = PcmDecoder::new(44100, 2, 16);
        // 6 interleaved samples: L0 R0 L1 R1 L2 R2
        let data = bytes_16(&[100, -100, 200, -200, 300, -300]);

        let clip = decoder.decode(&data).unwrap();

        assert_eq!(clip.channel_count(), 2);
        assert_eq!(clip.frames(), 3);
        assert_eq!(clip.sample_rate, 44100);
        assert!(clip.channels[0].iter().all(|&s| s > 0.0));
        assert!(clip.channels[1].iter().all(|&s| s < 0.0));
    }

    #[test]
    fn eight_bit_normalization() {
        let decoder = PcmDecoder::new(8000, 1, 8);
        let data = [0u8, 64, 0x80, 127]; // 0, 64, -128, 127 as i8

        let clip = decoder.decode(&data).unwrap();

        let plane = &clip.channels[0];
        assert_eq!(plane[0], 0.0);
        assert_eq!(plane[1], 0.5);
        assert_eq!(plane[2], -1.0);
        assert!((plane[3] - 127.0 / 128.0).abs() < 1e-6);
    }

    #[test]
    fn thirty_two_bit_normalization() {
        let decoder = PcmDecoder::new(48000, 1, 32);
        let data: Vec<u8> = [0i32, 1 << 30, i32::MIN]
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();

        let clip = decoder.decode(&data).unwrap();

        let plane = &clip.channels[0];
        assert_eq!(plane[0], 0.0);
        assert_eq!(plane[1], 0.5);
        assert_eq!(plane[2], -1.0);
    }

    #[test]
    fn unsupported_depth_rejected() {
        let decoder = PcmDecoder::new(8000, 1, 24);
        let err = decoder.decode(&[0, 0, 0]).unwrap_err();
        assert!(matches!(
            err,
            PlayerError::UnsupportedFormat { bit_depth: 24 }
        ));
    }

    #[test]
    fn trailing_bytes_truncated() {
        let decoder = PcmDecoder::new(8000, 1, 16);
        // 5 bytes: two whole samples plus one stray byte.
        let clip = decoder.decode(&[0, 0, 0, 64, 7]).unwrap();
        assert_eq!(clip.frames(), 2);
    }

    #[test]
    fn odd_sample_count_truncates_per_channel() {
        let decoder = PcmDecoder::new(8000, 2, 16);
        // 5 samples over 2 channels: floor(5 / 2) = 2 frames each.
        let data = bytes_16(&[1, 2, 3, 4, 5]);
        let clip = decoder.decode(&data).unwrap();
        assert_eq!(clip.frames(), 2);
        assert_eq!(clip.channel_count(), 2);
    }

    #[test]
    fn all_samples_in_range() {
        let decoder = PcmDecoder::new(8000, 1, 16);
        let data = bytes_16(&[i16::MIN, -1, 0, 1, i16::MAX]);
        let clip = decoder.decode(&data).unwrap();
        assert!(clip.channels[0]
            .iter()
            .all(|&s| (-1.0..=1.0).contains(&s)));
    }
}

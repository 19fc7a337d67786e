//! Sample decoding.
//!
//! Raw PCM is decoded by the core itself ([`PcmDecoder`]); compressed
//! formats are delegated to the platform through
//! [`ClipRenderer::begin_decode`](bridge_traits::ClipRenderer::begin_decode).

mod pcm;

pub use pcm::PcmDecoder;

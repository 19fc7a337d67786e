//! Workspace entry crate.
//!
//! Re-exports the public surface of the individual workspace crates so host
//! applications can depend on `stream-audio-player` alone instead of wiring
//! `core-playback` and `bridge-traits` individually.

pub use bridge_traits::{
    Capabilities, CapabilityProbe, ClipEvent, ClipRenderer, NormalizedClip, PlaybackElement,
    PlaybackUnit, SinkEvent, StreamingSink,
};
pub use core_playback::{
    init_logging, EventBus, Fragment, LogFormat, LoggingConfig, PcmDecoder, PlatformAudio,
    PlayMode, Player, PlayerError, PlayerEvent, StreamFormat, StreamOptions,
};

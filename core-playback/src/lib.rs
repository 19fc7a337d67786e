//! # Stream Playback Core
//!
//! Gapless playback of an audio stream whose encoded fragments arrive
//! incrementally, before the full stream is known.
//!
//! ## Overview
//!
//! Callers append fragments as they arrive; the core buffers, decodes, and
//! renders them strictly in order with no audible gap. Two structurally
//! different rendering strategies sit behind one facade:
//!
//! - [`backend::StreamingAppendScheduler`] — flow-controlled incremental
//!   appends into a single managed sink (compressed bitstreams, when the
//!   platform supports it).
//! - [`backend::ClipChainScheduler`] — each fragment fully decoded into a
//!   clip and chained end-to-end via completion notifications (raw PCM
//!   always; compressed streams as the fallback).
//!
//! The [`Player`] facade selects exactly one backend at construction based
//! on injected [`Capabilities`](bridge_traits::Capabilities) and the stream
//! format, then forwards the whole lifecycle
//! (`append_buffer`/`play`/`pause`/`resume`/`dispose`) to it.
//!
//! ## Concurrency model
//!
//! Single-threaded and cooperative: no call blocks, and every state
//! transition happens either on a direct caller call or on delivery of a
//! platform notification ([`SinkEvent`](bridge_traits::SinkEvent) /
//! [`ClipEvent`](bridge_traits::ClipEvent)) through the facade's entry
//! points. Lifecycle events flow outward through a broadcast [`EventBus`].

pub mod backend;
pub mod config;
pub mod decoder;
pub mod error;
pub mod events;
pub mod logging;
pub mod player;

pub use backend::PlayMode;
pub use config::{Fragment, StreamFormat, StreamOptions};
pub use decoder::PcmDecoder;
pub use error::{PlayerError, Result};
pub use events::{EventBus, PlayerEvent};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use player::{PlatformAudio, Player};

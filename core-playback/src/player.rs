//! Player facade and backend construction.

use crate::backend::{select_backend, ClipChainScheduler, PlayMode, StreamingAppendScheduler};
use crate::config::{Fragment, StreamOptions};
use crate::error::{PlayerError, Result};
use crate::events::{EventBus, PlayerEvent, Receiver};
use bridge_traits::{
    Capabilities, ClipEvent, ClipRenderer, PlaybackElement, SinkEvent, StreamingSink,
};
use bytes::Bytes;
use std::fmt;
use tracing::{info, warn};
use uuid::Uuid;

/// Factory the host platform provides for constructing renderers.
///
/// Consulted exactly once, at player construction, for whichever strategy
/// was selected. Each created renderer is exclusively owned by the player.
pub trait PlatformAudio {
    /// Create a streaming-append sink and its bound playback element.
    fn create_streaming_sink(
        &mut self,
    ) -> bridge_traits::Result<(Box<dyn StreamingSink>, Box<dyn PlaybackElement>)>;

    /// Create a discrete-clip renderer.
    fn create_clip_renderer(&mut self) -> bridge_traits::Result<Box<dyn ClipRenderer>>;
}

enum Backend {
    Streaming(StreamingAppendScheduler),
    Clip(ClipChainScheduler),
}

/// Single entry point for gapless stream playback.
///
/// Selects exactly one rendering backend at construction and forwards the
/// whole lifecycle to it. Callers observe lifecycle notifications through
/// [`subscribe`](Player::subscribe) and never need to know which backend is
/// active except through the advisory [`mode`](Player::mode).
pub struct Player {
    backend: Backend,
    bus: EventBus,
    mode: PlayMode,
    disposed: bool,
}

impl Player {
    /// Construct a player for the given stream.
    ///
    /// `capabilities` is the platform snapshot computed once at process
    /// start (see [`Capabilities::detect`]); `platform` supplies the
    /// renderer for whichever strategy is selected.
    ///
    /// # Errors
    ///
    /// - [`PlayerError::InvalidOptions`] for structurally invalid options.
    /// - [`PlayerError::NoSupportedBackend`] when neither strategy is
    ///   usable; no instance is produced and there is no fallback.
    pub fn new(
        options: StreamOptions,
        capabilities: Capabilities,
        platform: &mut dyn PlatformAudio,
    ) -> Result<Self> {
        options.validate()?;

        let mode = select_backend(&capabilities, &options).ok_or(PlayerError::NoSupportedBackend)?;
        let bus = EventBus::default();

        let backend = match mode {
            PlayMode::StreamingAppend => {
                let (sink, element) = platform.create_streaming_sink()?;
                Backend::Streaming(StreamingAppendScheduler::new(sink, element, bus.clone()))
            }
            PlayMode::DiscreteClip => {
                let renderer = platform.create_clip_renderer()?;
                Backend::Clip(ClipChainScheduler::new(renderer, options, bus.clone()))
            }
        };

        info!(mode = mode.as_str(), "player constructed");
        Ok(Self {
            backend,
            bus,
            mode,
            disposed: false,
        })
    }

    /// Advisory: which rendering strategy this instance uses.
    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    /// Subscribe to lifecycle events. Drop the receiver to unsubscribe.
    pub fn subscribe(&self) -> Receiver<PlayerEvent> {
        self.bus.subscribe()
    }

    /// Append one fragment of audio data.
    ///
    /// Returns the fragment id in use: the caller-supplied one, or a
    /// generated locally-unique token when omitted. Legal in any playback
    /// state.
    pub fn append_buffer(&mut self, data: Bytes, fragment_id: Option<String>) -> Result<String> {
        let id = fragment_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let fragment = Fragment::new(id.clone(), data);
        match &mut self.backend {
            Backend::Streaming(s) => s.append_buffer(fragment)?,
            Backend::Clip(s) => s.append_buffer(fragment)?,
        }
        Ok(id)
    }

    /// Start playback for the first time. Use [`resume`](Player::resume)
    /// after a pause.
    pub fn play(&mut self) -> Result<()> {
        match &mut self.backend {
            Backend::Streaming(s) => s.play(),
            Backend::Clip(s) => s.play(),
        }
    }

    /// Pause playback.
    pub fn pause(&mut self) -> Result<()> {
        match &mut self.backend {
            Backend::Streaming(s) => s.pause(),
            Backend::Clip(s) => s.pause(),
        }
    }

    /// Resume playback after a pause.
    pub fn resume(&mut self) -> Result<()> {
        match &mut self.backend {
            Backend::Streaming(s) => s.resume(),
            Backend::Clip(s) => s.resume(),
        }
    }

    /// Whether the active backend is currently rendering.
    pub fn is_playing(&self) -> bool {
        match &self.backend {
            Backend::Streaming(s) => s.is_playing(),
            Backend::Clip(s) => s.is_playing(),
        }
    }

    /// Declare whether more fragments may still arrive (streaming-append
    /// only; the clip backend infers the end of the chain from its queue).
    pub fn set_expect_more(&mut self, expect_more: bool) -> Result<()> {
        match &mut self.backend {
            Backend::Streaming(s) => s.set_expect_more(expect_more),
            Backend::Clip(_) => Ok(()),
        }
    }

    /// Deliver a sink notification to the streaming-append backend.
    ///
    /// Ignored with a warning when the clip backend is active.
    pub fn handle_sink_event(&mut self, event: SinkEvent) -> Result<()> {
        match &mut self.backend {
            Backend::Streaming(s) => match event {
                SinkEvent::SourceOpen => s.on_source_open(),
                SinkEvent::AppendFinished => s.on_append_finished(),
                SinkEvent::CanPlay => {
                    s.on_can_play();
                    Ok(())
                }
                SinkEvent::Ended => {
                    s.on_ended();
                    Ok(())
                }
            },
            Backend::Clip(_) => {
                warn!(?event, "sink event delivered to discrete-clip player, ignoring");
                Ok(())
            }
        }
    }

    /// Deliver a clip notification to the discrete-clip backend.
    ///
    /// Ignored with a warning when the streaming-append backend is active.
    pub fn handle_clip_event(&mut self, event: ClipEvent) -> Result<()> {
        match &mut self.backend {
            Backend::Clip(s) => match event {
                ClipEvent::DecodeFinished { fragment_id, clip } => {
                    s.on_decode_finished(fragment_id, clip);
                    Ok(())
                }
                ClipEvent::DecodeFailed {
                    fragment_id,
                    message,
                } => {
                    s.on_decode_failed(&fragment_id, &message);
                    Ok(())
                }
                ClipEvent::UnitFinished => s.on_unit_finished(),
            },
            Backend::Streaming(_) => {
                warn!(?event, "clip event delivered to streaming-append player, ignoring");
                Ok(())
            }
        }
    }

    /// Release the backend and its platform resources.
    ///
    /// Idempotent; notifications arriving after disposal are ignored and
    /// can never resurrect cleared state.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        match &mut self.backend {
            Backend::Streaming(s) => s.dispose(),
            Backend::Clip(s) => s.dispose(),
        }
        info!(mode = self.mode.as_str(), "player disposed");
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("mode", &self.mode)
            .field("is_playing", &self.is_playing())
            .field("disposed", &self.disposed)
            .finish()
    }
}

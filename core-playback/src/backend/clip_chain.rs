//! Discrete-clip backend.
//!
//! Every fragment is fully decoded into a [`NormalizedClip`] and queued;
//! clips play strictly one at a time through one-shot playback units whose
//! completion notifications re-enter [`ClipChainScheduler::play_next`],
//! forming a self-sustaining chain until the queue drains.

use crate::config::{Fragment, StreamOptions};
use crate::decoder::PcmDecoder;
use crate::error::{PlayerError, Result};
use crate::events::{EventBus, PlayerEvent};
use bridge_traits::{ClipRenderer, NormalizedClip, PlaybackUnit};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, warn};

struct QueuedClip {
    fragment_id: String,
    clip: NormalizedClip,
}

/// Scheduler for the discrete-clip rendering strategy.
///
/// Raw PCM fragments are decoded synchronously by the core; compressed
/// fragments are handed to the platform decoder and complete via
/// [`ClipEvent::DecodeFinished`](bridge_traits::ClipEvent). Decode
/// completions are re-ordered into submission order before queueing, so
/// clips always render in exactly the order they were appended.
pub struct ClipChainScheduler {
    renderer: Box<dyn ClipRenderer>,
    bus: EventBus,
    options: StreamOptions,
    pcm: PcmDecoder,
    /// Decoded clips awaiting rendering, strictly FIFO.
    queue: VecDeque<QueuedClip>,
    /// Fragment ids submitted to the platform decoder, in arrival order.
    decode_order: VecDeque<String>,
    /// Completions that arrived ahead of an earlier fragment's decode.
    early_decodes: HashMap<String, NormalizedClip>,
    /// Unit currently rendering, with its fragment id.
    active_unit: Option<(String, Box<dyn PlaybackUnit>)>,
    is_playing: bool,
    disposed: bool,
}

impl ClipChainScheduler {
    /// Create a scheduler around an exclusively owned clip renderer.
    pub fn new(renderer: Box<dyn ClipRenderer>, options: StreamOptions, bus: EventBus) -> Self {
        let pcm = PcmDecoder::new(options.sample_rate, options.channel_count, options.bit_depth);
        Self {
            renderer,
            bus,
            options,
            pcm,
            queue: VecDeque::new(),
            decode_order: VecDeque::new(),
            early_decodes: HashMap::new(),
            active_unit: None,
            is_playing: false,
            disposed: false,
        }
    }

    /// Accept a fragment: decode synchronously for raw PCM, or start an
    /// asynchronous platform decode for compressed formats.
    ///
    /// A PCM decode failure (unsupported bit depth) is fatal to this call
    /// only; the clip queue is left untouched.
    pub fn append_buffer(&mut self, fragment: Fragment) -> Result<()> {
        if self.disposed {
            return Err(PlayerError::Disposed);
        }

        if self.options.format.is_raw_pcm() {
            let clip = self.pcm.decode(&fragment.data)?;
            self.enqueue_clip(fragment.id, clip);
        } else {
            debug!(fragment_id = %fragment.id, "starting platform decode");
            self.decode_order.push_back(fragment.id.clone());
            if let Err(e) = self.renderer.begin_decode(&fragment.id, fragment.data) {
                self.decode_order.pop_back();
                return Err(e.into());
            }
        }
        Ok(())
    }

    /// A platform decode completed.
    ///
    /// The clip is queued only once every earlier fragment's decode has
    /// completed, preserving submission order even when the platform
    /// finishes decodes out of order.
    pub fn on_decode_finished(&mut self, fragment_id: String, clip: NormalizedClip) {
        if self.disposed {
            return;
        }
        if !self.decode_order.contains(&fragment_id) {
            warn!(%fragment_id, "decode completion for unknown fragment, ignoring");
            return;
        }
        self.early_decodes.insert(fragment_id, clip);
        self.drain_completed_decodes();
    }

    /// A platform decode failed. The fragment is skipped; fragments queued
    /// behind it continue to flow.
    pub fn on_decode_failed(&mut self, fragment_id: &str, message: &str) {
        if self.disposed {
            return;
        }
        warn!(%fragment_id, message, "platform decode failed, skipping fragment");
        self.decode_order.retain(|id| id != fragment_id);
        self.early_decodes.remove(fragment_id);
        self.drain_completed_decodes();
    }

    fn drain_completed_decodes(&mut self) {
        while let Some(front) = self.decode_order.front() {
            match self.early_decodes.remove(front) {
                Some(clip) => {
                    let fragment_id = self
                        .decode_order
                        .pop_front()
                        .unwrap_or_default();
                    self.enqueue_clip(fragment_id, clip);
                }
                None => break,
            }
        }
    }

    fn enqueue_clip(&mut self, fragment_id: String, clip: NormalizedClip) {
        if self.queue.is_empty() {
            self.bus.emit(PlayerEvent::ReadyToPlay);
        }
        debug!(%fragment_id, frames = clip.frames(), queued = self.queue.len() + 1, "clip queued");
        self.queue.push_back(QueuedClip { fragment_id, clip });
    }

    /// Start the playback chain. No-op when already playing.
    pub fn play(&mut self) -> Result<()> {
        if self.disposed {
            return Err(PlayerError::Disposed);
        }
        if self.is_playing {
            return Ok(());
        }
        self.bus.emit(PlayerEvent::PlayStart);
        self.play_next()
    }

    /// Advance the chain: detach the previous unit, start the next clip, or
    /// terminate with `PlayEnd` when the queue is drained.
    fn play_next(&mut self) -> Result<()> {
        // Detach before anything else so a stale unit can never fire twice.
        if let Some((_, mut unit)) = self.active_unit.take() {
            unit.disconnect();
        }

        let Some(next) = self.queue.pop_front() else {
            self.is_playing = false;
            self.bus.emit(PlayerEvent::PlayEnd);
            debug!("clip queue drained, chain ended");
            return Ok(());
        };

        let started = self
            .renderer
            .create_playback_unit(&next.clip)
            .and_then(|mut unit| unit.start().map(|_| unit));
        match started {
            Ok(unit) => {
                self.is_playing = true;
                debug!(fragment_id = %next.fragment_id, "clip playback started");
                self.active_unit = Some((next.fragment_id, unit));
                Ok(())
            }
            Err(e) => {
                // The clip stays at the head of the queue so a later play()
                // can retry it once the renderer recovers.
                self.is_playing = false;
                self.queue.push_front(next);
                Err(PlayerError::Playback(e.to_string()))
            }
        }
    }

    /// The current playback unit finished its clip; continue the chain.
    pub fn on_unit_finished(&mut self) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        match self.active_unit.take() {
            Some((fragment_id, mut unit)) => {
                unit.disconnect();
                self.bus.emit(PlayerEvent::FragmentPlayed { fragment_id });
                self.play_next()
            }
            None => {
                warn!("unit-finished with no active unit, ignoring");
                Ok(())
            }
        }
    }

    /// Suspend the shared rendering context. Clip units cannot be paused
    /// individually, so `is_playing` tracks context state here.
    pub fn pause(&mut self) -> Result<()> {
        if self.disposed {
            return Err(PlayerError::Disposed);
        }
        self.renderer
            .suspend()
            .map_err(|e| PlayerError::Playback(e.to_string()))?;
        self.is_playing = false;
        self.bus.emit(PlayerEvent::Pause);
        Ok(())
    }

    /// Resume the shared rendering context.
    pub fn resume(&mut self) -> Result<()> {
        if self.disposed {
            return Err(PlayerError::Disposed);
        }
        self.renderer
            .resume()
            .map_err(|e| PlayerError::Playback(e.to_string()))?;
        self.is_playing = true;
        self.bus.emit(PlayerEvent::ResumePlay);
        Ok(())
    }

    /// Whether the chain is currently rendering.
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Clear the queue and drop the active unit. Idempotent; the disposed
    /// flag is set before state is cleared so late notifications are
    /// ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.is_playing = false;
        if let Some((_, mut unit)) = self.active_unit.take() {
            unit.disconnect();
        }
        self.queue.clear();
        self.decode_order.clear();
        self.early_decodes.clear();
        debug!("clip-chain scheduler disposed");
    }
}

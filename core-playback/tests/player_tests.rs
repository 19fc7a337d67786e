//! End-to-end tests for the player facade: backend selection, fragment id
//! handling, notification routing, and disposal.

use bridge_traits::{
    Capabilities, CapabilityProbe, ClipEvent, ClipRenderer, NormalizedClip, PlaybackElement,
    PlaybackUnit, SinkEvent, StreamingSink,
};
use bytes::Bytes;
use core_playback::{
    PlatformAudio, PlayMode, Player, PlayerError, PlayerEvent, StreamFormat, StreamOptions,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::broadcast::Receiver;

// ============================================================================
// Mock platform
// ============================================================================

#[derive(Default)]
struct PlatformState {
    appended: Vec<Bytes>,
    element_playing: bool,
    decode_requests: Vec<String>,
    units_created: usize,
}

struct MockSink {
    state: Arc<Mutex<PlatformState>>,
}

impl StreamingSink for MockSink {
    fn append(&mut self, data: Bytes) -> bridge_traits::Result<()> {
        self.state.lock().appended.push(data);
        Ok(())
    }

    fn is_appending(&self) -> bool {
        false
    }

    fn is_open(&self) -> bool {
        true
    }

    fn signal_end_of_stream(&mut self) -> bridge_traits::Result<()> {
        Ok(())
    }
}

struct MockElement {
    state: Arc<Mutex<PlatformState>>,
}

impl PlaybackElement for MockElement {
    fn play(&mut self) -> bridge_traits::Result<()> {
        self.state.lock().element_playing = true;
        Ok(())
    }

    fn pause(&mut self) -> bridge_traits::Result<()> {
        self.state.lock().element_playing = false;
        Ok(())
    }

    fn clear_source(&mut self) {}
}

struct MockUnit;

impl PlaybackUnit for MockUnit {
    fn start(&mut self) -> bridge_traits::Result<()> {
        Ok(())
    }

    fn disconnect(&mut self) {}
}

struct MockRenderer {
    state: Arc<Mutex<PlatformState>>,
}

impl ClipRenderer for MockRenderer {
    fn begin_decode(&mut self, fragment_id: &str, _data: Bytes) -> bridge_traits::Result<()> {
        self.state.lock().decode_requests.push(fragment_id.to_string());
        Ok(())
    }

    fn create_playback_unit(
        &mut self,
        _clip: &NormalizedClip,
    ) -> bridge_traits::Result<Box<dyn PlaybackUnit>> {
        self.state.lock().units_created += 1;
        Ok(Box::new(MockUnit))
    }

    fn suspend(&mut self) -> bridge_traits::Result<()> {
        Ok(())
    }

    fn resume(&mut self) -> bridge_traits::Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct MockPlatform {
    state: Arc<Mutex<PlatformState>>,
}

impl PlatformAudio for MockPlatform {
    fn create_streaming_sink(
        &mut self,
    ) -> bridge_traits::Result<(Box<dyn StreamingSink>, Box<dyn PlaybackElement>)> {
        Ok((
            Box::new(MockSink {
                state: Arc::clone(&self.state),
            }),
            Box::new(MockElement {
                state: Arc::clone(&self.state),
            }),
        ))
    }

    fn create_clip_renderer(&mut self) -> bridge_traits::Result<Box<dyn ClipRenderer>> {
        Ok(Box::new(MockRenderer {
            state: Arc::clone(&self.state),
        }))
    }
}

struct FixedProbe {
    streaming_append: bool,
    discrete_clip: bool,
}

impl CapabilityProbe for FixedProbe {
    fn supports_streaming_append(&self) -> bool {
        self.streaming_append
    }

    fn supports_discrete_clip(&self) -> bool {
        self.discrete_clip
    }
}

// ============================================================================
// Harness
// ============================================================================

fn drain(rx: &mut Receiver<PlayerEvent>) -> Vec<PlayerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// 16-bit mono PCM payload holding `frames` zero samples.
fn pcm_bytes(frames: usize) -> Bytes {
    Bytes::from(vec![0u8; frames * 2])
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn capabilities_detected_from_probe() {
    let probe = FixedProbe {
        streaming_append: true,
        discrete_clip: false,
    };
    let caps = Capabilities::detect(&probe);
    assert!(caps.streaming_append);
    assert!(!caps.discrete_clip);
    assert!(caps.any());
}

#[test]
fn mp3_stream_selects_streaming_append() {
    let mut platform = MockPlatform::default();
    let player = Player::new(
        StreamOptions::compressed(StreamFormat::Mp3),
        Capabilities::all(),
        &mut platform,
    )
    .unwrap();
    assert_eq!(player.mode(), PlayMode::StreamingAppend);
}

#[test]
fn pcm_stream_selects_discrete_clip() {
    let mut platform = MockPlatform::default();
    let player = Player::new(
        StreamOptions::pcm(16000, 1, 16),
        Capabilities::all(),
        &mut platform,
    )
    .unwrap();
    assert_eq!(player.mode(), PlayMode::DiscreteClip);
}

#[test]
fn forced_clip_overrides_streaming_append() {
    let mut platform = MockPlatform::default();
    let mut options = StreamOptions::compressed(StreamFormat::Mp3);
    options.use_discrete_clip = true;
    let player = Player::new(options, Capabilities::all(), &mut platform).unwrap();
    assert_eq!(player.mode(), PlayMode::DiscreteClip);
}

#[test]
fn no_capability_yields_no_backend() {
    let mut platform = MockPlatform::default();
    let err = Player::new(
        StreamOptions::compressed(StreamFormat::Mp3),
        Capabilities::none(),
        &mut platform,
    )
    .unwrap_err();
    assert!(matches!(err, PlayerError::NoSupportedBackend));
}

#[test]
fn invalid_options_rejected_before_selection() {
    let mut platform = MockPlatform::default();
    let err = Player::new(
        StreamOptions::pcm(0, 1, 16),
        Capabilities::all(),
        &mut platform,
    )
    .unwrap_err();
    assert!(matches!(err, PlayerError::InvalidOptions(_)));
}

#[test]
fn append_generates_an_id_when_none_is_given() {
    let mut platform = MockPlatform::default();
    let mut player = Player::new(
        StreamOptions::pcm(8000, 1, 16),
        Capabilities::all(),
        &mut platform,
    )
    .unwrap();

    let generated = player.append_buffer(pcm_bytes(4), None).unwrap();
    assert!(!generated.is_empty());
    let second = player.append_buffer(pcm_bytes(4), None).unwrap();
    assert_ne!(generated, second);

    let explicit = player
        .append_buffer(pcm_bytes(4), Some("frag-7".to_string()))
        .unwrap();
    assert_eq!(explicit, "frag-7");
}

#[test]
fn clip_playback_reports_fragments_by_returned_id() {
    let mut platform = MockPlatform::default();
    let mut player = Player::new(
        StreamOptions::pcm(8000, 1, 16),
        Capabilities::all(),
        &mut platform,
    )
    .unwrap();
    let mut rx = player.subscribe();

    let id = player.append_buffer(pcm_bytes(4), None).unwrap();
    player.play().unwrap();
    assert!(player.is_playing());
    player.handle_clip_event(ClipEvent::UnitFinished).unwrap();
    assert!(!player.is_playing());

    let events = drain(&mut rx);
    assert_eq!(
        events,
        vec![
            PlayerEvent::ReadyToPlay,
            PlayerEvent::PlayStart,
            PlayerEvent::FragmentPlayed { fragment_id: id },
            PlayerEvent::PlayEnd,
        ]
    );
}

#[test]
fn streaming_player_routes_sink_notifications() {
    let mut platform = MockPlatform::default();
    let mut player = Player::new(
        StreamOptions::compressed(StreamFormat::Mp3),
        Capabilities::all(),
        &mut platform,
    )
    .unwrap();
    let mut rx = player.subscribe();

    // Appended before the sink opened, so nothing reached it yet.
    player
        .append_buffer(Bytes::from_static(b"mp3-frame"), None)
        .unwrap();
    assert!(platform.state.lock().appended.is_empty());

    player.handle_sink_event(SinkEvent::SourceOpen).unwrap();
    assert_eq!(platform.state.lock().appended.len(), 1);

    player.play().unwrap();
    player.handle_sink_event(SinkEvent::CanPlay).unwrap();
    player.handle_sink_event(SinkEvent::AppendFinished).unwrap();
    player.handle_sink_event(SinkEvent::Ended).unwrap();
    assert!(!player.is_playing());

    let events = drain(&mut rx);
    assert_eq!(
        events,
        vec![
            PlayerEvent::ReadyToPlay,
            PlayerEvent::PlayStart,
            PlayerEvent::PlayEnd,
        ]
    );
}

#[test]
fn cross_backend_notifications_are_ignored() {
    let mut platform = MockPlatform::default();
    let mut player = Player::new(
        StreamOptions::compressed(StreamFormat::Mp3),
        Capabilities::all(),
        &mut platform,
    )
    .unwrap();
    let mut rx = player.subscribe();

    // A clip notification on a streaming player is dropped, not an error.
    player.handle_clip_event(ClipEvent::UnitFinished).unwrap();
    assert!(drain(&mut rx).is_empty());

    let mut clip_player = Player::new(
        StreamOptions::pcm(8000, 1, 16),
        Capabilities::all(),
        &mut platform,
    )
    .unwrap();
    clip_player.handle_sink_event(SinkEvent::Ended).unwrap();
}

#[test]
fn set_expect_more_is_a_no_op_on_the_clip_backend() {
    let mut platform = MockPlatform::default();
    let mut player = Player::new(
        StreamOptions::pcm(8000, 1, 16),
        Capabilities::all(),
        &mut platform,
    )
    .unwrap();
    player.set_expect_more(false).unwrap();
}

#[test]
fn dispose_then_append_is_rejected() {
    let mut platform = MockPlatform::default();
    let mut player = Player::new(
        StreamOptions::pcm(8000, 1, 16),
        Capabilities::all(),
        &mut platform,
    )
    .unwrap();

    player.dispose();
    player.dispose();
    let err = player.append_buffer(pcm_bytes(4), None).unwrap_err();
    assert!(matches!(err, PlayerError::Disposed));
}

#[test]
fn subscribers_each_see_every_event() {
    let mut platform = MockPlatform::default();
    let mut player = Player::new(
        StreamOptions::pcm(8000, 1, 16),
        Capabilities::all(),
        &mut platform,
    )
    .unwrap();
    let mut rx_a = player.subscribe();
    let mut rx_b = player.subscribe();

    player.append_buffer(pcm_bytes(4), None).unwrap();
    assert_eq!(drain(&mut rx_a), vec![PlayerEvent::ReadyToPlay]);
    assert_eq!(drain(&mut rx_b), vec![PlayerEvent::ReadyToPlay]);

    // Dropping a receiver unsubscribes it without affecting the other.
    drop(rx_a);
    player.play().unwrap();
    assert_eq!(drain(&mut rx_b), vec![PlayerEvent::PlayStart]);
}

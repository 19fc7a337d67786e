//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform
//! embedding the stream audio player.
//!
//! ## Overview
//!
//! This crate defines the contract between the playback core and the
//! platform-specific rendering machinery. The core never talks to a real
//! audio stack directly; it drives one of two rendering strategies through
//! the traits defined here:
//!
//! - **Streaming-append**: a flow-controlled byte sink bound to a playback
//!   element ([`StreamingSink`] + [`PlaybackElement`]). The host appends
//!   encoded bytes incrementally and the platform renders them as one
//!   continuous stream.
//! - **Discrete-clip**: each fragment is decoded into an independently
//!   playable [`NormalizedClip`] and rendered through a one-shot
//!   [`PlaybackUnit`] ([`ClipRenderer`]).
//!
//! ## Notification model
//!
//! All trait methods are synchronous calls that *start* platform work.
//! Completions arrive later as [`SinkEvent`] / [`ClipEvent`] values which the
//! host glue delivers back into the core's notification entry points. This
//! keeps the whole engine single-threaded and cooperative: no trait call
//! blocks, and every state transition happens on delivery of a notification
//! or a direct caller call.
//!
//! ## Error handling
//!
//! All bridge traits use [`BridgeError`] for consistent error handling.
//! Platform implementations should convert platform-specific failures into
//! `BridgeError` with actionable messages.

pub mod capability;
pub mod clip;
pub mod error;
pub mod streaming;

pub use capability::{Capabilities, CapabilityProbe};
pub use clip::{ClipEvent, ClipRenderer, NormalizedClip, PlaybackUnit};
pub use error::{BridgeError, Result};
pub use streaming::{PlaybackElement, SinkEvent, StreamingSink};

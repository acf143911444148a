//! # Intervals Core Library
//!
//! This library provides the core logic for the Intervals work/rest timer and
//! the small counter demo. The `intervals` CLI is a thin terminal layer over it.
//!
//! ## Architecture
//!
//! - **Plan**: a deterministic work/rest sequence derived from [`IntervalSettings`]
//! - **Session**: a tick-driven state machine; the caller invokes `tick()` once
//!   per second, or lets [`timer::run_session`] do it on a tokio interval
//! - **Audio**: a lazily started, explicitly owned oscillator that renders the
//!   countdown and boundary cues
//! - **UI state**: a [`Store`] cell whose single mutation entry point schedules
//!   a redraw
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Plan`]: Work/rest sequence
//! - [`Session`]: Run state machine
//! - [`AudioHandle`]: Cue synthesis and output
//! - [`Config`]: Application configuration management

pub mod audio;
pub mod error;
pub mod events;
pub mod settings;
pub mod storage;
pub mod timer;
pub mod ui;

pub use audio::{AudioHandle, AudioSlot, BellSink, NullSink, Tone, ToneSink};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use settings::{IntervalSettings, SettingsField, SettingsForm};
pub use storage::Config;
pub use timer::{Cue, Phase, Plan, RunOutcome, Session, Tick, TimerView};
pub use ui::{App, Counter, Screen, Store};

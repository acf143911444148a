//! Cue synthesis.
//!
//! One sine [`Oscillator`] is started the first time a run starts and then
//! kept for the life of the [`AudioHandle`]. Each note only retunes it and
//! shapes a fresh amplitude envelope over the rendered samples; no new
//! sound source is built per tick.
//!
//! The handle is owned by whoever starts runs (see [`AudioSlot`]) and lent to
//! the run driver by `&mut`.

use std::f32::consts::TAU;
use std::io::{self, Write};
use std::time::Duration;

use crate::storage::SoundConfig;
use crate::timer::Cue;

pub const SAMPLE_RATE: u32 = 8_000;

const ATTACK: Duration = Duration::from_millis(10);
/// Level the release decays to, as a fraction of the peak.
const RELEASE_FLOOR: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration: Duration,
}

impl Tone {
    pub const fn new(frequency_hz: f32, duration: Duration) -> Self {
        Self {
            frequency_hz,
            duration,
        }
    }

    pub fn sample_count(&self, sample_rate: u32) -> usize {
        (self.duration.as_secs_f32() * sample_rate as f32).round() as usize
    }
}

/// Persistent phase-accumulating sine oscillator.
#[derive(Debug, Clone)]
pub struct Oscillator {
    sample_rate: u32,
    frequency_hz: f32,
    phase: f32,
    started: bool,
}

impl Oscillator {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            frequency_hz: 0.0,
            phase: 0.0,
            started: false,
        }
    }

    /// Start the oscillator. Only the first call has an effect.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        true
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn set_frequency(&mut self, frequency_hz: f32) {
        self.frequency_hz = frequency_hz;
    }

    pub fn frequency(&self) -> f32 {
        self.frequency_hz
    }

    /// Next raw sample in `-1.0 ..= 1.0`. Silent until started.
    pub fn next_sample(&mut self) -> f32 {
        if !self.started {
            return 0.0;
        }
        let sample = (self.phase * TAU).sin();
        self.phase = (self.phase + self.frequency_hz / self.sample_rate as f32).fract();
        sample
    }
}

/// Linear attack followed by an exponential release to near silence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub peak: f32,
    pub attack: Duration,
}

impl Envelope {
    pub fn gain_at(&self, t: f32, total: f32) -> f32 {
        let attack = self.attack.as_secs_f32().min(total);
        if t < attack {
            return self.peak * (t / attack);
        }
        let release = (total - attack).max(f32::EPSILON);
        let progress = ((t - attack) / release).clamp(0.0, 1.0);
        self.peak * RELEASE_FLOOR.powf(progress)
    }
}

/// Where rendered notes go.
pub trait ToneSink: Send {
    fn play(&mut self, tone: &Tone, samples: &[f32]) -> io::Result<()>;
}

/// Bell length the terminal sink maps one ring to.
const RING_SPAN: Duration = Duration::from_millis(100);

/// Rings the terminal bell: one ring per 100 ms of tone, so the longer
/// boundary note rings twice. A note whose samples are silent does not ring.
pub struct BellSink {
    out: Box<dyn Write + Send>,
}

impl BellSink {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self { out }
    }

    pub fn stderr() -> Self {
        Self::new(Box::new(io::stderr()))
    }
}

impl ToneSink for BellSink {
    fn play(&mut self, tone: &Tone, samples: &[f32]) -> io::Result<()> {
        if samples.iter().all(|s| s.abs() < f32::EPSILON) {
            return Ok(());
        }
        self.out.write_all(&vec![b'\x07'; ring_count(tone)])?;
        self.out.flush()
    }
}

fn ring_count(tone: &Tone) -> usize {
    let rings = tone.duration.as_millis().div_ceil(RING_SPAN.as_millis());
    rings.max(1) as usize
}

/// Discards every note.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ToneSink for NullSink {
    fn play(&mut self, _tone: &Tone, _samples: &[f32]) -> io::Result<()> {
        Ok(())
    }
}

pub struct AudioHandle {
    oscillator: Oscillator,
    envelope: Envelope,
    countdown: Tone,
    boundary: Tone,
    sink: Box<dyn ToneSink>,
    notes_played: u64,
}

impl AudioHandle {
    pub fn new(config: &SoundConfig, sink: Box<dyn ToneSink>) -> Self {
        let mut oscillator = Oscillator::new(SAMPLE_RATE);
        oscillator.start();
        Self {
            oscillator,
            envelope: Envelope {
                peak: config.volume.min(100) as f32 / 100.0,
                attack: ATTACK,
            },
            countdown: Tone::new(config.countdown_hz, Duration::from_millis(100)),
            boundary: Tone::new(config.boundary_hz, Duration::from_millis(200)),
            sink,
            notes_played: 0,
        }
    }

    /// Handle built from config: bell output when enabled, silent otherwise.
    pub fn from_config(config: &SoundConfig) -> Self {
        let sink: Box<dyn ToneSink> = if config.enabled {
            Box::new(BellSink::stderr())
        } else {
            Box::new(NullSink)
        };
        Self::new(config, sink)
    }

    pub fn tone_for(&self, cue: Cue) -> Tone {
        match cue {
            Cue::Countdown => self.countdown,
            Cue::Boundary => self.boundary,
        }
    }

    /// Render one note on the shared oscillator.
    pub fn render(&mut self, tone: &Tone) -> Vec<f32> {
        self.oscillator.set_frequency(tone.frequency_hz);
        let count = tone.sample_count(SAMPLE_RATE);
        let total = tone.duration.as_secs_f32();
        (0..count)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                self.oscillator.next_sample() * self.envelope.gain_at(t, total)
            })
            .collect()
    }

    /// Sound a cue. Output failures are logged, never fatal to the run.
    pub fn play_cue(&mut self, cue: Cue) -> Tone {
        let tone = self.tone_for(cue);
        let samples = self.render(&tone);
        if let Err(e) = self.sink.play(&tone, &samples) {
            tracing::warn!(error = %e, ?cue, "failed to play cue");
        }
        self.notes_played += 1;
        tone
    }

    pub fn notes_played(&self) -> u64 {
        self.notes_played
    }

    pub fn oscillator(&self) -> &Oscillator {
        &self.oscillator
    }
}

/// Lazily holds the audio handle until the first user-triggered start.
#[derive(Default)]
pub struct AudioSlot {
    handle: Option<AudioHandle>,
}

impl AudioSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_started(&self) -> bool {
        self.handle.is_some()
    }

    /// The existing handle, or a new one from `init` on first use.
    pub fn get_or_start(&mut self, init: impl FnOnce() -> AudioHandle) -> &mut AudioHandle {
        self.handle.get_or_insert_with(|| {
            tracing::debug!("starting audio oscillator");
            init()
        })
    }
}

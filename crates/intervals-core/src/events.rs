use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::settings::IntervalSettings;
use crate::timer::{Cue, Phase};

/// Every observable change of a timer run produces an Event.
/// The CLI prints them with `run --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    RunStarted {
        settings: IntervalSettings,
        plan_len: usize,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    Tick {
        plan_index: usize,
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    PhaseChanged {
        plan_index: usize,
        phase: Phase,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    Cue {
        cue: Cue,
        frequency_hz: f32,
        at: DateTime<Utc>,
    },
    RunCompleted {
        ticks: u64,
        at: DateTime<Utc>,
    },
    RunCancelled {
        plan_index: usize,
        remaining_secs: u32,
        ticks: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Option<Phase>,
        plan_index: usize,
        plan_len: usize,
        remaining_secs: u32,
        progress_pct: f64,
        done: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Wire name of the variant, matching the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::RunStarted { .. } => "run_started",
            Event::Tick { .. } => "tick",
            Event::PhaseChanged { .. } => "phase_changed",
            Event::Cue { .. } => "cue",
            Event::RunCompleted { .. } => "run_completed",
            Event::RunCancelled { .. } => "run_cancelled",
            Event::StateSnapshot { .. } => "state_snapshot",
        }
    }
}

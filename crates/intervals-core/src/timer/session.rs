//! Interval run state machine.
//!
//! A session walks a [`Plan`] one tick at a time. It has no clock of its own:
//! the caller invokes `tick()` once per second (see [`super::run_session`]).
//!
//! ## State Transitions
//!
//! ```text
//! Work -> Rest -> Work -> ... -> Rest -> (done)
//! ```
//!
//! A phase showing `d` seconds takes `d + 1` ticks: `d` ticks to count down
//! to zero, one more to move to the next plan entry. Moving past the last
//! entry finishes the run; `Done` is never rendered, it is reported once as
//! [`Tick::Completed`].

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::plan::{Phase, Plan};
use crate::events::Event;
use crate::settings::IntervalSettings;

/// Remaining seconds at or below which the countdown cue sounds.
pub const COUNTDOWN_CUE_SECONDS: u32 = 3;

/// Audio cue requested by a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    /// One of the last seconds of a phase.
    Countdown,
    /// The phase has reached zero.
    Boundary,
}

impl Cue {
    pub fn for_remaining(remaining: u32) -> Option<Cue> {
        match remaining {
            0 => Some(Cue::Boundary),
            r if r <= COUNTDOWN_CUE_SECONDS => Some(Cue::Countdown),
            _ => None,
        }
    }
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still running. `advanced` is set when this tick moved to the next entry.
    Running { cue: Option<Cue>, advanced: bool },
    /// The plan is exhausted. Returned exactly once per session.
    Completed,
    /// The session already finished or was cancelled.
    Idle,
}

#[derive(Debug, Clone)]
pub struct Session {
    settings: IntervalSettings,
    plan: Plan,
    plan_index: usize,
    remaining_secs: u32,
    ticks: u64,
    done: bool,
    cancelled: bool,
}

impl Session {
    pub fn new(settings: IntervalSettings) -> Self {
        Self::with_plan(settings, Plan::from_settings(&settings))
    }

    /// Session over an explicit plan. An empty plan completes on the first tick.
    pub fn with_plan(settings: IntervalSettings, plan: Plan) -> Self {
        let remaining_secs = plan.get(0).unwrap_or(0);
        Self {
            settings,
            plan,
            plan_index: 0,
            remaining_secs,
            ticks: 0,
            done: false,
            cancelled: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn settings(&self) -> &IntervalSettings {
        &self.settings
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn plan_index(&self) -> usize {
        self.plan_index
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Current phase, or `None` once the run is over.
    pub fn phase(&self) -> Option<Phase> {
        if self.done || self.plan_index >= self.plan.len() {
            None
        } else {
            Some(self.plan.phase_at(self.plan_index))
        }
    }

    /// 0.0 .. 100.0 progress across the entire plan.
    pub fn progress_pct(&self) -> f64 {
        let total = self.plan.total_seconds();
        if total == 0 {
            return if self.done { 100.0 } else { 0.0 };
        }
        let step = u64::from(self.plan.get(self.plan_index).unwrap_or(0));
        let elapsed_in_step = step.saturating_sub(u64::from(self.remaining_secs));
        let elapsed = self.plan.cumulative_seconds(self.plan_index) + elapsed_in_step;
        (elapsed as f64 / total as f64 * 100.0).min(100.0)
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase(),
            plan_index: self.plan_index,
            plan_len: self.plan.len(),
            remaining_secs: self.remaining_secs,
            progress_pct: self.progress_pct(),
            done: self.done,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start_event(&self) -> Event {
        Event::RunStarted {
            settings: self.settings,
            plan_len: self.plan.len(),
            total_secs: self.plan.total_seconds(),
            at: Utc::now(),
        }
    }

    /// Advance one second.
    pub fn tick(&mut self) -> Tick {
        if self.done {
            return Tick::Idle;
        }
        self.ticks += 1;

        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            return Tick::Running {
                cue: Cue::for_remaining(self.remaining_secs),
                advanced: false,
            };
        }

        self.plan_index += 1;
        match self.plan.get(self.plan_index) {
            Some(next) => {
                self.remaining_secs = next;
                Tick::Running {
                    cue: Cue::for_remaining(next),
                    advanced: true,
                }
            }
            None => {
                self.done = true;
                Tick::Completed
            }
        }
    }

    /// Stop the run early. Returns `None` if it already ended.
    pub fn cancel(&mut self) -> Option<Event> {
        if self.done {
            return None;
        }
        self.done = true;
        self.cancelled = true;
        Some(Event::RunCancelled {
            plan_index: self.plan_index,
            remaining_secs: self.remaining_secs,
            ticks: self.ticks,
            at: Utc::now(),
        })
    }
}

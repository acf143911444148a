//! Once-per-second run loop.
//!
//! [`run_session`] owns the tokio interval for the lifetime of the run. The
//! interval is dropped when the loop returns, on completion or on
//! cancellation, so no tick can fire after the timer view is gone.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::time::{self, Instant, MissedTickBehavior};

use super::session::{Session, Tick};
use crate::audio::AudioHandle;
use crate::events::Event;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunOutcome {
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub ticks: u64,
}

/// Presentation of a running timer.
pub trait TimerView {
    /// Redraw after the session changed.
    fn render(&mut self, session: &Session);

    /// Observe an event. Default ignores it.
    fn event(&mut self, _event: &Event) {}
}

/// Drive `session` until it completes or `cancel` resolves.
pub async fn run_session<V, C>(
    session: &mut Session,
    audio: &mut AudioHandle,
    view: &mut V,
    cancel: C,
) -> RunReport
where
    V: TimerView + ?Sized,
    C: Future<Output = ()>,
{
    tracing::info!(
        settings = ?session.settings(),
        plan_len = session.plan().len(),
        "run started"
    );
    view.event(&session.start_event());
    view.render(session);

    let mut interval = time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(cancel);

    loop {
        tokio::select! {
            biased;
            _ = &mut cancel => {
                if let Some(event) = session.cancel() {
                    tracing::info!(ticks = session.ticks(), "run cancelled");
                    view.event(&event);
                }
                return RunReport { outcome: RunOutcome::Cancelled, ticks: session.ticks() };
            }
            _ = interval.tick() => {
                match session.tick() {
                    Tick::Running { cue, advanced } => {
                        let index = session.plan_index();
                        let Some(phase) = session.phase() else { continue };
                        if advanced {
                            tracing::debug!(index, ?phase, "phase changed");
                            view.event(&Event::PhaseChanged {
                                plan_index: index,
                                phase,
                                duration_secs: session.remaining_secs(),
                                at: Utc::now(),
                            });
                        }
                        if let Some(cue) = cue {
                            let tone = audio.play_cue(cue);
                            view.event(&Event::Cue {
                                cue,
                                frequency_hz: tone.frequency_hz,
                                at: Utc::now(),
                            });
                        }
                        view.event(&Event::Tick {
                            plan_index: index,
                            phase,
                            remaining_secs: session.remaining_secs(),
                            at: Utc::now(),
                        });
                        view.render(session);
                    }
                    Tick::Completed => {
                        tracing::info!(ticks = session.ticks(), "run completed");
                        view.event(&Event::RunCompleted { ticks: session.ticks(), at: Utc::now() });
                        return RunReport { outcome: RunOutcome::Completed, ticks: session.ticks() };
                    }
                    Tick::Idle => {
                        let outcome = if session.is_cancelled() {
                            RunOutcome::Cancelled
                        } else {
                            RunOutcome::Completed
                        };
                        return RunReport { outcome, ticks: session.ticks() };
                    }
                }
            }
        }
    }
}

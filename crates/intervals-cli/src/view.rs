//! Terminal renderings of a running timer.

use std::io::{self, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use intervals_core::{Event, Session, TimerView};

const BAR_WIDTH: usize = 20;

/// One status line redrawn in place.
pub struct LineView<W: Write> {
    out: W,
}

impl LineView<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

#[cfg(test)]
impl<W: Write> LineView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

pub fn status_line(session: &Session) -> String {
    let phase = session.phase().map(|p| p.as_str()).unwrap_or("Done");
    let pct = session.progress_pct();
    let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "{phase:<4} {:>4}s  [{}/{}]  {}{} {:>3.0}%",
        session.remaining_secs(),
        (session.plan_index() + 1).min(session.plan().len()),
        session.plan().len(),
        "#".repeat(filled.min(BAR_WIDTH)),
        "-".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
        pct,
    )
}

impl<W: Write> TimerView for LineView<W> {
    fn render(&mut self, session: &Session) {
        let line = status_line(session);
        let drawn = queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(line)
        )
        .and_then(|_| self.out.flush());
        if let Err(e) = drawn {
            tracing::warn!(error = %e, "failed to draw timer");
        }
    }

    fn event(&mut self, event: &Event) {
        if matches!(event, Event::RunCompleted { .. } | Event::RunCancelled { .. }) {
            if let Err(e) = writeln!(self.out).and_then(|_| self.out.flush()) {
                tracing::warn!(error = %e, "failed to finish timer line");
            }
        }
    }
}

/// One JSON event per line.
pub struct JsonView<W: Write> {
    out: W,
}

impl JsonView<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

#[cfg(test)]
impl<W: Write> JsonView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TimerView for JsonView<W> {
    fn render(&mut self, _session: &Session) {}

    fn event(&mut self, event: &Event) {
        let written = serde_json::to_string(event)
            .map_err(io::Error::from)
            .and_then(|json| writeln!(self.out, "{json}"))
            .and_then(|_| self.out.flush());
        if let Err(e) = written {
            tracing::warn!(error = %e, "failed to write event");
        }
    }
}

//! Component state with redraw scheduling.
//!
//! A [`Store`] is a mutable cell whose only mutation entry point,
//! [`Store::update`], also schedules a redraw. Frontends poll
//! [`Store::take_redraw`] and re-render when it returns `true`.

use serde::{Deserialize, Serialize};

use crate::settings::IntervalSettings;

#[derive(Debug, Clone)]
pub struct Store<S> {
    state: S,
    generation: u64,
    redraw_pending: bool,
}

impl<S> Store<S> {
    /// New store with the initial render already scheduled.
    pub fn new(state: S) -> Self {
        Self {
            state,
            generation: 0,
            redraw_pending: true,
        }
    }

    pub fn get(&self) -> &S {
        &self.state
    }

    /// Mutate the state and schedule a redraw.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut S) -> R) -> R {
        let out = f(&mut self.state);
        self.generation += 1;
        self.redraw_pending = true;
        out
    }

    /// Consume the pending redraw, if any.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }

    /// Number of updates applied so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Greeting plus a click counter.
#[derive(Debug, Clone)]
pub struct Counter {
    name: String,
    count: Store<u64>,
}

impl Counter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count: Store::new(0),
        }
    }

    pub fn count(&self) -> u64 {
        *self.count.get()
    }

    pub fn increment(&mut self) -> u64 {
        self.count.update(|c| {
            *c += 1;
            *c
        })
    }

    pub fn take_redraw(&mut self) -> bool {
        self.count.take_redraw()
    }

    pub fn render(&self) -> String {
        format!("Hello {}\n{}\n[ Click Me ]", self.name, self.count())
    }
}

/// Which view the interval app shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "lowercase")]
pub enum Screen {
    Settings { settings: IntervalSettings },
    Running { settings: IntervalSettings },
}

/// Settings view and timer view, switched through one store.
#[derive(Debug, Clone)]
pub struct App {
    screen: Store<Screen>,
}

impl App {
    pub fn new(settings: IntervalSettings) -> Self {
        Self {
            screen: Store::new(Screen::Settings { settings }),
        }
    }

    pub fn screen(&self) -> Screen {
        *self.screen.get()
    }

    pub fn settings(&self) -> IntervalSettings {
        match self.screen() {
            Screen::Settings { settings } | Screen::Running { settings } => settings,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.screen(), Screen::Running { .. })
    }

    /// Store confirmed settings and switch to the timer.
    pub fn save(&mut self, settings: IntervalSettings) {
        tracing::debug!(?settings, "settings saved");
        self.screen.update(|s| *s = Screen::Running { settings });
    }

    /// Leave the timer, keeping the last settings for the form.
    pub fn cancel(&mut self) {
        let settings = self.settings();
        self.screen.update(|s| *s = Screen::Settings { settings });
    }

    pub fn take_redraw(&mut self) -> bool {
        self.screen.take_redraw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_schedules_redraw_on_update() {
        let mut store = Store::new(1);
        assert!(store.take_redraw());
        assert!(!store.take_redraw());

        store.update(|v| *v += 1);
        assert_eq!(*store.get(), 2);
        assert_eq!(store.generation(), 1);
        assert!(store.take_redraw());
        assert!(!store.take_redraw());
    }

    #[test]
    fn counter_increments_and_renders() {
        let mut counter = Counter::new("brandon");
        assert_eq!(counter.render(), "Hello brandon\n0\n[ Click Me ]");
        counter.take_redraw();

        assert_eq!(counter.increment(), 1);
        assert_eq!(counter.increment(), 2);
        assert!(counter.take_redraw());
        assert_eq!(counter.render(), "Hello brandon\n2\n[ Click Me ]");
    }

    #[test]
    fn app_switches_between_views() {
        let mut app = App::new(IntervalSettings::default());
        assert!(!app.is_running());
        app.take_redraw();

        let chosen = IntervalSettings::new(20, 10, 2);
        app.save(chosen);
        assert_eq!(app.screen(), Screen::Running { settings: chosen });
        assert!(app.take_redraw());

        app.cancel();
        assert_eq!(app.screen(), Screen::Settings { settings: chosen });
        assert!(app.take_redraw());
    }
}

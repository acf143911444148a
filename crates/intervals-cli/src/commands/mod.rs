pub mod config;
pub mod counter;
pub mod form;
pub mod plan;
pub mod run;

use clap::Args;
use intervals_core::{Config, IntervalSettings};

/// Interval settings flags shared by `run` and `plan`.
///
/// Bounds match the settings form; anything unset falls back to config.
#[derive(Args, Debug, Clone, Default)]
pub struct IntervalArgs {
    /// Work phase length in seconds (1-300)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=300))]
    pub work: Option<u32>,
    /// Rest phase length in seconds (0-300)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=300))]
    pub rest: Option<u32>,
    /// Extra work/rest pairs (0-10)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=10))]
    pub repeat: Option<u32>,
}

impl IntervalArgs {
    pub fn resolve(&self, config: &Config) -> IntervalSettings {
        let base = config.interval_settings();
        IntervalSettings::new(
            self.work.unwrap_or(base.work),
            self.rest.unwrap_or(base.rest),
            self.repeat.unwrap_or(base.repeat),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_flags_fall_back_to_config() {
        let mut config = Config::default();
        config.interval.rest = 15;
        let args = IntervalArgs { work: Some(30), rest: None, repeat: Some(0) };
        assert_eq!(args.resolve(&config), IntervalSettings::new(30, 15, 0));
    }
}

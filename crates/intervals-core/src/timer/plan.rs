use serde::{Deserialize, Serialize};

use crate::settings::IntervalSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Rest,
}

impl Phase {
    /// Work at even plan indices, rest at odd ones.
    pub fn at(index: usize) -> Self {
        if index % 2 == 0 {
            Phase::Work
        } else {
            Phase::Rest
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::Rest => "Rest",
        }
    }
}

/// Ordered work/rest durations for one run, in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    steps: Vec<u32>,
}

impl Plan {
    /// `repeat + 1` work/rest pairs, flattened.
    pub fn from_settings(settings: &IntervalSettings) -> Self {
        let pairs = settings.repeat as usize + 1;
        let steps = (0..pairs * 2)
            .map(|n| match Phase::at(n) {
                Phase::Work => settings.work,
                Phase::Rest => settings.rest,
            })
            .collect();
        Self { steps }
    }

    /// Plan from raw durations. No shape checks; an empty plan is allowed.
    pub fn from_steps(steps: Vec<u32>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.steps.get(index).copied()
    }

    pub fn phase_at(&self, index: usize) -> Phase {
        Phase::at(index)
    }

    pub fn steps(&self) -> &[u32] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = (Phase, u32)> + '_ {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, secs)| (Phase::at(i), *secs))
    }

    pub fn total_seconds(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(*s)).sum()
    }

    /// Seconds in all steps before `index`.
    pub fn cumulative_seconds(&self, index: usize) -> u64 {
        self.steps
            .iter()
            .take(index)
            .map(|s| u64::from(*s))
            .sum()
    }
}

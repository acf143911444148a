//! Interval settings and the settings form.
//!
//! The form owns the input bounds. Values that reach [`IntervalSettings`]
//! through the form are already clamped; the model itself never rejects a
//! value, so settings built by hand may be out of range.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const WORK_BOUNDS: RangeInclusive<u32> = 1..=300;
pub const REST_BOUNDS: RangeInclusive<u32> = 0..=300;
pub const REPEAT_BOUNDS: RangeInclusive<u32> = 0..=10;

/// Work/rest/repeat settings for one timer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntervalSettings {
    /// Work phase length in seconds.
    pub work: u32,
    /// Rest phase length in seconds.
    pub rest: u32,
    /// Extra work/rest pairs after the first.
    pub repeat: u32,
}

impl IntervalSettings {
    pub const fn new(work: u32, rest: u32, repeat: u32) -> Self {
        Self { work, rest, repeat }
    }

    /// Copy with every field clamped into its form bounds.
    pub fn clamped(self) -> Self {
        Self {
            work: SettingsField::Work.clamp(self.work),
            rest: SettingsField::Rest.clamp(self.rest),
            repeat: SettingsField::Repeat.clamp(self.repeat),
        }
    }

    pub fn get(&self, field: SettingsField) -> u32 {
        match field {
            SettingsField::Work => self.work,
            SettingsField::Rest => self.rest,
            SettingsField::Repeat => self.repeat,
        }
    }
}

impl Default for IntervalSettings {
    fn default() -> Self {
        Self::new(60, 5, 4)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsField {
    Work,
    Rest,
    Repeat,
}

impl SettingsField {
    pub const ALL: [SettingsField; 3] = [Self::Work, Self::Rest, Self::Repeat];

    pub fn bounds(self) -> RangeInclusive<u32> {
        match self {
            Self::Work => WORK_BOUNDS,
            Self::Rest => REST_BOUNDS,
            Self::Repeat => REPEAT_BOUNDS,
        }
    }

    pub fn clamp(self, value: u32) -> u32 {
        let bounds = self.bounds();
        value.clamp(*bounds.start(), *bounds.end())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Rest => "rest",
            Self::Repeat => "repeat",
        }
    }

    /// Label shown next to the input, e.g. `Work 60 second(s)`.
    pub fn label(self, value: u32) -> String {
        match self {
            Self::Work => format!("Work {value} second(s)"),
            Self::Rest => format!("Rest {value} second(s)"),
            Self::Repeat => format!("Repeat {value} time(s)."),
        }
    }
}

impl fmt::Display for SettingsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingsField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" => Ok(Self::Work),
            "rest" => Ok(Self::Rest),
            "repeat" | "repeats" => Ok(Self::Repeat),
            other => Err(ValidationError::UnknownField(other.to_string())),
        }
    }
}

/// Three bounded numeric inputs producing [`IntervalSettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    values: IntervalSettings,
}

impl SettingsForm {
    /// Seed the inputs from existing settings. Seeds are clamped the way a
    /// range input clamps its initial value.
    pub fn new(initial: IntervalSettings) -> Self {
        Self {
            values: initial.clamped(),
        }
    }

    pub fn value(&self, field: SettingsField) -> u32 {
        self.values.get(field)
    }

    /// Set an input, clamping to its bounds. Returns the stored value.
    pub fn set(&mut self, field: SettingsField, value: i64) -> u32 {
        let bounds = field.bounds();
        let clamped = value.clamp(i64::from(*bounds.start()), i64::from(*bounds.end())) as u32;
        match field {
            SettingsField::Work => self.values.work = clamped,
            SettingsField::Rest => self.values.rest = clamped,
            SettingsField::Repeat => self.values.repeat = clamped,
        }
        clamped
    }

    /// Parse raw text input and set the field.
    ///
    /// Blank input keeps the current value.
    pub fn input(&mut self, field: SettingsField, raw: &str) -> Result<u32, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(self.value(field));
        }
        let parsed: i64 = raw.parse().map_err(|_| ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("'{raw}' is not a whole number"),
        })?;
        Ok(self.set(field, parsed))
    }

    pub fn labels(&self) -> Vec<String> {
        SettingsField::ALL
            .iter()
            .map(|f| f.label(self.value(*f)))
            .collect()
    }

    /// Emit the settings currently held by the form.
    pub fn confirm(&self) -> IntervalSettings {
        self.values
    }
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self::new(IntervalSettings::default())
    }
}

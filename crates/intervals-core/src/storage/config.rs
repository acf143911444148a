//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default interval settings for `run` and the settings form
//! - Cue sound preferences
//! - The counter greeting
//!
//! Configuration is stored at `~/.config/intervals/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, CoreError, Result};
use crate::settings::IntervalSettings;

/// Default interval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalConfig {
    #[serde(default = "default_work")]
    pub work: u32,
    #[serde(default = "default_rest")]
    pub rest: u32,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

/// Cue sound configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// 0 ..= 100
    #[serde(default = "default_volume")]
    pub volume: u32,
    #[serde(default = "default_countdown_hz")]
    pub countdown_hz: f32,
    #[serde(default = "default_boundary_hz")]
    pub boundary_hz: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterConfig {
    #[serde(default = "default_counter_name")]
    pub name: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/intervals/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub interval: IntervalConfig,
    #[serde(default)]
    pub sound: SoundConfig,
    #[serde(default)]
    pub counter: CounterConfig,
}

fn default_work() -> u32 {
    IntervalSettings::default().work
}
fn default_rest() -> u32 {
    IntervalSettings::default().rest
}
fn default_repeat() -> u32 {
    IntervalSettings::default().repeat
}
fn default_true() -> bool {
    true
}
fn default_volume() -> u32 {
    50
}
fn default_countdown_hz() -> f32 {
    440.0
}
fn default_boundary_hz() -> f32 {
    880.0
}
fn default_counter_name() -> String {
    "brandon".into()
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            work: default_work(),
            rest: default_rest(),
            repeat: default_repeat(),
        }
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: default_volume(),
            countdown_hz: default_countdown_hz(),
            boundary_hz: default_boundary_hz(),
        }
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            name: default_counter_name(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")));
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("cannot set a whole section".into()));
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                CoreError::from(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config missing, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key in memory. Returns error if key is unknown
    /// or the value does not fit the field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| {
            CoreError::from(ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })
        })?;
        Ok(())
    }

    /// Default interval settings, clamped into the form bounds.
    pub fn interval_settings(&self) -> IntervalSettings {
        let raw = IntervalSettings::new(self.interval.work, self.interval.rest, self.interval.repeat);
        let clamped = raw.clamped();
        if clamped != raw {
            tracing::warn!(?raw, ?clamped, "configured interval settings out of range, clamping");
        }
        clamped
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.interval.work, 60);
        assert_eq!(parsed.sound.volume, 50);
        assert_eq!(parsed.counter.name, "brandon");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("sound.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("interval.rest").as_deref(), Some("5"));
        assert!(cfg.get("sound.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("sound.enabled", "false").unwrap();
        cfg.set("interval.work", "45").unwrap();
        cfg.set("counter.name", "ada").unwrap();
        cfg.set("sound.boundary_hz", "1000.5").unwrap();
        assert!(!cfg.sound.enabled);
        assert_eq!(cfg.interval.work, 45);
        assert_eq!(cfg.counter.name, "ada");
        assert!((cfg.sound.boundary_hz - 1000.5).abs() < f32::EPSILON);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(cfg.set("sound.nonexistent_key", "1").is_err());
        assert!(cfg.set("nope.work", "1").is_err());
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("sound.enabled", "not_a_bool").is_err());
        assert!(cfg.set("interval.work", "soon").is_err());
        assert!(cfg.set("interval", "1").is_err());
        // Negative values do not fit u32.
        assert!(cfg.set("interval.repeat", "-1").is_err());
    }

    #[test]
    fn interval_settings_are_clamped() {
        let mut cfg = Config::default();
        cfg.interval.work = 0;
        cfg.interval.repeat = 99;
        assert_eq!(cfg.interval_settings(), IntervalSettings::new(1, 5, 10));
    }

    #[test]
    fn missing_sections_use_defaults() {
        let cfg: Config = toml::from_str("[interval]\nwork = 30\n").unwrap();
        assert_eq!(cfg.interval.work, 30);
        assert_eq!(cfg.interval.rest, 5);
        assert!(cfg.sound.enabled);
    }

    #[test]
    fn load_from_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.interval.repeat, 4);

        let mut cfg = cfg;
        cfg.set("interval.repeat", "2").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().interval.repeat, 2);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "interval = [[[").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::LoadFailed { .. })));
    }
}

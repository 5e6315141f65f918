//! Layered editor configuration
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `KINEMA_LOG`, `KINEMA_PLAYBACK_SPEED`,
//!    `KINEMA_TIMELINE_DURATION`
//! 2. Project-local: `.kinema/config.toml`
//! 3. Global: `~/.kinema/config.toml`

use kinema_core::{KinemaError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Timeline defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default = "default_base_pixel_width")]
    pub base_pixel_width: f64,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            speed: default_speed(),
            base_pixel_width: default_base_pixel_width(),
            zoom: default_zoom(),
        }
    }
}

fn default_duration() -> f64 {
    30.0
}
fn default_speed() -> f64 {
    1.0
}
fn default_base_pixel_width() -> f64 {
    800.0
}
fn default_zoom() -> f64 {
    1.0
}

/// Simulation stepping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Logical playback steps per timeline second
    #[serde(default = "default_step_hz")]
    pub step_hz: f64,
    /// Seed for jitter behaviors
    #[serde(default = "default_jitter_seed")]
    pub jitter_seed: u32,
    /// Behavior delta per frame in headless runs
    #[serde(default = "default_frame_delta")]
    pub frame_delta: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            step_hz: default_step_hz(),
            jitter_seed: default_jitter_seed(),
            frame_delta: default_frame_delta(),
        }
    }
}

fn default_step_hz() -> f64 {
    60.0
}
fn default_jitter_seed() -> u32 {
    0x9E37_79B9
}
fn default_frame_delta() -> f64 {
    1.0 / 60.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "warn".to_string()
}

/// Resolved configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EditorConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut table = toml::Table::new();

        // Layer 1: Global config (~/.kinema/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                merge_tables(&mut table, Self::load_table(&global_path)?);
            }
        }

        // Layer 2: Project-local config (.kinema/config.toml)
        let local_path = PathBuf::from(".kinema/config.toml");
        if local_path.exists() {
            merge_tables(&mut table, Self::load_table(&local_path)?);
        }

        let mut config = Self::from_table(table)?;

        // Layer 3: Environment variable overrides
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load config from a specific file path only (for testing)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config = Self::from_table(Self::load_table(path)?)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EditorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Override fields from environment-style variables. Unparseable values
    /// are skipped with a warning.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(filter) = lookup("KINEMA_LOG") {
            self.logging.filter = filter;
        }
        if let Some(speed) = parse_env(&lookup, "KINEMA_PLAYBACK_SPEED") {
            self.timeline.speed = speed;
        }
        if let Some(duration) = parse_env(&lookup, "KINEMA_TIMELINE_DURATION") {
            self.timeline.duration = duration;
        }
    }

    fn validate(&self) -> Result<()> {
        let positive = [
            ("timeline.duration", self.timeline.duration),
            ("timeline.speed", self.timeline.speed),
            ("timeline.base_pixel_width", self.timeline.base_pixel_width),
            ("timeline.zoom", self.timeline.zoom),
            ("simulation.step_hz", self.simulation.step_hz),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(KinemaError::ConfigError(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if !(self.simulation.frame_delta.is_finite() && self.simulation.frame_delta >= 0.0) {
            return Err(KinemaError::ConfigError(format!(
                "simulation.frame_delta must be non-negative, got {}",
                self.simulation.frame_delta
            )));
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".kinema").join("config.toml"))
    }

    fn load_table(path: &Path) -> Result<toml::Table> {
        let content = std::fs::read_to_string(path)?;
        let table: toml::Table = toml::from_str(&content).map_err(|e| {
            KinemaError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "loaded config layer");
        Ok(table)
    }

    fn from_table(table: toml::Table) -> Result<Self> {
        toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| KinemaError::ConfigError(e.to_string()))
    }
}

fn parse_env<F>(lookup: &F, key: &str) -> Option<f64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}

/// Merge `overlay` into `base`, recursing into nested tables
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn temp_config(content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("kinema_config_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_config_from_file() {
        let path = temp_config(
            r#"
[timeline]
duration = 12.5
zoom = 2.0

[simulation]
jitter_seed = 7
"#,
        );

        let config = EditorConfig::load_from_file(&path).unwrap();
        assert_eq!(config.timeline.duration, 12.5);
        assert_eq!(config.timeline.zoom, 2.0);
        assert_eq!(config.timeline.speed, 1.0);
        assert_eq!(config.simulation.jitter_seed, 7);
        assert_eq!(config.simulation.step_hz, 60.0);
        assert_eq!(config.logging.filter, "warn");

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_defaults() {
        let config = EditorConfig::from_toml_str("").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.timeline.base_pixel_width, 800.0);
        assert!((config.simulation.frame_delta - 1.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let result = EditorConfig::from_toml_str("[timeline]\nduration = 0.0\n");
        assert!(matches!(result, Err(KinemaError::ConfigError(_))));
        let result = EditorConfig::from_toml_str("[simulation]\nstep_hz = -60.0\n");
        assert!(matches!(result, Err(KinemaError::ConfigError(_))));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let path = temp_config("[timeline\nduration = ");
        let result = EditorConfig::load_from_file(&path);
        assert!(matches!(result, Err(KinemaError::ConfigError(_))));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("KINEMA_LOG", "kinema_behavior=debug"),
            ("KINEMA_PLAYBACK_SPEED", "1.5"),
            ("KINEMA_TIMELINE_DURATION", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = EditorConfig::default();
        config.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.logging.filter, "kinema_behavior=debug");
        assert_eq!(config.timeline.speed, 1.5);
        assert_eq!(config.timeline.duration, 30.0);
    }

    #[test]
    fn test_layer_merge() {
        let mut base: toml::Table = toml::from_str("[timeline]\nduration = 10.0\nspeed = 2.0\n").unwrap();
        let overlay: toml::Table = toml::from_str("[timeline]\nspeed = 0.5\n[logging]\nfilter = \"info\"\n").unwrap();
        merge_tables(&mut base, overlay);

        let config = EditorConfig::from_table(base).unwrap();
        assert_eq!(config.timeline.duration, 10.0);
        assert_eq!(config.timeline.speed, 0.5);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = EditorConfig::default();
        config.timeline.duration = 45.0;
        let text = config.to_toml_string().unwrap();
        assert_eq!(EditorConfig::from_toml_str(&text).unwrap(), config);
    }
}

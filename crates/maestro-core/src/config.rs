//! Engine configuration.
//!
//! Every tunable the editing engine consults lives here and is passed in
//! explicitly; nothing reads process-wide state. Sections deserialize with
//! per-field defaults so a config file only needs the values it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MaestroError, Result};
use crate::time::Seconds;

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Time/pixel coordinate system.
    pub coordinates: CoordinateConfig,
    /// Snapping thresholds.
    pub snap: SnapConfig,
    /// Editing and navigation tolerances.
    pub edit: EditConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Coordinate system parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinateConfig {
    /// Pixels per second at zoom 1.0.
    pub base_scale: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Fixed playhead position as a fraction of the viewport width.
    pub playhead_fraction: f64,
    /// Empty space kept after the last clip when sizing the content.
    pub timeline_padding: Seconds,
}

impl Default for CoordinateConfig {
    fn default() -> Self {
        Self {
            base_scale: 10.0,
            min_zoom: 0.1,
            max_zoom: 50.0,
            playhead_fraction: 0.5,
            timeline_padding: 300.0,
        }
    }
}

impl CoordinateConfig {
    /// Clamp a zoom factor into the configured range.
    ///
    /// Unvalidated configs with `min_zoom > max_zoom` resolve to `max_zoom`
    /// instead of panicking.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.max(self.min_zoom).min(self.max_zoom)
    }

    /// Pixels per second at the given (already clamped) zoom.
    pub fn scale(&self, zoom: f64) -> f64 {
        self.base_scale * zoom
    }
}

/// Snap parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    pub enabled: bool,
    /// Threshold for interactive clip drags (seconds).
    pub drag_threshold: Seconds,
    /// Threshold for the registered snap engine (seconds).
    pub engine_threshold: Seconds,
    /// Multiplier applied to `drag_threshold`.
    pub magnetic_strength: f64,
    /// Range for magnetic alignment suggestions (seconds).
    pub magnetic_range: Seconds,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            drag_threshold: 0.5,
            engine_threshold: 0.2,
            magnetic_strength: 1.0,
            magnetic_range: 2.0,
        }
    }
}

impl SnapConfig {
    /// Effective threshold for a clip drag.
    pub fn effective_drag_threshold(&self) -> Seconds {
        self.drag_threshold * self.magnetic_strength
    }
}

/// Editing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    /// Shortest clip a trim may produce.
    pub min_trim_duration: Seconds,
    /// Tolerance around the playhead when seeking between edit points.
    pub navigation_epsilon: Seconds,
    /// Maximum number of undo snapshots kept.
    pub history_depth: usize,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            min_trim_duration: 0.1,
            navigation_epsilon: 0.01,
            history_depth: 200,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "maestro_timeline=debug,warn").
    pub level: String,
    /// Include the event target in formatted output.
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_target: true,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(data: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(data)
            .map_err(|e| MaestroError::Config(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MaestroError::Serialization(format!("Failed to serialize config: {}", e)))
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        let c = &self.coordinates;
        if c.base_scale <= 0.0 {
            return Err(MaestroError::Config("base_scale must be positive".into()));
        }
        if c.min_zoom <= 0.0 || c.min_zoom > c.max_zoom {
            return Err(MaestroError::Config(format!(
                "zoom range [{}, {}] is invalid",
                c.min_zoom, c.max_zoom
            )));
        }
        if !(0.0..=1.0).contains(&c.playhead_fraction) {
            return Err(MaestroError::Config(
                "playhead_fraction must be within [0, 1]".into(),
            ));
        }
        if self.snap.drag_threshold < 0.0 || self.snap.engine_threshold < 0.0 {
            return Err(MaestroError::Config(
                "snap thresholds must not be negative".into(),
            ));
        }
        if self.edit.min_trim_duration <= 0.0 {
            return Err(MaestroError::Config(
                "min_trim_duration must be positive".into(),
            ));
        }
        Ok(())
    }
}

//! Timeline persistence with versioning and migration.
//!
//! Files are JSON with a schema version. Only tracks, clips and project
//! settings are stored; viewport state belongs to the session.

use std::path::Path;

use maestro_core::{MaestroError, ProjectSettings, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::timeline::Timeline;

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Versioned timeline file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineFile {
    /// Schema version for migration.
    pub version: u32,
    pub timeline: Timeline,
    #[serde(default)]
    pub settings: ProjectSettings,
    /// Application version that wrote this file.
    pub app_version: String,
}

impl TimelineFile {
    pub fn new(timeline: Timeline, settings: ProjectSettings) -> Self {
        Self {
            version: CURRENT_VERSION,
            timeline,
            settings,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Serialize to JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| {
            MaestroError::Serialization(format!("Failed to serialize timeline: {}", e))
        })
    }

    /// Deserialize from JSON bytes, applying migrations if needed.
    ///
    /// Files whose clips overlap on a track are rejected.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_slice(data)
            .map_err(|e| MaestroError::Serialization(format!("Invalid JSON: {}", e)))?;

        let version = raw.get("version").and_then(|v| v.as_u64()).unwrap_or(0);
        if version > u64::from(CURRENT_VERSION) {
            return Err(MaestroError::Serialization(format!(
                "Timeline file version {} is newer than supported version {}",
                version, CURRENT_VERSION
            )));
        }

        let migrated = migrate(raw, version as u32)?;
        let file: Self = serde_json::from_value(migrated)
            .map_err(|e| MaestroError::Serialization(format!("Failed to parse timeline: {}", e)))?;

        if file.timeline.has_overlaps() {
            return Err(MaestroError::Serialization(
                "Timeline contains overlapping clips".to_string(),
            ));
        }
        Ok(file)
    }

    /// Save to a file path.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let data = self.to_json()?;
        std::fs::write(path, data)?;
        info!(path = %path.display(), clips = self.timeline.clips.len(), "Saved timeline");
        Ok(())
    }

    /// Load from a file path.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let file = Self::from_json(&data)?;
        info!(path = %path.display(), version = file.version, "Loaded timeline");
        Ok(file)
    }
}

/// Apply sequential migrations from `from_version` to `CURRENT_VERSION`.
fn migrate(mut data: serde_json::Value, from_version: u32) -> Result<serde_json::Value> {
    let mut version = from_version;

    while version < CURRENT_VERSION {
        match version {
            0 => {
                // v0 files are a bare `{tracks, clips}` timeline
                if data.get("version").is_none() {
                    data = serde_json::json!({
                        "version": 1,
                        "timeline": data,
                        "app_version": "0.0.0",
                    });
                }
                debug!("Migrated timeline file v0 -> v1");
                version = 1;
            }
            _ => {
                return Err(MaestroError::Serialization(format!(
                    "No migration path from version {}",
                    version
                )));
            }
        }
    }

    Ok(data)
}

//! Project settings supplied by the host's settings dialog.

use serde::{Deserialize, Serialize};

use crate::time::FrameRate;
use crate::timecode::Timecode;
use crate::viewport::Viewport;

/// Output resolution in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Project-wide settings. The frame rate and timecode start feed the
/// timecode formatter and ruler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    pub framerate: FrameRate,
    pub color_space: String,
    pub resolution: Resolution,
    pub timecode_start: Timecode,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            framerate: FrameRate::FPS_24,
            color_space: "Rec.709".to_string(),
            resolution: Resolution::default(),
            timecode_start: Timecode::ZERO,
        }
    }
}

impl ProjectSettings {
    /// Push the frame rate and timecode start into a session viewport.
    pub fn apply_to(&self, viewport: &mut Viewport) {
        viewport.frame_rate = self.framerate;
        viewport.start_timecode = self.timecode_start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_to_viewport() {
        let settings = ProjectSettings {
            framerate: FrameRate::FPS_25,
            timecode_start: Timecode::new(10, 0, 0, 0),
            ..Default::default()
        };
        let mut vp = Viewport::default();
        settings.apply_to(&mut vp);
        vp.seek(1.0);
        assert_eq!(vp.current_timecode(), "10:00:01:00");
    }

    #[test]
    fn test_deserialize_partial() {
        let settings: ProjectSettings =
            serde_json::from_str(r#"{ "timecode_start": "01:00:00:00" }"#).unwrap();
        assert_eq!(settings.timecode_start, Timecode::new(1, 0, 0, 0));
        assert_eq!(settings.framerate, FrameRate::FPS_24);
        assert_eq!(settings.resolution.width, 1920);
    }
}

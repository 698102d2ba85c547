//! Maestro Core - Foundation types for the timeline engine
//!
//! This crate provides the types the editing engine is built on:
//! - Time representation (seconds, FrameRate, TimeRange)
//! - Timecode formatting and parsing
//! - The time/pixel coordinate system and viewport
//! - Ruler tick generation
//! - Engine configuration, project settings and logging setup

pub mod config;
pub mod error;
pub mod logging;
pub mod ruler;
pub mod settings;
pub mod time;
pub mod timecode;
pub mod viewport;

pub use config::{CoordinateConfig, EditConfig, EngineConfig, LoggingConfig, SnapConfig};
pub use error::{MaestroError, Result};
pub use ruler::{generate_ticks, RulerTick, TickIntervals};
pub use settings::{ProjectSettings, Resolution};
pub use time::{FrameRate, Seconds, TimeRange};
pub use timecode::{format_timecode, parse_timecode, timeline_seconds, Timecode};
pub use viewport::{
    pixel_to_time, scroll_offset, span_geometry, time_to_pixel, visible_range, PixelSpan,
    Viewport, VisibleRange,
};

// Settings module
// Tunables for gesture recognition, auto-scroll and the display window

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::window::{DisplayWindow, DEFAULT_DAY_END_HOUR, DEFAULT_DAY_START_HOUR};

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("{field} must be greater than zero (got {value})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("day_start_hour {start} must not be after day_end_hour {end}")]
    InvertedDay { start: u32, end: u32 },
    #[error("{field} must be an hour between 0 and 23 (got {value})")]
    HourOutOfRange { field: &'static str, value: u32 },
}

/// Grid interaction settings, persisted as TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Pointer travel (px) before a press becomes a drag.
    pub drag_threshold_px: f32,
    /// Horizontal travel (px) before a touch becomes a scroll-swipe.
    pub swipe_threshold_px: f32,
    /// Longest press (ms) still treated as a tap.
    pub tap_max_duration_ms: u64,
    /// Distance (px) from a viewport edge where auto-scroll engages.
    pub auto_scroll_margin_px: f32,
    /// Scroll speed (px per tick) at the viewport edge.
    pub auto_scroll_max_speed_px: f32,
    /// Auto-scroll tick period (ms).
    pub auto_scroll_tick_ms: u64,
    /// How long a completed hour block stays marked for its pulse (ms).
    pub completion_pulse_ms: u64,
    /// First displayed hour (24h clock).
    pub day_start_hour: u32,
    /// Last displayed hour (24h clock), inclusive.
    pub day_end_hour: u32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            drag_threshold_px: 5.0,
            swipe_threshold_px: 10.0,
            tap_max_duration_ms: 300,
            auto_scroll_margin_px: 60.0,
            auto_scroll_max_speed_px: 10.0,
            auto_scroll_tick_ms: 16,
            completion_pulse_ms: 300,
            day_start_hour: DEFAULT_DAY_START_HOUR,
            day_end_hour: DEFAULT_DAY_END_HOUR,
        }
    }
}

impl GridSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("drag_threshold_px", self.drag_threshold_px as f64),
            ("swipe_threshold_px", self.swipe_threshold_px as f64),
            ("tap_max_duration_ms", self.tap_max_duration_ms as f64),
            ("auto_scroll_margin_px", self.auto_scroll_margin_px as f64),
            ("auto_scroll_max_speed_px", self.auto_scroll_max_speed_px as f64),
            ("auto_scroll_tick_ms", self.auto_scroll_tick_ms as f64),
            ("completion_pulse_ms", self.completion_pulse_ms as f64),
        ];
        for (field, value) in positive {
            // NaN fails this comparison too
            if !(value > 0.0) {
                return Err(SettingsError::NonPositive { field, value });
            }
        }

        for (field, value) in [
            ("day_start_hour", self.day_start_hour),
            ("day_end_hour", self.day_end_hour),
        ] {
            if value > 23 {
                return Err(SettingsError::HourOutOfRange { field, value });
            }
        }

        if self.day_start_hour > self.day_end_hour {
            return Err(SettingsError::InvertedDay {
                start: self.day_start_hour,
                end: self.day_end_hour,
            });
        }

        Ok(())
    }

    pub fn display_window(&self) -> DisplayWindow {
        DisplayWindow::new(self.day_start_hour, self.day_end_hour)
    }

    pub fn tap_max_duration(&self) -> Duration {
        Duration::from_millis(self.tap_max_duration_ms)
    }

    pub fn auto_scroll_tick(&self) -> Duration {
        Duration::from_millis(self.auto_scroll_tick_ms)
    }

    pub fn completion_pulse(&self) -> Duration {
        Duration::from_millis(self.completion_pulse_ms)
    }
}

//! Edge auto-scroll while a drag selection is active.
//!
//! The controller only holds the velocity and whether its tick loop is
//! running; the host drives ticks at [`AutoScrollController::tick_interval`]
//! for as long as [`AutoScrollController::is_running`] reports true.

use std::time::Duration;

use egui::{Pos2, Rect, Vec2};

use crate::models::settings::GridSettings;

/// The scrollable grid content plus the secondary scrollbar mirrored to it.
pub trait ScrollViewport {
    /// Visible bounds in the same coordinate space as pointer positions.
    fn bounds(&self) -> Rect;
    fn scroll_offset(&self) -> Vec2;
    /// Request a new offset. Hosts may clamp it to the scrollable extent.
    fn set_scroll_offset(&mut self, offset: Vec2);
    /// Mirror the horizontal offset onto the synchronized scrollbar.
    fn sync_scrollbar(&mut self, horizontal: f32);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoScrollConfig {
    pub margin: f32,
    pub max_speed: f32,
    pub tick: Duration,
}

impl AutoScrollConfig {
    pub fn from_settings(settings: &GridSettings) -> Self {
        Self {
            margin: settings.auto_scroll_margin_px,
            max_speed: settings.auto_scroll_max_speed_px,
            tick: settings.auto_scroll_tick(),
        }
    }
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self::from_settings(&GridSettings::default())
    }
}

/// Scroll velocity (px per tick) for a pointer at `pointer` inside `bounds`.
///
/// Zero while the pointer is more than `margin` from every edge, growing
/// linearly to `max_speed` at the edge and continuing to grow past it.
pub fn scroll_velocity(pointer: Pos2, bounds: Rect, margin: f32, max_speed: f32) -> Vec2 {
    Vec2::new(
        axis_velocity(pointer.x, bounds.min.x, bounds.max.x, margin, max_speed),
        axis_velocity(pointer.y, bounds.min.y, bounds.max.y, margin, max_speed),
    )
}

fn axis_velocity(pos: f32, min: f32, max: f32, margin: f32, max_speed: f32) -> f32 {
    if margin <= 0.0 {
        return 0.0;
    }

    if pos < min + margin {
        -max_speed * (1.0 - (pos - min) / margin)
    } else if pos > max - margin {
        max_speed * (1.0 - (max - pos) / margin)
    } else {
        0.0
    }
}

#[derive(Debug, Clone)]
pub struct AutoScrollController {
    config: AutoScrollConfig,
    velocity: Vec2,
    running: bool,
}

impl AutoScrollController {
    pub fn new(config: AutoScrollConfig) -> Self {
        Self {
            config,
            velocity: Vec2::ZERO,
            running: false,
        }
    }

    /// Recompute velocity for the pointer; starts the loop lazily and stops it
    /// as soon as the pointer leaves every edge zone.
    pub fn update(&mut self, pointer: Pos2, bounds: Rect) {
        self.velocity = scroll_velocity(pointer, bounds, self.config.margin, self.config.max_speed);
        if self.velocity == Vec2::ZERO {
            self.stop();
        } else {
            self.start();
        }
    }

    fn start(&mut self) {
        if !self.running {
            log::trace!("Auto-scroll started at {:?}", self.velocity);
            self.running = true;
        }
    }

    /// Tear the loop down and zero the velocity.
    pub fn stop(&mut self) {
        if self.running {
            log::trace!("Auto-scroll stopped");
        }
        self.running = false;
        self.velocity = Vec2::ZERO;
    }

    /// Apply one tick of scrolling. Returns true when the viewport was asked to move.
    pub fn tick(&mut self, viewport: &mut dyn ScrollViewport) -> bool {
        if !self.running || self.velocity == Vec2::ZERO {
            return false;
        }

        let target = viewport.scroll_offset() + self.velocity;
        viewport.set_scroll_offset(target);
        let applied = viewport.scroll_offset();
        viewport.sync_scrollbar(applied.x);
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn tick_interval(&self) -> Duration {
        self.config.tick
    }
}

impl Default for AutoScrollController {
    fn default() -> Self {
        Self::new(AutoScrollConfig::default())
    }
}

// Test fixtures - reusable test data
// Provides a synthetic host for driving the grid engine end-to-end

#![allow(dead_code)]

use chrono::NaiveDate;
use egui::{Pos2, Rect, Vec2};
use meet_grid::grid::{
    CellSelection, EventBus, GridHost, GridInteraction, GridLayout, NoDeviceSignals, ScrollViewport,
};
use meet_grid::models::cell::CellCoord;
use meet_grid::models::settings::GridSettings;
use meet_grid::models::window::{DisplayWindow, GridShape};

pub const COLUMN_WIDTH: f32 = 64.0;
pub const QUARTER_HEIGHT: f32 = 16.0;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday Jan 6 through Wednesday Jan 8, 2025
    pub fn first_week_2025() -> Vec<NaiveDate> {
        (6..=8)
            .map(|day| NaiveDate::from_ymd_opt(2025, 1, day).unwrap())
            .collect()
    }
}

/// Scroll container with a fixed scrollable extent.
#[derive(Debug, Clone)]
pub struct TestViewport {
    pub bounds: Rect,
    pub offset: Vec2,
    pub max_offset: Vec2,
    pub scrollbar: f32,
}

impl TestViewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            bounds: Rect::from_min_size(Pos2::ZERO, Vec2::new(width, height)),
            offset: Vec2::ZERO,
            max_offset: Vec2::new(2000.0, 2000.0),
            scrollbar: 0.0,
        }
    }
}

impl ScrollViewport for TestViewport {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn scroll_offset(&self) -> Vec2 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: Vec2) {
        self.offset = offset.max(Vec2::ZERO).min(self.max_offset);
    }

    fn sync_scrollbar(&mut self, horizontal: f32) {
        self.scrollbar = horizontal;
    }
}

/// Everything a host owns, plus the engine mounted on a synthetic bus.
pub struct Harness {
    pub grid: GridInteraction,
    pub bus: EventBus,
    pub selection: CellSelection,
    pub viewport: TestViewport,
    pub layout: GridLayout,
    pub signals: NoDeviceSignals,
}

impl Harness {
    pub fn new(date_count: usize) -> Self {
        Self::with_window(date_count, DisplayWindow::default())
    }

    pub fn with_window(date_count: usize, window: DisplayWindow) -> Self {
        let shape = GridShape::new(date_count, window);
        let signals = NoDeviceSignals;
        let mut bus = EventBus::new();
        let mut grid = GridInteraction::new(shape, &GridSettings::default(), &signals);
        grid.mount(&mut bus);

        Self {
            grid,
            bus,
            selection: CellSelection::new(),
            viewport: TestViewport::new(480.0, 640.0),
            layout: GridLayout::new(Pos2::ZERO, COLUMN_WIDTH, QUARTER_HEIGHT, shape),
            signals,
        }
    }

    pub fn center(&self, coord: CellCoord) -> Pos2 {
        self.layout.cell_rect(coord).center()
    }

    /// Run `f` with a host view over the harness state.
    pub fn with_host<R>(&mut self, f: impl FnOnce(&mut GridInteraction, &mut GridHost<'_>) -> R) -> R {
        let mut host = GridHost {
            selection: &mut self.selection,
            viewport: &mut self.viewport,
            hit_test: &self.layout,
            signals: &self.signals,
        };
        f(&mut self.grid, &mut host)
    }

    /// Deliver everything queued on the bus.
    pub fn pump(&mut self) {
        let Self {
            grid,
            bus,
            selection,
            viewport,
            layout,
            signals,
        } = self;
        let mut host = GridHost {
            selection,
            viewport,
            hit_test: &*layout,
            signals: &*signals,
        };
        grid.pump(bus, &mut host);
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        if self.grid.is_mounted() {
            self.grid.unmount(&mut self.bus);
        }
    }
}

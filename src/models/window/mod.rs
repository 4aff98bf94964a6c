// Display window module
// Which hours the grid shows and which cells accept input

use chrono::NaiveTime;

use crate::models::cell::{CellCoord, QUARTERS_PER_HOUR, SLOT_MINUTES};
use crate::utils::date::naive_time_minutes;

/// Default first displayed hour (6 AM).
pub const DEFAULT_DAY_START_HOUR: u32 = 6;
/// Default last displayed hour (11 PM), inclusive.
pub const DEFAULT_DAY_END_HOUR: u32 = 23;

/// Time-of-day span rendered by the grid, plus the optional event bounds
/// that disable cells outside the organizer's chosen window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWindow {
    day_start_hour: u32,
    hour_count: usize,
    event_start: Option<NaiveTime>,
    event_end: Option<NaiveTime>,
}

impl DisplayWindow {
    /// Window covering `day_start_hour..=day_end_hour`.
    /// An inverted range collapses to the single start hour.
    pub fn new(day_start_hour: u32, day_end_hour: u32) -> Self {
        let day_start_hour = day_start_hour.min(23);
        let day_end_hour = day_end_hour.clamp(day_start_hour, 23);
        Self {
            day_start_hour,
            hour_count: (day_end_hour - day_start_hour + 1) as usize,
            event_start: None,
            event_end: None,
        }
    }

    /// Restrict input to `start <= slot < end`. Bounds only apply when both are present.
    pub fn with_event_bounds(mut self, start: Option<NaiveTime>, end: Option<NaiveTime>) -> Self {
        self.event_start = start;
        self.event_end = end;
        self
    }

    pub fn day_start_hour(&self) -> u32 {
        self.day_start_hour
    }

    pub fn hour_count(&self) -> usize {
        self.hour_count
    }

    /// Number of 15-minute rows.
    pub fn slot_count(&self) -> usize {
        self.hour_count * QUARTERS_PER_HOUR
    }

    pub fn event_bounds(&self) -> Option<(NaiveTime, NaiveTime)> {
        match (self.event_start, self.event_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Minutes since midnight at the top of the given cell.
    pub fn slot_minutes(&self, hour: usize, quarter: usize) -> u32 {
        (self.day_start_hour + hour as u32) * 60 + quarter as u32 * SLOT_MINUTES
    }

    /// Whether a time slot falls inside the event bounds.
    pub fn is_slot_enabled(&self, hour: usize, quarter: usize) -> bool {
        match self.event_bounds() {
            Some((start, end)) => {
                let slot = self.slot_minutes(hour, quarter);
                slot >= naive_time_minutes(start) && slot < naive_time_minutes(end)
            }
            None => true,
        }
    }

    /// Whether any quarter of an hour row is enabled.
    pub fn has_enabled_quarter(&self, hour: usize) -> bool {
        (0..QUARTERS_PER_HOUR).any(|quarter| self.is_slot_enabled(hour, quarter))
    }
}

impl Default for DisplayWindow {
    fn default() -> Self {
        Self::new(DEFAULT_DAY_START_HOUR, DEFAULT_DAY_END_HOUR)
    }
}

/// Dimensions of one rendered grid: the display window and the number of
/// candidate dates. Every index computation in the interaction engine goes
/// through this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub date_count: usize,
    pub window: DisplayWindow,
}

impl GridShape {
    pub fn new(date_count: usize, window: DisplayWindow) -> Self {
        Self { date_count, window }
    }

    pub fn hour_count(&self) -> usize {
        self.window.hour_count()
    }

    /// Total number of cells, i.e. the length of a heatmap for this grid.
    pub fn cell_count(&self) -> usize {
        self.window.slot_count() * self.date_count
    }

    pub fn index_of(&self, coord: CellCoord) -> usize {
        coord.index(self.date_count)
    }

    /// Coordinate lies on the grid.
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.hour < self.hour_count()
            && coord.quarter < QUARTERS_PER_HOUR
            && coord.date < self.date_count
    }

    /// Coordinate lies on the grid and inside the event bounds.
    pub fn is_enabled(&self, coord: CellCoord) -> bool {
        self.contains(coord) && self.window.is_slot_enabled(coord.hour, coord.quarter)
    }
}

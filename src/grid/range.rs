//! Rectangular cell range between a drag anchor and the current pointer cell.
//!
//! Hours and dates span the inclusive box between the two endpoints. Quarters
//! are clipped only on the boundary hours: the earlier hour (smaller hour index)
//! starts at its endpoint's quarter, the later hour stops at its endpoint's
//! quarter, and every hour in between is fully included. When both endpoints
//! share an hour the range is the inclusive quarter interval between them.
//! The result is identical whichever endpoint is the anchor.

use std::ops::RangeInclusive;

use crate::models::cell::{CellCoord, QUARTERS_PER_HOUR};

const LAST_QUARTER: usize = QUARTERS_PER_HOUR - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    anchor: CellCoord,
    current: CellCoord,
}

impl CellRange {
    pub fn new(anchor: CellCoord, current: CellCoord) -> Self {
        Self { anchor, current }
    }

    pub fn anchor(&self) -> CellCoord {
        self.anchor
    }

    pub fn current(&self) -> CellCoord {
        self.current
    }

    pub fn hours(&self) -> RangeInclusive<usize> {
        let (lo, hi) = ordered(self.anchor.hour, self.current.hour);
        lo..=hi
    }

    pub fn dates(&self) -> RangeInclusive<usize> {
        let (lo, hi) = ordered(self.anchor.date, self.current.date);
        lo..=hi
    }

    /// Quarters of `hour` covered by the range, or `None` when the hour lies outside it.
    pub fn quarter_span(&self, hour: usize) -> Option<RangeInclusive<usize>> {
        if !self.hours().contains(&hour) {
            return None;
        }

        let (earlier, later) = if self.anchor.hour <= self.current.hour {
            (self.anchor, self.current)
        } else {
            (self.current, self.anchor)
        };

        let span = if earlier.hour == later.hour {
            let (lo, hi) = ordered(earlier.quarter, later.quarter);
            lo..=hi
        } else if hour == earlier.hour {
            earlier.quarter..=LAST_QUARTER
        } else if hour == later.hour {
            0..=later.quarter
        } else {
            0..=LAST_QUARTER
        };
        Some(span)
    }

    /// Time-of-day containment, ignoring the date axis.
    pub fn contains_time(&self, hour: usize, quarter: usize) -> bool {
        self.quarter_span(hour)
            .map_or(false, |span| span.contains(&quarter))
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        self.dates().contains(&coord.date) && self.contains_time(coord.hour, coord.quarter)
    }

    /// Every covered cell, hour-major then date then quarter.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let dates = self.dates();
        self.hours().flat_map(move |hour| {
            let quarters = self.quarter_span(hour).unwrap_or(1..=0);
            dates.clone().flat_map(move |date| {
                quarters
                    .clone()
                    .map(move |quarter| CellCoord::new(hour, quarter, date))
            })
        })
    }
}

/// Whether `(hour, quarter)` lies in the time span between `anchor` and `current`.
pub fn is_in_range(hour: usize, quarter: usize, anchor: CellCoord, current: CellCoord) -> bool {
    CellRange::new(anchor, current).contains_time(hour, quarter)
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

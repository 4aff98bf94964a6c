// Cell module
// Flat cell indexing for the availability grid

/// Number of 15-minute subdivisions in one hour row.
pub const QUARTERS_PER_HOUR: usize = 4;

/// Minutes covered by a single cell.
pub const SLOT_MINUTES: u32 = 15;

/// One 15-minute slot on one candidate date.
///
/// `hour` is relative to the first displayed hour of the grid, `quarter`
/// is `0..4` and `date` indexes the event's ordered date list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub hour: usize,
    pub quarter: usize,
    pub date: usize,
}

impl CellCoord {
    pub const fn new(hour: usize, quarter: usize, date: usize) -> Self {
        Self {
            hour,
            quarter,
            date,
        }
    }

    /// Flat index of this cell for a grid with `date_count` columns.
    pub fn index(&self, date_count: usize) -> usize {
        cell_index(self.hour, self.quarter, self.date, date_count)
    }

    /// Inverse of [`CellCoord::index`]. Returns `None` when `date_count` is zero.
    pub fn from_index(index: usize, date_count: usize) -> Option<Self> {
        decompose(index, date_count)
    }

    /// The hour block (all four quarters) this cell belongs to.
    pub fn hour_block(&self) -> HourBlockKey {
        HourBlockKey::new(self.hour, self.date)
    }

    /// The same hour and date with a different quarter.
    pub fn with_quarter(&self, quarter: usize) -> Self {
        Self { quarter, ..*self }
    }
}

/// Identifies the four quarters sharing an hour and a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HourBlockKey {
    pub hour: usize,
    pub date: usize,
}

impl HourBlockKey {
    pub const fn new(hour: usize, date: usize) -> Self {
        Self { hour, date }
    }

    /// The four cells of this block, top quarter first.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let HourBlockKey { hour, date } = *self;
        (0..QUARTERS_PER_HOUR).map(move |quarter| CellCoord::new(hour, quarter, date))
    }
}

/// `index = (hour * 4 + quarter) * date_count + date`
pub fn cell_index(hour: usize, quarter: usize, date: usize, date_count: usize) -> usize {
    (hour * QUARTERS_PER_HOUR + quarter) * date_count + date
}

/// Split a flat index back into `(hour, quarter, date)`.
pub fn decompose(index: usize, date_count: usize) -> Option<CellCoord> {
    if date_count == 0 {
        return None;
    }

    let date = index % date_count;
    let slot = index / date_count;
    Some(CellCoord::new(
        slot / QUARTERS_PER_HOUR,
        slot % QUARTERS_PER_HOUR,
        date,
    ))
}

/// Quarter row hit by a point `offset_y` pixels below the top of a
/// collapsed hour block of height `block_height`. Clamped to `0..4`.
pub fn quarter_from_offset(offset_y: f32, block_height: f32) -> usize {
    if block_height <= 0.0 || !offset_y.is_finite() {
        return 0;
    }

    let raw = (offset_y / block_height * QUARTERS_PER_HOUR as f32).floor();
    raw.clamp(0.0, (QUARTERS_PER_HOUR - 1) as f32) as usize
}

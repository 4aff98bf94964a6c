//! Screen geometry of the grid: where each cell is drawn and which cell sits
//! under a pointer position.

use egui::{Pos2, Rect, Vec2};

use crate::models::cell::{CellCoord, HourBlockKey, QUARTERS_PER_HOUR};
use crate::models::window::GridShape;

/// Maps a pointer position to the cell beneath it.
pub trait CellHitTest {
    fn cell_at(&self, pos: Pos2) -> Option<CellCoord>;
}

/// Dates run left to right in columns; each hour is a row of four stacked
/// quarter rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Screen position of the top-left corner of cell (0, 0, 0).
    pub origin: Pos2,
    /// Width of one date column.
    pub column_width: f32,
    /// Height of one quarter row.
    pub quarter_height: f32,
    pub shape: GridShape,
}

impl GridLayout {
    pub fn new(origin: Pos2, column_width: f32, quarter_height: f32, shape: GridShape) -> Self {
        Self {
            origin,
            column_width,
            quarter_height,
            shape,
        }
    }

    pub fn hour_height(&self) -> f32 {
        self.quarter_height * QUARTERS_PER_HOUR as f32
    }

    /// Size of the whole grid content.
    pub fn content_size(&self) -> Vec2 {
        Vec2::new(
            self.column_width * self.shape.date_count as f32,
            self.hour_height() * self.shape.hour_count() as f32,
        )
    }

    pub fn cell_rect(&self, coord: CellCoord) -> Rect {
        let row = coord.hour * QUARTERS_PER_HOUR + coord.quarter;
        Rect::from_min_size(
            self.origin
                + Vec2::new(
                    coord.date as f32 * self.column_width,
                    row as f32 * self.quarter_height,
                ),
            Vec2::new(self.column_width, self.quarter_height),
        )
    }

    pub fn hour_block_rect(&self, block: HourBlockKey) -> Rect {
        Rect::from_min_size(
            self.origin
                + Vec2::new(
                    block.date as f32 * self.column_width,
                    block.hour as f32 * self.hour_height(),
                ),
            Vec2::new(self.column_width, self.hour_height()),
        )
    }

    /// Translated copy, e.g. after the viewport scrolled.
    pub fn with_origin(self, origin: Pos2) -> Self {
        Self { origin, ..self }
    }
}

impl CellHitTest for GridLayout {
    fn cell_at(&self, pos: Pos2) -> Option<CellCoord> {
        if self.column_width <= 0.0 || self.quarter_height <= 0.0 {
            return None;
        }

        let local = pos - self.origin;
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }

        let date = (local.x / self.column_width).floor() as usize;
        let row = (local.y / self.quarter_height).floor() as usize;
        let coord = CellCoord::new(row / QUARTERS_PER_HOUR, row % QUARTERS_PER_HOUR, date);
        self.shape.contains(coord).then_some(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::window::DisplayWindow;

    fn layout() -> GridLayout {
        GridLayout::new(
            Pos2::new(50.0, 20.0),
            64.0,
            16.0,
            GridShape::new(3, DisplayWindow::default()),
        )
    }

    #[test]
    fn test_cell_at_maps_rows_and_columns() {
        let layout = layout();
        assert_eq!(layout.cell_at(Pos2::new(51.0, 21.0)), Some(CellCoord::new(0, 0, 0)));
        // Second column, hour 1 quarter 2 -> row 6
        assert_eq!(layout.cell_at(Pos2::new(120.0, 20.0 + 6.0 * 16.0 + 3.0)), Some(CellCoord::new(1, 2, 1)));
    }

    #[test]
    fn test_cell_at_outside_grid() {
        let layout = layout();
        assert_eq!(layout.cell_at(Pos2::new(10.0, 30.0)), None);
        assert_eq!(layout.cell_at(Pos2::new(50.0 + 3.0 * 64.0 + 1.0, 30.0)), None);
        assert_eq!(layout.cell_at(Pos2::new(60.0, 20.0 + 18.0 * 64.0 + 1.0)), None);
    }

    #[test]
    fn test_cell_rect_roundtrips_through_hit_test() {
        let layout = layout();
        let coord = CellCoord::new(7, 3, 2);
        assert_eq!(layout.cell_at(layout.cell_rect(coord).center()), Some(coord));
    }

    #[test]
    fn test_hour_block_rect_spans_four_quarters() {
        let layout = layout();
        let rect = layout.hour_block_rect(HourBlockKey::new(2, 1));
        assert_eq!(rect.height(), 64.0);
        assert_eq!(rect.min, layout.cell_rect(CellCoord::new(2, 0, 1)).min);
        assert_eq!(rect.max, layout.cell_rect(CellCoord::new(2, 3, 1)).max);
    }

    #[test]
    fn test_content_size() {
        assert_eq!(layout().content_size(), Vec2::new(192.0, 18.0 * 64.0));
    }
}

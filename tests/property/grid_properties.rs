// Property-based tests for the grid engine
// Index arithmetic, range symmetry, sweep idempotence and heat brackets

use std::time::{Duration, Instant};

use meet_grid::grid::drag::{sweep, DragMode};
use meet_grid::grid::marks::CompletedMarks;
use meet_grid::grid::range::{is_in_range, CellRange};
use meet_grid::grid::selection::CellSelection;
use meet_grid::models::cell::{cell_index, decompose, CellCoord};
use meet_grid::models::window::{DisplayWindow, GridShape};
use meet_grid::services::heatmap::{classify, HeatLevel, HeatView};
use proptest::prelude::*;

const HOURS: usize = 18;

fn coord(date_count: usize) -> impl Strategy<Value = CellCoord> {
    (0..HOURS, 0..4usize, 0..date_count).prop_map(|(hour, quarter, date)| CellCoord::new(hour, quarter, date))
}

fn coords_with_dates() -> impl Strategy<Value = (usize, CellCoord, CellCoord)> {
    (1..8usize).prop_flat_map(|date_count| (Just(date_count), coord(date_count), coord(date_count)))
}

proptest! {
    /// Property: decomposing a cell index yields the same coordinate
    #[test]
    fn prop_index_roundtrip(date_count in 1..12usize, hour in 0..HOURS, quarter in 0..4usize, seed in 0..12usize) {
        let date = seed % date_count;
        let index = cell_index(hour, quarter, date, date_count);
        prop_assert_eq!(decompose(index, date_count), Some(CellCoord::new(hour, quarter, date)));
    }

    /// Property: the time span of a drag does not depend on its direction
    #[test]
    fn prop_range_is_symmetric((_, a, b) in coords_with_dates(), hour in 0..HOURS, quarter in 0..4usize) {
        prop_assert_eq!(is_in_range(hour, quarter, a, b), is_in_range(hour, quarter, b, a));
    }

    /// Property: both endpoints are always inside their own range
    #[test]
    fn prop_range_contains_endpoints((_, a, b) in coords_with_dates()) {
        let range = CellRange::new(a, b);
        prop_assert!(range.contains(a));
        prop_assert!(range.contains(b));
    }

    /// Property: a second sweep over the same range toggles nothing, and the
    /// range ends up uniformly in the mode's target state
    #[test]
    fn prop_sweep_is_idempotent(
        (date_count, a, b) in coords_with_dates(),
        preselected in proptest::collection::vec(0..(HOURS * 4 * 8), 0..40),
        select in any::<bool>(),
    ) {
        let shape = GridShape::new(date_count, DisplayWindow::default());
        let mut selection: CellSelection = preselected
            .into_iter()
            .filter(|index| *index < shape.cell_count())
            .collect();
        let mut marks = CompletedMarks::new(Duration::from_millis(300));
        let mode = if select { DragMode::Select } else { DragMode::Deselect };
        let range = CellRange::new(a, b);
        let now = Instant::now();

        sweep(&shape, range, mode, &mut selection, &mut marks, now);
        prop_assert_eq!(sweep(&shape, range, mode, &mut selection, &mut marks, now), 0);
        for cell in range.cells() {
            prop_assert_eq!(selection.contains(shape.index_of(cell)), mode.target_selected());
        }
    }

    /// Property: heat brackets never decrease as the count grows
    #[test]
    fn prop_heat_levels_are_monotonic(max in 2..50usize, count in 0..50usize) {
        let count = count.min(max);
        let level = classify(count, max, HeatView::Group);
        if count < max {
            prop_assert!(classify(count + 1, max, HeatView::Group) >= level);
        }
        prop_assert_eq!(level == HeatLevel::Empty, count == 0);
        prop_assert_eq!(level == HeatLevel::Full, count == max);
    }

    /// Property: the three-quarters and one-quarter marks land in their brackets
    #[test]
    fn prop_quarter_marks(quarters in 1..20usize) {
        let max = quarters * 4;
        prop_assert_eq!(classify(quarters, max, HeatView::Group), HeatLevel::Low);
        prop_assert_eq!(classify(quarters * 3, max, HeatView::Group), HeatLevel::VeryHigh);
    }
}

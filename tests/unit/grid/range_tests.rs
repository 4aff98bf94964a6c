// Unit tests for drag range geometry
// Parameterized over anchor/current pairs

use meet_grid::grid::range::{is_in_range, CellRange};
use meet_grid::models::cell::CellCoord;
use test_case::test_case;

fn c(hour: usize, quarter: usize, date: usize) -> CellCoord {
    CellCoord::new(hour, quarter, date)
}

#[test_case(c(2, 0, 0), c(2, 3, 0), 4 ; "one full hour")]
#[test_case(c(2, 3, 0), c(2, 0, 0), 4 ; "one full hour upward")]
#[test_case(c(1, 2, 0), c(2, 1, 0), 4 ; "across an hour boundary")]
#[test_case(c(0, 0, 0), c(3, 3, 2), 48 ; "four hours by three dates")]
#[test_case(c(5, 1, 4), c(5, 1, 4), 1 ; "single cell")]
fn test_cell_count(anchor: CellCoord, current: CellCoord, expected: usize) {
    assert_eq!(CellRange::new(anchor, current).cells().count(), expected);
}

#[test_case(1, 1 => false ; "before anchor quarter")]
#[test_case(1, 2 => true ; "anchor quarter")]
#[test_case(2, 0 => true ; "middle hour")]
#[test_case(3, 1 => true ; "current quarter")]
#[test_case(3, 2 => false ; "after current quarter")]
#[test_case(4, 0 => false ; "outside hours")]
fn test_boundary_quarters(hour: usize, quarter: usize) -> bool {
    is_in_range(hour, quarter, c(1, 2, 0), c(3, 1, 0))
}

#[test]
fn test_cells_are_hour_major() {
    let cells: Vec<_> = CellRange::new(c(0, 3, 1), c(1, 0, 0)).cells().collect();
    assert_eq!(cells, vec![c(0, 3, 0), c(0, 3, 1), c(1, 0, 0), c(1, 0, 1)]);
}

#[test]
fn test_dates_between_endpoints_are_included() {
    let range = CellRange::new(c(0, 0, 4), c(0, 0, 1));
    assert_eq!(range.dates(), 1..=4);
    assert!(range.contains(c(0, 0, 3)));
    assert!(!range.contains(c(0, 0, 5)));
}

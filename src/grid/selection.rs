//! The caller-owned selection set and the predicates the engine reads from it.
//!
//! The engine never writes a selection directly: every change is one
//! `toggle` request for one cell index.

use std::collections::BTreeSet;

use crate::models::cell::{CellCoord, HourBlockKey};

/// Access to the externally owned selection set.
#[cfg_attr(test, mockall::automock)]
pub trait SelectionStore {
    fn is_selected(&self, index: usize) -> bool;
    /// Flip the presence of one cell index.
    fn toggle(&mut self, index: usize);
}

/// Ordered set of selected cell indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellSelection {
    cells: BTreeSet<usize>,
}

impl CellSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.cells.contains(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

impl FromIterator<usize> for CellSelection {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl SelectionStore for CellSelection {
    fn is_selected(&self, index: usize) -> bool {
        self.cells.contains(&index)
    }

    fn toggle(&mut self, index: usize) {
        if !self.cells.remove(&index) {
            self.cells.insert(index);
        }
    }
}

pub fn is_cell_selected(store: &dyn SelectionStore, coord: CellCoord, date_count: usize) -> bool {
    store.is_selected(coord.index(date_count))
}

/// All four quarters of the block are selected.
pub fn is_hour_fully_selected(
    store: &dyn SelectionStore,
    block: HourBlockKey,
    date_count: usize,
) -> bool {
    block
        .cells()
        .all(|cell| store.is_selected(cell.index(date_count)))
}

/// Toggling `coord` right now would leave its hour block uniformly selected
/// (the other three quarters are selected and this one is not) or uniformly
/// empty (the other three are empty and this one is selected).
///
/// Must be evaluated before the toggle is requested.
pub fn toggle_completes_block(
    store: &dyn SelectionStore,
    coord: CellCoord,
    date_count: usize,
) -> bool {
    let selected = store.is_selected(coord.index(date_count));
    let mut others = coord
        .hour_block()
        .cells()
        .filter(|cell| cell.quarter != coord.quarter)
        .map(|cell| store.is_selected(cell.index(date_count)));

    // Selecting needs the other three selected, deselecting needs them empty
    others.all(|other| other != selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATES: usize = 2;

    fn select(coords: &[CellCoord]) -> CellSelection {
        coords.iter().map(|c| c.index(DATES)).collect()
    }

    #[test]
    fn test_toggle_flips_presence() {
        let mut selection = CellSelection::new();
        selection.toggle(7);
        assert!(selection.is_selected(7));
        selection.toggle(7);
        assert!(!selection.is_selected(7));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_iterates_in_index_order() {
        let selection: CellSelection = [9, 2, 5].into_iter().collect();
        assert_eq!(selection.to_vec(), vec![2, 5, 9]);
    }

    #[test]
    fn test_fully_selected_block() {
        let block = HourBlockKey::new(1, 1);
        let all: Vec<_> = block.cells().collect();
        let selection = select(&all);
        assert!(is_hour_fully_selected(&selection, block, DATES));
        assert!(!is_hour_fully_selected(&selection, HourBlockKey::new(1, 0), DATES));
    }

    #[test]
    fn test_last_quarter_completes_selection() {
        let selection = select(&[
            CellCoord::new(0, 0, 0),
            CellCoord::new(0, 1, 0),
            CellCoord::new(0, 3, 0),
        ]);
        assert!(toggle_completes_block(&selection, CellCoord::new(0, 2, 0), DATES));
        assert!(!toggle_completes_block(&selection, CellCoord::new(0, 0, 0), DATES));
    }

    #[test]
    fn test_last_quarter_completes_deselection() {
        let selection = select(&[CellCoord::new(0, 2, 0)]);
        assert!(toggle_completes_block(&selection, CellCoord::new(0, 2, 0), DATES));
        assert!(!toggle_completes_block(&selection, CellCoord::new(0, 1, 0), DATES));
    }

    #[test]
    fn test_mock_store_is_only_read() {
        let mut store = MockSelectionStore::new();
        store.expect_is_selected().returning(|index| index != 0);
        store.expect_toggle().never();
        assert!(toggle_completes_block(&store, CellCoord::new(0, 0, 0), 1));
    }
}

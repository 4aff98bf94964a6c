//! Single-cell toggles: desktop clicks, touch taps and the immediate
//! touch-start path used on touch-primary devices.

use std::time::Instant;

use super::gesture::Propagation;
use super::marks::CompletedMarks;
use super::selection::{toggle_completes_block, SelectionStore};
use crate::models::cell::CellCoord;
use crate::models::window::GridShape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapOutcome {
    pub index: usize,
    /// The toggle left its hour block uniformly selected or uniformly empty.
    pub completed_block: bool,
}

pub struct TapHandler;

impl TapHandler {
    /// Toggle one cell. Disabled or off-grid cells are ignored.
    pub fn tap(
        shape: &GridShape,
        coord: CellCoord,
        store: &mut dyn SelectionStore,
        marks: &mut CompletedMarks,
        now: Instant,
    ) -> Option<TapOutcome> {
        if !shape.is_enabled(coord) {
            log::trace!("Ignoring tap on disabled cell {:?}", coord);
            return None;
        }

        let index = shape.index_of(coord);
        let completed_block = toggle_completes_block(store, coord, shape.date_count);
        store.toggle(index);

        if completed_block {
            marks.mark(coord.hour_block(), now);
        }

        Some(TapOutcome {
            index,
            completed_block,
        })
    }

    /// Touch-start toggle for touch-primary devices. Applies immediately
    /// instead of waiting for touch-end, and always asks the host to
    /// suppress scrolling and double-tap zoom.
    pub fn mobile_tap(
        shape: &GridShape,
        coord: CellCoord,
        store: &mut dyn SelectionStore,
        marks: &mut CompletedMarks,
        now: Instant,
    ) -> (Option<TapOutcome>, Propagation) {
        let outcome = Self::tap(shape, coord, store, marks, now);
        (outcome, Propagation::PreventDefault)
    }
}

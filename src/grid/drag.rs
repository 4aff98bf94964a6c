//! Drag selection state machine.
//!
//! `Idle -> Anchored` on a press over an enabled cell, `Anchored -> Dragging`
//! once the orchestrator sees enough pointer travel, and back to `Idle` on
//! release (with a final range sweep) or cancel (without one).
//!
//! The drag mode is fixed at the press: starting on a selected cell erases,
//! starting on an empty cell paints. Sweeps only toggle cells whose state
//! disagrees with the mode, so re-entering cells and repeated sweeps never
//! flip anything twice.

use std::collections::BTreeSet;
use std::time::Instant;

use super::gesture::PointerKind;
use super::marks::CompletedMarks;
use super::range::CellRange;
use super::selection::{is_hour_fully_selected, SelectionStore};
use super::tap::TapHandler;
use crate::models::cell::{quarter_from_offset, CellCoord, HourBlockKey};
use crate::models::window::GridShape;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    Select,
    Deselect,
}

impl DragMode {
    /// Paint from an empty anchor, erase from a selected one.
    pub fn for_anchor(anchor_selected: bool) -> Self {
        if anchor_selected {
            DragMode::Deselect
        } else {
            DragMode::Select
        }
    }

    /// Selection state every swept cell should end up in.
    pub fn target_selected(self) -> bool {
        self == DragMode::Select
    }

    pub fn needs_toggle(self, is_selected: bool) -> bool {
        is_selected != self.target_selected()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Pressed on a cell, not yet confirmed as a drag.
    Anchored,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveDrag {
    anchor: CellCoord,
    current: CellCoord,
    mode: DragMode,
    dragging: bool,
    /// The anchor cell was already toggled at press time.
    anchor_applied: bool,
}

impl ActiveDrag {
    fn range(&self) -> CellRange {
        CellRange::new(self.anchor, self.current)
    }
}

/// Summary of a finished drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragOutcome {
    pub range: CellRange,
    pub mode: DragMode,
    /// Whether the gesture ever became a drag.
    pub dragged: bool,
    /// Toggles requested by the release sweep.
    pub release_toggles: usize,
}

#[derive(Debug, Clone, Default)]
pub struct DragSelectionEngine {
    active: Option<ActiveDrag>,
}

impl DragSelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press on a cell. Mouse presses toggle the anchor immediately so a click
    /// without movement counts; touch presses defer until tap or drag is known.
    pub fn on_cell_down(
        &mut self,
        shape: &GridShape,
        coord: CellCoord,
        kind: PointerKind,
        store: &mut dyn SelectionStore,
        marks: &mut CompletedMarks,
        now: Instant,
    ) -> bool {
        if !shape.is_enabled(coord) {
            return false;
        }

        let mode = DragMode::for_anchor(store.is_selected(shape.index_of(coord)));
        self.active = Some(ActiveDrag {
            anchor: coord,
            current: coord,
            mode,
            dragging: false,
            anchor_applied: kind == PointerKind::Mouse,
        });
        log::debug!("Drag anchored at {:?} in {:?} mode ({:?})", coord, mode, kind);

        if kind == PointerKind::Mouse {
            TapHandler::tap(shape, coord, store, marks, now);
        }
        true
    }

    /// Press on a collapsed, fully selected hour block. Always erases,
    /// anchored at the quarter under the pointer, and opens that quarter
    /// right away. Mouse presses start dragging immediately.
    #[allow(clippy::too_many_arguments)]
    pub fn on_full_hour_down(
        &mut self,
        shape: &GridShape,
        block: HourBlockKey,
        offset_y: f32,
        block_height: f32,
        kind: PointerKind,
        store: &mut dyn SelectionStore,
        marks: &mut CompletedMarks,
        now: Instant,
    ) -> Option<CellCoord> {
        let coord = CellCoord::new(block.hour, quarter_from_offset(offset_y, block_height), block.date);
        if !shape.is_enabled(coord) {
            return None;
        }

        if !is_hour_fully_selected(store, block, shape.date_count) {
            log::trace!("Hour block {:?} is not fully selected, treating as a cell press", block);
            return self
                .on_cell_down(shape, coord, kind, store, marks, now)
                .then_some(coord);
        }

        self.active = Some(ActiveDrag {
            anchor: coord,
            current: coord,
            mode: DragMode::Deselect,
            dragging: kind == PointerKind::Mouse,
            anchor_applied: true,
        });
        log::debug!("Opening hour block {:?} at quarter {}", block, coord.quarter);

        TapHandler::tap(shape, coord, store, marks, now);
        Some(coord)
    }

    /// Promote an anchored press to a drag. No-op in any other phase.
    pub fn confirm_drag(&mut self) -> bool {
        match self.active.as_mut() {
            Some(active) if !active.dragging => {
                active.dragging = true;
                log::debug!("Drag confirmed from {:?}", active.anchor);
                true
            }
            _ => false,
        }
    }

    /// Pointer entered `coord` during a drag: extend the range and bring every
    /// covered cell in line with the drag mode. Returns the number of toggles.
    pub fn on_move(
        &mut self,
        shape: &GridShape,
        coord: CellCoord,
        store: &mut dyn SelectionStore,
        marks: &mut CompletedMarks,
        now: Instant,
    ) -> usize {
        let Some(active) = self.active.as_mut() else {
            return 0;
        };
        if !active.dragging || !shape.contains(coord) {
            return 0;
        }

        active.current = coord;
        let (range, mode) = (active.range(), active.mode);
        let toggles = sweep(shape, range, mode, store, marks, now);
        if toggles > 0 {
            log::trace!("Drag sweep to {:?} toggled {} cells", coord, toggles);
        }
        toggles
    }

    /// Finish the gesture. A confirmed drag gets a final sweep over the whole
    /// range to catch cells skipped by fast pointer movement.
    pub fn on_release(
        &mut self,
        shape: &GridShape,
        store: &mut dyn SelectionStore,
        marks: &mut CompletedMarks,
        now: Instant,
    ) -> Option<DragOutcome> {
        let active = self.active.take()?;
        let range = active.range();

        let release_toggles = if active.dragging {
            sweep(shape, range, active.mode, store, marks, now)
        } else {
            0
        };

        log::debug!(
            "Drag released: {:?} {:?}..{:?}, {} late toggles",
            active.mode,
            range.anchor(),
            range.current(),
            release_toggles
        );

        Some(DragOutcome {
            range,
            mode: active.mode,
            dragged: active.dragging,
            release_toggles,
        })
    }

    /// Drop all transient state without sweeping.
    pub fn on_cancel(&mut self) {
        if let Some(active) = self.active.take() {
            log::debug!("Drag cancelled at {:?}", active.current);
        }
    }

    pub fn phase(&self) -> DragPhase {
        match self.active {
            None => DragPhase::Idle,
            Some(ActiveDrag { dragging: false, .. }) => DragPhase::Anchored,
            Some(ActiveDrag { dragging: true, .. }) => DragPhase::Dragging,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.phase() == DragPhase::Dragging
    }

    pub fn is_anchored(&self) -> bool {
        self.phase() == DragPhase::Anchored
    }

    pub fn mode(&self) -> Option<DragMode> {
        self.active.map(|active| active.mode)
    }

    pub fn anchor(&self) -> Option<CellCoord> {
        self.active.map(|active| active.anchor)
    }

    /// Anchor of a press whose toggle is still deferred to the release tap.
    pub fn pending_tap_anchor(&self) -> Option<CellCoord> {
        self.active
            .filter(|active| !active.dragging && !active.anchor_applied)
            .map(|active| active.anchor)
    }

    pub fn current(&self) -> Option<CellCoord> {
        self.active.map(|active| active.current)
    }

    pub fn range(&self) -> Option<CellRange> {
        self.active.map(|active| active.range())
    }

    /// Drag preview: the cell lies inside an active drag's rectangle.
    pub fn is_in_drag_selection(&self, coord: CellCoord) -> bool {
        match self.active {
            Some(active) if active.dragging => active.range().contains(coord),
            _ => false,
        }
    }
}

/// Toggle every enabled cell in `range` that disagrees with `mode`.
/// Each hour block brought to a uniform state by this sweep is marked once.
pub fn sweep(
    shape: &GridShape,
    range: CellRange,
    mode: DragMode,
    store: &mut dyn SelectionStore,
    marks: &mut CompletedMarks,
    now: Instant,
) -> usize {
    let mut toggles = 0;
    let mut touched: BTreeSet<HourBlockKey> = BTreeSet::new();

    for coord in range.cells().filter(|coord| shape.is_enabled(*coord)) {
        let index = shape.index_of(coord);
        if mode.needs_toggle(store.is_selected(index)) {
            store.toggle(index);
            toggles += 1;
            touched.insert(coord.hour_block());
        }
    }

    for block in touched {
        let uniform = block
            .cells()
            .all(|cell| !mode.needs_toggle(store.is_selected(shape.index_of(cell))));
        if uniform {
            marks.mark(block, now);
        }
    }

    toggles
}

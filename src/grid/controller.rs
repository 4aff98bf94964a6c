//! Grid interaction orchestrator.
//!
//! Composes device detection, swipe routing, drag selection, taps and
//! auto-scroll behind the handlers a rendering layer attaches to cells and
//! to its scroll container, and exposes the state that layer needs to draw
//! drag previews and completion pulses.
//!
//! Host-wide pointer events arrive through an [`EventSource`] subscription
//! taken in [`GridInteraction::mount`] and released in
//! [`GridInteraction::unmount`]; the host calls [`GridInteraction::pump`]
//! from its event loop to deliver them.

use std::time::{Duration, Instant};

use egui::{Pos2, Rect};

use super::auto_scroll::{AutoScrollConfig, AutoScrollController, ScrollViewport};
use super::device::{DeviceDetector, DeviceSignals};
use super::drag::{DragMode, DragPhase, DragSelectionEngine};
use super::events::{EventSource, GlobalEvent, ListenerKind, SubscriptionId};
use super::gesture::{GestureState, PointerInput, PointerKind, Propagation};
use super::layout::CellHitTest;
use super::marks::CompletedMarks;
use super::range::CellRange;
use super::selection::SelectionStore;
use super::swipe::SwipeRouter;
use super::tap::TapHandler;
use crate::models::cell::{quarter_from_offset, CellCoord, HourBlockKey};
use crate::models::settings::GridSettings;
use crate::models::window::GridShape;

const GLOBAL_LISTENERS: &[ListenerKind] = &[
    ListenerKind::PointerMove,
    ListenerKind::PointerUp,
    ListenerKind::PointerCancel,
    ListenerKind::Resize,
    ListenerKind::Tick,
];

/// Collaborators owned by the host, borrowed for the duration of one callback.
pub struct GridHost<'a> {
    pub selection: &'a mut dyn SelectionStore,
    pub viewport: &'a mut dyn ScrollViewport,
    /// Hit testing over the unscrolled grid, origin at the viewport's top-left.
    pub hit_test: &'a dyn CellHitTest,
    pub signals: &'a dyn DeviceSignals,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct GestureThresholds {
    drag_px: f32,
    tap_max: Duration,
}

#[derive(Debug)]
pub struct GridInteraction {
    thresholds: GestureThresholds,
    shape: GridShape,
    read_only: bool,
    device: DeviceDetector,
    auto_scroll: AutoScrollController,
    swipe: SwipeRouter,
    drag: DragSelectionEngine,
    gesture: Option<GestureState>,
    marks: CompletedMarks,
    subscription: Option<SubscriptionId>,
}

impl GridInteraction {
    pub fn new(shape: GridShape, settings: &GridSettings, signals: &dyn DeviceSignals) -> Self {
        Self {
            thresholds: GestureThresholds {
                drag_px: settings.drag_threshold_px,
                tap_max: settings.tap_max_duration(),
            },
            shape,
            read_only: false,
            device: DeviceDetector::new(signals),
            auto_scroll: AutoScrollController::new(AutoScrollConfig::from_settings(settings)),
            swipe: SwipeRouter::new(settings.swipe_threshold_px),
            drag: DragSelectionEngine::new(),
            gesture: None,
            marks: CompletedMarks::new(settings.completion_pulse()),
            subscription: None,
        }
    }

    /// Read-only grids (the heatmap) ignore every input handler.
    pub fn set_read_only(&mut self, read_only: bool) {
        if read_only && !self.read_only {
            self.cancel_gesture();
        }
        self.read_only = read_only;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Swap in new grid dimensions; any in-flight gesture is cancelled.
    pub fn set_shape(&mut self, shape: GridShape) {
        if shape != self.shape {
            self.cancel_gesture();
            self.marks.clear();
            self.shape = shape;
        }
    }

    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    // --- lifecycle ---------------------------------------------------------

    pub fn mount(&mut self, source: &mut dyn EventSource) {
        if self.subscription.is_none() {
            self.subscription = Some(source.subscribe(GLOBAL_LISTENERS));
            log::debug!("Grid interaction mounted");
        }
    }

    /// Remove global listeners and drop all transient state, including the
    /// auto-scroll loop.
    pub fn unmount(&mut self, source: &mut dyn EventSource) {
        if let Some(id) = self.subscription.take() {
            source.unsubscribe(id);
            log::debug!("Grid interaction unmounted");
        }
        self.cancel_gesture();
        self.marks.clear();
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Deliver every queued global event. Returns `PreventDefault` if any
    /// handler asked for it.
    pub fn pump(&mut self, source: &mut dyn EventSource, host: &mut GridHost<'_>) -> Propagation {
        let Some(id) = self.subscription else {
            return Propagation::Continue;
        };

        let mut propagation = Propagation::Continue;
        while let Some(event) = source.poll(id) {
            if self.handle_global(event, host).prevents_default() {
                propagation = Propagation::PreventDefault;
            }
        }
        propagation
    }

    pub fn handle_global(&mut self, event: GlobalEvent, host: &mut GridHost<'_>) -> Propagation {
        match event {
            GlobalEvent::PointerMove { kind, pos, at } => self.on_pointer_move(kind, pos, at, host),
            GlobalEvent::PointerUp { at, .. } => {
                self.on_pointer_up(at, host);
                Propagation::Continue
            }
            GlobalEvent::PointerCancel { .. } => {
                self.cancel_gesture();
                Propagation::Continue
            }
            GlobalEvent::Resize { .. } => {
                self.device.refresh(host.signals);
                Propagation::Continue
            }
            GlobalEvent::Tick { at } => {
                self.on_tick(at, host);
                Propagation::Continue
            }
        }
    }

    // --- cell and container handlers -----------------------------------------

    /// Press on a single quarter cell.
    pub fn cell_down(&mut self, coord: CellCoord, input: PointerInput, host: &mut GridHost<'_>) -> Propagation {
        if self.read_only || !self.shape.is_enabled(coord) {
            return Propagation::Continue;
        }
        self.begin_gesture(input, host.viewport);

        if input.kind == PointerKind::Touch && self.device.is_touch_primary() {
            let (_, propagation) =
                TapHandler::mobile_tap(&self.shape, coord, host.selection, &mut self.marks, input.at);
            return propagation;
        }

        self.drag.on_cell_down(
            &self.shape,
            coord,
            input.kind,
            host.selection,
            &mut self.marks,
            input.at,
        );

        match input.kind {
            PointerKind::Touch => Propagation::PreventDefault,
            PointerKind::Mouse => Propagation::Continue,
        }
    }

    /// Press on a collapsed, fully selected hour block drawn at `block_rect`.
    pub fn full_hour_down(
        &mut self,
        block: HourBlockKey,
        block_rect: Rect,
        input: PointerInput,
        host: &mut GridHost<'_>,
    ) -> Propagation {
        if self.read_only {
            return Propagation::Continue;
        }
        let offset_y = input.pos.y - block_rect.top();

        if input.kind == PointerKind::Touch && self.device.is_touch_primary() {
            let coord = CellCoord::new(
                block.hour,
                quarter_from_offset(offset_y, block_rect.height()),
                block.date,
            );
            if !self.shape.is_enabled(coord) {
                return Propagation::Continue;
            }
            self.begin_gesture(input, host.viewport);
            let (_, propagation) =
                TapHandler::mobile_tap(&self.shape, coord, host.selection, &mut self.marks, input.at);
            return propagation;
        }

        self.begin_gesture(input, host.viewport);
        let opened = self.drag.on_full_hour_down(
            &self.shape,
            block,
            offset_y,
            block_rect.height(),
            input.kind,
            host.selection,
            &mut self.marks,
            input.at,
        );
        if opened.is_none() {
            self.cancel_gesture();
            return Propagation::Continue;
        }
        Propagation::PreventDefault
    }

    /// Pointer entered a cell while a drag is active.
    pub fn cell_enter(&mut self, coord: CellCoord, at: Instant, host: &mut GridHost<'_>) {
        if self.read_only || !self.drag.is_dragging() {
            return;
        }
        self.drag
            .on_move(&self.shape, coord, host.selection, &mut self.marks, at);
    }

    /// Press anywhere on the scroll container. Starts swipe tracking when no
    /// cell handler already started a gesture.
    pub fn container_down(&mut self, input: PointerInput, host: &mut GridHost<'_>) {
        if self.read_only || self.gesture.is_some() {
            return;
        }
        self.begin_gesture(input, host.viewport);
    }

    // --- global handlers ---------------------------------------------------

    fn on_pointer_move(&mut self, kind: PointerKind, pos: Pos2, at: Instant, host: &mut GridHost<'_>) -> Propagation {
        if self.read_only {
            return Propagation::Continue;
        }
        let Some(gesture) = self.gesture.as_mut() else {
            return Propagation::Continue;
        };
        let moved = gesture.track_move(pos, self.thresholds.drag_px);

        if kind == PointerKind::Touch {
            if self.swipe.on_move(pos, self.drag.is_dragging(), host.viewport) {
                return Propagation::PreventDefault;
            }
            if self.device.is_touch_primary() {
                return Propagation::Continue;
            }
        }

        if self.drag.is_anchored() && moved && !self.swipe.is_horizontal() {
            self.drag.confirm_drag();
        }

        if self.drag.is_dragging() {
            self.auto_scroll.update(pos, host.viewport.bounds());
            if let Some(coord) = cell_under(pos, host) {
                self.drag
                    .on_move(&self.shape, coord, host.selection, &mut self.marks, at);
            }
            return match kind {
                PointerKind::Touch => Propagation::PreventDefault,
                PointerKind::Mouse => Propagation::Continue,
            };
        }

        if kind == PointerKind::Mouse && self.swipe.on_move(pos, false, host.viewport) {
            return Propagation::PreventDefault;
        }
        Propagation::Continue
    }

    /// Scroll one step, then extend the drag to whatever cell the content
    /// moved under the held pointer.
    fn on_tick(&mut self, at: Instant, host: &mut GridHost<'_>) {
        let scrolled = self.auto_scroll.tick(host.viewport);
        if scrolled && self.drag.is_dragging() {
            let held = self.gesture.as_ref().map(GestureState::last_pos);
            if let Some(coord) = held.and_then(|pos| cell_under(pos, &*host)) {
                self.drag
                    .on_move(&self.shape, coord, host.selection, &mut self.marks, at);
            }
        }
        self.marks.expire(at);
    }

    /// Release anywhere in the window finalizes the gesture.
    fn on_pointer_up(&mut self, at: Instant, host: &mut GridHost<'_>) {
        let Some(gesture) = self.gesture.take() else {
            self.swipe.end();
            return;
        };

        let touch = gesture.kind() == PointerKind::Touch;
        if touch && self.device.is_touch_primary() && !self.drag.is_dragging() {
            // Mobile taps were applied at touch start
            self.drag.on_cancel();
        } else {
            if touch && gesture.is_tap(at, self.thresholds.tap_max) {
                if let Some(anchor) = self.drag.pending_tap_anchor() {
                    TapHandler::tap(&self.shape, anchor, host.selection, &mut self.marks, at);
                }
            }
            self.drag
                .on_release(&self.shape, host.selection, &mut self.marks, at);
        }

        self.auto_scroll.stop();
        self.swipe.end();
    }

    fn begin_gesture(&mut self, input: PointerInput, viewport: &dyn ScrollViewport) {
        if self.gesture.is_some() {
            // Missed release from an earlier gesture
            self.cancel_gesture();
        }
        self.gesture = Some(GestureState::start(input));
        self.swipe.start(input.pos, viewport);
    }

    fn cancel_gesture(&mut self) {
        self.drag.on_cancel();
        self.auto_scroll.stop();
        self.swipe.end();
        self.gesture = None;
    }

    // --- render state ------------------------------------------------------

    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn drag_mode(&self) -> Option<DragMode> {
        self.drag.mode()
    }

    pub fn drag_range(&self) -> Option<CellRange> {
        self.drag.range()
    }

    pub fn is_in_drag_selection(&self, coord: CellCoord) -> bool {
        self.drag.is_in_drag_selection(coord)
    }

    pub fn completed_marks(&self) -> &CompletedMarks {
        &self.marks
    }

    /// Whether to play the completion pulse on a block right now.
    pub fn was_just_completed(&self, block: HourBlockKey) -> bool {
        !self.drag.is_dragging() && self.marks.contains(block)
    }

    pub fn is_touch_primary(&self) -> bool {
        self.device.is_touch_primary()
    }

    pub fn is_horizontal_swiping(&self) -> bool {
        self.swipe.is_horizontal()
    }

    pub fn has_active_gesture(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.auto_scroll.is_running()
    }

    /// Hosts should keep delivering `Tick` events at this interval while
    /// [`GridInteraction::needs_ticks`] is true.
    pub fn tick_interval(&self) -> Duration {
        self.auto_scroll.tick_interval()
    }

    pub fn needs_ticks(&self) -> bool {
        self.auto_scroll.is_running() || !self.marks.is_empty()
    }
}

/// Cell under a screen position, following the live scroll offset.
fn cell_under(pos: Pos2, host: &GridHost<'_>) -> Option<CellCoord> {
    host.hit_test.cell_at(pos + host.viewport.scroll_offset())
}

impl Drop for GridInteraction {
    fn drop(&mut self) {
        if self.subscription.is_some() {
            log::warn!("Grid interaction dropped without unmount; host listeners still registered");
        }
    }
}

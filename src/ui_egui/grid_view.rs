//! Egui host for the availability grid.
//!
//! Paints the grid into a clipped viewport with a horizontally mirrored date
//! header and a vertically mirrored hour column, translates raw egui input
//! into presses and [`GlobalEvent`]s for the interaction engine, and keeps a
//! repaint scheduled while auto-scroll or a completion pulse is running.

use std::time::Instant;

use chrono::NaiveDate;
use egui::{Align2, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use super::theme::GridTheme;
use crate::grid::auto_scroll::ScrollViewport;
use crate::grid::controller::{GridHost, GridInteraction};
use crate::grid::device::DeviceSignals;
use crate::grid::events::{EventBus, GlobalEvent};
use crate::grid::gesture::{PointerInput, PointerKind, Propagation};
use crate::grid::layout::{CellHitTest, GridLayout};
use crate::grid::selection::{is_hour_fully_selected, CellSelection, SelectionStore};
use crate::models::cell::{CellCoord, HourBlockKey, QUARTERS_PER_HOUR};
use crate::models::settings::GridSettings;
use crate::models::window::GridShape;
use crate::services::heatmap::Heatmap;
use crate::utils::date::{format_date, hour_label};

pub const TIME_LABEL_WIDTH: f32 = 64.0;
pub const HEADER_HEIGHT: f32 = 32.0;
pub const COLUMN_WIDTH: f32 = 96.0;
pub const QUARTER_HEIGHT: f32 = 14.0;

/// What the grid shows and whether it accepts input.
#[derive(Debug, Clone, Copy)]
pub enum GridMode<'a> {
    Edit,
    Heatmap(&'a Heatmap),
}

/// Device signals gathered from what egui has seen so far.
#[derive(Debug, Default)]
pub struct EguiDeviceSignals {
    touch_seen: bool,
}

impl EguiDeviceSignals {
    /// Record that a touch event arrived. Returns true the first time.
    pub fn observe_touch(&mut self) -> bool {
        !std::mem::replace(&mut self.touch_seen, true)
    }
}

impl DeviceSignals for EguiDeviceSignals {
    fn has_touch_support(&self) -> bool {
        self.touch_seen
    }

    fn max_touch_points(&self) -> u32 {
        u32::from(self.touch_seen)
    }

    fn user_agent(&self) -> Option<String> {
        let agent = match std::env::consts::OS {
            "android" => "Android",
            "ios" => "iPhone OS",
            other => other,
        };
        Some(agent.to_string())
    }
}

/// Scroll state of the grid body. Offsets set by the engine are clamped to
/// the scrollable extent and take effect on the next paint.
#[derive(Debug, Clone)]
pub struct EguiViewport {
    bounds: Rect,
    offset: Vec2,
    content: Vec2,
    header_scroll: f32,
}

impl Default for EguiViewport {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            offset: Vec2::ZERO,
            content: Vec2::ZERO,
            header_scroll: 0.0,
        }
    }
}

impl EguiViewport {
    fn set_frame(&mut self, bounds: Rect, content: Vec2) {
        self.bounds = bounds;
        self.content = content;
        self.set_scroll_offset(self.offset);
    }

    fn max_offset(&self) -> Vec2 {
        (self.content - self.bounds.size()).max(Vec2::ZERO)
    }

    /// Horizontal offset mirrored onto the date header.
    pub fn header_scroll(&self) -> f32 {
        self.header_scroll
    }

    fn scroll_by(&mut self, delta: Vec2) {
        let target = self.offset - delta;
        self.set_scroll_offset(target);
        self.header_scroll = self.offset.x;
    }
}

impl ScrollViewport for EguiViewport {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn scroll_offset(&self) -> Vec2 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: Vec2) {
        self.offset = offset.max(Vec2::ZERO).min(self.max_offset());
    }

    fn sync_scrollbar(&mut self, horizontal: f32) {
        self.header_scroll = horizontal;
    }
}

enum Dispatch {
    Press(PointerInput),
    Global(GlobalEvent),
}

/// The editor grid and read-only heatmap, backed by one interaction engine.
pub struct GridView {
    interaction: GridInteraction,
    bus: EventBus,
    viewport: EguiViewport,
    signals: EguiDeviceSignals,
    theme: GridTheme,
    last_screen: Option<Rect>,
    last_tick: Option<Instant>,
    touch_active: bool,
}

impl GridView {
    pub fn new(shape: GridShape, settings: &GridSettings, theme: GridTheme) -> Self {
        let signals = EguiDeviceSignals::default();
        let mut bus = EventBus::new();
        let mut interaction = GridInteraction::new(shape, settings, &signals);
        interaction.mount(&mut bus);

        Self {
            interaction,
            bus,
            viewport: EguiViewport::default(),
            signals,
            theme,
            last_screen: None,
            last_tick: None,
            touch_active: false,
        }
    }

    pub fn set_shape(&mut self, shape: GridShape) {
        self.interaction.set_shape(shape);
    }

    pub fn shape(&self) -> &GridShape {
        self.interaction.shape()
    }

    pub fn interaction(&self) -> &GridInteraction {
        &self.interaction
    }

    /// Unscrolled layout anchored at the body's top-left, used for hit testing.
    fn content_layout(&self) -> GridLayout {
        GridLayout::new(
            self.viewport.bounds.min,
            COLUMN_WIDTH,
            QUARTER_HEIGHT,
            *self.interaction.shape(),
        )
    }

    /// Layout as painted, scroll applied.
    fn layout(&self) -> GridLayout {
        let content = self.content_layout();
        content.with_origin(content.origin - self.viewport.offset)
    }

    /// Lay out, handle input and paint the grid into the remaining space.
    pub fn show(&mut self, ui: &mut egui::Ui, dates: &[NaiveDate], selection: &mut CellSelection, mode: GridMode<'_>) {
        let (outer, _response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let header = Rect::from_min_max(
            Pos2::new(outer.left() + TIME_LABEL_WIDTH, outer.top()),
            Pos2::new(outer.right(), outer.top() + HEADER_HEIGHT),
        );
        let labels = Rect::from_min_max(
            Pos2::new(outer.left(), outer.top() + HEADER_HEIGHT),
            Pos2::new(outer.left() + TIME_LABEL_WIDTH, outer.bottom()),
        );
        let body = Rect::from_min_max(
            Pos2::new(outer.left() + TIME_LABEL_WIDTH, outer.top() + HEADER_HEIGHT),
            outer.max,
        );

        let content = GridLayout::new(Pos2::ZERO, COLUMN_WIDTH, QUARTER_HEIGHT, *self.interaction.shape()).content_size();
        self.viewport.set_frame(body, content);
        self.interaction
            .set_read_only(matches!(mode, GridMode::Heatmap(_)));

        let prevented = self.handle_input(ui, selection);
        if !prevented && !self.interaction.is_dragging() {
            let (hovered, delta) = ui.input(|i| {
                (
                    i.pointer.hover_pos().map_or(false, |pos| body.contains(pos)),
                    i.smooth_scroll_delta,
                )
            });
            if hovered && delta != Vec2::ZERO {
                self.viewport.scroll_by(delta);
            }
        }

        self.paint_body(ui, selection, mode);
        self.paint_header(ui, header, dates);
        self.paint_hour_labels(ui, labels);
        self.schedule_ticks(ui.ctx());
    }

    /// Translate this frame's raw events. Returns true if any handler asked
    /// to suppress native scrolling.
    fn handle_input(&mut self, ui: &egui::Ui, selection: &mut CellSelection) -> bool {
        let (events, screen) = ui.input(|i| (i.events.clone(), i.screen_rect()));
        let now = Instant::now();
        let mut prevented = false;

        if self.last_screen.is_some_and(|last| last != screen) {
            prevented |= self.dispatch(selection, Dispatch::Global(GlobalEvent::Resize { at: now }));
        }
        self.last_screen = Some(screen);

        let frame_has_touch = events.iter().any(|event| matches!(event, egui::Event::Touch { .. }));

        for event in events {
            let kind = if frame_has_touch || self.touch_active {
                PointerKind::Touch
            } else {
                PointerKind::Mouse
            };

            let dispatch = match event {
                egui::Event::Touch { phase, .. } => {
                    match phase {
                        egui::TouchPhase::Start => self.touch_active = true,
                        egui::TouchPhase::End => self.touch_active = false,
                        egui::TouchPhase::Cancel => {
                            self.touch_active = false;
                            prevented |= self.dispatch(selection, Dispatch::Global(GlobalEvent::PointerCancel { at: now }));
                        }
                        egui::TouchPhase::Move => {}
                    }
                    if self.signals.observe_touch() {
                        // Capabilities changed; reclassify like a resize
                        Some(Dispatch::Global(GlobalEvent::Resize { at: now }))
                    } else {
                        None
                    }
                }
                egui::Event::PointerMoved(pos) => Some(Dispatch::Global(GlobalEvent::PointerMove { kind, pos, at: now })),
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed: true,
                    ..
                } if self.viewport.bounds.contains(pos) => Some(Dispatch::Press(PointerInput { kind, pos, at: now })),
                egui::Event::PointerButton {
                    button: egui::PointerButton::Primary,
                    pressed: false,
                    ..
                } => Some(Dispatch::Global(GlobalEvent::PointerUp { kind, at: now })),
                egui::Event::WindowFocused(false) => Some(Dispatch::Global(GlobalEvent::PointerCancel { at: now })),
                _ => None,
            };

            if let Some(dispatch) = dispatch {
                prevented |= self.dispatch(selection, dispatch);
            }
        }

        if self.interaction.needs_ticks() {
            let interval = self.interaction.tick_interval();
            if self.last_tick.map_or(true, |last| now.duration_since(last) >= interval) {
                self.last_tick = Some(now);
                self.dispatch(selection, Dispatch::Global(GlobalEvent::Tick { at: now }));
            }
        } else {
            self.last_tick = None;
        }

        prevented
    }

    fn dispatch(&mut self, selection: &mut CellSelection, dispatch: Dispatch) -> bool {
        let layout = self.layout();
        let content = self.content_layout();
        let mut host = GridHost {
            selection,
            viewport: &mut self.viewport,
            hit_test: &content,
            signals: &self.signals,
        };

        let propagation = match dispatch {
            Dispatch::Global(event) => {
                self.bus.emit(event);
                self.interaction.pump(&mut self.bus, &mut host)
            }
            Dispatch::Press(input) => match layout.cell_at(input.pos) {
                Some(coord)
                    if is_hour_fully_selected(&*host.selection, coord.hour_block(), layout.shape.date_count) =>
                {
                    let block = coord.hour_block();
                    self.interaction
                        .full_hour_down(block, layout.hour_block_rect(block), input, &mut host)
                }
                Some(coord) => self.interaction.cell_down(coord, input, &mut host),
                None => {
                    self.interaction.container_down(input, &mut host);
                    Propagation::Continue
                }
            },
        };
        propagation.prevents_default()
    }

    fn schedule_ticks(&self, ctx: &egui::Context) {
        if self.interaction.needs_ticks() {
            ctx.request_repaint_after(self.interaction.tick_interval());
        }
    }

    fn paint_body(&self, ui: &egui::Ui, selection: &CellSelection, mode: GridMode<'_>) {
        let bounds = self.viewport.bounds;
        let painter = ui.painter_at(bounds);
        let layout = self.layout();
        let shape = layout.shape;
        let theme = &self.theme;
        painter.rect_filled(bounds, 0.0, theme.cell_background);

        for hour in 0..shape.hour_count() {
            for date in 0..shape.date_count {
                let block = HourBlockKey::new(hour, date);
                let block_rect = layout.hour_block_rect(block);
                if !block_rect.intersects(bounds) {
                    continue;
                }

                let collapsed = matches!(mode, GridMode::Edit)
                    && is_hour_fully_selected(selection, block, shape.date_count)
                    && !block.cells().any(|cell| self.interaction.is_in_drag_selection(cell));

                if collapsed {
                    painter.rect_filled(block_rect.shrink(1.0), 4.0, theme.cell_selected);
                } else {
                    for cell in block.cells() {
                        painter.rect_filled(layout.cell_rect(cell), 0.0, self.cell_fill(cell, selection, mode));
                        if cell.quarter + 1 < QUARTERS_PER_HOUR {
                            let rect = layout.cell_rect(cell);
                            painter.line_segment(
                                [rect.left_bottom(), rect.right_bottom()],
                                Stroke::new(1.0, theme.quarter_border),
                            );
                        }
                    }
                }

                painter.rect_stroke(block_rect, 0.0, Stroke::new(1.0, theme.hour_border));
                if self.interaction.was_just_completed(block) {
                    painter.rect_stroke(block_rect.shrink(1.0), 4.0, Stroke::new(2.0, theme.pulse));
                }
            }
        }
    }

    fn cell_fill(&self, cell: CellCoord, selection: &CellSelection, mode: GridMode<'_>) -> egui::Color32 {
        let shape = self.interaction.shape();
        let theme = &self.theme;
        if !shape.is_enabled(cell) {
            return theme.cell_disabled;
        }

        match mode {
            GridMode::Heatmap(heatmap) => heatmap
                .level(shape.index_of(cell))
                .map_or(theme.cell_background, |level| theme.heat_color(level)),
            GridMode::Edit => {
                if self.interaction.is_in_drag_selection(cell) {
                    match self.interaction.drag_mode() {
                        Some(mode) if !mode.target_selected() => theme.drag_deselect,
                        _ => theme.drag_select,
                    }
                } else if selection.is_selected(shape.index_of(cell)) {
                    theme.cell_selected
                } else {
                    theme.cell_background
                }
            }
        }
    }

    fn paint_header(&self, ui: &egui::Ui, header: Rect, dates: &[NaiveDate]) {
        let painter = ui.painter_at(header);
        for (index, date) in dates.iter().enumerate() {
            let left = header.left() + index as f32 * COLUMN_WIDTH - self.viewport.header_scroll();
            let rect = Rect::from_min_size(Pos2::new(left, header.top()), Vec2::new(COLUMN_WIDTH, HEADER_HEIGHT));
            if !rect.intersects(header) {
                continue;
            }
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                format_date(*date),
                FontId::proportional(13.0),
                self.theme.text_primary,
            );
        }
    }

    fn paint_hour_labels(&self, ui: &egui::Ui, labels: Rect) {
        let painter = ui.painter_at(labels);
        let hour_height = QUARTER_HEIGHT * QUARTERS_PER_HOUR as f32;
        let start = self.interaction.shape().window.day_start_hour();

        for hour in 0..self.interaction.shape().hour_count() {
            let top = labels.top() + hour as f32 * hour_height - self.viewport.offset.y;
            if top + hour_height < labels.top() || top > labels.bottom() {
                continue;
            }
            painter.text(
                Pos2::new(labels.right() - 6.0, top + 2.0),
                Align2::RIGHT_TOP,
                hour_label(start + hour as u32),
                FontId::proportional(12.0),
                self.theme.text_secondary,
            );
        }
    }

    /// Release host listeners before the view is dropped.
    pub fn unmount(&mut self) {
        self.interaction.unmount(&mut self.bus);
    }
}

impl Drop for GridView {
    fn drop(&mut self) {
        self.unmount();
    }
}

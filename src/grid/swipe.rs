//! Horizontal swipe-to-scroll versus cell selection.
//!
//! A press on the grid is ambiguous until it moves: a mostly-horizontal
//! movement past the threshold scrolls the grid, anything else is left for
//! the drag engine. Once a gesture scrolls it keeps scrolling until release.

use egui::{Pos2, Vec2};

use super::auto_scroll::ScrollViewport;

#[derive(Debug, Clone, Copy, PartialEq)]
struct SwipeAnchor {
    origin: Pos2,
    scroll_left: f32,
}

#[derive(Debug, Clone)]
pub struct SwipeRouter {
    anchor: Option<SwipeAnchor>,
    horizontal: bool,
    threshold: f32,
}

impl SwipeRouter {
    pub fn new(threshold: f32) -> Self {
        Self {
            anchor: None,
            horizontal: false,
            threshold,
        }
    }

    /// Record the press position and the viewport's horizontal offset.
    pub fn start(&mut self, pos: Pos2, viewport: &dyn ScrollViewport) {
        self.anchor = Some(SwipeAnchor {
            origin: pos,
            scroll_left: viewport.scroll_offset().x,
        });
        self.horizontal = false;
    }

    /// Returns true when the movement was consumed as a horizontal scroll.
    /// Always false while a drag selection is active.
    pub fn on_move(&mut self, pos: Pos2, drag_active: bool, viewport: &mut dyn ScrollViewport) -> bool {
        if drag_active {
            return false;
        }
        let Some(anchor) = self.anchor else {
            return false;
        };

        let dx = anchor.origin.x - pos.x;
        let dy = anchor.origin.y - pos.y;

        if !self.horizontal {
            if dx.abs() > dy.abs() && dx.abs() > self.threshold {
                log::debug!("Gesture classified as horizontal swipe (dx={dx:.1}, dy={dy:.1})");
                self.horizontal = true;
            } else {
                return false;
            }
        }

        let current = viewport.scroll_offset();
        viewport.set_scroll_offset(Vec2::new(anchor.scroll_left + dx, current.y));
        let applied = viewport.scroll_offset();
        viewport.sync_scrollbar(applied.x);
        true
    }

    pub fn end(&mut self) {
        self.anchor = None;
        self.horizontal = false;
    }

    pub fn is_anchored(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn is_horizontal(&self) -> bool {
        self.horizontal
    }
}

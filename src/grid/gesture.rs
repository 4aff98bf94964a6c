//! Per-gesture pointer bookkeeping: who pressed, where, when, and whether
//! the pointer has travelled far enough to stop being a tap.

use std::time::{Duration, Instant};

use egui::Pos2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// A press delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub kind: PointerKind,
    pub pos: Pos2,
    pub at: Instant,
}

impl PointerInput {
    pub fn mouse(pos: Pos2, at: Instant) -> Self {
        Self {
            kind: PointerKind::Mouse,
            pos,
            at,
        }
    }

    pub fn touch(pos: Pos2, at: Instant) -> Self {
        Self {
            kind: PointerKind::Touch,
            pos,
            at,
        }
    }
}

/// What the host should do with the native event after a handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    #[default]
    Continue,
    /// Suppress the platform default (scroll, double-tap zoom).
    PreventDefault,
}

impl Propagation {
    pub fn prevents_default(self) -> bool {
        self == Propagation::PreventDefault
    }
}

/// Transient state of one press-to-release sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureState {
    kind: PointerKind,
    origin: Pos2,
    last_pos: Pos2,
    started_at: Instant,
    moved: bool,
}

impl GestureState {
    pub fn start(input: PointerInput) -> Self {
        Self {
            kind: input.kind,
            origin: input.pos,
            last_pos: input.pos,
            started_at: input.at,
            moved: false,
        }
    }

    /// Record pointer travel. Once past `threshold` on either axis the
    /// gesture stays "moved" until it ends.
    pub fn track_move(&mut self, pos: Pos2, threshold: f32) -> bool {
        self.last_pos = pos;
        if !self.moved {
            let dx = (pos.x - self.origin.x).abs();
            let dy = (pos.y - self.origin.y).abs();
            self.moved = dx > threshold || dy > threshold;
        }
        self.moved
    }

    /// Short press that never left the threshold box.
    pub fn is_tap(&self, released_at: Instant, max_duration: Duration) -> bool {
        !self.moved && released_at.saturating_duration_since(self.started_at) < max_duration
    }

    pub fn kind(&self) -> PointerKind {
        self.kind
    }

    pub fn origin(&self) -> Pos2 {
        self.origin
    }

    /// Most recent pointer position seen during the gesture.
    pub fn last_pos(&self) -> Pos2 {
        self.last_pos
    }

    pub fn has_moved(&self) -> bool {
        self.moved
    }
}

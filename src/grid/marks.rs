//! Short-lived "hour block just completed" marks driving the pulse animation.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::models::cell::HourBlockKey;

#[derive(Debug, Clone)]
pub struct CompletedMarks {
    blocks: BTreeSet<HourBlockKey>,
    marked_at: Option<Instant>,
    pulse: Duration,
}

impl CompletedMarks {
    pub fn new(pulse: Duration) -> Self {
        Self {
            blocks: BTreeSet::new(),
            marked_at: None,
            pulse,
        }
    }

    /// Mark one block; restarts the pulse window for every current mark.
    pub fn mark(&mut self, block: HourBlockKey, now: Instant) {
        self.blocks.insert(block);
        self.marked_at = Some(now);
    }

    pub fn contains(&self, block: HourBlockKey) -> bool {
        self.blocks.contains(&block)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = HourBlockKey> + '_ {
        self.blocks.iter().copied()
    }

    /// Drop all marks once the pulse window has elapsed. Returns true if anything was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.marked_at {
            Some(at) if now.saturating_duration_since(at) >= self.pulse => {
                self.clear();
                true
            }
            _ => false,
        }
    }

    /// Time left before the marks clear, for hosts that schedule a repaint.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.marked_at
            .map(|at| self.pulse.saturating_sub(now.saturating_duration_since(at)))
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
        self.marked_at = None;
    }
}

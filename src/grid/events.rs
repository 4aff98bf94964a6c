//! Window-level input as an injected event source.
//!
//! A drag has to keep tracking the pointer after it leaves the cell it
//! started on, so the orchestrator listens to host-wide move/release events.
//! Hosts implement [`EventSource`]; [`EventBus`] is a queue-backed
//! implementation shared by the egui adapter and by tests, which feed it
//! synthetic events.

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use egui::Pos2;

use super::gesture::PointerKind;

/// Kinds of host-wide events a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerMove,
    PointerUp,
    PointerCancel,
    Resize,
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlobalEvent {
    PointerMove {
        kind: PointerKind,
        pos: Pos2,
        at: Instant,
    },
    /// Button or finger lifted anywhere, not necessarily over the grid.
    PointerUp { kind: PointerKind, at: Instant },
    /// Pointer left the window or a competing gesture took over.
    PointerCancel { at: Instant },
    Resize { at: Instant },
    /// Fixed-rate timer tick.
    Tick { at: Instant },
}

impl GlobalEvent {
    pub fn listener_kind(&self) -> ListenerKind {
        match self {
            GlobalEvent::PointerMove { .. } => ListenerKind::PointerMove,
            GlobalEvent::PointerUp { .. } => ListenerKind::PointerUp,
            GlobalEvent::PointerCancel { .. } => ListenerKind::PointerCancel,
            GlobalEvent::Resize { .. } => ListenerKind::Resize,
            GlobalEvent::Tick { .. } => ListenerKind::Tick,
        }
    }

    pub fn at(&self) -> Instant {
        match *self {
            GlobalEvent::PointerMove { at, .. }
            | GlobalEvent::PointerUp { at, .. }
            | GlobalEvent::PointerCancel { at }
            | GlobalEvent::Resize { at }
            | GlobalEvent::Tick { at } => at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

pub trait EventSource {
    fn subscribe(&mut self, kinds: &[ListenerKind]) -> SubscriptionId;
    /// Remove a subscription and discard anything still queued for it.
    fn unsubscribe(&mut self, id: SubscriptionId);
    /// Next pending event for a subscription, oldest first.
    fn poll(&mut self, id: SubscriptionId) -> Option<GlobalEvent>;
}

#[derive(Debug, Default)]
struct Subscription {
    kinds: Vec<ListenerKind>,
    queue: VecDeque<GlobalEvent>,
}

/// In-process fan-out of global events to subscribers.
#[derive(Debug, Default)]
pub struct EventBus {
    next_id: u64,
    subscriptions: HashMap<SubscriptionId, Subscription>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for every subscriber listening to its kind.
    /// Returns how many subscribers received it.
    pub fn emit(&mut self, event: GlobalEvent) -> usize {
        let kind = event.listener_kind();
        let mut delivered = 0;
        for subscription in self.subscriptions.values_mut() {
            if subscription.kinds.contains(&kind) {
                subscription.queue.push_back(event);
                delivered += 1;
            }
        }
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscriptions.contains_key(&id)
    }
}

impl EventSource for EventBus {
    fn subscribe(&mut self, kinds: &[ListenerKind]) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscriptions.insert(
            id,
            Subscription {
                kinds: kinds.to_vec(),
                queue: VecDeque::new(),
            },
        );
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscriptions.remove(&id);
    }

    fn poll(&mut self, id: SubscriptionId) -> Option<GlobalEvent> {
        self.subscriptions
            .get_mut(&id)
            .and_then(|subscription| subscription.queue.pop_front())
    }
}

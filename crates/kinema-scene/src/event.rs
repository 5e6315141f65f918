//! Store change events and the queue they are collected in

use crate::store::{PropertyName, Writer};
use kinema_core::ObjectId;

/// A mutation that has been applied to the store
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    Added {
        id: ObjectId,
    },
    Updated {
        id: ObjectId,
        property: PropertyName,
        writer: Writer,
    },
    Deleted {
        id: ObjectId,
    },
    SelectionChanged {
        id: Option<ObjectId>,
    },
}

impl StoreEvent {
    /// True for events that change which objects exist
    pub fn changes_population(&self) -> bool {
        matches!(self, Self::Added { .. } | Self::Deleted { .. })
    }
}

/// A simple event queue that the store pushes to and consumers drain
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<StoreEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: StoreEvent) {
        self.events.push(event);
    }

    /// Drain all events from the bus, returning them
    pub fn drain(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_drain() {
        let mut bus = EventBus::new();
        assert!(bus.is_empty());

        bus.push(StoreEvent::Added { id: "a".into() });
        bus.push(StoreEvent::SelectionChanged { id: None });

        assert_eq!(bus.len(), 2);
        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert!(events[0].changes_population());
        assert!(!events[1].changes_population());
        assert!(bus.is_empty());
    }

    #[test]
    fn test_drain_clears() {
        let mut bus = EventBus::new();
        bus.push(StoreEvent::Deleted { id: "a".into() });

        let _ = bus.drain();
        assert!(bus.drain().is_empty());
    }
}

use crate::domain::{Address, PublishError};
use crate::events::CounterEvent;
use crate::ports::EventSink;
use parking_lot::RwLock;

/// Collects published events in order.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    events: RwLock<Vec<CounterEvent>>,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events so far.
    pub fn events(&self) -> Vec<CounterEvent> {
        self.events.read().clone()
    }

    /// Events for one record address.
    pub fn events_for(&self, address: &Address) -> Vec<CounterEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.address() == address)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    pub fn clear(&self) {
        self.events.write().clear();
    }
}

impl EventSink for InMemoryEventLog {
    fn publish(&self, event: CounterEvent) -> Result<(), PublishError> {
        self.events.write().push(event);
        Ok(())
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn publish(&self, _event: CounterEvent) -> Result<(), PublishError> {
        Ok(())
    }
}

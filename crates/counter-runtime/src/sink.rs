//! Event sink that writes counter events to the log.

use counter_accounts::{CounterEvent, EventSink, PublishError};
use tracing::info;

/// Logs every event at `info` with its JSON form.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, event: CounterEvent) -> Result<(), PublishError> {
        let payload = serde_json::to_string(&event).map_err(|e| PublishError(e.to_string()))?;
        info!(address = %event.address(), event = %payload, "Counter event");
        Ok(())
    }
}

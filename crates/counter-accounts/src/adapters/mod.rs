//! # Adapters
//!
//! In-process implementations of the outbound ports. The in-memory ledger is
//! the fake used by tests and by the standalone runtime; a chain-backed ledger
//! implements the same trait.

pub mod clock;
pub mod event_log;
pub mod memory_ledger;

pub use clock::{FixedClock, SystemClock};
pub use event_log::{InMemoryEventLog, NullEventSink};
pub use memory_ledger::InMemoryLedger;

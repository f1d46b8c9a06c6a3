//! # counter-accounts
//!
//! Per-owner counter records over a pluggable ledger.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): entities, errors, address derivation,
//!   authorization guard, state transitions, record codec. No I/O.
//! - **Ports Layer** (`ports/`): `CounterApi` (inbound), `Ledger`, `Clock`,
//!   `EventSink` (outbound)
//! - **Adapters** (`adapters/`): in-memory ledger, clocks, event log
//! - **Lifecycle** (`lifecycle.rs`): exactly-once creation and fetch
//! - **Service Layer** (`service.rs`): wires the request flow together
//!
//! ## Request Flow
//!
//! ```text
//! (operation, requester, target)
//!        │
//!        ├─ Initialize ─→ derive(tag, requester) == target? ─→ create (allocate once)
//!        │
//!        └─ Increment/Reset ─→ fetch(target) ─→ derive(tag, owner) == target?
//!                               ─→ authorize(requester, owner) ─→ transition
//!                               ─→ compare-and-write (re-run from fetch on conflict)
//! ```
//!
//! ## Invariants
//!
//! - One record per (namespace tag, owner): deterministic address plus
//!   create-if-absent
//! - `count <= total_increments`, owner immutable, no deletion
//! - A failed operation leaves the stored bytes untouched

pub mod adapters;
pub mod domain;
pub mod events;
pub mod lifecycle;
pub mod ports;
pub mod service;

pub use adapters::*;
pub use domain::*;
pub use events::*;
pub use lifecycle::{AccountLifecycleManager, RecordHandle};
pub use ports::*;
pub use service::{CounterService, ServiceStats};

//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces this crate depends on. The surrounding runtime provides the
//! real implementations; `adapters/` has in-memory ones for tests.

use crate::domain::{Address, LedgerError, PublishError};
use crate::events::CounterEvent;
use std::sync::Arc;

/// Exclusive storage slot returned by [`Ledger::allocate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageHandle {
    pub address: Address,
    /// Allocated size in bytes. Later writes must match it.
    pub size: usize,
}

// =============================================================================
// LEDGER
// =============================================================================

/// Persistent keyed store.
///
/// ## Contract
///
/// - Each call is atomic for its address; concurrent calls on one address are
///   strictly ordered, never interleaved.
/// - `allocate` and `allocate_with` fail with `Occupied` if storage already
///   exists.
/// - `write` and `compare_and_write` never allocate: an absent address is
///   `NotFound`.
/// - Implementations must not cache across calls.
pub trait Ledger: Send + Sync {
    /// Allocate `size` zeroed bytes at `address`.
    fn allocate(&self, address: &Address, size: usize) -> Result<StorageHandle, LedgerError>;

    /// Allocate storage at `address` holding exactly `initial`, in one
    /// atomic step. No reader ever observes the slot without its contents.
    fn allocate_with(
        &self,
        address: &Address,
        initial: &[u8],
    ) -> Result<StorageHandle, LedgerError>;

    /// Current bytes at `address`.
    fn read(&self, address: &Address) -> Result<Vec<u8>, LedgerError>;

    /// Replace the bytes at `address` in one atomic step.
    fn write(&self, address: &Address, data: &[u8]) -> Result<(), LedgerError>;

    /// Replace the bytes at `address` only if they still equal `expected`.
    ///
    /// Fails with `Conflict` and leaves storage untouched otherwise.
    fn compare_and_write(
        &self,
        address: &Address,
        expected: &[u8],
        data: &[u8],
    ) -> Result<(), LedgerError>;

    /// Whether storage exists at `address`.
    fn exists(&self, address: &Address) -> Result<bool, LedgerError> {
        match self.read(address) {
            Ok(_) => Ok(true),
            Err(LedgerError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl<T: Ledger + ?Sized> Ledger for Arc<T> {
    fn allocate(&self, address: &Address, size: usize) -> Result<StorageHandle, LedgerError> {
        (**self).allocate(address, size)
    }

    fn allocate_with(
        &self,
        address: &Address,
        initial: &[u8],
    ) -> Result<StorageHandle, LedgerError> {
        (**self).allocate_with(address, initial)
    }

    fn read(&self, address: &Address) -> Result<Vec<u8>, LedgerError> {
        (**self).read(address)
    }

    fn write(&self, address: &Address, data: &[u8]) -> Result<(), LedgerError> {
        (**self).write(address, data)
    }

    fn compare_and_write(
        &self,
        address: &Address,
        expected: &[u8],
        data: &[u8],
    ) -> Result<(), LedgerError> {
        (**self).compare_and_write(address, expected, data)
    }

    fn exists(&self, address: &Address) -> Result<bool, LedgerError> {
        (**self).exists(address)
    }
}

// =============================================================================
// CLOCK
// =============================================================================

/// Source of creation timestamps.
pub trait Clock: Send + Sync {
    /// Seconds since the unix epoch.
    fn unix_timestamp(&self) -> i64;
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn unix_timestamp(&self) -> i64 {
        (**self).unix_timestamp()
    }
}

// =============================================================================
// EVENTS
// =============================================================================

/// Receives events for committed transitions.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: CounterEvent) -> Result<(), PublishError>;
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn publish(&self, event: CounterEvent) -> Result<(), PublishError> {
        (**self).publish(event)
    }
}

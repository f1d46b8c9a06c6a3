//! # Account Lifecycle
//!
//! Exactly-once creation and uncached fetch of counter records. Creation is
//! gated by the ledger's allocate-if-absent rule alone; there is no separate
//! "initialized" flag that could be checked racily.

use crate::domain::{
    decode_record, encode_record, transitions, Address, CounterError, CounterRecord, Pubkey,
    RECORD_SPACE,
};
use crate::ports::Ledger;
use tracing::warn;

/// Snapshot of a record together with the address it was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordHandle {
    pub address: Address,
    pub record: CounterRecord,
}

/// Creates and resolves records on a borrowed ledger.
pub struct AccountLifecycleManager<'a, L: Ledger + ?Sized> {
    ledger: &'a L,
}

impl<'a, L: Ledger + ?Sized> AccountLifecycleManager<'a, L> {
    pub fn new(ledger: &'a L) -> Self {
        Self { ledger }
    }

    /// Allocate storage at `address` already holding a fresh record for
    /// `owner`. A failed allocation leaves the address free.
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if storage is already allocated at `address`.
    pub fn create(
        &self,
        address: &Address,
        owner: Pubkey,
        created_at: i64,
    ) -> Result<RecordHandle, CounterError> {
        let record = transitions::initialize(owner, created_at);
        let slot = self.ledger.allocate_with(address, &encode_record(&record))?;
        debug_assert_eq!(slot.size, RECORD_SPACE);

        Ok(RecordHandle {
            address: slot.address,
            record,
        })
    }

    /// Read and decode the record at `address`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if nothing is stored there
    /// - `CorruptRecord` if the stored bytes are not a valid record
    pub fn fetch(&self, address: &Address) -> Result<RecordHandle, CounterError> {
        let bytes = self.ledger.read(address)?;
        let record = decode_record(&bytes).map_err(|e| {
            warn!(address = %address, error = %e, "Stored counter failed to decode");
            e
        })?;

        Ok(RecordHandle {
            address: *address,
            record,
        })
    }

    /// Write `next` over the snapshot in `handle` with a single ledger call.
    ///
    /// # Errors
    ///
    /// `Ledger(Conflict)` if the stored record no longer matches the
    /// snapshot; storage is left as the other writer committed it.
    pub fn commit(
        &self,
        handle: &RecordHandle,
        next: CounterRecord,
    ) -> Result<RecordHandle, CounterError> {
        self.ledger.compare_and_write(
            &handle.address,
            &encode_record(&handle.record),
            &encode_record(&next),
        )?;
        Ok(RecordHandle {
            address: handle.address,
            record: next,
        })
    }

    pub fn exists(&self, address: &Address) -> Result<bool, CounterError> {
        Ok(self.ledger.exists(address)?)
    }
}

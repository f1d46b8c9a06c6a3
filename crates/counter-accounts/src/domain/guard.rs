//! # Authorization Guard
//!
//! Called first by every mutating operation, before any state is touched.
//! Read-only access does not go through the guard.

use super::entities::{CounterRecord, Pubkey};
use super::errors::CounterError;

/// Pass iff `requester` is byte-for-byte the record owner.
pub fn authorize(requester: &Pubkey, record: &CounterRecord) -> Result<(), CounterError> {
    if requester.as_bytes() != record.owner.as_bytes() {
        return Err(CounterError::Unauthorized {
            requester: *requester,
            owner: record.owner,
        });
    }
    Ok(())
}

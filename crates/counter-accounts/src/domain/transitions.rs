//! # Counter State Machine
//!
//! `Uninitialized → Active` via [`initialize`]; `Active → Active` via
//! [`increment`] and [`reset`]. Each transition is a value-to-value transform
//! of an immutable snapshot. Nothing here touches storage, so a failed
//! transition cannot leave a partially updated record behind.

use super::entities::{CounterRecord, Mutation, Pubkey};
use super::errors::CounterError;

/// Record created by `Initialize`.
pub fn initialize(owner: Pubkey, now: i64) -> CounterRecord {
    CounterRecord::new(owner, now)
}

/// `count += 1` and `total_increments += 1`, both or neither.
///
/// # Errors
///
/// `Overflow` if either field is already `u64::MAX`.
pub fn increment(record: &CounterRecord) -> Result<CounterRecord, CounterError> {
    let count = record
        .count
        .checked_add(1)
        .ok_or(CounterError::Overflow { field: "count" })?;
    let total_increments = record
        .total_increments
        .checked_add(1)
        .ok_or(CounterError::Overflow {
            field: "total_increments",
        })?;

    Ok(CounterRecord {
        count,
        total_increments,
        ..*record
    })
}

/// `count := 0`; the lifetime total is kept.
pub fn reset(record: &CounterRecord) -> CounterRecord {
    CounterRecord {
        count: 0,
        ..*record
    }
}

/// Apply an owner-gated mutation.
pub fn apply(mutation: Mutation, record: &CounterRecord) -> Result<CounterRecord, CounterError> {
    match mutation {
        Mutation::Increment => increment(record),
        Mutation::Reset => Ok(reset(record)),
    }
}

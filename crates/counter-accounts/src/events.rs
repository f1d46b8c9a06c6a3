//! # Counter Events
//!
//! Emitted after a transition has been committed to the ledger. Consumers
//! (indexers, UIs) can follow a counter without polling it.

use crate::domain::{Address, Pubkey};
use serde::{Deserialize, Serialize};

/// Event emitted when a counter record is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterInitializedPayload {
    pub address: Address,
    pub owner: Pubkey,
    pub created_at: i64,
}

/// Event emitted when a counter is incremented.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterIncrementedPayload {
    pub address: Address,
    pub owner: Pubkey,
    /// Value before incrementing.
    pub previous_count: u64,
    /// Value after incrementing.
    pub count: u64,
    pub total_increments: u64,
    pub timestamp: i64,
}

/// Event emitted when a counter is reset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterResetPayload {
    pub address: Address,
    pub owner: Pubkey,
    /// Value discarded by the reset.
    pub previous_count: u64,
    pub total_increments: u64,
    pub timestamp: i64,
}

/// All events published by the counter service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CounterEvent {
    Initialized(CounterInitializedPayload),
    Incremented(CounterIncrementedPayload),
    Reset(CounterResetPayload),
}

impl CounterEvent {
    /// Address of the record the event concerns.
    pub fn address(&self) -> &Address {
        match self {
            CounterEvent::Initialized(p) => &p.address,
            CounterEvent::Incremented(p) => &p.address,
            CounterEvent::Reset(p) => &p.address,
        }
    }
}

//! # Counter Errors
//!
//! Every failure is terminal and typed. Callers branch on
//! [`CounterError::kind`] rather than on message text.

use super::entities::{Address, Pubkey};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by counter operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CounterError {
    /// A record already occupies the derived address.
    #[error("Counter already exists at {address}")]
    AlreadyExists { address: Address },

    /// No record at the target address.
    #[error("No counter at {address}")]
    NotFound { address: Address },

    /// Requester is not the record owner.
    #[error("Unauthorized: {requester} is not the owner ({owner})")]
    Unauthorized { requester: Pubkey, owner: Pubkey },

    /// A counter field would exceed `u64::MAX`.
    #[error("Arithmetic overflow in {field}")]
    Overflow { field: &'static str },

    /// Claimed address differs from the derived one.
    #[error("Invalid address: claimed {claimed}, derived {expected}")]
    InvalidAddress { claimed: Address, expected: Address },

    /// Every nonce produced an on-curve candidate.
    #[error("No off-curve address exists for owner {owner}")]
    DerivationExhausted { owner: Pubkey },

    /// Namespace tag outside the accepted length range.
    #[error("Invalid namespace tag length: {len} (allowed 1..={max})")]
    InvalidNamespace { len: usize, max: usize },

    /// Stored bytes do not decode to a valid record.
    #[error("Corrupt record: {reason}")]
    CorruptRecord { reason: String },

    /// Ledger backend failure not covered by another kind.
    #[error("Ledger error: {0}")]
    Ledger(LedgerError),
}

impl CounterError {
    /// Stable classification for callers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CounterError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            CounterError::NotFound { .. } => ErrorKind::NotFound,
            CounterError::Unauthorized { .. } => ErrorKind::Unauthorized,
            CounterError::Overflow { .. } => ErrorKind::Overflow,
            CounterError::InvalidAddress { .. } => ErrorKind::InvalidAddress,
            CounterError::CorruptRecord { .. } => ErrorKind::CorruptRecord,
            CounterError::DerivationExhausted { .. }
            | CounterError::InvalidNamespace { .. }
            | CounterError::Ledger(_) => ErrorKind::Internal,
        }
    }
}

impl From<LedgerError> for CounterError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Occupied { address } => CounterError::AlreadyExists { address },
            LedgerError::NotFound { address } => CounterError::NotFound { address },
            other => CounterError::Ledger(other),
        }
    }
}

/// Classification of a [`CounterError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    AlreadyExists,
    NotFound,
    Unauthorized,
    Overflow,
    InvalidAddress,
    CorruptRecord,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Overflow => "overflow",
            ErrorKind::InvalidAddress => "invalid_address",
            ErrorKind::CorruptRecord => "corrupt_record",
            ErrorKind::Internal => "internal",
        }
    }

    /// Message suitable for showing to the wallet holder.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::AlreadyExists => "You already have a counter",
            ErrorKind::NotFound => "No counter exists yet; create one first",
            ErrorKind::Unauthorized => "This counter belongs to another wallet",
            ErrorKind::Overflow => "The counter has reached its maximum value",
            ErrorKind::InvalidAddress => "The counter address does not match this wallet",
            ErrorKind::CorruptRecord => "The stored counter could not be read",
            ErrorKind::Internal => "The ledger could not process the request",
        }
    }
}

/// Errors reported by a [`Ledger`](crate::ports::Ledger) implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Storage already allocated at {address}")]
    Occupied { address: Address },

    #[error("No storage at {address}")]
    NotFound { address: Address },

    #[error("Write size mismatch at {address}: allocated {expected}, got {actual}")]
    SizeMismatch {
        address: Address,
        expected: usize,
        actual: usize,
    },

    #[error("Stored bytes at {address} changed since they were read")]
    Conflict { address: Address },

    #[error("Backend failure: {0}")]
    Backend(String),
}

/// Failure to parse a hex-encoded key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("Invalid hex: {0}")]
    Hex(String),

    #[error("Invalid key length: expected {expected}, got {actual}")]
    Length { expected: usize, actual: usize },
}

/// Failure to deliver an event to an [`EventSink`](crate::ports::EventSink).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Event delivery failed: {0}")]
pub struct PublishError(pub String);

//! # Domain Entities
//!
//! ## Type Decisions
//!
//! - `Pubkey` and `Address` are distinct 32-byte newtypes so an owner can never
//!   be passed where a record address is expected (and vice versa).
//! - `created_at: i64` holds unix seconds, matching the signed timestamps that
//!   ledger clocks report.
//! - Keys serialize as lowercase hex strings.

use crate::domain::errors::{CounterError, KeyParseError};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Width of identities and addresses in bytes.
pub const KEY_LENGTH: usize = 32;

macro_rules! key_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name(pub [u8; KEY_LENGTH]);

        impl $name {
            /// Wrap raw bytes.
            pub const fn new(bytes: [u8; KEY_LENGTH]) -> Self {
                Self(bytes)
            }

            /// Raw bytes.
            pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
                &self.0
            }

            /// Lowercase hex encoding.
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            /// Parse from 64 hex characters.
            pub fn from_hex(s: &str) -> Result<Self, KeyParseError> {
                let bytes = hex::decode(s).map_err(|e| KeyParseError::Hex(e.to_string()))?;
                let array: [u8; KEY_LENGTH] = bytes.as_slice().try_into().map_err(|_| {
                    KeyParseError::Length {
                        expected: KEY_LENGTH,
                        actual: bytes.len(),
                    }
                })?;
                Ok(Self(array))
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; KEY_LENGTH]> for $name {
            fn from(bytes: [u8; KEY_LENGTH]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = KeyParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(de::Error::custom)
            }
        }
    };
}

key_type!(
    /// Owner identity: an Ed25519 public key, authenticated by the request
    /// layer before it reaches this crate.
    Pubkey
);

key_type!(
    /// Derived record address. Never a valid curve point, so no key can sign
    /// for it.
    Address
);

/// The per-owner counter record.
///
/// The record's own address is not stored; it is recomputed from
/// `(namespace, owner)` and checked on every access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRecord {
    /// Owner identity. Immutable after creation.
    pub owner: Pubkey,
    /// Current value. Reset to zero by `Reset`.
    pub count: u64,
    /// Lifetime number of increments. Never decreases.
    pub total_increments: u64,
    /// Unix timestamp (seconds) captured at creation.
    pub created_at: i64,
}

impl CounterRecord {
    /// Fresh record for `owner`.
    pub fn new(owner: Pubkey, created_at: i64) -> Self {
        Self {
            owner,
            count: 0,
            total_increments: 0,
            created_at,
        }
    }

    /// Check `count <= total_increments`.
    pub fn check_invariants(&self) -> Result<(), CounterError> {
        if self.count > self.total_increments {
            return Err(CounterError::CorruptRecord {
                reason: format!(
                    "count {} exceeds total_increments {}",
                    self.count, self.total_increments
                ),
            });
        }
        Ok(())
    }
}

/// Whether a record exists at a derived address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    /// No storage at the address.
    Uninitialized,
    /// Record exists.
    Active,
}

/// Operations a requester can submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Initialize,
    Increment,
    Reset,
}

impl Operation {
    /// Stable one-byte tag, used in signing payloads.
    pub fn tag(&self) -> u8 {
        match self {
            Operation::Initialize => 0,
            Operation::Increment => 1,
            Operation::Reset => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Initialize => "initialize",
            Operation::Increment => "increment",
            Operation::Reset => "reset",
        }
    }

    /// The owner-gated mutation this operation performs, if any.
    pub fn mutation(&self) -> Option<Mutation> {
        match self {
            Operation::Initialize => None,
            Operation::Increment => Some(Mutation::Increment),
            Operation::Reset => Some(Mutation::Reset),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transitions applied to an `Active` record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mutation {
    Increment,
    Reset,
}

/// An authenticated request against exactly one record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRequest {
    pub operation: Operation,
    /// Identity already authenticated by the request layer.
    pub requester: Pubkey,
    /// Address the requester claims to act on.
    pub target: Address,
}

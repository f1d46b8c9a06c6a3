//! # Record Codec
//!
//! Fixed-size layout, no padding, integers little-endian:
//!
//! ```text
//! offset  size  field
//!      0     8  discriminator = SHA-256("account:CounterRecord")[..8]
//!      8    32  owner
//!     40     8  count             (u64)
//!     48     8  total_increments  (u64)
//!     56     8  created_at        (i64)
//! ```
//!
//! A zero-filled allocation fails the discriminator check, so storage that was
//! allocated but never written is reported as corrupt rather than read as an
//! empty counter.

use super::entities::{CounterRecord, Pubkey, KEY_LENGTH};
use super::errors::CounterError;
use shared_crypto::sha256;
use std::sync::OnceLock;

/// Preimage of the record discriminator.
pub const RECORD_DISCRIMINATOR_SEED: &[u8] = b"account:CounterRecord";

pub const DISCRIMINATOR_LEN: usize = 8;

/// Record body without the discriminator.
pub const RECORD_BODY_LEN: usize = KEY_LENGTH + 8 + 8 + 8;

/// Bytes allocated per record on the ledger.
pub const RECORD_SPACE: usize = DISCRIMINATOR_LEN + RECORD_BODY_LEN;

const OWNER_OFFSET: usize = DISCRIMINATOR_LEN;
const COUNT_OFFSET: usize = OWNER_OFFSET + KEY_LENGTH;
const TOTAL_OFFSET: usize = COUNT_OFFSET + 8;
const CREATED_AT_OFFSET: usize = TOTAL_OFFSET + 8;

static DISCRIMINATOR: OnceLock<[u8; DISCRIMINATOR_LEN]> = OnceLock::new();

/// Type tag prefixed to every stored record. Hashed once per process.
pub fn record_discriminator() -> [u8; DISCRIMINATOR_LEN] {
    *DISCRIMINATOR.get_or_init(|| {
        let hash = sha256(RECORD_DISCRIMINATOR_SEED);
        let mut out = [0u8; DISCRIMINATOR_LEN];
        out.copy_from_slice(&hash[..DISCRIMINATOR_LEN]);
        out
    })
}

/// Serialize a record into its stored form.
pub fn encode_record(record: &CounterRecord) -> [u8; RECORD_SPACE] {
    let mut out = [0u8; RECORD_SPACE];
    out[..DISCRIMINATOR_LEN].copy_from_slice(&record_discriminator());
    out[OWNER_OFFSET..COUNT_OFFSET].copy_from_slice(record.owner.as_bytes());
    out[COUNT_OFFSET..TOTAL_OFFSET].copy_from_slice(&record.count.to_le_bytes());
    out[TOTAL_OFFSET..CREATED_AT_OFFSET].copy_from_slice(&record.total_increments.to_le_bytes());
    out[CREATED_AT_OFFSET..].copy_from_slice(&record.created_at.to_le_bytes());
    out
}

fn word(bytes: &[u8], offset: usize) -> [u8; 8] {
    let mut out = [0u8; 8];
    out.copy_from_slice(&bytes[offset..offset + 8]);
    out
}

/// Parse stored bytes back into a record.
///
/// # Errors
///
/// `CorruptRecord` on wrong length, wrong discriminator, or a decoded record
/// with `count > total_increments`.
pub fn decode_record(bytes: &[u8]) -> Result<CounterRecord, CounterError> {
    if bytes.len() != RECORD_SPACE {
        return Err(CounterError::CorruptRecord {
            reason: format!("expected {} bytes, got {}", RECORD_SPACE, bytes.len()),
        });
    }
    if bytes[..DISCRIMINATOR_LEN] != record_discriminator() {
        return Err(CounterError::CorruptRecord {
            reason: "discriminator mismatch".to_string(),
        });
    }

    let mut owner = [0u8; KEY_LENGTH];
    owner.copy_from_slice(&bytes[OWNER_OFFSET..COUNT_OFFSET]);

    let record = CounterRecord {
        owner: Pubkey::new(owner),
        count: u64::from_le_bytes(word(bytes, COUNT_OFFSET)),
        total_increments: u64::from_le_bytes(word(bytes, TOTAL_OFFSET)),
        created_at: i64::from_le_bytes(word(bytes, CREATED_AT_OFFSET)),
    };
    record.check_invariants()?;
    Ok(record)
}

//! # Address Derivation
//!
//! Maps `(namespace tag, owner)` to a record address and a nonce:
//!
//! ```text
//! candidate(nonce) = SHA-256(tag || owner || [nonce] || program_id || ADDRESS_MARKER)
//! ```
//!
//! Nonces are tried from 255 downwards and the first candidate that is not an
//! Ed25519 curve point wins, so no private key exists for any record address.
//! The tag is the only variable-width part, and distinct tag lengths give
//! distinct preimage lengths, so the preimage is unambiguous.
//!
//! Derivation is pure: the same inputs reproduce the same address on every
//! call, which is what lets the service re-verify caller-claimed addresses.

use super::config::validate_namespace;
use super::entities::{Address, Pubkey};
use super::errors::CounterError;
use shared_crypto::{is_on_curve, Sha256Hasher};

/// Domain separator appended to every candidate preimage.
pub const ADDRESS_MARKER: &[u8] = b"OwnedCounterAddress";

/// Deterministic record-address oracle for one deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressDeriver {
    program_id: [u8; 32],
}

impl AddressDeriver {
    pub fn new(program_id: [u8; 32]) -> Self {
        Self { program_id }
    }

    pub fn program_id(&self) -> &[u8; 32] {
        &self.program_id
    }

    fn candidate(&self, tag: &[u8], owner: &Pubkey, nonce: u8) -> [u8; 32] {
        Sha256Hasher::new()
            .update(tag)
            .update(owner.as_bytes())
            .update(&[nonce])
            .update(&self.program_id)
            .update(ADDRESS_MARKER)
            .finalize()
    }

    /// Canonical address and nonce for `owner` under `tag`.
    ///
    /// # Errors
    ///
    /// - `InvalidNamespace` if the tag is empty or longer than 32 bytes
    /// - `DerivationExhausted` if all 256 candidates are curve points
    pub fn derive(&self, tag: &[u8], owner: &Pubkey) -> Result<(Address, u8), CounterError> {
        validate_namespace(tag)?;

        for nonce in (0..=u8::MAX).rev() {
            let candidate = self.candidate(tag, owner, nonce);
            if !is_on_curve(&candidate) {
                return Ok((Address::new(candidate), nonce));
            }
        }

        Err(CounterError::DerivationExhausted { owner: *owner })
    }

    /// Recompute the candidate for one specific nonce.
    ///
    /// Returns `None` when that candidate is a curve point and therefore not
    /// a usable address.
    pub fn derive_with_nonce(
        &self,
        tag: &[u8],
        owner: &Pubkey,
        nonce: u8,
    ) -> Result<Option<Address>, CounterError> {
        validate_namespace(tag)?;

        let candidate = self.candidate(tag, owner, nonce);
        if is_on_curve(&candidate) {
            return Ok(None);
        }
        Ok(Some(Address::new(candidate)))
    }

    /// Check that `claimed` is the canonical address of `owner`.
    ///
    /// Returns the canonical nonce on success.
    pub fn verify(&self, tag: &[u8], owner: &Pubkey, claimed: &Address) -> Result<u8, CounterError> {
        let (expected, nonce) = self.derive(tag, owner)?;
        if expected != *claimed {
            return Err(CounterError::InvalidAddress {
                claimed: *claimed,
                expected,
            });
        }
        Ok(nonce)
    }
}

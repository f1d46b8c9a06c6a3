//! # Signed Request Envelope
//!
//! Binds a requester identity to one operation on one target. The signed
//! message is
//!
//! ```text
//! "owned-counter:v1" || program_id || op_tag || target || requester
//! ```
//!
//! so a signature for one deployment, operation or record cannot be reused
//! for another. The same request can be replayed verbatim; sequencing is the
//! submitter's job.

use counter_accounts::{Address, CounterRequest, Operation, Pubkey};
use serde::{Deserialize, Serialize};
use shared_crypto::{CryptoError, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
use thiserror::Error;

/// Domain separator prefixed to every signed message.
pub const SIGNING_DOMAIN: &[u8] = b"owned-counter:v1";

/// Errors raised before a request reaches the counter core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Signature is not 64 bytes of hex: {0}")]
    MalformedSignature(String),

    #[error("Signature does not match requester")]
    InvalidSignature,

    #[error("Requester is not a valid public key")]
    InvalidRequester,

    #[error("Malformed request: {0}")]
    Malformed(String),
}

impl RequestError {
    /// Stable kind reported to callers.
    pub fn kind(&self) -> &'static str {
        match self {
            RequestError::InvalidSignature
            | RequestError::MalformedSignature(_)
            | RequestError::InvalidRequester => "invalid_signature",
            RequestError::Malformed(_) => "malformed_request",
        }
    }
}

impl From<CryptoError> for RequestError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::InvalidPublicKey => RequestError::InvalidRequester,
            CryptoError::InvalidSignatureFormat { .. } => {
                RequestError::MalformedSignature(e.to_string())
            }
            CryptoError::SignatureVerificationFailed | CryptoError::InvalidInput(_) => {
                RequestError::InvalidSignature
            }
        }
    }
}

/// Build the exact bytes a requester signs.
pub fn signing_message(
    program_id: &[u8; 32],
    operation: Operation,
    target: &Address,
    requester: &Pubkey,
) -> Vec<u8> {
    let mut message = Vec::with_capacity(SIGNING_DOMAIN.len() + 32 + 1 + 32 + 32);
    message.extend_from_slice(SIGNING_DOMAIN);
    message.extend_from_slice(program_id);
    message.push(operation.tag());
    message.extend_from_slice(target.as_bytes());
    message.extend_from_slice(requester.as_bytes());
    message
}

/// A request as submitted over the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedRequest {
    pub operation: Operation,
    pub requester: Pubkey,
    pub target: Address,
    /// Hex-encoded Ed25519 signature.
    pub signature: String,
}

impl SignedRequest {
    /// Sign `operation` on `target` with `keypair`.
    pub fn sign(
        keypair: &Ed25519KeyPair,
        program_id: &[u8; 32],
        operation: Operation,
        target: Address,
    ) -> Self {
        let requester = Pubkey::new(*keypair.public_key().as_bytes());
        let message = signing_message(program_id, operation, &target, &requester);
        let signature = keypair.sign(&message);

        Self {
            operation,
            requester,
            target,
            signature: hex::encode(signature.as_bytes()),
        }
    }

    /// Check the signature and return the authenticated request.
    pub fn verify(&self, program_id: &[u8; 32]) -> Result<CounterRequest, RequestError> {
        let raw = hex::decode(self.signature.trim())
            .map_err(|e| RequestError::MalformedSignature(e.to_string()))?;
        let signature = Ed25519Signature::from_slice(&raw)?;
        let key = Ed25519PublicKey::from_bytes(*self.requester.as_bytes())?;

        let message = signing_message(program_id, self.operation, &self.target, &self.requester);
        key.verify(&message, &signature)?;

        Ok(CounterRequest {
            operation: self.operation,
            requester: self.requester,
            target: self.target,
        })
    }
}

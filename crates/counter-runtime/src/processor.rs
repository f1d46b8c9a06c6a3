//! # Request Processor
//!
//! Authenticates a [`SignedRequest`], runs it against a [`CounterApi`] and
//! reports a [`RequestOutcome`]. Every request gets a correlation id that is
//! attached to the tracing span and echoed in the outcome.

use crate::envelope::{RequestError, SignedRequest};
use counter_accounts::{Address, CounterApi, CounterError, CounterRecord, Operation, Pubkey};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info_span, warn};
use uuid::Uuid;

/// Record as shown to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordView {
    pub address: Address,
    pub owner: Pubkey,
    pub count: u64,
    pub total_increments: u64,
    pub created_at: i64,
}

impl RecordView {
    pub fn new(address: Address, record: &CounterRecord) -> Self {
        Self {
            address,
            owner: record.owner,
            count: record.count,
            total_increments: record.total_increments,
            created_at: record.created_at,
        }
    }
}

/// Result of processing one request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RequestOutcome {
    Ok {
        correlation_id: Uuid,
        operation: Operation,
        record: RecordView,
    },
    Rejected {
        correlation_id: Uuid,
        /// Stable machine-readable kind.
        kind: String,
        /// Message suitable for end users.
        message: String,
        /// Diagnostic detail.
        detail: String,
    },
}

impl RequestOutcome {
    pub fn correlation_id(&self) -> Uuid {
        match self {
            RequestOutcome::Ok { correlation_id, .. }
            | RequestOutcome::Rejected { correlation_id, .. } => *correlation_id,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, RequestOutcome::Ok { .. })
    }

    /// The rejection kind, if rejected.
    pub fn kind(&self) -> Option<&str> {
        match self {
            RequestOutcome::Ok { .. } => None,
            RequestOutcome::Rejected { kind, .. } => Some(kind),
        }
    }

    fn from_counter_error(correlation_id: Uuid, error: &CounterError) -> Self {
        let kind = error.kind();
        RequestOutcome::Rejected {
            correlation_id,
            kind: kind.as_str().to_string(),
            message: kind.user_message().to_string(),
            detail: error.to_string(),
        }
    }

    fn from_request_error(correlation_id: Uuid, error: &RequestError) -> Self {
        let message = match error {
            RequestError::Malformed(_) => "The request could not be read",
            _ => "The request signature is not valid",
        };
        RequestOutcome::Rejected {
            correlation_id,
            kind: error.kind().to_string(),
            message: message.to_string(),
            detail: error.to_string(),
        }
    }
}

/// Authenticates and dispatches signed requests.
pub struct RequestProcessor<A: CounterApi> {
    api: Arc<A>,
    program_id: [u8; 32],
}

impl<A: CounterApi> RequestProcessor<A> {
    pub fn new(api: Arc<A>, program_id: [u8; 32]) -> Self {
        Self { api, program_id }
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Process one signed request.
    pub fn process(&self, request: &SignedRequest) -> RequestOutcome {
        let correlation_id = Uuid::new_v4();
        let span = info_span!(
            "request",
            %correlation_id,
            operation = %request.operation,
            requester = %request.requester,
        );
        let _guard = span.enter();

        let verified = match request.verify(&self.program_id) {
            Ok(verified) => verified,
            Err(e) => {
                warn!(error = %e, "Request failed authentication");
                return RequestOutcome::from_request_error(correlation_id, &e);
            }
        };

        match self.api.execute(&verified) {
            Ok(record) => {
                debug!(count = record.count, "Request applied");
                RequestOutcome::Ok {
                    correlation_id,
                    operation: verified.operation,
                    record: RecordView::new(verified.target, &record),
                }
            }
            Err(e) => RequestOutcome::from_counter_error(correlation_id, &e),
        }
    }

    /// Parse one JSON line and process it.
    pub fn process_line(&self, line: &str) -> RequestOutcome {
        match serde_json::from_str::<SignedRequest>(line) {
            Ok(request) => self.process(&request),
            Err(e) => {
                let error = RequestError::Malformed(e.to_string());
                let correlation_id = Uuid::new_v4();
                warn!(%correlation_id, error = %error, "Unreadable request line");
                RequestOutcome::from_request_error(correlation_id, &error)
            }
        }
    }
}

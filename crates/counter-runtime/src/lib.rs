//! # Counter Runtime
//!
//! The request submission layer in front of `counter-accounts`.
//!
//! ## Responsibilities
//!
//! - **Configuration**: `RuntimeConfig::from_env`
//! - **Logging**: `telemetry::init_logging` (tracing-subscriber, env filter)
//! - **Authentication**: `SignedRequest` carries an Ed25519 signature over the
//!   operation, target and requester; only verified requests reach the core
//! - **Outcomes**: `RequestProcessor` turns core results into
//!   `RequestOutcome` values with a stable error `kind`
//!
//! Replay protection and transport are left to whatever sits in front of
//! this crate.

pub mod config;
pub mod envelope;
pub mod processor;
pub mod sink;
pub mod telemetry;

pub use config::{ConfigError, RuntimeConfig};
pub use envelope::{signing_message, RequestError, SignedRequest, SIGNING_DOMAIN};
pub use processor::{RecordView, RequestOutcome, RequestProcessor};
pub use sink::TracingEventSink;
pub use telemetry::{init_logging, TelemetryError};

//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that the request layer calls
//! - **Outbound (Driven)**: ledger, clock and event delivery this crate needs

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;

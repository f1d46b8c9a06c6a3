//! # Domain Layer
//!
//! Pure counter-account logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod address;
pub mod codec;
pub mod config;
pub mod entities;
pub mod errors;
pub mod guard;
pub mod transitions;

pub use address::*;
pub use codec::*;
pub use config::*;
pub use entities::*;
pub use errors::*;
pub use guard::*;
pub use transitions::*;

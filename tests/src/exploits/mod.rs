//! Attack simulations against the counter core.
//!
//! Each test plays an adversary and asserts both the typed rejection and
//! that the stored bytes are unchanged.

pub mod boundaries;
pub mod reinitialization;

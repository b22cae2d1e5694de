//! Nullable infrastructure for deterministic testing.
//!
//! Every external collaborator of the panel (clock, contract, wallet, price
//! API) is abstracted behind a trait. This crate provides in-memory
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Record the calls made against them
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod contract;
pub mod price;

pub use clock::NullClock;
pub use contract::{NullIncinerator, NullIncineratorState};
pub use price::NullPriceSource;

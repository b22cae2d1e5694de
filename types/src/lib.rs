//! Fundamental types for the Incinerator console.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! token amounts, contract and caller addresses, transaction hashes, chain ids,
//! millisecond timestamps and the [`Clock`] seam used by the countdown.

pub mod address;
pub mod amount;
pub mod error;
pub mod hash;
pub mod network;
pub mod time;

pub use address::Address;
pub use amount::TokenAmount;
pub use error::TypesError;
pub use hash::TxHash;
pub use network::{ChainId, TargetNetwork};
pub use time::{Clock, SystemClock, Timestamp};

/// Block height on the target chain.
pub type BlockNumber = u64;

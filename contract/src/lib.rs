//! Incinerator contract access.
//!
//! The contract itself is an external collaborator. This crate describes the
//! four surfaces the console consumes as traits:
//! - [`IncineratorReader`]: the eight public view functions
//! - [`IncineratorWriter`]: the single `incinerate()` mutation
//! - [`BurnEventSource`]: `Incinerated` event history
//! - [`WalletProvider`]: connected account, chain id, chain switching
//!
//! [`RpcIncinerator`] implements all four over an Ethereum JSON-RPC endpoint.
//! Tests use the in-memory implementations from `incinerator-nullables`.

pub mod abi;
pub mod error;
pub mod event;
pub mod facade;
pub mod rpc;
pub mod rpc_incinerator;

pub use error::ContractError;
pub use event::BurnEvent;
pub use facade::{BurnEventSource, IncineratorReader, IncineratorWriter, WalletProvider};
pub use rpc::JsonRpcClient;
pub use rpc_incinerator::{RpcIncinerator, RpcIncineratorConfig};

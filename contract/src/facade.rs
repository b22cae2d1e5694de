//! The contract and wallet surfaces consumed by the panel.
//!
//! The console runs on a single-threaded executor, so the returned futures
//! carry no `Send` bound and implementations are free to use `RefCell`.

use std::future::Future;

use incinerator_types::{Address, BlockNumber, ChainId, TokenAmount, TxHash};

use crate::{BurnEvent, ContractError};

/// Read access to the Incinerator's public view functions.
pub trait IncineratorReader {
    /// Whether the cooldown has elapsed and the contract holds tokens to burn.
    fn can_incinerate(&self) -> impl Future<Output = Result<bool, ContractError>>;

    /// Seconds until the next burn is allowed (zero when ready).
    fn time_until_next_burn(&self) -> impl Future<Output = Result<u64, ContractError>>;

    /// Tokens destroyed by the next burn.
    fn burn_amount(&self) -> impl Future<Output = Result<TokenAmount, ContractError>>;

    /// Tokens paid to whoever triggers the next burn.
    fn caller_reward(&self) -> impl Future<Output = Result<TokenAmount, ContractError>>;

    /// Cumulative tokens burned.
    fn total_burned(&self) -> impl Future<Output = Result<TokenAmount, ContractError>>;

    /// Cumulative successful `incinerate()` calls.
    fn total_calls(&self) -> impl Future<Output = Result<u64, ContractError>>;

    /// Tokens still held by the contract.
    fn contract_balance(&self) -> impl Future<Output = Result<TokenAmount, ContractError>>;

    /// Configured cooldown length in seconds.
    fn cooldown_seconds(&self) -> impl Future<Output = Result<u64, ContractError>>;
}

/// The contract's single mutating action.
pub trait IncineratorWriter {
    /// Submit `incinerate()` and wait for it to be mined.
    ///
    /// Not retried. Failures carry the endpoint's message, which includes the
    /// contract's revert reason when the call was rejected.
    fn incinerate(&self) -> impl Future<Output = Result<TxHash, ContractError>>;
}

/// History of `Incinerated` events.
pub trait BurnEventSource {
    /// Current head block.
    fn latest_block(&self) -> impl Future<Output = Result<BlockNumber, ContractError>>;

    /// Events in the inclusive block range `[from, to]`, oldest first.
    fn burn_events(
        &self,
        from: BlockNumber,
        to: BlockNumber,
    ) -> impl Future<Output = Result<Vec<BurnEvent>, ContractError>>;
}

/// The connected wallet.
pub trait WalletProvider {
    /// Connected accounts; empty when no identity is connected.
    fn accounts(&self) -> impl Future<Output = Result<Vec<Address>, ContractError>>;

    /// Chain the wallet is currently on.
    fn chain_id(&self) -> impl Future<Output = Result<ChainId, ContractError>>;

    /// Ask the wallet to switch to `chain`.
    fn switch_chain(&self, chain: ChainId) -> impl Future<Output = Result<(), ContractError>>;
}

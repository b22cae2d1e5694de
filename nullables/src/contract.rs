//! Nullable Incinerator: an in-memory contract and wallet.

use incinerator_contract::{
    BurnEvent, BurnEventSource, ContractError, IncineratorReader, IncineratorWriter,
    WalletProvider,
};
use incinerator_types::{Address, BlockNumber, ChainId, TokenAmount, TxHash};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// Contract and wallet state served by [`NullIncinerator`].
///
/// Tests mutate this directly through [`NullIncinerator::update`].
#[derive(Clone, Debug)]
pub struct NullIncineratorState {
    pub can_incinerate: bool,
    pub time_until_next_burn: u64,
    pub burn_amount: TokenAmount,
    pub caller_reward: TokenAmount,
    pub total_burned: TokenAmount,
    pub total_calls: u64,
    pub contract_balance: TokenAmount,
    pub cooldown_seconds: u64,
    /// When set, every read fails with this message.
    pub read_failure: Option<String>,

    pub head: BlockNumber,
    pub events: Vec<BurnEvent>,
    /// When set, event queries fail with this message.
    pub events_failure: Option<String>,
    /// Event queries starting at or after this block fail.
    pub events_failing_from: Option<BlockNumber>,

    pub accounts: Vec<Address>,
    pub chain_id: ChainId,
}

impl Default for NullIncineratorState {
    fn default() -> Self {
        Self {
            can_incinerate: false,
            time_until_next_burn: 0,
            burn_amount: TokenAmount::ZERO,
            caller_reward: TokenAmount::ZERO,
            total_burned: TokenAmount::ZERO,
            total_calls: 0,
            contract_balance: TokenAmount::ZERO,
            cooldown_seconds: 3600,
            read_failure: None,
            head: 0,
            events: Vec::new(),
            events_failure: None,
            events_failing_from: None,
            accounts: Vec::new(),
            chain_id: ChainId::BASE,
        }
    }
}

/// A deterministic Incinerator for testing.
///
/// Reads return the configured state; `incinerate()` replays queued outcomes
/// (succeeding with a synthetic hash once the queue is empty); event queries
/// filter the stored events by block range. All calls are recorded.
pub struct NullIncinerator {
    state: RefCell<NullIncineratorState>,
    incinerate_outcomes: RefCell<VecDeque<Result<TxHash, ContractError>>>,
    incinerate_calls: Cell<usize>,
    event_queries: RefCell<Vec<(BlockNumber, BlockNumber)>>,
    switch_requests: RefCell<Vec<ChainId>>,
}

impl NullIncinerator {
    pub fn new(state: NullIncineratorState) -> Self {
        Self {
            state: RefCell::new(state),
            incinerate_outcomes: RefCell::new(VecDeque::new()),
            incinerate_calls: Cell::new(0),
            event_queries: RefCell::new(Vec::new()),
            switch_requests: RefCell::new(Vec::new()),
        }
    }

    /// Mutate the served state.
    pub fn update(&self, f: impl FnOnce(&mut NullIncineratorState)) {
        f(&mut self.state.borrow_mut());
    }

    /// Queue the outcome of the next `incinerate()` call.
    pub fn push_incinerate_outcome(&self, outcome: Result<TxHash, ContractError>) {
        self.incinerate_outcomes.borrow_mut().push_back(outcome);
    }

    pub fn incinerate_calls(&self) -> usize {
        self.incinerate_calls.get()
    }

    /// Every `(from, to)` range passed to `burn_events`.
    pub fn event_queries(&self) -> Vec<(BlockNumber, BlockNumber)> {
        self.event_queries.borrow().clone()
    }

    pub fn switch_requests(&self) -> Vec<ChainId> {
        self.switch_requests.borrow().clone()
    }

    fn read<T>(&self, f: impl FnOnce(&NullIncineratorState) -> T) -> Result<T, ContractError> {
        let state = self.state.borrow();
        match &state.read_failure {
            Some(message) => Err(ContractError::Transport(message.clone())),
            None => Ok(f(&state)),
        }
    }
}

impl Default for NullIncinerator {
    fn default() -> Self {
        Self::new(NullIncineratorState::default())
    }
}

impl IncineratorReader for NullIncinerator {
    async fn can_incinerate(&self) -> Result<bool, ContractError> {
        self.read(|s| s.can_incinerate)
    }

    async fn time_until_next_burn(&self) -> Result<u64, ContractError> {
        self.read(|s| s.time_until_next_burn)
    }

    async fn burn_amount(&self) -> Result<TokenAmount, ContractError> {
        self.read(|s| s.burn_amount)
    }

    async fn caller_reward(&self) -> Result<TokenAmount, ContractError> {
        self.read(|s| s.caller_reward)
    }

    async fn total_burned(&self) -> Result<TokenAmount, ContractError> {
        self.read(|s| s.total_burned)
    }

    async fn total_calls(&self) -> Result<u64, ContractError> {
        self.read(|s| s.total_calls)
    }

    async fn contract_balance(&self) -> Result<TokenAmount, ContractError> {
        self.read(|s| s.contract_balance)
    }

    async fn cooldown_seconds(&self) -> Result<u64, ContractError> {
        self.read(|s| s.cooldown_seconds)
    }
}

impl IncineratorWriter for NullIncinerator {
    async fn incinerate(&self) -> Result<TxHash, ContractError> {
        let call = self.incinerate_calls.get() + 1;
        self.incinerate_calls.set(call);
        self.incinerate_outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(TxHash::new([call as u8; 32])))
    }
}

impl BurnEventSource for NullIncinerator {
    async fn latest_block(&self) -> Result<BlockNumber, ContractError> {
        let state = self.state.borrow();
        match &state.events_failure {
            Some(message) => Err(ContractError::Transport(message.clone())),
            None => Ok(state.head),
        }
    }

    async fn burn_events(
        &self,
        from: BlockNumber,
        to: BlockNumber,
    ) -> Result<Vec<BurnEvent>, ContractError> {
        self.event_queries.borrow_mut().push((from, to));
        let state = self.state.borrow();
        if let Some(message) = &state.events_failure {
            return Err(ContractError::Transport(message.clone()));
        }
        if state.events_failing_from.is_some_and(|block| from >= block) {
            return Err(ContractError::Transport(format!("range {from}..={to} unavailable")));
        }
        let mut events: Vec<BurnEvent> = state
            .events
            .iter()
            .filter(|e| e.block_number >= from && e.block_number <= to)
            .cloned()
            .collect();
        events.sort_by_key(BurnEvent::position);
        Ok(events)
    }
}

impl WalletProvider for NullIncinerator {
    async fn accounts(&self) -> Result<Vec<Address>, ContractError> {
        Ok(self.state.borrow().accounts.clone())
    }

    async fn chain_id(&self) -> Result<ChainId, ContractError> {
        Ok(self.state.borrow().chain_id)
    }

    async fn switch_chain(&self, chain: ChainId) -> Result<(), ContractError> {
        self.switch_requests.borrow_mut().push(chain);
        self.state.borrow_mut().chain_id = chain;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(block: BlockNumber) -> BurnEvent {
        BurnEvent {
            caller: Address::new([1; 20]),
            amount_burned: TokenAmount::from_tokens(10),
            reward_paid: TokenAmount::from_tokens(1),
            tx_hash: TxHash::new([block as u8; 32]),
            block_number: block,
            log_index: 0,
        }
    }

    #[tokio::test]
    async fn reads_fail_when_configured() {
        let null = NullIncinerator::default();
        assert!(null.can_incinerate().await.is_ok());
        null.update(|s| s.read_failure = Some("rpc down".into()));
        assert!(null.burn_amount().await.is_err());
    }

    #[tokio::test]
    async fn incinerate_replays_then_succeeds() {
        let null = NullIncinerator::default();
        null.push_incinerate_outcome(Err(ContractError::Other("boom".into())));
        assert!(null.incinerate().await.is_err());
        assert!(null.incinerate().await.is_ok());
        assert_eq!(null.incinerate_calls(), 2);
    }

    #[tokio::test]
    async fn event_queries_filter_by_range() {
        let null = NullIncinerator::default();
        null.update(|s| s.events = vec![event(5), event(1), event(9)]);
        let events = null.burn_events(1, 5).await.unwrap();
        let blocks: Vec<_> = events.iter().map(|e| e.block_number).collect();
        assert_eq!(blocks, vec![1, 5]);
        assert_eq!(null.event_queries(), vec![(1, 5)]);
    }

    #[tokio::test]
    async fn switch_chain_is_recorded_and_applied() {
        let null = NullIncinerator::default();
        null.switch_chain(ChainId(1)).await.unwrap();
        assert_eq!(null.chain_id().await.unwrap(), ChainId(1));
        assert_eq!(null.switch_requests(), vec![ChainId(1)]);
    }
}

//! Burn submission, wallet gating and refresh flows against the nullables.

use std::cell::RefCell;

use incinerator_contract::{ContractError, IncineratorWriter};
use incinerator_nullables::{NullClock, NullIncinerator, NullIncineratorState, NullPriceSource};
use incinerator_panel::panel::{
    incinerate, refresh_contract, refresh_price, refresh_wallet, switch_network,
};
use incinerator_panel::{
    ActionSlot, ActionState, NotificationLevel, Panel, PanelError, WalletStatus,
};
use incinerator_price::PriceError;
use incinerator_types::{Address, ChainId, TargetNetwork, TokenAmount, TxHash};

fn me() -> Address {
    Address::new([0xAB; 20])
}

/// A contract ready to burn, with a wallet on the right chain.
fn ready_chain() -> NullIncinerator {
    NullIncinerator::new(NullIncineratorState {
        can_incinerate: true,
        time_until_next_burn: 0,
        burn_amount: TokenAmount::from_tokens(1_500_000),
        caller_reward: TokenAmount::from_tokens(2_500),
        contract_balance: TokenAmount::from_tokens(40_000_000),
        accounts: vec![me()],
        ..Default::default()
    })
}

async fn loaded_panel(chain: &NullIncinerator, clock: &NullClock) -> RefCell<Panel> {
    let panel = RefCell::new(Panel::new("CLAWD", TargetNetwork::base()));
    refresh_wallet(&panel, chain).await;
    refresh_contract(&panel, chain, clock).await;
    panel
}

#[tokio::test]
async fn successful_burn_quotes_reward_and_clears_flag() {
    let chain = ready_chain();
    let clock = NullClock::new(0);
    let panel = loaded_panel(&chain, &clock).await;
    assert_eq!(panel.borrow().action_state(), ActionState::Ready);

    let notification = incinerate(&panel, &chain).await.unwrap();

    assert_eq!(notification.level, NotificationLevel::Success);
    assert_eq!(notification.message, "🔥 INCINERATED! You earned 2.5K $CLAWD");
    assert_eq!(chain.incinerate_calls(), 1);
    assert!(!panel.borrow().in_flight());
    assert_eq!(panel.borrow().notification(), Some(&notification));
}

/// What the panel looked like while a submission was pending.
#[derive(Debug, PartialEq)]
struct PendingView {
    state: ActionState,
    can_burn: bool,
    action_line: String,
    second_attempt_refused: bool,
}

/// A writer that looks at the panel before letting the submission complete.
struct WatchingWriter<'a> {
    panel: &'a RefCell<Panel>,
    other: &'a NullIncinerator,
    seen: RefCell<Option<PendingView>>,
}

impl IncineratorWriter for WatchingWriter<'_> {
    async fn incinerate(&self) -> Result<TxHash, ContractError> {
        let (state, can_burn, action_line) = {
            let p = self.panel.borrow();
            (
                p.action_state(),
                p.action_slot().can_burn(),
                p.view().action_line(),
            )
        };
        let second = incinerate(self.panel, self.other).await;
        *self.seen.borrow_mut() = Some(PendingView {
            state,
            can_burn,
            action_line,
            second_attempt_refused: matches!(second, Err(PanelError::NotReady(_))),
        });
        Ok(TxHash::new([0x11; 32]))
    }
}

#[tokio::test]
async fn pending_submission_shows_burning_and_blocks_another() {
    let chain = ready_chain();
    let clock = NullClock::new(0);
    let panel = loaded_panel(&chain, &clock).await;
    let writer = WatchingWriter {
        panel: &panel,
        other: &chain,
        seen: RefCell::new(None),
    };

    let notification = incinerate(&panel, &writer).await.unwrap();

    assert_eq!(notification.level, NotificationLevel::Success);
    assert_eq!(
        writer.seen.into_inner(),
        Some(PendingView {
            state: ActionState::Burning,
            can_burn: false,
            action_line: "[🔥 Burning...] (disabled)".to_string(),
            second_attempt_refused: true,
        })
    );
    assert_eq!(chain.incinerate_calls(), 0);
    assert!(!panel.borrow().in_flight());
    assert_eq!(panel.borrow().action_state(), ActionState::Ready);
}

#[tokio::test]
async fn cooldown_revert_is_classified() {
    let chain = ready_chain();
    chain.push_incinerate_outcome(Err(ContractError::Rpc {
        code: 3,
        message: "execution reverted: Cooldown not elapsed".into(),
    }));
    let clock = NullClock::new(0);
    let panel = loaded_panel(&chain, &clock).await;

    let notification = incinerate(&panel, &chain).await.unwrap();

    assert_eq!(notification.level, NotificationLevel::Error);
    assert_eq!(notification.message, "⏱️ Cooldown not elapsed yet!");
    assert!(!panel.borrow().in_flight());
    assert_eq!(panel.borrow().action_state(), ActionState::Ready);
}

#[tokio::test]
async fn empty_contract_revert_is_classified() {
    let chain = ready_chain();
    chain.push_incinerate_outcome(Err(ContractError::Rpc {
        code: 3,
        message: "execution reverted: Not enough CLAWD to burn".into(),
    }));
    let clock = NullClock::new(0);
    let panel = loaded_panel(&chain, &clock).await;

    let notification = incinerate(&panel, &chain).await.unwrap();
    assert_eq!(notification.message, "Contract is empty, no $CLAWD to burn!");
    assert!(!panel.borrow().in_flight());
}

#[tokio::test]
async fn unknown_failure_carries_message() {
    let chain = ready_chain();
    chain.push_incinerate_outcome(Err(ContractError::Rpc {
        code: 4001,
        message: "User denied transaction signature".into(),
    }));
    let clock = NullClock::new(0);
    let panel = loaded_panel(&chain, &clock).await;

    let notification = incinerate(&panel, &chain).await.unwrap();
    assert_eq!(notification.message, "Failed: User denied transaction signature");
    assert!(!panel.borrow().in_flight());
}

#[tokio::test]
async fn refuses_while_cooling_down() {
    let chain = ready_chain();
    chain.update(|s| {
        s.can_incinerate = false;
        s.time_until_next_burn = 600;
    });
    let clock = NullClock::new(0);
    let panel = loaded_panel(&chain, &clock).await;
    assert_eq!(
        panel.borrow().action_state(),
        ActionState::CoolingDown {
            remaining_secs: 600
        }
    );

    let err = incinerate(&panel, &chain).await.unwrap_err();
    assert!(matches!(err, PanelError::NotReady(_)));
    assert_eq!(chain.incinerate_calls(), 0);
}

#[tokio::test]
async fn refuses_without_wallet() {
    let chain = ready_chain();
    chain.update(|s| s.accounts.clear());
    let clock = NullClock::new(0);
    let panel = loaded_panel(&chain, &clock).await;
    assert_eq!(panel.borrow().action_slot(), ActionSlot::ConnectWallet);

    assert!(incinerate(&panel, &chain).await.is_err());
    assert_eq!(chain.incinerate_calls(), 0);
}

#[tokio::test]
async fn wrong_network_offers_switch() {
    let chain = ready_chain();
    chain.update(|s| s.chain_id = ChainId(1));
    let clock = NullClock::new(0);
    let panel = loaded_panel(&chain, &clock).await;

    let slot = panel.borrow().action_slot();
    assert_eq!(slot.label("CLAWD"), "Switch to Base");
    assert!(incinerate(&panel, &chain).await.is_err());

    switch_network(&panel, &chain).await.unwrap();
    assert_eq!(chain.switch_requests(), vec![ChainId::BASE]);
    assert_eq!(
        panel.borrow().wallet(),
        &WalletStatus::connected(me(), ChainId::BASE)
    );
    assert!(panel.borrow().action_slot().can_burn());
}

#[tokio::test]
async fn failed_reads_keep_previous_values() {
    let chain = ready_chain();
    let clock = NullClock::new(0);
    let panel = loaded_panel(&chain, &clock).await;

    chain.update(|s| s.read_failure = Some("rpc down".into()));
    clock.advance_secs(30);
    refresh_contract(&panel, &chain, &clock).await;

    let p = panel.borrow();
    assert_eq!(
        p.snapshot().burn_amount,
        Some(TokenAmount::from_tokens(1_500_000))
    );
    assert_eq!(p.snapshot().can_incinerate, Some(true));
}

#[tokio::test]
async fn price_failure_keeps_stale_value() {
    let panel = RefCell::new(Panel::new("CLAWD", TargetNetwork::base()));
    let source = NullPriceSource::new(vec![
        Ok(0.0004),
        Err(PriceError::InvalidResponse("not json".into())),
        Err(PriceError::MissingPrice),
    ]);

    refresh_price(&panel, &source).await;
    assert_eq!(panel.borrow().price(), Some(0.0004));

    refresh_price(&panel, &source).await;
    refresh_price(&panel, &source).await;
    assert_eq!(panel.borrow().price(), Some(0.0004));
    assert_eq!(source.fetches(), 3);
}

#[tokio::test]
async fn countdown_resyncs_after_a_burn() {
    let chain = ready_chain();
    let clock = NullClock::new(0);
    let panel = loaded_panel(&chain, &clock).await;
    incinerate(&panel, &chain).await.unwrap();

    chain.update(|s| {
        s.can_incinerate = false;
        s.time_until_next_burn = 3_600;
    });
    clock.advance_secs(1);
    refresh_contract(&panel, &chain, &clock).await;
    assert_eq!(panel.borrow().countdown(), 3_600);

    clock.advance_secs(10);
    let now = incinerator_types::Clock::now(&clock);
    assert_eq!(panel.borrow_mut().tick(now), 3_590);
}

//! Composed panel state and the flows that mutate it.
//!
//! [`Panel`] is plain data. The async flows below take it as
//! `&RefCell<Panel>` so they can run as independent local tasks: each one
//! awaits its collaborator first and only then borrows the panel, so no
//! borrow is ever held across an await point.

use std::cell::RefCell;

use incinerator_contract::{IncineratorReader, IncineratorWriter, WalletProvider};
use incinerator_price::{PriceFeed, PriceSource};
use incinerator_types::{Clock, TargetNetwork, Timestamp, TokenAmount};

use crate::action::{ActionSlot, ActionState, WalletStatus};
use crate::countdown::CountdownReconciler;
use crate::notify::{BurnFailure, Notification};
use crate::snapshot::ContractSnapshot;
use crate::view::PanelView;
use crate::PanelError;

/// Everything the panel displays.
#[derive(Clone, Debug)]
pub struct Panel {
    symbol: String,
    target: TargetNetwork,
    snapshot: ContractSnapshot,
    countdown: CountdownReconciler,
    price: PriceFeed,
    wallet: WalletStatus,
    in_flight: bool,
    notification: Option<Notification>,
}

impl Panel {
    pub fn new(symbol: impl Into<String>, target: TargetNetwork) -> Self {
        Self {
            symbol: symbol.into(),
            target,
            snapshot: ContractSnapshot::default(),
            countdown: CountdownReconciler::new(),
            price: PriceFeed::new(),
            wallet: WalletStatus::default(),
            in_flight: false,
            notification: None,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn target(&self) -> &TargetNetwork {
        &self.target
    }

    pub fn snapshot(&self) -> &ContractSnapshot {
        &self.snapshot
    }

    pub fn countdown(&self) -> u64 {
        self.countdown.displayed()
    }

    pub fn price(&self) -> Option<f64> {
        self.price.price()
    }

    pub fn wallet(&self) -> &WalletStatus {
        &self.wallet
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// The most recent burn outcome, if any.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Fold a freshly fetched snapshot in and feed its countdown reading to
    /// the reconciler.
    pub fn apply_snapshot(&mut self, fresh: &ContractSnapshot, now: Timestamp) {
        self.snapshot.merge(fresh);
        self.countdown.observe(fresh.time_until_next_burn, now);
        self.countdown.tick(now);
    }

    /// One-second tick.
    pub fn tick(&mut self, now: Timestamp) -> u64 {
        self.countdown.tick(now)
    }

    pub fn set_wallet(&mut self, wallet: WalletStatus) {
        self.wallet = wallet;
    }

    pub fn price_feed_mut(&mut self) -> &mut PriceFeed {
        &mut self.price
    }

    pub fn action_state(&self) -> ActionState {
        ActionState::derive(
            self.snapshot.can_incinerate,
            self.countdown.displayed(),
            self.in_flight,
        )
    }

    pub fn action_slot(&self) -> ActionSlot {
        ActionSlot::resolve(&self.wallet, &self.target, self.action_state())
    }

    pub fn view(&self) -> PanelView<'_> {
        PanelView::new(self)
    }
}

/// Clears the in-flight flag when the submission ends, however it ends.
struct InFlight<'a>(&'a RefCell<Panel>);

impl<'a> InFlight<'a> {
    fn begin(panel: &'a RefCell<Panel>) -> Self {
        panel.borrow_mut().in_flight = true;
        Self(panel)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.borrow_mut().in_flight = false;
    }
}

/// Read every contract field and fold the results into the panel.
pub async fn refresh_contract<R, C>(panel: &RefCell<Panel>, reader: &R, clock: &C)
where
    R: IncineratorReader,
    C: Clock,
{
    let fresh = ContractSnapshot::fetch(reader).await;
    panel.borrow_mut().apply_snapshot(&fresh, clock.now());
}

/// Query the connected account and chain. A failed query leaves the
/// corresponding field unchanged.
pub async fn refresh_wallet<W: WalletProvider>(panel: &RefCell<Panel>, wallet: &W) {
    let (accounts, chain) = tokio::join!(wallet.accounts(), wallet.chain_id());
    let mut status = panel.borrow().wallet.clone();
    match accounts {
        Ok(accounts) => status.account = accounts.first().copied(),
        Err(e) => tracing::warn!("wallet account query failed: {e}"),
    }
    match chain {
        Ok(chain) => status.chain_id = Some(chain),
        Err(e) => tracing::warn!("wallet chain query failed: {e}"),
    }
    panel.borrow_mut().set_wallet(status);
}

/// Fetch the price once; failures keep the previous sample.
pub async fn refresh_price<P: PriceSource>(panel: &RefCell<Panel>, source: &P) {
    let outcome = source.fetch_usd_price().await;
    panel.borrow_mut().price_feed_mut().apply(outcome);
}

/// Submit a burn.
///
/// Refused with [`PanelError::NotReady`] unless the action slot is
/// `Burn(Ready)`. Otherwise the in-flight flag is set for the duration of
/// the submission and cleared on every outcome; the resulting notification
/// is stored on the panel and returned.
pub async fn incinerate<W: IncineratorWriter>(
    panel: &RefCell<Panel>,
    writer: &W,
) -> Result<Notification, PanelError> {
    let (slot, symbol, reward) = {
        let p = panel.borrow();
        (
            p.action_slot(),
            p.symbol.clone(),
            p.snapshot.caller_reward.unwrap_or(TokenAmount::ZERO),
        )
    };
    if !slot.can_burn() {
        return Err(PanelError::NotReady(slot.label(&symbol)));
    }

    let outcome = {
        let _in_flight = InFlight::begin(panel);
        writer.incinerate().await
    };

    let notification = match outcome {
        Ok(hash) => {
            tracing::info!(%hash, "burn confirmed");
            Notification::burned(reward, &symbol)
        }
        Err(e) => {
            tracing::error!("incineration failed: {e}");
            BurnFailure::classify(&e).notification(&symbol)
        }
    };
    panel.borrow_mut().notification = Some(notification.clone());
    Ok(notification)
}

/// Ask the wallet to move to the target chain, then re-read its status.
pub async fn switch_network<W: WalletProvider>(
    panel: &RefCell<Panel>,
    wallet: &W,
) -> Result<(), PanelError> {
    let target = panel.borrow().target.chain_id;
    wallet.switch_chain(target).await?;
    refresh_wallet(panel, wallet).await;
    Ok(())
}

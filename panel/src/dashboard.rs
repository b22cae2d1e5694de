//! Refresh timers wired around shared panel state.
//!
//! ```text
//! reads  (read_poll)   ──► refresh_wallet + refresh_contract ──┐
//! tick   (1s)          ──► Panel::tick ──► on_render           │
//! price  (60s)         ──► refresh_price                       ├─► Rc<RefCell<Panel>>
//! events (event_poll)  ──► BurnLogFeed::poll ──► BurnLog       ┘   Rc<RefCell<BurnLog>>
//! ```
//!
//! Every timer is a [`ScopedInterval`] owned by the [`Dashboard`]; dropping
//! the dashboard cancels all of them.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use incinerator_contract::{BurnEventSource, IncineratorReader, WalletProvider};
use incinerator_price::PriceSource;
use incinerator_types::Clock;

use crate::burn_log::{BurnLog, BurnLogFeed};
use crate::config::PanelConfig;
use crate::panel::{refresh_contract, refresh_price, refresh_wallet, Panel};
use crate::timer::ScopedInterval;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// An active panel: shared state plus the timers that keep it fresh.
pub struct Dashboard {
    panel: Rc<RefCell<Panel>>,
    burn_log: Rc<RefCell<BurnLog>>,
    timers: Vec<ScopedInterval>,
}

impl Dashboard {
    /// Start every refresh timer. Must be called inside a
    /// `tokio::task::LocalSet`.
    ///
    /// `on_render` runs after each one-second tick with the current state.
    pub fn activate<C, P, K, R>(
        config: &PanelConfig,
        chain: Rc<C>,
        price: Rc<P>,
        clock: Rc<K>,
        on_render: R,
    ) -> Self
    where
        C: IncineratorReader + BurnEventSource + WalletProvider + 'static,
        P: PriceSource + 'static,
        K: Clock + 'static,
        R: Fn(&Panel, &BurnLog) + 'static,
    {
        let panel = Rc::new(RefCell::new(Panel::new(
            config.token_symbol.clone(),
            config.target_network(),
        )));
        let burn_log = Rc::new(RefCell::new(BurnLog::new()));
        let mut timers = Vec::with_capacity(4);

        timers.push({
            let (panel, chain, clock) = (panel.clone(), chain.clone(), clock.clone());
            ScopedInterval::spawn_local("contract-reads", config.read_poll_interval(), move || {
                let (panel, chain, clock) = (panel.clone(), chain.clone(), clock.clone());
                async move {
                    refresh_wallet(&panel, &*chain).await;
                    refresh_contract(&panel, &*chain, &*clock).await;
                }
            })
        });

        timers.push({
            let (panel, burn_log, clock) = (panel.clone(), burn_log.clone(), clock.clone());
            ScopedInterval::spawn_local("countdown-tick", TICK_PERIOD, move || {
                {
                    let mut p = panel.borrow_mut();
                    p.tick(clock.now());
                }
                on_render(&*panel.borrow(), &*burn_log.borrow());
                std::future::ready(())
            })
        });

        timers.push({
            let panel = panel.clone();
            ScopedInterval::spawn_local("price", config.price_refresh_interval(), move || {
                let (panel, price) = (panel.clone(), price.clone());
                async move { refresh_price(&panel, &*price).await }
            })
        });

        timers.push({
            let burn_log = burn_log.clone();
            let feed = Rc::new(Cell::new(BurnLogFeed::new(
                config.event_start_block,
                config.max_block_range,
            )));
            ScopedInterval::spawn_local("burn-log", config.event_poll_interval(), move || {
                let (burn_log, chain, feed) = (burn_log.clone(), chain.clone(), feed.clone());
                async move {
                    let mut cursor = feed.get();
                    match cursor.poll(&*chain).await {
                        Ok(events) => burn_log.borrow_mut().ingest(events),
                        Err(e) => tracing::warn!("burn log poll failed: {e}"),
                    }
                    feed.set(cursor);
                }
            })
        });

        tracing::info!(
            symbol = %config.token_symbol,
            chain = %config.chain_id,
            timers = timers.len(),
            "panel activated"
        );
        Self {
            panel,
            burn_log,
            timers,
        }
    }

    pub fn panel(&self) -> &Rc<RefCell<Panel>> {
        &self.panel
    }

    pub fn burn_log(&self) -> &Rc<RefCell<BurnLog>> {
        &self.burn_log
    }

    /// Names of the running timers.
    pub fn timers(&self) -> Vec<&'static str> {
        self.timers
            .iter()
            .filter(|t| t.is_running())
            .map(|t| t.name())
            .collect()
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        tracing::info!("panel deactivated");
    }
}

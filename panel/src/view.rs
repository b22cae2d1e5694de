//! Text rendering of the panel and the burn log.

use std::fmt;

use incinerator_contract::BurnEvent;
use incinerator_types::TokenAmount;
use incinerator_utils::{format_countdown, format_tokens, format_usd};

use crate::action::ActionSlot;
use crate::burn_log::BurnLog;
use crate::notify::Notification;
use crate::panel::Panel;

/// A borrowed, render-ready projection of [`Panel`].
pub struct PanelView<'a> {
    panel: &'a Panel,
}

impl<'a> PanelView<'a> {
    pub fn new(panel: &'a Panel) -> Self {
        Self { panel }
    }

    /// "Next burn in HH:MM:SS" while counting down, "Ready to burn" after.
    pub fn headline(&self) -> String {
        match self.panel.countdown() {
            0 => "Ready to burn".to_string(),
            secs => format!("Next burn in {}", format_countdown(secs)),
        }
    }

    pub fn burn_line(&self) -> String {
        self.amount_line("Burns", self.panel.snapshot().burn_amount)
    }

    pub fn reward_line(&self) -> String {
        self.amount_line("Caller earns", self.panel.snapshot().caller_reward)
    }

    /// Button caption, suffixed with "(disabled)" when it cannot be pressed.
    pub fn action_line(&self) -> String {
        let slot = self.panel.action_slot();
        let label = slot.label(self.panel.symbol());
        match slot {
            ActionSlot::ConnectWallet => label,
            ActionSlot::SwitchNetwork { .. } => format!("[{label}]"),
            ActionSlot::Burn(state) if state.is_enabled() => format!("[{label}]"),
            ActionSlot::Burn(_) => format!("[{label}] (disabled)"),
        }
    }

    pub fn stats_line(&self) -> String {
        let snapshot = self.panel.snapshot();
        let total_calls = snapshot
            .total_calls
            .map(|n| n.to_string())
            .unwrap_or_else(|| "0".to_string());
        format!(
            "Total Burned: {} | Burns: {} | Remaining: {}",
            self.with_usd(snapshot.total_burned),
            total_calls,
            self.with_usd(snapshot.contract_balance),
        )
    }

    pub fn notification(&self) -> Option<&'a Notification> {
        self.panel.notification()
    }

    fn amount_line(&self, caption: &str, amount: Option<TokenAmount>) -> String {
        format!("{caption} {}", self.with_usd(amount))
    }

    fn with_usd(&self, amount: Option<TokenAmount>) -> String {
        let amount = amount.unwrap_or_default();
        let mut text = format!("{} ${}", format_tokens(amount), self.panel.symbol());
        if let Some(usd) = format_usd(amount, self.panel.price()) {
            text.push_str(&format!(" ({usd})"));
        }
        text
    }
}

impl fmt::Display for PanelView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.headline())?;
        writeln!(f, "{}", self.burn_line())?;
        writeln!(f, "{}", self.reward_line())?;
        writeln!(f, "{}", self.action_line())?;
        write!(f, "{}", self.stats_line())?;
        if let Some(notification) = self.notification() {
            write!(f, "\n{notification}")?;
        }
        Ok(())
    }
}

/// The recent-burns list as displayed.
pub enum BurnLogView<'a> {
    /// No history query has completed yet.
    Loading,
    /// History loaded and there are no burns.
    Empty,
    Entries {
        events: &'a [BurnEvent],
        symbol: &'a str,
    },
}

impl<'a> BurnLogView<'a> {
    pub fn new(log: &'a BurnLog, symbol: &'a str) -> Self {
        if log.is_loading() {
            Self::Loading
        } else if log.entries().is_empty() {
            Self::Empty
        } else {
            Self::Entries {
                events: log.entries(),
                symbol,
            }
        }
    }

    /// Only the first `limit` entries.
    pub fn limited(self, limit: usize) -> Self {
        match self {
            Self::Entries { events, symbol } => Self::Entries {
                events: &events[..limit.min(events.len())],
                symbol,
            },
            other => other,
        }
    }
}

/// One log row: caller, amount burned and reward paid.
pub fn burn_row(event: &BurnEvent) -> String {
    format!(
        "{}  -{}  +{} reward",
        event.caller.short(),
        format_tokens(event.amount_burned),
        format_tokens(event.reward_paid),
    )
}

impl fmt::Display for BurnLogView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "Loading..."),
            Self::Empty => write!(f, "No burns yet. Be the first caller! 🔥"),
            Self::Entries { events, symbol } => {
                write!(f, "Recent burns (${symbol})")?;
                for event in events.iter() {
                    write!(f, "\n{}", burn_row(event))?;
                }
                Ok(())
            }
        }
    }
}

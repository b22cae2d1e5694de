//! Burn-button state.

use incinerator_types::{Address, ChainId, TargetNetwork};
use incinerator_utils::format_countdown;

/// The five mutually exclusive states of the burn action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionState {
    /// A submission is in flight.
    Burning,
    /// Eligible and the countdown has reached zero.
    Ready,
    /// The countdown is still running, whatever the eligibility flag says.
    CoolingDown { remaining_secs: u64 },
    /// Countdown at zero but the contract reports it cannot burn; its
    /// balance is presumed empty.
    Empty,
    /// Eligibility has not been read yet.
    Loading,
}

impl ActionState {
    /// Derive the state from the eligibility flag, the displayed countdown and
    /// the in-flight flag. Earlier rules win.
    pub fn derive(eligible: Option<bool>, countdown_secs: u64, in_flight: bool) -> Self {
        match (in_flight, eligible, countdown_secs) {
            (true, _, _) => Self::Burning,
            (false, Some(true), 0) => Self::Ready,
            (false, _, secs) if secs > 0 => Self::CoolingDown {
                remaining_secs: secs,
            },
            (false, Some(false), _) => Self::Empty,
            _ => Self::Loading,
        }
    }

    /// Only `Ready` accepts a click.
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Button caption.
    pub fn label(&self, symbol: &str) -> String {
        match self {
            Self::Burning => "🔥 Burning...".to_string(),
            Self::Ready => "🔥 INCINERATE 🔥".to_string(),
            Self::CoolingDown { remaining_secs } => {
                format!("⏱️ {}", format_countdown(*remaining_secs))
            }
            Self::Empty => format!("💀 No {symbol} to burn"),
            Self::Loading => "⏱️ Loading...".to_string(),
        }
    }
}

/// What the connected wallet reports.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalletStatus {
    pub account: Option<Address>,
    pub chain_id: Option<ChainId>,
}

impl WalletStatus {
    pub fn connected(account: Address, chain_id: ChainId) -> Self {
        Self {
            account: Some(account),
            chain_id: Some(chain_id),
        }
    }

    /// Connected and known to be on a chain other than `target`.
    ///
    /// An unknown chain id is not treated as wrong.
    pub fn is_wrong_network(&self, target: &TargetNetwork) -> bool {
        self.account.is_some() && self.chain_id.is_some_and(|id| id != target.chain_id)
    }
}

/// The action area: wallet and network preconditions layered over the burn
/// button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionSlot {
    /// No identity connected: informational message, no action.
    ConnectWallet,
    /// Connected to the wrong chain: a switch action replaces the burn button.
    SwitchNetwork { target: TargetNetwork },
    Burn(ActionState),
}

impl ActionSlot {
    pub fn resolve(wallet: &WalletStatus, target: &TargetNetwork, state: ActionState) -> Self {
        if wallet.account.is_none() {
            Self::ConnectWallet
        } else if wallet.is_wrong_network(target) {
            Self::SwitchNetwork {
                target: target.clone(),
            }
        } else {
            Self::Burn(state)
        }
    }

    /// Whether the slot offers a burn that can be submitted right now.
    pub fn can_burn(&self) -> bool {
        matches!(self, Self::Burn(state) if state.is_enabled())
    }

    pub fn label(&self, symbol: &str) -> String {
        match self {
            Self::ConnectWallet => "Connect wallet to incinerate".to_string(),
            Self::SwitchNetwork { target } => format!("Switch to {}", target.name),
            Self::Burn(state) => state.label(symbol),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_flight_wins_over_everything() {
        assert_eq!(ActionState::derive(Some(true), 0, true), ActionState::Burning);
        assert_eq!(ActionState::derive(None, 50, true), ActionState::Burning);
    }

    #[test]
    fn ready_needs_eligibility_and_zero() {
        assert_eq!(ActionState::derive(Some(true), 0, false), ActionState::Ready);
        assert!(ActionState::Ready.is_enabled());
    }

    #[test]
    fn cooling_down_ignores_eligibility() {
        for eligible in [None, Some(true), Some(false)] {
            assert_eq!(
                ActionState::derive(eligible, 12, false),
                ActionState::CoolingDown { remaining_secs: 12 }
            );
        }
    }

    #[test]
    fn ineligible_at_zero_is_empty() {
        assert_eq!(ActionState::derive(Some(false), 0, false), ActionState::Empty);
    }

    #[test]
    fn unknown_eligibility_at_zero_is_loading() {
        assert_eq!(ActionState::derive(None, 0, false), ActionState::Loading);
    }

    #[test]
    fn only_ready_is_enabled() {
        for state in [
            ActionState::Burning,
            ActionState::CoolingDown { remaining_secs: 1 },
            ActionState::Empty,
            ActionState::Loading,
        ] {
            assert!(!state.is_enabled(), "{state:?}");
        }
    }

    #[test]
    fn labels() {
        assert_eq!(
            ActionState::CoolingDown { remaining_secs: 3_725 }.label("CLAWD"),
            "⏱️ 01:02:05"
        );
        assert_eq!(ActionState::Empty.label("CLAWD"), "💀 No CLAWD to burn");
    }

    #[test]
    fn slot_gating() {
        let target = TargetNetwork::base();
        let me = Address::new([7; 20]);

        let disconnected = WalletStatus::default();
        assert_eq!(
            ActionSlot::resolve(&disconnected, &target, ActionState::Ready),
            ActionSlot::ConnectWallet
        );

        let wrong = WalletStatus::connected(me, ChainId(1));
        let slot = ActionSlot::resolve(&wrong, &target, ActionState::Ready);
        assert_eq!(slot.label("CLAWD"), "Switch to Base");
        assert!(!slot.can_burn());

        let right = WalletStatus::connected(me, ChainId::BASE);
        let slot = ActionSlot::resolve(&right, &target, ActionState::Ready);
        assert_eq!(slot, ActionSlot::Burn(ActionState::Ready));
        assert!(slot.can_burn());
    }

    #[test]
    fn unknown_chain_is_not_wrong() {
        let target = TargetNetwork::base();
        let status = WalletStatus {
            account: Some(Address::new([7; 20])),
            chain_id: None,
        };
        assert!(!status.is_wrong_network(&target));
    }
}

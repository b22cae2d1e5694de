//! User-facing notifications for burn outcomes.

use incinerator_contract::ContractError;
use incinerator_types::TokenAmount;
use incinerator_utils::format_tokens;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    /// A confirmed burn, quoting the caller reward read before submission.
    pub fn burned(reward: TokenAmount, symbol: &str) -> Self {
        Self::success(format!(
            "🔥 INCINERATED! You earned {} ${symbol}",
            format_tokens(reward)
        ))
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            NotificationLevel::Success => write!(f, "[ok] {}", self.message),
            NotificationLevel::Error => write!(f, "[error] {}", self.message),
        }
    }
}

/// Why a burn submission failed, as far as the message text tells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BurnFailure {
    /// The contract rejected the call because the cooldown is still running.
    CooldownActive,
    /// The contract holds nothing to burn.
    ContractEmpty,
    /// Anything else; carries the message shown to the user.
    Unknown(String),
}

impl BurnFailure {
    /// Classify by the substrings contract reverts are known to contain.
    pub fn classify_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("cooldown") {
            Self::CooldownActive
        } else if lower.contains("not enough") || lower.contains("insufficient contract balance")
        {
            Self::ContractEmpty
        } else if message.trim().is_empty() {
            Self::Unknown("Unknown error".to_string())
        } else {
            Self::Unknown(message.to_string())
        }
    }

    pub fn classify(err: &ContractError) -> Self {
        match Self::classify_message(&err.to_string()) {
            Self::Unknown(_) => Self::classify_message(&err.short_message()),
            known => known,
        }
    }

    pub fn notification(&self, symbol: &str) -> Notification {
        match self {
            Self::CooldownActive => Notification::error("⏱️ Cooldown not elapsed yet!"),
            Self::ContractEmpty => {
                Notification::error(format!("Contract is empty, no ${symbol} to burn!"))
            }
            Self::Unknown(message) => Notification::error(format!("Failed: {message}")),
        }
    }
}

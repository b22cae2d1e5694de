//! Last-read values of the contract's view functions.

use incinerator_contract::{ContractError, IncineratorReader};
use incinerator_types::TokenAmount;

/// One optional value per contract read.
///
/// `None` means "not read yet" in the panel's merged snapshot and "this read
/// failed" in a freshly fetched one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContractSnapshot {
    pub can_incinerate: Option<bool>,
    pub time_until_next_burn: Option<u64>,
    pub burn_amount: Option<TokenAmount>,
    pub caller_reward: Option<TokenAmount>,
    pub total_burned: Option<TokenAmount>,
    pub total_calls: Option<u64>,
    pub contract_balance: Option<TokenAmount>,
    pub cooldown_seconds: Option<u64>,
}

fn keep<T>(field: &'static str, result: Result<T, ContractError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(field, "contract read failed: {e}");
            None
        }
    }
}

impl ContractSnapshot {
    /// Read every field concurrently. Failed reads come back as `None`.
    pub async fn fetch<R: IncineratorReader>(reader: &R) -> Self {
        let (can, time, burn, reward, total, calls, balance, cooldown) = tokio::join!(
            reader.can_incinerate(),
            reader.time_until_next_burn(),
            reader.burn_amount(),
            reader.caller_reward(),
            reader.total_burned(),
            reader.total_calls(),
            reader.contract_balance(),
            reader.cooldown_seconds(),
        );
        Self {
            can_incinerate: keep("canIncinerate", can),
            time_until_next_burn: keep("timeUntilNextBurn", time),
            burn_amount: keep("burnAmount", burn),
            caller_reward: keep("callerReward", reward),
            total_burned: keep("totalBurned", total),
            total_calls: keep("totalCalls", calls),
            contract_balance: keep("clawdBalance", balance),
            cooldown_seconds: keep("cooldownSeconds", cooldown),
        }
    }

    /// Overwrite every field `fresh` carries; keep the rest.
    pub fn merge(&mut self, fresh: &ContractSnapshot) {
        fn take<T: Copy>(slot: &mut Option<T>, fresh: Option<T>) {
            if fresh.is_some() {
                *slot = fresh;
            }
        }
        take(&mut self.can_incinerate, fresh.can_incinerate);
        take(&mut self.time_until_next_burn, fresh.time_until_next_burn);
        take(&mut self.burn_amount, fresh.burn_amount);
        take(&mut self.caller_reward, fresh.caller_reward);
        take(&mut self.total_burned, fresh.total_burned);
        take(&mut self.total_calls, fresh.total_calls);
        take(&mut self.contract_balance, fresh.contract_balance);
        take(&mut self.cooldown_seconds, fresh.cooldown_seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_values_missing_from_fresh() {
        let mut current = ContractSnapshot {
            can_incinerate: Some(true),
            total_calls: Some(4),
            ..Default::default()
        };
        let fresh = ContractSnapshot {
            can_incinerate: Some(false),
            burn_amount: Some(TokenAmount::from_tokens(10)),
            ..Default::default()
        };
        current.merge(&fresh);
        assert_eq!(current.can_incinerate, Some(false));
        assert_eq!(current.total_calls, Some(4));
        assert_eq!(current.burn_amount, Some(TokenAmount::from_tokens(10)));
    }
}

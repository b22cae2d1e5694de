//! `Incinerated` event decoding.

use incinerator_types::{Address, BlockNumber, TokenAmount, TxHash};
use serde::{Deserialize, Serialize};

use crate::abi;
use crate::ContractError;

/// One past burn, as emitted by the contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnEvent {
    pub caller: Address,
    pub amount_burned: TokenAmount,
    pub reward_paid: TokenAmount,
    pub tx_hash: TxHash,
    pub block_number: BlockNumber,
    pub log_index: u64,
}

impl BurnEvent {
    /// Chain position used for reverse-chronological ordering.
    pub fn position(&self) -> (BlockNumber, u64) {
        (self.block_number, self.log_index)
    }
}

/// A log entry as returned by `eth_getLogs`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLog {
    pub topics: Vec<String>,
    pub data: String,
    pub transaction_hash: Option<String>,
    pub block_number: Option<String>,
    pub log_index: Option<String>,
    #[serde(default)]
    pub removed: bool,
}

impl RawLog {
    /// Decode the log as an `Incinerated` event.
    ///
    /// The caller is read from `topics[1]` when the parameter is indexed and
    /// from the first data word otherwise. Pending logs (no block number yet)
    /// are rejected.
    pub fn decode_burn(&self) -> Result<BurnEvent, ContractError> {
        let words = abi::decode_words(&self.data)?;
        let (caller, amounts) = match self.topics.get(1) {
            Some(topic) => (Address::from_word(&abi::decode_word(topic)?), &words[..]),
            None => {
                let first = words.first().ok_or_else(|| {
                    ContractError::InvalidResponse("Incinerated log has no data".into())
                })?;
                (Address::from_word(first), &words[1..])
            }
        };
        if amounts.len() < 2 {
            return Err(ContractError::InvalidResponse(format!(
                "Incinerated log carries {} amount words, expected 2",
                amounts.len()
            )));
        }

        let tx_hash = self
            .transaction_hash
            .as_deref()
            .ok_or_else(|| ContractError::InvalidResponse("log without transactionHash".into()))?
            .parse::<TxHash>()
            .map_err(|e| ContractError::InvalidResponse(e.to_string()))?;
        let block_number = self
            .block_number
            .as_deref()
            .ok_or_else(|| ContractError::InvalidResponse("pending log without blockNumber".into()))
            .and_then(abi::parse_quantity)?;
        let log_index = match self.log_index.as_deref() {
            Some(idx) => abi::parse_quantity(idx)?,
            None => 0,
        };

        Ok(BurnEvent {
            caller,
            amount_burned: TokenAmount::new(abi::word_to_u128(&amounts[0])?),
            reward_paid: TokenAmount::new(abi::word_to_u128(&amounts[1])?),
            tx_hash,
            block_number,
            log_index,
        })
    }
}

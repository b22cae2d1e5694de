//! JSON-RPC implementation of every contract and wallet surface.

use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use incinerator_types::{Address, BlockNumber, ChainId, TokenAmount, TxHash};

use crate::abi;
use crate::event::RawLog;
use crate::facade::{BurnEventSource, IncineratorReader, IncineratorWriter, WalletProvider};
use crate::{BurnEvent, ContractError, JsonRpcClient};

/// Connection settings for [`RpcIncinerator`].
#[derive(Clone, Debug)]
pub struct RpcIncineratorConfig {
    /// Deployed Incinerator contract.
    pub contract: Address,
    /// Account to send `incinerate()` from. When unset, the endpoint's first
    /// account is used.
    pub from: Option<Address>,
    /// Delay between receipt polls after submission.
    pub receipt_poll_interval: Duration,
    /// Give up waiting for a receipt after this long.
    pub receipt_timeout: Duration,
}

impl RpcIncineratorConfig {
    pub fn new(contract: Address) -> Self {
        Self {
            contract,
            from: None,
            receipt_poll_interval: Duration::from_secs(1),
            receipt_timeout: Duration::from_secs(120),
        }
    }
}

/// The Incinerator contract reached through a JSON-RPC endpoint.
///
/// Signing is left to the endpoint (`eth_sendTransaction`): point it at a
/// wallet-backed RPC or a node with an unlocked account.
pub struct RpcIncinerator {
    rpc: JsonRpcClient,
    config: RpcIncineratorConfig,
    incinerated_topic: String,
}

#[derive(Debug, Deserialize)]
struct Receipt {
    status: Option<String>,
}

impl RpcIncinerator {
    pub fn new(rpc: JsonRpcClient, config: RpcIncineratorConfig) -> Self {
        Self {
            rpc,
            config,
            incinerated_topic: abi::event_topic(abi::INCINERATED_EVENT),
        }
    }

    pub fn contract(&self) -> Address {
        self.config.contract
    }

    /// `eth_call` a parameterless view function and return its first word.
    async fn call_word(&self, signature: &str) -> Result<abi::Word, ContractError> {
        let data: String = self
            .rpc
            .request(
                "eth_call",
                json!([
                    { "to": self.config.contract, "data": abi::call_data(signature) },
                    "latest"
                ]),
            )
            .await?;
        abi::decode_word(&data)
    }

    async fn call_amount(&self, signature: &str) -> Result<TokenAmount, ContractError> {
        let word = self.call_word(signature).await?;
        Ok(TokenAmount::new(abi::word_to_u128(&word)?))
    }

    async fn call_u64(&self, signature: &str) -> Result<u64, ContractError> {
        let word = self.call_word(signature).await?;
        abi::word_to_u64(&word)
    }

    async fn sender(&self) -> Result<Address, ContractError> {
        if let Some(from) = self.config.from {
            return Ok(from);
        }
        self.accounts()
            .await?
            .first()
            .copied()
            .ok_or(ContractError::NoAccount)
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<(), ContractError> {
        let deadline = tokio::time::Instant::now() + self.config.receipt_timeout;
        loop {
            let receipt: Option<Receipt> = self
                .rpc
                .request("eth_getTransactionReceipt", json!([hash]))
                .await?;
            if let Some(receipt) = receipt {
                return match receipt.status.as_deref() {
                    Some("0x0") => Err(ContractError::Reverted(hash)),
                    _ => Ok(()),
                };
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(ContractError::ReceiptTimeout(hash));
            }
            tokio::time::sleep(self.config.receipt_poll_interval).await;
        }
    }
}

impl IncineratorReader for RpcIncinerator {
    async fn can_incinerate(&self) -> Result<bool, ContractError> {
        let word = self.call_word(abi::CAN_INCINERATE).await?;
        abi::word_to_bool(&word)
    }

    async fn time_until_next_burn(&self) -> Result<u64, ContractError> {
        self.call_u64(abi::TIME_UNTIL_NEXT_BURN).await
    }

    async fn burn_amount(&self) -> Result<TokenAmount, ContractError> {
        self.call_amount(abi::BURN_AMOUNT).await
    }

    async fn caller_reward(&self) -> Result<TokenAmount, ContractError> {
        self.call_amount(abi::CALLER_REWARD).await
    }

    async fn total_burned(&self) -> Result<TokenAmount, ContractError> {
        self.call_amount(abi::TOTAL_BURNED).await
    }

    async fn total_calls(&self) -> Result<u64, ContractError> {
        self.call_u64(abi::TOTAL_CALLS).await
    }

    async fn contract_balance(&self) -> Result<TokenAmount, ContractError> {
        self.call_amount(abi::CONTRACT_BALANCE).await
    }

    async fn cooldown_seconds(&self) -> Result<u64, ContractError> {
        self.call_u64(abi::COOLDOWN_SECONDS).await
    }
}

impl IncineratorWriter for RpcIncinerator {
    async fn incinerate(&self) -> Result<TxHash, ContractError> {
        let from = self.sender().await?;
        let hash: TxHash = self
            .rpc
            .request(
                "eth_sendTransaction",
                json!([{
                    "from": from,
                    "to": self.config.contract,
                    "data": abi::call_data(abi::INCINERATE),
                }]),
            )
            .await?;
        tracing::info!(%hash, %from, "incinerate submitted");
        self.wait_for_receipt(hash).await?;
        tracing::info!(%hash, "incinerate mined");
        Ok(hash)
    }
}

impl BurnEventSource for RpcIncinerator {
    async fn latest_block(&self) -> Result<BlockNumber, ContractError> {
        let head: String = self.rpc.request("eth_blockNumber", json!([])).await?;
        abi::parse_quantity(&head)
    }

    async fn burn_events(
        &self,
        from: BlockNumber,
        to: BlockNumber,
    ) -> Result<Vec<BurnEvent>, ContractError> {
        let logs: Vec<RawLog> = self
            .rpc
            .request(
                "eth_getLogs",
                json!([{
                    "address": self.config.contract,
                    "topics": [self.incinerated_topic],
                    "fromBlock": abi::to_quantity(from),
                    "toBlock": abi::to_quantity(to),
                }]),
            )
            .await?;

        let mut events = Vec::with_capacity(logs.len());
        for log in logs.iter().filter(|log| !log.removed) {
            match log.decode_burn() {
                Ok(event) => events.push(event),
                Err(e) => tracing::warn!("skipping undecodable Incinerated log: {e}"),
            }
        }
        events.sort_by_key(BurnEvent::position);
        Ok(events)
    }
}

impl WalletProvider for RpcIncinerator {
    async fn accounts(&self) -> Result<Vec<Address>, ContractError> {
        self.rpc.request("eth_accounts", json!([])).await
    }

    async fn chain_id(&self) -> Result<ChainId, ContractError> {
        let id: String = self.rpc.request("eth_chainId", json!([])).await?;
        abi::parse_quantity(&id).map(ChainId)
    }

    async fn switch_chain(&self, chain: ChainId) -> Result<(), ContractError> {
        let _: serde_json::Value = self
            .rpc
            .request(
                "wallet_switchEthereumChain",
                json!([{ "chainId": chain.to_hex() }]),
            )
            .await?;
        tracing::info!(%chain, "requested chain switch");
        Ok(())
    }
}

//! Panel configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use incinerator_types::{Address, BlockNumber, ChainId, TargetNetwork};
use incinerator_utils::LogFormat;

use crate::PanelError;

/// Token burned by the deployed Incinerator.
pub const CLAWD_TOKEN_ADDRESS: &str = "0x9f86dB9fc6f7c9408e8Fda3Ff8ce4e78ac7a6b07";

/// Configuration for the Incinerator console.
///
/// Can be loaded from a TOML file via [`PanelConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PanelConfig {
    /// JSON-RPC endpoint used for reads, writes and wallet queries.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Deployed Incinerator contract. Required before anything can be read.
    #[serde(default)]
    pub contract_address: Option<Address>,

    /// Account to burn from; defaults to the endpoint's first account.
    #[serde(default)]
    pub account: Option<Address>,

    /// Chain the wallet must be on.
    #[serde(default = "default_chain_id")]
    pub chain_id: ChainId,

    /// Name shown on the switch-network action.
    #[serde(default = "default_network_name")]
    pub network_name: String,

    /// Token whose USD price annotates amounts.
    #[serde(default = "default_token_address")]
    pub token_address: Address,

    /// Ticker shown next to amounts.
    #[serde(default = "default_token_symbol")]
    pub token_symbol: String,

    /// Price API base URL.
    #[serde(default = "default_price_api_url")]
    pub price_api_url: String,

    /// First block scanned for `Incinerated` events.
    #[serde(default = "default_event_start_block")]
    pub event_start_block: BlockNumber,

    /// Largest block range per `eth_getLogs` request.
    #[serde(default = "default_max_block_range")]
    pub max_block_range: u64,

    /// Seconds between contract read refreshes.
    #[serde(default = "default_read_poll_secs")]
    pub read_poll_secs: u64,

    /// Seconds between burn-log polls.
    #[serde(default = "default_event_poll_secs")]
    pub event_poll_secs: u64,

    /// Seconds between price refreshes.
    #[serde(default = "default_price_refresh_secs")]
    pub price_refresh_secs: u64,

    /// Give up waiting for a burn receipt after this many seconds.
    #[serde(default = "default_receipt_timeout_secs")]
    pub receipt_timeout_secs: u64,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_rpc_url() -> String {
    "http://127.0.0.1:8545".to_string()
}

fn default_chain_id() -> ChainId {
    ChainId::BASE
}

fn default_network_name() -> String {
    "Base".to_string()
}

fn default_token_address() -> Address {
    CLAWD_TOKEN_ADDRESS
        .parse()
        .unwrap_or(Address::ZERO)
}

fn default_token_symbol() -> String {
    "CLAWD".to_string()
}

fn default_price_api_url() -> String {
    incinerator_price::dexscreener::DEXSCREENER_URL.to_string()
}

fn default_event_start_block() -> BlockNumber {
    42_000_000
}

fn default_max_block_range() -> u64 {
    10_000
}

fn default_read_poll_secs() -> u64 {
    30
}

fn default_event_poll_secs() -> u64 {
    30
}

fn default_price_refresh_secs() -> u64 {
    60
}

fn default_receipt_timeout_secs() -> u64 {
    120
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl PanelConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PanelError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            PanelError::Config(format!("{}: {e}", path.as_ref().display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, PanelError> {
        toml::from_str(s).map_err(|e| PanelError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, PanelError> {
        toml::to_string_pretty(self).map_err(|e| PanelError::Config(e.to_string()))
    }

    /// Reject settings the refresh loops cannot run with.
    pub fn validate(&self) -> Result<(), PanelError> {
        for (name, value) in [
            ("read_poll_secs", self.read_poll_secs),
            ("event_poll_secs", self.event_poll_secs),
            ("price_refresh_secs", self.price_refresh_secs),
            ("max_block_range", self.max_block_range),
        ] {
            if value == 0 {
                return Err(PanelError::Config(format!("{name} must be greater than zero")));
            }
        }
        if self.rpc_url.trim().is_empty() {
            return Err(PanelError::Config("rpc_url is empty".into()));
        }
        Ok(())
    }

    /// The contract address, or a config error naming the missing key.
    pub fn require_contract(&self) -> Result<Address, PanelError> {
        self.contract_address
            .ok_or_else(|| PanelError::Config("contract_address is not set".into()))
    }

    pub fn target_network(&self) -> TargetNetwork {
        TargetNetwork::new(self.chain_id, self.network_name.clone())
    }

    pub fn read_poll_interval(&self) -> Duration {
        Duration::from_secs(self.read_poll_secs)
    }

    pub fn event_poll_interval(&self) -> Duration {
        Duration::from_secs(self.event_poll_secs)
    }

    pub fn price_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.price_refresh_secs)
    }

    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_secs(self.receipt_timeout_secs)
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            contract_address: None,
            account: None,
            chain_id: default_chain_id(),
            network_name: default_network_name(),
            token_address: default_token_address(),
            token_symbol: default_token_symbol(),
            price_api_url: default_price_api_url(),
            event_start_block: default_event_start_block(),
            max_block_range: default_max_block_range(),
            read_poll_secs: default_read_poll_secs(),
            event_poll_secs: default_event_poll_secs(),
            price_refresh_secs: default_price_refresh_secs(),
            receipt_timeout_secs: default_receipt_timeout_secs(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

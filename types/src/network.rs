//! Chain identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// EIP-155 chain id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
    /// Base mainnet, where the Incinerator is deployed.
    pub const BASE: Self = Self(8453);

    /// `0x`-prefixed hex form used by `wallet_switchEthereumChain`.
    pub fn to_hex(&self) -> String {
        format!("{:#x}", self.0)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The network the panel expects the wallet to be connected to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetNetwork {
    pub chain_id: ChainId,
    /// Human-readable name, shown on the switch-network action.
    pub name: String,
}

impl TargetNetwork {
    pub fn new(chain_id: ChainId, name: impl Into<String>) -> Self {
        Self {
            chain_id,
            name: name.into(),
        }
    }

    pub fn base() -> Self {
        Self::new(ChainId::BASE, "Base")
    }
}

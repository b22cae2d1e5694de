//! Token amount type for the burned token.
//!
//! Amounts are fixed-point integers (u128) with 18 decimals, matching the
//! ERC-20 convention. The smallest unit is 1 raw (wei).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of decimals carried by the token.
pub const DECIMALS: u32 = 18;

/// Raw units per whole token.
pub const RAW_PER_TOKEN: u128 = 10u128.pow(DECIMALS);

/// An amount of the burned token, stored in raw units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Amount of `tokens` whole tokens. Saturates on overflow.
    pub fn from_tokens(tokens: u128) -> Self {
        Self(tokens.saturating_mul(RAW_PER_TOKEN))
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Whole-token value as a float, for display only.
    ///
    /// The integer and fractional parts are converted separately so large
    /// amounts keep their leading digits exact.
    pub fn to_tokens_f64(&self) -> f64 {
        let whole = self.0 / RAW_PER_TOKEN;
        let frac = self.0 % RAW_PER_TOKEN;
        whole as f64 + frac as f64 / RAW_PER_TOKEN as f64
    }
}

/// Exact decimal rendering with trailing zeros trimmed (`1.5`, `7`).
impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / RAW_PER_TOKEN;
        let frac = self.0 % RAW_PER_TOKEN;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let frac = format!("{:018}", frac);
        write!(f, "{whole}.{}", frac.trim_end_matches('0'))
    }
}

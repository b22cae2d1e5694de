//! DexScreener token price client.

use incinerator_types::Address;
use serde::Deserialize;
use std::time::Duration;

use crate::{PriceError, PriceSource};

/// Default DexScreener API base URL.
pub const DEXSCREENER_URL: &str = "https://api.dexscreener.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Fetches the USD price of one token from DexScreener.
///
/// Sends `GET {base_url}/latest/dex/tokens/{token}` and reads the first
/// pair's `priceUsd`.
pub struct DexScreenerClient {
    http_client: reqwest::Client,
    base_url: String,
    token: Address,
}

/// The parts of the token response the console reads.
#[derive(Debug, Deserialize)]
struct TokenPairsResponse {
    #[serde(default)]
    pairs: Option<Vec<Pair>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Pair {
    #[serde(default)]
    price_usd: Option<String>,
}

impl DexScreenerClient {
    pub fn new(token: Address) -> Result<Self, PriceError> {
        Self::with_url(DEXSCREENER_URL, token)
    }

    /// Client against a custom base URL (mirrors, tests).
    pub fn with_url(base_url: &str, token: Address) -> Result<Self, PriceError> {
        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .map_err(|e| PriceError::Client(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn url(&self) -> String {
        format!("{}/latest/dex/tokens/{}", self.base_url, self.token)
    }
}

impl PriceSource for DexScreenerClient {
    async fn fetch_usd_price(&self) -> Result<f64, PriceError> {
        let response = self.http_client.get(self.url()).send().await.map_err(|e| {
            if e.is_timeout() || e.is_connect() {
                PriceError::Unreachable(e.to_string())
            } else {
                PriceError::RequestFailed(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(PriceError::RequestFailed(format!(
                "HTTP status {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PriceError::RequestFailed(e.to_string()))?;
        parse_price(&body)
    }
}

/// Extract `pairs[0].priceUsd` from a token response body.
pub fn parse_price(body: &str) -> Result<f64, PriceError> {
    let response: TokenPairsResponse =
        serde_json::from_str(body).map_err(|e| PriceError::InvalidResponse(e.to_string()))?;
    let raw = response
        .pairs
        .and_then(|pairs| pairs.into_iter().next())
        .and_then(|pair| pair.price_usd)
        .filter(|p| !p.is_empty())
        .ok_or(PriceError::MissingPrice)?;
    let price: f64 = raw
        .trim()
        .parse()
        .map_err(|_| PriceError::InvalidResponse(format!("priceUsd is not a number: {raw}")))?;
    if !price.is_finite() || price < 0.0 {
        return Err(PriceError::InvalidResponse(format!("priceUsd out of range: {raw}")));
    }
    Ok(price)
}

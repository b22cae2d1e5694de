//! Last-known-good price holder.

use crate::{PriceError, PriceSource};

/// Holds the most recent successful price sample.
///
/// Absent until the first success; failures never clear it.
#[derive(Clone, Debug, Default)]
pub struct PriceFeed {
    price: Option<f64>,
}

impl PriceFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    /// Fold one fetch outcome into the feed and return the current price.
    pub fn apply(&mut self, outcome: Result<f64, PriceError>) -> Option<f64> {
        match outcome {
            Ok(price) => self.price = Some(price),
            Err(e) => tracing::debug!("price refresh failed, keeping last sample: {e}"),
        }
        self.price
    }

    /// Fetch once from `source` and fold the outcome in.
    pub async fn refresh<S: PriceSource>(&mut self, source: &S) -> Option<f64> {
        let outcome = source.fetch_usd_price().await;
        self.apply(outcome)
    }
}

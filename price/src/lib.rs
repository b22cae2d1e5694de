//! USD price for decorative annotations.
//!
//! The price is strictly optional: a [`PriceFeed`] keeps the last good sample
//! and swallows every failure, so a dead price API never affects the panel
//! beyond missing `~$` annotations.

pub mod dexscreener;
pub mod error;
pub mod feed;

pub use dexscreener::DexScreenerClient;
pub use error::PriceError;
pub use feed::PriceFeed;

use std::future::Future;

/// Anything that can quote the token's USD price.
pub trait PriceSource {
    fn fetch_usd_price(&self) -> impl Future<Output = Result<f64, PriceError>>;
}

//! Nullable price source: replays scripted outcomes.

use incinerator_price::{PriceError, PriceSource};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// A price source that returns pre-configured outcomes in order.
///
/// Once the script is exhausted every fetch fails as unreachable.
pub struct NullPriceSource {
    outcomes: RefCell<VecDeque<Result<f64, PriceError>>>,
    fetches: Cell<usize>,
}

impl NullPriceSource {
    pub fn new(outcomes: Vec<Result<f64, PriceError>>) -> Self {
        Self {
            outcomes: RefCell::new(outcomes.into()),
            fetches: Cell::new(0),
        }
    }

    /// A source whose every fetch fails.
    pub fn offline() -> Self {
        Self::new(Vec::new())
    }

    /// Queue another outcome.
    pub fn push(&self, outcome: Result<f64, PriceError>) {
        self.outcomes.borrow_mut().push_back(outcome);
    }

    /// Number of fetches made so far.
    pub fn fetches(&self) -> usize {
        self.fetches.get()
    }
}

impl PriceSource for NullPriceSource {
    async fn fetch_usd_price(&self) -> Result<f64, PriceError> {
        self.fetches.set(self.fetches.get() + 1);
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(PriceError::Unreachable("null price source".into())))
    }
}

//! Recent burns: the displayed list and the feed that keeps it current.

use incinerator_contract::{BurnEvent, BurnEventSource, ContractError};
use incinerator_types::BlockNumber;

/// Maximum number of burns shown.
pub const BURN_LOG_LIMIT: usize = 20;

/// The most recent burns, newest first.
///
/// `None` until the first history query completes, so "loading" and "no
/// burns yet" stay distinguishable.
#[derive(Clone, Debug, Default)]
pub struct BurnLog {
    entries: Option<Vec<BurnEvent>>,
}

impl BurnLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a batch of events (any order) and keep the newest
    /// [`BURN_LOG_LIMIT`]. An empty batch still marks the log as loaded.
    pub fn ingest(&mut self, batch: Vec<BurnEvent>) {
        let entries = self.entries.get_or_insert_with(Vec::new);
        entries.extend(batch);
        entries.sort_by_key(|e| std::cmp::Reverse(e.position()));
        entries.truncate(BURN_LOG_LIMIT);
    }

    pub fn is_loading(&self) -> bool {
        self.entries.is_none()
    }

    /// Displayed entries, newest first. Empty while loading.
    pub fn entries(&self) -> &[BurnEvent] {
        self.entries.as_deref().unwrap_or(&[])
    }
}

/// Live event subscription: a cursor over the chain that fetches new
/// `Incinerated` events in bounded block ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BurnLogFeed {
    next_block: BlockNumber,
    max_range: u64,
}

impl BurnLogFeed {
    /// Start at `start_block`, querying at most `max_range` blocks per call.
    pub fn new(start_block: BlockNumber, max_range: u64) -> Self {
        Self {
            next_block: start_block,
            max_range: max_range.max(1),
        }
    }

    /// First block the next poll will query.
    pub fn next_block(&self) -> BlockNumber {
        self.next_block
    }

    /// Fetch every event between the cursor and the chain head.
    ///
    /// The cursor advances past each range that was fetched. When a later
    /// range fails, the events gathered so far are returned and the rest is
    /// retried on the next poll; only a failure before any range succeeds is
    /// reported as an error.
    pub async fn poll<S: BurnEventSource>(
        &mut self,
        source: &S,
    ) -> Result<Vec<BurnEvent>, ContractError> {
        let head = source.latest_block().await?;
        let mut events = Vec::new();
        let mut fetched_any = false;

        while self.next_block <= head {
            let from = self.next_block;
            let to = from.saturating_add(self.max_range - 1).min(head);
            match source.burn_events(from, to).await {
                Ok(batch) => {
                    events.extend(batch);
                    self.next_block = to + 1;
                    fetched_any = true;
                }
                Err(e) if !fetched_any => return Err(e),
                Err(e) => {
                    tracing::warn!(from, to, "burn log range failed, retrying next poll: {e}");
                    break;
                }
            }
        }

        if !events.is_empty() {
            tracing::debug!(count = events.len(), next = self.next_block, "new burn events");
        }
        Ok(events)
    }
}

//! Burn-log feed paging and display cap.

use incinerator_contract::BurnEvent;
use incinerator_nullables::{NullIncinerator, NullIncineratorState};
use incinerator_panel::{BurnLog, BurnLogFeed, BurnLogView, BURN_LOG_LIMIT};
use incinerator_types::{Address, BlockNumber, TokenAmount, TxHash};

fn event(block: BlockNumber) -> BurnEvent {
    BurnEvent {
        caller: Address::new([0x42; 20]),
        amount_burned: TokenAmount::from_tokens(1_500_000),
        reward_paid: TokenAmount::from_tokens(2_500),
        tx_hash: TxHash::new([(block % 256) as u8; 32]),
        block_number: block,
        log_index: 0,
    }
}

fn chain_with(head: BlockNumber, blocks: impl IntoIterator<Item = BlockNumber>) -> NullIncinerator {
    NullIncinerator::new(NullIncineratorState {
        head,
        events: blocks.into_iter().map(event).collect(),
        ..Default::default()
    })
}

#[tokio::test]
async fn queries_in_bounded_ranges_up_to_head() {
    let chain = chain_with(125, [100, 110, 125]);
    let mut feed = BurnLogFeed::new(100, 10);

    let events = feed.poll(&chain).await.unwrap();

    assert_eq!(events.len(), 3);
    assert_eq!(chain.event_queries(), vec![(100, 109), (110, 119), (120, 125)]);
    assert_eq!(feed.next_block(), 126);
}

#[tokio::test]
async fn subsequent_polls_only_fetch_new_blocks() {
    let chain = chain_with(50, [40]);
    let mut feed = BurnLogFeed::new(0, 100);
    assert_eq!(feed.poll(&chain).await.unwrap().len(), 1);

    // Nothing new yet.
    assert!(feed.poll(&chain).await.unwrap().is_empty());
    assert_eq!(chain.event_queries().len(), 1);

    chain.update(|s| {
        s.head = 60;
        s.events.push(event(55));
    });
    let events = feed.poll(&chain).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].block_number, 55);
    assert_eq!(chain.event_queries().last(), Some(&(51, 60)));
}

#[tokio::test]
async fn first_range_failure_is_an_error() {
    let chain = chain_with(20, [5]);
    chain.update(|s| s.events_failing_from = Some(0));
    let mut feed = BurnLogFeed::new(0, 10);

    assert!(feed.poll(&chain).await.is_err());
    assert_eq!(feed.next_block(), 0);
}

#[tokio::test]
async fn later_range_failure_keeps_partial_progress() {
    let chain = chain_with(30, [5, 15, 25]);
    chain.update(|s| s.events_failing_from = Some(20));
    let mut feed = BurnLogFeed::new(0, 10);

    let events = feed.poll(&chain).await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(feed.next_block(), 20);

    chain.update(|s| s.events_failing_from = None);
    let events = feed.poll(&chain).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].block_number, 25);
}

#[tokio::test]
async fn log_shows_newest_twenty() {
    let chain = chain_with(1_000, (1..=45).map(|n| n * 20));
    let mut feed = BurnLogFeed::new(0, 250);
    let mut log = BurnLog::new();

    log.ingest(feed.poll(&chain).await.unwrap());

    assert_eq!(log.entries().len(), BURN_LOG_LIMIT);
    assert_eq!(log.entries()[0].block_number, 900);
    let text = BurnLogView::new(&log, "CLAWD").to_string();
    assert_eq!(text.lines().count(), BURN_LOG_LIMIT + 1);
    assert!(text.contains("-1.5M  +2.5K reward"));
}

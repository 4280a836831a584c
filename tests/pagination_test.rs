//! Integration tests for keyset pagination through the feed pipeline
//!
//! These tests verify that:
//! - Walking the pages visits every eligible product exactly once
//! - Pages are ordered, bounded by the limit and strictly after the cursor
//! - An empty page ends the walk
//! - Attributes are prefetched with one bulk query per page

mod common;

use catalog_feed::core::feed::{FeedPipeline, FeedSettings};
use catalog_feed::domain::ids::{DomainId, PricingGroupId, ProductId};
use common::{catalog, domain, listing, product, services};
use std::collections::HashSet;
use std::num::NonZeroUsize;
use test_case::test_case;

fn limit(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

/// Walk all pages, returning the ids of each non-empty page
async fn walk(pipeline: &FeedPipeline, page_size: usize) -> Vec<Vec<u64>> {
    let domain = domain();
    let mut cursor = None;
    let mut pages = Vec::new();

    loop {
        let mut page = pipeline.items(&domain, cursor, limit(page_size)).await.unwrap();
        if page.is_empty() {
            assert_eq!(page.last_seek_id(), None);
            break;
        }

        let records = page.collect_records().unwrap();
        assert_eq!(records.len(), page.entry_count());
        assert_eq!(records.last().map(|r| r.seek_id()), page.last_seek_id());

        cursor = page.last_seek_id();
        pages.push(records.iter().map(|r| r.id().get()).collect());
    }

    pages
}

#[test_case(1 ; "page of one")]
#[test_case(4 ; "uneven pages")]
#[test_case(5 ; "exact pages")]
#[test_case(100 ; "single page")]
#[tokio::test]
async fn test_full_catalog_visited_exactly_once(page_size: usize) {
    let store = catalog((1..=20).map(product).collect());
    let pipeline = FeedPipeline::new(&services(&store), FeedSettings::default());

    let pages = walk(&pipeline, page_size).await;

    let ids: Vec<u64> = pages.iter().flatten().copied().collect();
    assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    assert!(pages.iter().all(|page| page.len() <= page_size));
    assert_eq!(pages.len(), 20usize.div_ceil(page_size));
}

#[tokio::test]
async fn test_ineligible_products_are_skipped() {
    let mut products: Vec<_> = (1..=10).map(product).collect();

    // 3 is hidden, 6 is excluded for the default pricing group, 9 is listed elsewhere
    products[2].listings[0].visible = false;
    products[5].listings[0] = listing(6).excluded_for(PricingGroupId::new(1));
    products[8].listings[0].domain_id = DomainId::new(2);

    let store = catalog(products);
    let pipeline = FeedPipeline::new(&services(&store), FeedSettings::default());

    let ids: Vec<u64> = walk(&pipeline, 3).await.into_iter().flatten().collect();
    assert_eq!(ids, vec![1, 2, 4, 5, 7, 8, 10]);
}

#[tokio::test]
async fn test_pages_are_strictly_after_cursor() {
    let store = catalog([2, 5, 9, 14, 15].into_iter().map(product).collect());
    let pipeline = FeedPipeline::new(&services(&store), FeedSettings::default());
    let domain = domain();

    let mut page = pipeline
        .items(&domain, Some(ProductId::new(5)), limit(2))
        .await
        .unwrap();
    let ids: Vec<u64> = page
        .collect_records()
        .unwrap()
        .iter()
        .map(|r| r.id().get())
        .collect();
    assert_eq!(ids, vec![9, 14]);

    // A cursor between ids works the same as an existing id
    let mut page = pipeline
        .items(&domain, Some(ProductId::new(10)), limit(10))
        .await
        .unwrap();
    assert_eq!(page.collect_records().unwrap().len(), 2);
}

#[tokio::test]
async fn test_empty_catalog_yields_empty_page() {
    let store = catalog(Vec::new());
    let pipeline = FeedPipeline::new(&services(&store), FeedSettings::default());

    let mut page = pipeline.items(&domain(), None, limit(10)).await.unwrap();
    assert!(page.is_empty());
    assert!(page.next().is_none());

    // No attribute lookups for an empty page
    assert_eq!(store.counters().page_fetches(), 1);
    assert_eq!(store.counters().url_batches(), 0);
    assert_eq!(store.counters().parameter_batches(), 0);
}

#[tokio::test]
async fn test_one_bulk_lookup_per_page() {
    let store = catalog((1..=12).map(product).collect());
    let pipeline = FeedPipeline::new(&services(&store), FeedSettings::default());

    let pages = walk(&pipeline, 5).await;
    assert_eq!(pages.len(), 3);

    let counters = store.counters();
    // Three full pages plus the terminating empty page
    assert_eq!(counters.page_fetches(), 4);
    assert_eq!(counters.url_batches(), 3);
    assert_eq!(counters.parameter_batches(), 3);
}

#[tokio::test]
async fn test_products_inserted_behind_cursor_are_not_revisited() {
    let store = catalog((1..=6).map(product).collect());
    let pipeline = FeedPipeline::new(&services(&store), FeedSettings::default());
    let domain = domain();

    let mut first = pipeline.items(&domain, None, limit(3)).await.unwrap();
    let cursor = first.last_seek_id();
    let seen: HashSet<u64> = first
        .collect_records()
        .unwrap()
        .iter()
        .map(|r| r.id().get())
        .collect();

    // Product ids grow with insertion, so a new product lands after the cursor
    store.insert_product(product(7)).unwrap();

    let mut second = pipeline.items(&domain, cursor, limit(10)).await.unwrap();
    let rest: Vec<u64> = second
        .collect_records()
        .unwrap()
        .iter()
        .map(|r| r.id().get())
        .collect();

    assert_eq!(rest, vec![4, 5, 6, 7]);
    assert!(rest.iter().all(|id| !seen.contains(id)));
}

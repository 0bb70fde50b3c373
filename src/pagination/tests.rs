//! Tests for pagination module

use super::*;
use crate::backend::{Backend, BackendKind, FieldFilter, MemoryBackend};
use crate::config::PaginationConfig;
use crate::error::{Error, Result};
use crate::token::PageToken;
use crate::types::{Key, Keyed, Record};
use pretty_assertions::assert_eq;
use std::cell::RefCell;

// ============================================================================
// Test Backend
// ============================================================================

/// Memory backend that records calls and can be told to fail
struct ScriptedBackend {
    inner: MemoryBackend,
    calls: RefCell<Vec<String>>,
    count_error: Option<fn() -> Error>,
    fail_fetches: bool,
}

impl ScriptedBackend {
    fn new(inner: MemoryBackend) -> Self {
        Self {
            inner,
            calls: RefCell::new(Vec::new()),
            count_error: None,
            fail_fetches: false,
        }
    }

    fn sequential(last: Key) -> Self {
        Self::new(MemoryBackend::sequential(1, last))
    }

    fn failing_count(mut self, error: fn() -> Error) -> Self {
        self.count_error = Some(error);
        self
    }

    fn failing_fetches(mut self) -> Self {
        self.fail_fetches = true;
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.borrow_mut().push(call);
        if self.fail_fetches {
            return Err(Error::timeout("fetch canceled"));
        }
        Ok(())
    }
}

impl Backend for ScriptedBackend {
    type Item = Record;
    type Filter = FieldFilter;

    fn kind(&self) -> BackendKind {
        self.inner.kind()
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn fetch_offset(&self, limit: u64, offset: u64, filter: &FieldFilter) -> Result<Vec<Record>> {
        self.record(format!("offset({limit},{offset})"))?;
        self.inner.fetch_offset(limit, offset, filter)
    }

    fn fetch_before(
        &self,
        limit: u64,
        anchor: Option<Key>,
        filter: &FieldFilter,
    ) -> Result<Vec<Record>> {
        self.record(format!("before({limit},{anchor:?})"))?;
        self.inner.fetch_before(limit, anchor, filter)
    }

    fn fetch_after(&self, limit: u64, anchor: Key, filter: &FieldFilter) -> Result<Vec<Record>> {
        self.record(format!("after({limit},{anchor})"))?;
        self.inner.fetch_after(limit, anchor, filter)
    }

    fn count(&self, filter: &FieldFilter) -> Result<u64> {
        self.calls.borrow_mut().push("count".to_string());
        match self.count_error {
            Some(error) => Err(error()),
            None => self.inner.count(filter),
        }
    }

    fn count_capped(&self, filter: &FieldFilter, cap: u64) -> Result<u64> {
        self.calls.borrow_mut().push(format!("count_capped({cap})"));
        match self.count_error {
            Some(error) => Err(error()),
            None => self.inner.count_capped(filter, cap),
        }
    }
}

fn config() -> PaginationConfig {
    PaginationConfig::default()
        .with_max_numbered_pages(10)
        .with_max_limit(50)
}

fn paginator(backend: ScriptedBackend) -> Paginator<ScriptedBackend> {
    Paginator::new(backend, config()).unwrap()
}

fn keys<T: Keyed>(collection: &PaginatedCollection<T>) -> Vec<Key> {
    collection.items().iter().map(Keyed::key).collect()
}

fn page(
    paginator: &Paginator<ScriptedBackend>,
    token: PageToken,
    limit: u32,
) -> Result<PaginatedCollection<Record>> {
    paginator.paginate(&PaginationRequest::new(token, limit), &FieldFilter::all())
}

fn is_strictly_descending(keys: &[Key]) -> bool {
    keys.windows(2).all(|w| w[0] > w[1])
}

// ============================================================================
// Request / Collection Tests
// ============================================================================

#[test]
fn test_request_from_params() {
    let config = config();
    let request = PaginationRequest::from_params("b40", Some("500"), &config).unwrap();
    assert_eq!(request.token, PageToken::CursorBefore(Some(40)));
    assert_eq!(request.limit, 50);
    assert_eq!(request.count_hint, CountHint::Compute);

    let request = PaginationRequest::from_params(None::<&str>, None, &config).unwrap();
    assert_eq!(request.token, PageToken::Numbered(1));
    assert_eq!(request.limit, 20);

    assert!(matches!(
        PaginationRequest::from_params("1.5", None, &config),
        Err(Error::InvalidPageToken { .. })
    ));
}

#[test]
fn test_collection_total_pages() {
    let collection = PaginatedCollection::numbered(
        vec![Record::new(1)],
        20,
        1,
        TotalCount::Exact(41),
        10,
    );
    assert_eq!(collection.total_pages(), Some(3));

    let collection =
        PaginatedCollection::numbered(Vec::<Record>::new(), 0, 1, TotalCount::Exact(41), 10);
    assert_eq!(collection.total_pages(), Some(1));

    let collection =
        PaginatedCollection::numbered(Vec::<Record>::new(), 20, 1, TotalCount::Exact(0), 10);
    assert_eq!(collection.total_pages(), Some(0));
    assert!(collection.is_first_page());
    assert!(collection.is_last_page());
}

#[test]
fn test_collection_page_zero_is_first_page() {
    let collection = PaginatedCollection::numbered(
        vec![Record::new(3), Record::new(2)],
        2,
        0,
        TotalCount::Exact(3),
        10,
    );
    assert_eq!(collection.current_page(), Some(1));
    assert!(collection.is_first_page());
    assert!(!collection.is_last_page());
}

#[test]
fn test_collection_trims_to_limit() {
    let collection = PaginatedCollection::cursor(
        PaginationMode::CursorBefore,
        (1..=5).map(Record::new).collect(),
        3,
        5,
        10,
    );
    assert_eq!(collection.len(), 3);
    assert_eq!(collection.raw_fetch_size(), 5);
    assert!(collection.total_pages().is_none());
}

#[test]
fn test_total_count_values() {
    assert_eq!(TotalCount::Exact(5).value(), 5);
    assert_eq!(TotalCount::AtLeast(51).value(), 51);
    assert_eq!(TotalCount::Unknown { sentinel: 1_000_000 }.value(), 1_000_000);
    assert!(TotalCount::Exact(5).is_exact());
    assert!(!TotalCount::Unknown { sentinel: 9 }.is_exact());
}

// ============================================================================
// Mode Switch Tests
// ============================================================================

#[test]
fn test_resolve_strategy() {
    let paginator = paginator(ScriptedBackend::sequential(10));

    assert_eq!(
        paginator.resolve(PageToken::Numbered(1)).unwrap(),
        StrategyKind::Offset
    );
    assert_eq!(
        paginator.resolve(PageToken::Numbered(9)).unwrap(),
        StrategyKind::Offset
    );
    assert_eq!(
        paginator.resolve(PageToken::Numbered(10)).unwrap(),
        StrategyKind::Cursor
    );
    assert_eq!(
        paginator.resolve(PageToken::CursorBefore(Some(50))).unwrap(),
        StrategyKind::Cursor
    );
    assert_eq!(
        paginator.resolve(PageToken::CursorAfter(50)).unwrap(),
        StrategyKind::Cursor
    );
    assert!(matches!(
        paginator.resolve(PageToken::Numbered(11)),
        Err(Error::PageLimitExceeded {
            page: 11,
            max_numbered_pages: 10
        })
    ));
}

#[test]
fn test_cursor_token_ignores_ceiling() {
    let paginator = Paginator::new(
        ScriptedBackend::sequential(100),
        config().with_max_numbered_pages(1),
    )
    .unwrap();
    let collection = paginator
        .paginate_params("b50", Some("5"), CountHint::Compute, &FieldFilter::all())
        .unwrap();
    assert_eq!(collection.mode(), PaginationMode::CursorBefore);
    assert_eq!(keys(&collection), vec![49, 48, 47, 46, 45]);
}

#[test]
fn test_numbered_page_at_ceiling_uses_cursor() {
    let paginator = paginator(ScriptedBackend::sequential(100));
    let collection = page(&paginator, PageToken::Numbered(10), 5).unwrap();

    assert_eq!(collection.mode(), PaginationMode::CursorBefore);
    assert_eq!(collection.current_page(), None);
    assert_eq!(collection.total_count(), None);
    assert_eq!(keys(&collection), vec![100, 99, 98, 97, 96]);
    assert_eq!(paginator.backend().calls(), vec!["before(6,None)"]);
}

#[test]
fn test_page_limit_exceeded_before_backend_call() {
    let paginator = paginator(ScriptedBackend::sequential(100));
    let err = page(&paginator, PageToken::Numbered(11), 5).unwrap_err();

    assert!(matches!(err, Error::PageLimitExceeded { .. }));
    assert!(err.is_client_error());
    assert!(paginator.backend().calls().is_empty());
}

#[test]
fn test_invalid_token_before_backend_call() {
    let paginator = paginator(ScriptedBackend::sequential(100));
    for raw in ["xyz", "1.5", "-1", "ab12"] {
        let err = paginator
            .paginate_params(raw, None, CountHint::Compute, &FieldFilter::all())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPageToken { .. }), "{raw}");
    }
    assert!(paginator.backend().calls().is_empty());
}

#[test]
fn test_invalid_config_rejected() {
    let result = Paginator::new(
        ScriptedBackend::sequential(1),
        PaginationConfig::default().with_max_limit(0),
    );
    assert!(matches!(result, Err(Error::InvalidConfigValue { .. })));
}

// ============================================================================
// Offset Strategy Tests
// ============================================================================

#[test]
fn test_offset_first_page() {
    let paginator = paginator(ScriptedBackend::sequential(23));
    let collection = page(&paginator, PageToken::Numbered(1), 5).unwrap();

    assert_eq!(collection.mode(), PaginationMode::Numbered);
    assert_eq!(keys(&collection), vec![23, 22, 21, 20, 19]);
    assert_eq!(collection.current_page(), Some(1));
    assert_eq!(collection.total_count(), Some(TotalCount::Exact(23)));
    assert_eq!(collection.total_pages(), Some(5));
    assert_eq!(collection.raw_fetch_size(), 5);
    assert!(collection.is_first_page());
    assert!(!collection.is_last_page());
    assert_eq!(paginator.backend().calls(), vec!["offset(5,0)", "count"]);
}

#[test]
fn test_offset_boundaries_across_pages() {
    let paginator = paginator(ScriptedBackend::sequential(23));
    for n in 1..=5u64 {
        let collection = page(&paginator, PageToken::Numbered(n), 5).unwrap();
        assert_eq!(collection.current_page(), Some(n));
        assert_eq!(collection.is_first_page(), n == 1);
        assert_eq!(collection.is_last_page(), n >= 5);
        assert!(collection.len() <= 5);
    }

    let last = page(&paginator, PageToken::Numbered(5), 5).unwrap();
    assert_eq!(keys(&last), vec![3, 2, 1]);
}

#[test]
fn test_offset_past_end_is_empty_last_page() {
    let paginator = paginator(ScriptedBackend::sequential(7));
    let collection = page(&paginator, PageToken::Numbered(4), 5).unwrap();
    assert!(collection.is_empty());
    assert!(collection.is_last_page());
}

#[test]
fn test_offset_clamps_limit() {
    let paginator = paginator(ScriptedBackend::sequential(200));
    let collection = page(&paginator, PageToken::Numbered(2), 5000).unwrap();
    assert_eq!(collection.limit(), 50);
    assert_eq!(collection.len(), 50);
    assert_eq!(collection.first_key(), Some(150));

    let collection = page(&paginator, PageToken::Numbered(1), 0).unwrap();
    assert_eq!(collection.limit(), 1);
    assert_eq!(keys(&collection), vec![200]);
}

#[test]
fn test_offset_zero_page_clamped() {
    let strategy = OffsetStrategy::new(config());
    let backend = ScriptedBackend::sequential(5);
    let collection = strategy
        .execute(
            &backend,
            &PaginationRequest::new(PageToken::Numbered(0), 2),
            &FieldFilter::all(),
        )
        .unwrap();
    assert_eq!(collection.current_page(), Some(1));
    assert_eq!(keys(&collection), vec![5, 4]);
}

#[test]
fn test_offset_strategy_rejects_cursor_token() {
    let strategy = OffsetStrategy::new(config());
    let backend = ScriptedBackend::sequential(5);
    let result = strategy.execute(
        &backend,
        &PaginationRequest::new(PageToken::CursorAfter(1), 2),
        &FieldFilter::all(),
    );
    assert!(result.is_err());
    assert!(backend.calls().is_empty());
}

#[test]
fn test_offset_is_idempotent() {
    let paginator = paginator(ScriptedBackend::sequential(40));
    let a = page(&paginator, PageToken::Numbered(3), 7).unwrap();
    let b = page(&paginator, PageToken::Numbered(3), 7).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_offset_with_filter() {
    let backend = ScriptedBackend::new(MemoryBackend::new((1..=20).map(|id| {
        Record::new(id).with_field("kind", if id % 4 == 0 { "x" } else { "y" })
    })));
    let paginator = paginator(backend);
    let collection = paginator
        .paginate(
            &PaginationRequest::new(PageToken::Numbered(2), 2),
            &FieldFilter::all().eq("kind", "x"),
        )
        .unwrap();
    assert_eq!(keys(&collection), vec![12, 8]);
    assert_eq!(collection.total_count(), Some(TotalCount::Exact(5)));
    assert_eq!(collection.total_pages(), Some(3));
}

#[test]
fn test_fetch_failure_propagates() {
    let paginator = paginator(ScriptedBackend::sequential(10).failing_fetches());
    let err = page(&paginator, PageToken::Numbered(1), 5).unwrap_err();
    assert!(err.is_timeout());

    let err = page(&paginator, PageToken::CursorAfter(3), 5).unwrap_err();
    assert!(matches!(err, Error::StatementTimeout { .. }));
}

// ============================================================================
// Count Estimator Tests
// ============================================================================

#[test]
fn test_count_explicit_skips_backend() {
    let paginator = paginator(ScriptedBackend::sequential(30));
    let request = PaginationRequest::new(PageToken::Numbered(1), 10)
        .with_count_hint(CountHint::Explicit(7));
    let collection = paginator.paginate(&request, &FieldFilter::all()).unwrap();

    assert_eq!(collection.total_count(), Some(TotalCount::Exact(7)));
    assert_eq!(paginator.backend().calls(), vec!["offset(10,0)"]);
}

#[test]
fn test_count_skip_uses_unknown_sentinel() {
    let paginator = paginator(ScriptedBackend::sequential(30));
    let request =
        PaginationRequest::new(PageToken::Numbered(2), 10).with_count_hint(CountHint::Skip);
    let collection = paginator.paginate(&request, &FieldFilter::all()).unwrap();

    assert_eq!(
        collection.total_count(),
        Some(TotalCount::Unknown { sentinel: 1_000_000 })
    );
    assert_eq!(collection.total_pages(), Some(100_000));
    assert!(!collection.is_last_page());
    assert_eq!(paginator.backend().calls(), vec!["offset(10,10)"]);
}

#[test]
fn test_count_timeout_falls_back_to_sentinel() {
    let backend = ScriptedBackend::sequential(30)
        .failing_count(|| Error::timeout("canceling statement due to statement timeout"));
    let paginator = paginator(backend);
    let collection = page(&paginator, PageToken::Numbered(1), 10).unwrap();

    assert_eq!(keys(&collection).len(), 10);
    assert_eq!(
        collection.total_count(),
        Some(TotalCount::Unknown { sentinel: 1_000_000 })
    );
}

#[test]
fn test_count_other_failure_propagates() {
    let backend = ScriptedBackend::sequential(30).failing_count(|| Error::database("disk gone"));
    let paginator = paginator(backend);
    let err = page(&paginator, PageToken::Numbered(1), 10).unwrap_err();
    assert!(matches!(err, Error::Database { .. }));
}

#[test]
fn test_count_search_index_is_capped() {
    let backend = ScriptedBackend::new(
        MemoryBackend::sequential(1, 500).with_kind(BackendKind::SearchIndex),
    );
    let paginator = paginator(backend);
    let collection = page(&paginator, PageToken::Numbered(1), 5).unwrap();

    // 10 pages * 5 items + 1
    assert_eq!(
        paginator.backend().calls(),
        vec!["offset(5,0)", "count_capped(51)"]
    );
    assert_eq!(collection.total_count(), Some(TotalCount::AtLeast(51)));
    assert_eq!(collection.total_pages(), Some(11));
}

#[test]
fn test_count_search_index_below_cap_is_exact() {
    let estimator = CountEstimator::new(&config());
    let backend = MemoryBackend::sequential(1, 12).with_kind(BackendKind::SearchIndex);
    let total = estimator
        .estimate(&backend, &FieldFilter::all(), CountHint::Compute, 5)
        .unwrap();
    assert_eq!(total, TotalCount::Exact(12));
    assert_eq!(estimator.search_cap(5), 51);
    assert_eq!(estimator.sentinel(), 1_000_000);
}

// ============================================================================
// Cursor Strategy Tests
// ============================================================================

#[test]
fn test_cursor_before_anchor() {
    let paginator = paginator(ScriptedBackend::sequential(100));
    let collection = page(&paginator, PageToken::CursorBefore(Some(40)), 5).unwrap();

    assert_eq!(collection.mode(), PaginationMode::CursorBefore);
    assert_eq!(keys(&collection), vec![39, 38, 37, 36, 35]);
    assert_eq!(collection.raw_fetch_size(), 6);
    assert!(!collection.is_first_page());
    assert!(!collection.is_last_page());
    assert_eq!(collection.total_count(), None);
    assert_eq!(paginator.backend().calls(), vec!["before(6,Some(40))"]);
}

#[test]
fn test_cursor_before_without_anchor_is_newest() {
    let paginator = paginator(ScriptedBackend::sequential(100));
    let from_none = page(&paginator, PageToken::CursorBefore(None), 4).unwrap();
    let from_zero = paginator
        .paginate_params("b0", Some("4"), CountHint::Compute, &FieldFilter::all())
        .unwrap();
    assert_eq!(keys(&from_none), vec![100, 99, 98, 97]);
    assert_eq!(from_none, from_zero);
}

#[test]
fn test_cursor_before_last_page() {
    let paginator = paginator(ScriptedBackend::sequential(100));
    let collection = page(&paginator, PageToken::CursorBefore(Some(4)), 5).unwrap();
    assert_eq!(keys(&collection), vec![3, 2, 1]);
    assert!(collection.is_last_page());

    // Exactly `limit` rows left: no probe row, still the last page
    let collection = page(&paginator, PageToken::CursorBefore(Some(6)), 5).unwrap();
    assert_eq!(keys(&collection), vec![5, 4, 3, 2, 1]);
    assert!(collection.is_last_page());
}

#[test]
fn test_cursor_after_reverses_to_descending() {
    let paginator = paginator(ScriptedBackend::sequential(100));
    let collection = page(&paginator, PageToken::CursorAfter(40), 5).unwrap();

    assert_eq!(collection.mode(), PaginationMode::CursorAfter);
    assert_eq!(keys(&collection), vec![45, 44, 43, 42, 41]);
    assert_eq!(collection.raw_fetch_size(), 6);
    assert!(!collection.is_first_page());
    assert!(!collection.is_last_page());
    assert_eq!(paginator.backend().calls(), vec!["after(6,40)"]);
}

#[test]
fn test_cursor_after_reaching_newest() {
    let paginator = paginator(ScriptedBackend::sequential(100));
    let collection = page(&paginator, PageToken::CursorAfter(97), 5).unwrap();
    assert_eq!(keys(&collection), vec![100, 99, 98]);
    assert!(collection.is_first_page());
}

#[test]
fn test_cursor_results_respect_anchor_and_order() {
    let backend = ScriptedBackend::new(MemoryBackend::new(
        [3, 8, 15, 16, 23, 42, 57, 91].map(Record::new),
    ));
    let paginator = paginator(backend);

    for anchor in [0, 10, 16, 50, 100] {
        let after = page(&paginator, PageToken::CursorAfter(anchor), 3).unwrap();
        let after_keys = keys(&after);
        assert!(after_keys.len() <= 3);
        assert!(is_strictly_descending(&after_keys));
        assert!(after_keys.iter().all(|&k| k > anchor));

        let before = page(&paginator, PageToken::CursorBefore(Some(anchor)), 3).unwrap();
        let before_keys = keys(&before);
        assert!(before_keys.len() <= 3);
        assert!(is_strictly_descending(&before_keys));
        assert!(before_keys.iter().all(|&k| k < anchor));
    }
}

#[test]
fn test_keyset_walk_visits_every_item_once() {
    for (size, limit) in [(1, 1), (10, 3), (25, 5), (26, 5), (103, 7)] {
        let paginator = paginator(ScriptedBackend::sequential(size));
        let mut token = PageToken::CursorBefore(None);
        let mut seen = Vec::new();

        loop {
            let collection = page(&paginator, token, limit).unwrap();
            seen.extend(keys(&collection));
            if collection.is_last_page() {
                break;
            }
            let next = paginator.nav_links(&collection).next.unwrap();
            token = next;
        }

        let expected: Vec<Key> = (1..=size).rev().collect();
        assert_eq!(seen, expected, "size {size}, limit {limit}");
    }
}

#[test]
fn test_keyset_walk_back_toward_newest() {
    let paginator = paginator(ScriptedBackend::sequential(20));
    let mut token = PageToken::CursorAfter(0);
    let mut pages = Vec::new();

    loop {
        let collection = page(&paginator, token, 6).unwrap();
        pages.push(keys(&collection));
        if collection.is_first_page() {
            break;
        }
        token = paginator.nav_links(&collection).prev.unwrap();
    }

    assert_eq!(
        pages,
        vec![
            vec![6, 5, 4, 3, 2, 1],
            vec![12, 11, 10, 9, 8, 7],
            vec![18, 17, 16, 15, 14, 13],
            vec![20, 19],
        ]
    );
}

#[test]
fn test_cursor_is_idempotent() {
    let paginator = paginator(ScriptedBackend::sequential(60));
    let a = page(&paginator, PageToken::CursorAfter(12), 9).unwrap();
    let b = page(&paginator, PageToken::CursorAfter(12), 9).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_cursor_stable_under_insertion() {
    let mut backend = MemoryBackend::sequential(1, 30);
    let before = Paginator::new(backend.clone(), config())
        .unwrap()
        .paginate(
            &PaginationRequest::new(PageToken::CursorBefore(Some(20)), 5),
            &FieldFilter::all(),
        )
        .unwrap();

    backend.insert(Record::new(31));
    backend.insert(Record::new(32));
    let after = Paginator::new(backend, config())
        .unwrap()
        .paginate(
            &PaginationRequest::new(PageToken::CursorBefore(Some(20)), 5),
            &FieldFilter::all(),
        )
        .unwrap();

    assert_eq!(before, after);
}

// ============================================================================
// Window Integration
// ============================================================================

#[test]
fn test_paginator_window_only_for_numbered() {
    let paginator = paginator(ScriptedBackend::sequential(100));

    let numbered = page(&paginator, PageToken::Numbered(3), 10).unwrap();
    let window = paginator.window(&numbered).unwrap();
    assert_eq!(window.current(), Some(3));
    assert_eq!(window.pages(), vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);

    let cursor = page(&paginator, PageToken::CursorAfter(3), 10).unwrap();
    assert!(paginator.window(&cursor).is_none());
}

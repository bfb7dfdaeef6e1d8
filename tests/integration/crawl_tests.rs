//! Integration tests for the crawl engine
//!
//! These tests drive complete crawls over in-memory page graphs, with a
//! manual clock so that deadline behaviour is deterministic.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use wordcrawl::crawler::{crawl, CrawlResult, CrawlSettings, CrawlerKind};
use wordcrawl::page::InMemoryPageSource;
use wordcrawl::{Clock, IgnorePatterns, ManualClock, Page, PageResult, PageSource};

/// A -> B -> C -> A, with words x on A, x y on B, nothing on C
fn cycle() -> InMemoryPageSource {
    InMemoryPageSource::new()
        .with_page("A", Page::from_parts(&[("x", 1)], &["B"]))
        .with_page("B", Page::from_parts(&[("x", 1), ("y", 1)], &["C"]))
        .with_page("C", Page::from_parts(&[], &["A"]))
}

/// A links to B and C, which both link to D
fn diamond() -> InMemoryPageSource {
    InMemoryPageSource::new()
        .with_page("A", Page::from_parts(&[("a", 1)], &["B", "C"]))
        .with_page("B", Page::from_parts(&[("b", 1), ("shared", 1)], &["D"]))
        .with_page("C", Page::from_parts(&[("c", 1), ("shared", 1)], &["D"]))
        .with_page("D", Page::from_parts(&[("d", 1), ("shared", 3)], &[]))
}

async fn run(
    kind: CrawlerKind,
    settings: CrawlSettings,
    source: impl PageSource + 'static,
) -> CrawlResult {
    crawl(kind, settings, Arc::new(source), Arc::new(ManualClock::new()))
        .await
        .expect("crawl should start")
}

fn counts(pairs: &[(&str, u64)]) -> HashMap<String, u64> {
    pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_cycle_is_visited_once_at_any_parallelism() {
    for parallelism in [1, 2, 8] {
        let settings = CrawlSettings::new(["A"])
            .with_max_depth(10)
            .with_parallelism(parallelism);
        let result = run(CrawlerKind::Parallel, settings, cycle()).await;

        assert_eq!(result.urls_visited, 3, "parallelism {}", parallelism);
        assert_eq!(
            result.word_counts,
            counts(&[("x", 2), ("y", 1)]),
            "parallelism {}",
            parallelism
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_branching_graph_with_back_link() {
    // A -> {B, C}, B -> {A}, C -> {}
    let source = InMemoryPageSource::new()
        .with_page("A", Page::from_parts(&[("x", 1)], &["B", "C"]))
        .with_page("B", Page::from_parts(&[("x", 1)], &["A"]))
        .with_page("C", Page::from_parts(&[("y", 1)], &[]));

    for parallelism in [1, 2, 8] {
        let settings = CrawlSettings::new(["A"])
            .with_max_depth(2)
            .with_parallelism(parallelism);
        let result = run(CrawlerKind::Parallel, settings, source.clone()).await;

        assert_eq!(result.urls_visited, 3, "parallelism {}", parallelism);
        assert_eq!(result.word_counts, counts(&[("x", 2), ("y", 1)]));
    }
}

#[tokio::test]
async fn test_max_depth_zero_visits_nothing() {
    let settings = CrawlSettings::new(["A"]).with_max_depth(0);
    let result = run(CrawlerKind::Parallel, settings, cycle()).await;

    assert_eq!(result.urls_visited, 0);
    assert!(result.word_counts.is_empty());
}

#[tokio::test]
async fn test_max_depth_one_visits_only_seeds() {
    let settings = CrawlSettings::new(["A"]).with_max_depth(1);
    let result = run(CrawlerKind::Parallel, settings, cycle()).await;

    assert_eq!(result.urls_visited, 1);
    assert_eq!(result.word_counts, counts(&[("x", 1)]));
}

#[tokio::test]
async fn test_ignored_seed_is_never_visited() {
    let settings = CrawlSettings::new(["A"])
        .with_max_depth(10)
        .with_ignore_patterns(IgnorePatterns::compile(&["A"]).unwrap());
    let result = run(CrawlerKind::Parallel, settings, cycle()).await;

    assert_eq!(result.urls_visited, 0);
    assert!(result.word_counts.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_ignore_pattern_must_match_whole_url() {
    let source = InMemoryPageSource::new()
        .with_page("http://site/", Page::from_parts(&[("home", 1)], &["http://site/private/1", "http://site/public"]))
        .with_page("http://site/private/1", Page::from_parts(&[("secret", 1)], &[]))
        .with_page("http://site/public", Page::from_parts(&[("open", 1)], &[]));
    let settings = CrawlSettings::new(["http://site/"])
        .with_max_depth(3)
        .with_ignore_patterns(IgnorePatterns::compile(&["private", "http://site/private/.*"]).unwrap());
    let result = run(CrawlerKind::Parallel, settings, source).await;

    assert_eq!(result.urls_visited, 2);
    assert_eq!(result.word_counts, counts(&[("home", 1), ("open", 1)]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_diamond_counts_shared_page_once() {
    let settings = CrawlSettings::new(["A"])
        .with_max_depth(5)
        .with_parallelism(4);
    let result = run(CrawlerKind::Parallel, settings, diamond()).await;

    assert_eq!(result.urls_visited, 4);
    assert_eq!(
        result.word_counts,
        counts(&[("a", 1), ("b", 1), ("c", 1), ("d", 1), ("shared", 5)])
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_failing_page_does_not_stop_siblings() {
    let source = InMemoryPageSource::new()
        .with_page("A", Page::from_parts(&[("root", 1)], &["missing", "B"]))
        .with_page("B", Page::from_parts(&[("leaf", 1)], &[]));
    let settings = CrawlSettings::new(["A"]).with_max_depth(3).with_parallelism(2);
    let result = run(CrawlerKind::Parallel, settings, source).await;

    // The failed URL was still claimed
    assert_eq!(result.urls_visited, 3);
    assert_eq!(result.word_counts, counts(&[("root", 1), ("leaf", 1)]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_duplicate_seeds_are_counted_once() {
    let settings = CrawlSettings::new(["A", "A", "B"]).with_max_depth(1);
    let result = run(CrawlerKind::Parallel, settings, cycle()).await;

    assert_eq!(result.urls_visited, 2);
    assert_eq!(result.word_counts, counts(&[("x", 2), ("y", 1)]));
}

/// Reads `base` on the first call and an hour later on every call after
#[derive(Debug)]
struct JumpingClock {
    base: Instant,
    started: AtomicBool,
}

impl Clock for JumpingClock {
    fn now(&self) -> Instant {
        if self.started.swap(true, Ordering::SeqCst) {
            self.base + Duration::from_secs(3600)
        } else {
            self.base
        }
    }
}

#[tokio::test]
async fn test_deadline_passed_before_first_step_visits_nothing() {
    for kind in [CrawlerKind::Parallel, CrawlerKind::Sequential] {
        let clock = Arc::new(JumpingClock {
            base: Instant::now(),
            started: AtomicBool::new(false),
        });
        let settings = CrawlSettings::new(["A"])
            .with_max_depth(10)
            .with_timeout(Duration::from_secs(1));
        let result = crawl(kind, settings, Arc::new(cycle()), clock).await.unwrap();

        assert_eq!(result.urls_visited, 0, "{}", kind);
        assert!(result.word_counts.is_empty(), "{}", kind);
    }
}

/// Moves the clock forward whenever a chosen page is loaded
struct AdvancingSource {
    inner: InMemoryPageSource,
    clock: Arc<ManualClock>,
    trigger: &'static str,
    by: Duration,
}

#[async_trait]
impl PageSource for AdvancingSource {
    async fn parse(&self, url: &str) -> PageResult<Page> {
        if url == self.trigger {
            self.clock.advance(self.by);
        }
        self.inner.parse(url).await
    }
}

#[tokio::test]
async fn test_deadline_passing_mid_run_stops_expansion() {
    for kind in [CrawlerKind::Parallel, CrawlerKind::Sequential] {
        let clock = Arc::new(ManualClock::new());
        let source = AdvancingSource {
            inner: cycle(),
            clock: clock.clone(),
            trigger: "B",
            by: Duration::from_secs(5),
        };
        let settings = CrawlSettings::new(["A"])
            .with_max_depth(10)
            .with_timeout(Duration::from_secs(1));
        let result = crawl(kind, settings, Arc::new(source), clock).await.unwrap();

        // B is still merged; C is rejected at its step
        assert_eq!(result.urls_visited, 2, "{}", kind);
        assert_eq!(result.word_counts, counts(&[("x", 2), ("y", 1)]), "{}", kind);
    }
}

#[tokio::test]
async fn test_clock_exactly_at_deadline_still_visits() {
    let clock = Arc::new(ManualClock::new());
    let source = AdvancingSource {
        inner: cycle(),
        clock: clock.clone(),
        trigger: "A",
        by: Duration::from_secs(1),
    };
    let settings = CrawlSettings::new(["A"])
        .with_max_depth(10)
        .with_timeout(Duration::from_secs(1));
    let result = crawl(CrawlerKind::Parallel, settings, Arc::new(source), clock)
        .await
        .unwrap();

    assert_eq!(result.urls_visited, 3);
}

/// Tracks the largest number of `parse` calls running at once
struct ConcurrencyProbe {
    inner: InMemoryPageSource,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

#[async_trait]
impl PageSource for ConcurrencyProbe {
    async fn parse(&self, url: &str) -> PageResult<Page> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.inner.parse(url).await
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallelism_bounds_concurrent_page_loads() {
    let leaves: Vec<String> = (0..12).map(|i| format!("leaf{}", i)).collect();
    let leaf_refs: Vec<&str> = leaves.iter().map(String::as_str).collect();

    let mut inner = InMemoryPageSource::new().with_page("root", Page::from_parts(&[("root", 1)], &leaf_refs));
    for leaf in &leaves {
        inner.insert(leaf.clone(), Page::from_parts(&[("leaf", 1)], &[]));
    }

    let probe = Arc::new(ConcurrencyProbe {
        inner,
        in_flight: AtomicUsize::new(0),
        max_in_flight: AtomicUsize::new(0),
    });
    let settings = CrawlSettings::new(["root"])
        .with_max_depth(2)
        .with_parallelism(3);
    let result = crawl(
        CrawlerKind::Parallel,
        settings,
        probe.clone(),
        Arc::new(ManualClock::new()),
    )
    .await
    .unwrap();

    assert_eq!(result.urls_visited, 13);
    assert_eq!(result.word_counts, counts(&[("root", 1), ("leaf", 12)]));

    let max = probe.max_in_flight.load(Ordering::SeqCst);
    assert!(max <= 3, "saw {} concurrent loads", max);
    assert!(max >= 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_single_permit_deep_chain_completes() {
    let mut source = InMemoryPageSource::new();
    for i in 0..50 {
        let next = format!("p{}", i + 1);
        source.insert(format!("p{}", i), Page::from_parts(&[("w", 1)], &[next.as_str()]));
    }
    let settings = CrawlSettings::new(["p0"])
        .with_max_depth(100)
        .with_parallelism(1);

    let result = tokio::time::timeout(
        Duration::from_secs(10),
        run(CrawlerKind::Parallel, settings, source),
    )
    .await
    .expect("crawl should not deadlock");

    // p50 has no page, so it is claimed but contributes no words
    assert_eq!(result.urls_visited, 51);
    assert_eq!(result.word_counts, counts(&[("w", 50)]));
}

/// Yields to the scheduler before every page load so that steps interleave
struct Interleaving(InMemoryPageSource);

#[async_trait]
impl PageSource for Interleaving {
    async fn parse(&self, url: &str) -> PageResult<Page> {
        tokio::task::yield_now().await;
        self.0.parse(url).await
    }
}

const DENSE_PAGES: usize = 400;

/// Outbound links of page `i` in the dense graph
///
/// Every page links to its successor, so all pages are reachable from
/// `n0` within `DENSE_PAGES` steps. The other links add back-edges to the
/// seed, to earlier pages and to a handful of hub pages that most pages
/// share.
fn dense_links(i: usize) -> Vec<String> {
    let n = DENSE_PAGES;
    [(i + 1) % n, 0, i / 2, (i * 7 + 3) % n, (i * 13 + 5) % n, i % 10, 42]
        .iter()
        .map(|target| format!("n{}", target))
        .collect()
}

/// Words on page `i` in the dense graph
fn dense_words(i: usize) -> Vec<(String, u64)> {
    vec![
        ("common".to_string(), 1),
        (format!("bucket{}", i % 10), (i % 5 + 1) as u64),
        (format!("page{}", i), 2),
    ]
}

fn dense_graph() -> InMemoryPageSource {
    let mut source = InMemoryPageSource::new();
    for i in 0..DENSE_PAGES {
        let links = dense_links(i);
        source.insert(
            format!("n{}", i),
            Page::new(dense_words(i).into_iter().collect(), links),
        );
    }
    source
}

fn dense_expected_counts() -> HashMap<String, u64> {
    let mut expected = HashMap::new();
    for i in 0..DENSE_PAGES {
        for (word, count) in dense_words(i) {
            *expected.entry(word).or_insert(0) += count;
        }
    }
    expected
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_dense_graph_totals_independent_of_parallelism() {
    let expected = dense_expected_counts();
    assert_eq!(expected["common"], DENSE_PAGES as u64);

    for parallelism in [1, 4, 32] {
        let settings = CrawlSettings::new(["n0"])
            .with_max_depth(DENSE_PAGES as u32 + 1)
            .with_parallelism(parallelism);
        let result = run(
            CrawlerKind::Parallel,
            settings,
            Interleaving(dense_graph()),
        )
        .await;

        assert_eq!(result.urls_visited, DENSE_PAGES, "parallelism {}", parallelism);
        assert_eq!(result.word_counts, expected, "parallelism {}", parallelism);
    }

    let settings = CrawlSettings::new(["n0"]).with_max_depth(DENSE_PAGES as u32 + 1);
    let sequential = run(CrawlerKind::Sequential, settings, dense_graph()).await;
    assert_eq!(sequential.urls_visited, DENSE_PAGES);
    assert_eq!(sequential.word_counts, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_dense_graph_from_many_seeds() {
    let seeds: Vec<String> = (0..DENSE_PAGES).step_by(3).map(|i| format!("n{}", i)).collect();
    let settings = CrawlSettings::new(seeds)
        .with_max_depth(DENSE_PAGES as u32 + 1)
        .with_parallelism(16);
    let result = run(CrawlerKind::Parallel, settings, Interleaving(dense_graph())).await;

    assert_eq!(result.urls_visited, DENSE_PAGES);
    assert_eq!(result.word_counts, dense_expected_counts());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_long_chain_completes_for_both_crawlers() {
    let mut source = InMemoryPageSource::new();
    for i in 0..20_000 {
        let next = format!("p{}", i + 1);
        source.insert(format!("p{}", i), Page::from_parts(&[("w", 1)], &[next.as_str()]));
    }

    for kind in [CrawlerKind::Sequential, CrawlerKind::Parallel] {
        let settings = CrawlSettings::new(["p0"])
            .with_max_depth(100_000)
            .with_parallelism(4);
        let result = run(kind, settings, source.clone()).await;

        // p20000 has no page but is still claimed
        assert_eq!(result.urls_visited, 20_001, "{}", kind);
        assert_eq!(result.word_counts, counts(&[("w", 20_000)]), "{}", kind);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_sequential_matches_parallel() {
    let graphs = [cycle(), diamond()];
    for graph in graphs {
        let settings = CrawlSettings::new(["A"]).with_max_depth(10).with_parallelism(4);
        let parallel = run(CrawlerKind::Parallel, settings.clone(), graph.clone()).await;
        let sequential = run(CrawlerKind::Sequential, settings, graph).await;

        assert_eq!(parallel, sequential);
    }
}

#[tokio::test]
async fn test_invalid_settings_are_rejected() {
    let settings = CrawlSettings::new(["A"]).with_timeout(Duration::ZERO);
    let result = crawl(
        CrawlerKind::Parallel,
        settings,
        Arc::new(cycle()),
        Arc::new(ManualClock::new()),
    )
    .await;

    assert!(result.is_err());
}

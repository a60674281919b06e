// tests/feed_properties.rs
// Synthetic suite: seeded random snapshots checked against the feed invariants.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use today_feed::config::FeedConfig;
use today_feed::page::is_within;
use today_feed::{ContentItem, Feed, FeedAssembler, RandomShuffler};

const CATEGORIES: [&str; 6] = ["Top News", "Tech", "Sports", "Cars", "Culture", ""];
const DEAL_CATEGORIES: [&str; 4] = ["Gadgets", "Home", "Travel", ""];
const PUBLISHERS: [&str; 6] = ["alpha", "beta", "gamma", "delta", "off", "unknown"];

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 4, 20, 12, 0, 0).unwrap()
}

fn enabled_map() -> HashMap<String, bool> {
    let mut m: HashMap<String, bool> = ["alpha", "beta", "gamma", "delta"]
        .iter()
        .map(|p| (p.to_string(), true))
        .collect();
    m.insert("off".into(), false);
    m
}

fn pick<'a>(rng: &mut StdRng, xs: &[&'a str]) -> &'a str {
    xs[rng.random_range(0..xs.len())]
}

fn snapshot(rng: &mut StdRng, n: usize) -> Vec<ContentItem> {
    (0..n)
        .map(|i| {
            let publisher = pick(rng, &PUBLISHERS);
            let url = format!("https://{publisher}.example/item/{i}");
            let mut it = if rng.random_bool(0.2) {
                ContentItem::deal(format!("deal-{i}"), url, pick(rng, &DEAL_CATEGORIES))
            } else {
                ContentItem::article(format!("art-{i}"), url)
            };
            it = it
                .with_category(pick(rng, &CATEGORIES))
                .with_publisher(publisher, publisher.to_uppercase())
                .with_url_hash(format!("h{i}"));
            if rng.random_bool(0.7) {
                it = it.with_image(format!("https://img.example/{i}.jpg"));
            }
            if rng.random_bool(0.8) {
                it = it.with_score(rng.random_range(0.0..50.0));
            }
            if rng.random_bool(0.9) {
                let age = Duration::minutes(rng.random_range(-600..(7 * 24 * 60)));
                it = it.published(now() - age);
            }
            it
        })
        .collect()
}

fn history(rng: &mut StdRng) -> Vec<String> {
    PUBLISHERS
        .iter()
        .filter(|_| rng.random_bool(0.3))
        .map(|p| format!("{p}.example"))
        .collect()
}

fn check_invariants(input: &[ContentItem], feed: &Feed, cfg: &FeedConfig) {
    let enabled = enabled_map();
    let input_hashes: HashSet<&str> = input.iter().map(|i| i.url_hash.as_str()).collect();

    // No duplication, subset of input.
    let mut seen = HashSet::new();
    for it in feed.items() {
        assert!(seen.insert(it.url_hash.clone()), "duplicate {}", it.url_hash);
        assert!(input_hashes.contains(it.url_hash.as_str()));
        assert_eq!(enabled.get(&it.publisher_id), Some(&true), "disabled leaked");
    }

    // Cardinality bounds and empty-group omission.
    assert!(feed.featured_deals.len() <= 3);
    assert!(feed.pages.len() <= cfg.max_pages);
    for page in &feed.pages {
        assert!(!page.articles.is_empty() && page.articles.len() <= 13);
        assert!(page.articles.iter().all(|a| a.has_image() && a.is_article()));
        assert!(page.random_articles.len() <= 4);
        assert!(page.deals.len() <= 3);
        assert!(page.deals.iter().all(ContentItem::is_deal));
        if let Some(g) = &page.items_by_category {
            assert!(!g.items.is_empty() && g.items.len() <= 3);
            assert!(g.items.iter().all(|a| a.category == g.category_name));
        }
        if let Some(g) = &page.items_by_publisher {
            assert!(!g.items.is_empty() && g.items.len() <= 3);
            assert!(g.items.iter().all(|a| a.publisher_id == g.publisher_id));
        }
        for a in &page.random_articles {
            assert!(is_within(a, now(), Duration::hours(48)));
        }
    }

    // Generation only stops once every image-bearing enabled article is placed.
    let placed: HashSet<&str> = feed.items().map(|i| i.url_hash.as_str()).collect();
    for it in input {
        let on = enabled.get(&it.publisher_id).copied().unwrap_or(false);
        if on && it.is_article() && it.has_image() {
            assert!(placed.contains(it.url_hash.as_str()), "image article left behind");
        }
    }
}

#[test]
fn synthetic_snapshots_hold_invariants() {
    let cfg = FeedConfig::default();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for round in 0..200u64 {
        let n = rng.random_range(0..160);
        let input = snapshot(&mut rng, n);
        let hosts = history(&mut rng);
        let mut asm = FeedAssembler::with_shuffler(cfg.clone(), RandomShuffler::seeded(round));
        let feed = asm.assemble(input.clone(), &enabled_map(), &hosts, now());
        check_invariants(&input, &feed, &cfg);
    }
}

#[test]
fn same_seed_same_feed() {
    let cfg = FeedConfig::default();
    let mut rng = StdRng::seed_from_u64(99);
    let input = snapshot(&mut rng, 120);
    let a = FeedAssembler::with_shuffler(cfg.clone(), RandomShuffler::seeded(3)).assemble(
        input.clone(),
        &enabled_map(),
        &[],
        now(),
    );
    let b = FeedAssembler::with_shuffler(cfg, RandomShuffler::seeded(3)).assemble(
        input,
        &enabled_map(),
        &[],
        now(),
    );
    assert_eq!(a, b);
}

#[test]
fn page_ceiling_bounds_large_inputs() {
    let cfg = FeedConfig {
        max_pages: 5,
        headlines_per_page: 1,
        ..FeedConfig::default()
    };
    let input: Vec<ContentItem> = (0..50)
        .map(|i| {
            ContentItem::article(format!("a{i}"), format!("https://alpha.example/{i}"))
                .with_publisher("alpha", "Alpha")
                .with_image("i")
        })
        .collect();
    let feed = FeedAssembler::with_shuffler(cfg, RandomShuffler::seeded(1)).assemble(
        input,
        &enabled_map(),
        &[],
        now(),
    );
    assert_eq!(feed.pages.len(), 5);
}

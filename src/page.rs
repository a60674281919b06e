//! # Page generation
//! Builds feed pages by drawing destructively from the shared article and deal
//! pools, one category/deal focus per page.
//!
//! Slot order per page (each slot sees the pool left by the previous one):
//! headlines → category group → deals → publisher group → recent articles.
//! Generation stops at the first page without a single image-bearing
//! headline, or at `max_pages`.

use chrono::{DateTime, Duration, Utc};
use metrics::counter;
use serde::{Deserialize, Serialize};

use crate::config::FeedConfig;
use crate::item::ContentItem;
use crate::pool::Pool;
use crate::priority::Rotation;

/// Articles sharing one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub category_name: String,
    pub items: Vec<ContentItem>,
}

/// Articles sharing one publisher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublisherGroup {
    pub publisher_id: String,
    /// Display name taken from the anchor article.
    pub name: String,
    pub items: Vec<ContentItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Headlines, shown singly or paired by the renderer.
    pub articles: Vec<ContentItem>,
    /// Recently published, no category/publisher constraint.
    pub random_articles: Vec<ContentItem>,
    pub deals: Vec<ContentItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_by_category: Option<CategoryGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_by_publisher: Option<PublisherGroup>,
}

impl Page {
    /// Every item placed on this page, slot by slot.
    pub fn items(&self) -> impl Iterator<Item = &ContentItem> {
        self.articles
            .iter()
            .chain(self.items_by_category.iter().flat_map(|g| g.items.iter()))
            .chain(self.deals.iter())
            .chain(self.items_by_publisher.iter().flat_map(|g| g.items.iter()))
            .chain(self.random_articles.iter())
    }
}

/// Working pools owned by one assembly run.
#[derive(Debug, Clone, Default)]
pub struct Pools {
    pub articles: Pool<ContentItem>,
    pub deals: Pool<ContentItem>,
}

/// Published within `window` of `now`, in either direction. Items without a
/// parsed publish time never qualify.
pub fn is_within(item: &ContentItem, now: DateTime<Utc>, window: Duration) -> bool {
    item.published_at
        .is_some_and(|at| (now - at).num_seconds().abs() < window.num_seconds())
}

/// Build the next page, or `None` when no headline can be filled.
pub fn generate_page(
    pools: &mut Pools,
    category: Option<&str>,
    deals_category: Option<&str>,
    now: DateTime<Utc>,
    cfg: &FeedConfig,
) -> Option<Page> {
    let headlines = pools
        .articles
        .take_matching(ContentItem::has_image, cfg.headlines_per_page);
    if headlines.is_empty() {
        return None;
    }

    let items_by_category = category.and_then(|cat| {
        let items = pools
            .articles
            .take_matching(|a| a.category == cat, cfg.group_size);
        (!items.is_empty()).then(|| CategoryGroup {
            category_name: cat.to_string(),
            items,
        })
    });

    let mut deals = match deals_category {
        Some(dc) => pools
            .deals
            .take_matching(|d| d.offers_category() == Some(dc), cfg.deals_per_page),
        None => Vec::new(),
    };
    if deals.len() < cfg.deals_per_page {
        let missing = cfg.deals_per_page - deals.len();
        deals.extend(pools.deals.take_front(missing));
    }

    let items_by_publisher = publisher_group(&mut pools.articles, cfg.group_size);

    let window = Duration::try_hours(cfg.recent_window_hours)
        .unwrap_or_else(|| Duration::hours(48));
    let random_articles = pools
        .articles
        .take_matching(|a| is_within(a, now, window), cfg.recent_per_page);

    Some(Page {
        articles: headlines,
        random_articles,
        deals,
        items_by_category,
        items_by_publisher,
    })
}

/// Anchor on the first article with a publisher and pull up to `size`
/// articles from that publisher, anchor included.
fn publisher_group(articles: &mut Pool<ContentItem>, size: usize) -> Option<PublisherGroup> {
    let anchor = articles.find(|a| a.has_publisher())?;
    let publisher_id = anchor.publisher_id.clone();
    let name = anchor.publisher_name.clone();
    let items = articles.take_matching(|a| a.publisher_id == publisher_id, size);
    (!items.is_empty()).then_some(PublisherGroup {
        publisher_id,
        name,
        items,
    })
}

/// Generate pages until the pools can no longer fill a headline slot.
pub fn generate_pages(
    pools: &mut Pools,
    mut rotation: Rotation,
    now: DateTime<Utc>,
    cfg: &FeedConfig,
) -> Vec<Page> {
    let mut pages = Vec::new();
    loop {
        if pages.len() >= cfg.max_pages {
            tracing::debug!(target: "feed", max_pages = cfg.max_pages, "page ceiling reached");
            counter!("feed_page_cap_hits_total").increment(1);
            break;
        }
        let (category, deals_category) = rotation.next_focus();
        match generate_page(pools, category.as_deref(), deals_category.as_deref(), now, cfg) {
            Some(page) => pages.push(page),
            None => break,
        }
    }
    counter!("feed_pages_generated_total").increment(pages.len() as u64);
    pages
}

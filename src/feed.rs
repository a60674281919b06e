//! # Feed assembly
//! End-to-end pipeline over one snapshot:
//! filter → weight → partition → shuffle top slice → rotation → featured → pages.
//!
//! Inputs are taken by value; the run owns its pools and never touches the
//! caller's collections. The only suspension point is the optional history
//! lookup in [`FeedAssembler::assemble_with_history`], awaited before any
//! pipeline work starts.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use metrics::{counter, gauge};
use serde::{Deserialize, Serialize};

use crate::config::FeedConfig;
use crate::history::{collect_recent_hosts, HistoryProvider};
use crate::item::ContentItem;
use crate::normalize::partition;
use crate::page::{generate_pages, Page, Pools};
use crate::pool::Pool;
use crate::priority::Rotation;
use crate::shuffle::{shuffle_top, RandomShuffler, Shuffler};
use crate::sources::filter_enabled;
use crate::telemetry::{anon_hash, ensure_metrics_described};
use crate::weighting::weight_by_history;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_article: Option<ContentItem>,
    #[serde(default)]
    pub featured_deals: Vec<ContentItem>,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Feed {
    /// No content to show; callers render an empty state rather than an error.
    pub fn is_empty(&self) -> bool {
        self.featured_article.is_none() && self.featured_deals.is_empty() && self.pages.is_empty()
    }

    /// Every placed item: featured article, featured deals, then pages in order.
    pub fn items(&self) -> impl Iterator<Item = &ContentItem> {
        self.featured_article
            .iter()
            .chain(self.featured_deals.iter())
            .chain(self.pages.iter().flat_map(Page::items))
    }
}

/// Runs the pipeline with a config and a top-slice shuffler.
#[derive(Debug, Clone)]
pub struct FeedAssembler<S: Shuffler> {
    cfg: FeedConfig,
    shuffler: S,
}

impl FeedAssembler<RandomShuffler<rand::rngs::StdRng>> {
    /// Random top-slice order from an entropy-seeded RNG.
    pub fn new(cfg: FeedConfig) -> Self {
        Self::with_shuffler(cfg, RandomShuffler::seeded(rand::random()))
    }
}

impl<S: Shuffler> FeedAssembler<S> {
    /// Configs built in code go through the same clamping as loaded ones.
    pub fn with_shuffler(cfg: FeedConfig, shuffler: S) -> Self {
        Self {
            cfg: cfg.sanitized(),
            shuffler,
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.cfg
    }

    /// Acquire history hosts from `provider`, then assemble. Provider failures
    /// fall back to no history signal.
    pub async fn assemble_with_history(
        &mut self,
        items: Vec<ContentItem>,
        enabled: &HashMap<String, bool>,
        provider: &dyn HistoryProvider,
        now: DateTime<Utc>,
    ) -> Feed {
        let hosts = collect_recent_hosts(provider, self.cfg.history_max_results).await;
        self.assemble(items, enabled, &hosts, now)
    }

    /// Assemble one feed from a snapshot.
    pub fn assemble(
        &mut self,
        items: Vec<ContentItem>,
        enabled: &HashMap<String, bool>,
        recent_hosts: &[String],
        now: DateTime<Utc>,
    ) -> Feed {
        ensure_metrics_described();
        let cfg = &self.cfg;
        counter!("feed_items_in_total").increment(items.len() as u64);

        let (items, dropped) = filter_enabled(items, enabled);
        counter!("feed_items_filtered_total").increment(dropped as u64);

        let ranked = weight_by_history(items, recent_hosts, cfg);
        let mut parts = partition(ranked, now, cfg);
        shuffle_top(&mut parts.articles, cfg.shuffle_top, &mut self.shuffler);

        let rotation = Rotation::build(&parts.articles, &parts.deals, &cfg.lead_category);

        let mut pools = Pools {
            articles: Pool::from(parts.articles),
            deals: Pool::from(parts.deals),
        };
        let lead = cfg.lead_category.as_str();
        let featured_article = pools
            .articles
            .take_matching(|a| a.category == lead, 1)
            .into_iter()
            .next();
        let featured_deals = pools.deals.take_front(cfg.featured_deals);

        let pages = generate_pages(&mut pools, rotation, now, cfg);

        gauge!("feed_last_run_ts").set(now.timestamp() as f64);
        tracing::info!(
            target: "feed",
            featured = ?featured_article.as_ref().map(|a| anon_hash(&a.url)),
            featured_deals = featured_deals.len(),
            pages = pages.len(),
            filtered = dropped,
            skipped = parts.skipped,
            left_articles = pools.articles.len(),
            left_deals = pools.deals.len(),
            "feed assembled"
        );

        Feed {
            featured_article,
            featured_deals,
            pages,
        }
    }
}

/// One-shot assembly with default config and a random top-slice order.
pub fn assemble_feed(
    items: Vec<ContentItem>,
    enabled: &HashMap<String, bool>,
    recent_hosts: &[String],
    now: DateTime<Utc>,
) -> Feed {
    FeedAssembler::new(FeedConfig::default()).assemble(items, enabled, recent_hosts, now)
}

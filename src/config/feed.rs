// src/config/feed.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const ENV_FEED_CONFIG_PATH: &str = "FEED_CONFIG_PATH";
pub const DEFAULT_FEED_CONFIG_PATH: &str = "config/feed.toml";

// Hard limits of the page layout.
pub const MAX_HEADLINES_PER_PAGE: usize = 13;
pub const MAX_RECENT_PER_PAGE: usize = 4;
pub const MAX_GROUP_SIZE: usize = 3;
pub const MAX_DEALS_PER_PAGE: usize = 3;
pub const MAX_FEATURED_DEALS: usize = 3;
pub const MAX_PAGES: usize = 4000;
/// One year; keeps the recency window representable as a `TimeDelta`.
pub const MAX_RECENT_WINDOW_HOURS: i64 = 24 * 365;

/// Category that always leads the rotation and supplies the featured article.
pub const LEAD_CATEGORY: &str = "Top News";

fn default_lead_category() -> String {
    LEAD_CATEGORY.to_string()
}
fn default_shuffle_top() -> usize {
    25
}
fn default_headlines_per_page() -> usize {
    13
}
fn default_recent_per_page() -> usize {
    4
}
fn default_group_size() -> usize {
    3
}
fn default_deals_per_page() -> usize {
    3
}
fn default_featured_deals() -> usize {
    3
}
fn default_recent_window_hours() -> i64 {
    48
}
fn default_max_pages() -> usize {
    4000
}
fn default_history_penalty() -> f64 {
    5.0
}
fn default_missing_score() -> f64 {
    1000.0
}
fn default_history_max_results() -> usize {
    200
}
fn default_time_suffix() -> String {
    " UTC".to_string()
}

/// Tunables for one assembly run. Every field has a default, so an empty
/// TOML document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_lead_category")]
    pub lead_category: String,
    /// Size of the leading article slice that gets shuffled.
    #[serde(default = "default_shuffle_top")]
    pub shuffle_top: usize,
    #[serde(default = "default_headlines_per_page")]
    pub headlines_per_page: usize,
    #[serde(default = "default_recent_per_page")]
    pub recent_per_page: usize,
    /// Items per category/publisher affinity group.
    #[serde(default = "default_group_size")]
    pub group_size: usize,
    #[serde(default = "default_deals_per_page")]
    pub deals_per_page: usize,
    #[serde(default = "default_featured_deals")]
    pub featured_deals: usize,
    #[serde(default = "default_recent_window_hours")]
    pub recent_window_hours: i64,
    /// Hard ceiling on generated pages.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    /// Subtracted from the base score when the item host was visited recently.
    #[serde(default = "default_history_penalty")]
    pub history_penalty: f64,
    /// Sort key for items without a score.
    #[serde(default = "default_missing_score")]
    pub missing_score: f64,
    #[serde(default = "default_history_max_results")]
    pub history_max_results: usize,
    /// Zone marker appended to the raw publish time before parsing.
    #[serde(default = "default_time_suffix")]
    pub time_suffix: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            lead_category: default_lead_category(),
            shuffle_top: default_shuffle_top(),
            headlines_per_page: default_headlines_per_page(),
            recent_per_page: default_recent_per_page(),
            group_size: default_group_size(),
            deals_per_page: default_deals_per_page(),
            featured_deals: default_featured_deals(),
            recent_window_hours: default_recent_window_hours(),
            max_pages: default_max_pages(),
            history_penalty: default_history_penalty(),
            missing_score: default_missing_score(),
            history_max_results: default_history_max_results(),
            time_suffix: default_time_suffix(),
        }
    }
}

impl FeedConfig {
    /// Parse from a TOML string and sanitize.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: FeedConfig = toml::from_str(s).context("parsing feed config")?;
        Ok(cfg.sanitized())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading feed config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Resolve config using env var + fallbacks:
    /// 1) $FEED_CONFIG_PATH (must exist)
    /// 2) config/feed.toml
    /// 3) built-in defaults
    ///
    /// `.env` is read first so the env var can live there in local setups.
    pub fn load_default() -> Result<Self> {
        let _ = dotenvy::dotenv();

        if let Ok(p) = std::env::var(ENV_FEED_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_FEED_CONFIG_PATH} points to non-existent path"));
            }
            return Self::load_from_file(&pb);
        }
        let fallback = PathBuf::from(DEFAULT_FEED_CONFIG_PATH);
        if fallback.exists() {
            return Self::load_from_file(&fallback);
        }
        Ok(Self::default())
    }

    /// Replace unusable values with defaults and clamp slot sizes to the
    /// page layout's hard limits. Zero sizes that would stall generation fall
    /// back to defaults; oversized ones are capped.
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();
        if self.lead_category.trim().is_empty() {
            self.lead_category = d.lead_category;
        }
        if self.headlines_per_page == 0 {
            self.headlines_per_page = d.headlines_per_page;
        }
        self.headlines_per_page = self.headlines_per_page.min(MAX_HEADLINES_PER_PAGE);
        self.recent_per_page = self.recent_per_page.min(MAX_RECENT_PER_PAGE);
        self.group_size = self.group_size.min(MAX_GROUP_SIZE);
        self.deals_per_page = self.deals_per_page.min(MAX_DEALS_PER_PAGE);
        self.featured_deals = self.featured_deals.min(MAX_FEATURED_DEALS);
        if self.max_pages == 0 {
            self.max_pages = d.max_pages;
        }
        self.max_pages = self.max_pages.min(MAX_PAGES);
        if self.recent_window_hours <= 0 {
            self.recent_window_hours = d.recent_window_hours;
        }
        self.recent_window_hours = self.recent_window_hours.min(MAX_RECENT_WINDOW_HOURS);
        if !self.history_penalty.is_finite() {
            self.history_penalty = d.history_penalty;
        }
        if !self.missing_score.is_finite() {
            self.missing_score = d.missing_score;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs};

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = FeedConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, FeedConfig::default());
        assert_eq!(cfg.headlines_per_page, 13);
        assert_eq!(cfg.max_pages, 4000);
        assert_eq!(cfg.lead_category, "Top News");
    }

    #[test]
    fn partial_override_and_sanitize() {
        let cfg = FeedConfig::from_toml_str(
            r#"
            headlines_per_page = 0
            recent_window_hours = -3
            group_size = 5
            lead_category = "  "
            "#,
        )
        .unwrap();
        assert_eq!(cfg.headlines_per_page, 13);
        assert_eq!(cfg.recent_window_hours, 48);
        assert_eq!(cfg.group_size, 3);
        assert_eq!(cfg.lead_category, "Top News");
    }

    #[test]
    fn huge_recency_window_is_capped() {
        let cfg = FeedConfig::from_toml_str("recent_window_hours = 9223372036854775807").unwrap();
        assert_eq!(cfg.recent_window_hours, MAX_RECENT_WINDOW_HOURS);
        assert!(chrono::Duration::try_hours(cfg.recent_window_hours).is_some());
    }

    #[test]
    fn oversized_slots_are_clamped_to_layout_limits() {
        let cfg = FeedConfig::from_toml_str(
            r#"
            headlines_per_page = 40
            recent_per_page = 9
            group_size = 7
            deals_per_page = 5
            featured_deals = 10
            max_pages = 100000
            "#,
        )
        .unwrap();
        assert_eq!(cfg.headlines_per_page, 13);
        assert_eq!(cfg.recent_per_page, 4);
        assert_eq!(cfg.group_size, 3);
        assert_eq!(cfg.deals_per_page, 3);
        assert_eq!(cfg.featured_deals, 3);
        assert_eq!(cfg.max_pages, 4000);

        // zero group size stays valid: affinity groups off
        assert_eq!(FeedConfig::from_toml_str("group_size = 0").unwrap().group_size, 0);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(FeedConfig::from_toml_str(r#"max_pages = "many""#).is_err());
    }

    #[serial_test::serial]
    #[test]
    fn default_uses_env_then_fallbacks() {
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();
        env::remove_var(ENV_FEED_CONFIG_PATH);

        // Nothing on disk → defaults
        let cfg = FeedConfig::load_default().unwrap();
        assert_eq!(cfg, FeedConfig::default());

        // config/feed.toml picked up
        fs::create_dir_all(tmp.path().join("config")).unwrap();
        fs::write(tmp.path().join(DEFAULT_FEED_CONFIG_PATH), "max_pages = 7").unwrap();
        assert_eq!(FeedConfig::load_default().unwrap().max_pages, 7);

        // Env wins
        let p = tmp.path().join("other.toml");
        fs::write(&p, "max_pages = 9").unwrap();
        env::set_var(ENV_FEED_CONFIG_PATH, p.display().to_string());
        assert_eq!(FeedConfig::load_default().unwrap().max_pages, 9);

        // Missing env target is an error
        env::set_var(ENV_FEED_CONFIG_PATH, tmp.path().join("nope.toml"));
        assert!(FeedConfig::load_default().is_err());
        env::remove_var(ENV_FEED_CONFIG_PATH);

        env::set_current_dir(&old).unwrap();
    }
}

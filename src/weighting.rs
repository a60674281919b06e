//! # Relevance weighting
//! Applies the browsing-history host penalty and ranks items by the result.
//!
//! Scores sort ascending, so subtracting the penalty moves a recently visited
//! host *earlier* in the feed. That is the behavior downstream consumers see
//! today and it is kept as is; see DESIGN.md before changing the sign.

use crate::config::FeedConfig;
use crate::history::host_of;
use crate::item::ContentItem;
use std::collections::HashSet;

/// Resolved sort key: weighted points, or the sentinel when unscored.
pub fn sort_key(item: &ContentItem, missing_score: f64) -> f64 {
    item.points.unwrap_or(missing_score)
}

/// Set `points` for each item and stable-sort ascending by it.
pub fn weight_by_history(
    mut items: Vec<ContentItem>,
    recent_hosts: &[String],
    cfg: &FeedConfig,
) -> Vec<ContentItem> {
    let hosts: HashSet<&str> = recent_hosts.iter().map(String::as_str).collect();
    let mut matched = 0usize;

    for item in items.iter_mut() {
        let hit = !hosts.is_empty()
            && host_of(&item.url).is_some_and(|h| hosts.contains(h.as_str()));
        item.points = item.score.map(|s| if hit { s - cfg.history_penalty } else { s });
        if hit {
            matched += 1;
        }
    }

    let missing = cfg.missing_score;
    items.sort_by(|a, b| sort_key(a, missing).total_cmp(&sort_key(b, missing)));

    tracing::debug!(target: "feed", items = items.len(), history_matches = matched, "weighted");
    items
}

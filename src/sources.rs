//! # Sources
//! Publisher records and the enablement filter applied before ranking.
//!
//! The engine itself only consumes an `id -> enabled` map; [`enabled_map`]
//! is the default merge of system default and user override for hosts that
//! do not bring their own.

use crate::item::ContentItem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A content provider with independent default and user enablement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    pub publisher_id: String,
    pub publisher_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub publisher_logo_padded: String,
    /// System default.
    #[serde(default)]
    pub enabled: bool,
    /// Explicit user choice; `None` defers to `enabled`.
    #[serde(default)]
    pub user_enabled: Option<bool>,
}

impl Publisher {
    pub fn is_enabled(&self) -> bool {
        self.user_enabled.unwrap_or(self.enabled)
    }
}

/// Effective enablement per publisher id.
pub fn enabled_map<'a, I>(publishers: I) -> HashMap<String, bool>
where
    I: IntoIterator<Item = &'a Publisher>,
{
    publishers
        .into_iter()
        .map(|p| (p.publisher_id.clone(), p.is_enabled()))
        .collect()
}

/// Keep items whose publisher maps to `true`, preserving order.
/// Ids missing from the map count as disabled.
pub fn filter_enabled(
    items: Vec<ContentItem>,
    enabled: &HashMap<String, bool>,
) -> (Vec<ContentItem>, usize) {
    let before = items.len();
    let kept: Vec<ContentItem> = items
        .into_iter()
        .filter(|it| enabled.get(&it.publisher_id).copied().unwrap_or(false))
        .collect();
    let dropped = before - kept.len();
    (kept, dropped)
}

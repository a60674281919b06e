//! # Content items
//! Feed-eligible entries as delivered by the content source: articles and
//! product deals sharing one common shape.
//!
//! The wire shape keeps the source's snake_case keys and a `content_type`
//! discriminant (`"article"` | `"product"`). Unknown discriminants decode to
//! [`ItemKind::Other`] and are dropped later by the partitioner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content-type discriminant plus the per-kind fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "content_type", rename_all = "snake_case")]
pub enum ItemKind {
    Article,
    #[serde(rename = "product")]
    Deal {
        /// Deal-specific rotation key (e.g. "Companion Products").
        #[serde(default)]
        offers_category: String,
    },
    /// Placeholder for content types this engine does not place (sponsors, offers).
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(flatten)]
    pub kind: ItemKind,
    #[serde(default)]
    pub category: String,
    /// Raw publish time, UTC without zone marker: "2020-04-17 19:21:10".
    #[serde(default)]
    pub publish_time: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub url_hash: String,
    #[serde(default)]
    pub padded_img: String,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub publisher_id: String,
    #[serde(default)]
    pub publisher_name: String,
    /// Base relevance; lower is better.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Score after history weighting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_time: Option<String>,
    /// Parsed form of `publish_time`, filled in by normalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl ContentItem {
    fn with_kind(kind: ItemKind, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind,
            category: String::new(),
            publish_time: String::new(),
            title: title.into(),
            description: String::new(),
            url: url.into(),
            url_hash: String::new(),
            padded_img: String::new(),
            img: String::new(),
            publisher_id: String::new(),
            publisher_name: String::new(),
            score: None,
            points: None,
            relative_time: None,
            published_at: None,
        }
    }

    pub fn article(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self::with_kind(ItemKind::Article, title, url)
    }

    pub fn deal(
        title: impl Into<String>,
        url: impl Into<String>,
        offers_category: impl Into<String>,
    ) -> Self {
        Self::with_kind(
            ItemKind::Deal {
                offers_category: offers_category.into(),
            },
            title,
            url,
        )
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_publisher(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.publisher_id = id.into();
        self.publisher_name = name.into();
        self
    }

    pub fn with_image(mut self, padded_img: impl Into<String>) -> Self {
        self.padded_img = padded_img.into();
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_url_hash(mut self, hash: impl Into<String>) -> Self {
        self.url_hash = hash.into();
        self
    }

    /// Raw publish time in the source's `"%Y-%m-%d %H:%M:%S"` form.
    pub fn published(mut self, at: DateTime<Utc>) -> Self {
        self.publish_time = at.format(RAW_TIME_FORMAT).to_string();
        self
    }

    pub fn is_article(&self) -> bool {
        matches!(self.kind, ItemKind::Article)
    }

    pub fn is_deal(&self) -> bool {
        matches!(self.kind, ItemKind::Deal { .. })
    }

    pub fn offers_category(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Deal { offers_category } => Some(offers_category.as_str()),
            _ => None,
        }
    }

    /// Headline-eligible: the source supplied a padded image.
    pub fn has_image(&self) -> bool {
        !self.padded_img.is_empty()
    }

    pub fn has_publisher(&self) -> bool {
        !self.publisher_id.is_empty()
    }
}

/// Raw timestamp layout used by the content source.
pub const RAW_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Stable hex key for an item URL (SHA-256).
pub fn derive_url_hash(url: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(url.as_bytes());
    let mut out = String::with_capacity(64);
    for b in digest.iter() {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

//! # Item partitioning & normalization
//! Splits ranked items into article and deal buckets and fills in the display
//! fields the rendering layer reads: image, zoned publish time, relative label.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::config::FeedConfig;
use crate::item::{derive_url_hash, ContentItem, ItemKind, RAW_TIME_FORMAT};

/// Ranked items split by kind, rank order preserved within each bucket.
#[derive(Debug, Clone, Default)]
pub struct Partitioned {
    pub articles: Vec<ContentItem>,
    pub deals: Vec<ContentItem>,
    /// Items of a kind the feed does not place.
    pub skipped: usize,
}

pub fn partition(items: Vec<ContentItem>, now: DateTime<Utc>, cfg: &FeedConfig) -> Partitioned {
    let mut out = Partitioned::default();
    for item in items {
        let item = normalize_item(item, now, cfg);
        match item.kind {
            ItemKind::Article => out.articles.push(item),
            ItemKind::Deal { .. } => out.deals.push(item),
            ItemKind::Other => out.skipped += 1,
        }
    }
    out
}

/// Display normalization for one item.
pub fn normalize_item(mut item: ContentItem, now: DateTime<Utc>, cfg: &FeedConfig) -> ContentItem {
    item.img = item.padded_img.clone();
    if item.url_hash.is_empty() && !item.url.is_empty() {
        item.url_hash = derive_url_hash(&item.url);
    }

    if item.publish_time.trim().is_empty() {
        item.relative_time = None;
        item.published_at = None;
        return item;
    }

    item.published_at = parse_publish_time(&item.publish_time);
    item.publish_time = format!("{}{}", item.publish_time, cfg.time_suffix);
    item.relative_time = item.published_at.map(|at| relative_time_label(at, now));
    item
}

/// Raw source timestamps are UTC without a zone marker; RFC 3339 is accepted too.
pub fn parse_publish_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, RAW_TIME_FORMAT) {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// "<distance> ago", worded like date-fns `formatDistanceToNow`.
pub fn relative_time_label(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format!("{} ago", format_distance(published, now))
}

const MINUTES_IN_DAY: f64 = 1440.0;
const MINUTES_IN_MONTH: f64 = 43200.0;

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Distance between two instants in coarse English buckets (direction ignored).
pub fn format_distance(a: DateTime<Utc>, b: DateTime<Utc>) -> String {
    let seconds = (b - a).num_seconds().abs() as f64;
    let minutes = (seconds / 60.0).round();

    if minutes < 2.0 {
        return if minutes == 0.0 {
            "less than a minute".to_string()
        } else {
            "1 minute".to_string()
        };
    }
    if minutes < 45.0 {
        return plural(minutes as i64, "minute");
    }
    if minutes < 90.0 {
        return "about 1 hour".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        let hours = (minutes / 60.0).round() as i64;
        return format!("about {}", plural(hours, "hour"));
    }
    if minutes < 2520.0 {
        return "1 day".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        let days = (minutes / MINUTES_IN_DAY).round() as i64;
        return plural(days, "day");
    }
    if minutes < 2.0 * MINUTES_IN_MONTH {
        let months = (minutes / MINUTES_IN_MONTH).round() as i64;
        return format!("about {}", plural(months, "month"));
    }

    let months = (minutes / MINUTES_IN_MONTH).floor() as i64;
    if months < 12 {
        let nearest = (minutes / MINUTES_IN_MONTH).round() as i64;
        return plural(nearest, "month");
    }

    let into_year = months % 12;
    let years = months / 12;
    if into_year < 3 {
        format!("about {}", plural(years, "year"))
    } else if into_year < 9 {
        format!("over {}", plural(years, "year"))
    } else {
        format!("almost {}", plural(years + 1, "year"))
    }
}

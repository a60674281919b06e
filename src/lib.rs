// src/lib.rs
//! Feed-assembly engine: turns a snapshot of articles and deals into a
//! featured section plus diversified, paginated feed pages.
//!
//! ```ignore
//! let map = today_feed::sources::enabled_map(&publishers);
//! let feed = today_feed::assemble_feed(items, &map, &recent_hosts, chrono::Utc::now());
//! ```

pub mod config;
pub mod feed;
pub mod history;
pub mod item;
pub mod normalize;
pub mod page;
pub mod pool;
pub mod priority;
pub mod shuffle;
pub mod sources;
pub mod telemetry;
pub mod weighting;

// ---- Re-exports for stable public API ----
pub use crate::config::FeedConfig;
pub use crate::feed::{assemble_feed, Feed, FeedAssembler};
pub use crate::history::{HistoryProvider, StaticHistory};
pub use crate::item::{ContentItem, ItemKind};
pub use crate::page::{CategoryGroup, Page, PublisherGroup};
pub use crate::shuffle::{IdentityShuffler, RandomShuffler, Shuffler};
pub use crate::sources::{enabled_map, Publisher};

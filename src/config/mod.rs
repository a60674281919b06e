pub mod feed;

pub use feed::{FeedConfig, LEAD_CATEGORY};

//! Logging and metrics plumbing shared by the pipeline stages.
//!
//! The library never installs a metrics recorder; hosts that want the series
//! install one (e.g. a Prometheus exporter) before the first assembly.

use metrics::{describe_counter, describe_gauge};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_FEED_DEV_LOG: &str = "FEED_DEV_LOG";

/// One-time metrics registration (so series carry descriptions).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("feed_items_in_total", "Items handed to the assembler.");
        describe_counter!(
            "feed_items_filtered_total",
            "Items dropped because their publisher is disabled or unknown."
        );
        describe_counter!(
            "feed_history_errors_total",
            "History provider failures (assembly continued without history)."
        );
        describe_counter!("feed_pages_generated_total", "Pages produced.");
        describe_counter!(
            "feed_page_cap_hits_total",
            "Runs stopped by the page ceiling."
        );
        describe_gauge!("feed_last_run_ts", "Reference unix ts of the last assembly.");
    });
}

/// Short anonymized id for logging URLs without leaking browsing content.
pub(crate) fn anon_hash(text: &str) -> String {
    let mut h = crate::item::derive_url_hash(text);
    h.truncate(12);
    h
}

/// Dev logging gate: FEED_DEV_LOG=1 and a debug build.
pub fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_FEED_DEV_LOG).ok().as_deref() == Some("1");
    on && cfg!(debug_assertions)
}

/// Install a compact fmt subscriber for local runs. No-op unless
/// [`dev_logging_enabled`]; returns whether a subscriber was installed.
pub fn init_dev_tracing() -> bool {
    if !dev_logging_enabled() {
        return false;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("feed=debug,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init()
        .is_ok()
}

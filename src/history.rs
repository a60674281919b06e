//! history.rs: browsing-history signal for relevance weighting.
//!
//! History lives outside the engine; hosts hand it in either as a ready host
//! list or through a [`HistoryProvider`] that is awaited once per run.

use anyhow::Result;
use metrics::counter;
use url::Url;

/// Source of recently visited URLs (most recent first, at most `max_results`).
#[async_trait::async_trait]
pub trait HistoryProvider: Send + Sync {
    async fn recent_urls(&self, max_results: usize) -> Result<Vec<String>>;
    fn name(&self) -> &'static str;
}

/// In-memory provider over a fixed URL list.
#[derive(Debug, Clone, Default)]
pub struct StaticHistory {
    urls: Vec<String>,
}

impl StaticHistory {
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait::async_trait]
impl HistoryProvider for StaticHistory {
    async fn recent_urls(&self, max_results: usize) -> Result<Vec<String>> {
        Ok(self.urls.iter().take(max_results).cloned().collect())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Host component (`host[:port]`) of a URL, if it parses and has one.
pub fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Map visited URLs to hosts, skipping empty and unparseable entries.
pub fn hosts_from_urls<I, S>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    urls.into_iter()
        .filter(|u| !u.as_ref().is_empty())
        .filter_map(|u| host_of(u.as_ref()))
        .collect()
}

/// Ask the provider for recent URLs and reduce them to hosts.
///
/// A failing provider yields an empty list: weighting is an enhancement and
/// must not abort assembly.
pub async fn collect_recent_hosts(provider: &dyn HistoryProvider, max_results: usize) -> Vec<String> {
    match provider.recent_urls(max_results).await {
        Ok(urls) => {
            let hosts = hosts_from_urls(urls);
            tracing::debug!(target: "feed", provider = provider.name(), hosts = hosts.len(), "history hosts");
            hosts
        }
        Err(e) => {
            tracing::warn!(target: "feed", error = ?e, provider = provider.name(), "history provider error");
            counter!("feed_history_errors_total").increment(1);
            Vec::new()
        }
    }
}

// src/ingest/provider.rs
use async_trait::async_trait;
use metrics::counter;
use std::time::Duration;

use crate::error::FeedError;
use crate::ingest::types::FeedSource;

pub struct RssProvider {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl RssProvider {
    /// Serve a fixed document; used by tests and dry runs.
    pub fn from_fixture_str(s: &str) -> Self {
        Self {
            mode: Mode::Fixture(s.to_string()),
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("game-deals-watcher/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self {
            mode: Mode::Http {
                url: url.into(),
                client,
            },
        }
    }
}

#[async_trait]
impl FeedSource for RssProvider {
    async fn fetch_feed(&self) -> Result<String, FeedError> {
        match &self.mode {
            Mode::Fixture(s) => Ok(s.clone()),
            Mode::Http { url, client } => {
                tracing::info!(%url, "getting rss");
                get_text(client, url).await.map_err(|e| {
                    counter!("deals_fetch_errors_total").increment(1);
                    FeedError::fetch(url.as_str(), e)
                })
            }
        }
    }

    fn name(&self) -> &str {
        match &self.mode {
            Mode::Fixture(_) => "fixture",
            Mode::Http { url, .. } => url,
        }
    }
}

async fn get_text(client: &reqwest::Client, url: &str) -> reqwest::Result<String> {
    client.get(url).send().await?.error_for_status()?.text().await
}

// src/watcher.rs
//! One watcher instance = one ledger. A poll cycle is
//! fetch → decode → match → compose, run to completion.

use metrics::{counter, gauge};

use crate::error::FeedError;
use crate::ingest::config::WatcherConfig;
use crate::ingest::feed::decode_feed;
use crate::ingest::matcher::match_deals;
use crate::ingest::provider::RssProvider;
use crate::ingest::types::{FeedSource, SearchTerm};
use crate::ingest::ensure_metrics_described;
use crate::notify::{compose, NotificationPayload, NotifiedSet};

pub struct DealWatcher {
    search_terms: Option<Vec<SearchTerm>>,
    ledger: NotifiedSet,
    source: Box<dyn FeedSource>,
}

impl DealWatcher {
    pub fn new(search_terms: Option<Vec<SearchTerm>>, source: Box<dyn FeedSource>) -> Self {
        Self::with_ledger(search_terms, source, NotifiedSet::new())
    }

    /// Start from a pre-populated ledger.
    pub fn with_ledger(
        search_terms: Option<Vec<SearchTerm>>,
        source: Box<dyn FeedSource>,
        ledger: NotifiedSet,
    ) -> Self {
        ensure_metrics_described();
        Self {
            search_terms,
            ledger,
            source,
        }
    }

    pub fn from_config(cfg: &WatcherConfig) -> Self {
        Self::new(
            cfg.search_terms.clone(),
            Box::new(RssProvider::from_url(cfg.feed_url.clone())),
        )
    }

    pub fn ledger(&self) -> &NotifiedSet {
        &self.ledger
    }

    /// Terms as they currently stand (normalized after the first cycle).
    pub fn search_terms(&self) -> Option<&[SearchTerm]> {
        self.search_terms.as_deref()
    }

    /// Run one poll cycle.
    ///
    /// `Ok(None)` covers both "nothing new" and "no search terms configured";
    /// the latter is logged, not raised.
    pub async fn run(&mut self) -> Result<Option<NotificationPayload>, FeedError> {
        tracing::info!(source = self.source.name(), "running");
        counter!("deals_polls_total").increment(1);
        gauge!("deals_last_poll_ts").set(chrono::Utc::now().timestamp() as f64);

        if self.search_terms.is_none() {
            tracing::warn!("no search_terms configured");
            return Ok(None);
        }

        let body = self.source.fetch_feed().await?;
        self.process(&body)
    }

    /// Synchronous core of a cycle over an already fetched document.
    ///
    /// Decoding happens before anything else, so a malformed feed leaves the
    /// ledger untouched.
    pub fn process(&mut self, body: &str) -> Result<Option<NotificationPayload>, FeedError> {
        let Some(terms) = self.search_terms.as_mut() else {
            tracing::warn!("no search_terms configured");
            return Ok(None);
        };
        tracing::info!(
            terms = %serde_json::to_string(&terms).unwrap_or_default(),
            "my search terms"
        );

        let records = decode_feed(body)?;
        let deals = match_deals(&records, terms);
        let payload = compose(&deals, &mut self.ledger);

        tracing::info!(
            items = records.len(),
            matched = deals.len(),
            notified_total = self.ledger.len(),
            signal = payload.is_some(),
            "cycle done"
        );
        Ok(payload)
    }
}

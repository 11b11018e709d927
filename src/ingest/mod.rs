// src/ingest/mod.rs
pub mod config;
pub mod feed;
pub mod matcher;
pub mod normalize;
pub mod provider;
pub mod scheduler;
pub mod types;

use metrics::{describe_counter, describe_gauge, describe_histogram};
use once_cell::sync::OnceCell;

pub use feed::decode_feed;
pub use matcher::match_deals;
pub use normalize::{normalize_term, normalize_text};

/// One-time metrics registration (so series show up on /metrics).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("deals_polls_total", "Poll cycles started.");
        describe_counter!("deals_fetch_errors_total", "Feed fetch failures.");
        describe_counter!(
            "deals_decode_errors_total",
            "Feed documents rejected as malformed."
        );
        describe_counter!("deals_items_total", "Items decoded from the feed.");
        describe_counter!(
            "deals_matched_total",
            "Items matching at least one search term."
        );
        describe_counter!(
            "deals_notified_total",
            "Deals included in an outbound notification."
        );
        describe_histogram!("deals_decode_ms", "Feed decode time in milliseconds.");
        describe_gauge!("deals_last_poll_ts", "Unix ts of the last poll cycle.");
    });
}

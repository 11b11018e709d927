// src/lib.rs
// Public library surface for integration tests and the binary.

pub mod error;
pub mod ingest;
pub mod notify;
pub mod watcher;

// ---- Re-exports for stable public API ----
pub use crate::error::FeedError;
pub use crate::ingest::types::{DealRecord, FeedSource, SearchTerm};
pub use crate::notify::{compose, NotificationPayload, NotifiedSet, NotifierMux};
pub use crate::watcher::DealWatcher;

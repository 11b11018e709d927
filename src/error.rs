// src/error.rs
use thiserror::Error;

/// Failures that abort a poll cycle.
///
/// None of these leave partial state behind: fetch and decode both happen
/// before the ledger is touched.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("fetching feed from {url}")]
    Fetch {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("malformed feed document")]
    Malformed(#[from] quick_xml::de::DeError),

    #[error("malformed feed item #{index}: missing <{field}>")]
    MissingField { index: usize, field: &'static str },
}

impl FeedError {
    pub fn fetch<E>(url: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Fetch {
            url: url.into(),
            source: source.into(),
        }
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}

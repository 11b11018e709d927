// src/ingest/types.rs
use serde::{Deserialize, Serialize};

use crate::error::FeedError;

/// One posting pulled out of the forum feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DealRecord {
    pub title: String,
    pub link: String,
    pub description: String, // may carry embedded HTML
    pub published_at: String, // raw pubDate, never parsed
    pub identity: String,     // guid text, the dedup key
    pub identity_is_permanent_link: bool,
}

/// A configured search term.
///
/// Config files may list plain strings, bare numbers (`2077`) or `null`; all
/// three are accepted and normalized differently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SearchTerm {
    Text(String),
    Number(serde_json::Number),
    Absent,
}

impl SearchTerm {
    /// The string a record must contain to match this term.
    pub fn needle(&self) -> String {
        match self {
            SearchTerm::Text(s) => s.clone(),
            SearchTerm::Number(n) => number_needle(n),
            SearchTerm::Absent => String::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            SearchTerm::Text(s) => s.trim().is_empty(),
            SearchTerm::Number(_) => false,
            SearchTerm::Absent => true,
        }
    }
}

/// Whole-number floats render without a fraction (`2.0` → `"2"`), so a
/// term written as a float still hits "PS2".
fn number_needle(n: &serde_json::Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                return (f as i64).to_string();
            }
        }
    }
    n.to_string()
}

impl From<&str> for SearchTerm {
    fn from(s: &str) -> Self {
        SearchTerm::Text(s.to_string())
    }
}

impl From<String> for SearchTerm {
    fn from(s: String) -> Self {
        SearchTerm::Text(s)
    }
}

impl From<i64> for SearchTerm {
    fn from(n: i64) -> Self {
        SearchTerm::Number(n.into())
    }
}

#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the raw feed document.
    async fn fetch_feed(&self) -> Result<String, FeedError>;
    fn name(&self) -> &str;
}

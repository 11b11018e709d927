// src/notify/ledger.rs
use metrics::counter;
use std::collections::HashSet;

use super::{NotificationPayload, PayloadLink, LINK_LABEL, SIGNAL_COLOR, SIGNAL_NAME};
use crate::ingest::types::DealRecord;

/// Identities (feed guids) that have already been signaled.
///
/// Grows for the life of the process; nothing is evicted and nothing is
/// persisted, so a restart notifies current matches again.
#[derive(Debug, Clone, Default)]
pub struct NotifiedSet {
    seen: HashSet<String>,
}

impl NotifiedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.seen.contains(identity)
    }

    /// Returns `false` if the identity was already present.
    pub fn mark(&mut self, identity: impl Into<String>) -> bool {
        self.seen.insert(identity.into())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for NotifiedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            seen: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Signal text for a single deal.
pub fn generate_deal_text(deal: &DealRecord) -> String {
    format!("{}\n{}\n", deal.title, deal.link)
}

/// Build a payload for the candidates not yet in `ledger`, marking them.
///
/// Returns `None` when every candidate was already notified. Ledger entries
/// are written as soon as a candidate is selected.
///
/// The primary link is always `candidates[0]`, even when that deal was
/// notified in an earlier cycle and is absent from the message body.
pub fn compose(candidates: &[DealRecord], ledger: &mut NotifiedSet) -> Option<NotificationPayload> {
    let mut messages = Vec::new();

    for deal in candidates {
        if ledger.mark(deal.identity.as_str()) {
            messages.push(generate_deal_text(deal));
            messages.push("\n".to_string());
        }
    }

    if messages.is_empty() {
        return None;
    }
    let first = candidates.first()?;
    counter!("deals_notified_total").increment((messages.len() / 2) as u64);

    Some(NotificationPayload {
        name: SIGNAL_NAME.to_string(),
        color: SIGNAL_COLOR.to_string(),
        message: messages.join("\n"),
        messages,
        link: PayloadLink {
            url: first.link.clone(),
            label: LINK_LABEL.to_string(),
        },
    })
}

pub mod discord;
pub mod ledger;

use anyhow::Result;
use serde::Serialize;

pub use ledger::{compose, generate_deal_text, NotifiedSet};

pub const SIGNAL_NAME: &str = "New Game Deal!";
pub const SIGNAL_COLOR: &str = "#00FF00";
pub const LINK_LABEL: &str = "See this deal";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadLink {
    pub url: String,
    pub label: String,
}

/// One outbound "new deals" signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    pub name: String,
    pub color: String,
    /// Rendered deal blocks interleaved with blank separators.
    pub messages: Vec<String>,
    /// `messages` joined by newlines.
    pub message: String,
    pub link: PayloadLink,
}

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, payload: &NotificationPayload) -> Result<()>;
}

/// Writes the signal to the log. Default surface when no webhook is set.
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, payload: &NotificationPayload) -> Result<()> {
        tracing::info!(
            name = %payload.name,
            link = %payload.link.url,
            "{}",
            payload.message.trim_end()
        );
        Ok(())
    }
}

/// Fans a payload out to every configured surface.
pub struct NotifierMux {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierMux {
    /// Log always; Discord when `DISCORD_WEBHOOK_URL` is set.
    pub fn from_env() -> Self {
        let mut notifiers: Vec<Box<dyn Notifier>> = vec![Box::new(LogNotifier)];
        match std::env::var("DISCORD_WEBHOOK_URL") {
            Ok(url) if !url.trim().is_empty() => {
                notifiers.push(Box::new(discord::DiscordNotifier::new(url)));
            }
            _ => tracing::debug!("Discord disabled (no DISCORD_WEBHOOK_URL)"),
        }
        Self { notifiers }
    }

    /// Failures are logged per surface and never stop the others.
    pub async fn notify(&self, payload: &NotificationPayload) {
        for n in &self.notifiers {
            if let Err(e) = n.send(payload).await {
                tracing::warn!("notifier failed: {e:#}");
            }
        }
    }
}

#[async_trait::async_trait]
impl Notifier for NotifierMux {
    async fn send(&self, payload: &NotificationPayload) -> Result<()> {
        self.notify(payload).await;
        Ok(())
    }
}

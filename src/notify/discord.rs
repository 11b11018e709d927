use super::{NotificationPayload, Notifier};
use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Discord's hard limit on embed descriptions.
const MAX_DESCRIPTION: usize = 4096;

#[derive(Clone)]
pub struct DiscordNotifier {
    webhook: String,
    client: Client,
    timeout: Duration,
    max_retries: u8,
}

impl DiscordNotifier {
    pub fn new(webhook: String) -> Self {
        Self {
            webhook,
            client: Client::new(),
            timeout: Duration::from_secs(5),
            max_retries: 3,
        }
    }

    async fn post(&self, payload: &DiscordWebhookPayload) -> Result<()> {
        let mut attempt: u8 = 0;
        loop {
            attempt += 1;
            let res = self
                .client
                .post(&self.webhook)
                .timeout(self.timeout)
                .json(payload)
                .send()
                .await;

            let err = match res {
                Ok(rsp) => match rsp.error_for_status_ref() {
                    Ok(_) => return Ok(()),
                    Err(e) => anyhow!("Discord webhook HTTP error: {e}"),
                },
                Err(e) => anyhow!("Discord webhook request failed: {e}"),
            };

            if attempt >= self.max_retries {
                return Err(err);
            }
            tracing::debug!(attempt, error = %err, "retrying discord webhook");
            tokio::time::sleep(backoff(attempt)).await;
        }
    }
}

#[async_trait::async_trait]
impl Notifier for DiscordNotifier {
    async fn send(&self, payload: &NotificationPayload) -> Result<()> {
        self.post(&DiscordWebhookPayload::from_signal(payload)).await
    }
}

#[derive(Debug, Serialize)]
struct DiscordEmbed {
    title: String,
    description: String,
    url: String,
    color: u32,
}

#[derive(Debug, Serialize)]
struct DiscordWebhookPayload {
    content: Option<String>,
    embeds: Vec<DiscordEmbed>,
}

impl DiscordWebhookPayload {
    fn from_signal(p: &NotificationPayload) -> Self {
        let description: String = p.message.trim_end().chars().take(MAX_DESCRIPTION).collect();
        Self {
            content: None,
            embeds: vec![DiscordEmbed {
                title: p.name.clone(),
                description,
                url: p.link.url.clone(),
                color: parse_hex_color(&p.color).unwrap_or(0x00FF00),
            }],
        }
    }
}

/// 500ms, 1s, 2s, ... capped at 32s.
fn backoff(attempt: u8) -> Duration {
    let exp = u32::from(attempt.saturating_sub(1)).min(6);
    Duration::from_millis(500u64 << exp)
}

fn parse_hex_color(s: &str) -> Option<u32> {
    u32::from_str_radix(s.trim_start_matches('#'), 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::PayloadLink;

    #[test]
    fn embed_carries_name_link_and_color() {
        let p = NotificationPayload {
            name: "New Game Deal!".into(),
            color: "#00FF00".into(),
            messages: vec!["A\nhttps://x.test/a\n".into(), "\n".into()],
            message: "A\nhttps://x.test/a\n\n\n".into(),
            link: PayloadLink {
                url: "https://x.test/a".into(),
                label: "See this deal".into(),
            },
        };
        let body = serde_json::to_value(DiscordWebhookPayload::from_signal(&p)).unwrap();
        let embed = &body["embeds"][0];
        assert_eq!(embed["title"], "New Game Deal!");
        assert_eq!(embed["description"], "A\nhttps://x.test/a");
        assert_eq!(embed["url"], "https://x.test/a");
        assert_eq!(embed["color"], 0x00FF00);
        assert!(body["content"].is_null());
    }

    #[test]
    fn backoff_doubles_and_caps() {
        assert_eq!(backoff(1), Duration::from_millis(500));
        assert_eq!(backoff(2), Duration::from_millis(1_000));
        assert_eq!(backoff(3), Duration::from_millis(2_000));
        assert_eq!(backoff(255), Duration::from_millis(32_000));
    }

    #[test]
    fn hex_color_parsing() {
        assert_eq!(parse_hex_color("#FF0000"), Some(0xFF0000));
        assert_eq!(parse_hex_color("nope"), None);
    }
}

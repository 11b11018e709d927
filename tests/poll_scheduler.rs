// tests/poll_scheduler.rs
use anyhow::Result;
use async_trait::async_trait;
use game_deals_watcher::ingest::provider::RssProvider;
use game_deals_watcher::ingest::scheduler::{spawn_poll_scheduler, tick, PollSchedulerCfg};
use game_deals_watcher::notify::Notifier;
use game_deals_watcher::{DealWatcher, NotificationPayload, SearchTerm};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const CAG_XML: &str = include_str!("fixtures/cag_rss.xml");

#[derive(Clone, Default)]
struct RecordingNotifier {
    sent: Arc<Mutex<Vec<NotificationPayload>>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, payload: &NotificationPayload) -> Result<()> {
        self.sent.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

fn watcher(xml: &str) -> DealWatcher {
    DealWatcher::new(
        Some(vec![SearchTerm::from("Spiderman PS4")]),
        Box::new(RssProvider::from_fixture_str(xml)),
    )
}

#[tokio::test]
async fn tick_forwards_only_new_signals() {
    let notifier = RecordingNotifier::default();
    let mut w = watcher(CAG_XML);

    tick(&mut w, &notifier).await;
    tick(&mut w, &notifier).await;

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].message.contains("Spiderman PS4 deal"));
}

#[tokio::test]
async fn tick_survives_bad_feed() {
    let notifier = RecordingNotifier::default();
    let mut w = watcher("<rss><channel>");

    tick(&mut w, &notifier).await;

    assert!(notifier.sent.lock().unwrap().is_empty());
    assert!(w.ledger().is_empty());
}

#[tokio::test]
async fn spawned_loop_runs_first_cycle_immediately() {
    let notifier = RecordingNotifier::default();
    let handle = spawn_poll_scheduler(
        PollSchedulerCfg { interval_secs: 3600 },
        watcher(CAG_XML),
        notifier.clone(),
    );

    tokio::time::sleep(Duration::from_millis(200)).await;
    handle.abort();

    assert_eq!(notifier.sent.lock().unwrap().len(), 1);
}

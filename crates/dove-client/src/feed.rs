use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};

use dove_core::{ActiveStat, Badge, BroadcastStats, apply, classify, merge};
use dove_types::events::AppEvent;
use dove_types::models::{BroadcastRecord, LiveRecord, PodcastRecord};

use crate::error::Result;
use crate::http::ApiClient;
use crate::notify::Notifier;

/// Where the two broadcast collections come from.
#[async_trait]
pub trait BroadcastSource: Send + Sync {
    async fn podcasts(&self) -> Result<Vec<PodcastRecord>>;
    async fn live_broadcasts(&self) -> Result<Vec<LiveRecord>>;
}

#[async_trait]
impl BroadcastSource for ApiClient {
    async fn podcasts(&self) -> Result<Vec<PodcastRecord>> {
        self.list_podcasts().await
    }

    async fn live_broadcasts(&self) -> Result<Vec<LiveRecord>> {
        self.list_live_broadcasts().await
    }
}

#[derive(Default)]
struct FeedState {
    podcasts: Vec<PodcastRecord>,
    live: Vec<LiveRecord>,
    merged: Vec<BroadcastRecord>,
}

/// The radio manager's merged podcast + live list.
///
/// Refreshes may overlap; whichever finishes last overwrites the list.
pub struct BroadcastFeed {
    state: RwLock<FeedState>,
    in_flight: AtomicUsize,
    notifier: Notifier,
}

struct LoadingGuard<'a>(&'a AtomicUsize);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl BroadcastFeed {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            state: RwLock::new(FeedState::default()),
            in_flight: AtomicUsize::new(0),
            notifier,
        }
    }

    /// True while at least one refresh is running.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Fetch both collections and replace the merged list. A source that
    /// fails keeps its previously loaded records. Returns the new length.
    pub async fn refresh<S: BroadcastSource + ?Sized>(&self, source: &S) -> usize {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let _loading = LoadingGuard(&self.in_flight);

        let (podcasts, live) = tokio::join!(source.podcasts(), source.live_broadcasts());

        let count = {
            let mut state = self.state.write().await;
            match podcasts {
                Ok(p) => state.podcasts = p,
                Err(e) => warn!("Failed to load podcasts, keeping {} cached: {}", state.podcasts.len(), e),
            }
            match live {
                Ok(l) => state.live = l,
                Err(e) => warn!("Failed to load live broadcasts, keeping {} cached: {}", state.live.len(), e),
            }
            state.merged = merge(state.podcasts.clone(), state.live.clone());
            state.merged.len()
        };

        info!("Broadcast feed refreshed with {} records", count);
        self.notifier.publish(AppEvent::BroadcastsRefreshed { count });
        count
    }

    /// Current list filtered and sorted for `stat`.
    pub async fn view(&self, stat: ActiveStat) -> Vec<BroadcastRecord> {
        apply(&self.state.read().await.merged, stat)
    }

    /// Like [`view`](Self::view), with each record's display badge.
    pub async fn view_with_badges(&self, stat: ActiveStat) -> Vec<(BroadcastRecord, Badge)> {
        self.view(stat)
            .await
            .into_iter()
            .map(|r| {
                let badge = classify(&r);
                (r, badge)
            })
            .collect()
    }

    pub async fn stats(&self) -> BroadcastStats {
        BroadcastStats::compute(&self.state.read().await.merged)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::AtomicBool;

    use tokio::sync::Notify;

    use super::*;
    use crate::Error;

    fn podcast(id: &str, listens: u64) -> PodcastRecord {
        serde_json::from_value(serde_json::json!({
            "id": id, "title": id, "status": "published", "listens": listens
        }))
        .unwrap()
    }

    fn live(id: &str, views: u64) -> LiveRecord {
        serde_json::from_value(serde_json::json!({
            "id": id, "title": id, "isLive": true, "viewCount": views
        }))
        .unwrap()
    }

    #[derive(Default)]
    struct StubSource {
        podcasts: Mutex<Vec<PodcastRecord>>,
        live: Mutex<Vec<LiveRecord>>,
        fail_podcasts: AtomicBool,
    }

    #[async_trait]
    impl BroadcastSource for StubSource {
        async fn podcasts(&self) -> Result<Vec<PodcastRecord>> {
            if self.fail_podcasts.load(Ordering::SeqCst) {
                return Err(Error::Status {
                    endpoint: "/api/podcasts".into(),
                    status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                });
            }
            Ok(self.podcasts.lock().unwrap().clone())
        }

        async fn live_broadcasts(&self) -> Result<Vec<LiveRecord>> {
            Ok(self.live.lock().unwrap().clone())
        }
    }

    #[tokio::test]
    async fn refresh_merges_and_sorts() {
        let source = StubSource::default();
        *source.podcasts.lock().unwrap() = vec![podcast("p1", 850), podcast("p2", 0)];
        *source.live.lock().unwrap() = vec![live("l1", 120)];

        let feed = BroadcastFeed::new(Notifier::new());
        assert_eq!(feed.refresh(&source).await, 3);
        assert!(!feed.is_loading());

        let ids: Vec<String> = feed
            .view(ActiveStat::Listens)
            .await
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, ["p1", "l1", "p2"]);

        let badges = feed.view_with_badges(ActiveStat::Listens).await;
        assert_eq!(badges[1].1, Badge::LIVE);
        assert_eq!(feed.stats().await.total_listens, 970);
    }

    #[tokio::test]
    async fn failed_source_keeps_cached_records() {
        let source = StubSource::default();
        *source.podcasts.lock().unwrap() = vec![podcast("p1", 1)];
        let feed = BroadcastFeed::new(Notifier::new());
        feed.refresh(&source).await;

        source.fail_podcasts.store(true, Ordering::SeqCst);
        *source.live.lock().unwrap() = vec![live("l1", 2)];
        assert_eq!(feed.refresh(&source).await, 2);

        let ids: Vec<String> = feed.view(ActiveStat::Date).await.into_iter().map(|r| r.id).collect();
        assert!(ids.contains(&"p1".to_string()));
        assert!(ids.contains(&"l1".to_string()));
    }

    #[tokio::test]
    async fn first_load_failure_is_empty() {
        let source = StubSource::default();
        source.fail_podcasts.store(true, Ordering::SeqCst);
        let feed = BroadcastFeed::new(Notifier::new());
        assert_eq!(feed.refresh(&source).await, 0);
        assert!(feed.view(ActiveStat::Date).await.is_empty());
    }

    /// Blocks the podcast request until released.
    struct GatedSource {
        gate: Notify,
    }

    #[async_trait]
    impl BroadcastSource for GatedSource {
        async fn podcasts(&self) -> Result<Vec<PodcastRecord>> {
            self.gate.notified().await;
            Ok(vec![podcast("p1", 1)])
        }

        async fn live_broadcasts(&self) -> Result<Vec<LiveRecord>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn loading_while_in_flight() {
        let feed = std::sync::Arc::new(BroadcastFeed::new(Notifier::new()));
        let source = std::sync::Arc::new(GatedSource { gate: Notify::new() });

        let task = {
            let (feed, source) = (feed.clone(), source.clone());
            tokio::spawn(async move { feed.refresh(source.as_ref()).await })
        };

        while !feed.is_loading() {
            tokio::task::yield_now().await;
        }
        source.gate.notify_one();

        assert_eq!(task.await.unwrap(), 1);
        assert!(!feed.is_loading());
    }

    #[tokio::test]
    async fn refresh_is_announced() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();
        let feed = BroadcastFeed::new(notifier);
        feed.refresh(&StubSource::default()).await;
        assert_eq!(rx.recv().await.unwrap(), AppEvent::BroadcastsRefreshed { count: 0 });
    }
}

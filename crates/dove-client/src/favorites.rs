//! Saved ("favorited") devotions.
//!
//! The set lives in the durable key-value store under [`FAVORITES_KEY`] as
//! a JSON list, mirrored server-side through [`FavoritesRemote`]. Every
//! change is published on the [`Notifier`] so other open views update.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use dove_db::KeyValueStore;
use dove_types::api::SavedResponse;
use dove_types::events::AppEvent;
use dove_types::models::{DevotionSnapshot, FavoriteEntry};

use crate::auth::AuthContext;
use crate::error::Result;
use crate::http::ApiClient;
use crate::notify::Notifier;

pub const FAVORITES_KEY: &str = "savedDevotions";

/// Server-side half of the save/unsave dual write.
#[async_trait]
pub trait FavoritesRemote: Send + Sync {
    async fn set_saved(&self, token: &str, devotion_id: &str, saved: bool) -> Result<bool>;
}

#[async_trait]
impl FavoritesRemote for ApiClient {
    async fn set_saved(&self, token: &str, devotion_id: &str, saved: bool) -> Result<bool> {
        self.set_devotion_saved(token, devotion_id, saved).await
    }
}

pub struct FavoritesStore<S, R> {
    store: Arc<S>,
    remote: Arc<R>,
    notifier: Notifier,
    /// Serializes toggles so the branch decision and the write are atomic.
    toggle_lock: Mutex<()>,
}

impl<S, R> FavoritesStore<S, R>
where
    S: KeyValueStore + 'static,
    R: FavoritesRemote,
{
    pub fn new(store: Arc<S>, remote: Arc<R>, notifier: Notifier) -> Self {
        Self {
            store,
            remote,
            notifier,
            toggle_lock: Mutex::new(()),
        }
    }

    pub async fn is_saved(&self, devotion_id: &str) -> Result<bool> {
        let entries = self.load().await?;
        Ok(entries.iter().any(|e| e.id() == devotion_id))
    }

    /// Saved devotions, most recently saved first.
    pub async fn list(&self) -> Result<Vec<FavoriteEntry>> {
        let mut entries = self.load().await?;
        entries.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(entries)
    }

    /// Save the devotion if it is not saved yet, otherwise unsave it.
    ///
    /// Fails with `Unauthenticated` before touching anything when no one is
    /// signed in. The server is updated first; if that fails the local set
    /// is left as it was.
    pub async fn toggle_save(&self, auth: &AuthContext, snapshot: DevotionSnapshot) -> Result<SavedResponse> {
        let token = auth.token()?;

        let _guard = self.toggle_lock.lock().await;

        let mut entries = self.load().await?;
        let position = entries.iter().position(|e| e.id() == snapshot.id);
        let saved = position.is_none();

        let server_saved = self.remote.set_saved(&token, &snapshot.id, saved).await?;
        if server_saved != saved {
            warn!(
                "Server reports devotion {} saved={} after requesting saved={}",
                snapshot.id, server_saved, saved
            );
        }

        let devotion_id = snapshot.id.clone();
        match position {
            Some(idx) => {
                entries.remove(idx);
            }
            None => entries.push(FavoriteEntry {
                devotion: snapshot,
                saved_at: Utc::now(),
            }),
        }
        self.persist(entries).await?;

        debug!("Devotion {} saved={}", devotion_id, saved);
        self.notifier.publish(AppEvent::FavoritesChanged { devotion_id, saved });

        Ok(SavedResponse { saved })
    }

    /// Toggle by id. An already saved devotion is unsaved from its stored
    /// snapshot; `fetch` is only called for one that is not saved yet.
    pub async fn toggle_save_by_id<F, Fut>(
        &self,
        auth: &AuthContext,
        devotion_id: &str,
        fetch: F,
    ) -> Result<(DevotionSnapshot, SavedResponse)>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<DevotionSnapshot>>,
    {
        auth.token()?;

        let stored = self
            .load()
            .await?
            .into_iter()
            .find(|e| e.id() == devotion_id)
            .map(|e| e.devotion);
        let snapshot = match stored {
            Some(snapshot) => snapshot,
            None => fetch().await?,
        };

        let result = self.toggle_save(auth, snapshot.clone()).await?;
        Ok((snapshot, result))
    }

    async fn load(&self) -> Result<Vec<FavoriteEntry>> {
        let store = self.store.clone();
        let raw = tokio::task::spawn_blocking(move || store.get(FAVORITES_KEY)).await??;

        let Some(raw) = raw else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!("Discarding unreadable {}: {}", FAVORITES_KEY, e);
                Ok(Vec::new())
            }
        }
    }

    async fn persist(&self, entries: Vec<FavoriteEntry>) -> Result<()> {
        let json = serde_json::to_string(&entries)?;
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.set(FAVORITES_KEY, &json)).await??;
        Ok(())
    }
}

use serde::{Deserialize, Serialize};

/// Events published to every open view of the running app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AppEvent {
    /// A devotion was saved or unsaved
    FavoritesChanged { devotion_id: String, saved: bool },

    /// The merged broadcast list was replaced
    BroadcastsRefreshed { count: usize },

    /// A session started or ended
    SessionChanged { logged_in: bool },
}

impl AppEvent {
    /// Returns the devotion id if this event concerns a single devotion.
    pub fn devotion_id(&self) -> Option<&str> {
        match self {
            Self::FavoritesChanged { devotion_id, .. } => Some(devotion_id),
            _ => None,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// -- Broadcasts --

/// Which origin collection produced a [`BroadcastRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Podcast,
    Live,
}

/// Publication state. Podcasts are only ever `Draft` or `Published`;
/// live sessions may additionally be `Scheduled`. Records that arrive
/// without a status carry `None` and match neither published nor draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastStatus {
    #[default]
    Draft,
    Published,
    Scheduled,
}

/// A podcast as returned by `GET podcasts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub status: Option<BroadcastStatus>,
    /// Set when the podcast is an archived live session.
    #[serde(default)]
    pub broadcast_start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub listens: Option<u64>,
}

/// A live broadcast as returned by `GET live-broadcasts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stream_url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub status: Option<BroadcastStatus>,
    #[serde(default)]
    pub is_live: bool,
    #[serde(default)]
    pub broadcast_start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub broadcast_end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub view_count: Option<u64>,
}

/// Podcasts and live broadcasts normalized into one shape.
///
/// `id` is only unique within its source collection; use [`BroadcastRecord::key`]
/// when records from both collections are mixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastRecord {
    pub id: String,
    pub source_type: SourceType,
    pub title: String,
    pub speaker: String,
    pub status: Option<BroadcastStatus>,
    pub is_live: bool,
    pub media_url: Option<String>,
    pub thumbnail: Option<String>,
    pub broadcast_start_time: Option<DateTime<Utc>>,
    /// Podcast-only publication date.
    pub date: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub listens: Option<u64>,
    pub view_count: Option<u64>,
}

impl BroadcastRecord {
    /// Identity of the record across the merged collection.
    pub fn key(&self) -> (SourceType, &str) {
        (self.source_type, self.id.as_str())
    }

    /// Listens for podcasts, views for live sessions. Absent counts are zero.
    pub fn engagement(&self) -> u64 {
        match self.source_type {
            SourceType::Podcast => self.listens.unwrap_or(0),
            SourceType::Live => self.view_count.unwrap_or(0),
        }
    }
}

impl From<PodcastRecord> for BroadcastRecord {
    fn from(p: PodcastRecord) -> Self {
        Self {
            id: p.id,
            source_type: SourceType::Podcast,
            title: p.title,
            speaker: p.speaker,
            status: p.status,
            is_live: false,
            media_url: p.audio_url,
            thumbnail: p.thumbnail,
            broadcast_start_time: p.broadcast_start_time,
            date: p.date,
            published_at: p.published_at,
            created_at: p.created_at,
            listens: p.listens,
            view_count: None,
        }
    }
}

impl From<LiveRecord> for BroadcastRecord {
    fn from(l: LiveRecord) -> Self {
        Self {
            id: l.id,
            source_type: SourceType::Live,
            title: l.title,
            speaker: l.speaker,
            status: l.status,
            is_live: l.is_live,
            media_url: l.stream_url,
            thumbnail: l.thumbnail,
            broadcast_start_time: l.broadcast_start_time,
            date: None,
            published_at: l.published_at,
            created_at: l.created_at,
            listens: None,
            view_count: l.view_count,
        }
    }
}

// -- Devotions --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevotionRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub scripture: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub reflection: Option<String>,
    #[serde(default)]
    pub prayer: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// Display fields of a devotion, frozen at the moment it was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevotionSnapshot {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub scripture: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub reflection: Option<String>,
    #[serde(default)]
    pub prayer: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl From<&DevotionRecord> for DevotionSnapshot {
    fn from(d: &DevotionRecord) -> Self {
        Self {
            id: d.id.clone(),
            title: d.title.clone(),
            scripture: d.scripture.clone(),
            content: d.content.clone(),
            reflection: d.reflection.clone(),
            prayer: d.prayer.clone(),
            date: d.date,
            thumbnail: d.thumbnail.clone(),
        }
    }
}

/// A bookmarked devotion. Never refreshed after it is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    #[serde(flatten)]
    pub devotion: DevotionSnapshot,
    pub saved_at: DateTime<Utc>,
}

impl FavoriteEntry {
    pub fn id(&self) -> &str {
        &self.devotion.id
    }
}

// -- Events, ministries, donations --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinistryRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub leader: Option<String>,
    #[serde(default)]
    pub meeting_time: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub donor_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// -- Users, contact --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub office_hours: Option<String>,
}

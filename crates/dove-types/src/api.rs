use serde::{Deserialize, Serialize};

use crate::models::{
    ContactInfo, DevotionRecord, DonationRecord, EventRecord, LiveRecord, MinistryRecord,
    PodcastRecord, UserRecord,
};

// -- JWT Claims --

/// Claims carried by the backend's session token. Read client-side only to
/// learn who is signed in; the server remains the authority on validity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(alias = "id", alias = "userId")]
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: usize,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

// -- Auth --

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

// -- Listings --

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PodcastsResponse {
    #[serde(default)]
    pub podcasts: Vec<PodcastRecord>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BroadcastsResponse {
    #[serde(default)]
    pub broadcasts: Vec<LiveRecord>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DevotionsResponse {
    #[serde(default)]
    pub devotions: Vec<DevotionRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DevotionResponse {
    pub devotion: DevotionRecord,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub events: Vec<EventRecord>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MinistriesResponse {
    #[serde(default)]
    pub ministries: Vec<MinistryRecord>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DonationsResponse {
    #[serde(default)]
    pub donations: Vec<DonationRecord>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfoResponse {
    pub contact_info: ContactInfo,
}

// -- Saved devotions --

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SavedResponse {
    pub saved: bool,
}
